//! Codec preference rewrite over SDP answers.
//!
//! A pure line-wise transform: the `m=audio` line's payload list is
//! replaced with the policy's payload types (port and transport profile
//! are preserved) and every codec-parameter (`a=fmtp:`) line is dropped.
//! Applying the transform twice yields the same text, and non-audio
//! sections pass through untouched.

use crate::config::CodecPolicy;

/// Rewrite `sdp` according to `policy`. Returns the input unchanged when
/// the policy is disabled or names no payload types.
pub fn apply_codec_preference(sdp: &str, policy: &CodecPolicy) -> String {
    if !policy.enabled || policy.payload_types.is_empty() {
        return sdp.to_string();
    }

    let payloads = policy
        .payload_types
        .iter()
        .map(|pt| pt.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::with_capacity(sdp.len());
    for line in sdp.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);
        let ending = &line[body.len()..];

        if body.starts_with("a=fmtp:") {
            continue;
        }

        if let Some(rest) = body.strip_prefix("m=audio ") {
            let mut fields = rest.split_whitespace();
            if let (Some(port), Some(proto)) = (fields.next(), fields.next()) {
                out.push_str("m=audio ");
                out.push_str(port);
                out.push(' ');
                out.push_str(proto);
                out.push(' ');
                out.push_str(&payloads);
                out.push_str(ending);
                continue;
            }
        }

        out.push_str(line);
    }
    out
}
