//! Morse symbol table and tone queue expansion.
//!
//! The table covers 43 symbols: the letters `a`-`z`, the digits `0`-`9`,
//! the punctuation set `. , ? ' - /`, and the space character, which maps
//! to the word-space code `/`. Characters outside the table are dropped,
//! not rejected. Both entry points are pure functions over the input text.

use std::time::Duration;

use crate::timing::ToneTiming;

/// One entry of the drained tone queue.
///
/// Each token carries its own timing through [`ToneToken::duration`] and
/// [`ToneToken::gap`], so the drain loop needs no per-symbol special cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneToken {
    /// Short signal
    Dot,
    /// Long signal
    Dash,
    /// Inter-word pause, emits nothing
    WordSpace,
}

impl ToneToken {
    /// True for tokens that produce a tone emission
    pub fn is_signal(&self) -> bool {
        matches!(self, ToneToken::Dot | ToneToken::Dash)
    }

    /// The token's tone duration (effective pause length for a word-space)
    pub fn duration(&self, timing: &ToneTiming) -> Duration {
        let ms = match self {
            ToneToken::Dot => timing.dot_ms,
            ToneToken::Dash => timing.dash_ms,
            ToneToken::WordSpace => timing.word_space_ms,
        };
        Duration::from_millis(ms)
    }

    /// The trailing gap after the token. Word-spaces carry no gap; their
    /// entire contribution is the word-space duration itself.
    pub fn gap(&self, timing: &ToneTiming) -> Duration {
        match self {
            ToneToken::Dot | ToneToken::Dash => Duration::from_millis(timing.gap_ms),
            ToneToken::WordSpace => Duration::ZERO,
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(ToneToken::Dot),
            '-' => Some(ToneToken::Dash),
            '/' => Some(ToneToken::WordSpace),
            _ => None,
        }
    }
}

/// Code string for a single (already lowercased) character
fn code_for(ch: char) -> Option<&'static str> {
    let code = match ch {
        'a' => ".-",
        'b' => "-...",
        'c' => "-.-.",
        'd' => "-..",
        'e' => ".",
        'f' => "..-.",
        'g' => "--.",
        'h' => "....",
        'i' => "..",
        'j' => ".---",
        'k' => "-.-",
        'l' => ".-..",
        'm' => "--",
        'n' => "-.",
        'o' => "---",
        'p' => ".--.",
        'q' => "--.-",
        'r' => ".-.",
        's' => "...",
        't' => "-",
        'u' => "..-",
        'v' => "...-",
        'w' => ".--",
        'x' => "-..-",
        'y' => "-.--",
        'z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '.' => ".-.-.-",
        ',' => "--..--",
        '?' => "..--..",
        '\'' => ".----.",
        '-' => "-....-",
        '/' => "-..-.",
        ' ' => "/",
        _ => return None,
    };
    Some(code)
}

/// Encode a message into per-character code strings.
///
/// Input is lowercased; characters outside the symbol table are dropped in
/// place, preserving the order of the survivors.
pub fn encode(text: &str) -> Vec<&'static str> {
    text.chars()
        .map(|ch| ch.to_ascii_lowercase())
        .filter_map(code_for)
        .collect()
}

/// Expand a message into the flattened, ordered tone queue consumed by the
/// scheduler.
pub fn tokenize(text: &str) -> Vec<ToneToken> {
    encode(text)
        .iter()
        .flat_map(|code| code.chars().filter_map(ToneToken::from_symbol))
        .collect()
}
