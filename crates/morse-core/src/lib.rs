//! Morse encoding and tone scheduling for Tonewire.
//!
//! Text messages are encoded through a fixed 43-entry Morse symbol table
//! into a queue of dot/dash/word-space tokens, then drained as a strictly
//! sequential, precisely-timed stream of DTMF emissions over the call's
//! single tone sender. Encoding is pure; scheduling is a single cancellable
//! drain task per message.

// Error handling
pub mod error;

// Symbol table and tone queue expansion
pub mod code;

// Tone timing configuration
pub mod timing;

// The drain engine
pub mod scheduler;

// Public exports
pub use code::{encode, tokenize, ToneToken};
pub use error::{MorseError, MorseResult};
pub use scheduler::ToneScheduler;
pub use timing::ToneTiming;
