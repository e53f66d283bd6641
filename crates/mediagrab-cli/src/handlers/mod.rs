//! Command handlers.
//!
//! Handlers are thin: they turn CLI arguments into settings, call into
//! `mediagrab-download` or `mediagrab-core`, and format output.

pub mod parse;
pub mod watch;
