//! Built-in prompts for the shipped agent presets.

mod manus;

pub use manus::{MANUS_NEXT_STEP_PROMPT, MANUS_SYSTEM_PROMPT};
