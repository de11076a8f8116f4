//! Address-acquisition dialogue.
//!
//! The machine in `machine` is pure: it consumes one conversational
//! event at a time and emits an effect (a prompt, a geocoding request,
//! or a terminal outcome) without doing any I/O itself. The turn
//! handler drives the effects and feeds resolution outcomes back.

mod machine;
pub mod prompts;

pub use machine::{AcquisitionEvent, AcquisitionState, InputMode, Phase, PromptKind, StepEffect};
