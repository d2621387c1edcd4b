//! Collaborators around the core: speech synthesis, the local audio cache,
//! Cast device control, and the commands that string them together.

pub mod cache;
pub mod commands;
pub mod device;
pub mod tts;
