//! CLI module graph.

pub mod command;
pub mod output;
pub mod progress;
pub mod reset;
pub mod run;
pub mod status;
pub mod summary;
