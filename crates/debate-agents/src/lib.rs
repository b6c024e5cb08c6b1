//! Scientist-vs-Philosopher debate driven by an OpenAI-compatible model.
//!
//! The turn-taking protocol itself lives in the `coordination` crate; this
//! crate binds it to a text-generation port:
//!
//! - `generator`: the `TextGenerator` port and its rig-backed implementation
//! - `agents`: debaters, memory summarizer, judge
//! - `controller`: sequences the agents through the workflow state machine
//! - `config`: TOML/env configuration
//! - `sink` / `telemetry`: output and logging

pub mod agents;
pub mod config;
pub mod controller;
pub mod errors;
pub mod generator;
pub mod prompts;
pub mod sink;
pub mod telemetry;

pub use agents::AgentSet;
pub use config::DebateConfig;
pub use controller::DebateController;
pub use errors::{DebateError, GenerationError};
pub use generator::{RigGenerator, TextGenerator};
