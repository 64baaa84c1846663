//! MindBloom: psychological self-assessment scoring and a wellness chat
//! assistant backed by a generative-language API.

pub mod app;
pub mod assessment;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod format;
pub mod llm;
pub mod render;
pub mod resources;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
