//! axide - editor core of a contract-development tool
//!
//! This crate provides the highlighter, indentation engine, file tree and
//! contract workflows of a small source editor implementing the Elm
//! Architecture pattern. Collaborator services sit behind
//! [`remote::Backend`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod messages;
pub mod model;
pub mod remote;
pub mod runtime;
pub mod syntax;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
