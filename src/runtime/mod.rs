//! Runtime module - executes commands and feeds completions back
//!
//! - `app` - owns the model, runs collaborator requests on worker threads

pub mod app;

pub use app::App;
