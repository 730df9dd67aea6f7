//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! Every collaborator request carries the sequence number its completion
//! message must echo back.

use crate::model::RequestSeq;
use crate::remote::{ContractCallRequest, ContractDeployRequest};

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// The view changed; re-render
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    // === Storage ===
    ListTree {
        seq: RequestSeq,
    },
    OpenFile {
        seq: RequestSeq,
        path: String,
    },
    SaveFile {
        seq: RequestSeq,
        path: String,
        content: String,
    },
    CreateEntry {
        seq: RequestSeq,
        path: String,
        is_folder: bool,
    },
    DeleteEntry {
        seq: RequestSeq,
        path: String,
    },

    // === Execution ===
    RunFile {
        seq: RequestSeq,
        path: String,
    },
    ListMiners {
        seq: RequestSeq,
    },
    DeployContract {
        seq: RequestSeq,
        request: ContractDeployRequest,
    },
    CallContract {
        seq: RequestSeq,
        request: ContractCallRequest,
    },
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Requests redraw when their completion arrives
            _ => false,
        }
    }

    /// Number of collaborator requests this command issues
    pub fn request_count(&self) -> usize {
        match self {
            Cmd::None | Cmd::Redraw => 0,
            Cmd::Batch(cmds) => cmds.iter().map(Cmd::request_count).sum(),
            _ => 1,
        }
    }

    /// Flatten batches into the list of individual commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }
}
