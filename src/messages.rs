//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Messages come from
//! two places: user actions, and collaborator completions sent back by the
//! runtime. Completions always carry the [`RequestSeq`] of their request.

use serde_json::Value;

use crate::editable::Selection;
use crate::model::{FileNode, RequestSeq, ScrollOffset};
use crate::remote::RemoteError;

pub type RemoteOutcome<T> = Result<T, RemoteError>;

/// Input surface messages (indentation, direct edits, scrolling)
#[derive(Debug, Clone)]
pub enum EditorMsg {
    /// Tab (`shift: false`) or Shift+Tab (`shift: true`)
    Tab { shift: bool },
    /// The input surface's text changed by direct typing or paste
    ReplaceText { text: String, selection: Selection },
    /// Selection moved without a text change
    SetSelection(Selection),
    /// The input surface scrolled
    Scroll(ScrollOffset),
}

/// File tree sidebar messages
#[derive(Debug, Clone)]
pub enum WorkspaceMsg {
    /// Request a fresh listing
    Reload,
    TreeLoaded {
        seq: RequestSeq,
        result: RemoteOutcome<Vec<FileNode>>,
    },
    /// A file leaf was clicked
    SelectFile(String),
    /// Text of the new-entry path field changed
    SetNewPath(String),
    /// Create File / Create Folder pressed
    CreateEntry { is_folder: bool },
    EntryCreated {
        seq: RequestSeq,
        path: String,
        result: RemoteOutcome<()>,
    },
    /// Delete pressed with a file selected
    DeleteSelected,
    EntryDeleted {
        seq: RequestSeq,
        path: String,
        result: RemoteOutcome<()>,
    },
}

/// Contract side panel messages
#[derive(Debug, Clone)]
pub enum ContractMsg {
    SetConstructorArgs(String),
    SetCallAddress(String),
    SetCallMethod(String),
    SetCallArgs(String),
    SelectMiner(String),
    /// Deploy button
    Deploy,
    /// Call Method button
    Call,
    DeployCompleted {
        seq: RequestSeq,
        result: RemoteOutcome<String>,
    },
    CallCompleted {
        seq: RequestSeq,
        method: String,
        result: RemoteOutcome<Value>,
    },
    ReloadMiners,
    MinersLoaded {
        seq: RequestSeq,
        result: RemoteOutcome<Vec<String>>,
    },
}

/// Application-level messages (startup, identity, file I/O)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Initial load of the tree and miner list
    Init,
    /// The identity provider reported a signed-in account
    SignedIn { address: String },
    SignedOut,
    /// File load completed (async result)
    FileLoaded {
        seq: RequestSeq,
        path: String,
        result: RemoteOutcome<String>,
    },
    /// Save the buffer to the selected path
    SaveFile,
    SaveCompleted {
        seq: RequestSeq,
        path: String,
        result: RemoteOutcome<()>,
    },
    /// Run the selected file
    RunFile,
    RunCompleted {
        seq: RequestSeq,
        result: RemoteOutcome<String>,
    },
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Editor(EditorMsg),
    Workspace(WorkspaceMsg),
    Contract(ContractMsg),
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn tab(shift: bool) -> Self {
        Msg::Editor(EditorMsg::Tab { shift })
    }

    pub fn scroll(top: f32, left: f32) -> Self {
        Msg::Editor(EditorMsg::Scroll(ScrollOffset::new(top, left)))
    }

    pub fn select_file(path: impl Into<String>) -> Self {
        Msg::Workspace(WorkspaceMsg::SelectFile(path.into()))
    }

    pub fn signed_in(address: impl Into<String>) -> Self {
        Msg::App(AppMsg::SignedIn {
            address: address.into(),
        })
    }
}
