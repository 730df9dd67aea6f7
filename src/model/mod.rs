//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod contract;
pub mod requests;
pub mod scroll;
pub mod session;
pub mod workspace;

pub use contract::{
    miner_label, parse_args, ContractPanel, Workflow, WorkflowError, WorkflowKind,
    WorkflowOutcome, WorkflowState,
};
pub use requests::{RequestSeq, RequestTarget, RequestTracker};
pub use scroll::{OverlayViewport, ScrollObserver, ScrollOffset, ScrollSync};
pub use session::{Identity, Session};
pub use workspace::{FileNode, FileTree, NodeKind, TreeRow, Workspace};

use crate::config::EditorConfig;
use crate::editable::IndentUnit;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Identity, selected path and the buffer being edited
    pub session: Session,
    /// File tree sidebar
    pub workspace: Workspace,
    /// Input surface / overlay scroll coupling
    pub scroll: ScrollSync,
    /// Deploy and call side panel
    pub contracts: ContractPanel,
    /// Output console text (run output, call results, storage errors)
    pub output: String,
    /// Sequence numbers of in-flight collaborator requests
    pub requests: RequestTracker,
    /// Persisted editor configuration
    pub config: EditorConfig,
    /// Indentation increment derived from `config.indent_width`
    pub indent_unit: IndentUnit,
}

impl AppModel {
    pub fn new(config: EditorConfig) -> Self {
        let indent_unit = config.indent_unit();
        Self {
            session: Session::new(),
            workspace: Workspace::new(),
            scroll: ScrollSync::new(),
            contracts: ContractPanel::new(),
            output: String::new(),
            requests: RequestTracker::new(),
            config,
            indent_unit,
        }
    }

    /// Sidebar rows with the current selection marked
    pub fn tree_rows(&self) -> Vec<TreeRow> {
        self.workspace.tree.render(self.session.selected_path())
    }

    pub fn deploy_status(&self) -> String {
        self.contracts.deploy.status_text()
    }

    pub fn call_status(&self) -> String {
        self.contracts.call.status_text()
    }

    /// Replace the output console text
    pub fn set_output(&mut self, text: impl Into<String>) {
        self.output = text.into();
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
