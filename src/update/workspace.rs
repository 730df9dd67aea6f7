//! Workspace message handlers (file tree sidebar)

use crate::commands::Cmd;
use crate::messages::WorkspaceMsg;
use crate::model::{AppModel, RequestTarget};

/// Handle workspace messages (file tree, entry creation and deletion)
pub fn update_workspace(model: &mut AppModel, msg: WorkspaceMsg) -> Option<Cmd> {
    match msg {
        WorkspaceMsg::Reload => Some(reload_tree(model)),

        WorkspaceMsg::TreeLoaded { seq, result } => {
            if !model.requests.accept_newer(RequestTarget::Tree, seq) {
                return None;
            }
            match result {
                Ok(nodes) => {
                    tracing::debug!("File tree loaded: {} root entries", nodes.len());
                    model.workspace.set_tree(nodes);
                }
                Err(e) => {
                    tracing::warn!("Failed to list files: {}", e);
                    model.set_output(format!("Failed to list files: {}", e));
                }
            }
            Some(Cmd::Redraw)
        }

        WorkspaceMsg::SelectFile(path) => {
            if model.workspace.loaded && !model.workspace.tree.contains_file(&path) {
                tracing::debug!("Ignoring selection of non-file path {:?}", path);
                return None;
            }
            if model.session.selected_path() == Some(path.as_str()) {
                return None;
            }
            model.session.clear_selection();
            model.session.selected_path = Some(path.clone());
            let seq = model.requests.issue(RequestTarget::FileContent);
            Some(Cmd::batch(vec![Cmd::Redraw, Cmd::OpenFile { seq, path }]))
        }

        WorkspaceMsg::SetNewPath(path) => {
            model.workspace.new_path = path;
            Some(Cmd::Redraw)
        }

        WorkspaceMsg::CreateEntry { is_folder } => {
            let path = model.workspace.new_path.trim().to_string();
            if path.is_empty() {
                return None;
            }
            let seq = model.requests.issue(RequestTarget::Create);
            Some(Cmd::CreateEntry {
                seq,
                path,
                is_folder,
            })
        }

        WorkspaceMsg::EntryCreated { seq, path, result } => {
            if !model.requests.accept_newer(RequestTarget::Create, seq) {
                return None;
            }
            match result {
                Ok(()) => {
                    tracing::info!("Created {}", path);
                    if model.workspace.new_path.trim() == path {
                        model.workspace.new_path.clear();
                    }
                    Some(Cmd::batch(vec![Cmd::Redraw, reload_tree(model)]))
                }
                Err(e) => {
                    tracing::warn!("Failed to create {}: {}", path, e);
                    model.set_output(format!("Failed to create {}: {}", path, e));
                    Some(Cmd::Redraw)
                }
            }
        }

        WorkspaceMsg::DeleteSelected => {
            let path = model.session.selected_path()?.to_string();
            let seq = model.requests.issue(RequestTarget::Delete);
            Some(Cmd::DeleteEntry { seq, path })
        }

        WorkspaceMsg::EntryDeleted { seq, path, result } => {
            if !model.requests.accept_newer(RequestTarget::Delete, seq) {
                return None;
            }
            match result {
                Ok(()) => {
                    tracing::info!("Deleted {}", path);
                    if model.session.selected_path() == Some(path.as_str()) {
                        model.session.clear_selection();
                        model.scroll.reset();
                    }
                    Some(Cmd::batch(vec![Cmd::Redraw, reload_tree(model)]))
                }
                Err(e) => {
                    tracing::warn!("Failed to delete {}: {}", path, e);
                    model.set_output(format!("Failed to delete {}: {}", path, e));
                    Some(Cmd::Redraw)
                }
            }
        }
    }
}

pub(crate) fn reload_tree(model: &mut AppModel) -> Cmd {
    let seq = model.requests.issue(RequestTarget::Tree);
    Cmd::ListTree { seq }
}
