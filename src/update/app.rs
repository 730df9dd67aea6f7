//! Application message handlers (startup, identity, file I/O, execution)

use crate::commands::Cmd;
use crate::editable::SourceBuffer;
use crate::messages::AppMsg;
use crate::model::workspace::is_executable_path;
use crate::model::{AppModel, Identity, RequestTarget};

use super::contract::reload_miners;
use super::workspace::reload_tree;

/// Handle application messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Init => Some(Cmd::batch(vec![reload_tree(model), reload_miners(model)])),

        AppMsg::SignedIn { address } => {
            tracing::info!("Signed in as {}", address);
            model.session.identity = Some(Identity::new(address));
            Some(Cmd::Redraw)
        }

        AppMsg::SignedOut => {
            tracing::info!("Signed out");
            model.session.identity = None;
            Some(Cmd::Redraw)
        }

        AppMsg::FileLoaded { seq, path, result } => {
            if model.session.selected_path() != Some(path.as_str())
                || !model.requests.accept_latest(RequestTarget::FileContent, seq)
            {
                tracing::debug!("Discarding content of {} ({})", path, seq);
                return None;
            }
            match result {
                Ok(content) => {
                    tracing::debug!("Loaded {} ({} bytes)", path, content.len());
                    model.session.buffer = SourceBuffer::with_text(&content);
                    model.scroll.reset();
                }
                Err(e) => {
                    tracing::warn!("Failed to open {}: {}", path, e);
                    model.set_output(format!("Failed to open {}: {}", path, e));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::SaveFile => {
            let Some(path) = model.session.selected_path().map(str::to_string) else {
                tracing::debug!("Save requested with no file selected");
                return None;
            };
            let content = model.session.buffer.content();
            let seq = model.requests.issue(RequestTarget::Save);
            Some(Cmd::SaveFile { seq, path, content })
        }

        AppMsg::SaveCompleted { seq, path, result } => {
            if !model.requests.accept_newer(RequestTarget::Save, seq) {
                return None;
            }
            match result {
                Ok(()) => {
                    tracing::info!("Saved {}", path);
                    model.set_output(format!("File {} saved.", path));
                }
                Err(e) => {
                    tracing::warn!("Failed to save {}: {}", path, e);
                    model.set_output(format!("Failed to save {}: {}", path, e));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::RunFile => {
            let path = model
                .session
                .selected_path()
                .filter(|p| is_executable_path(p))?
                .to_string();
            let seq = model.requests.issue(RequestTarget::Run);
            Some(Cmd::RunFile { seq, path })
        }

        AppMsg::RunCompleted { seq, result } => {
            if !model.requests.accept_newer(RequestTarget::Run, seq) {
                return None;
            }
            match result {
                Ok(output) => model.set_output(output),
                Err(e) => {
                    tracing::warn!("Run failed: {}", e);
                    model.set_output(format!("Run failed: {}", e));
                }
            }
            Some(Cmd::Redraw)
        }
    }
}
