//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod contract;
mod editor;
mod workspace;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::BufferSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use contract::update_contract;
pub use editor::update_editor;
pub use workspace::update_workspace;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Workspace(m) => workspace::update_workspace(model, m),
        Msg::Contract(m) => contract::update_contract(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after buffer state and logs diffs for debugging.
/// Scroll events are too frequent to log.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::EditorMsg;

    let is_noisy = matches!(&msg, Msg::Editor(EditorMsg::Scroll(_)));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = BufferSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = BufferSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "buffer", %diff, "state changed");
    }

    let buffer = &model.session.buffer;
    debug_assert!(
        buffer.selection().end <= buffer.len_chars(),
        "selection out of bounds after {}",
        msg_name
    );
    debug_assert!(model.scroll.is_synced(), "overlay out of sync after {}", msg_name);

    result
}

/// Get a display name for a message type
///
/// Completion messages carry whole file contents, so only the variant
/// name is logged for them.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, ContractMsg, EditorMsg, WorkspaceMsg};

    match msg {
        Msg::Editor(EditorMsg::ReplaceText { text, selection }) => format!(
            "Editor::ReplaceText({} chars, {:?})",
            text.chars().count(),
            selection
        ),
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::App(AppMsg::FileLoaded { seq, path, .. }) => {
            format!("App::FileLoaded({}, {})", seq, path)
        }
        Msg::App(AppMsg::RunCompleted { seq, .. }) => format!("App::RunCompleted({})", seq),
        Msg::App(m) => format!("App::{:?}", m),
        Msg::Workspace(WorkspaceMsg::TreeLoaded { seq, .. }) => {
            format!("Workspace::TreeLoaded({})", seq)
        }
        Msg::Workspace(m) => format!("Workspace::{:?}", m),
        Msg::Contract(ContractMsg::CallCompleted { seq, method, .. }) => {
            format!("Contract::CallCompleted({}, {})", seq, method)
        }
        Msg::Contract(m) => format!("Contract::{:?}", m),
    }
}
