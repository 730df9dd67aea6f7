//! Input surface message handlers (indentation, edits, scrolling)

use crate::commands::Cmd;
use crate::editable::handle_tab;
use crate::messages::EditorMsg;
use crate::model::AppModel;

/// Handle input surface messages
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::Scroll(offset) => {
            model.scroll.on_surface_scroll(offset);
            Some(Cmd::Redraw)
        }

        // Without a selected file the surface is read-only
        _ if !model.session.is_editable() => {
            tracing::trace!("Ignoring edit with no file selected");
            None
        }

        EditorMsg::Tab { shift } => {
            let buffer = &mut model.session.buffer;
            let edit = handle_tab(buffer.rope(), buffer.selection(), shift, &model.indent_unit);
            buffer.apply(edit);
            Some(Cmd::Redraw)
        }

        EditorMsg::ReplaceText { text, selection } => {
            model.session.buffer.replace(&text, selection);
            Some(Cmd::Redraw)
        }

        EditorMsg::SetSelection(selection) => {
            model.session.buffer.set_selection(selection);
            Some(Cmd::Redraw)
        }
    }
}
