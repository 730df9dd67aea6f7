//! Session context: who is signed in, what is selected, what is being edited

use crate::editable::SourceBuffer;

/// The signed-in account supplied by the identity collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub address: String,
}

impl Identity {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// State owned by the single active editing session
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Absent when nobody is signed in
    pub identity: Option<Identity>,
    /// `/`-joined path of the file open for editing
    pub selected_path: Option<String>,
    pub buffer: SourceBuffer,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    /// Editing is only possible with a file selected
    pub fn is_editable(&self) -> bool {
        self.selected_path.is_some()
    }

    /// Drop the selection and empty the buffer
    pub fn clear_selection(&mut self) {
        self.selected_path = None;
        self.buffer = SourceBuffer::new();
    }
}
