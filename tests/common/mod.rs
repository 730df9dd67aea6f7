//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use axide::editable::{Selection, SourceBuffer};
use axide::model::{AppModel, FileNode, Identity};
use axide::remote::{
    Backend, ContractCallRequest, ContractDeployRequest, RemoteError, RemoteResult,
};

/// Create a test model editing `main.py` with the given text and selection
pub fn test_model(text: &str, start: usize, end: usize) -> AppModel {
    let mut model = AppModel::default();
    model.session.selected_path = Some("main.py".to_string());
    model.session.buffer = SourceBuffer::with_text(text);
    model.session.buffer.set_selection(Selection::new(start, end));
    model
}

/// A model with a signed-in identity `A`, `main.py` open and miner `M`
pub fn signed_in_model(code: &str) -> AppModel {
    let mut model = test_model(code, 0, 0);
    model.session.identity = Some(Identity::new("A"));
    model.contracts.set_miners(vec!["M".to_string()]);
    model
}

pub fn sample_tree() -> Vec<FileNode> {
    vec![
        FileNode::file("main.py"),
        FileNode::folder(
            "contracts",
            vec![FileNode::file("token.py"), FileNode::file("notes.txt")],
        ),
    ]
}

/// Every request a [`RecordingBackend`] received, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListTree,
    Open(String),
    Save(String, String),
    Create(String, bool),
    Delete(String),
    Run(String),
    ListMiners,
    Deploy(ContractDeployRequest),
    Call(ContractCallRequest),
}

/// In-memory backend that records calls and serves canned answers
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Mutex<Vec<Call>>,
    pub tree: Mutex<Vec<FileNode>>,
    pub files: Mutex<HashMap<String, String>>,
    pub miners: Vec<String>,
    pub run_output: String,
    /// Answer to deploy: an address or a server error message
    pub deploy_answer: Option<Result<String, String>>,
    pub call_answer: Option<Result<Value, String>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            tree: Mutex::new(sample_tree()),
            files: Mutex::new(HashMap::from([
                ("main.py".to_string(), "print(1)".to_string()),
                ("contracts/token.py".to_string(), "class Token:\n    pass\n".to_string()),
                ("contracts/notes.txt".to_string(), "todo".to_string()),
            ])),
            miners: vec!["M".to_string(), "N".to_string()],
            run_output: "1\n".to_string(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the startup listings
    pub fn network_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::ListTree | Call::ListMiners))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Backend for RecordingBackend {
    fn list_tree(&self) -> RemoteResult<Vec<FileNode>> {
        self.record(Call::ListTree);
        Ok(self.tree.lock().unwrap().clone())
    }

    fn open_file(&self, path: &str) -> RemoteResult<String> {
        self.record(Call::Open(path.to_string()));
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::Server("File not found".to_string()))
    }

    fn save_file(&self, path: &str, content: &str) -> RemoteResult<()> {
        self.record(Call::Save(path.to_string(), content.to_string()));
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn create_entry(&self, path: &str, is_folder: bool) -> RemoteResult<()> {
        self.record(Call::Create(path.to_string(), is_folder));
        let node = if is_folder {
            FileNode::folder(path, vec![])
        } else {
            FileNode::file(path)
        };
        self.tree.lock().unwrap().push(node);
        Ok(())
    }

    fn delete_entry(&self, path: &str) -> RemoteResult<()> {
        self.record(Call::Delete(path.to_string()));
        self.tree.lock().unwrap().retain(|n| n.name() != path);
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn run_file(&self, path: &str) -> RemoteResult<String> {
        self.record(Call::Run(path.to_string()));
        Ok(self.run_output.clone())
    }

    fn list_miners(&self) -> RemoteResult<Vec<String>> {
        self.record(Call::ListMiners);
        Ok(self.miners.clone())
    }

    fn deploy_contract(&self, request: &ContractDeployRequest) -> RemoteResult<String> {
        self.record(Call::Deploy(request.clone()));
        match &self.deploy_answer {
            Some(Ok(address)) => Ok(address.clone()),
            Some(Err(message)) => Err(RemoteError::Server(message.clone())),
            None => Ok("0xabc".to_string()),
        }
    }

    fn call_contract(&self, request: &ContractCallRequest) -> RemoteResult<Value> {
        self.record(Call::Call(request.clone()));
        match &self.call_answer {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(RemoteError::Server(message.clone())),
            None => Ok(Value::Null),
        }
    }
}
