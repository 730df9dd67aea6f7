//! Collaborator interfaces: storage, execution and miner listing
//!
//! The editor core never talks to the network directly. Every round trip
//! goes through [`Backend`], which the runtime calls off the update loop;
//! [`HttpBackend`] is the production implementation.

mod http;
pub mod wire;

pub use http::{routes, HttpBackend};
pub use wire::{ContractCallRequest, ContractDeployRequest};

use serde_json::Value;
use thiserror::Error;

use crate::model::workspace::FileNode;

/// Why a collaborator request did not produce a result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The collaborator answered with a structured `{"error": ...}` body
    #[error("{0}")]
    Server(String),
    /// The request did not complete or the answer could not be read
    #[error("{0}")]
    Transport(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// The storage and execution services the editor depends on
///
/// Implementations are shared across worker threads.
pub trait Backend: Send + Sync {
    fn list_tree(&self) -> RemoteResult<Vec<FileNode>>;

    fn open_file(&self, path: &str) -> RemoteResult<String>;

    fn save_file(&self, path: &str, content: &str) -> RemoteResult<()>;

    fn create_entry(&self, path: &str, is_folder: bool) -> RemoteResult<()>;

    fn delete_entry(&self, path: &str) -> RemoteResult<()>;

    /// Execute a source file, returning its captured output
    fn run_file(&self, path: &str) -> RemoteResult<String>;

    fn list_miners(&self) -> RemoteResult<Vec<String>>;

    /// Deploy a contract, returning its address
    fn deploy_contract(&self, request: &ContractDeployRequest) -> RemoteResult<String>;

    /// Invoke a contract method, returning its result
    fn call_contract(&self, request: &ContractCallRequest) -> RemoteResult<Value>;
}
