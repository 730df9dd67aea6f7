//! JSON request/response bodies exchanged with the backend

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/contract/deploy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDeployRequest {
    pub code: String,
    pub args: Vec<Value>,
    pub deployer: String,
    pub miner: String,
}

/// Body of `POST /api/contract/call`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractCallRequest {
    pub address: String,
    pub method: String,
    pub args: Vec<Value>,
    pub caller: String,
    pub miner: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PathRequest<'a> {
    pub path: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SaveRequest<'a> {
    pub path: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateRequest<'a> {
    pub path: &'a str,
    #[serde(rename = "isFolder")]
    pub is_folder: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenResponse {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RunResponse {
    #[serde(default)]
    pub output: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DeployResponse {
    pub contract_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CallResponse {
    #[serde(default)]
    pub result: Value,
}
