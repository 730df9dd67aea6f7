//! HTTP implementation of [`Backend`] using a blocking reqwest client
//!
//! Every call is a single JSON request/response exchange. Requests run on
//! the runtime's worker threads, so blocking here never stalls the editor.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::wire::{
    CallResponse, CreateRequest, DeployResponse, OpenResponse, PathRequest, RunResponse,
    SaveRequest,
};
use super::{Backend, ContractCallRequest, ContractDeployRequest, RemoteError, RemoteResult};
use crate::model::workspace::FileNode;

/// Backend routes, relative to the configured base URL
pub mod routes {
    pub const IDE_LIST: &str = "/api/ide/list";
    pub const IDE_OPEN: &str = "/api/ide/open";
    pub const IDE_SAVE: &str = "/api/ide/save";
    pub const IDE_CREATE: &str = "/api/ide/create";
    pub const IDE_DELETE: &str = "/api/ide/delete";
    pub const IDE_RUN: &str = "/api/ide/run";
    pub const MINERS: &str = "/api/miners";
    pub const CONTRACT_DEPLOY: &str = "/api/contract/deploy";
    pub const CONTRACT_CALL: &str = "/api/contract/call";
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn get<R: DeserializeOwned>(&self, route: &str) -> RemoteResult<R> {
        tracing::debug!("GET {}", route);
        let response = self
            .client
            .get(self.url(route))
            .send()
            .map_err(|e| transport_error(route, e))?;
        decode(route, response)
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, route: &str, body: &B) -> RemoteResult<R> {
        tracing::debug!("POST {}", route);
        let response = self
            .client
            .post(self.url(route))
            .json(body)
            .send()
            .map_err(|e| transport_error(route, e))?;
        decode(route, response)
    }
}

impl Backend for HttpBackend {
    fn list_tree(&self) -> RemoteResult<Vec<FileNode>> {
        self.get(routes::IDE_LIST)
    }

    fn open_file(&self, path: &str) -> RemoteResult<String> {
        let response: OpenResponse = self.post(routes::IDE_OPEN, &PathRequest { path })?;
        Ok(response.content)
    }

    fn save_file(&self, path: &str, content: &str) -> RemoteResult<()> {
        self.post::<_, Value>(routes::IDE_SAVE, &SaveRequest { path, content })
            .map(|_| ())
    }

    fn create_entry(&self, path: &str, is_folder: bool) -> RemoteResult<()> {
        self.post::<_, Value>(routes::IDE_CREATE, &CreateRequest { path, is_folder })
            .map(|_| ())
    }

    fn delete_entry(&self, path: &str) -> RemoteResult<()> {
        self.post::<_, Value>(routes::IDE_DELETE, &PathRequest { path })
            .map(|_| ())
    }

    fn run_file(&self, path: &str) -> RemoteResult<String> {
        let response: RunResponse = self.post(routes::IDE_RUN, &PathRequest { path })?;
        Ok(response.output)
    }

    fn list_miners(&self) -> RemoteResult<Vec<String>> {
        self.get(routes::MINERS)
    }

    fn deploy_contract(&self, request: &ContractDeployRequest) -> RemoteResult<String> {
        let response: DeployResponse = self.post(routes::CONTRACT_DEPLOY, request)?;
        response.contract_address.ok_or_else(|| {
            RemoteError::Transport("Deploy response carried no contract_address".to_string())
        })
    }

    fn call_contract(&self, request: &ContractCallRequest) -> RemoteResult<Value> {
        let response: CallResponse = self.post(routes::CONTRACT_CALL, request)?;
        Ok(response.result)
    }
}

fn transport_error(route: &str, e: reqwest::Error) -> RemoteError {
    tracing::warn!("Request to {} failed: {}", route, e);
    RemoteError::Transport(format!("Request to {} failed: {}", route, e))
}

fn decode<R: DeserializeOwned>(route: &str, response: Response) -> RemoteResult<R> {
    let status = response.status();
    let body: Value = response.json().map_err(|e| {
        RemoteError::Transport(format!("Invalid response from {}: {}", route, e))
    })?;
    interpret(route, status, body)
}

/// Map a decoded body to a result: an `error` field always wins
fn interpret<R: DeserializeOwned>(route: &str, status: StatusCode, body: Value) -> RemoteResult<R> {
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        tracing::warn!("{} returned error ({}): {}", route, status, message);
        return Err(RemoteError::Server(message.to_string()));
    }
    if !status.is_success() {
        return Err(RemoteError::Transport(format!(
            "HTTP error! status: {}",
            status.as_u16()
        )));
    }
    serde_json::from_value(body)
        .map_err(|e| RemoteError::Transport(format!("Unexpected response from {}: {}", route, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_field_becomes_server_error() {
        let result: RemoteResult<DeployResponse> = interpret(
            routes::CONTRACT_DEPLOY,
            StatusCode::BAD_REQUEST,
            json!({"error": "Insufficient balance to deploy contract (gas fee)"}),
        );
        assert_eq!(
            result.unwrap_err(),
            RemoteError::Server("Insufficient balance to deploy contract (gas fee)".into())
        );
    }

    #[test]
    fn test_failure_status_without_error_field_is_transport_error() {
        let result: RemoteResult<Value> =
            interpret(routes::IDE_SAVE, StatusCode::BAD_GATEWAY, json!({}));
        assert_eq!(
            result.unwrap_err(),
            RemoteError::Transport("HTTP error! status: 502".into())
        );
    }

    #[test]
    fn test_listing_decodes() {
        let nodes: Vec<FileNode> = interpret(
            routes::IDE_LIST,
            StatusCode::OK,
            json!([{"type": "file", "name": "main.py"}]),
        )
        .unwrap();
        assert_eq!(nodes, vec![FileNode::file("main.py")]);
    }

    #[test]
    fn test_wrong_shape_is_transport_error() {
        let result: RemoteResult<Vec<String>> =
            interpret(routes::MINERS, StatusCode::OK, json!({"miners": []}));
        assert!(matches!(result, Err(RemoteError::Transport(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://127.0.0.1:5001/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.base_url(), "http://127.0.0.1:5001");
        assert_eq!(
            backend.url(routes::IDE_LIST),
            "http://127.0.0.1:5001/api/ide/list"
        );
    }
}
