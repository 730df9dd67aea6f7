//! Contract side panel: deploy and call workflows
//!
//! Each workflow is a small state machine:
//!
//! ```text
//! Idle -> Validating -> Submitting{seq} -> Success | Failure
//! ```
//!
//! Every attempt starts from `Idle` again, so the previous result is
//! overwritten as soon as the user triggers the action. Validation failures
//! jump straight to `Failure` without issuing a request.

use serde_json::Value;
use thiserror::Error;

use super::requests::RequestSeq;
use crate::remote::RemoteError;

/// Default text of the constructor / method argument fields
pub const EMPTY_ARGS: &str = "[]";

/// Characters kept on each side of an abbreviated miner address
const MINER_LABEL_EDGE: usize = 10;

/// Which of the two panel workflows a state belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    Deploy,
    Call,
}

/// Why a workflow attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("no signed-in identity")]
    AuthRequired,
    #[error("selected file is not a deployable source file")]
    WrongFileType,
    #[error("arguments are not a JSON array: {0}")]
    ArgsParse(String),
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Transport(String),
}

impl From<RemoteError> for WorkflowError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Server(message) => WorkflowError::Server(message),
            RemoteError::Transport(message) => WorkflowError::Transport(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Deployed { contract_address: String },
    Called { method: String, result: Value },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Validating,
    Submitting {
        seq: RequestSeq,
    },
    Success(WorkflowOutcome),
    Failure(WorkflowError),
}

impl WorkflowState {
    /// Whether a completion carrying `seq` belongs to the current attempt
    pub fn awaits(&self, seq: RequestSeq) -> bool {
        matches!(self, WorkflowState::Submitting { seq: current } if *current == seq)
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            WorkflowState::Failure(err) => Some(err),
            _ => None,
        }
    }
}

/// One deploy or call workflow with its user-visible status line
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub kind: WorkflowKind,
    pub state: WorkflowState,
}

impl Workflow {
    pub fn new(kind: WorkflowKind) -> Self {
        Self {
            kind,
            state: WorkflowState::Idle,
        }
    }

    /// Start a fresh attempt, discarding whatever the previous one left
    pub fn begin(&mut self) {
        self.state = WorkflowState::Validating;
    }

    pub fn submit(&mut self, seq: RequestSeq) {
        self.state = WorkflowState::Submitting { seq };
    }

    pub fn fail(&mut self, err: WorkflowError) {
        self.state = WorkflowState::Failure(err);
    }

    pub fn succeed(&mut self, outcome: WorkflowOutcome) {
        self.state = WorkflowState::Success(outcome);
    }

    /// Status line shown under the panel button; empty while idle
    pub fn status_text(&self) -> String {
        match (&self.state, self.kind) {
            (WorkflowState::Idle, _) | (WorkflowState::Validating, _) => String::new(),
            (WorkflowState::Submitting { .. }, WorkflowKind::Deploy) => "Deploying...".into(),
            (WorkflowState::Submitting { .. }, WorkflowKind::Call) => "Calling method...".into(),
            (WorkflowState::Success(WorkflowOutcome::Deployed { contract_address }), _) => {
                format!(
                    "Contract deployed successfully! Address: {}",
                    contract_address
                )
            }
            (WorkflowState::Success(WorkflowOutcome::Called { .. }), _) => {
                "Call successful.".into()
            }
            (WorkflowState::Failure(err), kind) => failure_text(err, kind),
        }
    }
}

fn failure_text(err: &WorkflowError, kind: WorkflowKind) -> String {
    match (err, kind) {
        (WorkflowError::AuthRequired, WorkflowKind::Deploy) => {
            "You must be logged in to deploy a contract.".into()
        }
        (WorkflowError::AuthRequired, WorkflowKind::Call) => {
            "You must be logged in to call a contract.".into()
        }
        (WorkflowError::WrongFileType, _) => {
            "Please select a Python file to deploy as a contract.".into()
        }
        (WorkflowError::ArgsParse(_), WorkflowKind::Deploy) => {
            "Invalid constructor arguments. Please provide a valid JSON array.".into()
        }
        (WorkflowError::ArgsParse(_), WorkflowKind::Call) => {
            "Invalid method arguments. Please provide a valid JSON array.".into()
        }
        (WorkflowError::Server(message), _) | (WorkflowError::Transport(message), _) => {
            format!("Error: {}", message)
        }
    }
}

/// Parse an argument field; only a JSON array is accepted
pub fn parse_args(text: &str) -> Result<Vec<Value>, WorkflowError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(WorkflowError::ArgsParse(format!(
            "expected an array, found {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(WorkflowError::ArgsParse(e.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Short display form of a miner address: `first10...last10`
pub fn miner_label(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= MINER_LABEL_EDGE * 2 {
        return address.to_string();
    }
    let head: String = chars[..MINER_LABEL_EDGE].iter().collect();
    let tail: String = chars[chars.len() - MINER_LABEL_EDGE..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Side panel fields and the two workflows
#[derive(Debug, Clone, PartialEq)]
pub struct ContractPanel {
    pub constructor_args: String,
    pub call_address: String,
    pub call_method: String,
    pub call_args: String,
    pub miners: Vec<String>,
    pub selected_miner: Option<String>,
    pub deploy: Workflow,
    pub call: Workflow,
}

impl Default for ContractPanel {
    fn default() -> Self {
        Self {
            constructor_args: EMPTY_ARGS.to_string(),
            call_address: String::new(),
            call_method: String::new(),
            call_args: EMPTY_ARGS.to_string(),
            miners: Vec::new(),
            selected_miner: None,
            deploy: Workflow::new(WorkflowKind::Deploy),
            call: Workflow::new(WorkflowKind::Call),
        }
    }
}

impl ContractPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the miner list; keeps the selection if it is still listed,
    /// otherwise falls back to the first miner
    pub fn set_miners(&mut self, miners: Vec<String>) {
        let keep = self
            .selected_miner
            .as_ref()
            .is_some_and(|current| miners.contains(current));
        if !keep {
            self.selected_miner = miners.first().cloned();
        }
        self.miners = miners;
    }

    /// Miner sent with requests; empty when none is selected
    pub fn miner(&self) -> &str {
        self.selected_miner.as_deref().unwrap_or("")
    }

    pub fn miner_labels(&self) -> Vec<String> {
        self.miners.iter().map(|m| miner_label(m)).collect()
    }

    pub fn workflow(&self, kind: WorkflowKind) -> &Workflow {
        match kind {
            WorkflowKind::Deploy => &self.deploy,
            WorkflowKind::Call => &self.call,
        }
    }

    pub fn workflow_mut(&mut self, kind: WorkflowKind) -> &mut Workflow {
        match kind {
            WorkflowKind::Deploy => &mut self.deploy,
            WorkflowKind::Call => &mut self.call,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_args_accepts_arrays_only() {
        assert_eq!(parse_args("[]").unwrap(), Vec::<Value>::new());
        assert_eq!(
            parse_args(r#"[1, "two", {"three": 3}]"#).unwrap(),
            vec![json!(1), json!("two"), json!({"three": 3})]
        );
        assert!(matches!(parse_args("{}"), Err(WorkflowError::ArgsParse(_))));
        assert!(matches!(parse_args("42"), Err(WorkflowError::ArgsParse(_))));
        assert!(matches!(parse_args("[1,"), Err(WorkflowError::ArgsParse(_))));
        assert!(matches!(parse_args(""), Err(WorkflowError::ArgsParse(_))));
    }

    #[test]
    fn test_miner_label_abbreviates_long_addresses() {
        let address = "0x1234567890abcdefABCDEF0987654321";
        assert_eq!(miner_label(address), "0x12345678...0987654321");
        assert_eq!(miner_label("short"), "short");
    }

    #[test]
    fn test_set_miners_selects_first() {
        let mut panel = ContractPanel::new();
        assert_eq!(panel.miner(), "");
        panel.set_miners(vec!["M1".into(), "M2".into()]);
        assert_eq!(panel.miner(), "M1");
    }

    #[test]
    fn test_set_miners_keeps_listed_selection() {
        let mut panel = ContractPanel::new();
        panel.set_miners(vec!["M1".into(), "M2".into()]);
        panel.selected_miner = Some("M2".into());
        panel.set_miners(vec!["M0".into(), "M2".into()]);
        assert_eq!(panel.miner(), "M2");
        panel.set_miners(vec![]);
        assert_eq!(panel.selected_miner, None);
    }

    #[test]
    fn test_miner_labels_follow_list_order() {
        let mut panel = ContractPanel::new();
        panel.set_miners(vec!["B".repeat(30), "short".into()]);
        assert_eq!(
            panel.miner_labels(),
            vec![format!("{}...{}", "B".repeat(10), "B".repeat(10)), "short".into()]
        );
    }

    #[test]
    fn test_status_texts() {
        let mut deploy = Workflow::new(WorkflowKind::Deploy);
        assert_eq!(deploy.status_text(), "");
        deploy.submit(RequestSeq(1));
        assert_eq!(deploy.status_text(), "Deploying...");
        deploy.succeed(WorkflowOutcome::Deployed {
            contract_address: "0xabc".into(),
        });
        assert_eq!(
            deploy.status_text(),
            "Contract deployed successfully! Address: 0xabc"
        );
        deploy.fail(WorkflowError::Server("Insufficient balance".into()));
        assert_eq!(deploy.status_text(), "Error: Insufficient balance");

        let mut call = Workflow::new(WorkflowKind::Call);
        call.fail(WorkflowError::AuthRequired);
        assert_eq!(
            call.status_text(),
            "You must be logged in to call a contract."
        );
        call.fail(WorkflowError::ArgsParse("eof".into()));
        assert_eq!(
            call.status_text(),
            "Invalid method arguments. Please provide a valid JSON array."
        );
    }

    #[test]
    fn test_awaits_only_current_attempt() {
        let mut workflow = Workflow::new(WorkflowKind::Deploy);
        workflow.begin();
        workflow.submit(RequestSeq(3));
        assert!(workflow.state.awaits(RequestSeq(3)));
        assert!(!workflow.state.awaits(RequestSeq(2)));
        workflow.begin();
        assert!(!workflow.state.awaits(RequestSeq(3)));
    }

    #[test]
    fn test_remote_error_conversion() {
        assert_eq!(
            WorkflowError::from(RemoteError::Server("boom".into())),
            WorkflowError::Server("boom".into())
        );
        assert_eq!(
            WorkflowError::from(RemoteError::Transport("refused".into())),
            WorkflowError::Transport("refused".into())
        );
    }
}
