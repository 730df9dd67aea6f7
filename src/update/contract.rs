//! Contract side panel handlers: deploy and call workflows, miner list

use crate::commands::Cmd;
use crate::messages::ContractMsg;
use crate::model::workspace::is_executable_path;
use crate::model::{
    parse_args, AppModel, RequestTarget, WorkflowError, WorkflowKind, WorkflowOutcome,
};
use crate::remote::{ContractCallRequest, ContractDeployRequest};

/// Handle contract panel messages
pub fn update_contract(model: &mut AppModel, msg: ContractMsg) -> Option<Cmd> {
    match msg {
        ContractMsg::SetConstructorArgs(text) => {
            model.contracts.constructor_args = text;
            Some(Cmd::Redraw)
        }
        ContractMsg::SetCallAddress(text) => {
            model.contracts.call_address = text;
            Some(Cmd::Redraw)
        }
        ContractMsg::SetCallMethod(text) => {
            model.contracts.call_method = text;
            Some(Cmd::Redraw)
        }
        ContractMsg::SetCallArgs(text) => {
            model.contracts.call_args = text;
            Some(Cmd::Redraw)
        }

        ContractMsg::SelectMiner(miner) => {
            if !model.contracts.miners.contains(&miner) {
                tracing::debug!("Ignoring unknown miner {}", miner);
                return None;
            }
            model.contracts.selected_miner = Some(miner);
            Some(Cmd::Redraw)
        }

        ContractMsg::Deploy => {
            model.contracts.deploy.begin();
            match deploy_request(model) {
                Ok(request) => {
                    let seq = model.requests.issue(RequestTarget::Deploy);
                    tracing::info!("Deploying contract {} as {}", seq, request.deployer);
                    model.contracts.deploy.submit(seq);
                    Some(Cmd::batch(vec![
                        Cmd::Redraw,
                        Cmd::DeployContract { seq, request },
                    ]))
                }
                Err(err) => reject(model, WorkflowKind::Deploy, err),
            }
        }

        ContractMsg::Call => {
            model.contracts.call.begin();
            match call_request(model) {
                Ok(request) => {
                    let seq = model.requests.issue(RequestTarget::Call);
                    tracing::info!(
                        "Calling {}.{} {}",
                        request.address,
                        request.method,
                        seq
                    );
                    model.contracts.call.submit(seq);
                    Some(Cmd::batch(vec![
                        Cmd::Redraw,
                        Cmd::CallContract { seq, request },
                    ]))
                }
                Err(err) => reject(model, WorkflowKind::Call, err),
            }
        }

        ContractMsg::DeployCompleted { seq, result } => {
            if !model.contracts.deploy.state.awaits(seq)
                || !model.requests.accept_latest(RequestTarget::Deploy, seq)
            {
                tracing::debug!("Discarding deploy response {} for a finished attempt", seq);
                return None;
            }
            match result {
                Ok(contract_address) => {
                    tracing::info!("Contract deployed at {}", contract_address);
                    model.contracts.call_address = contract_address.clone();
                    model
                        .contracts
                        .deploy
                        .succeed(WorkflowOutcome::Deployed { contract_address });
                }
                Err(e) => {
                    tracing::warn!("Deploy {} failed: {}", seq, e);
                    model.contracts.deploy.fail(e.into());
                }
            }
            Some(Cmd::Redraw)
        }

        ContractMsg::CallCompleted {
            seq,
            method,
            result,
        } => {
            if !model.contracts.call.state.awaits(seq)
                || !model.requests.accept_latest(RequestTarget::Call, seq)
            {
                tracing::debug!("Discarding call response {} for a finished attempt", seq);
                return None;
            }
            match result {
                Ok(result) => {
                    let pretty =
                        serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string());
                    model.set_output(format!("Result from {}:\n{}", method, pretty));
                    model
                        .contracts
                        .call
                        .succeed(WorkflowOutcome::Called { method, result });
                }
                Err(e) => {
                    tracing::warn!("Call {} failed: {}", seq, e);
                    model.contracts.call.fail(e.into());
                }
            }
            Some(Cmd::Redraw)
        }

        ContractMsg::ReloadMiners => Some(reload_miners(model)),

        ContractMsg::MinersLoaded { seq, result } => {
            if !model.requests.accept_newer(RequestTarget::Miners, seq) {
                return None;
            }
            match result {
                Ok(miners) => {
                    tracing::debug!("{} miners available", miners.len());
                    model.contracts.set_miners(miners);
                }
                Err(e) => tracing::warn!("Failed to list miners: {}", e),
            }
            Some(Cmd::Redraw)
        }
    }
}

pub(crate) fn reload_miners(model: &mut AppModel) -> Cmd {
    let seq = model.requests.issue(RequestTarget::Miners);
    Cmd::ListMiners { seq }
}

fn reject(model: &mut AppModel, kind: WorkflowKind, err: WorkflowError) -> Option<Cmd> {
    tracing::debug!("{:?} rejected before submission: {}", kind, err);
    model.contracts.workflow_mut(kind).fail(err);
    Some(Cmd::Redraw)
}

/// Validate the deploy preconditions in order and package the buffer
fn deploy_request(model: &AppModel) -> Result<ContractDeployRequest, WorkflowError> {
    let identity = model
        .session
        .identity
        .as_ref()
        .ok_or(WorkflowError::AuthRequired)?;
    model
        .session
        .selected_path()
        .filter(|path| is_executable_path(path))
        .ok_or(WorkflowError::WrongFileType)?;
    let args = parse_args(&model.contracts.constructor_args)?;

    Ok(ContractDeployRequest {
        code: model.session.buffer.content(),
        args,
        deployer: identity.address.clone(),
        miner: model.contracts.miner().to_string(),
    })
}

fn call_request(model: &AppModel) -> Result<ContractCallRequest, WorkflowError> {
    let identity = model
        .session
        .identity
        .as_ref()
        .ok_or(WorkflowError::AuthRequired)?;
    let args = parse_args(&model.contracts.call_args)?;

    Ok(ContractCallRequest {
        address: model.contracts.call_address.clone(),
        method: model.contracts.call_method.clone(),
        args,
        caller: identity.address.clone(),
        miner: model.contracts.miner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::SourceBuffer;
    use crate::model::{Identity, RequestSeq, WorkflowState};
    use crate::remote::RemoteError;
    use serde_json::json;

    fn signed_in_model() -> AppModel {
        let mut model = AppModel::default();
        model.session.identity = Some(Identity::new("A"));
        model.session.selected_path = Some("main.py".into());
        model.session.buffer = SourceBuffer::with_text("print(1)");
        model.contracts.set_miners(vec!["M".into()]);
        model
    }

    fn submitted_seq(cmd: Option<Cmd>) -> RequestSeq {
        cmd.into_iter()
            .flat_map(Cmd::flatten)
            .find_map(|c| match c {
                Cmd::DeployContract { seq, .. } | Cmd::CallContract { seq, .. } => Some(seq),
                _ => None,
            })
            .expect("a submitted request")
    }

    #[test]
    fn test_deploy_packages_buffer_and_fields() {
        let mut model = signed_in_model();
        let cmd = update_contract(&mut model, ContractMsg::Deploy).unwrap();
        let request = cmd
            .flatten()
            .into_iter()
            .find_map(|c| match c {
                Cmd::DeployContract { request, .. } => Some(request),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            request,
            ContractDeployRequest {
                code: "print(1)".into(),
                args: vec![],
                deployer: "A".into(),
                miner: "M".into(),
            }
        );
        assert!(matches!(
            model.contracts.deploy.state,
            WorkflowState::Submitting { .. }
        ));
        assert_eq!(model.deploy_status(), "Deploying...");
    }

    #[test]
    fn test_deploy_checks_identity_before_file_type() {
        let mut model = signed_in_model();
        model.session.identity = None;
        model.session.selected_path = Some("notes.txt".into());
        let cmd = update_contract(&mut model, ContractMsg::Deploy).unwrap();
        assert_eq!(cmd.request_count(), 0);
        assert_eq!(
            model.contracts.deploy.state,
            WorkflowState::Failure(WorkflowError::AuthRequired)
        );
    }

    #[test]
    fn test_deploy_with_nothing_selected_is_wrong_file_type() {
        let mut model = signed_in_model();
        model.session.clear_selection();
        update_contract(&mut model, ContractMsg::Deploy);
        assert_eq!(
            model.contracts.deploy.state.error(),
            Some(&WorkflowError::WrongFileType)
        );
    }

    #[test]
    fn test_deploy_success_prefills_call_address() {
        let mut model = signed_in_model();
        let seq = submitted_seq(update_contract(&mut model, ContractMsg::Deploy));
        update_contract(
            &mut model,
            ContractMsg::DeployCompleted {
                seq,
                result: Ok("0xabc".into()),
            },
        );
        assert_eq!(model.contracts.call_address, "0xabc");
        assert_eq!(
            model.deploy_status(),
            "Contract deployed successfully! Address: 0xabc"
        );
    }

    #[test]
    fn test_deploy_server_error_is_verbatim() {
        let mut model = signed_in_model();
        let seq = submitted_seq(update_contract(&mut model, ContractMsg::Deploy));
        update_contract(
            &mut model,
            ContractMsg::DeployCompleted {
                seq,
                result: Err(RemoteError::Server("Insufficient balance".into())),
            },
        );
        assert_eq!(model.deploy_status(), "Error: Insufficient balance");
        assert_eq!(model.contracts.call_address, "");
    }

    #[test]
    fn test_superseded_deploy_response_is_discarded() {
        let mut model = signed_in_model();
        let first = submitted_seq(update_contract(&mut model, ContractMsg::Deploy));
        let second = submitted_seq(update_contract(&mut model, ContractMsg::Deploy));

        let stale = update_contract(
            &mut model,
            ContractMsg::DeployCompleted {
                seq: first,
                result: Ok("0xold".into()),
            },
        );
        assert!(stale.is_none());
        assert!(model.contracts.deploy.state.awaits(second));

        update_contract(
            &mut model,
            ContractMsg::DeployCompleted {
                seq: second,
                result: Ok("0xnew".into()),
            },
        );
        assert_eq!(model.contracts.call_address, "0xnew");
    }

    #[test]
    fn test_response_after_validation_failure_is_discarded() {
        let mut model = signed_in_model();
        let seq = submitted_seq(update_contract(&mut model, ContractMsg::Deploy));
        model.contracts.constructor_args = "not json".into();
        update_contract(&mut model, ContractMsg::Deploy);

        update_contract(
            &mut model,
            ContractMsg::DeployCompleted {
                seq,
                result: Ok("0xabc".into()),
            },
        );
        assert!(matches!(
            model.contracts.deploy.state,
            WorkflowState::Failure(WorkflowError::ArgsParse(_))
        ));
    }

    #[test]
    fn test_call_success_writes_output() {
        let mut model = signed_in_model();
        model.contracts.call_address = "0xabc".into();
        model.contracts.call_method = "get".into();
        model.contracts.call_args = r#"["k"]"#.into();
        let seq = submitted_seq(update_contract(&mut model, ContractMsg::Call));
        assert_eq!(model.call_status(), "Calling method...");

        update_contract(
            &mut model,
            ContractMsg::CallCompleted {
                seq,
                method: "get".into(),
                result: Ok(json!({"value": 7})),
            },
        );
        assert_eq!(model.call_status(), "Call successful.");
        assert_eq!(model.output, "Result from get:\n{\n  \"value\": 7\n}");
    }

    #[test]
    fn test_call_args_must_be_array() {
        let mut model = signed_in_model();
        model.contracts.call_args = r#"{"k": 1}"#.into();
        let cmd = update_contract(&mut model, ContractMsg::Call).unwrap();
        assert_eq!(cmd.request_count(), 0);
        assert_eq!(
            model.call_status(),
            "Invalid method arguments. Please provide a valid JSON array."
        );
    }

    #[test]
    fn test_miner_selection() {
        let mut model = signed_in_model();
        model.contracts.set_miners(vec!["M".into(), "N".into()]);
        update_contract(&mut model, ContractMsg::SelectMiner("N".into()));
        assert_eq!(model.contracts.miner(), "N");
        assert!(update_contract(&mut model, ContractMsg::SelectMiner("Z".into())).is_none());
        assert_eq!(model.contracts.miner(), "N");
    }

    #[test]
    fn test_miners_loaded_selects_first() {
        let mut model = AppModel::default();
        let seq = match reload_miners(&mut model) {
            Cmd::ListMiners { seq } => seq,
            _ => unreachable!(),
        };
        update_contract(
            &mut model,
            ContractMsg::MinersLoaded {
                seq,
                result: Ok(vec!["M1".into(), "M2".into()]),
            },
        );
        assert_eq!(model.contracts.selected_miner.as_deref(), Some("M1"));
    }
}
