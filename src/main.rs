use std::fs;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use axide::cli::{CliArgs, CliCommand};
use axide::messages::{AppMsg, ContractMsg, Msg};
use axide::model::{AppModel, NodeKind, WorkflowKind, WorkflowState};
use axide::remote::HttpBackend;
use axide::runtime::App;
use axide::syntax::render_markup;
use axide::EditorConfig;

fn main() -> Result<()> {
    axide::tracing::init();

    let args = CliArgs::parse();

    if let CliCommand::Highlight { file } = &args.command {
        let source = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        println!("{}", render_markup(&source));
        return Ok(());
    }

    let config = EditorConfig::load().with_env_override(args.backend.clone());
    // Requests run concurrently; one timeout plus slack covers a whole batch
    let wait = config.request_timeout() + Duration::from_secs(1);
    let backend = HttpBackend::new(&config.backend_url, config.request_timeout())?;
    tracing::info!("Using backend {}", backend.base_url());

    let mut app = App::new(AppModel::new(config), Arc::new(backend));
    app.dispatch(Msg::App(AppMsg::Init));
    app.run_until_idle(wait)?;

    let result = match args.command {
        CliCommand::Highlight { .. } => Ok(()),
        CliCommand::Tree => {
            print_tree(app.model());
            Ok(())
        }
        CliCommand::Run { path } => run(&mut app, &path, wait),
        CliCommand::Deploy {
            path,
            args,
            miner,
            address,
        } => {
            sign_in(&mut app, address);
            select(&mut app, &path, wait)?;
            app.dispatch(Msg::Contract(ContractMsg::SetConstructorArgs(args)));
            select_miner(&mut app, miner)?;
            app.dispatch(Msg::Contract(ContractMsg::Deploy));
            app.run_until_idle(wait)?;
            report(app.model(), WorkflowKind::Deploy)
        }
        CliCommand::Call {
            contract,
            method,
            args,
            miner,
            address,
        } => {
            sign_in(&mut app, address);
            app.dispatch(Msg::Contract(ContractMsg::SetCallAddress(contract)));
            app.dispatch(Msg::Contract(ContractMsg::SetCallMethod(method)));
            app.dispatch(Msg::Contract(ContractMsg::SetCallArgs(args)));
            select_miner(&mut app, miner)?;
            app.dispatch(Msg::Contract(ContractMsg::Call));
            app.run_until_idle(wait)?;
            report(app.model(), WorkflowKind::Call)
        }
    };

    if result.is_err() {
        if let Some(log) = axide::config_paths::log_file() {
            eprintln!("Details in {}", log.display());
        }
    }
    result
}

fn print_tree(model: &AppModel) {
    if !model.output.is_empty() {
        eprintln!("{}", model.output);
    }
    for row in model.tree_rows() {
        let suffix = if row.kind == NodeKind::Folder { "/" } else { "" };
        println!("{}{}{}", "  ".repeat(row.depth), row.name, suffix);
    }
}

fn sign_in(app: &mut App, address: Option<String>) {
    if let Some(address) = address {
        app.dispatch(Msg::signed_in(address));
    }
}

/// Select a file and wait for its content
fn select(app: &mut App, path: &str, wait: Duration) -> Result<()> {
    app.dispatch(Msg::select_file(path));
    if app.model().session.selected_path() != Some(path) {
        bail!("No such file: {}", path);
    }
    app.run_until_idle(wait)
}

fn select_miner(app: &mut App, miner: Option<String>) -> Result<()> {
    let Some(miner) = miner else {
        return Ok(());
    };
    app.dispatch(Msg::Contract(ContractMsg::SelectMiner(miner.clone())));
    let contracts = &app.model().contracts;
    if contracts.selected_miner.as_deref() != Some(miner.as_str()) {
        bail!(
            "Unknown miner: {} (available: {})",
            miner,
            contracts.miner_labels().join(", ")
        );
    }
    Ok(())
}

fn run(app: &mut App, path: &str, wait: Duration) -> Result<()> {
    select(app, path, wait)?;
    app.dispatch(Msg::App(AppMsg::RunFile));
    if app.in_flight() == 0 {
        bail!("Only .py files can be run: {}", path);
    }
    app.run_until_idle(wait)?;
    print!("{}", app.model().output);
    Ok(())
}

fn report(model: &AppModel, kind: WorkflowKind) -> Result<()> {
    let status = match kind {
        WorkflowKind::Deploy => model.deploy_status(),
        WorkflowKind::Call => model.call_status(),
    };
    match &model.contracts.workflow(kind).state {
        WorkflowState::Failure(_) => bail!(status),
        _ => {
            println!("{}", status);
            if kind == WorkflowKind::Call {
                println!("{}", model.output);
            }
            Ok(())
        }
    }
}
