use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::commands::Cmd;
use crate::messages::{AppMsg, ContractMsg, Msg, WorkspaceMsg};
use crate::model::AppModel;
use crate::remote::Backend;
use crate::syntax::render_markup;
use crate::update::update;

/// Owns the model and executes commands against a [`Backend`]
///
/// Each collaborator request runs on its own thread; the completion comes
/// back as a [`Msg`] over the channel and is applied on the caller's thread
/// by [`App::run_until_idle`].
pub struct App {
    model: AppModel,
    backend: Arc<dyn Backend>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    in_flight: usize,
    /// Highlight markup of the buffer, refreshed whenever a message redraws
    overlay: String,
}

impl App {
    pub fn new(model: AppModel, backend: Arc<dyn Backend>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let overlay = render_markup(&model.session.buffer.content());
        Self {
            model,
            backend,
            msg_tx,
            msg_rx,
            in_flight: 0,
            overlay,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    /// Requests issued but not yet completed
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run a message through `update` and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            if cmd.needs_redraw() {
                self.overlay = render_markup(&self.model.session.buffer.content());
            }
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            Cmd::ListTree { seq } => self.spawn(move |backend| {
                Msg::Workspace(WorkspaceMsg::TreeLoaded {
                    seq,
                    result: backend.list_tree(),
                })
            }),

            Cmd::OpenFile { seq, path } => self.spawn(move |backend| {
                let result = backend.open_file(&path);
                Msg::App(AppMsg::FileLoaded { seq, path, result })
            }),

            Cmd::SaveFile { seq, path, content } => self.spawn(move |backend| {
                let result = backend.save_file(&path, &content);
                Msg::App(AppMsg::SaveCompleted { seq, path, result })
            }),

            Cmd::CreateEntry {
                seq,
                path,
                is_folder,
            } => self.spawn(move |backend| {
                let result = backend.create_entry(&path, is_folder);
                Msg::Workspace(WorkspaceMsg::EntryCreated { seq, path, result })
            }),

            Cmd::DeleteEntry { seq, path } => self.spawn(move |backend| {
                let result = backend.delete_entry(&path);
                Msg::Workspace(WorkspaceMsg::EntryDeleted { seq, path, result })
            }),

            Cmd::RunFile { seq, path } => self.spawn(move |backend| {
                Msg::App(AppMsg::RunCompleted {
                    seq,
                    result: backend.run_file(&path),
                })
            }),

            Cmd::ListMiners { seq } => self.spawn(move |backend| {
                Msg::Contract(ContractMsg::MinersLoaded {
                    seq,
                    result: backend.list_miners(),
                })
            }),

            Cmd::DeployContract { seq, request } => self.spawn(move |backend| {
                Msg::Contract(ContractMsg::DeployCompleted {
                    seq,
                    result: backend.deploy_contract(&request),
                })
            }),

            Cmd::CallContract { seq, request } => self.spawn(move |backend| {
                let result = backend.call_contract(&request);
                Msg::Contract(ContractMsg::CallCompleted {
                    seq,
                    method: request.method,
                    result,
                })
            }),
        }
    }

    fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce(&dyn Backend) -> Msg + Send + 'static,
    {
        let tx = self.msg_tx.clone();
        let backend = Arc::clone(&self.backend);
        self.in_flight += 1;
        std::thread::spawn(move || {
            let msg = job(backend.as_ref());
            let _ = tx.send(msg);
        });
    }

    fn complete(&mut self, msg: Msg) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.dispatch(msg);
    }

    /// Block until no request is in flight, including follow-ups issued by
    /// completions (a delete triggers a tree reload)
    pub fn run_until_idle(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => self.complete(msg),
                Err(RecvTimeoutError::Timeout) => {
                    bail!(
                        "{} request(s) still pending after {:?}",
                        self.in_flight,
                        timeout
                    )
                }
                Err(RecvTimeoutError::Disconnected) => bail!("request channel closed"),
            }
        }
        Ok(())
    }

    /// Highlight markup for the overlay layer, as of the last redraw
    pub fn overlay_markup(&self) -> &str {
        &self.overlay
    }
}
