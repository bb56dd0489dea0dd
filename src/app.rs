use std::process::Stdio;

use async_trait::async_trait;
use snafu::ResultExt;
use tokio::process::{Child, Command};

use api::Api;
use config::ClientConfig;
use models::error::PlayerSnafu;
use models::{BatchRequest, ClientError, InvalidInputError, NewTask, Task};
use push::PushEvent;

use crate::state::{Action, AppState, Preview};
use crate::utils::paths;

/// Yes/no gate in front of destructive operations.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, prompt: &str) -> bool;
}

/// Answers every prompt the same way (`--yes`).
pub struct Always(pub bool);

#[async_trait]
impl Confirm for Always {
    async fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

#[derive(Debug)]
pub enum ClearOutcome {
    NothingToClear,
    Declined,
    Cleared {
        deleted: Vec<i64>,
        failed: Vec<(i64, ClientError)>,
    },
}

/// Owns the client state and is the only place it changes. Every operation
/// leaves the state untouched when the server call fails.
pub struct Controller<A: Api> {
    api: A,
    config: ClientConfig,
    pub state: AppState,
    player: Option<Child>,
}

impl<A: Api> Controller<A> {
    pub fn new(api: A, config: ClientConfig) -> Self {
        Controller {
            api,
            config,
            state: AppState::default(),
            player: None,
        }
    }

    pub async fn browse(&mut self, path: &str) -> Result<(), ClientError> {
        let listing = self.api.browse(path).await?;
        tracing::debug!(path = %listing.path, entries = listing.files.len(), "browsed");
        self.state.apply(Action::Browsed(listing));
        Ok(())
    }

    /// Returns false when already at a root.
    pub async fn go_parent(&mut self) -> Result<bool, ClientError> {
        match paths::parent_dir(&self.state.current_path) {
            Some(parent) => {
                self.browse(&parent).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn refresh_tasks(&mut self) -> Result<(), ClientError> {
        let tasks = self.api.list_tasks().await?;
        self.state.apply(Action::TasksLoaded(tasks));
        Ok(())
    }

    /// Refresh whose failure is only logged.
    pub async fn refresh_quietly(&mut self) {
        if let Err(err) = self.refresh_tasks().await {
            tracing::warn!(%err, "refreshing tasks failed");
        }
    }

    /// Queues one file with the current form. The output lands in the
    /// configured output folder.
    pub async fn add_single(&mut self, input_path: &str) -> Result<Task, ClientError> {
        let params = self.state.form.params()?;
        let task = NewTask {
            input_path: input_path.to_owned(),
            output_path: paths::output_path(&self.config.output_dir, input_path, &params),
            kind: params.kind(),
            params,
            delete_original: self.state.form.delete_original,
        };
        let created = self.api.create_task(&task).await?;
        self.refresh_quietly().await;
        Ok(created)
    }

    /// Queues every video of `directory`, or of the current directory.
    pub async fn batch_add(&mut self, directory: Option<&str>) -> Result<usize, ClientError> {
        let directory = directory
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.state.current_path)
            .to_owned();
        if directory.is_empty() {
            return Err(InvalidInputError::NoDirectory.into());
        }
        let params = self.state.form.params()?;
        let batch = BatchRequest {
            directory,
            recursive: self.state.form.recursive,
            kind: params.kind(),
            params,
            delete_original: self.state.form.delete_original,
            output_dir: String::new(),
        };
        let created = self.api.create_batch(&batch).await?;
        self.refresh_quietly().await;
        Ok(created.count)
    }

    /// Returns false when the user declined.
    pub async fn delete_task(
        &mut self,
        id: i64,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, ClientError> {
        if !confirm.confirm(&format!("Delete task #{id}?")).await {
            return Ok(false);
        }
        self.api.delete_task(id).await?;
        self.refresh_quietly().await;
        Ok(true)
    }

    /// Deletes the finished tasks of the current snapshot one request at a
    /// time. A failed delete does not stop the others.
    pub async fn clear_finished(&mut self, confirm: &mut dyn Confirm) -> ClearOutcome {
        let finished = self.state.finished_tasks();
        if finished.is_empty() {
            return ClearOutcome::NothingToClear;
        }
        let prompt = format!("Delete {} finished task(s)?", finished.len());
        if !confirm.confirm(&prompt).await {
            return ClearOutcome::Declined;
        }

        let mut deleted = Vec::new();
        let mut failed = Vec::new();
        for id in finished {
            match self.api.delete_task(id).await {
                Ok(()) => deleted.push(id),
                Err(err) => {
                    tracing::error!(id, %err, "deleting finished task failed");
                    failed.push((id, err));
                }
            }
        }
        self.refresh_quietly().await;
        ClearOutcome::Cleared { deleted, failed }
    }

    /// Every progress update is followed by exactly one task-list refresh.
    pub async fn handle_push(&mut self, event: PushEvent) {
        let refresh = matches!(event, PushEvent::Update(_));
        self.state.apply(Action::Push(event));
        if refresh {
            self.refresh_quietly().await;
        }
    }

    pub async fn open_preview(&mut self, path: &str, title: &str) -> Result<Preview, ClientError> {
        self.close_preview().await;

        let url = self.api.file_url(path);
        if let Some(player) = &self.config.player {
            tracing::info!(%player, %url, "starting player");
            let child = Command::new(player)
                .arg(&url)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()
                .context(PlayerSnafu { player })?;
            self.player = Some(child);
        }
        let preview = Preview {
            title: title.to_owned(),
            url,
        };
        self.state.apply(Action::PreviewOpened(preview.clone()));
        Ok(preview)
    }

    /// Previews the output of a finished task.
    pub async fn preview_task(&mut self, id: i64) -> Result<Preview, ClientError> {
        let task = self
            .state
            .task(id)
            .ok_or(InvalidInputError::UnknownTask(id))?;
        if !task.is_finished() {
            return Err(InvalidInputError::NotFinished(id).into());
        }
        let output = task.output_path.clone();
        self.open_preview(&output, "Processed video").await
    }

    pub async fn close_preview(&mut self) {
        if let Some(mut child) = self.player.take() {
            if let Err(err) = child.kill().await {
                tracing::warn!(%err, "stopping player failed");
            }
        }
        self.state.apply(Action::PreviewClosed);
    }

    /// Blocks until the player exits on its own.
    pub async fn wait_preview(&mut self) -> Result<(), ClientError> {
        if let Some(mut child) = self.player.take() {
            let player = self.config.player.clone().unwrap_or_default();
            let status = child.wait().await.context(PlayerSnafu { player })?;
            tracing::debug!(%status, "player exited");
        }
        self.state.apply(Action::PreviewClosed);
        Ok(())
    }
}
