use models::{FileEntry, Listing, ProgressStatus, ProgressUpdate, Task, TaskStatus};
use push::PushEvent;

use crate::flows::TaskForm;

/// Latest push update as shown in the progress panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressView {
    pub file_name: String,
    pub percent: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub title: String,
    pub url: String,
}

/// Everything the server tells us, plus what the user is editing.
#[derive(Debug, Default)]
pub struct AppState {
    pub current_path: String,
    pub files: Vec<FileEntry>,
    pub tasks: Vec<Task>,
    pub progress: ProgressView,
    pub connected: bool,
    pub form: TaskForm,
    pub preview: Option<Preview>,
}

#[derive(Debug)]
pub enum Action {
    Browsed(Listing),
    TasksLoaded(Vec<Task>),
    Push(PushEvent),
    PreviewOpened(Preview),
    PreviewClosed,
}

impl AppState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Browsed(listing) => {
                self.current_path = listing.path;
                self.files = listing.files;
            }
            Action::TasksLoaded(tasks) => self.tasks = tasks,
            Action::Push(PushEvent::Connected) => self.connected = true,
            Action::Push(PushEvent::Disconnected) => self.connected = false,
            Action::Push(PushEvent::Update(update)) => {
                self.progress.apply(&update);
                if let Some(id) = update.task_id() {
                    if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                        patch_task(task, &update);
                    }
                }
            }
            Action::PreviewOpened(preview) => self.preview = Some(preview),
            Action::PreviewClosed => self.preview = None,
        }
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Ids of finished tasks, in list order.
    pub fn finished_tasks(&self) -> Vec<i64> {
        self.tasks
            .iter()
            .filter(|t| t.is_finished())
            .map(|t| t.id)
            .collect()
    }
}

impl ProgressView {
    fn apply(&mut self, update: &ProgressUpdate) {
        match &update.status {
            ProgressStatus::Running => {
                self.file_name = update.file_name().unwrap_or("Processing...").to_owned();
                self.percent = update.progress;
                self.message = update.message().to_owned();
            }
            ProgressStatus::Finished => {
                self.percent = 100.0;
                self.message = "Task finished!".to_owned();
            }
            ProgressStatus::Error => {
                self.message = format!("Error: {}", update.message());
            }
            ProgressStatus::Unknown(status) => {
                tracing::debug!(status, "ignoring progress status");
            }
        }
    }
}

fn patch_task(task: &mut Task, update: &ProgressUpdate) {
    match update.status {
        ProgressStatus::Running => {
            task.status = TaskStatus::Running;
            task.progress = update.progress;
        }
        ProgressStatus::Finished => {
            task.status = TaskStatus::Finished;
            task.progress = 100.0;
        }
        ProgressStatus::Error => {
            task.status = TaskStatus::Error;
            task.error_log = update.message().to_owned();
        }
        ProgressStatus::Unknown(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::TaskType;

    fn task(id: i64, status: TaskStatus) -> Task {
        Task {
            id,
            kind: TaskType::Transcode,
            input_path: format!("/v/{id}.mkv"),
            output_path: format!("./output/{id}.mkv"),
            params: String::new(),
            status,
            progress: 0.0,
            error_log: String::new(),
            delete_original: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn update(status: &str, progress: f64, message: Option<&str>) -> ProgressUpdate {
        ProgressUpdate {
            status: ProgressStatus::from(status.to_owned()),
            progress,
            file_name: None,
            message: message.map(str::to_owned),
            task_id: None,
        }
    }

    #[test]
    fn browse_replaces_path_and_files() {
        let mut state = AppState::default();
        state.apply(Action::Browsed(Listing {
            path: "/srv/videos".to_owned(),
            files: vec![],
        }));
        assert_eq!(state.current_path, "/srv/videos");
        assert!(state.files.is_empty());
    }

    #[test]
    fn running_update_fills_panel() {
        let mut state = AppState::default();
        state.apply(Action::Push(PushEvent::Update(update(
            "running",
            42.25,
            Some("frame=100"),
        ))));
        assert_eq!(state.progress.file_name, "Processing...");
        assert_eq!(state.progress.percent, 42.25);
        assert_eq!(state.progress.message, "frame=100");
    }

    #[test]
    fn finished_then_error_messages() {
        let mut state = AppState::default();
        state.apply(Action::Push(PushEvent::Update(update("finished", 0.0, None))));
        assert_eq!(state.progress.percent, 100.0);
        assert_eq!(state.progress.message, "Task finished!");

        state.apply(Action::Push(PushEvent::Update(update(
            "error",
            0.0,
            Some("exit status 1"),
        ))));
        assert_eq!(state.progress.message, "Error: exit status 1");
        assert_eq!(state.progress.percent, 100.0);
    }

    #[test]
    fn update_with_task_id_patches_the_task() {
        let mut state = AppState::default();
        state.apply(Action::TasksLoaded(vec![
            task(1, TaskStatus::Pending),
            task(2, TaskStatus::Running),
        ]));
        let mut u = update("running", 64.0, None);
        u.task_id = Some(2);
        state.apply(Action::Push(PushEvent::Update(u)));

        assert_eq!(state.task(2).unwrap().progress, 64.0);
        assert_eq!(state.task(1).unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn connection_flag_follows_events() {
        let mut state = AppState::default();
        state.apply(Action::Push(PushEvent::Connected));
        assert!(state.connected);
        state.apply(Action::Push(PushEvent::Disconnected));
        assert!(!state.connected);
    }

    #[test]
    fn finished_ids_in_order() {
        let mut state = AppState::default();
        state.apply(Action::TasksLoaded(vec![
            task(3, TaskStatus::Finished),
            task(4, TaskStatus::Error),
            task(5, TaskStatus::Finished),
        ]));
        assert_eq!(state.finished_tasks(), vec![3, 5]);
    }
}
