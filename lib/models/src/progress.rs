use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ProgressStatus {
    Running,
    Finished,
    Error,
    Unknown(String),
}

impl From<String> for ProgressStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "running" => ProgressStatus::Running,
            "finished" => ProgressStatus::Finished,
            "error" => ProgressStatus::Error,
            _ => ProgressStatus::Unknown(s),
        }
    }
}

impl From<ProgressStatus> for String {
    fn from(status: ProgressStatus) -> Self {
        match status {
            ProgressStatus::Running => "running".to_owned(),
            ProgressStatus::Finished => "finished".to_owned(),
            ProgressStatus::Error => "error".to_owned(),
            ProgressStatus::Unknown(s) => s,
        }
    }
}

/// Push-channel payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub status: ProgressStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub task_id: Option<i64>,
}

impl ProgressUpdate {
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// Ids start at 1, a zero id means the sender did not set one.
    pub fn task_id(&self) -> Option<i64> {
        self.task_id.filter(|id| *id > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_update() {
        let update: ProgressUpdate =
            serde_json::from_str(r#"{"status":"running","progress":12.5}"#).unwrap();
        assert_eq!(update.status, ProgressStatus::Running);
        assert_eq!(update.file_name(), None);
        assert_eq!(update.message(), "");
        assert_eq!(update.task_id(), None);
    }

    #[test]
    fn empty_fields_read_as_missing() {
        let update: ProgressUpdate = serde_json::from_str(
            r#"{"taskId":0,"progress":0,"status":"error","fileName":"","message":"exit status 1"}"#,
        )
        .unwrap();
        assert_eq!(update.status, ProgressStatus::Error);
        assert_eq!(update.file_name(), None);
        assert_eq!(update.message(), "exit status 1");
        assert_eq!(update.task_id(), None);
    }

    #[test]
    fn unknown_status_is_kept() {
        let update: ProgressUpdate =
            serde_json::from_str(r#"{"status":"queued","progress":0,"taskId":3}"#).unwrap();
        assert_eq!(update.status, ProgressStatus::Unknown("queued".to_owned()));
        assert_eq!(update.task_id(), Some(3));
    }
}
