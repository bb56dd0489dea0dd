use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    Transcode,
    Remux,
    Trim,
    Thumbnail,
    Unknown(String),
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::Transcode,
        TaskType::Remux,
        TaskType::Trim,
        TaskType::Thumbnail,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TaskType::Transcode => "transcode",
            TaskType::Remux => "remux",
            TaskType::Trim => "trim",
            TaskType::Thumbnail => "thumbnail",
            TaskType::Unknown(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TaskType::Transcode => "Transcode",
            TaskType::Remux => "Remux",
            TaskType::Trim => "Trim",
            TaskType::Thumbnail => "Thumbnail",
            TaskType::Unknown(s) => s,
        }
    }
}

impl From<String> for TaskType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "transcode" => TaskType::Transcode,
            "remux" => TaskType::Remux,
            "trim" => TaskType::Trim,
            "thumbnail" => TaskType::Thumbnail,
            _ => TaskType::Unknown(s),
        }
    }
}

impl From<TaskType> for String {
    fn from(kind: TaskType) -> Self {
        kind.as_str().to_owned()
    }
}

/// Strict parse used for user input, unlike the lenient wire decoding.
impl FromStr for TaskType {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match TaskType::from(s.to_ascii_lowercase()) {
            TaskType::Unknown(_) => Err(InvalidInput::TaskType(s.to_owned())),
            kind => Ok(kind),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Pending,
    Running,
    Finished,
    Error,
    Unknown(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Finished => "finished",
            TaskStatus::Error => "error",
            TaskStatus::Unknown(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Running => "Running",
            TaskStatus::Finished => "Finished",
            TaskStatus::Error => "Failed",
            TaskStatus::Unknown(s) => s,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => TaskStatus::Pending,
            "running" => TaskStatus::Running,
            "finished" => TaskStatus::Finished,
            "error" => TaskStatus::Error,
            _ => TaskStatus::Unknown(s),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// Server-owned unit of work. The client only ever holds the latest snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub input_path: String,
    pub output_path: String,
    /// Parameters as stored by the server (a JSON string).
    #[serde(default)]
    pub params: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub error_log: String,
    #[serde(default)]
    pub delete_original: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_finished(&self) -> bool {
        self.status == TaskStatus::Finished
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranscodeParameters {
    pub video_codec: String,
    pub audio_codec: String,
    pub bitrate: String,
    pub resolution: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemuxParameters {
    pub output_extension: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrimParameters {
    pub start_time: String,
    pub duration: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailParameters {
    pub interval: u32,
    pub scale: String,
}

/// Serialized as the bare parameter object of the selected task type.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TaskParams {
    Transcode(TranscodeParameters),
    Remux(RemuxParameters),
    Trim(TrimParameters),
    Thumbnail(ThumbnailParameters),
}

impl TaskParams {
    pub fn kind(&self) -> TaskType {
        match self {
            TaskParams::Transcode(_) => TaskType::Transcode,
            TaskParams::Remux(_) => TaskType::Remux,
            TaskParams::Trim(_) => TaskType::Trim,
            TaskParams::Thumbnail(_) => TaskType::Thumbnail,
        }
    }
}

/// Body of `POST /api/tasks`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub input_path: String,
    pub output_path: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub params: TaskParams,
    pub delete_original: bool,
}

/// Body of `POST /api/tasks/batch`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub directory: String,
    pub recursive: bool,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub params: TaskParams,
    pub delete_original: bool,
    /// Empty lets the server pick its default output folder.
    pub output_dir: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BatchCreated {
    pub count: usize,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub tasks: Vec<Task>,
}
