//! Parameter form.
//!
//! `TaskForm` holds the raw value of every field for every task type, like
//! the inputs of a form. Each flow module reads the fields that belong to its
//! type and turns them into `TaskParams`, rejecting values the form would not
//! offer.

pub mod remux;
pub mod thumbnail;
pub mod transcode;
pub mod trim;

use models::{InvalidInputError, TaskParams, TaskType};

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub kind: TaskType,
    pub video_codec: String,
    pub audio_codec: String,
    pub bitrate: String,
    pub resolution: String,
    pub output_extension: String,
    pub start_time: String,
    pub duration: String,
    pub interval: String,
    pub scale: String,
    pub recursive: bool,
    pub delete_original: bool,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm {
            kind: TaskType::Transcode,
            video_codec: "libx264".to_owned(),
            audio_codec: "aac".to_owned(),
            bitrate: "2M".to_owned(),
            resolution: String::new(),
            output_extension: "mp4".to_owned(),
            start_time: "00:00:00".to_owned(),
            duration: "00:05:00".to_owned(),
            interval: "5".to_owned(),
            scale: "320x240".to_owned(),
            recursive: false,
            delete_original: false,
        }
    }
}

impl TaskForm {
    /// Parameters of the selected type, and only those.
    pub fn params(&self) -> Result<TaskParams, InvalidInputError> {
        match &self.kind {
            TaskType::Transcode => transcode::get_info(self),
            TaskType::Remux => remux::get_info(self),
            TaskType::Trim => trim::get_info(self),
            TaskType::Thumbnail => thumbnail::get_info(self),
            TaskType::Unknown(kind) => Err(InvalidInputError::TaskType(kind.clone())),
        }
    }

    pub fn select(&mut self, kind: &str) -> Result<(), InvalidInputError> {
        self.kind = kind.parse()?;
        Ok(())
    }

    /// Sets a field by its wire name (`videoCodec`) or a dashed form
    /// (`video-codec`).
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), InvalidInputError> {
        let key: String = field
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let slot = match key.as_str() {
            "videocodec" => &mut self.video_codec,
            "audiocodec" => &mut self.audio_codec,
            "bitrate" => &mut self.bitrate,
            "resolution" => &mut self.resolution,
            "outputextension" | "ext" | "container" => &mut self.output_extension,
            "starttime" | "start" => &mut self.start_time,
            "duration" => &mut self.duration,
            "interval" => &mut self.interval,
            "scale" => &mut self.scale,
            _ => return Err(InvalidInputError::Field(field.to_owned())),
        };
        *slot = value.trim().to_owned();
        Ok(())
    }

    /// Fields shown for the selected type, by wire name.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self.kind {
            TaskType::Transcode => vec![
                ("videoCodec", self.video_codec.as_str()),
                ("audioCodec", self.audio_codec.as_str()),
                ("bitrate", self.bitrate.as_str()),
                ("resolution", self.resolution.as_str()),
            ],
            TaskType::Remux => vec![("outputExtension", self.output_extension.as_str())],
            TaskType::Trim => vec![
                ("startTime", self.start_time.as_str()),
                ("duration", self.duration.as_str()),
            ],
            TaskType::Thumbnail => vec![
                ("interval", self.interval.as_str()),
                ("scale", self.scale.as_str()),
            ],
            TaskType::Unknown(_) => vec![],
        }
    }
}

pub(crate) fn choice(
    field: &'static str,
    value: &str,
    allowed: &[&str],
) -> Result<String, InvalidInputError> {
    if allowed.contains(&value) {
        Ok(value.to_owned())
    } else {
        Err(InvalidInputError::Choice {
            field,
            value: value.to_owned(),
        })
    }
}

/// `WIDTHxHEIGHT`; `-1` and `-2` are accepted as "keep aspect ratio".
pub(crate) fn dimensions(value: &str) -> Result<String, InvalidInputError> {
    let side = |s: &str| match s.parse::<i64>() {
        Ok(n) => n > 0 || n == -1 || n == -2,
        Err(_) => false,
    };
    match value.split_once(|c| c == 'x' || c == 'X') {
        Some((w, h)) if side(w) && side(h) => Ok(value.to_owned()),
        _ => Err(InvalidInputError::Dimensions(value.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_form_is_transcode() {
        let params = TaskForm::default().params().unwrap();
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({
                "videoCodec": "libx264",
                "audioCodec": "aac",
                "bitrate": "2M",
                "resolution": ""
            })
        );
    }

    #[test]
    fn switching_type_changes_the_fields() {
        let mut form = TaskForm::default();
        form.select("trim").unwrap();
        assert_eq!(
            serde_json::to_value(form.params().unwrap()).unwrap(),
            json!({ "startTime": "00:00:00", "duration": "00:05:00" })
        );
        assert_eq!(
            form.fields(),
            vec![("startTime", "00:00:00"), ("duration", "00:05:00")]
        );
    }

    #[test]
    fn set_accepts_wire_and_dashed_names() {
        let mut form = TaskForm::default();
        form.set("videoCodec", "libx265").unwrap();
        form.set("output-extension", "flv").unwrap();
        form.set("start", " 00:01:00 ").unwrap();
        assert_eq!(form.video_codec, "libx265");
        assert_eq!(form.output_extension, "flv");
        assert_eq!(form.start_time, "00:01:00");
        assert_eq!(
            form.set("speed", "2"),
            Err(InvalidInputError::Field("speed".to_owned()))
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut form = TaskForm::default();
        assert!(form.select("upscale").is_err());
        assert_eq!(form.kind, TaskType::Transcode);
    }

    #[test]
    fn dimension_checks() {
        assert!(dimensions("1920x1080").is_ok());
        assert!(dimensions("320x-1").is_ok());
        assert!(dimensions("1920").is_err());
        assert!(dimensions("0x10").is_err());
        assert!(dimensions("axb").is_err());
    }
}
