use models::{InvalidInputError, TaskParams, TranscodeParameters};

use super::{choice, dimensions, TaskForm};

pub const VIDEO_CODECS: [&str; 3] = ["libx264", "libx265", "libvpx-vp9"];
pub const AUDIO_CODECS: [&str; 2] = ["aac", "libmp3lame"];

pub fn get_info(form: &TaskForm) -> Result<TaskParams, InvalidInputError> {
    let video_codec = choice("video codec", &form.video_codec, &VIDEO_CODECS)?;
    let audio_codec = choice("audio codec", &form.audio_codec, &AUDIO_CODECS)?;

    // Empty resolution keeps the source size
    let resolution = match form.resolution.as_str() {
        "" => String::new(),
        r => dimensions(r)?,
    };

    Ok(TaskParams::Transcode(TranscodeParameters {
        video_codec,
        audio_codec,
        bitrate: form.bitrate.clone(),
        resolution,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_offered_codecs() {
        let form = TaskForm {
            video_codec: "libvpx-vp9".to_owned(),
            audio_codec: "libmp3lame".to_owned(),
            bitrate: "5M".to_owned(),
            resolution: "1280x720".to_owned(),
            ..TaskForm::default()
        };
        assert_eq!(
            get_info(&form).unwrap(),
            TaskParams::Transcode(TranscodeParameters {
                video_codec: "libvpx-vp9".to_owned(),
                audio_codec: "libmp3lame".to_owned(),
                bitrate: "5M".to_owned(),
                resolution: "1280x720".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_unknown_codec() {
        let form = TaskForm {
            video_codec: "h264".to_owned(),
            ..TaskForm::default()
        };
        assert_eq!(
            get_info(&form),
            Err(InvalidInputError::Choice {
                field: "video codec",
                value: "h264".to_owned()
            })
        );
    }

    #[test]
    fn rejects_bad_resolution() {
        let form = TaskForm {
            resolution: "hd".to_owned(),
            ..TaskForm::default()
        };
        assert_eq!(
            get_info(&form),
            Err(InvalidInputError::Dimensions("hd".to_owned()))
        );
    }
}
