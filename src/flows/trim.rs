use models::{InvalidInputError, TaskParams, TrimParameters};

use super::TaskForm;
use crate::utils::durationparser;

/// Both fields are optional on the server; when given they must be clock
/// times and the duration must not be zero.
pub fn get_info(form: &TaskForm) -> Result<TaskParams, InvalidInputError> {
    if !form.start_time.is_empty() {
        durationparser::parse(&form.start_time)?;
    }
    if !form.duration.is_empty() && durationparser::parse(&form.duration)?.is_zero() {
        return Err(InvalidInputError::EmptyDuration);
    }

    Ok(TaskParams::Trim(TrimParameters {
        start_time: form.start_time.clone(),
        duration: form.duration.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(start: &str, duration: &str) -> TaskForm {
        TaskForm {
            start_time: start.to_owned(),
            duration: duration.to_owned(),
            ..TaskForm::default()
        }
    }

    #[test]
    fn keeps_user_timestamps() {
        assert_eq!(
            get_info(&form("00:00:10", "00:05:00")).unwrap(),
            TaskParams::Trim(TrimParameters {
                start_time: "00:00:10".to_owned(),
                duration: "00:05:00".to_owned(),
            })
        );
    }

    #[test]
    fn empty_fields_are_left_to_the_server() {
        assert!(get_info(&form("", "")).is_ok());
    }

    #[test]
    fn rejects_zero_duration() {
        assert_eq!(
            get_info(&form("00:00:10", "00:00:00")),
            Err(InvalidInputError::EmptyDuration)
        );
    }

    #[test]
    fn rejects_malformed_start() {
        assert_eq!(
            get_info(&form("ten", "00:01:00")),
            Err(InvalidInputError::Timestamp("ten".to_owned()))
        );
    }
}
