use models::{InvalidInputError, TaskParams, ThumbnailParameters};

use super::{dimensions, TaskForm};

pub fn get_info(form: &TaskForm) -> Result<TaskParams, InvalidInputError> {
    let interval: u32 = form.interval.trim().parse()?;
    if interval < 1 {
        return Err(InvalidInputError::Interval);
    }
    let scale = dimensions(&form.scale)?;

    Ok(TaskParams::Thumbnail(ThumbnailParameters { interval, scale }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thumbnail_params() {
        assert_eq!(
            get_info(&TaskForm::default()).unwrap(),
            TaskParams::Thumbnail(ThumbnailParameters {
                interval: 5,
                scale: "320x240".to_owned(),
            })
        );
    }

    #[test]
    fn interval_must_be_positive() {
        let form = TaskForm {
            interval: "0".to_owned(),
            ..TaskForm::default()
        };
        assert_eq!(get_info(&form), Err(InvalidInputError::Interval));
    }

    #[test]
    fn interval_must_be_a_number() {
        let form = TaskForm {
            interval: "five".to_owned(),
            ..TaskForm::default()
        };
        assert!(matches!(get_info(&form), Err(InvalidInputError::Number(_))));
    }
}
