use models::{InvalidInputError, RemuxParameters, TaskParams};

use super::{choice, TaskForm};

pub const CONTAINERS: [&str; 3] = ["mp4", "flv", "m3u8"];

pub fn get_info(form: &TaskForm) -> Result<TaskParams, InvalidInputError> {
    let extension = form.output_extension.trim_start_matches('.').to_ascii_lowercase();
    let output_extension = choice("container", &extension, &CONTAINERS)?;

    Ok(TaskParams::Remux(RemuxParameters { output_extension }))
}
