use std::fmt::Write;

use models::{FileEntry, Task, TaskStatus};

use crate::flows::TaskForm;
use crate::state::{AppState, ProgressView};
use crate::utils::durationparser::{self, DisplayTimestamp};
use crate::utils::size::format_file_size;

const BAR_WIDTH: usize = 30;

pub fn progress_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn file_entry(file: &FileEntry) -> String {
    let marker = if file.is_dir {
        "[dir]"
    } else if file.is_video {
        "[video]"
    } else {
        "[file]"
    };
    if file.is_dir {
        format!("{marker:<8}{}", file.name)
    } else {
        format!("{marker:<8}{} ({})", file.name, format_file_size(file.size))
    }
}

pub fn listing(path: &str, files: &[FileEntry]) -> String {
    let mut out = format!("{path}\n");
    if files.is_empty() {
        out.push_str("  (empty directory)\n");
        return out;
    }
    for file in files {
        let _ = writeln!(out, "  {}", file_entry(file));
    }
    out
}

pub fn task(task: &Task) -> String {
    let mut out = format!(
        "#{:<5}{:<11}{}\n",
        task.id,
        task.kind.label(),
        task.status.label()
    );
    let _ = writeln!(out, "      in:  {}", task.input_path);
    let _ = writeln!(out, "      out: {}", task.output_path);
    match task.status {
        TaskStatus::Running | TaskStatus::Finished => {
            let _ = writeln!(
                out,
                "      {} {:.1}%",
                progress_bar(task.progress),
                task.progress
            );
        }
        TaskStatus::Error => {
            let _ = writeln!(out, "      {}", task.error_log);
        }
        _ => {}
    }
    if task.is_finished() {
        let _ = writeln!(out, "      preview with `preview #{}`", task.id);
    }
    out
}

pub fn tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks\n".to_owned();
    }
    tasks.iter().map(task).collect()
}

pub fn progress(view: &ProgressView) -> String {
    format!(
        "{} {} {:.1}% {}",
        view.file_name,
        progress_bar(view.percent),
        view.percent,
        view.message
    )
    .trim()
    .to_owned()
}

pub fn connection(connected: bool) -> &'static str {
    if connected {
        "online"
    } else {
        "offline"
    }
}

pub fn form(form: &TaskForm) -> String {
    let mut out = format!("type: {}\n", form.kind);
    for (name, value) in form.fields() {
        let _ = writeln!(out, "  {name}: {value}");
    }
    if let (Ok(start), Ok(duration)) = (
        durationparser::parse(&form.start_time),
        durationparser::parse(&form.duration),
    ) {
        if let (models::TaskType::Trim, Some(end)) = (&form.kind, start.checked_add(&duration)) {
            let _ = writeln!(
                out,
                "  (keeps {} to {})",
                start.display_timestamp(),
                end.display_timestamp()
            );
        }
    }
    let _ = writeln!(out, "recursive: {}", form.recursive);
    let _ = writeln!(out, "delete original: {}", form.delete_original);
    out
}

pub fn status(state: &AppState) -> String {
    let mut out = format!("push channel: {}\n", connection(state.connected));
    let _ = writeln!(out, "directory: {}", state.current_path);
    let _ = writeln!(out, "progress: {}", progress(&state.progress));
    if let Some(preview) = &state.preview {
        let _ = writeln!(out, "previewing: {} ({})", preview.title, preview.url);
    }
    out
}
