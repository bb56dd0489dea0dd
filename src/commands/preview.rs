use api::Api;
use models::{ClientError, InvalidInputError};

use crate::app::Controller;
use crate::state::Preview;
use crate::utils::paths;

/// `#<id>` previews a finished task's output, anything else is a server path.
pub async fn open<A: Api>(
    c: &mut Controller<A>,
    target: &str,
    title: Option<&str>,
) -> Result<Preview, ClientError> {
    let preview = match target.strip_prefix('#') {
        Some(id) => {
            let id = id.parse::<i64>().map_err(InvalidInputError::from)?;
            c.preview_task(id).await?
        }
        None => {
            let title = title.unwrap_or_else(|| paths::file_name(target));
            c.open_preview(target, title).await?
        }
    };
    println!("Previewing {}: {}", preview.title, preview.url);
    Ok(preview)
}

/// One-shot preview: opens, then waits for the player to exit.
pub async fn run<A: Api>(
    c: &mut Controller<A>,
    target: &str,
    title: Option<&str>,
) -> Result<(), ClientError> {
    if target.starts_with('#') {
        c.refresh_tasks().await?;
    }
    open(c, target, title).await?;
    c.wait_preview().await
}
