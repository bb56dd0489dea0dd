use api::Api;
use models::ClientError;

use crate::app::Controller;

pub async fn add<A: Api>(c: &mut Controller<A>, path: &str) -> Result<(), ClientError> {
    let task = c.add_single(path).await?;
    println!(
        "Task #{} added: {} -> {}",
        task.id, task.input_path, task.output_path
    );
    Ok(())
}

pub async fn batch<A: Api>(c: &mut Controller<A>, directory: Option<&str>) -> Result<(), ClientError> {
    let count = c.batch_add(directory).await?;
    println!("Added {count} task(s)");
    Ok(())
}
