use api::Api;
use models::ClientError;

use crate::app::{ClearOutcome, Confirm, Controller};
use crate::utils::render;

pub async fn list<A: Api>(c: &mut Controller<A>) -> Result<(), ClientError> {
    c.refresh_tasks().await?;
    show(c);
    Ok(())
}

pub async fn remove<A: Api>(
    c: &mut Controller<A>,
    id: i64,
    confirm: &mut dyn Confirm,
) -> Result<(), ClientError> {
    if c.delete_task(id, confirm).await? {
        println!("Task #{id} deleted");
    }
    Ok(())
}

pub async fn clear<A: Api>(c: &mut Controller<A>, confirm: &mut dyn Confirm) {
    match c.clear_finished(confirm).await {
        ClearOutcome::NothingToClear => println!("No finished tasks"),
        ClearOutcome::Declined => {}
        ClearOutcome::Cleared { deleted, failed } => {
            println!("Deleted {} finished task(s)", deleted.len());
            for (id, err) in failed {
                eprintln!("Error: task #{id}: {err}");
            }
        }
    }
}

pub fn show<A: Api>(c: &Controller<A>) {
    print!("{}", render::tasks(&c.state.tasks));
}
