use api::Api;
use models::ClientError;

use crate::app::Controller;
use crate::utils::render;

pub async fn run<A: Api>(c: &mut Controller<A>, path: &str) -> Result<(), ClientError> {
    c.browse(path).await?;
    show(c);
    Ok(())
}

/// Moves to the parent of the current directory. `from` browses there first.
pub async fn up<A: Api>(c: &mut Controller<A>, from: Option<&str>) -> Result<(), ClientError> {
    if let Some(path) = from {
        c.browse(path).await?;
    } else if c.state.current_path.is_empty() {
        c.browse("").await?;
    }
    if !c.go_parent().await? {
        println!("{} has no parent", c.state.current_path);
    }
    show(c);
    Ok(())
}

/// Path of the entry called `name` in the current listing, or `name` itself.
pub fn resolve<'a, A: Api>(c: &'a Controller<A>, name: &'a str) -> &'a str {
    c.state
        .files
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.path.as_str())
        .unwrap_or(name)
}

pub fn show<A: Api>(c: &Controller<A>) {
    print!("{}", render::listing(&c.state.current_path, &c.state.files));
}
