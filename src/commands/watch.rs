use api::Api;
use config::ClientConfig;
use push::{PushEvent, PushListener};

use crate::app::Controller;
use crate::utils::render;

use super::tasks;

/// Follows the push channel until interrupted.
pub async fn run<A: Api>(c: &mut Controller<A>, config: &ClientConfig) {
    let (listener, mut events) =
        PushListener::new(config.push_url(), config.reconnect_delay).spawn();

    c.refresh_quietly().await;
    tasks::show(c);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => show_event(c, event, config).await,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    listener.abort();
}

/// Applies a push event and prints what changed. The task list is printed
/// again only when a task appeared, vanished or changed status.
pub async fn show_event<A: Api>(c: &mut Controller<A>, event: PushEvent, config: &ClientConfig) {
    let before = statuses(c);
    match &event {
        PushEvent::Connected => println!("push channel {}", render::connection(true)),
        PushEvent::Disconnected => println!(
            "push channel {}, retrying in {}s",
            render::connection(false),
            config.reconnect_delay.as_secs()
        ),
        PushEvent::Update(_) => {}
    }
    let is_update = matches!(event, PushEvent::Update(_));
    c.handle_push(event).await;
    if is_update {
        println!("{}", render::progress(&c.state.progress));
        if statuses(c) != before {
            tasks::show(c);
        }
    }
}

fn statuses<A: Api>(c: &Controller<A>) -> Vec<(i64, String)> {
    c.state
        .tasks
        .iter()
        .map(|t| (t.id, t.status.as_str().to_owned()))
        .collect()
}
