//! Push-channel listener.
//!
//! Keeps one websocket open to the server's `/ws` endpoint and forwards every
//! progress update over an mpsc channel. A dropped or refused connection is
//! retried after a fixed delay, forever, until the receiving side goes away.

use std::time::Duration;

use futures_util::StreamExt;
use snafu::ResultExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use models::error::PushSnafu;
use models::{ClientError, ProgressUpdate};

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    Connected,
    Disconnected,
    Update(ProgressUpdate),
}

enum Flow {
    Dropped,
    Stop,
}

pub struct PushListener {
    url: String,
    reconnect_delay: Duration,
}

impl PushListener {
    pub fn new(url: impl Into<String>, reconnect_delay: Duration) -> Self {
        PushListener {
            url: url.into(),
            reconnect_delay,
        }
    }

    /// Starts the listener on its own task.
    pub fn spawn(self) -> (JoinHandle<()>, mpsc::Receiver<PushEvent>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (tokio::spawn(self.run(tx)), rx)
    }

    pub async fn run(self, tx: mpsc::Sender<PushEvent>) {
        loop {
            match self.session(&tx).await {
                Ok(Flow::Stop) => break,
                Ok(Flow::Dropped) => {}
                Err(err) => tracing::warn!(url = %self.url, %err, "push channel failed"),
            }
            if tx.is_closed() {
                break;
            }
            tracing::debug!(delay = ?self.reconnect_delay, "reconnecting push channel");
            tokio::time::sleep(self.reconnect_delay).await;
        }
        tracing::debug!("push listener stopped");
    }

    async fn session(&self, tx: &mpsc::Sender<PushEvent>) -> Result<Flow, ClientError> {
        let (mut socket, _) = connect_async(self.url.as_str())
            .await
            .context(PushSnafu)?;
        tracing::info!(url = %self.url, "push channel connected");
        if tx.send(PushEvent::Connected).await.is_err() {
            return Ok(Flow::Stop);
        }

        let outcome = pump(&mut socket, tx).await;
        if matches!(outcome, Ok(Flow::Stop)) {
            return outcome;
        }

        tracing::info!(url = %self.url, "push channel disconnected");
        if tx.send(PushEvent::Disconnected).await.is_err() {
            return Ok(Flow::Stop);
        }
        outcome
    }
}

async fn pump(
    socket: &mut WebSocketStream<MaybeTlsStream<TcpStream>>,
    tx: &mpsc::Sender<PushEvent>,
) -> Result<Flow, ClientError> {
    while let Some(message) = socket.next().await {
        match message.context(PushSnafu)? {
            Message::Text(text) => match serde_json::from_str::<ProgressUpdate>(&text) {
                Ok(update) => {
                    tracing::debug!(?update, "progress update");
                    if tx.send(PushEvent::Update(update)).await.is_err() {
                        return Ok(Flow::Stop);
                    }
                }
                Err(err) => tracing::warn!(%err, frame = %text, "dropping undecodable push frame"),
            },
            Message::Close(frame) => {
                tracing::debug!(?frame, "push channel closed by server");
                break;
            }
            _ => {}
        }
    }
    Ok(Flow::Dropped)
}
