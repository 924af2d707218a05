//! Server network layer: WebSocket accept loop and per-connection tasks

use crate::service::GameService;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use shared::{PlayerId, ServerEvent};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

/// How often the server logs a summary of its load
const STATUS_INTERVAL: Duration = Duration::from_secs(60);

/// Accepts WebSocket clients and feeds their messages to the game service
pub struct Server {
    listener: TcpListener,
    service: Arc<GameService>,
}

impl Server {
    pub async fn bind(
        addr: &str,
        service: Arc<GameService>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Server { listener, service })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Spawns task that periodically logs session and game counts
    fn spawn_status_reporter(&self) {
        let service = Arc::clone(&self.service);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(STATUS_INTERVAL);
            // Skip the first tick since it fires immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                let sessions = service.session_count().await;
                let games = service.registry().len();
                if sessions > 0 || games > 0 {
                    debug!("{} sessions connected, {} games live", sessions, games);
                }
            }
        });
    }

    /// Accept loop. Runs until the task is dropped.
    pub async fn run(self) {
        self.spawn_status_reporter();
        info!("Server started successfully");

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let service = Arc::clone(&self.service);
                    tokio::spawn(async move {
                        handle_connection(service, stream, addr).await;
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }
}

/// Serves one client from handshake to teardown
async fn handle_connection(service: Arc<GameService>, stream: TcpStream, addr: SocketAddr) {
    let socket = match accept_async(stream).await {
        Ok(socket) => socket,
        Err(e) => {
            warn!("WebSocket handshake with {} failed: {}", addr, e);
            return;
        }
    };
    let (mut sink, mut incoming) = socket.split();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let Some(session_id) = service.connect(addr, event_tx).await else {
        warn!("Rejecting {}: server full", addr);
        if let Ok(text) = ServerEvent::error("Server full").to_json() {
            let _ = sink.send(Message::Text(text)).await;
        }
        let _ = sink.send(Message::Close(None)).await;
        return;
    };

    let writer = tokio::spawn(write_events(session_id, sink, event_rx));

    while let Some(message) = incoming.next().await {
        match message {
            Ok(Message::Text(text)) => service.handle_text(session_id, &text).await,
            Ok(Message::Close(_)) => break,
            Ok(Message::Binary(_)) => {
                debug!("Session {}: ignoring binary frame", session_id);
            }
            // Ping/pong are answered by tungstenite itself
            Ok(_) => {}
            Err(e) => {
                debug!("Session {}: read error: {}", session_id, e);
                break;
            }
        }
    }

    // Dropping the session closes its event queue, which ends the writer.
    service.disconnect(session_id).await;
    if let Err(e) = writer.await {
        error!("Writer task for session {} panicked: {}", session_id, e);
    }
}

/// Drains a session's event queue into its socket
async fn write_events(
    session_id: PlayerId,
    mut sink: futures_util::stream::SplitSink<WebSocketStream<TcpStream>, Message>,
    mut events: mpsc::UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = events.recv().await {
        let text = match event.to_json() {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to encode event for session {}: {}", session_id, e);
                continue;
            }
        };

        if let Err(e) = sink.send(Message::Text(text)).await {
            debug!("Session {}: write failed: {}", session_id, e);
            break;
        }
    }

    let _ = sink.close().await;
}
