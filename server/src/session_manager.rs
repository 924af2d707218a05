//! Connected session tracking and outbound event routing
//!
//! This module handles the server-side bookkeeping for connected clients:
//! - Session lifecycle (connect, disconnect)
//! - Which game, if any, each session is seated in
//! - Pushing events to a session without blocking the caller
//!
//! Game state never lives here. The session manager only knows how to reach
//! a client, which keeps notification separate from the engine.

use log::{debug, info};
use shared::{GameId, PlayerId, ServerEvent};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Sending half of a session's outbound event queue
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// A connected client
///
/// Each session keeps:
/// - Connection metadata (ID, address, connect time)
/// - The queue its writer task drains into the socket
/// - The game it created or joined
#[derive(Debug)]
pub struct Session {
    /// Unique session identifier, doubles as the player id
    pub id: PlayerId,
    /// Peer address, for logging
    pub addr: SocketAddr,
    /// When the connection was accepted
    pub connected_at: Instant,
    /// Outbound events for this client
    pub sender: EventSender,
    /// Game this session is seated in
    pub game_id: Option<GameId>,
}

impl Session {
    pub fn new(id: PlayerId, addr: SocketAddr, sender: EventSender) -> Self {
        Self {
            id,
            addr,
            connected_at: Instant::now(),
            sender,
            game_id: None,
        }
    }

    pub fn connected_for(&self) -> Duration {
        self.connected_at.elapsed()
    }
}

/// Registry of connected sessions
///
/// Session ids start at 1 and increase for every accepted connection; they
/// are never reused while the process lives.
pub struct SessionManager {
    /// Connected sessions indexed by id
    sessions: HashMap<PlayerId, Session>,
    /// Next id handed to a new connection
    next_session_id: PlayerId,
    /// Maximum number of concurrent sessions
    max_sessions: usize,
}

impl SessionManager {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            next_session_id: 1,
            max_sessions,
        }
    }

    /// Registers a new connection
    ///
    /// Returns `None` when the server is at capacity.
    pub fn add_session(&mut self, addr: SocketAddr, sender: EventSender) -> Option<PlayerId> {
        if self.sessions.len() >= self.max_sessions {
            return None;
        }

        let session_id = self.next_session_id;
        self.next_session_id += 1;

        info!("Session {} connected from {}", session_id, addr);
        self.sessions
            .insert(session_id, Session::new(session_id, addr, sender));

        Some(session_id)
    }

    /// Deregisters a session. Unknown ids return `None`.
    pub fn remove_session(&mut self, session_id: PlayerId) -> Option<Session> {
        let session = self.sessions.remove(&session_id)?;
        info!(
            "Session {} disconnected after {:.1}s",
            session.id,
            session.connected_for().as_secs_f32()
        );
        Some(session)
    }

    pub fn contains(&self, session_id: PlayerId) -> bool {
        self.sessions.contains_key(&session_id)
    }

    /// Seats a session in a game. Returns false for unknown sessions.
    pub fn bind_game(&mut self, session_id: PlayerId, game_id: GameId) -> bool {
        match self.sessions.get_mut(&session_id) {
            Some(session) => {
                debug!("Session {} bound to game {}", session_id, game_id);
                session.game_id = Some(game_id);
                true
            }
            None => false,
        }
    }

    pub fn unbind_game(&mut self, session_id: PlayerId) -> Option<GameId> {
        self.sessions
            .get_mut(&session_id)
            .and_then(|session| session.game_id.take())
    }

    pub fn game_of(&self, session_id: PlayerId) -> Option<GameId> {
        self.sessions
            .get(&session_id)
            .and_then(|session| session.game_id.clone())
    }

    /// Queues an event for a session
    ///
    /// Never blocks. Returns false if the session is unknown or its writer
    /// has already gone away.
    pub fn send(&self, session_id: PlayerId, event: ServerEvent) -> bool {
        match self.sessions.get(&session_id) {
            Some(session) => session.sender.send(event).is_ok(),
            None => {
                debug!("Dropping event for unknown session {}", session_id);
                false
            }
        }
    }

    pub fn session_ids(&self) -> Vec<PlayerId> {
        self.sessions.keys().copied().collect()
    }

    /// Returns the number of connected sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
