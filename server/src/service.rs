//! Request handling for connected sessions
//!
//! Each inbound message is turned into engine calls under the owning game's
//! lock. Resulting events are collected into an outbox and only sent once the
//! lock has been released, so a slow client never holds up a game.

use crate::config::ServerConfig;
use crate::dictionary::Dictionary;
use crate::error::GameError;
use crate::player::Player;
use crate::registry::GameRegistry;
use crate::session_manager::{EventSender, SessionManager};
use log::{debug, info, warn};
use shared::{
    ClientRequest, CreateGame, JoinGame, PlayerId, ProtocolError, ServerEvent, SubmitWord,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Events waiting to be delivered, in order
type Outbox = Vec<(PlayerId, ServerEvent)>;

pub struct GameService {
    dictionary: Arc<Dictionary>,
    registry: GameRegistry,
    sessions: RwLock<SessionManager>,
    max_grid_size: usize,
}

impl GameService {
    pub fn new(dictionary: Arc<Dictionary>, config: &ServerConfig) -> Self {
        Self {
            dictionary,
            registry: GameRegistry::new(),
            sessions: RwLock::new(SessionManager::new(config.max_connections)),
            max_grid_size: config.max_grid_size,
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Registers a new connection. `None` means the server is full.
    pub async fn connect(&self, addr: SocketAddr, sender: EventSender) -> Option<PlayerId> {
        self.sessions.write().await.add_session(addr, sender)
    }

    /// Handles one text frame from a session
    ///
    /// Frames that are not a recognizable envelope are logged and dropped
    /// without a reply. A known type with a bad payload gets an error event.
    pub async fn handle_text(&self, session_id: PlayerId, text: &str) {
        match ClientRequest::parse(text) {
            Ok(request) => self.handle_request(session_id, request).await,
            Err(ProtocolError::UnknownType(kind)) => {
                warn!("Session {}: unknown message type: {}", session_id, kind);
            }
            Err(ProtocolError::InvalidPayload { kind, source }) => {
                warn!("Session {}: bad {} payload: {}", session_id, kind, source);
                let error = GameError::InvalidPayload(kind);
                self.dispatch(vec![(session_id, ServerEvent::error(error.to_string()))])
                    .await;
            }
            Err(e @ ProtocolError::Malformed(_)) => {
                warn!("Session {}: {}", session_id, e);
            }
        }
    }

    pub async fn handle_request(&self, session_id: PlayerId, request: ClientRequest) {
        let kind = request.kind();
        let result = match request {
            ClientRequest::CreateGame(payload) => self.create_game(session_id, payload).await,
            ClientRequest::JoinGame(payload) => self.join_game(session_id, payload).await,
            ClientRequest::SubmitWord(payload) => self.submit_word(session_id, payload).await,
        };

        let outbox = result.unwrap_or_else(|e| {
            debug!("Session {}: {} refused: {}", session_id, kind, e);
            vec![(session_id, ServerEvent::error(e.to_string()))]
        });
        self.dispatch(outbox).await;
    }

    async fn create_game(&self, session_id: PlayerId, payload: CreateGame) -> Result<Outbox, GameError> {
        let size = payload.grid_size;
        if size == 0 || size > self.max_grid_size {
            return Err(GameError::InvalidGridSize {
                size,
                max: self.max_grid_size,
            });
        }
        self.ensure_unseated(session_id).await?;

        let (game_id, game) = self.registry.create(size, &self.dictionary);
        let grid = {
            let mut game = game.lock().await;
            game.add_player(Player::new(session_id, payload.player_name))?;
            game.board().rows()
        };

        self.sessions
            .write()
            .await
            .bind_game(session_id, game_id.clone());
        info!("Session {} created game {} ({}x{})", session_id, game_id, size, size);

        Ok(vec![(
            session_id,
            ServerEvent::GameCreated {
                game_id,
                player_id: session_id,
                grid,
            },
        )])
    }

    async fn join_game(&self, session_id: PlayerId, payload: JoinGame) -> Result<Outbox, GameError> {
        self.ensure_unseated(session_id).await?;

        let game_id = payload.game_id;
        let game = self.registry.get(&game_id).ok_or(GameError::NotFound)?;
        let (joiner, host, grid, starting_player_id) = {
            let mut game = game.lock().await;
            // Teardown removes the registry entry under this lock.
            if !self.registry.contains(&game_id) {
                return Err(GameError::NotFound);
            }

            game.add_player(Player::new(session_id, payload.player_name))?;
            let host = game.players().first().map(Player::view);
            let joiner = game.player(session_id).map(Player::view);
            let starting = game.current_player().map(Player::id);
            (joiner, host, game.board().rows(), starting)
        };

        self.sessions
            .write()
            .await
            .bind_game(session_id, game_id.clone());
        info!("Session {} joined game {}", session_id, game_id);

        let mut outbox = Outbox::new();
        if let (Some(joiner), Some(host)) = (joiner, host) {
            if host.id != session_id {
                outbox.push((
                    host.id,
                    ServerEvent::PlayerJoined {
                        opponent: joiner,
                        grid: None,
                    },
                ));
                outbox.push((
                    session_id,
                    ServerEvent::PlayerJoined {
                        opponent: host.clone(),
                        grid: Some(grid),
                    },
                ));
                if let Some(starting_player_id) = starting_player_id {
                    for recipient in [host.id, session_id] {
                        outbox.push((recipient, ServerEvent::GameStarted { starting_player_id }));
                    }
                }
            }
        }
        Ok(outbox)
    }

    async fn submit_word(&self, session_id: PlayerId, payload: SubmitWord) -> Result<Outbox, GameError> {
        let game_id = self
            .sessions
            .read()
            .await
            .game_of(session_id)
            .ok_or(GameError::NotFound)?;
        let game = self.registry.get(&game_id).ok_or(GameError::NotFound)?;

        let (submission, recipients) = {
            let mut game = game.lock().await;
            let submission = game.submit_word(session_id, &payload.word)?;
            let recipients: Vec<PlayerId> = game.players().iter().map(Player::id).collect();
            (submission, recipients)
        };
        info!(
            "Game {}: player {} claimed {} (+{}, total {})",
            game_id, session_id, submission.word, submission.points, submission.score
        );

        let mut outbox = Outbox::new();
        for &recipient in &recipients {
            outbox.push((
                recipient,
                ServerEvent::WordSubmitted {
                    player_id: submission.player_id,
                    word: submission.word.clone(),
                    score: submission.score,
                },
            ));
        }
        for &recipient in &recipients {
            outbox.push((
                recipient,
                ServerEvent::NextTurn {
                    next_player_id: submission.next_player_id,
                },
            ));
        }
        Ok(outbox)
    }

    /// Tears down the session's game, if any, then forgets the session.
    /// The whole game goes away even when the other player is still
    /// connected. Safe to call more than once.
    pub async fn disconnect(&self, session_id: PlayerId) {
        let game_id = self.sessions.read().await.game_of(session_id);
        let mut outbox = Outbox::new();
        let mut seated = Vec::new();

        if let Some(game_id) = &game_id {
            if let Some(game) = self.registry.get(game_id) {
                let game = game.lock().await;
                if game.has_player(session_id) {
                    self.registry.remove(game_id);
                    for remaining in game.opponents_of(session_id) {
                        outbox.push((
                            remaining,
                            ServerEvent::PlayerDisconnected {
                                disconnected_player_id: session_id,
                            },
                        ));
                    }
                    seated = game.players().iter().map(Player::id).collect();
                }
            }
        }

        // Unbind before notifying, so a survivor can start a new game as soon
        // as it hears about the disconnect.
        let mut sessions = self.sessions.write().await;
        for player_id in seated {
            if sessions.game_of(player_id) == game_id {
                sessions.unbind_game(player_id);
            }
        }
        for (recipient, event) in outbox {
            if !sessions.send(recipient, event) {
                debug!("Could not deliver event to session {}", recipient);
            }
        }
        sessions.remove_session(session_id);
    }

    async fn ensure_unseated(&self, session_id: PlayerId) -> Result<(), GameError> {
        match self.sessions.read().await.game_of(session_id) {
            Some(_) => Err(GameError::AlreadyInGame),
            None => Ok(()),
        }
    }

    async fn dispatch(&self, outbox: Outbox) {
        if outbox.is_empty() {
            return;
        }

        let sessions = self.sessions.read().await;
        for (recipient, event) in outbox {
            if !sessions.send(recipient, event) {
                debug!("Could not deliver event to session {}", recipient);
            }
        }
    }
}
