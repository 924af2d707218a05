//! Client-side picture of the current game, rebuilt from server events
//!
//! The server is authoritative; this state only exists so the terminal can
//! show the board, both scores and whose turn it is.

use shared::{GameId, PlayerId, PlayerView, ServerEvent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientGameState {
    pub player_id: Option<PlayerId>,
    pub game_id: Option<GameId>,
    pub grid: Vec<String>,
    pub opponent: Option<PlayerView>,
    pub my_score: u32,
    pub found_words: Vec<String>,
    pub turn: Option<PlayerId>,
}

impl ClientGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_game(&self) -> bool {
        !self.grid.is_empty()
    }

    /// True when `id` is not the opponent. The joiner is never told its own
    /// id, so turns are judged against the opponent's.
    pub fn is_me(&self, id: PlayerId) -> bool {
        match (&self.player_id, &self.opponent) {
            (Some(me), _) => *me == id,
            (None, Some(opponent)) => opponent.id != id,
            (None, None) => false,
        }
    }

    pub fn is_my_turn(&self) -> bool {
        self.turn.is_some_and(|id| self.is_me(id))
    }

    /// Folds one event into the state
    pub fn apply(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::GameCreated {
                game_id,
                player_id,
                grid,
            } => {
                *self = Self {
                    player_id: Some(*player_id),
                    game_id: Some(game_id.clone()),
                    grid: grid.clone(),
                    ..Self::default()
                };
            }
            ServerEvent::PlayerJoined { opponent, grid } => {
                self.opponent = Some(opponent.clone());
                if let Some(grid) = grid {
                    self.grid = grid.clone();
                }
            }
            ServerEvent::GameStarted { starting_player_id } => {
                self.turn = Some(*starting_player_id);
            }
            ServerEvent::WordSubmitted {
                player_id,
                word,
                score,
            } => {
                self.found_words.push(word.clone());
                if self.is_me(*player_id) {
                    self.my_score = *score;
                } else if let Some(opponent) = self.opponent.as_mut() {
                    opponent.score = *score;
                }
            }
            ServerEvent::NextTurn { next_player_id } => {
                self.turn = Some(*next_player_id);
            }
            ServerEvent::PlayerDisconnected { .. } => {
                *self = Self::default();
            }
            ServerEvent::Error { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opponent(id: PlayerId) -> PlayerView {
        PlayerView {
            id,
            name: "Bo".to_string(),
            score: 0,
        }
    }

    #[test]
    fn test_host_flow() {
        let mut state = ClientGameState::new();
        assert!(!state.in_game());

        state.apply(&ServerEvent::GameCreated {
            game_id: "g".to_string(),
            player_id: 1,
            grid: vec!["AB".to_string(), "CD".to_string()],
        });
        state.apply(&ServerEvent::PlayerJoined {
            opponent: opponent(2),
            grid: None,
        });
        state.apply(&ServerEvent::GameStarted {
            starting_player_id: 1,
        });

        assert!(state.in_game());
        assert!(state.is_my_turn());

        state.apply(&ServerEvent::WordSubmitted {
            player_id: 1,
            word: "AB".to_string(),
            score: 2,
        });
        state.apply(&ServerEvent::NextTurn { next_player_id: 2 });

        assert_eq!(state.my_score, 2);
        assert!(!state.is_my_turn());
        assert_eq!(state.found_words, vec!["AB".to_string()]);
    }

    #[test]
    fn test_joiner_infers_turn_from_opponent() {
        let mut state = ClientGameState::new();
        state.apply(&ServerEvent::PlayerJoined {
            opponent: opponent(1),
            grid: Some(vec!["A".to_string()]),
        });
        state.apply(&ServerEvent::GameStarted {
            starting_player_id: 1,
        });
        assert!(!state.is_my_turn());

        state.apply(&ServerEvent::WordSubmitted {
            player_id: 1,
            word: "A".to_string(),
            score: 1,
        });
        state.apply(&ServerEvent::NextTurn { next_player_id: 2 });

        assert!(state.is_my_turn());
        assert_eq!(state.opponent.as_ref().map(|o| o.score), Some(1));
        assert_eq!(state.my_score, 0);
    }

    #[test]
    fn test_disconnect_resets() {
        let mut state = ClientGameState::new();
        state.apply(&ServerEvent::GameCreated {
            game_id: "g".to_string(),
            player_id: 1,
            grid: vec!["A".to_string()],
        });
        state.apply(&ServerEvent::PlayerDisconnected {
            disconnected_player_id: 2,
        });
        assert_eq!(state, ClientGameState::default());
    }
}
