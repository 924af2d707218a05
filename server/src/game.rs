//! Two-player turn state machine
//!
//! A game moves from `Created` (nobody seated) through `Joinable` (creator
//! waiting) to `Active` (two players alternating turns). There is no finished
//! state; a game ends when it is dropped from the registry.

use crate::board::Board;
use crate::dictionary::Dictionary;
use crate::error::{GameError, ValidationError};
use crate::player::Player;
use log::debug;
use shared::{GameId, PlayerId};
use std::collections::HashSet;
use std::sync::Arc;

pub const MAX_PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Created,
    Joinable,
    Active,
}

/// Outcome of an accepted word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub player_id: PlayerId,
    pub word: String,
    pub points: u32,
    /// Submitter's total after this word
    pub score: u32,
    pub next_player_id: PlayerId,
}

#[derive(Debug)]
pub struct Game {
    id: GameId,
    board: Board,
    dictionary: Arc<Dictionary>,
    players: Vec<Player>,
    found_words: HashSet<String>,
    current_turn: usize,
}

impl Game {
    pub fn new(id: GameId, board: Board, dictionary: Arc<Dictionary>) -> Self {
        Self {
            id,
            board,
            dictionary,
            players: Vec::with_capacity(MAX_PLAYERS),
            found_words: HashSet::new(),
            current_turn: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        match self.players.len() {
            0 => GameState::Created,
            1 => GameState::Joinable,
            _ => GameState::Active,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn has_player(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Everyone seated except `id`
    pub fn opponents_of(&self, id: PlayerId) -> Vec<PlayerId> {
        self.players
            .iter()
            .map(Player::id)
            .filter(|&other| other != id)
            .collect()
    }

    /// Seats a player. The second arrival activates the game with the creator
    /// holding the first turn.
    pub fn add_player(&mut self, player: Player) -> Result<GameState, GameError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::GameFull);
        }

        debug!("Game {}: seating player {}", self.id, player.id());
        self.players.push(player);
        if self.players.len() == MAX_PLAYERS {
            self.current_turn = 0;
        }
        Ok(self.state())
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_turn)
    }

    pub fn is_word_found(&self, word: &str) -> bool {
        self.found_words.contains(&word.trim().to_uppercase())
    }

    pub fn found_words_count(&self) -> usize {
        self.found_words.len()
    }

    /// Claims a word for the turn holder. A refused word leaves the ledger,
    /// scores and turn untouched, so the same player may try again.
    pub fn submit_word(&mut self, player_id: PlayerId, word: &str) -> Result<Submission, GameError> {
        match self.current_player() {
            Some(holder) if holder.id() == player_id => {}
            _ => return Err(GameError::NotYourTurn),
        }

        let word = word.trim().to_uppercase();
        if !self.dictionary.contains(&word) {
            return Err(ValidationError::NotInDictionary.into());
        }
        if self.found_words.contains(&word) {
            return Err(ValidationError::AlreadyFound.into());
        }
        if !self.board.verify(&word) {
            return Err(ValidationError::NotOnBoard.into());
        }

        let points = u32::try_from(word.chars().count()).unwrap_or(u32::MAX);
        let holder = &mut self.players[self.current_turn];
        holder.add_score(points);
        let score = holder.score();

        self.found_words.insert(word.clone());
        self.current_turn = (self.current_turn + 1) % self.players.len();
        let next_player_id = self.players[self.current_turn].id();

        Ok(Submission {
            player_id,
            word,
            points,
            score,
            next_player_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: PlayerId = 1;
    const BOB: PlayerId = 2;

    fn test_game() -> Game {
        let board = Board::from_rows(&["CATQW", "XYWVU", "DOGOP", "RSBED", "FGHIJ"]).unwrap();
        let dictionary = Arc::new(Dictionary::from_words(["cat", "dog", "zebra", "bed"]));
        Game::new("game-1".to_string(), board, dictionary)
    }

    fn active_game() -> Game {
        let mut game = test_game();
        game.add_player(Player::new(ALICE, "Alice")).unwrap();
        game.add_player(Player::new(BOB, "Bob")).unwrap();
        game
    }

    fn current_id(game: &Game) -> Option<PlayerId> {
        game.current_player().map(Player::id)
    }

    #[test]
    fn test_state_transitions() {
        let mut game = test_game();
        assert_eq!(game.state(), GameState::Created);
        assert!(game.current_player().is_none());

        assert_eq!(
            game.add_player(Player::new(ALICE, "Alice")),
            Ok(GameState::Joinable)
        );
        assert_eq!(
            game.add_player(Player::new(BOB, "Bob")),
            Ok(GameState::Active)
        );
        assert_eq!(current_id(&game), Some(ALICE));
    }

    #[test]
    fn test_third_player_is_rejected() {
        let mut game = active_game();

        let result = game.add_player(Player::new(3, "Cy"));
        assert_eq!(result, Err(GameError::GameFull));
        assert_eq!(game.players().len(), 2);
        assert!(!game.has_player(3));
    }

    #[test]
    fn test_successful_submission() {
        let mut game = active_game();

        let submission = game.submit_word(ALICE, "cat").unwrap();
        assert_eq!(
            submission,
            Submission {
                player_id: ALICE,
                word: "CAT".to_string(),
                points: 3,
                score: 3,
                next_player_id: BOB,
            }
        );
        assert!(game.is_word_found("CAT"));
        assert!(game.is_word_found("cat"));
        assert_eq!(game.found_words_count(), 1);
        assert_eq!(game.player(ALICE).unwrap().score(), 3);
        assert_eq!(current_id(&game), Some(BOB));
    }

    #[test]
    fn test_resubmitting_found_word() {
        let mut game = active_game();
        game.submit_word(ALICE, "CAT").unwrap();

        let result = game.submit_word(BOB, "CAT");
        assert_eq!(result, Err(ValidationError::AlreadyFound.into()));
        assert_eq!(game.found_words_count(), 1);
        assert_eq!(current_id(&game), Some(BOB));
        assert_eq!(game.player(BOB).unwrap().score(), 0);
    }

    #[test]
    fn test_submission_out_of_turn() {
        let mut game = active_game();

        let result = game.submit_word(BOB, "CAT");
        assert_eq!(result, Err(GameError::NotYourTurn));
        assert_eq!(game.found_words_count(), 0);
        assert_eq!(current_id(&game), Some(ALICE));
    }

    #[test]
    fn test_submission_by_stranger() {
        let mut game = active_game();
        assert_eq!(game.submit_word(99, "CAT"), Err(GameError::NotYourTurn));
    }

    #[test]
    fn test_submission_without_players() {
        let mut game = test_game();
        assert_eq!(game.submit_word(ALICE, "CAT"), Err(GameError::NotYourTurn));
    }

    #[test]
    fn test_validation_order() {
        let mut game = active_game();

        // Neither in the dictionary nor on the board: dictionary is checked first.
        assert_eq!(
            game.submit_word(ALICE, "QQQ"),
            Err(ValidationError::NotInDictionary.into())
        );
        // In the dictionary but not traceable.
        assert_eq!(
            game.submit_word(ALICE, "zebra"),
            Err(ValidationError::NotOnBoard.into())
        );
        assert_eq!(game.found_words_count(), 0);
        assert_eq!(current_id(&game), Some(ALICE));
        assert_eq!(game.player(ALICE).unwrap().score(), 0);
    }

    #[test]
    fn test_failed_attempt_can_be_retried() {
        let mut game = active_game();

        assert!(game.submit_word(ALICE, "zebra").is_err());
        let submission = game.submit_word(ALICE, "dog").unwrap();
        assert_eq!(submission.next_player_id, BOB);
    }

    #[test]
    fn test_turns_alternate_and_scores_accumulate() {
        let mut game = active_game();

        game.submit_word(ALICE, "cat").unwrap();
        game.submit_word(BOB, "dog").unwrap();
        let submission = game.submit_word(ALICE, "bed").unwrap();

        assert_eq!(submission.score, 6);
        assert_eq!(game.player(BOB).unwrap().score(), 3);
        assert_eq!(current_id(&game), Some(BOB));
        assert_eq!(game.found_words_count(), 3);
    }

    #[test]
    fn test_ledger_never_shrinks() {
        let mut game = active_game();
        let attempts = [
            (ALICE, "cat"),
            (ALICE, "cat"),
            (BOB, "cat"),
            (BOB, "zzz"),
            (BOB, "dog"),
            (BOB, "bed"),
            (ALICE, "bed"),
        ];

        let mut last = game.found_words_count();
        for (player, word) in attempts {
            let turn_before = current_id(&game);
            let accepted = game.submit_word(player, word).is_ok();
            assert!(game.found_words_count() >= last);
            if !accepted {
                assert_eq!(current_id(&game), turn_before);
            }
            last = game.found_words_count();
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn test_single_player_keeps_turn() {
        let mut game = test_game();
        game.add_player(Player::new(ALICE, "Alice")).unwrap();

        let submission = game.submit_word(ALICE, "cat").unwrap();
        assert_eq!(submission.next_player_id, ALICE);
    }

    #[test]
    fn test_opponents_of() {
        let game = active_game();
        assert_eq!(game.opponents_of(ALICE), vec![BOB]);
        assert_eq!(game.opponents_of(BOB), vec![ALICE]);
        assert_eq!(game.opponents_of(7), vec![ALICE, BOB]);
    }
}
