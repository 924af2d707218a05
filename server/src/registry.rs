//! Concurrent store of live games
//!
//! The map is sharded so lookups for unrelated games do not contend, and each
//! game carries its own mutex so two games can be mutated in parallel.

use crate::board::Board;
use crate::dictionary::Dictionary;
use crate::game::Game;
use dashmap::DashMap;
use log::{debug, info};
use rand::Rng;
use shared::GameId;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Handle to one game. Lock it for any read or mutation.
pub type SharedGame = Arc<Mutex<Game>>;

#[derive(Default)]
pub struct GameRegistry {
    games: DashMap<GameId, SharedGame>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a board and registers a new game around it
    pub fn create(&self, size: usize, dictionary: &Arc<Dictionary>) -> (GameId, SharedGame) {
        self.create_with_rng(size, dictionary, &mut rand::thread_rng())
    }

    pub fn create_with_rng<R: Rng>(
        &self,
        size: usize,
        dictionary: &Arc<Dictionary>,
        rng: &mut R,
    ) -> (GameId, SharedGame) {
        let board = Board::generate(size, dictionary, rng);
        debug!(
            "Generated {}x{} board with {} placed words",
            size,
            size,
            board.placements().len()
        );
        self.insert_board(board, dictionary)
    }

    /// Registers a game around a prepared board under a fresh id
    pub fn insert_board(&self, board: Board, dictionary: &Arc<Dictionary>) -> (GameId, SharedGame) {
        let id = Uuid::new_v4().to_string();
        let game = Arc::new(Mutex::new(Game::new(
            id.clone(),
            board,
            Arc::clone(dictionary),
        )));

        self.games.insert(id.clone(), Arc::clone(&game));
        info!("Game {} created ({} active)", id, self.games.len());
        (id, game)
    }

    pub fn get(&self, id: &str) -> Option<SharedGame> {
        self.games.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Removes a game. Removing an unknown id is a no-op.
    pub fn remove(&self, id: &str) -> Option<SharedGame> {
        let removed = self.games.remove(id).map(|(_, game)| game);
        if removed.is_some() {
            info!("Game {} removed ({} active)", id, self.games.len());
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.games.contains_key(id)
    }

    pub fn ids(&self) -> Vec<GameId> {
        self.games.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use std::collections::HashSet;

    fn dictionary() -> Arc<Dictionary> {
        Arc::new(Dictionary::from_words(["cat", "dog", "owl"]))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let registry = GameRegistry::new();
        let (id, game) = registry.create(5, &dictionary());

        assert_eq!(registry.len(), 1);
        let fetched = registry.get(&id).unwrap();
        assert!(Arc::ptr_eq(&game, &fetched));

        let game = fetched.lock().await;
        assert_eq!(game.id(), id);
        assert_eq!(game.board().size(), 5);
        assert!(game.players().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = GameRegistry::new();
        let dictionary = dictionary();

        let ids: HashSet<GameId> = (0..200).map(|_| registry.create(3, &dictionary).0).collect();
        assert_eq!(ids.len(), 200);
        assert_eq!(registry.len(), 200);
    }

    #[test]
    fn test_get_unknown_id() {
        let registry = GameRegistry::new();
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = GameRegistry::new();
        let (id, _) = registry.create(4, &dictionary());

        assert!(registry.remove(&id).is_some());
        assert!(registry.remove(&id).is_none());
        assert!(registry.remove("never-existed").is_none());
        assert!(registry.is_empty());
        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_insert_board_keeps_board() {
        let registry = GameRegistry::new();
        let board = Board::from_rows(&["CAT", "XXX", "XXX"]).unwrap();

        let (id, game) = registry.insert_board(board.clone(), &dictionary());
        assert_eq!(game.blocking_lock().board(), &board);
        assert_eq!(registry.ids(), vec![id]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_get_remove() {
        let registry = Arc::new(GameRegistry::new());
        let dictionary = dictionary();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            let dictionary = Arc::clone(&dictionary);
            handles.push(tokio::spawn(async move {
                let mut kept = Vec::new();
                for i in 0..50 {
                    let (id, _) = registry.create(4, &dictionary);
                    assert!(registry.get(&id).is_some());
                    if i % 2 == 0 {
                        registry.remove(&id);
                    } else {
                        kept.push(id);
                    }
                }
                kept
            }));
        }

        let mut kept = HashSet::new();
        for handle in handles {
            kept.extend(handle.await.unwrap());
        }

        assert_eq!(kept.len(), 16 * 25);
        assert_eq!(registry.len(), kept.len());
        for id in &kept {
            assert!(registry.contains(id));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_never_overfill() {
        let registry = Arc::new(GameRegistry::new());
        let (id, _) = registry.create(4, &dictionary());

        let mut handles = Vec::new();
        for player_id in 1..=10 {
            let registry = Arc::clone(&registry);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let game = registry.get(&id).unwrap();
                let mut game = game.lock().await;
                game.add_player(Player::new(player_id, "p")).is_ok()
            }));
        }

        let mut seated = 0;
        for handle in handles {
            if handle.await.unwrap() {
                seated += 1;
            }
        }

        assert_eq!(seated, 2);
        assert_eq!(registry.get(&id).unwrap().lock().await.players().len(), 2);
    }
}
