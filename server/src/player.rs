use shared::{PlayerId, PlayerView};

/// A participant in one game, identified by the session that joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    score: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Scores only ever grow
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            name: self.name.clone(),
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new(3, "Ana");
        assert_eq!(player.id(), 3);
        assert_eq!(player.name(), "Ana");
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn test_add_score_accumulates() {
        let mut player = Player::new(1, "Ana");
        player.add_score(3);
        player.add_score(0);
        player.add_score(5);
        assert_eq!(player.score(), 8);
    }

    #[test]
    fn test_add_score_saturates() {
        let mut player = Player::new(1, "Ana");
        player.add_score(u32::MAX);
        player.add_score(10);
        assert_eq!(player.score(), u32::MAX);
    }

    #[test]
    fn test_view() {
        let mut player = Player::new(9, "Bo");
        player.add_score(4);
        assert_eq!(
            player.view(),
            PlayerView {
                id: 9,
                name: "Bo".to_string(),
                score: 4,
            }
        );
    }
}
