//! Text rendering for the terminal client

use crate::game::ClientGameState;
use shared::ServerEvent;

/// Lays out the grid with spaced letters and row/column guides
pub fn render_grid(grid: &[String]) -> String {
    let width = grid.first().map(|row| row.chars().count()).unwrap_or(0);
    let mut out = String::from("   ");
    for col in 0..width {
        out.push_str(&format!(" {}", col % 10));
    }
    out.push('\n');

    for (index, row) in grid.iter().enumerate() {
        out.push_str(&format!("{:>2} ", index));
        for letter in row.chars() {
            out.push(' ');
            out.push(letter);
        }
        out.push('\n');
    }
    out
}

/// One-line score summary
pub fn render_scores(state: &ClientGameState) -> String {
    let turn = if state.is_my_turn() {
        "your turn"
    } else {
        "waiting"
    };
    match &state.opponent {
        Some(opponent) => format!(
            "You {} - {} {} ({})",
            state.my_score, opponent.score, opponent.name, turn
        ),
        None => "Waiting for an opponent".to_string(),
    }
}

/// Human-readable description of an event, after it has been applied
pub fn describe_event(event: &ServerEvent, state: &ClientGameState) -> String {
    match event {
        ServerEvent::GameCreated { game_id, grid, .. } => format!(
            "Game created. Share this id with your opponent: {}\n{}",
            game_id,
            render_grid(grid)
        ),
        ServerEvent::PlayerJoined { opponent, grid } => match grid {
            Some(grid) => format!("Joined {}'s game\n{}", opponent.name, render_grid(grid)),
            None => format!("{} joined your game", opponent.name),
        },
        ServerEvent::GameStarted { .. } => format!("Game started. {}", render_scores(state)),
        ServerEvent::WordSubmitted {
            player_id,
            word,
            score,
        } => {
            let who = if state.is_me(*player_id) {
                "You".to_string()
            } else {
                state
                    .opponent
                    .as_ref()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| format!("Player {}", player_id))
            };
            format!("{} found {} (score {})", who, word, score)
        }
        ServerEvent::NextTurn { .. } => render_scores(state),
        ServerEvent::PlayerDisconnected { .. } => {
            "Your opponent left; the game is over".to_string()
        }
        ServerEvent::Error { message } => format!("! {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PlayerView;

    #[test]
    fn test_render_grid() {
        let grid = vec!["CAT".to_string(), "DOG".to_string()];
        assert_eq!(render_grid(&grid), "    0 1 2\n 0  C A T\n 1  D O G\n");
    }

    #[test]
    fn test_render_empty_grid() {
        assert_eq!(render_grid(&[]), "   \n");
    }

    #[test]
    fn test_scores_without_opponent() {
        assert_eq!(
            render_scores(&ClientGameState::new()),
            "Waiting for an opponent"
        );
    }

    #[test]
    fn test_describe_opponent_word() {
        let mut state = ClientGameState::new();
        state.player_id = Some(1);
        state.opponent = Some(PlayerView {
            id: 2,
            name: "Bo".to_string(),
            score: 4,
        });

        let event = ServerEvent::WordSubmitted {
            player_id: 2,
            word: "DOG".to_string(),
            score: 4,
        };
        assert_eq!(describe_event(&event, &state), "Bo found DOG (score 4)");
    }

    #[test]
    fn test_describe_error() {
        let state = ClientGameState::new();
        assert_eq!(
            describe_event(&ServerEvent::error("Game is full"), &state),
            "! Game is full"
        );
    }
}
