//! Replay - Drive a session from a movement script or a random wander

use quest_core::{
    Direction, GameEvent, GameSession, Position, SessionError, SessionStatus, StatBlock,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Simulation error
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid move '{0}', expected one of U, D, L, R")]
    InvalidMove(char),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Parse a movement script such as "RRDD LU"; whitespace and commas are ignored
pub fn parse_moves(script: &str) -> Result<Vec<Direction>, SimError> {
    script
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| Direction::from_key(c).ok_or(SimError::InvalidMove(c)))
        .collect()
}

/// Random directions for a headless wander
pub fn random_moves<R: Rng + ?Sized>(steps: usize, rng: &mut R) -> Vec<Direction> {
    let all = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    (0..steps)
        .filter_map(|_| all.choose(rng).copied())
        .collect()
}

/// Final state of a replayed session
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub status: SessionStatus,
    pub moves_taken: usize,
    pub position: Position,
    pub player_name: String,
    pub class: Option<String>,
    pub stats: StatBlock,
    pub equipped: Vec<String>,
    pub combats: usize,
    pub enemies_defeated: usize,
    pub boss_spawned: bool,
    pub events: Vec<GameEvent>,
}

impl RunSummary {
    fn capture<R: Rng>(session: &GameSession<R>, moves_taken: usize, events: Vec<GameEvent>) -> Self {
        let player = session.player();
        RunSummary {
            status: session.status(),
            moves_taken,
            position: session.position(),
            player_name: player.name().to_string(),
            class: player.current_class().map(|c| c.name.clone()),
            stats: *player.stats(),
            equipped: player
                .inventory()
                .map(|inv| inv.equipped().map(|i| i.name.clone()).collect())
                .unwrap_or_default(),
            combats: events
                .iter()
                .filter(|e| matches!(e, GameEvent::Combat { .. }))
                .count(),
            enemies_defeated: events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyDefeated { .. }))
                .count(),
            boss_spawned: session.boss_spawned(),
            events,
        }
    }
}

/// Play `moves` until they run out or the session ends
///
/// Open chests are answered with `treasure_pick`, clamped to the last item.
pub fn replay<R: Rng>(
    session: &mut GameSession<R>,
    moves: &[Direction],
    treasure_pick: usize,
) -> Result<RunSummary, SimError> {
    let mut events = Vec::new();
    let mut taken = 0;

    for direction in moves {
        if session.status().is_over() {
            break;
        }
        events.extend(session.move_player(*direction)?);
        taken += 1;

        let offered = session.pending_treasure().map(|items| items.len());
        if let Some(len) = offered {
            let index = treasure_pick.min(len.saturating_sub(1));
            events.extend(session.choose_treasure(index)?);
        }
    }

    log::info!("Replay finished after {} move(s): {}", taken, session.status());
    Ok(RunSummary::capture(session, taken, events))
}
