//! CombatOutcome and the events emitted while a combat resolves

use crate::character::Character;
use crate::stat_block::{DamageReport, StatBlock};
use serde::{Deserialize, Serialize};

/// Which participant of a combat, by the role it was passed in with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    /// The other participant
    pub fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    /// Pick the character on this side
    pub fn select<'a>(self, attacker: &'a Character, defender: &'a Character) -> &'a Character {
        match self {
            Side::Attacker => attacker,
            Side::Defender => defender,
        }
    }
}

/// Final result of one combat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub winner: Side,
    pub loser: Side,
    pub winner_name: String,
    pub loser_name: String,
    /// Turn on which the combat ended (starts at 1)
    pub turns: u32,
}

impl CombatOutcome {
    /// Whether the side passed in as attacker won
    pub fn attacker_won(&self) -> bool {
        self.winner == Side::Attacker
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let plural = if self.turns == 1 { "" } else { "s" };
        format!(
            "{} defeats {} in {} turn{}",
            self.winner_name, self.loser_name, self.turns, plural
        )
    }
}

/// Snapshot taken when the combat starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStart {
    pub attacker_name: String,
    pub defender_name: String,
    pub attacker_stats: StatBlock,
    pub defender_stats: StatBlock,
    /// Side acting first on every turn
    pub first: Side,
}

/// One attack inside a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    /// Side that dealt the damage
    pub by: Side,
    pub attacker_name: String,
    pub target_name: String,
    pub damage: u32,
    pub report: DamageReport,
    /// Target stats right after the hit
    pub target_stats: StatBlock,
}

/// Everything that happened in one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub turn: u32,
    /// One strike if the first hit was fatal, otherwise two
    pub strikes: Vec<Strike>,
}

impl TurnEvent {
    /// Total damage dealt during the turn
    pub fn total_damage(&self) -> u32 {
        self.strikes.iter().map(|s| s.damage).sum()
    }
}

/// Any event a combat reports to its observer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    Started(CombatStart),
    TurnResolved(TurnEvent),
    Concluded(CombatOutcome),
}
