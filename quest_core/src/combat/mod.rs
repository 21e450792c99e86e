//! Combat - Deterministic turn-based fights between two characters

mod observer;
mod resolution;
mod result;

pub use observer::{CombatObserver, LogObserver, NoopObserver, RecordingObserver};
pub use resolution::{start_combat, start_combat_with, Combat, CombatState};
pub use result::{CombatEvent, CombatOutcome, CombatStart, Side, Strike, TurnEvent};
