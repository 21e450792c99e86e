//! Observers notified while a combat resolves

use super::result::{CombatEvent, CombatOutcome, CombatStart, Side, TurnEvent};

/// Sink for combat narration
///
/// Every method has an empty default; the engine never depends on any
/// particular observer being attached.
pub trait CombatObserver {
    fn on_combat_started(&mut self, _start: &CombatStart) {}

    fn on_turn_resolved(&mut self, _turn: &TurnEvent) {}

    fn on_combat_concluded(&mut self, _outcome: &CombatOutcome) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CombatObserver for NoopObserver {}

/// Observer that narrates the combat through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl CombatObserver for LogObserver {
    fn on_combat_started(&mut self, start: &CombatStart) {
        log::info!("===== COMBAT: {} vs {} =====", start.attacker_name, start.defender_name);
        log::debug!("{}: {}", start.attacker_name, start.attacker_stats.summary());
        log::debug!("{}: {}", start.defender_name, start.defender_stats.summary());

        let (first, second, first_speed, second_speed) = match start.first {
            Side::Attacker => (
                &start.attacker_name,
                &start.defender_name,
                start.attacker_stats.speed.current,
                start.defender_stats.speed.current,
            ),
            Side::Defender => (
                &start.defender_name,
                &start.attacker_name,
                start.defender_stats.speed.current,
                start.attacker_stats.speed.current,
            ),
        };
        log::info!(
            "Initiative: {} strikes first (speed {} vs {} for {})",
            first,
            first_speed,
            second_speed,
            second
        );
    }

    fn on_turn_resolved(&mut self, turn: &TurnEvent) {
        log::debug!("--- Turn {} ({} damage dealt) ---", turn.turn, turn.total_damage());
        for strike in &turn.strikes {
            log::debug!(
                "{} hits {} for {}: HP {}/{} (shield {}/{})",
                strike.attacker_name,
                strike.target_name,
                strike.damage,
                strike.target_stats.health.current,
                strike.target_stats.health.maximum,
                strike.target_stats.shield.current,
                strike.target_stats.shield.maximum,
            );
            if strike.report.is_killing_blow() {
                log::info!("{} is defeated", strike.target_name);
            }
        }
    }

    fn on_combat_concluded(&mut self, outcome: &CombatOutcome) {
        log::info!("Combat over: {}", outcome.summary());
    }
}

/// Observer that keeps every event, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<CombatEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded turn events only
    pub fn turns(&self) -> impl Iterator<Item = &TurnEvent> {
        self.events.iter().filter_map(|e| match e {
            CombatEvent::TurnResolved(turn) => Some(turn),
            _ => None,
        })
    }
}

impl CombatObserver for RecordingObserver {
    fn on_combat_started(&mut self, start: &CombatStart) {
        self.events.push(CombatEvent::Started(start.clone()));
    }

    fn on_turn_resolved(&mut self, turn: &TurnEvent) {
        self.events.push(CombatEvent::TurnResolved(turn.clone()));
    }

    fn on_combat_concluded(&mut self, outcome: &CombatOutcome) {
        self.events.push(CombatEvent::Concluded(outcome.clone()));
    }
}
