//! Combat resolution - The turn loop between two characters

use super::observer::{CombatObserver, LogObserver};
use super::result::{CombatOutcome, CombatStart, Side, Strike, TurnEvent};
use crate::character::Character;
use crate::config::CombatRules;

/// Lifecycle of a combat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatState {
    NotStarted,
    /// `turn` is the next turn to resolve, `first` acts first in every turn
    InProgress { turn: u32, first: Side },
    Concluded(CombatOutcome),
}

/// A fight between two characters, resolved one turn at a time
///
/// Initiative is decided once, when the combat begins: the side with the
/// higher current speed acts first in every turn, and the attacker wins ties.
/// Each turn the first side strikes; if the target survives it strikes back.
/// The combat ends as soon as either side's health reaches 0.
pub struct Combat<'a> {
    attacker: &'a mut Character,
    defender: &'a mut Character,
    rules: CombatRules,
    state: CombatState,
}

impl<'a> Combat<'a> {
    /// Set up a combat; nothing is read or mutated until it begins
    pub fn new(attacker: &'a mut Character, defender: &'a mut Character, rules: &CombatRules) -> Self {
        Combat {
            attacker,
            defender,
            rules: rules.clone(),
            state: CombatState::NotStarted,
        }
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self.state, CombatState::Concluded(_))
    }

    /// The outcome, once concluded
    pub fn outcome(&self) -> Option<&CombatOutcome> {
        match &self.state {
            CombatState::Concluded(outcome) => Some(outcome),
            _ => None,
        }
    }

    fn character(&self, side: Side) -> &Character {
        match side {
            Side::Attacker => &*self.attacker,
            Side::Defender => &*self.defender,
        }
    }

    fn character_mut(&mut self, side: Side) -> &mut Character {
        match side {
            Side::Attacker => &mut *self.attacker,
            Side::Defender => &mut *self.defender,
        }
    }

    /// Roll initiative and move to `InProgress`; no-op once started
    pub fn begin(&mut self, observer: &mut dyn CombatObserver) {
        if self.state != CombatState::NotStarted {
            return;
        }

        let first = if self.attacker.stats().speed.current >= self.defender.stats().speed.current {
            Side::Attacker
        } else {
            Side::Defender
        };

        observer.on_combat_started(&CombatStart {
            attacker_name: self.attacker.name().to_string(),
            defender_name: self.defender.name().to_string(),
            attacker_stats: *self.attacker.stats(),
            defender_stats: *self.defender.stats(),
            first,
        });

        self.state = CombatState::InProgress { turn: 1, first };
    }

    /// Resolve one full turn, beginning the combat first if needed
    ///
    /// Returns the state after the turn. Calling this on a concluded combat
    /// does nothing.
    pub fn resolve_turn(&mut self, observer: &mut dyn CombatObserver) -> &CombatState {
        self.begin(observer);

        let (turn, first) = match self.state {
            CombatState::InProgress { turn, first } => (turn, first),
            _ => return &self.state,
        };
        let second = first.opponent();

        let mut strikes = Vec::with_capacity(2);

        strikes.push(self.strike(first));
        if self.character(second).stats().is_depleted() {
            return self.conclude(turn, first, strikes, observer);
        }

        strikes.push(self.strike(second));
        if self.character(first).stats().is_depleted() {
            return self.conclude(turn, second, strikes, observer);
        }

        observer.on_turn_resolved(&TurnEvent { turn, strikes });
        self.state = CombatState::InProgress {
            turn: turn + 1,
            first,
        };
        &self.state
    }

    /// Run turns until the combat concludes
    pub fn run(&mut self, observer: &mut dyn CombatObserver) -> CombatOutcome {
        loop {
            if let CombatState::Concluded(outcome) = self.resolve_turn(observer) {
                return outcome.clone();
            }
        }
    }

    fn strike(&mut self, by: Side) -> Strike {
        let damage = self.rules.damage_for(self.character(by).stats().attack.current);
        let attacker_name = self.character(by).name().to_string();

        let target = self.character_mut(by.opponent());
        let report = target.apply_damage(damage);

        Strike {
            by,
            attacker_name,
            target_name: target.name().to_string(),
            damage,
            report,
            target_stats: *target.stats(),
        }
    }

    fn conclude(
        &mut self,
        turn: u32,
        winner: Side,
        strikes: Vec<Strike>,
        observer: &mut dyn CombatObserver,
    ) -> &CombatState {
        observer.on_turn_resolved(&TurnEvent { turn, strikes });

        let loser = winner.opponent();
        let outcome = CombatOutcome {
            winner,
            loser,
            winner_name: self.character(winner).name().to_string(),
            loser_name: self.character(loser).name().to_string(),
            turns: turn,
        };
        observer.on_combat_concluded(&outcome);

        self.state = CombatState::Concluded(outcome);
        &self.state
    }
}

/// Fight to the end with default rules, narrating through `log`
pub fn start_combat(attacker: &mut Character, defender: &mut Character) -> CombatOutcome {
    start_combat_with(attacker, defender, &CombatRules::default(), &mut LogObserver)
}

/// Fight to the end with explicit rules and observer
pub fn start_combat_with(
    attacker: &mut Character,
    defender: &mut Character,
    rules: &CombatRules,
    observer: &mut dyn CombatObserver,
) -> CombatOutcome {
    Combat::new(attacker, defender, rules).run(observer)
}
