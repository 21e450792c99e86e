//! StatBlock - Current and maximum values of an entity's attributes

mod stat_value;

pub use stat_value::StatValue;

use crate::source::BaseStats;
use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// Complete stat state for a character (player or enemy)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub health: StatValue,
    pub shield: StatValue,
    pub attack: StatValue,
    pub speed: StatValue,
    pub hit_count: StatValue,
}

/// What a single `apply_damage` call did to the block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Damage requested
    pub amount: u32,
    /// Portion soaked up by the shield
    pub absorbed_by_shield: i32,
    pub shield_before: i32,
    pub shield_after: i32,
    pub health_before: i32,
    pub health_after: i32,
}

impl DamageReport {
    /// Health actually lost by this hit
    pub fn health_lost(&self) -> i32 {
        self.health_before - self.health_after
    }

    /// Whether this hit brought health to zero
    pub fn is_killing_blow(&self) -> bool {
        self.health_before > 0 && self.health_after == 0
    }
}

impl StatBlock {
    /// Create a StatBlock with every attribute full at the given base values
    pub fn from_base(base: &BaseStats) -> Self {
        StatBlock {
            health: StatValue::full(base.health),
            shield: StatValue::full(base.shield),
            attack: StatValue::full(base.attack),
            speed: StatValue::full(base.speed),
            hit_count: StatValue::full(base.hit_count),
        }
    }

    /// Get an attribute by name
    pub fn get(&self, attribute: Attribute) -> &StatValue {
        match attribute {
            Attribute::Health => &self.health,
            Attribute::Shield => &self.shield,
            Attribute::Attack => &self.attack,
            Attribute::Speed => &self.speed,
            Attribute::HitCount => &self.hit_count,
        }
    }

    /// Get a mutable attribute by name
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut StatValue {
        match attribute {
            Attribute::Health => &mut self.health,
            Attribute::Shield => &mut self.shield,
            Attribute::Attack => &mut self.attack,
            Attribute::Speed => &mut self.speed,
            Attribute::HitCount => &mut self.hit_count,
        }
    }

    /// Add `delta` to both the current and maximum value of `attribute`
    ///
    /// Used by equip/unequip. No clamping happens here; only
    /// [`StatBlock::apply_damage`] clamps health and shield.
    pub fn adjust_maximum_and_current(&mut self, attribute: Attribute, delta: i32) {
        self.get_mut(attribute).shift(delta);
    }

    /// Reset every attribute (current and maximum) to the given base values
    pub fn reset_to(&mut self, base: &BaseStats) {
        *self = StatBlock::from_base(base);
    }

    /// Apply damage: the shield absorbs first, the overflow hits health
    ///
    /// Health floors at 0 and the shield never goes negative. Zero damage and
    /// damage beyond shield + health are both accepted.
    pub fn apply_damage(&mut self, amount: u32) -> DamageReport {
        let mut report = DamageReport {
            amount,
            shield_before: self.shield.current,
            health_before: self.health.current,
            ..DamageReport::default()
        };

        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        let remaining_shield = self.shield.current.saturating_sub(amount);

        if remaining_shield >= 0 {
            self.shield.current = remaining_shield;
        } else {
            // remaining_shield is the negative overflow
            self.shield.current = 0;
            self.health.current = self.health.current.saturating_add(remaining_shield);
        }

        if self.health.current < 0 {
            self.health.current = 0;
        }

        report.absorbed_by_shield = report.shield_before - self.shield.current;
        report.shield_after = self.shield.current;
        report.health_after = self.health.current;
        report
    }

    /// Whether health has reached zero
    pub fn is_depleted(&self) -> bool {
        self.health.current <= 0
    }

    /// One-line "hp/max shield/max" summary used in log narration
    pub fn summary(&self) -> String {
        format!(
            "HP {}/{} | Shield {}/{} | Atk {} | Speed {} | Hits {}",
            self.health.current,
            self.health.maximum,
            self.shield.current,
            self.shield.maximum,
            self.attack.current,
            self.speed.current,
            self.hit_count.current,
        )
    }
}
