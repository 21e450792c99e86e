//! StatSource - Trait and implementations for stat providers

mod gear;
mod template;

pub use gear::EquipmentItem;
pub use template::{BaseStats, StatTemplate};

use crate::stat_block::StatBlock;
use crate::types::Attribute;

/// Trait for anything that contributes flat bonuses to a StatBlock
///
/// Bonuses are deltas on top of a character's base stats. `remove` undoes
/// exactly what `apply` did as long as nothing else touched the affected
/// attributes in between; each attribute is handled independently, so the
/// order of applies and removes across sources does not matter.
pub trait StatSource: Send + Sync {
    /// Identifier for this source (used in log output)
    fn id(&self) -> &str;

    /// Non-zero bonuses granted by this source
    fn bonuses(&self) -> Vec<(Attribute, i32)>;

    /// Add every bonus to both current and maximum values
    fn apply(&self, stats: &mut StatBlock) {
        for (attribute, bonus) in self.bonuses() {
            stats.adjust_maximum_and_current(attribute, bonus);
        }
    }

    /// Subtract every bonus from both current and maximum values
    fn remove(&self, stats: &mut StatBlock) {
        for (attribute, bonus) in self.bonuses() {
            stats.adjust_maximum_and_current(attribute, bonus.saturating_neg());
        }
    }
}
