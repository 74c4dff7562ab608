//! Harvesting skill: level and experience tracking.
//!
//! An avatar starts at level 0. Each harvested item awards experience
//! (the resource's `xp_per_harvest`). Advancing from level N needs
//! `max(N, 1) * 100` XP; a large gain can level up more than once. The
//! level caps at [`MAX_SKILL_LEVEL`], after which XP is discarded.
//!
//! Harvest success rate and cycle time are derived from the level by
//! [`HarvestableResource`](cadence_types::HarvestableResource).

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Maximum harvesting level.
pub const MAX_SKILL_LEVEL: u32 = 20;

/// XP needed per level step.
const XP_PER_LEVEL: u32 = 100;

/// Level and experience for an avatar's harvesting skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestSkill {
    level: u32,
    xp: u32,
}

impl HarvestSkill {
    /// A skill at level 0 with no experience.
    pub const fn new() -> Self {
        Self { level: 0, xp: 0 }
    }

    /// A skill at an explicit level (clamped to [`MAX_SKILL_LEVEL`]).
    pub fn at_level(level: u32) -> Self {
        Self {
            level: level.min(MAX_SKILL_LEVEL),
            xp: 0,
        }
    }

    /// Current level.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// XP accumulated toward the next level.
    pub const fn xp(&self) -> u32 {
        self.xp
    }

    /// XP required to leave the current level, or `None` at the cap.
    pub fn xp_for_next_level(&self) -> Option<u32> {
        if self.level >= MAX_SKILL_LEVEL {
            return None;
        }
        self.level.max(1).checked_mul(XP_PER_LEVEL)
    }

    /// Add experience. Returns `Some(new_level)` if the skill levelled up.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if the XP counter would
    /// overflow.
    pub fn add_xp(&mut self, amount: u32) -> Result<Option<u32>, WorldError> {
        if amount == 0 || self.level >= MAX_SKILL_LEVEL {
            return Ok(None);
        }

        self.xp = self
            .xp
            .checked_add(amount)
            .ok_or(WorldError::ArithmeticOverflow { context: "harvest xp" })?;

        let original_level = self.level;
        while let Some(threshold) = self.xp_for_next_level() {
            if self.xp < threshold {
                break;
            }
            self.xp = self.xp.saturating_sub(threshold);
            self.level = self.level.saturating_add(1);
        }
        if self.level >= MAX_SKILL_LEVEL {
            self.xp = 0;
        }

        Ok((self.level > original_level).then_some(self.level))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let skill = HarvestSkill::new();
        assert_eq!(skill.level(), 0);
        assert_eq!(skill.xp_for_next_level(), Some(100));
    }

    #[test]
    fn levels_up_at_threshold() {
        let mut skill = HarvestSkill::new();
        assert_eq!(skill.add_xp(90).unwrap(), None);
        assert_eq!(skill.add_xp(10).unwrap(), Some(1));
        assert_eq!(skill.xp(), 0);
        // Level 1 -> 2 also needs 100, level 2 -> 3 needs 200.
        assert_eq!(skill.add_xp(100).unwrap(), Some(2));
        assert_eq!(skill.xp_for_next_level(), Some(200));
    }

    #[test]
    fn large_gain_levels_up_more_than_once() {
        let mut skill = HarvestSkill::new();
        // 100 (0->1) + 100 (1->2) + 200 (2->3) = 400, with 50 left over.
        assert_eq!(skill.add_xp(450).unwrap(), Some(3));
        assert_eq!(skill.xp(), 50);
    }

    #[test]
    fn caps_at_max_level() {
        let mut skill = HarvestSkill::at_level(19);
        assert_eq!(skill.add_xp(u32::MAX).unwrap(), Some(MAX_SKILL_LEVEL));
        assert_eq!(skill.xp(), 0);
        assert_eq!(skill.add_xp(500).unwrap(), None);
        assert_eq!(skill.xp_for_next_level(), None);
        assert_eq!(HarvestSkill::at_level(99).level(), MAX_SKILL_LEVEL);
    }

    #[test]
    fn zero_gain_is_ignored() {
        let mut skill = HarvestSkill::new();
        assert_eq!(skill.add_xp(0).unwrap(), None);
        assert_eq!(skill.xp(), 0);
    }
}
