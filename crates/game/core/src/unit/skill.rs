//! Skill data model and cooldown state machine.
//!
//! A skill is `Ready` when its current cooldown is zero and `OnCooldown`
//! otherwise; using it deducts mana and resets the cooldown exactly once per
//! successful use, even when the effect skips the base damage path. The
//! per-skill side effects are a closed [`SkillEffect`] set resolved by the
//! engine, which owns the map and target access the effects need.

use crate::action::SkillError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    Active,
    Passive,
}

/// Side effect resolved on top of (or instead of) the default damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Default effect only: base damage to a hostile target, if one is given.
    Strike,
    /// Default effect, then a fixed self-heal on the caster.
    SelfMend { heal: u32 },
    /// No damage: teleports the caster to the target cell, bypassing the
    /// normal movement-range check.
    Blink,
    /// Default effect, then steps the caster to a cell beside the target.
    FlankStep,
    /// Default effect, then fixed bonus damage on the same target.
    Envenom { bonus: u32 },
}

// Serialize only: skill definitions are static data, so the names borrow
// from the binary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Skill {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: SkillKind,
    pub cooldown: u32,
    pub current_cooldown: u32,
    pub mana_cost: u32,
    /// Maximum Manhattan distance to the target; 0 means untargeted.
    pub range: u32,
    pub damage: u32,
    /// One-character tag for renderers.
    pub symbol: char,
    pub effect: SkillEffect,
}

impl Skill {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &'static str,
        description: &'static str,
        kind: SkillKind,
        cooldown: u32,
        mana_cost: u32,
        range: u32,
        damage: u32,
        symbol: char,
        effect: SkillEffect,
    ) -> Self {
        Self {
            name,
            description,
            kind,
            cooldown,
            current_cooldown: 0,
            mana_cost,
            range,
            damage,
            symbol,
            effect,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Whether this skill's effect needs a target cell to make sense.
    pub fn requires_position(&self) -> bool {
        matches!(self.effect, SkillEffect::Blink)
    }

    /// Whether this skill's effect needs a target unit to make sense.
    pub fn requires_unit(&self) -> bool {
        matches!(self.effect, SkillEffect::FlankStep)
    }

    /// Shared legality gate run before any state mutation: cooldown, mana,
    /// and the range check when a target distance applies.
    pub fn can_use(&self, caster_mana: u32, distance: Option<u32>) -> Result<(), SkillError> {
        if !self.is_ready() {
            return Err(SkillError::OnCooldown {
                skill: self.name,
                remaining: self.current_cooldown,
            });
        }
        if caster_mana < self.mana_cost {
            return Err(SkillError::NotEnoughMana {
                skill: self.name,
                required: self.mana_cost,
                available: caster_mana,
            });
        }
        if let Some(distance) = distance {
            if self.range > 0 && distance > self.range {
                return Err(SkillError::OutOfRange {
                    skill: self.name,
                    distance,
                    range: self.range,
                });
            }
        }
        Ok(())
    }

    /// Marks the skill used: `Ready → OnCooldown`. The caster deducts mana.
    pub fn trigger(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    /// One end-of-turn decay step: `OnCooldown → Ready` at zero.
    pub fn reduce_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strike() -> Skill {
        Skill::new(
            "Fireball",
            "Launches a fireball at target",
            SkillKind::Active,
            3,
            30,
            4,
            60,
            'F',
            SkillEffect::Strike,
        )
    }

    #[test]
    fn gate_rejects_cooldown_mana_and_range_in_order() {
        let mut skill = strike();
        skill.trigger();
        assert!(matches!(
            skill.can_use(100, Some(1)),
            Err(SkillError::OnCooldown { remaining: 3, .. })
        ));

        let skill = strike();
        assert!(matches!(
            skill.can_use(25, None),
            Err(SkillError::NotEnoughMana {
                required: 30,
                available: 25,
                ..
            })
        ));
        assert!(matches!(
            skill.can_use(100, Some(5)),
            Err(SkillError::OutOfRange { .. })
        ));
        assert!(skill.can_use(100, Some(4)).is_ok());
        assert!(skill.can_use(100, None).is_ok());
    }

    #[test]
    fn untargeted_skills_skip_the_range_check() {
        let mut skill = strike();
        skill.range = 0;
        assert!(skill.can_use(100, Some(999)).is_ok());
    }

    #[test]
    fn cooldown_cycles_ready_to_ready() {
        let mut skill = strike();
        assert!(skill.is_ready());
        skill.trigger();
        assert!(!skill.is_ready());
        for _ in 0..3 {
            skill.reduce_cooldown();
        }
        assert!(skill.is_ready());
        skill.reduce_cooldown(); // idempotent at zero
        assert_eq!(skill.current_cooldown, 0);
    }
}
