//! Player-facing actions and their rejection taxonomy.
//!
//! One action is submitted per eligible player turn. Validation happens
//! before any mutation: a rejected action leaves every piece of state
//! untouched and does not consume the turn, so the caller simply resubmits.
//! No error here is fatal to the simulation.

use crate::geom::{Position, UnitId};

/// One discrete command for the player-controlled champion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    Move {
        to: Position,
    },
    Attack {
        target: UnitId,
    },
    UseSkill {
        skill: usize,
        target_pos: Option<Position>,
        target_unit: Option<UnitId>,
    },
    /// Always succeeds; consumes the turn with no other effect.
    Wait,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("moving unit {0} not found")]
    ActorNotFound(UnitId),

    #[error("destination {destination} is out of movement range ({distance} > {range})")]
    OutOfRange {
        destination: Position,
        distance: u32,
        range: u32,
    },

    #[error("destination {destination} is not walkable")]
    Blocked { destination: Position },

    #[error("this unit cannot move")]
    Immobile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("attacking unit {0} not found")]
    ActorNotFound(UnitId),

    #[error("target {0} not found")]
    TargetNotFound(UnitId),

    #[error("target {0} is already dead")]
    TargetDead(UnitId),

    #[error("target {0} is on the same team")]
    SameTeam(UnitId),

    #[error("target out of attack range ({distance} > {range})")]
    OutOfRange { distance: u32, range: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("casting unit {0} not found")]
    ActorNotFound(UnitId),

    #[error("no skill at index {index}")]
    NoSuchSkill { index: usize },

    #[error("{skill} is on cooldown ({remaining} turns remaining)")]
    OnCooldown {
        skill: &'static str,
        remaining: u32,
    },

    #[error("{skill} needs {required} mana, only {available} available")]
    NotEnoughMana {
        skill: &'static str,
        required: u32,
        available: u32,
    },

    #[error("{skill} target out of range ({distance} > {range})")]
    OutOfRange {
        skill: &'static str,
        distance: u32,
        range: u32,
    },

    #[error("{skill} requires a target")]
    MissingTarget { skill: &'static str },

    #[error("skill target {0} not found")]
    TargetNotFound(UnitId),

    #[error("skill target {0} is already dead")]
    TargetDead(UnitId),

    #[error("only champions have skills")]
    NotAChampion,
}

/// Top-level rejection for a submitted [`PlayerAction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the match is not in the Playing phase")]
    NotPlaying,

    #[error("the player is not eligible to act this tick")]
    NotEligible,

    #[error("the player champion is down and waiting to respawn")]
    PlayerDown,

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error(transparent)]
    Skill(#[from] SkillError),
}
