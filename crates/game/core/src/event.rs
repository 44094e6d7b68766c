//! Append-only event log.
//!
//! The engine narrates every state change as a [`GameEvent`] pushed onto an
//! in-memory log; hosts drain the log after each processed action and forward
//! it to whatever consumes it (message panes, test assertions). The core
//! never blocks on consumption.

use std::fmt;

use crate::engine::GamePhase;
use crate::geom::Position;
use crate::unit::Team;

/// High-level occurrence in the match, with enough structure for programmatic
/// consumers; `Display` renders the human-readable narration line.
// Serialize only: skill names borrow from the static skill table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GameEvent {
    GameStarted {
        champion: String,
    },
    PhaseChanged {
        phase: GamePhase,
    },
    Moved {
        unit: String,
        to: Position,
    },
    Attacked {
        attacker: String,
        target: String,
        damage: u32,
    },
    SkillUsed {
        caster: String,
        skill: &'static str,
    },
    UnitDied {
        unit: String,
    },
    ExperienceGained {
        champion: String,
        amount: u32,
    },
    LeveledUp {
        champion: String,
        level: u32,
    },
    Respawned {
        champion: String,
        at: Position,
    },
    MinionWave {
        spawned: u32,
    },
    GameOver {
        winner: Team,
        reason: String,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::GameStarted { champion } => {
                write!(f, "Game started! You are playing as {champion}")
            }
            GameEvent::PhaseChanged { phase } => write!(f, "Game phase: {phase}"),
            GameEvent::Moved { unit, to } => write!(f, "{unit} moved to {to}"),
            GameEvent::Attacked {
                attacker,
                target,
                damage,
            } => write!(f, "{attacker} attacked {target} for {damage} damage!"),
            GameEvent::SkillUsed { caster, skill } => write!(f, "{caster} used {skill}!"),
            GameEvent::UnitDied { unit } => write!(f, "{unit} has been defeated!"),
            GameEvent::ExperienceGained { champion, amount } => {
                write!(f, "{champion} gained {amount} experience!")
            }
            GameEvent::LeveledUp { champion, level } => {
                write!(f, "{champion} reached level {level}!")
            }
            GameEvent::Respawned { champion, at } => {
                write!(f, "{champion} respawned at {at}")
            }
            GameEvent::MinionWave { spawned } => {
                write!(f, "A wave of {spawned} minions marches out")
            }
            GameEvent::GameOver { winner, reason } => {
                write!(f, "Game over: {reason} ({winner} team wins)")
            }
        }
    }
}
