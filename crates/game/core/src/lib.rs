//! Deterministic lane-combat simulation engine.
//!
//! `lanefall-core` defines the canonical rules of a turn-based tactical match:
//! the initiative scheduler, the grid map with exclusive cell occupancy, the
//! unit and skill data model, and the orchestrating [`engine::GameEngine`].
//! All state mutation flows through the engine; host layers submit one
//! [`PlayerAction`] per eligible player turn and drain the resulting event log.
pub mod action;
pub mod config;
pub mod engine;
pub mod event;
pub mod geom;
pub mod map;
pub mod rng;
pub mod roster;
pub mod scheduler;
pub mod unit;

pub use action::{ActionError, AttackError, MoveError, PlayerAction, SkillError};
pub use config::GameConfig;
pub use engine::{GameEngine, GamePhase};
pub use event::GameEvent;
pub use geom::{Position, Tick, UnitId};
pub use map::{Cell, CellKind, GameMap};
pub use rng::GameRng;
pub use roster::{Archetype, ChampionTemplate};
pub use scheduler::Scheduler;
pub use unit::{ChampionState, Skill, SkillEffect, SkillKind, Team, Unit, UnitData, UnitKind};
