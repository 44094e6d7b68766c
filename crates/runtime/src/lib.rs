//! Session orchestration around the deterministic simulation core.
//!
//! This crate hosts a [`GameSession`]: it assembles a seeded match, feeds
//! player actions into the engine, and fans the resulting narration out over
//! a topic-based event bus so frontends and recorders can consume only what
//! they care about. The simulation itself stays synchronous; only event
//! delivery rides on tokio channels.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the match lifecycle and action submission API
//! - [`events`] provides the topic-based event bus
//! - [`telemetry`] wires up structured logging for binaries and tests

pub mod events;
pub mod session;
pub mod telemetry;

pub use events::{Event, EventBus, Topic};
pub use session::{GameSession, SessionConfig, SessionError};

pub type Result<T> = std::result::Result<T, SessionError>;
