//! Match lifecycle and action submission.
//!
//! A [`GameSession`] owns one engine instance from champion select to game
//! over. Rosters are drawn from the seeded generator, so a seed plus an
//! action script replays the whole match bit-for-bit. Every engine event is
//! logged, appended to the match log, and published on the session bus.

use tracing::{debug, info, warn};

use lanefall_core::roster::{self, ChampionTemplate};
use lanefall_core::{
    ActionError, Archetype, GameConfig, GameEngine, GameEvent, GamePhase, PlayerAction, Position,
    Team, Unit, UnitId,
};

use crate::events::{Event, EventBus, Topic};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("failed to serialize match log: {0}")]
    Export(#[from] serde_json::Error),
}

/// Everything needed to assemble a reproducible match.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub seed: u64,
    pub player_name: String,
    pub player_archetype: Archetype,
    /// Champions per side, including the player.
    pub team_size: usize,
    pub game: GameConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            player_name: "Player".to_string(),
            player_archetype: Archetype::Tank,
            team_size: 3,
            game: GameConfig::default(),
        }
    }
}

/// One match from start to finish.
pub struct GameSession {
    engine: GameEngine,
    bus: EventBus,
    /// Full match log in occurrence order, for recorders and replays.
    log: Vec<GameEvent>,
}

impl GameSession {
    /// Builds the arena, drafts both rosters from the seed, and starts the
    /// match. The session is immediately ready for [`GameSession::submit`].
    pub fn new(config: SessionConfig) -> Self {
        let mut engine = GameEngine::new(config.game.clone(), config.seed);

        let player = ChampionTemplate::of(config.player_archetype, config.player_name.clone());
        let allies = roster::random_team(engine.rng_mut(), config.team_size.saturating_sub(1));
        let enemies = roster::random_team(engine.rng_mut(), config.team_size);
        engine.start_game(player, allies, enemies);

        info!(
            seed = config.seed,
            player = %config.player_name,
            archetype = %config.player_archetype,
            "match started"
        );

        let mut session = Self {
            engine,
            bus: EventBus::new(),
            log: Vec::new(),
        };
        session.flush_events();
        session
    }

    /// Submits one player action. On rejection nothing changed and no turn
    /// was spent; the caller corrects and resubmits.
    pub fn submit(&mut self, action: PlayerAction) -> Result<(), SessionError> {
        debug!(?action, tick = %self.engine.clock(), "action submitted");
        if let Err(error) = self.engine.process_player_action(action) {
            warn!(%error, "action rejected");
            return Err(error.into());
        }
        self.flush_events();
        Ok(())
    }

    /// Pauses or resumes the match.
    pub fn toggle_pause(&mut self) -> GamePhase {
        let phase = self.engine.toggle_pause();
        self.flush_events();
        phase
    }

    fn flush_events(&mut self) {
        for event in self.engine.drain_events() {
            info!(event = %event, "game event");
            self.bus.publish(Event::from_game_event(event.clone()));
            self.log.push(event);
        }
    }

    // ========================================================================
    // Read surface
    // ========================================================================

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.phase()
    }

    pub fn winner(&self) -> Option<Team> {
        self.engine.winning_team()
    }

    pub fn player(&self) -> Option<&Unit> {
        self.engine.player()
    }

    pub fn player_id(&self) -> Option<UnitId> {
        self.engine.player_id()
    }

    /// True when the engine is waiting on the next player action.
    pub fn awaiting_player(&self) -> bool {
        self.engine.awaiting_player()
    }

    /// Subscribes a consumer to one bus topic.
    pub fn subscribe(&self, topic: Topic) -> Option<tokio::sync::broadcast::Receiver<Event>> {
        self.bus.subscribe(topic)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Everything that has happened so far, in order.
    pub fn event_log(&self) -> &[GameEvent] {
        &self.log
    }

    /// Serializes the match log for archival.
    pub fn export_log(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(&self.log)?)
    }

    /// Renders the whole arena as a glyph grid, one row per line.
    pub fn render(&self) -> String {
        let map = self.engine.map();
        let mut out = String::with_capacity((map.width() as usize + 1) * map.height() as usize);
        for y in 0..map.height() as i32 {
            for x in 0..map.width() as i32 {
                out.push(self.engine.display_glyph(Position::new(x, y)));
            }
            out.push('\n');
        }
        out
    }
}
