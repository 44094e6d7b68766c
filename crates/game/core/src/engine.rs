//! Match orchestration: the authoritative reducer for all game state.
//!
//! The [`GameEngine`] validates and applies one [`PlayerAction`] per eligible
//! player turn, then drives the rest of the turn cycle itself: AI decisions
//! for every other eligible unit, end-of-turn bookkeeping (regeneration,
//! cooldowns, respawns), periodic minion waves, and the win-condition check.
//! Rejected actions mutate nothing and consume no turn; the caller resubmits.

use std::collections::BTreeMap;

use crate::action::{ActionError, AttackError, MoveError, PlayerAction, SkillError};
use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::geom::{Position, Tick, UnitId};
use crate::map::GameMap;
use crate::rng::GameRng;
use crate::roster::ChampionTemplate;
use crate::scheduler::Scheduler;
use crate::unit::{SkillEffect, Team, Unit, UnitData, UnitKind};

/// Top-level match state machine. Turns only process in `Playing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    ChampionSelect,
    Playing,
    GameOver,
    Paused,
}

/// How far from a blocked anchor a unit may be displaced when entering play.
const PLACEMENT_SLACK: u32 = 4;

pub struct GameEngine {
    config: GameConfig,
    rng: GameRng,
    map: GameMap,
    /// Unit arena addressed by stable handle; BTreeMap keeps iteration
    /// deterministic.
    units: BTreeMap<UnitId, Unit>,
    next_unit_id: u32,
    scheduler: Scheduler,
    phase: GamePhase,
    player: Option<UnitId>,
    winning_team: Option<Team>,
    game_over_reason: String,
    minion_spawn_timer: u32,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Creates a match in `ChampionSelect` with a freshly generated map. All
    /// randomness for the whole match derives from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let map = GameMap::generate(&config, &mut rng);
        Self {
            config,
            rng,
            map,
            units: BTreeMap::new(),
            next_unit_id: 1,
            scheduler: Scheduler::new(),
            phase: GamePhase::ChampionSelect,
            player: None,
            winning_team: None,
            game_over_reason: String::new(),
            minion_spawn_timer: 0,
            events: Vec::new(),
        }
    }

    /// Seeded generator for match assembly (roster randomization).
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // ========================================================================
    // Match setup
    // ========================================================================

    /// Builds the board and transitions `ChampionSelect → Playing`.
    ///
    /// The first template fights for the player team and becomes the
    /// player-controlled champion; `allies` fill out the player team and
    /// `enemies` the opposing one. Nexuses and towers are created from the
    /// map's named coordinates. Nexuses never act and are not scheduled.
    pub fn start_game(
        &mut self,
        player: ChampionTemplate,
        allies: Vec<ChampionTemplate>,
        enemies: Vec<ChampionTemplate>,
    ) {
        if self.phase != GamePhase::ChampionSelect {
            return;
        }

        self.spawn_structures();

        let height = self.config.map_height as i32;
        let width = self.config.map_width as i32;

        let player_name = player.name.clone();
        let mut player_team = vec![player];
        player_team.extend(allies);
        for (i, template) in player_team.iter().enumerate() {
            let anchor = Position::new(8 + 2 * i as i32, height - 8 - i as i32);
            let id = self.spawn_champion(template, anchor, Team::Player);
            if i == 0 {
                self.player = id;
            }
        }
        for (i, template) in enemies.iter().enumerate() {
            let anchor = Position::new(width - 9 - 2 * i as i32, 7 + i as i32);
            self.spawn_champion(template, anchor, Team::Enemy);
        }

        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::GameStarted {
            champion: player_name,
        });
    }

    fn spawn_structures(&mut self) {
        let player_nexus = self.map.player_nexus();
        let enemy_nexus = self.map.enemy_nexus();
        let player_towers: Vec<Position> = self.map.player_towers().to_vec();
        let enemy_towers: Vec<Position> = self.map.enemy_towers().to_vec();

        let id = self.allocate_id();
        self.insert_unit(
            Unit::nexus(id, "Player Nexus".into(), player_nexus, Team::Player),
            player_nexus,
            false,
        );
        let id = self.allocate_id();
        self.insert_unit(
            Unit::nexus(id, "Enemy Nexus".into(), enemy_nexus, Team::Enemy),
            enemy_nexus,
            false,
        );

        for (lane, &pos) in player_towers.iter().enumerate() {
            let id = self.allocate_id();
            let name = format!("Player Tower {}", lane + 1);
            self.insert_unit(Unit::tower(id, name, pos, Team::Player, lane), pos, true);
        }
        for (lane, &pos) in enemy_towers.iter().enumerate() {
            let id = self.allocate_id();
            let name = format!("Enemy Tower {}", lane + 1);
            self.insert_unit(Unit::tower(id, name, pos, Team::Enemy, lane), pos, true);
        }
    }

    fn spawn_champion(
        &mut self,
        template: &ChampionTemplate,
        anchor: Position,
        team: Team,
    ) -> Option<UnitId> {
        let id = self.allocate_id();
        let unit = template.spawn(id, anchor, team);
        let id = self.insert_unit(unit, anchor, true)?;
        // The cell actually landed on becomes the respawn anchor.
        if let Some(unit) = self.units.get_mut(&id) {
            let position = unit.position;
            if let Some(champ) = unit.champion_mut() {
                champ.respawn_anchor = position;
            }
        }
        Some(id)
    }

    fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    /// Places a unit at (or next to) `anchor`, adds it to the arena, and
    /// optionally schedules it. Returns None if no cell was free nearby.
    fn insert_unit(&mut self, mut unit: Unit, anchor: Position, schedule: bool) -> Option<UnitId> {
        let position = self.map.nearest_free(anchor, PLACEMENT_SLACK)?;
        if !self.map.place(&mut unit, position) {
            return None;
        }
        let id = unit.id;
        let speed = unit.speed;
        self.units.insert(id, unit);
        if schedule {
            self.scheduler.register(id, speed);
        }
        Some(id)
    }

    // ========================================================================
    // Player actions
    // ========================================================================

    /// Validates and applies one player action. On success the player's turn
    /// is consumed and the full turn cycle runs before returning; on failure
    /// nothing changes and no turn is spent.
    pub fn process_player_action(&mut self, action: PlayerAction) -> Result<(), ActionError> {
        if self.phase != GamePhase::Playing {
            return Err(ActionError::NotPlaying);
        }
        let player = self.player.ok_or(ActionError::NotPlaying)?;
        if !self.scheduler.is_eligible(player) {
            return Err(ActionError::NotEligible);
        }
        // A downed player still waits out the respawn countdown; the turn
        // cycle must keep running or the timer would never tick. Everything
        // else requires a living champion.
        let player_alive = self.units.get(&player).is_some_and(Unit::is_alive);
        if !player_alive && !matches!(action, PlayerAction::Wait) {
            return Err(ActionError::PlayerDown);
        }

        match action {
            PlayerAction::Move { to } => self.resolve_move(player, to)?,
            PlayerAction::Attack { target } => self.resolve_attack(player, target)?,
            PlayerAction::UseSkill {
                skill,
                target_pos,
                target_unit,
            } => self.resolve_skill(player, skill, target_pos, target_unit)?,
            PlayerAction::Wait => {}
        }

        if let Some(unit) = self.units.get(&player) {
            let speed = unit.speed;
            self.scheduler.consume(player, speed);
        }
        self.run_turn_cycle();
        Ok(())
    }

    fn resolve_move(&mut self, actor: UnitId, to: Position) -> Result<(), MoveError> {
        let unit = self
            .units
            .get(&actor)
            .ok_or(MoveError::ActorNotFound(actor))?;
        if matches!(unit.data, UnitData::Tower { .. } | UnitData::Nexus) {
            return Err(MoveError::Immobile);
        }
        let distance = unit.position.manhattan_distance(to);
        if distance > unit.movement_range {
            return Err(MoveError::OutOfRange {
                destination: to,
                distance,
                range: unit.movement_range,
            });
        }
        if !self.map.is_empty(to) {
            return Err(MoveError::Blocked { destination: to });
        }

        let unit = self
            .units
            .get_mut(&actor)
            .ok_or(MoveError::ActorNotFound(actor))?;
        if !self.map.place(unit, to) {
            return Err(MoveError::Blocked { destination: to });
        }
        self.events.push(GameEvent::Moved {
            unit: unit.name.clone(),
            to,
        });
        Ok(())
    }

    fn resolve_attack(&mut self, actor: UnitId, target: UnitId) -> Result<(), AttackError> {
        let attacker = self
            .units
            .get(&actor)
            .ok_or(AttackError::ActorNotFound(actor))?;
        let victim = self
            .units
            .get(&target)
            .ok_or(AttackError::TargetNotFound(target))?;

        if victim.is_dead() {
            return Err(AttackError::TargetDead(target));
        }
        if victim.team == attacker.team {
            return Err(AttackError::SameTeam(target));
        }
        let distance = attacker.position.manhattan_distance(victim.position);
        if distance > attacker.attack_range {
            return Err(AttackError::OutOfRange {
                distance,
                range: attacker.attack_range,
            });
        }

        let damage = attacker.attack_damage;
        let attacker_name = attacker.name.clone();
        let victim_name = victim.name.clone();

        if let Some(victim) = self.units.get_mut(&target) {
            victim.take_damage(damage);
        }
        self.events.push(GameEvent::Attacked {
            attacker: attacker_name,
            target: victim_name,
            damage,
        });

        if self.units.get(&target).is_some_and(Unit::is_dead) {
            self.handle_unit_death(target);
        }
        Ok(())
    }

    fn resolve_skill(
        &mut self,
        actor: UnitId,
        index: usize,
        target_pos: Option<Position>,
        target_unit: Option<UnitId>,
    ) -> Result<(), SkillError> {
        let caster = self
            .units
            .get(&actor)
            .ok_or(SkillError::ActorNotFound(actor))?;
        let caster_team = caster.team;
        let caster_position = caster.position;
        let champ = caster.champion().ok_or(SkillError::NotAChampion)?;
        let skill = champ
            .skill(index)
            .ok_or(SkillError::NoSuchSkill { index })?
            .clone();

        if skill.requires_position() && target_pos.is_none() {
            return Err(SkillError::MissingTarget { skill: skill.name });
        }
        if skill.requires_unit() && target_unit.is_none() {
            return Err(SkillError::MissingTarget { skill: skill.name });
        }

        let target_position = match target_unit {
            Some(id) => {
                let victim = self.units.get(&id).ok_or(SkillError::TargetNotFound(id))?;
                if victim.is_dead() {
                    return Err(SkillError::TargetDead(id));
                }
                Some(victim.position)
            }
            None => None,
        };

        // Shared legality gate, run before any mutation.
        let gate_position = target_pos.or(target_position);
        let distance = gate_position.map(|pos| caster_position.manhattan_distance(pos));
        skill.can_use(champ.current_mana, distance)?;

        // Commit point: mana and cooldown are spent exactly once per
        // successful use, regardless of which effect arm runs.
        {
            let caster = self
                .units
                .get_mut(&actor)
                .ok_or(SkillError::ActorNotFound(actor))?;
            let champ = caster.champion_mut().ok_or(SkillError::NotAChampion)?;
            champ.current_mana -= skill.mana_cost;
            if let Some(slot) = champ.skills.get_mut(index) {
                slot.trigger();
            }
            self.events.push(GameEvent::SkillUsed {
                caster: caster.name.clone(),
                skill: skill.name,
            });
        }

        // Default damage applies to a hostile target for every effect except
        // the pure reposition.
        let hostile_target = target_unit
            .filter(|_| !matches!(skill.effect, SkillEffect::Blink))
            .filter(|id| {
                self.units
                    .get(id)
                    .is_some_and(|victim| victim.team != caster_team)
            });
        if let Some(id) = hostile_target {
            self.deal_damage(id, skill.damage);
        }

        match skill.effect {
            SkillEffect::Strike => {}
            SkillEffect::SelfMend { heal } => {
                if let Some(caster) = self.units.get_mut(&actor) {
                    caster.heal(heal);
                }
            }
            SkillEffect::Blink => {
                if let Some(destination) = target_pos {
                    self.relocate(actor, destination);
                }
            }
            SkillEffect::FlankStep => {
                // Step to the cell just west of the target.
                if let Some(pos) = target_position {
                    self.relocate(actor, Position::new(pos.x - 1, pos.y));
                }
            }
            SkillEffect::Envenom { bonus } => {
                if let Some(id) = hostile_target {
                    self.deal_damage(id, bonus);
                }
            }
        }

        if let Some(id) = target_unit {
            if self.units.get(&id).is_some_and(Unit::is_dead) {
                self.handle_unit_death(id);
            }
        }
        Ok(())
    }

    /// Skill-driven reposition: bypasses the movement-range check but still
    /// goes through the map so occupancy stays consistent. A taken cell
    /// silently cancels the reposition (the skill was still spent).
    fn relocate(&mut self, actor: UnitId, destination: Position) {
        if !self.map.is_empty(destination) {
            return;
        }
        if let Some(unit) = self.units.get_mut(&actor) {
            if self.map.place(unit, destination) {
                self.events.push(GameEvent::Moved {
                    unit: unit.name.clone(),
                    to: destination,
                });
            }
        }
    }

    fn deal_damage(&mut self, target: UnitId, amount: u32) {
        if let Some(unit) = self.units.get_mut(&target) {
            unit.take_damage(amount);
        }
    }

    // ========================================================================
    // Turn cycle
    // ========================================================================

    fn run_turn_cycle(&mut self) {
        self.scheduler.advance();

        let player = self.player;
        let ready = self
            .scheduler
            .eligible_units(|id| self.units.get(&id).is_some_and(Unit::is_alive));
        for id in ready {
            if Some(id) == player {
                continue;
            }
            // An earlier action this cycle may have killed or removed it.
            if !self.units.get(&id).is_some_and(Unit::is_alive) {
                continue;
            }
            self.ai_turn(id);
            if let Some(unit) = self.units.get(&id) {
                let speed = unit.speed;
                self.scheduler.consume(id, speed);
            }
        }

        self.champion_bookkeeping();

        self.minion_spawn_timer += 1;
        if self.minion_spawn_timer >= self.config.minion_spawn_interval {
            self.minion_spawn_timer = 0;
            self.spawn_minion_wave();
        }

        self.check_win_conditions();
    }

    /// Fixed per-kind behavior for non-player units. Failed moves or attacks
    /// simply waste the turn.
    fn ai_turn(&mut self, actor: UnitId) {
        let Some(unit) = self.units.get(&actor) else {
            return;
        };
        let kind = unit.kind();
        let objective = match unit.data {
            UnitData::Minion { target, .. } => Some(target),
            _ => None,
        };
        match kind {
            UnitKind::Champion => self.champion_ai(actor),
            UnitKind::Minion => {
                if let Some(objective) = objective {
                    self.minion_ai(actor, objective);
                }
            }
            UnitKind::Tower => self.tower_ai(actor),
            UnitKind::Nexus => {}
        }
    }

    /// Champions chase and attack the nearest living enemy.
    fn champion_ai(&mut self, actor: UnitId) {
        let Some(unit) = self.units.get(&actor) else {
            return;
        };
        let position = unit.position;
        let team = unit.team;

        let nearest = self
            .units
            .values()
            .filter(|other| other.team != team && other.is_alive())
            .map(|other| (position.manhattan_distance(other.position), other.id))
            .min();
        let Some((_, enemy)) = nearest else {
            return;
        };

        let can_attack = match (self.units.get(&actor), self.units.get(&enemy)) {
            (Some(attacker), Some(target)) => attacker.can_attack(target),
            _ => false,
        };
        if can_attack {
            let _ = self.resolve_attack(actor, enemy);
        } else if let Some(target) = self.units.get(&enemy) {
            let step = position.step_toward(target.position);
            let _ = self.resolve_move(actor, step);
        }
    }

    /// Minions push their lane: one cell toward the objective, then attack
    /// whatever is in range after the step.
    fn minion_ai(&mut self, actor: UnitId, objective: Position) {
        if let Some(unit) = self.units.get(&actor) {
            let step = unit.position.step_toward_axis(objective);
            let _ = self.resolve_move(actor, step);
        }

        let Some(unit) = self.units.get(&actor) else {
            return;
        };
        let position = unit.position;
        let range = unit.attack_range;
        let team = unit.team;

        let target = self
            .map
            .units_in_range(position, range)
            .into_iter()
            .find(|&id| {
                self.units
                    .get(&id)
                    .is_some_and(|other| other.team != team && other.is_alive())
            });
        if let Some(target) = target {
            let _ = self.resolve_attack(actor, target);
        }
    }

    /// Towers attack the nearest enemy in range.
    fn tower_ai(&mut self, actor: UnitId) {
        let Some(unit) = self.units.get(&actor) else {
            return;
        };
        let position = unit.position;
        let range = unit.attack_range;
        let team = unit.team;

        let target = self
            .map
            .units_in_range(position, range)
            .into_iter()
            .filter_map(|id| self.units.get(&id).map(|other| (other, id)))
            .filter(|(other, _)| other.team != team && other.is_alive())
            .map(|(other, id)| (position.manhattan_distance(other.position), id))
            .min();
        if let Some((_, target)) = target {
            let _ = self.resolve_attack(actor, target);
        }
    }

    /// End-of-turn champion upkeep: regeneration and cooldown decay for the
    /// living, respawn countdown for the fallen.
    fn champion_bookkeeping(&mut self) {
        let champions: Vec<UnitId> = self
            .units
            .values()
            .filter(|unit| unit.kind() == UnitKind::Champion)
            .map(|unit| unit.id)
            .collect();

        for id in champions {
            let Some(unit) = self.units.get_mut(&id) else {
                continue;
            };
            if unit.is_alive() {
                unit.regenerate();
                if let Some(champ) = unit.champion_mut() {
                    champ.reduce_cooldowns();
                }
                continue;
            }

            let respawned = unit
                .champion_mut()
                .map(|champ| champ.tick_respawn())
                .unwrap_or(false);
            if respawned {
                unit.current_health = unit.max_health;
                let anchor = unit
                    .champion()
                    .map(|champ| champ.respawn_anchor)
                    .unwrap_or(unit.position);
                let name = unit.name.clone();
                if let Some(landing) = self.map.nearest_free(anchor, PLACEMENT_SLACK) {
                    if let Some(unit) = self.units.get_mut(&id) {
                        self.map.place(unit, landing);
                    }
                }
                let at = self.units.get(&id).map(|unit| unit.position).unwrap_or(anchor);
                self.events.push(GameEvent::Respawned { champion: name, at });
            }
        }
    }

    /// The nexus a team defends. Neutral units have no nexus of their own
    /// and fall back to the player's.
    fn nexus_position(&self, team: Team) -> Position {
        match team {
            Team::Enemy => self.map.enemy_nexus(),
            Team::Player | Team::Neutral => self.map.player_nexus(),
        }
    }

    /// Spawns one minion per lane per team at the lane spawn point, each
    /// aimed at the opposing nexus. An occupied spawn cell skips that minion.
    fn spawn_minion_wave(&mut self) {
        let player_spawns: Vec<Position> = self.map.player_spawns().to_vec();
        let enemy_spawns: Vec<Position> = self.map.enemy_spawns().to_vec();
        let player_objective = self.nexus_position(Team::Player.opponent());
        let enemy_objective = self.nexus_position(Team::Enemy.opponent());

        let mut spawned = 0;
        for lane in 0..GameConfig::LANES {
            if let Some(&pos) = player_spawns.get(lane) {
                if self.map.is_empty(pos) {
                    let id = self.allocate_id();
                    let mut minion =
                        Unit::minion(id, "Player Minion".into(), pos, Team::Player, lane);
                    minion.set_minion_objective(player_objective);
                    if self.insert_unit(minion, pos, true).is_some() {
                        spawned += 1;
                    }
                }
            }
            if let Some(&pos) = enemy_spawns.get(lane) {
                if self.map.is_empty(pos) {
                    let id = self.allocate_id();
                    let mut minion =
                        Unit::minion(id, "Enemy Minion".into(), pos, Team::Enemy, lane);
                    minion.set_minion_objective(enemy_objective);
                    if self.insert_unit(minion, pos, true).is_some() {
                        spawned += 1;
                    }
                }
            }
        }

        if spawned > 0 {
            self.events.push(GameEvent::MinionWave { spawned });
        }
    }

    /// Death handling. Champions start respawning in place and award
    /// experience to nearby enemy champions; every other unit leaves the
    /// map, the arena, and the scheduler. A dead nexus stays in the arena as
    /// the terminal win-condition witness.
    fn handle_unit_death(&mut self, dead: UnitId) {
        let Some(unit) = self.units.get(&dead) else {
            return;
        };
        let name = unit.name.clone();
        let team = unit.team;
        let position = unit.position;
        let kind = unit.kind();

        self.events.push(GameEvent::UnitDied { unit: name });

        match kind {
            UnitKind::Champion => {
                // Respawn countdown was started by take_damage; pay out the
                // kill experience to living enemy champions close by.
                let nearby = self
                    .map
                    .units_in_range(position, GameConfig::EXPERIENCE_RADIUS);
                for id in nearby {
                    if id == dead {
                        continue;
                    }
                    let Some(witness) = self.units.get_mut(&id) else {
                        continue;
                    };
                    if witness.kind() != UnitKind::Champion
                        || witness.team == team
                        || witness.is_dead()
                    {
                        continue;
                    }
                    let gained = witness.add_experience(GameConfig::KILL_EXPERIENCE);
                    let champion = witness.name.clone();
                    let level = witness.champion().map(|champ| champ.level).unwrap_or(1);
                    self.events.push(GameEvent::ExperienceGained {
                        champion: champion.clone(),
                        amount: GameConfig::KILL_EXPERIENCE,
                    });
                    if gained > 0 {
                        self.events.push(GameEvent::LeveledUp { champion, level });
                    }
                }
            }
            UnitKind::Nexus => {
                // Kept for the win-condition check at end of turn.
            }
            UnitKind::Minion | UnitKind::Tower => {
                if let Some(unit) = self.units.remove(&dead) {
                    self.map.remove(&unit);
                }
                self.scheduler.unregister(dead);
            }
        }
    }

    /// Either nexus dying ends the game exactly once.
    fn check_win_conditions(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }

        let dead_nexus_team = self
            .units
            .values()
            .find(|unit| unit.kind() == UnitKind::Nexus && unit.is_dead())
            .map(|unit| unit.team);

        let Some(loser) = dead_nexus_team else {
            return;
        };
        let (winner, reason) = match loser {
            Team::Player => (Team::Enemy, "Your nexus has been destroyed!"),
            Team::Enemy => (Team::Player, "You destroyed the enemy nexus! Victory!"),
            Team::Neutral => return,
        };

        self.winning_team = Some(winner);
        self.game_over_reason = reason.to_string();
        self.events.push(GameEvent::GameOver {
            winner,
            reason: reason.to_string(),
        });
        self.set_phase(GamePhase::GameOver);
    }

    // ========================================================================
    // Phase control
    // ========================================================================

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged { phase });
        }
    }

    /// `Playing ⇄ Paused`. No-op in other phases. Returns the new phase.
    pub fn toggle_pause(&mut self) -> GamePhase {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            _ => {}
        }
        self.phase
    }

    // ========================================================================
    // Read-only query surface (for hosts and renderers)
    // ========================================================================

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn winning_team(&self) -> Option<Team> {
        self.winning_team
    }

    pub fn game_over_reason(&self) -> &str {
        &self.game_over_reason
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn clock(&self) -> Tick {
        self.scheduler.clock()
    }

    pub fn player_id(&self) -> Option<UnitId> {
        self.player
    }

    pub fn player(&self) -> Option<&Unit> {
        self.player.and_then(|id| self.units.get(&id))
    }

    /// True when the engine is waiting on a player action.
    pub fn awaiting_player(&self) -> bool {
        self.phase == GamePhase::Playing
            && self
                .player
                .is_some_and(|id| self.scheduler.is_eligible(id))
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit_at(&self, pos: Position) -> Option<&Unit> {
        self.map.unit_at(pos).and_then(|id| self.units.get(&id))
    }

    pub fn units_in_range(&self, center: Position, range: u32) -> Vec<&Unit> {
        self.map
            .units_in_range(center, range)
            .into_iter()
            .filter_map(|id| self.units.get(&id))
            .collect()
    }

    pub fn time_until_ready(&self, id: UnitId) -> u64 {
        self.scheduler.time_until_ready(id)
    }

    /// Occupant glyph layered over terrain, for renderers.
    pub fn display_glyph(&self, pos: Position) -> char {
        match self.unit_at(pos) {
            Some(unit) => match unit.kind() {
                UnitKind::Champion => '@',
                UnitKind::Minion => {
                    if unit.team == Team::Player {
                        'm'
                    } else {
                        'M'
                    }
                }
                UnitKind::Tower => 'T',
                UnitKind::Nexus => 'N',
            },
            None => self.map.terrain_glyph(pos),
        }
    }

    /// Drains the append-only event log accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
