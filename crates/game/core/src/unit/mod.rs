//! Unit data model.
//!
//! Units form a closed capability set (`Champion`, `Minion`, `Tower`,
//! `Nexus`) sharing health/attack/movement attributes. Kind-specific data
//! lives in the [`UnitData`] payload rather than an open inheritance chain,
//! so every behavioral difference is an explicit match arm.

pub mod champion;
pub mod skill;

pub use champion::ChampionState;
pub use skill::{Skill, SkillEffect, SkillKind};

use crate::config::GameConfig;
use crate::geom::{Position, UnitId};
use crate::map::GameMap;

/// Side a unit fights for. `Neutral` exists for the un-started match state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Player,
    Enemy,
    Neutral,
}

impl Team {
    /// The team whose nexus this team is trying to destroy.
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
            Team::Neutral => Team::Neutral,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Champion,
    Minion,
    Tower,
    Nexus,
}

/// Kind-specific payload attached to a [`Unit`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnitData {
    Champion(ChampionState),
    /// Lane minions carry their lane index and march toward a fixed target
    /// (the opposing nexus).
    Minion { lane: usize, target: Position },
    Tower { lane: usize },
    Nexus,
}

/// One combat unit in the arena.
///
/// Invariants: `current_health <= max_health`; `is_alive ⇔ current_health > 0`.
/// The `position` field is kept in sync with map occupancy by
/// [`GameMap::place`], the only operation allowed to mutate either side.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub team: Team,
    pub position: Position,

    pub max_health: u32,
    pub current_health: u32,
    pub attack_damage: u32,
    pub attack_range: u32,
    pub speed: u32,
    pub movement_range: u32,

    pub data: UnitData,
}

impl Unit {
    pub fn minion(id: UnitId, name: String, position: Position, team: Team, lane: usize) -> Self {
        Self {
            id,
            name,
            team,
            position,
            max_health: 100,
            current_health: 100,
            attack_damage: 20,
            attack_range: 1,
            speed: 100,
            movement_range: 1,
            data: UnitData::Minion {
                lane,
                target: position,
            },
        }
    }

    pub fn tower(id: UnitId, name: String, position: Position, team: Team, lane: usize) -> Self {
        Self {
            id,
            name,
            team,
            position,
            max_health: 500,
            current_health: 500,
            attack_damage: 80,
            attack_range: 3,
            speed: 0,
            movement_range: 0,
            data: UnitData::Tower { lane },
        }
    }

    pub fn nexus(id: UnitId, name: String, position: Position, team: Team) -> Self {
        Self {
            id,
            name,
            team,
            position,
            max_health: 1000,
            current_health: 1000,
            attack_damage: 0,
            attack_range: 0,
            speed: 0,
            movement_range: 0,
            data: UnitData::Nexus,
        }
    }

    pub fn kind(&self) -> UnitKind {
        match self.data {
            UnitData::Champion(_) => UnitKind::Champion,
            UnitData::Minion { .. } => UnitKind::Minion,
            UnitData::Tower { .. } => UnitKind::Tower,
            UnitData::Nexus => UnitKind::Nexus,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current_health == 0
    }

    pub fn health_percent(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.current_health as f32 / self.max_health as f32
        }
    }

    /// Movement legality: destination within movement range (Manhattan) and
    /// the cell itself is free. Towers and nexuses refuse outright, beyond
    /// what their zero movement range already encodes.
    pub fn can_move_to(&self, destination: Position, map: &GameMap) -> bool {
        if matches!(self.data, UnitData::Tower { .. } | UnitData::Nexus) {
            return false;
        }
        self.position.manhattan_distance(destination) <= self.movement_range
            && map.is_empty(destination)
    }

    /// Attack legality: living target on an opposing team within attack
    /// range. A nexus never attacks regardless of stats.
    pub fn can_attack(&self, target: &Unit) -> bool {
        if matches!(self.data, UnitData::Nexus) {
            return false;
        }
        target.is_alive()
            && target.team != self.team
            && self.position.manhattan_distance(target.position) <= self.attack_range
    }

    /// Applies damage, clamping at zero. A champion dropping to zero health
    /// starts its respawn countdown if one is not already running.
    pub fn take_damage(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_sub(amount);
        if self.current_health == 0 {
            if let UnitData::Champion(champ) = &mut self.data {
                if !champ.respawning {
                    champ.start_respawn();
                }
            }
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_health = (self.current_health + amount).min(self.max_health);
    }

    /// Per-turn regeneration toward caps. Only living champions regenerate.
    pub fn regenerate(&mut self) {
        if self.is_dead() {
            return;
        }
        let (health_regen, mana_regen) = match &self.data {
            UnitData::Champion(champ) => (champ.health_regen, champ.mana_regen),
            _ => return,
        };
        self.heal(health_regen);
        if let UnitData::Champion(champ) = &mut self.data {
            champ.current_mana = (champ.current_mana + mana_regen).min(champ.max_mana);
        }
    }

    /// Grants experience, looping over as many level-ups as the total crosses
    /// (capped at [`GameConfig::MAX_LEVEL`]). Each level fully restores
    /// health and mana and applies the fixed stat increments. Returns the
    /// number of levels gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        let gained = {
            let UnitData::Champion(champ) = &mut self.data else {
                return 0;
            };
            champ.experience += amount;
            let mut gained = 0;
            while champ.level < GameConfig::MAX_LEVEL
                && champ.experience >= champ.experience_to_next_level()
            {
                champ.experience -= champ.experience_to_next_level();
                champ.level += 1;
                champ.max_mana += GameConfig::LEVEL_MANA_BONUS;
                champ.current_mana = champ.max_mana;
                gained += 1;
            }
            gained
        };

        if gained > 0 {
            self.max_health += GameConfig::LEVEL_HEALTH_BONUS * gained;
            self.current_health = self.max_health;
            self.attack_damage += GameConfig::LEVEL_ATTACK_BONUS * gained;
        }
        gained
    }

    /// Re-aims a minion at its lane objective. No-op for other kinds.
    pub fn set_minion_objective(&mut self, objective: Position) {
        if let UnitData::Minion { target, .. } = &mut self.data {
            *target = objective;
        }
    }

    pub fn champion(&self) -> Option<&ChampionState> {
        match &self.data {
            UnitData::Champion(champ) => Some(champ),
            _ => None,
        }
    }

    pub fn champion_mut(&mut self) -> Option<&mut ChampionState> {
        match &mut self.data {
            UnitData::Champion(champ) => Some(champ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use crate::roster::ChampionTemplate;

    fn champion(id: u32, team: Team) -> Unit {
        ChampionTemplate::tank("Ironwall".into()).spawn(UnitId(id), Position::new(5, 5), team)
    }

    #[test]
    fn health_is_clamped_to_bounds() {
        let mut minion = Unit::minion(
            UnitId(1),
            "Minion".into(),
            Position::ORIGIN,
            Team::Enemy,
            0,
        );
        minion.take_damage(40);
        assert_eq!(minion.current_health, 60);
        minion.take_damage(1000);
        assert_eq!(minion.current_health, 0);
        assert!(minion.is_dead());

        minion.heal(5000);
        assert_eq!(minion.current_health, minion.max_health);
    }

    #[test]
    fn can_attack_requires_living_hostile_in_range() {
        let attacker = champion(1, Team::Player);
        let mut target = Unit::minion(
            UnitId(2),
            "Minion".into(),
            Position::new(5, 6),
            Team::Enemy,
            0,
        );
        assert!(attacker.can_attack(&target));

        // Same team.
        target.team = Team::Player;
        assert!(!attacker.can_attack(&target));
        target.team = Team::Enemy;

        // Out of range (tank range is 1).
        target.position = Position::new(8, 5);
        assert!(!attacker.can_attack(&target));
        target.position = Position::new(5, 6);

        // Dead targets are never valid.
        target.current_health = 0;
        assert!(!attacker.can_attack(&target));
    }

    #[test]
    fn structures_are_immobile_and_nexus_never_attacks() {
        let config = crate::GameConfig::default();
        let map = GameMap::generate(&config, &mut GameRng::new(1));
        let tower = Unit::tower(UnitId(1), "Tower".into(), map.player_towers()[0], Team::Player, 0);
        let nexus = Unit::nexus(UnitId(2), "Nexus".into(), map.player_nexus(), Team::Player);

        let open = map.player_spawns()[0];
        assert!(!tower.can_move_to(open, &map));
        assert!(!nexus.can_move_to(open, &map));

        let adjacent = Unit::minion(
            UnitId(3),
            "Minion".into(),
            Position::new(map.player_nexus().x, map.player_nexus().y + 1),
            Team::Enemy,
            0,
        );
        assert!(!nexus.can_attack(&adjacent));
        assert!(tower.can_attack(&adjacent) || tower.position.manhattan_distance(adjacent.position) > 3);
    }

    #[test]
    fn single_threshold_levels_once_with_full_restore() {
        let mut champ = champion(1, Team::Player);
        champ.take_damage(150);
        let base_max = champ.max_health;
        let base_ad = champ.attack_damage;

        // Level 1 → 2 needs 100 XP.
        assert_eq!(champ.add_experience(100), 1);
        let state = champ.champion().unwrap();
        assert_eq!(state.level, 2);
        assert_eq!(champ.max_health, base_max + 20);
        assert_eq!(champ.current_health, champ.max_health);
        assert_eq!(state.current_mana, state.max_mana);
        assert_eq!(champ.attack_damage, base_ad + 5);
    }

    #[test]
    fn double_threshold_levels_twice_in_one_call() {
        let mut champ = champion(1, Team::Player);
        // 100 (to level 2) + 200 (to level 3) = 300.
        assert_eq!(champ.add_experience(300), 2);
        let state = champ.champion().unwrap();
        assert_eq!(state.level, 3);
        assert_eq!(state.experience, 0);
    }

    #[test]
    fn leveling_caps_at_max_level() {
        let mut champ = champion(1, Team::Player);
        champ.add_experience(1_000_000);
        assert_eq!(champ.champion().unwrap().level, GameConfig::MAX_LEVEL);
    }

    #[test]
    fn lethal_damage_starts_respawn_countdown() {
        let mut champ = champion(1, Team::Player);
        champ.add_experience(100); // level 2
        champ.take_damage(10_000);

        let state = champ.champion().unwrap();
        assert!(state.respawning);
        assert_eq!(state.respawn_timer, 10 + 2 * 2);
    }

    #[test]
    fn dead_units_do_not_regenerate() {
        let mut champ = champion(1, Team::Player);
        champ.take_damage(10_000);
        champ.regenerate();
        assert_eq!(champ.current_health, 0);
    }
}
