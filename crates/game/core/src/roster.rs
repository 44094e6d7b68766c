//! Champion archetypes and match roster assembly.
//!
//! Templates define everything about a champion except id, team, and spawn
//! position; [`ChampionTemplate::spawn`] materializes them into arena units.
//! Random team composition draws archetypes and names from the seeded match
//! generator so identical seeds build identical rosters.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::geom::{Position, UnitId};
use crate::rng::GameRng;
use crate::unit::{ChampionState, Skill, SkillEffect, SkillKind, Team, Unit, UnitData};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    Tank,
    Mage,
    Assassin,
}

impl Archetype {
    const NAME_POOLS: [(Archetype, &'static [&'static str]); 3] = [
        (
            Archetype::Tank,
            &["Ironwall", "Bulwark", "Fortress", "Guardian", "Bastion", "Aegis"],
        ),
        (
            Archetype::Mage,
            &["Arcane", "Mystic", "Ember", "Frost", "Storm", "Void"],
        ),
        (
            Archetype::Assassin,
            &["Shadow", "Viper", "Blade", "Wraith", "Phantom", "Silent"],
        ),
    ];

    fn name_pool(self) -> &'static [&'static str] {
        Self::NAME_POOLS
            .iter()
            .find(|(archetype, _)| *archetype == self)
            .map(|(_, names)| *names)
            .unwrap_or(&[])
    }
}

/// Blueprint for a champion: stats plus its three skills.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChampionTemplate {
    pub name: String,
    pub archetype: Archetype,
    pub max_health: u32,
    pub max_mana: u32,
    pub attack_damage: u32,
    pub attack_range: u32,
    pub speed: u32,
    pub movement_range: u32,
    pub mana_regen: u32,
    pub health_regen: u32,
    pub skills: ArrayVec<Skill, { GameConfig::MAX_SKILLS }>,
}

impl ChampionTemplate {
    pub fn of(archetype: Archetype, name: String) -> Self {
        match archetype {
            Archetype::Tank => Self::tank(name),
            Archetype::Mage => Self::mage(name),
            Archetype::Assassin => Self::assassin(name),
        }
    }

    /// Durable frontliner: slow, short-ranged, self-sustaining.
    pub fn tank(name: String) -> Self {
        Self {
            name,
            archetype: Archetype::Tank,
            max_health: 200,
            max_mana: 100,
            attack_damage: 30,
            attack_range: 1,
            speed: 80,
            movement_range: 2,
            mana_regen: 2,
            health_regen: 3,
            skills: [skills::taunt(), skills::shield_bash(), skills::defensive_stance()]
                .into_iter()
                .collect(),
        }
    }

    /// Ranged caster with the deepest mana pool.
    pub fn mage(name: String) -> Self {
        Self {
            name,
            archetype: Archetype::Mage,
            max_health: 120,
            max_mana: 150,
            attack_damage: 25,
            attack_range: 3,
            speed: 90,
            movement_range: 2,
            mana_regen: 5,
            health_regen: 1,
            skills: [skills::fireball(), skills::frost_bolt(), skills::teleport()]
                .into_iter()
                .collect(),
        }
    }

    /// Fastest cadence, highest burst, least health.
    pub fn assassin(name: String) -> Self {
        Self {
            name,
            archetype: Archetype::Assassin,
            max_health: 100,
            max_mana: 120,
            attack_damage: 45,
            attack_range: 1,
            speed: 120,
            movement_range: 2,
            mana_regen: 3,
            health_regen: 2,
            skills: [skills::backstab(), skills::shadow_step(), skills::poison_blade()]
                .into_iter()
                .collect(),
        }
    }

    /// Materializes the template into an arena unit. The spawn position
    /// doubles as the respawn anchor until the engine re-anchors it.
    pub fn spawn(&self, id: UnitId, position: Position, team: Team) -> Unit {
        Unit {
            id,
            name: self.name.clone(),
            team,
            position,
            max_health: self.max_health,
            current_health: self.max_health,
            attack_damage: self.attack_damage,
            attack_range: self.attack_range,
            speed: self.speed,
            movement_range: self.movement_range,
            data: UnitData::Champion(ChampionState::new(
                self.max_mana,
                self.mana_regen,
                self.health_regen,
                self.skills.clone(),
                position,
                self.archetype,
            )),
        }
    }
}

/// Draws `count` champions with random archetypes and archetype-appropriate
/// names from the seeded generator.
pub fn random_team(rng: &mut GameRng, count: usize) -> Vec<ChampionTemplate> {
    const ARCHETYPES: [Archetype; 3] = [Archetype::Tank, Archetype::Mage, Archetype::Assassin];

    (0..count)
        .map(|_| {
            let archetype = ARCHETYPES[rng.index(ARCHETYPES.len())];
            let pool = archetype.name_pool();
            let name = pool[rng.index(pool.len())];
            ChampionTemplate::of(archetype, name.to_string())
        })
        .collect()
}

/// Skill definitions, one constructor per skill.
pub mod skills {
    use super::*;

    // Tank
    pub fn taunt() -> Skill {
        Skill::new(
            "Taunt",
            "Forces nearby enemies to attack you",
            SkillKind::Active,
            5,
            20,
            2,
            0,
            'T',
            SkillEffect::SelfMend { heal: 10 },
        )
    }

    pub fn shield_bash() -> Skill {
        Skill::new(
            "Shield Bash",
            "Stuns and damages target",
            SkillKind::Active,
            4,
            25,
            1,
            40,
            'S',
            SkillEffect::Strike,
        )
    }

    pub fn defensive_stance() -> Skill {
        Skill::new(
            "Defensive Stance",
            "Reduces damage taken",
            SkillKind::Active,
            8,
            30,
            0,
            0,
            'D',
            SkillEffect::SelfMend { heal: 20 },
        )
    }

    // Mage
    pub fn fireball() -> Skill {
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

    pub fn frost_bolt() -> Skill {
        Skill::new(
            "Frost Bolt",
            "Slows and damages target",
            SkillKind::Active,
            4,
            25,
            3,
            45,
            'I',
            SkillEffect::Strike,
        )
    }

    pub fn teleport() -> Skill {
        Skill::new(
            "Teleport",
            "Instantly move to target location",
            SkillKind::Active,
            6,
            40,
            5,
            0,
            'P',
            SkillEffect::Blink,
        )
    }

    // Assassin
    pub fn backstab() -> Skill {
        Skill::new(
            "Backstab",
            "High damage attack from behind",
            SkillKind::Active,
            3,
            20,
            1,
            80,
            'B',
            SkillEffect::Strike,
        )
    }

    pub fn shadow_step() -> Skill {
        Skill::new(
            "Shadow Step",
            "Move behind target and attack",
            SkillKind::Active,
            5,
            35,
            3,
            50,
            'H',
            SkillEffect::FlankStep,
        )
    }

    pub fn poison_blade() -> Skill {
        Skill::new(
            "Poison Blade",
            "Poisons target over time",
            SkillKind::Active,
            4,
            25,
            1,
            30,
            'V',
            SkillEffect::Envenom { bonus: 15 },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetypes_carry_three_skills() {
        for template in [
            ChampionTemplate::tank("A".into()),
            ChampionTemplate::mage("B".into()),
            ChampionTemplate::assassin("C".into()),
        ] {
            assert_eq!(template.skills.len(), GameConfig::MAX_SKILLS);
        }
    }

    #[test]
    fn spawn_initializes_full_resources_and_anchor() {
        let template = ChampionTemplate::mage("Ember".into());
        let unit = template.spawn(UnitId(3), Position::new(10, 10), Team::Enemy);

        assert_eq!(unit.current_health, 120);
        let state = unit.champion().unwrap();
        assert_eq!(state.current_mana, 150);
        assert_eq!(state.respawn_anchor, Position::new(10, 10));
        assert_eq!(state.level, 1);
    }

    #[test]
    fn random_team_is_seed_deterministic() {
        let team_a = random_team(&mut GameRng::new(77), 5);
        let team_b = random_team(&mut GameRng::new(77), 5);

        assert_eq!(team_a.len(), 5);
        for (a, b) in team_a.iter().zip(&team_b) {
            assert_eq!(a.archetype, b.archetype);
            assert_eq!(a.name, b.name);
        }
    }

    #[test]
    fn names_match_their_archetype_pool() {
        for template in random_team(&mut GameRng::new(5), 12) {
            assert!(template
                .archetype
                .name_pool()
                .contains(&template.name.as_str()));
        }
    }
}
