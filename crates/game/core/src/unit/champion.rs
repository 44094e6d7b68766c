//! Champion-specific state: mana, skills, leveling, and the respawn
//! lifecycle. Shared combat stats stay on [`crate::unit::Unit`]; this is the
//! payload only champions carry.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::geom::Position;
use crate::roster::Archetype;
use crate::unit::skill::Skill;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChampionState {
    /// 1..=[`GameConfig::MAX_LEVEL`]; leveling is monotonic.
    pub level: u32,
    /// Experience toward the next level (already-spent XP is subtracted).
    pub experience: u32,

    pub max_mana: u32,
    pub current_mana: u32,
    pub mana_regen: u32,
    pub health_regen: u32,

    pub skills: ArrayVec<Skill, { GameConfig::MAX_SKILLS }>,

    pub respawning: bool,
    /// Turns until respawn; meaningful only while `respawning`.
    pub respawn_timer: u32,
    /// Where the champion returns to life.
    pub respawn_anchor: Position,

    pub archetype: Archetype,
}

impl ChampionState {
    pub fn new(
        max_mana: u32,
        mana_regen: u32,
        health_regen: u32,
        skills: ArrayVec<Skill, { GameConfig::MAX_SKILLS }>,
        respawn_anchor: Position,
        archetype: Archetype,
    ) -> Self {
        Self {
            level: 1,
            experience: 0,
            max_mana,
            current_mana: max_mana,
            mana_regen,
            health_regen,
            skills,
            respawning: false,
            respawn_timer: 0,
            respawn_anchor,
            archetype,
        }
    }

    /// XP curve: `level * 100` to reach the next level.
    pub fn experience_to_next_level(&self) -> u32 {
        self.level * 100
    }

    /// Longer respawns at higher levels.
    pub fn start_respawn(&mut self) {
        self.respawning = true;
        self.respawn_timer = GameConfig::RESPAWN_BASE + GameConfig::RESPAWN_PER_LEVEL * self.level;
    }

    /// One end-of-turn respawn countdown step. Returns true when the timer
    /// reaches zero and the champion should re-enter the map; the caller
    /// restores health via the unit and teleports it to the anchor.
    pub fn tick_respawn(&mut self) -> bool {
        if !self.respawning {
            return false;
        }
        self.respawn_timer = self.respawn_timer.saturating_sub(1);
        if self.respawn_timer == 0 {
            self.respawning = false;
            self.current_mana = self.max_mana;
            true
        } else {
            false
        }
    }

    /// End-of-turn cooldown decay for every carried skill.
    pub fn reduce_cooldowns(&mut self) {
        for skill in &mut self.skills {
            skill.reduce_cooldown();
        }
    }

    pub fn skill(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ChampionState {
        ChampionState::new(
            100,
            2,
            3,
            ArrayVec::new(),
            Position::new(4, 4),
            Archetype::Tank,
        )
    }

    #[test]
    fn respawn_timer_scales_with_level() {
        let mut champ = state();
        champ.level = 5;
        champ.start_respawn();
        assert!(champ.respawning);
        assert_eq!(champ.respawn_timer, 20);
    }

    #[test]
    fn respawn_completes_after_exact_countdown() {
        let mut champ = state();
        champ.current_mana = 10;
        champ.start_respawn();

        let turns = champ.respawn_timer;
        for turn in 1..=turns {
            let done = champ.tick_respawn();
            assert_eq!(done, turn == turns);
        }
        assert!(!champ.respawning);
        assert_eq!(champ.current_mana, champ.max_mana);

        // Further ticks are no-ops once alive again.
        assert!(!champ.tick_respawn());
    }
}
