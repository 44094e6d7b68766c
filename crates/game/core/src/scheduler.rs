//! Initiative scheduler.
//!
//! Every registered unit carries a "next eligible tick"; consuming an action
//! pushes it forward by `max(1, 100 / max(1, speed))`, so faster units act
//! more often while integer ticks keep the order deterministic and
//! replayable. Entries live in an insertion-ordered list: equal-speed units
//! stay in registration order under the stable eligibility sort.

use crate::config::GameConfig;
use crate::geom::{Tick, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct ScheduledUnit {
    unit: UnitId,
    ready_at: Tick,
    /// Cadence stat captured on registration, refreshed on each consume.
    speed: u32,
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduler {
    clock: Tick,
    entries: Vec<ScheduledUnit>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Registers a unit, eligible immediately. Idempotent: re-registering an
    /// already-tracked unit changes nothing.
    pub fn register(&mut self, unit: UnitId, speed: u32) {
        if self.entry(unit).is_none() {
            self.entries.push(ScheduledUnit {
                unit,
                ready_at: self.clock,
                speed,
            });
        }
    }

    /// Removes a unit from scheduling. Safe no-op if absent.
    pub fn unregister(&mut self, unit: UnitId) {
        self.entries.retain(|entry| entry.unit != unit);
    }

    pub fn is_registered(&self, unit: UnitId) -> bool {
        self.entry(unit).is_some()
    }

    /// True iff the unit is registered and its turn has come up.
    pub fn is_eligible(&self, unit: UnitId) -> bool {
        self.entry(unit)
            .is_some_and(|entry| entry.ready_at <= self.clock)
    }

    /// Marks the unit's action spent, recomputing its next eligible tick from
    /// its speed. Speed is clamped to 1 (slowest cadence, delay 100) and the
    /// delay to at least 1, so the next tick always strictly increases.
    pub fn consume(&mut self, unit: UnitId, speed: u32) {
        let clock = self.clock;
        if let Some(entry) = self.entry_mut(unit) {
            let effective_speed = u64::from(speed.max(1));
            let delay = (GameConfig::BASE_ACTION_DELAY / effective_speed).max(1);
            entry.ready_at = clock + delay;
            entry.speed = speed;
        }
    }

    /// Advances the global clock by one tick.
    pub fn advance(&mut self) {
        self.clock = self.clock + 1;
    }

    /// Units whose turn has come up, filtered by the caller's liveness
    /// predicate and ordered fastest first. The sort is stable, so
    /// equal-speed units keep registration order.
    pub fn eligible_units(&self, is_alive: impl Fn(UnitId) -> bool) -> Vec<UnitId> {
        let mut ready: Vec<&ScheduledUnit> = self
            .entries
            .iter()
            .filter(|entry| entry.ready_at <= self.clock && is_alive(entry.unit))
            .collect();
        ready.sort_by_key(|entry| std::cmp::Reverse(entry.speed));
        ready.into_iter().map(|entry| entry.unit).collect()
    }

    /// Ticks remaining until the unit's next turn; zero if eligible now or
    /// unknown.
    pub fn time_until_ready(&self, unit: UnitId) -> u64 {
        self.entry(unit)
            .map(|entry| entry.ready_at.0.saturating_sub(self.clock.0))
            .unwrap_or(0)
    }

    /// Clears all registrations and rewinds the clock.
    pub fn reset(&mut self) {
        self.clock = Tick::ZERO;
        self.entries.clear();
    }

    fn entry(&self, unit: UnitId) -> Option<&ScheduledUnit> {
        self.entries.iter().find(|entry| entry.unit == unit)
    }

    fn entry_mut(&mut self, unit: UnitId) -> Option<&mut ScheduledUnit> {
        self.entries.iter_mut().find(|entry| entry.unit == unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut scheduler = Scheduler::new();
        scheduler.register(UnitId(1), 100);
        scheduler.consume(UnitId(1), 100);
        let before = scheduler.time_until_ready(UnitId(1));

        scheduler.register(UnitId(1), 100);
        assert_eq!(scheduler.time_until_ready(UnitId(1)), before);
    }

    #[test]
    fn consume_strictly_increases_ready_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.register(UnitId(1), 100);
        assert!(scheduler.is_eligible(UnitId(1)));

        scheduler.consume(UnitId(1), 100);
        assert!(!scheduler.is_eligible(UnitId(1)));
        assert_eq!(scheduler.time_until_ready(UnitId(1)), 1);

        // Even absurd speeds keep a minimum one-tick delay.
        scheduler.advance();
        scheduler.consume(UnitId(1), 10_000);
        assert!(!scheduler.is_eligible(UnitId(1)));
    }

    #[test]
    fn zero_speed_clamps_to_slowest_cadence() {
        let mut scheduler = Scheduler::new();
        scheduler.register(UnitId(1), 0);
        scheduler.consume(UnitId(1), 0);
        assert_eq!(scheduler.time_until_ready(UnitId(1)), 100);
    }

    #[test]
    fn double_speed_acts_twice_as_often() {
        // Speed 100 gets delay 1, speed 50 gets delay 2. (Above speed 100 the
        // one-tick delay floor saturates, so the 2:1 ratio is measured here.)
        let mut scheduler = Scheduler::new();
        scheduler.register(UnitId(1), 100);
        scheduler.register(UnitId(2), 50);

        let mut fast_turns = 0u32;
        let mut slow_turns = 0u32;
        for _ in 0..1_000 {
            scheduler.advance();
            for unit in scheduler.eligible_units(|_| true) {
                match unit {
                    UnitId(1) => {
                        fast_turns += 1;
                        scheduler.consume(unit, 100);
                    }
                    UnitId(2) => {
                        slow_turns += 1;
                        scheduler.consume(unit, 50);
                    }
                    _ => unreachable!(),
                }
            }
        }
        assert_eq!(fast_turns, slow_turns * 2);
    }

    #[test]
    fn eligibility_orders_by_descending_speed_with_stable_ties() {
        let mut scheduler = Scheduler::new();
        scheduler.register(UnitId(10), 90);
        scheduler.register(UnitId(11), 120);
        scheduler.register(UnitId(12), 90);

        assert_eq!(
            scheduler.eligible_units(|_| true),
            vec![UnitId(11), UnitId(10), UnitId(12)]
        );
    }

    #[test]
    fn dead_and_unready_units_are_excluded() {
        let mut scheduler = Scheduler::new();
        scheduler.register(UnitId(1), 100);
        scheduler.register(UnitId(2), 100);
        scheduler.consume(UnitId(2), 100);

        assert_eq!(
            scheduler.eligible_units(|unit| unit != UnitId(1)),
            Vec::<UnitId>::new()
        );
        assert_eq!(scheduler.eligible_units(|_| true), vec![UnitId(1)]);
    }

    #[test]
    fn unregister_is_safe_when_absent() {
        let mut scheduler = Scheduler::new();
        scheduler.register(UnitId(1), 100);
        scheduler.unregister(UnitId(1));
        scheduler.unregister(UnitId(1));
        assert!(!scheduler.is_eligible(UnitId(1)));
    }
}
