use std::fmt;

/// Unique identifier for any unit tracked in the arena.
///
/// Ids are allocated monotonically by the engine and never reused within a
/// match, so a dangling id never aliases a later unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, the only metric the simulation uses for range,
    /// movement cost, and adjacency.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Greedy diagonal step: one signum step on each axis toward `target`.
    /// Used by chasing champions, whose movement range covers the diagonal.
    pub fn step_toward(self, target: Self) -> Self {
        Self {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }

    /// Single-cell step along the dominant axis toward `target`.
    ///
    /// Minions move one cell per turn; a diagonal signum step would cost
    /// Manhattan distance 2 and always fail their legality check, so they
    /// advance along the axis with the larger remaining delta (x on ties).
    pub fn step_toward_axis(self, target: Self) -> Self {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        if dx == 0 && dy == 0 {
            return self;
        }
        if dx.abs() >= dy.abs() {
            Self::new(self.x + dx.signum(), self.y)
        } else {
            Self::new(self.x, self.y + dy.signum())
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Discrete time unit of the initiative timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
