//! Grid map with exclusive cell occupancy.
//!
//! The map owns every cell and is the sole authority that mutates occupancy:
//! [`GameMap::place`] and [`GameMap::remove`] are the only operations that
//! touch a cell's occupant, and `place` updates the unit's own position in the
//! same call so the two can never disagree.

use crate::config::GameConfig;
use crate::geom::Position;
use crate::geom::UnitId;
use crate::rng::GameRng;
use crate::unit::Unit;

/// Canonical terrain classes for map cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Empty,
    Wall,
    Lane,
    Jungle,
    Base,
    Water,
}

impl CellKind {
    /// Walls and water block movement; everything else is terrain-passable.
    pub fn is_passable(self) -> bool {
        !matches!(self, CellKind::Wall | CellKind::Water)
    }

    pub fn glyph(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Wall => '#',
            CellKind::Lane => '=',
            CellKind::Jungle => '♠',
            CellKind::Base => '█',
            CellKind::Water => '~',
        }
    }
}

/// One cell of the grid: terrain plus at most one occupant.
///
/// The occupant is a non-owning handle into the engine's unit arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub kind: CellKind,
    pub occupant: Option<UnitId>,
}

impl Cell {
    fn new(kind: CellKind) -> Self {
        Self {
            kind,
            occupant: None,
        }
    }

    pub fn is_walkable(&self) -> bool {
        self.kind.is_passable() && self.occupant.is_none()
    }
}

/// Fixed-size grid generated once at match start.
///
/// Besides the cells themselves the map exposes the named coordinate sets the
/// engine needs for match setup: nexus positions, tower spots, and per-lane
/// minion spawn points. All of them lie on cells consistent with their role
/// (towers and spawns on walkable lane cells, nexuses inside base cells).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMap {
    width: u32,
    height: u32,
    cells: Vec<Cell>,

    player_nexus: Position,
    enemy_nexus: Position,
    player_towers: Vec<Position>,
    enemy_towers: Vec<Position>,
    player_spawns: Vec<Position>,
    enemy_spawns: Vec<Position>,
}

impl GameMap {
    /// Interior margin kept clear of jungle.
    const CLEAR_BORDER: i32 = 3;
    /// Distance of the perimeter lanes from the map edge.
    const LANE_MARGIN: i32 = 5;
    /// Width of carved lanes in cells.
    const LANE_WIDTH: i32 = 2;
    /// Jungle density in percent.
    const JUNGLE_COVERAGE: u32 = 70;

    /// Generates the lane/base/river layout from the match seed.
    pub fn generate(config: &GameConfig, rng: &mut GameRng) -> Self {
        let width = config.map_width as i32;
        let height = config.map_height as i32;

        let mut map = Self {
            width: config.map_width,
            height: config.map_height,
            cells: vec![Cell::new(CellKind::Empty); (width * height) as usize],
            player_nexus: Position::new(8, height - 8),
            enemy_nexus: Position::new(width - 8, 7),
            player_towers: Vec::new(),
            enemy_towers: Vec::new(),
            player_spawns: Vec::new(),
            enemy_spawns: Vec::new(),
        };

        map.fill_jungle(rng);
        map.carve_river();
        map.carve_perimeter_lanes();
        map.carve_diagonal_lane();
        map.carve_base(map.player_nexus);
        map.carve_base(map.enemy_nexus);
        map.place_tower_spots();
        map.place_spawn_points();
        map.carve_clearings();

        map
    }

    fn fill_jungle(&mut self, rng: &mut GameRng) {
        let (w, h) = (self.width as i32, self.height as i32);
        for x in Self::CLEAR_BORDER..w - Self::CLEAR_BORDER {
            for y in Self::CLEAR_BORDER..h - Self::CLEAR_BORDER {
                if rng.chance(Self::JUNGLE_COVERAGE) {
                    self.set_kind(Position::new(x, y), CellKind::Jungle);
                }
            }
        }
    }

    /// Two-column river through the middle. Lanes are carved afterwards and
    /// overwrite the water, which leaves walkable fords where they cross.
    fn carve_river(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        let river_x = w / 2;
        for y in Self::CLEAR_BORDER..h - Self::CLEAR_BORDER {
            self.set_kind(Position::new(river_x - 1, y), CellKind::Water);
            self.set_kind(Position::new(river_x, y), CellKind::Water);
        }
    }

    fn carve_perimeter_lanes(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        let margin = Self::LANE_MARGIN;
        for x in margin..w - margin {
            for i in 0..Self::LANE_WIDTH {
                self.set_kind(Position::new(x, margin + i), CellKind::Lane);
                self.set_kind(
                    Position::new(x, h - margin - Self::LANE_WIDTH + i),
                    CellKind::Lane,
                );
            }
        }
        for y in margin..h - margin {
            for i in 0..Self::LANE_WIDTH {
                self.set_kind(Position::new(margin + i, y), CellKind::Lane);
                self.set_kind(
                    Position::new(w - margin - Self::LANE_WIDTH + i, y),
                    CellKind::Lane,
                );
            }
        }
    }

    /// Bresenham walk from the player corner to the enemy corner, widened to
    /// a three-cell brush.
    fn carve_diagonal_lane(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        let (mut x, mut y) = (7, h - 7);
        let (end_x, end_y) = (w - 7, 7);

        let dx = (end_x - x).abs();
        let dy = (end_y - y).abs();
        let step_x = if x < end_x { 1 } else { -1 };
        let step_y = if y < end_y { 1 } else { -1 };
        let mut error = dx - dy;

        loop {
            for i in -1..=1 {
                for j in -1..=1 {
                    self.set_kind(Position::new(x + i, y + j), CellKind::Lane);
                }
            }
            if x == end_x && y == end_y {
                break;
            }
            let doubled = 2 * error;
            if doubled > -dy {
                error -= dy;
                x += step_x;
            }
            if doubled < dx {
                error += dx;
                y += step_y;
            }
        }
    }

    fn carve_base(&mut self, nexus: Position) {
        for x in nexus.x - 1..=nexus.x + 1 {
            for y in nexus.y - 1..=nexus.y + 1 {
                self.set_kind(Position::new(x, y), CellKind::Base);
            }
        }
    }

    fn place_tower_spots(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        let player = [
            Position::new(12, h - 7),
            Position::new(7, h - 12),
            Position::new(15, h - 15),
        ];
        let enemy = [
            Position::new(w - 12, 7),
            Position::new(w - 7, 12),
            Position::new(w - 15, 15),
        ];

        for pos in player {
            self.set_kind(pos, CellKind::Lane);
            self.player_towers.push(pos);
        }
        for pos in enemy {
            self.set_kind(pos, CellKind::Lane);
            self.enemy_towers.push(pos);
        }
    }

    fn place_spawn_points(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        let player = [
            Position::new(10, h - 7),
            Position::new(7, h - 10),
            Position::new(12, h - 12),
        ];
        let enemy = [
            Position::new(w - 10, 7),
            Position::new(w - 7, 10),
            Position::new(w - 12, 12),
        ];

        for pos in player {
            self.set_kind(pos, CellKind::Lane);
            self.player_spawns.push(pos);
        }
        for pos in enemy {
            self.set_kind(pos, CellKind::Lane);
            self.enemy_spawns.push(pos);
        }
    }

    /// Open ground for mid-map skirmishes.
    fn carve_clearings(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        let centers = [
            Position::new(w / 2, h / 2),
            Position::new(w / 3, h / 3),
            Position::new(2 * w / 3, 2 * h / 3),
        ];
        for center in centers {
            for x in center.x - 1..=center.x + 1 {
                for y in center.y - 1..=center.y + 1 {
                    let pos = Position::new(x, y);
                    if self.cell(pos).map(|c| c.kind) == Some(CellKind::Jungle) {
                        self.set_kind(pos, CellKind::Empty);
                    }
                }
            }
        }
    }

    fn set_kind(&mut self, pos: Position, kind: CellKind) {
        if let Some(index) = self.index(pos) {
            self.cells[index].kind = kind;
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y as u32 * self.width + pos.x as u32) as usize)
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// True iff `pos` is inside the map and its cell is walkable terrain with
    /// no occupant. Out-of-bounds positions are treated as not empty, never
    /// as an error.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_walkable)
    }

    pub fn unit_at(&self, pos: Position) -> Option<UnitId> {
        self.cell(pos).and_then(|cell| cell.occupant)
    }

    /// Binds the cell at `pos` to `unit`, clearing any cell it previously
    /// occupied, and updates the unit's own position in the same step.
    ///
    /// Returns false (and mutates nothing) if `pos` is out of bounds, the
    /// terrain is not passable, or the cell is held by another unit.
    pub fn place(&mut self, unit: &mut Unit, pos: Position) -> bool {
        let Some(index) = self.index(pos) else {
            return false;
        };
        if !self.cells[index].kind.is_passable() {
            return false;
        }
        if self.cells[index]
            .occupant
            .is_some_and(|occupant| occupant != unit.id)
        {
            return false;
        }

        self.remove(unit);
        self.cells[index].occupant = Some(unit.id);
        unit.position = pos;
        true
    }

    /// Clears whichever cell the unit occupies. Safe no-op if it is nowhere
    /// on the grid.
    pub fn remove(&mut self, unit: &Unit) {
        // Fast path via the unit's recorded position; scan as a fallback so a
        // desynced record can never leave a stale occupant behind.
        if let Some(index) = self.index(unit.position) {
            if self.cells[index].occupant == Some(unit.id) {
                self.cells[index].occupant = None;
                return;
            }
        }
        for cell in &mut self.cells {
            if cell.occupant == Some(unit.id) {
                cell.occupant = None;
                return;
            }
        }
    }

    /// All occupied positions within Manhattan `range` of `center`, inclusive,
    /// in row-major order.
    pub fn units_in_range(&self, center: Position, range: u32) -> Vec<UnitId> {
        let r = range as i32;
        let mut found = Vec::new();
        for y in center.y - r..=center.y + r {
            for x in center.x - r..=center.x + r {
                let pos = Position::new(x, y);
                if center.manhattan_distance(pos) > range {
                    continue;
                }
                if let Some(id) = self.unit_at(pos) {
                    found.push(id);
                }
            }
        }
        found
    }

    /// Nearest walkable cell to `anchor`, searched in expanding Manhattan
    /// rings. Used for respawns when the anchor itself is taken.
    pub fn nearest_free(&self, anchor: Position, max_radius: u32) -> Option<Position> {
        if self.is_empty(anchor) {
            return Some(anchor);
        }
        for radius in 1..=max_radius as i32 {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs() + dy.abs() != radius {
                        continue;
                    }
                    let pos = Position::new(anchor.x + dx, anchor.y + dy);
                    if self.is_empty(pos) {
                        return Some(pos);
                    }
                }
            }
        }
        None
    }

    pub fn player_nexus(&self) -> Position {
        self.player_nexus
    }

    pub fn enemy_nexus(&self) -> Position {
        self.enemy_nexus
    }

    pub fn player_towers(&self) -> &[Position] {
        &self.player_towers
    }

    pub fn enemy_towers(&self) -> &[Position] {
        &self.enemy_towers
    }

    pub fn player_spawns(&self) -> &[Position] {
        &self.player_spawns
    }

    pub fn enemy_spawns(&self) -> &[Position] {
        &self.enemy_spawns
    }

    /// Terrain glyph for rendering collaborators. Occupant glyphs are layered
    /// on top by the engine, which knows unit kinds.
    pub fn terrain_glyph(&self, pos: Position) -> char {
        self.cell(pos).map_or(' ', |cell| cell.kind.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{Team, Unit};

    fn test_map() -> GameMap {
        GameMap::generate(&GameConfig::default(), &mut GameRng::new(42))
    }

    fn minion(id: u32) -> Unit {
        Unit::minion(UnitId(id), "Minion".into(), Position::ORIGIN, Team::Player, 0)
    }

    #[test]
    fn named_coordinates_uphold_their_invariants() {
        let map = test_map();

        for &pos in map.player_towers().iter().chain(map.enemy_towers()) {
            assert!(map.is_empty(pos), "tower spot {pos} must be walkable");
        }
        for &pos in map.player_spawns().iter().chain(map.enemy_spawns()) {
            assert!(map.is_empty(pos), "spawn point {pos} must be walkable");
        }
        assert_eq!(map.cell(map.player_nexus()).unwrap().kind, CellKind::Base);
        assert_eq!(map.cell(map.enemy_nexus()).unwrap().kind, CellKind::Base);
        assert_eq!(map.player_spawns().len(), GameConfig::LANES);
        assert_eq!(map.enemy_spawns().len(), GameConfig::LANES);
    }

    #[test]
    fn same_seed_generates_identical_maps() {
        let a = GameMap::generate(&GameConfig::default(), &mut GameRng::new(9));
        let b = GameMap::generate(&GameConfig::default(), &mut GameRng::new(9));
        assert_eq!(a.cells, b.cells);
    }

    #[test]
    fn place_updates_cell_and_unit_together() {
        let mut map = test_map();
        let mut unit = minion(1);
        let spawn = map.player_spawns()[0];

        assert!(map.place(&mut unit, spawn));
        assert_eq!(map.unit_at(spawn), Some(unit.id));
        assert_eq!(unit.position, spawn);

        // Relocating clears the old cell.
        let next = map.player_spawns()[1];
        assert!(map.place(&mut unit, next));
        assert_eq!(map.unit_at(spawn), None);
        assert_eq!(map.unit_at(next), Some(unit.id));
        assert_eq!(unit.position, next);
    }

    #[test]
    fn place_refuses_occupied_and_invalid_cells() {
        let mut map = test_map();
        let mut first = minion(1);
        let mut second = minion(2);
        let spawn = map.player_spawns()[0];

        assert!(map.place(&mut first, spawn));
        assert!(!map.place(&mut second, spawn));
        assert_eq!(map.unit_at(spawn), Some(first.id));

        assert!(!map.place(&mut second, Position::new(-1, 4)));
        assert!(!map.is_empty(Position::new(-1, 4)));
    }

    #[test]
    fn place_refuses_impassable_terrain() {
        let mut map = test_map();
        let mut unit = minion(1);
        let spawn = map.player_spawns()[0];
        let water = Position::new(spawn.x + 1, spawn.y);

        assert!(map.place(&mut unit, spawn));
        map.set_kind(water, CellKind::Water);

        assert!(!map.place(&mut unit, water));
        assert_eq!(map.unit_at(water), None);
        assert_eq!(map.unit_at(spawn), Some(unit.id));
        assert_eq!(unit.position, spawn);
    }

    #[test]
    fn remove_clears_occupancy() {
        let mut map = test_map();
        let mut unit = minion(1);
        let spawn = map.enemy_spawns()[2];

        map.place(&mut unit, spawn);
        map.remove(&unit);
        assert_eq!(map.unit_at(spawn), None);

        // Removing an absent unit is a no-op.
        map.remove(&unit);
    }

    #[test]
    fn units_in_range_respects_manhattan_metric() {
        let mut map = test_map();
        let center = map.player_spawns()[0];
        let mut near = minion(1);
        let mut far = minion(2);

        map.place(&mut near, Position::new(center.x + 1, center.y + 1));
        map.place(&mut far, Position::new(center.x + 3, center.y + 3));

        let in_range = map.units_in_range(center, 2);
        assert!(in_range.contains(&near.id));
        assert!(!in_range.contains(&far.id));
    }

    #[test]
    fn nearest_free_expands_outward() {
        let mut map = test_map();
        let anchor = map.player_spawns()[0];
        assert_eq!(map.nearest_free(anchor, 3), Some(anchor));

        let mut blocker = minion(1);
        map.place(&mut blocker, anchor);
        let fallback = map.nearest_free(anchor, 3).unwrap();
        assert_ne!(fallback, anchor);
        assert_eq!(anchor.manhattan_distance(fallback), 1);
    }
}
