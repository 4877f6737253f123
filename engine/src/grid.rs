use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CombatError;

/// A grid cell, 0-indexed, rows growing downward. Serialized as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

impl From<[i32; 2]> for Position {
    fn from([row, col]: [i32; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Position> for [i32; 2] {
    fn from(p: Position) -> Self {
        [p.row, p.col]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainKind {
    /// Impassable.
    Blocked,
    /// Passable, hurts whoever ends a round on it.
    Damage,
}

impl TerrainKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TerrainKind::Blocked => "BLOCKED",
            TerrainKind::Damage => "DAMAGE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Candidate order used wherever a deterministic scan is needed:
    /// row axis, then column axis, then diagonals.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    /// Movement points spent on one step; diagonals cost 2.
    pub fn cost(self) -> u32 {
        let (d_row, d_col) = self.delta();
        d_row.unsigned_abs() + d_col.unsigned_abs()
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::NorthEast => "northeast",
            Direction::NorthWest => "northwest",
            Direction::SouthEast => "southeast",
            Direction::SouthWest => "southwest",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" | "up" => Ok(Direction::North),
            "south" | "s" | "down" => Ok(Direction::South),
            "east" | "e" | "right" => Ok(Direction::East),
            "west" | "w" | "left" => Ok(Direction::West),
            "northeast" | "north-east" | "ne" => Ok(Direction::NorthEast),
            "northwest" | "north-west" | "nw" => Ok(Direction::NorthWest),
            "southeast" | "south-east" | "se" => Ok(Direction::SouthEast),
            "southwest" | "south-west" | "sw" => Ok(Direction::SouthWest),
            _ => Err(CombatError::InvalidDirection(s.trim().to_string())),
        }
    }
}

/// One hazard cell as it appears in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TerrainCell {
    pub position: Position,
    pub kind: TerrainKind,
}

/// Battlefield bounds plus static terrain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    #[serde(serialize_with = "serialize_terrain")]
    terrain: IndexMap<Position, TerrainKind>,
    pub terrain_emoji: String,
}

impl Grid {
    /// Caller guarantees positive dimensions; cells outside the bounds are dropped.
    pub fn new(
        rows: i32,
        cols: i32,
        cells: impl IntoIterator<Item = (Position, TerrainKind)>,
        terrain_emoji: impl Into<String>,
    ) -> Self {
        let mut grid = Self {
            rows,
            cols,
            terrain: IndexMap::new(),
            terrain_emoji: terrain_emoji.into(),
        };
        for (pos, kind) in cells {
            if grid.in_bounds(pos) {
                grid.terrain.insert(pos, kind);
            }
        }
        grid
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.rows).contains(&pos.row) && (0..self.cols).contains(&pos.col)
    }

    /// `None` is ordinary ground.
    pub fn terrain_at(&self, pos: Position) -> Option<TerrainKind> {
        self.terrain.get(&pos).copied()
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        self.terrain_at(pos) == Some(TerrainKind::Blocked)
    }

    pub fn terrain_cells(&self) -> impl Iterator<Item = TerrainCell> + '_ {
        self.terrain
            .iter()
            .map(|(&position, &kind)| TerrainCell { position, kind })
    }

    /// The kind shared by the hazard set, if any cells exist. Mixed sets
    /// report the first cell's kind.
    pub fn dominant_kind(&self) -> Option<TerrainKind> {
        self.terrain.values().next().copied()
    }
}

fn serialize_terrain<S: Serializer>(
    terrain: &IndexMap<Position, TerrainKind>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        terrain
            .iter()
            .map(|(&position, &kind)| TerrainCell { position, kind }),
    )
}
