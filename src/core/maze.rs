//! Maze loading and cell queries.
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::entity::EntityKind;

/// Reference 16x16 map. Walls match the classic layout; `o`/`b`/`i` are spawns.
pub const REFERENCE_MAP: &str = "\
#########.......
#..............#
#.......########
#...o..........#
#......##......#
#......##...i..#
#..............#
###............#
##.............#
#......####..###
#......#.......#
#......#..b....#
#..............#
#......#########
#..............#
################
";

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("unknown cell {ch:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, ch: char },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Empty,
    Spawn(EntityKind),
}

impl Cell {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Empty),
            other => EntityKind::from_marker(other).map(Cell::Spawn),
        }
    }
}

/// Fixed-size grid addressed `[y][x]`. Never mutated after load.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Maze {
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();
        for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let row = height;
            let start = cells.len();
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(MapError::UnknownCell { row, col, ch })?;
                cells.push(cell);
            }
            let found = cells.len() - start;
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(MapError::Ragged { row, expected, found });
            }
            height += 1;
        }
        let width = width.ok_or(MapError::Empty)?;
        Ok(Self { width, height, cells })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let maze = Self::parse(&text)?;
        tracing::info!(
            path = %path.display(),
            width = maze.width,
            height = maze.height,
            "loaded map"
        );
        Ok(maze)
    }

    pub fn reference() -> Self {
        Self::parse(REFERENCE_MAP).unwrap_or_else(|e| unreachable!("reference map is valid: {e}"))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell(&self, x: i64, y: i64) -> Option<Cell> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Out-of-bounds cells are not walls; scans check bounds themselves.
    #[inline]
    pub fn is_wall(&self, x: i64, y: i64) -> bool {
        matches!(self.cell(x, y), Some(Cell::Wall))
    }

    pub fn spawns(&self) -> impl Iterator<Item = (usize, usize, EntityKind)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| match cell {
            Cell::Spawn(kind) => Some((i % self.width, i / self.width, *kind)),
            _ => None,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
}
