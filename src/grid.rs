use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell value of a free cell the wavefront has not reached yet
pub const EMPTY: i32 = 0;
/// Cell value of an obstacle
pub const BLOCKED: i32 = -1;
/// Largest number of cells a grid may hold
pub const MAX_CELLS: usize = 1 << 24;

/// A cell position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Grid structure for storing cell states
/// Cell values: 0=unvisited, -1=obstacle, k>0=reached at step k
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<i32>,
    start: Coord,
    end: Coord,
}

impl Grid {
    /// Create a new grid with all cells empty
    pub fn new(rows: i32, cols: i32, start: Coord, end: Coord) -> Result<Self> {
        let len = match rows.checked_mul(cols) {
            Some(n) if rows > 0 && cols > 0 && n as usize <= MAX_CELLS => n as usize,
            _ => return Err(Error::InvalidDimensions { rows, cols }),
        };

        let grid = Grid {
            rows,
            cols,
            cells: vec![EMPTY; len],
            start,
            end,
        };
        grid.check_bounds(start)?;
        grid.check_bounds(end)?;
        Ok(grid)
    }

    /// Create a grid with specific obstacle cells
    pub fn with_blocked(
        rows: i32,
        cols: i32,
        start: Coord,
        end: Coord,
        blocked: &[Coord],
    ) -> Result<Self> {
        let mut grid = Self::new(rows, cols, start, end)?;
        for &coord in blocked {
            grid.check_bounds(coord)?;
            if grid.is_marker(coord) {
                return Err(Error::InvalidFlip {
                    row: coord.row,
                    col: coord.col,
                    reason: "start and end cannot be obstacles",
                });
            }
            let id = grid.index(coord);
            grid.cells[id] = BLOCKED;
        }
        Ok(grid)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    /// Check whether a coordinate lies inside the grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row >= 0 && coord.row < self.rows && coord.col >= 0 && coord.col < self.cols
    }

    /// Get cell value at `coord`
    pub fn get(&self, coord: Coord) -> Result<i32> {
        self.check_bounds(coord)?;
        Ok(self.cells[self.index(coord)])
    }

    /// Set cell value at `coord`
    pub(crate) fn set(&mut self, coord: Coord, value: i32) -> Result<()> {
        self.check_bounds(coord)?;
        let id = self.index(coord);
        self.cells[id] = value;
        Ok(())
    }

    /// Out of bounds is considered blocked
    pub fn is_blocked(&self, coord: Coord) -> bool {
        !self.contains(coord) || self.cells[self.index(coord)] == BLOCKED
    }

    /// Toggle a cell between obstacle and empty, returning the new value.
    ///
    /// Start, end and cells the wavefront already reached are left alone.
    pub fn flip(&mut self, coord: Coord) -> Result<i32> {
        let current = self.get(coord)?;
        let reason = if coord == self.start {
            Some("cell is the start")
        } else if coord == self.end {
            Some("cell is the end")
        } else if current > 0 {
            Some("cell was already reached")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(Error::InvalidFlip {
                row: coord.row,
                col: coord.col,
                reason,
            });
        }

        let next = if current == BLOCKED { EMPTY } else { BLOCKED };
        self.set(coord, next)?;
        Ok(next)
    }

    /// Iterate over every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, i32)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(id, &value)| (Coord::new(id as i32 / cols, id as i32 % cols), value))
    }

    /// Number of cells holding a positive arrival step
    pub fn reached_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0).count()
    }

    /// Block a cell while building a preset; clipped to the grid and never
    /// placed on start or end.
    pub(crate) fn block(&mut self, coord: Coord) {
        if self.contains(coord) && !self.is_marker(coord) {
            let id = self.index(coord);
            self.cells[id] = BLOCKED;
        }
    }

    fn is_marker(&self, coord: Coord) -> bool {
        coord == self.start || coord == self.end
    }

    fn index(&self, coord: Coord) -> usize {
        (coord.col + coord.row * self.cols) as usize
    }

    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                row: coord.row,
                col: coord.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Render the obstacle layout (arrival values are dropped).
    ///
    /// Format: `.` empty, `#` obstacle, `S` start, `E` end, `@` start and end
    /// on the same cell.
    pub fn to_layout_text(&self) -> String {
        let mut result = String::with_capacity(self.cells.len() + self.rows as usize);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let coord = Coord::new(row, col);
                let symbol = if coord == self.start && coord == self.end {
                    '@'
                } else if coord == self.start {
                    'S'
                } else if coord == self.end {
                    'E'
                } else if self.is_blocked(coord) {
                    '#'
                } else {
                    '.'
                };
                result.push(symbol);
            }
            result.push('\n');
        }

        result
    }

    /// Parse a layout produced by [`Grid::to_layout_text`]
    pub fn from_layout_text(text: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end()))
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();

        let Some(&(_, first)) = lines.first() else {
            return Err(Error::InvalidLayout {
                line: 0,
                message: "no grid rows found".to_string(),
            });
        };
        let cols = first.chars().count() as i32;
        let rows = lines.len() as i32;

        let mut start = None;
        let mut end = None;
        let mut blocked = Vec::new();

        for (row, &(line_no, line)) in lines.iter().enumerate() {
            if line.chars().count() as i32 != cols {
                return Err(Error::InvalidLayout {
                    line: line_no,
                    message: format!("expected {} columns", cols),
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let coord = Coord::new(row as i32, col as i32);
                let (is_start, is_end) = match ch {
                    'S' => (true, false),
                    'E' => (false, true),
                    '@' => (true, true),
                    '#' => {
                        blocked.push(coord);
                        (false, false)
                    }
                    '.' => (false, false),
                    other => {
                        return Err(Error::InvalidLayout {
                            line: line_no,
                            message: format!("unexpected character '{}'", other),
                        });
                    }
                };

                if is_start && start.replace(coord).is_some() {
                    return Err(Error::InvalidLayout {
                        line: line_no,
                        message: "more than one start".to_string(),
                    });
                }
                if is_end && end.replace(coord).is_some() {
                    return Err(Error::InvalidLayout {
                        line: line_no,
                        message: "more than one end".to_string(),
                    });
                }
            }
        }

        let last_line = lines.last().map(|&(n, _)| n).unwrap_or(0);
        let start = start.ok_or_else(|| Error::InvalidLayout {
            line: last_line,
            message: "no start cell".to_string(),
        })?;
        let end = end.ok_or_else(|| Error::InvalidLayout {
            line: last_line,
            message: "no end cell".to_string(),
        })?;

        Self::with_blocked(rows, cols, start, end, &blocked)
    }
}
