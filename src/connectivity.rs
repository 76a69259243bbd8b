use crate::grid::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets for 4-directional neighbours: up, right, down, left
const CARDINAL: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Which cells count as neighbours during expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Connectivity {
    /// Orthogonal neighbours only
    #[default]
    Four,
    /// Orthogonal and diagonal neighbours
    Eight,
}

impl Connectivity {
    /// The other policy
    pub fn toggled(self) -> Self {
        match self {
            Connectivity::Four => Connectivity::Eight,
            Connectivity::Eight => Connectivity::Four,
        }
    }

    /// In-bounds neighbours of `coord` on a `rows` x `cols` grid
    pub fn neighbors(self, coord: Coord, rows: i32, cols: i32) -> Vec<Coord> {
        let mut buf = Vec::with_capacity(8);
        self.fill_neighbors(coord, rows, cols, &mut buf);
        buf
    }

    /// Same as [`Connectivity::neighbors`], reusing `buf`
    pub fn fill_neighbors(self, coord: Coord, rows: i32, cols: i32, buf: &mut Vec<Coord>) {
        buf.clear();
        let in_bounds = |c: Coord| c.row >= 0 && c.row < rows && c.col >= 0 && c.col < cols;

        match self {
            Connectivity::Four => {
                for (dr, dc) in CARDINAL {
                    let n = Coord::new(coord.row + dr, coord.col + dc);
                    if in_bounds(n) {
                        buf.push(n);
                    }
                }
            }
            Connectivity::Eight => {
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let n = Coord::new(coord.row + dr, coord.col + dc);
                        if in_bounds(n) {
                            buf.push(n);
                        }
                    }
                }
            }
        }
    }

    /// Short label used by the shell button
    pub fn label(self) -> &'static str {
        match self {
            Connectivity::Four => "N4",
            Connectivity::Eight => "N8",
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
