use crate::error::{Error, Result};
use crate::grid::{Coord, Grid};

/// A named preset: obstacle layout plus start and end placement, scaled to
/// whatever grid size is requested.
pub struct Pattern {
    pub name: &'static str,
    build: fn(i32, i32) -> Result<Grid>,
}

pub const PATTERNS: &[Pattern] = &[
    Pattern { name: "Empty", build: empty },
    Pattern { name: "Wall", build: wall },
    Pattern { name: "Zigzag", build: zigzag },
    Pattern { name: "Maze", build: maze },
    Pattern { name: "Diagonal", build: diagonal },
    Pattern { name: "Enclosed", build: enclosed },
    Pattern { name: "Scatter", build: scatter },
];

/// Name of the pattern loaded when nothing else is asked for
pub const DEFAULT_PATTERN: &str = "Empty";

/// Registry of the presets above, keyed by name
pub struct PatternCatalog;

impl PatternCatalog {
    /// Preset identifiers in display order
    pub fn names() -> Vec<&'static str> {
        PATTERNS.iter().map(|p| p.name).collect()
    }

    /// Case-sensitive lookup of a preset name
    pub fn contains(name: &str) -> bool {
        PATTERNS.iter().any(|p| p.name == name)
    }

    /// Build a fresh grid for `name`
    pub fn load(name: &str, rows: i32, cols: i32) -> Result<Grid> {
        let pattern = PATTERNS
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownPattern {
                name: name.to_string(),
            })?;
        (pattern.build)(rows, cols)
    }
}

/// Start on the left, end on the right, both on the middle row
fn across(rows: i32, cols: i32) -> (Coord, Coord) {
    (
        Coord::new(rows / 2, cols / 4),
        Coord::new(rows / 2, cols - 1 - cols / 4),
    )
}

/// Start top-left, end bottom-right
fn corners(rows: i32, cols: i32) -> (Coord, Coord) {
    (Coord::new(0, 0), Coord::new(rows - 1, cols - 1))
}

fn empty(rows: i32, cols: i32) -> Result<Grid> {
    let (start, end) = across(rows, cols);
    Grid::new(rows, cols, start, end)
}

/// Single vertical wall with one gap in the upper part
fn wall(rows: i32, cols: i32) -> Result<Grid> {
    let (start, end) = across(rows, cols);
    let mut grid = Grid::new(rows, cols, start, end)?;

    let col = cols / 2;
    let gap = rows / 4;
    for row in (0..rows).filter(|&r| r != gap) {
        grid.block(Coord::new(row, col));
    }
    Ok(grid)
}

/// Two walls, open at opposite ends
fn zigzag(rows: i32, cols: i32) -> Result<Grid> {
    let start = Coord::new(rows / 2, 0);
    let end = Coord::new(rows / 2, cols - 1);
    let mut grid = Grid::new(rows, cols, start, end)?;

    for row in 0..rows - 1 {
        grid.block(Coord::new(row, cols / 3));
    }
    for row in 1..rows {
        grid.block(Coord::new(row, 2 * cols / 3));
    }
    Ok(grid)
}

/// Horizontal walls every fourth row, gaps alternating right and left
fn maze(rows: i32, cols: i32) -> Result<Grid> {
    let (start, end) = corners(rows, cols);
    let mut grid = Grid::new(rows, cols, start, end)?;

    for row in (2..rows).step_by(4) {
        let gap = if (row / 4) % 2 == 0 { cols - 1 } else { 0 };
        for col in (0..cols).filter(|&c| c != gap) {
            grid.block(Coord::new(row, col));
        }
    }
    Ok(grid)
}

/// One-cell-thick diagonal line: a wall for N4, porous for N8
fn diagonal(rows: i32, cols: i32) -> Result<Grid> {
    let start = Coord::new(rows - 1, 0);
    let end = Coord::new(0, cols - 1);
    let mut grid = Grid::new(rows, cols, start, end)?;

    let offset = (cols - rows).max(0) / 2;
    for row in 0..rows {
        grid.block(Coord::new(row, offset + row));
    }
    Ok(grid)
}

/// Start boxed in by a ring two cells out, end in the far corner.
///
/// The ring is clipped at the border, which closes it just as well. When the
/// grid is too small for the end to sit outside the ring, no ring is built.
fn enclosed(rows: i32, cols: i32) -> Result<Grid> {
    let start = Coord::new(rows / 2, cols / 4);
    let end = Coord::new(rows - 1, cols - 1);
    let mut grid = Grid::new(rows, cols, start, end)?;

    let clearance = (end.row - start.row).max(end.col - start.col);
    if clearance > 2 {
        for dr in -2i32..=2 {
            for dc in -2i32..=2 {
                if dr.abs() == 2 || dc.abs() == 2 {
                    grid.block(Coord::new(start.row + dr, start.col + dc));
                }
            }
        }
    }
    Ok(grid)
}

/// Roughly a quarter of the cells blocked, same layout every time
fn scatter(rows: i32, cols: i32) -> Result<Grid> {
    let (start, end) = corners(rows, cols);
    let mut grid = Grid::new(rows, cols, start, end)?;

    // Simple linear congruential generator with a fixed seed
    let mut seed: u64 = 0x5EED;
    for row in 0..rows {
        for col in 0..cols {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            if (seed >> 16) % 4 == 0 {
                grid.block(Coord::new(row, col));
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stable() {
        assert_eq!(
            PatternCatalog::names(),
            vec!["Empty", "Wall", "Zigzag", "Maze", "Diagonal", "Enclosed", "Scatter"]
        );
        assert_eq!(PatternCatalog::names()[0], DEFAULT_PATTERN);
        assert!(PatternCatalog::contains("Enclosed"));
        assert!(!PatternCatalog::contains("enclosed"));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = PatternCatalog::load("Spiral", 40, 50).unwrap_err();
        assert!(matches!(err, Error::UnknownPattern { ref name } if name == "Spiral"));
        assert!(PatternCatalog::load("empty", 40, 50).is_err());
    }

    #[test]
    fn markers_are_never_blocked() {
        for name in PatternCatalog::names() {
            for (rows, cols) in [(40, 50), (1, 1), (2, 3), (5, 5)] {
                let grid = PatternCatalog::load(name, rows, cols).unwrap();
                assert!(grid.contains(grid.start()), "{} start out of bounds", name);
                assert!(grid.contains(grid.end()), "{} end out of bounds", name);
                assert!(!grid.is_blocked(grid.start()), "{} start blocked", name);
                assert!(!grid.is_blocked(grid.end()), "{} end blocked", name);
            }
        }
    }

    #[test]
    fn loading_is_deterministic() {
        for name in PatternCatalog::names() {
            let a = PatternCatalog::load(name, 40, 50).unwrap();
            let b = PatternCatalog::load(name, 40, 50).unwrap();
            assert_eq!(a, b, "{} differs between loads", name);
        }
    }

    #[test]
    fn wall_has_a_single_gap() {
        let grid = PatternCatalog::load("Wall", 40, 50).unwrap();
        let open: Vec<i32> = (0..40)
            .filter(|&r| !grid.is_blocked(Coord::new(r, 25)))
            .collect();
        assert_eq!(open, vec![10]);
    }

    #[test]
    fn enclosed_end_sits_outside_the_ring() {
        for (rows, cols) in [(40, 50), (5, 5), (7, 4), (3, 8)] {
            let grid = PatternCatalog::load("Enclosed", rows, cols).unwrap();
            let (start, end) = (grid.start(), grid.end());
            assert_eq!(end, Coord::new(rows - 1, cols - 1));
            let clearance = (end.row - start.row).max(end.col - start.col);
            assert!(clearance > 2, "{}x{} end inside the ring", rows, cols);
        }
    }

    #[test]
    fn enclosed_skips_the_ring_on_tiny_grids() {
        let grid = PatternCatalog::load("Enclosed", 3, 3).unwrap();
        assert_eq!(grid.iter().filter(|&(_, v)| v == -1).count(), 0);
    }

    #[test]
    fn scatter_blocks_some_cells() {
        let grid = PatternCatalog::load("Scatter", 40, 50).unwrap();
        let blocked = grid.iter().filter(|&(_, v)| v == -1).count();
        assert!(blocked > 200 && blocked < 800, "blocked = {}", blocked);
    }

    #[test]
    fn bad_dimensions_propagate() {
        assert!(matches!(
            PatternCatalog::load("Maze", 0, 10),
            Err(Error::InvalidDimensions { .. })
        ));
    }
}
