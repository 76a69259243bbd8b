#![allow(dead_code)]

use std::collections::VecDeque;
use wavefront::{Connectivity, Coord, Grid, PathfinderEngine};

/// Parse a layout, panicking with the parse error on bad input
pub fn layout(text: &str) -> Grid {
    Grid::from_layout_text(text).unwrap_or_else(|e| panic!("bad test layout: {}", e))
}

/// Engine over `text`, with the given connectivity
pub fn engine_for(text: &str, connectivity: Connectivity) -> PathfinderEngine {
    let mut engine = PathfinderEngine::from_grid(layout(text));
    engine
        .set_connectivity(connectivity)
        .expect("fresh engine accepts connectivity");
    engine
}

/// Independent breadth-first search over the layout.
///
/// Returns the hop distance for every cell, `None` for obstacles and cells
/// that cannot be reached.
pub fn reference_distances(grid: &Grid, connectivity: Connectivity) -> Vec<Option<u32>> {
    let rows = grid.rows();
    let cols = grid.cols();
    let offsets: &[(i32, i32)] = match connectivity {
        Connectivity::Four => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
        Connectivity::Eight => &[
            (-1, -1), (-1, 0), (-1, 1),
            (0, -1), (0, 1),
            (1, -1), (1, 0), (1, 1),
        ],
    };

    let id = |c: Coord| (c.row * cols + c.col) as usize;
    let mut dist = vec![None; (rows * cols) as usize];
    let mut queue = VecDeque::new();

    let start = grid.start();
    dist[id(start)] = Some(0);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let d = dist[id(cell)].unwrap_or(0);
        for &(dr, dc) in offsets {
            let n = Coord::new(cell.row + dr, cell.col + dc);
            if n.row < 0 || n.row >= rows || n.col < 0 || n.col >= cols {
                continue;
            }
            if grid.is_blocked(n) || dist[id(n)].is_some() {
                continue;
            }
            dist[id(n)] = Some(d + 1);
            queue.push_back(n);
        }
    }

    dist
}

/// Cell values the engine should hold once the run has ended.
///
/// The run stops at the layer that reaches the end, so cells farther away
/// than the end stay unvisited.
pub fn expected_final_values(grid: &Grid, connectivity: Connectivity) -> Vec<i32> {
    let dist = reference_distances(grid, connectivity);
    let cols = grid.cols();
    let end = grid.end();
    let cutoff = dist[(end.row * cols + end.col) as usize];

    grid.iter()
        .map(|(coord, value)| {
            if value == -1 {
                return -1;
            }
            match dist[(coord.row * cols + coord.col) as usize] {
                Some(d) if cutoff.map_or(true, |c| d <= c) => d as i32,
                _ => 0,
            }
        })
        .collect()
}

/// Steps the engine needs to finish on `grid`
pub fn expected_step_count(grid: &Grid, connectivity: Connectivity) -> u32 {
    let dist = reference_distances(grid, connectivity);
    let end = grid.end();
    match dist[(end.row * grid.cols() + end.col) as usize] {
        Some(d) => d.max(1),
        // One extra pass finds the frontier empty
        None => dist.iter().flatten().copied().max().unwrap_or(0) + 1,
    }
}

pub fn values(engine: &PathfinderEngine) -> Vec<i32> {
    engine.grid().iter().map(|(_, v)| v).collect()
}

/// Render arrival values for assertion messages
pub fn render_values(engine: &PathfinderEngine) -> String {
    let grid = engine.grid();
    let mut result = String::new();
    for (coord, value) in grid.iter() {
        let cell = match value {
            -1 => " ##".to_string(),
            v => format!("{:3}", v),
        };
        result.push_str(&cell);
        if coord.col == grid.cols() - 1 {
            result.push('\n');
        }
    }
    result
}

/// Mirror a layout left-right
pub fn flip_horizontal(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim().chars().rev().collect::<String>() + "\n")
        .collect()
}

/// Mirror a layout top-bottom
pub fn flip_vertical(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .rev()
        .map(|line| line.trim().to_string() + "\n")
        .collect()
}

/// A layout plus its three mirrored variants
pub fn variants(text: &str) -> Vec<(&'static str, String)> {
    vec![
        ("original", flip_vertical(&flip_vertical(text))),
        ("h_flip", flip_horizontal(text)),
        ("v_flip", flip_vertical(text)),
        ("hv_flip", flip_vertical(&flip_horizontal(text))),
    ]
}
