use arboard::Clipboard;
use macroquad::prelude::*;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use wavefront::action_log::{Action, ActionLog, Outcome};
use wavefront::config::Config;
use wavefront::{logging, Coord, PathfinderEngine, PatternCatalog, StepScheduler};

const COLOR_REACHED: Color = YELLOW;
const COLOR_BLOCKED: Color = BLUE;
const COLOR_NONE: Color = GRAY;
const COLOR_GRID: Color = WHITE;
const COLOR_START: Color = GREEN;
const COLOR_END: Color = PINK;
const COLOR_FONT_CELL: Color = RED;

const PATTERN_KEYS: [KeyCode; 7] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
];

/// Height of the status area under the grid
const STATUS_HEIGHT: f32 = 90.0;

/// Visualization state
struct ShellState {
    engine: PathfinderEngine,
    scheduler: StepScheduler,
    log: ActionLog,
    config: Config,
}

impl ShellState {
    fn new(config: Config) -> Result<Self, wavefront::Error> {
        let engine = PathfinderEngine::from_config(&config)?;
        let scheduler = StepScheduler::new(config.step_interval());
        Ok(ShellState {
            engine,
            scheduler,
            log: ActionLog::new(),
            config,
        })
    }

    fn apply(&mut self, action: Action) -> Outcome {
        self.log.apply(&mut self.engine, action)
    }

    /// Map a mouse position to a grid cell
    fn cell_at(&self, mouse_x: f32, mouse_y: f32) -> Option<Coord> {
        let visual = &self.config.visual;
        let x = mouse_x - visual.origin_x;
        let y = mouse_y - visual.origin_y;
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let coord = Coord::new((y / visual.cell_size) as i32, (x / visual.cell_size) as i32);
        self.engine.grid().contains(coord).then_some(coord)
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        if let Some(coord) = self.cell_at(mouse_x, mouse_y) {
            // Rejected flips (start, end, reached cells) leave the grid as is
            self.apply(Action::FlipCell {
                row: coord.row,
                col: coord.col,
            });
        }
    }

    fn toggle_connectivity(&mut self) {
        let next = self.engine.connectivity().toggled();
        self.apply(Action::SetConnectivity { connectivity: next });
    }

    fn select_pattern(&mut self, index: usize) {
        if let Some(name) = PatternCatalog::names().get(index) {
            self.apply(Action::SetPattern {
                name: name.to_string(),
            });
        }
    }

    fn next_pattern(&mut self) {
        let names = PatternCatalog::names();
        let next = self
            .engine
            .pattern_name()
            .and_then(|current| names.iter().position(|&n| n == current))
            .map(|i| (i + 1) % names.len())
            .unwrap_or(0);
        self.select_pattern(next);
    }

    fn copy_to_clipboard(&self) {
        let layout = self.engine.grid().to_layout_text();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&layout) {
                    warn!(error = %e, "failed to copy to clipboard");
                } else {
                    info!("grid layout copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(Duration::from_millis(100));
                }
            }
            Err(e) => warn!(error = %e, "failed to access clipboard"),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let layout = match Clipboard::new().and_then(|mut c| c.get_text()) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "failed to read clipboard");
                return;
            }
        };

        if self.apply(Action::PasteLayout { layout }) == Outcome::Rejected {
            warn!(
                rows = self.engine.rows(),
                cols = self.engine.cols(),
                "clipboard does not hold a usable layout"
            );
        }
    }

    fn update(&mut self) {
        let elapsed = Duration::from_secs_f32(get_frame_time().max(0.0));
        let steps = self.scheduler.tick(elapsed, &mut self.engine);
        for _ in 0..steps {
            self.log.log(Action::Step, Outcome::Applied);
        }
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(30, 30, 30, 255));
        self.draw_cells();
        self.draw_grid_lines();
        self.draw_status();
    }

    fn draw_cells(&self) {
        let visual = &self.config.visual;
        let side = visual.cell_size;
        let grid = self.engine.grid();
        let start = grid.start();
        let end = grid.end();

        for (coord, value) in grid.iter() {
            let left = visual.origin_x + coord.col as f32 * side;
            let top = visual.origin_y + coord.row as f32 * side;

            let color = if coord == end {
                COLOR_END
            } else if coord == start {
                COLOR_START
            } else if value == -1 {
                COLOR_BLOCKED
            } else if value > 0 {
                COLOR_REACHED
            } else {
                COLOR_NONE
            };
            draw_rectangle(left, top, side, side, color);

            if value > 0 {
                let dx = if value < 10 { side / 4.0 } else { 0.0 };
                draw_text(&value.to_string(), left + dx, top + side, side, COLOR_FONT_CELL);
            }
        }
    }

    fn draw_grid_lines(&self) {
        let visual = &self.config.visual;
        let side = visual.cell_size;
        let rows = self.engine.rows();
        let cols = self.engine.cols();
        let x2 = visual.origin_x + cols as f32 * side;
        let y2 = visual.origin_y + rows as f32 * side;

        for row in 0..=rows {
            let y = visual.origin_y + row as f32 * side;
            draw_line(visual.origin_x, y, x2, y, 1.0, COLOR_GRID);
        }
        for col in 0..=cols {
            let x = visual.origin_x + col as f32 * side;
            draw_line(x, visual.origin_y, x, y2, 1.0, COLOR_GRID);
        }
    }

    fn draw_status(&self) {
        let top = self.config.visual.origin_y
            + self.engine.rows() as f32 * self.config.visual.cell_size
            + 25.0;
        let left = self.config.visual.origin_x;

        let state = if self.engine.has_ended() {
            "Ended".to_string()
        } else if self.scheduler.is_running() {
            format!("Running every {}ms", self.scheduler.interval().as_millis())
        } else {
            "Stopped".to_string()
        };
        let status = format!(
            "Pattern: {}   Step: {}   {}   {}",
            self.engine.pattern_name().unwrap_or("(pasted)"),
            self.engine.step_count(),
            self.engine.connectivity(),
            state
        );
        draw_text(&status, left, top, 20.0, WHITE);

        let help = "Click: flip  N: next  Space: start/stop  D: N4/N8  Tab/1-7: pattern  C/V: copy/paste  Esc: quit";
        draw_text(help, left, top + 25.0, 16.0, LIGHTGRAY);
    }

    fn finish(&self) {
        info!("{}", self.log.summary().replace('\n', "; "));
        if self.config.logging.enable_action_log {
            let path = Path::new(&self.config.logging.action_log_path);
            match self.log.save_to_file(path) {
                Ok(()) => info!(path = %path.display(), "action log saved"),
                Err(e) => warn!(error = %e, "failed to save action log"),
            }
        }
    }
}

fn window_conf() -> Conf {
    let (config, _) = Config::load();
    let visual = &config.visual;
    Conf {
        window_title: visual.window_title.clone(),
        window_width: (visual.origin_x * 2.0 + config.grid.cols as f32 * visual.cell_size) as i32,
        window_height: (visual.origin_y + config.grid.rows as f32 * visual.cell_size + STATUS_HEIGHT)
            as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, source) = Config::load();
    logging::init(&config.logging.filter);
    source.report();

    let mut state = match ShellState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "cannot start engine");
            return;
        }
    };

    loop {
        // Handle input
        if is_mouse_button_pressed(MouseButton::Left) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::N) && !state.engine.has_ended() {
            state.apply(Action::Step);
        }

        if is_key_pressed(KeyCode::Space) {
            state.scheduler.toggle(&state.engine);
        }

        if is_key_pressed(KeyCode::D) {
            state.toggle_connectivity();
        }

        if is_key_pressed(KeyCode::Tab) {
            state.next_pattern();
        }

        for (index, key) in PATTERN_KEYS.iter().enumerate() {
            if is_key_pressed(*key) {
                state.select_pattern(index);
            }
        }

        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::V) {
            state.paste_from_clipboard();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update();
        state.draw();

        next_frame().await
    }

    state.finish();
}
