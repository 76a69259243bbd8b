mod common;

use common::{engine_for, expected_final_values, render_values, values, variants};
use wavefront::{Connectivity, StepOutcome};

#[test]
fn single_cell_ends_on_first_step() {
    let mut engine = engine_for("@", Connectivity::Four);
    assert!(!engine.has_ended());

    let outcome = engine.step();
    assert_eq!(outcome, StepOutcome::Reached { marked: 0 });
    assert!(engine.has_ended());
    assert_eq!(engine.step_count(), 1);
    assert_eq!(engine.cell_value(0, 0).unwrap(), 0);
}

#[test]
fn open_3x3_four_neighbors() {
    let mut engine = engine_for("S..\n...\n..E", Connectivity::Four);

    for _ in 0..3 {
        engine.step();
        assert!(!engine.has_ended());
    }
    engine.step();

    assert_eq!(engine.cell_value(2, 2).unwrap(), 4);
    assert!(engine.has_ended());
    assert_eq!(engine.step_count(), 4);
    assert_eq!(
        values(&engine),
        vec![0, 1, 2, 1, 2, 3, 2, 3, 4],
        "\n{}",
        render_values(&engine)
    );
}

#[test]
fn open_3x3_eight_neighbors() {
    let mut engine = engine_for("S..\n...\n..E", Connectivity::Eight);
    engine.step();
    assert!(!engine.has_ended());
    engine.step();

    assert!(engine.has_ended());
    assert_eq!(engine.cell_value(2, 2).unwrap(), 2);
    assert_eq!(values(&engine), vec![0, 1, 2, 1, 1, 2, 2, 2, 2]);
}

#[test]
fn wall_with_gap_forces_the_wavefront_through() {
    let mut engine = engine_for("S..\n.##\n..E", Connectivity::Four);
    engine.run_to_end();

    assert_eq!(engine.cell_value(1, 0).unwrap(), 1, "gap reached first");
    assert_eq!(engine.cell_value(2, 0).unwrap(), 2);
    assert_eq!(engine.cell_value(2, 1).unwrap(), 3);
    assert_eq!(engine.cell_value(2, 2).unwrap(), 4);
    assert_eq!(engine.cell_value(1, 1).unwrap(), -1);
    assert_eq!(engine.cell_value(1, 2).unwrap(), -1);
    assert_eq!(engine.step_count(), 4);
}

#[test]
fn detour_length_matches_in_every_mirror() {
    let text = "..S..\n####.\nE....";

    for (name, variant) in variants(text) {
        for (connectivity, detour) in [(Connectivity::Four, 8), (Connectivity::Eight, 6)] {
            let mut engine = engine_for(&variant, connectivity);
            let steps = engine.run_to_end();
            let end = engine.end_coord();

            assert_eq!(
                engine.cell_value(end.row, end.col).unwrap(),
                detour,
                "[{}] {} detour\n{}",
                name,
                connectivity,
                render_values(&engine)
            );
            assert_eq!(steps, detour as u32);
            assert_eq!(values(&engine), expected_final_values(engine.grid(), connectivity));
        }
    }
}

#[test]
fn enclosed_start_never_reaches_the_end() {
    let text = ".....\n.###.\n.#S#.\n.###.\n....E";

    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        let mut engine = engine_for(text, connectivity);

        assert_eq!(engine.step(), StepOutcome::Exhausted);
        assert!(engine.has_ended());
        assert_eq!(engine.cell_value(4, 4).unwrap(), 0);

        for _ in 0..10 {
            assert_eq!(engine.step(), StepOutcome::AlreadyEnded);
        }
        assert_eq!(engine.step_count(), 1);
        assert_eq!(engine.grid().reached_count(), 0);
    }
}

#[test]
fn unreachable_end_ends_after_the_last_layer() {
    // Right column is cut off; the left part has cells up to distance 4
    let mut engine = engine_for("S..#.\n...#.\n...#E", Connectivity::Four);

    let mut outcomes = Vec::new();
    while !engine.has_ended() {
        outcomes.push(engine.step());
    }

    assert_eq!(outcomes.len(), 5);
    assert_eq!(outcomes.last(), Some(&StepOutcome::Exhausted));
    assert_eq!(engine.cell_value(2, 2).unwrap(), 4);
    assert_eq!(engine.cell_value(2, 4).unwrap(), 0);
}
