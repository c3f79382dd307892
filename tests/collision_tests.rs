#![allow(missing_docs)]

use flappy_evo::simulation::agent::Agent;
use flappy_evo::simulation::gaps::{GapSampler, ScriptedGaps, SeededGaps};
use flappy_evo::simulation::mask::{BIRD_MASK, Mask, PIPE_MASK};
use flappy_evo::simulation::obstacle::Obstacle;

#[test]
fn test_mask_shapes() {
    assert_eq!(BIRD_MASK.width(), 68);
    assert_eq!(BIRD_MASK.height(), 48);
    assert_eq!(PIPE_MASK.count(), 104 * 640);

    // the ellipse leaves the corners empty but covers the centre
    assert!(!BIRD_MASK.get(0, 0));
    assert!(!BIRD_MASK.get(67, 47));
    assert!(BIRD_MASK.get(34, 24));
    assert!(BIRD_MASK.count() < 68 * 48);
    assert!(!BIRD_MASK.get(-1, 10));
    assert!(!BIRD_MASK.get(10, 48));
}

#[test]
fn test_overlap_point_from_rows() {
    let a = Mask::from_rows(&["##..", "#...", "...."]);
    let b = Mask::from_rows(&["#", "#"]);

    assert_eq!(a.overlap_point(&b, (0, 0)), Some((0, 0)));
    assert_eq!(a.overlap_point(&b, (1, 0)), Some((1, 0)));
    assert_eq!(a.overlap_point(&b, (1, 1)), None);
    assert_eq!(a.overlap_point(&b, (0, 2)), None);
    assert_eq!(a.overlap_point(&b, (5, 0)), None);
    assert_eq!(a.overlap_point(&b, (0, -1)), Some((0, 0)));
}

#[test]
fn test_overlap_is_symmetric() {
    for dx in (-110..=75).step_by(7) {
        for dy in (-650..=60).step_by(13) {
            assert_eq!(
                BIRD_MASK.overlap(&PIPE_MASK, (dx, dy)),
                PIPE_MASK.overlap(&BIRD_MASK, (-dx, -dy)),
                "bird/pipe offset ({dx}, {dy})"
            );
        }
    }
    for dx in -70..=70 {
        for dy in (-50..=50).step_by(5) {
            assert_eq!(
                BIRD_MASK.overlap(&BIRD_MASK, (dx, dy)),
                BIRD_MASK.overlap(&BIRD_MASK, (-dx, -dy)),
                "bird/bird offset ({dx}, {dy})"
            );
        }
    }
}

#[test]
fn test_bottom_barrier_touch_is_one_unit() {
    let obstacle = Obstacle::with_gap(230.0, 200, 350);
    assert_eq!(obstacle.gap_bottom, 550);

    let resting = Agent::new(0, 230.0, 502.0);
    assert!(!obstacle.collides_with(&resting));

    let sinking = Agent::new(0, 230.0, 503.0);
    assert!(obstacle.collides_with(&sinking));
}

#[test]
fn test_top_barrier_touch_is_one_unit() {
    let obstacle = Obstacle::with_gap(230.0, 200, 350);

    let grazing = Agent::new(0, 230.0, 350.0);
    assert!(!obstacle.collides_with(&grazing));

    let rising = Agent::new(0, 230.0, 349.0);
    assert!(obstacle.collides_with(&rising));
}

#[test]
fn test_corner_bounding_box_overlap_is_not_collision() {
    // pipe origin at the bird's lower right corner: boxes share a 2x2 block
    assert!(!BIRD_MASK.overlap(&PIPE_MASK, (66, 46)));

    let obstacle = Obstacle::with_gap(296.0, 200, 350);
    let agent = Agent::new(0, 230.0, 504.0);
    assert!(!obstacle.collides_with(&agent));
}

#[test]
fn test_agent_inside_gap_is_safe() {
    let obstacle = Obstacle::with_gap(230.0, 200, 350);
    for y in [350.0, 400.0, 450.0, 502.0] {
        assert!(!obstacle.collides_with(&Agent::new(0, 230.0, y)));
    }
}

#[test]
fn test_gap_invariant_for_sampled_heights() {
    let mut gaps = SeededGaps::new(7);
    for _ in 0..1_000 {
        let obstacle = Obstacle::new(600.0, 200, 50..450, &mut gaps);
        assert!((50..450).contains(&obstacle.gap_top));
        assert_eq!(obstacle.gap_top + 200, obstacle.gap_bottom);
        assert_eq!(obstacle.top, obstacle.gap_top - 640);
        assert!(!obstacle.passed);
    }
}

#[test]
fn test_seeded_gaps_are_reproducible() {
    let mut a = SeededGaps::new(42);
    let mut b = SeededGaps::new(42);
    let first: Vec<i32> = (0..50).map(|_| a.sample(50..450)).collect();
    let second: Vec<i32> = (0..50).map(|_| b.sample(50..450)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_scripted_gaps_clamp_and_cycle() {
    let mut gaps = ScriptedGaps::new(vec![10, 500, 300]);
    let drawn: Vec<i32> = (0..4).map(|_| gaps.sample(50..450)).collect();
    assert_eq!(drawn, vec![50, 449, 300, 50]);

    let mut empty = ScriptedGaps::new(Vec::new());
    assert_eq!(empty.sample(50..450), 50);
}
