#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::agent::Agent;
use flappy_evo::simulation::ground::Ground;
use flappy_evo::simulation::motion::Advance;
use flappy_evo::simulation::obstacle::Obstacle;

#[test]
fn test_free_fall_displacement() {
    assert_eq!(Agent::displacement(0.0, 1), 1.5);
    assert_eq!(Agent::displacement(0.0, 2), 6.0);
    assert_eq!(Agent::displacement(0.0, 3), 13.5);
    // terminal velocity
    assert_eq!(Agent::displacement(0.0, 4), 16.0);
    assert_eq!(Agent::displacement(0.0, 40), 16.0);
}

#[test]
fn test_jump_displacement_gets_rise_boost() {
    assert_eq!(Agent::displacement(Agent::JUMP_VELOCITY, 1), -11.0);
    assert_eq!(Agent::displacement(Agent::JUMP_VELOCITY, 2), -17.0);
    // apex: zero displacement is not boosted
    assert_eq!(Agent::displacement(Agent::JUMP_VELOCITY, 7), 0.0);
}

#[test]
fn test_agent_falls_and_tilts() {
    let mut agent = Agent::new(0, 230.0, 350.0);
    for _ in 0..22 {
        agent.advance();
    }
    assert_eq!(agent.y, 675.0);
    assert_eq!(agent.tick_count, 22);
    assert!(agent.tilt <= Agent::MIN_TILT);

    agent.advance();
    assert_eq!(agent.y, 691.0);
    assert!(agent.bottom() >= 730.0);
}

#[test]
fn test_jump_resets_arc() {
    let mut agent = Agent::new(0, 230.0, 350.0);
    agent.advance();
    agent.advance();
    agent.jump();
    assert_eq!(agent.velocity, Agent::JUMP_VELOCITY);
    assert_eq!(agent.tick_count, 0);
    assert_eq!(agent.launch_y, 357.5);

    agent.advance();
    assert_eq!(agent.y, 346.5);
    assert_eq!(agent.tilt, Agent::MAX_TILT);
}

#[test]
fn test_obstacle_scrolls_left() {
    let mut obstacle = Obstacle::with_gap(600.0, 200, 300);
    obstacle.advance();
    assert_eq!(obstacle.x, 595.0);

    let mut leaving = Obstacle::with_gap(-104.0, 200, 300);
    assert!(!leaving.is_off_field());
    leaving.advance();
    assert!(leaving.is_off_field());

    assert!(!obstacle.is_behind(obstacle.x + Obstacle::WIDTH));
    assert!(obstacle.is_behind(obstacle.x + Obstacle::WIDTH + 1.0));
}

#[test]
fn test_ground_tiles_leapfrog() {
    let mut ground = Ground::new(730.0);
    for _ in 0..134 {
        ground.advance();
    }
    assert_eq!(ground.x1, -670.0);
    assert_eq!(ground.x2, 2.0);

    ground.advance();
    assert_eq!(ground.x1, 669.0);
    assert_eq!(ground.x2, -3.0);
    assert_eq!(ground.y, 730.0);
}
