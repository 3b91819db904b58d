//! Level generation
//!
//! Rebuilds every collection for a level from the tuning's scaling rules.
//! Positions are drawn from a per-generation [`Pcg32`] so a run replays
//! exactly from its seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GamePhase, GameState, Obstacle, Orb, Player, ShieldPickup};
use crate::tuning::{FailurePolicy, Span, Tuning};

/// `base + floor(level * rate)`
fn scaled_count(base: u32, rate: f64, level: u32) -> u32 {
    base + (level as f64 * rate).floor() as u32
}

/// Number of obstacles on a level (grows with level, capped)
pub fn obstacle_count(tuning: &Tuning, level: u32) -> u32 {
    let o = &tuning.obstacles;
    scaled_count(o.count_base, o.count_per_level, level).min(o.count_cap)
}

/// Number of orbs on a level (grows with level, never below the minimum)
pub fn orb_count(tuning: &Tuning, level: u32) -> u32 {
    let o = &tuning.orbs;
    scaled_count(o.count_base, o.count_per_level, level).max(o.count_min)
}

/// Base per-axis obstacle speed on a level (px/s, before jitter)
pub fn obstacle_speed(tuning: &Tuning, level: u32) -> f32 {
    tuning.obstacles.speed_base + level as f32 * tuning.obstacles.speed_per_level
}

/// First level of the band of ten containing `level` (1, 11, 21, ...)
pub fn checkpoint_level(level: u32) -> u32 {
    (level.max(1) - 1) / 10 * 10 + 1
}

/// Level a failed (or retried) attempt at `level` restarts from
pub fn restart_level(tuning: &Tuning, level: u32) -> u32 {
    match tuning.failure_policy {
        FailurePolicy::RetrySameLevel { .. } => level,
        FailurePolicy::RewindToCheckpoint => checkpoint_level(level),
    }
}

fn sample(rng: &mut Pcg32, span: Span) -> f32 {
    if span.is_fixed() {
        span.min
    } else {
        rng.random_range(span.min..span.max)
    }
}

/// Uniform point keeping `margin` away from every edge
fn random_point(rng: &mut Pcg32, canvas: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        sample(rng, Span::new(margin, canvas.x - margin)),
        sample(rng, Span::new(margin, canvas.y - margin)),
    )
}

fn random_sign(rng: &mut Pcg32) -> f32 {
    if rng.random_bool(0.5) { -1.0 } else { 1.0 }
}

fn make_obstacle(rng: &mut Pcg32, tuning: &Tuning, level: u32) -> Obstacle {
    let o = &tuning.obstacles;
    let size = Vec2::new(sample(rng, o.width), sample(rng, o.height));
    let pos = Vec2::new(
        sample(rng, Span::new(0.0, tuning.canvas.x - size.x)),
        sample(rng, Span::new(0.0, tuning.canvas.y - size.y)),
    );
    let base = obstacle_speed(tuning, level);
    let jitter = Span::new(0.0, o.speed_jitter);
    let vel = Vec2::new(
        random_sign(rng) * (base + sample(rng, jitter)),
        random_sign(rng) * (base + sample(rng, jitter)),
    );
    Obstacle { pos, size, vel }
}

fn make_orb(rng: &mut Pcg32, tuning: &Tuning) -> Orb {
    let margin = tuning.orbs.spawn_margin.max(tuning.orbs.radius);
    Orb {
        pos: random_point(rng, tuning.canvas, margin),
        radius: tuning.orbs.radius,
        collected: false,
    }
}

fn make_shield(rng: &mut Pcg32, tuning: &Tuning) -> ShieldPickup {
    let margin = tuning.shields.spawn_margin.max(tuning.shields.radius);
    ShieldPickup {
        pos: random_point(rng, tuning.canvas, margin),
        radius: tuning.shields.radius,
        active: true,
        respawn_at: 0.0,
    }
}

/// Rebuild the level `level` from scratch and put the game in `Running`
///
/// The player is reset to the start point with no shield and an empty trail;
/// score carries over.
pub fn generate_level(state: &mut GameState, level: u32) {
    let mut rng = state.rng_state.next_rng();
    let tuning = &state.tuning;

    let obstacles: Vec<_> = (0..obstacle_count(tuning, level))
        .map(|_| make_obstacle(&mut rng, tuning, level))
        .collect();
    let orbs: Vec<_> = (0..orb_count(tuning, level))
        .map(|_| make_orb(&mut rng, tuning))
        .collect();
    let shields: Vec<_> = (0..tuning.shields.count)
        .map(|_| make_shield(&mut rng, tuning))
        .collect();

    log::info!(
        "Level {}: {} obstacles, {} orbs, {} shields",
        level,
        obstacles.len(),
        orbs.len(),
        shields.len()
    );

    state.player = Player::from_tuning(&state.tuning);
    state.obstacles = obstacles;
    state.orbs = orbs;
    state.shields = shields;
    state.particles.clear();
    state.level = level;
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::LevelStarted { level });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_dodge_counts() {
        let tuning = Tuning::neon_dodge();
        assert_eq!(obstacle_count(&tuning, 1), 3);
        assert_eq!(obstacle_count(&tuning, 10), 10);
        assert_eq!(obstacle_count(&tuning, 100), 40);
        assert_eq!(orb_count(&tuning, 1), 3);
        assert_eq!(orb_count(&tuning, 5), 5);
        assert_eq!(orb_count(&tuning, 100), 53);
    }

    #[test]
    fn test_patrick_counts() {
        let tuning = Tuning::patrick();
        assert_eq!(obstacle_count(&tuning, 1), 5);
        assert_eq!(obstacle_count(&tuning, 5), 7);
        assert_eq!(obstacle_count(&tuning, 60), 25);
        assert_eq!(orb_count(&tuning, 5), 4);
        assert_eq!(orb_count(&tuning, 6), 5);
    }

    #[test]
    fn test_counts_never_decrease() {
        for tuning in [Tuning::neon_dodge(), Tuning::patrick()] {
            for level in 1..100 {
                assert!(obstacle_count(&tuning, level + 1) >= obstacle_count(&tuning, level));
                assert!(orb_count(&tuning, level + 1) >= orb_count(&tuning, level));
                assert!(obstacle_speed(&tuning, level + 1) > obstacle_speed(&tuning, level));
            }
        }
    }

    #[test]
    fn test_checkpoint_level() {
        assert_eq!(checkpoint_level(1), 1);
        assert_eq!(checkpoint_level(10), 1);
        assert_eq!(checkpoint_level(11), 11);
        assert_eq!(checkpoint_level(23), 21);
        assert_eq!(checkpoint_level(100), 91);
    }

    #[test]
    fn test_restart_level_follows_policy() {
        assert_eq!(restart_level(&Tuning::neon_dodge(), 23), 23);
        assert_eq!(restart_level(&Tuning::patrick(), 23), 21);
    }

    #[test]
    fn test_generate_level_places_everything_on_canvas() {
        for tuning in [Tuning::neon_dodge(), Tuning::patrick()] {
            let canvas = tuning.canvas;
            let mut state = GameState::new(42, tuning);
            generate_level(&mut state, 37);

            assert_eq!(state.level, 37);
            assert_eq!(state.phase, GamePhase::Running);
            assert_eq!(state.shields.len(), 5);
            for o in &state.obstacles {
                assert!(o.pos.x >= 0.0 && o.pos.y >= 0.0);
                assert!(o.max().x <= canvas.x && o.max().y <= canvas.y);
                assert!(o.vel.x.abs() >= obstacle_speed(&state.tuning, 37));
            }
            for orb in &state.orbs {
                assert!(!orb.collected);
                assert!(orb.pos.x >= orb.radius && orb.pos.x <= canvas.x - orb.radius);
                assert!(orb.pos.y >= orb.radius && orb.pos.y <= canvas.y - orb.radius);
            }
            assert!(state.shields.iter().all(|s| s.active));
        }
    }

    #[test]
    fn test_generate_level_resets_player_but_keeps_score() {
        let mut state = GameState::new(1, Tuning::patrick());
        state.score = 9;
        state.player.pos = Vec2::new(300.0, 300.0);
        state.player.raise_shield(0.0, 30.0);
        state.player.record_trail();

        generate_level(&mut state, 4);

        assert_eq!(state.score, 9);
        assert_eq!(state.player.pos, Vec2::new(50.0, 50.0));
        assert!(!state.player.shield_active);
        assert!(state.player.trail.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::LevelStarted { level: 4 }]);
    }

    #[test]
    fn test_same_seed_same_level() {
        let mut a = GameState::new(99, Tuning::neon_dodge());
        let mut b = GameState::new(99, Tuning::neon_dodge());
        generate_level(&mut a, 12);
        generate_level(&mut b, 12);
        let pos_a: Vec<_> = a.obstacles.iter().map(|o| o.pos).collect();
        let pos_b: Vec<_> = b.obstacles.iter().map(|o| o.pos).collect();
        assert_eq!(pos_a, pos_b);
    }
}
