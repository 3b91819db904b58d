//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one timestep. Rendering
//! and audio never happen here; the step only mutates [`GameState`] and
//! queues [`GameEvent`]s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_rect_overlap, circles_overlap, confine_circle};
use super::level::{generate_level, restart_level};
use super::state::{GameEvent, GamePhase, GameState, Particle, ParticleColor};
use crate::tuning::FailurePolicy;

/// Particles per orb collected
const ORB_BURST: u32 = 12;
/// Particles per shield picked up
const SHIELD_BURST: u32 = 14;
/// Particle lifetime (30 frames at 60 Hz)
const PARTICLE_LIFE: f32 = 0.5;
/// Max particle speed per axis (2 px/frame at 60 Hz)
const PARTICLE_SPEED: f32 = 120.0;

/// Directional input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Each component in {-1, 0, 1}; +x is right, +y is down
    pub direction: Vec2,
}

impl TickInput {
    pub fn new(direction: Vec2) -> Self {
        Self { direction }
    }
}

/// Advance the game state by `dt` seconds
pub fn advance(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Intro | GamePhase::Paused | GamePhase::Victory => return,
        GamePhase::Failed {
            restart_level,
            restart_at,
        } => {
            // Deadline on the f64 clock; an f32 countdown drifts a whole tick at 60 Hz
            state.clock += dt as f64;
            age_particles(state, dt);
            if state.clock >= restart_at {
                generate_level(state, restart_level);
            }
            return;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;
    state.clock += dt as f64;
    let now = state.clock;

    move_player(state, input, dt);

    let canvas = state.tuning.canvas;
    for obstacle in &mut state.obstacles {
        obstacle.step(dt, canvas);
    }

    pick_up_shields(state, now);
    respawn_shields(state, now);

    if state.player.shield_active && now >= state.player.shield_expires_at {
        state.player.drop_shield();
        state.events.push(GameEvent::ShieldExpired);
        log::debug!("Shield expired at {:.2}s", now);
    }

    collect_orbs(state);

    if hit_obstacle(state) {
        fail(state);
        return;
    }

    if state.all_orbs_collected() {
        clear_level(state);
        return;
    }

    age_particles(state, dt);
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut dir = input.direction.clamp(Vec2::NEG_ONE, Vec2::ONE);
    if state.tuning.normalize_diagonal && dir.x != 0.0 && dir.y != 0.0 {
        dir *= std::f32::consts::FRAC_1_SQRT_2;
    }

    let player = &mut state.player;
    player.pos = confine_circle(
        player.pos + dir * player.speed * dt,
        player.radius,
        state.tuning.canvas,
    );
    player.record_trail();
}

fn pick_up_shields(state: &mut GameState, now: f64) {
    let (center, radius) = (state.player.pos, state.player.radius);
    let respawn = state.tuning.shields.respawn_secs;

    let mut picked = Vec::new();
    for shield in state.shields.iter_mut().filter(|s| s.active) {
        if circles_overlap(center, radius, shield.pos, shield.radius) {
            shield.active = false;
            shield.respawn_at = now + respawn;
            picked.push(shield.pos);
        }
    }

    for (i, pos) in picked.into_iter().enumerate() {
        let duration = state.tuning.shields.duration_secs;
        state.player.raise_shield(now, duration);
        state.events.push(GameEvent::ShieldPickedUp { pos });
        burst(state, pos, SHIELD_BURST, ParticleColor::Shield, 31 + i as u32);
        log::debug!("Shield picked up, active until {:.2}s", now + duration);
    }
}

fn respawn_shields(state: &mut GameState, now: f64) {
    for (index, shield) in state.shields.iter_mut().enumerate() {
        if !shield.active && now >= shield.respawn_at {
            shield.active = true;
            shield.respawn_at = 0.0;
            state.events.push(GameEvent::ShieldRespawned { index });
        }
    }
}

fn collect_orbs(state: &mut GameState) {
    let (center, radius) = (state.player.pos, state.player.radius);

    let mut collected = Vec::new();
    for orb in state.orbs.iter_mut().filter(|o| !o.collected) {
        if circles_overlap(center, radius, orb.pos, orb.radius) {
            orb.collected = true;
            collected.push(orb.pos);
        }
    }

    for (i, pos) in collected.into_iter().enumerate() {
        state.score += 1;
        state.events.push(GameEvent::OrbCollected { pos });
        burst(state, pos, ORB_BURST, ParticleColor::Orb, 7 + i as u32);
    }
}

fn hit_obstacle(state: &GameState) -> bool {
    if state.player.shield_active {
        return false;
    }
    let (center, radius) = (state.player.pos, state.player.radius);
    state
        .obstacles
        .iter()
        .any(|o| circle_rect_overlap(center, radius, o.pos, o.size))
}

fn fail(state: &mut GameState) {
    let level = state.level;
    let target = restart_level(&state.tuning, level);
    state.events.push(GameEvent::Failed {
        level,
        restart_level: target,
    });
    log::info!("Failed level {} -> restarting at {}", level, target);

    match state.tuning.failure_policy {
        FailurePolicy::RetrySameLevel { delay_secs } => {
            state.phase = GamePhase::Failed {
                restart_level: target,
                restart_at: state.clock + delay_secs,
            };
        }
        FailurePolicy::RewindToCheckpoint => generate_level(state, target),
    }
}

fn clear_level(state: &mut GameState) {
    let cleared = state.level;
    state.events.push(GameEvent::LevelCleared { level: cleared });

    if cleared >= state.tuning.max_level {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::Victory);
        log::info!("Victory! Cleared all {} levels, score {}", cleared, state.score);
    } else {
        generate_level(state, cleared + 1);
    }
}

/// Spray `count` particles from `pos` using a tick-seeded hash
fn burst(state: &mut GameState, pos: Vec2, count: u32, color: ParticleColor, salt: u32) {
    for i in 0..count {
        let hash = (state.time_ticks as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(salt.wrapping_mul(7919))
            .wrapping_add(i * 104729)
            .wrapping_mul(2246822519);
        let rand1 = (hash % 1000) as f32 / 1000.0;
        let rand2 = ((hash >> 10) % 1000) as f32 / 1000.0;

        let vel = Vec2::new(rand1 * 2.0 - 1.0, rand2 * 2.0 - 1.0) * PARTICLE_SPEED;
        state.spawn_particle(Particle {
            pos,
            vel,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            color,
        });
    }
}

fn age_particles(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::command::{Command, apply_command};
    use crate::consts::SIM_DT;
    use crate::sim::state::{Obstacle, Orb, ShieldPickup};
    use crate::tuning::Tuning;

    const DT: f32 = 0.25;

    /// Running game with nothing spawned except what the test adds
    fn empty_level(tuning: Tuning, level: u32) -> GameState {
        let mut state = GameState::new(12345, tuning);
        generate_level(&mut state, level);
        state.obstacles.clear();
        state.orbs.clear();
        state.shields.clear();
        state.drain_events();
        state
    }

    fn orb_at(pos: Vec2) -> Orb {
        Orb {
            pos,
            radius: 8.0,
            collected: false,
        }
    }

    fn far_orb() -> Orb {
        orb_at(Vec2::new(700.0, 500.0))
    }

    fn shield_at(pos: Vec2) -> ShieldPickup {
        ShieldPickup {
            pos,
            radius: 10.0,
            active: true,
            respawn_at: 0.0,
        }
    }

    /// Obstacle parked on top of the player, not moving
    fn obstacle_on_player(state: &GameState) -> Obstacle {
        Obstacle {
            pos: state.player.pos - Vec2::splat(5.0),
            size: Vec2::splat(10.0),
            vel: Vec2::ZERO,
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_intro_and_paused_do_not_tick() {
        let mut state = GameState::new(1, Tuning::neon_dodge());
        advance(&mut state, &idle(), DT);
        assert_eq!(state.time_ticks, 0);

        apply_command(&mut state, Command::Start);
        apply_command(&mut state, Command::Pause);
        let before = state.player.pos;
        advance(&mut state, &TickInput::new(Vec2::X), DT);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.clock, 0.0);
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn test_player_moves_and_records_trail() {
        let mut state = empty_level(Tuning::patrick(), 1);
        state.orbs.push(far_orb());
        advance(&mut state, &TickInput::new(Vec2::X), DT);
        // 180 px/s * 0.25 s
        assert_eq!(state.player.pos, Vec2::new(95.0, 50.0));
        assert_eq!(state.player.trail.back(), Some(&Vec2::new(95.0, 50.0)));
    }

    #[test]
    fn test_diagonal_normalization_is_configurable() {
        let mut state = empty_level(Tuning::neon_dodge(), 1);
        state.orbs.push(orb_at(Vec2::new(1300.0, 700.0)));
        let start = state.player.pos;
        advance(&mut state, &TickInput::new(Vec2::ONE), DT);
        let moved = state.player.pos - start;
        assert!((moved.length() - 270.0 * DT).abs() < 0.01);

        let mut state = empty_level(Tuning::patrick(), 1);
        state.orbs.push(far_orb());
        let start = state.player.pos;
        advance(&mut state, &TickInput::new(Vec2::ONE), DT);
        assert_eq!(state.player.pos - start, Vec2::splat(180.0 * DT));
    }

    #[test]
    fn test_player_clamped_to_canvas() {
        let mut state = empty_level(Tuning::patrick(), 1);
        state.orbs.push(far_orb());
        for _ in 0..10 {
            advance(&mut state, &TickInput::new(Vec2::NEG_ONE), DT);
        }
        assert_eq!(state.player.pos, Vec2::splat(12.0));
    }

    #[test]
    fn test_trail_capped() {
        let mut state = empty_level(Tuning::patrick(), 1);
        state.orbs.push(far_orb());
        for _ in 0..40 {
            advance(&mut state, &idle(), DT);
        }
        assert_eq!(state.player.trail.len(), 15);
    }

    #[test]
    fn test_orb_collection_is_idempotent() {
        let mut state = empty_level(Tuning::patrick(), 1);
        let on_player = state.player.pos;
        state.orbs.push(orb_at(on_player));
        state.orbs.push(far_orb());

        advance(&mut state, &idle(), DT);
        assert_eq!(state.score, 1);
        assert!(state.orbs[0].collected);

        advance(&mut state, &idle(), DT);
        advance(&mut state, &idle(), DT);
        assert_eq!(state.score, 1);
        let collected = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::OrbCollected { .. }))
            .count();
        assert_eq!(collected, 1);
    }

    #[test]
    fn test_shield_lasts_exactly_thirty_seconds() {
        let mut state = empty_level(Tuning::neon_dodge(), 1);
        state.orbs.push(orb_at(Vec2::new(1300.0, 700.0)));
        state.shields.push(shield_at(state.player.pos));

        advance(&mut state, &idle(), DT);
        let picked_at = state.clock;
        assert!(state.player.shield_active);
        assert!(!state.shields[0].active);
        assert_eq!(state.player.shield_expires_at, picked_at + 30.0);

        // Move off the pickup so it cannot be grabbed again
        while state.clock < picked_at + 30.0 - DT as f64 {
            advance(&mut state, &TickInput::new(Vec2::X), DT);
            assert!(state.player.shield_active, "dropped early at {}", state.clock);
        }
        advance(&mut state, &idle(), DT);
        assert_eq!(state.clock, picked_at + 30.0);
        assert!(!state.player.shield_active);
    }

    #[test]
    fn test_shield_pickup_respawns_after_sixty_seconds() {
        let mut state = empty_level(Tuning::neon_dodge(), 1);
        state.orbs.push(orb_at(Vec2::new(1300.0, 700.0)));
        state.shields.push(shield_at(state.player.pos));

        advance(&mut state, &idle(), DT);
        let picked_at = state.clock;
        // Walk away so the respawned pickup is not immediately consumed
        for _ in 0..8 {
            advance(&mut state, &TickInput::new(Vec2::X), DT);
        }
        while state.clock < picked_at + 60.0 - DT as f64 {
            advance(&mut state, &idle(), DT);
            assert!(!state.shields[0].active, "back early at {}", state.clock);
        }
        advance(&mut state, &idle(), DT);
        assert_eq!(state.clock, picked_at + 60.0);
        assert!(state.shields[0].active);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ShieldRespawned { index: 0 })
        );
    }

    #[test]
    fn test_shield_blocks_failure() {
        let mut state = empty_level(Tuning::neon_dodge(), 3);
        state.orbs.push(orb_at(Vec2::new(1300.0, 700.0)));
        state.player.raise_shield(0.0, 30.0);
        let hazard = obstacle_on_player(&state);
        state.obstacles.push(hazard);

        advance(&mut state, &idle(), DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Failed { .. }))
        );
    }

    #[test]
    fn test_retry_same_level_after_delay() {
        let mut state = empty_level(Tuning::neon_dodge(), 23);
        state.orbs.push(orb_at(Vec2::new(1300.0, 700.0)));
        let hazard = obstacle_on_player(&state);
        state.obstacles.push(hazard);

        advance(&mut state, &idle(), DT);
        assert_eq!(
            state.phase,
            GamePhase::Failed {
                restart_level: 23,
                restart_at: 0.25 + 0.9
            }
        );
        assert!(state.drain_events().contains(&GameEvent::Failed {
            level: 23,
            restart_level: 23
        }));

        // 0.9 s at 0.25 s per tick: still waiting after three ticks
        for _ in 0..3 {
            advance(&mut state, &idle(), DT);
            assert!(matches!(state.phase, GamePhase::Failed { .. }));
        }
        advance(&mut state, &idle(), DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 23);
        assert_eq!(state.orbs.len(), 14);
        assert!(state.orbs.iter().all(|o| !o.collected));
    }

    #[test]
    fn test_retry_delay_is_exact_at_sim_rate() {
        let mut state = empty_level(Tuning::neon_dodge(), 23);
        state.orbs.push(orb_at(Vec2::new(1300.0, 700.0)));
        let hazard = obstacle_on_player(&state);
        state.obstacles.push(hazard);

        advance(&mut state, &idle(), SIM_DT);
        assert!(matches!(state.phase, GamePhase::Failed { .. }));

        let mut ticks = 0;
        while matches!(state.phase, GamePhase::Failed { .. }) {
            advance(&mut state, &idle(), SIM_DT);
            ticks += 1;
            assert!(ticks <= 60, "restart never happened");
        }
        // 0.9 s at 60 Hz
        assert_eq!(ticks, 54);
        assert_eq!(state.level, 23);
    }

    #[test]
    fn test_pause_does_not_cancel_pending_restart() {
        let mut state = empty_level(Tuning::neon_dodge(), 2);
        state.orbs.push(orb_at(Vec2::new(1300.0, 700.0)));
        let hazard = obstacle_on_player(&state);
        state.obstacles.push(hazard);
        advance(&mut state, &idle(), DT);

        assert!(!apply_command(&mut state, Command::Pause));
        for _ in 0..4 {
            advance(&mut state, &idle(), DT);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_rewind_to_checkpoint_immediately() {
        let mut state = empty_level(Tuning::patrick(), 23);
        state.orbs.push(far_orb());
        let hazard = obstacle_on_player(&state);
        state.obstacles.push(hazard);

        advance(&mut state, &idle(), DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 21);
        let events = state.drain_events();
        assert_eq!(
            events[0],
            GameEvent::Failed {
                level: 23,
                restart_level: 21
            }
        );
        assert_eq!(events[1], GameEvent::LevelStarted { level: 21 });
    }

    #[test]
    fn test_clearing_level_five() {
        let mut state = empty_level(Tuning::patrick(), 5);
        // Score is cumulative over a run; zero it so this checks one level's collection
        state.score = 0;
        let start = state.player.pos;
        for i in 0..4 {
            state.orbs.push(orb_at(start + Vec2::new(45.0 * (i + 1) as f32, 0.0)));
        }

        // 180 px/s * 0.25 = 45 px per tick, one orb per tick
        for _ in 0..3 {
            advance(&mut state, &TickInput::new(Vec2::X), DT);
            assert_eq!(state.level, 5);
        }
        advance(&mut state, &TickInput::new(Vec2::X), DT);

        assert_eq!(state.score, 4);
        assert_eq!(state.level, 6);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.orbs.len(), 5);
        assert_eq!(state.shields.len(), 5);
        assert_eq!(state.player.pos, start);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LevelCleared { level: 5 }));
        assert!(events.contains(&GameEvent::LevelStarted { level: 6 }));
    }

    #[test]
    fn test_failure_wins_over_level_clear() {
        let mut state = empty_level(Tuning::patrick(), 4);
        state.orbs.push(orb_at(state.player.pos));
        let hazard = obstacle_on_player(&state);
        state.obstacles.push(hazard);

        advance(&mut state, &idle(), DT);
        assert_eq!(state.level, 1);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelCleared { .. }))
        );
    }

    #[test]
    fn test_victory_after_level_hundred() {
        let mut state = empty_level(Tuning::neon_dodge(), 100);
        state.orbs.push(orb_at(state.player.pos));

        advance(&mut state, &idle(), DT);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.level, 100);
        assert!(state.drain_events().contains(&GameEvent::Victory));

        // Terminal: nothing moves any more
        let ticks = state.time_ticks;
        let pos = state.player.pos;
        advance(&mut state, &TickInput::new(Vec2::X), DT);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = empty_level(Tuning::patrick(), 1);
        state.orbs.push(orb_at(state.player.pos));
        state.orbs.push(far_orb());
        advance(&mut state, &idle(), DT);
        assert_eq!(state.particles.len(), ORB_BURST as usize);
        advance(&mut state, &idle(), DT);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::neon_dodge());
        let mut state2 = GameState::new(99999, Tuning::neon_dodge());
        apply_command(&mut state1, Command::Start);
        apply_command(&mut state2, Command::Start);

        let inputs = [
            TickInput::new(Vec2::X),
            TickInput::new(Vec2::ONE),
            TickInput::new(Vec2::Y),
            TickInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                advance(&mut state1, input, 1.0 / 60.0);
                advance(&mut state2, input, 1.0 / 60.0);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.level, state2.level);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.phase, state2.phase);
    }
}
