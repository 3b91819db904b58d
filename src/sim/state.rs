//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; there are no globals.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing spawned yet
    Intro,
    /// Active gameplay
    Running,
    /// Game is paused (sim clock frozen)
    Paused,
    /// Hit an obstacle; waiting until `clock` reaches `restart_at`
    Failed { restart_level: u32, restart_at: f64 },
    /// Cleared the final level
    Victory,
}

/// The player's dot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Movement speed (px/s)
    pub speed: f32,
    pub shield_active: bool,
    /// Sim clock time when the shield runs out
    pub shield_expires_at: f64,
    /// Recent positions, oldest first
    #[serde(skip)]
    pub trail: VecDeque<Vec2>,
    #[serde(skip)]
    trail_cap: usize,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, speed: f32, trail_cap: usize) -> Self {
        Self {
            pos,
            radius,
            speed,
            shield_active: false,
            shield_expires_at: 0.0,
            trail: VecDeque::with_capacity(trail_cap + 1),
            trail_cap,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.player_start,
            tuning.player_radius,
            tuning.player_speed,
            tuning.trail_length,
        )
    }

    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > self.trail_cap {
            self.trail.pop_front();
        }
    }

    /// Turn the shield on until `now + duration`
    pub fn raise_shield(&mut self, now: f64, duration: f64) {
        self.shield_active = true;
        self.shield_expires_at = now + duration;
    }

    pub fn drop_shield(&mut self) {
        self.shield_active = false;
        self.shield_expires_at = 0.0;
    }

    /// Seconds of shield left at `now` (0 when unshielded)
    pub fn shield_remaining(&self, now: f64) -> f64 {
        if self.shield_active {
            (self.shield_expires_at - now).max(0.0)
        } else {
            0.0
        }
    }
}

/// A bouncing rectangular hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity (px/s)
    pub vel: Vec2,
}

impl Obstacle {
    /// Move by velocity, then reflect off the canvas edges it crossed
    pub fn step(&mut self, dt: f32, canvas: Vec2) {
        self.pos += self.vel * dt;

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + self.size.x > canvas.x {
            self.pos.x = canvas.x - self.size.x;
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y + self.size.y > canvas.y {
            self.pos.y = canvas.y - self.size.y;
            self.vel.y = -self.vel.y.abs();
        }
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// A collectible objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

/// A shield pickup slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldPickup {
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
    /// Sim clock time when this pickup comes back
    pub respawn_at: f64,
}

/// Particle tints (renderer maps these to palette colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Orb,
    Shield,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    pub max_life: f32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn alpha(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    OrbCollected { pos: Vec2 },
    ShieldPickedUp { pos: Vec2 },
    ShieldRespawned { index: usize },
    ShieldExpired,
    Failed { level: u32, restart_level: u32 },
    LevelCleared { level: u32 },
    Paused,
    Resumed,
    Victory,
    ReturnedToMenu,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next draw sequence (one per level generation)
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::seed_from_u64(
            self.seed
                .wrapping_add(self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        );
        self.stream += 1;
        rng
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    /// Orbs collected over the whole run
    pub score: u64,
    pub phase: GamePhase,
    /// Simulated seconds of play (frozen on the intro, pause and victory screens)
    pub clock: f64,
    pub time_ticks: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub orbs: Vec<Orb>,
    pub shields: Vec<ShieldPickup>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game sitting on the intro screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::from_tuning(&tuning);
        Self {
            seed,
            rng_state: RngState::new(seed),
            tuning,
            level: 1,
            score: 0,
            phase: GamePhase::Intro,
            clock: 0.0,
            time_ticks: 0,
            player,
            obstacles: Vec::new(),
            orbs: Vec::new(),
            shields: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn orbs_collected(&self) -> usize {
        self.orbs.iter().filter(|o| o.collected).count()
    }

    pub fn all_orbs_collected(&self) -> bool {
        self.orbs.iter().all(|o| o.collected)
    }

    pub fn shields_available(&self) -> usize {
        self.shields.iter().filter(|s| s.active).count()
    }

    /// Push a particle unless the cap is reached
    pub fn spawn_particle(&mut self, particle: Particle) {
        if self.particles.len() < self.tuning.max_particles {
            self.particles.push(particle);
        }
    }

    /// Drop every spawned entity (back to the menu)
    pub fn clear_entities(&mut self) {
        self.player = Player::from_tuning(&self.tuning);
        self.obstacles.clear();
        self.orbs.clear();
        self.shields.clear();
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_evicts_oldest() {
        let mut player = Player::new(Vec2::ZERO, 10.0, 100.0, 3);
        for i in 0..5 {
            player.pos = Vec2::new(i as f32, 0.0);
            player.record_trail();
        }
        assert_eq!(player.trail.len(), 3);
        assert_eq!(player.trail.front(), Some(&Vec2::new(2.0, 0.0)));
        assert_eq!(player.trail.back(), Some(&Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn test_obstacle_bounces_off_right_and_bottom() {
        let canvas = Vec2::new(100.0, 100.0);
        let mut obstacle = Obstacle {
            pos: Vec2::new(85.0, 90.0),
            size: Vec2::new(10.0, 5.0),
            vel: Vec2::new(60.0, 60.0),
        };
        obstacle.step(0.25, canvas);
        assert_eq!(obstacle.pos, Vec2::new(90.0, 95.0));
        assert!(obstacle.vel.x < 0.0);
        assert!(obstacle.vel.y < 0.0);
        assert!(obstacle.max().x <= canvas.x && obstacle.max().y <= canvas.y);
    }

    #[test]
    fn test_obstacle_bounces_off_left_and_top() {
        let canvas = Vec2::new(100.0, 100.0);
        let mut obstacle = Obstacle {
            pos: Vec2::new(2.0, 1.0),
            size: Vec2::new(10.0, 5.0),
            vel: Vec2::new(-40.0, -40.0),
        };
        obstacle.step(0.25, canvas);
        assert_eq!(obstacle.pos, Vec2::ZERO);
        assert_eq!(obstacle.vel, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_shield_remaining() {
        let mut player = Player::new(Vec2::ZERO, 10.0, 100.0, 3);
        assert_eq!(player.shield_remaining(5.0), 0.0);
        player.raise_shield(5.0, 30.0);
        assert_eq!(player.shield_remaining(20.0), 15.0);
        player.drop_shield();
        assert_eq!(player.shield_remaining(20.0), 0.0);
    }

    #[test]
    fn test_rng_streams_differ_but_replay() {
        use rand::Rng;

        let mut a = RngState::new(7);
        let mut b = RngState::new(7);
        let first: u32 = a.next_rng().random();
        let second: u32 = a.next_rng().random();
        assert_eq!(first, b.next_rng().random::<u32>());
        assert_ne!(first, second);
    }
}
