//! The agent population: positions, headings and colors as flat arrays.
//!
//! Agents are deliberately stored structure-of-arrays and updated with bulk
//! passes over the contiguous arrays rather than as per-agent objects; at
//! 10^5 agents this is what keeps the tick affordable. Every sub-step is
//! order-independent across agents except deposit, which stays a sequential
//! loop so cell collisions resolve last-write-wins under ascending agent
//! index.
//!
//! All randomness is drawn from the world's master RNG into per-agent
//! buffers *before* any parallel pass, so thread scheduling can never
//! perturb the random stream and runs stay reproducible for a fixed seed.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::boundary;
use crate::config::{ColorMode, ScoringPolicy, SenseConfig, SpawnMode, WorldConfig};
use crate::field::TrailField;

/// Sensing and turning constants, converted to radians once at startup.
#[derive(Debug, Clone, Copy)]
pub struct SenseParams {
    pub sense_distance: f32,
    pub sense_angle: f32,
    pub turn_angle: f32,
    pub turn_jitter: f32,
    pub scoring: ScoringPolicy,
}

impl SenseParams {
    #[must_use]
    pub fn from_config(config: &SenseConfig) -> Self {
        Self {
            sense_distance: config.sense_distance,
            sense_angle: config.sense_angle_deg.to_radians(),
            turn_angle: config.turn_angle_deg.to_radians(),
            turn_jitter: config.turn_jitter_deg.to_radians(),
            scoring: config.scoring,
        }
    }
}

pub struct AgentPopulation {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
    /// Heading in radians, unbounded; wraps naturally through sin/cos.
    pub headings: Vec<f32>,
    pub colors: Vec<[f32; 3]>,
    jitter: Vec<f32>,
}

fn uniform_coord(rng: &mut ChaCha8Rng, max: f32) -> f32 {
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}

impl AgentPopulation {
    /// Spawns the population per the configured placement and color modes.
    ///
    /// Draw order is fixed (positions, then headings, then colors) so a
    /// given seed always produces the same population.
    #[must_use]
    pub fn spawn(config: &WorldConfig, rng: &mut ChaCha8Rng) -> Self {
        let n = config.agents;
        let max_x = (config.width - 1) as f32;
        let max_y = (config.height - 1) as f32;
        let center = (config.width as f32 / 2.0, config.height as f32 / 2.0);

        let mut xs = Vec::with_capacity(n);
        let mut ys = Vec::with_capacity(n);
        for _ in 0..n {
            let (x, y) = match config.spawn {
                SpawnMode::Uniform => {
                    (uniform_coord(rng, max_x), uniform_coord(rng, max_y))
                }
                SpawnMode::CenterSquare => {
                    let third = (config.width as f32 / 3.0, config.height as f32 / 3.0);
                    (
                        third.0 + uniform_coord(rng, third.0),
                        third.1 + uniform_coord(rng, third.1),
                    )
                }
                SpawnMode::CenterPoint => center,
                SpawnMode::Ring { radius } => {
                    let t = rng.gen_range(0.0..std::f32::consts::TAU);
                    (center.0 + t.sin() * radius, center.1 + t.cos() * radius)
                }
            };
            xs.push(boundary::clip(x, max_x));
            ys.push(boundary::clip(y, max_y));
        }

        let mut headings = Vec::with_capacity(n);
        for _ in 0..n {
            headings.push(rng.gen_range(0.0..std::f32::consts::TAU));
        }

        let mut colors = Vec::with_capacity(n);
        for _ in 0..n {
            let color = match &config.colors {
                ColorMode::Uniform { color } => *color,
                ColorMode::Rainbow => [
                    rng.gen_range(76.5..255.0),
                    rng.gen_range(76.5..255.0),
                    rng.gen_range(76.5..255.0),
                ],
                ColorMode::Palette { colors } => colors[rng.gen_range(0..colors.len())],
            };
            colors.push(color);
        }

        Self {
            xs,
            ys,
            headings,
            colors,
            jitter: vec![0.0; n],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Moves every agent one step along its heading, bouncing off the grid
    /// edges.
    ///
    /// The bounce is reflective and per-axis: a movement component whose
    /// tentative position leaves the grid is negated, the heading is
    /// recomputed from the flipped direction, and the position is clipped
    /// back into bounds. The position update itself uses the pre-flip
    /// direction.
    pub fn advance(&mut self, max_x: f32, max_y: f32) {
        self.xs
            .par_iter_mut()
            .zip_eq(self.ys.par_iter_mut())
            .zip_eq(self.headings.par_iter_mut())
            .for_each(|((x, y), heading)| {
                let dx = heading.sin();
                let dy = heading.cos();
                let nx = *x + dx;
                let ny = *y + dy;
                let (dx, flipped_x) = boundary::reflect(nx, dx, max_x);
                let (dy, flipped_y) = boundary::reflect(ny, dy, max_y);
                if flipped_x || flipped_y {
                    *heading = dx.atan2(dy);
                }
                *x = boundary::clip(nx, max_x);
                *y = boundary::clip(ny, max_y);
            });
    }

    /// Writes every agent's color over the field cell under it.
    ///
    /// Positions are truncated toward zero for cell addressing (they are
    /// non-negative after clipping, so truncation and floor coincide).
    /// Sequential on purpose: collisions must resolve in agent order.
    pub fn deposit(&self, field: &mut TrailField) {
        for i in 0..self.len() {
            field.deposit(self.xs[i] as usize, self.ys[i] as usize, self.colors[i]);
        }
    }

    /// Samples the field ahead of every agent and turns toward the best
    /// reading, then jitters every heading.
    ///
    /// Each agent reads the same immutable field snapshot and its own
    /// pre-turn heading, so the pass is order-independent and runs in
    /// parallel. The jitter buffer is filled from the master RNG up front.
    pub fn sense_and_turn(
        &mut self,
        field: &TrailField,
        params: &SenseParams,
        rng: &mut ChaCha8Rng,
    ) {
        if params.turn_jitter > 0.0 {
            for j in self.jitter.iter_mut() {
                *j = rng.gen_range(-params.turn_jitter..params.turn_jitter);
            }
        } else {
            self.jitter.fill(0.0);
        }

        let max_x = (field.width - 1) as f32;
        let max_y = (field.height - 1) as f32;
        let xs = &self.xs;
        let ys = &self.ys;
        let colors = &self.colors;
        let jitter = &self.jitter;

        self.headings
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, heading)| {
                let h = *heading;
                let sense = |offset: f32| -> f32 {
                    let dir = h + offset;
                    let sx = boundary::clip(xs[i] + dir.sin() * params.sense_distance, max_x);
                    let sy = boundary::clip(ys[i] + dir.cos() * params.sense_distance, max_y);
                    let cell = field.sample(sx as usize, sy as usize);
                    params.scoring.score(cell, colors[i])
                };
                let left = sense(-params.sense_angle);
                let straight = sense(0.0);
                let right = sense(params.sense_angle);

                // Side sensors win only on a strict lead over the opposite
                // side; a left/straight tie goes straight, a straight/right
                // tie goes right, a three-way tie goes straight.
                let turn = if right > left && right >= straight {
                    params.turn_angle
                } else if left > straight && left > right {
                    -params.turn_angle
                } else {
                    0.0
                };
                *heading = h + turn + jitter[i];
            });
    }
}
