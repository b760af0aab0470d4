//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to the `config.toml`
//! file. All simulation parameters can be customized through this
//! configuration system.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults; sections may be partial)
//! 3. Command-line flags (applied by the runner)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1400
//! height = 1400
//! agents = 150000
//! seed = 42
//!
//! [trail]
//! decay_factor = 0.99
//! kernel_len = 21
//! kernel_spread = 20.0
//!
//! [sense]
//! sense_distance = 7.0
//! sense_angle_deg = 30.0
//! turn_angle_deg = 10.0
//! turn_jitter_deg = 10.0
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Initial spatial distribution of the agent population.
///
/// A configuration-time choice, fixed for the run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SpawnMode {
    /// Uniform random over the whole grid.
    Uniform,
    /// Uniform random inside the central third of the grid.
    CenterSquare,
    /// Every agent starts at the grid center.
    CenterPoint,
    /// Uniform random angle on a circle of the given radius around the center.
    Ring { radius: f32 },
}

impl Default for SpawnMode {
    fn default() -> Self {
        SpawnMode::Ring { radius: 300.0 }
    }
}

/// How agents are assigned their trail color.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Every agent shares one color.
    Uniform { color: [f32; 3] },
    /// Per-agent random bright colors.
    Rainbow,
    /// Each agent picks uniformly from a fixed list.
    Palette { colors: Vec<[f32; 3]> },
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Uniform {
            color: [117.0, 255.0, 255.0],
        }
    }
}

/// How a sampled field cell is turned into a sensing score.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Negative L1 distance between the sampled cell and the agent's own
    /// color: agents steer toward trails that look like their own.
    #[default]
    KinAffinity,
    /// Sum of all channels, color-blind.
    Intensity,
    /// Raw intensity of a single channel.
    Channel { index: usize },
}

impl ScoringPolicy {
    /// Scores one sampled cell for one agent.
    #[inline]
    pub fn score(&self, cell: [f32; 3], own_color: [f32; 3]) -> f32 {
        match self {
            ScoringPolicy::KinAffinity => {
                -((cell[0] - own_color[0]).abs()
                    + (cell[1] - own_color[1]).abs()
                    + (cell[2] - own_color[2]).abs())
            }
            ScoringPolicy::Intensity => cell[0] + cell[1] + cell[2],
            ScoringPolicy::Channel { index } => cell[*index],
        }
    }
}

/// World-level simulation configuration: grid dimensions and population.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub agents: usize,
    pub seed: Option<u64>,
    pub spawn: SpawnMode,
    pub colors: ColorMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 1400,
            agents: 150_000,
            seed: None,
            spawn: SpawnMode::default(),
            colors: ColorMode::default(),
        }
    }
}

/// Trail field configuration: decay and diffusion kernel shape.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct TrailConfig {
    /// Per-tick multiplicative reduction, strictly inside (0, 1).
    pub decay_factor: f32,
    /// Kernel side length in cells; must be odd.
    pub kernel_len: usize,
    /// Half-extent of the normal CDF sampling range used to build the kernel.
    pub kernel_spread: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            decay_factor: 0.99,
            kernel_len: 21,
            kernel_spread: 20.0,
        }
    }
}

/// Sensing and turning configuration. Angles are in degrees here and
/// converted to radians once at world construction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct SenseConfig {
    /// Distance from the agent to each sensor, in grid units.
    pub sense_distance: f32,
    /// Half-angle between the forward sensor and each side sensor.
    pub sense_angle_deg: f32,
    /// Deterministic turn applied when a side sensor wins.
    pub turn_angle_deg: f32,
    /// Half-width of the uniform random jitter added to every heading.
    pub turn_jitter_deg: f32,
    pub scoring: ScoringPolicy,
}

impl Default for SenseConfig {
    fn default() -> Self {
        Self {
            sense_distance: 7.0,
            sense_angle_deg: 30.0,
            turn_angle_deg: 10.0,
            turn_jitter_deg: 10.0,
            scoring: ScoringPolicy::default(),
        }
    }
}

/// Top-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub trail: TrailConfig,
    pub sense: SenseConfig,
    pub target_fps: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            trail: TrailConfig::default(),
            sense: SenseConfig::default(),
            target_fps: 60,
        }
    }
}

impl SimConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure. Invalid values are
    /// never silently clamped.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(
            self.world.width <= 8192,
            "World width too large (max 8192)"
        );
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            self.world.height <= 8192,
            "World height too large (max 8192)"
        );
        anyhow::ensure!(self.world.agents > 0, "Agent count must be positive");
        anyhow::ensure!(
            self.world.agents <= 2_000_000,
            "Agent count too large (max 2000000)"
        );

        if let SpawnMode::Ring { radius } = self.world.spawn {
            anyhow::ensure!(radius > 0.0, "Ring radius must be positive");
            let half_extent = (self.world.width.min(self.world.height) as f32) / 2.0;
            anyhow::ensure!(
                radius < half_extent,
                "Ring radius must fit inside the grid"
            );
        }
        if let ColorMode::Palette { colors } = &self.world.colors {
            anyhow::ensure!(!colors.is_empty(), "Color palette must not be empty");
        }

        anyhow::ensure!(
            self.trail.decay_factor > 0.0 && self.trail.decay_factor < 1.0,
            "Decay factor must be in (0, 1)"
        );
        anyhow::ensure!(self.trail.kernel_len >= 1, "Kernel length must be positive");
        anyhow::ensure!(
            self.trail.kernel_len % 2 == 1,
            "Kernel length must be odd"
        );
        anyhow::ensure!(
            self.trail.kernel_len <= 101,
            "Kernel length too large (max 101)"
        );
        anyhow::ensure!(
            self.trail.kernel_spread > 0.0,
            "Kernel spread must be positive"
        );

        anyhow::ensure!(
            self.sense.sense_distance > 0.0,
            "Sense distance must be positive"
        );
        anyhow::ensure!(
            self.sense.sense_angle_deg >= 0.0,
            "Sense angle must be non-negative"
        );
        anyhow::ensure!(
            self.sense.turn_angle_deg >= 0.0,
            "Turn angle must be non-negative"
        );
        anyhow::ensure!(
            self.sense.turn_jitter_deg >= 0.0,
            "Turn jitter must be non-negative"
        );
        if let ScoringPolicy::Channel { index } = self.sense.scoring {
            anyhow::ensure!(index < 3, "Channel index must be in [0, 2]");
        }

        anyhow::ensure!(self.target_fps > 0, "Target FPS must be positive");
        anyhow::ensure!(self.target_fps <= 240, "Target FPS too high (max 240)");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config
            .validate()
            .map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Loads and validates configuration from a file path.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Stable digest over the behavior-affecting parameter sections, for
    /// logging which parameterization produced a run.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.trail).as_bytes());
        hasher.update(format!("{:?}", self.sense).as_bytes());
        hex::encode(hasher.finalize())
    }
}
