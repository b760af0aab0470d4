//! World construction and the per-tick update loop.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::field::{ColorBuffer, TrailField};
use crate::kernel::DiffusionKernel;
use crate::population::{AgentPopulation, SenseParams};

/// One self-contained simulation instance: the trail field, the agent
/// population, the diffusion kernel and the master RNG.
///
/// Multiple worlds can coexist; nothing is process-global.
pub struct World {
    pub config: SimConfig,
    pub tick: u64,
    pub field: TrailField,
    pub agents: AgentPopulation,
    kernel: DiffusionKernel,
    params: SenseParams,
    rng: ChaCha8Rng,
}

impl World {
    /// Validates the configuration and allocates field, kernel and
    /// population. Fails fast on any invalid parameter; nothing is clamped.
    pub fn new(config: SimConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SimError::InvalidConfig(e.to_string()))?;

        let mut rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let kernel = DiffusionKernel::gaussian(config.trail.kernel_len, config.trail.kernel_spread);
        let field = TrailField::new(config.world.width as usize, config.world.height as usize);
        let agents = AgentPopulation::spawn(&config.world, &mut rng);
        let params = SenseParams::from_config(&config.sense);

        Ok(Self {
            config,
            tick: 0,
            field,
            agents,
            kernel,
            params,
            rng,
        })
    }

    /// Advances the simulation by exactly one tick.
    ///
    /// The sub-step order is a behavioral invariant: move, deposit, decay +
    /// diffuse, sense-and-turn. Sensing therefore reads the post-diffusion
    /// field that already contains this tick's deposits, while the next
    /// tick's movement uses the headings this sensing produced.
    pub fn tick(&mut self) {
        let max_x = (self.field.width - 1) as f32;
        let max_y = (self.field.height - 1) as f32;

        self.agents.advance(max_x, max_y);
        self.agents.deposit(&mut self.field);
        self.field.decay(self.config.trail.decay_factor);
        self.field.diffuse(&self.kernel);
        self.agents
            .sense_and_turn(&self.field, &self.params, &mut self.rng);

        self.tick += 1;
    }

    /// Snapshots the field as an 8-bit color buffer for display. Taken
    /// between ticks, it cannot observe a half-applied update.
    #[must_use]
    pub fn export_color_buffer(&self) -> ColorBuffer {
        self.field.export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SpawnMode, WorldConfig};

    fn small_config() -> SimConfig {
        SimConfig {
            world: WorldConfig {
                width: 64,
                height: 64,
                agents: 50,
                seed: Some(42),
                spawn: SpawnMode::Uniform,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = small_config();
        config.trail.decay_factor = 0.0;
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_tick_advances_counter_and_deposits() {
        let mut config = small_config();
        config.world.spawn = crate::config::SpawnMode::CenterPoint;
        let mut world = World::new(config).unwrap();
        assert_eq!(world.tick, 0);
        world.tick();
        assert_eq!(world.tick, 1);
        assert!(world.field.total_intensity() > 0.0);
    }

    #[test]
    fn test_export_dimensions() {
        let world = World::new(small_config()).unwrap();
        let buffer = world.export_color_buffer();
        assert_eq!(buffer.width, 64);
        assert_eq!(buffer.height, 64);
        assert_eq!(buffer.data.len(), 64 * 64 * crate::field::CHANNELS);
    }
}
