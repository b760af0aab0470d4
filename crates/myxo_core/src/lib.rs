//! # Myxo Core
//!
//! The simulation engine for myxo - a Physarum-style trail-following agent
//! simulation.
//!
//! A population of simple mobile agents moves over a bounded 2D grid,
//! depositing colored trail into a shared field that decays and diffuses
//! every tick. Agents steer by sampling the field ahead of themselves, so
//! the population self-organizes into the branching networks slime molds
//! are known for.
//!
//! ## Architecture
//!
//! - **Structure-of-arrays population**: positions, headings and colors as
//!   contiguous arrays, updated with Rayon-parallel bulk passes
//! - **Fixed tick order**: move, deposit, decay + diffuse, sense-and-turn
//! - **Deterministic simulation**: one seeded RNG; per-agent random draws
//!   are pre-filled sequentially so parallelism never perturbs the stream
//!
//! ## Example
//!
//! ```
//! use myxo_core::config::{SimConfig, SpawnMode, WorldConfig};
//! use myxo_core::world::World;
//!
//! let config = SimConfig {
//!     world: WorldConfig {
//!         width: 128,
//!         height: 128,
//!         agents: 1000,
//!         seed: Some(42),
//!         spawn: SpawnMode::Uniform,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let mut world = World::new(config).unwrap();
//! world.tick();
//! let frame = world.export_color_buffer();
//! assert_eq!(frame.data.len(), 128 * 128 * 3);
//! ```

/// Boundary policies (clip for sensing, reflect for movement)
pub mod boundary;
/// Configuration management for simulation parameters
pub mod config;
/// Error types for simulation setup
pub mod error;
/// The shared trail field: deposit, decay, diffusion, export
pub mod field;
/// Gaussian diffusion kernel construction
pub mod kernel;
/// Tick timing metrics and structured logging
pub mod metrics;
/// The agent population as flat arrays: spawn, move, deposit, sense
pub mod population;
/// World construction and the per-tick update loop
pub mod world;

pub use config::SimConfig;
pub use error::SimError;
pub use field::{ColorBuffer, TrailField, CHANNELS};
pub use kernel::DiffusionKernel;
pub use metrics::{init_logging, Metrics};
pub use population::AgentPopulation;
pub use world::World;
