//! # Shepherding Core
//!
//! The agent behavior engine for the shepherding simulation: sheep that flock
//! by local social forces, and shepherds that herd them into a pen by choosing
//! targets from what they see.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Per-sheep neighbor networks (metric radius or Voronoi adjacency)
//! - Repulsion, attraction and shepherd-avoidance forces
//! - Shepherd vision and the Drive/Collect state machine
//! - Arena walls and the pen fence
//! - The fixed-timestep scheduler with a robot-in-the-loop bridge
//!
//! ## Example
//!
//! ```
//! use shepherding_core::bridge::NullBridge;
//! use shepherding_core::config::AppConfig;
//! use shepherding_core::world::World;
//!
//! let mut config = AppConfig::default();
//! config.world.seed = Some(42);
//! config.world.n_sheep = 5;
//!
//! let mut world = World::new(config).unwrap();
//! let report = world.step(&mut NullBridge);
//! assert_eq!(report.tick, 0);
//! assert_eq!(world.tick, 1);
//! ```

/// Boundary reflection off the arena walls and the pen fence
pub mod boundary;
/// Robot-in-the-loop bridge interface
pub mod bridge;
/// Configuration management for simulation parameters
pub mod config;
/// Bowyer–Watson triangulation for Voronoi neighborhoods
pub mod delaunay;
/// Sheep and shepherd social forces
pub mod forces;
/// Angle normalisation and relative geometry
pub mod geometry;
/// Shepherd Drive/Collect target selection
pub mod herding;
/// Population spawning
pub mod lifecycle;
/// Run metrics and structured logging
pub mod metrics;
/// Per-sheep interaction networks
pub mod network;
/// Shepherd vision projection
pub mod vision;
/// Simulation state and tick scheduler
pub mod world;

pub use bridge::{NullBridge, ShepherdBridge};
pub use config::AppConfig;
pub use metrics::{init_logging, Metrics};
pub use world::{TickReport, UpdateOrder, World};
