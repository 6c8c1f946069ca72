//! # Centipede
//!
//! A terminal arcade engine where every game object is its own thread.
//!
//! The player, the keyboard reader, the HUD, each enemy segment and every
//! projectile run as independent actors painting into one shared 24 × 80
//! character grid. They coordinate only through locked shared state and a
//! one-way run flag.
//!
//! ## Core Concepts
//!
//! - **Locked accessors**: shared state lives behind five locks and is only
//!   reachable through closures that take them in a fixed order
//! - **Indivisible paints**: a clear and its redraw share one critical
//!   section on the screen lock
//! - **Fire-and-forget projectiles**: each shot owns its launch parameters
//!   and is counted, never joined
//! - **Cooperative shutdown**: actors check the run flag once per tick
//!
//! ## Example
//!
//! ```rust,no_run
//! use centipede::{Engine, EngineConfig, TerminalKeys, TerminalSurface};
//!
//! let engine = Engine::new(TerminalSurface::new(), TerminalKeys::new(), EngineConfig::default())?;
//! let report = engine.run()?;
//! println!("{} shots fired", report.projectiles_spawned);
//! # Ok::<(), centipede::EngineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod config;
pub mod error;
pub mod layout;
pub mod sprites;
pub mod state;
pub mod surface;

// Re-exports for convenience
pub use actor::{Command, Direction, Engine, KeyCode, KeySource, RunReport, ScriptedKeys, ShotCommand, TerminalKeys};
pub use buffer::{Buffer, Cell, Modifiers, Pen, Rgb};
pub use config::EngineConfig;
pub use error::{EngineError, KeyError};
pub use layout::{Board, Rect};
pub use state::{PlayerState, Shared, StatsState};
pub use surface::{HeadlessSurface, RenderSurface, TerminalSurface};
