//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, exit_side, hits_paddle, wall_contact, wall_rect};
pub use state::{Ball, Field, GameEvent, GamePhase, GameState, Paddle, Score, Side, Wall};
pub use tick::{PaddleCommand, TickInput, tick};
