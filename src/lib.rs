//! Canvas Pong - two paddles, one ball, a computer opponent and a narrator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, scoring, AI)
//! - `narration`: Debounced spoken score announcements
//! - `settings`: Persisted player preferences
//! - `renderer`: WebGPU rendering pipeline (wasm only)
//! - `audio`: Procedural sound effects
//! - `platform`: Browser integrations (wasm only)

pub mod audio;
pub mod narration;
#[cfg(target_arch = "wasm32")]
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use narration::{Announcement, Language, LogSpeaker, NarrationError, Narrator, Speaker};
pub use settings::Settings;

/// Game configuration constants
///
/// Speeds are expressed per second; the classic tuning was 4 px per frame
/// at 60 frames per second.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Thickness of the wall strips along the top and bottom edges
    pub const WALL_THICKNESS: f32 = 5.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Player paddle displacement per key press
    pub const PLAYER_STEP: f32 = 10.0;
    /// Computer paddle tracking speed
    pub const COMPUTER_SPEED: f32 = 240.0;

    /// Ball defaults (the ball is a square sprite, position is its top-left corner)
    pub const BALL_SIZE: f32 = 20.0;
    /// Per-axis serve speed
    pub const BALL_START_SPEED: f32 = 240.0;
    /// Visual spin of the ball sprite (radians/sec)
    pub const BALL_SPIN: f32 = 12.0;
    /// Extra rotation applied on every bounce
    pub const BOUNCE_SPIN: f32 = std::f32::consts::FRAC_PI_4;
    /// Speed boost on every collision (multiplicative, unbounded)
    pub const SPEED_UP: f32 = 1.05;
    /// Half-width of the random vertical kick added on every bounce (px/s)
    pub const ANGLE_JITTER: f32 = 18.0;

    /// Delay between a point and its announcement
    pub const NARRATION_DELAY_MS: f64 = 1000.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
