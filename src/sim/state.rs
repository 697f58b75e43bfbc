//! Game state and core simulation types
//!
//! Everything the frame loop reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
}

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human player, left edge
    Player,
    /// Computer opponent, right edge
    Computer,
}

/// Horizontal wall strips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
}

/// Something the frame produced that the outside world may react to
/// (sound, narration, HUD). The simulation never reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce { wall: Wall },
    PaddleHit { side: Side },
    /// `side` scored; `score` is the tally after the point
    Scored { side: Side, score: Score },
}

/// Play area dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The ball. `pos` is the top-left corner of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sprite rotation (radians, kept in [-π, π))
    pub rotation: f32,
}

impl Ball {
    pub fn size() -> Vec2 {
        Vec2::splat(BALL_SIZE)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Self::size() / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Self::size())
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A paddle. Only the vertical position changes during play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top edge
    pub y: f32,
}

impl Paddle {
    /// Paddle vertically centred in the field
    pub fn centered(field: &Field) -> Self {
        Self {
            y: (field.height - PADDLE_HEIGHT) / 2.0,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + PADDLE_HEIGHT / 2.0
    }

    /// Move by `dy`, staying inside the field
    pub fn shift(&mut self, dy: f32, field: &Field) {
        self.y = (self.y + dy).clamp(0.0, field.height - PADDLE_HEIGHT);
    }
}

/// Points for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub computer: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Computer => self.computer,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Computer => self.computer += 1,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub field: Field,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub player: Paddle,
    pub computer: Paddle,
    pub score: Score,
    /// Paddle hits since the last point
    pub rally: u32,
    /// Half-width of the random vertical kick applied on bounce
    pub angle_jitter: f32,
}

impl GameState {
    /// Create a new game on the default field
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, Field::default())
    }

    pub fn with_field(seed: u64, field: Field) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            phase: GamePhase::Playing,
            time_ticks: 0,
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                rotation: 0.0,
            },
            player: Paddle::centered(&field),
            computer: Paddle::centered(&field),
            score: Score::default(),
            rally: 0,
            angle_jitter: ANGLE_JITTER,
        };
        state.reset_ball();
        state
    }

    /// Put the ball back in the centre and serve in a random diagonal direction
    pub fn reset_ball(&mut self) {
        let sx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball = Ball {
            pos: self.field.center(),
            vel: Vec2::new(sx, sy) * BALL_START_SPEED,
            rotation: 0.0,
        };
        self.rally = 0;
    }

    /// Random vertical kick in [-jitter, jitter)
    pub fn roll_jitter(&mut self) -> f32 {
        if self.angle_jitter <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-self.angle_jitter..self.angle_jitter)
    }

    /// Player paddle bounding box (flush with the left edge)
    pub fn player_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(0.0, self.player.y),
            Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        )
    }

    /// Computer paddle bounding box (flush with the right edge)
    pub fn computer_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.field.width - PADDLE_WIDTH, self.computer.y),
            Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        )
    }

    pub fn paddle_rect(&self, side: Side) -> Rect {
        match side {
            Side::Player => self.player_rect(),
            Side::Computer => self.computer_rect(),
        }
    }

    pub fn ball_rect(&self) -> Rect {
        self.ball.rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_centered() {
        let state = GameState::new(7);
        assert_eq!(state.ball.pos, state.field.center());
        assert_eq!(state.player.y, 150.0);
        assert_eq!(state.computer.y, 150.0);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_serve_is_diagonal_at_start_speed() {
        for seed in 0..32 {
            let state = GameState::new(seed);
            assert_eq!(state.ball.vel.x.abs(), BALL_START_SPEED);
            assert_eq!(state.ball.vel.y.abs(), BALL_START_SPEED);
        }
    }

    #[test]
    fn test_serve_direction_varies_with_seed() {
        let directions: std::collections::HashSet<(bool, bool)> = (0..64)
            .map(|seed| {
                let v = GameState::new(seed).ball.vel;
                (v.x > 0.0, v.y > 0.0)
            })
            .collect();
        assert_eq!(directions.len(), 4);
    }

    #[test]
    fn test_paddle_shift_clamps() {
        let field = Field::default();
        let mut paddle = Paddle { y: 5.0 };
        paddle.shift(-PLAYER_STEP, &field);
        assert_eq!(paddle.y, 0.0);

        paddle.y = field.height - PADDLE_HEIGHT - 3.0;
        paddle.shift(PLAYER_STEP, &field);
        assert_eq!(paddle.y, field.height - PADDLE_HEIGHT);
    }

    #[test]
    fn test_zero_jitter_rolls_zero() {
        let mut state = GameState::new(1);
        state.angle_jitter = 0.0;
        assert_eq!(state.roll_jitter(), 0.0);
    }

    #[test]
    fn test_score_by_side() {
        let mut score = Score::default();
        score.increment(Side::Computer);
        score.increment(Side::Computer);
        score.increment(Side::Player);
        assert_eq!(score.get(Side::Player), 1);
        assert_eq!(score.get(Side::Computer), 2);
    }

    #[test]
    fn test_seed_is_kept() {
        let state = GameState::new(0xC0FFEE);
        assert_eq!(state.seed, 0xC0FFEE);
        assert_eq!(GameState::new(state.seed).ball, state.ball);
    }

    #[test]
    fn test_paddle_rects_hug_edges() {
        let state = GameState::new(1);
        assert_eq!(state.player_rect().left(), 0.0);
        assert_eq!(state.computer_rect().right(), state.field.width);
    }
}
