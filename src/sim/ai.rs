//! Paddle tracking
//!
//! The computer paddle chases the ball's vertical centre at a fixed speed.
//! Autoplay drives the player paddle with the same routine.

use super::state::{Field, Paddle};

/// Move `paddle` toward `target_y` by at most `max_speed * dt`
pub fn track(paddle: &mut Paddle, target_y: f32, max_speed: f32, dt: f32, field: &Field) {
    let delta = target_y - paddle.center_y();
    let step = (max_speed * dt).min(delta.abs());
    paddle.shift(step.copysign(delta), field);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_track_moves_toward_target() {
        let field = Field::default();
        let mut paddle = Paddle::centered(&field);
        let start = paddle.y;

        track(&mut paddle, 0.0, COMPUTER_SPEED, SIM_DT, &field);
        assert!((start - paddle.y - COMPUTER_SPEED * SIM_DT).abs() < 1e-4);

        let start = paddle.y;
        track(&mut paddle, field.height, COMPUTER_SPEED, SIM_DT, &field);
        assert!((paddle.y - start - COMPUTER_SPEED * SIM_DT).abs() < 1e-4);
    }

    #[test]
    fn test_track_does_not_overshoot() {
        let field = Field::default();
        let mut paddle = Paddle::centered(&field);
        let target = paddle.center_y() + 1.0;

        track(&mut paddle, target, COMPUTER_SPEED, SIM_DT, &field);
        assert!((paddle.center_y() - target).abs() < 1e-4);

        // Already aligned - stays put
        let y = paddle.y;
        track(&mut paddle, target, COMPUTER_SPEED, SIM_DT, &field);
        assert_eq!(paddle.y, y);
    }

    #[test]
    fn test_track_stays_in_field() {
        let field = Field::default();
        let mut paddle = Paddle { y: 1.0 };
        for _ in 0..100 {
            track(&mut paddle, -500.0, COMPUTER_SPEED, SIM_DT, &field);
        }
        assert_eq!(paddle.y, 0.0);

        for _ in 0..200 {
            track(&mut paddle, 5000.0, COMPUTER_SPEED, SIM_DT, &field);
        }
        assert_eq!(paddle.y, field.height - PADDLE_HEIGHT);
    }
}
