//! Fixed timestep simulation tick
//!
//! One tick applies queued key input to the player paddle, moves the ball
//! (collisions and scoring), then moves the computer paddle.

use super::ai::track;
use super::collision::{exit_side, hits_paddle, reflect_away, wall_contact};
use super::state::{GameEvent, GamePhase, GameState, Side, Wall};
use crate::consts::*;
use crate::normalize_angle;

/// Discrete player paddle commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleCommand {
    Up,
    Down,
}

impl PaddleCommand {
    /// Keyboard mapping: Space raises the paddle, Enter lowers it
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " => Some(PaddleCommand::Up),
            "Enter" => Some(PaddleCommand::Down),
            _ => None,
        }
    }

    fn offset(self) -> f32 {
        match self {
            PaddleCommand::Up => -PLAYER_STEP,
            PaddleCommand::Down => PLAYER_STEP,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses received since the previous tick, oldest first
    pub commands: Vec<PaddleCommand>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI drives the player paddle too
    pub autoplay: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns what happened during the step so the host can play sounds,
/// schedule narration and refresh the HUD.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        };
        log::info!("Phase: {:?}", state.phase);
    }

    if state.phase == GamePhase::Paused {
        return events;
    }

    state.time_ticks += 1;

    handle_input(state, input, dt);
    move_ball(state, dt, &mut events);
    move_computer_paddle(state, dt);

    events
}

/// Apply key presses (or autoplay) to the player paddle
fn handle_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let field = state.field;
    for command in &input.commands {
        state.player.shift(command.offset(), &field);
    }

    if input.autoplay {
        let target = state.ball.center().y;
        track(&mut state.player, target, COMPUTER_SPEED, dt, &field);
    }
}

fn move_computer_paddle(state: &mut GameState, dt: f32) {
    let field = state.field;
    let target = state.ball.center().y;
    track(&mut state.computer, target, COMPUTER_SPEED, dt, &field);
}

/// Integrate the ball, resolving contacts in substeps no longer than half
/// the ball size so a fast ball cannot skip through a paddle.
fn move_ball(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    state.ball.rotation = normalize_angle(state.ball.rotation + BALL_SPIN * dt);

    let travel = state.ball.speed() * dt;
    let substeps = ((travel / (BALL_SIZE / 2.0)).ceil() as u32).max(1);
    let sub_dt = dt / substeps as f32;

    for _ in 0..substeps {
        state.ball.pos += state.ball.vel * sub_dt;

        resolve_walls(state, events);
        resolve_paddle(state, Side::Player, events);
        resolve_paddle(state, Side::Computer, events);

        if let Some(side) = exit_side(&state.ball_rect(), &state.field) {
            state.score.increment(side);
            log::info!(
                "{:?} scores after a {}-hit rally ({} - {})",
                side,
                state.rally,
                state.score.player,
                state.score.computer
            );
            events.push(GameEvent::Scored {
                side,
                score: state.score,
            });
            state.reset_ball();
            return;
        }
    }
}

fn resolve_walls(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(wall) = wall_contact(&state.ball_rect(), &state.field) else {
        return;
    };
    let away = match wall {
        Wall::Top => 1.0,
        Wall::Bottom => -1.0,
    };
    // Already heading back into the field
    if state.ball.vel.y * away >= 0.0 {
        return;
    }

    let ball = &mut state.ball;
    ball.vel.y = reflect_away(ball.vel.y, away);
    ball.pos.y = match wall {
        Wall::Top => ball.pos.y.max(WALL_THICKNESS),
        Wall::Bottom => ball.pos.y.min(state.field.height - WALL_THICKNESS - BALL_SIZE),
    };

    bounce(state);
    events.push(GameEvent::WallBounce { wall });
}

fn resolve_paddle(state: &mut GameState, side: Side, events: &mut Vec<GameEvent>) {
    let away = match side {
        Side::Player => 1.0,
        Side::Computer => -1.0,
    };
    if state.ball.vel.x * away >= 0.0 {
        return;
    }

    let paddle = state.paddle_rect(side);
    if !hits_paddle(&state.ball_rect(), &paddle) {
        return;
    }

    let ball = &mut state.ball;
    ball.vel.x = reflect_away(ball.vel.x, away);
    ball.pos.x = match side {
        Side::Player => ball.pos.x.max(paddle.right()),
        Side::Computer => ball.pos.x.min(paddle.left() - BALL_SIZE),
    };

    bounce(state);
    state.rally += 1;
    log::debug!(
        "{:?} paddle hit #{} (speed {:.1})",
        side,
        state.rally,
        state.ball.speed()
    );
    events.push(GameEvent::PaddleHit { side });
}

/// Shared bounce response: speed up, kick the angle, spin the sprite
fn bounce(state: &mut GameState) {
    state.ball.vel *= SPEED_UP;
    let kick = state.roll_jitter();
    state.ball.vel.y += kick;
    state.ball.rotation = normalize_angle(state.ball.rotation + BOUNCE_SPIN);
}
