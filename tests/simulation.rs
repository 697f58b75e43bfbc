//! Whole-match properties of the simulation

use canvas_pong::consts::*;
use canvas_pong::sim::{GameEvent, GameState, PaddleCommand, Score, TickInput, tick};
use canvas_pong::{LogSpeaker, Narrator};
use proptest::prelude::*;

fn command_strategy() -> impl Strategy<Value = Vec<Option<PaddleCommand>>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(None),
            1 => Just(Some(PaddleCommand::Up)),
            1 => Just(Some(PaddleCommand::Down)),
        ],
        1..1500,
    )
}

fn input_for(command: Option<PaddleCommand>) -> TickInput {
    TickInput {
        commands: command.into_iter().collect(),
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn scores_only_grow_one_point_at_a_time(seed in any::<u64>(), commands in command_strategy()) {
        let mut state = GameState::new(seed);
        let mut last = Score::default();

        for command in commands {
            let events = tick(&mut state, &input_for(command), SIM_DT);
            let points = events
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored { .. }))
                .count() as u32;

            prop_assert!(state.score.player >= last.player);
            prop_assert!(state.score.computer >= last.computer);
            let gained =
                (state.score.player - last.player) + (state.score.computer - last.computer);
            prop_assert_eq!(gained, points);
            prop_assert!(points <= 1);
            last = state.score;
        }
    }

    #[test]
    fn paddles_stay_on_the_field(seed in any::<u64>(), commands in command_strategy()) {
        let mut state = GameState::new(seed);
        let max_y = state.field.height - PADDLE_HEIGHT;

        for command in commands {
            tick(&mut state, &input_for(command), SIM_DT);
            prop_assert!((0.0..=max_y).contains(&state.player.y));
            prop_assert!((0.0..=max_y).contains(&state.computer.y));
        }
    }

    #[test]
    fn ball_never_leaves_through_the_walls(seed in any::<u64>(), frames in 1usize..4000) {
        let mut state = GameState::new(seed);
        let input = TickInput { autoplay: true, ..Default::default() };
        let min_y = WALL_THICKNESS - 1e-3;
        let max_y = state.field.height - WALL_THICKNESS - BALL_SIZE + 1e-3;

        for _ in 0..frames {
            tick(&mut state, &input, SIM_DT);
            prop_assert!(state.ball.pos.y >= min_y, "ball above top wall: {}", state.ball.pos.y);
            prop_assert!(state.ball.pos.y <= max_y, "ball below bottom wall: {}", state.ball.pos.y);
        }
    }

    #[test]
    fn every_bounce_scales_speed_by_the_same_factor(seed in any::<u64>(), frames in 1usize..3000) {
        let mut state = GameState::new(seed);
        state.angle_jitter = 0.0;
        let input = TickInput { autoplay: true, ..Default::default() };

        for _ in 0..frames {
            let before = state.ball.speed();
            let events = tick(&mut state, &input, SIM_DT);
            if events.iter().any(|e| matches!(e, GameEvent::Scored { .. })) {
                continue;
            }
            let bounces = events.len() as i32;
            let expected = before * SPEED_UP.powi(bounces);
            prop_assert!(
                (state.ball.speed() - expected).abs() <= expected * 1e-4,
                "speed {} expected {} after {} bounces",
                state.ball.speed(),
                expected,
                bounces
            );
        }
    }

    #[test]
    fn a_point_always_resets_the_ball(seed in any::<u64>(), commands in command_strategy()) {
        let mut state = GameState::new(seed);

        for command in commands {
            let events = tick(&mut state, &input_for(command), SIM_DT);
            if events.iter().any(|e| matches!(e, GameEvent::Scored { .. })) {
                prop_assert_eq!(state.ball.pos, state.field.center());
                prop_assert_eq!(state.ball.rotation, 0.0);
                prop_assert_eq!(state.ball.vel.x.abs(), BALL_START_SPEED);
                prop_assert_eq!(state.ball.vel.y.abs(), BALL_START_SPEED);
                prop_assert_eq!(state.rally, 0);
            }
        }
    }
}

#[test]
fn idle_player_loses_points_to_the_computer() {
    let mut state = GameState::new(42);
    for _ in 0..60 * 60 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert!(state.score.computer > 0);
}

#[test]
fn narrator_reads_out_the_final_tally_of_a_burst() {
    let mut state = GameState::new(7);
    let mut narrator = Narrator::default();
    let mut speaker = LogSpeaker::default();

    // Idle player: points keep coming for the computer
    let mut now_ms = 0.0;
    for _ in 0..60 * 120 {
        now_ms += SIM_DT as f64 * 1000.0;
        for event in tick(&mut state, &TickInput::default(), SIM_DT) {
            narrator.observe(&event, now_ms);
        }
        narrator.update(now_ms, &mut speaker);
    }
    if let Some(due) = narrator.pending_due() {
        narrator.update(due, &mut speaker);
    }

    assert!(!speaker.spoken.is_empty());
    let expected = format!(
        "Jogador: {} pontos. Computador: {} pontos.",
        state.score.player, state.score.computer
    );
    assert_eq!(speaker.spoken.last(), Some(&expected));
}
