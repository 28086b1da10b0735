//! Whole-match behaviour through the public API

use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll, Waker};

use glam::Vec2;
use smash_pong::consts::*;
use smash_pong::game_loop::{ManualClock, ManualScheduler};
use smash_pong::leaderboard::{MemoryLeaderboard, Winner, fetch_leaderboard, save_game_result};
use smash_pong::sim::{GameEvent, RenderSnapshot, Side, TargetScore, opponent};
use smash_pong::{GameLoop, MatchController, MatchPhase};

fn block_on<F: Future>(future: F) -> F::Output {
    let mut future = pin!(future);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
    }
}

/// Send the ball past the goal line defended by `scorer`'s opponent
fn force_point(ctrl: &mut MatchController, scorer: Side) -> Vec<GameEvent> {
    let state = ctrl.state_mut();
    let y = match scorer {
        Side::Player => -BALL_RADIUS,
        Side::Opponent => FIELD_HEIGHT + BALL_RADIUS,
    };
    state.ball.pos = Vec2::new(FIELD_WIDTH / 2.0, y);
    state.ball.vel = Vec2::new(0.0, scorer.outgoing_dir() * BALL_INITIAL_SPEED);
    ctrl.tick(0.0)
}

fn autopilot(ctrl: &mut MatchController, speed: f32) {
    let mut paddle = ctrl.state().player.clone();
    opponent::track(&mut paddle, ctrl.state().ball.pos.x, speed);
    ctrl.set_player_x(paddle.pos.x);
}

#[test]
fn five_point_match_concludes_at_total() {
    let mut ctrl = MatchController::new(TargetScore::new(5), "Ada", 2024);
    ctrl.start();

    let mut servers = vec![ctrl.is_player_serving()];
    for scorer in [Side::Player, Side::Player, Side::Opponent, Side::Opponent] {
        let events = force_point(&mut ctrl, scorer);
        assert!(matches!(events.last(), Some(GameEvent::PointScored { .. })));
        servers.push(ctrl.is_player_serving());
    }
    // Two serves each: player, player, cpu, cpu, player
    assert_eq!(servers, [true, true, false, false, true]);

    let events = force_point(&mut ctrl, Side::Player);
    let outcome = match events.last() {
        Some(GameEvent::MatchOver(outcome)) => *outcome,
        other => panic!("expected MatchOver, got {other:?}"),
    };
    assert_eq!((outcome.player_score, outcome.opponent_score), (3, 2));
    assert_eq!(outcome.winner, Some(Side::Player));
    assert_eq!(ctrl.phase(), MatchPhase::Concluded);

    // Nothing moves once concluded
    let frozen = ctrl.snapshot();
    for _ in 0..30 {
        assert!(ctrl.tick(0.0).is_empty());
    }
    ctrl.set_player_center(0.0);
    assert_eq!(ctrl.snapshot(), frozen);
}

#[test]
fn rally_invariants_hold_over_long_play() {
    let mut ctrl = MatchController::new(TargetScore::new(51), "Bot", 7);
    ctrl.start();
    let mut last_speed = ctrl.state().ball.speed;
    let mut hits = 0;

    for _ in 0..60 * 60 * 5 {
        if ctrl.phase() != MatchPhase::InProgress {
            break;
        }
        autopilot(&mut ctrl, 4.5);
        let events = ctrl.tick(0.0);
        let state = ctrl.state();

        for paddle in [&state.player, &state.opponent] {
            assert!(paddle.pos.x >= 0.0 && paddle.pos.x <= FIELD_WIDTH - PADDLE_WIDTH);
        }

        let rally_reset = events
            .iter()
            .any(|e| matches!(e, GameEvent::PointScored { .. } | GameEvent::MatchOver(_)));
        if rally_reset {
            last_speed = state.ball.speed;
            continue;
        }

        assert!(state.ball.pos.x >= BALL_RADIUS && state.ball.pos.x <= FIELD_WIDTH - BALL_RADIUS);
        assert!(state.ball.speed >= last_speed, "speed dropped within a rally");
        assert!(state.ball.speed <= BALL_MAX_SPEED);
        last_speed = state.ball.speed;

        if events.iter().any(|e| matches!(e, GameEvent::PaddleHit { .. })) {
            hits += 1;
            assert!((state.ball.vel.length() - state.ball.speed).abs() < 1e-3);
        }
    }
    assert!(hits > 0, "autopilot never returned the ball");
}

#[test]
fn looped_match_lands_on_leaderboard() {
    let clock = ManualClock::new(0.0);
    let mut game_loop = GameLoop::new(ManualScheduler::default(), clock.clone());
    let board = MemoryLeaderboard::new();
    let mut ctrl = MatchController::new(TargetScore::new(5), "  ", 99);
    ctrl.start();
    game_loop.start();

    let mut reports = 0;
    let mut handed_off = false;
    let mut frames = 0;
    while game_loop.scheduler_mut().fire().is_some() {
        frames += 1;
        assert!(frames < 60 * 60 * 30, "match never finished");
        clock.advance(SIM_DT_MS);
        let outcome = game_loop.on_frame(&mut ctrl, &mut |_: &RenderSnapshot| {});
        if let Some(report) = outcome.report {
            reports += 1;
            assert_eq!(report.player_score + report.cpu_score, 5);
            let record = block_on(save_game_result(&board, &report)).expect("stored");
            assert_eq!(record.player_name, DEFAULT_PLAYER_NAME);
        }
        if outcome.show_leaderboard {
            handed_off = true;
        }
    }

    assert_eq!(reports, 1);
    assert!(handed_off);
    assert!(!game_loop.is_running());

    let entries = block_on(fetch_leaderboard(&board, LEADERBOARD_LIMIT));
    assert_eq!(entries.len(), 1);
    let expected = if entries[0].score > entries[0].opponent_score {
        Winner::Player
    } else {
        Winner::Cpu
    };
    assert_eq!(entries[0].winner, expected);
}

#[test]
fn quit_mid_match_reports_nothing() {
    let clock = ManualClock::new(0.0);
    let mut game_loop = GameLoop::new(ManualScheduler::default(), clock.clone());
    let mut ctrl = MatchController::new(TargetScore::default(), "Ada", 3);
    ctrl.start();
    game_loop.start();

    for _ in 0..10 {
        game_loop.scheduler_mut().fire();
        clock.advance(SIM_DT_MS);
        game_loop.on_frame(&mut ctrl, &mut |_: &RenderSnapshot| {});
    }
    assert!(ctrl.quit());
    game_loop.stop();
    assert!(game_loop.scheduler().pending().is_empty());
    assert!(ctrl.take_report().is_none());
}
