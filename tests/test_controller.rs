use shape_match::config::GameConfig;
use shape_match::controller::Game;
use shape_match::entities::*;
use shape_match::panel::Hud;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_game(config: GameConfig) -> Game<StdRng, Hud> {
    Game::new(config, StdRng::seed_from_u64(7), Hud::default())
}

fn default_game() -> Game<StdRng, Hud> {
    make_game(GameConfig::default())
}

fn centre_of(shape: &Shape) -> Point {
    let b = shape.bounds();
    Point::new(b.min_x + b.width() / 2.0, b.min_y + b.height() / 2.0)
}

fn command(control: ControlName, direction: Direction) -> ControlCommand {
    ControlCommand { control, direction }
}

// ── start-up ──────────────────────────────────────────────────────────────────

#[test]
fn new_game_starts_playing_with_spawn_timer() {
    let game = default_game();
    assert_eq!(game.state().status, GameStatus::Playing);
    assert!(game.state().shapes.is_empty());
    let due = game.timers().spawn_task().map(|t| t.due_ms());
    assert_eq!(due, Some(1000.0));
    assert!(!game.timers().removal_pending());
}

#[test]
fn new_game_primes_the_panels() {
    let game = default_game();
    assert_eq!(game.view().top.area, 550_000);
    assert_eq!(game.view().top.counter, 0);
    assert_eq!(game.view().bottom.spawn_rate, 1);
    assert_eq!(game.view().bottom.gravity, 1);
}

// ── spawn scheduler ───────────────────────────────────────────────────────────

#[test]
fn one_shape_after_one_interval() {
    let mut game = default_game();
    game.update(999.0);
    assert!(game.state().shapes.is_empty());
    game.update(1.0);
    assert_eq!(game.state().shapes.len(), 1);
    assert_eq!(game.view().top.counter, 1);
}

#[test]
fn higher_spawn_rate_spawns_faster() {
    let mut game = default_game();
    game.queue_control(command(ControlName::SpawnRate, Direction::Increase));
    game.queue_control(command(ControlName::SpawnRate, Direction::Increase));
    game.queue_control(command(ControlName::SpawnRate, Direction::Increase));
    game.update(0.0);
    assert_eq!(game.state().spawn_rate, 4);
    game.update(1000.0);
    assert_eq!(game.state().shapes.len(), 4);
}

#[test]
fn spawn_rate_change_restarts_timer_from_now() {
    let mut game = default_game();
    game.update(500.0);
    game.queue_control(command(ControlName::SpawnRate, Direction::Increase));
    game.update(0.0);
    let due = game.timers().spawn_task().map(|t| t.due_ms());
    assert_eq!(due, Some(1000.0));
    assert_eq!(game.view().bottom.spawn_rate, 2);
}

#[test]
fn spawn_rate_change_mid_frame_restarts_from_frame_clock() {
    let mut game = default_game();
    game.update(300.0);
    game.begin_frame(200.0);
    game.queue_control(command(ControlName::SpawnRate, Direction::Increase));
    game.end_frame();
    let due = game.timers().spawn_task().map(|t| t.due_ms());
    assert_eq!(due, Some(1000.0));
}

#[test]
fn collection_never_exceeds_maximum() {
    let mut game = make_game(GameConfig { max_shapes: 3, ..GameConfig::default() });
    for _ in 0..5 {
        game.queue_control(command(ControlName::SpawnRate, Direction::Increase));
    }
    for _ in 0..50 {
        game.update(100.0);
        assert!(game.state().shapes.len() <= 3);
    }
    assert_eq!(game.state().shapes.len(), 3);
}

// ── match cycle ───────────────────────────────────────────────────────────────

#[test]
fn click_shape_then_removal_empties_field() {
    let mut game = default_game();
    game.update(1000.0);
    assert_eq!(game.state().shapes.len(), 1);

    let target = game.state().shapes[0].clone();
    game.on_field_click(centre_of(&target));
    assert_eq!(game.state().active_target_type, Some(target.shape_type));
    assert!(game.timers().removal_pending());

    game.update(199.0);
    assert_eq!(game.state().shapes.len(), 1);
    game.update(1.0);
    assert!(game.state().shapes.is_empty());
    assert_eq!(game.state().active_target_type, None);
    assert_eq!(game.view().top.counter, 0);
}

#[test]
fn removal_is_timed_from_the_click_frame() {
    // Frame order of the terminal loop: clock, input, firings and motion
    let mut game = default_game();
    game.update(1000.0);
    let target = game.state().shapes[0].clone();

    game.begin_frame(40.0);
    game.on_field_click(centre_of(&target));
    game.end_frame();
    assert!(game.timers().removal_pending());

    for _ in 0..4 {
        game.begin_frame(40.0);
        game.end_frame();
    }
    // 160 ms after the click
    assert_eq!(game.state().shapes.len(), 1);
    assert!(game.timers().removal_pending());

    game.begin_frame(40.0);
    game.end_frame();
    assert!(game.state().shapes.is_empty());
    assert_eq!(game.state().active_target_type, None);
}

#[test]
fn match_removes_same_type_only() {
    let mut game = default_game();
    // Spread shapes across the top of the field
    for i in 0..8 {
        game.on_field_click(Point::new(60.0 + i as f32 * 120.0, 100.0));
    }
    assert_eq!(game.state().shapes.len(), 8);

    let target = game.state().shapes[0].clone();
    let same_type = game
        .state()
        .shapes
        .iter()
        .filter(|s| s.shape_type == target.shape_type)
        .count();

    game.on_field_click(target.position);
    assert!(game
        .state()
        .shapes
        .iter()
        .filter(|s| s.shape_type == target.shape_type)
        .all(|s| s.color == target.color));

    game.update(200.0);
    assert_eq!(game.state().shapes.len(), 8 - same_type);
    assert!(game
        .state()
        .shapes
        .iter()
        .all(|s| s.shape_type != target.shape_type));
}

#[test]
fn second_click_during_pending_match_is_ignored() {
    let mut game = default_game();
    game.on_field_click(Point::new(100.0, 100.0));
    game.on_field_click(Point::new(500.0, 100.0));
    let first = game.state().shapes[0].clone();
    let second = game.state().shapes[1].clone();

    game.on_field_click(first.position);
    assert_eq!(game.state().active_target_type, Some(first.shape_type));

    game.on_field_click(second.position);
    assert_eq!(game.state().active_target_type, Some(first.shape_type));
    game.on_field_click(Point::new(900.0, 400.0));
    assert_eq!(game.state().shapes.len(), 2);
}

#[test]
fn matching_reopens_after_removal() {
    let mut game = default_game();
    game.on_field_click(Point::new(100.0, 100.0));
    let first = game.state().shapes[0].clone();
    game.on_field_click(first.position);
    game.update(200.0);
    assert_eq!(game.state().active_target_type, None);

    game.on_field_click(Point::new(700.0, 300.0));
    assert_eq!(game.state().shapes.len(), 1);
}

// ── empty-space clicks ────────────────────────────────────────────────────────

#[test]
fn empty_click_spawns_exactly_one_at_point() {
    let mut game = default_game();
    game.on_field_click(Point::new(400.0, 250.0));
    let shapes = &game.state().shapes;
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].position, Point::new(400.0, 250.0));
    assert!(shapes[0].shape_type <= 6);
    assert_eq!(game.view().top.counter, 1);
}

#[test]
fn empty_click_respects_maximum() {
    let mut game = make_game(GameConfig { max_shapes: 3, ..GameConfig::default() });
    for i in 0..5 {
        game.on_field_click(Point::new(100.0 + i as f32 * 200.0, 100.0));
    }
    assert_eq!(game.state().shapes.len(), 3);
}

// ── control panel ─────────────────────────────────────────────────────────────

#[test]
fn gravity_decrement_from_one_stays_one() {
    let mut game = default_game();
    for _ in 0..3 {
        game.queue_control(command(ControlName::Gravity, Direction::Decrease));
    }
    game.update(0.0);
    assert_eq!(game.state().gravity, 1);
    assert_eq!(game.view().bottom.gravity, 1);
}

#[test]
fn gravity_increase_reaches_live_shapes() {
    let mut game = default_game();
    game.on_field_click(Point::new(100.0, 100.0));
    game.queue_control(command(ControlName::Gravity, Direction::Increase));
    game.queue_control(command(ControlName::Gravity, Direction::Increase));
    game.update(0.0);
    assert_eq!(game.state().gravity, 3);
    assert_eq!(game.state().shapes[0].gravity, 3);
    assert_eq!(game.view().bottom.gravity, 3);
}

#[test]
fn queued_commands_wait_for_update() {
    let mut game = default_game();
    game.queue_control(command(ControlName::Gravity, Direction::Increase));
    assert_eq!(game.state().gravity, 1);
    game.update(0.0);
    assert_eq!(game.state().gravity, 2);
}

// ── motion ────────────────────────────────────────────────────────────────────

#[test]
fn update_moves_shapes_down() {
    let mut game = default_game();
    game.on_field_click(Point::new(500.0, 100.0));
    let before = game.state().shapes[0].position;
    game.update(1000.0 / 60.0);
    let after = game.state().shapes[0].position;
    assert!(after.y > before.y);
}

// ── state machine ─────────────────────────────────────────────────────────────

#[test]
fn ended_round_freezes_and_shows_result() {
    let mut game = default_game();
    game.on_field_click(Point::new(500.0, 100.0));
    game.end_round(true);
    assert_eq!(game.state().status, GameStatus::Won);
    assert_eq!(game.view().result.shown, Some(GameStatus::Won));
    assert!(game.timers().spawn_task().is_none());

    let before = game.state().shapes[0].position;
    game.update(5000.0);
    assert_eq!(game.state().shapes.len(), 1);
    assert_eq!(game.state().shapes[0].position, before);
}

#[test]
fn click_after_round_end_starts_new_round() {
    let mut game = default_game();
    game.on_field_click(Point::new(500.0, 100.0));
    game.end_round(false);
    assert_eq!(game.view().result.shown, Some(GameStatus::Lost));

    game.on_field_click(Point::new(200.0, 200.0));
    assert_eq!(game.state().status, GameStatus::Playing);
    assert!(game.state().shapes.is_empty());
    assert_eq!(game.view().result.shown, None);
    assert_eq!(game.view().top.counter, 0);
    assert!(game.timers().spawn_task().is_some());
}

#[test]
fn end_round_drops_pending_match() {
    let mut game = default_game();
    game.on_field_click(Point::new(300.0, 100.0));
    game.on_field_click(Point::new(700.0, 100.0));
    let target = game.state().shapes[0].clone();
    game.on_field_click(target.position);
    assert!(game.timers().removal_pending());

    game.end_round(true);
    assert!(!game.timers().removal_pending());
    assert_eq!(game.state().active_target_type, None);

    game.update(500.0);
    assert_eq!(game.state().shapes.len(), 2);
    assert_eq!(game.view().top.counter, 2);
}

#[test]
fn end_round_is_noop_when_not_playing() {
    let mut game = default_game();
    game.end_round(true);
    game.end_round(false);
    assert_eq!(game.state().status, GameStatus::Won);
}

// ── teardown ──────────────────────────────────────────────────────────────────

#[test]
fn destroy_cancels_everything() {
    let mut game = default_game();
    game.on_field_click(Point::new(100.0, 100.0));
    let first = game.state().shapes[0].clone();
    game.on_field_click(first.position);
    game.queue_control(command(ControlName::Gravity, Direction::Increase));

    game.destroy();
    assert!(game.is_torn_down());
    assert!(game.timers().is_idle());
    assert!(game.state().shapes.is_empty());
}

#[test]
fn destroyed_game_ignores_input_and_time() {
    let mut game = default_game();
    game.destroy();
    game.on_field_click(Point::new(100.0, 100.0));
    game.queue_control(command(ControlName::Gravity, Direction::Increase));
    game.update(10_000.0);
    game.start_round();
    assert!(game.state().shapes.is_empty());
    assert_eq!(game.state().gravity, 1);
    assert!(game.timers().is_idle());
}
