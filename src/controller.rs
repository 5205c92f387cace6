/// Top-level game controller.
///
/// Owns the game state, both timers, the RNG and the view.  All input
/// (field clicks, queued panel commands) and all time (`update`) flow
/// through here; the pure rules live in `compute`.

use std::collections::VecDeque;

use rand::Rng;

use crate::compute::{
    clear_shapes, frame_delta, init_state, remove_matched, resolve_click, spawn_period_ms,
    spawn_shape, step_control, tick, ClickOutcome,
};
use crate::config::GameConfig;
use crate::entities::{ControlCommand, ControlName, GameState, GameStatus, Point};
use crate::panel::GameView;
use crate::timer::Timers;

pub struct Game<R: Rng, V: GameView> {
    config: GameConfig,
    state: GameState,
    timers: Timers,
    rng: R,
    view: V,
    commands: VecDeque<ControlCommand>,
    /// Elapsed time of the frame opened by `begin_frame`.
    frame_ms: f64,
    torn_down: bool,
}

impl<R: Rng, V: GameView> Game<R, V> {
    /// Build a controller and start the first round.
    pub fn new(config: GameConfig, rng: R, view: V) -> Self {
        let state = init_state(&config);
        let mut game = Self {
            config,
            state,
            timers: Timers::new(),
            rng,
            view,
            commands: VecDeque::new(),
            frame_ms: 0.0,
            torn_down: false,
        };
        game.view.update_area_text(game.config.field_area());
        game.refresh_controls();
        game.start_round();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Clear the field and begin spawning again.
    pub fn start_round(&mut self) {
        if self.torn_down {
            return;
        }
        self.timers.cancel_removal();
        self.state = GameState {
            status: GameStatus::Playing,
            ..clear_shapes(&self.state)
        };
        self.view.reset();
        self.restart_spawn_timer();
        self.refresh_counter();
        log::info!(
            "Round started: spawn_rate={} gravity={}",
            self.state.spawn_rate,
            self.state.gravity
        );
    }

    /// Leave `Playing` for a result screen.  Motion freezes, automatic
    /// spawning stops and a pending match is dropped until the next field
    /// click.
    pub fn end_round(&mut self, won: bool) {
        if self.torn_down || self.state.status != GameStatus::Playing {
            return;
        }
        let status = if won { GameStatus::Won } else { GameStatus::Lost };
        self.state.status = status;
        self.timers.cancel_spawn();
        self.timers.cancel_removal();
        self.state.active_target_type = None;
        self.view.show_result(status);
        log::info!("Round ended: {:?}", status);
    }

    /// Panel commands are applied at the start of the next `update`.
    pub fn queue_control(&mut self, command: ControlCommand) {
        if !self.torn_down {
            self.commands.push_back(command);
        }
    }

    pub fn on_field_click(&mut self, point: Point) {
        if self.torn_down {
            return;
        }
        match self.state.status {
            GameStatus::Won | GameStatus::Lost => self.start_round(),
            GameStatus::Playing => self.click_while_playing(point),
        }
    }

    /// Advance the game by `elapsed_ms` of wall-clock time with no input
    /// in between.
    pub fn update(&mut self, elapsed_ms: f64) {
        self.begin_frame(elapsed_ms);
        self.end_frame();
    }

    /// Move the clock to the start of this frame's input.  Clicks handled
    /// before `end_frame` time their removal from here.
    pub fn begin_frame(&mut self, elapsed_ms: f64) {
        if self.torn_down {
            return;
        }
        self.timers.advance_clock(elapsed_ms);
        self.frame_ms += elapsed_ms.max(0.0);
    }

    /// Apply queued commands, due timers and motion for the open frame.
    pub fn end_frame(&mut self) {
        if self.torn_down {
            return;
        }

        while let Some(command) = self.commands.pop_front() {
            self.apply_control(command);
        }

        let firings = self.timers.collect_firings();
        for _ in 0..firings.spawns {
            self.spawn_random();
        }
        if firings.removal {
            self.finish_match();
        }

        let elapsed_ms = std::mem::take(&mut self.frame_ms);
        self.state = tick(&self.state, frame_delta(elapsed_ms), &mut self.rng);
    }

    /// Cancel both timers, drop every shape and ignore all later calls.
    pub fn destroy(&mut self) {
        if self.torn_down {
            return;
        }
        self.timers.cancel_all();
        self.commands.clear();
        self.state = clear_shapes(&self.state);
        self.refresh_counter();
        self.torn_down = true;
        log::info!("Game torn down");
    }

    // ── internals ────────────────────────────────────────────────────────────

    fn click_while_playing(&mut self, point: Point) {
        let before = self.state.shapes.len();
        let (next, outcome) = resolve_click(&self.state, point, &mut self.rng);
        self.state = next;
        match outcome {
            ClickOutcome::Matched { shape_type } => {
                self.timers.start_removal(self.config.remove_interval_ms as f64);
                log::info!("Match started for type {shape_type}");
            }
            ClickOutcome::Spawned => {
                log::debug!(
                    "Spawned shape at click ({:.1}, {:.1}), {} -> {}",
                    point.x,
                    point.y,
                    before,
                    self.state.shapes.len()
                );
                self.refresh_counter();
            }
            ClickOutcome::Full => log::trace!("Click spawn refused: field full"),
            ClickOutcome::Ignored => {}
        }
    }

    fn spawn_random(&mut self) {
        let before = self.state.shapes.len();
        self.state = spawn_shape(&self.state, None, &mut self.rng);
        if self.state.shapes.len() > before {
            log::debug!("Spawned shape #{}", self.state.next_id - 1);
            self.refresh_counter();
        } else {
            log::trace!("Spawn refused: {} shapes on field", before);
        }
    }

    fn finish_match(&mut self) {
        let before = self.state.shapes.len();
        self.state = remove_matched(&self.state);
        log::debug!("Removed {} matched shapes", before - self.state.shapes.len());
        self.refresh_counter();
    }

    fn apply_control(&mut self, command: ControlCommand) {
        self.state = step_control(&self.state, command);
        if command.control == ControlName::SpawnRate && self.state.status == GameStatus::Playing {
            self.restart_spawn_timer();
        }
        log::info!(
            "{:?} {:?}: spawn_rate={} gravity={}",
            command.control,
            command.direction,
            self.state.spawn_rate,
            self.state.gravity
        );
        self.refresh_controls();
    }

    fn restart_spawn_timer(&mut self) {
        self.timers.start_spawn(spawn_period_ms(
            self.config.spawn_interval_ms,
            self.state.spawn_rate,
        ));
    }

    fn refresh_counter(&mut self) {
        self.view.update_counter(self.state.shapes.len());
    }

    fn refresh_controls(&mut self) {
        self.view.update_spawn_rate(self.state.spawn_rate);
        self.view.update_gravity(self.state.gravity);
    }
}
