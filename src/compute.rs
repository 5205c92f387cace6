/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    ControlCommand, ControlName, Direction, FieldSpec, GameState, GameStatus, Point, Shape,
};

/// Colours are drawn from the full 24-bit range.
pub const MAX_COLOR: u32 = 0xFF_FFFF;

/// Motion speeds are expressed per frame at this rate.
pub const REFERENCE_FPS: f64 = 60.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a given configuration.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        shapes: Vec::new(),
        status: GameStatus::Playing,
        gravity: config.initial_gravity.max(1),
        spawn_rate: config.initial_spawn_rate.max(1),
        active_target_type: None,
        next_id: 0,
        field: config.field_spec(),
    }
}

// ── Random draws ─────────────────────────────────────────────────────────────

/// A point below the visible field, so the shape keeps falling toward it.
pub fn random_patrol_target(field: &FieldSpec, rng: &mut impl Rng) -> Point {
    Point::new(
        rng.gen::<f32>() * field.width,
        field.height + field.shape_size * 2.0,
    )
}

/// Just above the top edge, never hugging the left wall.
pub fn random_spawn_position(field: &FieldSpec, rng: &mut impl Rng) -> Point {
    Point::new(
        field.shape_size + rng.gen::<f32>() * (field.width - field.shape_size),
        -field.shape_size,
    )
}

/// Uniform over `0..=type_count` (inclusive upper bound).
pub fn random_shape_type(field: &FieldSpec, rng: &mut impl Rng) -> u8 {
    rng.gen_range(0..=field.type_count)
}

pub fn random_color(rng: &mut impl Rng) -> u32 {
    rng.gen_range(0..=MAX_COLOR)
}

// ── Timing helpers ───────────────────────────────────────────────────────────

/// Period between automatic spawns.
pub fn spawn_period_ms(spawn_interval_ms: u64, spawn_rate: u32) -> f64 {
    spawn_interval_ms as f64 / spawn_rate.max(1) as f64
}

/// Convert wall-clock milliseconds into 60 Hz frame units, clamped to four
/// decimal digits.
pub fn frame_delta(elapsed_ms: f64) -> f32 {
    let dt = elapsed_ms * REFERENCE_FPS / 1000.0;
    ((dt * 10_000.0).round() / 10_000.0) as f32
}

// ── Shape motion ─────────────────────────────────────────────────────────────

/// Step one shape toward its patrol target.  Once within `size` of the
/// target it jumps back above the top edge with a fresh target.
pub fn advance_shape(shape: &Shape, dt: f32, field: &FieldSpec, rng: &mut impl Rng) -> Shape {
    let dx = shape.patrol_target.x - shape.position.x;
    let dy = shape.patrol_target.y - shape.position.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance > shape.size {
        let speed = shape.gravity as f32 * dt;
        Shape {
            position: Point::new(
                shape.position.x + dx / distance * speed,
                shape.position.y + dy / distance * speed,
            ),
            ..shape.clone()
        }
    } else {
        Shape {
            position: Point::new(shape.position.x, -shape.size),
            patrol_target: random_patrol_target(field, rng),
            ..shape.clone()
        }
    }
}

// ── Spawn / removal ──────────────────────────────────────────────────────────

/// Add one shape at `position` (or a random spot above the field).  Returns
/// the state unchanged when the field is already full.
pub fn spawn_shape(state: &GameState, position: Option<Point>, rng: &mut impl Rng) -> GameState {
    if state.shapes.len() >= state.field.max_shapes {
        return state.clone();
    }

    let position = position.unwrap_or_else(|| random_spawn_position(&state.field, rng));
    let shape = Shape {
        id: state.next_id,
        shape_type: random_shape_type(&state.field, rng),
        position,
        patrol_target: random_patrol_target(&state.field, rng),
        gravity: state.gravity,
        color: random_color(rng),
        size: state.field.shape_size,
    };

    let mut shapes = state.shapes.clone();
    shapes.push(shape);
    GameState {
        shapes,
        next_id: state.next_id + 1,
        ..state.clone()
    }
}

pub fn clear_shapes(state: &GameState) -> GameState {
    GameState {
        shapes: Vec::new(),
        active_target_type: None,
        ..state.clone()
    }
}

// ── Hit-test & match ─────────────────────────────────────────────────────────

/// Index of the first shape (spawn order) whose bounds contain `point`.
pub fn find_hit(state: &GameState, point: Point) -> Option<usize> {
    state.shapes.iter().position(|s| s.bounds().contains(point))
}

/// Mark the type of the shape at `index` as the active target and paint
/// every shape of that type with its colour.
pub fn begin_match(state: &GameState, index: usize) -> GameState {
    let Some(target) = state.shapes.get(index) else {
        return state.clone();
    };
    let target_type = target.shape_type;
    let target_color = target.color;

    let shapes = state
        .shapes
        .iter()
        .map(|s| {
            if s.shape_type == target_type {
                Shape { color: target_color, ..s.clone() }
            } else {
                s.clone()
            }
        })
        .collect();

    GameState {
        shapes,
        active_target_type: Some(target_type),
        ..state.clone()
    }
}

/// Drop every shape of the active target type and reopen matching.
pub fn remove_matched(state: &GameState) -> GameState {
    let Some(target_type) = state.active_target_type else {
        return state.clone();
    };

    let mut shapes = state.shapes.clone();
    for i in (0..shapes.len()).rev() {
        if shapes[i].shape_type == target_type {
            shapes.remove(i);
        }
    }

    GameState {
        shapes,
        active_target_type: None,
        ..state.clone()
    }
}

/// Result of a field click while playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A match cycle is already pending.
    Ignored,
    Matched { shape_type: u8 },
    Spawned,
    /// Empty space was clicked but the field is full.
    Full,
}

pub fn resolve_click(
    state: &GameState,
    point: Point,
    rng: &mut impl Rng,
) -> (GameState, ClickOutcome) {
    if state.status != GameStatus::Playing || state.active_target_type.is_some() {
        return (state.clone(), ClickOutcome::Ignored);
    }

    if let Some(index) = find_hit(state, point) {
        let next = begin_match(state, index);
        let shape_type = state.shapes[index].shape_type;
        return (next, ClickOutcome::Matched { shape_type });
    }

    let next = spawn_shape(state, Some(point), rng);
    let outcome = if next.shapes.len() > state.shapes.len() {
        ClickOutcome::Spawned
    } else {
        ClickOutcome::Full
    };
    (next, outcome)
}

// ── Control panel ────────────────────────────────────────────────────────────

fn step_value(value: u32, direction: Direction) -> u32 {
    match direction {
        Direction::Increase => value.saturating_add(1),
        Direction::Decrease => value.saturating_sub(1).max(1),
    }
}

/// Step one bottom-panel parameter.  Gravity is written through to every
/// live shape straight away.
pub fn step_control(state: &GameState, command: ControlCommand) -> GameState {
    match command.control {
        ControlName::SpawnRate => GameState {
            spawn_rate: step_value(state.spawn_rate, command.direction),
            ..state.clone()
        },
        ControlName::Gravity => {
            let gravity = step_value(state.gravity, command.direction);
            GameState {
                shapes: state
                    .shapes
                    .iter()
                    .map(|s| Shape { gravity, ..s.clone() })
                    .collect(),
                gravity,
                ..state.clone()
            }
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance every shape by one frame.  Frozen unless playing.
pub fn tick(state: &GameState, dt: f32, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let shapes = state
        .shapes
        .iter()
        .map(|s| advance_shape(s, dt, &state.field, rng))
        .collect();

    GameState { shapes, ..state.clone() }
}
