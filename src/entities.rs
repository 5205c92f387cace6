/// All game entity types — pure data, no game rules.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A point in field units (origin = top-left corner of the field,
/// y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned bounding box.  Edges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

// ── Shapes ────────────────────────────────────────────────────────────────────

/// The seven drawable shape kinds.  Type ids map onto these in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Circle,
    Ellipse,
    Star,
}

impl ShapeKind {
    /// Ids outside the named range draw as a star.
    pub fn from_type(shape_type: u8) -> Self {
        match shape_type {
            0 => ShapeKind::Triangle,
            1 => ShapeKind::Square,
            2 => ShapeKind::Pentagon,
            3 => ShapeKind::Hexagon,
            4 => ShapeKind::Circle,
            5 => ShapeKind::Ellipse,
            _ => ShapeKind::Star,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: u64,
    /// Matching key.  Two shapes match iff their `shape_type` is equal,
    /// even when both fall back to the same drawn kind.
    pub shape_type: u8,
    pub position: Point,
    /// Always below the visible field, so the shape keeps drifting down.
    pub patrol_target: Point,
    /// Fall speed in field units per 60 Hz frame.
    pub gravity: u32,
    /// 24-bit RGB.
    pub color: u32,
    /// Characteristic size (radius / half-width) in field units.
    pub size: f32,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        ShapeKind::from_type(self.shape_type)
    }

    /// Bounding box of the drawn outline.  Rect-like kinds are anchored at
    /// their top-left corner, round kinds at their centre.
    pub fn bounds(&self) -> Bounds {
        let Point { x, y } = self.position;
        let s = self.size;
        match self.kind() {
            ShapeKind::Triangle => Bounds { min_x: x, min_y: y, max_x: x + s * 2.0, max_y: y + s * 1.5 },
            ShapeKind::Square => Bounds { min_x: x, min_y: y, max_x: x + s * 1.75, max_y: y + s * 1.75 },
            ShapeKind::Pentagon => polygon_bounds(5, s, x, y),
            ShapeKind::Hexagon => polygon_bounds(6, s, x, y),
            ShapeKind::Circle | ShapeKind::Star => Bounds { min_x: x - s, min_y: y - s, max_x: x + s, max_y: y + s },
            ShapeKind::Ellipse => Bounds { min_x: x - s, min_y: y - s * 0.75, max_x: x + s, max_y: y + s * 0.75 },
        }
    }
}

/// Bounds of a regular polygon whose first vertex sits at angle 0.
fn polygon_bounds(sides: u32, radius: f32, cx: f32, cy: f32) -> Bounds {
    let step = std::f32::consts::TAU / sides as f32;
    let mut b = Bounds { min_x: f32::MAX, min_y: f32::MAX, max_x: f32::MIN, max_y: f32::MIN };
    for i in 0..sides {
        let angle = step * i as f32;
        let vx = cx + angle.cos() * radius;
        let vy = cy + angle.sin() * radius;
        b.min_x = b.min_x.min(vx);
        b.min_y = b.min_y.min(vy);
        b.max_x = b.max_x.max(vx);
        b.max_y = b.max_y.max(vy);
    }
    b
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Which bottom-panel parameter a button steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlName {
    SpawnRate,
    Gravity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// A bottom-panel button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlCommand {
    pub control: ControlName,
    pub direction: Direction,
}

/// Field dimensions and shape tuning, fixed for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub width: f32,
    pub height: f32,
    pub shape_size: f32,
    /// Highest type id handed out by the spawner (inclusive).
    pub type_count: u8,
    pub max_shapes: usize,
}

/// The entire mutable game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Spawn order.
    pub shapes: Vec<Shape>,
    pub status: GameStatus,
    /// Never below 1.
    pub gravity: u32,
    /// Shapes per second; never below 1.
    pub spawn_rate: u32,
    /// Set while a match cycle is pending removal.
    pub active_target_type: Option<u8>,
    pub next_id: u64,
    pub field: FieldSpec,
}
