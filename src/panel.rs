/// Display-only widgets and terminal layout.
///
/// The widgets hold the values the renderer prints; the controller drives
/// them through `GameView`.  `Layout` maps terminal cells onto the field and
/// the bottom-panel buttons.

use crate::entities::{ControlCommand, ControlName, Direction, FieldSpec, GameStatus, Point};

pub const TITLE_TEXT: &str = "Generation Area";
pub const COUNTER_TEXT: &str = "Number of current shapes: ";
pub const AREA_TEXT: &str = "Surface area occupied by shapes: ";
pub const AREA_UNIT_TEXT: &str = " px²";
pub const SPAWN_RATE_TEXT: &str = "Number of shapes per sec: ";
pub const GRAVITY_TEXT: &str = "Gravity value: ";
pub const WIN_TEXT: &str = "YOU WIN!";
pub const LOSE_TEXT: &str = "YOU LOSE! TIME IS LEFT!";
pub const NEW_ROUND_TEXT: &str = "CLICK TO START NEW ROUND!";

/// Setter-style sink the controller pushes display values into.
pub trait GameView {
    fn update_counter(&mut self, count: usize);
    fn update_area_text(&mut self, area: u64);
    fn update_spawn_rate(&mut self, rate: u32);
    fn update_gravity(&mut self, gravity: u32);
    fn show_result(&mut self, status: GameStatus);
    /// Hide the result screen.
    fn reset(&mut self);
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopPanel {
    pub counter: usize,
    pub area: u64,
}

impl TopPanel {
    pub fn counter_line(&self) -> String {
        format!("{COUNTER_TEXT}{}", self.counter)
    }

    pub fn area_line(&self) -> String {
        format!("{AREA_TEXT}{}{AREA_UNIT_TEXT}", self.area)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BottomPanel {
    pub spawn_rate: u32,
    pub gravity: u32,
}

impl Default for BottomPanel {
    fn default() -> Self {
        Self { spawn_rate: 1, gravity: 1 }
    }
}

impl BottomPanel {
    pub fn spawn_rate_line(&self) -> String {
        format!("{SPAWN_RATE_TEXT}{}", self.spawn_rate)
    }

    pub fn gravity_line(&self) -> String {
        format!("{GRAVITY_TEXT}{}", self.gravity)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultScreen {
    pub shown: Option<GameStatus>,
}

impl ResultScreen {
    /// Lines to overlay on the field, or nothing while playing.
    pub fn lines(&self) -> Vec<&'static str> {
        match self.shown {
            Some(GameStatus::Won) => vec![WIN_TEXT, NEW_ROUND_TEXT],
            Some(GameStatus::Lost) => vec![LOSE_TEXT, NEW_ROUND_TEXT],
            Some(GameStatus::Playing) | None => Vec::new(),
        }
    }
}

/// All three widgets together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    pub top: TopPanel,
    pub bottom: BottomPanel,
    pub result: ResultScreen,
}

impl GameView for Hud {
    fn update_counter(&mut self, count: usize) {
        self.top.counter = count;
    }

    fn update_area_text(&mut self, area: u64) {
        self.top.area = area;
    }

    fn update_spawn_rate(&mut self, rate: u32) {
        self.bottom.spawn_rate = rate;
    }

    fn update_gravity(&mut self, gravity: u32) {
        self.bottom.gravity = gravity;
    }

    fn show_result(&mut self, status: GameStatus) {
        self.result.shown = match status {
            GameStatus::Playing => None,
            other => Some(other),
        };
    }

    fn reset(&mut self) {
        self.result.shown = None;
    }
}

// ── Terminal layout ──────────────────────────────────────────────────────────

/// Width of one `[-]` / `[+]` button in cells.
pub const BUTTON_CELLS: u16 = 3;

/// Widest value a control label can show (`u32::MAX`).
const VALUE_CELLS: u16 = 10;

/// First column the gravity buttons may use: past the spawn-rate buttons,
/// their label at its widest value, and a two-cell gap.
pub const GRAVITY_MIN_ORIGIN: u16 =
    1 + BUTTON_CELLS * 2 + 1 + SPAWN_RATE_TEXT.len() as u16 + VALUE_CELLS + 2;

/// Screen regions for a terminal of `width × height` cells:
///
/// * row 0 — top panel
/// * row 1 / row height-3 — field border
/// * rows 2 .. height-3 — field interior
/// * row height-2 — bottom panel buttons
/// * row height-1 — hint line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    pub field: FieldSpec,
}

impl Layout {
    pub fn new(width: u16, height: u16, field: FieldSpec) -> Self {
        Self { width, height, field }
    }

    pub fn field_top(&self) -> u16 {
        2
    }

    /// Row of the bottom border.
    pub fn field_bottom(&self) -> u16 {
        self.height.saturating_sub(3)
    }

    pub fn inner_cols(&self) -> u16 {
        self.width.saturating_sub(2)
    }

    pub fn inner_rows(&self) -> u16 {
        self.field_bottom().saturating_sub(self.field_top())
    }

    pub fn panel_row(&self) -> u16 {
        self.height.saturating_sub(2)
    }

    pub fn hint_row(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    /// Centre of the cell, in field units.  `None` outside the interior.
    pub fn cell_to_field(&self, col: u16, row: u16) -> Option<Point> {
        let cols = self.inner_cols();
        let rows = self.inner_rows();
        if cols == 0 || rows == 0 {
            return None;
        }
        if col < 1 || col > cols || row < self.field_top() || row >= self.field_bottom() {
            return None;
        }
        let fx = (col - 1) as f32 + 0.5;
        let fy = (row - self.field_top()) as f32 + 0.5;
        Some(Point::new(
            fx / cols as f32 * self.field.width,
            fy / rows as f32 * self.field.height,
        ))
    }

    /// Cell showing field point `p`.  `None` while the point is off-field.
    pub fn field_to_cell(&self, p: Point) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.field.width || p.y >= self.field.height {
            return None;
        }
        let col = (p.x / self.field.width * self.inner_cols() as f32) as u16;
        let row = (p.y / self.field.height * self.inner_rows() as f32) as u16;
        Some((1 + col, self.field_top() + row))
    }

    /// First column of the button pair for `control`.  Gravity sits mid-row
    /// on wide terminals and never overlaps the spawn-rate label.
    pub fn button_origin(&self, control: ControlName) -> u16 {
        match control {
            ControlName::SpawnRate => 1,
            ControlName::Gravity => (self.width / 2).max(GRAVITY_MIN_ORIGIN),
        }
    }

    pub fn button_at(&self, col: u16, row: u16) -> Option<ControlCommand> {
        if row != self.panel_row() {
            return None;
        }
        [ControlName::SpawnRate, ControlName::Gravity]
            .into_iter()
            .find_map(|control| {
                let start = self.button_origin(control);
                let direction = if (start..start + BUTTON_CELLS).contains(&col) {
                    Direction::Decrease
                } else if (start + BUTTON_CELLS..start + BUTTON_CELLS * 2).contains(&col) {
                    Direction::Increase
                } else {
                    return None;
                };
                Some(ControlCommand { control, direction })
            })
    }
}
