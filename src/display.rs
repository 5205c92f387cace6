/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state and panels.  No game logic is performed; this module only
/// translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use shape_match::entities::{ControlName, GameState, Point, Shape, ShapeKind};
use shape_match::panel::{Hud, Layout, TITLE_TEXT};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::DarkGrey;
const C_HUD_COUNTER: Color = Color::Yellow;
const C_HUD_AREA: Color = Color::Green;
const C_BUTTON: Color = Color::Cyan;
const C_PANEL_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_RESULT: Color = Color::Red;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    layout: &Layout,
    state: &GameState,
    hud: &Hud,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, layout)?;
    draw_title(out, layout)?;
    draw_top_panel(out, layout, hud)?;

    for shape in &state.shapes {
        draw_shape(out, layout, shape)?;
    }

    draw_bottom_panel(out, layout, hud)?;
    draw_controls_hint(out, layout)?;
    draw_result(out, layout, hud)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, layout.hint_row()))?;
    out.flush()?;
    Ok(())
}

// ── Field ─────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let w = layout.width as usize;
    let top = layout.field_top() - 1;
    let bottom = layout.field_bottom();

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in layout.field_top()..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(layout.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

/// Faint caption in the middle of the field, drawn under the shapes.
fn draw_title<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let row = layout.field_top() + layout.inner_rows() / 2;
    let col = (layout.width / 2).saturating_sub(TITLE_TEXT.len() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(TITLE_TEXT))?;
    Ok(())
}

fn glyph(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Triangle => "▲",
        ShapeKind::Square => "■",
        ShapeKind::Pentagon => "⬟",
        ShapeKind::Hexagon => "⬢",
        ShapeKind::Circle => "●",
        ShapeKind::Ellipse => "⬬",
        ShapeKind::Star => "★",
    }
}

fn rgb(color: u32) -> Color {
    Color::Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

fn draw_shape<W: Write>(out: &mut W, layout: &Layout, shape: &Shape) -> std::io::Result<()> {
    let b = shape.bounds();
    let centre = Point::new(b.min_x + b.width() / 2.0, b.min_y + b.height() / 2.0);
    // Shapes above or below the field are clipped
    if let Some((col, row)) = layout.field_to_cell(centre) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(rgb(shape.color)))?;
        out.queue(Print(glyph(shape.kind())))?;
    }
    Ok(())
}

// ── Panels ────────────────────────────────────────────────────────────────────

fn draw_top_panel<W: Write>(out: &mut W, layout: &Layout, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_COUNTER))?;
    out.queue(Print(hud.top.counter_line()))?;

    let area = hud.top.area_line();
    let col = layout
        .width
        .saturating_sub(area.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_AREA))?;
    out.queue(Print(area))?;
    Ok(())
}

fn draw_bottom_panel<W: Write>(out: &mut W, layout: &Layout, hud: &Hud) -> std::io::Result<()> {
    let row = layout.panel_row();
    let entries = [
        (ControlName::SpawnRate, hud.bottom.spawn_rate_line()),
        (ControlName::Gravity, hud.bottom.gravity_line()),
    ];
    for (control, label) in entries {
        let col = layout.button_origin(control);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BUTTON))?;
        out.queue(Print("[-][+]"))?;
        out.queue(style::SetForegroundColor(C_PANEL_TEXT))?;
        out.queue(Print(format!(" {label}")))?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, layout.hint_row()))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Click a shape to clear its kind   Click space to add one   Q : Quit"))?;
    Ok(())
}

// ── Result overlay ────────────────────────────────────────────────────────────

fn draw_result<W: Write>(out: &mut W, layout: &Layout, hud: &Hud) -> std::io::Result<()> {
    let lines = hud.result.lines();
    if lines.is_empty() {
        return Ok(());
    }

    let cx = layout.width / 2;
    let start_row = (layout.field_top() + layout.inner_rows() / 2)
        .saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(C_RESULT))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}
