mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::ThreadRng;
use rand::thread_rng;

use shape_match::config::{load_config_from_path, GameConfig, CONFIG_ENV_VAR};
use shape_match::controller::Game;
use shape_match::panel::{Hud, Layout};

// ── Startup ───────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(about = "Click a shape to clear every shape of its kind")]
struct CliArgs {
    /// JSON file overriding the default game tuning.
    #[arg(long, value_name = "PATH", env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

fn load_config(args: &CliArgs) -> (GameConfig, Option<String>) {
    match &args.config {
        Some(path) => match load_config_from_path(path) {
            Ok(config) => (config, None),
            Err(err) => (GameConfig::default(), Some(err)),
        },
        None => (GameConfig::default(), None),
    }
}

/// Raw mode owns the screen, so log records go to a file.
fn init_logging(path: &str) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each frame moves the clock to now, drains
/// input, fires due timers and advances motion, then draws.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game<ThreadRng, Hud>,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
) -> std::io::Result<()> {
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let (width, height) = terminal::size()?;
        let layout = Layout::new(width, height, game.state().field);

        let now = Instant::now();
        game.begin_frame(now.duration_since(last).as_secs_f64() * 1000.0);
        last = now;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if let Some(command) = layout.button_at(column, row) {
                        game.queue_control(command);
                    } else if let Some(point) = layout.cell_to_field(column, row) {
                        game.on_field_click(point);
                    }
                }
                _ => {}
            }
        }

        game.end_frame();

        display::render(out, &layout, game.state(), game.view())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let args = CliArgs::parse();
    let (config, config_err) = load_config(&args);
    init_logging(&config.log_file);
    if let Some(err) = config_err {
        log::warn!("{err}; using default config");
    }
    log::info!("shape_match starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let frame = Duration::from_millis(config.frame_ms);
    let mut game = Game::new(config, thread_rng(), Hud::default());
    let result = game_loop(&mut out, &mut game, &rx, frame);
    game.destroy();

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("Terminal error: {err}");
    }
    result
}
