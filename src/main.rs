//! Brick Breaker entry point
//!
//! Sets up logging and the terminal, then runs the fixed-cadence game loop.

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal,
};

use brick_breaker::Game;
use brick_breaker::platform::{Action, FixedTicker, KeyTracker};
use brick_breaker::renderer::TerminalSink;
use brick_breaker::settings::Settings;
use brick_breaker::sim::GameEvent;

/// Longest the loop waits on input before checking the ticker again
const MAX_POLL: Duration = Duration::from_millis(16);

fn init_logging(settings: &Settings) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &settings.log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("cannot open log file {}: {e}", path.display()),
        }
    }
    builder.init();
}

fn log_events(game: &Game) {
    for event in &game.state().events {
        match event {
            GameEvent::BrickDestroyed { index } => {
                log::debug!("brick {} destroyed, score {}", index, game.state().score)
            }
            GameEvent::CountdownTick { remaining } => log::trace!("{} s left", remaining),
            GameEvent::GameOver { reason } => log::info!(
                "game over ({:?}) with score {}, {} bricks cleared after {} ticks",
                reason,
                game.state().score,
                game.state().cleared_bricks(),
                game.state().time_ticks
            ),
            GameEvent::WallBounce | GameEvent::CeilingBounce | GameEvent::PaddleBounce => {
                log::trace!("{:?}", event)
            }
        }
    }
}

/// Run until the player quits
fn run<W: Write>(sink: &mut TerminalSink<W>, settings: &Settings) -> std::io::Result<()> {
    let mut game = Game::new();
    let mut keys = KeyTracker::new(
        settings.initial_hold_window_frames,
        settings.hold_window_frames,
    );
    let mut ticker = FixedTicker::new(settings.tick_interval(), settings.max_catch_up_ticks);
    let mut last = Instant::now();
    let mut dirty = true;

    log::info!("session started");

    loop {
        keys.next_frame();

        // Drain pending input without blocking past the next tick
        let mut wait = ticker.until_next().min(MAX_POLL);
        while event::poll(wait)? {
            wait = Duration::ZERO;
            match event::read()? {
                Event::Key(key) => match keys.handle(&key) {
                    Some(Action::Quit) => {
                        log::info!("quit with score {}", game.state().score);
                        return Ok(());
                    }
                    Some(Action::Restart) if game.is_game_over() => {
                        game.restart();
                        keys.clear();
                        ticker.reset();
                        dirty = true;
                        log::info!("session restarted");
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    sink.resize(cols, rows);
                    dirty = true;
                }
                _ => {}
            }
        }

        game.set_move_left(keys.is_held(Action::MoveLeft));
        game.set_move_right(keys.is_held(Action::MoveRight));

        let now = Instant::now();
        let due = ticker.advance(now - last);
        last = now;

        for _ in 0..due {
            if game.is_game_over() {
                break;
            }
            game.step();
            log_events(&game);
            dirty = true;
        }

        if dirty {
            game.render().draw(sink)?;
            dirty = false;
        }
    }
}

fn main() -> std::io::Result<()> {
    // Logging depends on settings, so report load problems once it is up
    let loaded = Settings::load();
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&settings);
    if let Err(e) = &loaded {
        log::warn!("{} ({}), using defaults", e, Settings::default_path().display());
    }
    log::info!("Brick Breaker starting with {:?}", settings);

    let (cols, rows) = terminal::size()?;
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release events; terminals without support keep working on repeats
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::debug!("keyboard enhancement: {}", keyboard_enhanced);

    let mut sink = TerminalSink::new(out, cols, rows);
    let result = run(&mut sink, &settings);

    // Always restore the terminal
    let mut out = sink.into_inner();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("game loop failed: {}", e);
    }
    result
}
