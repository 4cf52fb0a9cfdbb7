use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::config::{Args, LogTarget};
use space_shooter::display::{self, FrameBuffer};
use space_shooter::error::ShooterError;
use space_shooter::game::Game;
use space_shooter::input::{is_quit, wait_for_ack, Ack, KeyTracker};
use space_shooter::storage::{FileStore, KeyValueStore, MemoryStore};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the screen, so log lines only go to a file.  Without
/// `--log-file` they are discarded, even when RUST_LOG is set.
fn init_logging(args: &Args) -> Result<(), ShooterError> {
    use env_logger::{Builder, Env, Target};

    match args.log_target() {
        LogTarget::File(path) => {
            let file = File::create(&path)
                .map_err(|source| ShooterError::LogFile { path, source })?;
            Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        LogTarget::Discard => Builder::new()
            .filter_level(log::LevelFilter::Off)
            .target(Target::Pipe(Box::new(io::sink())))
            .init(),
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs sessions back to back until the player quits.
///
/// Each frame: drain pending terminal events into the key tracker, take a
/// snapshot, advance the game by one frame, render.  When a session ends
/// the notice blocks the loop; acknowledging it starts a fresh session on
/// a fresh canvas.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
    reports_release: bool,
) -> Result<(), ShooterError> {
    let store: Box<dyn KeyValueStore> = if args.no_persist {
        Box::new(MemoryStore::new())
    } else {
        let dir = args.data_dir.clone().unwrap_or_else(FileStore::default_dir);
        log::info!("High score store: {}", dir.display());
        Box::new(FileStore::new(dir))
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(store, rng);

    let frame_time = args.frame_duration();
    let mut size = terminal::size()?;
    let mut fb = FrameBuffer::for_terminal(size.0, size.1);
    let mut keys = KeyTracker::for_fps(args.fps, reports_release);

    // Host-side frame count for key hold windows; keeps running across sessions
    let mut frame: u64 = 0;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                        return Ok(());
                    }
                    keys.record(code, kind, frame);
                }
                Event::Resize(w, h) => {
                    size = (w, h);
                    fb = FrameBuffer::for_terminal(w, h);
                    out.queue(terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
        }

        let snapshot = keys.snapshot(frame);
        let notice = game.advance(&snapshot);
        display::render(out, &mut fb, game.state())?;

        if let Some(notice) = notice {
            display::draw_notice(out, &notice, size.0, size.1)?;
            if wait_for_ack(rx, &mut size) == Ack::Quit {
                return Ok(());
            }
            game.restart();
            keys.clear();
            fb = FrameBuffer::for_terminal(size.0, size.1);
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            continue;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), ShooterError> {
    let args = Args::parse();
    args.validate()?;
    init_logging(&args)?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Only trust held keys to stay down until release when the terminal
    // actually speaks the protocol; pushing the flags succeeds regardless.
    // Asked before the reader thread starts so it can't steal the reply.
    let reports_release =
        keyboard_enhanced && matches!(terminal::supports_keyboard_enhancement(), Ok(true));
    log::info!("Key release events: {}", reports_release);

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
            Err(e) => {
                log::error!("Event reader stopped: {}", e);
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, &args, reports_release);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("{}", e);
    }
    result
}
