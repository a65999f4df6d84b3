//! Terminal falling-block puzzle runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! Logging goes to the file given with `--log-file`, never to the terminal
//! the game draws on.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use tui_tetromino::core::{
    AudioDirector, AudioSink, GameConfig, GameSnapshot, GameState, SoundCue, TrackId,
};
use tui_tetromino::input::{handle_key_event, handle_mouse_event, should_quit};
use tui_tetromino::term::{
    snapshot_fingerprint, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport,
};
use tui_tetromino::types::TICK_MS;

/// Redraw interval while nothing moves (overlay screens).
const STATIC_REDRAW_MS: u64 = 250;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence; the same seed replays the same pieces.
    /// Overrides the seed from the config file.
    #[arg(short, long)]
    seed: Option<u32>,
    /// JSON config file (level cap, seed, soundtrack).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write logs to this file. Filter with RUST_LOG (default: info).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Audio sink that only reports what it would play.
struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play_cue(&mut self, cue: SoundCue) {
        log::info!("audio: cue {}", cue.as_str());
    }

    fn stop_cue(&mut self, cue: SoundCue) {
        log::info!("audio: stop cue {}", cue.as_str());
    }

    fn play_music(&mut self, track: &TrackId) {
        log::info!("audio: play {}", track.as_str());
    }

    fn pause_music(&mut self) {
        log::info!("audio: pause music");
    }

    fn resume_music(&mut self) {
        log::info!("audio: resume music");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);
    log::info!("starting game: seed {}, level cap {}", seed, config.level_cap);

    // Restore the terminal before a panic message is printed, so it stays readable.
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stderr = io::stderr();
        let _ = crossterm::execute!(
            stderr,
            crossterm::event::DisableMouseCapture,
            crossterm::style::ResetColor,
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen
        );
        log::error!("panic: {panic_info}");
        eprint!("{panic_info}\n\n");
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("game loop failed: {err:#}");
    }
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, seed: u32) -> Result<()> {
    let mut game_state = GameState::new(seed).with_level_cap(config.level_cap);

    let view = GameView::default();
    let mut director = AudioDirector::new(config.soundtrack.clone());
    let mut sink = LogAudioSink;

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = GameSnapshot::default();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    game_state.snapshot_into(&mut snap);
    director.observe(&[], &snap, &mut sink);

    loop {
        // Render.
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, snapshot_fingerprint(&snap), !snap.playable()) {
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        log::info!("quit at score {}", game_state.score());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game_state.apply_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    // Hit-test against the frame the player is looking at.
                    let clicked = handle_mouse_event(mouse)
                        .and_then(|click| view.button_at(&snap, viewport, click.column, click.row));
                    if let Some(action) = clicked {
                        game_state.apply_action(action);
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game_state.tick();
        }

        game_state.snapshot_into(&mut snap);
        let events = game_state.take_events();
        director.observe(&events, &snap, &mut sink);
    }
}
