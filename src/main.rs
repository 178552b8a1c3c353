//! Arcade Shooter - terminal entry point
//!
//! Owns the terminal, runs the fixed 60 Hz frame loop and wires the core's
//! collaborator traits to the crossterm frontend.

mod frontend;

use std::io::{BufWriter, Write, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{ExecutableCommand, QueueableCommand, cursor, style, terminal};

use arcade_shooter::Config;
use arcade_shooter::assets::Assets;
use arcade_shooter::audio::AudioManager;
use arcade_shooter::consts::{MAX_SUBSTEPS, SIM_DT};
use arcade_shooter::input::read_tick_input;
use arcade_shooter::render::draw_frame;
use arcade_shooter::sim::{GameEvent, GamePhase, Session, TickInput, tick};

use frontend::Viewport;
use frontend::assets::GlyphLoader;
use frontend::audio::TermAudio;
use frontend::canvas::Canvas;
use frontend::input::TermInput;

const CONFIG_FILE: &str = "arcade.json";
const FRAME: Duration = Duration::from_micros(16_667);

fn load_config() -> Result<Config> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        Config::load(path).with_context(|| format!("reading config {}", path.display()))
    } else {
        log::info!("No {CONFIG_FILE}, using defaults");
        Ok(Config::default())
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Fold this frame's input into whatever one-shots have not been consumed by
/// a tick yet. Movement always follows the latest sample.
fn carry_input(pending: &mut TickInput, fresh: TickInput) {
    pending.move_dir = fresh.move_dir;
    pending.fire |= fresh.fire;
    pending.pause |= fresh.pause;
    pending.confirm |= fresh.confirm;
    pending.exit |= fresh.exit;
    pending.click = fresh.click.or(pending.click);
    pending.skin_choice = fresh.skin_choice.or(pending.skin_choice);
}

fn viewport(config: &Config) -> Result<Viewport> {
    let (cols, rows) = terminal::size().context("querying terminal size")?;
    Ok(Viewport::new(config.screen.size(), cols, rows))
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut session: Session,
    assets: &Assets,
    loader: GlyphLoader,
) -> Result<()> {
    let viewport = viewport(session.config())?;
    let (glyphs, bells) = loader.into_parts();
    let mut canvas = Canvas::new(viewport, glyphs);
    let mut input = TermInput::new(viewport);
    let mut audio = AudioManager::new(TermAudio::new(bells));

    let mut pending = TickInput::default();
    let mut accumulator = 0.0f32;
    let mut last = Instant::now();
    let mut last_phase = session.phase;

    loop {
        let frame_start = Instant::now();
        input.begin_frame();
        while let Ok(event) = rx.try_recv() {
            if let Event::Resize(cols, rows) = event {
                let viewport = Viewport::new(session.config().screen.size(), cols, rows);
                canvas.resize(viewport);
                input.set_viewport(viewport);
            }
            input.handle_event(&event);
        }
        carry_input(&mut pending, read_tick_input(&input));

        let dt = frame_start.duration_since(last).as_secs_f32().min(0.1);
        last = frame_start;
        accumulator += dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut session, &pending, SIM_DT);
            pending = TickInput {
                move_dir: pending.move_dir,
                ..Default::default()
            };
            accumulator -= SIM_DT;
            substeps += 1;
        }

        let events = session.drain_events();
        audio.handle_events(&events, assets);
        if events.contains(&GameEvent::ExitRequested) {
            log::info!("Exit requested");
            return Ok(());
        }
        if session.phase != last_phase {
            if session.phase == GamePhase::GameOver {
                log::info!(
                    "Game over: score {}, {} ticks",
                    session.player.score(),
                    session.time_ticks
                );
            }
            last_phase = session.phase;
        }

        canvas.clear();
        draw_frame(&session, assets, &mut canvas);
        canvas.present(out)?;
        if audio.sink_mut().take_ring() {
            out.queue(style::Print('\x07'))?;
        }
        out.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = load_config()?;
    let mut loader = GlyphLoader::default();
    let assets = Assets::load(&config.assets, &mut loader).context("loading assets")?;
    let seed = time_seed();
    log::info!("Arcade Shooter starting with seed {seed}");
    let session = Session::new(config, seed);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;
    // Release events where the terminal supports them; others fall back to the hold window
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Reader thread only forwards events; the session is touched by the frame loop alone
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(event) = event::read() {
            if tx.send(event).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, session, &assets, loader);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
