mod audio;
mod audio_api;
mod guard;
mod middle;
mod scene;
mod shared;
mod synth;
mod tui;

use std::io::stdout;
use std::time::Instant;

use crossterm::event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{cursor, execute};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use guard::GuardState;
use middle::Middle;
use shared::{FRAMES_PER_SECOND, WINDOW_TITLE};
use synth::SoundBank;
use tui::clock::FrameClock;
use tui::input::EXIT_KEY;
use tui::mode::KeyTracker;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    init_logging();

    // synthesize everything before the screen goes blank, it takes a moment
    let bank = SoundBank::build();
    let ambient = synth::synthesize_ambient();
    log::info!("sound bank ready: {} tones, {:.1}s ambient loop", bank.len(), ambient.duration_secs());

    let audio = audio::start_audio()?;
    for cmd in middle::startup_commands(&bank, &ambient, audio.sample_rate()) {
        audio.send(cmd);
    }

    let guard = TerminalGuard::enter()?; // restores the terminal on every way out
    let (cols, rows) = terminal::size()?;
    log::info!(
        "terminal {}x{} cells, key release reporting: {}",
        cols,
        rows,
        guard.keyboard_enhanced
    );

    let mut middle = Middle::new(bank, StdRng::from_entropy(), cols, rows);
    let mut tracker = KeyTracker::new(guard.keyboard_enhanced);

    let backend = CrosstermBackend::new(stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let mut clock = FrameClock::new(FRAMES_PER_SECOND, Instant::now());
    loop {
        // blocks until the next frame is due
        let events = tui::input::poll_input(clock.deadline(), &mut tracker)?;
        clock.advance(Instant::now());
        tracker.advance_frame();

        for event in events {
            for cmd in middle.handle_input(event) {
                audio.send(cmd);
            }
        }

        if middle.tick(tracker.is_down(EXIT_KEY)) == GuardState::Exit {
            break;
        }

        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &middle.display_state());
        })?;
    }

    drop(term);
    drop(guard);
    drop(audio);
    log::info!("bye");
    Ok(())
}

// stdout belongs to the full screen, so the log goes to a file in the temp dir
fn init_logging() {
    let path = std::env::temp_dir().join("keymash.log");
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        // Real press/release detection where the terminal supports it;
        // everything else falls back to repeat-based key tracking.
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        let guard = Self { keyboard_enhanced }; // from here on, drop undoes whatever got done
        execute!(stdout(), EnterAlternateScreen, cursor::Hide, SetTitle(WINDOW_TITLE))?;
        if keyboard_enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
