//! Terminal runner (default binary).
//!
//! Drives one session from the keyboard and a fixed-rate frame clock, and
//! renders through the framebuffer-based terminal view.

mod config;

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::core::{GameSnapshot, Session, SessionDelta, UniformPieces};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{cue_for, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

use config::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    config::init_logging(args.log_file.as_ref())?;

    let seed = args.seed();
    let session = Session::new(args.session_config()?, UniformPieces::seeded(seed));
    info!("seed {}", seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: Session, args: &Args) -> Result<()> {
    let view = GameView::new(args.cell_width, 1);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::new(args.cols, args.rows);

    let delta = session.start_session();
    feedback(term, &delta, args.bell);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = frame
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit at score {}", session.score());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let delta = session.apply(action);
                        feedback(term, &delta, args.bell);
                    }
                }
                Event::Resize(..) => term.redraw_all(),
                _ => {}
            }
        }

        // Tick with the real elapsed time.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let delta = session.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
            feedback(term, &delta, args.bell);
        }
    }
}

/// Loud cues beep with the next frame.
fn feedback(term: &mut TerminalRenderer, delta: &SessionDelta, bell: bool) {
    if bell && delta.events.iter().filter_map(cue_for).any(|c| c.is_loud()) {
        term.queue_bell();
    }
}
