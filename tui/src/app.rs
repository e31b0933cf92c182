use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use termsweep_core::{BoardGenerator, Command, Game, Input, TickId};

use crate::keymap;
use crate::view::Renderer;

const TICK: Duration = Duration::from_secs(1);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Drives a [`Game`]: draws it, feeds it terminal events and carries out the commands it returns.
pub struct App<G> {
    game: Game<G>,
    renderer: Renderer,
    /// The one armed tick, if any. Replaced whenever the game schedules a new one.
    next_tick: Option<(Instant, TickId)>,
}

impl<G: BoardGenerator> App<G> {
    pub fn new(game: Game<G>, renderer: Renderer) -> Self {
        Self {
            game,
            renderer,
            next_tick: None,
        }
    }

    pub fn game(&self) -> &Game<G> {
        &self.game
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size().context("failed to query terminal size")?;
        self.dispatch(
            Input::Resize {
                width: size.width,
                height: size.height,
            },
            Instant::now(),
        );

        loop {
            self.draw(terminal)?;

            let (input, at) = match self.due_tick(Instant::now()) {
                Some(due) => due,
                None => match self.poll_terminal()? {
                    Some(input) => (input, Instant::now()),
                    None => continue,
                },
            };
            if self.dispatch(input, at).is_break() {
                log::info!("leaving after {}s", self.game.elapsed_secs());
                return Ok(());
            }
        }
    }

    /// Hands one input to the game. `at` is when it happened; a scheduled tick fires one second later.
    pub fn dispatch(&mut self, input: Input, at: Instant) -> ControlFlow<()> {
        match self.game.handle(input) {
            Command::None => {}
            Command::ScheduleTick(id) => self.next_tick = Some((at + TICK, id)),
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Takes the armed tick once its deadline has passed, along with the deadline itself so the clock does not drift.
    pub fn due_tick(&mut self, now: Instant) -> Option<(Input, Instant)> {
        match self.next_tick {
            Some((deadline, id)) if deadline <= now => {
                self.next_tick = None;
                Some((Input::Tick(id), deadline))
            }
            _ => None,
        }
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let Self { game, renderer, .. } = self;
        terminal
            .draw(|frame| {
                let layout = renderer.draw(frame, &game.snapshot());
                game.set_layout(layout);
            })
            .context("failed to draw frame")?;
        Ok(())
    }

    /// Waits for the next terminal event, but no longer than the armed tick allows.
    fn poll_terminal(&self) -> Result<Option<Input>> {
        let timeout = self
            .next_tick
            .map_or(IDLE_POLL, |(deadline, _)| {
                deadline.saturating_duration_since(Instant::now())
            });
        if !event::poll(timeout).context("failed to poll terminal events")? {
            return Ok(None);
        }
        let event = event::read().context("failed to read terminal event")?;
        Ok(keymap::translate(&event))
    }
}
