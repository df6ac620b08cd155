use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::Event;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::game::{GameState, TickOutcome, Transition};
use crate::input::{self, Input};
use crate::render::{self, Layout};
use crate::score::ScoreStore;
use crate::term::TermManager;
use crate::ticker::Ticker;

// How long to wait for input while no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The game plus everything that reacts to it: the tick timer and the
/// high score store.
pub struct Session<S: ScoreStore> {
    game: GameState,
    ticker: Ticker,
    store: S,
    // Highest score handed to the store, whether or not the write worked.
    attempted_high_score: u32,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(game: GameState, interval: Duration, store: S) -> Self {
        let attempted_high_score = game.high_score();
        Session { game, ticker: Ticker::new(interval), store, attempted_high_score }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn start(&mut self, now: Instant) {
        self.ticker.start(now);
    }

    /// Runs the tick if one is due. Returns whether anything changed.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        if !self.ticker.fire(now) {
            return false;
        }

        let outcome = self.game.tick();
        match outcome {
            TickOutcome::Crashed => {
                self.ticker.stop();
                info!(score = self.game.score(), length = self.game.snake().len(), "game over");
            }
            TickOutcome::Ate => debug!(score = self.game.score(), "score"),
            TickOutcome::Moved | TickOutcome::Idle => {}
        }
        self.persist_high_score();

        outcome != TickOutcome::Idle
    }

    /// Applies one input. `Break` means the player wants to leave.
    pub fn handle(&mut self, input: Input, now: Instant) -> ControlFlow<(), bool> {
        match input {
            Input::Quit => ControlFlow::Break(()),
            Input::Turn(dir) => {
                if !self.game.turn(dir) {
                    debug!(?dir, current = ?self.game.direction(), "turn rejected");
                }
                ControlFlow::Continue(false)
            }
            Input::Enter => {
                match self.game.enter() {
                    Transition::Paused => {
                        self.ticker.stop();
                        info!("paused");
                    }
                    Transition::Resumed => {
                        self.ticker.start(now);
                        info!("resumed");
                    }
                    Transition::Restarted => {
                        self.ticker.start(now);
                        info!(high_score = self.game.high_score(), "new game");
                    }
                }
                ControlFlow::Continue(true)
            }
        }
    }

    pub fn resize(&mut self, layout: &Layout) {
        self.game.resize(layout.grid());
        debug!(grid = ?layout.grid(), "board resized");
    }

    /// Writes a raised high score once. A failed write is tried again only
    /// when the score goes up further.
    fn persist_high_score(&mut self) {
        let high_score = self.game.high_score();
        if high_score <= self.attempted_high_score {
            return;
        }

        self.attempted_high_score = high_score;
        if let Err(err) = self.store.save(high_score) {
            warn!(high_score, "could not save high score: {err:#}");
        }
    }
}

pub struct App<S: ScoreStore> {
    session: Session<S>,
    term: TermManager,
    layout: Layout,
    cell_width: u16,
}

impl<S: ScoreStore> App<S> {
    pub fn new(config: &Config, store: S) -> Result<Self> {
        let term = TermManager::new();
        let (w, h) = term.size().context("Error reading terminal size")?;
        let layout = Layout::fit(w, h, config.cell_width);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let high_score = store.load();
        info!(high_score, grid = ?layout.grid(), "starting");

        let game = GameState::new(layout.grid(), high_score, config.food, rng);
        let session = Session::new(game, config.tick_interval(), store);

        Ok(App { session, term, layout, cell_width: config.cell_width })
    }

    /// Plays until the player quits. The terminal is restored on every exit path.
    pub fn run(&mut self) -> Result<()> {
        guarded(
            self,
            |app| app.term.setup().context("Error setting up the terminal"),
            Self::event_loop,
            |app| app.term.restore().context("Error restoring the terminal"),
        )
    }

    fn event_loop(&mut self) -> Result<()> {
        self.session.start(Instant::now());
        self.redraw()?;

        loop {
            let now = Instant::now();
            if self.session.poll_tick(now) {
                self.redraw()?;
                continue;
            }

            let wait = self.session.ticker().time_left(now).unwrap_or(IDLE_POLL);
            match self.term.poll_event(wait)? {
                Some(Event::Key(key)) => {
                    let Some(action) = input::translate(&key) else { continue };
                    match self.session.handle(action, Instant::now()) {
                        ControlFlow::Break(()) => {
                            info!("quit");
                            return Ok(());
                        }
                        ControlFlow::Continue(true) => self.redraw()?,
                        ControlFlow::Continue(false) => {}
                    }
                }
                Some(Event::Resize(w, h)) => {
                    self.layout = Layout::fit(w, h, self.cell_width);
                    self.session.resize(&self.layout);
                    self.redraw()?;
                }
                _ => {}
            }
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let frame = render::draw(self.session.game(), &self.layout);
        self.term.present(&frame).context("Error drawing the frame")
    }
}

/// Runs `body` after `setup`, then `restore` no matter how far the first
/// two got. The first error wins.
fn guarded<T>(
    target: &mut T,
    setup: fn(&mut T) -> Result<()>,
    body: fn(&mut T) -> Result<()>,
    restore: fn(&mut T) -> Result<()>,
) -> Result<()> {
    let res = setup(target).and_then(|()| body(target));
    let restored = restore(target);
    res.and(restored)
}
