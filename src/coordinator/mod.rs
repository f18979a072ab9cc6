//! Task coordinator: concurrent request queues around a shared board.
//!
//! One worker task drains each queue (reveal, render, status check,
//! reveal-all). The board sits behind a single mutex that is held only while
//! a worker scans or mutates it and is always released before the worker
//! forwards a request to another queue. A single cancellation token stops
//! every worker.
//!
//! ```text
//! input ──reveal──▶ reveal worker ──render──▶ render worker ──▶ BoardRenderer
//!                        │
//!                        └──status──▶ status worker ──reveal-all──▶ reveal-all worker ──render──▶ …
//!                                          │
//!                                          └── delay, then Termination
//! ```

mod error;
mod messages;
mod workers;

pub use error::CoordinatorError;
pub use messages::{Outcome, RenderRequest, RevealAll, RevealRequest, StatusCheck, Termination};

use crate::config::{ConfigError, GameConfig};
use crate::games::minesweeper::{Board, Game, Position};
use crate::render::BoardRenderer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Tuning for the coordinator's queues and end-of-game pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorSettings {
    /// Capacity of each request queue; senders wait when a queue is full.
    pub queue_capacity: usize,
    /// Pause between the final reveal-all and the termination signal.
    pub end_delay: Duration,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            queue_capacity: crate::config::DEFAULT_QUEUE_CAPACITY,
            end_delay: Duration::from_millis(crate::config::DEFAULT_END_DELAY_MS),
        }
    }
}

impl From<&GameConfig> for CoordinatorSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            queue_capacity: *config.queue_capacity(),
            end_delay: *config.end_delay(),
        }
    }
}

/// State shared by the handle and all workers.
pub(crate) struct Shared {
    game: Mutex<Game>,
    finished: AtomicBool,
    termination: watch::Sender<Option<Termination>>,
    cancel: CancellationToken,
}

impl Shared {
    /// Locks the game. A poisoned lock still guards a structurally valid board.
    pub(crate) fn lock_game(&self) -> MutexGuard<'_, Game> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Marks the game finished. Returns `true` only for the first caller.
    pub(crate) fn finish(&self) -> bool {
        self.finished
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Publishes the termination reason (first one wins) and cancels all workers.
    pub(crate) fn terminate(&self, termination: Termination) {
        self.termination.send_if_modified(|current| {
            if current.is_none() {
                *current = Some(termination);
                true
            } else {
                false
            }
        });
        self.cancel.cancel();
    }

    pub(crate) fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Cloneable input surface for a running game.
#[derive(Clone)]
pub struct GameHandle {
    shared: Arc<Shared>,
    reveal_tx: mpsc::Sender<RevealRequest>,
    render_tx: mpsc::Sender<RenderRequest>,
    termination_rx: watch::Receiver<Option<Termination>>,
}

impl std::fmt::Debug for GameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameHandle")
            .field("finished", &self.shared.is_finished())
            .field("termination", &self.termination())
            .finish()
    }
}

impl GameHandle {
    /// Enqueues a reveal of `pos`. Waits if the reveal queue is full.
    ///
    /// Off-board positions are accepted and ignored by the reveal worker.
    ///
    /// # Errors
    ///
    /// [`CoordinatorError::GameFinished`] once the game has ended,
    /// [`CoordinatorError::Closed`] if the workers have stopped.
    #[instrument(skip(self), fields(pos = %pos))]
    pub async fn reveal(&self, pos: Position) -> Result<(), CoordinatorError> {
        if self.shared.is_finished() {
            debug!("Reveal rejected, game finished");
            return Err(CoordinatorError::GameFinished);
        }
        self.reveal_tx
            .send(RevealRequest { pos })
            .await
            .map_err(|_| CoordinatorError::Closed)
    }

    /// Toggles the flag on `pos` under the board lock, then requests a
    /// redraw of that cell.
    ///
    /// # Errors
    ///
    /// Same as [`GameHandle::reveal`].
    #[instrument(skip(self), fields(pos = %pos))]
    pub async fn toggle_flag(&self, pos: Position) -> Result<(), CoordinatorError> {
        if self.shared.is_finished() {
            debug!("Flag rejected, game finished");
            return Err(CoordinatorError::GameFinished);
        }

        let toggled = self.shared.lock_game().board_mut().flag_cell(pos);
        if !toggled {
            return Ok(());
        }

        self.render_tx
            .send(RenderRequest::Cell(pos))
            .await
            .map_err(|_| CoordinatorError::Closed)
    }

    /// Ends the session at the player's request and stops all workers.
    #[instrument(skip(self))]
    pub fn quit(&self) {
        info!("Player quit");
        self.shared.finish();
        self.shared.terminate(Termination::Quit);
    }

    /// Whether the game has stopped accepting reveals and flags.
    pub fn is_finished(&self) -> bool {
        self.shared.is_finished()
    }

    /// The termination reason, once the session has ended.
    pub fn termination(&self) -> Option<Termination> {
        *self.termination_rx.borrow()
    }

    /// Waits until the session ends and returns why.
    pub async fn wait_for_termination(&self) -> Result<Termination, CoordinatorError> {
        let mut rx = self.termination_rx.clone();
        let termination = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| CoordinatorError::Closed)?;
        (*termination).ok_or(CoordinatorError::Closed)
    }

    /// Copies the board under the lock.
    pub fn snapshot(&self) -> Board {
        self.shared.lock_game().board().clone()
    }
}

/// A running game: the worker tasks plus a handle to drive them.
pub struct Coordinator {
    handle: GameHandle,
    workers: JoinSet<()>,
}

impl Coordinator {
    /// Spawns the four queue workers on the current tokio runtime and
    /// requests the initial board render.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[instrument(skip(game, renderer), fields(rows = game.board().rows(), mines = game.mine_quantity()))]
    pub fn start<R: BoardRenderer>(game: Game, renderer: R, settings: CoordinatorSettings) -> Self {
        let capacity = settings.queue_capacity.max(1);
        let (reveal_tx, reveal_rx) = mpsc::channel(capacity);
        let (render_tx, render_rx) = mpsc::channel(capacity);
        let (status_tx, status_rx) = mpsc::channel(capacity);
        let (reveal_all_tx, reveal_all_rx) = mpsc::channel(capacity);
        let (termination, termination_rx) = watch::channel(None);

        let shared = Arc::new(Shared {
            game: Mutex::new(game),
            finished: AtomicBool::new(false),
            termination,
            cancel: CancellationToken::new(),
        });

        let mut tasks = JoinSet::new();
        tasks.spawn(workers::reveal_worker(
            shared.clone(),
            reveal_rx,
            render_tx.clone(),
            status_tx,
        ));
        tasks.spawn(workers::render_worker(shared.clone(), render_rx, renderer));
        tasks.spawn(workers::status_worker(
            shared.clone(),
            status_rx,
            reveal_all_tx,
            settings.end_delay,
        ));
        tasks.spawn(workers::reveal_all_worker(
            shared.clone(),
            reveal_all_rx,
            render_tx.clone(),
        ));

        if render_tx.try_send(RenderRequest::Board).is_err() {
            warn!("Initial render request dropped");
        }
        info!(capacity, "Coordinator started");

        Self {
            handle: GameHandle {
                shared,
                reveal_tx,
                render_tx,
                termination_rx,
            },
            workers: tasks,
        }
    }

    /// Returns a handle for submitting requests.
    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    /// Cancels every worker and waits for them to stop.
    #[instrument(skip(self))]
    pub async fn end_game(mut self) {
        self.handle.shared.cancel_token().cancel();
        while let Some(result) = self.workers.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "Worker ended abnormally");
            }
        }
        info!("All workers stopped");
    }
}

/// Builds a game from `config` and starts its coordinator.
///
/// Mines are placed with a fresh RNG per game, seeded from OS entropy unless
/// the configuration fixes a seed.
///
/// # Errors
///
/// Returns [`ConfigError`] if the mine quantity does not fit the board.
#[instrument(skip(renderer))]
pub fn init_game<R: BoardRenderer>(
    config: &GameConfig,
    renderer: R,
) -> Result<Coordinator, ConfigError> {
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let game = Game::new(*config.board_size(), *config.mine_quantity(), &mut rng)?;
    Ok(Coordinator::start(game, renderer, config.into()))
}
