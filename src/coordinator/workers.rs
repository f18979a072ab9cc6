//! Queue consumers. Each worker owns one receiver and only ever sends to
//! queues drained by other workers.

use super::messages::{Outcome, RenderRequest, RevealAll, RevealRequest, StatusCheck, Termination};
use super::Shared;
use crate::games::minesweeper::invariants;
use crate::render::BoardRenderer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Receives the next request, or `None` once cancelled or the queue closes.
async fn next<T>(shared: &Shared, rx: &mut mpsc::Receiver<T>) -> Option<T> {
    tokio::select! {
        biased;
        _ = shared.cancel_token().cancelled() => None,
        request = rx.recv() => request,
    }
}

/// Sends `request`, waiting for queue space unless cancellation arrives first.
/// Returns `false` if the request could not be delivered.
async fn forward<T>(shared: &Shared, tx: &mpsc::Sender<T>, request: T) -> bool {
    tokio::select! {
        biased;
        _ = shared.cancel_token().cancelled() => false,
        sent = tx.send(request) => sent.is_ok(),
    }
}

#[instrument(skip_all)]
pub(super) async fn reveal_worker(
    shared: Arc<Shared>,
    mut rx: mpsc::Receiver<RevealRequest>,
    render_tx: mpsc::Sender<RenderRequest>,
    status_tx: mpsc::Sender<StatusCheck>,
) {
    while let Some(RevealRequest { pos }) = next(&shared, &mut rx).await {
        if shared.is_finished() {
            debug!(pos = %pos, "Dropping reveal queued before game end");
            continue;
        }

        let shown = {
            let mut game = shared.lock_game();
            // Won or lost but not yet marked finished by the status worker.
            if game.status().is_terminal() {
                debug!(pos = %pos, "Dropping reveal after terminal board");
                continue;
            }
            let shown = game.board_mut().show_cell(pos);
            debug_assert!(
                invariants::check_all(&game).is_ok(),
                "invariant violated after revealing {pos}"
            );
            shown
        };

        if shown == 0 {
            continue;
        }
        debug!(pos = %pos, shown, "Reveal applied");

        if !forward(&shared, &render_tx, RenderRequest::Board).await
            || !forward(&shared, &status_tx, StatusCheck).await
        {
            break;
        }
    }
    debug!("Reveal worker stopped");
}

#[instrument(skip_all)]
pub(super) async fn render_worker<R: BoardRenderer>(
    shared: Arc<Shared>,
    mut rx: mpsc::Receiver<RenderRequest>,
    mut renderer: R,
) {
    while let Some(first) = next(&shared, &mut rx).await {
        // Coalesce whatever else is already queued into one pass.
        let mut batch = vec![first];
        while let Ok(request) = rx.try_recv() {
            batch.push(request);
        }

        let board = shared.lock_game().board().clone();

        if batch.contains(&RenderRequest::Board) {
            renderer.draw_board(&board);
        } else {
            for request in batch {
                if let RenderRequest::Cell(pos) = request {
                    renderer.render_cell(&board, pos);
                }
            }
        }
    }
    debug!("Render worker stopped");
}

#[instrument(skip_all)]
pub(super) async fn status_worker(
    shared: Arc<Shared>,
    mut rx: mpsc::Receiver<StatusCheck>,
    reveal_all_tx: mpsc::Sender<RevealAll>,
    end_delay: Duration,
) {
    while next(&shared, &mut rx).await.is_some() {
        let status = shared.lock_game().status();
        let Some(outcome) = Outcome::from_status(status) else {
            continue;
        };

        if !shared.finish() {
            continue;
        }
        info!(%outcome, "Game finished");

        let (done, revealed) = oneshot::channel();
        if forward(&shared, &reveal_all_tx, RevealAll { done }).await {
            if revealed.await.is_err() {
                warn!("Reveal-all dropped before completing");
            }
        } else {
            warn!("Reveal-all request not delivered");
        }

        tokio::select! {
            biased;
            _ = shared.cancel_token().cancelled() => {}
            _ = tokio::time::sleep(end_delay) => {}
        }

        shared.terminate(Termination::Finished(outcome));
        break;
    }
    debug!("Status worker stopped");
}

#[instrument(skip_all)]
pub(super) async fn reveal_all_worker(
    shared: Arc<Shared>,
    mut rx: mpsc::Receiver<RevealAll>,
    render_tx: mpsc::Sender<RenderRequest>,
) {
    while let Some(RevealAll { done }) = next(&shared, &mut rx).await {
        shared.lock_game().board_mut().reveal_all();
        debug!("Board fully revealed");

        if !forward(&shared, &render_tx, RenderRequest::Board).await {
            break;
        }
        let _ = done.send(());
    }
    debug!("Reveal-all worker stopped");
}
