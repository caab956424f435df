// THEORY:
// The capture side produces frames on its own schedule; the locator consumes them
// one at a time. This module is the plumbing between the two.
//
// Key principles:
// 1.  **Strictly Sequential**: A frame is located to completion before the next one
//     is pulled. There is no pipelining and no worker pool; the locator's workspace
//     is owned by exactly one task.
// 2.  **Latest Wins**: Results are published on a `watch` channel. The rendering
//     side always reads the most recent answer and never queues behind old ones.
// 3.  **Bad Frames Are Skipped**: A frame that breaks the input contract is logged
//     and counted, and the stream moves on. Retrying means supplying the next frame.
// 4.  **Backpressure by Discard**: The service queue is bounded. `try_submit` drops
//     a frame instead of waiting when the locator is behind.

use crate::config::LocatorConfig;
use crate::core_modules::frame::Frame;
use crate::error::{LocateError, LocateResult};
use crate::pipeline::{LightLocator, LightSourceResult};
use futures::{Stream, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Counters for one stream run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Frames the locator ran on successfully.
    pub processed: u64,
    /// Frames refused for breaking the input contract.
    pub rejected: u64,
    /// Processed frames in which a light source was found.
    pub found: u64,
}

/// Drives `locator` over every frame of `frames`, publishing each result on `results`.
pub async fn run_stream<S>(
    locator: &mut LightLocator,
    frames: S,
    results: &watch::Sender<LightSourceResult>,
) -> StreamSummary
where
    S: Stream<Item = Frame>,
{
    let mut summary = StreamSummary::default();
    futures::pin_mut!(frames);

    while let Some(frame) = frames.next().await {
        match locator.locate(&frame) {
            Ok(result) => {
                summary.processed += 1;
                if result.is_found() {
                    summary.found += 1;
                }
                // No receivers left is not our problem; keep the latest value anyway.
                results.send_replace(result);
            }
            Err(err) => {
                summary.rejected += 1;
                warn!(error = %err, width = frame.width, height = frame.height, "frame rejected");
            }
        }
    }

    debug!(?summary, "frame stream ended");
    summary
}

/// A locator running on its own task, fed through a bounded queue.
pub struct LocatorService {
    frames_tx: mpsc::Sender<Frame>,
    results_rx: watch::Receiver<LightSourceResult>,
    worker: JoinHandle<StreamSummary>,
}

impl LocatorService {
    /// Spawns the locator task. Must be called from within a tokio runtime.
    pub fn spawn(config: LocatorConfig, queue_depth: usize) -> LocateResult<Self> {
        let mut locator = LightLocator::new(config)?;
        let (frames_tx, frames_rx) = mpsc::channel::<Frame>(queue_depth.max(1));
        let (results_tx, results_rx) = watch::channel(LightSourceResult::NOT_FOUND);

        let worker = tokio::spawn(async move {
            info!("locator service started");
            let frames = futures::stream::unfold(frames_rx, |mut rx| async move {
                rx.recv().await.map(|frame| (frame, rx))
            });
            let summary = run_stream(&mut locator, frames, &results_tx).await;
            info!(
                processed = summary.processed,
                rejected = summary.rejected,
                found = summary.found,
                "locator service stopped"
            );
            summary
        });

        Ok(Self {
            frames_tx,
            results_rx,
            worker,
        })
    }

    /// Queues a frame, waiting for space if the locator is behind.
    pub async fn submit(&self, frame: Frame) -> LocateResult<()> {
        self.frames_tx
            .send(frame)
            .await
            .map_err(|_| LocateError::ServiceClosed)
    }

    /// Queues a frame if there is room. Returns `Ok(false)` if it was discarded.
    pub fn try_submit(&self, frame: Frame) -> LocateResult<bool> {
        match self.frames_tx.try_send(frame) {
            Ok(()) => Ok(true),
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("locator queue full; frame discarded");
                Ok(false)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(LocateError::ServiceClosed),
        }
    }

    /// The most recent result.
    pub fn latest(&self) -> LightSourceResult {
        *self.results_rx.borrow()
    }

    /// A receiver that is notified on every new result.
    pub fn subscribe(&self) -> watch::Receiver<LightSourceResult> {
        self.results_rx.clone()
    }

    /// Closes the queue, lets the locator drain it, and returns the run's counters.
    pub async fn shutdown(self) -> LocateResult<StreamSummary> {
        let Self {
            frames_tx, worker, ..
        } = self;
        drop(frames_tx);
        worker.await.map_err(|_| LocateError::ServiceClosed)
    }
}
