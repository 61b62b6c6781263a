use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::Generator;
use crate::domain::models::{Action, Event, InvocationId, Outcome, Page};

struct Worker {
    id: InvocationId,
    handle: JoinHandle<Result<()>>,
    // Whoever flips this first owns the invocation's single GenerationFinished event.
    reported: Arc<AtomicBool>,
}

fn spawn_worker<P: Page + 'static>(
    generator: &Arc<Generator<P>>,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<Worker> {
    let id = generator.begin();
    event_tx.send(Event::GenerationStarted(id))?;

    let reported = Arc::new(AtomicBool::new(false));
    let worker_reported = reported.clone();
    let worker_generator = generator.clone();
    let worker_event_tx = event_tx.clone();
    let handle = tokio::spawn(async move {
        let outcome = worker_generator.run(id).await;
        if !worker_reported.swap(true, Ordering::SeqCst) {
            worker_event_tx.send(Event::GenerationFinished(id, outcome))?;
        }
        Ok(())
    });

    Ok(Worker {
        id,
        handle,
        reported,
    })
}

fn abort_worker(worker: Option<Worker>, event_tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    let Some(worker) = worker else {
        return Ok(());
    };
    if worker.reported.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    worker.handle.abort();
    tracing::debug!(invocation = %worker.id, "aborted superseded generation");
    event_tx.send(Event::GenerationFinished(worker.id, Outcome::Superseded))?;

    Ok(())
}

/// Binds generator actions to a page for as long as the action channel is open.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start<P: Page + 'static>(
        generator: Arc<Generator<P>>,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let mut worker: Option<Worker> = None;

        while let Some(action) = rx.recv().await {
            match action {
                Action::Generate => {
                    abort_worker(worker.take(), &event_tx)?;
                    worker = Some(spawn_worker(&generator, &event_tx)?);
                }
                Action::Shutdown => {
                    abort_worker(worker.take(), &event_tx)?;
                    generator.cancel().await;
                    break;
                }
            }
        }

        // Channel closed without an explicit shutdown: let the last generation finish.
        if let Some(worker) = worker {
            if let Err(err) = worker.handle.await? {
                tracing::warn!(error = ?err, "generation worker failed");
            }
        }

        Ok(())
    }
}
