use log::{debug, info};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use uuid::Uuid;

use crate::config::Timing;
use crate::simulation::{BlockRequest, Engine, SimError, Snapshot};

struct Shared {
    engine: Mutex<Engine>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    snapshots: watch::Sender<Snapshot>,
    timing: Timing,
}

/// Drives an `Engine` with real timers: one periodic tick task, plus one
/// deferred task per block request. Every state change is published as a
/// fresh `Snapshot` to subscribers.
#[derive(Clone)]
pub struct Scheduler {
    shared: Arc<Shared>,
}

impl Scheduler {
    pub fn new(engine: Engine, timing: Timing) -> Self {
        let (snapshots, _) = watch::channel(engine.snapshot());
        Self {
            shared: Arc::new(Shared {
                engine: Mutex::new(engine),
                ticker: Mutex::new(None),
                snapshots,
                timing,
            }),
        }
    }

    pub fn timing(&self) -> Timing {
        self.shared.timing
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.snapshots.borrow().clone()
    }

    /// Run `f` against the engine and publish the resulting state.
    pub fn update<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut engine = self.engine();
        let out = f(&mut *engine);
        self.publish(&engine);
        out
    }

    /// Validate stakes and start ticking. Must be called inside a tokio
    /// runtime. A previous ticker, if any, is replaced.
    pub fn start(&self) -> Result<Uuid, SimError> {
        let run = self.update(Engine::start)?;

        let period = self.shared.timing.tick;
        let this = self.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                this.on_tick();
            }
        });

        if let Some(old) = self.ticker().replace(handle) {
            old.abort();
        }
        Ok(run)
    }

    /// Stop ticking. Requests already waiting out the creation delay are
    /// left alone; the engine's pending policy decides their fate.
    pub fn stop(&self) -> bool {
        if let Some(handle) = self.ticker().take() {
            handle.abort();
        }
        self.update(Engine::stop)
    }

    fn on_tick(&self) {
        let requests = self.update(Engine::tick);
        for request in requests {
            self.schedule_block(request);
        }
    }

    fn schedule_block(&self, request: BlockRequest) {
        let delay = self.shared.timing.block_delay;
        let this = self.clone();
        debug!("{} is mining, block due in {:?}", request.miner_id, delay);
        tokio::spawn(async move {
            time::sleep(delay).await;
            this.update(|engine| {
                if engine.create_block(&request).is_none() {
                    info!("block from {} discarded", request.miner_id);
                }
            });
        });
    }

    fn publish(&self, engine: &Engine) {
        let snap = engine.snapshot();
        debug!(
            "snapshot: running={} elapsed={} blocks={} in_flight={}",
            snap.running,
            snap.elapsed,
            snap.blocks.len(),
            snap.in_flight
        );
        self.shared.snapshots.send_replace(snap);
    }

    fn engine(&self) -> MutexGuard<'_, Engine> {
        self.shared.engine.lock().expect("mutex poisoned")
    }

    fn ticker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.shared.ticker.lock().expect("mutex poisoned")
    }
}
