//! `ProximitySimulation` — start/stop lifecycle around one interval task.
//!
//! # Locking
//!
//! Two `parking_lot` locks, neither held across an `.await`:
//!
//! - `active` guards the current run handle.  It is held only to swap the
//!   handle in or out, never while waiting on a tick, so callbacks may call
//!   back into the simulation freely.
//! - Each run's `gate` is held for the whole synchronous tick body.  `stop()`
//!   takes it after raising the cancel flag, which waits out a tick running on
//!   another worker thread.  It is re-entrant, so a `stop()` issued from
//!   inside a callback (same thread, gate already held) does not deadlock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex};
use pt_core::{CoreError, GeoPoint, ProximityConfig, SimRng, TrackedEntity};
use pt_proximity::{
    EngineBuilder, ProximityAlert, ProximityEngine, ProximityError, nearby_entities,
};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::sink::CallbackSink;
use crate::{RuntimeError, RuntimeResult};

/// One live run: its task plus the handles needed to steer and cancel it.
struct ActiveRun {
    run:         u64,
    cancelled:   Arc<AtomicBool>,
    gate:        Arc<ReentrantMutex<()>>,
    observer_tx: watch::Sender<GeoPoint>,
    handle:      JoinHandle<()>,
}

impl ActiveRun {
    fn shutdown(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Waits for an in-flight tick on another thread; re-entrant from ours.
        drop(self.gate.lock());
        self.handle.abort();
        debug!(run = self.run, "proximity simulation stopped");
    }
}

/// Timer-driven proximity simulation.
///
/// States: idle (no run) and running (one interval task).  `start` while
/// running tears the old run down first, so one instance never has two
/// timers.  Share it behind an `Arc` when callbacks need to call `stop`.
pub struct ProximitySimulation {
    config:   ProximityConfig,
    root_rng: Mutex<SimRng>,
    runs:     AtomicU64,
    active:   Mutex<Option<ActiveRun>>,
}

impl ProximitySimulation {
    /// Validate `config` and create an idle simulation.
    pub fn new(config: ProximityConfig) -> RuntimeResult<Self> {
        config.validate().map_err(ProximityError::from)?;
        Ok(Self {
            root_rng: Mutex::new(SimRng::new(config.seed)),
            config,
            runs:     AtomicU64::new(0),
            active:   Mutex::new(None),
        })
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Begin ticking `entities` every `config.tick_interval()`.
    ///
    /// The first tick fires one interval after this call.  `on_update`
    /// receives a fresh copy of the whole working set every tick;
    /// `on_alert` fires once per entity per in-range dwell.  A callback that
    /// panics is logged and skipped for that tick only.
    ///
    /// Must be called from within a tokio runtime.  Inputs are validated
    /// before the previous run is stopped, so an `Err` leaves it running.
    pub fn start<P, U, A>(
        &self,
        entities:  Vec<TrackedEntity<P>>,
        observer:  GeoPoint,
        on_update: U,
        on_alert:  A,
    ) -> RuntimeResult<()>
    where
        P: Clone + Send + 'static,
        U: FnMut(Vec<TrackedEntity<P>>) + Send + 'static,
        A: FnMut(ProximityAlert<P>) + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| RuntimeError::NoRuntime)?;

        // A rejected call leaves the current run untouched.
        let run = self.runs.fetch_add(1, Ordering::Relaxed);
        let rng = self.root_rng.lock().child(run);
        let engine = EngineBuilder::new(self.config.clone())
            .observer(observer)
            .entities(entities)
            .random_source(rng)
            .build()?;

        self.stop();

        let cancelled = Arc::new(AtomicBool::new(false));
        let gate = Arc::new(ReentrantMutex::new(()));
        let (observer_tx, observer_rx) = watch::channel(observer);
        let sink = CallbackSink {
            on_update,
            on_alert,
            cancelled: cancelled.clone(),
        };

        debug!(
            run,
            entities = engine.entities().len(),
            interval_ms = self.config.tick_interval_ms,
            "proximity simulation started"
        );

        let handle = runtime.spawn(tick_loop(
            engine,
            self.config.tick_interval(),
            observer_rx,
            cancelled.clone(),
            gate.clone(),
            sink,
        ));

        let displaced = self.active.lock().replace(ActiveRun {
            run,
            cancelled,
            gate,
            observer_tx,
            handle,
        });
        // Only reachable when two threads race through `start`.
        if let Some(other) = displaced {
            other.shutdown();
        }
        Ok(())
    }

    /// Cancel the running timer, if any, and drop its in-range set.
    ///
    /// Idempotent.  Safe to call from inside `on_update` / `on_alert`.  Once
    /// this returns, no callback of the stopped run fires again.
    pub fn stop(&self) {
        let current = self.active.lock().take();
        if let Some(run) = current {
            run.shutdown();
        }
    }

    /// Hand the running simulation a new observer snapshot, used from the
    /// next tick on.  No-op while idle.
    pub fn update_observer(&self, observer: GeoPoint) -> RuntimeResult<()> {
        if !observer.is_valid() {
            return Err(ProximityError::from(CoreError::InvalidCoordinate(observer)).into());
        }
        if let Some(run) = self.active.lock().as_ref() {
            run.observer_tx.send_replace(observer);
        }
        Ok(())
    }

    /// Trackable entities within the configured radius of `observer`, nearest
    /// first.  Independent of any running simulation.
    pub fn nearby<P: Clone>(
        &self,
        observer: GeoPoint,
        entities: &[TrackedEntity<P>],
    ) -> Vec<ProximityAlert<P>> {
        nearby_entities(observer, entities, self.config.detection_radius_m)
    }
}

impl Drop for ProximitySimulation {
    fn drop(&mut self) {
        if let Some(run) = self.active.get_mut().take() {
            run.cancelled.store(true, Ordering::SeqCst);
            run.handle.abort();
        }
    }
}

/// Body of the interval task.  Late ticks are skipped, never queued.
async fn tick_loop<P, U, A>(
    mut engine:  ProximityEngine<P, SimRng>,
    period:      Duration,
    observer_rx: watch::Receiver<GeoPoint>,
    cancelled:   Arc<AtomicBool>,
    gate:        Arc<ReentrantMutex<()>>,
    mut sink:    CallbackSink<U, A>,
) where
    P: Clone,
    U: FnMut(Vec<TrackedEntity<P>>),
    A: FnMut(ProximityAlert<P>),
{
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let _gate = gate.lock();
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
        let observer = *observer_rx.borrow();
        if let Err(e) = engine.set_observer(observer) {
            warn!(error = %e, "ignoring observer update");
        }
        engine.tick(&mut sink);
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
    }
}
