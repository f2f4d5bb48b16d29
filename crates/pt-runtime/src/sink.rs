//! Adapts the host's two closures to the engine's observer hooks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pt_core::{Tick, TrackedEntity};
use pt_proximity::{ProximityAlert, ProximityObserver};

/// Forwards alerts and the position feed until the run is cancelled.
///
/// The cancel flag is checked before every callback, so a `stop()` issued
/// from inside one callback suppresses the rest of the tick.
pub(crate) struct CallbackSink<U, A> {
    pub(crate) on_update: U,
    pub(crate) on_alert:  A,
    pub(crate) cancelled: Arc<AtomicBool>,
}

impl<U, A> CallbackSink<U, A> {
    #[inline]
    fn live(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }
}

impl<P, U, A> ProximityObserver<P> for CallbackSink<U, A>
where
    P: Clone,
    U: FnMut(Vec<TrackedEntity<P>>),
    A: FnMut(ProximityAlert<P>),
{
    fn on_alert(&mut self, _tick: Tick, alert: &ProximityAlert<P>) {
        if self.live() {
            (self.on_alert)(alert.clone());
        }
    }

    fn on_positions(&mut self, _tick: Tick, entities: &[TrackedEntity<P>]) {
        if self.live() {
            (self.on_update)(entities.to_vec());
        }
    }
}
