//! Observer trait for the position feed and proximity alerts.

use pt_core::{Tick, TrackedEntity};

use crate::{ProximityAlert, TickSummary};

/// Callbacks invoked by [`ProximityEngine::tick`][crate::ProximityEngine::tick].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// A panic inside any hook is caught by the engine, logged, and counted in
/// [`TickSummary::faults`]; the rest of the tick still runs.
///
/// # Example: alert printer
///
/// ```rust,ignore
/// struct AlertPrinter;
///
/// impl<P> ProximityObserver<P> for AlertPrinter {
///     fn on_alert(&mut self, tick: Tick, alert: &ProximityAlert<P>) {
///         println!("{tick}: {alert}");
///     }
/// }
/// ```
pub trait ProximityObserver<P> {
    /// Called at the very start of each tick, before any movement.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once when an entity enters the detection radius.
    fn on_alert(&mut self, _tick: Tick, _alert: &ProximityAlert<P>) {}

    /// Called every tick with the full working set in insertion order.
    fn on_positions(&mut self, _tick: Tick, _entities: &[TrackedEntity<P>]) {}

    /// Called after the position feed.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}
}

/// A [`ProximityObserver`] that does nothing.
pub struct NoopObserver;

impl<P> ProximityObserver<P> for NoopObserver {}
