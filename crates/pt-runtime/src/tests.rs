//! Timer-driven tests.  All run on tokio's paused clock, so `sleep` advances
//! virtual time instantly and ticks land at exact multiples of the interval.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pt_core::{EntityId, EntityKind, GeoPoint, ProximityConfig, TrackedEntity};
use pt_proximity::{ProximityAlert, ProximityError};

use crate::{ProximitySimulation, RuntimeError};

// ── Helpers ───────────────────────────────────────────────────────────────────

const ORIGIN: GeoPoint = GeoPoint { lat: 0.0, lon: 0.0 };
const INTERVAL_MS: u64 = 2_000;

fn test_config() -> ProximityConfig {
    ProximityConfig {
        tick_interval_ms: INTERVAL_MS,
        ..ProximityConfig::default()
    }
}

fn lost(id: &str, at: GeoPoint) -> TrackedEntity<()> {
    TrackedEntity::new(id, EntityKind::Lost, Some(at), ())
}

async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

type Updates = Arc<Mutex<Vec<Vec<TrackedEntity<()>>>>>;
type Alerts = Arc<Mutex<Vec<ProximityAlert<()>>>>;

/// Start `sim` with callbacks that append into the returned buffers.
fn start_recording(
    sim:      &ProximitySimulation,
    entities: Vec<TrackedEntity<()>>,
    observer: GeoPoint,
) -> (Updates, Alerts) {
    let updates: Updates = Arc::default();
    let alerts: Alerts = Arc::default();
    let (u, a) = (updates.clone(), alerts.clone());
    sim.start(
        entities,
        observer,
        move |pets| u.lock().unwrap().push(pets),
        move |alert| a.lock().unwrap().push(alert),
    )
    .unwrap();
    (updates, alerts)
}

// ── Construction and misuse ───────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn invalid_config_fails_at_construction() {
        let cfg = ProximityConfig { tick_interval_ms: 0, ..test_config() };
        assert!(matches!(ProximitySimulation::new(cfg), Err(RuntimeError::Proximity(_))));
    }

    #[test]
    fn start_outside_runtime_fails_fast() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let result = sim.start(vec![lost("a", ORIGIN)], ORIGIN, |_| {}, |_| {});
        assert!(matches!(result, Err(RuntimeError::NoRuntime)));
        assert!(!sim.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_observer_fails_fast() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let result = sim.start(vec![lost("a", ORIGIN)], GeoPoint::new(0.0, 181.0), |_| {}, |_| {});
        assert!(result.is_err());
        assert!(!sim.is_running());
        assert!(sim.update_observer(GeoPoint::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn stop_when_idle_is_a_noop() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        sim.stop();
        sim.stop();
        assert!(!sim.is_running());
        assert!(sim.update_observer(ORIGIN).is_ok());
    }
}

// ── Ticking ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_interval() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let (updates, _) = start_recording(&sim, vec![lost("a", ORIGIN)], ORIGIN);
        assert!(sim.is_running());

        advance_ms(INTERVAL_MS - 100).await;
        assert_eq!(updates.lock().unwrap().len(), 0, "first tick waits one interval");

        advance_ms(200).await;
        assert_eq!(updates.lock().unwrap().len(), 1);

        advance_ms(2 * INTERVAL_MS).await;
        assert_eq!(updates.lock().unwrap().len(), 3);
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn dwell_alerts_once_and_near_radius_scenario_holds() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let (_, alerts) = start_recording(
            &sim,
            vec![lost("rocky", GeoPoint::new(0.0, 0.0044))],
            ORIGIN,
        );

        advance_ms(INTERVAL_MS + 100).await;
        {
            let alerts = alerts.lock().unwrap();
            assert_eq!(alerts.len(), 1);
            assert!((480..=500).contains(&alerts[0].distance_m));
            assert!(alerts[0].signal_strength <= 4);
        }

        // One more step either keeps it inside (already notified) or takes
        // it out (re-armed, but no alert until it comes back).
        advance_ms(INTERVAL_MS).await;
        assert_eq!(alerts.lock().unwrap().len(), 1);
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn entity_at_observer_alerts_exactly_once() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let (updates, alerts) = start_recording(&sim, vec![lost("a", ORIGIN)], ORIGIN);

        advance_ms(10 * INTERVAL_MS + 100).await;
        assert_eq!(updates.lock().unwrap().len(), 10);
        assert_eq!(alerts.lock().unwrap().len(), 1);
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn observer_update_applies_from_next_tick() {
        let far = GeoPoint::new(0.0, 0.01);
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let (_, alerts) = start_recording(&sim, vec![lost("far", far)], ORIGIN);

        advance_ms(INTERVAL_MS + 100).await;
        assert!(alerts.lock().unwrap().is_empty());

        sim.update_observer(far).unwrap();
        advance_ms(INTERVAL_MS).await;
        let alerts = alerts.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].entity.id, EntityId::from("far"));
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_update_callback_does_not_kill_the_timer() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        sim.start(
            vec![lost("a", ORIGIN)],
            ORIGIN,
            move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                panic!("renderer unavailable");
            },
            |_| {},
        )
        .unwrap();

        advance_ms(3 * INTERVAL_MS + 100).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(sim.is_running());
        sim.stop();
    }
}

// ── Stop / restart ────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn stop_halts_all_callbacks() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let (updates, alerts) = start_recording(&sim, vec![lost("a", ORIGIN)], ORIGIN);

        advance_ms(INTERVAL_MS + 100).await;
        sim.stop();
        assert!(!sim.is_running());
        let (u, a) = (updates.lock().unwrap().len(), alerts.lock().unwrap().len());

        advance_ms(10 * INTERVAL_MS).await;
        assert_eq!(updates.lock().unwrap().len(), u);
        assert_eq!(alerts.lock().unwrap().len(), a);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resets_in_range_set() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let (_, first) = start_recording(&sim, vec![lost("a", ORIGIN)], ORIGIN);
        advance_ms(INTERVAL_MS + 100).await;
        assert_eq!(first.lock().unwrap().len(), 1);
        sim.stop();

        let (_, second) = start_recording(&sim, vec![lost("a", ORIGIN)], ORIGIN);
        advance_ms(INTERVAL_MS + 100).await;
        assert_eq!(second.lock().unwrap().len(), 1, "alerted again after fresh start");
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_running_replaces_the_timer() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let (old_updates, _) = start_recording(&sim, vec![lost("a", ORIGIN)], ORIGIN);
        advance_ms(INTERVAL_MS / 2).await;

        let (new_updates, _) = start_recording(&sim, vec![lost("b", ORIGIN)], ORIGIN);
        advance_ms(3 * INTERVAL_MS + 100).await;

        assert_eq!(old_updates.lock().unwrap().len(), 0, "old timer never fired");
        assert_eq!(new_updates.lock().unwrap().len(), 3);
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_from_inside_alert_callback() {
        let sim = Arc::new(ProximitySimulation::new(test_config()).unwrap());
        let updates = Arc::new(AtomicUsize::new(0));
        let alerts = Arc::new(AtomicUsize::new(0));

        let (u, a, handle) = (updates.clone(), alerts.clone(), sim.clone());
        sim.start(
            vec![lost("a", ORIGIN), lost("b", ORIGIN)],
            ORIGIN,
            move |_| {
                u.fetch_add(1, Ordering::SeqCst);
            },
            move |_| {
                a.fetch_add(1, Ordering::SeqCst);
                handle.stop();
            },
        )
        .unwrap();

        advance_ms(5 * INTERVAL_MS).await;
        assert_eq!(alerts.load(Ordering::SeqCst), 1, "second alert suppressed after stop");
        assert_eq!(updates.load(Ordering::SeqCst), 0, "position feed suppressed after stop");
        assert!(!sim.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_start_leaves_the_current_run_ticking() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let (updates, _) = start_recording(&sim, vec![lost("a", ORIGIN)], ORIGIN);
        advance_ms(INTERVAL_MS + 100).await;
        assert_eq!(updates.lock().unwrap().len(), 1);

        let bad_observer = sim.start(vec![lost("b", ORIGIN)], GeoPoint::new(0.0, 999.0), |_| {}, |_| {});
        assert!(bad_observer.is_err());

        let duplicate = sim.start(vec![lost("c", ORIGIN), lost("c", ORIGIN)], ORIGIN, |_| {}, |_| {});
        assert!(matches!(
            duplicate,
            Err(RuntimeError::Proximity(ProximityError::DuplicateEntity(_)))
        ));

        assert!(sim.is_running());
        advance_ms(3 * INTERVAL_MS).await;
        assert_eq!(updates.lock().unwrap().len(), 4, "old run kept ticking");
        sim.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stop_from_another_thread_is_final() {
        let config = ProximityConfig { tick_interval_ms: 1, ..ProximityConfig::default() };

        for _ in 0..50 {
            let sim = Arc::new(ProximitySimulation::new(config.clone()).unwrap());
            let stopped = Arc::new(AtomicBool::new(false));
            let ticks = Arc::new(AtomicUsize::new(0));
            let late = Arc::new(AtomicUsize::new(0));

            let (s, t, l) = (stopped.clone(), ticks.clone(), late.clone());
            sim.start(
                vec![lost("a", ORIGIN), lost("b", GeoPoint::new(0.0, 0.0044))],
                ORIGIN,
                move |_| {
                    t.fetch_add(1, Ordering::SeqCst);
                    if s.load(Ordering::SeqCst) {
                        l.fetch_add(1, Ordering::SeqCst);
                    }
                },
                |_| {},
            )
            .unwrap();

            tokio::time::timeout(Duration::from_secs(5), async {
                while ticks.load(Ordering::SeqCst) == 0 {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
            })
            .await
            .expect("first tick fired");

            let (handle, s) = (sim.clone(), stopped.clone());
            tokio::task::spawn_blocking(move || {
                handle.stop();
                s.store(true, Ordering::SeqCst);
            })
            .await
            .unwrap();

            tokio::time::sleep(Duration::from_millis(5)).await;
            assert!(!sim.is_running());
            assert_eq!(late.load(Ordering::SeqCst), 0, "callback fired after stop returned");
        }
    }
}

// ── Nearby query ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod nearby_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn nearby_is_independent_of_the_run() {
        let sim = ProximitySimulation::new(test_config()).unwrap();
        let entities = vec![
            lost("mid", GeoPoint::new(0.0, 0.002)),
            lost("near", GeoPoint::new(0.0005, 0.0)),
            lost("out", GeoPoint::new(0.0, 0.01)),
        ];
        let (_, alerts) = start_recording(&sim, entities.clone(), GeoPoint::new(10.0, 10.0));

        let hits = sim.nearby(ORIGIN, &entities);
        let ids: Vec<_> = hits.iter().map(|a| a.entity.id.as_str()).collect();
        assert_eq!(ids, ["near", "mid"]);

        advance_ms(INTERVAL_MS + 100).await;
        assert!(alerts.lock().unwrap().is_empty());
        sim.stop();
    }
}
