//! End-to-end checks on the simulated scan: tick timing, result cadence,
//! cancellation, and restart behavior. The tokio clock is paused so the
//! 300 ms ticks run instantly and deterministically.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use aws_key_scanner::core::ScanOptions;
use aws_key_scanner::scan::{KeySynthesizer, ScanSimulator, TICK_PERIOD};
use aws_key_scanner::store::ResultStore;

fn targets(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://{}-{}.com", prefix, i)).collect()
}

fn seeded_simulator(store: ResultStore) -> ScanSimulator<StdRng> {
    ScanSimulator::with_synthesizer(store, KeySynthesizer::new(StdRng::seed_from_u64(7)))
}

/// Sleep far enough for `ticks` ticks to have fired, landing mid-period.
async fn run_ticks(ticks: u32) {
    tokio::time::sleep(TICK_PERIOD * ticks + Duration::from_millis(150)).await;
}

#[tokio::test(start_paused = true)]
async fn test_scan_to_completion_yields_half_the_urls() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());
    let urls = targets("a", 4);

    simulator.start(&urls, ScanOptions::default());
    run_ticks(5).await; // 4 progress ticks + the terminating tick

    let status = store.status();
    assert!(!status.is_scanning);
    assert_eq!(status.progress, 4);
    assert_eq!(status.total, 4);
    assert!(status.start_time.is_some());
    assert!(status.end_time.is_some());

    // Results appear on even ticks only, attributed to that tick's URL.
    let results = store.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, urls[1]);
    assert_eq!(results[1].url, urls[3]);
    assert_ne!(results[0].id, results[1].id);
}

#[tokio::test(start_paused = true)]
async fn test_odd_url_count_rounds_down() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    simulator.start(&targets("a", 5), ScanOptions::default());
    run_ticks(6).await;

    assert_eq!(store.result_count(), 2);
    assert_eq!(store.status().progress, 5);
}

#[tokio::test(start_paused = true)]
async fn test_single_url_scan_finds_nothing() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    simulator.start(&targets("a", 1), ScanOptions::default());
    run_ticks(2).await;

    let status = store.status();
    assert!(!status.is_scanning);
    assert_eq!(status.progress, 1);
    assert_eq!(store.result_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_freezes_progress_and_results() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    simulator.start(&targets("a", 10), ScanOptions::default());
    run_ticks(3).await;
    simulator.stop();

    let status = store.status();
    assert!(!status.is_scanning);
    assert_eq!(status.progress, 3);
    assert!(status.end_time.is_some());
    let frozen = store.results();
    assert_eq!(frozen.len(), 1);

    // Even with plenty more (paused) time, nothing moves after stop.
    run_ticks(10).await;
    assert_eq!(store.status(), status);
    assert_eq!(store.results(), frozen);
}

#[tokio::test(start_paused = true)]
async fn test_stop_when_idle_is_noop() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    simulator.stop();

    let status = store.status();
    assert!(!status.is_scanning);
    assert!(status.start_time.is_none());
    assert!(status.end_time.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_stop_after_completion_keeps_end_time() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    simulator.start(&targets("a", 2), ScanOptions::default());
    run_ticks(3).await;
    let completed = store.status();

    run_ticks(4).await;
    simulator.stop();
    assert_eq!(store.status(), completed);
}

#[tokio::test(start_paused = true)]
async fn test_restart_cancels_prior_run() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    simulator.start(&targets("first", 6), ScanOptions::default());
    run_ticks(2).await;
    assert_eq!(store.result_count(), 1);

    // Restart while the first run is mid-flight.
    let second = targets("second", 4);
    simulator.start(&second, ScanOptions::default());
    run_ticks(5).await;

    let status = store.status();
    assert!(!status.is_scanning);
    assert_eq!(status.total, 4);
    assert_eq!(status.progress, 4);

    // No result from the first run survives, and none is attributable to it.
    let results = store.results();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.url.starts_with("https://second-")));
}

#[tokio::test(start_paused = true)]
async fn test_start_with_no_urls_is_noop() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    simulator.start(&[], ScanOptions::default());
    run_ticks(2).await;

    let status = store.status();
    assert!(!status.is_scanning);
    assert!(status.start_time.is_none());
    assert_eq!(status.total, 0);
}

#[tokio::test(start_paused = true)]
async fn test_options_are_recorded_but_inert() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    let options = ScanOptions {
        threads: 300,
        timeout_secs: 1,
        scan_aws: true,
        scan_send_grid: false,
    };
    simulator.start(&targets("a", 4), options.clone());
    run_ticks(5).await;

    assert_eq!(store.options(), Some(options));
    // Detector toggles and thread count do not change the cadence.
    assert_eq!(store.result_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_first_result_only_after_second_tick() {
    let store = ResultStore::new();
    let mut simulator = seeded_simulator(store.clone());

    simulator.start(&targets("a", 4), ScanOptions::default());

    run_ticks(1).await;
    assert_eq!(store.status().progress, 1);
    assert_eq!(store.result_count(), 0);

    tokio::time::sleep(TICK_PERIOD).await;
    assert_eq!(store.status().progress, 2);
    assert_eq!(store.result_count(), 1);
}
