use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::results::ScanOptions;
use crate::scan::synth::KeySynthesizer;
use crate::store::ResultStore;

/// Fixed delay between simulation ticks.
pub const TICK_PERIOD: Duration = Duration::from_millis(300);

/// Drives a cancellable, time-ordered sequence of status/result events from a
/// static list of target URLs. No real I/O happens: each tick advances the
/// progress counter and, on even ticks, fabricates one result for the URL at
/// that position.
///
/// At most one scan is active per simulator; `start` on a running simulator
/// cancels the previous run before the new one begins, and `stop` freezes the
/// session exactly as it stood. All session mutation goes through the
/// [`ResultStore`] lock with the run's cancellation token checked under that
/// lock, so no tick can land after cancellation.
pub struct ScanSimulator<R: Rng + Send + 'static = StdRng> {
    store: ResultStore,
    synth: Arc<Mutex<KeySynthesizer<R>>>,
    cancel: Option<CancellationToken>,
}

impl ScanSimulator<StdRng> {
    pub fn new(store: ResultStore) -> Self {
        Self::with_synthesizer(store, KeySynthesizer::from_entropy())
    }
}

impl<R: Rng + Send + 'static> ScanSimulator<R> {
    /// Build a simulator around a caller-supplied synthesizer; tests pass a
    /// seeded RNG here to pin the generated keys.
    pub fn with_synthesizer(store: ResultStore, synth: KeySynthesizer<R>) -> Self {
        Self {
            store,
            synth: Arc::new(Mutex::new(synth)),
            cancel: None,
        }
    }

    /// Begin a new scan over `urls`.
    ///
    /// An empty list is a no-op (the caller filters blank lines first). Any
    /// scan still in flight is cancelled before the session resets, so there
    /// is never more than one live timer.
    pub fn start(&mut self, urls: &[String], options: ScanOptions) {
        if urls.is_empty() {
            return;
        }
        if let Some(prev) = self.cancel.take() {
            prev.cancel();
        }

        let cancel = CancellationToken::new();
        self.cancel = Some(cancel.clone());
        self.store.begin_scan(urls.len() as u32, options);
        debug!("scan started over {} targets", urls.len());

        let store = self.store.clone();
        let synth = Arc::clone(&self.synth);
        let urls = urls.to_vec();
        tokio::spawn(run_ticks(store, synth, urls, cancel));
    }

    /// Cancel the active scan. Progress and accumulated results are left
    /// exactly as they were; calling this while idle is a no-op.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // Cancel before finalizing: any tick that grabs the session lock
            // afterwards sees the token and bails without mutating.
            cancel.cancel();
            self.store.finish_scan();
            debug!("scan stopped at progress {}", self.store.status().progress);
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.store.status().is_scanning
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }
}

async fn run_ticks<R: Rng + Send>(
    store: ResultStore,
    synth: Arc<Mutex<KeySynthesizer<R>>>,
    urls: Vec<String>,
    cancel: CancellationToken,
) {
    let total = urls.len() as u32;
    // First tick fires one full period after start, not immediately.
    let mut timer = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    let mut tick: u32 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = timer.tick() => {}
        }
        tick += 1;

        if tick > total {
            store.complete_scan(&cancel);
            debug!("scan complete after {} ticks", total);
            return;
        }

        // Every second tick yields a discovery for the URL at that position.
        let result = if tick % 2 == 0 {
            let mut synth = synth.lock().unwrap_or_else(|e| e.into_inner());
            Some(synth.next_result(&urls[(tick - 1) as usize]))
        } else {
            None
        };

        if !store.record_tick(&cancel, tick, result) {
            return;
        }
    }
}
