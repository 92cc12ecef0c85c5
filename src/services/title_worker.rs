//! Background title resolution
//!
//! A fixed pool of threads pulls mod ids off a job channel, resolves them and
//! sends the results back. The control thread drains completions with `poll`
//! on every tick, so lookups never block the interface.

use super::title_cache::SharedTitleCache;
use super::title_lookup::TitleLookup;
use super::title_resolver::{self, Resolution};
use parking_lot::Mutex;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// A finished resolution, keyed by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleUpdate {
    pub id: String,
    pub title: String,
}

/// Pool of lookup threads
pub struct TitleWorkers {
    jobs: Option<Sender<String>>,
    results: Receiver<TitleUpdate>,
    in_flight: usize,
}

impl TitleWorkers {
    pub fn spawn(
        workers: usize,
        cache: SharedTitleCache,
        lookup: Arc<dyn TitleLookup>,
    ) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<String>();
        let (result_tx, result_rx) = mpsc::channel();
        let job_rx = Arc::new(Mutex::new(job_rx));

        for n in 0..workers.max(1) {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let cache = Arc::clone(&cache);
            let lookup = Arc::clone(&lookup);
            let spawned = thread::Builder::new()
                .name(format!("title-worker-{n}"))
                .spawn(move || Self::run_worker(&job_rx, &result_tx, &cache, lookup.as_ref()));
            if let Err(e) = spawned {
                warn!(error = %e, "failed to spawn title worker");
            }
        }

        Self {
            jobs: Some(job_tx),
            results: result_rx,
            in_flight: 0,
        }
    }

    /// Queue a lookup for `id`
    pub fn submit(&mut self, id: impl Into<String>) {
        let Some(ref jobs) = self.jobs else {
            return;
        };
        if jobs.send(id.into()).is_ok() {
            self.in_flight += 1;
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Drain finished lookups without blocking
    pub fn poll(&mut self) -> Vec<TitleUpdate> {
        let mut updates = Vec::new();
        loop {
            match self.results.try_recv() {
                Ok(update) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    updates.push(update);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.in_flight = 0;
                    break;
                }
            }
        }
        updates
    }

    /// Stop accepting work; idle workers exit once the queue drains
    pub fn shutdown(&mut self) {
        self.jobs = None;
    }

    fn run_worker(
        jobs: &Mutex<Receiver<String>>,
        results: &Sender<TitleUpdate>,
        cache: &SharedTitleCache,
        lookup: &dyn TitleLookup,
    ) {
        loop {
            // Only hold the queue lock while waiting for the next id
            let next = jobs.lock().recv();
            let Ok(id) = next else {
                break;
            };

            let resolution = title_resolver::resolve(&id, cache, lookup);
            if resolution.mutated_cache() {
                let cache = cache.lock();
                if let Err(e) = cache.save() {
                    warn!(error = %e, "could not persist title cache");
                }
            }
            if let Resolution::Cached(_) = resolution {
                debug!(id = %id, "title served from cache");
            }

            let update = TitleUpdate {
                title: resolution.title().to_string(),
                id,
            };
            if results.send(update).is_err() {
                break;
            }
        }
    }
}

impl Drop for TitleWorkers {
    fn drop(&mut self) {
        self.shutdown();
    }
}
