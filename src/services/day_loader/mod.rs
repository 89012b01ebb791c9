//! Background fetching of a day's events.
//!
//! Each request runs on its own worker thread and reports back over a
//! channel. Responses are tagged with the requested day and a generation
//! number; only the newest request's response is ever delivered.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::services::events_api::{EventRepository, RepositoryError};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub date: NaiveDate,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayLoad {
    pub key: FetchKey,
    pub result: Result<Vec<Event>, RepositoryError>,
}

pub struct DayLoader {
    repository: Arc<dyn EventRepository>,
    tx: Sender<DayLoad>,
    rx: Receiver<DayLoad>,
    generation: u64,
    latest: Option<FetchKey>,
    worker: Option<JoinHandle<()>>,
}

impl DayLoader {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            repository,
            tx,
            rx,
            generation: 0,
            latest: None,
            worker: None,
        }
    }

    /// Start fetching `date`, superseding any request still in flight.
    pub fn request(&mut self, date: NaiveDate) -> FetchKey {
        self.generation += 1;
        let key = FetchKey {
            date,
            generation: self.generation,
        };
        self.latest = Some(key);

        let repository = Arc::clone(&self.repository);
        let tx = self.tx.clone();
        log::debug!("Fetching events for {} (generation {})", date, key.generation);

        self.worker = Some(thread::spawn(move || {
            let result = repository.list_by_date(date);
            let _ = tx.send(DayLoad { key, result });
        }));

        key
    }

    pub fn latest_key(&self) -> Option<FetchKey> {
        self.latest
    }

    pub fn is_loading(&self) -> bool {
        self.latest.is_some()
    }

    /// Drain finished fetches without blocking.
    ///
    /// Returns the newest request's result once it arrives; stale results
    /// are dropped.
    pub fn poll(&mut self) -> Option<DayLoad> {
        loop {
            match self.rx.try_recv() {
                Ok(load) => {
                    if let Some(load) = self.accept(load) {
                        return Some(load);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Block until the newest request resolves.
    ///
    /// Returns `None` when nothing is outstanding.
    pub fn wait(&mut self) -> Option<DayLoad> {
        let key = self.latest?;

        loop {
            match self.rx.recv_timeout(WAIT_POLL_INTERVAL) {
                Ok(load) => {
                    if let Some(load) = self.accept(load) {
                        return Some(load);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    let finished = self.worker.as_ref().is_none_or(JoinHandle::is_finished);
                    // A finished worker may have sent just after the timeout.
                    if finished {
                        if let Some(load) = self.poll() {
                            return Some(load);
                        }
                        return Some(self.worker_lost(key));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return Some(self.worker_lost(key)),
            }
        }
    }

    fn accept(&mut self, load: DayLoad) -> Option<DayLoad> {
        if self.latest == Some(load.key) {
            self.latest = None;
            self.worker = None;
            Some(load)
        } else {
            log::debug!(
                "Dropping stale events for {} (generation {})",
                load.key.date,
                load.key.generation
            );
            None
        }
    }

    fn worker_lost(&mut self, key: FetchKey) -> DayLoad {
        log::error!("Event fetch worker for {} exited without a result", key.date);
        self.latest = None;
        self.worker = None;
        DayLoad {
            key,
            result: Err(RepositoryError::Network(
                "fetch worker exited unexpectedly".to_string(),
            )),
        }
    }
}
