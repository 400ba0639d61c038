//! Background classification worker
//!
//! Gantree: L4_Engine → ClassificationWorker
//!
//! Runs decoding, validation and classification off the frame-loop thread.
//! Results come back by value; the coordinator applies them on its own
//! thread with `apply_classified`.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use qviz_classify::{Classified, ClassifierConfig, StateClassifier};
use qviz_core::{QvizError, SimulationResult};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Request sent to the worker
#[derive(Debug, Clone)]
pub enum WorkerRequest {
    /// Validate and classify a decoded result
    Classify {
        /// Submission number
        sequence: u64,
        /// Result to classify
        result: SimulationResult,
    },
    /// Decode a backend payload, then classify
    ClassifyJson {
        /// Submission number
        sequence: u64,
        /// Raw JSON
        payload: String,
    },
}

/// Validated result plus its classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedResult {
    /// Submission number
    pub sequence: u64,

    /// Validated result
    pub result: SimulationResult,

    /// Classifier output
    pub classified: Classified,
}

/// Response sent back from the worker
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// Ready to apply
    Classified(ClassifiedResult),
    /// Rejected as invalid
    Rejected {
        /// Submission number
        sequence: u64,
        /// Reason
        error: QvizError,
    },
}

impl WorkerResponse {
    /// Submission number
    pub fn sequence(&self) -> u64 {
        match self {
            WorkerResponse::Classified(c) => c.sequence,
            WorkerResponse::Rejected { sequence, .. } => *sequence,
        }
    }
}

/// Handle to the background worker
/// Gantree: ClassificationWorker // 분류 워커
pub struct ClassificationWorker {
    tx: Option<Sender<WorkerRequest>>,
    rx: Receiver<WorkerResponse>,
    handle: Option<JoinHandle<()>>,
    next_sequence: u64,
}

impl ClassificationWorker {
    /// Spawn the worker thread
    pub fn spawn(config: ClassifierConfig) -> Self {
        let (req_tx, req_rx) = crossbeam_channel::unbounded::<WorkerRequest>();
        let (resp_tx, resp_rx) = crossbeam_channel::unbounded::<WorkerResponse>();

        let handle = thread::spawn(move || {
            let classifier = StateClassifier::new(config);
            while let Ok(req) = req_rx.recv() {
                let response = match req {
                    WorkerRequest::Classify { sequence, result } => {
                        Self::process(&classifier, sequence, Ok(result))
                    }
                    WorkerRequest::ClassifyJson { sequence, payload } => {
                        Self::process(&classifier, sequence, SimulationResult::from_json(&payload))
                    }
                };
                if resp_tx.send(response).is_err() {
                    break;
                }
            }
            log::debug!("classification worker stopped");
        });

        Self {
            tx: Some(req_tx),
            rx: resp_rx,
            handle: Some(handle),
            next_sequence: 1,
        }
    }

    fn process(
        classifier: &StateClassifier,
        sequence: u64,
        decoded: Result<SimulationResult, QvizError>,
    ) -> WorkerResponse {
        let checked = decoded.and_then(|result| {
            let classified = classifier.classify_checked(&result)?;
            Ok((result, classified))
        });

        match checked {
            Ok((result, classified)) => WorkerResponse::Classified(ClassifiedResult {
                sequence,
                result,
                classified,
            }),
            Err(err) => WorkerResponse::Rejected {
                sequence,
                error: QvizError::InvalidResult(err.to_string()),
            },
        }
    }

    /// Queue a result (non-blocking); returns its sequence number
    pub fn submit(&mut self, result: SimulationResult) -> u64 {
        let sequence = self.take_sequence();
        self.send(WorkerRequest::Classify { sequence, result });
        sequence
    }

    /// Queue a raw backend payload (non-blocking)
    pub fn submit_json(&mut self, payload: impl Into<String>) -> u64 {
        let sequence = self.take_sequence();
        self.send(WorkerRequest::ClassifyJson {
            sequence,
            payload: payload.into(),
        });
        sequence
    }

    /// Try to receive a response (non-blocking)
    pub fn try_recv(&self) -> Option<WorkerResponse> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a response
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerResponse> {
        match self.rx.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Close the queue and wait for the thread
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn send(&self, req: WorkerRequest) {
        if let Some(tx) = &self.tx {
            if tx.send(req).is_err() {
                log::warn!("classification worker is gone, request dropped");
            }
        }
    }

    fn stop(&mut self) {
        self.tx = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("classification worker panicked");
            }
        }
    }
}

impl Drop for ClassificationWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

// ============================================================================
// Tests
// ============================================================================
