// src/state/dispatch.rs
use std::io;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{AnalysisRequest, AnalysisResult, ApiClient, ApiError, ValidationReport, ValidationRequest};

pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// A finished request, handed back to the frame loop.
#[derive(Debug)]
pub enum Completion {
    Validation {
        request_id: Uuid,
        outcome: Result<ValidationReport, ApiError>,
    },
    Analysis {
        request_id: Uuid,
        outcome: Result<AnalysisResult, ApiError>,
    },
}

impl Completion {
    pub fn request_id(&self) -> Uuid {
        match self {
            Completion::Validation { request_id, .. } | Completion::Analysis { request_id, .. } => {
                *request_id
            }
        }
    }
}

/// Runs API calls off the UI thread. Completions queue up in a channel that
/// the frame loop drains with [`Dispatcher::poll`].
pub struct Dispatcher {
    runtime: Runtime,
    client: ApiClient,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    waker: Option<Waker>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("analyzer-io")
            .enable_all()
            .build()?;
        let (tx, rx) = unbounded_channel();

        Ok(Self {
            runtime,
            client,
            tx,
            rx,
            waker: None,
        })
    }

    /// Called after every completion is queued, e.g. to request a repaint.
    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn analyze(&self, request: AnalysisRequest, with_report: bool) -> Uuid {
        let request_id = Uuid::new_v4();
        let client = self.client.clone();
        let tx = self.tx.clone();
        let waker = self.waker.clone();

        info!(%request_id, with_report, chars = request.entrada.len(), "analysis started");
        self.runtime.spawn(async move {
            let outcome = if with_report {
                client.analyze_with_report(&request).await
            } else {
                client.analyze(&request).await
            };
            match &outcome {
                Ok(result) => info!(%request_id, success = result.success, "analysis finished"),
                Err(e) => warn!(%request_id, error = %e, "analysis failed"),
            }
            deliver(&tx, waker, Completion::Analysis { request_id, outcome });
        });
        request_id
    }

    pub fn validate(&self, request: ValidationRequest) -> Uuid {
        let request_id = Uuid::new_v4();
        let client = self.client.clone();
        let tx = self.tx.clone();
        let waker = self.waker.clone();

        info!(%request_id, "validation started");
        self.runtime.spawn(async move {
            let outcome = client.validate(&request).await;
            match &outcome {
                Ok(report) => info!(%request_id, valid = report.valid, "validation finished"),
                Err(e) => warn!(%request_id, error = %e, "validation failed"),
            }
            deliver(&tx, waker, Completion::Validation { request_id, outcome });
        });
        request_id
    }

    /// Next finished request, if any. Never blocks.
    pub fn poll(&mut self) -> Option<Completion> {
        match self.rx.try_recv() {
            Ok(completion) => Some(completion),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

fn deliver(tx: &UnboundedSender<Completion>, waker: Option<Waker>, completion: Completion) {
    if tx.send(completion).is_err() {
        warn!("completion dropped: receiver gone");
        return;
    }
    if let Some(wake) = waker {
        wake();
    }
}
