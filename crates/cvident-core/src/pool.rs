//! Bounded worker pool for batch resolution.
//!
//! Architecture: a fixed number of worker tasks drain a shared job queue;
//! each job is one document's resolution and reports back on its own
//! oneshot channel. No retries, no per-document timeout, no cancellation:
//! a submitted batch runs to completion, a slow document delays only its
//! own result, and a failed document is dropped from the batch.

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use cvident_ner::NerBackend;

use crate::{Config, Document, ProgressEvent, ResolutionResult, ResolveError, pipeline};

/// A document resolution job submitted to the pool.
pub struct DocJob {
    pub document: Document,
    pub result_tx: oneshot::Sender<Result<ResolutionResult, ResolveError>>,
    pub index: usize,
    pub total: usize,
    pub progress: Arc<dyn Fn(ProgressEvent) + Send + Sync>,
}

/// A pool of worker tasks sharing one read-only NER handle.
///
/// Submit jobs via [`submit()`](ResolverPool::submit); receive results via
/// the oneshot receiver paired with each job.
pub struct ResolverPool {
    job_tx: async_channel::Sender<DocJob>,
    pool_handle: JoinHandle<()>,
}

impl ResolverPool {
    /// Create a pool with `num_workers` worker tasks. The NER backend is
    /// the only state shared between documents, and only for reading.
    pub fn new(ner: Arc<dyn NerBackend>, num_workers: usize) -> Self {
        let (job_tx, job_rx) = async_channel::unbounded::<DocJob>();

        let pool_handle = tokio::spawn(async move {
            let mut worker_handles = Vec::with_capacity(num_workers.max(1));
            for _ in 0..num_workers.max(1) {
                worker_handles.push(tokio::spawn(worker_loop(job_rx.clone(), ner.clone())));
            }

            // Drop our clone so workers are the last holders
            drop(job_rx);

            // Workers exit when job_tx closes and the queue drains
            for handle in worker_handles {
                let _ = handle.await;
            }
        });

        Self {
            job_tx,
            pool_handle,
        }
    }

    /// Get a cloneable sender for submitting jobs from multiple tasks.
    pub fn sender(&self) -> async_channel::Sender<DocJob> {
        self.job_tx.clone()
    }

    /// Submit a job to the pool.
    pub async fn submit(&self, job: DocJob) {
        let _ = self.job_tx.send(job).await;
    }

    /// Close the pool and wait for every worker to finish.
    pub async fn shutdown(self) {
        self.job_tx.close();
        let _ = self.pool_handle.await;
    }
}

async fn worker_loop(rx: async_channel::Receiver<DocJob>, ner: Arc<dyn NerBackend>) {
    while let Ok(job) = rx.recv().await {
        let DocJob {
            document,
            result_tx,
            index,
            total,
            progress,
        } = job;

        progress(ProgressEvent::Resolving {
            index,
            total,
            filename: document.id.clone(),
        });

        let outcome = pipeline::resolve_document(&document, ner.as_ref());
        match &outcome {
            Ok(result) => {
                tracing::info!(
                    file = %result.filename,
                    name = %result.selected_name,
                    email = %result.email,
                    "document resolved"
                );
                progress(ProgressEvent::Resolved {
                    index,
                    total,
                    result: result.clone(),
                });
            }
            Err(err) => {
                tracing::warn!(file = %document.id, error = %err, "document failed, omitting from batch");
                progress(ProgressEvent::Failed {
                    index,
                    total,
                    filename: document.id,
                    message: err.to_string(),
                });
            }
        }

        let _ = result_tx.send(outcome);
    }
}

/// Resolve a batch of documents.
///
/// Creates an internal [`ResolverPool`] with `config.num_workers` workers,
/// submits every document, and collects results as they complete; result
/// order does not follow input order. Failed documents are omitted, never
/// retried, and never abort the run.
pub async fn resolve_all(
    documents: Vec<Document>,
    ner: Arc<dyn NerBackend>,
    config: Config,
    progress: impl Fn(ProgressEvent) + Send + Sync + 'static,
) -> Vec<ResolutionResult> {
    let total = documents.len();
    if total == 0 {
        return vec![];
    }

    let progress: Arc<dyn Fn(ProgressEvent) + Send + Sync> = Arc::new(progress);
    let pool = ResolverPool::new(ner, config.num_workers.max(1));

    let mut receivers = FuturesUnordered::new();
    for (index, document) in documents.into_iter().enumerate() {
        let (result_tx, result_rx) = oneshot::channel();
        pool.submit(DocJob {
            document,
            result_tx,
            index,
            total,
            progress: progress.clone(),
        })
        .await;
        receivers.push(result_rx);
    }

    let mut results = Vec::with_capacity(total);
    while let Some(received) = receivers.next().await {
        if let Ok(Ok(result)) = received {
            results.push(result);
        }
    }

    pool.shutdown().await;

    results
}
