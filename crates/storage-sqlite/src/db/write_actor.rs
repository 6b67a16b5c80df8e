//! Single-writer actor serializing all SQLite writes.
//!
//! SQLite allows one writer at a time. Instead of letting pool connections
//! contend (and hit SQLITE_BUSY under webhook redelivery bursts), all write
//! jobs funnel through one dedicated connection owned by a background task.
//! Each job runs inside an immediate transaction, which is also the
//! transactional boundary for the multi-table status updates.

use super::DbPool;
use crate::errors::StorageError;
use courtfund_core::errors::Result;
use diesel::SqliteConnection;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job: takes the writer's connection, returns a core Result. The
// Box<dyn Any> is type erasure for the job's return value.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// inside an immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender without a result")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("failed to downcast writer actor result"))
            })
    }
}

/// Spawns the background writer task. The actor checks out one connection
/// and processes jobs serially until every `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to get a connection for the writer actor");

        while let Some((job, reply_tx)) = rx.recv().await {
            // StorageError implements From<diesel::result::Error>, which
            // immediate_transaction needs; convert back at the boundary.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // Receiver may have gone away (cancelled request); nothing to do.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
