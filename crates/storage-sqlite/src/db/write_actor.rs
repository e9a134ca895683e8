use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use dompet_core::errors::{DatabaseError, Error, Result};
use log::{debug, error};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job receives the writer's connection, already inside an IMMEDIATE
// transaction, and returns a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type AnyBox = Box<dyn Any + Send + 'static>;

type Envelope = (Job<AnyBox>, oneshot::Sender<Result<AnyBox>>);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside one IMMEDIATE transaction: it commits when the job
    /// returns `Ok` and rolls back on `Err`. Jobs run strictly one at a time.
    /// Dropping the returned future before the reply arrives makes the actor
    /// roll the job back instead of committing it.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("writer actor has stopped"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("writer actor dropped the reply"))??;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Database(DatabaseError::Internal(
                "unexpected result type from writer actor".to_string(),
            )))
    }
}

fn writer_gone(message: &str) -> Error {
    StorageError::WriterUnavailable(message.to_string()).into()
}

/// Spawns a background Tokio task that acts as the single writer to the database.
/// The actor owns one pooled connection and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not obtain a database connection: {}", e);
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(writer_gone("no database connection for writer")));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    let value = job(c).map_err(StorageError::from)?;
                    // Nobody is waiting for the outcome (timeout or cancellation):
                    // leave the database as it was.
                    if reply_tx.is_closed() {
                        return Err(StorageError::Abandoned);
                    }
                    Ok(value)
                })
                .map_err(Error::from);

            if let Err(Error::Database(DatabaseError::TransactionFailed(reason))) = &result {
                debug!("Write job rolled back: {}", reason);
            }
            // The receiver may have gone away in the meantime; the outcome is already settled.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
