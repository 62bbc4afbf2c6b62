//! Queue backends: in-process FIFO and durable Redis list.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use intellex_core::{defaults, Error, MessageJob, QueueBackend, Result};

/// Decode one durable queue record.
///
/// Records come from multiple producers, so decoding is strict about shape
/// but lenient about extras: unknown fields are ignored, a missing `jobId`
/// yields an empty id, and only a missing `userContent` (or non-JSON data)
/// makes the record malformed.
pub fn decode_record(raw: &str) -> Result<MessageJob> {
    serde_json::from_str(raw).map_err(Error::from)
}

/// In-process, unbounded FIFO queue.
///
/// Queue content lives in process memory and is lost on restart. `put`
/// never blocks; concurrent consumers each receive distinct items.
pub struct EphemeralQueue {
    tx: mpsc::UnboundedSender<MessageJob>,
    rx: Mutex<mpsc::UnboundedReceiver<MessageJob>>,
}

impl EphemeralQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }
}

impl Default for EphemeralQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueBackend for EphemeralQueue {
    async fn put(&self, job: MessageJob) -> Result<()> {
        self.tx
            .send(job)
            .map_err(|_| Error::Queue("ephemeral queue is closed".to_string()))
    }

    async fn get(&self, timeout: Duration) -> Result<Option<MessageJob>> {
        let mut rx = self.rx.lock().await;
        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(job) => Ok(job),
            Err(_) => Ok(None),
        }
    }
}

/// Durable queue backed by a shared Redis list.
///
/// Survives worker restarts and is visible to other producers and worker
/// processes; `BLPOP` delivers each record to exactly one popper. No
/// acknowledgment exists — a record popped by a worker that crashes
/// mid-dispatch is lost (at-most-once).
#[derive(Clone)]
pub struct RedisQueue {
    conn: ConnectionManager,
    queue_key: String,
}

impl std::fmt::Debug for RedisQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisQueue")
            .field("queue_key", &self.queue_key)
            .finish_non_exhaustive()
    }
}

impl RedisQueue {
    /// Connect using the default queue key.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_key(url, defaults::QUEUE_KEY).await
    }

    /// Connect with an explicit queue key.
    pub async fn connect_with_key(url: &str, queue_key: impl Into<String>) -> Result<Self> {
        let queue_key = queue_key.into();
        let client = redis::Client::open(url)
            .map_err(|e| Error::Config(format!("Invalid Redis URL: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| Error::Queue(e.to_string()))?;

        info!(queue_key = %queue_key, "Connected durable queue backend");
        Ok(Self { conn, queue_key })
    }

    /// Connect from environment variables.
    ///
    /// `REDIS_URL` is required — the durable backend has no degraded mode,
    /// so a missing endpoint fails construction immediately.
    /// `INTELLEX_QUEUE_KEY` overrides the default queue key.
    pub async fn from_env() -> Result<Self> {
        let url = std::env::var("REDIS_URL").map_err(|_| {
            Error::Config("REDIS_URL is required for the durable queue backend".to_string())
        })?;
        let queue_key = std::env::var("INTELLEX_QUEUE_KEY")
            .unwrap_or_else(|_| defaults::QUEUE_KEY.to_string());
        Self::connect_with_key(&url, queue_key).await
    }

    /// The Redis list key this backend reads and writes.
    pub fn queue_key(&self) -> &str {
        &self.queue_key
    }
}

#[async_trait]
impl QueueBackend for RedisQueue {
    async fn put(&self, job: MessageJob) -> Result<()> {
        let raw = serde_json::to_string(&job)?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .rpush(&self.queue_key, raw)
            .await
            .map_err(|e| Error::Queue(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, timeout: Duration) -> Result<Option<MessageJob>> {
        let mut conn = self.conn.clone();
        let item: Option<(String, String)> = conn
            .blpop(&self.queue_key, timeout.as_secs_f64())
            .await
            .map_err(|e| Error::Queue(e.to_string()))?;

        match item {
            None => Ok(None),
            Some((_, raw)) => match decode_record(&raw) {
                Ok(job) => Ok(Some(job)),
                Err(e) => {
                    warn!(
                        error = %e,
                        queue_key = %self.queue_key,
                        "Skipping malformed queue record"
                    );
                    Ok(None)
                }
            },
        }
    }
}
