// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Write batching in front of a [`PropertyTransport`].
//!
//! The first write after an idle period opens a batch and schedules a flush
//! one window later. Writes arriving before the flush join the batch; a
//! second write to the same property replaces the first. When the window
//! closes the whole batch goes out in one transport call and every caller
//! that joined it is settled with that call's result, exactly once.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::{PropertyTransport, PropertyWrite, PropertyWriter};
use crate::config::BufferConfig;
use crate::error::ProtocolError;
use crate::property::PropertyId;

type Waiter = oneshot::Sender<Result<(), ProtocolError>>;

#[derive(Default)]
struct PendingBatch {
    writes: Vec<PropertyWrite>,
    waiters: Vec<Waiter>,
}

impl PendingBatch {
    fn push(&mut self, write: PropertyWrite, waiter: Waiter) {
        match self.writes.iter_mut().find(|w| w.id == write.id) {
            Some(existing) => existing.value = write.value,
            None => self.writes.push(write),
        }
        self.waiters.push(waiter);
    }
}

/// A [`PropertyWriter`] that merges writes issued within a short window.
///
/// Requires a running tokio runtime; the flush runs on a spawned task so a
/// caller dropping its future does not strand the rest of the batch.
///
/// # Examples
///
/// ```no_run
/// use bulb_bridge::config::BufferConfig;
/// use bulb_bridge::error::ProtocolError;
/// use bulb_bridge::protocol::{BufferedWriter, PropertyTransport, PropertyWrite};
///
/// struct CloudApi;
///
/// impl PropertyTransport for CloudApi {
///     async fn send_properties(&self, writes: Vec<PropertyWrite>) -> Result<(), ProtocolError> {
///         // one request carrying every write
///         Ok(())
///     }
/// }
///
/// let writer = BufferedWriter::with_config(CloudApi, BufferConfig::default());
/// ```
pub struct BufferedWriter<T> {
    transport: Arc<T>,
    config: BufferConfig,
    pending: Arc<Mutex<Option<PendingBatch>>>,
}

impl<T: PropertyTransport> BufferedWriter<T> {
    /// Creates a writer with the default window.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, BufferConfig::default())
    }

    /// Creates a writer with the given buffer configuration.
    #[must_use]
    pub fn with_config(transport: T, config: BufferConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the batching window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.config.window
    }

    /// Returns the number of distinct writes waiting for the next flush.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().as_ref().map_or(0, |batch| batch.writes.len())
    }

    /// Queues a write and waits for the batch carrying it to settle.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the batch fails, or
    /// `ProtocolError::ChannelClosed` if the flush task went away.
    pub async fn write(&self, write: PropertyWrite) -> Result<(), ProtocolError> {
        let (tx, rx) = oneshot::channel();
        let opens_batch = {
            let mut pending = self.pending.lock();
            let opens_batch = pending.is_none();
            tracing::trace!(%write, opens_batch, "Queueing property write");
            pending.get_or_insert_with(PendingBatch::default).push(write, tx);
            opens_batch
        };

        if opens_batch {
            self.spawn_flush();
        }

        rx.await
            .unwrap_or_else(|_| Err(ProtocolError::ChannelClosed("batch flush task ended".into())))
    }

    fn spawn_flush(&self) {
        let transport = Arc::clone(&self.transport);
        let pending = Arc::clone(&self.pending);
        let window = self.config.window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;

            let batch = pending.lock().take();
            let Some(batch) = batch else {
                return;
            };

            tracing::debug!(
                writes = batch.writes.len(),
                waiters = batch.waiters.len(),
                "Flushing buffered property writes"
            );
            let result = transport.send_properties(batch.writes).await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "Buffered property write failed");
            }

            for waiter in batch.waiters {
                // The caller may have stopped waiting
                let _ = waiter.send(result.clone());
            }
        });
    }
}

impl<T: PropertyTransport> PropertyWriter for BufferedWriter<T> {
    async fn set_buffered_property(
        &self,
        id: PropertyId,
        value: String,
    ) -> Result<(), ProtocolError> {
        self.write(PropertyWrite::new(id, value)).await
    }
}

impl<T> std::fmt::Debug for BufferedWriter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferedWriter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
