//! Sensor session: transports wired to one screen's state
//!
//! ## Overview
//!
//! Owns a [`ScreenState`] plus the two transports feeding it, and is
//! the sole mutator of the underlying store. The push task never
//! touches state directly; it forwards readings over a channel which
//! [`SensorSession::pump`] drains synchronously during the screen's
//! update cycle.
//!
//! ## Lifecycle
//!
//! ```text
//! mount      → load_snapshot() + subscribe()
//! update     → pump(), screen().chart(..)
//! button     → refresh()
//! unmount    → teardown()
//! ```
//!
//! An in-flight snapshot request is not cancelled on teardown; the
//! closed flag makes any late completion a no-op instead of a stale
//! write into a dead screen.

use tokio::sync::mpsc;

use thermoview_core::{Reading, ScreenState};

use crate::http::SnapshotClient;
#[cfg(feature = "mqtt")]
use crate::mqtt::{PushChannel, PushConfig, PushError};

/// One screen's ingestion session.
pub struct SensorSession {
    screen: ScreenState,
    client: SnapshotClient,
    rx: Option<mpsc::Receiver<Reading>>,
    #[cfg(feature = "mqtt")]
    channel: Option<PushChannel>,
    closed: bool,
}

impl SensorSession {
    /// Create a session around a snapshot client, with an empty store.
    pub fn new(client: SnapshotClient) -> Self {
        Self {
            screen: ScreenState::new(),
            client,
            rx: None,
            #[cfg(feature = "mqtt")]
            channel: None,
            closed: false,
        }
    }

    /// The screen state this session feeds.
    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }

    /// Mutable screen state, for selection changes.
    pub fn screen_mut(&mut self) -> &mut ScreenState {
        &mut self.screen
    }

    /// Whether the session has been torn down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fetch the snapshot and replace the store with it.
    ///
    /// On any failure (transport, non-2xx, undecodable body) the store
    /// is left unchanged and the failure is logged; nothing propagates
    /// to the rendering layer. No retry.
    pub fn load_snapshot(&mut self) {
        if self.closed {
            return;
        }

        match self.client.fetch() {
            Ok(readings) => {
                log::debug!("snapshot loaded: {} readings", readings.len());
                self.screen.store_mut().replace(readings);
            }
            Err(e) => log::error!("snapshot fetch failed: {}", e),
        }
    }

    /// Re-fetch the snapshot on demand.
    ///
    /// Does not affect an open push channel.
    pub fn refresh(&mut self) {
        self.load_snapshot();
    }

    /// Open the push channel and start receiving reading updates.
    #[cfg(feature = "mqtt")]
    pub async fn subscribe(&mut self, config: PushConfig) -> Result<(), PushError> {
        if self.closed {
            return Ok(());
        }

        let (channel, rx) = PushChannel::connect(config).await?;
        self.channel = Some(channel);
        self.rx = Some(rx);
        Ok(())
    }

    /// Wire an already-open stream of pushed readings.
    ///
    /// [`subscribe`](Self::subscribe) does this for MQTT; tests feed a
    /// hand-made channel through here.
    pub fn attach(&mut self, rx: mpsc::Receiver<Reading>) {
        self.rx = Some(rx);
    }

    /// Drain pending push events into the store.
    ///
    /// Each event is appended only if its timestamp is not already
    /// present. Call once per screen update cycle; returns the number
    /// of readings accepted.
    pub fn pump(&mut self) -> usize {
        if self.closed {
            return 0;
        }

        let Some(rx) = self.rx.as_mut() else {
            return 0;
        };

        let mut accepted = 0;
        while let Ok(reading) = rx.try_recv() {
            if self.screen.store_mut().apply(reading) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Terminate the push channel.
    ///
    /// Idempotent; safe to call however teardown was triggered.
    pub async fn unsubscribe(&mut self) {
        self.rx = None;
        #[cfg(feature = "mqtt")]
        if let Some(channel) = self.channel.take() {
            channel.close().await;
        }
    }

    /// Unsubscribe and close the session for good.
    ///
    /// Afterwards no operation mutates the store, even if an in-flight
    /// push event or snapshot response arrives late.
    pub async fn teardown(&mut self) {
        self.unsubscribe().await;
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::SnapshotConfig;

    fn session() -> SensorSession {
        // Nothing listens on port 9; fetches fail fast with a
        // transport error, which is all these tests need
        let client = SnapshotClient::new(
            SnapshotConfig::new("http://127.0.0.1:9").timeout_secs(1),
        )
        .unwrap();
        SensorSession::new(client)
    }

    fn reading(sensor_id: u8, timestamp: u64, temperature: f32) -> Reading {
        Reading {
            sensor_id,
            timestamp,
            temperature,
        }
    }

    #[tokio::test]
    async fn pump_applies_and_deduplicates() {
        let mut session = session();
        let (tx, rx) = mpsc::channel(8);
        session.attach(rx);

        tx.send(reading(1, 1000, 20.0)).await.unwrap();
        tx.send(reading(1, 1000, 20.0)).await.unwrap();
        tx.send(reading(1, 2000, 21.0)).await.unwrap();

        assert_eq!(session.pump(), 2);
        assert_eq!(session.screen().store().len(), 2);
        assert_eq!(session.screen().store().stats().duplicates_dropped, 1);
    }

    #[tokio::test]
    async fn pump_without_channel_is_noop() {
        let mut session = session();
        assert_eq!(session.pump(), 0);
        assert!(session.screen().store().is_empty());
    }

    #[tokio::test]
    async fn no_mutation_after_teardown() {
        let mut session = session();
        let (tx, rx) = mpsc::channel(8);
        session.attach(rx);

        // Event already in flight when the screen goes away
        tx.send(reading(1, 1000, 20.0)).await.unwrap();
        session.teardown().await;

        assert_eq!(session.pump(), 0);
        assert!(session.screen().store().is_empty());
        assert!(session.is_closed());

        // The channel is gone; later pushes have nowhere to land
        assert!(tx.send(reading(1, 2000, 21.0)).await.is_err());
    }

    #[tokio::test]
    async fn unsubscribe_is_idempotent() {
        let mut session = session();
        let (_tx, rx) = mpsc::channel::<Reading>(8);
        session.attach(rx);

        session.unsubscribe().await;
        session.unsubscribe().await;
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn failed_snapshot_leaves_store_unchanged() {
        let mut session = session();
        session.screen_mut().store_mut().replace(vec![reading(1, 1000, 20.0)]);

        session.load_snapshot();
        assert_eq!(session.screen().store().len(), 1);
    }

    #[tokio::test]
    async fn closed_session_skips_snapshot() {
        let mut session = session();
        session.teardown().await;

        // Would otherwise count a snapshot application on success
        session.load_snapshot();
        assert_eq!(session.screen().store().stats().snapshots_applied, 0);
    }
}
