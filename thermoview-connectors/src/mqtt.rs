//! MQTT push channel
//!
//! ## Overview
//!
//! Persistent subscription delivering incremental reading updates:
//! one publish per reading, same JSON shape as the snapshot body. The
//! bearer token travels as connection credentials; the channel never
//! refreshes or validates it.
//!
//! ## Design
//!
//! [`PushChannel::connect`] spawns a tokio task that polls the rumqttc
//! event loop and forwards each decoded reading into a bounded mpsc
//! channel. The receiving side (the session) is the sole store
//! mutator, so the task itself holds no shared state.
//!
//! Poll errors are logged and polling continues after a short pause;
//! reconnection is the transport's affair, and delivery stays best
//! effort. Undecodable payloads are logged and dropped.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use thermoview_core::Reading;

/// Default topic carrying reading updates.
pub const DEFAULT_TOPIC: &str = "sensors/readings";

/// Pause after an event-loop error before polling again.
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(1);

/// Push channel errors
#[derive(Debug, Error)]
pub enum PushError {
    /// Subscribe or disconnect request could not be queued
    #[error("mqtt client error: {0}")]
    Client(#[from] rumqttc::ClientError),
}

/// Push channel configuration
#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Broker host (same host as the snapshot endpoint)
    pub host: String,
    /// Broker port
    pub port: u16,
    /// Client identifier presented to the broker
    pub client_id: String,
    /// Opaque bearer token, passed as connection credentials
    pub token: Option<String>,
    /// Topic carrying reading updates
    pub topic: String,
    /// Keep-alive interval
    pub keep_alive: Duration,
    /// Capacity of the reading channel handed to the session
    pub channel_capacity: usize,
}

impl PushConfig {
    /// Create new configuration for a broker address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: "thermoview".into(),
            token: None,
            topic: DEFAULT_TOPIC.into(),
            keep_alive: Duration::from_secs(30),
            channel_capacity: 64,
        }
    }

    /// Set bearer token authentication.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the client identifier.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = id.into();
        self
    }

    /// Override the reading-update topic.
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Set keep-alive interval in seconds.
    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive = Duration::from_secs(secs);
        self
    }
}

/// Handle to an open push subscription.
///
/// Must be closed exactly once when the screen tears down; dropping
/// without closing aborts the poll task so repeated mount/unmount
/// cycles cannot leak connections.
pub struct PushChannel {
    client: AsyncClient,
    topic: String,
    task: Option<JoinHandle<()>>,
}

impl PushChannel {
    /// Open the subscription and return the reading stream.
    pub async fn connect(
        config: PushConfig,
    ) -> Result<(Self, mpsc::Receiver<Reading>), PushError> {
        let mut options =
            MqttOptions::new(config.client_id.as_str(), config.host.as_str(), config.port);
        options.set_keep_alive(config.keep_alive);
        if let Some(token) = &config.token {
            options.set_credentials("bearer", token.as_str());
        }

        let (client, event_loop) = AsyncClient::new(options, 16);
        client
            .subscribe(config.topic.as_str(), QoS::AtLeastOnce)
            .await?;

        let (tx, rx) = mpsc::channel(config.channel_capacity);
        let task = tokio::spawn(forward_readings(event_loop, tx));

        Ok((
            Self {
                client,
                topic: config.topic,
                task: Some(task),
            },
            rx,
        ))
    }

    /// Unsubscribe, disconnect, and stop the poll task.
    pub async fn close(mut self) {
        let _ = self.client.unsubscribe(self.topic.as_str()).await;
        let _ = self.client.disconnect().await;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PushChannel {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Poll the event loop and forward decoded readings.
///
/// Ends when the receiving side hangs up.
async fn forward_readings(mut event_loop: EventLoop, tx: mpsc::Sender<Reading>) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                match serde_json::from_slice::<Reading>(&publish.payload) {
                    Ok(reading) => {
                        if tx.send(reading).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => log::warn!("dropping undecodable push event: {}", e),
                }
            }
            Ok(_) => {}
            Err(e) => {
                // Pause so a dead broker does not spin the loop; the
                // transport reconnects on the next poll
                log::warn!("push channel poll error: {}", e);
                tokio::time::sleep(POLL_ERROR_PAUSE).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = PushConfig::new("localhost", 1883)
            .bearer_token("test-token")
            .client_id("screen-1")
            .topic("sensors/updates")
            .keep_alive_secs(10);

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 1883);
        assert_eq!(config.client_id, "screen-1");
        assert_eq!(config.token.as_deref(), Some("test-token"));
        assert_eq!(config.topic, "sensors/updates");
        assert_eq!(config.keep_alive, Duration::from_secs(10));
    }

    #[test]
    fn default_topic() {
        let config = PushConfig::new("localhost", 1883);
        assert_eq!(config.topic, DEFAULT_TOPIC);
        assert!(config.token.is_none());
    }
}
