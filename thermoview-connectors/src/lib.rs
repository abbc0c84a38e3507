//! Transport adapters for thermoview
//!
//! ## Overview
//!
//! Two transports feed the core ingestion store:
//!
//! - **HTTP snapshot** ([`http`]): a single authenticated `GET` that
//!   returns the full list of currently known readings. Used at mount
//!   and on manual refresh; each successful fetch replaces the store
//!   wholesale.
//! - **MQTT push channel** ([`mqtt`]): a persistent subscription on
//!   the same host delivering one reading per publish. Appends are
//!   deduplicated by the store, so redelivery is harmless.
//!
//! The [`session`] module ties both to a `ScreenState` and owns the
//! store exclusively: the push task only forwards decoded readings
//! over a bounded channel, and the session drains it synchronously.
//!
//! ## Failure semantics
//!
//! Best effort throughout. Transport failures, non-2xx responses, and
//! undecodable payloads are logged and otherwise ignored; the store
//! keeps its previous contents and nothing propagates to the
//! rendering layer. There is no retry and no backoff; recovery is the
//! next manual refresh or the next successful push.
//!
//! ## Example
//!
//! ```no_run
//! use thermoview_connectors::http::{SnapshotClient, SnapshotConfig};
//! use thermoview_connectors::mqtt::PushConfig;
//! use thermoview_connectors::session::SensorSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SnapshotClient::new(
//!     SnapshotConfig::new("http://localhost:3000").bearer_token("token"),
//! )?;
//!
//! let mut session = SensorSession::new(client);
//! session.load_snapshot();
//! session.subscribe(PushConfig::new("localhost", 1883).bearer_token("token")).await?;
//!
//! // Each screen update cycle:
//! session.pump();
//!
//! // On screen deactivation:
//! session.teardown().await;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "mqtt")]
pub mod mqtt;

#[cfg(feature = "http")]
pub mod session;

// Re-export common types
#[cfg(feature = "http")]
pub use http::{FetchError, SnapshotClient, SnapshotConfig};
#[cfg(feature = "mqtt")]
pub use mqtt::{PushChannel, PushConfig, PushError};
#[cfg(feature = "http")]
pub use session::SensorSession;
