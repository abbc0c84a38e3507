//! Core ingestion and projection pipeline for thermoview
//!
//! Maintains a deduplicated, insertion-ordered store of temperature
//! readings and derives chart-ready series from it, filtered by a
//! selected environment and time window.
//!
//! No I/O lives here: transports feed the store through
//! [`ReadingStore::apply`] and [`ReadingStore::replace`], and the
//! projection is a pure read of current state.
//!
//! ```no_run
//! use thermoview_core::{ScreenState, Reading, TimeWindow, time::SystemClock};
//!
//! let mut screen = ScreenState::new();
//! screen.store_mut().replace(vec![
//!     Reading { sensor_id: 1, timestamp: 1_700_000_000_000, temperature: 21.5 },
//! ]);
//! screen.select_window(TimeWindow::Last24Hours);
//!
//! let series = screen.chart(&SystemClock);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod environment;
pub mod projection;
pub mod reading;
pub mod screen;
pub mod store;
pub mod time;
pub mod window;

// Public API
pub use projection::{project, ChartSeries};
pub use reading::{Reading, SensorId};
pub use screen::ScreenState;
pub use store::ReadingStore;
pub use time::Timestamp;
pub use window::TimeWindow;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
