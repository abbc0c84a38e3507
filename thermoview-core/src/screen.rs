//! Screen state: the owned context behind one chart screen
//!
//! Bundles the reading store with the two user-controlled selections
//! so there is a single mutable owner and no hidden globals. The
//! chart recomputes synchronously from current state on every call.

use crate::projection::{project, ChartSeries};
use crate::reading::SensorId;
use crate::store::ReadingStore;
use crate::time::TimeSource;
use crate::window::TimeWindow;

/// Environment selected when a screen first opens.
pub const DEFAULT_ENVIRONMENT: SensorId = 1;

/// Store plus selection state for one chart screen.
#[derive(Debug, Clone)]
pub struct ScreenState {
    store: ReadingStore,
    environment: SensorId,
    window: TimeWindow,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenState {
    /// Empty store, default environment, trailing-hour window.
    pub fn new() -> Self {
        Self {
            store: ReadingStore::new(),
            environment: DEFAULT_ENVIRONMENT,
            window: TimeWindow::LastHour,
        }
    }

    /// Change the displayed environment.
    pub fn select_environment(&mut self, environment: SensorId) {
        self.environment = environment;
    }

    /// Change the recency window.
    pub fn select_window(&mut self, window: TimeWindow) {
        self.window = window;
    }

    /// Currently selected environment.
    pub fn environment(&self) -> SensorId {
        self.environment
    }

    /// Currently selected window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Read access to the reading store.
    pub fn store(&self) -> &ReadingStore {
        &self.store
    }

    /// Mutable access for the ingestion side.
    pub fn store_mut(&mut self) -> &mut ReadingStore {
        &mut self.store
    }

    /// Compute the series to chart from current state.
    ///
    /// Pure, synchronous read; never fails. Exactly one environment is
    /// charted at a time.
    pub fn chart(&self, clock: &dyn TimeSource) -> ChartSeries {
        project(
            self.store.readings(),
            self.window,
            self.environment,
            clock.now(),
        )
    }
}
