//! Selection state for the interactive dashboard.
//!
//! The dashboard owns one "current selection" slot:
//!
//! - selecting an indicator starts a background fetch and puts the slot into
//!   `Loading`; any previous chart is cleared immediately
//! - outcomes are tagged with a request id; only the most recent request may
//!   fill the slot (last-selected-wins), older ones are discarded
//! - changing the time window only re-projects the stored data, no I/O

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::app::pipeline::{self, ChartData, ChartView};
use crate::data::ObservationSource;
use crate::domain::{INDICATORS, IndicatorDefinition, TimeWindow};
use crate::error::FetchError;

pub mod worker;

pub use worker::FetchOutcome;

/// What the current selection slot holds.
#[derive(Debug, Clone)]
pub enum LoadState {
    Idle,
    Loading,
    Ready(ChartData),
    Failed(FetchError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

pub struct Dashboard {
    source: Arc<dyn ObservationSource>,
    limit: usize,
    selected: &'static IndicatorDefinition,
    window: TimeWindow,
    state: LoadState,
    view: Option<ChartView>,
    request_id: u64,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl Dashboard {
    pub fn new(source: Arc<dyn ObservationSource>, limit: usize, window: TimeWindow) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            limit,
            selected: INDICATORS.first(),
            window,
            state: LoadState::Idle,
            view: None,
            request_id: 0,
            tx,
            rx,
        }
    }

    pub fn selected(&self) -> &'static IndicatorDefinition {
        self.selected
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Windowed view of the current data, if loaded.
    pub fn view(&self) -> Option<&ChartView> {
        self.view.as_ref()
    }

    /// Make `indicator` current and start fetching it.
    ///
    /// Returns the id of the new request.
    pub fn select(&mut self, indicator: &'static IndicatorDefinition) -> u64 {
        self.request_id += 1;
        self.selected = indicator;
        self.state = LoadState::Loading;
        self.view = None;

        tracing::info!(indicator = indicator.id, request_id = self.request_id, "selected indicator");

        if let Err(e) = worker::spawn_fetch(
            Arc::clone(&self.source),
            indicator,
            self.limit,
            self.request_id,
            self.tx.clone(),
        ) {
            tracing::error!(error = %e, "failed to spawn fetch worker");
            self.state = LoadState::Failed(FetchError::Transport(format!(
                "failed to start fetch: {e}"
            )));
        }
        self.request_id
    }

    /// Select by registry id; `None` if the id is unknown.
    pub fn select_id(&mut self, id: &str) -> Option<u64> {
        let indicator = INDICATORS.get(id)?;
        Some(self.select(indicator))
    }

    /// Re-fetch the current indicator.
    pub fn refresh(&mut self) -> u64 {
        self.select(self.selected)
    }

    /// Change the window and re-project already-fetched data.
    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
        self.rebuild_view();
    }

    /// Apply every outcome that has already arrived. Returns `true` if the
    /// slot changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            changed |= self.apply(outcome);
        }
        changed
    }

    /// Block for at most `timeout` waiting for the next outcome.
    ///
    /// `None` on timeout, otherwise whether the outcome was applied.
    pub fn wait_next(&mut self, timeout: Duration) -> Option<bool> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(self.apply(outcome)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Block until the current request settles or `timeout` elapses.
    pub fn wait_settled(&mut self, timeout: Duration) -> &LoadState {
        let deadline = std::time::Instant::now() + timeout;
        while self.state.is_loading() {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            if remaining.is_zero() || self.wait_next(remaining).is_none() {
                break;
            }
        }
        &self.state
    }

    /// Fill the slot with `outcome` unless a newer request has been issued.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.request_id != self.request_id {
            tracing::debug!(
                stale = outcome.request_id,
                current = self.request_id,
                indicator = outcome.indicator.id,
                "discarding stale fetch outcome"
            );
            return false;
        }

        match outcome.result {
            Ok(data) => {
                self.state = LoadState::Ready(data);
                self.rebuild_view();
            }
            Err(err) => {
                tracing::warn!(indicator = outcome.indicator.id, error = %err, "fetch failed");
                self.state = LoadState::Failed(err);
                self.view = None;
            }
        }
        true
    }

    fn rebuild_view(&mut self) {
        self.view = match &self.state {
            LoadState::Ready(data) => Some(pipeline::chart_view(data, self.window)),
            _ => None,
        };
    }
}
