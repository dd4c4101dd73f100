//! Background fetch workers.
//!
//! Each selection runs the fetch + annotate pipeline on its own short-lived
//! thread and reports back over an `mpsc` channel, tagged with the request id
//! that started it. The dashboard decides whether the outcome is still wanted.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::app::pipeline::{self, ChartData};
use crate::data::ObservationSource;
use crate::domain::IndicatorDefinition;
use crate::error::FetchError;

/// Result of one background fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request_id: u64,
    pub indicator: &'static IndicatorDefinition,
    pub result: Result<ChartData, FetchError>,
}

/// Spawn a worker that loads `indicator` and sends the outcome on `tx`.
pub fn spawn_fetch(
    source: Arc<dyn ObservationSource>,
    indicator: &'static IndicatorDefinition,
    limit: usize,
    request_id: u64,
    tx: Sender<FetchOutcome>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("econ-fetch-{request_id}"))
        .spawn(move || {
            let result = pipeline::load_chart(source.as_ref(), indicator, limit);
            let outcome = FetchOutcome {
                request_id,
                indicator,
                result,
            };
            // The dashboard may already be gone (quit while loading).
            if tx.send(outcome).is_err() {
                tracing::debug!(request_id, "fetch outcome dropped: receiver closed");
            }
        })
}
