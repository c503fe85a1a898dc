//! Background fetch cycles
//!
//! Runs each dashboard fetch in a spawned task so the terminal event loop
//! stays responsive while the network calls are in flight, and delivers the
//! outcome back over a tokio channel.
//!
//! Every cycle is tagged with the request id that started it. A new search
//! does not cancel an in-flight cycle; instead the app compares ids on
//! arrival and drops outcomes from superseded cycles, so a slow response for
//! the previous city can never overwrite the newer one.

use chrono::Local;
use tokio::sync::mpsc;

use crate::aggregate::{self, FetchError};
use crate::data::{ApiClient, Dashboard};

/// Outcome of one fetch cycle, delivered to the main loop
#[derive(Debug)]
pub struct FetchOutcome {
    /// Id of the cycle that produced this outcome
    pub request_id: u64,
    /// The settled dashboard result
    pub result: Result<Dashboard, FetchError>,
}

/// Spawns a fetch cycle for the given city.
///
/// The task always sends exactly one `FetchOutcome`; a closed receiver
/// (app shutting down) is ignored.
pub fn spawn_fetch(
    client: ApiClient,
    city: String,
    request_id: u64,
    tx: mpsc::Sender<FetchOutcome>,
) {
    tokio::spawn(async move {
        tracing::debug!(request_id, city = %city, "fetch cycle started");
        let today = Local::now().date_naive();
        let result = aggregate::fetch_dashboard(&client, &city, today).await;

        if let Err(ref err) = result {
            tracing::debug!(request_id, error = %err, "fetch cycle failed");
        }

        let _ = tx.send(FetchOutcome { request_id, result }).await;
    });
}

/// Checks for a completed fetch cycle without blocking
pub fn try_recv(rx: &mut mpsc::Receiver<FetchOutcome>) -> Option<FetchOutcome> {
    rx.try_recv().ok()
}
