use crate::{DataError, parse_network_data};
use cosponsor_core::Dataset;
use crossbeam_channel::Receiver;

/// Where the dump server listens by default.
pub const DEFAULT_DATA_URL: &str = "http://127.0.0.1:5500/api/network-data";

/// Fire the one-shot dataset fetch. The result arrives on the returned
/// channel from the ehttp worker; the UI polls it each frame while
/// showing the loading state. While pending, no visualization exists.
pub fn fetch_network_data(url: &str) -> Receiver<Result<Dataset, DataError>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    tracing::info!(url, "requesting network dataset");

    ehttp::fetch(ehttp::Request::get(url), move |result| {
        let outcome = match result {
            Ok(response) => {
                dataset_from_status(response.status, response.text().unwrap_or_default())
            }
            Err(message) => Err(DataError::Fetch { message }),
        };
        if let Err(error) = &outcome {
            tracing::error!(%error, "network dataset fetch failed");
        }
        let _ = tx.send(outcome);
    });

    rx
}

/// Map an HTTP status + body to a dataset or the error taxonomy.
fn dataset_from_status(status: u16, body: &str) -> Result<Dataset, DataError> {
    match status {
        200 => parse_network_data(body),
        404 => Err(DataError::NoData),
        status if status >= 500 => Err(DataError::Server { status }),
        status => Err(DataError::Fetch {
            message: format!("unexpected HTTP status {status}"),
        }),
    }
}
