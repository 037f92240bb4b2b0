use log::info;

use crate::{
    error::{PipelineErr, Result},
    records::Record,
};

/// The endpoint serving the car records this pipeline was built around.
pub const DEFAULT_DATA_URL: &str =
    "https://storage.googleapis.com/tfjs-tutorials/carsData.json";

/// Fetches the full record set from a JSON endpoint.
///
/// One GET, no authentication, no pagination, no retries. Any transport
/// failure, non-success status or undecodable body maps to
/// `SourceUnavailable`; with no data there is nothing for the rest of the
/// pipeline to do.
pub async fn fetch_records(url: &str) -> Result<Vec<Record>> {
    let unavailable = |source: reqwest::Error| PipelineErr::SourceUnavailable {
        url: url.to_owned(),
        source,
    };

    let response = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(unavailable)?;
    let records: Vec<Record> = response.json().await.map_err(unavailable)?;

    info!("fetched {} record(s) from {url}", records.len());
    Ok(records)
}
