//! Fire-and-forget telemetry POST.
//!
//! Sends `id=test&key2=1` as a form body to a fixed LAN endpoint and logs
//! the JSON object it gets back. Every failure is logged and swallowed;
//! there is no retry, timeout or authentication, and nothing in the driving
//! state depends on the outcome.

use std::thread::{self, JoinHandle};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::TelemetryError;
use crate::model::constants::TELEMETRY_QUERY;

/// Interpret a response body: a JSON object is returned, any other JSON
/// value yields `None`.
pub fn parse_response(body: &str) -> Result<Option<Map<String, Value>>, TelemetryError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

/// POST `params` form-urlencoded to `url` and parse the reply. Blocks the
/// calling thread.
pub fn post_form(
    url: &str,
    params: &[(&str, &str)],
) -> Result<Option<Map<String, Value>>, TelemetryError> {
    let agent = ureq::Agent::new_with_defaults();
    let mut response = agent.post(url).send_form(params.iter().copied())?;
    let text = response.body_mut().read_to_string()?;
    parse_response(&text)
}

/// Send the fixed telemetry query on a background thread and log the outcome.
///
/// Returns the worker handle, or `None` if the thread could not be started.
pub fn send_detached(url: &str) -> Option<JoinHandle<()>> {
    let url = url.to_string();
    debug!(%url, "Sending telemetry");

    let spawned = thread::Builder::new()
        .name("telemetry".into())
        .spawn(move || match post_form(&url, &TELEMETRY_QUERY) {
            Ok(Some(map)) => {
                let json = Value::Object(map);
                info!("Telemetry response: {}", json);
            }
            Ok(None) => debug!("Telemetry response is not a JSON object"),
            Err(e) => warn!("{}", e),
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to start telemetry thread: {}", e);
            None
        }
    }
}
