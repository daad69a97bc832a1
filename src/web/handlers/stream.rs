//! # Run Status Stream Handler
//!
//! Server-Sent Events relay of one run's status. Terminal updates are also
//! written into the completed run history.

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::StreamExt;

use crate::history::CompletedRun;
use crate::logging::log_error;
use crate::stream::{relay_run_status, RelaySettings, StreamEvent};
use crate::web::state::AppState;

/// Unnamed `data:` frame so browser `onmessage` listeners receive it.
///
/// Returns `None` when the event cannot be encoded; the frame is dropped.
fn to_sse_event(run_id: &str, event: &StreamEvent) -> Option<Event> {
    match Event::default().json_data(event) {
        Ok(frame) => Some(frame),
        Err(e) => {
            log_error("stream", "encode_event", &e.to_string(), Some(run_id));
            None
        }
    }
}

/// Stream status updates: GET /api/workflows/stream/:run_id
pub async fn stream_run_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let settings = RelaySettings::from(&state.config.stream);
    let keep_alive = state.config.stream.keep_alive();

    let events = async_stream::stream! {
        let relay = relay_run_status(state.api.clone(), run_id.clone(), settings);
        tokio::pin!(relay);

        while let Some(event) = relay.next().await {
            if let Some(payload) = event.status_update() {
                if payload.status.is_terminal() {
                    state.record_completed(CompletedRun::from(payload)).await;
                }
            }
            if let Some(frame) = to_sse_event(&run_id, &event) {
                yield Ok(frame);
            }
        }
    };

    Sse::new(events).keep_alive(KeepAlive::new().interval(keep_alive).text("ping"))
}
