//! Server-Sent Events (SSE) utilities
//!
//! Shared SSE plumbing for InternLink services: services produce a stream of
//! typed frames and this module serializes them into SSE events.

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, warn};

/// A frame that can be pushed to an SSE client
pub trait SseFrame: Serialize {
    /// SSE `event:` name for this frame
    fn event_type(&self) -> &'static str;
}

/// Serialize a finite stream of frames into an SSE response
///
/// Each frame becomes one event whose data is the frame's JSON. The response
/// ends when `frames` ends; a frame that fails to serialize is logged and
/// skipped.
///
/// # Example
/// ```rust,ignore
/// pub async fn respond(...) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
///     internlink_common::sse::json_event_stream("interview turn", controller.run(request))
/// }
/// ```
pub fn json_event_stream<S, T>(
    stream_name: &'static str,
    frames: S,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Stream<Item = T> + Send + 'static,
    T: SseFrame + Send + 'static,
{
    let stream = async_stream::stream! {
        debug!("SSE: {} stream started", stream_name);

        let mut frames = Box::pin(frames);
        while let Some(frame) = frames.next().await {
            let event_type = frame.event_type();
            match serde_json::to_string(&frame) {
                Ok(json) => {
                    debug!("SSE: {} frame: {}", stream_name, event_type);
                    yield Ok(Event::default().event(event_type).data(json));
                }
                Err(e) => {
                    warn!("SSE: Failed to serialize {} frame {}: {}", stream_name, event_type, e);
                }
            }
        }

        debug!("SSE: {} stream closed", stream_name);
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
