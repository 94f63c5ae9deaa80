//! Per-connection ingest loop for the live channel.
//!
//! Each upgraded socket registers with the hub, then runs two futures until
//! either finishes: a read loop ingesting position frames and a forward loop
//! draining broadcasts back onto the socket.

use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{future, future::Either, pin_mut, SinkExt, Stream, StreamExt, TryStreamExt};
use tokio::sync::mpsc::UnboundedReceiver;

use fleettrack_shared::domain::Location;

use crate::AppState;

/// Entry point run by the upgrade handler once the handshake succeeded.
pub async fn accept_and_log(socket: WebSocket, peer: SocketAddr, state: &'static AppState) {
    match handle_socket(socket, peer, state).await {
        Ok(()) => tracing::info!(%peer, "observer disconnected"),
        Err(e) => tracing::warn!(%peer, error = %e, "error on live channel"),
    }
}

async fn handle_socket(
    socket: WebSocket,
    peer: SocketAddr,
    state: &'static AppState,
) -> anyhow::Result<()> {
    let key = peer.to_string();
    let (id, rx) = state.hub.register();
    tracing::info!(%peer, observers = state.hub.len(), "observer connected");

    let (write, read) = socket.split();
    let receive_frames = ingest(read, key, state);
    let forward_frames = forward(rx, write);
    pin_mut!(receive_frames, forward_frames);

    let result = match future::select(receive_frames, forward_frames).await {
        Either::Left((res, _)) => res,
        Either::Right((res, _)) => res,
    };
    // Dropping the receiver is what evicts us if a later broadcast still
    // holds the handle; unregister covers the clean path.
    state.hub.unregister(&id);
    result
}

/// Read loop: one JSON location per text frame, stored under the
/// transport-identity key, then fanned out to every observer. Generic over
/// the frame source; production feeds it the read half of the socket.
async fn ingest<S>(read: S, key: String, state: &'static AppState) -> anyhow::Result<()>
where
    S: Stream<Item = Result<Message, axum::Error>>,
{
    let key = &key;
    read.map_err(anyhow::Error::from)
        .try_filter_map(|msg| match msg {
            Message::Text(text) => future::ok(Some(text)),
            _ => future::ok(None),
        })
        .try_for_each(|text| async move {
            let location: Location = serde_json::from_str(&text)?;
            state.locations.put(key, location.clone());
            state.hub.broadcast(&location);
            Ok(())
        })
        .await
}

/// Forward loop: ends when the socket rejects a write or the hub side of the
/// channel is dropped.
async fn forward(
    mut rx: UnboundedReceiver<Location>,
    mut write: SplitSink<WebSocket, Message>,
) -> anyhow::Result<()> {
    while let Some(location) = rx.recv().await {
        let frame = serde_json::to_string(&location)?;
        write.send(Message::Text(frame)).await?;
    }
    Ok(())
}
