//! WebSocket channel for pushing routes to the backend.
//!
//! The backend shares this socket with its telemetry broadcast, so frames
//! that are not a reply to our command are skipped while waiting for an ack.
//! The outcome of a submission never touches the route itself.

use anyhow::Result;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use gcs_core::models::{Mission, SendRouteCommand, ServerReply, SetSpeedCommand};
use gcs_core::{manual_mission_name, RouteModel};
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Acknowledgement of a `send_route` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAck {
    pub name: String,
    pub count: usize,
}

/// Ways a route submission can fail after it was sent.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("backend rejected route: {0}")]
    Rejected(String),
    #[error("connection closed before the route was acknowledged")]
    Closed,
    #[error("no acknowledgement within {0:?}")]
    Timeout(Duration),
}

/// Open WebSocket connection to the backend.
pub struct RouteChannel {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl RouteChannel {
    /// Connect to a `ws://` or `wss://` endpoint.
    pub async fn connect(url: &str) -> Result<Self> {
        let (socket, _) = connect_async(url).await?;
        tracing::info!(url, "Route channel connected");
        Ok(Self { socket })
    }

    /// Write a `send_route` frame for the mission.
    pub async fn send_route(&mut self, mission: &Mission) -> Result<()> {
        gcs_core::validate_mission(mission)?;
        let payload = serde_json::to_string(&SendRouteCommand::new(mission))?;
        self.socket.send(Message::Text(payload)).await?;
        tracing::info!(mission = %mission.name, points = mission.points.len(), "Route sent");
        Ok(())
    }

    /// Read the next JSON reply (returns None on close).
    ///
    /// Non-JSON frames are skipped.
    pub async fn next_reply(&mut self) -> Result<Option<ServerReply>> {
        while let Some(msg) = self.socket.next().await {
            let text = match msg? {
                Message::Text(text) => text,
                Message::Binary(data) => match String::from_utf8(data) {
                    Ok(text) => text,
                    Err(_) => continue,
                },
                Message::Close(_) => return Ok(None),
                _ => continue,
            };
            match ServerReply::parse(&text) {
                Ok(reply) => return Ok(Some(reply)),
                Err(err) => tracing::debug!(error = %err, "Skipping non-JSON frame"),
            }
        }
        Ok(None)
    }

    /// Send a mission and wait for the backend to acknowledge it.
    pub async fn send_route_and_wait(
        &mut self,
        mission: &Mission,
        timeout: Duration,
    ) -> Result<RouteAck> {
        self.send_route(mission).await?;

        let ack = tokio::time::timeout(timeout, self.wait_for_ack(mission))
            .await
            .map_err(|_| ReplyError::Timeout(timeout))??;

        tracing::info!(mission = %ack.name, count = ack.count, "Route acknowledged");
        Ok(ack)
    }

    /// Submit the current route under a `mission_manual_<timestamp>` name.
    pub async fn send_manual_route(
        &mut self,
        route: &RouteModel,
        timeout: Duration,
    ) -> Result<RouteAck> {
        let mission = route.to_mission(manual_mission_name(Utc::now()))?;
        self.send_route_and_wait(&mission, timeout).await
    }

    /// Ask the backend to change cruise speed and wait for its ack.
    ///
    /// Returns the speed the backend acknowledged.
    pub async fn set_speed(&mut self, value_mps: f64, timeout: Duration) -> Result<f64> {
        if !value_mps.is_finite() || value_mps < 0.0 {
            anyhow::bail!("Invalid speed: {}", value_mps);
        }
        let payload = serde_json::to_string(&SetSpeedCommand::new(value_mps))?;
        self.socket.send(Message::Text(payload)).await?;
        tracing::info!(speed_mps = value_mps, "Speed change sent");

        let acked = tokio::time::timeout(timeout, self.wait_for_speed_ack(value_mps))
            .await
            .map_err(|_| ReplyError::Timeout(timeout))??;
        Ok(acked)
    }

    pub async fn close(mut self) -> Result<()> {
        self.socket.close(None).await?;
        Ok(())
    }

    async fn wait_for_ack(&mut self, mission: &Mission) -> Result<RouteAck> {
        loop {
            match self.next_reply().await? {
                Some(ServerReply::Ack { cmd, name, count, .. }) if cmd == SendRouteCommand::CMD => {
                    // A late ack for an earlier submission is not ours.
                    if let Some(acked) = name.as_deref() {
                        if acked != mission.name {
                            tracing::debug!(acked, expected = %mission.name, "Skipping stale ack");
                            continue;
                        }
                    }
                    return Ok(RouteAck {
                        name: name.unwrap_or_else(|| mission.name.clone()),
                        count: count.unwrap_or(mission.points.len()),
                    });
                }
                Some(ServerReply::Error { msg }) => {
                    tracing::warn!(mission = %mission.name, error = %msg, "Route rejected");
                    return Err(ReplyError::Rejected(msg).into());
                }
                Some(_) => continue,
                None => return Err(ReplyError::Closed.into()),
            }
        }
    }

    async fn wait_for_speed_ack(&mut self, requested: f64) -> Result<f64> {
        loop {
            match self.next_reply().await? {
                Some(ServerReply::Ack { cmd, value, .. }) if cmd == SetSpeedCommand::CMD => {
                    return Ok(value.unwrap_or(requested));
                }
                Some(ServerReply::Error { msg }) => {
                    return Err(ReplyError::Rejected(msg).into());
                }
                Some(_) => continue,
                None => return Err(ReplyError::Closed.into()),
            }
        }
    }
}

/// Turn an http(s) base URL into the ws(s) URL of `path`.
pub fn http_to_ws_url(base: &str, path: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => other,
    }
    .to_string();

    url.set_scheme(&scheme)
        .map_err(|_| anyhow::anyhow!("Invalid base URL scheme"))?;
    url.set_path(path);
    Ok(url)
}
