//! Live WebSocket subscriptions with capped-exponential reconnect.
//!
//! Each socket is owned by exactly one subscription stream, together
//! with its backoff counter, so reconnect attempts never overlap: the
//! post-close sleep is the sole trigger of the next attempt. Transport
//! errors are logged and retried forever; there is no terminal failure
//! state.

use futures_util::{SinkExt, StreamExt};
use iced::Subscription;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;

use helmsight_common::{
    Backoff, Command, DeviceConfig, Inbound, ReadingSnapshot, WindEnvelope, WindFrame,
    decode_frame,
};

use crate::message::Message;

/// Handle for sending commands out over the wind socket.
///
/// Cloned freely into view callbacks; commands queue on an unbounded
/// channel drained by the socket writer.
#[derive(Debug, Clone)]
pub struct CommandLink {
    sender: mpsc::UnboundedSender<Command>,
}

impl CommandLink {
    pub(crate) fn new(sender: mpsc::UnboundedSender<Command>) -> Self {
        Self { sender }
    }

    /// Queue a command for the socket writer. Dropped silently if the
    /// link already went down; the hub's next snapshot restores state.
    pub fn send(&self, command: Command) {
        if let Err(dropped) = self.sender.send(command) {
            tracing::warn!(command = ?dropped.0, "Command dropped: wind link is down");
        }
    }
}

enum SocketEvent {
    Outbound(Option<Command>),
    Inbound(Option<Result<tungstenite::Message, tungstenite::Error>>),
}

/// Subscription driving the wind socket: sensor snapshots, masthead
/// updates, and outbound commands.
pub fn wind_subscription(config: DeviceConfig) -> Subscription<Message> {
    Subscription::run_with(config, move |config| {
        let url = config.wind_url();
        async_stream::stream! {
            let mut backoff = Backoff::new();
            loop {
                let mut socket = match tokio_tungstenite::connect_async(url.as_str()).await {
                    Ok((socket, _)) => socket,
                    Err(e) => {
                        tracing::warn!(error = %e, url = %url, "Wind socket connect failed");
                        yield Message::WindDisconnected(e.to_string());
                        tokio::time::sleep(backoff.next_delay()).await;
                        continue;
                    }
                };

                tracing::info!(url = %url, "Wind socket open");
                backoff.reset();
                let (sender, mut commands) = mpsc::unbounded_channel();
                yield Message::WindConnected(CommandLink::new(sender));

                loop {
                    let event = tokio::select! {
                        outbound = commands.recv() => SocketEvent::Outbound(outbound),
                        inbound = socket.next() => SocketEvent::Inbound(inbound),
                    };

                    match event {
                        SocketEvent::Outbound(Some(command)) => {
                            let payload = command.encode();
                            tracing::debug!(payload = %payload, "Sending command");
                            if let Err(e) = socket
                                .send(tungstenite::Message::Text(payload.into()))
                                .await
                            {
                                tracing::warn!(error = %e, "Wind socket send failed");
                                break;
                            }
                        }
                        // The application drops its CommandLink only when
                        // the link goes down, so a closed channel here
                        // means the runtime is shutting down.
                        SocketEvent::Outbound(None) => return,
                        SocketEvent::Inbound(Some(Ok(tungstenite::Message::Text(payload)))) => {
                            match decode_frame::<WindEnvelope>(payload.as_str()) {
                                Ok(Inbound::Reload) => {
                                    tracing::info!("Hub requested reload");
                                    yield Message::ReloadRequested;
                                    break;
                                }
                                Ok(Inbound::Frame(envelope)) => match envelope.wind {
                                    Some(WindFrame::Masthead(masthead)) => {
                                        yield Message::MastheadUpdated(masthead);
                                    }
                                    Some(WindFrame::Sensors(sensors)) => {
                                        yield Message::WindSensors(sensors);
                                    }
                                    None => {}
                                },
                                Err(e) => {
                                    tracing::warn!(error = %e, "Dropping undecodable wind frame");
                                }
                            }
                        }
                        SocketEvent::Inbound(Some(Ok(_))) => {}
                        SocketEvent::Inbound(Some(Err(e))) => {
                            tracing::warn!(error = %e, "Wind socket error");
                            break;
                        }
                        SocketEvent::Inbound(None) => {
                            tracing::info!("Wind socket closed");
                            break;
                        }
                    }
                }

                yield Message::WindDisconnected("connection closed".to_string());
                tokio::time::sleep(backoff.next_delay()).await;
            }
        }
    })
}

/// Subscription driving the generic data socket.
pub fn data_subscription(config: DeviceConfig) -> Subscription<Message> {
    Subscription::run_with(config, move |config| {
        let url = config.data_url();
        async_stream::stream! {
            let mut backoff = Backoff::new();
            loop {
                let mut socket = match tokio_tungstenite::connect_async(url.as_str()).await {
                    Ok((socket, _)) => socket,
                    Err(e) => {
                        tracing::warn!(error = %e, url = %url, "Data socket connect failed");
                        yield Message::DataDisconnected(e.to_string());
                        tokio::time::sleep(backoff.next_delay()).await;
                        continue;
                    }
                };

                tracing::info!(url = %url, "Data socket open");
                backoff.reset();
                yield Message::DataConnected;

                while let Some(inbound) = socket.next().await {
                    match inbound {
                        Ok(tungstenite::Message::Text(payload)) => {
                            match decode_frame::<ReadingSnapshot>(payload.as_str()) {
                                Ok(Inbound::Reload) => {
                                    tracing::info!("Hub requested reload");
                                    yield Message::ReloadRequested;
                                    break;
                                }
                                Ok(Inbound::Frame(snapshot)) => {
                                    yield Message::ReadingsReceived(snapshot);
                                }
                                Err(e) => {
                                    tracing::warn!(error = %e, "Dropping undecodable data frame");
                                }
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "Data socket error");
                            break;
                        }
                    }
                }

                tracing::info!("Data socket closed");
                yield Message::DataDisconnected("connection closed".to_string());
                tokio::time::sleep(backoff.next_delay()).await;
            }
        }
    })
}
