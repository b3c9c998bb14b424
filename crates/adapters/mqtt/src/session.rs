//! Bus session — owns the broker connection and its lifecycle.
//!
//! Two tasks run per session:
//!
//! 1. the **event loop** polls rumqttc, tracks [`SessionState`] and forwards
//!    connection and message events, in order, over an unbounded channel;
//! 2. the **dispatch loop** announces availability and subscribes on every
//!    connection, then hands events to the [`BusHandler`] one at a time,
//!    awaiting each before taking the next.
//!
//! Splitting them keeps the event loop polling (keep-alives, acks, outgoing
//! publishes) while a handler is blocked on a slow camera.

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, LastWill, MqttOptions, Outgoing, Packet, QoS};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use motionbridge_app::ports::BusHandler;
use motionbridge_domain::message::AvailabilityMessage;

use crate::config::MqttConfig;
use crate::error::MqttError;
use crate::publisher::MqttStatusPublisher;

/// How long [`BusSession::shutdown`] waits for the DISCONNECT to go out.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Connection state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

/// What the event loop forwards to the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BusEvent {
    Connected,
    Message(Vec<u8>),
}

/// How the event loop reacts to one rumqttc event.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    ConnAck,
    Message(Vec<u8>),
    Disconnected,
    Ignore,
}

/// A running MQTT session.
pub struct BusSession {
    client: AsyncClient,
    state: watch::Receiver<SessionState>,
    event_loop: JoinHandle<()>,
    dispatch_loop: JoinHandle<()>,
}

impl BusSession {
    /// Connect to the broker and start delivering events to a handler.
    ///
    /// `make_handler` receives the publisher bound to this session's client
    /// and returns the handler that will process bus events. The last will
    /// (`{"main":"UNAVAILABLE"}`) is registered before the first connection
    /// attempt.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Config`] if the configuration is invalid.
    pub fn connect<H, F>(config: &MqttConfig, make_handler: F) -> Result<Self, MqttError>
    where
        H: BusHandler,
        F: FnOnce(MqttStatusPublisher) -> Arc<H>,
    {
        config.validate().map_err(MqttError::Config)?;

        let (client, eventloop) = AsyncClient::new(mqtt_options(config), config.request_capacity);
        let handler = make_handler(MqttStatusPublisher::new(
            client.clone(),
            config.publish_topic.clone(),
        ));

        let (state_tx, state_rx) = watch::channel(SessionState::Connecting);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            client_id = %config.client_id,
            "connecting to MQTT broker"
        );

        let event_loop = tokio::spawn(run_event_loop(
            eventloop,
            config.clone(),
            events_tx,
            state_tx,
        ));
        let dispatch_loop = tokio::spawn(run_dispatch_loop(
            handler,
            client.clone(),
            config.clone(),
            events_rx,
        ));

        Ok(Self {
            client,
            state: state_rx,
            event_loop,
            dispatch_loop,
        })
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Watch connection state changes.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Orderly disconnect.
    ///
    /// Sends DISCONNECT so the broker discards the last will, waits briefly
    /// for the event loop to flush it, then stops both tasks. Commands still
    /// queued for the handler are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Task`] if the event loop task panicked.
    pub async fn shutdown(mut self) -> Result<(), MqttError> {
        tracing::info!("disconnecting from MQTT broker");
        if let Err(err) = self.client.try_disconnect() {
            tracing::warn!(%err, "failed to queue MQTT disconnect");
        }

        let result = match tokio::time::timeout(SHUTDOWN_GRACE, &mut self.event_loop).await {
            Ok(joined) => joined.map_err(MqttError::from),
            Err(_) => {
                tracing::warn!("MQTT event loop did not stop in time, aborting");
                self.event_loop.abort();
                Ok(())
            }
        };
        self.dispatch_loop.abort();
        tracing::info!("MQTT session closed");
        result
    }
}

fn mqtt_options(config: &MqttConfig) -> MqttOptions {
    let mut options = MqttOptions::new(
        config.client_id.clone(),
        config.broker_host.clone(),
        config.broker_port,
    );
    options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));
    options.set_last_will(LastWill::new(
        config.publish_topic.clone(),
        AvailabilityMessage::unavailable().to_payload(),
        QoS::AtLeastOnce,
        true,
    ));
    options
}

fn route(event: &Event, subscribe_filter: &str) -> Route {
    match event {
        Event::Incoming(Packet::ConnAck(_)) => Route::ConnAck,
        Event::Incoming(Packet::Publish(publish)) => {
            let topic = String::from_utf8_lossy(AsRef::<[u8]>::as_ref(&publish.topic));
            if rumqttc::matches(&topic, subscribe_filter) {
                Route::Message(publish.payload.to_vec())
            } else {
                tracing::debug!(%topic, "ignoring message outside the subscribe topic");
                Route::Ignore
            }
        }
        Event::Outgoing(Outgoing::Disconnect) => Route::Disconnected,
        _ => Route::Ignore,
    }
}

/// Announce availability and (re)subscribe after a connection.
///
/// Runs on the dispatch task: a full request queue delays the announcement
/// until the event loop drains it, and the handler's on-connect work only
/// starts once both requests are queued.
async fn announce(client: &AsyncClient, config: &MqttConfig) -> Result<(), MqttError> {
    client
        .publish(
            config.publish_topic.clone(),
            QoS::AtLeastOnce,
            true,
            AvailabilityMessage::available().to_payload(),
        )
        .await?;
    client
        .subscribe(config.subscribe_topic.clone(), QoS::AtMostOnce)
        .await?;
    tracing::info!(topic = %config.subscribe_topic, "subscribed");
    Ok(())
}

async fn run_event_loop(
    mut eventloop: EventLoop,
    config: MqttConfig,
    events: mpsc::UnboundedSender<BusEvent>,
    state: watch::Sender<SessionState>,
) {
    let reconnect_delay = Duration::from_secs(u64::from(config.reconnect_delay_secs));
    loop {
        match eventloop.poll().await {
            Ok(event) => match route(&event, &config.subscribe_topic) {
                Route::ConnAck => {
                    tracing::info!("connected to MQTT broker");
                    state.send_replace(SessionState::Connected);
                    if events.send(BusEvent::Connected).is_err() {
                        break;
                    }
                }
                Route::Message(payload) => {
                    if events.send(BusEvent::Message(payload)).is_err() {
                        break;
                    }
                }
                Route::Disconnected => {
                    state.send_replace(SessionState::Disconnected);
                    break;
                }
                Route::Ignore => {}
            },
            Err(err) => {
                state.send_replace(SessionState::Disconnected);
                tracing::warn!(
                    %err,
                    retry_in_secs = config.reconnect_delay_secs,
                    "MQTT connection error"
                );
                tokio::time::sleep(reconnect_delay).await;
                state.send_replace(SessionState::Connecting);
            }
        }
    }
    tracing::debug!("MQTT event loop stopped");
}

async fn run_dispatch_loop<H: BusHandler>(
    handler: Arc<H>,
    client: AsyncClient,
    config: MqttConfig,
    mut events: mpsc::UnboundedReceiver<BusEvent>,
) {
    while let Some(event) = events.recv().await {
        if event == BusEvent::Connected {
            if let Err(err) = announce(&client, &config).await {
                tracing::error!(%err, "failed to announce availability, stopping dispatch");
                break;
            }
        }
        let handler = Arc::clone(&handler);
        // A panic inside the handler is caught by the task boundary.
        let task = tokio::spawn(async move {
            match event {
                BusEvent::Connected => handler.on_connected().await,
                BusEvent::Message(payload) => handler.on_message(&payload).await,
            }
        });
        if let Err(err) = task.await {
            tracing::error!(%err, "bus event handler failed, continuing");
        }
    }
}
