//! Dispatcher — turns one inbound bus message into one camera action and at
//! most one state publication.
//!
//! Holds no mutable state: every message is handled independently against the
//! read-only [`CameraRegistry`], so the dispatcher can be shared behind an
//! `Arc` and called from the bus task without locking.

use std::sync::Arc;

use motionbridge_domain::camera::CameraDescriptor;
use motionbridge_domain::command::{Command, CommandError, InboundCommand};
use motionbridge_domain::error::MotionBridgeError;
use motionbridge_domain::message::StatusMessage;
use motionbridge_domain::registry::CameraRegistry;

use crate::ports::{BusHandler, HttpFetcher, StatusPublisher};
use crate::services::gateway::DeviceGateway;

/// What handling one inbound message led to.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The camera state was queried (after actuation, if any) and published.
    Published(StatusMessage),
    /// The state was queried but publishing it failed.
    PublishFailed(StatusMessage),
    /// A pan/tilt endpoint was called; nothing is published for movement.
    Moved { camera: String, cmd: Command },
    /// Nothing was called and nothing was published.
    Discarded(Discard),
}

/// Why a message was dropped without side effects.
#[derive(Debug)]
pub enum Discard {
    /// The payload could not be decoded into a command.
    Malformed(CommandError),
    /// No camera with that name is configured.
    UnknownCamera(String),
    /// The camera has no endpoint for this movement command.
    Unsupported { camera: String, cmd: Command },
}

/// Command dispatch and state reconciliation.
pub struct Dispatcher<H, P> {
    registry: Arc<CameraRegistry>,
    gateway: DeviceGateway<H>,
    publisher: P,
}

impl<H, P> Dispatcher<H, P>
where
    H: HttpFetcher + Send + Sync,
    P: StatusPublisher + Send + Sync,
{
    /// Create a dispatcher over `registry`, reaching cameras through `gateway`
    /// and reporting state through `publisher`.
    pub fn new(registry: Arc<CameraRegistry>, gateway: DeviceGateway<H>, publisher: P) -> Self {
        Self {
            registry,
            gateway,
            publisher,
        }
    }

    /// Decode a raw payload and dispatch it.
    ///
    /// Malformed payloads are logged and discarded.
    pub async fn handle_payload(&self, payload: &[u8]) -> DispatchOutcome {
        tracing::debug!(payload = %String::from_utf8_lossy(payload), "received message");
        match InboundCommand::parse(payload) {
            Ok(command) => self.dispatch(command).await,
            Err(err) => {
                tracing::warn!(
                    %err,
                    payload = %String::from_utf8_lossy(payload),
                    expected = r#"{"cmd": "<command>", "camera": "<name>"}"#,
                    "discarding malformed message"
                );
                DispatchOutcome::Discarded(Discard::Malformed(err))
            }
        }
    }

    /// Resolve the camera and run the command against it.
    #[tracing::instrument(
        skip(self, command),
        fields(camera = %command.camera, cmd = %command.cmd)
    )]
    pub async fn dispatch(&self, command: InboundCommand) -> DispatchOutcome {
        let InboundCommand { cmd, camera } = command;

        let Some(descriptor) = self.registry.find(&camera) else {
            tracing::warn!("no camera with this name, discarding command");
            return DispatchOutcome::Discarded(Discard::UnknownCamera(camera));
        };
        tracing::info!("executing command");

        if cmd.actuates() {
            let Some(url) = descriptor.endpoint(cmd) else {
                tracing::warn!(
                    has_pan_tilt = descriptor.has_pan_tilt(),
                    "camera has no endpoint for this command, ignoring"
                );
                return DispatchOutcome::Discarded(Discard::Unsupported { camera, cmd });
            };
            self.gateway.invoke(url).await;
        }

        if !cmd.republishes_state() {
            return DispatchOutcome::Moved { camera, cmd };
        }

        match self.publish_status(descriptor).await {
            Ok(message) => DispatchOutcome::Published(message),
            Err((err, message)) => {
                tracing::error!(%err, state = %message.state, "failed to publish camera state");
                DispatchOutcome::PublishFailed(message)
            }
        }
    }

    /// Query a camera's state and publish it.
    ///
    /// # Errors
    ///
    /// Returns the publisher's error together with the message that could
    /// not be published.
    pub async fn publish_status(
        &self,
        camera: &CameraDescriptor,
    ) -> Result<StatusMessage, (MotionBridgeError, StatusMessage)> {
        let state = self.gateway.query_state(camera.state_url()).await;
        let message = StatusMessage::new(camera.name(), state);
        match self.publisher.publish_status(&message).await {
            Ok(()) => {
                tracing::info!(camera = camera.name(), %state, "published camera state");
                Ok(message)
            }
            Err(err) => Err((err, message)),
        }
    }

    /// Publish the state of every camera, in registry order.
    ///
    /// Runs after each (re)connection so retained state on the bus reflects
    /// the cameras again. Returns how many publications succeeded.
    pub async fn publish_all(&self) -> usize {
        let mut published = 0;
        for camera in self.registry.iter() {
            match self.publish_status(camera).await {
                Ok(_) => published += 1,
                Err((err, message)) => tracing::error!(
                    %err,
                    camera = %message.camera,
                    state = %message.state,
                    "failed to publish camera state"
                ),
            }
        }
        published
    }
}

impl<H, P> BusHandler for Dispatcher<H, P>
where
    H: HttpFetcher + Send + Sync + 'static,
    P: StatusPublisher + Send + Sync + 'static,
{
    async fn on_connected(&self) {
        let published = self.publish_all().await;
        tracing::info!(
            published,
            cameras = self.registry.len(),
            "initial camera states published"
        );
    }

    async fn on_message(&self, payload: &[u8]) {
        let outcome = self.handle_payload(payload).await;
        tracing::debug!(?outcome, "message handled");
    }
}
