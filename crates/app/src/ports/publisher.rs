//! Status publisher port — outbound camera state onto the bus.

use std::future::Future;

use motionbridge_domain::error::MotionBridgeError;
use motionbridge_domain::message::StatusMessage;

/// Publishes camera state to the configured publish topic.
///
/// Implementations publish retained, with the highest delivery guarantee the
/// bus offers.
pub trait StatusPublisher {
    /// Publish one state message.
    fn publish_status(
        &self,
        message: &StatusMessage,
    ) -> impl Future<Output = Result<(), MotionBridgeError>> + Send;
}

impl<T: StatusPublisher + Send + Sync> StatusPublisher for std::sync::Arc<T> {
    fn publish_status(
        &self,
        message: &StatusMessage,
    ) -> impl Future<Output = Result<(), MotionBridgeError>> + Send {
        (**self).publish_status(message)
    }
}
