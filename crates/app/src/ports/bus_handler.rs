//! Bus handler port — what the bus session calls when something happens.

use std::future::Future;

/// Receives bus lifecycle and message events, one at a time, in order.
///
/// The bus adapter never calls two methods concurrently, and it awaits each
/// call before delivering the next event.
pub trait BusHandler: Send + Sync + 'static {
    /// The session (re)connected and subscribed.
    fn on_connected(&self) -> impl Future<Output = ()> + Send;

    /// A message arrived on the subscribe topic.
    fn on_message(&self, payload: &[u8]) -> impl Future<Output = ()> + Send;
}
