// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel for dispatch outcomes.

use tokio::sync::broadcast;

use super::AccessoryEvent;

/// Events buffered per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 64;

/// Fans accessory events out to any number of subscribers.
///
/// Each subscriber gets its own copy of every event published after it
/// subscribed. One that falls more than 64 events behind receives
/// `RecvError::Lagged` and loses the oldest ones; the accessory itself never
/// waits on a subscriber.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::event::{AccessoryEvent, EventBus, SkipReason};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(AccessoryEvent::Skipped {
///     device_id: "02-ABC".to_string(),
///     reason: SkipReason::UnsupportedConnection,
/// });
/// assert_eq!(rx.try_recv().unwrap().device_id(), "02-ABC");
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AccessoryEvent>,
}

impl EventBus {
    /// Creates an event bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AccessoryEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event; dropped if nobody is listening.
    pub fn publish(&self, event: AccessoryEvent) {
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            tracing::trace!(device_id = %event.device_id(), "No event subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SkipReason;

    fn skipped(device_id: &str) -> AccessoryEvent {
        AccessoryEvent::Skipped {
            device_id: device_id.to_string(),
            reason: SkipReason::PushDisabled,
        }
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(skipped("light-1"));

        assert_eq!(rx1.recv().await.unwrap().device_id(), "light-1");
        assert_eq!(rx2.recv().await.unwrap().device_id(), "light-1");
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(skipped("light-1"));

        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn clones_share_the_channel() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.clone().publish(skipped("light-2"));
        assert_eq!(rx.try_recv().unwrap().device_id(), "light-2");
    }

    #[test]
    fn slow_subscriber_lags() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        for _ in 0..=CHANNEL_CAPACITY {
            bus.publish(skipped("light-3"));
        }
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
    }
}
