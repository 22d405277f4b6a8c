// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for dispatch outcomes.
//!
//! Each accessory owns an [`EventBus`]. Pollers, tests and bridge logic can
//! subscribe to learn when a command was sent, committed, rejected or
//! skipped.
//!
//! # Examples
//!
//! ```
//! use switchbot_ir_light::event::{AccessoryEvent, EventBus, SkipReason};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(AccessoryEvent::Skipped {
//!     device_id: "02-ABC".to_string(),
//!     reason: SkipReason::PushDisabled,
//! });
//! assert!(rx.try_recv().unwrap().is_outcome());
//! ```

mod accessory_event;
mod event_bus;

pub use accessory_event::{AccessoryEvent, SkipReason};
pub use event_bus::EventBus;
