// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface to the surrounding accessory framework.

use std::fmt;

use crate::error::ProtocolError;
use crate::response::ApiResponse;
use crate::state::AccessoryContext;
use crate::types::{Brightness, SwitchEvent, Trigger, TriggerOutput};

/// Category under which the framework displays the accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A dimmable light.
    Lightbulb,
    /// A pair of momentary triggers.
    ProgrammableSwitch,
}

impl Category {
    /// Returns the category for the configured mode.
    #[must_use]
    pub const fn for_mode(stateless: bool) -> Self {
        if stateless {
            Self::ProgrammableSwitch
        } else {
            Self::Lightbulb
        }
    }
}

/// A UI service owned by the accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// The light switch with its brightness slider.
    Lightbulb,
    /// The momentary "on" trigger.
    OnTrigger,
    /// The momentary "off" trigger.
    OffTrigger,
}

impl ServiceKind {
    /// Returns the service exposing a trigger.
    #[must_use]
    pub const fn for_trigger(trigger: Trigger) -> Self {
        match trigger {
            Trigger::On => Self::OnTrigger,
            Trigger::Off => Self::OffTrigger,
        }
    }

    /// Returns the services of an accessory in the given mode.
    #[must_use]
    pub const fn owned(stateless: bool) -> &'static [Self] {
        if stateless {
            &[Self::OnTrigger, Self::OffTrigger]
        } else {
            &[Self::Lightbulb]
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lightbulb => f.write_str("lightbulb"),
            Self::OnTrigger => f.write_str("on-trigger"),
            Self::OffTrigger => f.write_str("off-trigger"),
        }
    }
}

/// A characteristic value pushed to the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicValue {
    /// On/off of the light.
    On(bool),
    /// Brightness of the light.
    Brightness(Brightness),
    /// Output state of a trigger.
    OutputState(TriggerOutput),
    /// Event raised by a trigger.
    SwitchEvent(SwitchEvent),
}

/// Capabilities the accessory needs from the framework.
///
/// The accessory calls these from its own task; implementations must not
/// block.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::accessory::{AccessoryHost, CharacteristicValue, ServiceKind};
/// use switchbot_ir_light::error::ProtocolError;
/// use switchbot_ir_light::state::AccessoryContext;
///
/// struct LoggingHost;
///
/// impl AccessoryHost for LoggingHost {
///     fn update(&self, service: ServiceKind, value: CharacteristicValue) {
///         println!("{service}: {value:?}");
///     }
///
///     fn mark_failed(&self, service: ServiceKind, error: &ProtocolError) {
///         println!("{service} failed: {error}");
///     }
///
///     fn persist(&self, context: &AccessoryContext) {
///         println!("persist {context:?}");
///     }
/// }
/// ```
pub trait AccessoryHost: Send + Sync + 'static {
    /// Pushes a committed value into the visible characteristics.
    fn update(&self, service: ServiceKind, value: CharacteristicValue);

    /// Marks a service's characteristics as errored after a transport failure.
    fn mark_failed(&self, service: ServiceKind, error: &ProtocolError);

    /// Stores the context used to restore state after a restart.
    fn persist(&self, context: &AccessoryContext);

    /// Receives a response the API did not accept.
    fn status_rejected(&self, _response: &ApiResponse) {}
}
