// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for infrared light control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time.
//!
//! # Types
//!
//! - [`Brightness`] - Slider level (0-100%)
//! - [`BrightnessPreset`] - The three tiers the infrared light understands
//! - [`Trigger`] - Which momentary trigger of a stateless device
//! - [`TriggerOutput`] - Output state of a trigger (0 or 1)
//! - [`SwitchEvent`] - Event raised by a trigger

mod brightness;
mod preset;
mod trigger;

pub use brightness::Brightness;
pub use preset::BrightnessPreset;
pub use trigger::{SwitchEvent, Trigger, TriggerOutput};
