// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The light accessory and its interface to the accessory framework.
//!
//! A [`LightAccessory`] is driven by the framework through its setters and
//! reports back through an [`AccessoryHost`]:
//!
//! - committed values are pushed with [`AccessoryHost::update`]
//! - transport failures mark services errored with [`AccessoryHost::mark_failed`]
//! - the restorable context is stored with [`AccessoryHost::persist`]
//!
//! Every accessory runs one task that handles its commands strictly in
//! order, so a slow response can never overwrite the result of a later
//! command.

mod host;
mod light;
mod worker;

pub use host::{AccessoryHost, Category, CharacteristicValue, ServiceKind};
pub use light::LightAccessory;
