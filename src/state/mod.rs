// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory state management types.
//!
//! An accessory is either a dimmable light ([`LightState`]) or a stateless
//! infrared blaster exposed as two momentary triggers
//! ([`StatelessSwitchState`]). [`AccessoryState`] holds exactly one of the
//! two. [`StateChange`] describes a committed update, and
//! [`AccessoryContext`] is the subset persisted across restarts.
//!
//! # Examples
//!
//! ```
//! use switchbot_ir_light::state::{AccessoryContext, AccessoryState, StateChange};
//!
//! let mut state = AccessoryState::restore(false, None);
//! state.apply(&StateChange::On(true));
//!
//! let context = AccessoryContext::from_state(&state);
//! assert_eq!(context.on, Some(true));
//! ```

mod context;
mod light_state;
mod state_change;

pub use context::AccessoryContext;
pub use light_state::{AccessoryState, LightState, StatelessSwitchState, TriggerState};
pub use state_change::StateChange;
