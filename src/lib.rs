// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SwitchBot` IR light accessory.
//!
//! This library adapts an infrared-controlled light, reachable only through
//! the `SwitchBot` cloud API, to a home-automation accessory framework. The
//! light has no feedback channel: the accessory tracks what it last told the
//! device and only trusts a state once the API has accepted the command.
//!
//! # Supported Features
//!
//! - **Power control**: On/off through built-in or learned IR buttons
//! - **Brightness**: Debounced mapping of 0-100 onto three learned presets
//! - **Stateless mode**: Two momentary triggers instead of a lightbulb
//! - **Failure handling**: Transport failures and API rejections are reported
//!   separately and never change the committed state
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use switchbot_ir_light::accessory::{
//!     AccessoryHost, CharacteristicValue, LightAccessory, ServiceKind,
//! };
//! use switchbot_ir_light::config::{Credentials, DeviceConfig};
//! use switchbot_ir_light::error::ProtocolError;
//! use switchbot_ir_light::state::AccessoryContext;
//!
//! struct Host;
//!
//! impl AccessoryHost for Host {
//!     fn update(&self, service: ServiceKind, value: CharacteristicValue) {
//!         println!("{service}: {value:?}");
//!     }
//!     fn mark_failed(&self, service: ServiceKind, error: &ProtocolError) {
//!         eprintln!("{service}: {error}");
//!     }
//!     fn persist(&self, _context: &AccessoryContext) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Credentials::new("token", "secret")
//!         .into_cloud_config()?
//!         .into_client()?;
//!
//!     let config = DeviceConfig::from_json(
//!         r#"{"deviceId": "02-202301011200-12345678", "configDeviceName": "Desk Lamp"}"#,
//!     )?;
//!     let light = LightAccessory::spawn(config, client, Arc::new(Host), None)?;
//!
//!     light.set_on(true)?;
//!     // Sent one second after the last change.
//!     light.set_brightness(60)?;
//!
//!     light.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod accessory;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use accessory::{AccessoryHost, Category, CharacteristicValue, LightAccessory, ServiceKind};
pub use command::{CommandBody, CommandSet, CommandType, LightCommand, PresetCommands};
pub use config::{ConnectionMode, Credentials, DeviceConfig};
pub use error::{ConfigError, Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{AccessoryEvent, EventBus, SkipReason};
#[cfg(feature = "http")]
pub use protocol::{CloudClient, CloudConfig};
pub use protocol::{ApiResponse, Transport};
pub use response::ApiStatus;
pub use state::{AccessoryContext, AccessoryState, LightState, StateChange};
pub use types::{Brightness, BrightnessPreset, SwitchEvent, Trigger, TriggerOutput};
