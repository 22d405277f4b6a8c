// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud API command definitions.
//!
//! Every command sent to the device-control API has the same shape:
//!
//! ```json
//! {"command": "turnOn", "parameter": "default", "commandType": "command"}
//! ```
//!
//! - `command` is the command identifier (`turnOn`, `turnOff`, or the name of
//!   a learned button)
//! - `parameter` is always `"default"` for infrared lights
//! - `commandType` is `command` for built-in commands and `customize` for
//!   buttons learned in the vendor app
//!
//! # Examples
//!
//! ```
//! use switchbot_ir_light::command::{CommandSet, LightCommand};
//!
//! let commands = CommandSet::standard();
//! let body = commands.body(LightCommand::TurnOn);
//! assert_eq!(
//!     body.to_json().unwrap(),
//!     r#"{"command":"turnOn","parameter":"default","commandType":"command"}"#
//! );
//! ```

mod light;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValueError};

pub use light::{CommandSet, LightCommand, PresetCommands};

/// The parameter every infrared light command carries.
pub const DEFAULT_PARAMETER: &str = "default";

/// Kind of command understood by the cloud API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// A built-in command such as `turnOn`.
    #[default]
    Command,
    /// A button learned in the vendor app.
    Customize,
}

impl CommandType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Customize => "customize",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "command" => Ok(Self::Command),
            "customize" => Ok(Self::Customize),
            other => Err(ValueError::InvalidCommandType(other.to_string())),
        }
    }
}

/// Serialized payload of a single command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandBody {
    /// Command identifier.
    pub command: String,
    /// Command parameter.
    pub parameter: String,
    /// Command kind.
    pub command_type: CommandType,
}

impl CommandBody {
    /// Creates a body with the default parameter.
    #[must_use]
    pub fn new(command: impl Into<String>, command_type: CommandType) -> Self {
        Self {
            command: command.into(),
            parameter: DEFAULT_PARAMETER.to_string(),
            command_type,
        }
    }

    /// Serializes the body to the JSON string sent to the API.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ParseError> {
        serde_json::to_string(self).map_err(Into::into)
    }
}

impl fmt::Display for CommandBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.command, self.command_type)
    }
}
