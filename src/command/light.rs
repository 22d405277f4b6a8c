// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light commands and their device-specific identifiers.

use serde::{Deserialize, Serialize};

use crate::command::{CommandBody, CommandType};
use crate::types::BrightnessPreset;

/// A command the light accessory can dispatch.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::command::LightCommand;
/// use switchbot_ir_light::types::{Brightness, BrightnessPreset};
///
/// let cmd = LightCommand::for_brightness(Brightness::new(99).unwrap());
/// assert_eq!(cmd, LightCommand::Preset(BrightnessPreset::Full));
/// assert!(cmd.target_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LightCommand {
    /// Turn the light on.
    TurnOn,
    /// Turn the light off.
    TurnOff,
    /// Select a brightness preset.
    Preset(BrightnessPreset),
}

impl LightCommand {
    /// Returns the preset command for a brightness level.
    #[must_use]
    pub const fn for_brightness(brightness: crate::types::Brightness) -> Self {
        Self::Preset(brightness.preset())
    }

    /// Returns the power intent of this command.
    #[must_use]
    pub const fn target_on(&self) -> bool {
        !matches!(self, Self::TurnOff)
    }
}

/// Names of the learned buttons for the three brightness presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetCommands {
    /// Button for [`BrightnessPreset::NightLight`].
    pub night_light: String,
    /// Button for [`BrightnessPreset::Dim`].
    pub dim: String,
    /// Button for [`BrightnessPreset::Full`].
    pub full: String,
}

impl Default for PresetCommands {
    fn default() -> Self {
        Self {
            night_light: "Night Light".to_string(),
            dim: "Dim".to_string(),
            full: "Full".to_string(),
        }
    }
}

impl PresetCommands {
    /// Returns the button name for a preset.
    #[must_use]
    pub fn name(&self, preset: BrightnessPreset) -> &str {
        match preset {
            BrightnessPreset::NightLight => &self.night_light,
            BrightnessPreset::Dim => &self.dim,
            BrightnessPreset::Full => &self.full,
        }
    }
}

/// Device-specific command identifiers.
///
/// Standard devices use the built-in `turnOn`/`turnOff` commands. Devices
/// configured with `customize` use learned buttons instead, falling back to
/// the built-in names when no custom name is given. Presets are always
/// learned buttons.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::command::{CommandSet, CommandType, LightCommand};
///
/// let commands = CommandSet::customized(Some("Power".into()), None);
/// let on = commands.body(LightCommand::TurnOn);
/// assert_eq!(on.command, "Power");
/// assert_eq!(on.command_type, CommandType::Customize);
///
/// let off = commands.body(LightCommand::TurnOff);
/// assert_eq!(off.command, "turnOff");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    command_type: CommandType,
    on: String,
    off: String,
    presets: PresetCommands,
}

impl CommandSet {
    /// Built-in on command.
    pub const TURN_ON: &'static str = "turnOn";
    /// Built-in off command.
    pub const TURN_OFF: &'static str = "turnOff";

    /// Creates the command set for a device using built-in commands.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            command_type: CommandType::Command,
            on: Self::TURN_ON.to_string(),
            off: Self::TURN_OFF.to_string(),
            presets: PresetCommands::default(),
        }
    }

    /// Creates the command set for a device using learned buttons.
    #[must_use]
    pub fn customized(on: Option<String>, off: Option<String>) -> Self {
        Self {
            command_type: CommandType::Customize,
            on: on.unwrap_or_else(|| Self::TURN_ON.to_string()),
            off: off.unwrap_or_else(|| Self::TURN_OFF.to_string()),
            presets: PresetCommands::default(),
        }
    }

    /// Replaces the preset button names.
    #[must_use]
    pub fn with_presets(mut self, presets: PresetCommands) -> Self {
        self.presets = presets;
        self
    }

    /// Returns the command type used for on/off.
    #[must_use]
    pub fn command_type(&self) -> CommandType {
        self.command_type
    }

    /// Builds the payload for a command.
    #[must_use]
    pub fn body(&self, command: LightCommand) -> CommandBody {
        match command {
            LightCommand::TurnOn => CommandBody::new(&self.on, self.command_type),
            LightCommand::TurnOff => CommandBody::new(&self.off, self.command_type),
            LightCommand::Preset(preset) => {
                CommandBody::new(self.presets.name(preset), CommandType::Customize)
            }
        }
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::standard()
    }
}
