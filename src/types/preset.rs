// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness presets understood by the infrared light.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Brightness;

/// One of the three fixed brightness tiers of an infrared light.
///
/// The remote only has three buttons, so a slider value is reduced to a tier:
///
/// | Brightness | Preset |
/// |------------|--------|
/// | 0-49 | [`NightLight`](Self::NightLight) |
/// | 50-98 | [`Dim`](Self::Dim) |
/// | 99-100 | [`Full`](Self::Full) |
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::types::{Brightness, BrightnessPreset};
///
/// let preset = BrightnessPreset::for_brightness(Brightness::new(75).unwrap());
/// assert_eq!(preset, BrightnessPreset::Dim);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrightnessPreset {
    /// Lowest level.
    NightLight,
    /// Middle level.
    Dim,
    /// Full brightness.
    Full,
}

impl BrightnessPreset {
    /// Lowest brightness that selects [`Dim`](Self::Dim).
    pub const DIM_THRESHOLD: u8 = 50;

    /// Lowest brightness that selects [`Full`](Self::Full).
    pub const FULL_THRESHOLD: u8 = 99;

    /// Maps a brightness value to its preset.
    #[must_use]
    pub const fn for_brightness(brightness: Brightness) -> Self {
        let value = brightness.value();
        if value < Self::DIM_THRESHOLD {
            Self::NightLight
        } else if value < Self::FULL_THRESHOLD {
            Self::Dim
        } else {
            Self::Full
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NightLight => "night-light",
            Self::Dim => "dim",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for BrightnessPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
