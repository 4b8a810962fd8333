//! Wrapper module for the generation settings, rooted at [`Settings`]
//!
//! Every numeric range the generator draws from lives here, with defaults matching the tuned
//! values of the tool. A JSON file can override any subset of them; anything left out keeps its
//! default.

use crate::float::Float;
use eyre::{eyre, Context};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// An inclusive-ish `[low, high)` range to draw uniformly from
pub type Range = (Float, Float);

/// The full set of tuning ranges used by the generation stages
#[derive(Debug, Clone)]
pub struct Settings {
    /// Trunk radius, drawn once per branch
    pub trunk_radius: Range,
    /// Sideways offset applied to the trunk's top loop, drawn per axis (X and Z)
    pub bend_offset: Range,
    /// Roll applied to the trunk's top loop, degrees
    pub bend_roll: Range,
    /// Twig length
    pub twig_length: Range,
    /// Offset applied to a twig's tip loop (Y and Z)
    pub twig_deform: Range,
    /// Extra yaw applied to a twig's tip loop, degrees
    pub twig_tip_yaw: Range,
    /// Final squeeze of a twig's non-height axes
    pub twig_squeeze: Range,
    /// Leaf quad height, drawn once per scatter pass
    pub leaf_height: Range,
    /// Horizontal leaf offset as a multiple of the twig radius
    pub leaf_radial: Range,
    /// Vertical leaf offset as a multiple of the twig radius
    pub leaf_lift: Range,
    /// Secondary leaf pitch, degrees
    pub leaf_pitch: Range,
    /// Secondary leaf yaw, degrees
    pub leaf_yaw: Range,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            trunk_radius: (0.6, 0.9),
            bend_offset: (0.0, 6.0),
            bend_roll: (30.0, 90.0),
            twig_length: (4.0, 8.0),
            twig_deform: (0.2, 0.5),
            twig_tip_yaw: (0.0, 75.0),
            twig_squeeze: (0.3, 0.5),
            leaf_height: (1.0, 1.5),
            leaf_radial: (1.25, 1.75),
            leaf_lift: (0.6, 1.0),
            leaf_pitch: (30.0, 60.0),
            leaf_yaw: (60.0, 120.0),
        }
    }
}

/// The set of overrides a JSON settings file may carry
///
/// Each field is optional; a missing field keeps the built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsOverride {
    pub trunk_radius: Option<Range>,
    pub bend_offset: Option<Range>,
    pub bend_roll: Option<Range>,
    pub twig_length: Option<Range>,
    pub twig_deform: Option<Range>,
    pub twig_tip_yaw: Option<Range>,
    pub twig_squeeze: Option<Range>,
    pub leaf_height: Option<Range>,
    pub leaf_radial: Option<Range>,
    pub leaf_lift: Option<Range>,
    pub leaf_pitch: Option<Range>,
    pub leaf_yaw: Option<Range>,
}

impl Settings {
    /// Produces the settings from the JSON overrides at the given path
    pub fn from_file(file: &Path) -> eyre::Result<Self> {
        let file_content = fs::read_to_string(file)
            .wrap_err_with(|| format!("failed to read file at {:?}", file.to_string_lossy()))?;

        let parsed: SettingsOverride =
            serde_json::from_str(&file_content).wrap_err("could not deserialize JSON structure")?;

        let mut settings = Settings::default();
        settings.apply(parsed);
        settings.validate()?;
        Ok(settings)
    }

    /// Replaces every range that the override provides
    pub fn apply(&mut self, overrides: SettingsOverride) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $( if let Some(range) = overrides.$field { self.$field = range; } )*
            };
        }

        take!(
            trunk_radius,
            bend_offset,
            bend_roll,
            twig_length,
            twig_deform,
            twig_tip_yaw,
            twig_squeeze,
            leaf_height,
            leaf_radial,
            leaf_lift,
            leaf_pitch,
            leaf_yaw,
        );
    }

    /// Checks that every range is ordered
    pub fn validate(&self) -> eyre::Result<()> {
        let ranges = [
            ("trunk_radius", self.trunk_radius),
            ("bend_offset", self.bend_offset),
            ("bend_roll", self.bend_roll),
            ("twig_length", self.twig_length),
            ("twig_deform", self.twig_deform),
            ("twig_tip_yaw", self.twig_tip_yaw),
            ("twig_squeeze", self.twig_squeeze),
            ("leaf_height", self.leaf_height),
            ("leaf_radial", self.leaf_radial),
            ("leaf_lift", self.leaf_lift),
            ("leaf_pitch", self.leaf_pitch),
            ("leaf_yaw", self.leaf_yaw),
        ];

        for (name, (low, high)) in ranges {
            if low > high || !low.is_finite() || !high.is_finite() {
                return Err(eyre!("range `{}` is invalid: ({}, {})", name, low, high));
            }
        }

        // a twig needs at least one face band, which requires a length of 2 or more
        if self.twig_length.0 < 2.0 {
            return Err(eyre!(
                "range `twig_length` must start at 2 or above, got {}",
                self.twig_length.0
            ));
        }

        Ok(())
    }
}
