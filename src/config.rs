//! Controller configuration.
//!
//! Every controller takes its config struct at construction. The structs are
//! plain data with builder setters, and deserialize from TOML so hosts can
//! keep timing in a theme or settings file:
//!
//! ```toml
//! [tooltip]
//! show_delay = 150
//! trigger = "hover"
//!
//! [stepper]
//! min = 0
//! max = 10
//! ```
//!
//! All durations are milliseconds. Missing keys take the defaults below.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigWarning};
use crate::timing::Millis;

// ---------------------------------------------------------------------------
// TooltipConfig
// ---------------------------------------------------------------------------

/// Which activation sources a tooltip trigger listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    #[default]
    HoverAndFocus,
    Hover,
    Focus,
}

/// Configuration for [`VisibilityController`](crate::visibility::VisibilityController).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Delay before a hover/focus activation opens the tooltip.
    pub show_delay: Millis,
    /// Delay before losing every activation source closes the tooltip.
    pub hide_delay: Millis,
    pub trigger: TriggerMode,
    /// Initial visibility when uncontrolled.
    pub default_open: bool,
    /// When set, the owner pins visibility and transitions are only requested.
    pub open: Option<bool>,
    /// Whether hovering the tooltip content keeps it open.
    pub interactive: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show_delay: 100,
            hide_delay: 300,
            trigger: TriggerMode::HoverAndFocus,
            default_open: false,
            open: None,
            interactive: true,
        }
    }
}

impl TooltipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_delay(mut self, ms: Millis) -> Self {
        self.show_delay = ms;
        self
    }

    pub fn with_hide_delay(mut self, ms: Millis) -> Self {
        self.hide_delay = ms;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Pin visibility to an external owner (controlled mode).
    pub fn controlled(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

// ---------------------------------------------------------------------------
// StepperConfig
// ---------------------------------------------------------------------------

/// Configuration for [`StepperController`](crate::stepper::StepperController).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
    /// Magnitude for paging gestures (PageUp/PageDown).
    pub large_step: f64,
    /// Interval between auto-repeat steps.
    pub repeat_rate: Millis,
    /// Hold time before auto-repeat begins.
    pub threshold: Millis,
    /// Initial value.
    pub value: f64,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            step: 1.0,
            large_step: 5.0,
            repeat_rate: 100,
            threshold: 500,
            value: 0.0,
        }
    }
}

impl StepperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_steps(mut self, step: f64, large_step: f64) -> Self {
        self.step = step;
        self.large_step = large_step;
        self
    }

    pub fn with_repeat(mut self, threshold: Millis, repeat_rate: Millis) -> Self {
        self.threshold = threshold;
        self.repeat_rate = repeat_rate;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Report tolerated misconfigurations. Values are never corrected.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                warnings.push(ConfigWarning::MinAboveMax { min, max });
            }
        }
        if self.step > self.large_step {
            warnings.push(ConfigWarning::StepAboveLargeStep {
                step: self.step,
                large_step: self.large_step,
            });
        }
        for (name, value) in [("step", self.step), ("large_step", self.large_step)] {
            if value <= 0.0 {
                warnings.push(ConfigWarning::NonPositiveStep { name, value });
            }
        }
        if self.repeat_rate == 0 {
            warnings.push(ConfigWarning::ZeroRepeatRate);
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// RippleConfig
// ---------------------------------------------------------------------------

/// Configuration for [`RippleController`](crate::ripple::RippleController).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    /// Length of the grow animation.
    pub duration: Millis,
    /// Fraction of `duration` a ripple stays before it may fade.
    pub completed_factor: f64,
    /// Fade length as a fraction of `duration`.
    pub fade_ratio: f64,
    pub disabled: bool,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            duration: 500,
            completed_factor: 0.5,
            fade_ratio: 0.7,
            disabled: false,
        }
    }
}

impl RippleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, ms: Millis) -> Self {
        self.duration = ms;
        self
    }

    pub fn with_completed_factor(mut self, factor: f64) -> Self {
        self.completed_factor = factor;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Minimum time a ripple stays fully visible after it spawns.
    pub fn min_visible(&self) -> Millis {
        (self.completed_factor * self.duration as f64).max(0.0) as Millis
    }

    /// Length of the fade-out.
    pub fn fade_duration(&self) -> Millis {
        (self.fade_ratio * self.duration as f64).max(0.0) as Millis
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        if (0.0..=1.0).contains(&self.completed_factor) {
            Vec::new()
        } else {
            vec![ConfigWarning::CompletedFactorOutOfRange(self.completed_factor)]
        }
    }
}

// ---------------------------------------------------------------------------
// InteractConfig
// ---------------------------------------------------------------------------

/// All controller configuration, as loaded from a settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractConfig {
    pub tooltip: TooltipConfig,
    pub stepper: StepperConfig,
    pub ripple: RippleConfig,
}

impl InteractConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Warnings from every section.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = self.stepper.validate();
        warnings.extend(self.ripple.validate());
        warnings
    }
}

// ===========================================================================
// Tests
// ===========================================================================
