// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay configuration.
//!
//! [`OverlayConfig`] bundles the per-layer smoothing factors with the
//! variant style table and the trail style. The stock configuration
//! ([`OverlayConfig::STANDARD`]) reproduces the classic portfolio cursor.
//! Custom factors go through [`LayerFactors::new`], which enforces the
//! range and the lead > ring > trail ordering.

use core::fmt;

use crate::smoothing::{LayerKind, SmoothingFactor};
use crate::variant::{StyleTable, TrailStyle};

/// Reasons a configuration is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A smoothing factor was outside `(0, 1]` or NaN.
    FactorOutOfRange {
        /// The offending layer.
        layer: LayerKind,
        /// The rejected value.
        value: f64,
    },
    /// Factors were not strictly decreasing from lead to trail.
    FactorOrder,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FactorOutOfRange { layer, value } => {
                write!(f, "{layer:?} smoothing factor {value} is not in (0, 1]")
            }
            Self::FactorOrder => {
                f.write_str("smoothing factors must satisfy lead > ring > trail")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Validated smoothing factors for the three layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerFactors {
    lead: SmoothingFactor,
    ring: SmoothingFactor,
    trail: SmoothingFactor,
}

impl LayerFactors {
    /// Stock factors: lead 0.15, ring 0.12, trail 0.08.
    pub const STANDARD: Self = Self {
        lead: SmoothingFactor::LEAD,
        ring: SmoothingFactor::RING,
        trail: SmoothingFactor::TRAIL,
    };

    /// Validates raw factors.
    ///
    /// Each factor must lie in `(0, 1]` and they must strictly decrease from
    /// lead to trail.
    pub fn new(lead: f64, ring: f64, trail: f64) -> Result<Self, ConfigError> {
        let check = |layer, value| {
            SmoothingFactor::new(value).ok_or(ConfigError::FactorOutOfRange { layer, value })
        };
        let lead = check(LayerKind::Lead, lead)?;
        let ring = check(LayerKind::Ring, ring)?;
        let trail = check(LayerKind::Trail, trail)?;
        if lead <= ring || ring <= trail {
            return Err(ConfigError::FactorOrder);
        }
        Ok(Self { lead, ring, trail })
    }

    /// Factor for one layer.
    #[must_use]
    pub const fn get(&self, layer: LayerKind) -> SmoothingFactor {
        match layer {
            LayerKind::Lead => self.lead,
            LayerKind::Ring => self.ring,
            LayerKind::Trail => self.trail,
        }
    }
}

impl Default for LayerFactors {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Everything an [`Overlay`](crate::overlay::Overlay) needs besides input.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct OverlayConfig {
    /// Smoothing factors.
    pub factors: LayerFactors,
    /// Lead and ring styles per variant.
    pub styles: StyleTable,
    /// Trail dot style.
    pub trail: TrailStyle,
}

impl OverlayConfig {
    /// The stock configuration.
    pub const STANDARD: Self = Self {
        factors: LayerFactors::STANDARD,
        styles: StyleTable::STANDARD,
        trail: TrailStyle::STANDARD,
    };

    /// Returns a copy with different smoothing factors.
    #[must_use]
    pub const fn with_factors(mut self, factors: LayerFactors) -> Self {
        self.factors = factors;
        self
    }

    /// Returns a copy with a different style table.
    #[must_use]
    pub const fn with_styles(mut self, styles: StyleTable) -> Self {
        self.styles = styles;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_factors_are_ordered() {
        let f = LayerFactors::STANDARD;
        assert_eq!(LayerFactors::new(0.15, 0.12, 0.08), Ok(f));
        assert!(f.get(LayerKind::Lead) > f.get(LayerKind::Ring));
        assert!(f.get(LayerKind::Ring) > f.get(LayerKind::Trail));
    }

    #[test]
    fn out_of_range_factor_names_the_layer() {
        assert_eq!(
            LayerFactors::new(0.5, 0.2, 0.0),
            Err(ConfigError::FactorOutOfRange {
                layer: LayerKind::Trail,
                value: 0.0
            })
        );
        assert!(matches!(
            LayerFactors::new(1.5, 0.2, 0.1),
            Err(ConfigError::FactorOutOfRange {
                layer: LayerKind::Lead,
                ..
            })
        ));
    }

    #[test]
    fn equal_or_inverted_factors_are_rejected() {
        assert_eq!(
            LayerFactors::new(0.1, 0.1, 0.05),
            Err(ConfigError::FactorOrder)
        );
        assert_eq!(
            LayerFactors::new(0.1, 0.2, 0.3),
            Err(ConfigError::FactorOrder)
        );
    }

    #[test]
    fn error_message_is_readable() {
        use alloc::string::ToString as _;

        let msg = ConfigError::FactorOrder.to_string();
        assert!(msg.contains("lead > ring > trail"), "got {msg}");
    }
}
