//! Declarative distance configuration.
//!
//! Deserializes from the usual snake_case form:
//!
//! ```json
//! { "metric": "lp", "lp_exponent": 3.0 }
//! ```

use crate::descriptor::{VectorDistance, DEFAULT_LP_EXPONENT};
use crate::error::{Error, Result};
use crate::metric::Metric;
use serde::{Deserialize, Serialize};

/// Serializable description of a distance function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceConfig {
    /// Metric to dispatch to.
    #[serde(default = "default_metric")]
    pub metric: Metric,
    /// Exponent for [`Metric::Lp`]; ignored by every other metric.
    #[serde(default = "default_lp_exponent")]
    pub lp_exponent: f32,
}

fn default_metric() -> Metric {
    Metric::L2
}

fn default_lp_exponent() -> f32 {
    DEFAULT_LP_EXPONENT
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            lp_exponent: default_lp_exponent(),
        }
    }
}

impl DistanceConfig {
    /// Checks that the configuration can produce a usable descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExponent`] if the exponent is not a finite
    /// positive number.
    pub fn validate(&self) -> Result<()> {
        if !self.lp_exponent.is_finite() || self.lp_exponent <= 0.0 {
            return Err(Error::InvalidExponent(self.lp_exponent));
        }
        Ok(())
    }

    /// Validates and resolves the configuration into a [`VectorDistance`].
    ///
    /// # Errors
    ///
    /// Propagates [`Self::validate`] failures.
    pub fn build(&self) -> Result<VectorDistance> {
        self.validate()?;
        Ok(VectorDistance::with_exponent(self.metric, self.lp_exponent))
    }
}
