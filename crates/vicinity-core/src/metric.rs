//! The closed set of distance metrics and their capability flags.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance metric identifier.
///
/// Resolved once into a [`crate::VectorDistance`] descriptor; the kernels
/// themselves live in [`crate::scalar`] and [`crate::simd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Manhattan distance: `Σ|aᵢ − bᵢ|`.
    L1,
    /// Euclidean distance: `√Σ(aᵢ − bᵢ)²`.
    L2,
    /// Euclidean distance over unit-norm inputs, via `√(2 − 2·IP)`.
    NormalizedL2,
    /// Inner product: `Σ aᵢ·bᵢ`.
    InnerProduct,
    /// Cosine of the angle between the vectors: `IP / (‖a‖·‖b‖)`.
    Cosine,
    /// Cosine distance over unit-norm inputs: `1 − IP`.
    NormalizedCosine,
    /// Weighted Jaccard over non-negative vectors: `1 − Σmin / Σmax`.
    MinMaxJaccard,
    /// Jaccard over the raw bit patterns: `1 − |AND| / |OR|`.
    BinaryJaccard,
    /// Number of differing bits between the raw bit patterns.
    Hamming,
    /// Canberra distance: `Σ|aᵢ − bᵢ| / (|aᵢ| + |bᵢ|)`, zero terms skipped.
    Canberra,
    /// Minkowski distance with runtime exponent p: `(Σ|aᵢ − bᵢ|^p)^(1/p)`.
    Lp,
    /// Bray-Curtis dissimilarity: `Σ|aᵢ − bᵢ| / Σ|aᵢ + bᵢ|`.
    BrayCurtis,
    /// Jensen-Shannon divergence between probability vectors.
    JensenShannon,
    /// Chebyshev distance: `max|aᵢ − bᵢ|`.
    Linf,
    /// Cross entropy: `−Σ aᵢ·log(bᵢ)`.
    CrossEntropy,
    /// Kullback-Leibler divergence: `Σ aᵢ·log(aᵢ/bᵢ)`, ε-clamped operands.
    Kld,
    /// Angle between the vectors: `arccos(clamp(cosine, [-1, 1]))`.
    Angle,
    /// Angle variant over unit-norm inputs: `arccos(clamp(1 − IP, [-1, 1]))`.
    NormalizedAngle,
}

impl Metric {
    /// All metric identifiers, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::L1,
        Self::L2,
        Self::NormalizedL2,
        Self::InnerProduct,
        Self::Cosine,
        Self::NormalizedCosine,
        Self::MinMaxJaccard,
        Self::BinaryJaccard,
        Self::Hamming,
        Self::Canberra,
        Self::Lp,
        Self::BrayCurtis,
        Self::JensenShannon,
        Self::Linf,
        Self::CrossEntropy,
        Self::Kld,
        Self::Angle,
        Self::NormalizedAngle,
    ];

    /// Returns true if `norm`/`normalize` are defined for this metric.
    ///
    /// Calling them on a metric where this is false is a contract violation.
    #[must_use]
    pub const fn has_normalize(&self) -> bool {
        matches!(
            self,
            Self::L1
                | Self::L2
                | Self::NormalizedL2
                | Self::Cosine
                | Self::NormalizedCosine
                | Self::Angle
                | Self::NormalizedAngle
        )
    }

    /// Returns true if the kernel assumes unit-norm inputs.
    ///
    /// Callers must pre-normalize with the L2 norm so the cheaper algebraic
    /// identities apply (`normalized L2 = √(2 − 2·IP)`, `normalized cosine =
    /// 1 − IP`).
    #[must_use]
    pub const fn need_normalize(&self) -> bool {
        matches!(
            self,
            Self::NormalizedL2 | Self::NormalizedCosine | Self::NormalizedAngle
        )
    }

    /// Snake-case name, matching the serde representation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::L1 => "l1",
            Self::L2 => "l2",
            Self::NormalizedL2 => "normalized_l2",
            Self::InnerProduct => "inner_product",
            Self::Cosine => "cosine",
            Self::NormalizedCosine => "normalized_cosine",
            Self::MinMaxJaccard => "min_max_jaccard",
            Self::BinaryJaccard => "binary_jaccard",
            Self::Hamming => "hamming",
            Self::Canberra => "canberra",
            Self::Lp => "lp",
            Self::BrayCurtis => "bray_curtis",
            Self::JensenShannon => "jensen_shannon",
            Self::Linf => "linf",
            Self::CrossEntropy => "cross_entropy",
            Self::Kld => "kld",
            Self::Angle => "angle",
            Self::NormalizedAngle => "normalized_angle",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}
