//! # k3pi
//!
//! Kinematics for four-body charm decays of the form D0 → K π π π.
//!
//! The crate converts generator-convention four-momenta into analysis
//! conventions, computes the five-variable phase-space parameterization of
//! the decay (two pair masses, two helicity cosines, one decay-plane angle),
//! and provides the tabular-data and histogram plumbing used by analysis
//! scripts: CSV/Parquet/ROOT ingestion into [`polars`] DataFrames,
//! generator-column aliasing, and named-histogram persistence.
#![warn(clippy::perf, clippy::style)]

use thiserror::Error;

/// Unit and ordering conversions between generator and analysis conventions.
pub mod convert;
/// Tabular data ingestion and generator column conventions.
pub mod data;
/// The five-variable phase-space parameterization of a four-body decay.
pub mod phase_space;
/// Daughter identification and flavor/charge tagging from PDG ids.
pub mod tagging;
/// Utility functions, enums, histograms, and vector types.
pub mod utils;

pub use crate::convert::{angle_to_0_2pi, angle_to_pm_pi, at_rest, from_ampgen, to_ampgen};
pub use crate::phase_space::{pair_masses, phsp_point, PhspPoint};
pub use crate::utils::enums::{Flavor, Quadrant, Tag};
pub use crate::utils::variables::{mass, pair_costheta, phsp_columns, plane_angle};
pub use crate::utils::vectors::{Vec3, Vec4};
pub use crate::utils::{histogram, Histogram, HistogramSet};

pub type K3PiResult<T> = Result<T, K3PiError>;

/// The error type used by all `k3pi` methods
#[derive(Error, Debug)]
pub enum K3PiError {
    /// An alias for [`std::io::Error`].
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    /// An alias for [`polars::error::PolarsError`].
    #[error("Polars error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
    /// An alias for [`shellexpand::LookupError`].
    #[error("Failed to expand path: {0}")]
    LookupError(#[from] shellexpand::LookupError<std::env::VarError>),
    /// An error returned by the histogram (de)serializer.
    #[error("Histogram codec error: {0}")]
    CodecError(#[from] bincode::Error),
    /// An error which occurs when the user tries to parse an invalid string of text, typically
    /// into an enum variant.
    #[error("Failed to parse string: \"{name}\" does not correspond to a valid \"{object}\"!")]
    ParseError {
        /// The string which was parsed
        name: String,
        /// The name of the object it failed to parse into
        object: String,
    },
    /// A required column was absent from the input data.
    #[error("No column named \"{name}\" in input data!")]
    MissingColumn {
        /// Name of the column which failed lookup
        name: String,
    },
    /// A named histogram was absent from a histogram file.
    #[error("No histogram named \"{name}\" in file!")]
    HistogramNotFound {
        /// Name of the histogram which failed lookup
        name: String,
    },
    /// The daughter PDG ids (or four-momenta) do not describe a K3π decay.
    #[error("Invalid K3π decay: {0}")]
    InvalidDecay(String),
    /// A custom fallback error for errors too complex or too infrequent to warrant their own error
    /// category.
    #[error("{0}")]
    Custom(String),
}
