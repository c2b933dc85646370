//! # Features Module
//!
//! Auxiliary feature extraction, min-max scaling and assembly of the final
//! feature matrix.

mod assembler;
mod auxiliary;
mod scaler;

pub use assembler::{AssemblyError, FeatureAssembler};
pub use auxiliary::{AuxiliaryFeatures, AUX_FEATURE_NAMES};
pub use scaler::{load_params, save_params, FittedMinMax, MinMaxScaler};
