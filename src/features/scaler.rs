//! # Min-Max Scaling
//!
//! Linear rescaling of auxiliary feature columns to a fixed target range.
//! Fitting returns an explicit, immutable [`FittedMinMax`] artifact that is
//! passed to every transform call, so there is no hidden state shared
//! between splits; the artifact serializes, which lets a later split reuse
//! parameters fitted on an earlier one.

use anyhow::{Context, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Columns whose observed range is below this are treated as constant.
const RANGE_EPSILON: f64 = 1e-10;

/// Min-max scaler configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Target output range
    pub feature_range: (f64, f64),
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Create a scaler targeting [-1, 1]
    pub fn new() -> Self {
        Self {
            feature_range: (-1.0, 1.0),
        }
    }

    /// Set a custom target range
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.feature_range = (min, max);
        self
    }

    /// Fit scaling parameters on one column
    pub fn fit(&self, column: &Array1<f64>) -> FittedMinMax {
        let data_min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        FittedMinMax {
            data_min,
            data_max,
            feature_range: self.feature_range,
        }
    }

    /// Fit one artifact per column of a matrix
    pub fn fit_columns(&self, data: &Array2<f64>) -> Vec<FittedMinMax> {
        data.axis_iter(Axis(1))
            .map(|col| self.fit(&col.to_owned()))
            .collect()
    }

    /// Fit on a column and transform it in one step
    pub fn fit_transform(&self, column: &Array1<f64>) -> (Array1<f64>, FittedMinMax) {
        let fitted = self.fit(column);
        (fitted.transform(column), fitted)
    }
}

/// Fitted min-max parameters for one column
///
/// Immutable once produced. The observed minimum maps to the lower bound of
/// the target range and the observed maximum to the upper bound; a column
/// with no observed spread maps entirely to the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedMinMax {
    /// Smallest value observed during fitting
    pub data_min: f64,
    /// Largest value observed during fitting
    pub data_max: f64,
    /// Target output range
    pub feature_range: (f64, f64),
}

impl FittedMinMax {
    /// Scale a single value
    pub fn transform_value(&self, value: f64) -> f64 {
        let (out_min, out_max) = self.feature_range;
        let range = self.data_max - self.data_min;
        if !range.is_finite() || range.abs() < RANGE_EPSILON {
            return out_min;
        }
        (value - self.data_min) / range * (out_max - out_min) + out_min
    }

    /// Scale a whole column
    pub fn transform(&self, column: &Array1<f64>) -> Array1<f64> {
        column.mapv(|v| self.transform_value(v))
    }
}

/// Save fitted column parameters as JSON
pub fn save_params<P: AsRef<Path>>(params: &[FittedMinMax], path: P) -> Result<()> {
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;
    serde_json::to_writer_pretty(file, params)?;
    Ok(())
}

/// Load fitted column parameters from JSON
pub fn load_params<P: AsRef<Path>>(path: P) -> Result<Vec<FittedMinMax>> {
    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;
    let params: Vec<FittedMinMax> = serde_json::from_reader(file)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_reference_column() {
        let scaler = MinMaxScaler::new();
        let (scaled, _) = scaler.fit_transform(&array![1.0, 3.0, 5.0]);
        assert_eq!(scaled, array![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_extremes_map_to_bounds() {
        let scaler = MinMaxScaler::new();
        let column = array![10.0, 2.0, 7.0, 42.0, 5.0];
        let fitted = scaler.fit(&column);
        let scaled = fitted.transform(&column);

        assert_eq!(scaled[3], 1.0);
        assert_eq!(scaled[1], -1.0);
        assert!(scaled.iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_constant_column_maps_to_constant() {
        let scaler = MinMaxScaler::new();
        let column = array![4.0, 4.0, 4.0];
        let (scaled, _) = scaler.fit_transform(&column);
        assert!(scaled.iter().all(|&v| v == scaled[0]));
    }

    #[test]
    fn test_custom_range() {
        let scaler = MinMaxScaler::new().with_range(0.0, 1.0);
        let (scaled, _) = scaler.fit_transform(&array![0.0, 50.0, 100.0]);
        assert_eq!(scaled, array![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_fitted_params_apply_to_new_data() {
        let scaler = MinMaxScaler::new();
        let fitted = scaler.fit(&array![0.0, 10.0]);

        // Values outside the fitted range extrapolate linearly.
        assert_eq!(fitted.transform_value(5.0), 0.0);
        assert_eq!(fitted.transform_value(15.0), 2.0);
    }

    #[test]
    fn test_fit_columns_is_independent_per_column() {
        let scaler = MinMaxScaler::new();
        let data = array![[1.0, 100.0], [3.0, 300.0], [5.0, 200.0]];
        let fitted = scaler.fit_columns(&data);

        assert_eq!(fitted.len(), 2);
        assert_eq!(fitted[0].data_min, 1.0);
        assert_eq!(fitted[0].data_max, 5.0);
        assert_eq!(fitted[1].data_min, 100.0);
        assert_eq!(fitted[1].data_max, 300.0);
    }

    #[test]
    fn test_params_round_trip() {
        let scaler = MinMaxScaler::new();
        let fitted = vec![
            scaler.fit(&array![1.0, 9.0]),
            scaler.fit(&array![0.0, 0.5]),
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        save_params(&fitted, &path).unwrap();

        let loaded = load_params(&path).unwrap();
        assert_eq!(loaded, fitted);
    }
}
