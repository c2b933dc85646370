//! # Feature Assembly
//!
//! Merges the embedding matrix with scaled auxiliary columns into the final
//! feature matrix. Row order is preserved end to end: row i of the output
//! is embedding i followed by record i's auxiliary values, and any
//! misalignment between the inputs is rejected before assembly.

use super::scaler::{FittedMinMax, MinMaxScaler};
use crate::data::Dataset;
use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

/// Errors raised while assembling the feature matrix
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Embedding rows ({embeddings}) do not match auxiliary rows ({auxiliary})")]
    RowMismatch { embeddings: usize, auxiliary: usize },

    #[error("Label count ({labels}) does not match feature rows ({rows})")]
    LabelMismatch { rows: usize, labels: usize },

    #[error("Auxiliary column count ({columns}) does not match name count ({names})")]
    NameMismatch { columns: usize, names: usize },

    #[error("Fitted parameter count ({params}) does not match auxiliary columns ({columns})")]
    ParamMismatch { params: usize, columns: usize },

    #[error("Non-finite auxiliary value at row {row}, column {column:?}")]
    NonFiniteValue { row: usize, column: String },

    #[error("No records to assemble")]
    EmptyInput,
}

/// Assembles embeddings and auxiliary features into a [`Dataset`]
pub struct FeatureAssembler {
    scaler: MinMaxScaler,
}

impl Default for FeatureAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureAssembler {
    /// Create an assembler scaling auxiliary columns to [-1, 1]
    pub fn new() -> Self {
        Self {
            scaler: MinMaxScaler::new(),
        }
    }

    /// Use a custom scaler configuration
    pub fn with_scaler(mut self, scaler: MinMaxScaler) -> Self {
        self.scaler = scaler;
        self
    }

    /// Fit scalers on the given auxiliary columns and assemble
    ///
    /// Returns the dataset together with the fitted per-column parameters
    /// so a later split can reuse them through
    /// [`assemble_with_params`](Self::assemble_with_params).
    pub fn assemble(
        &self,
        embeddings: &Array2<f32>,
        auxiliary: &Array2<f64>,
        aux_names: &[String],
        labels: Option<&Array1<f64>>,
    ) -> Result<(Dataset, Vec<FittedMinMax>), AssemblyError> {
        Self::validate(embeddings, auxiliary, aux_names, labels)?;
        let fitted = self.scaler.fit_columns(auxiliary);
        let dataset = Self::build(embeddings, auxiliary, aux_names, labels, &fitted)?;
        Ok((dataset, fitted))
    }

    /// Assemble using previously fitted scaling parameters
    pub fn assemble_with_params(
        &self,
        embeddings: &Array2<f32>,
        auxiliary: &Array2<f64>,
        aux_names: &[String],
        labels: Option<&Array1<f64>>,
        fitted: &[FittedMinMax],
    ) -> Result<Dataset, AssemblyError> {
        Self::validate(embeddings, auxiliary, aux_names, labels)?;
        if fitted.len() != auxiliary.ncols() {
            return Err(AssemblyError::ParamMismatch {
                params: fitted.len(),
                columns: auxiliary.ncols(),
            });
        }
        Self::build(embeddings, auxiliary, aux_names, labels, fitted)
    }

    fn validate(
        embeddings: &Array2<f32>,
        auxiliary: &Array2<f64>,
        aux_names: &[String],
        labels: Option<&Array1<f64>>,
    ) -> Result<(), AssemblyError> {
        let n = embeddings.nrows();
        if n == 0 {
            return Err(AssemblyError::EmptyInput);
        }
        if auxiliary.nrows() != n {
            return Err(AssemblyError::RowMismatch {
                embeddings: n,
                auxiliary: auxiliary.nrows(),
            });
        }
        if aux_names.len() != auxiliary.ncols() {
            return Err(AssemblyError::NameMismatch {
                columns: auxiliary.ncols(),
                names: aux_names.len(),
            });
        }
        if let Some(y) = labels {
            if y.len() != n {
                return Err(AssemblyError::LabelMismatch {
                    rows: n,
                    labels: y.len(),
                });
            }
        }
        for ((row, col), &value) in auxiliary.indexed_iter() {
            if !value.is_finite() {
                return Err(AssemblyError::NonFiniteValue {
                    row,
                    column: aux_names[col].clone(),
                });
            }
        }
        Ok(())
    }

    fn build(
        embeddings: &Array2<f32>,
        auxiliary: &Array2<f64>,
        aux_names: &[String],
        labels: Option<&Array1<f64>>,
        fitted: &[FittedMinMax],
    ) -> Result<Dataset, AssemblyError> {
        let n = embeddings.nrows();
        let dim = embeddings.ncols();
        let k = auxiliary.ncols();

        let mut x = Array2::zeros((n, dim + k));
        x.slice_mut(ndarray::s![.., ..dim])
            .assign(&embeddings.mapv(f64::from));

        for (col, params) in fitted.iter().enumerate() {
            let scaled = params.transform(&auxiliary.index_axis(Axis(1), col).to_owned());
            x.slice_mut(ndarray::s![.., dim + col]).assign(&scaled);
        }

        let mut feature_names: Vec<String> = (0..dim).map(|i| format!("emb_{i}")).collect();
        feature_names.extend(aux_names.iter().cloned());

        Ok(Dataset::new(
            x,
            labels.cloned(),
            feature_names,
            "label".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn aux_names() -> Vec<String> {
        vec!["tweet_len".to_string(), "punct_len".to_string()]
    }

    #[test]
    fn test_assemble_shape_and_row_alignment() {
        let embeddings = array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let auxiliary = array![[1.0, 0.0], [3.0, 5.0], [5.0, 10.0]];
        let labels = array![0.0, 1.0, 0.0];

        let assembler = FeatureAssembler::new();
        let (dataset, fitted) = assembler
            .assemble(&embeddings, &auxiliary, &aux_names(), Some(&labels))
            .unwrap();

        assert_eq!(dataset.x.shape(), &[3, 4]);
        assert_eq!(fitted.len(), 2);

        // Row 1: embedding followed by scaled aux values ([1,3,5] -> 0.0,
        // [0,5,10] -> 0.0).
        assert_eq!(dataset.x.row(1).to_vec(), vec![3.0, 4.0, 0.0, 0.0]);
        // Row 0 and row 2 hit the range bounds.
        assert_eq!(dataset.x[[0, 2]], -1.0);
        assert_eq!(dataset.x[[2, 2]], 1.0);

        assert_eq!(
            dataset.feature_names,
            vec!["emb_0", "emb_1", "tweet_len", "punct_len"]
        );
        assert_eq!(dataset.y, Some(labels));
    }

    #[test]
    fn test_row_mismatch_is_fatal() {
        let embeddings = array![[1.0f32, 2.0], [3.0, 4.0]];
        let auxiliary = array![[1.0, 0.0]];

        let result = FeatureAssembler::new().assemble(&embeddings, &auxiliary, &aux_names(), None);
        assert!(matches!(result, Err(AssemblyError::RowMismatch { .. })));
    }

    #[test]
    fn test_label_mismatch_is_fatal() {
        let embeddings = array![[1.0f32], [2.0]];
        let auxiliary = array![[1.0], [2.0]];
        let labels = array![0.0];

        let result = FeatureAssembler::new().assemble(
            &embeddings,
            &auxiliary,
            &["tweet_len".to_string()],
            Some(&labels),
        );
        assert!(matches!(result, Err(AssemblyError::LabelMismatch { .. })));
    }

    #[test]
    fn test_non_finite_auxiliary_is_fatal() {
        let embeddings = array![[1.0f32], [2.0]];
        let auxiliary = array![[1.0], [f64::NAN]];

        let result = FeatureAssembler::new().assemble(
            &embeddings,
            &auxiliary,
            &["tweet_len".to_string()],
            None,
        );
        assert!(matches!(
            result,
            Err(AssemblyError::NonFiniteValue { row: 1, .. })
        ));
    }

    #[test]
    fn test_reusing_train_params_on_test_split() {
        let assembler = FeatureAssembler::new();

        let train_emb = array![[0.0f32], [0.0]];
        let train_aux = array![[0.0], [10.0]];
        let (_, fitted) = assembler
            .assemble(&train_emb, &train_aux, &["tweet_len".to_string()], None)
            .unwrap();

        let test_emb = array![[0.0f32]];
        let test_aux = array![[5.0]];
        let dataset = assembler
            .assemble_with_params(
                &test_emb,
                &test_aux,
                &["tweet_len".to_string()],
                None,
                &fitted,
            )
            .unwrap();

        // 5 sits midway in the train-fit [0, 10] range.
        assert_eq!(dataset.x[[0, 1]], 0.0);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let embeddings = Array2::<f32>::zeros((0, 3));
        let auxiliary = Array2::<f64>::zeros((0, 2));

        let result = FeatureAssembler::new().assemble(&embeddings, &auxiliary, &aux_names(), None);
        assert!(matches!(result, Err(AssemblyError::EmptyInput)));
    }
}
