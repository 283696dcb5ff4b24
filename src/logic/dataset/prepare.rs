//! Training matrices from loaded tables
//!
//! Features are every numeric / indicator column except the label columns;
//! targets come from `label_5class`.

use std::collections::BTreeSet;

use ndarray::Array2;

use crate::error::{DatasetError, DatasetResult};
use super::layout::{LABEL_5CLASS_COLUMN, LABEL_COLUMN};
use super::table::{ColumnData, Table};

/// Row-major feature matrix of all columns not named in `exclude`
pub fn feature_matrix(table: &Table, exclude: &[&str]) -> DatasetResult<Array2<f64>> {
    let columns: Vec<_> = table
        .columns()
        .iter()
        .filter(|c| !exclude.contains(&c.name.as_str()))
        .collect();

    if let Some(c) = columns
        .iter()
        .find(|c| matches!(c.data, ColumnData::Categorical(_)))
    {
        return Err(DatasetError::Schema(format!(
            "column '{}' is categorical; load with one-hot encoding first",
            c.name
        )));
    }

    let rows = table.n_rows();
    Ok(Array2::from_shape_fn((rows, columns.len()), |(r, c)| {
        columns[c].data.value(r).unwrap_or(0.0)
    }))
}

/// Maps class names to dense indices (sorted class order)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<S: AsRef<str>>(values: &[S]) -> Self {
        let classes: BTreeSet<&str> = values.iter().map(|v| v.as_ref()).collect();
        Self {
            classes: classes.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform<S: AsRef<str>>(&self, values: &[S]) -> DatasetResult<Vec<usize>> {
        values
            .iter()
            .map(|v| {
                let v = v.as_ref();
                self.classes
                    .binary_search_by(|c| c.as_str().cmp(v))
                    .map_err(|_| DatasetError::Schema(format!("unseen label '{}'", v)))
            })
            .collect()
    }

    /// One identity row per index
    pub fn one_hot(&self, indices: &[usize]) -> Array2<f64> {
        let mut out = Array2::zeros((indices.len(), self.classes.len()));
        for (row, &idx) in indices.iter().enumerate() {
            out[[row, idx]] = 1.0;
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct Prepared {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Vec<usize>,
    pub y_test: Vec<usize>,
    pub y_train_one_hot: Array2<f64>,
    pub y_test_one_hot: Array2<f64>,
    pub encoder: LabelEncoder,
    pub feature_names: Vec<String>,
}

/// Features/targets for a one-hot encoded, 5-class mapped train/test pair.
/// The label encoder is fitted on the classes of both splits.
pub fn prepare(train: &Table, test: &Table) -> DatasetResult<Prepared> {
    if train.column_names() != test.column_names() {
        return Err(DatasetError::Schema(
            "train and test tables have different columns".to_string(),
        ));
    }

    let targets = |t: &Table| -> DatasetResult<Vec<String>> {
        t.categorical(LABEL_5CLASS_COLUMN)
            .map(|v| v.to_vec())
            .ok_or_else(|| {
                DatasetError::Schema(format!(
                    "missing '{}' column; load with 5-class mapping",
                    LABEL_5CLASS_COLUMN
                ))
            })
    };
    let train_labels = targets(train)?;
    let test_labels = targets(test)?;

    let exclude = [LABEL_COLUMN, LABEL_5CLASS_COLUMN];
    let x_train = feature_matrix(train, &exclude)?;
    let x_test = feature_matrix(test, &exclude)?;

    // Classes present only in test (e.g. Unknown) still get an index
    let all_labels: Vec<&str> = train_labels
        .iter()
        .chain(&test_labels)
        .map(String::as_str)
        .collect();
    let encoder = LabelEncoder::fit(&all_labels);
    let y_train = encoder.transform(&train_labels)?;
    let y_test = encoder.transform(&test_labels)?;

    let feature_names = train
        .column_names()
        .into_iter()
        .filter(|n| !exclude.contains(n))
        .map(str::to_string)
        .collect();

    log::info!(
        "Prepared X_train {:?}, X_test {:?}, {} classes",
        x_train.dim(),
        x_test.dim(),
        encoder.classes().len()
    );

    Ok(Prepared {
        y_train_one_hot: encoder.one_hot(&y_train),
        y_test_one_hot: encoder.one_hot(&y_test),
        x_train,
        x_test,
        y_train,
        y_test,
        encoder,
        feature_names,
    })
}
