//! Categorical expansion and derived label columns

use crate::error::{DatasetError, DatasetResult};
use super::labels::map_label;
use super::layout::{CATEGORICAL_COLUMNS, LABEL_5CLASS_COLUMN, LABEL_COLUMN};
use super::table::{Column, ColumnData, Table};

/// Append `label_5class`, derived from `label` alone
pub fn add_5class_column(table: &mut Table) -> DatasetResult<()> {
    let labels = table.categorical(LABEL_COLUMN).ok_or_else(|| {
        DatasetError::Schema(format!("table has no categorical '{}' column", LABEL_COLUMN))
    })?;

    let classes = labels
        .iter()
        .map(|label| map_label(label).as_str().to_string())
        .collect();

    table.push_column(Column::new(LABEL_5CLASS_COLUMN, ColumnData::Categorical(classes)))
}

/// Replace each categorical feature column with one indicator column per
/// observed value.
///
/// Remaining columns keep their order; indicator columns are appended per
/// source column (protocol_type, service, flag), values sorted.
pub fn one_hot(mut table: Table) -> DatasetResult<Table> {
    let mut expanded = Vec::new();

    for name in CATEGORICAL_COLUMNS {
        let column = table.drop_column(name).ok_or_else(|| {
            DatasetError::Schema(format!("cannot one-hot encode missing column '{}'", name))
        })?;
        let values = match column.data {
            ColumnData::Categorical(values) => values,
            other => {
                return Err(DatasetError::Schema(format!(
                    "cannot one-hot encode {} column '{}'",
                    other.kind_name(),
                    name
                )))
            }
        };
        expanded.extend(indicator_columns(name, &values));
    }

    for column in expanded {
        table.push_column(column)?;
    }
    Ok(table)
}

fn indicator_columns(name: &str, values: &[String]) -> Vec<Column> {
    let mut categories: Vec<&str> = values.iter().map(String::as_str).collect();
    categories.sort_unstable();
    categories.dedup();

    categories
        .into_iter()
        .map(|category| {
            let flags = values.iter().map(|v| v == category).collect();
            Column::new(format!("{}_{}", name, category), ColumnData::Indicator(flags))
        })
        .collect()
}
