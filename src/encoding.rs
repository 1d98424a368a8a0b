//! Indicator encoding of the categorical columns.
//!
//! The encoding dictionary is built once from the training table and then
//! reused verbatim for every inference row, so the encoded column order is
//! frozen for the lifetime of the model.

use crate::dataset::{CATEGORICAL_COLUMNS, RemedyRecord, UserInput};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use std::collections::{BTreeMap, BTreeSet};

fn feature_name(column: &str, value: &str) -> String {
    format!("{column}_{value}")
}

/// A categorical value that was not observed when the schema was fitted.
///
/// Such a value contributes an all-zero indicator block for its column, so
/// the prediction degrades rather than fails; callers decide how loudly to
/// report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnseenValue {
    pub column: &'static str,
    pub value: String,
}

/// The frozen indicator-column schema of a trained model.
///
/// One column per observed value per categorical column. Blocks follow the
/// fixed column order `Condition, Age_Group, Dietary_Preferences`; values
/// within a block are sorted.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl FeatureSchema {
    /// Observes the categorical values of `records` and freezes the schema.
    pub fn fit(records: &[RemedyRecord]) -> Self {
        let mut observed: BTreeMap<&'static str, BTreeSet<&str>> = BTreeMap::new();
        for record in records {
            for (column, value) in record.categoricals() {
                observed.entry(column).or_default().insert(value);
            }
        }

        let mut columns = Vec::new();
        let mut index = BTreeMap::new();
        for column in CATEGORICAL_COLUMNS {
            if let Some(values) = observed.get(column) {
                for value in values {
                    let name = feature_name(column, value);
                    index.insert(name.clone(), columns.len());
                    columns.push(name);
                }
            }
        }

        FeatureSchema { columns, index }
    }

    /// Number of indicator columns.
    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    /// The ordered encoded column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Encodes the training table into an indicator matrix, one row per record.
    pub fn encode_matrix(&self, records: &[RemedyRecord]) -> Array2<f64> {
        let mut matrix = Array2::zeros((records.len(), self.columns.len()));
        for (row, record) in records.iter().enumerate() {
            for (column, value) in record.categoricals() {
                if let Some(&i) = self.index.get(&feature_name(column, value)) {
                    matrix[[row, i]] = 1.0;
                }
            }
        }
        matrix
    }

    /// Encodes a single inference row aligned to the training schema.
    ///
    /// Indicator columns absent from this row stay zero; values with no
    /// training column at all are returned alongside the encoded row.
    pub fn encode_row(&self, input: &UserInput) -> (Array1<f64>, Vec<UnseenValue>) {
        let mut row = Array1::zeros(self.columns.len());
        let mut unseen = Vec::new();
        for (column, value) in input.categoricals() {
            match self.index.get(&feature_name(column, value)) {
                Some(&i) => row[i] = 1.0,
                None => unseen.push(UnseenValue { column, value: value.to_string() }),
            }
        }
        (row, unseen)
    }
}

/// Sorted remedy-name vocabulary mapping labels to contiguous class indices.
#[derive(Debug, Clone)]
pub struct LabelVocab {
    names: Vec<String>,
}

impl LabelVocab {
    pub fn fit(records: &[RemedyRecord]) -> Self {
        let unique: BTreeSet<&str> = records.iter().map(|r| r.remedy_name.as_str()).collect();
        LabelVocab { names: unique.into_iter().map(str::to_string).collect() }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Class index of a remedy name, if it was observed at fit time.
    pub fn class_of(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }

    /// Remedy name of a class index.
    pub fn name_of(&self, class: usize) -> Option<&str> {
        self.names.get(class).map(String::as_str)
    }

    /// Encodes the label column of the training table as class indices.
    pub fn encode(&self, records: &[RemedyRecord]) -> Result<Array1<usize>> {
        let mut labels = Vec::with_capacity(records.len());
        for record in records {
            let class = self
                .class_of(&record.remedy_name)
                .ok_or_else(|| Error::UnknownLabel(record.remedy_name.clone()))?;
            labels.push(class);
        }
        Ok(Array1::from_vec(labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, condition: &str, age: &str, diet: &str) -> RemedyRecord {
        RemedyRecord {
            remedy_name: name.to_string(),
            condition: condition.to_string(),
            age_group: age.to_string(),
            dietary_preferences: diet.to_string(),
            ingredients: String::new(),
            recipe: String::new(),
            dosage: String::new(),
            cautions: String::new(),
            contraindications: String::new(),
        }
    }

    fn sample() -> Vec<RemedyRecord> {
        vec![
            record("Ginger Tea", "Nausea", "Adults", "Vegan"),
            record("Chamomile Tea", "Insomnia", "Children", "None"),
            record("Yarrow Tea", "Fever", "Adults", "Vegan"),
        ]
    }

    #[test]
    fn schema_orders_blocks_by_column_then_value() {
        let schema = FeatureSchema::fit(&sample());
        assert_eq!(
            schema.columns(),
            &[
                "Condition_Fever",
                "Condition_Insomnia",
                "Condition_Nausea",
                "Age_Group_Adults",
                "Age_Group_Children",
                "Dietary_Preferences_None",
                "Dietary_Preferences_Vegan",
            ]
        );
        assert_eq!(schema.n_features(), 7);
    }

    #[test]
    fn matrix_has_one_indicator_per_categorical_column() {
        let records = sample();
        let schema = FeatureSchema::fit(&records);
        let matrix = schema.encode_matrix(&records);
        assert_eq!(matrix.shape(), &[3, 7]);
        for row in matrix.rows() {
            assert_eq!(row.sum(), 3.0);
        }
    }

    #[test]
    fn row_round_trips_through_the_schema() {
        let records = sample();
        let schema = FeatureSchema::fit(&records);
        let matrix = schema.encode_matrix(&records);

        for (i, record) in records.iter().enumerate() {
            let input =
                UserInput::new(&record.condition, &record.age_group, &record.dietary_preferences);
            let (row, unseen) = schema.encode_row(&input);
            assert!(unseen.is_empty());
            assert_eq!(row.len(), schema.n_features());
            assert_eq!(row, matrix.row(i).to_owned());
        }
    }

    #[test]
    fn unseen_value_is_reported_and_encodes_to_zeros() {
        let records = sample();
        let schema = FeatureSchema::fit(&records);
        let (row, unseen) = schema.encode_row(&UserInput::new("Migraine", "Adults", "Vegan"));

        assert_eq!(
            unseen,
            vec![UnseenValue { column: "Condition", value: "Migraine".to_string() }]
        );
        // The Condition block is the first three columns and must stay zero.
        assert_eq!(row.slice(ndarray::s![..3]).sum(), 0.0);
        assert_eq!(row.sum(), 2.0);
    }

    #[test]
    fn label_vocab_is_sorted_and_invertible() {
        let vocab = LabelVocab::fit(&sample());
        assert_eq!(vocab.names(), &["Chamomile Tea", "Ginger Tea", "Yarrow Tea"]);
        for (i, name) in vocab.names().iter().enumerate() {
            assert_eq!(vocab.class_of(name), Some(i));
            assert_eq!(vocab.name_of(i), Some(name.as_str()));
        }
        assert_eq!(vocab.class_of("Nettle Leaf Infusion"), None);
    }

    #[test]
    fn label_encoding_matches_the_vocab() {
        let records = sample();
        let vocab = LabelVocab::fit(&records);
        let labels = vocab.encode(&records).unwrap();
        assert_eq!(labels, ndarray::array![1, 0, 2]);
    }
}
