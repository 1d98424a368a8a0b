//! The trained model and the inference adapter.
//!
//! `RemedyModel` bundles the forest with the frozen feature schema, the
//! label vocabulary, and the source rows used to describe a prediction.

use crate::dataset::{RemedyRecord, UserInput};
use crate::encoding::{FeatureSchema, LabelVocab, UnseenValue};
use crate::error::{Error, Result};
use crate::forest::{ForestParams, RemedyForest};
use tracing::warn;

/// A predicted remedy joined back to its source row.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// First table row whose remedy name equals the predicted label.
    pub record: RemedyRecord,
    /// Input values that were never observed at training time.
    pub unseen: Vec<UnseenValue>,
}

#[derive(Debug)]
pub struct RemedyModel {
    forest: RemedyForest,
    schema: FeatureSchema,
    labels: LabelVocab,
    records: Vec<RemedyRecord>,
}

impl RemedyModel {
    /// Encodes `records` and fits the forest on all of them.
    ///
    /// This is the wizard's startup path; the trainer splits the rows first
    /// and assembles the model with [`RemedyModel::from_parts`].
    pub fn train(records: Vec<RemedyRecord>, params: &ForestParams) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let schema = FeatureSchema::fit(&records);
        let labels = LabelVocab::fit(&records);
        let x = schema.encode_matrix(&records);
        let y = labels.encode(&records)?;
        let forest = RemedyForest::fit(params, &x, &y)?;

        Ok(RemedyModel { forest, schema, labels, records })
    }

    /// Assembles a model from separately fitted parts.
    ///
    /// The schema and vocabulary must come from the same table as `records`,
    /// though the forest may have been fitted on a subset of its rows.
    pub fn from_parts(
        forest: RemedyForest,
        schema: FeatureSchema,
        labels: LabelVocab,
        records: Vec<RemedyRecord>,
    ) -> Self {
        RemedyModel { forest, schema, labels, records }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn labels(&self) -> &LabelVocab {
        &self.labels
    }

    pub fn records(&self) -> &[RemedyRecord] {
        &self.records
    }

    /// Encodes the raw input against the training schema, predicts, and
    /// looks up the full remedy details for the predicted name.
    ///
    /// Values unseen at training time still produce a prediction (their
    /// indicator block is zero); they are returned so the caller can say so.
    pub fn recommend(&self, input: &UserInput) -> Result<Recommendation> {
        let (row, unseen) = self.schema.encode_row(input);
        for value in &unseen {
            warn!(column = value.column, value = %value.value, "input value not seen during training");
        }

        let class = self.forest.predict_one(row.view());
        let name = self
            .labels
            .name_of(class)
            .ok_or_else(|| Error::UnknownLabel(format!("class {class}")))?;
        let record = self
            .records
            .iter()
            .find(|r| r.remedy_name == name)
            .ok_or_else(|| Error::UnknownLabel(name.to_string()))?;

        Ok(Recommendation { record: record.clone(), unseen })
    }
}
