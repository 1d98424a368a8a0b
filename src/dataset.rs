//! Loading and splitting the remedy table.

use crate::error::{Error, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

/// Categorical columns that feed the feature matrix, in encoding order.
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["Condition", "Age_Group", "Dietary_Preferences"];

/// Default table location, read from the working directory.
pub const DEFAULT_DATA_FILE: &str = "herbal_remedies2.csv";

/// A single row of the remedy table.
///
/// The free-text fields are kept out of the feature matrix and only used to
/// describe a predicted remedy; the remedy name doubles as the class label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemedyRecord {
    #[serde(rename = "Remedy_Name")]
    pub remedy_name: String,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Age_Group")]
    pub age_group: String,
    #[serde(rename = "Dietary_Preferences")]
    pub dietary_preferences: String,
    #[serde(rename = "Ingredients")]
    pub ingredients: String,
    #[serde(rename = "Recipe")]
    pub recipe: String,
    #[serde(rename = "Dosage")]
    pub dosage: String,
    #[serde(rename = "Cautions")]
    pub cautions: String,
    #[serde(rename = "Contraindications")]
    pub contraindications: String,
}

impl RemedyRecord {
    /// Categorical (column, value) pairs in encoding order.
    pub fn categoricals(&self) -> [(&'static str, &str); 3] {
        [
            (CATEGORICAL_COLUMNS[0], &self.condition),
            (CATEGORICAL_COLUMNS[1], &self.age_group),
            (CATEGORICAL_COLUMNS[2], &self.dietary_preferences),
        ]
    }
}

/// Raw user-entered values for the three categorical fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub condition: String,
    pub age_group: String,
    pub dietary_preferences: String,
}

impl UserInput {
    pub fn new(condition: &str, age_group: &str, dietary_preferences: &str) -> Self {
        UserInput {
            condition: condition.to_string(),
            age_group: age_group.to_string(),
            dietary_preferences: dietary_preferences.to_string(),
        }
    }

    /// Categorical (column, value) pairs in encoding order.
    pub fn categoricals(&self) -> [(&'static str, &str); 3] {
        [
            (CATEGORICAL_COLUMNS[0], &self.condition),
            (CATEGORICAL_COLUMNS[1], &self.age_group),
            (CATEGORICAL_COLUMNS[2], &self.dietary_preferences),
        ]
    }
}

/// The parsed remedy table together with the column names found in the file.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub records: Vec<RemedyRecord>,
}

impl Table {
    /// Reads the table from a CSV file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let table = Table::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), rows = table.records.len(), "loaded remedy table");
        Ok(table)
    }

    /// Reads the table from any CSV source.
    ///
    /// The header is checked for the required categorical columns before any
    /// row is deserialized; missing names are reported sorted.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut missing: Vec<String> = CATEGORICAL_COLUMNS
            .iter()
            .filter(|col| !columns.iter().any(|c| c == *col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(Error::MissingColumns(missing));
        }

        let mut records = Vec::new();
        for row in rdr.deserialize() {
            let record: RemedyRecord = row?;
            records.push(record);
        }

        warn_on_duplicate_names(&records);
        Ok(Table { columns, records })
    }
}

fn warn_on_duplicate_names(records: &[RemedyRecord]) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.remedy_name.as_str()).or_insert(0) += 1;
    }
    for (name, count) in counts {
        if count > 1 {
            warn!(remedy = name, count, "duplicate remedy name; detail lookups use the first row");
        }
    }
}

/// A helper type for holding train/test splits.
#[derive(Debug)]
pub struct DatasetSplit {
    pub train: Vec<RemedyRecord>,
    pub test: Vec<RemedyRecord>,
}

/// Splits the table into train and test sets after a seeded shuffle.
///
/// The same seed always produces the same partition.
pub fn train_test_split(data: &[RemedyRecord], test_ratio: f64, seed: u64) -> DatasetSplit {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = data.to_vec();
    data.shuffle(&mut rng);

    let test_size = ((data.len() as f64) * test_ratio).round() as usize;
    let test = data[..test_size].to_vec();
    let train = data[test_size..].to_vec();

    DatasetSplit { train, test }
}
