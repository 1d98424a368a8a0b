use anyhow::Result;
use clap::Parser;
use herbal_care::dataset::{DEFAULT_DATA_FILE, Table, train_test_split};
use herbal_care::encoding::{FeatureSchema, LabelVocab};
use herbal_care::forest::{ForestParams, RemedyForest};
use herbal_care::report::{accuracy, classification_report};
use herbal_care::{Error, RemedyModel, UserInput};
use std::path::PathBuf;
use tracing::warn;

/// Trains the remedy classifier, prints its evaluation report, and runs one
/// example prediction.
#[derive(Parser, Debug)]
#[command(name = "train", about = "Train and evaluate the herbal remedy classifier")]
struct Args {
    /// Path to the remedy table.
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Fraction of rows held out for evaluation.
    #[arg(long, default_value_t = 0.2)]
    test_split: f64,

    /// Number of trees in the ensemble.
    #[arg(long, default_value_t = 100)]
    trees: usize,

    /// Seed for the split shuffle and the bootstrap sampling.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("herbal_care=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let table = match Table::from_path(&args.data) {
        Ok(table) => table,
        Err(Error::MissingColumns(columns)) => {
            // Diagnosed, not fatal: report the names and skip training.
            println!("Missing columns: {columns:?}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    println!("Columns in the dataset: {:?}", table.columns);

    // The schema and label vocabulary are frozen over the full table; only
    // the forest is fitted on the training partition.
    let schema = FeatureSchema::fit(&table.records);
    let labels = LabelVocab::fit(&table.records);

    let split = train_test_split(&table.records, args.test_split, args.seed);
    let params = ForestParams { trees: args.trees, seed: args.seed, max_depth: None };
    let x_train = schema.encode_matrix(&split.train);
    let y_train = labels.encode(&split.train)?;
    let forest = RemedyForest::fit(&params, &x_train, &y_train)?;

    if split.test.is_empty() {
        warn!("test partition is empty; skipping evaluation");
    } else {
        let x_test = schema.encode_matrix(&split.test);
        let y_test = labels.encode(&split.test)?;
        let predictions = forest.predict(&x_test);

        println!("Accuracy: {}", accuracy(&y_test, &predictions));
        println!(
            "\nClassification Report:\n{}",
            classification_report(&y_test, &predictions, &labels)
        );
    }

    let model = RemedyModel::from_parts(forest, schema, labels, table.records);
    let rec = model.recommend(&UserInput::new("Fever", "Adults", "Vegan"))?;
    println!("Predicted Remedy for input condition: {}", rec.record.remedy_name);

    Ok(())
}
