//! # herbal-care 🌿
//!
//! Recommend an herbal remedy from a user's condition, age group, and
//! dietary preferences. A bagged ensemble of [`linfa-trees`](https://crates.io/crates/linfa-trees)
//! decision trees is fitted over indicator-encoded categorical columns of a
//! flat CSV table; the encoding dictionary is frozen at training time and
//! reused verbatim for every inference row.
//!
//! ## Features
//! - CSV table loading with required-column validation
//! - Indicator encoding with a schema frozen at fit time
//! - Seeded bagging (100 trees by default) for reproducible predictions
//! - Inference rows aligned to the training schema, with unseen categorical
//!   values detected and reported
//! - Accuracy and a per-class precision/recall/F1 report
//! - A three-screen terminal wizard (welcome → input → result)
//!
//! ## Example
//! ```rust
//! use std::path::Path;
//! use herbal_care::{ForestParams, RemedyModel, Table, UserInput};
//!
//! let table = Table::from_path(Path::new("herbal_remedies2.csv")).unwrap();
//! let model = RemedyModel::train(table.records, &ForestParams::default()).unwrap();
//! let rec = model.recommend(&UserInput::new("Fever", "Adults", "Vegan")).unwrap();
//! println!("Recommended: {}", rec.record.remedy_name);
//! ```

pub mod dataset;
pub mod encoding;
pub mod error;
pub mod forest;
pub mod model;
pub mod report;
pub mod wizard;

pub use dataset::{DatasetSplit, RemedyRecord, Table, UserInput, train_test_split};
pub use error::{Error, Result};
pub use forest::{ForestParams, RemedyForest};
pub use model::{Recommendation, RemedyModel};
