use thiserror::Error;

/// Errors produced while loading the remedy table or training the model.
#[derive(Debug, Error)]
pub enum Error {
    /// The CSV header lacks one or more of the required categorical columns.
    #[error("missing columns: {0:?}")]
    MissingColumns(Vec<String>),

    /// The table contains no rows, so there is nothing to fit.
    #[error("the dataset is empty")]
    EmptyDataset,

    /// A label or class index that is not part of the training vocabulary.
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    /// The underlying tree learner rejected the training data.
    #[error("training failed: {0}")]
    Training(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
