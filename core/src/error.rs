use thiserror::Error;

/// Feil fra pipelinen. Radnummer er 1-basert og teller kun datarader (ikke header).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("kunne ikke lese {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV-feil: {0}")]
    Csv(#[from] csv::Error),

    #[error("kolonnen '{0}' mangler i eksporten")]
    MissingColumn(String),

    #[error("rad {row}: ugyldig dato i '{column}': {value:?}")]
    InvalidDate {
        row: usize,
        column: String,
        value: String,
    },

    #[error("rad {row}: ugyldig varighet i '{column}': {value:?}")]
    InvalidDuration {
        row: usize,
        column: String,
        value: String,
    },

    #[error("rad {row}: ikke-numerisk verdi i '{column}': {value:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("ugyldig config ved {path}: {message}")]
    Config { path: String, message: String },

    #[error("metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("graf: {0}")]
    Render(String),
}

impl PipelineError {
    /// Radnummer for feil som gjelder én enkelt rad.
    pub fn row(&self) -> Option<usize> {
        match self {
            PipelineError::InvalidDate { row, .. }
            | PipelineError::InvalidDuration { row, .. }
            | PipelineError::InvalidNumber { row, .. } => Some(*row),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
