/// Ошибки трансформации данных

use std::path::PathBuf;
use thiserror::Error;

/// Ошибки внутри пайплайна предобработки
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline is not fitted")]
    NotFitted,

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("expected {expected} columns, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("unknown category `{value}` in column `{column}`")]
    UnknownCategory { column: String, value: String },
}

/// Ошибки компонента трансформации. Каждая ошибка оборачивается
/// один раз с контекстом и пробрасывается вызывающему без повторов.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to load data from {path:?}")]
    DataLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("missing required column `{column}` in {path:?}")]
    Schema { path: PathBuf, column: String },

    #[error("transformation failed at stage `{stage}`")]
    Transformation {
        stage: &'static str,
        #[source]
        source: PipelineError,
    },

    #[error("failed to persist preprocessor to {path:?}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TransformError {
    pub(crate) fn data_load(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataLoad {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn persistence(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Persistence {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn at_stage(stage: &'static str) -> impl FnOnce(PipelineError) -> Self {
        move |source| Self::Transformation { stage, source }
    }
}
