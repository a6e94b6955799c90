//! Exam Performance ML - Rust библиотека подготовки данных

pub mod data;
pub mod error;
pub mod preprocessing;
pub mod transformation;
pub mod types;

pub use error::{PipelineError, TransformError};
pub use preprocessing::ColumnPreprocessor;
pub use transformation::{DataTransformer, TransformationConfig, TransformationOutput};

// Re-export для удобства
pub use data::load_dataset;
