/// Модуль предобработки данных

pub mod encoding;
pub mod imputation;
pub mod pipeline;
pub mod scaling;

pub use encoding::OneHotEncoder;
pub use imputation::{MedianImputer, ModeImputer};
pub use pipeline::ColumnPreprocessor;
pub use scaling::VarianceScaler;
