//! Масштабирование признаков без центрирования

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Делит каждую колонку на ее стандартное отклонение, не вычитая среднее.
///
/// Центрирование намеренно отключено: выход one-hot ветки остается
/// неотрицательным и разреженным, числовая ветка масштабируется той же
/// политикой, чтобы обе ветки были согласованы.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceScaler {
    scale: Option<Vec<f64>>,
}

impl VarianceScaler {
    pub fn new() -> Self {
        Self { scale: None }
    }

    /// Учит стандартное отклонение каждой колонки (ddof = 0)
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<(), PipelineError> {
        if x.nrows() == 0 {
            return Err(PipelineError::EmptyInput("no rows to fit scaler".to_string()));
        }

        let mut scale: Vec<f64> = x.std_axis(Axis(0), 0.0).to_vec();

        // Избегаем деления на ноль для константных колонок
        for val in scale.iter_mut() {
            if *val < 1e-10 {
                *val = 1.0;
            }
        }

        self.scale = Some(scale);
        Ok(())
    }

    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, PipelineError> {
        let scale = self.scale.as_ref().ok_or(PipelineError::NotFitted)?;
        if x.ncols() != scale.len() {
            return Err(PipelineError::ColumnCountMismatch {
                expected: scale.len(),
                actual: x.ncols(),
            });
        }

        let mut scaled = x.clone();
        for mut row in scaled.rows_mut() {
            for (j, val) in row.iter_mut().enumerate() {
                *val /= scale[j];
            }
        }
        Ok(scaled)
    }

    pub fn scale(&self) -> Option<&[f64]> {
        self.scale.as_deref()
    }
}

impl Default for VarianceScaler {
    fn default() -> Self {
        Self::new()
    }
}
