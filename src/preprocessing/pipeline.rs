//! Составной препроцессор: числовая и категориальная ветки

use ndarray::{concatenate, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, TransformError};
use crate::preprocessing::{MedianImputer, ModeImputer, OneHotEncoder, VarianceScaler};
use crate::types::{FeatureFrame, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

/// Препроцессор табличных признаков.
///
/// Числовая ветка: медианная импутация, затем масштабирование без
/// центрирования. Категориальная ветка: импутация модой, one-hot
/// кодирование, масштабирование индикаторных колонок. Выходы веток
/// конкатенируются: сначала числовые колонки в порядке схемы, затем
/// индикаторные.
///
/// До `fit` объект не содержит выученного состояния; после - статистики
/// обучающей выборки фиксируются, `transform` принимает `&self` и
/// параметры изменить не может.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnPreprocessor {
    numeric_imputer: MedianImputer,
    numeric_scaler: VarianceScaler,
    categorical_imputer: ModeImputer,
    encoder: OneHotEncoder,
    indicator_scaler: VarianceScaler,
    is_fitted: bool,
}

impl ColumnPreprocessor {
    pub fn new() -> Self {
        Self {
            numeric_imputer: MedianImputer::new(),
            numeric_scaler: VarianceScaler::new(),
            categorical_imputer: ModeImputer::new(),
            encoder: OneHotEncoder::new(
                CATEGORICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            ),
            indicator_scaler: VarianceScaler::new(),
            is_fitted: false,
        }
    }

    /// Учит все статистики на переданной (обучающей) выборке
    pub fn fit(&mut self, frame: &FeatureFrame) -> Result<(), PipelineError> {
        if frame.n_rows() == 0 {
            return Err(PipelineError::EmptyInput("no rows to fit".to_string()));
        }

        self.numeric_imputer.fit(&frame.numeric)?;
        let numeric = self.numeric_imputer.transform(&frame.numeric)?;
        self.numeric_scaler.fit(&numeric)?;

        self.categorical_imputer.fit(&frame.categorical)?;
        let filled = self.categorical_imputer.transform(&frame.categorical)?;
        self.encoder.fit(&filled)?;
        let indicators = self.encoder.transform(&filled)?;
        self.indicator_scaler.fit(&indicators)?;

        self.is_fitted = true;
        Ok(())
    }

    /// Применяет выученные параметры без дообучения
    pub fn transform(&self, frame: &FeatureFrame) -> Result<Array2<f64>, PipelineError> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted);
        }

        let numeric = self.numeric_imputer.transform(&frame.numeric)?;
        let numeric = self.numeric_scaler.transform(&numeric)?;

        let filled = self.categorical_imputer.transform(&frame.categorical)?;
        let indicators = self.encoder.transform(&filled)?;
        let indicators = self.indicator_scaler.transform(&indicators)?;

        Ok(concatenate![Axis(1), numeric, indicators])
    }

    pub fn fit_transform(&mut self, frame: &FeatureFrame) -> Result<Array2<f64>, PipelineError> {
        self.fit(frame)?;
        self.transform(frame)
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// Ширина выходной матрицы после обучения
    pub fn output_width(&self) -> Option<usize> {
        self.encoder
            .output_width()
            .map(|w| NUMERIC_COLUMNS.len() + w)
    }

    /// Сохраняет обученный препроцессор в бинарный артефакт
    pub fn save(&self, path: &Path) -> Result<(), TransformError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| TransformError::persistence(path, e))?;
            }
        }
        let encoded =
            bincode::serialize(self).map_err(|e| TransformError::persistence(path, e))?;
        fs::write(path, encoded).map_err(|e| TransformError::persistence(path, e))
    }

    /// Загружает препроцессор из артефакта для переиспользования на инференсе
    pub fn load(path: &Path) -> Result<Self, TransformError> {
        let data = fs::read(path).map_err(|e| TransformError::persistence(path, e))?;
        bincode::deserialize(&data).map_err(|e| TransformError::persistence(path, e))
    }
}

impl Default for ColumnPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
