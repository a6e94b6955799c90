//! One-hot кодирование категориальных признаков

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::PipelineError;

/// One-hot энкодер со словарем категорий, выученным на обучающей выборке.
///
/// Категории внутри колонки упорядочены лексикографически, колонки идут
/// в порядке схемы - раскладка выходной матрицы полностью детерминирована.
/// Незнакомая категория на инференсе - явная ошибка, а не тихий пропуск.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    column_names: Vec<String>,
    categories: Option<Vec<Vec<String>>>,
}

impl OneHotEncoder {
    pub fn new(column_names: Vec<String>) -> Self {
        Self {
            column_names,
            categories: None,
        }
    }

    /// Учит отсортированный словарь категорий каждой колонки
    pub fn fit(&mut self, columns: &[Vec<String>]) -> Result<(), PipelineError> {
        if columns.len() != self.column_names.len() {
            return Err(PipelineError::ColumnCountMismatch {
                expected: self.column_names.len(),
                actual: columns.len(),
            });
        }

        let mut categories = Vec::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(PipelineError::EmptyInput(format!(
                    "categorical column {idx} has no rows"
                )));
            }
            let unique: BTreeSet<&str> = column.iter().map(String::as_str).collect();
            categories.push(unique.into_iter().map(str::to_string).collect());
        }
        self.categories = Some(categories);
        Ok(())
    }

    /// Разворачивает каждую колонку в индикаторные колонки словаря
    pub fn transform(&self, columns: &[Vec<String>]) -> Result<Array2<f64>, PipelineError> {
        let categories = self.categories.as_ref().ok_or(PipelineError::NotFitted)?;
        if columns.len() != categories.len() {
            return Err(PipelineError::ColumnCountMismatch {
                expected: categories.len(),
                actual: columns.len(),
            });
        }

        let n_rows = columns.first().map_or(0, |c| c.len());
        let width: usize = categories.iter().map(|c| c.len()).sum();
        let mut out = Array2::zeros((n_rows, width));

        let mut offset = 0;
        for (j, (column, vocab)) in columns.iter().zip(categories).enumerate() {
            for (i, value) in column.iter().enumerate() {
                let pos = vocab.binary_search(value).map_err(|_| {
                    PipelineError::UnknownCategory {
                        column: self.column_names[j].clone(),
                        value: value.clone(),
                    }
                })?;
                out[[i, offset + pos]] = 1.0;
            }
            offset += vocab.len();
        }
        Ok(out)
    }

    /// Суммарное число индикаторных колонок
    pub fn output_width(&self) -> Option<usize> {
        self.categories
            .as_ref()
            .map(|cats| cats.iter().map(|c| c.len()).sum())
    }

    pub fn categories(&self) -> Option<&[Vec<String>]> {
        self.categories.as_deref()
    }
}
