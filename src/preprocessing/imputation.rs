//! Заполнение пропущенных значений статистиками обучающей выборки

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PipelineError;

/// Импьютер числовых колонок медианой
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedianImputer {
    medians: Option<Vec<f64>>,
}

impl MedianImputer {
    pub fn new() -> Self {
        Self { medians: None }
    }

    /// Учит медиану каждой колонки по присутствующим значениям
    pub fn fit(&mut self, columns: &[Vec<Option<f64>>]) -> Result<(), PipelineError> {
        let mut medians = Vec::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            let mut present: Vec<f64> = column.iter().filter_map(|v| *v).collect();
            if present.is_empty() {
                return Err(PipelineError::EmptyInput(format!(
                    "numeric column {idx} has no observed values"
                )));
            }
            present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            medians.push(median_of_sorted(&present));
        }
        self.medians = Some(medians);
        Ok(())
    }

    /// Возвращает плотную матрицу с заполненными пропусками
    pub fn transform(&self, columns: &[Vec<Option<f64>>]) -> Result<Array2<f64>, PipelineError> {
        let medians = self.medians.as_ref().ok_or(PipelineError::NotFitted)?;
        if columns.len() != medians.len() {
            return Err(PipelineError::ColumnCountMismatch {
                expected: medians.len(),
                actual: columns.len(),
            });
        }

        let n_rows = columns.first().map_or(0, |c| c.len());
        let mut out = Array2::zeros((n_rows, columns.len()));
        for (j, column) in columns.iter().enumerate() {
            for (i, value) in column.iter().enumerate() {
                out[[i, j]] = value.unwrap_or(medians[j]);
            }
        }
        Ok(out)
    }

    pub fn medians(&self) -> Option<&[f64]> {
        self.medians.as_deref()
    }
}

impl Default for MedianImputer {
    fn default() -> Self {
        Self::new()
    }
}

/// Импьютер категориальных колонок самым частым значением.
/// При равенстве частот выбирается лексикографически меньшая категория.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeImputer {
    modes: Option<Vec<String>>,
}

impl ModeImputer {
    pub fn new() -> Self {
        Self { modes: None }
    }

    pub fn fit(&mut self, columns: &[Vec<Option<String>>]) -> Result<(), PipelineError> {
        let mut modes = Vec::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for value in column.iter().flatten() {
                *counts.entry(value.as_str()).or_insert(0) += 1;
            }

            // BTreeMap отсортирован, поэтому при равенстве побеждает меньший ключ
            let mut best: Option<(&str, usize)> = None;
            for (value, count) in counts {
                match best {
                    Some((_, best_count)) if count <= best_count => {}
                    _ => best = Some((value, count)),
                }
            }

            match best {
                Some((value, _)) => modes.push(value.to_string()),
                None => {
                    return Err(PipelineError::EmptyInput(format!(
                        "categorical column {idx} has no observed values"
                    )))
                }
            }
        }
        self.modes = Some(modes);
        Ok(())
    }

    /// Возвращает колонки без пропусков
    pub fn transform(
        &self,
        columns: &[Vec<Option<String>>],
    ) -> Result<Vec<Vec<String>>, PipelineError> {
        let modes = self.modes.as_ref().ok_or(PipelineError::NotFitted)?;
        if columns.len() != modes.len() {
            return Err(PipelineError::ColumnCountMismatch {
                expected: modes.len(),
                actual: columns.len(),
            });
        }

        let filled = columns
            .iter()
            .zip(modes)
            .map(|(column, mode)| {
                column
                    .iter()
                    .map(|v| v.clone().unwrap_or_else(|| mode.clone()))
                    .collect()
            })
            .collect();
        Ok(filled)
    }

    pub fn modes(&self) -> Option<&[String]> {
        self.modes.as_deref()
    }
}

impl Default for ModeImputer {
    fn default() -> Self {
        Self::new()
    }
}

fn median_of_sorted(values: &[f64]) -> f64 {
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}
