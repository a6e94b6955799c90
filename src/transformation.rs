//! Компонент трансформации train/test выборок

use ndarray::{concatenate, Array2, Axis};
use std::path::{Path, PathBuf};

use crate::data::load_dataset;
use crate::error::TransformError;
use crate::preprocessing::ColumnPreprocessor;

/// Конфигурация трансформации: куда сохранять обученный препроцессор
#[derive(Debug, Clone)]
pub struct TransformationConfig {
    pub preprocessor_path: PathBuf,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            preprocessor_path: PathBuf::from("artifacts").join("preprocessor.bin"),
        }
    }
}

/// Результат трансформации: матрицы с целевой колонкой в конце
/// и путь к сохраненному препроцессору
#[derive(Debug)]
pub struct TransformationOutput {
    pub train: Array2<f64>,
    pub test: Array2<f64>,
    pub preprocessor_path: PathBuf,
}

/// Готовит train/test CSV к обучению модели: обучает препроцессор на
/// обучающей выборке, применяет его к обеим, приклеивает целевую
/// колонку и сохраняет обученный объект для инференса.
#[derive(Debug, Clone, Default)]
pub struct DataTransformer {
    config: TransformationConfig,
}

impl DataTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TransformationConfig) -> Self {
        Self { config }
    }

    /// Собирает необученный составной препроцессор для фиксированной схемы
    pub fn build_pipeline(&self) -> Result<ColumnPreprocessor, TransformError> {
        Ok(ColumnPreprocessor::new())
    }

    /// Выполняет полный цикл: загрузка, fit на train, transform обеих
    /// выборок, сохранение артефакта.
    ///
    /// Тестовая выборка никогда не участвует в обучении статистик -
    /// это защита от утечки информации, а не оптимизация.
    pub fn transform(
        &self,
        train_path: &Path,
        test_path: &Path,
    ) -> Result<TransformationOutput, TransformError> {
        let train = load_dataset(train_path)?;
        let test = load_dataset(test_path)?;
        tracing::info!("Completed reading of train and test data");

        let mut preprocessor = self.build_pipeline()?;
        tracing::info!("Obtained preprocessing object");

        let train_features = preprocessor
            .fit_transform(&train.features)
            .map_err(TransformError::at_stage("fit_transform train"))?;
        let test_features = preprocessor
            .transform(&test.features)
            .map_err(TransformError::at_stage("transform test"))?;

        let train_arr = append_target(train_features, &train.target);
        let test_arr = append_target(test_features, &test.target);
        tracing::info!(
            "Transformation complete: train {:?}, test {:?}",
            train_arr.shape(),
            test_arr.shape()
        );

        preprocessor.save(&self.config.preprocessor_path)?;
        tracing::info!(
            "Saved preprocessing object to {:?}",
            self.config.preprocessor_path
        );

        Ok(TransformationOutput {
            train: train_arr,
            test: test_arr,
            preprocessor_path: self.config.preprocessor_path.clone(),
        })
    }
}

/// Приклеивает нетрансформированную целевую колонку последней
fn append_target(features: Array2<f64>, target: &ndarray::Array1<f64>) -> Array2<f64> {
    let column = target.view().insert_axis(Axis(1));
    concatenate![Axis(1), features, column]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const HEADER: &str = "gender,race_ethnicity,parental_level_of_education,lunch,test_preparation_course,reading_score,writing_score,math_score";

    const GENDERS: [&str; 2] = ["female", "male"];
    const GROUPS: [&str; 3] = ["group A", "group B", "group C"];
    const EDUCATION: [&str; 3] = ["bachelor's degree", "some college", "master's degree"];
    const LUNCH: [&str; 2] = ["standard", "free/reduced"];
    const PREP: [&str; 2] = ["none", "completed"];

    fn write_rows(path: &Path, n: usize, seed: usize) {
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for i in 0..n {
            let k = i + seed;
            writeln!(
                file,
                "{},{},{},{},{},{},{},{}",
                GENDERS[k % 2],
                GROUPS[k % 3],
                EDUCATION[(k / 2) % 3],
                LUNCH[(k / 3) % 2],
                PREP[(k / 5) % 2],
                40 + k % 60,
                45 + k % 55,
                50 + k % 50,
            )
            .unwrap();
        }
    }

    #[test]
    fn test_end_to_end_shapes_and_artifact() {
        let dir = tempdir().unwrap();
        let train_path = dir.path().join("train.csv");
        let test_path = dir.path().join("test.csv");
        write_rows(&train_path, 800, 0);
        write_rows(&test_path, 200, 7);

        let transformer = DataTransformer::with_config(TransformationConfig {
            preprocessor_path: dir.path().join("artifacts").join("preprocessor.bin"),
        });
        let output = transformer.transform(&train_path, &test_path).unwrap();

        assert_eq!(output.train.nrows(), 800);
        assert_eq!(output.test.nrows(), 200);
        assert_eq!(output.train.ncols(), output.test.ncols());
        // 2 числовые + (2 + 3 + 3 + 2 + 2) индикаторных + целевая
        assert_eq!(output.train.ncols(), 2 + 12 + 1);
        assert!(output.preprocessor_path.exists());
    }

    #[test]
    fn test_target_is_last_column_untouched() {
        let dir = tempdir().unwrap();
        let train_path = dir.path().join("train.csv");
        let test_path = dir.path().join("test.csv");
        write_rows(&train_path, 20, 0);
        write_rows(&test_path, 5, 3);

        let transformer = DataTransformer::with_config(TransformationConfig {
            preprocessor_path: dir.path().join("preprocessor.bin"),
        });
        let output = transformer.transform(&train_path, &test_path).unwrap();

        let last = output.train.ncols() - 1;
        // первая строка train: math_score = 50 + 0 % 50
        assert_eq!(output.train[[0, last]], 50.0);
        // вторая: 50 + 1 % 50
        assert_eq!(output.train[[1, last]], 51.0);
    }

    #[test]
    fn test_artifact_round_trip_matches_in_memory() {
        let dir = tempdir().unwrap();
        let train_path = dir.path().join("train.csv");
        let test_path = dir.path().join("test.csv");
        write_rows(&train_path, 50, 0);
        write_rows(&test_path, 10, 2);

        let transformer = DataTransformer::with_config(TransformationConfig {
            preprocessor_path: dir.path().join("preprocessor.bin"),
        });
        let output = transformer.transform(&train_path, &test_path).unwrap();

        let reloaded = ColumnPreprocessor::load(&output.preprocessor_path).unwrap();
        let train = load_dataset(&train_path).unwrap();
        let transformed = reloaded.transform(&train.features).unwrap();

        let width = output.train.ncols() - 1;
        for i in 0..transformed.nrows() {
            for j in 0..width {
                assert!((transformed[[i, j]] - output.train[[i, j]]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_missing_train_file_fails() {
        let dir = tempdir().unwrap();
        let test_path = dir.path().join("test.csv");
        write_rows(&test_path, 5, 0);

        let transformer = DataTransformer::new();
        let err = transformer
            .transform(&dir.path().join("absent.csv"), &test_path)
            .unwrap_err();
        assert!(matches!(err, TransformError::DataLoad { .. }));
    }
}
