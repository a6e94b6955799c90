//! Загрузка CSV датасетов с проверкой схемы

use std::io;
use std::path::Path;

use csv::StringRecord;
use ndarray::Array1;

use crate::error::TransformError;
use crate::types::{Dataset, FeatureFrame, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS, TARGET_COLUMN};

/// Читает CSV файл в колоночное представление и отделяет целевую колонку.
///
/// Порядок колонок в файле не важен, важно наличие всех восьми.
/// Пустое поле считается пропущенным значением; пропуск в целевой
/// колонке - ошибка данных.
pub fn load_dataset(path: &Path) -> Result<Dataset, TransformError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| TransformError::data_load(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| TransformError::data_load(path, e))?
        .clone();

    let find = |name: &str| -> Result<usize, TransformError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| TransformError::Schema {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };

    let numeric_idx: Vec<usize> = NUMERIC_COLUMNS
        .iter()
        .map(|c| find(c))
        .collect::<Result<_, _>>()?;
    let categorical_idx: Vec<usize> = CATEGORICAL_COLUMNS
        .iter()
        .map(|c| find(c))
        .collect::<Result<_, _>>()?;
    let target_idx = find(TARGET_COLUMN)?;

    let mut features = FeatureFrame::new();
    let mut target = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TransformError::data_load(path, e))?;

        for (slot, &idx) in numeric_idx.iter().enumerate() {
            let value = parse_numeric(&record, idx, NUMERIC_COLUMNS[slot], row)
                .map_err(|e| TransformError::data_load(path, e))?;
            features.numeric[slot].push(value);
        }

        for (slot, &idx) in categorical_idx.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("").trim();
            let value = if raw.is_empty() {
                None
            } else {
                Some(raw.to_string())
            };
            features.categorical[slot].push(value);
        }

        let y = parse_numeric(&record, target_idx, TARGET_COLUMN, row)
            .map_err(|e| TransformError::data_load(path, e))?
            .ok_or_else(|| {
                TransformError::data_load(path, row_error(row, TARGET_COLUMN, "<empty>"))
            })?;
        target.push(y);
    }

    tracing::info!(
        "Read {} rows from {:?} ({} numeric, {} categorical columns)",
        target.len(),
        path,
        NUMERIC_COLUMNS.len(),
        CATEGORICAL_COLUMNS.len()
    );

    Ok(Dataset {
        features,
        target: Array1::from(target),
    })
}

fn parse_numeric(
    record: &StringRecord,
    idx: usize,
    column: &str,
    row: usize,
) -> Result<Option<f64>, io::Error> {
    let raw = record.get(idx).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| row_error(row, column, raw))
}

fn row_error(row: usize, column: &str, value: &str) -> io::Error {
    // +2: строка заголовка плюс нумерация с единицы
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("row {}: invalid value `{value}` in column `{column}`", row + 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const HEADER: &str = "gender,race_ethnicity,parental_level_of_education,lunch,test_preparation_course,reading_score,writing_score,math_score";

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        write!(file, "{body}").unwrap();
        path
    }

    #[test]
    fn test_load_separates_target() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            &dir,
            "train.csv",
            "female,group B,bachelor's degree,standard,none,72,74,70\n\
             male,group A,some college,free/reduced,completed,60,58,65\n",
        );

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.n_rows(), 2);
        assert_eq!(dataset.features.numeric[0], vec![Some(72.0), Some(60.0)]);
        assert_eq!(dataset.target[0], 70.0);
        assert_eq!(
            dataset.features.categorical[1],
            vec![Some("group B".to_string()), Some("group A".to_string())]
        );
    }

    #[test]
    fn test_empty_fields_become_missing() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            &dir,
            "train.csv",
            "female,group B,bachelor's degree,standard,none,,74,70\n\
             ,group A,some college,free/reduced,completed,60,58,65\n",
        );

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.features.numeric[0][0], None);
        assert_eq!(dataset.features.categorical[0][1], None);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "gender,lunch,math_score\nfemale,standard,70\n").unwrap();

        let err = load_dataset(&path).unwrap_err();
        match err {
            TransformError::Schema { column, .. } => {
                assert_eq!(column, "reading_score");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let err = load_dataset(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(err, TransformError::DataLoad { .. }));
    }

    #[test]
    fn test_unparsable_numeric_is_data_load_error() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            &dir,
            "train.csv",
            "female,group B,bachelor's degree,standard,none,abc,74,70\n",
        );

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, TransformError::DataLoad { .. }));
    }
}
