/// Типы данных и фиксированная схема датасета

use ndarray::Array1;

/// Числовые признаки (порядок фиксирован и определяет порядок колонок на выходе)
pub const NUMERIC_COLUMNS: [&str; 2] = ["reading_score", "writing_score"];

/// Категориальные признаки (порядок фиксирован)
pub const CATEGORICAL_COLUMNS: [&str; 5] = [
    "gender",
    "race_ethnicity",
    "parental_level_of_education",
    "lunch",
    "test_preparation_course",
];

/// Целевая переменная
pub const TARGET_COLUMN: &str = "math_score";

/// Сырые признаки в колоночном виде. `None` - пропущенное значение.
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    /// Колонки в порядке NUMERIC_COLUMNS
    pub numeric: Vec<Vec<Option<f64>>>,
    /// Колонки в порядке CATEGORICAL_COLUMNS
    pub categorical: Vec<Vec<Option<String>>>,
}

impl FeatureFrame {
    pub fn new() -> Self {
        Self {
            numeric: vec![Vec::new(); NUMERIC_COLUMNS.len()],
            categorical: vec![Vec::new(); CATEGORICAL_COLUMNS.len()],
        }
    }

    /// Количество строк (все колонки одинаковой длины по построению)
    pub fn n_rows(&self) -> usize {
        self.numeric.first().map_or(0, |col| col.len())
    }
}

/// Загруженный датасет: признаки плюс отделенная целевая колонка
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: FeatureFrame,
    pub target: Array1<f64>,
}

impl Dataset {
    pub fn n_rows(&self) -> usize {
        self.target.len()
    }
}
