/// CLI для этапа трансформации данных

use std::path::PathBuf;

use anyhow::Context;

use exam_ml::DataTransformer;

fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let train_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts/train.csv"));
    let test_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts/test.csv"));

    let transformer = DataTransformer::new();
    let output = transformer
        .transform(&train_path, &test_path)
        .context("data transformation failed")?;

    tracing::info!(
        "Done: train {:?}, test {:?}, preprocessor at {:?}",
        output.train.shape(),
        output.test.shape(),
        output.preprocessor_path
    );
    Ok(())
}
