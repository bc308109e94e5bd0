//! End-to-end batch runs over a temporary data directory.

use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use stock_nn_trainer::config::{TrainerConfig, TrainingParams};
use stock_nn_trainer::job::{Outcome, SkipReason, TrainingJob};
use stock_nn_trainer::PriceSeries;

/// Write `<symbol>.csv` with `rows` daily bars of strictly increasing closes.
fn write_symbol_csv(dir: &Path, symbol: &str, rows: usize) {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut content = String::from("Date,Open,High,Low,Close,Volume\n");
    for i in 0..rows {
        let date = start + Duration::days(i as i64);
        let close = 100.0 + i as f64 * 0.5;
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            date.format("%Y-%m-%d"),
            close - 0.2,
            close + 0.3,
            close - 0.4,
            close,
            10_000 + i
        ));
    }
    fs::write(dir.join(format!("{symbol}.csv")), content).unwrap();
}

#[test]
fn test_batch_trains_long_series_and_skips_short_one() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    let model_dir = root.path().join("models").join("neural_network");
    fs::create_dir_all(&data_dir).unwrap();

    write_symbol_csv(&data_dir, "AAA", 300);
    write_symbol_csv(&data_dir, "BBB", 50);

    let job = TrainingJob::new(TrainerConfig::new(&data_dir, &model_dir));
    let summary = job.run().unwrap();

    assert_eq!(summary.trained, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);

    assert!(model_dir.join("AAA_nn.json").exists());
    assert!(!model_dir.join("BBB_nn.json").exists());
}

#[test]
fn test_malformed_file_does_not_abort_batch() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    let model_dir = root.path().join("models");
    fs::create_dir_all(&data_dir).unwrap();

    // Missing the required Close column.
    fs::write(
        data_dir.join("BAD.csv"),
        "Date,Open,High,Low,Volume\n2020-01-01,1,2,0.5,100\n",
    )
    .unwrap();
    write_symbol_csv(&data_dir, "CCC", 300);

    let job = TrainingJob::new(TrainerConfig::new(&data_dir, &model_dir));
    let summary = job.run().unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.trained, 1);
    assert!(model_dir.join("CCC_nn.json").exists());
}

#[test]
fn test_empty_data_directory_is_a_clean_run() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    let model_dir = root.path().join("models");
    fs::create_dir_all(&data_dir).unwrap();

    let job = TrainingJob::new(TrainerConfig::new(&data_dir, &model_dir));
    let summary = job.run().unwrap();

    assert_eq!(summary.trained, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed, 0);
    // The model directory is still created, idempotently.
    assert!(model_dir.exists());
}

#[test]
fn test_skip_reasons_follow_guard_order() {
    let root = tempfile::tempdir().unwrap();
    let job = TrainingJob::new(TrainerConfig::new(
        root.path().join("data"),
        root.path().join("models"),
    ));

    let empty = PriceSeries::new("EMPTY".to_string());
    assert_eq!(
        job.train_symbol(&empty).unwrap(),
        Outcome::Skipped(SkipReason::NoData)
    );
}

#[test]
fn test_rows_that_all_fail_cleaning_report_insufficient_data() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    // Rows exist but every Close field is empty, so cleaning drops them all.
    fs::write(
        data_dir.join("EEE.csv"),
        "Date,Open,High,Low,Close,Volume\n\
         2020-01-01,1,2,0.5,,100\n\
         2020-01-02,1,2,0.5,,100\n",
    )
    .unwrap();

    let series = PriceSeries::load_csv(&data_dir.join("EEE.csv"), "EEE".to_string()).unwrap();
    let job = TrainingJob::new(TrainerConfig::new(&data_dir, root.path().join("models")));
    assert_eq!(
        job.train_symbol(&series).unwrap(),
        Outcome::Skipped(SkipReason::InsufficientData)
    );
}

#[test]
fn test_skip_messages_name_the_symbol() {
    let line = SkipReason::InsufficientData.console_line("BBB");
    assert!(line.to_lowercase().contains("insufficient"));
    assert!(line.contains("BBB"));
    assert!(line.contains("skipping"));

    let line = SkipReason::NoData.console_line("BBB");
    assert!(line.contains("No data available for BBB"));

    let line = SkipReason::EmptySplit.console_line("BBB");
    assert!(line.contains("training or testing data for BBB"));

    let line = SkipReason::NoTrainingWindows.console_line("BBB");
    assert!(line.contains("after scaling for BBB"));
}

#[test]
fn test_model_artifact_round_trips() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    let model_dir = root.path().join("models");
    fs::create_dir_all(&data_dir).unwrap();
    write_symbol_csv(&data_dir, "DDD", 80);

    // Shrink the policy so an 80-row file trains quickly.
    let config = TrainerConfig::new(&data_dir, &model_dir).with_params(TrainingParams {
        lookback: 10,
        hidden_units: 16,
        epochs: 3,
        ..TrainingParams::default()
    });
    let summary = TrainingJob::new(config).run().unwrap();
    assert_eq!(summary.trained, 1);

    let model_path = model_dir.join("DDD_nn.json");
    let mut model = stock_nn_trainer::NeuralNetwork::load(&model_path).unwrap();
    assert_eq!(model.input_size(), 10);

    let input = ndarray::Array2::from_elem((1, 10), 0.5);
    let prediction = model.predict(&input);
    assert!(prediction[0].is_finite());
}
