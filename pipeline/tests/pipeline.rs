use std::num::NonZeroUsize;

use pipeline::{
    PipelineErr,
    chart,
    clean::{Observation, clean},
    config::TrainConfig,
    records::{Field, Record},
    run::{Session, submit_training},
};

/// A small fixture in the source endpoint's shape: a few complete rows, a
/// few with holes.
fn fixture_records() -> Vec<Record> {
    let rows: Vec<String> = (0..40)
        .map(|i| {
            let hp = 50.0 + 2.5 * i as f32;
            let mpg = 40.0 - 0.5 * i as f32;
            match i % 8 {
                // A hole on either axis drops the whole record.
                5 => format!(r#"{{"Name": "car {i}", "Horsepower": {hp}}}"#),
                6 => format!(
                    r#"{{"Name": "car {i}", "Horsepower": null, "Miles_per_Gallon": {mpg}}}"#
                ),
                _ => format!(
                    r#"{{"Name": "car {i}", "Horsepower": {hp}, "Miles_per_Gallon": {mpg}}}"#
                ),
            }
        })
        .collect();

    serde_json::from_str(&format!("[{}]", rows.join(","))).unwrap()
}

fn train_config() -> TrainConfig {
    TrainConfig {
        seed: Some(17),
        ..TrainConfig::default()
    }
}

#[tokio::test]
async fn cleaned_fixture_trains_through_the_full_schedule() {
    let records = fixture_records();
    let observations = clean(&records, Field::Horsepower, Field::MilesPerGallon);

    // 2 of every 8 rows carry a hole.
    assert_eq!(observations.len(), 30);

    let session = Session::new();
    let run = submit_training(&session, observations.clone(), train_config()).unwrap();
    let token = run.token();
    let output = run.wait().await.unwrap();
    assert!(session.is_current(token));

    // Fixed schedule: one history entry per configured epoch.
    assert_eq!(output.history.len(), 50);
    for (i, metrics) in output.history.iter().enumerate() {
        assert_eq!(metrics.epoch, i);
        assert!(metrics.mse.is_finite());
    }

    // The data is a clean line; the fit should land close to it.
    let first = output.history.get(0).unwrap().mse;
    let last = output.history.last().unwrap().mse;
    assert!(last <= first, "mse went from {first} to {last}");

    // Scale bounds come from the cleaned set, whatever the shuffle did.
    let hp_max = 50.0 + 2.5 * 39.0;
    assert_eq!(output.scale.input_min, 50.0);
    assert_eq!(output.scale.input_max, hp_max);

    // The fitted line spans the input range in original units.
    assert_eq!(output.predictions.len(), 100);
    assert_eq!(output.predictions[0].x, 50.0);
    assert_eq!(output.predictions[99].x, hp_max);
}

#[tokio::test]
async fn chart_bundle_matches_the_cleaned_data() {
    let records = fixture_records();
    let observations = clean(&records, Field::Horsepower, Field::MilesPerGallon);

    let session = Session::new();
    let run = submit_training(&session, observations.clone(), train_config()).unwrap();
    let output = run.wait().await.unwrap();

    let scatter =
        chart::scatter_series("cars", &observations, "Horsepower", "MPG").unwrap();
    assert_eq!(scatter.points.len(), observations.len());
    assert_eq!(scatter.x_axis.min, Some(50.0 - 5.0));
    assert_eq!(scatter.x_axis.max, Some(50.0 + 2.5 * 39.0 + 5.0));

    let history = chart::history_series("mse", &output.history);
    assert_eq!(history.points.len(), 50);
}

#[tokio::test]
async fn a_superseding_submission_marks_the_older_run_stale() {
    let observations: Vec<Observation> = (0..10)
        .map(|i| Observation {
            x: i as f32,
            y: 2.0 * i as f32 + 1.0,
        })
        .collect();

    let quick = TrainConfig {
        epochs: NonZeroUsize::new(2).unwrap(),
        seed: Some(1),
        ..TrainConfig::default()
    };

    let session = Session::new();
    let older = submit_training(&session, observations.clone(), quick.clone()).unwrap();
    let newer = submit_training(&session, observations, quick).unwrap();

    // Both runs complete; only the newer result may be kept.
    let older_token = older.token();
    let newer_token = newer.token();
    older.wait().await.unwrap();
    newer.wait().await.unwrap();

    assert!(!session.is_current(older_token));
    assert!(session.is_current(newer_token));
}

#[tokio::test]
async fn constant_axis_surfaces_as_a_degenerate_column() {
    let observations = vec![
        Observation { x: 5.0, y: 1.0 },
        Observation { x: 5.0, y: 2.0 },
    ];

    let session = Session::new();
    let run = submit_training(&session, observations, train_config()).unwrap();

    assert!(matches!(
        run.wait().await,
        Err(PipelineErr::DegenerateColumn { .. })
    ));
}
