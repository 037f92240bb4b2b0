use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::Serialize;
use tokio::task;

use regression::{
    arch::{Sequential, layers::Dense, loss::Mse},
    dataset::Dataset,
    optimization::GradientDescent,
    training::{Trainer, TrainingHistory},
};

use crate::{
    chart::{self, Series},
    clean::{self, Observation},
    config::{PipelineConfig, TrainConfig},
    error::{PipelineErr, Result},
    normalize::{self, ScaleParams},
    source,
};

/// Inputs sampled across the normalized range for the fitted-line series.
const PREDICTION_POINTS: usize = 100;

/// Identifies one run within a session. Tokens are ordered: a token older
/// than the session's current generation belongs to a superseded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Tracks run generations so a late result from an abandoned run cannot
/// overwrite newer state.
///
/// In-flight work is never cancelled; it is the *result* that gets
/// discarded when its token is no longer current.
#[derive(Debug, Default)]
pub struct Session {
    generation: AtomicU64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, superseding every previously issued token.
    pub fn begin_run(&self) -> RunToken {
        RunToken(self.generation.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Whether the token still belongs to the latest run.
    pub fn is_current(&self, token: RunToken) -> bool {
        token.0 == self.generation.load(Ordering::Relaxed)
    }
}

/// Everything a training run yields. The model and its tensors live and
/// die inside the run; only these derived outputs escape.
pub struct TrainingOutput {
    pub history: TrainingHistory,
    pub scale: ScaleParams,
    /// The fitted line sampled across the input range, in original units.
    pub predictions: Vec<Observation>,
}

/// Handle to an in-flight fit. Resolves once the fixed epoch schedule
/// completes.
pub struct TrainingRun {
    token: RunToken,
    handle: task::JoinHandle<Result<TrainingOutput>>,
}

impl TrainingRun {
    pub fn token(&self) -> RunToken {
        self.token
    }

    /// Waits for the schedule to finish.
    pub async fn wait(self) -> Result<TrainingOutput> {
        self.handle.await?
    }
}

/// Submits a fit over the cleaned observations.
///
/// Preconditions are checked up front — an empty observation set is
/// rejected before any tensor exists — then the CPU-bound schedule runs
/// on the blocking pool while the caller stays free to await it.
pub fn submit_training(
    session: &Session,
    observations: Vec<Observation>,
    config: TrainConfig,
) -> Result<TrainingRun> {
    if observations.is_empty() {
        return Err(PipelineErr::EmptyDataset { stage: "train" });
    }

    let token = session.begin_run();
    debug!(
        generation = token.0;
        "submitting fit over {} observation(s), epochs={} batch_size={}",
        observations.len(),
        config.epochs,
        config.batch_size
    );
    let handle = task::spawn_blocking(move || train(observations, config));

    Ok(TrainingRun { token, handle })
}

/// The blocking body of one training run.
fn train(mut observations: Vec<Observation>, config: TrainConfig) -> Result<TrainingOutput> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // One raw-order shuffle per run, before normalization. Mini-batch
    // shuffling during the fit is the trainer's own per-epoch concern.
    observations.shuffle(&mut rng);

    let (normalized, scale) = normalize::normalize(&observations)?;
    let xs: Vec<f32> = normalized.iter().map(|n| n.x).collect();
    let ys: Vec<f32> = normalized.iter().map(|n| n.y).collect();
    let dataset = Dataset::new(xs, ys)?;

    // Two stacked affine layers, each one unit with bias.
    let model = Sequential::new([
        Dense::new((1, 1), &mut rng),
        Dense::new((1, 1), &mut rng),
    ]);
    let optimizer = GradientDescent::new(config.learning_rate);

    info!(
        "fitting {} sample(s) for {} epoch(s) in batches of {}",
        dataset.len(),
        config.epochs,
        config.batch_size
    );
    let outcome = Trainer::new(
        model,
        optimizer,
        Mse,
        dataset,
        config.epochs,
        config.batch_size,
        rng,
    )
    .fit()?;

    let predictions = predict_line(outcome.model, &scale);

    Ok(TrainingOutput {
        history: outcome.history,
        scale,
        predictions,
    })
}

/// Samples the fitted line over the normalized input range and maps both
/// axes back to original units through the run's scale parameters.
fn predict_line(mut model: Sequential, scale: &ScaleParams) -> Vec<Observation> {
    let xs: Vec<f32> = (0..PREDICTION_POINTS)
        .map(|i| i as f32 / (PREDICTION_POINTS - 1) as f32)
        .collect();
    let ys = model.predict(&xs);

    xs.into_iter()
        .zip(ys)
        .map(|(x, y)| Observation {
            x: scale.denormalize_input(x),
            y: scale.denormalize_label(y),
        })
        .collect()
}

/// The chart-ready output of one full pipeline pass.
#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle {
    pub scatter: Series,
    pub fitted_line: Series,
    pub training_history: Series,
}

/// Runs the whole pipeline once: fetch, clean, fit, chart.
///
/// The stages are strictly sequential; each one starts only when the
/// previous one has produced valid input. A result whose run was
/// superseded mid-flight is discarded with `Superseded`.
pub async fn run_pipeline(session: &Session, config: &PipelineConfig) -> Result<ChartBundle> {
    let records = source::fetch_records(&config.source_url).await?;

    let observations = clean::clean(&records, config.x_field, config.y_field);
    if observations.is_empty() {
        return Err(PipelineErr::EmptyDataset { stage: "clean" });
    }

    let run = submit_training(session, observations.clone(), config.training.clone())?;
    let token = run.token();
    let output = run.wait().await?;
    if !session.is_current(token) {
        return Err(PipelineErr::Superseded);
    }

    if let Some(last) = output.history.last() {
        info!(
            "fit finished: final loss {:.6}, final mse {:.6}",
            last.loss, last.mse
        );
    }

    let x_title = config.x_field.title();
    let y_title = config.y_field.title();
    Ok(ChartBundle {
        scatter: chart::scatter_series("cars", &observations, x_title, y_title)?,
        fitted_line: chart::prediction_series("fit", &output.predictions, x_title, y_title)?,
        training_history: chart::history_series("mse", &output.history),
    })
}
