use std::env;

use log::info;

use pipeline::{
    config::PipelineConfig,
    run::{Session, run_pipeline},
};

#[tokio::main]
async fn main() -> pipeline::Result<()> {
    env_logger::init();

    let mut config = PipelineConfig::default();
    if let Ok(url) = env::var("CARS_DATA_URL") {
        config.source_url = url;
    }
    info!("running the pipeline against {}", config.source_url);

    let session = Session::new();
    let bundle = run_pipeline(&session, &config).await?;

    // Hand-off boundary: emit the chart payload for whatever widget
    // renders it.
    println!("{}", serde_json::to_string_pretty(&bundle)?);

    Ok(())
}
