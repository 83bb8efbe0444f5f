use std::error::Error;

use clap::Parser;
use eduhub::{
    catalog::HttpDegreeSource,
    fixtures::FixtureDirectory,
    models::{Args, Config, StoreKind},
    run_tool::run,
    store::{RealtimeStore, RestStore},
    timetable::Timetable,
};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    /* Setup logging, stdout is kept for the command output */
    env_logger::builder()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let config = Config::from_file(&args.config_json_path)?;
    info!(
        "Read config.json from {}",
        std::path::absolute(&args.config_json_path)?.display()
    );
    let directory = FixtureDirectory::from_args(&args)?;
    let timetable = Timetable::from_args(&args)?;
    let http_client = reqwest::Client::new();
    let degrees = HttpDegreeSource::new(http_client.clone(), &config.degrees_url);

    /* Run the command against the configured store */
    let lines = match config.store_kind {
        StoreKind::Realtime => {
            let store =
                RealtimeStore::new(http_client, &config.store_url, config.store_auth.clone())?;
            run(store, degrees, &directory, &timetable, &args).await?
        }
        StoreKind::Rest => {
            let store = RestStore::new(http_client, &config.store_url)?;
            run(store, degrees, &directory, &timetable, &args).await?
        }
    };
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
