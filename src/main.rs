use clap::Parser;
use smartval::application::generate_data::GeneratorConfig;
use smartval::application::train_model::TrainerConfig;
use smartval::cli::commands::{Cli, Commands};
use smartval::config::Config;
use smartval::domain::entities::item::ValuationRequest;
use smartval::infrastructure::http::create_router;
use smartval::infrastructure::model::random_forest::ForestParams;
use smartval::SmartVal;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env();

    if let Err(e) = run_command(config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(config: Config, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Generate { samples, seed, out } => {
            let out = out.unwrap_or(config.data_path);
            let generator = GeneratorConfig {
                samples,
                seed,
                ..GeneratorConfig::default()
            };
            let records = smartval::generate_dataset(generator, &out)?;
            println!("Generated {} market records into {}", records.len(), out.display());
        }
        Commands::Train {
            data,
            out,
            trees,
            max_depth,
            seed,
        } => {
            let data = data.unwrap_or(config.data_path);
            let out = out.unwrap_or(config.model_path);
            let trainer = TrainerConfig {
                forest: ForestParams {
                    n_trees: trees,
                    max_depth,
                    seed,
                    ..ForestParams::default()
                },
                ..TrainerConfig::default()
            };
            let artifact = smartval::train_model(trainer, &data, &out)?;
            println!("{}", serde_json::to_string_pretty(&artifact.report)?);
            println!("Model saved to {}", out.display());
        }
        Commands::Predict { json } => {
            let request: ValuationRequest = serde_json::from_str(&json)?;
            let sv = SmartVal::open(&config)?;
            let valuation = sv.predict(&request)?;
            println!("{}", serde_json::to_string_pretty(&valuation)?);
        }
        Commands::Forecast { json, years } => {
            let request: ValuationRequest = serde_json::from_str(&json)?;
            let sv = SmartVal::open(&config)?;
            let points = sv.forecast(&request, years)?;
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        Commands::History => {
            let sv = SmartVal::open(&config)?;
            let records = sv.history()?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.bind_addr.clone());
            let sv = Arc::new(SmartVal::open(&config)?);
            let app = create_router(sv);

            let listener = TcpListener::bind(addr.as_str()).await?;
            tracing::info!("Listening on {}", addr);
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}
