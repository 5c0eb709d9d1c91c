use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartval", about = "Used-item resale valuation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a synthetic market dataset
    Generate {
        #[arg(long, default_value = "5000")]
        samples: usize,
        /// Seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
        /// Output CSV (defaults to SMARTVAL_DATA)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Train the estimator on a dataset and save the model
    Train {
        /// Input CSV (defaults to SMARTVAL_DATA)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Output model (defaults to SMARTVAL_MODEL)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value = "200")]
        trees: usize,
        #[arg(long)]
        max_depth: Option<usize>,
        /// Seed for the train/test split and bootstrap samples
        #[arg(long, default_value = "42")]
        seed: u64,
    },
    /// Value one item
    Predict {
        /// JSON with original_price, age, condition, brand_tier
        json: String,
    },
    /// Project an item's value over the coming years
    Forecast {
        /// JSON with original_price, age, condition, brand_tier
        json: String,
        #[arg(long, default_value = "5")]
        years: u32,
    },
    /// Show every logged valuation, oldest first
    History,
    /// Run the HTTP server
    Serve {
        /// Bind address (defaults to SMARTVAL_ADDR)
        #[arg(long)]
        addr: Option<String>,
    },
}
