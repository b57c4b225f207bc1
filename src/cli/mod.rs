pub mod commands;

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::extractor::{ModelPolicy, PriceFormat};
use crate::fetcher::Strategy;

#[derive(Parser, Debug)]
#[command(name = "momo-scraper")]
#[command(about = "Search momo and print product listings as framed JSON", long_about = None)]
pub struct Cli {
    /// Search keyword
    pub keyword: String,

    /// Maximum number of products to return
    pub max_results: usize,

    /// Fetch strategy (overrides the config file)
    #[arg(short, long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Path to a config file (default: ~/.config/momo-scraper/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of result pages to fetch
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Output format of the price field
    #[arg(long, value_enum)]
    pub price_format: Option<PriceFormat>,

    /// How the product model field is filled in
    #[arg(long, value_enum)]
    pub model_policy: Option<ModelPolicy>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(strategy) = self.strategy {
            config.fetch.strategy = strategy;
        }
        if let Some(max_pages) = self.max_pages {
            config.fetch.max_pages = max_pages;
        }
        if let Some(price_format) = self.price_format {
            config.extract.price_format = price_format;
        }
        if let Some(model_policy) = self.model_policy {
            config.extract.model_policy = model_policy;
        }
    }
}
