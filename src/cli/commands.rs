use std::io::{self, Write};

use crate::app::AppContext;
use crate::config::Config;
use crate::domain::ProductRecord;

pub const DATA_START: &str = "=== DATA_START ===";
pub const DATA_END: &str = "=== DATA_END ===";

/// Build a context from `config`, search, and shut down.
///
/// Never fails: setup errors are logged and yield no records.
pub async fn run(config: Config, keyword: &str, max_results: usize) -> Vec<ProductRecord> {
    if max_results == 0 {
        return Vec::new();
    }

    let ctx = match AppContext::new(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to set up scraper: {}", e);
            return Vec::new();
        }
    };

    let records = search(&ctx, keyword, max_results).await;
    ctx.shutdown().await;
    records
}

pub async fn search(ctx: &AppContext, keyword: &str, max_results: usize) -> Vec<ProductRecord> {
    let outcome = ctx.paginator.search(keyword, max_results).await;
    outcome.records
}

/// Print records as one JSON line framed by the sentinel lines.
pub fn write_payload<W: Write>(out: &mut W, records: &[ProductRecord]) -> io::Result<()> {
    let json = match serde_json::to_string(records) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize records: {}", e);
            "[]".to_string()
        }
    };

    writeln!(out, "{}", DATA_START)?;
    writeln!(out, "{}", json)?;
    writeln!(out, "{}", DATA_END)?;
    out.flush()
}
