//! Fetch one block from a block-explorer `/rawblock` endpoint and flatten it
//! into four CSV tables: blocks, transactions, inputs and outputs.

pub mod checks;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod flatten;
pub mod models;
pub mod writer;

use log::{debug, info};

pub use config::{ExportConfig, OutputPaths};
pub use error::{ExportError, Result};
pub use fetcher::BlockFetcher;
pub use models::{Block, decode_block};

/// Data rows written to each table (headers not counted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub blocks: usize,
    pub transactions: usize,
    pub inputs: usize,
    pub outputs: usize,
}

/// Decode `raw` and write the four tables. Nothing is written unless decoding succeeds.
pub fn export_from_json(raw: &str, paths: &OutputPaths) -> Result<ExportSummary> {
    let block = decode_block(raw)?;
    info!("Decoded block {} with {} transactions", block.hash, block.tx.len());

    let flat = flatten::flatten(&block);
    debug!(
        "Longest spending-outpoint list: {}",
        checks::max_spending_outpoints(&flat.inputs, &flat.outputs)
    );
    debug!(
        "Every input spent by its own transaction: {}",
        checks::inputs_spent_by_own_tx(&flat.transactions)
    );

    writer::write_block_file(&paths.block, &block)?;
    writer::write_transactions_file(&paths.transactions, &flat.transactions)?;
    writer::write_inputs_file(&paths.inputs, &flat.inputs)?;
    writer::write_outputs_file(&paths.outputs, &flat.outputs)?;

    Ok(ExportSummary {
        blocks: 1,
        transactions: flat.transactions.len(),
        inputs: flat.inputs.len(),
        outputs: flat.outputs.len(),
    })
}

/// Full run: validate the hash, fetch the block, then export it.
pub async fn export_block(config: &ExportConfig) -> Result<ExportSummary> {
    config.validate()?;
    let fetcher = BlockFetcher::new(config.api_url.as_str());
    let raw = fetcher.fetch_raw_block(&config.block_hash).await?;
    export_from_json(&raw, &config.outputs)
}
