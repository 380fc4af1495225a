use std::path::{Path, PathBuf};
use std::str::FromStr;

use bitcoin::BlockHash;

use crate::error::{ExportError, Result};

pub const DEFAULT_API_URL: &str = "https://blockchain.info";
pub const DEFAULT_BLOCK_HASH: &str =
    "00000000000000000001ef5340d312f07870d2ce14fecc2dade7a483c59c16b7";

/// Where the four tables are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub block: PathBuf,
    pub transactions: PathBuf,
    pub inputs: PathBuf,
    pub outputs: PathBuf,
}

impl OutputPaths {
    /// The default file names, rooted under `dir` instead of the working directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let defaults = Self::default();
        Self {
            block: dir.join(defaults.block),
            transactions: dir.join(defaults.transactions),
            inputs: dir.join(defaults.inputs),
            outputs: dir.join(defaults.outputs),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            block: PathBuf::from("block.csv"),
            transactions: PathBuf::from("transactions.csv"),
            inputs: PathBuf::from("inputs.csv"),
            outputs: PathBuf::from("outputs.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Explorer base URL; requests go to `{api_url}/rawblock/{block_hash}`.
    pub api_url: String,
    pub block_hash: String,
    pub outputs: OutputPaths,
}

impl ExportConfig {
    // Rejects anything that is not a 64-char hex block hash before we hit the network
    pub fn validate(&self) -> Result<BlockHash> {
        BlockHash::from_str(&self.block_hash)
            .map_err(|e| ExportError::InvalidBlockHash(format!("{}: {}", self.block_hash, e)))
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            block_hash: DEFAULT_BLOCK_HASH.to_string(),
            outputs: OutputPaths::default(),
        }
    }
}
