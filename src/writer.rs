use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;
use serde::{Serialize, Serializer};

use crate::error::{ExportError, Result};
use crate::flatten::{join_positions, join_strings, join_tx_indices};
use crate::models::{Block, Input, Output, Transaction};

// Column names and order are a compatibility contract with existing consumers.

pub const BLOCK_COLUMNS: [&str; 15] = [
    "hash",
    "ver",
    "prev_block",
    "mrkl_root",
    "time",
    "bits",
    "next_block",
    "fee",
    "nonce",
    "n_tx",
    "size",
    "block_index",
    "main_chain",
    "height",
    "weight",
];

pub const TRANSACTION_COLUMNS: [&str; 14] = [
    "hash",
    "ver",
    "vin_sz",
    "vout_sz",
    "size",
    "weight",
    "fee",
    "relayed_by",
    "lock_time",
    "tx_index",
    "double_spend",
    "time",
    "block_index",
    "block_height",
];

pub const INPUT_COLUMNS: [&str; 13] = [
    "sequence",
    "witness",
    "script",
    "index",
    "po_type",
    "po_spent",
    "po_value",
    "po_so_tx_index",
    "po_so_n",
    "po_n",
    "po_tx_index",
    "po_script",
    "po_addr",
];

pub const OUTPUT_COLUMNS: [&str; 9] = [
    "type",
    "spent",
    "value",
    "so_tx_index",
    "so_n",
    "n",
    "tx_index",
    "script",
    "addr",
];

// Row records: field order mirrors the column arrays above.

#[derive(Serialize)]
struct BlockRow<'a> {
    hash: &'a str,
    ver: u32,
    prev_block: &'a str,
    mrkl_root: &'a str,
    time: u64,
    bits: u32,
    next_block: String,
    fee: u64,
    nonce: u64,
    n_tx: u32,
    size: u32,
    block_index: u64,
    #[serde(serialize_with = "capitalized_bool")]
    main_chain: bool,
    height: u32,
    weight: u32,
}

impl<'a> From<&'a Block> for BlockRow<'a> {
    fn from(block: &'a Block) -> Self {
        BlockRow {
            hash: &block.hash,
            ver: block.ver,
            prev_block: &block.prev_block,
            mrkl_root: &block.mrkl_root,
            time: block.time,
            bits: block.bits,
            next_block: join_strings(&block.next_block),
            fee: block.fee,
            nonce: block.nonce,
            n_tx: block.n_tx,
            size: block.size,
            block_index: block.block_index,
            main_chain: block.main_chain,
            height: block.height,
            weight: block.weight,
        }
    }
}

#[derive(Serialize)]
struct TransactionRow<'a> {
    hash: &'a str,
    ver: u32,
    vin_sz: u32,
    vout_sz: u32,
    size: u32,
    weight: u32,
    fee: u64,
    relayed_by: &'a str,
    lock_time: u64,
    tx_index: u64,
    #[serde(serialize_with = "capitalized_bool")]
    double_spend: bool,
    time: u64,
    block_index: u64,
    block_height: u64,
}

impl<'a> From<&'a Transaction> for TransactionRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        TransactionRow {
            hash: &tx.hash,
            ver: tx.ver,
            vin_sz: tx.vin_sz,
            vout_sz: tx.vout_sz,
            size: tx.size,
            weight: tx.weight,
            fee: tx.fee,
            relayed_by: &tx.relayed_by,
            lock_time: tx.lock_time,
            tx_index: tx.tx_index,
            double_spend: tx.double_spend,
            time: tx.time,
            block_index: tx.block_index,
            block_height: tx.block_height,
        }
    }
}

#[derive(Serialize)]
struct InputRow<'a> {
    sequence: u64,
    witness: &'a str,
    script: &'a str,
    index: u64,
    po_type: u32,
    #[serde(serialize_with = "capitalized_bool")]
    po_spent: bool,
    po_value: u64,
    po_so_tx_index: String,
    po_so_n: String,
    po_n: u64,
    po_tx_index: u64,
    po_script: &'a str,
    po_addr: &'a str,
}

impl<'a> From<&'a Input> for InputRow<'a> {
    fn from(input: &'a Input) -> Self {
        let prev_out = &input.prev_out;
        InputRow {
            sequence: input.sequence,
            witness: &input.witness,
            script: &input.script,
            index: input.index,
            po_type: prev_out.kind,
            po_spent: prev_out.spent,
            po_value: prev_out.value,
            po_so_tx_index: join_tx_indices(&prev_out.spending_outpoints),
            po_so_n: join_positions(&prev_out.spending_outpoints),
            po_n: prev_out.n,
            po_tx_index: prev_out.tx_index,
            po_script: &prev_out.script,
            po_addr: &prev_out.addr,
        }
    }
}

#[derive(Serialize)]
struct OutputRow<'a> {
    #[serde(rename = "type")]
    kind: u32,
    #[serde(serialize_with = "capitalized_bool")]
    spent: bool,
    value: u64,
    so_tx_index: String,
    so_n: String,
    n: u64,
    tx_index: u64,
    script: &'a str,
    addr: &'a str,
}

impl<'a> From<&'a Output> for OutputRow<'a> {
    fn from(output: &'a Output) -> Self {
        OutputRow {
            kind: output.kind,
            spent: output.spent,
            value: output.value,
            so_tx_index: join_tx_indices(&output.spending_outpoints),
            so_n: join_positions(&output.spending_outpoints),
            n: output.n,
            tx_index: output.tx_index,
            script: &output.script,
            addr: &output.addr,
        }
    }
}

fn capitalized_bool<S: Serializer>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

// Header first, then one record per row. The header is written even with no rows.
fn write_rows<W, R>(sink: W, columns: &[&str], rows: impl IntoIterator<Item = R>) -> csv::Result<()>
where
    W: Write,
    R: Serialize,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_block<W: Write>(sink: W, block: &Block) -> csv::Result<()> {
    write_rows(sink, &BLOCK_COLUMNS, [BlockRow::from(block)])
}

pub fn write_transactions<W: Write>(sink: W, transactions: &[&Transaction]) -> csv::Result<()> {
    write_rows(
        sink,
        &TRANSACTION_COLUMNS,
        transactions.iter().map(|tx| TransactionRow::from(*tx)),
    )
}

pub fn write_inputs<W: Write>(sink: W, inputs: &[&Input]) -> csv::Result<()> {
    write_rows(
        sink,
        &INPUT_COLUMNS,
        inputs.iter().map(|input| InputRow::from(*input)),
    )
}

pub fn write_outputs<W: Write>(sink: W, outputs: &[&Output]) -> csv::Result<()> {
    write_rows(
        sink,
        &OUTPUT_COLUMNS,
        outputs.iter().map(|output| OutputRow::from(*output)),
    )
}

// Creates or truncates `path`; the handle is dropped when `write` returns, success or not.
fn to_file(path: &Path, write: impl FnOnce(File) -> csv::Result<()>) -> Result<()> {
    debug!("Writing {}", path.display());
    let file = File::create(path).map_err(|e| ExportError::write(path, e))?;
    write(file).map_err(|e| ExportError::write(path, e))
}

pub fn write_block_file(path: &Path, block: &Block) -> Result<()> {
    to_file(path, |file| write_block(file, block))
}

pub fn write_transactions_file(path: &Path, transactions: &[&Transaction]) -> Result<()> {
    to_file(path, |file| write_transactions(file, transactions))
}

pub fn write_inputs_file(path: &Path, inputs: &[&Input]) -> Result<()> {
    to_file(path, |file| write_inputs(file, inputs))
}

pub fn write_outputs_file(path: &Path, outputs: &[&Output]) -> Result<()> {
    to_file(path, |file| write_outputs(file, outputs))
}
