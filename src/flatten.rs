use crate::models::{Block, Input, Output, SpendingOutpoint, Transaction};

pub const JOIN_DELIMITER: &str = ";";

/// The block's one-to-many relations laid out as three independent row lists.
#[derive(Debug)]
pub struct Flattened<'a> {
    pub transactions: Vec<&'a Transaction>,
    /// All inputs, in transaction order then input order.
    pub inputs: Vec<&'a Input>,
    /// All outputs, in transaction order then output order.
    pub outputs: Vec<&'a Output>,
}

pub fn flatten(block: &Block) -> Flattened<'_> {
    Flattened {
        transactions: block.tx.iter().collect(),
        inputs: block.tx.iter().flat_map(|tx| tx.inputs.iter()).collect(),
        outputs: block.tx.iter().flat_map(|tx| tx.out.iter()).collect(),
    }
}

/// Semicolon-joined `tx_index` values; empty string for an empty list.
pub fn join_tx_indices(outpoints: &[SpendingOutpoint]) -> String {
    join(outpoints.iter().map(|so| so.tx_index.to_string()))
}

/// Semicolon-joined `n` values; empty string for an empty list.
pub fn join_positions(outpoints: &[SpendingOutpoint]) -> String {
    join(outpoints.iter().map(|so| so.n.to_string()))
}

pub fn join_strings(values: &[String]) -> String {
    values.join(JOIN_DELIMITER)
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(JOIN_DELIMITER)
}
