use crate::flatten::join_tx_indices;
use crate::models::{Input, Output, Transaction};

// Sanity probes over a decoded block. They only inform the log; nothing is rejected.

/// Longest spending-outpoint list across all prev-outs and outputs.
pub fn max_spending_outpoints(inputs: &[&Input], outputs: &[&Output]) -> usize {
    let from_inputs = inputs
        .iter()
        .map(|input| input.prev_out.spending_outpoints.len());
    let from_outputs = outputs.iter().map(|output| output.spending_outpoints.len());
    from_inputs.chain(from_outputs).max().unwrap_or(0)
}

/// True when every input's prev-out is recorded as spent by exactly the transaction holding it.
pub fn inputs_spent_by_own_tx(transactions: &[&Transaction]) -> bool {
    transactions.iter().all(|tx| {
        let own = tx.tx_index.to_string();
        tx.inputs
            .iter()
            .all(|input| join_tx_indices(&input.prev_out.spending_outpoints) == own)
    })
}
