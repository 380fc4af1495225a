use serde::{Deserialize, Deserializer};

use crate::error::Result;

// Records decoded from the explorer's /rawblock JSON.
// Missing or null fields fall back to their type default; unknown fields are ignored.

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Block {
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ver: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_block: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mrkl_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub bits: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub next_block: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub fee: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub nonce: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub n_tx: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub size: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub block_index: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub main_chain: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub tx: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ver: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub vin_sz: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub vout_sz: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub size: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub fee: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub relayed_by: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lock_time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_index: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub double_spend: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub block_index: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub block_height: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub inputs: Vec<Input>,
    #[serde(deserialize_with = "null_as_default")]
    pub out: Vec<Output>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Input {
    #[serde(deserialize_with = "null_as_default")]
    pub sequence: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub witness: String,
    #[serde(deserialize_with = "null_as_default")]
    pub script: String,
    #[serde(deserialize_with = "null_as_default")]
    pub index: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_out: PrevOut,
}

/// The output an input spends, embedded inline by the explorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrevOut {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub spent: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub value: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub spending_outpoints: Vec<SpendingOutpoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub n: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_index: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub script: String,
    #[serde(deserialize_with = "null_as_default")]
    pub addr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Output {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub spent: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub value: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub spending_outpoints: Vec<SpendingOutpoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub n: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_index: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub script: String,
    #[serde(deserialize_with = "null_as_default")]
    pub addr: String,
}

/// A (tx_index, n) pair naming the input that consumed an output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpendingOutpoint {
    #[serde(deserialize_with = "null_as_default")]
    pub tx_index: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub n: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse the raw response body into a `Block`.
pub fn decode_block(raw: &str) -> Result<Block> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;

    #[test]
    fn decodes_nested_records() {
        let raw = r#"{
            "hash": "0000abc",
            "ver": 536870912,
            "time": 1700000000,
            "main_chain": true,
            "next_block": ["0000def"],
            "n_tx": 1,
            "tx": [{
                "hash": "tx1",
                "tx_index": 42,
                "inputs": [{
                    "sequence": 4294967295,
                    "script": "00",
                    "index": 0,
                    "prev_out": {
                        "type": 0,
                        "spent": true,
                        "value": 5000,
                        "spending_outpoints": [{"tx_index": 42, "n": 0}],
                        "n": 1,
                        "tx_index": 7,
                        "script": "76a9",
                        "addr": "1abc"
                    }
                }],
                "out": [{"type": 0, "value": 4000, "n": 0, "tx_index": 42, "spending_outpoints": []}]
            }]
        }"#;

        let block = decode_block(raw).unwrap();
        assert_eq!(block.hash, "0000abc");
        assert_eq!(block.ver, 536870912);
        assert!(block.main_chain);
        assert_eq!(block.next_block, vec!["0000def".to_string()]);
        assert_eq!(block.tx.len(), 1);

        let input = &block.tx[0].inputs[0];
        assert_eq!(input.sequence, 4294967295);
        assert_eq!(input.prev_out.value, 5000);
        assert_eq!(
            input.prev_out.spending_outpoints,
            vec![SpendingOutpoint { tx_index: 42, n: 0 }]
        );
        assert_eq!(block.tx[0].out[0].value, 4000);
    }

    #[test]
    fn missing_and_null_fields_take_defaults() {
        let raw = r#"{
            "hash": "0000abc",
            "next_block": null,
            "tx": [{
                "hash": "tx1",
                "inputs": [{"sequence": 1, "prev_out": null}],
                "out": [{"addr": null, "spending_outpoints": null}]
            }]
        }"#;

        let block = decode_block(raw).unwrap();
        assert!(block.next_block.is_empty());
        let input = &block.tx[0].inputs[0];
        assert_eq!(input.witness, "");
        assert_eq!(input.prev_out, PrevOut::default());
        assert_eq!(block.tx[0].out[0].addr, "");
        assert!(block.tx[0].out[0].spending_outpoints.is_empty());
    }

    #[test]
    fn null_scalars_take_defaults() {
        let raw = r#"{
            "hash": "0000abc",
            "fee": null,
            "main_chain": null,
            "tx": [{
                "ver": null,
                "double_spend": null,
                "inputs": [{
                    "index": null,
                    "prev_out": {"type": null, "value": null, "n": null, "spent": null}
                }],
                "out": [{
                    "type": null,
                    "value": null,
                    "n": null,
                    "spending_outpoints": [{"tx_index": null, "n": null}]
                }]
            }]
        }"#;

        let block = decode_block(raw).unwrap();
        assert_eq!(block.fee, 0);
        assert!(!block.main_chain);
        let tx = &block.tx[0];
        assert_eq!(tx.ver, 0);
        assert!(!tx.double_spend);
        assert_eq!(tx.inputs[0].index, 0);
        assert_eq!(tx.inputs[0].prev_out, PrevOut::default());
        assert_eq!(tx.out[0].value, 0);
        assert_eq!(tx.out[0].spending_outpoints, vec![SpendingOutpoint::default()]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let block = decode_block(r#"{"hash": "h", "fresh_field": {"x": 1}}"#).unwrap();
        assert_eq!(block.hash, "h");
    }

    #[test]
    fn malformed_json_is_decode_error() {
        assert!(matches!(
            decode_block("{\"hash\": "),
            Err(ExportError::Decode(_))
        ));
        assert!(matches!(
            decode_block(r#"{"tx": "not a list"}"#),
            Err(ExportError::Decode(_))
        ));
    }
}
