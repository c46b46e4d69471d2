use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One raw grid record as delivered on the wire: arbitrary named JSON values,
/// converted to typed scalars at the client boundary.
pub type RawRecord = BTreeMap<String, Value>;

/// The `/grid` endpoint answers either with a bare array of records or with
/// an envelope object carrying a `data` array; both shapes are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GridResponse {
    Records(Vec<RawRecord>),
    Envelope { data: Vec<RawRecord> },
}

impl GridResponse {
    pub fn into_records(self) -> Vec<RawRecord> {
        match self {
            GridResponse::Records(records) => records,
            GridResponse::Envelope { data } => data,
        }
    }
}
