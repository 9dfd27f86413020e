//! Strict JSON encoding of [`LogDiff`].
//!
//! ```json
//! {"ops": [<op>, ...],
//!  "positions": [{"from": ["file", 0, 10], "log": "p1", "to": ["file", 0, 42]}]}
//! ```
//!
//! Position entries are written in partition-name order. Decoding rejects
//! unknown or missing fields at every level, duplicate partitions, and
//! positions that are not `[string, u32, i64]` triples. An unknown
//! top-level field is reported as [`CodecError::UnknownField`]; other shape
//! errors come back as [`CodecError::Json`].
//!
//! # Examples
//!
//! ```
//! use multilog_core::{LogFile, Position};
//! use multilog_ot::{JsonCodec, LogDiff, LogDiffCodec};
//!
//! let codec: LogDiffCodec<JsonCodec<i64>> = LogDiffCodec::json();
//! let diff = LogDiff::for_single_position(
//!     "p1",
//!     Position::initial(),
//!     Position::new(LogFile::new("f", 0), 42),
//!     vec![7i64],
//! );
//! let text = codec.encode_to_string(&diff).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"ops":[7],"positions":[{"from":["",0,0],"log":"p1","to":["f",0,42]}]}"#
//! );
//! assert_eq!(codec.decode_str(&text).unwrap(), diff);
//! ```

use std::collections::BTreeMap;

use multilog_core::constants::{WIRE_OPS, WIRE_POSITIONS};
use multilog_core::errors::CodecError;
use multilog_core::Position;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain_codec::{DomainCodec, JsonCodec};
use crate::log_diff::LogDiff;
use crate::position_diff::PositionDiff;

const ROOT: &str = "$";

#[derive(Serialize)]
struct EncodedDiff<'a> {
    positions: Vec<EncodedEntry<'a>>,
    ops: Vec<Value>,
}

#[derive(Serialize)]
struct EncodedEntry<'a> {
    log: &'a str,
    from: &'a Position,
    to: &'a Position,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WireDiff {
    positions: Vec<WireEntry>,
    ops: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WireEntry {
    log: String,
    from: Position,
    to: Position,
}

#[derive(Debug, Clone, Default)]
pub struct LogDiffCodec<C> {
    domain: C,
}

impl<D> LogDiffCodec<JsonCodec<D>> {
    /// Codec whose ops use their own serde representation.
    pub fn json() -> Self {
        Self::new(JsonCodec::new())
    }
}

impl<C> LogDiffCodec<C> {
    pub fn new(domain: C) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &C {
        &self.domain
    }

    pub fn encode<D>(&self, diff: &LogDiff<D>) -> Result<Value, CodecError>
    where
        C: DomainCodec<D>,
    {
        let positions = diff
            .positions()
            .iter()
            .map(|(partition, position_diff)| EncodedEntry {
                log: partition,
                from: position_diff.from(),
                to: position_diff.to(),
            })
            .collect();
        let ops = diff
            .ops()
            .iter()
            .map(|op| self.domain.encode(op))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(serde_json::to_value(EncodedDiff { positions, ops })?)
    }

    pub fn encode_to_string<D>(&self, diff: &LogDiff<D>) -> Result<String, CodecError>
    where
        C: DomainCodec<D>,
    {
        Ok(serde_json::to_string(&self.encode(diff)?)?)
    }

    pub fn decode<D>(&self, value: Value) -> Result<LogDiff<D>, CodecError>
    where
        C: DomainCodec<D>,
    {
        let Value::Object(object) = value else {
            return Err(CodecError::UnexpectedType {
                path: ROOT.to_string(),
                expected: "object",
            });
        };
        if let Some(field) = object
            .keys()
            .find(|key| ![WIRE_POSITIONS, WIRE_OPS].contains(&key.as_str()))
        {
            return Err(CodecError::UnknownField {
                path: ROOT.to_string(),
                field: field.clone(),
            });
        }
        let wire: WireDiff = serde_json::from_value(Value::Object(object))?;

        let mut positions = BTreeMap::new();
        for entry in wire.positions {
            if positions.contains_key(&entry.log) {
                return Err(CodecError::DuplicatePartition(entry.log));
            }
            positions.insert(entry.log, PositionDiff::new(entry.from, entry.to));
        }

        let ops = wire
            .ops
            .into_iter()
            .enumerate()
            .map(|(index, op)| {
                self.domain.decode(op).map_err(|e| CodecError::Domain {
                    path: format!("{ROOT}.{WIRE_OPS}[{index}]"),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LogDiff::new(positions, ops))
    }

    pub fn decode_str<D>(&self, text: &str) -> Result<LogDiff<D>, CodecError>
    where
        C: DomainCodec<D>,
    {
        self.decode(serde_json::from_str(text)?)
    }
}
