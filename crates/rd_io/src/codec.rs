//! Share-payload codec: the full unit→region assignment as a run-length string.
//!
//! Grammar: `token+`, `token = digit* symbol`. Symbols are `a..z A..Z`; symbol
//! `i < 51` names region index `i`, symbol 51 (`'Z'`) means unassigned.
//! Units carry no ids on the wire: position `i` is the `i`-th unit in ascending
//! id order, on both the encode and the decode side.
//!
//! Decoding never fails hard. A malformed payload decodes to the all-unassigned
//! mapping; a length mismatch applies the overlap. Both are reported as warnings.

use rd_core::{RegionKey, UnitId, REGION_COUNT};
use thiserror::Error;
use tracing::warn;

pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Symbol index meaning "unassigned".
pub const SENTINEL_INDEX: usize = REGION_COUNT;

/// One `(unit id, region)` pair of an assignment snapshot.
pub type Assignment = (UnitId, Option<RegionKey>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("empty payload")]
    Empty,
    #[error("digit run without a symbol at end of payload")]
    DanglingCount,
    #[error("unknown symbol {symbol:?} at offset {offset}")]
    UnknownSymbol { symbol: char, offset: usize },
}

/// Non-fatal findings of a decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeWarning {
    /// Payload was rejected; the mapping is all-unassigned.
    #[error("share payload ignored: {0}")]
    MalformedPayload(CodecError),
    /// Expansion length differs from the known unit count.
    #[error("share payload covers {decoded} units, dataset has {units}")]
    LengthMismatch { units: usize, decoded: u64 },
}

/// Decode result: `regions[i]` applies to the `i`-th unit in id order.
/// `regions.len() <= unit_count`; trailing units beyond it keep their assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub regions: Vec<Option<RegionKey>>,
    pub warnings: Vec<DecodeWarning>,
}

impl Decoded {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[inline]
pub fn symbol_for(region: Option<RegionKey>) -> char {
    let i = region.map_or(SENTINEL_INDEX, RegionKey::index);
    ALPHABET[i] as char
}

/// `Some(None)` for the sentinel; `None` for characters outside the alphabet.
pub fn region_for(symbol: char) -> Option<Option<RegionKey>> {
    let i = ALPHABET.iter().position(|&b| b as char == symbol)?;
    if i == SENTINEL_INDEX {
        Some(None)
    } else {
        RegionKey::from_index(i).map(Some)
    }
}

/// Encode a snapshot. Pairs are sorted by unit id (stable) before encoding.
pub fn encode(snapshot: &[Assignment]) -> String {
    let mut sorted: Vec<Assignment> = snapshot.to_vec();
    sorted.sort_by_key(|(id, _)| *id);
    encode_ordered(sorted.into_iter().map(|(_, r)| r))
}

/// Encode regions that are already in ascending unit-id order.
pub fn encode_ordered<I>(regions: I) -> String
where
    I: IntoIterator<Item = Option<RegionKey>>,
{
    let mut out = String::new();
    let mut run: Option<(char, u64)> = None;
    for r in regions {
        let sym = symbol_for(r);
        run = match run {
            Some((cur, k)) if cur == sym => Some((cur, k + 1)),
            Some((cur, k)) => {
                push_token(&mut out, cur, k);
                Some((sym, 1))
            }
            None => Some((sym, 1)),
        };
    }
    if let Some((cur, k)) = run {
        push_token(&mut out, cur, k);
    }
    out
}

fn push_token(out: &mut String, sym: char, k: u64) {
    if k > 1 {
        out.push_str(&k.to_string());
    }
    out.push(sym);
}

/// Strictly parse a payload into `(count, region)` runs.
pub fn parse_runs(payload: &str) -> Result<Vec<(u64, Option<RegionKey>)>, CodecError> {
    if payload.is_empty() {
        return Err(CodecError::Empty);
    }
    let mut runs = Vec::new();
    let mut pending: Option<u64> = None;
    for (offset, ch) in payload.chars().enumerate() {
        if let Some(d) = ch.to_digit(10) {
            let acc = pending.unwrap_or(0);
            pending = Some(acc.saturating_mul(10).saturating_add(d as u64));
            continue;
        }
        let region = region_for(ch).ok_or(CodecError::UnknownSymbol { symbol: ch, offset })?;
        // An absent count means 1; an explicit "0" means zero copies.
        runs.push((pending.take().unwrap_or(1), region));
    }
    if pending.is_some() {
        return Err(CodecError::DanglingCount);
    }
    Ok(runs)
}

/// Decode `payload` against `unit_count` known units.
pub fn decode(payload: &str, unit_count: usize) -> Decoded {
    let runs = match parse_runs(payload) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "malformed share payload; using all-unassigned mapping");
            return Decoded {
                regions: vec![None; unit_count],
                warnings: vec![DecodeWarning::MalformedPayload(e)],
            };
        }
    };

    let mut regions = Vec::with_capacity(unit_count);
    let mut expanded: u64 = 0;
    for (count, region) in runs {
        expanded = expanded.saturating_add(count);
        let room = (unit_count - regions.len()) as u64;
        let take = count.min(room) as usize;
        regions.extend(std::iter::repeat(region).take(take));
    }

    let mut warnings = Vec::new();
    if expanded != unit_count as u64 {
        warn!(units = unit_count, decoded = expanded, "share payload length mismatch");
        warnings.push(DecodeWarning::LengthMismatch { units: unit_count, decoded: expanded });
    }
    Decoded { regions, warnings }
}
