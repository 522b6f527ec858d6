// this_file: crates/ubidi-engine/src/text.rs

//! UTF-16 decoding helpers. Every public index counts UTF-16 code units.

use ubidi_core::{AnalysisStatus, BidiError, Result};

/// One decoded code point and its position in the code-unit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CodePoint {
    /// Decoded character; lone surrogates decode to U+FFFD
    pub ch: char,
    /// Set when the unit was an unpaired surrogate
    pub lone_surrogate: bool,
    /// Offset of the first code unit
    pub start: usize,
    /// Number of code units (1 or 2)
    pub len: usize,
}

/// Decode a code-unit buffer into code points.
pub(crate) fn decode(units: &[u16]) -> Result<Vec<CodePoint>> {
    let mut points = Vec::new();
    points
        .try_reserve_exact(units.len())
        .map_err(|_| BidiError::analysis(AnalysisStatus::MemoryAllocation))?;

    let mut start = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        let point = match decoded {
            Ok(ch) => CodePoint {
                ch,
                lone_surrogate: false,
                start,
                len: ch.len_utf16(),
            },
            Err(_) => CodePoint {
                ch: char::REPLACEMENT_CHARACTER,
                lone_surrogate: true,
                start,
                len: 1,
            },
        };
        start += point.len;
        points.push(point);
    }
    Ok(points)
}

/// Allocate a vector of `len` copies of `value`, reporting allocation failure.
pub(crate) fn filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| BidiError::analysis(AnalysisStatus::MemoryAllocation))?;
    out.resize(len, value);
    Ok(out)
}

/// Whether `unit` is the high half of a surrogate pair.
pub(crate) fn is_lead(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

/// Whether `unit` is the low half of a surrogate pair.
pub(crate) fn is_trail(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

/// Split `[start, limit)` into code-point spans `(start, len)`, keeping pairs whole.
pub(crate) fn spans(units: &[u16], start: usize, limit: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(limit - start);
    let mut i = start;
    while i < limit {
        let len = if is_lead(units[i]) && i + 1 < limit && is_trail(units[i + 1]) {
            2
        } else {
            1
        };
        out.push((i, len));
        i += len;
    }
    out
}

/// Code point starting at `index`, pairing surrogates when possible.
pub(crate) fn code_point_at(units: &[u16], index: usize) -> u32 {
    let unit = units[index];
    if is_lead(unit) {
        if let Some(&next) = units.get(index + 1) {
            if is_trail(next) {
                return 0x10000 + (((unit as u32) - 0xD800) << 10) + ((next as u32) - 0xDC00);
            }
        }
    }
    unit as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn test_decode_offsets() {
        let units = utf16("a\u{1F600}b");
        let points = decode(&units).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].start, 1);
        assert_eq!(points[1].len, 2);
        assert_eq!(points[2].start, 3);
    }

    #[test]
    fn test_decode_lone_surrogate() {
        let units = vec![0x61, 0xD800, 0x62];
        let points = decode(&units).unwrap();
        assert_eq!(points.len(), 3);
        assert!(points[1].lone_surrogate);
        assert_eq!(points[1].ch, char::REPLACEMENT_CHARACTER);
    }

    #[test]
    fn test_spans_keep_pairs() {
        let units = utf16("x\u{10900}y");
        assert_eq!(spans(&units, 0, units.len()), vec![(0, 1), (1, 2), (3, 1)]);
        assert_eq!(code_point_at(&units, 1), 0x10900);
    }
}
