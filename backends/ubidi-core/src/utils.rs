// this_file: backends/ubidi-core/src/utils.rs

//! Character helpers shared by the engine and its hosts.

/// LEFT-TO-RIGHT MARK
pub const LRM: char = '\u{200E}';
/// RIGHT-TO-LEFT MARK
pub const RLM: char = '\u{200F}';
/// ARABIC LETTER MARK
pub const ALM: char = '\u{061C}';

/// Whether a code point is a bidi control character.
///
/// Covers ZWNJ/ZWJ, the implicit marks, the embedding and override
/// controls, the isolate controls and ALM.
pub fn is_bidi_control(cp: u32) -> bool {
    matches!(cp, 0x200C..=0x200F | 0x202A..=0x202E | 0x2066..=0x2069 | 0x061C)
}

/// Mark inserted between runs of a paragraph at the given parity.
pub fn mark_for_level(rtl: bool) -> char {
    if rtl {
        RLM
    } else {
        LRM
    }
}
