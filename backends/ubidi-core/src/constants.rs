// this_file: backends/ubidi-core/src/constants.rs

//! Raw numeric constants shared with hosts.
//!
//! The values are stable and match the ones used by ICU's `ubidi` API, so
//! option records produced by other bidi consumers can be passed through as-is.

/// Paragraph or embedding level for left-to-right text.
pub const LTR: u8 = 0;
/// Paragraph or embedding level for right-to-left text.
pub const RTL: u8 = 1;
/// Paragraph level sentinel: first strong character decides, LTR when none.
pub const DEFAULT_LTR: u8 = 0xfe;
/// Paragraph level sentinel: first strong character decides, RTL when none.
pub const DEFAULT_RTL: u8 = 0xff;
/// Deepest explicit embedding level.
pub const MAX_EXPLICIT_LEVEL: u8 = 125;
/// Bit marking an explicit embedding level as a directional override.
pub const LEVEL_OVERRIDE: u8 = 0x80;
/// Index-map value for positions with no counterpart.
pub const MAP_NOWHERE: i32 = -1;

pub const DIRECTION_LTR: u8 = 0;
pub const DIRECTION_RTL: u8 = 1;
pub const DIRECTION_MIXED: u8 = 2;
pub const DIRECTION_NEUTRAL: u8 = 3;

/// Keep combining marks after their base character in reversed runs.
pub const KEEP_BASE_COMBINING: u16 = 1;
/// Replace characters at odd levels with their mirror glyph.
pub const DO_MIRRORING: u16 = 2;
/// Surround numeric run edges with LRM.
pub const INSERT_LRM_FOR_NUMERIC: u16 = 4;
/// Drop bidi control characters from the output.
pub const REMOVE_BIDI_CONTROLS: u16 = 8;
/// Emit the output in reverse order.
pub const OUTPUT_REVERSE: u16 = 16;

pub const REORDER_DEFAULT: u8 = 0;
pub const REORDER_NUMBERS_SPECIAL: u8 = 1;
pub const REORDER_GROUP_NUMBERS_WITH_R: u8 = 2;
pub const REORDER_RUNS_ONLY: u8 = 3;
pub const REORDER_INVERSE_NUMBERS_AS_L: u8 = 4;
pub const REORDER_INVERSE_LIKE_DIRECT: u8 = 5;
pub const REORDER_INVERSE_FOR_NUMBERS_SPECIAL: u8 = 6;
/// Number of reordering modes.
pub const REORDER_COUNT: u8 = 7;

pub const OPTION_DEFAULT: u8 = 0;
pub const OPTION_INSERT_MARKS: u8 = 1;
pub const OPTION_REMOVE_CONTROLS: u8 = 2;
pub const OPTION_STREAMING: u8 = 4;

/// All exported constants by name, in a stable order.
pub fn table() -> Vec<(&'static str, i64)> {
    vec![
        ("LTR", LTR as i64),
        ("RTL", RTL as i64),
        ("DEFAULT_LTR", DEFAULT_LTR as i64),
        ("DEFAULT_RTL", DEFAULT_RTL as i64),
        ("MAX_EXPLICIT_LEVEL", MAX_EXPLICIT_LEVEL as i64),
        ("LEVEL_OVERRIDE", LEVEL_OVERRIDE as i64),
        ("MAP_NOWHERE", MAP_NOWHERE as i64),
        ("DIRECTION_LTR", DIRECTION_LTR as i64),
        ("DIRECTION_RTL", DIRECTION_RTL as i64),
        ("DIRECTION_MIXED", DIRECTION_MIXED as i64),
        ("DIRECTION_NEUTRAL", DIRECTION_NEUTRAL as i64),
        ("KEEP_BASE_COMBINING", KEEP_BASE_COMBINING as i64),
        ("DO_MIRRORING", DO_MIRRORING as i64),
        ("INSERT_LRM_FOR_NUMERIC", INSERT_LRM_FOR_NUMERIC as i64),
        ("REMOVE_BIDI_CONTROLS", REMOVE_BIDI_CONTROLS as i64),
        ("OUTPUT_REVERSE", OUTPUT_REVERSE as i64),
        ("REORDER_DEFAULT", REORDER_DEFAULT as i64),
        ("REORDER_NUMBERS_SPECIAL", REORDER_NUMBERS_SPECIAL as i64),
        ("REORDER_GROUP_NUMBERS_WITH_R", REORDER_GROUP_NUMBERS_WITH_R as i64),
        ("REORDER_RUNS_ONLY", REORDER_RUNS_ONLY as i64),
        ("REORDER_INVERSE_NUMBERS_AS_L", REORDER_INVERSE_NUMBERS_AS_L as i64),
        ("REORDER_INVERSE_LIKE_DIRECT", REORDER_INVERSE_LIKE_DIRECT as i64),
        (
            "REORDER_INVERSE_FOR_NUMBERS_SPECIAL",
            REORDER_INVERSE_FOR_NUMBERS_SPECIAL as i64,
        ),
        ("REORDER_COUNT", REORDER_COUNT as i64),
        ("OPTION_DEFAULT", OPTION_DEFAULT as i64),
        ("OPTION_INSERT_MARKS", OPTION_INSERT_MARKS as i64),
        ("OPTION_REMOVE_CONTROLS", OPTION_REMOVE_CONTROLS as i64),
        ("OPTION_STREAMING", OPTION_STREAMING as i64),
    ]
}
