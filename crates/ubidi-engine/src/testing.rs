// this_file: crates/ubidi-engine/src/testing.rs

//! ASCII stand-in classifier for unit tests.
//!
//! Lowercase letters are L, uppercase letters are R, digits are EN. Real
//! formatting characters keep their Unicode classes.

use std::sync::Arc;
use ubidi_core::{BidiClass, BidiClassifier, BracketType};

pub(crate) struct TestClassifier;

impl BidiClassifier for TestClassifier {
    fn bidi_class(&self, ch: char) -> BidiClass {
        match ch {
            'a'..='z' => BidiClass::L,
            'A'..='Z' => BidiClass::R,
            '0'..='9' => BidiClass::EN,
            '\u{0660}'..='\u{0669}' => BidiClass::AN,
            '\u{0627}' => BidiClass::AL,
            ' ' => BidiClass::WS,
            '\n' => BidiClass::B,
            '\t' => BidiClass::S,
            '+' | '-' => BidiClass::ES,
            '$' | '%' | '#' => BidiClass::ET,
            ',' | '.' | ':' | '/' => BidiClass::CS,
            '^' => BidiClass::NSM,
            '_' => BidiClass::BN,
            '\u{200E}' => BidiClass::L,
            '\u{200F}' => BidiClass::R,
            '\u{202A}' => BidiClass::LRE,
            '\u{202B}' => BidiClass::RLE,
            '\u{202C}' => BidiClass::PDF,
            '\u{202D}' => BidiClass::LRO,
            '\u{202E}' => BidiClass::RLO,
            '\u{2066}' => BidiClass::LRI,
            '\u{2067}' => BidiClass::RLI,
            '\u{2068}' => BidiClass::FSI,
            '\u{2069}' => BidiClass::PDI,
            '\u{10900}'..='\u{1091F}' => BidiClass::R,
            _ => BidiClass::ON,
        }
    }

    fn mirror(&self, ch: char) -> Option<char> {
        match ch {
            '(' => Some(')'),
            ')' => Some('('),
            '[' => Some(']'),
            ']' => Some('['),
            '{' => Some('}'),
            '}' => Some('{'),
            '<' => Some('>'),
            '>' => Some('<'),
            _ => None,
        }
    }

    fn bracket(&self, ch: char) -> BracketType {
        match ch {
            '(' => BracketType::Open(')'),
            '[' => BracketType::Open(']'),
            '{' => BracketType::Open('}'),
            ')' => BracketType::Close('('),
            ']' => BracketType::Close('['),
            '}' => BracketType::Close('{'),
            '\u{2329}' => BracketType::Open('\u{232A}'),
            '\u{232A}' => BracketType::Close('\u{2329}'),
            '\u{3008}' => BracketType::Open('\u{3009}'),
            '\u{3009}' => BracketType::Close('\u{3008}'),
            _ => BracketType::None,
        }
    }

    fn is_combining_mark(&self, ch: char) -> bool {
        ch == '^' || ('\u{0300}'..='\u{036F}').contains(&ch)
    }

    fn name(&self) -> &'static str {
        "test"
    }
}

pub(crate) fn classifier() -> Arc<dyn BidiClassifier> {
    Arc::new(TestClassifier)
}
