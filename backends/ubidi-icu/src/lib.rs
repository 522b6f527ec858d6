// this_file: backends/ubidi-icu/src/lib.rs

//! ICU4X-backed classifier supplying bidi class, mirroring, bracket pairs
//! and combining-mark information from compiled Unicode data.

use icu_properties::{
    bidi_data::{self, BidiAuxiliaryPropertiesBorrowed, BidiPairingProperties},
    maps::{self, CodePointMapDataBorrowed},
    BidiClass as IcuBidiClass, GeneralCategory,
};
use once_cell::sync::Lazy;
use std::sync::Arc;
use ubidi_core::{BidiClass, BidiClassifier, BracketType};

static SHARED: Lazy<Arc<IcuClassifier>> = Lazy::new(|| {
    log::debug!(target: "ubidi::icu", "Loading compiled bidi property data");
    Arc::new(IcuClassifier::new())
});

/// Classifier over ICU4X compiled property data.
pub struct IcuClassifier {
    bidi_map: CodePointMapDataBorrowed<'static, IcuBidiClass>,
    category_map: CodePointMapDataBorrowed<'static, GeneralCategory>,
    auxiliary: BidiAuxiliaryPropertiesBorrowed<'static>,
}

impl IcuClassifier {
    pub fn new() -> Self {
        Self {
            bidi_map: maps::bidi_class(),
            category_map: maps::general_category(),
            auxiliary: bidi_data::bidi_auxiliary_properties(),
        }
    }

    /// Process-wide instance.
    pub fn shared() -> Arc<IcuClassifier> {
        Arc::clone(&SHARED)
    }

    /// Process-wide instance as a trait object.
    pub fn shared_dyn() -> Arc<dyn BidiClassifier> {
        Self::shared()
    }
}

impl Default for IcuClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn map_class(class: IcuBidiClass) -> BidiClass {
    match class {
        IcuBidiClass::LeftToRight => BidiClass::L,
        IcuBidiClass::RightToLeft => BidiClass::R,
        IcuBidiClass::ArabicLetter => BidiClass::AL,
        IcuBidiClass::EuropeanNumber => BidiClass::EN,
        IcuBidiClass::EuropeanSeparator => BidiClass::ES,
        IcuBidiClass::EuropeanTerminator => BidiClass::ET,
        IcuBidiClass::ArabicNumber => BidiClass::AN,
        IcuBidiClass::CommonSeparator => BidiClass::CS,
        IcuBidiClass::NonspacingMark => BidiClass::NSM,
        IcuBidiClass::BoundaryNeutral => BidiClass::BN,
        IcuBidiClass::ParagraphSeparator => BidiClass::B,
        IcuBidiClass::SegmentSeparator => BidiClass::S,
        IcuBidiClass::WhiteSpace => BidiClass::WS,
        IcuBidiClass::OtherNeutral => BidiClass::ON,
        IcuBidiClass::LeftToRightEmbedding => BidiClass::LRE,
        IcuBidiClass::LeftToRightOverride => BidiClass::LRO,
        IcuBidiClass::RightToLeftEmbedding => BidiClass::RLE,
        IcuBidiClass::RightToLeftOverride => BidiClass::RLO,
        IcuBidiClass::PopDirectionalFormat => BidiClass::PDF,
        IcuBidiClass::LeftToRightIsolate => BidiClass::LRI,
        IcuBidiClass::RightToLeftIsolate => BidiClass::RLI,
        IcuBidiClass::FirstStrongIsolate => BidiClass::FSI,
        IcuBidiClass::PopDirectionalIsolate => BidiClass::PDI,
        // Unassigned values in future data; UAX #9 defaults unknown characters to L.
        _ => BidiClass::L,
    }
}

impl BidiClassifier for IcuClassifier {
    fn bidi_class(&self, ch: char) -> BidiClass {
        map_class(self.bidi_map.get(ch))
    }

    fn mirror(&self, ch: char) -> Option<char> {
        self.auxiliary
            .get32_mirroring_props(ch as u32)
            .mirroring_glyph
    }

    fn bracket(&self, ch: char) -> BracketType {
        match self.auxiliary.get32_pairing_props(ch as u32) {
            BidiPairingProperties::Open(pair) => BracketType::Open(pair),
            BidiPairingProperties::Close(pair) => BracketType::Close(pair),
            _ => BracketType::None,
        }
    }

    fn is_combining_mark(&self, ch: char) -> bool {
        matches!(
            self.category_map.get(ch),
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
        )
    }

    fn name(&self) -> &'static str {
        "icu4x"
    }
}
