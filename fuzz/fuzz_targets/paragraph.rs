// this_file: fuzz/fuzz_targets/paragraph.rs

#![no_main]

use libfuzzer_sys::fuzz_target;
use ubidi::{
    BidiConfig, BidiUnit, Paragraph, ParaLevel, ReorderingMode, ReorderingOptions, WriteOptions,
};

fuzz_target!(|data: &[u8]| {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let units: Vec<u16> = rest
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let para_level = match head & 0x3 {
        0 => ParaLevel::DefaultLtr,
        1 => ParaLevel::DefaultRtl,
        _ => ParaLevel::from_raw(head >> 2 & 0x7f).unwrap_or_default(),
    };
    let mode = ReorderingMode::from_raw((head >> 2) % 7).unwrap_or_default();
    let config = BidiConfig::new()
        .with_para_level(para_level)
        .with_reordering_mode(mode)
        .with_reordering_options(ReorderingOptions::from_bits_truncate(head >> 5));

    let Ok(paragraph) = Paragraph::from_utf16(units, config, ubidi::IcuClassifier::shared_dyn())
    else {
        return;
    };

    let total: usize = paragraph.visual_runs().iter().map(|run| run.length).sum();
    assert_eq!(total, paragraph.processed_length());

    for logical in 0..paragraph.processed_length() {
        if let Some(visual) = paragraph.visual_index(logical).unwrap() {
            assert_eq!(paragraph.logical_index(visual).unwrap(), Some(logical));
        }
    }

    let written = paragraph.write_reordered_utf16(WriteOptions::from_bits_truncate(u16::from(head)));
    assert!(written.len() <= paragraph.length() + paragraph.result_length() + 2 * paragraph.count_runs());

    if let Some(info) = paragraph.paragraphs().first() {
        let mid = info.start + (info.limit - info.start) / 2;
        if let Ok(line) = paragraph.line(info.start, mid.max(info.start + 1)) {
            let total: usize = line.visual_runs().iter().map(|run| run.length).sum();
            assert_eq!(total, line.length());
            let _ = line.write_reordered_utf16(WriteOptions::all());
        }
    }
});
