// this_file: crates/ubidi-engine/src/resolver.rs

//! Unicode Bidirectional Algorithm (UAX #9) level resolution.
//!
//! Works on decoded code points. The caller expands the per-character levels
//! to code units. Rules P1-P3, X1-X10, W1-W7, N0-N2, I1-I2 and the
//! separator/whitespace part of L1 are applied here.

use crate::text;
use ubidi_core::constants::LEVEL_OVERRIDE;
use ubidi_core::{
    BidiClass, BidiClassifier, BracketType, Level, ParaLevel, ReorderingMode, Result,
};

/// Deepest explicit embedding level.
const MAX_DEPTH: u8 = ubidi_core::constants::MAX_EXPLICIT_LEVEL;
/// Bracket pairs tracked per isolating run sequence.
const BRACKET_STACK_LIMIT: usize = 63;
const NONE: usize = usize::MAX;

/// Strong context taken from text surrounding the analyzed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Context {
    /// Level implied by the first strong character of the prologue's last paragraph
    pub prologue_level: Option<u8>,
    /// Last strong direction of the prologue's last paragraph (L or R)
    pub prologue_strong: Option<BidiClass>,
    /// First strong direction of the epilogue's first paragraph (L or R)
    pub epilogue_strong: Option<BidiClass>,
}

impl Context {
    pub fn new(prologue: &[BidiClass], epilogue: &[BidiClass]) -> Self {
        let tail = prologue
            .iter()
            .rposition(|&class| class == BidiClass::B)
            .map_or(0, |pos| pos + 1);
        let head = epilogue
            .iter()
            .position(|&class| class == BidiClass::B)
            .unwrap_or(epilogue.len());

        Self {
            prologue_level: first_strong(prologue, tail, prologue.len()).map(strong_level),
            prologue_strong: prologue[tail..].iter().rev().find_map(|&c| context_strong(c)),
            epilogue_strong: epilogue[..head].iter().find_map(|&c| context_strong(c)),
        }
    }
}

pub(crate) struct ResolveRequest<'a> {
    pub chars: &'a [char],
    /// Original classes, one per character
    pub classes: &'a [BidiClass],
    pub classifier: &'a dyn BidiClassifier,
    pub para_level: ParaLevel,
    pub mode: ReorderingMode,
    pub reorder_paragraphs_ltr: bool,
    pub context: Context,
    /// Caller-supplied levels, one per character
    pub embedding_levels: Option<&'a [u8]>,
}

/// Character range of one paragraph and its resolved level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParagraphSpan {
    pub start: usize,
    pub limit: usize,
    pub level: Level,
}

#[derive(Debug)]
pub(crate) struct Resolution {
    /// One level per character
    pub levels: Vec<Level>,
    pub paragraphs: Vec<ParagraphSpan>,
    /// Level of the first paragraph, or of an empty text
    pub para_level: Level,
}

/// Resolve embedding levels for every paragraph of the text.
pub(crate) fn resolve(request: &ResolveRequest<'_>) -> Result<Resolution> {
    let len = request.chars.len();
    let mut types = text::filled(len, BidiClass::L)?;
    types.copy_from_slice(request.classes);

    if request.mode == ReorderingMode::InverseNumbersAsL {
        for class in types.iter_mut().filter(|class| class.is_number()) {
            *class = BidiClass::L;
        }
    }

    let mut levels = text::filled(len, 0u8)?;
    let mut paragraphs = Vec::new();

    // P1: Split into paragraphs; the separator stays with the preceding one
    let mut start = 0;
    while start < len {
        let limit = request.classes[start..]
            .iter()
            .position(|&class| class == BidiClass::B)
            .map_or(len, |pos| start + pos + 1);
        let bounds = Bounds {
            start,
            limit,
            first: paragraphs.is_empty(),
            last: limit == len && request.classes[len - 1] != BidiClass::B,
        };
        let level = resolve_paragraph(request, &mut types, &mut levels, bounds);
        paragraphs.push(ParagraphSpan {
            start,
            limit,
            level: Level::clamped(level),
        });
        start = limit;
    }

    let para_level = match paragraphs.first() {
        Some(first) => first.level,
        None => Level::clamped(paragraph_level(request, Bounds::empty())),
    };

    Ok(Resolution {
        levels: levels.into_iter().map(Level::clamped).collect(),
        paragraphs,
        para_level,
    })
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    start: usize,
    limit: usize,
    /// First paragraph of the text, preceded by the prologue
    first: bool,
    /// Last paragraph of the text and not closed by a separator, followed by the epilogue
    last: bool,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            start: 0,
            limit: 0,
            first: true,
            last: true,
        }
    }
}

/// P2-P3: Paragraph level from the request, the prologue or the first strong character.
fn paragraph_level(request: &ResolveRequest<'_>, bounds: Bounds) -> u8 {
    match request.para_level {
        ParaLevel::Explicit(level) => level.number(),
        default => bounds
            .first
            .then_some(request.context.prologue_level)
            .flatten()
            .or_else(|| first_strong(request.classes, bounds.start, bounds.limit).map(strong_level))
            .unwrap_or_else(|| default.fallback().number()),
    }
}

fn resolve_paragraph(
    request: &ResolveRequest<'_>,
    types: &mut [BidiClass],
    levels: &mut [u8],
    bounds: Bounds,
) -> u8 {
    let classes = request.classes;
    let para_level = paragraph_level(request, bounds);
    let isolates = IsolatePairs::new(classes, bounds.start, bounds.limit);

    // X1-X8: Explicit levels and directions
    match request.embedding_levels {
        Some(explicit) => apply_embedding_levels(classes, types, levels, explicit, bounds, para_level),
        None => resolve_explicit(classes, types, levels, bounds, para_level, &isolates),
    }

    // X9-X10: Isolating run sequences over the characters that remain
    for mut seq in isolating_sequences(classes, levels, bounds, para_level, &isolates) {
        apply_context(request, &mut seq, classes, bounds, para_level);

        // W1-W7: Weak types
        resolve_weak(classes, types, &seq, request.mode);

        // N0: Paired brackets
        resolve_brackets(request, classes, types, &seq);

        // N1-N2: Neutrals
        resolve_neutral(types, &seq);

        // I1-I2: Implicit levels
        resolve_implicit(types, levels, &seq);
    }

    // Removed characters follow the preceding character
    let mut previous = para_level;
    for i in bounds.start..bounds.limit {
        if classes[i].is_removed_by_x9() {
            levels[i] = previous;
        } else {
            previous = levels[i];
        }
    }

    // L1: Separators and the whitespace before them
    let separator_level = if request.reorder_paragraphs_ltr {
        0
    } else {
        para_level
    };
    reset_whitespace(classes, levels, bounds.start, bounds.limit, para_level, separator_level);

    para_level
}

/// BD9: Matching isolate initiator / PDI pairs within a paragraph.
struct IsolatePairs {
    start: usize,
    pdi_for: Vec<usize>,
    initiator_for: Vec<usize>,
}

impl IsolatePairs {
    fn new(classes: &[BidiClass], start: usize, limit: usize) -> Self {
        let mut pdi_for = vec![NONE; limit - start];
        let mut initiator_for = vec![NONE; limit - start];
        let mut open: Vec<usize> = Vec::new();
        for i in start..limit {
            match classes[i] {
                class if class.is_isolate_initiator() => open.push(i),
                BidiClass::PDI => {
                    if let Some(initiator) = open.pop() {
                        pdi_for[initiator - start] = i;
                        initiator_for[i - start] = initiator;
                    }
                }
                _ => {}
            }
        }
        Self {
            start,
            pdi_for,
            initiator_for,
        }
    }

    fn pdi_for(&self, initiator: usize) -> Option<usize> {
        let pdi = self.pdi_for[initiator - self.start];
        (pdi != NONE).then_some(pdi)
    }

    fn initiator_for(&self, pdi: usize) -> Option<usize> {
        let initiator = self.initiator_for[pdi - self.start];
        (initiator != NONE).then_some(initiator)
    }
}

#[derive(Debug, Clone, Copy)]
struct Status {
    level: u8,
    override_class: Option<BidiClass>,
    isolate: bool,
}

fn resolve_explicit(
    classes: &[BidiClass],
    types: &mut [BidiClass],
    levels: &mut [u8],
    bounds: Bounds,
    para_level: u8,
    isolates: &IsolatePairs,
) {
    let mut stack: Vec<Status> = Vec::with_capacity(MAX_DEPTH as usize + 2);
    stack.push(Status {
        level: para_level,
        override_class: None,
        isolate: false,
    });
    let mut overflow_isolates = 0usize;
    let mut overflow_embeddings = 0usize;
    let mut valid_isolates = 0usize;

    for i in bounds.start..bounds.limit {
        let top = stack[stack.len() - 1];
        match classes[i] {
            class @ (BidiClass::RLE | BidiClass::LRE | BidiClass::RLO | BidiClass::LRO) => {
                levels[i] = top.level;
                let rtl = matches!(class, BidiClass::RLE | BidiClass::RLO);
                let level = next_level(top.level, rtl);
                if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    let override_class = match class {
                        BidiClass::RLO => Some(BidiClass::R),
                        BidiClass::LRO => Some(BidiClass::L),
                        _ => None,
                    };
                    stack.push(Status {
                        level,
                        override_class,
                        isolate: false,
                    });
                } else if overflow_isolates == 0 {
                    overflow_embeddings += 1;
                }
            }
            class @ (BidiClass::RLI | BidiClass::LRI | BidiClass::FSI) => {
                levels[i] = top.level;
                if let Some(forced) = top.override_class {
                    types[i] = forced;
                }
                let rtl = match class {
                    BidiClass::RLI => true,
                    BidiClass::LRI => false,
                    _ => {
                        let end = isolates.pdi_for(i).unwrap_or(bounds.limit);
                        matches!(
                            first_strong(classes, i + 1, end),
                            Some(BidiClass::R | BidiClass::AL)
                        )
                    }
                };
                let level = next_level(top.level, rtl);
                if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    valid_isolates += 1;
                    stack.push(Status {
                        level,
                        override_class: None,
                        isolate: true,
                    });
                } else {
                    overflow_isolates += 1;
                }
            }
            BidiClass::PDI => {
                if overflow_isolates > 0 {
                    overflow_isolates -= 1;
                } else if valid_isolates > 0 {
                    overflow_embeddings = 0;
                    while !stack[stack.len() - 1].isolate {
                        stack.pop();
                    }
                    stack.pop();
                    valid_isolates -= 1;
                }
                let top = stack[stack.len() - 1];
                levels[i] = top.level;
                if let Some(forced) = top.override_class {
                    types[i] = forced;
                }
            }
            BidiClass::PDF => {
                levels[i] = top.level;
                if overflow_isolates > 0 {
                    // ignored inside an overflowing isolate
                } else if overflow_embeddings > 0 {
                    overflow_embeddings -= 1;
                } else if !top.isolate && stack.len() >= 2 {
                    stack.pop();
                }
            }
            BidiClass::B => levels[i] = para_level,
            BidiClass::BN => levels[i] = top.level,
            _ => {
                levels[i] = top.level;
                if let Some(forced) = top.override_class {
                    types[i] = forced;
                }
            }
        }
    }
}

/// Caller-supplied levels replace X1-X8.
fn apply_embedding_levels(
    classes: &[BidiClass],
    types: &mut [BidiClass],
    levels: &mut [u8],
    explicit: &[u8],
    bounds: Bounds,
    para_level: u8,
) {
    for i in bounds.start..bounds.limit {
        if classes[i] == BidiClass::B {
            levels[i] = para_level;
            continue;
        }
        let raw = explicit[i];
        let overridden = raw & LEVEL_OVERRIDE != 0;
        let level = (raw & !LEVEL_OVERRIDE)
            .min(MAX_DEPTH)
            .max(para_level);
        levels[i] = level;
        if overridden && !classes[i].is_removed_by_x9() {
            types[i] = if level & 1 == 1 {
                BidiClass::R
            } else {
                BidiClass::L
            };
        }
    }
}

/// Indices of one isolating run sequence with its boundary types.
#[derive(Debug, Clone)]
struct Sequence {
    indices: Vec<usize>,
    level: u8,
    sos: BidiClass,
    eos: BidiClass,
}

fn isolating_sequences(
    classes: &[BidiClass],
    levels: &[u8],
    bounds: Bounds,
    para_level: u8,
    isolates: &IsolatePairs,
) -> Vec<Sequence> {
    // Level runs over the characters X9 keeps
    let mut runs: Vec<Vec<usize>> = Vec::new();
    let mut run_of = vec![NONE; bounds.limit - bounds.start];
    let mut current = None;
    for i in bounds.start..bounds.limit {
        if classes[i].is_removed_by_x9() {
            continue;
        }
        if current != Some(levels[i]) {
            runs.push(Vec::new());
            current = Some(levels[i]);
        }
        run_of[i - bounds.start] = runs.len() - 1;
        if let Some(run) = runs.last_mut() {
            run.push(i);
        }
    }

    let ends_run = |index: usize, run: usize| runs[run].last() == Some(&index);
    let continues_isolate = |run: usize| {
        let first = runs[run][0];
        classes[first] == BidiClass::PDI
            && isolates.initiator_for(first).is_some_and(|initiator| {
                let owner = run_of[initiator - bounds.start];
                owner != run && ends_run(initiator, owner)
            })
    };

    let mut sequences = Vec::new();
    for r in 0..runs.len() {
        if continues_isolate(r) {
            continue;
        }
        let mut indices = runs[r].clone();
        let mut current = r;
        loop {
            let last = runs[current][runs[current].len() - 1];
            if !classes[last].is_isolate_initiator() {
                break;
            }
            let Some(pdi) = isolates.pdi_for(last) else {
                break;
            };
            let next = run_of[pdi - bounds.start];
            if next == current || runs[next][0] != pdi {
                break;
            }
            indices.extend_from_slice(&runs[next]);
            current = next;
        }

        let first = indices[0];
        let last = indices[indices.len() - 1];
        let level = levels[first];
        let before = (bounds.start..first)
            .rev()
            .find(|&j| !classes[j].is_removed_by_x9())
            .map_or(para_level, |j| levels[j]);
        let after = if classes[last].is_isolate_initiator() {
            para_level
        } else {
            (last + 1..bounds.limit)
                .find(|&j| !classes[j].is_removed_by_x9())
                .map_or(para_level, |j| levels[j])
        };
        sequences.push(Sequence {
            indices,
            level,
            sos: class_for_level(level.max(before)),
            eos: class_for_level(level.max(after)),
        });
    }
    sequences
}

/// Prologue and epilogue stand in for sos/eos at the outer edges of the text.
fn apply_context(
    request: &ResolveRequest<'_>,
    seq: &mut Sequence,
    classes: &[BidiClass],
    bounds: Bounds,
    para_level: u8,
) {
    if seq.level != para_level {
        return;
    }
    let kept = |j: &usize| !classes[*j].is_removed_by_x9();
    if bounds.first {
        if let Some(strong) = request.context.prologue_strong {
            if (bounds.start..bounds.limit).find(kept) == Some(seq.indices[0]) {
                seq.sos = strong;
            }
        }
    }
    if bounds.last {
        if let Some(strong) = request.context.epilogue_strong {
            if (bounds.start..bounds.limit).rev().find(kept) == seq.indices.last().copied() {
                seq.eos = strong;
            }
        }
    }
}

fn resolve_weak(
    classes: &[BidiClass],
    types: &mut [BidiClass],
    seq: &Sequence,
    mode: ReorderingMode,
) {
    let idx = &seq.indices;
    let len = idx.len();

    // W1: NSM takes the type of the previous character
    let mut previous: Option<usize> = None;
    for &i in idx {
        if types[i] == BidiClass::NSM {
            types[i] = match previous {
                None => seq.sos,
                Some(j) if classes[j].is_isolate_initiator() || classes[j] == BidiClass::PDI => {
                    BidiClass::ON
                }
                Some(j) => types[j],
            };
        }
        previous = Some(i);
    }

    // W2: EN after AL becomes AN; NumbersSpecial extends this to R
    let numbers_special = mode.numbers_special();
    let mut last_strong = seq.sos;
    for &i in idx {
        match types[i] {
            BidiClass::L | BidiClass::R | BidiClass::AL => last_strong = types[i],
            BidiClass::EN
                if last_strong == BidiClass::AL
                    || (numbers_special && last_strong == BidiClass::R) =>
            {
                types[i] = BidiClass::AN
            }
            _ => {}
        }
    }

    // W3: AL becomes R
    for &i in idx {
        if types[i] == BidiClass::AL {
            types[i] = BidiClass::R;
        }
    }

    // W4: Single separators between numbers
    for k in 1..len.saturating_sub(1) {
        let (prev, next) = (types[idx[k - 1]], types[idx[k + 1]]);
        match types[idx[k]] {
            BidiClass::ES if prev == BidiClass::EN && next == BidiClass::EN => {
                types[idx[k]] = BidiClass::EN
            }
            BidiClass::CS if prev == next && prev.is_number() => types[idx[k]] = prev,
            _ => {}
        }
    }

    // W5: Terminators adjacent to European numbers
    let mut k = 0;
    while k < len {
        if types[idx[k]] != BidiClass::ET {
            k += 1;
            continue;
        }
        let run_start = k;
        while k < len && types[idx[k]] == BidiClass::ET {
            k += 1;
        }
        let before = run_start > 0 && types[idx[run_start - 1]] == BidiClass::EN;
        let after = k < len && types[idx[k]] == BidiClass::EN;
        if before || after {
            for &i in &idx[run_start..k] {
                types[i] = BidiClass::EN;
            }
        }
    }

    // W6: Remaining separators and terminators become ON
    for &i in idx {
        if matches!(types[i], BidiClass::ES | BidiClass::ET | BidiClass::CS) {
            types[i] = BidiClass::ON;
        }
    }

    // W7: EN after L becomes L
    let group_with_r = mode == ReorderingMode::GroupNumbersWithR;
    let next_strong = if group_with_r {
        let mut next = vec![seq.eos; len];
        for k in (0..len.saturating_sub(1)).rev() {
            next[k] = match types[idx[k + 1]] {
                class @ (BidiClass::L | BidiClass::R) => class,
                _ => next[k + 1],
            };
        }
        next
    } else {
        Vec::new()
    };
    let mut last_strong = seq.sos;
    for (k, &i) in idx.iter().enumerate() {
        match types[i] {
            BidiClass::L | BidiClass::R => last_strong = types[i],
            BidiClass::EN if last_strong == BidiClass::L => {
                if !(group_with_r && next_strong[k] == BidiClass::R) {
                    types[i] = BidiClass::L;
                }
            }
            _ => {}
        }
    }
}

fn canonical_bracket(ch: char) -> char {
    match ch {
        '\u{2329}' => '\u{3008}',
        '\u{232A}' => '\u{3009}',
        other => other,
    }
}

fn resolve_brackets(
    request: &ResolveRequest<'_>,
    classes: &[BidiClass],
    types: &mut [BidiClass],
    seq: &Sequence,
) {
    let idx = &seq.indices;

    // BD16: Locate bracket pairs
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (k, &i) in idx.iter().enumerate() {
        if types[i] != BidiClass::ON {
            continue;
        }
        match request.classifier.bracket(request.chars[i]) {
            BracketType::Open(closer) => {
                if stack.len() == BRACKET_STACK_LIMIT {
                    break;
                }
                stack.push((canonical_bracket(closer), k));
            }
            BracketType::Close(_) => {
                let closer = canonical_bracket(request.chars[i]);
                if let Some(pos) = stack.iter().rposition(|&(expected, _)| expected == closer) {
                    pairs.push((stack[pos].1, k));
                    stack.truncate(pos);
                }
            }
            BracketType::None => {}
        }
    }
    pairs.sort_unstable_by_key(|&(open, _)| open);

    let embedding = class_for_level(seq.level);
    let opposite = if embedding == BidiClass::L {
        BidiClass::R
    } else {
        BidiClass::L
    };

    for (open, close) in pairs {
        let mut found_opposite = false;
        let mut found_embedding = false;
        for &i in &idx[open + 1..close] {
            match strong_direction(types[i]) {
                Some(dir) if dir == embedding => {
                    found_embedding = true;
                    break;
                }
                Some(_) => found_opposite = true,
                None => {}
            }
        }

        let resolved = if found_embedding {
            embedding
        } else if found_opposite {
            let preceding = idx[..open]
                .iter()
                .rev()
                .find_map(|&i| strong_direction(types[i]))
                .unwrap_or(seq.sos);
            if preceding == opposite {
                opposite
            } else {
                embedding
            }
        } else {
            continue;
        };

        for bracket in [open, close] {
            types[idx[bracket]] = resolved;
            for &i in &idx[bracket + 1..] {
                if classes[i] != BidiClass::NSM {
                    break;
                }
                types[i] = resolved;
            }
        }
    }
}

fn resolve_neutral(types: &mut [BidiClass], seq: &Sequence) {
    let idx = &seq.indices;
    let len = idx.len();
    let embedding = class_for_level(seq.level);

    let mut k = 0;
    while k < len {
        if !types[idx[k]].is_neutral_or_isolate() {
            k += 1;
            continue;
        }
        let run_start = k;
        while k < len && types[idx[k]].is_neutral_or_isolate() {
            k += 1;
        }
        let before = if run_start == 0 {
            seq.sos
        } else {
            neutral_context(types[idx[run_start - 1]])
        };
        let after = if k == len {
            seq.eos
        } else {
            neutral_context(types[idx[k]])
        };
        // N1 when both sides agree, N2 otherwise
        let resolved = if before == after { before } else { embedding };
        for &i in &idx[run_start..k] {
            types[i] = resolved;
        }
    }
}

fn resolve_implicit(types: &[BidiClass], levels: &mut [u8], seq: &Sequence) {
    for &i in &seq.indices {
        let level = levels[i];
        levels[i] = if level & 1 == 0 {
            match types[i] {
                BidiClass::R => level + 1,
                BidiClass::AN | BidiClass::EN => level + 2,
                _ => level,
            }
        } else {
            match types[i] {
                BidiClass::L | BidiClass::EN | BidiClass::AN => level + 1,
                _ => level,
            }
        };
    }
}

/// L1: Separators and trailing whitespace before them (or before `limit`) to paragraph level.
pub(crate) fn reset_whitespace(
    classes: &[BidiClass],
    levels: &mut [u8],
    start: usize,
    limit: usize,
    para_level: u8,
    separator_level: u8,
) {
    let mut trailing = true;
    for i in (start..limit).rev() {
        match classes[i] {
            BidiClass::B => {
                levels[i] = separator_level;
                trailing = true;
            }
            BidiClass::S => {
                levels[i] = para_level;
                trailing = true;
            }
            class if class.is_trailing_whitespace() => {
                if trailing {
                    levels[i] = para_level;
                }
            }
            _ => trailing = false,
        }
    }
}

/// P2: First strong class in `[start, limit)`, skipping isolated content.
pub(crate) fn first_strong(classes: &[BidiClass], start: usize, limit: usize) -> Option<BidiClass> {
    let mut depth = 0usize;
    for &class in &classes[start..limit] {
        match class {
            BidiClass::L | BidiClass::R | BidiClass::AL if depth == 0 => return Some(class),
            class if class.is_isolate_initiator() => depth += 1,
            BidiClass::PDI if depth > 0 => depth -= 1,
            BidiClass::B => break,
            _ => {}
        }
    }
    None
}

fn strong_level(class: BidiClass) -> u8 {
    if class == BidiClass::L {
        0
    } else {
        1
    }
}

fn context_strong(class: BidiClass) -> Option<BidiClass> {
    match class {
        BidiClass::L => Some(BidiClass::L),
        BidiClass::R | BidiClass::AL | BidiClass::EN | BidiClass::AN => Some(BidiClass::R),
        _ => None,
    }
}

fn strong_direction(class: BidiClass) -> Option<BidiClass> {
    context_strong(class)
}

fn neutral_context(class: BidiClass) -> BidiClass {
    if class == BidiClass::L {
        BidiClass::L
    } else {
        BidiClass::R
    }
}

fn class_for_level(level: u8) -> BidiClass {
    if level & 1 == 1 {
        BidiClass::R
    } else {
        BidiClass::L
    }
}

fn next_level(level: u8, rtl: bool) -> u8 {
    if rtl {
        (level + 1) | 1
    } else {
        (level + 2) & !1
    }
}
