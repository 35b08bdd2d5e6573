//! Splitting narration text into reveal units.
//!
//! Dense scripts (CJK, kana, hangul) have no word separators, so they are revealed per character
//! and bounced in short character chunks; everything else goes by whitespace tokens.

use std::collections::{BTreeSet, HashSet};
use std::ops::Range;

/// Share of non-whitespace characters that must be dense-script for a text to count as dense.
pub const DENSE_SCRIPT_THRESHOLD: f64 = 0.3;

/// One atomic piece of text that is revealed and animated independently.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextUnit {
    /// Unit text, without surrounding whitespace.
    pub text: String,
    /// Whitespace followed this unit in the source.
    pub space_after: bool,
    /// Unit is (part of) an emphasized word.
    pub emphasized: bool,
}

/// Return `true` for characters of scripts written without spaces between words, plus their
/// punctuation blocks.
pub fn is_dense_char(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1100..=0x11FF     // hangul jamo
        | 0x3000..=0x303F   // CJK symbols and punctuation
        | 0x3040..=0x309F   // hiragana
        | 0x30A0..=0x30FF   // katakana
        | 0x3130..=0x318F   // hangul compatibility jamo
        | 0x31F0..=0x31FF   // katakana extensions
        | 0x3400..=0x4DBF   // CJK extension A
        | 0x4E00..=0x9FFF   // CJK unified
        | 0xAC00..=0xD7AF   // hangul syllables
        | 0xF900..=0xFAFF   // CJK compatibility
        | 0xFF00..=0xFFEF   // halfwidth and fullwidth forms
        | 0x20000..=0x2A6DF // CJK extension B
    )
}

/// Return `true` when at least [`DENSE_SCRIPT_THRESHOLD`] of the visible characters are dense.
pub fn is_dense_script(text: &str) -> bool {
    let (mut dense, mut total) = (0usize, 0usize);
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        total += 1;
        if is_dense_char(c) {
            dense += 1;
        }
    }
    total > 0 && (dense as f64) >= DENSE_SCRIPT_THRESHOLD * (total as f64)
}

fn is_break_punct(c: char) -> bool {
    matches!(
        c,
        '。' | '、' | '，' | '．' | '！' | '？' | '；' | '：' | '」' | '』' | '）' | '】' | '…'
    ) || (c.is_ascii_punctuation() && !matches!(c, '\'' | '-'))
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Span {
    range: Range<usize>,
    chars: usize,
    space_after: bool,
}

fn word_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                spans.push(Span {
                    range: s..i,
                    chars: text[s..i].chars().count(),
                    space_after: true,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push(Span {
            range: s..text.len(),
            chars: text[s..].chars().count(),
            space_after: false,
        });
    }
    if let Some(last) = spans.last_mut() {
        last.space_after = false;
    }
    spans
}

fn char_spans(text: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(prev) = spans.last_mut() {
                prev.space_after = true;
            }
            continue;
        }
        spans.push(Span {
            range: i..i + c.len_utf8(),
            chars: 1,
            space_after: false,
        });
    }
    if let Some(last) = spans.last_mut() {
        last.space_after = false;
    }
    spans
}

/// Split one unbroken run of characters into the fewest chunks of at most `max_chars`, sized as
/// evenly as possible so no chunk ends up much shorter than the rest.
fn push_run(
    run: &mut Vec<Range<usize>>,
    spans: &mut Vec<Span>,
    min_chars: usize,
    max_chars: usize,
    space_after: bool,
) {
    let n = run.len();
    if n == 0 {
        if space_after && let Some(prev) = spans.last_mut() {
            prev.space_after = true;
        }
        return;
    }

    // A fragment too short to stand alone (typically trailing punctuation) joins the chunk
    // before it, as long as that chunk stays within the width limit.
    if n < min_chars
        && let Some(prev) = spans.last_mut()
        && !prev.space_after
        && prev.chars + n <= max_chars
    {
        prev.range.end = run[n - 1].end;
        prev.chars += n;
        prev.space_after = space_after;
        run.clear();
        return;
    }

    let chunks = n.div_ceil(max_chars);
    let (base, extra) = (n / chunks, n % chunks);
    let mut at = 0;
    for j in 0..chunks {
        let width = base + usize::from(j < extra);
        spans.push(Span {
            range: run[at].start..run[at + width - 1].end,
            chars: width,
            space_after: false,
        });
        at += width;
    }
    if let Some(last) = spans.last_mut() {
        last.space_after = space_after;
    }
    run.clear();
}

fn dense_chunk_spans(text: &str, min_chars: usize, max_chars: usize) -> Vec<Span> {
    let max_chars = max_chars.max(1);
    let min_chars = min_chars.clamp(1, max_chars);
    let mut spans: Vec<Span> = Vec::new();
    // byte ranges of the characters since the last break
    let mut run: Vec<Range<usize>> = Vec::new();

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            push_run(&mut run, &mut spans, min_chars, max_chars, true);
            continue;
        }
        run.push(i..i + c.len_utf8());
        if is_break_punct(c) {
            push_run(&mut run, &mut spans, min_chars, max_chars, false);
        }
    }
    push_run(&mut run, &mut spans, min_chars, max_chars, false);

    if let Some(last) = spans.last_mut() {
        last.space_after = false;
    }
    spans
}

fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Matches text spans against a set of emphasis words.
struct EmphasisMatcher {
    words: HashSet<String>,
    marked: Vec<Range<usize>>,
}

impl EmphasisMatcher {
    fn new(text: &str, emphasis: &BTreeSet<String>, dense: bool) -> Self {
        let mut words = HashSet::new();
        let mut marked = Vec::new();
        for entry in emphasis {
            if dense {
                let needle = entry.trim();
                if needle.is_empty() {
                    continue;
                }
                marked.extend(
                    text.match_indices(needle)
                        .map(|(i, m)| i..i + m.len()),
                );
            } else {
                words.extend(
                    entry
                        .split_whitespace()
                        .map(normalize_word)
                        .filter(|w| !w.is_empty()),
                );
            }
        }
        Self { words, marked }
    }

    fn is_emphasized(&self, text: &str, range: &Range<usize>) -> bool {
        if self
            .marked
            .iter()
            .any(|m| m.start < range.end && range.start < m.end)
        {
            return true;
        }
        !self.words.is_empty() && self.words.contains(&normalize_word(&text[range.clone()]))
    }
}

fn to_units(text: &str, spans: Vec<Span>, emphasis: &EmphasisMatcher) -> Vec<TextUnit> {
    spans
        .into_iter()
        .map(|span| TextUnit {
            emphasized: emphasis.is_emphasized(text, &span.range),
            text: text[span.range].to_owned(),
            space_after: span.space_after,
        })
        .collect()
}

/// Typewriter units: one per character for dense scripts, whitespace tokens otherwise.
pub fn typewriter_units(text: &str, emphasis: &BTreeSet<String>) -> Vec<TextUnit> {
    let dense = is_dense_script(text);
    let spans = if dense {
        char_spans(text)
    } else {
        word_spans(text)
    };
    to_units(text, spans, &EmphasisMatcher::new(text, emphasis, dense))
}

/// Word-bounce chunks: `min_chars..=max_chars` character groups broken at punctuation for dense
/// scripts, whitespace tokens otherwise.
pub fn bounce_chunks(
    text: &str,
    emphasis: &BTreeSet<String>,
    min_chars: usize,
    max_chars: usize,
) -> Vec<TextUnit> {
    let dense = is_dense_script(text);
    let spans = if dense {
        dense_chunk_spans(text, min_chars, max_chars)
    } else {
        word_spans(text)
    };
    to_units(text, spans, &EmphasisMatcher::new(text, emphasis, dense))
}

/// Rebuild display text from units.
pub fn join_units(units: &[TextUnit]) -> String {
    let mut out = String::new();
    for u in units {
        out.push_str(&u.text);
        if u.space_after {
            out.push(' ');
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;
