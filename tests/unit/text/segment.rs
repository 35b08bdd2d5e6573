use super::*;

fn texts(units: &[TextUnit]) -> Vec<&str> {
    units.iter().map(|u| u.text.as_str()).collect()
}

fn none() -> BTreeSet<String> {
    BTreeSet::new()
}

#[test]
fn dense_script_detection() {
    assert!(is_dense_script("今日は良い天気です"));
    assert!(is_dense_script("AI が未来を変える"));
    assert!(!is_dense_script("Hello world"));
    assert!(!is_dense_script(""));
    assert!(!is_dense_script("   "));
}

#[test]
fn latin_typewriter_units_are_words() {
    let units = typewriter_units("the quick  brown fox", &none());
    assert_eq!(texts(&units), ["the", "quick", "brown", "fox"]);
    assert!(units[..3].iter().all(|u| u.space_after));
    assert!(!units[3].space_after);
    assert_eq!(join_units(&units), "the quick brown fox");
}

#[test]
fn dense_typewriter_units_are_characters() {
    let units = typewriter_units("今日は 晴れ", &none());
    assert_eq!(texts(&units), ["今", "日", "は", "晴", "れ"]);
    assert!(units[2].space_after);
    assert!(!units[4].space_after);
}

#[test]
fn dense_bounce_chunks_break_at_width_and_punctuation() {
    let chunks = bounce_chunks("今日はとても良い天気です。", &none(), 2, 4);
    assert_eq!(texts(&chunks), ["今日はと", "ても良", "い天気", "です。"]);

    let chunks = bounce_chunks("こんにちは、世界！", &none(), 2, 4);
    assert_eq!(texts(&chunks), ["こんに", "ちは、", "世界！"]);
}

#[test]
fn short_dense_tail_is_rebalanced_within_max() {
    assert_eq!(
        texts(&bounce_chunks("今日は良い", &none(), 2, 4)),
        ["今日は", "良い"]
    );
    assert_eq!(
        texts(&bounce_chunks("あいうえお", &none(), 2, 4)),
        ["あいう", "えお"]
    );
}

#[test]
fn dense_chunk_widths_stay_in_configured_range() {
    for (min, max) in [(2, 4), (2, 3), (3, 5)] {
        for n in min..=24 {
            let text: String = "あいうえおかきくけこ".chars().cycle().take(n).collect();
            let chunks = bounce_chunks(&text, &none(), min, max);
            assert_eq!(join_units(&chunks), text);
            for c in &chunks {
                let w = c.text.chars().count();
                assert!(
                    (min..=max).contains(&w),
                    "n={n} min={min} max={max}: {:?}",
                    texts(&chunks)
                );
            }
        }
    }
}

#[test]
fn trailing_punctuation_joins_previous_chunk_only_when_it_fits() {
    assert_eq!(
        texts(&bounce_chunks("世界！？", &none(), 2, 4)),
        ["世界！？"]
    );
    assert_eq!(
        texts(&bounce_chunks("今日は良い天気！？", &none(), 2, 4)),
        ["今日は良", "い天気！", "？"]
    );
    let chunks = bounce_chunks("今日は 晴れ", &none(), 2, 4);
    assert_eq!(texts(&chunks), ["今日は", "晴れ"]);
    assert!(chunks[0].space_after);
}

#[test]
fn latin_bounce_chunks_are_words() {
    let chunks = bounce_chunks("Hello, big world!", &none(), 2, 4);
    assert_eq!(texts(&chunks), ["Hello,", "big", "world!"]);
}

#[test]
fn latin_emphasis_ignores_case_and_punctuation() {
    let emphasis = BTreeSet::from(["Quick".to_owned()]);
    let units = typewriter_units("The quick, brown fox", &emphasis);
    let flags: Vec<_> = units.iter().map(|u| u.emphasized).collect();
    assert_eq!(flags, [false, true, false, false]);
}

#[test]
fn dense_emphasis_marks_substrings() {
    let emphasis = BTreeSet::from(["天気".to_owned()]);
    let units = typewriter_units("今日は良い天気です", &emphasis);
    let marked: Vec<_> = units
        .iter()
        .filter(|u| u.emphasized)
        .map(|u| u.text.as_str())
        .collect();
    assert_eq!(marked, ["天", "気"]);

    let chunks = bounce_chunks("今日は良い天気です", &emphasis, 2, 4);
    assert_eq!(texts(&chunks), ["今日は", "良い天", "気です"]);
    assert!(!chunks[0].emphasized);
    assert!(chunks[1].emphasized);
    assert!(chunks[2].emphasized);
}

#[test]
fn empty_text_has_no_units() {
    assert!(typewriter_units("", &none()).is_empty());
    assert!(typewriter_units(" \n ", &none()).is_empty());
    assert!(bounce_chunks("", &none(), 2, 4).is_empty());
}
