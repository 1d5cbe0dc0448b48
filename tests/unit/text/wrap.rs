use super::*;

/// Counts calls so tests can check the measure is consulted per candidate.
struct CountingMeasure {
    inner: EstimateMeasure,
    calls: usize,
}

impl TextMeasure for CountingMeasure {
    fn measure(&mut self, text: &str) -> f32 {
        self.calls += 1;
        self.inner.measure(text)
    }
}

fn texts(lines: &[WrappedLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn estimate_is_linear_in_char_count() {
    let mut m = EstimateMeasure::new(10.0);
    assert_eq!(m.measure(""), 0.0);
    assert!((m.measure("abcd") - 22.0).abs() < 1e-4);
    // Code points, not bytes.
    assert!((m.measure("éé") - 11.0).abs() < 1e-4);
}

#[test]
fn empty_and_blank_titles_produce_no_lines() {
    let mut m = EstimateMeasure::new(10.0);
    assert!(wrap_words("", 100.0, &mut m).is_empty());
    assert!(wrap_words("   \t  ", 100.0, &mut m).is_empty());
}

#[test]
fn fitting_text_stays_on_one_line() {
    let mut m = EstimateMeasure::new(10.0);
    let lines = wrap_words("ab cd", 1000.0, &mut m);
    assert_eq!(texts(&lines), vec!["ab cd"]);
    assert!((lines[0].width - 5.0 * 5.5).abs() < 1e-4);
}

#[test]
fn breaks_greedily_at_max_width() {
    // Each char is 5.5px wide; 30px fits five chars.
    let mut m = EstimateMeasure::new(10.0);
    let lines = wrap_words("aa bb cc dd", 30.0, &mut m);
    assert_eq!(texts(&lines), vec!["aa bb", "cc dd"]);
    for l in &lines {
        assert!(l.width <= 30.0);
    }
}

#[test]
fn collapses_runs_of_whitespace() {
    let mut m = EstimateMeasure::new(10.0);
    let lines = wrap_words("  aa \n  bb\tcc  ", 1000.0, &mut m);
    assert_eq!(texts(&lines), vec!["aa bb cc"]);
}

#[test]
fn overlong_word_gets_its_own_line() {
    let mut m = EstimateMeasure::new(10.0);
    let lines = wrap_words("a supercalifragilistic b", 30.0, &mut m);
    assert_eq!(texts(&lines), vec!["a", "supercalifragilistic", "b"]);
    assert!(lines[1].width > 30.0);
}

#[test]
fn leading_overlong_word_is_not_preceded_by_an_empty_line() {
    let mut m = EstimateMeasure::new(10.0);
    let lines = wrap_words("supercalifragilistic", 30.0, &mut m);
    assert_eq!(texts(&lines), vec!["supercalifragilistic"]);
}

#[test]
fn only_single_word_lines_may_exceed_max_width() {
    let title = "A very long title that should wrap across two or more lines, including \
                 antidisestablishmentarianism for good measure";
    for max in [40.0f32, 120.0, 333.0, 1152.0] {
        let mut m = EstimateMeasure::new(86.0);
        for line in wrap_words(title, max, &mut m) {
            if line.width > max {
                assert!(!line.text.contains(' '), "multi-word line overflowed: {line:?}");
            }
        }
    }
}

#[test]
fn wrapping_is_deterministic() {
    let title = "The quick brown fox jumps over the lazy dog again and again";
    let mut a = EstimateMeasure::new(40.0);
    let mut b = EstimateMeasure::new(40.0);
    assert_eq!(
        wrap_words(title, 300.0, &mut a),
        wrap_words(title, 300.0, &mut b)
    );
}

#[test]
fn measures_each_candidate() {
    let mut m = CountingMeasure {
        inner: EstimateMeasure::new(10.0),
        calls: 0,
    };
    let lines = wrap_words("aa bb cc", 1000.0, &mut m);
    assert_eq!(lines.len(), 1);
    assert_eq!(m.calls, 3);
}

#[test]
fn widths_match_reported_lines() {
    let mut m = EstimateMeasure::new(10.0);
    let lines = wrap_words("aa bb cc dd ee", 30.0, &mut m);
    for l in &lines {
        let mut check = EstimateMeasure::new(10.0);
        assert!((l.width - check.measure(&l.text)).abs() < 1e-4);
    }
}
