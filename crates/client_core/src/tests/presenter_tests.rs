use super::*;

fn result(completeness: i64, duplication: i64, coverage: i64, suggestions: &[&str]) -> AnalysisResult {
    AnalysisResult {
        completeness,
        duplication,
        coverage,
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn uniqueness_is_complement_of_duplication() {
    for duplication in [0, 1, 20, 50, 99, 100] {
        let input = result(50, duplication, 50, &[]);
        let report = present(&input);
        assert_eq!(i64::from(report.uniqueness.value()), 100 - duplication);
    }
}

#[test]
fn duplication_boundaries() {
    assert_eq!(present(&result(0, 0, 0, &[])).uniqueness, Percent::MAX);
    assert_eq!(present(&result(0, 100, 0, &[])).uniqueness, Percent::MIN);
}

#[test]
fn out_of_range_values_are_clamped() {
    let input = result(140, -30, -5, &[]);
    let report = present(&input);
    assert_eq!(report.completeness, Percent::MAX);
    assert_eq!(report.duplication, Percent::MIN);
    assert_eq!(report.uniqueness, Percent::MAX);
    assert_eq!(report.coverage, Percent::MIN);

    let overflowing = result(i64::MAX, i64::MIN, 0, &[]);
    let report = present(&overflowing);
    assert_eq!(report.completeness, Percent::MAX);
    assert_eq!(report.uniqueness, Percent::MAX);
}

#[test]
fn scenario_scores_are_presented() {
    let input = result(80, 20, 65, &["Add negative test cases"]);
    let report = present(&input);
    assert_eq!(report.completeness.value(), 80);
    assert_eq!(report.uniqueness.value(), 80);
    assert_eq!(report.coverage.value(), 65);
    assert_eq!(
        report.suggestions().collect::<Vec<_>>(),
        vec!["Add negative test cases"]
    );
}

#[test]
fn presenting_twice_is_identical() {
    let input = result(33, 44, 55, &["a", "b"]);
    let first = present(&input);
    let second = present(&input);
    assert_eq!(first, second);
    assert_eq!(first.indicators(), second.indicators());
}

#[test]
fn suggestions_keep_order_and_restart() {
    let input = result(0, 0, 0, &["first", "second", "third"]);
    let report = present(&input);

    let once: Vec<_> = report.suggestions().collect();
    let again: Vec<_> = report.suggestions().collect();
    assert_eq!(once, vec!["first", "second", "third"]);
    assert_eq!(once, again);
    assert_eq!(report.suggestions().len(), 3);
    assert_eq!(report.suggestion_count(), 3);
}

#[test]
fn empty_suggestions_render_nothing() {
    let input = result(10, 10, 10, &[]);
    let report = present(&input);
    assert_eq!(report.suggestions().count(), 0);
    assert_eq!(report.suggestion_count(), 0);
}

#[test]
fn uniqueness_gauge_is_captioned_with_duplication() {
    let input = result(80, 20, 65, &[]);
    let [completeness, uniqueness, coverage] = present(&input).indicators();

    assert_eq!(completeness.kind, IndicatorKind::Completeness);
    assert_eq!(completeness.caption, "Completeness 80%");
    assert_eq!(uniqueness.kind, IndicatorKind::Uniqueness);
    assert_eq!(uniqueness.gauge.value(), 80);
    assert_eq!(uniqueness.caption, "Duplication 20%");
    assert_eq!(coverage.kind, IndicatorKind::Coverage);
    assert_eq!(coverage.caption, "Coverage 65%");
}
