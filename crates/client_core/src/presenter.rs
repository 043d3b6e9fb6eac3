//! Turns an [`AnalysisResult`] into the figures shown in the result panel.
//!
//! Nothing here touches the network or the session; everything borrows from
//! the result it was given.

use std::{fmt, slice};

use shared::protocol::AnalysisResult;

/// A display percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(u8);

impl Percent {
    pub const MIN: Percent = Percent(0);
    pub const MAX: Percent = Percent(100);

    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `100 - self`.
    pub fn complement(self) -> Self {
        Self(100 - self.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Completeness,
    Uniqueness,
    Coverage,
}

/// One gauge of the result panel. `gauge` drives the fill, `caption` is the
/// text drawn inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub gauge: Percent,
    pub caption: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityReport<'a> {
    pub completeness: Percent,
    pub duplication: Percent,
    pub uniqueness: Percent,
    pub coverage: Percent,
    suggestions: &'a [String],
}

pub fn present(result: &AnalysisResult) -> QualityReport<'_> {
    let duplication = Percent::clamped(result.duplication);
    QualityReport {
        completeness: Percent::clamped(result.completeness),
        duplication,
        uniqueness: Percent::clamped(100i64.saturating_sub(result.duplication)),
        coverage: Percent::clamped(result.coverage),
        suggestions: &result.suggestions,
    }
}

impl<'a> QualityReport<'a> {
    /// Suggestions in the order the service produced them. Each call starts a
    /// fresh pass.
    pub fn suggestions(&self) -> Suggestions<'a> {
        Suggestions {
            inner: self.suggestions.iter(),
        }
    }

    pub fn suggestion_count(&self) -> usize {
        self.suggestions.len()
    }

    pub fn indicators(&self) -> [Indicator; 3] {
        [
            Indicator {
                kind: IndicatorKind::Completeness,
                gauge: self.completeness,
                caption: format!("Completeness {}", self.completeness),
            },
            Indicator {
                kind: IndicatorKind::Uniqueness,
                gauge: self.uniqueness,
                caption: format!("Duplication {}", self.uniqueness.complement()),
            },
            Indicator {
                kind: IndicatorKind::Coverage,
                gauge: self.coverage,
                caption: format!("Coverage {}", self.coverage),
            },
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Suggestions<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> Iterator for Suggestions<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Suggestions<'_> {}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
