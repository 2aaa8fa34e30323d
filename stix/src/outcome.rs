use std::fmt::{self, Debug, Display};

use chrono::{DateTime, Utc};

use crate::{
    ErrorAt, Identifier, IsEmpty, Timestamp,
    error::{Path, PathSegment},
    vocab,
};

/// A single check performed by validation or comparison, whether it passed or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    path: Path,
    message: String,
    passed: bool,
}

impl Diagnostic {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn passed(&self) -> bool {
        self.passed
    }
}

impl ErrorAt for Diagnostic {
    fn at<P: Into<PathSegment>>(mut self, segment: P) -> Self {
        self.path.push_front(segment);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.passed { "++" } else { "--" };
        if self.path.is_empty() {
            write!(f, "{marker} {}", self.message)
        } else {
            write!(f, "{marker} {}: {}", self.path, self.message)
        }
    }
}

/// The verdict of a validation or comparison run: whether it passed, how many problems
/// were found, and a diagnostic for every check that ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    problems: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.problems == 0
    }

    pub fn problem_count(&self) -> usize {
        self.problems
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns only the diagnostics of failed checks.
    pub fn problems(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.passed)
    }

    /// Splits the outcome into `(ok, problem_count, diagnostic_lines)`.
    pub fn into_parts(self) -> (bool, usize, Vec<String>) {
        let ok = self.is_ok();
        let lines = self.diagnostics.iter().map(ToString::to_string).collect();
        (ok, self.problems, lines)
    }
}

impl ErrorAt for Outcome {
    fn at<P: Into<PathSegment>>(mut self, segment: P) -> Self {
        let segment = segment.into();
        self.diagnostics = self
            .diagnostics
            .into_iter()
            .map(|d| d.at(segment.clone()))
            .collect();
        self
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        write!(f, "{} problem(s)", self.problems)
    }
}

/// How two timestamps of a window must relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// The later timestamp must be strictly after the earlier one.
    After,
    /// The later timestamp may equal the earlier one.
    NotBefore,
}

/// Accumulates diagnostics into an [`Outcome`].
#[derive(Debug, Default)]
pub struct Audit {
    outcome: Outcome,
}

impl Audit {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, path: Path, message: impl Display, passed: bool) -> bool {
        if !passed {
            self.outcome.problems += 1;
        }
        self.outcome.diagnostics.push(Diagnostic {
            path,
            message: message.to_string(),
            passed,
        });
        passed
    }

    pub fn pass(&mut self, path: impl Into<Path>, message: impl Display) {
        self.record(path.into(), message, true);
    }

    pub fn fail(&mut self, path: impl Into<Path>, message: impl Display) {
        self.record(path.into(), message, false);
    }

    /// Records a pass or a failure depending on `ok`, returning `ok`.
    pub fn check(
        &mut self,
        path: impl Into<Path>,
        ok: bool,
        passed: impl Display,
        failed: impl Display,
    ) -> bool {
        if ok {
            self.record(path.into(), passed, true)
        } else {
            self.record(path.into(), failed, false)
        }
    }

    /// Checks that a required property is present.
    pub fn require<T: IsEmpty + ?Sized>(&mut self, path: &'static str, value: &T) -> bool {
        self.check(path, !value.is_empty(), "present", "missing")
    }

    /// Checks that an optional text property, when set, is not blank.
    pub fn check_text(&mut self, path: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            self.check(path, !value.trim().is_empty(), "not blank", "blank");
        }
    }

    /// Checks that no element of a list property is blank.
    pub fn check_items(&mut self, path: &'static str, values: &[String]) {
        for (idx, value) in values.iter().enumerate() {
            if value.trim().is_empty() {
                self.fail(Path::from(path).child(idx), "blank");
            }
        }
        if !values.is_empty() {
            self.pass(path, format!("{} value(s)", values.len()));
        }
    }

    /// Checks that a timestamp, when set, parses. Returns the parsed value.
    pub fn check_timestamp(
        &mut self,
        path: &'static str,
        value: Option<&Timestamp>,
    ) -> Option<DateTime<Utc>> {
        let value = value?;
        match value.parse() {
            Ok(parsed) => {
                self.pass(path, "valid timestamp");
                Some(parsed)
            }
            Err(e) => {
                self.fail(path, e);
                None
            }
        }
    }

    /// Checks the ordering of a timestamp window.
    ///
    /// An absent end passes. An absent or unparseable start, or an unparseable end, is left
    /// to the presence and timestamp checks and adds nothing here.
    pub fn check_order(
        &mut self,
        path: &'static str,
        start: Option<&Timestamp>,
        end: Option<&Timestamp>,
        order: Order,
    ) {
        let Some(end) = end else {
            self.pass(path, "not set, window is open-ended");
            return;
        };
        let (Some(Ok(start)), Ok(end)) = (start.map(Timestamp::parse), end.parse()) else {
            return;
        };
        match order {
            Order::After => self.check(
                path,
                end > start,
                "after the start of the window",
                "must be after the start of the window",
            ),
            Order::NotBefore => self.check(
                path,
                end >= start,
                "not before the start of the window",
                "must not be before the start of the window",
            ),
        };
    }

    /// Checks that an enumerated value is a member of its vocabulary.
    pub fn check_vocab(&mut self, path: &'static str, value: Option<&str>, vocabulary: &[&str]) {
        if let Some(value) = value {
            self.check(
                path,
                vocab::is_member(vocabulary, value),
                format!("'{value}' is in the vocabulary"),
                format!("'{value}' is not in the vocabulary"),
            );
        }
    }

    /// Checks that an identifier is well formed and, optionally, names an object of the
    /// given type.
    pub fn check_identifier(
        &mut self,
        path: impl Into<Path>,
        id: &Identifier,
        expected_type: Option<&str>,
    ) -> bool {
        let result = match expected_type {
            Some(object_type) => id.check_for(object_type),
            None => id.check(),
        };
        match result {
            Ok(()) => self.record(path.into(), "valid identifier", true),
            Err(e) => self.record(path.into(), e, false),
        }
    }

    /// Checks every identifier in a list property.
    pub fn check_identifiers(
        &mut self,
        path: &'static str,
        ids: &[Identifier],
        expected_type: Option<&str>,
    ) {
        for (idx, id) in ids.iter().enumerate() {
            self.check_identifier(Path::from(path).child(idx), id, expected_type);
        }
    }

    /// Folds another outcome into this one.
    pub fn merge(&mut self, outcome: Outcome) {
        self.outcome.problems += outcome.problems;
        self.outcome.diagnostics.extend(outcome.diagnostics);
    }

    pub fn compare_value<T: PartialEq + Debug + ?Sized>(
        &mut self,
        path: impl Into<Path>,
        a: &T,
        b: &T,
    ) -> bool {
        if a == b {
            self.record(path.into(), "values match", true)
        } else {
            self.record(path.into(), format!("values differ: {a:?} != {b:?}"), false)
        }
    }

    /// Compares two optional timestamps by the instant they name, so `...00Z` and
    /// `...00.000Z` match.
    pub fn compare_timestamp(
        &mut self,
        path: &'static str,
        a: Option<&Timestamp>,
        b: Option<&Timestamp>,
    ) -> bool {
        let same = match (a, b) {
            (Some(a), Some(b)) => a.same_instant(b),
            (a, b) => a == b,
        };
        if same {
            self.pass(path, "values match");
        } else {
            self.fail(path, format!("values differ: {a:?} != {b:?}"));
        }
        same
    }

    /// Compares two sequences by length, then element by element at matching indices.
    ///
    /// Mismatched lengths stop the comparison of that property without looking at any
    /// element.
    pub fn compare_seq<T>(
        &mut self,
        path: &'static str,
        a: &[T],
        b: &[T],
        each: impl Fn(&T, &T) -> Outcome,
    ) -> bool {
        if a.len() != b.len() {
            return self.check(
                path,
                false,
                "",
                format!("lengths differ: {} != {}", a.len(), b.len()),
            );
        }

        self.pass(path, format!("lengths match: {}", a.len()));
        let before = self.outcome.problems;
        for (idx, (x, y)) in a.iter().zip(b).enumerate() {
            self.merge(each(x, y).at(idx).at(path));
        }
        self.outcome.problems == before
    }

    /// Compares two sequences of plain values index by index.
    pub fn compare_values<T: PartialEq + Debug>(
        &mut self,
        path: &'static str,
        a: &[T],
        b: &[T],
    ) -> bool {
        self.compare_seq(path, a, b, |x, y| {
            let mut acc = Audit::new();
            acc.compare_value(Path::default(), x, y);
            acc.finish()
        })
    }

    pub fn finish(self) -> Outcome {
        self.outcome
    }
}
