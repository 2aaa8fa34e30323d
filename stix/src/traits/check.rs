use crate::Outcome;

/// Check a STIX structure for validity that can't be enforced by the type system.
pub trait Check {
    /// Runs every structural check on the value.
    ///
    /// Problems never abort the check; every individual check leaves a diagnostic in the
    /// returned [`Outcome`], whether it passed or failed.
    fn check(&self) -> Outcome;
}

impl<T: Check> Check for Option<T> {
    fn check(&self) -> Outcome {
        if let Some(inner) = self {
            inner.check()
        } else {
            Outcome::default()
        }
    }
}

/// Field-by-field semantic comparison of two values of the same type.
pub trait Compare {
    /// Compares `self` against `other`, recording a diagnostic for every field.
    ///
    /// Sequences are compared by length first and then index by index; reordering
    /// counts as a difference.
    fn compare(&self, other: &Self) -> Outcome;
}
