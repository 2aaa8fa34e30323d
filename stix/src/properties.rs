//! Reusable property groups shared between object kinds.
//!
//! Each group owns its fields, serializes them flattened into the owning object, and
//! validates and compares itself independently of every other group.

use crate::{Check, Compare, Outcome, error::Path};

mod kill_chain_phases;
mod lists;
mod motivation;
mod object_refs;
mod seen;
mod text;

pub use kill_chain_phases::KillChainPhases;
pub use lists::{Aliases, Authors, Goals, Roles};
pub use motivation::Motivation;
pub use object_refs::ObjectRefs;
pub use seen::SeenWindow;
pub use text::{Description, Name, ResourceLevel};

/// A property group together with the JSON property names it owns.
pub trait PropertyGroup: Check + Compare {
    const KEYS: &'static [&'static str];
}

/// Names of the property groups an object kind can be composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TraitKind {
    Name,
    Description,
    Aliases,
    KillChainPhases,
    SeenWindow,
    ObjectRefs,
    Authors,
    Motivation,
    ResourceLevel,
    Goals,
    Roles,
}

impl TraitKind {
    /// The JSON property names owned by this group.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            TraitKind::Name => Name::KEYS,
            TraitKind::Description => Description::KEYS,
            TraitKind::Aliases => Aliases::KEYS,
            TraitKind::KillChainPhases => KillChainPhases::KEYS,
            TraitKind::SeenWindow => SeenWindow::KEYS,
            TraitKind::ObjectRefs => ObjectRefs::KEYS,
            TraitKind::Authors => Authors::KEYS,
            TraitKind::Motivation => Motivation::KEYS,
            TraitKind::ResourceLevel => ResourceLevel::KEYS,
            TraitKind::Goals => Goals::KEYS,
            TraitKind::Roles => Roles::KEYS,
        }
    }
}

/// A borrowed property group of a concrete object.
#[derive(Debug, Clone, Copy)]
pub enum TraitRef<'a> {
    Name(&'a Name),
    Description(&'a Description),
    Aliases(&'a Aliases),
    KillChainPhases(&'a KillChainPhases),
    SeenWindow(&'a SeenWindow),
    ObjectRefs(&'a ObjectRefs),
    Authors(&'a Authors),
    Motivation(&'a Motivation),
    ResourceLevel(&'a ResourceLevel),
    Goals(&'a Goals),
    Roles(&'a Roles),
}

impl TraitRef<'_> {
    pub fn kind(&self) -> TraitKind {
        match self {
            TraitRef::Name(_) => TraitKind::Name,
            TraitRef::Description(_) => TraitKind::Description,
            TraitRef::Aliases(_) => TraitKind::Aliases,
            TraitRef::KillChainPhases(_) => TraitKind::KillChainPhases,
            TraitRef::SeenWindow(_) => TraitKind::SeenWindow,
            TraitRef::ObjectRefs(_) => TraitKind::ObjectRefs,
            TraitRef::Authors(_) => TraitKind::Authors,
            TraitRef::Motivation(_) => TraitKind::Motivation,
            TraitRef::ResourceLevel(_) => TraitKind::ResourceLevel,
            TraitRef::Goals(_) => TraitKind::Goals,
            TraitRef::Roles(_) => TraitKind::Roles,
        }
    }

    pub fn check(&self) -> Outcome {
        match self {
            TraitRef::Name(t) => t.check(),
            TraitRef::Description(t) => t.check(),
            TraitRef::Aliases(t) => t.check(),
            TraitRef::KillChainPhases(t) => t.check(),
            TraitRef::SeenWindow(t) => t.check(),
            TraitRef::ObjectRefs(t) => t.check(),
            TraitRef::Authors(t) => t.check(),
            TraitRef::Motivation(t) => t.check(),
            TraitRef::ResourceLevel(t) => t.check(),
            TraitRef::Goals(t) => t.check(),
            TraitRef::Roles(t) => t.check(),
        }
    }

    /// Compares two groups of the same kind. Groups of different kinds never match.
    pub fn compare(&self, other: &TraitRef<'_>) -> Outcome {
        match (self, other) {
            (TraitRef::Name(a), TraitRef::Name(b)) => a.compare(b),
            (TraitRef::Description(a), TraitRef::Description(b)) => a.compare(b),
            (TraitRef::Aliases(a), TraitRef::Aliases(b)) => a.compare(b),
            (TraitRef::KillChainPhases(a), TraitRef::KillChainPhases(b)) => a.compare(b),
            (TraitRef::SeenWindow(a), TraitRef::SeenWindow(b)) => a.compare(b),
            (TraitRef::ObjectRefs(a), TraitRef::ObjectRefs(b)) => a.compare(b),
            (TraitRef::Authors(a), TraitRef::Authors(b)) => a.compare(b),
            (TraitRef::Motivation(a), TraitRef::Motivation(b)) => a.compare(b),
            (TraitRef::ResourceLevel(a), TraitRef::ResourceLevel(b)) => a.compare(b),
            (TraitRef::Goals(a), TraitRef::Goals(b)) => a.compare(b),
            (TraitRef::Roles(a), TraitRef::Roles(b)) => a.compare(b),
            (a, b) => {
                let mut acc = crate::Audit::new();
                acc.fail(
                    Path::default(),
                    format!("cannot compare {} with {}", a.kind(), b.kind()),
                );
                acc.finish()
            }
        }
    }
}

/// Values accepted by the list `add` methods: a single value, a comma-separated string,
/// or a sequence of values.
///
/// Every value is trimmed and blank values are dropped, so adding an empty input does
/// nothing.
pub trait IntoValues {
    fn into_values(self) -> Vec<String>;
}

impl IntoValues for &str {
    fn into_values(self) -> Vec<String> {
        self.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl IntoValues for String {
    fn into_values(self) -> Vec<String> {
        self.as_str().into_values()
    }
}

impl IntoValues for &String {
    fn into_values(self) -> Vec<String> {
        self.as_str().into_values()
    }
}

impl<S: AsRef<str>> IntoValues for Vec<S> {
    fn into_values(self) -> Vec<String> {
        self.as_slice().into_values()
    }
}

impl<S: AsRef<str>> IntoValues for &[S] {
    fn into_values(self) -> Vec<String> {
        self.iter()
            .map(|v| v.as_ref().trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl<S: AsRef<str>, const N: usize> IntoValues for [S; N] {
    fn into_values(self) -> Vec<String> {
        self.as_slice().into_values()
    }
}

/// Appends `values` to `list`.
pub(crate) fn add_values(list: &mut Vec<String>, values: impl IntoValues) {
    list.extend(values.into_values());
}
