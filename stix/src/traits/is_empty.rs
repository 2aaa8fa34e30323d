use indexmap::IndexMap;

use crate::{Identifier, Timestamp};

/// Whether a value counts as absent for serialization and required-property checks.
pub trait IsEmpty {
    fn is_empty(&self) -> bool;
}

impl<T: IsEmpty> IsEmpty for Option<T> {
    fn is_empty(&self) -> bool {
        match self {
            Some(v) => v.is_empty(),
            None => true,
        }
    }
}

impl<T: IsEmpty> IsEmpty for Box<T> {
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> IsEmpty for IndexMap<K, V, S> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for String {
    fn is_empty(&self) -> bool {
        self.trim().is_empty()
    }
}

impl IsEmpty for Identifier {
    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl IsEmpty for Timestamp {
    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

// Scalars are present as soon as they are set.

impl IsEmpty for bool {
    fn is_empty(&self) -> bool {
        false
    }
}

impl IsEmpty for u64 {
    fn is_empty(&self) -> bool {
        false
    }
}
