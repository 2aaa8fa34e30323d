//! Persistence of decoded objects.

use crate::{Error, Object};

/// A destination for objects, such as a database or an index.
///
/// A store is used for a scope and then closed; objects added after `close` are not
/// expected to be accepted.
pub trait Store {
    fn add_object(&mut self, object: &Object) -> Result<(), Error>;

    /// Flushes and releases the store.
    fn close(self) -> Result<(), Error>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Collects copies of the objects in memory.
impl Store for Vec<Object> {
    fn add_object(&mut self, object: &Object) -> Result<(), Error> {
        self.push(object.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bundle, Tool};

    /// Accepts only objects that validate.
    #[derive(Default)]
    struct StrictStore {
        accepted: usize,
    }

    impl Store for StrictStore {
        fn add_object(&mut self, object: &Object) -> Result<(), Error> {
            let outcome = object.validate();
            if !outcome.is_ok() {
                return Err(Error::validation(format!(
                    "{} has {} problem(s)",
                    object.id(),
                    outcome.problem_count()
                )));
            }
            self.accepted += 1;
            Ok(())
        }
    }

    #[test]
    fn rejection_reports_position() {
        let mut named = Tool::new();
        named.name.set("VNC");
        let bundle: Bundle = [named, Tool::new()].into_iter().collect();

        let mut store = StrictStore::default();
        let err = bundle.store_into(&mut store).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.path().to_string(), "objects[1]");
        assert_eq!(store.accepted, 1);
    }
}
