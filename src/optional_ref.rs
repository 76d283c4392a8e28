/// A borrowed view over a value inside a document that may or may not be there.
///
/// It never owns what it points at, so it can't outlive the tree it was taken from.
/// Absence is the normal case to handle with [`OptionalRef::value_or`] or
/// [`OptionalRef::has_value`]; [`OptionalRef::value`] is only for callers that
/// already know the value exists and aborts the process otherwise.
#[derive(Debug, PartialEq)]
pub struct OptionalRef<'a, T>
    where T: ?Sized
{
    reference: Option<&'a T>,
}

impl<'a, T: ?Sized> OptionalRef<'a, T> {
    pub fn new(reference: &'a T) -> Self {
        OptionalRef {
            reference: Some(reference),
        }
    }

    pub fn empty() -> Self {
        OptionalRef {
            reference: None,
        }
    }

    pub fn has_value(&self) -> bool {
        self.reference.is_some()
    }

    /// Returns the referent.
    ///
    /// Calling this on an empty reference is a bug in the caller, so the process is
    /// aborted rather than unwound.
    pub fn value(&self) -> &'a T {
        match self.reference {
            Some(reference) => reference,
            None => {
                tracing::error!("forced access on an empty OptionalRef");
                std::process::abort()
            }
        }
    }

    pub fn value_or(&self, default_value: &'a T) -> &'a T {
        self.reference.unwrap_or(default_value)
    }

    pub fn as_option(&self) -> Option<&'a T> {
        self.reference
    }
}

impl<'a, T: Clone> OptionalRef<'a, T> {
    /// Like [`OptionalRef::value_or`], but takes the default by value and only moves it
    /// out when there is no referent.
    pub fn value_or_owned(&self, default_value: T) -> T {
        match self.reference {
            Some(reference) => reference.clone(),
            None => default_value,
        }
    }

    pub fn value_or_else<F>(&self, default_fn: F) -> T
        where F: FnOnce() -> T
    {
        match self.reference {
            Some(reference) => reference.clone(),
            None => default_fn(),
        }
    }
}

impl<'a, T: ?Sized> Clone for OptionalRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: ?Sized> Copy for OptionalRef<'a, T> {}

impl<'a, T: ?Sized> Default for OptionalRef<'a, T> {
    fn default() -> Self {
        OptionalRef::empty()
    }
}

impl<'a, T: ?Sized> From<Option<&'a T>> for OptionalRef<'a, T> {
    fn from(reference: Option<&'a T>) -> Self {
        OptionalRef {
            reference,
        }
    }
}

impl<'a, T: ?Sized> From<&'a T> for OptionalRef<'a, T> {
    fn from(reference: &'a T) -> Self {
        OptionalRef::new(reference)
    }
}

#[cfg(test)]
mod optional_ref_tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let maybe_int = OptionalRef::<i32>::default();
        assert!(!maybe_int.has_value());
        assert_eq!(maybe_int.as_option(), None);
    }

    #[test]
    fn test_value_or_returns_default_when_empty() {
        let maybe_int = OptionalRef::<i32>::empty();
        assert_eq!(*maybe_int.value_or(&42), 42);
        assert_eq!(maybe_int.value_or_owned(42), 42);
    }

    #[test]
    fn test_value_or_returns_referent_when_set() {
        let stored = 16;
        let maybe_int = OptionalRef::new(&stored);
        assert!(maybe_int.has_value());
        assert_eq!(*maybe_int.value(), 16);
        assert_eq!(*maybe_int.value_or(&42), 16);
        assert_eq!(maybe_int.value_or_owned(42), 16);
    }

    #[test]
    fn test_value_or_else_is_lazy() {
        let stored = String::from("stored");
        let maybe_str = OptionalRef::new(&stored);
        let value = maybe_str.value_or_else(|| panic!("default must not be built"));
        assert_eq!(value, "stored");
        assert_eq!(OptionalRef::<String>::empty().value_or_else(|| String::from("built")), "built");
    }

    #[test]
    fn test_value_or_returns_the_same_referent() {
        let stored = String::from("stored");
        let fallback = String::from("fallback");
        let maybe_str = OptionalRef::new(&stored);
        assert!(std::ptr::eq(maybe_str.value_or(&fallback), &stored));
    }

    #[test]
    fn test_unsized_referent() {
        let stored = String::from("text");
        let maybe_str: OptionalRef<str> = OptionalRef::new(stored.as_str());
        assert_eq!(maybe_str.value_or("other"), "text");
        assert_eq!(OptionalRef::<str>::empty().value_or("other"), "other");
    }

    #[test]
    fn test_from_option() {
        let stored = 1.5;
        assert!(OptionalRef::from(Some(&stored)).has_value());
        assert!(!OptionalRef::<f64>::from(None).has_value());
    }
}
