//! A [`Nullable`] is a thin element wrapper that gives any container in this
//! crate null-friendly slot semantics: a slot can hold a value or hold
//! nothing, absent slots compare equal only to other absent slots, and
//! rendering an absent slot produces the literal text `null`.

use std::fmt;

/// An element slot that may be absent.
///
/// Containers in this crate are fully generic, so "a list that allows nulls"
/// is spelled `SinglyList<Nullable<T>>`. The wrapper is a transparent
/// `Option<T>` newtype; its only behavioral additions are a [`fmt::Display`]
/// that prints `null` for the absent case and the usual null-aware equality
/// (`null == null`, `null != value`).
///
/// # Examples
/// ```
/// use catena::{DynArray, Nullable};
/// let mut arr = DynArray::new();
/// arr.push(Nullable::of(1));
/// arr.push(Nullable::null());
/// arr.push(Nullable::of(3));
/// assert_eq!(arr.index_of(&Nullable::null()), Some(1));
/// assert_eq!(arr.to_string(), "[1, null, 3]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nullable<T>(pub Option<T>);

impl<T> Nullable<T> {
    /// The absent slot.
    pub const fn null() -> Self {
        Nullable(None)
    }

    /// A slot holding `value`.
    pub const fn of(value: T) -> Self {
        Nullable(Some(value))
    }

    /// Returns true if the slot is absent.
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Borrows the held value, if any.
    pub const fn as_ref(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Unwraps back into the underlying `Option`.
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::null()
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable(Some(value))
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Nullable(value)
    }
}

impl<T: fmt::Display> fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("null"),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Nullable<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'src, T: serde::Deserialize<'src>> serde::Deserialize<'src> for Nullable<T> {
    fn deserialize<D: serde::Deserializer<'src>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Nullable(Option::<T>::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_null_literal() {
        let slot: Nullable<i32> = Nullable::null();
        assert_eq!(slot.to_string(), "null");
        assert_eq!(Nullable::of(7).to_string(), "7");
    }

    #[test]
    fn null_equality() {
        assert_eq!(Nullable::<i32>::null(), Nullable::null());
        assert_ne!(Nullable::of(1), Nullable::null());
        assert_eq!(Nullable::of(1), Nullable::of(1));
    }

    #[test]
    fn conversions() {
        assert_eq!(Nullable::from(5), Nullable::of(5));
        assert_eq!(Nullable::<i32>::from(None), Nullable::null());
        assert_eq!(Nullable::of(5).into_inner(), Some(5));
    }
}
