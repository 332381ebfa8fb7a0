//! Tri-state argument wrapper.
//!
//! Endpoint arguments distinguish "the caller did not pass this" from "the caller passed
//! an explicit null". [`OptionalValue`] keeps the two apart so encoders can drop the
//! first and still send the second.
//!
//! Struct fields use it together with serde's field attributes:
//!
//! ```
//! use serde::Serialize;
//! use sideko_core::OptionalValue;
//!
//! #[derive(Serialize)]
//! struct UpdateAsset {
//!     #[serde(skip_serializing_if = "OptionalValue::is_not_given")]
//!     name: OptionalValue<String>,
//! }
//!
//! let omitted = UpdateAsset { name: OptionalValue::NotGiven };
//! assert_eq!(serde_json::to_string(&omitted).unwrap(), "{}");
//!
//! let cleared = UpdateAsset { name: OptionalValue::Null };
//! assert_eq!(serde_json::to_string(&cleared).unwrap(), r#"{"name":null}"#);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An argument that may be omitted, explicitly null, or present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalValue<T> {
    /// The caller did not supply the argument; it never reaches the wire.
    NotGiven,
    /// The caller supplied an explicit null.
    Null,
    /// The caller supplied a value.
    Value(T),
}

impl<T> OptionalValue<T> {
    /// Returns true if the argument was omitted.
    #[must_use]
    pub const fn is_not_given(&self) -> bool {
        matches!(self, Self::NotGiven)
    }

    /// Returns true if the argument is an explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if a real value is present.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Borrow the inner value.
    #[must_use]
    pub fn as_ref(&self) -> OptionalValue<&T> {
        match self {
            Self::NotGiven => OptionalValue::NotGiven,
            Self::Null => OptionalValue::Null,
            Self::Value(value) => OptionalValue::Value(value),
        }
    }

    /// Map the present value, keeping `NotGiven` and `Null` as they are.
    pub fn map<U, F>(self, f: F) -> OptionalValue<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::NotGiven => OptionalValue::NotGiven,
            Self::Null => OptionalValue::Null,
            Self::Value(value) => OptionalValue::Value(f(value)),
        }
    }

    /// Returns the present value, if any.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::NotGiven | Self::Null => None,
        }
    }

    /// `None` when omitted, `Some(None)` for null, `Some(Some(v))` for a value.
    #[must_use]
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::NotGiven => None,
            Self::Null => Some(None),
            Self::Value(value) => Some(Some(value)),
        }
    }

    /// Treat `None` as an explicit null.
    #[must_use]
    pub fn from_nullable(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }

    /// Treat `None` as an omitted argument.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::NotGiven, Self::Value)
    }
}

impl<T> Default for OptionalValue<T> {
    fn default() -> Self {
        Self::NotGiven
    }
}

impl<T> From<T> for OptionalValue<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for OptionalValue<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // NotGiven only reaches here when a container forgot `skip_serializing_if`.
        match self {
            Self::NotGiven | Self::Null => serializer.serialize_none(),
            Self::Value(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptionalValue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from_nullable)
    }
}
