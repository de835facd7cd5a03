//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `sqlite` feature)
///
/// # Example
///
/// ```rust
/// # use site_core::define_id;
/// define_id!(ContactId);
/// define_id!(ProjectId);
///
/// let contact_id = ContactId::new(1);
/// let project_id = ProjectId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ContactId = project_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "sqlite")]
        impl ::sqlx::Type<::sqlx::Sqlite> for $name {
            fn type_info() -> <::sqlx::Sqlite as ::sqlx::Database>::TypeInfo {
                <i32 as ::sqlx::Type<::sqlx::Sqlite>>::type_info()
            }

            fn compatible(ty: &<::sqlx::Sqlite as ::sqlx::Database>::TypeInfo) -> bool {
                <i32 as ::sqlx::Type<::sqlx::Sqlite>>::compatible(ty)
            }
        }

        #[cfg(feature = "sqlite")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Sqlite> for $name {
            fn decode(
                value: <::sqlx::Sqlite as ::sqlx::Database>::ValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <i32 as ::sqlx::Decode<::sqlx::Sqlite>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "sqlite")]
        impl<'q> ::sqlx::Encode<'q, ::sqlx::Sqlite> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <::sqlx::Sqlite as ::sqlx::Database>::ArgumentBuffer<'q>,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <i32 as ::sqlx::Encode<::sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

// Define standard entity IDs
define_id!(AdminId);
define_id!(ContactId);
define_id!(PricingPlanId);
define_id!(ProjectId);
define_id!(SocialLinkId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_bare_number() {
        let id = ProjectId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: ProjectId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed.as_i32(), 7);
    }

    #[test]
    fn test_id_conversions() {
        let id = ContactId::from(3);
        assert_eq!(i32::from(id), 3);
        assert_eq!(id.to_string(), "3");
    }
}
