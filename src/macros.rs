//! Declarative helpers shared by the domain modules.

/// Implements the common surface of a UUID-backed identifier newtype.
///
/// The type must be a tuple struct over [`uuid::Uuid`]. Adds `new` (random
/// v4), `from_uuid`, `into_inner`, [`Default`], [`AsRef<Uuid>`] and a
/// hyphenated [`Display`](std::fmt::Display).
macro_rules! impl_uuid_id {
    ($name:ident, $what:literal) => {
        impl $name {
            #[doc = concat!("Creates a new random ", $what, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            #[doc = concat!("Wraps an existing UUID as a ", $what, " identifier.")]
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<::uuid::Uuid> for $name {
            fn as_ref(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}
