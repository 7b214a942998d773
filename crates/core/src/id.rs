// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Numeric identifiers assigned by the admin server.

/// Define a newtype ID wrapper around `i64`.
///
/// Generates `new()`, `get()`, `Display`, `From<i64>`, `FromStr` and
/// `PartialEq<i64>` implementations. Serializes as a bare integer.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct MyId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl PartialEq<i64> for $name {
            fn eq(&self, other: &i64) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id! {
    /// Identifier of a scheduled job definition.
    ///
    /// One job id maps to at most one live worker on an executor.
    pub struct JobId;
}

define_id! {
    /// Identifier of one trigger instance.
    ///
    /// The admin server allocates a fresh log id for every trigger and uses
    /// it to correlate the callback it eventually receives. Within a worker
    /// the log id is the deduplication key.
    pub struct LogId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
