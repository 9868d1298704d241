//! Shared record fixtures for integration tests.

use anystruct::Reflect;

/// A record with one exported integer field.
#[derive(Clone, Debug, Reflect)]
pub struct A {
    pub n: i64,
}

/// A record with one exported string field.
#[derive(Clone, Debug, Reflect)]
pub struct B {
    pub s: String,
}

/// Like [`A`] but tagged.
#[derive(Clone, Debug, Reflect)]
pub struct C {
    #[anystruct(tag = "json:\"n\"")]
    pub n: i64,
}

/// Like [`B`] but tagged.
#[derive(Clone, Debug, Reflect)]
pub struct D {
    #[anystruct(tag = "json:\"s\"")]
    pub s: String,
}

/// A record whose only field is private.
#[derive(Clone, Debug, Reflect)]
pub struct E {
    n: i64,
}

impl E {
    /// Build a value with the private field set.
    #[must_use]
    pub const fn new(n: i64) -> Self {
        Self { n }
    }

    /// The private field.
    #[must_use]
    pub const fn n(&self) -> i64 {
        self.n
    }
}

/// Shares the field name `n` with [`A`] but with another type.
#[derive(Clone, Debug, Reflect)]
pub struct A2 {
    #[anystruct(tag = "db:\"n\"")]
    pub n: String,
}
