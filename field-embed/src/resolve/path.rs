// © 2020, ETH Zurich
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Access paths into an embedded record
//!
//! An access path is a way to refer to one field slot of a record. For
//! example:
//!
//! ```Name``` or ```CelestialBody.Name```
//!
//! The first is an unqualified (direct) access, subject to shadowing and
//! promotion; the second names the embedded sub-value explicitly and always
//! reaches the inner slot.

use std::fmt;

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum AccessPath {
    /// Unqualified access through the outer record
    Direct(String),
    /// Access through the embedded sub-value of the given type name
    Qualified(String, String),
}

impl AccessPath {
    pub fn direct(field: &str) -> AccessPath {
        AccessPath::Direct(field.to_owned())
    }

    pub fn qualified(type_name: &str, field: &str) -> AccessPath {
        AccessPath::Qualified(type_name.to_owned(), field.to_owned())
    }

    pub fn field(&self) -> &str {
        match self {
            AccessPath::Direct(field) => field,
            AccessPath::Qualified(_, field) => field,
        }
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessPath::Direct(field) => write!(f, "{}", field),
            AccessPath::Qualified(type_name, field) => write!(f, "{}.{}", type_name, field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_direct() {
        assert_eq!(format!("{}", AccessPath::direct("Name")), "Name");
    }

    #[test]
    fn test_display_qualified() {
        assert_eq!(
            format!("{}", AccessPath::qualified("CelestialBody", "Name")),
            "CelestialBody.Name"
        );
    }
}
