// © 2020, ETH Zurich
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The demonstration domain: celestial bodies and planets
//!
//! Two planet shapes exist because the demonstrations differ in whether the
//! outer type declares its own name. `PLANET` declares `Name` at the outer
//! level, so unqualified access shadows the embedded body's name.
//! `PLANET_PROMOTED` declares no own name, so unqualified access promotes
//! through the embedded body.

use lazy_static::lazy_static;
use log::trace;

use super::record::{FieldKind, Record, Schema};

lazy_static! {
    pub static ref CELESTIAL_BODY: Schema = Schema::new("CelestialBody")
        .field("Name", FieldKind::Text)
        .field("Mass", FieldKind::Int)
        .field("Diameter", FieldKind::Int)
        .field("Gravity", FieldKind::Float)
        .field("RotationPeriod", FieldKind::Span);
    pub static ref PLANET: Schema = Schema::new("Planet")
        .field("Name", FieldKind::Text)
        .field("HasAtmosphere", FieldKind::Flag)
        .field("HasMagneticField", FieldKind::Flag)
        .field("Satellites", FieldKind::TextList);
    pub static ref PLANET_PROMOTED: Schema = Schema::new("Planet")
        .field("HasAtmosphere", FieldKind::Flag)
        .field("HasMagneticField", FieldKind::Flag)
        .field("Satellites", FieldKind::TextList);
}

/// Creates a zero-valued planet of the shadowing shape with an embedded body
pub fn planet() -> Record {
    Record::with_embedded(PLANET.clone(), Record::new(CELESTIAL_BODY.clone()))
}

/// Creates a zero-valued planet of the promoting shape with an embedded body
pub fn planet_promoted() -> Record {
    Record::with_embedded(PLANET_PROMOTED.clone(), Record::new(CELESTIAL_BODY.clone()))
}

struct RosterEntry {
    record: Record,
    previous: Option<usize>,
    next: Option<usize>,
}

/// A list of planets with previous/next sibling links
///
/// The links are indices into the roster, not owning pointers, so linking
/// planets into a list never creates a cyclic ownership structure.
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Roster {
        Roster {
            entries: Vec::new(),
        }
    }

    /// Appends a planet and links it to the current tail, returning its index
    pub fn push(&mut self, record: Record) -> usize {
        let index = self.entries.len();
        let previous = index.checked_sub(1);
        if let Some(tail) = previous {
            self.entries[tail].next = Some(index);
            trace!("linking roster entry {} -> {}", tail, index);
        }
        self.entries.push(RosterEntry {
            record,
            previous,
            next: None,
        });
        index
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.entries.get(index).map(|entry| &entry.record)
    }

    pub fn previous(&self, index: usize) -> Option<usize> {
        self.entries.get(index).and_then(|entry| entry.previous)
    }

    pub fn next(&self, index: usize) -> Option<usize> {
        self.entries.get(index).and_then(|entry| entry.next)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::path::AccessPath;
    use crate::resolve::record::FieldValue;

    #[test]
    fn test_planet_shapes_differ_in_name_declaration() {
        assert_eq!(PLANET.declared_kind("Name"), Some(FieldKind::Text));
        assert_eq!(PLANET_PROMOTED.declared_kind("Name"), None);
        assert_eq!(
            CELESTIAL_BODY.declared_kind("Name"),
            Some(FieldKind::Text),
            "both shapes promote name reads from the embedded body"
        );
    }

    #[test]
    fn test_roster_links_are_navigable_both_ways() {
        let mut roster = Roster::new();
        let mercury = roster.push(
            Record::write(
                planet(),
                &AccessPath::direct("Name"),
                FieldValue::text("Mercury"),
            )
            .unwrap(),
        );
        let venus = roster.push(
            Record::write(
                planet(),
                &AccessPath::direct("Name"),
                FieldValue::text("Venus"),
            )
            .unwrap(),
        );

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.next(mercury), Some(venus));
        assert_eq!(roster.previous(venus), Some(mercury));
        assert_eq!(roster.previous(mercury), None);
        assert_eq!(roster.next(venus), None);
        assert_eq!(
            roster
                .get(venus)
                .unwrap()
                .read(&AccessPath::direct("Name"))
                .unwrap(),
            FieldValue::text("Venus")
        );
    }
}
