// © 2020, ETH Zurich
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two field-resolution demonstrations
//!
//! Each scenario builds a planet record, resolves a couple of field
//! accesses and renders the results as output lines. The caller decides
//! what to do with the lines; the CLI prints them to stdout.

use log::info;

use super::path::AccessPath;
use super::planets;
use super::record::{log_resolution, FieldValue, Record, ResolveError};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Scenario {
    /// One-literal construction; the outer type declares no own name, so the
    /// unqualified name read promotes to the embedded body's name
    LiteralInit,
    /// Zero value then two writes; the outer type declares its own name,
    /// which shadows the embedded body's name for unqualified access
    AssignShadow,
}

impl Scenario {
    pub fn from_name(name: &str) -> Option<Scenario> {
        match name {
            "literal-init" => Some(Scenario::LiteralInit),
            "assign-shadow" => Some(Scenario::AssignShadow),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::LiteralInit => "literal-init",
            Scenario::AssignShadow => "assign-shadow",
        }
    }

    /// Runs the scenario and returns its rendered output lines
    pub fn run(&self) -> Result<Vec<String>, ResolveError> {
        info!("[enter] scenario {}", self.name());
        let lines = match self {
            Scenario::LiteralInit => literal_init(),
            Scenario::AssignShadow => assign_shadow(),
        }?;
        info!("[exit] scenario {}", self.name());
        Ok(lines)
    }
}

fn literal_init() -> Result<Vec<String>, ResolveError> {
    let planet = planets::planet_promoted();
    let planet = Record::write(
        planet,
        &AccessPath::qualified("CelestialBody", "Name"),
        FieldValue::text("Venus"),
    )?;
    let planet = Record::write(
        planet,
        &AccessPath::qualified("CelestialBody", "Diameter"),
        FieldValue::Int(4879),
    )?;
    let planet = Record::write(
        planet,
        &AccessPath::direct("HasAtmosphere"),
        FieldValue::Flag(true),
    )?;
    log_resolution(&planet);

    let name = planet.read(&AccessPath::direct("Name"))?;
    let diameter = planet.read(&AccessPath::qualified("CelestialBody", "Diameter"))?;
    Ok(vec![format!("{} {}", name, diameter)])
}

fn assign_shadow() -> Result<Vec<String>, ResolveError> {
    let planet = planets::planet();
    let inner_name = AccessPath::qualified("CelestialBody", "Name");
    let outer_name = AccessPath::direct("Name");

    let planet = Record::write(planet, &inner_name, FieldValue::text("Mercury"))?;
    // Now refers to the planet's own name slot.
    let planet = Record::write(planet, &outer_name, FieldValue::text("Venus"))?;
    log_resolution(&planet);

    Ok(vec![
        format!("p.{}: {}", outer_name, planet.read(&outer_name)?),
        format!("p.{}: {}", inner_name, planet.read(&inner_name)?),
    ])
}
