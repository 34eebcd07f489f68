// © 2020, ETH Zurich
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Records, schemas and the field-resolution rule
//!
//! A `Record` instantiates a `Schema` and may carry one embedded record. A
//! field declared by the outer schema shadows a same-named field of the
//! embedded record: unqualified reads and writes resolve to the outer slot
//! when one is declared, and fall through to the embedded record otherwise.
//! Qualified access names the embedded sub-value and always reaches the
//! inner slot. The two slots are independent storage locations, never
//! aliases.
//!
//! # Cloning
//! Own fields are stored in maps from the im crate, so cloning a record
//! between mutation steps is cheap and every mutation can return a fresh
//! value instead of updating in place.

extern crate im;

use im::hashmap::HashMap;
use log::{info, trace};
use std::fmt;
use std::time::Duration;

use super::path::AccessPath;

/// The declared kind of a field slot
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum FieldKind {
    Text,
    Int,
    Float,
    Flag,
    Span,
    TextList,
}

impl FieldKind {
    /// The value a declared slot holds before the first write
    pub fn zero(&self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Int => FieldValue::Int(0),
            FieldKind::Float => FieldValue::Float(0.0),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Span => FieldValue::Span(Duration::from_secs(0)),
            FieldKind::TextList => FieldValue::TextList(im::Vector::new()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Int => write!(f, "int"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::Flag => write!(f, "flag"),
            FieldKind::Span => write!(f, "span"),
            FieldKind::TextList => write!(f, "text list"),
        }
    }
}

/// A value stored in a field slot
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Flag(bool),
    Span(Duration),
    TextList(im::Vector<String>),
}

impl FieldValue {
    pub fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_owned())
    }

    pub fn text_list(values: &[&str]) -> FieldValue {
        FieldValue::TextList(values.iter().map(|v| (*v).to_owned()).collect())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Span(_) => FieldKind::Span,
            FieldValue::TextList(_) => FieldKind::TextList,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => write!(f, "{}", value),
            FieldValue::Int(value) => write!(f, "{}", value),
            FieldValue::Float(value) => write!(f, "{}", value),
            FieldValue::Flag(value) => write!(f, "{}", value),
            FieldValue::Span(value) => write!(f, "{:?}", value),
            FieldValue::TextList(values) => write!(
                f,
                "[{}]",
                values
                    .iter()
                    .map(|v| v.clone())
                    .collect::<Vec<String>>()
                    .join(" ")
            ),
        }
    }
}

/// The ordered field declarations of one record type
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Schema {
    type_name: &'static str,
    fields: Vec<(&'static str, FieldKind)>,
}

impl Schema {
    pub fn new(type_name: &'static str) -> Schema {
        Schema {
            type_name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: &'static str, kind: FieldKind) -> Schema {
        assert!(
            self.fields.iter().all(|(n, _)| *n != name),
            "schema {} declares field {} twice",
            self.type_name,
            name
        );
        self.fields.push((name, kind));
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn declared_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
    }
}

/// A failure to resolve an access path against a record
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ResolveError {
    /// Read of a field no level of the record declares
    UnknownField(String),
    /// Write to a field no level of the record declares
    UndeclaredField(String),
    /// Qualified access on a record with no embedded sub-value
    NoEmbedded(String),
    /// Qualified access naming a different type than the embedded sub-value
    EmbeddedTypeMismatch { wanted: String, found: String },
    /// Write of a value whose kind differs from the declared kind
    KindMismatch {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnknownField(field) => write!(f, "no field {} to read", field),
            ResolveError::UndeclaredField(field) => write!(f, "no field {} to write", field),
            ResolveError::NoEmbedded(type_name) => {
                write!(f, "record embeds no {} sub-value", type_name)
            }
            ResolveError::EmbeddedTypeMismatch { wanted, found } => {
                write!(f, "record embeds {} not {}", found, wanted)
            }
            ResolveError::KindMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "field {} is declared {} but was written a {}",
                field, expected, found
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// One record value: own field slots plus at most one embedded record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Schema,
    own: HashMap<String, FieldValue>,
    embedded: Option<Box<Record>>,
}

// Construction
impl Record {
    /// Creates a zero-valued record with no embedded sub-value
    pub fn new(schema: Schema) -> Record {
        Record {
            schema,
            own: HashMap::new(),
            embedded: None,
        }
    }

    /// Creates a zero-valued record embedding the given record
    pub fn with_embedded(schema: Schema, embedded: Record) -> Record {
        Record {
            schema,
            own: HashMap::new(),
            embedded: Some(Box::new(embedded)),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn embedded(&self) -> Option<&Record> {
        self.embedded.as_deref()
    }
}

// Resolution
impl Record {
    /// Resolves a read against the record
    ///
    /// A field declared at the outer level shadows the embedded record's
    /// same-named field for `Direct` access; an undeclared field promotes
    /// through the embedded record. Declared slots that were never written
    /// read as their kind's zero value.
    pub fn read(&self, path: &AccessPath) -> Result<FieldValue, ResolveError> {
        match path {
            AccessPath::Direct(field) => {
                if let Some(kind) = self.schema.declared_kind(field) {
                    trace!("{} resolves to own slot of {}", path, self.schema.type_name);
                    return Ok(self
                        .own
                        .get(field)
                        .map(|value| value.clone())
                        .unwrap_or_else(|| kind.zero()));
                }
                match &self.embedded {
                    Some(embedded) => {
                        trace!(
                            "{} not declared on {}, promoting through embedded {}",
                            path,
                            self.schema.type_name,
                            embedded.schema.type_name
                        );
                        embedded.read(path)
                    }
                    None => Err(ResolveError::UnknownField(field.clone())),
                }
            }
            AccessPath::Qualified(type_name, field) => {
                let embedded = self.embedded_of(type_name)?;
                embedded.read(&AccessPath::Direct(field.clone()))
            }
        }
    }

    /// Resolves a write against the record, returning the updated record
    ///
    /// The resolution picks the same slot a read of the path would; the
    /// other same-named slot is untouched.
    pub fn write(
        record: Record,
        path: &AccessPath,
        value: FieldValue,
    ) -> Result<Record, ResolveError> {
        match path {
            AccessPath::Direct(field) => {
                if let Some(kind) = record.schema.declared_kind(field) {
                    if kind != value.kind() {
                        return Err(ResolveError::KindMismatch {
                            field: field.clone(),
                            expected: kind,
                            found: value.kind(),
                        });
                    }
                    trace!(
                        "write {} to own slot of {}",
                        path,
                        record.schema.type_name
                    );
                    let Record {
                        schema,
                        own,
                        embedded,
                    } = record;
                    return Ok(Record {
                        schema,
                        own: own.update(field.clone(), value),
                        embedded,
                    });
                }
                let Record {
                    schema,
                    own,
                    embedded,
                } = record;
                match embedded {
                    Some(embedded) => {
                        let embedded = Record::write(*embedded, path, value)?;
                        Ok(Record {
                            schema,
                            own,
                            embedded: Some(Box::new(embedded)),
                        })
                    }
                    None => Err(ResolveError::UndeclaredField(field.clone())),
                }
            }
            AccessPath::Qualified(type_name, field) => {
                let Record {
                    schema,
                    own,
                    embedded,
                } = record;
                let embedded = match embedded {
                    Some(embedded) => embedded,
                    None => return Err(ResolveError::NoEmbedded(type_name.clone())),
                };
                if embedded.schema.type_name != type_name.as_str() {
                    return Err(ResolveError::EmbeddedTypeMismatch {
                        wanted: type_name.clone(),
                        found: embedded.schema.type_name.to_owned(),
                    });
                }
                let embedded =
                    Record::write(*embedded, &AccessPath::Direct(field.clone()), value)?;
                Ok(Record {
                    schema,
                    own,
                    embedded: Some(Box::new(embedded)),
                })
            }
        }
    }

    fn embedded_of(&self, type_name: &str) -> Result<&Record, ResolveError> {
        let embedded = match &self.embedded {
            Some(embedded) => embedded,
            None => return Err(ResolveError::NoEmbedded(type_name.to_owned())),
        };
        if embedded.schema.type_name != type_name {
            return Err(ResolveError::EmbeddedTypeMismatch {
                wanted: type_name.to_owned(),
                found: embedded.schema.type_name.to_owned(),
            });
        }
        Ok(embedded)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let own = self
            .schema
            .fields
            .iter()
            .filter_map(|(name, _)| {
                self.own
                    .get(*name)
                    .map(|value| format!("{}: {}", name, value))
            })
            .collect::<Vec<String>>()
            .join(", ");

        match &self.embedded {
            Some(embedded) => write!(
                f,
                "{} {{ {} }} embedding {}",
                self.schema.type_name, own, embedded
            ),
            None => write!(f, "{} {{ {} }}", self.schema.type_name, own),
        }
    }
}

/// Logs how every declared slot of the record currently resolves
pub fn log_resolution(record: &Record) {
    for (name, _) in record.schema.fields.iter() {
        let path = AccessPath::direct(name);
        match record.read(&path) {
            Ok(value) => info!("{} -> {}", path, value),
            Err(err) => info!("{} -> error: {}", path, err),
        }
    }
}

#[cfg(test)]
mod tests {
    // Note this useful idiom: importing names from outer (for mod tests) scope.
    use super::*;

    fn inner_schema() -> Schema {
        Schema::new("Inner")
            .field("Name", FieldKind::Text)
            .field("Size", FieldKind::Int)
    }

    fn outer_schema() -> Schema {
        Schema::new("Outer")
            .field("Name", FieldKind::Text)
            .field("Active", FieldKind::Flag)
    }

    #[test]
    fn test_outer_declaration_shadows() {
        let record = Record::with_embedded(outer_schema(), Record::new(inner_schema()));
        let record = Record::write(
            record,
            &AccessPath::qualified("Inner", "Name"),
            FieldValue::text("inner"),
        )
        .unwrap();
        let record =
            Record::write(record, &AccessPath::direct("Name"), FieldValue::text("outer")).unwrap();

        assert_eq!(
            record.read(&AccessPath::direct("Name")).unwrap(),
            FieldValue::text("outer"),
            "unqualified read must resolve to the outer slot"
        );
        assert_eq!(
            record.read(&AccessPath::qualified("Inner", "Name")).unwrap(),
            FieldValue::text("inner"),
            "qualified read must bypass the outer slot"
        );
    }

    #[test]
    fn test_promotion_without_outer_declaration() {
        let outer = Schema::new("Outer").field("Active", FieldKind::Flag);
        let record = Record::with_embedded(outer, Record::new(inner_schema()));
        let record = Record::write(
            record,
            &AccessPath::direct("Name"),
            FieldValue::text("inner"),
        )
        .unwrap();

        assert_eq!(
            record.read(&AccessPath::direct("Name")).unwrap(),
            FieldValue::text("inner"),
            "undeclared field must promote through the embedded record"
        );
        assert_eq!(
            record.read(&AccessPath::qualified("Inner", "Name")).unwrap(),
            FieldValue::text("inner"),
            "promoted write must land in the inner slot"
        );
    }

    #[test]
    fn test_zero_value_defaults() {
        let record = Record::with_embedded(outer_schema(), Record::new(inner_schema()));

        assert_eq!(
            record.read(&AccessPath::direct("Name")).unwrap(),
            FieldValue::text(""),
            "unwritten text slot reads as empty"
        );
        assert_eq!(
            record.read(&AccessPath::qualified("Inner", "Size")).unwrap(),
            FieldValue::Int(0),
            "unwritten int slot reads as zero"
        );
        assert_eq!(
            record.read(&AccessPath::direct("Active")).unwrap(),
            FieldValue::Flag(false),
            "unwritten flag slot reads as false"
        );
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let record = Record::new(inner_schema());
        let result = Record::write(record, &AccessPath::direct("Size"), FieldValue::text("big"));
        assert_eq!(
            result.unwrap_err(),
            ResolveError::KindMismatch {
                field: "Size".to_owned(),
                expected: FieldKind::Int,
                found: FieldKind::Text,
            }
        );
    }

    #[test]
    fn test_unknown_and_undeclared_fields() {
        let record = Record::new(inner_schema());
        assert_eq!(
            record.read(&AccessPath::direct("Orbit")).unwrap_err(),
            ResolveError::UnknownField("Orbit".to_owned())
        );
        assert_eq!(
            Record::write(record, &AccessPath::direct("Orbit"), FieldValue::Int(1)).unwrap_err(),
            ResolveError::UndeclaredField("Orbit".to_owned())
        );
    }

    #[test]
    fn test_qualified_access_needs_matching_embedded() {
        let plain = Record::new(outer_schema());
        assert_eq!(
            plain.read(&AccessPath::qualified("Inner", "Name")).unwrap_err(),
            ResolveError::NoEmbedded("Inner".to_owned())
        );

        let record = Record::with_embedded(outer_schema(), Record::new(inner_schema()));
        assert_eq!(
            record.read(&AccessPath::qualified("Other", "Name")).unwrap_err(),
            ResolveError::EmbeddedTypeMismatch {
                wanted: "Other".to_owned(),
                found: "Inner".to_owned(),
            }
        );
    }
}
