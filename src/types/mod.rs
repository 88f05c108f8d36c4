//! Form model types.
//!
//! The ten NBS IPS fields, a snapshot of their values, the JSON payload sent
//! to the generator and the field-level error record.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Identifier of one of the ten NBS IPS QR form fields.
///
/// The identifier doubles as the JSON key sent to the API and as the id of
/// the input element in the hosting form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    /// Identification code (`PR`, `PT`, `PK`, `EK`).
    K,
    /// Version.
    V,
    /// Character set code.
    C,
    /// Payee account number.
    R,
    /// Payee name and address.
    N,
    /// Currency and amount.
    I,
    /// Payer name and address.
    P,
    /// Payment code.
    SF,
    /// Purpose of payment.
    S,
    /// Model and reference number.
    RO,
}

impl FieldId {
    /// All fields, in form order.
    pub const ALL: [FieldId; 10] = [
        FieldId::K,
        FieldId::V,
        FieldId::C,
        FieldId::R,
        FieldId::N,
        FieldId::I,
        FieldId::P,
        FieldId::SF,
        FieldId::S,
        FieldId::RO,
    ];

    /// Fields that must be non-blank before a payload is sent.
    pub const REQUIRED: [FieldId; 7] = [
        FieldId::K,
        FieldId::V,
        FieldId::C,
        FieldId::R,
        FieldId::N,
        FieldId::I,
        FieldId::SF,
    ];

    /// Fields that may be left empty.
    pub const OPTIONAL: [FieldId; 3] = [FieldId::P, FieldId::S, FieldId::RO];

    /// Returns the wire key / element id.
    pub fn key(self) -> &'static str {
        match self {
            FieldId::K => "K",
            FieldId::V => "V",
            FieldId::C => "C",
            FieldId::R => "R",
            FieldId::N => "N",
            FieldId::I => "I",
            FieldId::P => "P",
            FieldId::SF => "SF",
            FieldId::S => "S",
            FieldId::RO => "RO",
        }
    }

    /// Returns true for members of [`FieldId::REQUIRED`].
    pub fn is_required(self) -> bool {
        !Self::OPTIONAL.contains(&self)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How empty optional fields end up in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionalFields {
    /// Leave `P`, `S` and `RO` out when they are empty.
    #[default]
    Omit,
    /// Always send `P`, `S` and `RO`, as `""` when empty.
    IncludeEmpty,
}

/// Current values of the form fields. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: HashMap<FieldId, String>,
}

impl FormValues {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value.
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field value in place.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Returns a field value, or `""` if it was never set.
    pub fn get(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Returns true if the field has no characters at all.
    pub fn is_empty(&self, field: FieldId) -> bool {
        self.get(field).is_empty()
    }

    /// Returns true if the field is empty or holds only whitespace and
    /// byte order marks.
    pub fn is_blank(&self, field: FieldId) -> bool {
        self.get(field)
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
            .is_empty()
    }
}

impl<K: Into<String>> FromIterator<(FieldId, K)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (FieldId, K)>>(iter: T) -> Self {
        let mut values = FormValues::new();
        for (field, value) in iter {
            values.set(field, value);
        }
        values
    }
}

/// JSON body sent to the QR generator.
///
/// Values are sent verbatim; trimming only affects the required-field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    entries: Vec<(FieldId, String)>,
}

impl Payload {
    /// Builds a payload from a form snapshot.
    pub fn from_values(values: &FormValues, optional: OptionalFields) -> Self {
        let entries = FieldId::ALL
            .into_iter()
            .filter(|field| {
                field.is_required()
                    || optional == OptionalFields::IncludeEmpty
                    || !values.is_empty(*field)
            })
            .map(|field| (field, values.get(field).to_string()))
            .collect();

        Self { entries }
    }

    /// Returns the value sent for a field, if the key is present.
    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the key is present.
    pub fn contains(&self, field: FieldId) -> bool {
        self.get(field).is_some()
    }

    /// Fields present, in wire order.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes to the JSON request body.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

/// Why a field blocked submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The value does not match the field's format.
    Format,
    /// A required field is empty.
    Required,
}

/// A field-level error, shown inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field.
    pub field: FieldId,
    /// Error kind.
    pub kind: FieldErrorKind,
    /// Localized message.
    pub message: &'static str,
}

impl FieldError {
    /// Creates a format error.
    pub fn format(field: FieldId, message: &'static str) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Format,
            message,
        }
    }

    /// Creates a required-field error.
    pub fn required(field: FieldId) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Required,
            message: crate::validation::REQUIRED_MESSAGE,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
