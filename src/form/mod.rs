//! The form collaborator.
//!
//! The submit controller never touches a concrete UI. It reads values from and
//! renders into a [`FormView`], which a GUI, a WASM binding or a test
//! implements. [`MemoryForm`] keeps everything in memory.

use std::fmt;

use crate::types::{FieldId, FormValues};

/// Where an error annotation is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorAnchor {
    /// Next to an input field.
    Field(FieldId),
    /// Next to the submit control.
    Submit,
}

impl ErrorAnchor {
    /// Returns the element id of the anchor.
    pub fn id(self) -> &'static str {
        match self {
            ErrorAnchor::Field(field) => field.key(),
            ErrorAnchor::Submit => "submit",
        }
    }
}

impl From<FieldId> for ErrorAnchor {
    fn from(field: FieldId) -> Self {
        ErrorAnchor::Field(field)
    }
}

impl fmt::Display for ErrorAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Host-side view of the QR form.
pub trait FormView: Send {
    /// Current value of a field; empty if the field has no value.
    fn value(&self, field: FieldId) -> String;

    /// Removes every error annotation and resets every invalid marker.
    fn clear_errors(&mut self);

    /// Attaches `message` next to `anchor` and marks the anchor invalid.
    fn show_error(&mut self, anchor: ErrorAnchor, message: &str);

    /// Shows the generated QR code, given as a `data:` URL.
    fn show_image(&mut self, data_url: String);

    /// Reads all ten fields at once.
    fn values(&self) -> FormValues {
        FieldId::ALL
            .into_iter()
            .map(|field| (field, self.value(field)))
            .collect()
    }
}

/// An error annotation rendered by [`MemoryForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Where the message is shown.
    pub anchor: ErrorAnchor,
    /// The message text.
    pub message: String,
}

/// In-memory [`FormView`].
///
/// Annotations are kept in the order they were shown. The output image starts
/// hidden and becomes visible on the first successful submission.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    values: FormValues,
    annotations: Vec<Annotation>,
    invalid: Vec<ErrorAnchor>,
    image: Option<String>,
}

impl MemoryForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form pre-filled with `values`.
    pub fn from_values(values: FormValues) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Sets a field value.
    pub fn with_value(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.values.set(field, value);
        self
    }

    /// Sets a field value in place, as a user typing would.
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.set(field, value);
    }

    /// All annotations currently shown.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Annotations attached to `anchor`.
    pub fn annotations_for(&self, anchor: impl Into<ErrorAnchor>) -> Vec<&str> {
        let anchor = anchor.into();
        self.annotations
            .iter()
            .filter(|a| a.anchor == anchor)
            .map(|a| a.message.as_str())
            .collect()
    }

    /// Returns true if the anchor is currently marked invalid.
    pub fn is_marked_invalid(&self, anchor: impl Into<ErrorAnchor>) -> bool {
        self.invalid.contains(&anchor.into())
    }

    /// Returns true if the output image is visible.
    pub fn is_image_visible(&self) -> bool {
        self.image.is_some()
    }

    /// Source of the output image, if visible.
    pub fn image_source(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl FormView for MemoryForm {
    fn value(&self, field: FieldId) -> String {
        self.values.get(field).to_string()
    }

    fn clear_errors(&mut self) {
        self.annotations.clear();
        self.invalid.clear();
    }

    fn show_error(&mut self, anchor: ErrorAnchor, message: &str) {
        self.annotations.push(Annotation {
            anchor,
            message: message.to_string(),
        });
        if !self.invalid.contains(&anchor) {
            self.invalid.push(anchor);
        }
    }

    fn show_image(&mut self, data_url: String) {
        self.image = Some(data_url);
    }
}
