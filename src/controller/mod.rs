//! Submit handling for the QR form.
//!
//! One call to [`SubmitController::submit`] is one submit attempt:
//!
//! 1. clear the annotations left by the previous attempt
//! 2. read the ten fields and build the payload
//! 3. validate formats and required fields, annotating every failure
//! 4. if anything failed, stop without touching the network
//! 5. otherwise post the payload once and render the image, or show a single
//!    generic error next to the submit control
//!
//! Attempts are not serialized: two overlapping calls both reach the API.

use std::sync::Arc;
use tracing::instrument;

use crate::errors::QrError;
use crate::form::{ErrorAnchor, FormView};
use crate::image::QrImage;
use crate::services::GenerateService;
use crate::types::{FieldError, OptionalFields, Payload};
use crate::validation::validate_form;

/// Message shown next to the submit control when generation fails.
pub const SUBMIT_FAILURE_MESSAGE: &str =
    "Greška pri generisanju QR koda. Molimo proverite unete podatke.";

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Blocked {
        /// Every error shown, in display order.
        errors: Vec<FieldError>,
    },
    /// The image was generated and shown.
    Rendered(QrImage),
    /// The request failed; the generic message was shown.
    Failed(QrError),
}

impl SubmitOutcome {
    /// Returns true if the image was rendered.
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered(_))
    }

    /// Returns true if validation stopped the attempt.
    pub fn is_blocked(&self) -> bool {
        matches!(self, SubmitOutcome::Blocked { .. })
    }

    /// Field errors of a blocked attempt; empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SubmitOutcome::Blocked { errors } => errors,
            _ => &[],
        }
    }
}

/// Drives a submit attempt against a [`FormView`].
#[derive(Clone)]
pub struct SubmitController {
    generate: Arc<GenerateService>,
    optional_fields: OptionalFields,
}

impl SubmitController {
    /// Creates a controller around a generate service.
    pub fn new(generate: Arc<GenerateService>, optional_fields: OptionalFields) -> Self {
        Self {
            generate,
            optional_fields,
        }
    }

    /// Runs one submit attempt.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, form: &mut dyn FormView) -> SubmitOutcome {
        form.clear_errors();

        let values = form.values();
        let payload = Payload::from_values(&values, self.optional_fields);

        let errors = validate_form(&values);
        if !errors.is_empty() {
            for error in &errors {
                form.show_error(ErrorAnchor::Field(error.field), error.message);
            }
            tracing::debug!(errors = errors.len(), "Submission blocked by validation");
            return SubmitOutcome::Blocked { errors };
        }

        match self.generate.create(&payload).await {
            Ok(image) => {
                tracing::info!(bytes = image.len(), mime = %image.mime(), "QR code generated");
                form.show_image(image.to_data_url());
                SubmitOutcome::Rendered(image)
            }
            Err(error) => {
                tracing::error!(error = %error, "QR code generation failed");
                form.show_error(ErrorAnchor::Submit, SUBMIT_FAILURE_MESSAGE);
                SubmitOutcome::Failed(error)
            }
        }
    }
}

impl std::fmt::Debug for SubmitController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitController")
            .field("optional_fields", &self.optional_fields)
            .finish()
    }
}
