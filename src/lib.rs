//! NBS IPS QR Client Library
//!
//! Validates the payment fields of a Serbian NBS IPS QR code (account number,
//! amount, payment code, model and reference number) and submits them to the
//! NBS QR generation API, returning the rendered image.
//!
//! # Features
//!
//! - **Validators**: pure predicates for every regulated field, with the
//!   official Serbian rejection messages
//! - **Submit Controller**: clear, validate, build payload, call API, render
//!   result or a single generic error
//! - **Pluggable Form View**: any host (GUI, WASM binding, test double)
//!   implements [`FormView`]; [`MemoryForm`] is provided
//! - **Observability**: `tracing` instrumentation and a subscriber helper
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nbs_ips_qr::{FieldId, MemoryForm, QrClient, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QrClient::builder().build()?;
//!
//!     let mut form = MemoryForm::new()
//!         .with_value(FieldId::K, "PR")
//!         .with_value(FieldId::V, "01")
//!         .with_value(FieldId::C, "1")
//!         .with_value(FieldId::R, "845000000040484987")
//!         .with_value(FieldId::N, "JP EPS BEOGRAD")
//!         .with_value(FieldId::I, "RSD3596,13")
//!         .with_value(FieldId::SF, "189");
//!
//!     match client.controller().submit(&mut form).await {
//!         SubmitOutcome::Rendered(image) => println!("{} bytes", image.len()),
//!         other => println!("not rendered: {:?}", other),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Validators Only
//!
//! ```rust
//! use nbs_ips_qr::validation::validate_amount;
//!
//! assert!(validate_amount("RSD3596,13").valid);
//! assert!(!validate_amount("RSD3596.13").valid);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod form;
pub mod image;
pub mod mocks;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use client::{QrClient, QrClientBuilder};
pub use config::{QrConfig, QrConfigBuilder};
pub use controller::{SubmitController, SubmitOutcome};
pub use errors::{QrError, QrResult};
pub use form::{ErrorAnchor, FormView, MemoryForm};
pub use image::QrImage;
pub use types::{FieldError, FieldErrorKind, FieldId, FormValues, OptionalFields, Payload};
pub use validation::{validate_form, ValidationResult};
