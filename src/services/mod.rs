//! Service implementations for the NBS QR API.

mod generate;

pub use generate::GenerateService;
