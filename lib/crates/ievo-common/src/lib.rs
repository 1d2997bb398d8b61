pub mod diagnostic;
pub mod result;

pub use diagnostic::{Diagnostic, Severity, Stage};
pub use result::ValidationResult;
