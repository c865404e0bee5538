//! Form validation subsystem.
//!
//! # Data Flow
//! ```text
//! Raw form payload (string key/value pairs):
//!     → sanitize.rs (trim, strip control chars, normalize)
//!     → field.rs (per-field validate + normalize)
//!     → form.rs (composite schemas, field-keyed error aggregation)
//!     → Typed request data or error map
//! ```
//!
//! # Design Decisions
//! - Expected failures are values, never panics
//! - All failing fields reported at once, first error per field
//! - Optional fields always present in the output (empty string when absent)

pub mod field;
pub mod form;
pub mod sanitize;

pub use form::{
    validate_form_data, FieldErrors, FormPayload, FormSchema, LoginData, LoginSchema, SignupData,
    SignupSchema,
};
