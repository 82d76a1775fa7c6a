//! Metadata-driven field validation for Formwork.
//!
//! Validation is declared, not coded: hosts ship a definitions registry
//! (field → domain, required or not) and a domains registry (domain →
//! ordered `{type, options}` rule list), and the engine checks raw input
//! against them before any save goes out.
//!
//! - **MetadataRegistry**: the definitions and domains, JSON-loadable
//! - **ValidatorSpec**: one rule; families are `required`, `string`,
//!   `number`, and `pattern`
//! - **validate_field**: the dual contract, a boolean verdict plus a
//!   `FieldError` notification per failure
//! - **filter_non_validated_fields**: applies a form's exclusion list
//!
//! Rules see values, never forms: form-level validity (every non-excluded
//! field passes) is the engine's business.

mod metadata;
mod spec;
mod validator;

pub use metadata::{Domain, FieldDefinition, Formatter, MetadataRegistry};
pub use spec::ValidatorSpec;
pub use validator::{filter_non_validated_fields, validate_field};
