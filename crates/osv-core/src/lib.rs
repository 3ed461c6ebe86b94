//! # osv-core — Foundational Types for Object Schema Validation
//!
//! Defines the types shared by every validator in the workspace. The
//! validators themselves live in `osv-schema`; this crate only knows how a
//! rejection is shaped, how a schema is labelled in messages, and which
//! switches a validator can be configured with.
//!
//! ## Key Design Principles
//!
//! 1. **One rejection per call.** [`ValidationError`] is a single tagged
//!    variant, never a list. Callers surface exactly one problem.
//!
//! 2. **Nested errors pass through verbatim.** `ValidationError<E>` is
//!    generic over the error type of whatever validated the nested property,
//!    so the object layer never rewrites or wraps what it was given.
//!
//! 3. **`ObjectReference` newtype.** Schema labels are never bare strings in
//!    error payloads.
//!
//! 4. **Explicit options.** Coercion is switched on through
//!    [`ValidatorOptions`], handed to the validator at construction.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `osv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod options;
pub mod reference;

pub use error::{RejectionKind, SchemaError, ValidationError};
pub use options::ValidatorOptions;
pub use reference::ObjectReference;
