//! Utility functions for code generation, URL validation, and storage errors.
//!
//! - [`code_generator`] - Random short code drawing
//! - [`url_validator`] - Absolute `http`/`https` URL checks
//! - [`db_error`] - Classification of SQLite unique violations

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
