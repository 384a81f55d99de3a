//! Validation orchestrator for pairdiff.
//!
//! Sequences the checks that run before a diff, memoizes the outcome per
//! identifier, and invalidates that memo whenever either side is rewritten.
//!
//! Per identifier the state moves between "no outcome", "cached success",
//! and "cached failure". A write always returns it to "no outcome"; a read
//! either replays the cached outcome or computes and stores a new one:
//!
//! 1. left payload present, then right payload present
//! 2. raw payload lengths equal (character count of the stored text)
//! 3. left parses, then right parses
//! 4. trees equal, otherwise the diff map is reported

pub mod error;
pub mod parser;
pub mod validator;

pub use error::{DecodeError, ValidateError, ValidateResult};
pub use pairdiff_store::{ComparisonFailure, Outcome};
pub use parser::{Base64JsonParser, JsonPayloadParser, PayloadParser, Transport};
pub use validator::Validator;
