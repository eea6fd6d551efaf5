//! Student Records
//!
//! The single entity this system tracks, plus the write-side types that
//! describe how it changes.
//!
//! ## Read path
//!
//! The gateway returns an externally-controlled JSON document. It is decoded
//! element by element through [`decode_records`]; rows that do not match the
//! schema are reported as [`RejectedRecord`]s instead of being rendered.
//!
//! ## Write path
//!
//! Raw form input lives in a [`RecordForm`] until submit, where it is coerced
//! into a [`Mutation`] carrying the `action` discriminator.

mod error;
mod form;
mod mutation;
mod record;

pub use error::{FormError, RecordError};
pub use form::{FormField, RecordForm};
pub use mutation::{Mutation, MutationKind};
pub use record::{decode_records, DecodedRecords, RejectedRecord, Scores, StudentRecord};
