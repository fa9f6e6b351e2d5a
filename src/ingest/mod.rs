//! Bulk CSV ingest of internal marks.
//!
//! An upload goes through [`parser::check_upload`], is decoded lazily by
//! [`parser::parse_rows`], every row is applied by [`resolver::apply_row`],
//! and [`outcome::ingest_internal_marks`] owns the commit scope and the
//! summary returned to the caller.

pub mod error;
pub mod outcome;
pub mod parser;
pub mod resolver;

pub use error::{IngestError, RowError, RowErrorKind};
pub use outcome::{BatchOutcome, RowFailure, ingest_internal_marks};
pub use parser::{IngestRow, IngestRows, SAMPLE_CSV, UploadedFile, check_upload, parse_rows};
pub use resolver::{AppliedRow, apply_row};
