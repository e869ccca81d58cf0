//! budget-ingest: ledger CSV ingestion, row rejection reporting and the
//! content-keyed ingest cache.

pub mod cache;
pub mod dates;
pub mod error;
pub mod reader;
pub mod types;

pub use cache::{ContentKey, IngestCache};
pub use dates::parse_date;
pub use error::IngestError;
pub use reader::{ingest_bytes, ingest_path, ingest_reader};
pub use types::{IngestReport, RejectReason, RejectedRow};
