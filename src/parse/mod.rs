//! Record parsing: cached XML -> typed per-subject entries.
//!
//! - envelope decoding + entry extraction (`record`)
//! - display formatting of counts (`number`)

pub mod number;
pub mod record;

pub use number::format_grouped;
pub use record::{ParseError, decode_envelope, parse_record};
