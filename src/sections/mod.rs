//! Password quality sections
//!
//! Each section compares the password against one source of guessable words.

mod dictionary;
mod principal;

pub use dictionary::dictionary_section;
pub use principal::principal_section;

use crate::quality::RejectReason;

/// Result type for section functions.
/// - `Some(reason)` - Section rejected the password
/// - `None` - Section passed
pub type SectionResult = Option<RejectReason>;
