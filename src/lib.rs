//! Dictionary password quality check
//!
//! Rejects passwords that are common dictionary words, or that equal the
//! realm or one of the name components of the principal they belong to.
//!
//! # Features
//!
//! - `async` (default): Enables loading the dictionary on tokio's blocking pool
//! - `tracing` (default): Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWQUAL_DICT_FILE`: Path to the dictionary file, one word per line.
//!   When unset the check runs without a dictionary.
//!
//! # Example
//!
//! ```rust,no_run
//! use pwqual_dict::{DictionaryMatcher, Principal, Verdict};
//! use secrecy::SecretString;
//!
//! // Load the dictionary once at startup
//! let matcher = DictionaryMatcher::open_from_env().expect("Failed to load dictionary");
//!
//! let principal = Principal::parse("alice@EXAMPLE.COM").expect("Invalid principal");
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! match matcher.check(&password, true, &principal) {
//!     Verdict::Accept => println!("ok"),
//!     Verdict::Reject(reason) => println!("rejected: {}", reason),
//! }
//!
//! matcher.close();
//! ```

// Internal modules
mod dictionary;
mod principal;
mod quality;
mod sections;
mod wordlist;

// Public API
pub use dictionary::{
    dictionary_path_from_env, DictionaryError, DictionaryMatcher, LoadStatus, DICT_FILE_ENV,
};
pub use principal::{Principal, PrincipalError};
pub use quality::{PasswordQuality, QualityCheck, RejectReason, Rejection, Verdict};
pub use wordlist::{caseless_cmp, matches_any_of, WordList};
