//! Dictionary section - checks if password is a word in the loaded dictionary.

use super::SectionResult;
use crate::quality::RejectReason;
use crate::wordlist::WordList;
use secrecy::{ExposeSecret, SecretString};

/// Checks if the password is one of the dictionary words.
///
/// # Returns
/// - `Some(DictionaryMatch)` if the password is a dictionary word
/// - `None` otherwise, including when no dictionary is loaded
pub fn dictionary_section(words: &WordList, password: &SecretString) -> SectionResult {
    if words.contains(password.expose_secret()) {
        return Some(RejectReason::DictionaryMatch);
    }
    None
}
