//! Principal section - checks if password is the realm or a name component.

use super::SectionResult;
use crate::principal::Principal;
use crate::quality::RejectReason;
use crate::wordlist::matches_any_of;
use secrecy::{ExposeSecret, SecretString};

/// Checks the password against the principal's realm, then each name
/// component in order.
pub fn principal_section(principal: &Principal, password: &SecretString) -> SectionResult {
    let candidates = std::iter::once(principal.realm())
        .chain(principal.components().iter().map(String::as_str));

    if matches_any_of(password.expose_secret(), candidates) {
        return Some(RejectReason::DictionaryMatch);
    }
    None
}
