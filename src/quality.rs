//! Password quality verdicts and the check host.
//!
//! A quality module is anything implementing [`QualityCheck`]; opening it is
//! its constructor and closing it is dropping it. [`PasswordQuality`] runs a
//! set of modules in registration order.

use std::fmt;

use secrecy::SecretString;
use thiserror::Error;

use crate::principal::Principal;

/// Why a password was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The password is a dictionary word, the realm, or a name component.
    DictionaryMatch,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::DictionaryMatch => f.write_str("Password is in the password dictionary"),
        }
    }
}

/// Outcome of a quality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

impl Verdict {
    /// Returns `true` for any rejection, whatever the reason.
    pub fn is_reject(&self) -> bool {
        matches!(self, Verdict::Reject(_))
    }
}

/// A pluggable password quality module.
pub trait QualityCheck: Send + Sync {
    /// Short module name, used in diagnostics.
    fn name(&self) -> &str;

    /// Checks a candidate password for `principal`.
    ///
    /// `policy_active` tells whether a password policy applies to the
    /// principal at all.
    fn check(
        &self,
        password: &SecretString,
        policy_active: bool,
        principal: &Principal,
    ) -> Verdict;
}

/// A rejection along with the module that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} ({module})")]
pub struct Rejection {
    pub module: String,
    pub reason: RejectReason,
}

/// Ordered set of quality modules, consulted until one rejects.
#[derive(Default)]
pub struct PasswordQuality {
    modules: Vec<Box<dyn QualityCheck>>,
}

impl PasswordQuality {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: QualityCheck + 'static>(&mut self, module: C) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Registered password quality module {}", module.name());
        self.modules.push(Box::new(module));
    }

    /// Runs every module in order; the first rejection wins.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] of the first module that rejects.
    pub fn check(
        &self,
        password: &SecretString,
        policy_active: bool,
        principal: &Principal,
    ) -> Result<(), Rejection> {
        for module in &self.modules {
            if let Verdict::Reject(reason) = module.check(password, policy_active, principal) {
                #[cfg(feature = "tracing")]
                tracing::info!(
                    "Password quality module {} rejected password for {}",
                    module.name(),
                    principal
                );
                return Err(Rejection {
                    module: module.name().to_string(),
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Closes every module. Closing an empty or already closed host is a no-op.
    pub fn close(&mut self) {
        for module in self.modules.drain(..) {
            #[cfg(feature = "tracing")]
            tracing::debug!("Closing password quality module {}", module.name());
            drop(module);
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for PasswordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.modules.iter().map(|m| m.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DictionaryMatcher;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct RejectAll;

    impl QualityCheck for RejectAll {
        fn name(&self) -> &str {
            "reject-all"
        }

        fn check(&self, _: &SecretString, _: bool, _: &Principal) -> Verdict {
            Verdict::Reject(RejectReason::DictionaryMatch)
        }
    }

    fn pwd(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn dictionary(words: &[&str]) -> (NamedTempFile, DictionaryMatcher) {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for word in words {
            writeln!(temp_file, "{}", word).expect("Failed to write");
        }
        let matcher = DictionaryMatcher::open(Some(temp_file.path())).unwrap();
        (temp_file, matcher)
    }

    #[test]
    fn test_reject_reason_message() {
        assert_eq!(
            RejectReason::DictionaryMatch.to_string(),
            "Password is in the password dictionary"
        );
    }

    #[test]
    fn test_rejection_is_an_error() {
        let rejection = Rejection {
            module: "dict".to_string(),
            reason: RejectReason::DictionaryMatch,
        };
        let err: &dyn std::error::Error = &rejection;
        assert_eq!(err.to_string(), "Password is in the password dictionary (dict)");
        assert!(Verdict::Reject(RejectReason::DictionaryMatch).is_reject());
        assert!(!Verdict::Accept.is_reject());
    }

    #[test]
    fn test_empty_host_accepts() {
        let quality = PasswordQuality::new();
        let princ = Principal::new("EXAMPLE.COM", ["alice"]);
        assert!(quality.is_empty());
        assert_eq!(quality.check(&pwd("alice"), true, &princ), Ok(()));
    }

    #[test]
    fn test_host_reports_rejecting_module() {
        let (_file, matcher) = dictionary(&["password", "qwerty"]);
        let mut quality = PasswordQuality::new();
        quality.register(matcher);
        quality.register(RejectAll);
        let princ = Principal::new("EXAMPLE.COM", ["alice"]);

        let rejection = quality.check(&pwd("Qwerty"), true, &princ).unwrap_err();
        assert_eq!(rejection.module, "dict");
        assert_eq!(rejection.reason, RejectReason::DictionaryMatch);

        let rejection = quality.check(&pwd("tr0ub4dor"), true, &princ).unwrap_err();
        assert_eq!(rejection.module, "reject-all");
    }

    #[test]
    fn test_host_without_policy() {
        let (_file, matcher) = dictionary(&["password"]);
        let mut quality = PasswordQuality::new();
        quality.register(matcher);
        let princ = Principal::new("EXAMPLE.COM", ["alice"]);

        assert_eq!(quality.check(&pwd("password"), false, &princ), Ok(()));
    }

    #[test]
    fn test_close_is_idempotent() {
        let (_file, matcher) = dictionary(&["password"]);
        let mut quality = PasswordQuality::new();
        quality.register(matcher);
        assert_eq!(quality.len(), 1);

        quality.close();
        assert!(quality.is_empty());
        quality.close();
        assert!(quality.is_empty());

        let mut never_opened = PasswordQuality::new();
        never_opened.close();
        assert!(never_opened.is_empty());
    }
}
