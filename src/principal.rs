//! Principal name representation.
//!
//! Only what the quality check needs: a realm and the ordered name
//! components, plus the `comp/comp@REALM` text form.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("Principal name is empty")]
    Empty,
    #[error("Principal name has no realm: {0}")]
    MissingRealm(String),
    #[error("Principal name ends with a dangling escape: {0}")]
    TrailingEscape(String),
    #[error("Principal name has more than one realm separator: {0}")]
    MultipleRealms(String),
}

/// A named identity: realm plus ordered name components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    realm: String,
    components: Vec<String>,
}

impl Principal {
    pub fn new<R, I, S>(realm: R, components: I) -> Self
    where
        R: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            realm: realm.into(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses `comp1/comp2@REALM`.
    ///
    /// `/` separates components and `@` introduces the realm. A backslash
    /// escapes the next character; `\n`, `\t`, `\b` and `\0` decode to the
    /// matching control characters.
    ///
    /// `@REALM` has no components, so a principal whose only component is
    /// empty does not survive a `Display` round trip.
    ///
    /// # Errors
    ///
    /// Returns `PrincipalError` for empty input, a missing realm, a second
    /// unescaped `@`, or a trailing backslash.
    pub fn parse(name: &str) -> Result<Self, PrincipalError> {
        if name.is_empty() {
            return Err(PrincipalError::Empty);
        }

        let mut components = Vec::new();
        let mut realm: Option<String> = None;
        let mut current = String::new();
        let mut chars = name.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    let escaped = chars
                        .next()
                        .ok_or_else(|| PrincipalError::TrailingEscape(name.to_string()))?;
                    current.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'b' => '\u{8}',
                        '0' => '\0',
                        other => other,
                    });
                }
                '/' if realm.is_none() => {
                    components.push(std::mem::take(&mut current));
                }
                '@' => {
                    if realm.is_some() {
                        return Err(PrincipalError::MultipleRealms(name.to_string()));
                    }
                    if !(components.is_empty() && current.is_empty()) {
                        components.push(std::mem::take(&mut current));
                    }
                    realm = Some(String::new());
                }
                other => current.push(other),
            }
        }

        if realm.is_none() {
            return Err(PrincipalError::MissingRealm(name.to_string()));
        }

        Ok(Self {
            realm: current,
            components,
        })
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Name components in declaration order.
    pub fn components(&self) -> &[String] {
        &self.components
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, part: &str, in_realm: bool) -> fmt::Result {
    for c in part.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\0' => f.write_str("\\0")?,
            '\\' | '@' => write!(f, "\\{c}")?,
            '/' if !in_realm => f.write_str("\\/")?,
            other => write!(f, "{other}")?,
        }
    }
    Ok(())
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write_escaped(f, component, false)?;
        }
        f.write_str("@")?;
        write_escaped(f, &self.realm, true)
    }
}
