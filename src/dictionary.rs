//! Dictionary matcher module
//!
//! Handles loading the dictionary file and checking passwords against it
//! and against the principal's own name.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use secrecy::SecretString;

use crate::principal::Principal;
use crate::quality::{QualityCheck, Verdict};
use crate::sections::{dictionary_section, principal_section};
use crate::wordlist::WordList;

/// Environment variable naming the dictionary file.
pub const DICT_FILE_ENV: &str = "PWQUAL_DICT_FILE";

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read dictionary file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Out of memory loading dictionary file {}", .0.display())]
    OutOfMemory(PathBuf),
}

/// How the matcher came by its word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No dictionary path was configured.
    NotConfigured,
    /// A path was configured but the file does not exist.
    Missing(PathBuf),
    Loaded { path: PathBuf, words: usize },
}

/// Returns the configured dictionary path.
///
/// Reads `PWQUAL_DICT_FILE`; unset or empty means no dictionary.
pub fn dictionary_path_from_env() -> Option<PathBuf> {
    std::env::var_os(DICT_FILE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Password checker backed by an in-memory, sorted word list.
///
/// The list is frozen once `open` returns, so a matcher can be shared
/// between threads for checking without locking.
#[derive(Debug)]
pub struct DictionaryMatcher {
    words: WordList,
    status: LoadStatus,
}

impl DictionaryMatcher {
    /// Loads the dictionary at `path`.
    ///
    /// A `None` path or a file that does not exist yields a matcher with no
    /// words; the condition is logged and reported through [`status`].
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The file exists but cannot be opened or read
    /// - The file is shorter than its reported size when read
    /// - Memory for the contents or the index cannot be reserved
    ///
    /// [`status`]: DictionaryMatcher::status
    pub fn open(path: Option<&Path>) -> Result<Self, DictionaryError> {
        let Some(path) = path else {
            #[cfg(feature = "tracing")]
            tracing::info!("No dictionary file specified, continuing without one.");
            return Ok(Self::without_words(LoadStatus::NotConfigured));
        };

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    "WARNING! Cannot find dictionary file {}, continuing without one.",
                    path.display()
                );
                return Ok(Self::without_words(LoadStatus::Missing(path.to_path_buf())));
            }
            Err(e) => return Err(io_error(path, e)),
        };

        let metadata = file.metadata().map_err(|e| io_error(path, e))?;
        if metadata.is_dir() {
            return Err(io_error(path, io::ErrorKind::IsADirectory.into()));
        }
        let expected = usize::try_from(metadata.len())
            .map_err(|_| DictionaryError::OutOfMemory(path.to_path_buf()))?;

        let block = read_block(&mut file, expected, path)?;
        let words = WordList::from_bytes(block)
            .map_err(|_| DictionaryError::OutOfMemory(path.to_path_buf()))?;

        #[cfg(feature = "tracing")]
        tracing::info!("Dictionary loaded: {} words from {:?}", words.len(), path);

        Ok(Self {
            status: LoadStatus::Loaded {
                path: path.to_path_buf(),
                words: words.len(),
            },
            words,
        })
    }

    /// Loads the dictionary named by `PWQUAL_DICT_FILE`, if any.
    ///
    /// # Errors
    ///
    /// Same as [`open`](DictionaryMatcher::open).
    pub fn open_from_env() -> Result<Self, DictionaryError> {
        Self::open(dictionary_path_from_env().as_deref())
    }

    /// Loads the dictionary on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Same as [`open`](DictionaryMatcher::open); a panicked or cancelled
    /// load task is reported as `Io`.
    #[cfg(feature = "async")]
    pub async fn open_async(path: Option<PathBuf>) -> Result<Self, DictionaryError> {
        let task_path = path.clone();
        tokio::task::spawn_blocking(move || Self::open(task_path.as_deref()))
            .await
            .map_err(|e| DictionaryError::Io {
                path: path.unwrap_or_default(),
                source: io::Error::other(e),
            })?
    }

    fn without_words(status: LoadStatus) -> Self {
        Self {
            words: WordList::empty(),
            status,
        }
    }

    /// Where the word list came from, or why there is none.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// The loaded words; empty when no dictionary was read.
    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Returns `true` if `word` is a dictionary entry, ignoring ASCII case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Checks `password` against the dictionary and the principal's name.
    ///
    /// Without a password policy no check is done and the password is
    /// accepted. Otherwise the dictionary is consulted first, then the
    /// realm, then each name component in order.
    pub fn check(
        &self,
        password: &SecretString,
        policy_active: bool,
        principal: &Principal,
    ) -> Verdict {
        if !policy_active {
            return Verdict::Accept;
        }

        let sections: [(&str, &dyn Fn() -> crate::sections::SectionResult); 2] = [
            ("dictionary", &|| dictionary_section(&self.words, password)),
            ("principal", &|| principal_section(principal, password)),
        ];

        for (_section_name, section_fn) in sections {
            if let Some(reason) = section_fn() {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    "Password for {} rejected by {} section",
                    principal,
                    _section_name
                );
                return Verdict::Reject(reason);
            }
        }
        Verdict::Accept
    }

    /// Releases the word list.
    pub fn close(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Closing dictionary ({} words)", self.words.len());
    }
}

impl QualityCheck for DictionaryMatcher {
    fn name(&self) -> &str {
        "dict"
    }

    fn check(
        &self,
        password: &SecretString,
        policy_active: bool,
        principal: &Principal,
    ) -> Verdict {
        DictionaryMatcher::check(self, password, policy_active, principal)
    }
}

fn io_error(path: &Path, source: io::Error) -> DictionaryError {
    #[cfg(feature = "tracing")]
    tracing::warn!("Dictionary initialization FAILED: {} ({})", path.display(), source);
    DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads exactly `expected` bytes, failing if the reader runs dry first.
fn read_block<R: Read>(
    reader: R,
    expected: usize,
    path: &Path,
) -> Result<Vec<u8>, DictionaryError> {
    let mut block = Vec::new();
    block
        .try_reserve_exact(expected)
        .map_err(|_| DictionaryError::OutOfMemory(path.to_path_buf()))?;

    reader
        .take(expected as u64)
        .read_to_end(&mut block)
        .map_err(|e| io_error(path, e))?;

    if block.len() < expected {
        return Err(io_error(
            path,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("read {} of {} bytes", block.len(), expected),
            ),
        ));
    }
    Ok(block)
}
