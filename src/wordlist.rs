//! Sorted, case-insensitive word index.
//!
//! A `WordList` owns the raw dictionary bytes plus one byte range per line,
//! sorted with ASCII case folding so lookups are a binary search.

use std::cmp::Ordering;
use std::collections::TryReserveError;
use std::ops::Range;

/// Compares two byte strings the way C-locale `strcasecmp` does.
pub fn caseless_cmp(a: &[u8], b: &[u8]) -> Ordering {
    a.iter()
        .map(u8::to_ascii_lowercase)
        .cmp(b.iter().map(u8::to_ascii_lowercase))
}

/// Returns `true` if `word` equals any candidate, ignoring ASCII case.
///
/// Candidates are tested in iteration order and the first hit wins.
pub fn matches_any_of<'a, I>(word: &str, candidates: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .any(|c| c.as_bytes().eq_ignore_ascii_case(word.as_bytes()))
}

/// Immutable word list built once from newline-delimited content.
#[derive(Debug, Default)]
pub struct WordList {
    block: Vec<u8>,
    index: Vec<Range<usize>>,
}

impl WordList {
    /// An empty list; `contains` is always `false`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index over `block`, taking ownership of the bytes.
    ///
    /// Every `\n`-terminated line becomes one entry, empty lines included.
    /// A trailing line without `\n` is still an entry; nothing after the last
    /// `\n` means no extra entry.
    ///
    /// # Errors
    ///
    /// Returns the reservation error if the index cannot be allocated.
    pub fn from_bytes(block: Vec<u8>) -> Result<Self, TryReserveError> {
        let mut count = block.iter().filter(|&&b| b == b'\n').count();
        if block.last().is_some_and(|&b| b != b'\n') {
            count += 1;
        }

        let mut index = Vec::new();
        index.try_reserve_exact(count)?;

        let mut start = 0;
        for (pos, &b) in block.iter().enumerate() {
            if b == b'\n' {
                index.push(start..pos);
                start = pos + 1;
            }
        }
        if start < block.len() {
            index.push(start..block.len());
        }

        index.sort_unstable_by(|a, b| caseless_cmp(&block[a.clone()], &block[b.clone()]));

        Ok(Self { block, index })
    }

    /// Exact lookup, ignoring ASCII case.
    pub fn contains(&self, word: &str) -> bool {
        let needle = word.as_bytes();
        self.index
            .binary_search_by(|r| caseless_cmp(&self.block[r.clone()], needle))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Entries in sorted order, as raw bytes.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.index.iter().map(|r| &self.block[r.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(content: &str) -> WordList {
        WordList::from_bytes(content.as_bytes().to_vec()).expect("Failed to build word list")
    }

    #[test]
    fn test_caseless_cmp_matches_strcasecmp() {
        assert_eq!(caseless_cmp(b"Password", b"pASSWORD"), Ordering::Equal);
        assert_eq!(caseless_cmp(b"abc", b"ABD"), Ordering::Less);
        assert_eq!(caseless_cmp(b"abc", b"ab"), Ordering::Greater);
        // folded to lower case, so '_' sorts before every letter
        assert_eq!(caseless_cmp(b"_", b"A"), Ordering::Less);
    }

    #[test]
    fn test_from_bytes_trailing_newline() {
        let words = list("hunter2\nqwerty\npassword\n");
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn test_from_bytes_last_line_without_newline() {
        let words = list("hunter2\nqwerty");
        assert_eq!(words.len(), 2);
        assert!(words.contains("qwerty"));
    }

    #[test]
    fn test_from_bytes_keeps_empty_lines() {
        let words = list("a\n\nb\n");
        assert_eq!(words.len(), 3);
        assert!(words.contains(""));
    }

    #[test]
    fn test_from_bytes_empty() {
        let words = list("");
        assert!(words.is_empty());
        assert!(!words.contains(""));
        assert!(!words.contains("anything"));
    }

    #[test]
    fn test_iter_is_sorted_case_insensitively() {
        let words = list("zebra\nApple\nmango\nbanana\n");
        let sorted: Vec<&[u8]> = words.iter().collect();
        assert_eq!(
            sorted,
            vec![&b"Apple"[..], &b"banana"[..], &b"mango"[..], &b"zebra"[..]]
        );
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let words = list("Password\n");
        assert!(words.contains("password"));
        assert!(words.contains("PASSWORD"));
        assert!(words.contains("PaSsWoRd"));
    }

    #[test]
    fn test_contains_is_exact_match() {
        let words = list("password\n");
        assert!(!words.contains("password1"));
        assert!(!words.contains("pass"));
        assert!(!words.contains(" password"));
    }

    #[test]
    fn test_contains_independent_of_file_order() {
        let entries = ["delta", "Alpha", "charlie", "BRAVO", "echo", "alpha2"];
        let forward = list(&entries.join("\n"));
        let reversed: Vec<&str> = entries.iter().rev().copied().collect();
        let backward = list(&reversed.join("\n"));

        for entry in entries {
            assert!(forward.contains(entry), "missing {entry}");
            assert!(backward.contains(&entry.to_uppercase()), "missing {entry}");
        }
        assert!(!forward.contains("foxtrot"));
        assert!(!backward.contains("foxtrot"));
    }

    #[test]
    fn test_carriage_return_is_part_of_word() {
        let words = list("qwerty\r\n");
        assert!(!words.contains("qwerty"));
        assert!(words.contains("QWERTY\r"));
    }

    #[test]
    fn test_matches_any_of() {
        assert!(matches_any_of("Alice", ["bob", "alice"]));
        assert!(!matches_any_of("carol", ["bob", "alice"]));
        assert!(!matches_any_of("x", std::iter::empty::<&str>()));
    }
}
