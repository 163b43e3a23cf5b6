//! Build the `match` regex for a generated keyword pattern.
//!
//! ## Examples
//! ```rust
//! use hew_vocab::regex::word_alternation;
//!
//! assert_eq!(word_alternation(["if", "else", "if"]), r"\b(else|if)\b");
//! ```

use std::collections::BTreeSet;

/// Build `\b(word1|word2|...)\b` from a keyword set.
///
/// ## Parameters
/// - `keywords`: any iteration of spellings; order and duplicates do not matter.
///
/// ## Returns
/// - (`String`): the alternation of the unique spellings in byte-wise sorted order, wrapped in word boundaries.
///
/// ## Notes
/// - Output is byte-identical for equal sets.
/// - Spellings are inserted verbatim; they are identifiers and carry no regex metacharacters.
/// - An empty set yields `\b()\b`.
pub fn word_alternation<I, S>(keywords: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sorted: BTreeSet<String> = keywords.into_iter().map(|k| k.as_ref().to_string()).collect();
    let body = sorted.into_iter().collect::<Vec<_>>().join("|");
    format!(r"\b({body})\b")
}
