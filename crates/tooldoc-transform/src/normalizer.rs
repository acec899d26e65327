//! Identifier and text normalization.
//!
//! [`TextNormalizer`] turns programmatic identifiers (`resourceGroupName`,
//! `vmId`) and raw description text into natural-language strings, using the
//! lexicon of a loaded [`Configuration`].
//!
//! Every operation is total: empty input yields empty output and missing
//! lexicon entries simply fall through to the next heuristic.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tooldoc_core::Configuration;
//! use tooldoc_transform::TextNormalizer;
//!
//! # fn example() -> tooldoc_core::Result<()> {
//! let config = Configuration::from_json_str(
//!     r#"{ "lexicon": { "acronyms": {
//!         "vm": { "canonical": "VM" },
//!         "id": { "canonical": "ID" }
//!     } } }"#,
//! )?;
//! let normalizer = TextNormalizer::new(Arc::new(config))?;
//!
//! assert_eq!(normalizer.normalize_parameter("vmId"), "VM ID");
//! assert_eq!(normalizer.normalize_parameter("resourceGroupName"), "resource group name");
//! # Ok(())
//! # }
//! ```

use regex::{Captures, Regex};
use std::cmp::Reverse;
use std::sync::Arc;
use tooldoc_core::{Configuration, Error, Result, StopWordPolicy};

/// One abbreviation, in matching priority order.
#[derive(Debug)]
struct AbbreviationEntry {
    term: String,
    replacement: String,
}

/// Converts identifiers and text fragments into display text.
///
/// Holds no mutable state; share it freely behind an `Arc`.
#[derive(Debug)]
pub struct TextNormalizer {
    config: Arc<Configuration>,
    /// Sorted by descending term length, then alphabetically.
    /// Capture group `i + 1` of `abbreviation_pattern` is entry `i`.
    abbreviations: Vec<AbbreviationEntry>,
    abbreviation_pattern: Option<Regex>,
    /// Longest acronym key or plural, in chars
    longest_acronym: usize,
}

impl TextNormalizer {
    /// Creates a normalizer and compiles the abbreviation matcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternError`] if the abbreviations cannot be
    /// compiled (for example, when they exceed the regex size limit).
    pub fn new(config: Arc<Configuration>) -> Result<Self> {
        let mut terms: Vec<(&String, &String)> = config
            .lexicon()
            .abbreviations
            .iter()
            .map(|(term, abbreviation)| (term, &abbreviation.canonical))
            .collect();
        terms.sort_by(|(a, _), (b, _)| {
            (Reverse(a.chars().count()), a.as_str()).cmp(&(Reverse(b.chars().count()), b.as_str()))
        });

        let abbreviations: Vec<AbbreviationEntry> = terms
            .into_iter()
            .map(|(term, replacement)| AbbreviationEntry {
                term: term.clone(),
                replacement: replacement.clone(),
            })
            .collect();
        let abbreviation_pattern = abbreviation_pattern(&abbreviations)?;

        let longest_acronym = config
            .lexicon()
            .acronyms
            .iter()
            .flat_map(|(key, acronym)| std::iter::once(key).chain(acronym.plural.as_ref()))
            .map(|form| form.chars().count())
            .max()
            .unwrap_or(0);

        tracing::debug!(
            abbreviations = abbreviations.len(),
            longest_acronym,
            "Compiled abbreviation matcher"
        );

        Ok(Self {
            config,
            abbreviations,
            abbreviation_pattern,
            longest_acronym,
        })
    }

    /// The configuration this normalizer reads.
    #[must_use]
    pub const fn config(&self) -> &Arc<Configuration> {
        &self.config
    }

    /// Display text for a parameter identifier.
    ///
    /// A configured parameter mapping wins verbatim; anything else goes
    /// through [`split_programmatic_name`](Self::split_programmatic_name).
    #[must_use]
    pub fn normalize_parameter(&self, identifier: &str) -> String {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return String::new();
        }

        if let Some(mapping) = self.config.parameter(identifier) {
            return mapping.display.clone();
        }

        tracing::trace!("No parameter mapping for {identifier}, splitting");
        self.split_programmatic_name(identifier)
    }

    /// Splits an identifier at case transitions and renders each word.
    ///
    /// Known acronyms (and acronym plurals) take their canonical form.
    /// An unknown all-uppercase run is split greedily into known acronyms,
    /// longest first, when the whole run is covered; otherwise it is kept
    /// as-is. Everything else is lowercased.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tooldoc_core::Configuration;
    /// use tooldoc_transform::TextNormalizer;
    ///
    /// let config = Configuration::from_json_str(
    ///     r#"{ "lexicon": { "acronyms": {
    ///         "aks": { "canonical": "AKS" },
    ///         "vm": { "canonical": "VM" }
    ///     } } }"#,
    /// ).unwrap();
    /// let normalizer = TextNormalizer::new(Arc::new(config)).unwrap();
    ///
    /// assert_eq!(normalizer.split_programmatic_name("AKSVMName"), "AKS VM name");
    /// assert_eq!(normalizer.split_programmatic_name("HTTPSProxy"), "HTTPS proxy");
    /// ```
    #[must_use]
    pub fn split_programmatic_name(&self, identifier: &str) -> String {
        let mut words = Vec::new();
        for token in split_case_boundaries(identifier) {
            self.push_word(&token, &mut words);
        }
        words.join(" ")
    }

    fn push_word(&self, token: &str, words: &mut Vec<String>) {
        let lexicon = self.config.lexicon();

        if let Some(form) = lexicon.acronym_form(token) {
            words.push(form.to_string());
            return;
        }

        if is_all_uppercase(token) && token.chars().count() > 1 {
            match self.segment_acronyms(token) {
                Some(parts) => {
                    tracing::trace!("Segmented {token} into {parts:?}");
                    words.extend(parts);
                }
                None => words.push(token.to_string()),
            }
            return;
        }

        words.push(token.to_lowercase());
    }

    /// Greedy longest-match split of an uppercase run into known acronyms.
    ///
    /// Candidates never exceed the longest acronym, so the cost is linear
    /// in the run length.
    fn segment_acronyms(&self, run: &str) -> Option<Vec<String>> {
        let lexicon = self.config.lexicon();
        // Byte offset of every char boundary, including the end
        let bounds: Vec<usize> = run
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(run.len()))
            .collect();
        let chars = bounds.len() - 1;
        let mut parts = Vec::new();
        let mut start = 0;

        while start < chars {
            let limit = chars.min(start + self.longest_acronym);
            let found = (start + 1..=limit).rev().find_map(|end| {
                lexicon
                    .acronym_form(&run[bounds[start]..bounds[end]])
                    .map(|form| (end, form.to_string()))
            });
            let (end, form) = found?;
            parts.push(form);
            start = end;
        }

        Some(parts)
    }

    /// Title-cases `text` under the named context.
    ///
    /// Words are capitalized, except that acronyms flagged
    /// `preserveInTitleCase` keep their canonical form anywhere, and stop
    /// words stay lowercase when the context's `stopWords` rule is
    /// `lowercase-unless-first` and the word is neither first nor last.
    /// Leading and trailing punctuation (`"(aks),"`) is kept around the word
    /// and ignored for lookups. Applying it to its own output changes nothing.
    #[must_use]
    pub fn to_title_case(&self, text: &str, context: &str) -> String {
        let lexicon = self.config.lexicon();
        let rules = self.config.context(context);
        let lowercase_stop_words = rules
            .is_some_and(|r| r.stop_word_policy() == StopWordPolicy::LowercaseUnlessFirst);

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let last = tokens.len().saturating_sub(1);

        tokens
            .iter()
            .enumerate()
            .map(|(index, token)| {
                let (prefix, word, suffix) = split_punctuation(token);
                if word.is_empty() {
                    return (*token).to_string();
                }

                let cased = if let Some((acronym, plural)) = lexicon.acronym_match(word)
                    && acronym.preserve_in_title_case
                {
                    acronym.form(plural).to_string()
                } else if lowercase_stop_words
                    && index != 0
                    && index != last
                    && rules.is_some_and(|r| r.is_stop_word(lexicon, word))
                {
                    word.to_lowercase()
                } else {
                    capitalize(word)
                };
                format!("{prefix}{cased}{suffix}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replaces every lexicon abbreviation with its canonical form.
    ///
    /// Matching is case-insensitive and on whole words, in a single pass
    /// over the input: replacement text is never matched again. Where
    /// several terms match at the same position, the longer term wins,
    /// ties broken alphabetically.
    #[must_use]
    pub fn replace_static_text(&self, text: &str) -> String {
        let Some(pattern) = &self.abbreviation_pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures<'_>| {
                caps.iter()
                    .skip(1)
                    .position(|group| group.is_some())
                    .and_then(|index| self.abbreviations.get(index))
                    .map_or_else(
                        || caps[0].to_string(),
                        |entry| {
                            tracing::trace!("Replaced abbreviation '{}'", entry.term);
                            entry.replacement.clone()
                        },
                    )
            })
            .into_owned()
    }

    /// Cleans `text` into hyphen-separated filename tokens under the named context.
    ///
    /// Splits on every non-alphanumeric character. When the context's
    /// `stopWords` rule is `remove`, stop words are dropped except for the
    /// first token. Acronyms take their canonical form, then the filename
    /// transform of their category when the context applies category
    /// defaults. Other tokens are lowercased.
    #[must_use]
    pub fn clean_for_context(&self, text: &str, context: &str) -> String {
        let lexicon = self.config.lexicon();
        let rules = self.config.context(context);
        let remove_stop_words =
            rules.is_some_and(|r| r.stop_word_policy() == StopWordPolicy::Remove);
        let apply_category_defaults = rules.is_none_or(|r| r.apply_category_defaults);

        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .enumerate()
            .filter(|(index, token)| {
                !(remove_stop_words
                    && *index != 0
                    && rules.is_some_and(|r| r.is_stop_word(lexicon, token)))
            })
            .map(|(_, token)| match lexicon.acronym_match(token) {
                Some((acronym, plural)) => {
                    let form = acronym.form(plural);
                    let transform = apply_category_defaults
                        .then(|| self.config.category_defaults(acronym.category()))
                        .flatten()
                        .and_then(|defaults| defaults.filename);
                    transform.map_or_else(|| form.to_string(), |t| t.apply(form))
                }
                None => token.to_lowercase(),
            })
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Appends a period unless the text already ends in terminal punctuation.
///
/// Trailing whitespace is trimmed first; empty input stays empty.
///
/// # Examples
///
/// ```
/// use tooldoc_transform::ensure_ends_period;
///
/// assert_eq!(ensure_ends_period("This is a test"), "This is a test.");
/// assert_eq!(ensure_ends_period("Done!  "), "Done!");
/// assert_eq!(ensure_ends_period("   "), "");
/// ```
#[must_use]
pub fn ensure_ends_period(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}

/// Splits an identifier into word tokens.
///
/// Non-alphanumeric characters separate tokens. Inside a run, a token starts
/// at an uppercase letter preceded by a lowercase letter or digit, or at an
/// uppercase letter that follows another uppercase letter and precedes a
/// lowercase one (`HTTPSProxy` → `HTTPS`, `Proxy`).
///
/// # Examples
///
/// ```
/// use tooldoc_transform::split_case_boundaries;
///
/// assert_eq!(split_case_boundaries("resourceGroupName"), ["resource", "Group", "Name"]);
/// assert_eq!(split_case_boundaries("ABBRWord"), ["ABBR", "Word"]);
/// assert_eq!(split_case_boundaries("ipv4Address"), ["ipv4", "Address"]);
/// assert_eq!(split_case_boundaries("snake_case-id"), ["snake", "case", "id"]);
/// ```
#[must_use]
pub fn split_case_boundaries(identifier: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for run in identifier
        .split(|c: char| !c.is_alphanumeric())
        .filter(|run| !run.is_empty())
    {
        let chars: Vec<char> = run.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let cur = chars[i];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let boundary = cur.is_uppercase()
                && (prev.is_lowercase()
                    || prev.is_numeric()
                    || (prev.is_uppercase() && next_is_lower));
            if boundary {
                tokens.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        tokens.push(chars[start..].iter().collect());
    }

    tokens
}

fn is_all_uppercase(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

/// Uppercases the first char and lowercases the rest.
///
/// A first char whose uppercase form is several chars (`ß` → `SS`) is kept
/// as-is, so capitalizing twice gives the same result as once.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let mut out = String::with_capacity(token.len());
    match (upper.next(), upper.next()) {
        (Some(single), None) => out.push(single),
        _ => out.push(first),
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

/// Splits `token` into leading punctuation, the word, and trailing punctuation.
fn split_punctuation(token: &str) -> (&str, &str, &str) {
    let start = token.find(char::is_alphanumeric).unwrap_or(token.len());
    let end = token
        .rfind(char::is_alphanumeric)
        .and_then(|i| token[i..].chars().next().map(|c| i + c.len_utf8()))
        .unwrap_or(start);
    (&token[..start], &token[start..end], &token[end..])
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Term escaped and anchored on word boundaries where it has word characters.
fn whole_word_fragment(term: &str) -> String {
    let leading = if term.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trailing = if term.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("{leading}{}{trailing}", regex::escape(term))
}

/// Case-insensitive alternation with one capture group per entry, in entry order.
///
/// Alternation is leftmost-first, so entry order decides between terms
/// matching at the same position.
fn abbreviation_pattern(entries: &[AbbreviationEntry]) -> Result<Option<Regex>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let alternation = entries
        .iter()
        .map(|entry| format!("({})", whole_word_fragment(&entry.term)))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){alternation}"))
        .map(Some)
        .map_err(|e| Error::PatternError {
            term: entries
                .iter()
                .map(|entry| entry.term.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            message: e.to_string(),
        })
}
