//! Title normalization
//!
//! Turns a raw catalog title into the form every comparison works on:
//!
//! 1. Lower-case, fold Latin diacritics to ASCII, drop combining marks
//! 2. Remove apostrophes without leaving a gap; every other non-alphanumeric
//!    run becomes a single space
//! 3. Rewrite roman numerals I..XX to arabic, token by token
//! 4. Strip trailing edition/region qualifiers, repeatedly, keeping at least
//!    one token
//!
//! Output is a space-joined token list, so feeding it back in yields the
//! same string.

use once_cell::sync::Lazy;

/// Qualifiers stripped when they trail the core title
pub const DEFAULT_EDITION_SUFFIXES: &[&str] = &[
    "Game of the Year Edition",
    "GOTY Edition",
    "GOTY",
    "Definitive Edition",
    "Complete Edition",
    "Deluxe Edition",
    "Enhanced Edition",
    "Special Edition",
    "Anniversary Edition",
    "Director's Cut",
    "Remastered",
    "Remaster",
    "HD",
    "Version",
];

/// Roman/arabic pairs for 1..=20
const NUMERALS: [(&str, &str); 20] = [
    ("i", "1"),
    ("ii", "2"),
    ("iii", "3"),
    ("iv", "4"),
    ("v", "5"),
    ("vi", "6"),
    ("vii", "7"),
    ("viii", "8"),
    ("ix", "9"),
    ("x", "10"),
    ("xi", "11"),
    ("xii", "12"),
    ("xiii", "13"),
    ("xiv", "14"),
    ("xv", "15"),
    ("xvi", "16"),
    ("xvii", "17"),
    ("xviii", "18"),
    ("xix", "19"),
    ("xx", "20"),
];

static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

/// Normalize with the built-in suffix list
pub fn normalize(title: &str) -> String {
    DEFAULT_NORMALIZER.normalize(title)
}

/// Look up a numeral token in either spelling
///
/// Returns the `(roman, arabic)` pair, or `None` for tokens outside 1..=20.
pub fn numeral_pair(token: &str) -> Option<(&'static str, &'static str)> {
    NUMERALS
        .iter()
        .find(|(roman, arabic)| *roman == token || *arabic == token)
        .copied()
}

/// Title normalizer with a fixed suffix list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    /// Suffixes as normalized token lists, longest first
    suffixes: Vec<Vec<String>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_suffixes(DEFAULT_EDITION_SUFFIXES)
    }
}

impl Normalizer {
    /// Build a normalizer stripping `suffixes`
    ///
    /// Suffixes go through the same cleanup as titles, so they can be
    /// written naturally ("Director's Cut"). Blank entries are ignored.
    pub fn with_suffixes<S: AsRef<str>>(suffixes: &[S]) -> Self {
        let mut token_lists: Vec<Vec<String>> = suffixes
            .iter()
            .map(|s| tokenize(s.as_ref()))
            .filter(|tokens| !tokens.is_empty())
            .collect();

        // Longest first so multi-word qualifiers win
        token_lists.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        token_lists.dedup();

        Self {
            suffixes: token_lists,
        }
    }

    /// Normalizer that strips nothing
    pub fn without_suffixes() -> Self {
        Self {
            suffixes: Vec::new(),
        }
    }

    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }

    /// Canonical form of `title`
    pub fn normalize(&self, title: &str) -> String {
        let mut tokens = tokenize(title);

        loop {
            let matched = self.suffixes.iter().find(|suffix| {
                tokens.len() > suffix.len() && tokens.ends_with(suffix.as_slice())
            });
            match matched {
                Some(suffix) => {
                    let keep = tokens.len() - suffix.len();
                    tokens.truncate(keep);
                }
                None => break,
            }
        }

        tokens.join(" ")
    }
}

/// Steps 1-3: case, diacritics, punctuation, numerals
fn tokenize(title: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(title.len());

    for ch in title.chars() {
        for lower in ch.to_lowercase() {
            push_folded(lower, &mut cleaned);
        }
    }

    cleaned
        .split_whitespace()
        .map(|token| match numeral_pair(token) {
            Some((_, arabic)) => arabic.to_string(),
            None => token.to_string(),
        })
        .collect()
}

fn push_folded(ch: char, out: &mut String) {
    match ch {
        '\'' | '\u{2019}' | '\u{2018}' | '`' | '\u{00b4}' | '\u{02bc}' => {}
        // Combining diacritical marks (decomposed input)
        '\u{0300}'..='\u{036f}' => {}
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => out.push('a'),
        'ç' | 'ć' | 'č' => out.push('c'),
        'ď' | 'đ' | 'ð' => out.push('d'),
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => out.push('e'),
        'ğ' => out.push('g'),
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => out.push('i'),
        'ł' | 'ľ' => out.push('l'),
        'ñ' | 'ń' | 'ň' => out.push('n'),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => out.push('o'),
        'ř' => out.push('r'),
        'ś' | 'š' | 'ş' => out.push('s'),
        'ť' | 'ţ' => out.push('t'),
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => out.push('u'),
        'ý' | 'ÿ' => out.push('y'),
        'ź' | 'ż' | 'ž' => out.push('z'),
        'ß' => out.push_str("ss"),
        'æ' => out.push_str("ae"),
        'œ' => out.push_str("oe"),
        'þ' => out.push_str("th"),
        c if c.is_alphanumeric() => out.push(c),
        _ => out.push(' '),
    }
}
