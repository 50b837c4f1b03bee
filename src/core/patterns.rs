//! Turns the raw search box text into the list of name fragments to look for.

/// Characters that separate individual patterns in a query.
const SEPARATORS: [char; 2] = ['/', ','];

/// Splits a raw query into its trimmed, non-empty fragments.
///
/// Both `/` and `,` act as separators; they carry no path meaning. An empty
/// or all-whitespace query yields an empty vector, which callers must treat
/// as "empty query" rather than "nothing matched".
pub fn parse_patterns(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed
        .split(|c: char| SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// A non-empty set of case-insensitive substrings.
///
/// There is no way to build an empty `PatternSet`, so holding one means the
/// query was not blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<String>,
    folded: Vec<String>,
}

impl PatternSet {
    /// Parses a raw query. Returns `None` for an empty query.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_patterns(parse_patterns(raw))
    }

    /// Builds a set from already split patterns, dropping blank ones.
    pub fn from_patterns<I, S>(patterns: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if patterns.is_empty() {
            return None;
        }
        let folded = patterns.iter().map(|p| p.to_lowercase()).collect();
        Some(Self { patterns, folded })
    }

    /// The patterns in the order they were entered.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always `false`: construction rejects a query without patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns `true` if `name` contains any of the patterns, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.folded.iter().any(|pattern| name.contains(pattern.as_str()))
    }
}
