//! Script filtering for translation output.
//!
//! Models asked for "only the translation" still tend to add an English
//! preamble or a transliteration. The filter keeps the lines written in the
//! target script and drops the rest.

use std::ops::RangeInclusive;

/// A translation target: display name plus the Unicode ranges of its script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    name: String,
    ranges: Vec<RangeInclusive<char>>,
}

impl TargetLanguage {
    /// Create a language from explicit script ranges.
    pub fn new(name: impl Into<String>, ranges: Vec<RangeInclusive<char>>) -> Self {
        Self {
            name: name.into(),
            ranges,
        }
    }

    /// Urdu: Arabic block plus zero-width non-joiner and joiner.
    #[must_use]
    pub fn urdu() -> Self {
        Self::new("Urdu", vec!['\u{0600}'..='\u{06FF}', '\u{200C}'..='\u{200D}'])
    }

    /// Look up a language by name, case-insensitively.
    ///
    /// Unknown names keep the given spelling and get no ranges, so the
    /// filter passes their output through unchanged.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        match name.to_lowercase().as_str() {
            "urdu" => Self::urdu(),
            "arabic" => Self::new("Arabic", vec!['\u{0600}'..='\u{06FF}', '\u{0750}'..='\u{077F}']),
            "persian" | "farsi" => Self::new(
                "Persian",
                vec!['\u{0600}'..='\u{06FF}', '\u{200C}'..='\u{200D}'],
            ),
            "hindi" => Self::new("Hindi", vec!['\u{0900}'..='\u{097F}']),
            "bengali" | "bangla" => Self::new("Bengali", vec!['\u{0980}'..='\u{09FF}']),
            "russian" => Self::new("Russian", vec!['\u{0400}'..='\u{04FF}']),
            "greek" => Self::new("Greek", vec!['\u{0370}'..='\u{03FF}']),
            "japanese" => Self::new(
                "Japanese",
                vec!['\u{3040}'..='\u{30FF}', '\u{4E00}'..='\u{9FFF}'],
            ),
            "chinese" => Self::new("Chinese", vec!['\u{4E00}'..='\u{9FFF}']),
            "korean" => Self::new("Korean", vec!['\u{AC00}'..='\u{D7AF}', '\u{1100}'..='\u{11FF}']),
            _ => Self::new(name, Vec::new()),
        }
    }

    /// Name as written into the translation prompt.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ranges(&self) -> &[RangeInclusive<char>] {
        &self.ranges
    }

    /// Filter matching this language's script.
    #[must_use]
    pub fn filter(&self) -> ScriptFilter {
        ScriptFilter::new(self.ranges.clone())
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self::urdu()
    }
}

/// Keeps the lines of a response that contain target-script characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFilter {
    ranges: Vec<RangeInclusive<char>>,
}

impl ScriptFilter {
    #[must_use]
    pub fn new(ranges: Vec<RangeInclusive<char>>) -> Self {
        Self { ranges }
    }

    fn matches(&self, line: &str) -> bool {
        line.chars()
            .any(|c| self.ranges.iter().any(|range| range.contains(&c)))
    }

    /// Apply the filter.
    ///
    /// Lines with at least one in-range character are trimmed and joined
    /// with a single space. If no line qualifies, `raw` comes back unchanged.
    #[must_use]
    pub fn apply(&self, raw: &str) -> String {
        let kept: Vec<&str> = raw
            .split('\n')
            .filter(|line| self.matches(line))
            .map(str::trim)
            .collect();

        if kept.is_empty() {
            raw.to_string()
        } else {
            kept.join(" ")
        }
    }
}
