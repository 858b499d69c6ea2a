//! Java language levels and feature gating
//!
//! A language level selects which grammar productions are accepted.
//! Version-inappropriate syntax still parses structurally — the tree stays
//! complete so tooling keeps working — but records an E0601 diagnostic.

/// Supported Java language levels (the LTS line).
///
/// Feature introduction versions that fall between two LTS releases are
/// rounded up to the next level this crate models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum JavaLanguageLevel {
    Java8,
    Java11,
    Java17,
    #[default]
    Java21,
}

/// A version-gated grammar production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// `module-info` declarations (Java 9)
    Modules,
    /// `var` local variable type inference (Java 10)
    VarKeyword,
    /// Arrow-labeled `switch` rules and `yield` (Java 14)
    SwitchArrows,
    /// `"""` text blocks (Java 15)
    TextBlocks,
    /// `record` declarations (Java 16)
    Records,
    /// `instanceof` type patterns (Java 16)
    InstanceofPatterns,
    /// `sealed` / `non-sealed` / `permits` (Java 17)
    SealedTypes,
    /// Patterns in `switch` case labels (Java 21)
    PatternSwitch,
    /// Record deconstruction patterns (Java 21)
    RecordPatterns,
}

impl Feature {
    /// The minimum level at which this feature is accepted without error.
    pub fn minimum_level(self) -> JavaLanguageLevel {
        use JavaLanguageLevel as L;
        match self {
            Feature::Modules | Feature::VarKeyword => L::Java11,
            Feature::SwitchArrows
            | Feature::TextBlocks
            | Feature::Records
            | Feature::InstanceofPatterns
            | Feature::SealedTypes => L::Java17,
            Feature::PatternSwitch | Feature::RecordPatterns => L::Java21,
        }
    }

    /// Name used in language-level diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Feature::Modules => "modules",
            Feature::VarKeyword => "'var' local variables",
            Feature::SwitchArrows => "arrow-labeled switch rules",
            Feature::TextBlocks => "text blocks",
            Feature::Records => "records",
            Feature::InstanceofPatterns => "instanceof patterns",
            Feature::SealedTypes => "sealed types",
            Feature::PatternSwitch => "patterns in switch",
            Feature::RecordPatterns => "record patterns",
        }
    }
}

impl JavaLanguageLevel {
    /// Check whether this level accepts `feature`.
    pub fn supports(self, feature: Feature) -> bool {
        self >= feature.minimum_level()
    }

    /// Display name, e.g. "Java 17".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Java8 => "Java 8",
            Self::Java11 => "Java 11",
            Self::Java17 => "Java 17",
            Self::Java21 => "Java 21",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(JavaLanguageLevel::Java8 < JavaLanguageLevel::Java21);
        assert!(JavaLanguageLevel::Java17.supports(Feature::Records));
        assert!(!JavaLanguageLevel::Java11.supports(Feature::Records));
        assert!(JavaLanguageLevel::Java11.supports(Feature::VarKeyword));
        assert!(!JavaLanguageLevel::Java17.supports(Feature::PatternSwitch));
    }
}
