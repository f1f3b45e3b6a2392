//! Compatibility profiles and the "special selector" predicate.
//!
//! A selector is special when merging it with another selector group could
//! change which rule a legacy browser keeps: such browsers drop a whole rule
//! when one selector in the group is unsupported.

use core::fmt;
use core::str::FromStr;
use serde::Deserialize;

/// Vendor prefixes; special under every profile.
const VENDOR_PATTERNS: &[&str] = &["-moz-", "-ms-", "-o-", "-webkit-"];

/// Pseudo-classes and elements unsupported by IE8.
const IE8_PATTERNS: &[&str] = &[
    "-moz-",
    "-ms-",
    "-o-",
    "-webkit-",
    ":root",
    ":nth",
    ":first-of",
    ":last",
    ":only",
    ":empty",
    ":target",
    ":checked",
    "::selection",
    ":enabled",
    ":disabled",
    ":not",
];

/// IE8 set plus what IE7 additionally lacks.
const IE7_PATTERNS: &[&str] = &[
    "-moz-",
    "-ms-",
    "-o-",
    "-webkit-",
    ":focus",
    ":before",
    ":after",
    ":root",
    ":nth",
    ":first-of",
    ":last",
    ":only",
    ":empty",
    ":target",
    ":checked",
    "::selection",
    ":enabled",
    ":disabled",
    ":not",
];

/// Target browser profile for structural optimizations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Compatibility {
    /// Modern browsers (`*`).
    #[default]
    #[serde(rename = "*")]
    All,
    #[serde(rename = "ie8", alias = "ie8-compatible")]
    Ie8,
    #[serde(rename = "ie7", alias = "ie7-compatible")]
    Ie7,
}

impl Compatibility {
    /// Substrings that make a selector special under this profile.
    #[inline]
    pub const fn special_patterns(self) -> &'static [&'static str] {
        match self {
            Self::All => VENDOR_PATTERNS,
            Self::Ie8 => IE8_PATTERNS,
            Self::Ie7 => IE7_PATTERNS,
        }
    }

    /// Whether `selector` (a single selector or a joined group) is special.
    #[inline]
    pub fn is_special(self, selector: &str) -> bool {
        self.special_patterns()
            .iter()
            .any(|pattern| selector.contains(pattern))
    }
}

/// Error returned when a compatibility profile name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCompatibility {
    pub name: String,
}

impl fmt::Display for UnknownCompatibility {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown compatibility profile: {:?}", self.name)
    }
}

impl core::error::Error for UnknownCompatibility {}

impl FromStr for Compatibility {
    type Err = UnknownCompatibility;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim() {
            "" | "*" => Ok(Self::All),
            "ie8" | "ie8-compatible" => Ok(Self::Ie8),
            "ie7" | "ie7-compatible" => Ok(Self::Ie7),
            other => Err(UnknownCompatibility {
                name: other.to_owned(),
            }),
        }
    }
}
