//! Service category registry as the single source of truth for category strings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Service activity a general entry is logged against.
///
/// Declaration order is the display order for listings and per-category totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    ChineseDoorToDoor,
    GermanDoorToDoor,
    Trolley,
    PublicWitnessing,
    Port,
    Truckers,
    Informal,
    Studies,
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 9] = [
        Self::ChineseDoorToDoor,
        Self::GermanDoorToDoor,
        Self::Trolley,
        Self::PublicWitnessing,
        Self::Port,
        Self::Truckers,
        Self::Informal,
        Self::Studies,
        Self::Other,
    ];

    /// Number of categories.
    pub const COUNT: usize = Self::ALL.len();

    /// Canonical identifier stored in data files.
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::ChineseDoorToDoor => "Chinesischer Haus-zu-Haus",
            Self::GermanDoorToDoor => "Deutscher Haus-zu-Haus",
            Self::Trolley => "Trolley",
            Self::PublicWitnessing => "ÖZB",
            Self::Port => "Hafendienst",
            Self::Truckers => "Fernfahrer",
            Self::Informal => "Informell",
            Self::Studies => "Studien",
            Self::Other => "Sonstige",
        }
    }

    /// Short glyph shown on the category tile.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::ChineseDoorToDoor => "你好",
            Self::GermanDoorToDoor => "Hallo",
            Self::Trolley => "JW.ORG",
            Self::PublicWitnessing => "🏙️",
            Self::Port => "🚢",
            Self::Truckers => "🚚",
            Self::Informal => "💬",
            Self::Studies => "📖",
            Self::Other => "⋯",
        }
    }

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ChineseDoorToDoor => "Chin. H2H",
            Self::GermanDoorToDoor => "Deu. H2H",
            Self::Trolley => "Trolley",
            Self::PublicWitnessing => "ÖZB",
            Self::Port => "Hafen",
            Self::Truckers => "Fernfahrer",
            Self::Informal => "Informell",
            Self::Studies => "Studien",
            Self::Other => "Sonstige",
        }
    }

    /// ASCII name accepted on the command line.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::ChineseDoorToDoor => "chinese-h2h",
            Self::GermanDoorToDoor => "german-h2h",
            Self::Trolley => "trolley",
            Self::PublicWitnessing => "public-witnessing",
            Self::Port => "port",
            Self::Truckers => "truckers",
            Self::Informal => "informal",
            Self::Studies => "studies",
            Self::Other => "other",
        }
    }

    /// Position in [`Category::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Exact lookup by stored identifier.
    pub fn from_identifier(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.identifier() == s)
    }
}

/// Label for a raw stored category string, falling back to the string itself.
pub fn display_label(raw: &str) -> &str {
    Category::from_identifier(raw).map_or(raw, |c| c.label())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Labels carry non-ASCII letters (ÖZB), so compare full lowercase forms.
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| {
                [c.identifier(), c.label(), c.slug()]
                    .iter()
                    .any(|name| name.to_lowercase() == needle)
            })
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.identifier())
    }
}

/// Error type for category strings that match no known category.
#[derive(Debug, Clone)]
pub struct UnknownCategory(String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_roundtrip_all_variants() {
        for category in Category::ALL {
            let parsed = Category::from_identifier(category.identifier());
            assert_eq!(parsed, Some(category), "roundtrip failed for {category:?}");
        }
    }

    #[test]
    fn index_matches_declaration_order() {
        for (idx, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), idx);
        }
    }

    #[test]
    fn default_is_first_category() {
        assert_eq!(Category::default(), Category::ALL[0]);
    }

    #[test]
    fn parse_accepts_identifier_label_and_slug() {
        assert_eq!("Trolley".parse::<Category>().unwrap(), Category::Trolley);
        assert_eq!("hafen".parse::<Category>().unwrap(), Category::Port);
        assert_eq!(
            "public-witnessing".parse::<Category>().unwrap(),
            Category::PublicWitnessing
        );
        assert_eq!("özb".parse::<Category>().unwrap(), Category::PublicWitnessing);
        assert_eq!(
            "Chinesischer Haus-zu-Haus".parse::<Category>().unwrap(),
            Category::ChineseDoorToDoor
        );
    }

    #[test]
    fn unknown_category_errors() {
        let err = "Gardening".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: Gardening");
    }

    #[test]
    fn display_label_falls_back_to_raw() {
        assert_eq!(display_label("Hafendienst"), "Hafen");
        assert_eq!(display_label("Gardening"), "Gardening");
    }

    #[test]
    fn serde_uses_identifier() {
        let json = serde_json::to_string(&Category::Port).unwrap();
        assert_eq!(json, "\"Hafendienst\"");
    }
}
