//! Category module - the closed legal-subdomain taxonomy

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Legal subdomain of an exam question
///
/// The set is closed. `Otros` is the catch-all assigned whenever a
/// classifier's answer is not an exact member of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Derecho constitucional
    Constitucional,
    /// Derecho administrativo
    Administrativo,
    /// Derecho civil
    Civil,
    /// Derecho penal
    Penal,
    /// Derecho procesal
    Procesal,
    /// Derecho internacional
    Internacional,
    /// Derecho mercantil
    Mercantil,
    /// Derecho comunitario europeo
    ComunitarioEuropeo,
    /// Teoría y filosofía del derecho
    TeoriaDelDerecho,
    /// Catch-all
    Otros,
}

impl Category {
    /// The full taxonomy, in prompt order
    pub const ALL: [Category; 10] = [
        Category::Constitucional,
        Category::Administrativo,
        Category::Civil,
        Category::Penal,
        Category::Procesal,
        Category::Internacional,
        Category::Mercantil,
        Category::ComunitarioEuropeo,
        Category::TeoriaDelDerecho,
        Category::Otros,
    ];

    /// Canonical label, as enumerated to the classifier
    pub fn label(&self) -> &'static str {
        match self {
            Category::Constitucional => "Constitucional",
            Category::Administrativo => "Administrativo",
            Category::Civil => "Civil",
            Category::Penal => "Penal",
            Category::Procesal => "Procesal",
            Category::Internacional => "Internacional",
            Category::Mercantil => "Mercantil",
            Category::ComunitarioEuropeo => "Comunitario Europeo",
            Category::TeoriaDelDerecho => "Teoría del Derecho y Filosofía del Derecho",
            Category::Otros => "Otros",
        }
    }

    /// Persisted form: the lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Constitucional => "constitucional",
            Category::Administrativo => "administrativo",
            Category::Civil => "civil",
            Category::Penal => "penal",
            Category::Procesal => "procesal",
            Category::Internacional => "internacional",
            Category::Mercantil => "mercantil",
            Category::ComunitarioEuropeo => "comunitario europeo",
            Category::TeoriaDelDerecho => "teoría del derecho y filosofía del derecho",
            Category::Otros => "otros",
        }
    }

    /// Exact match against the canonical labels
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// Lenient parse used for persisted data and user input (any case)
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == lowered)
    }

    /// Map a raw classifier response onto the taxonomy
    ///
    /// Surrounding whitespace and trailing punctuation are removed, then the
    /// remainder must equal a canonical label exactly. Anything else (typos,
    /// extra words, different case, empty text) becomes [`Category::Otros`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lexqa_domain::Category;
    ///
    /// assert_eq!(Category::from_response(" Civil.\n"), Category::Civil);
    /// assert_eq!(Category::from_response("Derecho Civil."), Category::Otros);
    /// ```
    pub fn from_response(response: &str) -> Self {
        let normalized = response
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
        Self::from_label(normalized).unwrap_or(Category::Otros)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("Invalid category: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_labels_are_recognized() {
        for category in Category::ALL {
            assert_eq!(Category::from_response(category.label()), category);
        }
    }

    #[test]
    fn test_trailing_punctuation_is_trimmed() {
        assert_eq!(Category::from_response("Penal."), Category::Penal);
        assert_eq!(Category::from_response("  Comunitario Europeo,\n"), Category::ComunitarioEuropeo);
    }

    #[test]
    fn test_mismatches_fall_back_to_otros() {
        assert_eq!(Category::from_response("Derecho Civil."), Category::Otros);
        assert_eq!(Category::from_response("civil"), Category::Otros);
        assert_eq!(Category::from_response("Civl"), Category::Otros);
        assert_eq!(Category::from_response(""), Category::Otros);
        assert_eq!(Category::from_response("Penal y Procesal"), Category::Otros);
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(Category::parse("CIVIL"), Some(Category::Civil));
        assert_eq!(
            Category::parse("teoría del derecho y filosofía del derecho"),
            Some(Category::TeoriaDelDerecho)
        );
        assert_eq!(Category::parse("laboral"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_label() {
        let json = serde_json::to_string(&Category::ComunitarioEuropeo).unwrap();
        assert_eq!(json, "\"comunitario europeo\"");

        let parsed: Category = serde_json::from_str("\"Otros\"").unwrap();
        assert_eq!(parsed, Category::Otros);
        assert!(serde_json::from_str::<Category>("\"laboral\"").is_err());
    }
}
