use serde::{Deserialize, Serialize};

/// Entitlement level of a viewer
///
/// Ordered from least to most privileged so `tier >= Tier::Normal`
/// reads naturally at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Basic,
    Normal,
    Pro,
}

const PRO_SYNONYMS: &[&str] = &["pro", "premium"];
const NORMAL_SYNONYMS: &[&str] = &["normal", "plus", "standard"];

/// Map any raw tier string onto the three known tiers.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
/// Anything unrecognized, including an absent value, is Basic.
pub fn normalize_tier(raw: Option<&str>) -> Tier {
    let value = match raw {
        Some(v) => v.trim().to_lowercase(),
        None => return Tier::Basic,
    };

    if PRO_SYNONYMS.contains(&value.as_str()) {
        Tier::Pro
    } else if NORMAL_SYNONYMS.contains(&value.as_str()) {
        Tier::Normal
    } else {
        Tier::Basic
    }
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Normal => "normal",
            Tier::Pro => "pro",
        }
    }

    /// True for tiers that see the whole catalog without the basic gate
    pub fn is_unrestricted(&self) -> bool {
        *self >= Tier::Normal
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_resolve() {
        assert_eq!(normalize_tier(Some("pro")), Tier::Pro);
        assert_eq!(normalize_tier(Some("Premium")), Tier::Pro);
        assert_eq!(normalize_tier(Some("plus")), Tier::Normal);
        assert_eq!(normalize_tier(Some("STANDARD")), Tier::Normal);
        assert_eq!(normalize_tier(Some(" normal ")), Tier::Normal);
    }

    #[test]
    fn test_unknown_and_missing_are_basic() {
        assert_eq!(normalize_tier(None), Tier::Basic);
        assert_eq!(normalize_tier(Some("")), Tier::Basic);
        assert_eq!(normalize_tier(Some("gold")), Tier::Basic);
        assert_eq!(normalize_tier(Some("basic")), Tier::Basic);
    }

    #[test]
    fn test_normalize_is_idempotent_and_case_insensitive() {
        let samples = ["pro", "PRO", "Premium", "plus", "standard", "x", "", "Basic"];
        for raw in samples {
            let once = normalize_tier(Some(raw));
            let twice = normalize_tier(Some(once.as_str()));
            assert_eq!(once, twice, "normalize not idempotent for {:?}", raw);
            assert_eq!(
                normalize_tier(Some(&raw.to_uppercase())),
                normalize_tier(Some(&raw.to_lowercase()))
            );
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Pro > Tier::Normal);
        assert!(Tier::Normal > Tier::Basic);
        assert!(!Tier::Basic.is_unrestricted());
        assert!(Tier::Normal.is_unrestricted());
    }
}
