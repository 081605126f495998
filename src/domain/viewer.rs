// src/domain/viewer.rs
//
// Viewer - the current session's identity plus its resolved tier
//
// INVARIANTS:
// - tier is always one of the three Tier values
// - a viewer without identity is always Basic
// - favorites storage key is derived, never stored

use serde::{Deserialize, Serialize};

use crate::domain::tier::Tier;

/// Key segment used for favorites when nobody is signed in
pub const ANONYMOUS_KEY: &str = "anon";

/// Prefix for the favorites storage key
pub const FAVORITES_KEY_PREFIX: &str = "favorites_";

/// Identity as reported by the auth collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    /// User-editable metadata namespace
    #[serde(default)]
    pub user_metadata: serde_json::Value,

    /// Provider-controlled metadata namespace
    #[serde(default)]
    pub app_metadata: serde_json::Value,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
            user_metadata: serde_json::Value::Null,
            app_metadata: serde_json::Value::Null,
        }
    }

    pub fn with_user_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.user_metadata = metadata;
        self
    }

    pub fn with_app_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.app_metadata = metadata;
        self
    }

    /// First non-empty raw tier string embedded in the identity.
    ///
    /// Order: user `tier`, user `plan`, app `tier`, app `plan`.
    pub fn embedded_tier_hint(&self) -> Option<&str> {
        [
            (&self.user_metadata, "tier"),
            (&self.user_metadata, "plan"),
            (&self.app_metadata, "tier"),
            (&self.app_metadata, "plan"),
        ]
        .into_iter()
        .filter_map(|(namespace, field)| namespace.get(field).and_then(|v| v.as_str()))
        .find(|v| !v.trim().is_empty())
    }
}

/// The viewer a catalog view is computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Viewer {
    pub identity: Option<Identity>,
    pub tier: Tier,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a viewer; an absent identity forces Basic regardless of `tier`
    pub fn new(identity: Option<Identity>, tier: Tier) -> Self {
        let tier = if identity.is_some() { tier } else { Tier::Basic };
        Self { identity, tier }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.id.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.identity.as_ref().and_then(|i| i.email.as_deref())
    }

    pub fn favorites_key(&self) -> String {
        format!("{}{}", FAVORITES_KEY_PREFIX, self.id().unwrap_or(ANONYMOUS_KEY))
    }

    /// Whether the basic gate applies to this viewer
    pub fn is_gated(&self) -> bool {
        !self.is_authenticated() || !self.tier.is_unrestricted()
    }

    pub fn is_pro(&self) -> bool {
        self.is_authenticated() && self.tier == Tier::Pro
    }

    pub fn can_upload(&self) -> bool {
        self.is_pro()
    }

    pub fn can_filter_own_moves(&self) -> bool {
        self.is_pro()
    }

    pub fn access_message(&self) -> &'static str {
        if !self.is_authenticated() {
            return "Signed out: Basic access active. Sign in for more content.";
        }

        match self.tier {
            Tier::Basic => "Basic access: limited move list and only Beginner level.",
            Tier::Normal => "Normal access: all move content unlocked.",
            Tier::Pro => "Pro access: all content and uploads enabled.",
        }
    }

    pub fn status_line(&self) -> String {
        match &self.identity {
            Some(identity) => format!(
                "{} · {}",
                identity.email.as_deref().unwrap_or(&identity.id),
                self.tier.as_str().to_uppercase()
            ),
            None => "Signed out".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_anonymous_viewer_is_basic_and_gated() {
        let viewer = Viewer::new(None, Tier::Pro);
        assert_eq!(viewer.tier, Tier::Basic);
        assert!(viewer.is_gated());
        assert!(!viewer.can_upload());
        assert_eq!(viewer.favorites_key(), "favorites_anon");
    }

    #[test]
    fn test_favorites_key_uses_identity_id() {
        let viewer = Viewer::new(Some(Identity::new("u-1", None)), Tier::Normal);
        assert_eq!(viewer.favorites_key(), "favorites_u-1");
        assert!(!viewer.is_gated());
    }

    #[test]
    fn test_embedded_hint_prefers_user_tier_then_plan() {
        let identity = Identity::new("u", None)
            .with_user_metadata(json!({ "plan": "plus" }))
            .with_app_metadata(json!({ "tier": "pro" }));
        assert_eq!(identity.embedded_tier_hint(), Some("plus"));

        let identity = Identity::new("u", None)
            .with_user_metadata(json!({ "tier": "", "plan": null }))
            .with_app_metadata(json!({ "plan": "premium" }));
        assert_eq!(identity.embedded_tier_hint(), Some("premium"));

        assert_eq!(Identity::new("u", None).embedded_tier_hint(), None);
    }

    #[test]
    fn test_access_messages() {
        assert!(Viewer::anonymous().access_message().starts_with("Signed out"));
        let pro = Viewer::new(Some(Identity::new("u", Some("a@b.c".into()))), Tier::Pro);
        assert_eq!(pro.access_message(), "Pro access: all content and uploads enabled.");
        assert_eq!(pro.status_line(), "a@b.c · PRO");
    }
}
