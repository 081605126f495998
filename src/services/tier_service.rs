// src/services/tier_service.rs
//
// Tier Resolver
//
// CRITICAL RULES:
// - Never fails outward: every failure path resolves to Basic
// - Identity metadata short-circuits the profile lookup when it grants access
// - No identity means Basic, without any lookup

use std::sync::Arc;

use crate::domain::{normalize_tier, Identity, Tier};
use crate::events::{EventBus, TierResolved};
use crate::repositories::ProfileRepository;

pub struct TierService {
    profile_repo: Arc<dyn ProfileRepository>,
    event_bus: Arc<EventBus>,
}

impl TierService {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            profile_repo,
            event_bus,
        }
    }

    pub fn resolve_tier(&self, identity: Option<&Identity>) -> Tier {
        let tier = match identity {
            Some(identity) => self.resolve_for(identity),
            None => Tier::Basic,
        };

        self.event_bus
            .emit(TierResolved::new(identity.map(|i| i.id.clone()), tier));
        tier
    }

    fn resolve_for(&self, identity: &Identity) -> Tier {
        let from_metadata = normalize_tier(identity.embedded_tier_hint());
        if from_metadata != Tier::Basic {
            return from_metadata;
        }

        match self.profile_repo.get_tier(&identity.id) {
            Ok(raw) => normalize_tier(raw.as_deref()),
            Err(e) => {
                log::warn!("Profile tier lookup failed for {}: {}", identity.id, e);
                Tier::Basic
            }
        }
    }
}
