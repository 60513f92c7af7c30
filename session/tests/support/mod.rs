//! In-memory gateway implementations for integration tests.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use stagepass_pricing::{EventId, PromotionInstrument};
use stagepass_session::{
    GatewayError, IntentSink, PatronProfile, ProfileGateway, PromotionGateway, PurchaseIntent,
    UserId,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Profile gateway backed by a map, optionally failing every request.
pub struct InMemoryProfiles {
    profiles: Mutex<HashMap<UserId, PatronProfile>>,
    fail: bool,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    pub fn insert(&self, profile: PatronProfile) {
        self.profiles.lock().unwrap().insert(profile.user_id, profile);
    }
}

#[async_trait]
impl ProfileGateway for InMemoryProfiles {
    async fn fetch_profile(&self, user: UserId) -> Result<PatronProfile, GatewayError> {
        if self.fail {
            return Err(GatewayError::Unavailable("profile service down".into()));
        }
        self.profiles
            .lock()
            .unwrap()
            .get(&user)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }
}

/// Promotion gateway with a per-code artificial delay, for race tests.
pub struct InMemoryPromotions {
    promotions: Mutex<HashMap<String, PromotionInstrument>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl InMemoryPromotions {
    pub fn new() -> Self {
        Self {
            promotions: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, promotion: PromotionInstrument) {
        self.promotions
            .lock()
            .unwrap()
            .insert(promotion.code.clone(), promotion);
    }

    pub fn delay(&self, code: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(code.to_string(), delay);
    }
}

#[async_trait]
impl PromotionGateway for InMemoryPromotions {
    async fn lookup(
        &self,
        _event_id: EventId,
        code: &str,
    ) -> Result<PromotionInstrument, GatewayError> {
        let delay = self.delays.lock().unwrap().get(code).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.promotions
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }
}

/// Intent sink that records every staged intent.
pub struct CapturingIntents {
    staged: Mutex<Vec<PurchaseIntent>>,
    fail: bool,
}

impl CapturingIntents {
    pub fn new() -> Self {
        Self {
            staged: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            staged: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn staged(&self) -> Vec<PurchaseIntent> {
        self.staged.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntentSink for CapturingIntents {
    async fn stage(&self, intent: PurchaseIntent) -> Result<(), GatewayError> {
        if self.fail {
            return Err(GatewayError::Unavailable("intent queue rejected".into()));
        }
        self.staged.lock().unwrap().push(intent);
        Ok(())
    }
}
