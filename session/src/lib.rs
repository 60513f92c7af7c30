//! # Stagepass Session
//!
//! The purchase session state machine: holds one user's in-progress ticket
//! selection (tier, quantity, coupon, promotion code, points), fetches
//! supporting data through environment gateways, recomputes the itemized
//! price breakdown on every relevant edit, and serializes an immutable
//! [`intent::PurchaseIntent`] at confirmation.
//!
//! ## Architecture
//!
//! ```text
//! UI events ──► PurchaseAction ──► PurchaseSessionReducer
//!                                        │
//!                     state mutation + Effect::Future (gateway fetches)
//!                                        │
//!               stagepass_pricing::compute_breakdown (sync, every pass)
//!                                        │
//!                 PriceBreakdown rendered back / PurchaseIntent staged
//! ```
//!
//! The reducer is pure: all I/O (profile fetch, promotion lookup, intent
//! staging) is described as effects and executed by the store runtime,
//! feeding resolution actions back in. In-flight fetches carry a sequence
//! number so responses arriving after a newer request are discarded instead
//! of overwriting fresher state.
//!
//! ## Example
//!
//! ```ignore
//! use stagepass_runtime::Store;
//! use stagepass_session::{
//!     PurchaseAction, PurchaseSessionReducer, PurchaseSessionState,
//! };
//!
//! let store = Store::new(
//!     PurchaseSessionState::new(listing, Some(user_id)),
//!     PurchaseSessionReducer::default(),
//!     env,
//! );
//!
//! store.send(PurchaseAction::SelectTier { name: "vip".into() }).await?;
//! store.send(PurchaseAction::SetQuantity { quantity: 2 }).await?;
//! let total = store.state(|s| s.breakdown.final_price).await;
//! ```

pub mod environment;
pub mod intent;
pub mod reducer;
pub mod state;
pub mod types;

pub use environment::{
    GatewayError, IntentSink, ProfileGateway, PromotionGateway, PurchaseEnvironment,
};
pub use intent::{PAYMENT_WINDOW_HOURS, PurchaseIntent, payment_window};
pub use reducer::{PurchaseAction, PurchaseSessionReducer};
pub use state::{ConfirmBlocker, LOW_STOCK_THRESHOLD, PurchasePhase, PurchaseSessionState};
pub use types::{EventListing, PatronProfile, TicketTier, UserId};
