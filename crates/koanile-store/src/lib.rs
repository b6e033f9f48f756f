//! # koanile-store: State Containers for the Koanile Storefront
//!
//! Everything stateful lives here: the shared cart/order container, the
//! mirrored auth session, the store event bus, and the typed operations
//! facade the mobile shell talks to.
//!
//! ## Module Organization
//! ```text
//! koanile_store/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── api.rs          ◄─── Storefront facade (typed reads/writes, DTOs)
//! ├── cart.rs         ◄─── CartState: cart + order history behind one mutex
//! ├── session.rs      ◄─── SessionState: auth session mirror + backend trait
//! ├── events.rs       ◄─── StoreEvent broadcast bus
//! ├── config.rs       ◄─── StoreConfig with env overrides
//! └── error.rs        ◄─── ApiError for the frontend
//! ```
//!
//! ## State Management
//! Each concern gets its own focused state type instead of one god object:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store State Types                                │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │    CartState     │ │   SessionState   │ │     StoreConfig      │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • live cart     │ │  • current user  │ │  • store name        │   │
//! │  │  • order history │ │  • loading flag  │ │  • currency          │   │
//! │  │  • totals        │ │  • sign-out      │ │  • auth endpoint     │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Arc<Mutex<_>> gives exclusive access per mutation        │
//! │  • SessionState: updated only by the backend change stream             │
//! │  • StoreConfig: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod events;
pub mod session;

pub use api::{CartResponse, CheckoutResponse, StoreInfo, Storefront};
pub use cart::{CartState, CartTotals};
pub use config::StoreConfig;
pub use error::{ApiError, ErrorCode};
pub use events::{EventBus, StoreEvent};
pub use session::{AuthBackend, AuthError, Session, SessionState, StaticAuthBackend};
