//! # State Module
//!
//! Application state for the dashboard, one focused type per concern.
//! Commands take only the state they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────┐  ┌─────────┐ │
//! │  │   DbState    │  │   SessionState   │  │ SubmitGuard  │  │AppConfig│ │
//! │  │              │  │                  │  │              │  │         │ │
//! │  │  Database    │  │  currentUser     │  │  in-flight   │  │ latency │ │
//! │  │  (Arc<RwLock │  │  theme           │  │  flag        │  │ data dir│ │
//! │  │   Dataset>>) │  │  (SessionStore)  │  │              │  │ log     │ │
//! │  └──────────────┘  └──────────────────┘  └──────────────┘  └─────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: the store's RwLock serializes writers                      │
//! │  • SessionState: backends lock internally                              │
//! │  • SubmitGuard: AtomicBool shared through Arc                          │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod session;
mod submit;

pub use config::{AppConfig, ConfigError, ConfigResult, MAX_LATENCY_MS};
pub use db::DbState;
pub use session::{
    FileSessionStore, MemorySessionStore, SessionError, SessionResult, SessionState,
    SessionStore, CURRENT_USER_KEY, THEME_KEY,
};
pub use submit::{SubmitGuard, Submission};
