//! Mirath - Islamic inheritance (Faraid) share engine
//!
//! Given a net estate and a roster of heirs, computes each heir's exact
//! share and its monetary value:
//!
//! - **Blocking (hajb)**: nearer heirs exclude more distant ones
//! - **Fixed shares (faraid)**: the prescribed fractions
//! - **Residue (asabah)**: whatever is left, by strict precedence
//! - **Reconciliation**: awal when shares overflow, radd when they fall short
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ShareEngine                           │
//! │                                                              │
//! │  ┌──────────┐  ┌───────┐  ┌───────────┐  ┌───────────┐       │
//! │  │ Blocking │──│ Fixed │──│ Residuary │──│ Reconcile │       │
//! │  └──────────┘  └───────┘  └───────────┘  └───────────┘       │
//! │                                                │             │
//! │                                        ┌───────▼──────┐      │
//! │                                        │   Finalize   │      │
//! │                                        └──────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shares are exact rationals end to end; only the final percentage and
//! monetary value are rounded.

pub mod blocking;
pub mod config;
pub mod engine;
pub mod estate;
pub mod finalize;
pub mod fixed;
pub mod labels;
pub mod presence;
pub mod ratio;
pub mod reconcile;
pub mod residuary;
pub mod roster;
pub mod state;
pub mod types;

// Re-export main types
pub use config::EngineConfig;
pub use engine::{compute, Distribution, ShareEngine};
pub use estate::{EstateTotals, NetEstate};
pub use labels::Locale;
pub use reconcile::Reconciliation;
pub use residuary::ResiduaryClass;
pub use roster::{HeirCountArg, HeirCounts, RosterBuilder};
pub use types::*;
