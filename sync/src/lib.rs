//! # Status Sync
//!
//! Reads the scheduler's job inventory and writes it, with a fresh
//! timestamp, into the working-memory document.

pub mod error;
pub mod inventory;
pub mod status;

pub use error::{Result, SyncError};
pub use inventory::{CommandInventoryProvider, HttpInventoryProvider, SchedulerInventory};
pub use status::{SectionUpdate, StatusSync, SyncReport};
