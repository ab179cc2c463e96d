//! Shared test fixtures for the memory engine workspace.
//!
//! - [`WorkspaceFixture`]: a throwaway workspace directory with helpers to
//!   lay down notes and backdate files
//! - [`FixedClock`]: a pinned clock so date arithmetic is reproducible
//! - [`StaticInventory`], [`FailingInventory`], [`DelayedInventory`]:
//!   scheduler inventory stand-ins
//!
//! Fixtures are per test; nothing is shared across test processes.

mod fixtures;

pub use fixtures::*;
