//! # Memory Engine
//!
//! Lifecycle management for a directory of dated markdown notes: inventory,
//! decay into the archive, state and alert evaluation, heading pattern
//! detection and the metrics log.

pub mod alert;
pub mod clock;
pub mod decay;
pub mod document;
pub mod engine;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod patterns;
pub mod scanner;
pub mod staleness;
pub mod state;
pub mod stub;

pub use alert::{AlertEvaluator, AlertReport};
pub use clock::SystemClock;
pub use decay::{DecayAction, DecayClassifier, DecayCounts, DecayReport, NoteOutcome};
pub use document::WorkingMemoryDocument;
pub use engine::MemoryEngine;
pub use error::{MemoryError, Result};
pub use layout::Workspace;
pub use metrics::{CollectionMetrics, MetricsRecorder};
pub use patterns::{PatternAggregator, PatternReport};
pub use scanner::InventoryScanner;
pub use state::{StateReport, StateVerifier};
pub use stub::{DailyNoteStub, StubOutcome};
