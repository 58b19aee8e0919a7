//! # Recall Core Library
//!
//! This library provides the core business logic for recall, a flashcard
//! reviewer that reorders its review queue from learner judgments to
//! approximate spaced repetition. It implements a CLI-first philosophy:
//! all operations are available via the standalone `recall-cli` binary,
//! which is a thin host over this library.
//!
//! ## Architecture
//!
//! - **Scheduler**: a pure in-memory state machine over a queue of card
//!   ids and a map of per-card learning state. All review decision logic
//!   lives here.
//! - **Library**: knowledge-base loading from JSON files, including
//!   content-derived id assignment and record editing
//! - **Storage**: JSON snapshot persistence for review progress and
//!   TOML-based configuration
//! - **Report**: per-card statistics with CSV, text and HTML export
//!
//! ## Key Components
//!
//! - [`Scheduler`]: the review state machine
//! - [`Library`]: knowledge-base file access
//! - [`ProgressStore`]: snapshot save/restore between sessions
//! - [`Report`]: statistics table builder and exporter
//! - [`Config`]: application configuration management

pub mod card;
pub mod error;
pub mod library;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use card::{Card, LearningState, LearningStep};
pub use error::{ConfigError, CoreError, LibraryError, Result};
pub use library::Library;
pub use report::{Report, ReportRow};
pub use scheduler::rng::{PcgSource, RandomSource, ScriptedSource};
pub use scheduler::{Judgment, ReviewItem, Scheduler};
pub use storage::{data_dir, Config, ProgressStore, Snapshot};
