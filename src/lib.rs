//! Examgen client - browser enhancement layer for the Exam Generator web app
//!
//! Compiled to WebAssembly and loaded by the server-rendered pages. Wires
//! up Bootstrap widgets, confirmation prompts, nav highlighting, and the
//! autosave/restore cycle for in-progress exam answers.
//!
//! Core modules:
//! - `answers`: Answer set model (question id -> answer value)
//! - `store`: Injected key-value storage (LocalStorage on web, in-memory for tests)
//! - `autosave`: Save/restore controller for the exam form
//! - `confirm`: Submission threshold and cancel confirmation prompts
//! - `nav`: Current-page navigation highlighting

pub mod answers;
pub mod autosave;
pub mod confirm;
pub mod nav;
pub mod store;

pub use answers::AnswerSet;
pub use autosave::{AutosaveController, RestoreOutcome};
pub use store::{AnswerStore, LocalStorageStore, MemoryStore};

/// Timing constants
pub mod consts {
    /// Delay between periodic autosaves of the exam form
    pub const AUTOSAVE_INTERVAL_MS: u32 = 30_000;
}
