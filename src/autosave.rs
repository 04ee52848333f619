//! Autosave controller for in-progress exam answers
//!
//! Snapshots the exam form into an [`AnswerSet`], overwrites the stored
//! blob on every save (timer tick or input change), restores it once at
//! page load, and clears it when the form is submitted. The form and
//! status indicator are abstract capabilities so the whole cycle runs
//! without a browser.

use crate::answers::AnswerSet;
use crate::store::AnswerStore;

/// Exam form capability driven by the controller.
///
/// The browser implementation wraps the rendered `#exam-form`; tests use
/// a scripted fake.
pub trait ExamForm {
    /// Snapshot of all checked radio inputs and all text inputs with
    /// non-empty values.
    fn snapshot(&self) -> AnswerSet;

    /// Check the radio input with this name and value. Returns `false`
    /// when no such input exists.
    fn select_radio(&self, name: &str, value: &str) -> bool;

    /// Set the value of the text input with this name. Returns `false`
    /// when no such input exists.
    fn set_text(&self, name: &str, value: &str) -> bool;
}

/// Status indicator capability.
///
/// Implementations drop updates when the page has no indicator element.
pub trait StatusIndicator {
    /// A change-driven save is about to run
    fn saving(&self);
    /// The answer set was written to storage
    fn saved(&self);
    /// Previously saved answers were applied to the form
    fn restored(&self);
}

/// Outcome of the one-shot restore at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing stored under the key
    NoSavedAnswers,
    /// Stored blob did not parse; the form was left at its defaults
    Corrupt,
    /// Saved answers applied; `applied` counts the pairs that matched an
    /// input in the form
    Restored { applied: usize },
}

/// Save/restore cycle for the exam form, bound to one injected store.
pub struct AutosaveController<S: AnswerStore> {
    store: S,
}

impl<S: AnswerStore> AutosaveController<S> {
    /// LocalStorage key for the serialized answer set
    pub const STORAGE_KEY: &'static str = "examAnswers";

    /// Create a controller over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serialize the current form snapshot and overwrite the stored
    /// answer set.
    ///
    /// The whole blob is rewritten on every call, even for a single
    /// changed field; the last writer wins.
    pub fn save(&self, form: &impl ExamForm, status: &impl StatusIndicator) {
        let answers = form.snapshot();
        if let Ok(json) = serde_json::to_string(&answers) {
            self.store.set(Self::STORAGE_KEY, &json);
            status.saved();
            log::info!("Answers auto-saved ({} fields)", answers.len());
        }
    }

    /// Apply previously saved answers to the form, if any.
    ///
    /// Radio groups take precedence: a pair whose value matches a radio
    /// input never falls through to a text input of the same name. Pairs
    /// matching neither kind of input are ignored. A malformed blob is
    /// logged and leaves the form untouched.
    pub fn restore(&self, form: &impl ExamForm, status: &impl StatusIndicator) -> RestoreOutcome {
        let Some(json) = self.store.get(Self::STORAGE_KEY) else {
            return RestoreOutcome::NoSavedAnswers;
        };

        let answers = match AnswerSet::from_json(&json) {
            Ok(answers) => answers,
            Err(e) => {
                log::error!("Error loading saved answers: {e}");
                return RestoreOutcome::Corrupt;
            }
        };

        let mut applied = 0;
        for (question, answer) in answers.iter() {
            if form.select_radio(question, answer) || form.set_text(question, answer) {
                applied += 1;
            }
        }

        status.restored();
        log::info!("Saved answers loaded ({applied} applied)");
        RestoreOutcome::Restored { applied }
    }

    /// Remove the persisted answer set entirely, so a submitted exam
    /// leaves no residual local state.
    pub fn clear(&self) {
        self.store.remove(Self::STORAGE_KEY);
        log::info!("Saved answers cleared");
    }
}
