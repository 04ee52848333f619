//! Submission and cancellation confirmation logic
//!
//! Pure predicates and prompt text; the dialog itself is `window.confirm`
//! on the browser side.

/// Prompt shown before a cancel control abandons the exam
pub const CANCEL_EXAM_PROMPT: &str =
    "Are you sure you want to cancel this exam? All progress will be lost.";

/// Whether submitting with this many answered questions needs explicit
/// confirmation: fewer than half of the questions answered.
pub fn needs_confirmation(answered: usize, total: usize) -> bool {
    // Integer-exact form of `answered < total / 2`
    answered * 2 < total
}

/// Confirmation prompt for an under-answered submission, or `None` when
/// enough questions are answered to submit without asking.
pub fn submit_warning(answered: usize, total: usize) -> Option<String> {
    needs_confirmation(answered, total).then(|| {
        format!(
            "You've only answered {answered} out of {total} questions. Are you sure you want to submit?"
        )
    })
}
