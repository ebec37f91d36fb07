//! Deduplicated warnings with colored terminal output.
//!
//! Selector text is often compiled repeatedly (once per stylesheet rule, once
//! per query), so a warning about the same construct is printed only the first
//! time it is seen.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned_set() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock leaves the set usable; keep going.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a non-standard or degraded feature (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("Selector", "non-standard attribute operator '!='");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned_set()
        .get_or_insert_with(HashSet::new)
        .insert(warning_key(component, message));

    if should_print {
        eprintln!("{}", format!("[sift {component}] ⚠ {message}").yellow());
    }
}

/// Whether `warn_once` has already reported this exact message.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    warned_set()
        .as_ref()
        .is_some_and(|set| set.contains(&warning_key(component, message)))
}

/// Clear all recorded warnings.
pub fn clear_warnings() {
    if let Some(set) = warned_set().as_mut() {
        set.clear();
    }
}
