//! Degrading gracefully when the provider answers without usable content

use tracing::{error, warn};

use super::types::Generation;

/// Turn a provider answer into a value, or fall back when there is nothing to use
///
/// `on_text` receives the generated text when it is non-blank and may still
/// reject it by returning `None`. Both the empty case and the rejected case
/// yield `fallback`.
pub fn content_or<T>(
    generation: &Generation,
    fallback: T,
    on_text: impl FnOnce(&str) -> Option<T>,
) -> T {
    let Some(text) = generation.usable_text() else {
        match &generation.finish_reason {
            Some(reason) if reason.is_blocked() => {
                error!(finish_reason = ?reason, "Provider response blocked");
            }
            reason => {
                error!(finish_reason = ?reason, "No content in provider response");
            }
        }
        return fallback;
    };

    match on_text(text) {
        Some(value) => value,
        None => {
            warn!("Provider content rejected, using fallback");
            fallback
        }
    }
}
