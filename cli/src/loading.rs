use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a request is in flight.
///
/// Each action owns its own indicator; dropping it clears the spinner, so it is
/// removed on success and on every early error return alike.
pub struct LoadingIndicator {
    spinner: ProgressBar,
}

impl LoadingIndicator {
    pub fn start(message: &str) -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    pub fn is_active(&self) -> bool {
        !self.spinner.is_finished()
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}

/// Truncate text to the specified length with ellipsis
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let truncate_at = max_len.saturating_sub(3); // Reserve 3 chars for "..."
        let head: String = text.chars().take(truncate_at).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
