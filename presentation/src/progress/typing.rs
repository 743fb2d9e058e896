//! Typing indicator shown while a bot reply is outstanding

use chatwire_application::SessionObserver;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Spinner that follows the session's typing flag
pub struct TypingIndicator {
    bar: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: false,
        }
    }

    /// Indicator that tracks state but never draws
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self) {
        let mut slot = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return;
        }

        let pb = if self.hidden {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(Self::spinner_style());
        pb.set_message("Bot is typing...");
        if !self.hidden {
            pb.enable_steady_tick(TICK);
        }
        *slot = Some(pb);
    }

    fn stop(&self) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for TypingIndicator {
    fn on_typing_changed(&self, typing: bool) {
        if typing {
            self.start();
        } else {
            self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_follows_typing_flag() {
        let indicator = TypingIndicator::hidden();
        assert!(!indicator.is_active());

        indicator.on_typing_changed(true);
        assert!(indicator.is_active());

        indicator.on_typing_changed(true);
        assert!(indicator.is_active());

        indicator.on_typing_changed(false);
        assert!(!indicator.is_active());
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let indicator = TypingIndicator::hidden();
        indicator.on_typing_changed(false);
        assert!(!indicator.is_active());
    }
}
