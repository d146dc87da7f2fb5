//! Display sinks
//!
//! The engine pushes a `(history, current)` pair after every mutating
//! operation. What happens to it (a DOM update, a terminal redraw) is up to
//! the sink.

use serde::{Deserialize, Serialize};

/// Receives the two display panes after each engine update
pub trait DisplaySink {
    /// Called synchronously with the history pane and current pane text
    fn update(&mut self, history: &str, current: &str);
}

impl<F> DisplaySink for F
where
    F: FnMut(&str, &str),
{
    fn update(&mut self, history: &str, current: &str) {
        self(history, current);
    }
}

/// Sink that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn update(&mut self, _history: &str, _current: &str) {}
}

/// One rendered state of both panes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayFrame {
    /// History pane text
    pub history: String,
    /// Current pane text
    pub current: String,
}

/// Sink that remembers what it was last told to show
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    latest: DisplayFrame,
    updates: usize,
    frames: Option<Vec<DisplayFrame>>,
}

impl RecordingDisplay {
    /// Creates a sink that keeps only the latest frame
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that also keeps every frame it receives
    #[must_use]
    pub fn with_frames() -> Self {
        Self {
            frames: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// History pane text
    #[must_use]
    pub fn history(&self) -> &str {
        &self.latest.history
    }

    /// Current pane text
    #[must_use]
    pub fn current(&self) -> &str {
        &self.latest.current
    }

    /// Latest frame
    #[must_use]
    pub fn latest(&self) -> &DisplayFrame {
        &self.latest
    }

    /// Number of updates received
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Every frame received, if recording was enabled
    #[must_use]
    pub fn frames(&self) -> &[DisplayFrame] {
        self.frames.as_deref().unwrap_or_default()
    }
}

impl DisplaySink for RecordingDisplay {
    fn update(&mut self, history: &str, current: &str) {
        self.latest = DisplayFrame {
            history: history.to_string(),
            current: current.to_string(),
        };
        self.updates += 1;
        if let Some(frames) = &mut self.frames {
            frames.push(self.latest.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |h: &str, c: &str| seen.push(format!("{h}|{c}"));
            sink.update("1+", "...");
            sink.update("0", "0");
        }
        assert_eq!(seen, vec!["1+|...", "0|0"]);
    }

    #[test]
    fn test_recording_display_latest() {
        let mut display = RecordingDisplay::new();
        assert_eq!(display.updates(), 0);
        display.update("2+3", "...");
        display.update("2+3", "5");
        assert_eq!(display.history(), "2+3");
        assert_eq!(display.current(), "5");
        assert_eq!(display.updates(), 2);
        assert!(display.frames().is_empty());
    }

    #[test]
    fn test_recording_display_frames() {
        let mut display = RecordingDisplay::with_frames();
        display.update("7", "...");
        display.update("Error", "Error");
        assert_eq!(display.frames().len(), 2);
        assert_eq!(display.frames()[1].current, "Error");
    }

    #[test]
    fn test_null_display() {
        let mut display = NullDisplay;
        display.update("anything", "at all");
    }
}
