//! Typed events crossing the toolkit boundary.

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
///
/// The engine reports raw progress events; the mapping into this enum is the
/// single translation point (`From` below), nothing else in the crate looks
/// at raw engine codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for LoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Notifications delivered by the toolkit to the shell, always on the loop
/// thread as part of a pump iteration.
#[derive(Debug, Clone)]
pub enum ToolkitEvent {
    /// The surface's load state changed. Carries the URL being loaded.
    LoadStateChanged { state: LoadState, url: String },
    /// A submitted script finished and produced a value.
    ScriptSucceeded(serde_json::Value),
    /// A submitted script failed. Carries the engine's diagnostic text.
    ScriptFailed(String),
    /// The user asked to close the window.
    CloseRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_load_events_translate() {
        assert_eq!(
            LoadState::from(wry::PageLoadEvent::Started),
            LoadState::Started
        );
        assert_eq!(
            LoadState::from(wry::PageLoadEvent::Finished),
            LoadState::Finished
        );
    }
}
