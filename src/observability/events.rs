//! Observability events for pagewise
//!
//! Events are explicit and typed. Every `tracing` event emitted by the crate
//! carries one of these names in its `event` field.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and validated
    ConfigLoaded,

    // Compilation
    /// Query context compiled
    PlanCompiled,
    /// Request rejected before compilation finished
    RequestRejected,
    /// Supplied cursor failed to decode
    CursorRejected,

    // Translation
    /// Filter tree translated into a clause
    FilterTranslated,

    // Assembly
    /// Result page assembled
    PageAssembled,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::PlanCompiled => "PLAN_COMPILED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::CursorRejected => "CURSOR_REJECTED",
            Event::FilterTranslated => "FILTER_TRANSLATED",
            Event::PageAssembled => "PAGE_ASSEMBLED",
        }
    }

    /// Returns true if this event reports a rejected request
    pub fn is_rejection(&self) -> bool {
        matches!(self, Event::RequestRejected | Event::CursorRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::PlanCompiled,
            Event::RequestRejected,
            Event::CursorRejected,
            Event::FilterTranslated,
            Event::PageAssembled,
        ];

        for event in events {
            assert!(!event.as_str().is_empty());
            assert_eq!(event.to_string(), event.as_str());
        }
    }

    #[test]
    fn test_rejection_events() {
        assert!(Event::CursorRejected.is_rejection());
        assert!(Event::RequestRejected.is_rejection());
        assert!(!Event::PlanCompiled.is_rejection());
    }
}
