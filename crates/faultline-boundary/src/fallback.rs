//! Degraded-view descriptions.
//!
//! Rendering is out of scope for this library; a boundary describes *what*
//! degraded UI to show and the embedding application draws it.

use std::fmt;

/// Where in the UI tree a boundary sits. Determines the blast radius of the
/// fallback and the wording of its headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryLevel {
    App,
    Screen,
    Component,
}

impl fmt::Display for BoundaryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryLevel::App => write!(f, "app"),
            BoundaryLevel::Screen => write!(f, "screen"),
            BoundaryLevel::Component => write!(f, "component"),
        }
    }
}

/// Shape of the degraded view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// Minimal inline notice; siblings and ancestors are unaffected.
    Inline,
    /// Full fallback replacing the subtree: description, retry control,
    /// optional detail disclosure and diagnostic actions.
    Full,
}

/// Description of the degraded UI for a faulted boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackView {
    pub kind: FallbackKind,
    pub level: BoundaryLevel,
    /// Identifier of the record that caused the current fault.
    pub fault_id: String,
    /// Level-appropriate headline.
    pub message: String,
    /// Error text for the detail disclosure; present only when the boundary
    /// was configured to show details.
    pub detail: Option<String>,
    pub occurrence_count: u32,
    /// A retry (reset) action is always offered.
    pub offers_retry: bool,
    /// Copy-diagnostics and report actions, offered on full fallbacks with
    /// details enabled.
    pub offers_diagnostics: bool,
}

/// Result of rendering a wrapped subtree.
#[derive(Debug)]
pub enum RenderOutcome<R> {
    /// The subtree rendered normally.
    Rendered(R),
    /// The boundary is faulted; show this instead of the subtree.
    Fallback(FallbackView),
}

impl<R> RenderOutcome<R> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }

    /// The rendered value, if the subtree rendered.
    pub fn rendered(self) -> Option<R> {
        match self {
            RenderOutcome::Rendered(value) => Some(value),
            RenderOutcome::Fallback(_) => None,
        }
    }

    /// The fallback description, if the boundary is faulted.
    pub fn fallback(&self) -> Option<&FallbackView> {
        match self {
            RenderOutcome::Rendered(_) => None,
            RenderOutcome::Fallback(view) => Some(view),
        }
    }
}

/// Headline for a full fallback at the given level.
pub(crate) fn headline(level: BoundaryLevel) -> &'static str {
    match level {
        BoundaryLevel::App => "The app has encountered a critical error.",
        BoundaryLevel::Screen => "This screen has encountered an error and cannot be displayed.",
        BoundaryLevel::Component => "A component on this page has encountered an error.",
    }
}

/// Notice for an isolated inline fallback.
pub(crate) const INLINE_NOTICE: &str = "This component encountered an error.";
