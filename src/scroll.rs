//! Scroll restoration.
//!
//! After every committed navigation the router picks a [`ScrollAction`]
//! with [`scroll_behavior`]. The host hands it to a [`ScrollRestorer`],
//! which drives the host's [`Viewport`]. Anchor jumps wait for the next
//! render pass because the target element may not exist yet.

use crate::location::Location;
use crate::trace_log;

/// Viewport offset in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    pub x: f32,
    pub y: f32,
}

impl ScrollPosition {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What to do with the viewport once a navigation completes.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollAction {
    /// Scroll to the element with this id after the next render.
    Anchor(String),
    /// Back to the position saved for the history entry.
    Restore(ScrollPosition),
    /// Scroll to the origin.
    Reset,
    /// Leave the viewport alone.
    Keep,
}

/// Pick the scroll action for a navigation from `from` to `to`.
///
/// `from` is `None` on initial load, which counts as a path change.
///
/// ```
/// use folio_navigator::{scroll_behavior, Location, ScrollAction, ScrollPosition};
///
/// let from = Location::from_path("/dashboard");
/// let to = Location::parse("/settings/general#sync");
/// assert_eq!(scroll_behavior(&to, Some(&from), None), ScrollAction::Anchor("sync".into()));
///
/// let to = Location::from_path("/nfts");
/// let saved = ScrollPosition::new(0.0, 420.0);
/// assert_eq!(scroll_behavior(&to, Some(&from), Some(saved)), ScrollAction::Restore(saved));
/// ```
pub fn scroll_behavior(
    to: &Location,
    from: Option<&Location>,
    saved: Option<ScrollPosition>,
) -> ScrollAction {
    if let Some(hash) = &to.hash {
        return ScrollAction::Anchor(hash.clone());
    }
    if let Some(position) = saved {
        return ScrollAction::Restore(position);
    }
    match from {
        Some(from) if from.path == to.path => ScrollAction::Keep,
        _ => ScrollAction::Reset,
    }
}

/// The host's scrollable surface.
pub trait Viewport {
    /// Top offset of the element with `id`, `None` when it is not rendered.
    fn element_offset_top(&self, id: &str) -> Option<f32>;

    fn scroll_to(&mut self, position: ScrollPosition);
}

/// Applies scroll actions to a [`Viewport`], deferring anchor jumps until
/// the host reports a finished render.
#[derive(Debug, Default)]
pub struct ScrollRestorer {
    pending_anchor: Option<String>,
}

impl ScrollRestorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` right away, or queue it when it is an anchor.
    ///
    /// A new action always replaces a queued anchor.
    pub fn apply<V: Viewport + ?Sized>(&mut self, action: &ScrollAction, viewport: &mut V) {
        self.pending_anchor = None;
        match action {
            ScrollAction::Anchor(id) => self.pending_anchor = Some(id.clone()),
            ScrollAction::Restore(position) => viewport.scroll_to(*position),
            ScrollAction::Reset => viewport.scroll_to(ScrollPosition::ORIGIN),
            ScrollAction::Keep => {}
        }
    }

    /// Call once the host finished rendering the new page.
    ///
    /// Returns whether a queued anchor jump happened. A missing element
    /// drops the jump.
    pub fn after_render<V: Viewport + ?Sized>(&mut self, viewport: &mut V) -> bool {
        let Some(id) = self.pending_anchor.take() else {
            return false;
        };
        match viewport.element_offset_top(&id) {
            Some(top) => {
                viewport.scroll_to(ScrollPosition::new(0.0, top));
                true
            }
            None => {
                trace_log!("Anchor '#{}' not rendered, scroll unchanged", id);
                false
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending_anchor.is_some()
    }
}
