//! Navigation history.

use crate::location::Location;
use crate::navigation::{NavigationDirection, RouteChangeEvent};
use crate::scroll::ScrollPosition;

/// One visited location and the scroll position saved when leaving it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub location: Location,
    pub scroll: Option<ScrollPosition>,
}

impl HistoryEntry {
    fn new(location: Location) -> Self {
        Self {
            location,
            scroll: None,
        }
    }
}

/// History stack with a cursor.
///
/// Starts empty; the first push is the initial load.
#[derive(Debug, Clone, Default)]
pub struct RouterState {
    history: Vec<HistoryEntry>,
    current: usize,
}

impl RouterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.history.get(self.current)
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.current_entry().map(|e| &e.location)
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current_location().map(|l| l.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Push a new entry, dropping any forward history.
    pub fn push(&mut self, location: Location) -> RouteChangeEvent {
        let from = self.current_path().map(str::to_string);
        let to = location.to_string();

        if self.history.is_empty() {
            self.current = 0;
        } else {
            self.history.truncate(self.current + 1);
            self.current += 1;
        }
        self.history.push(HistoryEntry::new(location));

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Forward,
        }
    }

    /// Overwrite the current entry. On an empty history this is a push.
    pub fn replace(&mut self, location: Location) -> RouteChangeEvent {
        if self.history.is_empty() {
            let mut event = self.push(location);
            event.direction = NavigationDirection::Replace;
            return event;
        }

        let from = self.current_path().map(str::to_string);
        let to = location.to_string();
        self.history[self.current] = HistoryEntry::new(location);

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Replace,
        }
    }

    /// Move the cursor one entry back.
    pub fn back(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_back() {
            return None;
        }
        let from = self.current_path().map(str::to_string);
        self.current -= 1;
        Some(RouteChangeEvent {
            from,
            to: self.history[self.current].location.to_string(),
            direction: NavigationDirection::Back,
        })
    }

    /// Move the cursor one entry forward.
    pub fn forward(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_forward() {
            return None;
        }
        let from = self.current_path().map(str::to_string);
        self.current += 1;
        Some(RouteChangeEvent {
            from,
            to: self.history[self.current].location.to_string(),
            direction: NavigationDirection::Forward,
        })
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.history.len()
    }

    /// Entry `back()` would move to.
    pub fn peek_back(&self) -> Option<&HistoryEntry> {
        self.current.checked_sub(1).and_then(|i| self.history.get(i))
    }

    /// Entry `forward()` would move to.
    pub fn peek_forward(&self) -> Option<&HistoryEntry> {
        self.history.get(self.current + 1)
    }

    /// Remember where the current page was scrolled to.
    pub fn save_scroll(&mut self, position: ScrollPosition) -> bool {
        match self.history.get_mut(self.current) {
            Some(entry) => {
                entry.scroll = Some(position);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(path: &str) -> Location {
        Location::parse(path)
    }

    #[test]
    fn test_navigation() {
        let mut state = RouterState::new();
        assert_eq!(state.current_path(), None);

        let event = state.push(loc("/dashboard"));
        assert_eq!(event.from, None);
        assert_eq!(state.current_path(), Some("/dashboard"));

        state.push(loc("/nfts"));
        state.push(loc("/history/trades"));
        assert_eq!(state.len(), 3);

        let event = state.back().unwrap();
        assert_eq!(event.from.as_deref(), Some("/history/trades"));
        assert_eq!(event.to, "/nfts");
        assert_eq!(event.direction, NavigationDirection::Back);

        state.forward();
        assert_eq!(state.current_path(), Some("/history/trades"));
        assert!(state.forward().is_none());
    }

    #[test]
    fn test_push_drops_forward_entries() {
        let mut state = RouterState::new();
        state.push(loc("/dashboard"));
        state.push(loc("/nfts"));
        state.back();
        state.push(loc("/statistics"));

        assert_eq!(state.len(), 2);
        assert!(!state.can_go_forward());
        assert_eq!(state.peek_back().map(|e| e.location.path.as_str()), Some("/dashboard"));
    }

    #[test]
    fn test_replace() {
        let mut state = RouterState::new();
        state.push(loc("/dashboard"));
        state.push(loc("/nfts"));
        let event = state.replace(loc("/statistics"));

        assert_eq!(event.direction, NavigationDirection::Replace);
        assert_eq!(state.current_path(), Some("/statistics"));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_scroll_saved_per_entry() {
        let mut state = RouterState::new();
        assert!(!state.save_scroll(ScrollPosition::new(0.0, 1.0)));

        state.push(loc("/nfts"));
        assert!(state.save_scroll(ScrollPosition::new(0.0, 300.0)));
        state.push(loc("/dashboard"));

        let previous = state.peek_back().unwrap();
        assert_eq!(previous.scroll, Some(ScrollPosition::new(0.0, 300.0)));
        assert_eq!(state.current_entry().unwrap().scroll, None);
    }
}
