//! Route resolution into a match stack.
//!
//! A navigation target is resolved once into the full chain of matched
//! routes, outermost first. Each nesting level of the host UI renders the
//! entry at its depth.
//!
//! For `/defi/deposits/protocols` the stack is:
//!
//! ```text
//! [0] Route("/defi")                     Page::Defi
//! [1] Route("/defi/deposits")            Page::DefiDeposits
//! [2] Route("/defi/deposits/protocols")  Page::DefiDepositsProtocols
//! ```
//!
//! Visiting a non-navigable route yields [`Resolution::Redirect`] instead of a
//! stack: plain redirect records, parents with a
//! [`default_child`](crate::Route::default_child), and index children whose
//! target is a redirect.

use crate::location::Location;
use crate::pages::PageProps;
use crate::params::RouteParams;
use crate::path::{is_rest_segment, join_paths, param_name, relative_segments, split_path};
use crate::route::{PropsMode, Route, RouteMeta, RouteTarget};
use crate::{debug_log, warn_log};
use percent_encoding::percent_decode_str;
use std::sync::Arc;

// ============================================================================
// Match Stack
// ============================================================================

/// One matched level of the route hierarchy.
#[derive(Debug, Clone)]
pub struct MatchEntry {
    pub route: Arc<Route>,
    /// Full pattern of the route, e.g. `/accounts-balances/exchange-balances/:exchange`.
    pub pattern: String,
    /// Params accumulated from all levels down to this one.
    pub params: RouteParams,
    /// 0 for the top-level route.
    pub depth: usize,
}

/// The matched route chain for one path.
#[derive(Debug, Clone, Default)]
pub struct MatchStack {
    entries: Vec<MatchEntry>,
}

impl MatchStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_depth(&self, depth: usize) -> Option<&MatchEntry> {
        self.entries.get(depth)
    }

    pub fn root(&self) -> Option<&MatchEntry> {
        self.entries.first()
    }

    /// Deepest entry; the page the user is looking at.
    pub fn leaf(&self) -> Option<&MatchEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    /// Params at the deepest level.
    pub fn params(&self) -> RouteParams {
        self.leaf().map(|e| e.params.clone()).unwrap_or_default()
    }

    /// Full patterns of every level, handy in logs and assertions.
    pub fn patterns(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.pattern.as_str()).collect()
    }
}

/// Outcome of resolving one path.
#[derive(Debug, Clone)]
pub enum Resolution {
    Matched(MatchStack),
    /// The path names a non-navigable route.
    Redirect { from: String, to: String },
    NotFound,
}

impl Resolution {
    pub fn is_matched(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Resolution::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }
}

// ============================================================================
// Resolution Algorithm
// ============================================================================

/// Maximum nesting depth to prevent runaway recursion.
const MAX_DEPTH: usize = 16;

enum Step {
    Matched,
    Redirect(String),
}

/// Resolve `path` against the route tree.
///
/// Siblings are tried in declaration order with backtracking: a parent whose
/// children cannot consume the rest of the path is abandoned and the next
/// sibling is tried.
pub fn resolve(routes: &[Arc<Route>], path: &str) -> Resolution {
    let segments = split_path(path);
    let mut stack = MatchStack::new();

    let resolution = match resolve_level(routes, "/", &segments, 0, &RouteParams::new(), &mut stack)
    {
        Some(Step::Matched) => Resolution::Matched(stack),
        Some(Step::Redirect(to)) => Resolution::Redirect {
            from: path.to_string(),
            to,
        },
        None => Resolution::NotFound,
    };

    match &resolution {
        Resolution::Matched(stack) => {
            debug_log!("Resolved '{}' -> [{}]", path, stack.patterns().join(" -> "));
        }
        Resolution::Redirect { to, .. } => {
            debug_log!("Resolved '{}' -> redirect '{}'", path, to);
        }
        Resolution::NotFound => {
            debug_log!("Resolved '{}' -> no match", path);
        }
    }

    resolution
}

fn resolve_level(
    routes: &[Arc<Route>],
    parent_pattern: &str,
    remaining: &[&str],
    depth: usize,
    inherited: &RouteParams,
    stack: &mut MatchStack,
) -> Option<Step> {
    if depth >= MAX_DEPTH {
        warn_log!(
            "Maximum route nesting depth ({}) exceeded under '{}'",
            MAX_DEPTH,
            parent_pattern
        );
        return None;
    }

    for route in routes {
        let pattern = join_paths(parent_pattern, &route.config.path).into_owned();
        let Some(segments) = relative_segments(parent_pattern, &pattern) else {
            continue;
        };
        let Some((params, consumed)) = match_segments(&segments, remaining, inherited) else {
            continue;
        };
        let after = &remaining[consumed..];

        // An index route without children only matches an exhausted path.
        if segments.is_empty() && !after.is_empty() && route.children.is_empty() {
            continue;
        }

        if let RouteTarget::Redirect(to) = &route.target {
            if after.is_empty() {
                return Some(Step::Redirect(to.clone()));
            }
            continue;
        }

        stack.entries.push(MatchEntry {
            route: Arc::clone(route),
            pattern: pattern.clone(),
            params: params.clone(),
            depth,
        });

        if after.is_empty() {
            if route.children.is_empty() {
                return Some(Step::Matched);
            }
            if let Some(to) = &route.default_child {
                return Some(Step::Redirect(to.clone()));
            }
            return Some(
                index_route(&route.children, &pattern, depth + 1, &params, stack)
                    .unwrap_or(Step::Matched),
            );
        }

        if !route.children.is_empty() {
            if let Some(step) =
                resolve_level(&route.children, &pattern, after, depth + 1, &params, stack)
            {
                return Some(step);
            }
        }

        stack.entries.pop();
    }

    None
}

/// Match a route's own segments against the head of `remaining`.
///
/// Returns the accumulated params and how many path segments were consumed.
fn match_segments(
    segments: &[&str],
    remaining: &[&str],
    inherited: &RouteParams,
) -> Option<(RouteParams, usize)> {
    let mut params = inherited.clone();

    for (i, segment) in segments.iter().enumerate() {
        if is_rest_segment(segment) {
            let rest = &remaining[i.min(remaining.len())..];
            if let Some(name) = param_name(segment) {
                if !rest.is_empty() {
                    params.insert(name, decode(&rest.join("/")));
                }
            }
            return Some((params, remaining.len()));
        }

        let value = remaining.get(i)?;
        match param_name(segment) {
            Some(name) => params.insert(name, decode(value)),
            None if segment == value => {}
            None => return None,
        }
    }

    Some((params, segments.len()))
}

/// Push the index child of a parent whose path was fully consumed.
fn index_route(
    children: &[Arc<Route>],
    parent_pattern: &str,
    depth: usize,
    params: &RouteParams,
    stack: &mut MatchStack,
) -> Option<Step> {
    let child = children.iter().find(|c| {
        let pattern = join_paths(parent_pattern, &c.config.path);
        relative_segments(parent_pattern, &pattern).is_some_and(|s| s.is_empty())
    })?;

    if let RouteTarget::Redirect(to) = &child.target {
        return Some(Step::Redirect(to.clone()));
    }

    stack.entries.push(MatchEntry {
        route: Arc::clone(child),
        pattern: parent_pattern.to_string(),
        params: params.clone(),
        depth,
    });

    if child.children.is_empty() {
        return Some(Step::Matched);
    }
    if let Some(to) = &child.default_child {
        return Some(Step::Redirect(to.clone()));
    }
    Some(
        index_route(&child.children, parent_pattern, depth + 1, params, stack)
            .unwrap_or(Step::Matched),
    )
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

// ============================================================================
// Resolved route
// ============================================================================

/// A location together with the stack it resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub location: Location,
    pub stack: MatchStack,
}

impl ResolvedRoute {
    /// Metadata merged from the root down, deeper levels winning.
    pub fn meta(&self) -> RouteMeta {
        self.stack
            .entries()
            .iter()
            .fold(RouteMeta::default(), |acc, e| acc.inherit(&e.route.config.meta))
    }

    pub fn can_navigate_back(&self) -> bool {
        self.meta().can_navigate_back.unwrap_or(false)
    }

    /// Name of the deepest named route in the stack.
    pub fn name(&self) -> Option<&str> {
        self.stack
            .entries()
            .iter()
            .rev()
            .find_map(|e| e.route.config.name.as_deref())
    }

    pub fn params(&self) -> RouteParams {
        self.stack.params()
    }

    /// Props for the page at `depth`, derived per its [`PropsMode`].
    pub fn props_at(&self, depth: usize) -> PageProps {
        let mut props = PageProps::new();
        let Some(entry) = self.stack.at_depth(depth) else {
            return props;
        };

        match &entry.route.config.props {
            PropsMode::None => {}
            PropsMode::Params => {
                for (key, value) in entry.params.iter() {
                    props.insert(key.to_string(), Some(value.to_string()));
                }
            }
            PropsMode::Param { prop, param } => {
                props.insert(prop.clone(), entry.params.get(param).map(str::to_string));
            }
            PropsMode::Query { prop, key } => {
                props.insert(prop.clone(), self.location.query.get(key).map(str::to_string));
            }
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_segments_rest() {
        let params = RouteParams::new();
        let (p, consumed) =
            match_segments(&["staking", ":location*"], &["staking"], &params).unwrap();
        assert_eq!(consumed, 1);
        assert!(p.get("location").is_none());

        let (p, consumed) =
            match_segments(&["staking", ":location*"], &["staking", "eth2"], &params).unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(p.get("location"), Some("eth2"));
    }

    #[test]
    fn test_match_segments_decodes_params() {
        let (p, _) = match_segments(
            &["assets", ":identifier"],
            &["assets", "eip155%3A1%2Ferc20"],
            &RouteParams::new(),
        )
        .unwrap();
        assert_eq!(p.get("identifier"), Some("eip155:1/erc20"));
    }

    #[test]
    fn test_match_segments_literal_mismatch() {
        assert!(match_segments(&["nfts"], &["history"], &RouteParams::new()).is_none());
        assert!(match_segments(&["nfts", "x"], &["nfts"], &RouteParams::new()).is_none());
    }
}
