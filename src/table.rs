//! Validated route tree.
//!
//! [`RouteTable::new`] checks the structural rules once, up front:
//!
//! - paths are unique among siblings
//! - names are unique across the whole table
//! - an absolute child path lies under its parent's path
//! - every redirect and default child points at something that resolves
//!
//! After that, resolution and URL building cannot hit a malformed tree.

use crate::debug_log;
use crate::error::{NavigationError, RouteTableError};
use crate::pages::Page;
use crate::params::RouteParams;
use crate::path::{is_rest_segment, join_paths, param_name, relative_segments, split_path};
use crate::resolve::{resolve, Resolution};
use crate::route::{Route, RouteTarget};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Characters escaped inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One row of [`RouteTable::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// Full pattern.
    pub pattern: String,
    pub name: Option<String>,
    pub page: Option<Page>,
    pub redirect: Option<String>,
    pub depth: usize,
}

/// The application's route tree, validated.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
    /// Route name -> full pattern.
    names: HashMap<String, String>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        let routes: Vec<Arc<Route>> = routes.into_iter().map(Arc::new).collect();
        let mut names = HashMap::new();
        let mut targets = Vec::new();

        validate_level(&routes, "/", &mut names, &mut targets)?;

        for (from, to) in targets {
            if matches!(resolve(&routes, &to), Resolution::NotFound) {
                return Err(RouteTableError::UnresolvedRedirect { from, to });
            }
        }

        debug_log!(
            "Route table built: {} top-level routes, {} named",
            routes.len(),
            names.len()
        );
        Ok(Self { routes, names })
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Resolve `path` against the table.
    pub fn resolve(&self, path: &str) -> Resolution {
        resolve(&self.routes, path)
    }

    /// Full pattern of a named route.
    pub fn pattern_for(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    /// Build the path of the route named `name`.
    ///
    /// Param values are percent-encoded. A trailing `:name*` param is
    /// optional; it may hold several `/`-separated segments.
    ///
    /// ```
    /// use folio_navigator::{Page, Route, RouteParams, RouteTable};
    ///
    /// let table = RouteTable::new(vec![
    ///     Route::page("/assets/:identifier", Page::Asset).name("asset"),
    /// ])
    /// .unwrap();
    ///
    /// let params: RouteParams = [("identifier", "eip155:1/erc20")].into_iter().collect();
    /// assert_eq!(table.url_for("asset", &params).unwrap(), "/assets/eip155:1%2Ferc20");
    /// ```
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Result<String, NavigationError> {
        let pattern = self
            .pattern_for(name)
            .ok_or_else(|| NavigationError::UnknownRouteName {
                name: name.to_string(),
            })?;

        let mut segments = Vec::new();
        for segment in split_path(pattern) {
            let Some(param) = param_name(segment) else {
                segments.push(segment.to_string());
                continue;
            };

            match params.get(param) {
                Some(value) if is_rest_segment(segment) => segments.extend(
                    split_path(value)
                        .into_iter()
                        .map(|part| utf8_percent_encode(part, PATH_SEGMENT).to_string()),
                ),
                Some(value) => segments.push(utf8_percent_encode(value, PATH_SEGMENT).to_string()),
                None if is_rest_segment(segment) => {}
                None => {
                    return Err(NavigationError::MissingParam {
                        name: name.to_string(),
                        param: param.to_string(),
                    })
                }
            }
        }

        Ok(format!("/{}", segments.join("/")))
    }

    /// Every route, depth first in declaration order.
    pub fn entries(&self) -> Vec<RouteSummary> {
        let mut out = Vec::new();
        collect_entries(&self.routes, "/", 0, &mut out);
        out
    }
}

fn validate_level(
    routes: &[Arc<Route>],
    parent: &str,
    names: &mut HashMap<String, String>,
    targets: &mut Vec<(String, String)>,
) -> Result<(), RouteTableError> {
    let mut seen = HashSet::new();

    for route in routes {
        let pattern = join_paths(parent, &route.config.path).into_owned();

        if relative_segments(parent, &pattern).is_none() {
            return Err(RouteTableError::InvalidChildPath {
                parent: parent.to_string(),
                path: route.config.path.clone(),
            });
        }
        if !seen.insert(pattern.clone()) {
            return Err(RouteTableError::DuplicatePath {
                parent: parent.to_string(),
                path: route.config.path.clone(),
            });
        }
        if let Some(name) = &route.config.name {
            if names.insert(name.clone(), pattern.clone()).is_some() {
                return Err(RouteTableError::DuplicateName { name: name.clone() });
            }
        }

        if let RouteTarget::Redirect(to) = &route.target {
            targets.push((pattern.clone(), to.clone()));
        }
        if let Some(to) = &route.default_child {
            targets.push((pattern.clone(), to.clone()));
        }

        validate_level(&route.children, &pattern, names, targets)?;
    }

    Ok(())
}

fn collect_entries(routes: &[Arc<Route>], parent: &str, depth: usize, out: &mut Vec<RouteSummary>) {
    for route in routes {
        let pattern = join_paths(parent, &route.config.path).into_owned();
        out.push(RouteSummary {
            pattern: pattern.clone(),
            name: route.config.name.clone(),
            page: route.page_id(),
            redirect: match &route.target {
                RouteTarget::Redirect(to) => Some(to.clone()),
                RouteTarget::Page(_) => route.default_child.clone(),
            },
            depth,
        });
        collect_entries(&route.children, &pattern, depth + 1, out);
    }
}
