//! Filter resolution from the request selector.
//!
//! The todo page is rendered as `/content/todo.html`,
//! `/content/todo.active.html` or `/content/todo.completed.html`; the
//! selector between the resource name and the extension picks the view.

use serde::Serialize;

pub const ACTIVE: &str = "active";
pub const COMPLETED: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Active,
    Completed,
}

impl Filter {
    /// Unrecognized or absent selectors fall back to `All`.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some(ACTIVE) => Filter::Active,
            Some(COMPLETED) => Filter::Completed,
            _ => Filter::All,
        }
    }

    pub fn selector(self) -> Option<&'static str> {
        match self {
            Filter::All => None,
            Filter::Active => Some(ACTIVE),
            Filter::Completed => Some(COMPLETED),
        }
    }
}

/// Per-request filter flags handed to the templates. Exactly one flag is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterContext {
    pub selector: Option<String>,
    pub is_all: bool,
    pub is_active: bool,
    pub is_completed: bool,
}

impl FilterContext {
    pub fn resolve(selector: Option<&str>) -> Self {
        Self::from(Filter::from_selector(selector))
    }

    pub fn from_request_path(path: &str) -> Self {
        Self::resolve(selector_from_request_path(path))
    }

    pub fn filter(&self) -> Filter {
        match (self.is_active, self.is_completed) {
            (true, _) => Filter::Active,
            (_, true) => Filter::Completed,
            _ => Filter::All,
        }
    }
}

impl From<Filter> for FilterContext {
    fn from(filter: Filter) -> Self {
        Self {
            selector: filter.selector().map(str::to_string),
            is_all: filter == Filter::All,
            is_active: filter == Filter::Active,
            is_completed: filter == Filter::Completed,
        }
    }
}

/// First selector of a request path, if any.
///
/// Only the last path segment is inspected: its first dot-separated part is
/// the resource name, its last part the extension, everything between is a
/// selector.
pub fn selector_from_request_path(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() < 3 {
        return None;
    }
    parts[1..parts.len() - 1]
        .iter()
        .copied()
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_selector_is_all() {
        let ctx = FilterContext::resolve(None);
        assert!(ctx.is_all);
        assert!(!ctx.is_active);
        assert!(!ctx.is_completed);
        assert_eq!(ctx.selector, None);
    }

    #[test]
    fn unknown_selector_is_all() {
        let ctx = FilterContext::resolve(Some("bogus"));
        assert!(ctx.is_all);
        assert_eq!(ctx.selector, None);
    }

    #[test]
    fn active_and_completed_selectors() {
        let active = FilterContext::resolve(Some("active"));
        assert!(active.is_active && !active.is_all && !active.is_completed);
        assert_eq!(active.selector.as_deref(), Some("active"));

        let completed = FilterContext::resolve(Some("completed"));
        assert!(completed.is_completed && !completed.is_all && !completed.is_active);
        assert_eq!(completed.filter(), Filter::Completed);
    }

    #[test]
    fn selector_from_request_path_picks_middle_segment() {
        assert_eq!(selector_from_request_path("/content/todo.active.html"), Some("active"));
        assert_eq!(
            selector_from_request_path("/content/todo.completed.html"),
            Some("completed")
        );
        assert_eq!(selector_from_request_path("/content/todo.html"), None);
        assert_eq!(selector_from_request_path("/content/todo"), None);
        assert_eq!(selector_from_request_path("/content.v2/todo.html"), None);
    }

    #[test]
    fn from_request_path_resolves_filter() {
        let ctx = FilterContext::from_request_path("/content/todo.completed.html");
        assert!(ctx.is_completed);
    }

    #[test]
    fn serializes_with_template_keys() {
        let json = serde_json::to_value(FilterContext::resolve(Some("active"))).unwrap();
        assert_eq!(json["selector"], "active");
        assert_eq!(json["isAll"], false);
        assert_eq!(json["isActive"], true);
        assert_eq!(json["isCompleted"], false);
    }
}
