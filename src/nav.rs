//! Navigation: the mobile menu toggle and the current-page highlight.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::consts;
use crate::contract::NavElements;
use crate::page::{NodeId, Page};

/// Visibility of the collapsible navigation panel.
///
/// Stored in the DOM as the `active` class on the links container, so it
/// resets on every page load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Collapsed,
    Expanded,
}

/// Current state as rendered.
#[must_use]
pub fn state(page: &dyn Page, nav: &NavElements) -> NavState {
    if page.has_class(nav.links, consts::ACTIVE_CLASS) { NavState::Expanded } else { NavState::Collapsed }
}

/// Flip the panel and return the state it is now in.
pub fn toggle(page: &dyn Page, nav: &NavElements) -> NavState {
    if page.toggle_class(nav.links, consts::ACTIVE_CLASS) { NavState::Expanded } else { NavState::Collapsed }
}

/// Page name from a URL path: its last `/` segment, or `home` when empty.
///
/// `"/work/projects.html"` → `"projects.html"`, `"/"` → `home`.
#[must_use]
pub fn current_page<'a>(path: &'a str, home: &'a str) -> &'a str {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => home,
    }
}

/// Mark links whose href equals `current` as active and clear the rest.
///
/// Returns the links that ended up highlighted.
pub fn highlight_active(page: &dyn Page, links: &[NodeId], current: &str) -> Vec<NodeId> {
    let mut active = Vec::new();
    for &link in links {
        if page.attribute(link, "href").as_deref() == Some(current) {
            page.add_class(link, consts::ACTIVE_CLASS);
            active.push(link);
        } else {
            page.remove_class(link, consts::ACTIVE_CLASS);
        }
    }
    active
}
