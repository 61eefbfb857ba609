//! Same-page anchor routing with smooth scrolling.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use crate::page::{NodeId, Page};

/// What a click on an `a[href^="#"]` resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Bare `#` (or not a fragment at all): the browser handles it.
    PassThrough,
    /// Default prevented and a smooth scroll requested to the target.
    Scrolled(NodeId),
    /// Default prevented but no element carries the fragment's id.
    Swallowed,
}

impl ScrollOutcome {
    #[must_use]
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

/// Fragment identifier of an in-page href, without the leading `#`.
///
/// `None` for `#` alone and for hrefs that are not fragments.
#[must_use]
pub fn fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|f| !f.is_empty())
}

/// Route a fragment-anchor click.
pub fn route_anchor_click(page: &dyn Page, href: &str) -> ScrollOutcome {
    let Some(id) = fragment(href) else {
        return ScrollOutcome::PassThrough;
    };
    match page.by_id(id) {
        Some(target) => {
            page.scroll_into_view(target);
            ScrollOutcome::Scrolled(target)
        }
        None => {
            log::debug!("scroll: no element with id {id:?}; click swallowed");
            ScrollOutcome::Swallowed
        }
    }
}
