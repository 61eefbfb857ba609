//! Decorative animated background.
//!
//! Inserts static nodes only; all motion lives in the stylesheet.

#[cfg(test)]
#[path = "background_test.rs"]
mod background_test;

use crate::consts;
use crate::page::{NodeId, Page};

/// Build the background container and insert it as the first child of
/// `<body>`.
///
/// Not idempotent: every call inserts another container.
pub fn decorate(page: &dyn Page, particle_count: usize) -> NodeId {
    let container = page.create_element("div");
    page.add_class(container, consts::BG_CONTAINER_CLASS);

    for _ in 0..particle_count {
        let particle = page.create_element("div");
        page.add_class(particle, consts::BG_PARTICLE_CLASS);
        page.append_child(container, particle);
    }

    let grid = page.create_element("div");
    page.add_class(grid, consts::BG_GRID_CLASS);
    page.append_child(container, grid);

    page.prepend_child(page.body(), container);
    container
}
