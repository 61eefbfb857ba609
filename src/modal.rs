//! Project details modal.
//!
//! Clicking a project card opens an overlay showing the card's title,
//! description and technology tags. The host keeps at most one modal open:
//! opening another first closes the current one, so each overlay and its
//! style block are always removed together.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use crate::consts;
use crate::contract::Selectors;
use crate::page::{NodeId, Page};

/// Content shown for one project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectDetails {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
}

impl ProjectDetails {
    /// Technology tags joined for display: `"Rust, WebAssembly"`.
    #[must_use]
    pub fn tech_summary(&self) -> String {
        self.tech.join(", ")
    }
}

/// Read a card's heading, first paragraph and tech tags.
///
/// Missing pieces read as empty text; the contract reports them at boot.
#[must_use]
pub fn extract(page: &dyn Page, selectors: &Selectors, card: NodeId) -> ProjectDetails {
    let text_of = |node: Option<NodeId>| node.map(|n| page.text(n).trim().to_owned()).unwrap_or_default();
    ProjectDetails {
        title: text_of(page.query_within(card, &selectors.card_title)),
        description: text_of(page.query_within(card, &selectors.card_description)),
        tech: page
            .query_all_within(card, &selectors.card_tech)
            .into_iter()
            .map(|span| page.text(span).trim().to_owned())
            .collect(),
    }
}

/// Nodes making up one open modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalInstance {
    pub overlay: NodeId,
    pub panel: NodeId,
    pub close: NodeId,
    pub style: NodeId,
}

/// Result of a click on a project card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardClick {
    /// The click landed on an action control inside the card.
    Ignored,
    Opened(ModalInstance),
}

/// Single-instance modal host.
#[derive(Debug, Default)]
pub struct ModalHost {
    open: Option<ModalInstance>,
}

impl ModalHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<ModalInstance> {
        self.open
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Render `details`, replacing any modal already open.
    pub fn open(&mut self, page: &dyn Page, details: &ProjectDetails) -> ModalInstance {
        if self.close(page) {
            log::debug!("modal: replaced open modal");
        }
        let instance = build(page, details);
        log::debug!("modal: opened {:?}", details.title);
        self.open = Some(instance);
        instance
    }

    /// Remove the open modal and its style block. Returns `false` when
    /// nothing was open.
    pub fn close(&mut self, page: &dyn Page) -> bool {
        let Some(instance) = self.open.take() else {
            return false;
        };
        page.remove(instance.overlay);
        page.remove(instance.style);
        log::debug!("modal: closed");
        true
    }

    /// Open a modal for `card` unless `target` sits inside one of the card's
    /// action controls.
    pub fn on_card_click(&mut self, page: &dyn Page, selectors: &Selectors, card: NodeId, target: NodeId) -> CardClick {
        let on_action =
            page.closest(target, &selectors.card_action).is_some_and(|action| page.contains(card, action));
        if on_action {
            return CardClick::Ignored;
        }
        let details = extract(page, selectors, card);
        CardClick::Opened(self.open(page, &details))
    }

    pub fn on_close_click(&mut self, page: &dyn Page) -> bool {
        self.close(page)
    }

    /// Close only when the backdrop itself was clicked, not the panel.
    pub fn on_overlay_click(&mut self, page: &dyn Page, target: NodeId) -> bool {
        match self.open {
            Some(instance) if instance.overlay == target => self.close(page),
            _ => false,
        }
    }

    /// Route a click anywhere in the document. Returns whether it closed the
    /// modal.
    pub fn on_click(&mut self, page: &dyn Page, target: NodeId) -> bool {
        let Some(instance) = self.open else {
            return false;
        };
        if page.contains(instance.close, target) {
            return self.on_close_click(page);
        }
        self.on_overlay_click(page, target)
    }

    /// Escape closes the modal.
    pub fn on_key(&mut self, page: &dyn Page, key: &str) -> bool {
        key == "Escape" && self.close(page)
    }
}

fn element(page: &dyn Page, parent: NodeId, tag: &str, class: Option<&str>) -> NodeId {
    let node = page.create_element(tag);
    if let Some(class) = class {
        page.add_class(node, class);
    }
    page.append_child(parent, node);
    node
}

/// Build the overlay with text nodes only; card text is never parsed as
/// markup.
fn build(page: &dyn Page, details: &ProjectDetails) -> ModalInstance {
    let overlay = page.create_element("div");
    page.add_class(overlay, consts::MODAL_OVERLAY_CLASS);

    let panel = element(page, overlay, "div", Some(consts::MODAL_PANEL_CLASS));
    page.set_attribute(panel, "role", "dialog");
    page.set_attribute(panel, "aria-modal", "true");

    let header = element(page, panel, "div", Some(consts::MODAL_HEADER_CLASS));
    let title = element(page, header, "h2", None);
    page.set_text(title, &details.title);
    let close = element(page, header, "button", Some(consts::MODAL_CLOSE_CLASS));
    page.set_attribute(close, "type", "button");
    page.set_attribute(close, "aria-label", "Close");
    page.set_text(close, "\u{d7}");

    let content = element(page, panel, "div", Some(consts::MODAL_CONTENT_CLASS));
    let description = element(page, content, "p", None);
    page.set_text(description, &details.description);
    let tech = element(page, content, "div", Some(consts::MODAL_TECH_CLASS));
    let label = element(page, tech, "strong", None);
    page.set_text(label, "Technologies:");
    page.append_text(tech, &format!(" {}", details.tech_summary()));

    let style = page.create_element("style");
    page.set_attribute(style, consts::MODAL_STYLE_ATTR, "");
    page.set_text(style, consts::MODAL_CSS);

    page.append_child(page.body(), overlay);
    page.append_child(page.head(), style);

    ModalInstance { overlay, panel, close, style }
}
