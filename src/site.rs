//! Boot orchestration and event entry points.
//!
//! DESIGN
//! ======
//! `Site` owns the page handle and everything resolved at boot. Event
//! adapters (the browser bindings, or tests) call its `on_*` methods with
//! node handles; none of them touch the global document. All methods take
//! `&self` so one `Site` can be shared by every listener.

#[cfg(test)]
#[path = "site_test.rs"]
mod site_test;

use std::cell::RefCell;

use crate::ErrorCode;
use crate::background;
use crate::config::SiteConfig;
use crate::contact::{self, FormOutcome, Submitter};
use crate::contract::{self, ContractError, PageElements, Selectors};
use crate::modal::{CardClick, ModalHost};
use crate::nav::{self, NavState};
use crate::page::{NodeId, Page};
use crate::scroll::{self, ScrollOutcome};

/// A booted page with its behaviors attached.
pub struct Site<P: Page> {
    page: P,
    config: SiteConfig,
    selectors: Selectors,
    elements: PageElements,
    background: NodeId,
    modal: RefCell<ModalHost>,
}

impl<P: Page> Site<P> {
    /// Validate the page contract, then apply boot-time decoration.
    ///
    /// Runs once per document. Order: contract, background, active link.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the contract fails in strict mode or a
    /// built-in selector does not parse.
    pub fn boot(page: P, config: SiteConfig) -> Result<Self, ContractError> {
        let selectors = Selectors::compile()?;
        let elements = contract::validate(&page, &selectors, config.contract_mode).inspect_err(|e| {
            log::error!("site: boot aborted ({}): {e}", e.error_code());
        })?;

        let background = background::decorate(&page, config.particle_count);

        let path = page.location_path();
        let current = nav::current_page(&path, &config.home_page);
        let active = nav::highlight_active(&page, &elements.nav_items, current);

        log::info!(
            "site: booted page={current} features={} cards={} active_links={}",
            elements.feature_count(),
            elements.cards.len(),
            active.len()
        );

        Ok(Self { page, config, selectors, elements, background, modal: RefCell::new(ModalHost::new()) })
    }

    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn elements(&self) -> &PageElements {
        &self.elements
    }

    /// The decorative container inserted at boot.
    #[must_use]
    pub fn background(&self) -> NodeId {
        self.background
    }

    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.modal.borrow().is_open()
    }

    /// Menu toggle clicked. `None` when the page has no navigation.
    pub fn on_menu_toggle(&self) -> Option<NavState> {
        let nav = self.elements.nav?;
        let state = nav::toggle(&self.page, &nav);
        log::debug!("nav: {state:?}");
        Some(state)
    }

    /// Fragment anchor clicked.
    pub fn on_anchor_click(&self, href: &str) -> ScrollOutcome {
        scroll::route_anchor_click(&self.page, href)
    }

    /// Project card clicked with `target` as the innermost clicked node.
    pub fn on_card_click(&self, card: NodeId, target: NodeId) -> CardClick {
        self.modal.borrow_mut().on_card_click(&self.page, &self.selectors, card, target)
    }

    pub fn on_modal_close(&self) -> bool {
        self.modal.borrow_mut().on_close_click(&self.page)
    }

    pub fn on_overlay_click(&self, target: NodeId) -> bool {
        self.modal.borrow_mut().on_overlay_click(&self.page, target)
    }

    /// Any click in the document; closes the modal from its close control
    /// or backdrop.
    pub fn on_document_click(&self, target: NodeId) -> bool {
        self.modal.borrow_mut().on_click(&self.page, target)
    }

    pub fn on_key(&self, key: &str) -> bool {
        self.modal.borrow_mut().on_key(&self.page, key)
    }

    /// Contact form submitted. `None` when the page has no contact form.
    pub async fn submit_contact(&self, submitter: &dyn Submitter) -> Option<FormOutcome> {
        let form = self.elements.form?;
        Some(contact::submit(&self.page, &form, submitter).await)
    }
}
