//! Browser entry point: install logging, boot the site, wire listeners.
//!
//! Listeners live as long as the document, so their closures are leaked
//! with `forget`. Modal close clicks are delegated from the document because
//! the modal nodes come and go.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use crate::ErrorCode;
use crate::config::SiteConfig;
use crate::contact::SimulatedSubmitter;
use crate::page::{DomPage, NodeId, Page};
use crate::site::Site;

type BrowserSite = Rc<Site<DomPage>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        listen(&document, "DOMContentLoaded", |_| boot());
    } else {
        boot();
    }
}

fn init_logging(config: &SiteConfig) {
    let level = config.level_filter().unwrap_or(log::Level::Info);
    if console_log::init_with_level(level).is_err() {
        log::debug!("bind: logger already installed");
    }
}

fn boot() {
    let Some(page) = DomPage::from_window() else {
        return;
    };
    let config = match SiteConfig::from_page(&page) {
        Ok(config) => {
            init_logging(&config);
            config
        }
        Err(err) => {
            let config = SiteConfig::default();
            init_logging(&config);
            log::warn!("config: {} ({}); using defaults", err, err.error_code());
            config
        }
    };

    // Boot logs its own failure.
    let Ok(site) = Site::boot(page, config) else {
        return;
    };
    wire(&Rc::new(site));
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        log::warn!("bind: {event} listener failed: {err:?}");
    }
    cb.forget();
}

/// Handle for the element an event was dispatched to.
fn event_target(site: &BrowserSite, event: &Event) -> Option<NodeId> {
    let el = event.target()?.dyn_ref::<Element>()?.clone();
    Some(site.page().intern(el))
}

fn listen_on(site: &BrowserSite, node: NodeId, event: &str, handler: impl FnMut(Event) + 'static) {
    match site.page().element(node) {
        Some(el) => listen(&el, event, handler),
        None => log::warn!("bind: no element for {node:?}"),
    }
}

fn wire(site: &BrowserSite) {
    let elements = site.elements().clone();

    if let Some(nav) = elements.nav {
        let handler_site = Rc::clone(site);
        listen_on(site, nav.toggle, "click", move |_| {
            handler_site.on_menu_toggle();
        });
    }

    for anchor in elements.anchors {
        let handler_site = Rc::clone(site);
        listen_on(site, anchor, "click", move |event| {
            let href = handler_site.page().attribute(anchor, "href").unwrap_or_default();
            if handler_site.on_anchor_click(&href).prevents_default() {
                event.prevent_default();
            }
        });
    }

    for card in elements.cards {
        let handler_site = Rc::clone(site);
        listen_on(site, card, "click", move |event| {
            if let Some(target) = event_target(&handler_site, &event) {
                handler_site.on_card_click(card, target);
            }
        });
    }

    if let Some(form) = elements.form {
        let handler_site = Rc::clone(site);
        listen_on(site, form.form, "submit", move |event| {
            event.prevent_default();
            let site = Rc::clone(&handler_site);
            wasm_bindgen_futures::spawn_local(async move {
                let submitter = SimulatedSubmitter::new(site.config().submit_delay());
                if let Some(outcome) = site.submit_contact(&submitter).await {
                    log::debug!("contact: {outcome:?}");
                }
            });
        });
    }

    let document = site.page().document().clone();
    {
        let site = Rc::clone(site);
        listen(&document, "click", move |event| {
            // Only modal clicks matter here; skip interning otherwise.
            if !site.modal_open() {
                return;
            }
            if let Some(target) = event_target(&site, &event) {
                site.on_document_click(target);
            }
        });
    }
    {
        let site = Rc::clone(site);
        listen(&document, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                site.on_key(&key);
            }
        });
    }

    log::debug!("bind: listeners attached");
}
