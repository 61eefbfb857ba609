//! Shared headless fixtures for unit tests.

use crate::page::{MemoryPage, NodeId, Page};

/// A portfolio page shaped like the production markup.
pub struct Portfolio {
    pub page: MemoryPage,
    pub toggle: NodeId,
    pub links: NodeId,
    pub nav_items: Vec<NodeId>,
    pub about: NodeId,
    pub anchor_about: NodeId,
    pub anchor_top: NodeId,
    pub anchor_missing: NodeId,
    pub cards: Vec<NodeId>,
    pub card_button: NodeId,
    pub card_button_icon: NodeId,
    pub form: NodeId,
    pub name: NodeId,
    pub email: NodeId,
    pub phone: NodeId,
    pub message: NodeId,
    pub submit: NodeId,
}

pub const SUBMIT_LABEL_HTML: &str = "<i class=\"fas fa-paper-plane\"></i> Send Message";

#[allow(clippy::similar_names)]
pub fn portfolio() -> Portfolio {
    let page = MemoryPage::new();
    let body = page.body();

    let header = page.append_element(body, "header", &[]);
    let nav = page.append_element(header, "nav", &[]);
    let toggle = page.append_element(nav, "button", &[("class", "menu-toggle")]);
    let links = page.append_element(nav, "ul", &[("class", "nav-links")]);
    let nav_items = ["index.html", "projects.html", "contact.html"]
        .into_iter()
        .map(|href| {
            let li = page.append_element(links, "li", &[]);
            let a = page.append_element(li, "a", &[("href", href)]);
            page.set_text(a, href);
            a
        })
        .collect();

    let anchor_about = page.append_element(body, "a", &[("href", "#about"), ("class", "cta")]);
    let anchor_top = page.append_element(body, "a", &[("href", "#")]);
    let anchor_missing = page.append_element(body, "a", &[("href", "#missing")]);
    let about = page.append_element(body, "section", &[("id", "about")]);

    let grid = page.append_element(body, "div", &[("class", "projects-grid")]);
    let weather = page.append_element(grid, "div", &[("class", "project-card")]);
    let h3 = page.append_element(weather, "h3", &[]);
    page.set_text(h3, "Weather App");
    let p = page.append_element(weather, "p", &[]);
    page.set_text(p, "Forecasts from open data.");
    let tech = page.append_element(weather, "div", &[("class", "project-tech")]);
    for tag in ["Rust", "WebAssembly", "CSS"] {
        let span = page.append_element(tech, "span", &[]);
        page.set_text(span, tag);
    }
    let card_button = page.append_element(weather, "a", &[("class", "btn btn-small"), ("href", "https://example.com")]);
    let card_button_icon = page.append_element(card_button, "i", &[("class", "fab fa-github")]);

    let folio = page.append_element(grid, "div", &[("class", "project-card")]);
    let h3 = page.append_element(folio, "h3", &[]);
    page.set_text(h3, "Portfolio");
    let p = page.append_element(folio, "p", &[]);
    page.set_text(p, "This site.");

    let form = page.append_element(body, "form", &[("id", "contactForm")]);
    let name = page.append_element(form, "input", &[("id", "name"), ("type", "text")]);
    let email = page.append_element(form, "input", &[("id", "email"), ("type", "email")]);
    let phone = page.append_element(form, "input", &[("id", "phone"), ("type", "tel")]);
    let message = page.append_element(form, "textarea", &[("id", "message")]);
    let submit = page.append_element(form, "button", &[("type", "submit"), ("class", "btn")]);
    page.set_inner_html(submit, SUBMIT_LABEL_HTML);

    Portfolio {
        page,
        toggle,
        links,
        nav_items,
        about,
        anchor_about,
        anchor_top,
        anchor_missing,
        cards: vec![weather, folio],
        card_button,
        card_button_icon,
        form,
        name,
        email,
        phone,
        message,
        submit,
    }
}

impl Portfolio {
    pub fn fill(&self, name: &str, email: &str, phone: &str, message: &str) {
        self.page.set_value(self.name, name);
        self.page.set_value(self.email, email);
        self.page.set_value(self.phone, phone);
        self.page.set_value(self.message, message);
    }
}
