//! Browser [`Page`] adapter over `web_sys::Document`.
//!
//! Elements are interned into an arena so the rest of the crate can keep
//! passing plain [`NodeId`]s. Removing or replacing content releases the
//! interned elements inside it, so detached nodes are left to the garbage
//! collector and the arena stays at the size of what is currently in use.

use std::cell::RefCell;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::selector::Selector;
use super::{NodeId, Page};

/// Log a failed DOM call instead of surfacing it.
fn check<T>(op: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("dom: {op} failed: {err:?}");
            None
        }
    }
}

struct Slot {
    generation: u32,
    element: Option<Element>,
}

#[derive(Default)]
struct Arena {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Arena {
    fn get(&self, node: NodeId) -> Option<&Element> {
        let slot = self.slots.get(node.slot)?;
        if slot.generation == node.generation { slot.element.as_ref() } else { None }
    }

    fn insert(&mut self, el: Element) -> NodeId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx];
            slot.element = Some(el);
            return NodeId { slot: idx, generation: slot.generation };
        }
        self.slots.push(Slot { generation: 0, element: Some(el) });
        NodeId { slot: self.slots.len() - 1, generation: 0 }
    }

    fn release(&mut self, idx: usize) {
        let slot = &mut self.slots[idx];
        if slot.element.take().is_some() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(idx);
        }
    }
}

const BODY: NodeId = NodeId { slot: 0, generation: 0 };
const HEAD: NodeId = NodeId { slot: 1, generation: 0 };

pub struct DomPage {
    document: Document,
    arena: RefCell<Arena>,
}

impl DomPage {
    /// Wrap the window's document.
    ///
    /// Returns `None` outside a browser or before `<body>` exists.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Self::new(document)
    }

    #[must_use]
    pub fn new(document: Document) -> Option<Self> {
        let body: Element = document.body()?.into();
        let head: Element = document.head()?.into();
        let mut arena = Arena::default();
        arena.insert(body);
        arena.insert(head);
        Some(Self { document, arena: RefCell::new(arena) })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Handle for `el`, reusing the existing slot when already interned.
    pub fn intern(&self, el: Element) -> NodeId {
        let mut arena = self.arena.borrow_mut();
        let known = arena.slots.iter().position(|slot| slot.element.as_ref() == Some(&el));
        match known {
            Some(idx) => NodeId { slot: idx, generation: arena.slots[idx].generation },
            None => arena.insert(el),
        }
    }

    /// The element behind `node`, if the handle is live on this page.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.arena.borrow().get(node).cloned()
    }

    /// Release every interned element inside `root`, and `root` itself when
    /// `inclusive`. Body and head stay interned.
    fn release_within(&self, root: &Element, inclusive: bool) {
        let mut arena = self.arena.borrow_mut();
        let mut doomed = Vec::new();
        for (idx, slot) in arena.slots.iter().enumerate().skip(2) {
            let Some(el) = slot.element.as_ref() else {
                continue;
            };
            let node: &web_sys::Node = el;
            if root.contains(Some(node)) && (inclusive || el != root) {
                doomed.push(idx);
            }
        }
        for idx in doomed {
            arena.release(idx);
        }
    }

    fn collect(&self, list: Result<web_sys::NodeList, JsValue>, op: &str) -> Vec<NodeId> {
        let Some(list) = check(op, list) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .map(|el| self.intern(el))
            .collect()
    }
}

impl Page for DomPage {
    fn body(&self) -> NodeId {
        BODY
    }

    fn head(&self) -> NodeId {
        HEAD
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        self.document.get_element_by_id(id).map(|el| self.intern(el))
    }

    fn query(&self, selector: &Selector) -> Option<NodeId> {
        check("querySelector", self.document.query_selector(&selector.to_css()))
            .flatten()
            .map(|el| self.intern(el))
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.collect(self.document.query_selector_all(&selector.to_css()), "querySelectorAll")
    }

    fn query_within(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        let root = self.element(root)?;
        check("querySelector", root.query_selector(&selector.to_css())).flatten().map(|el| self.intern(el))
    }

    fn query_all_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        let Some(root) = self.element(root) else {
            return Vec::new();
        };
        self.collect(root.query_selector_all(&selector.to_css()), "querySelectorAll")
    }

    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let el = self.element(node)?;
        check("closest", el.closest(&selector.to_css())).flatten().map(|el| self.intern(el))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent_element().map(|el| self.intern(el))
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Some(a), Some(n)) => a.contains(Some(n.as_ref())),
            _ => false,
        }
    }

    fn create_element(&self, tag: &str) -> NodeId {
        match self.document.create_element(tag) {
            Ok(el) => self.intern(el),
            Err(err) => {
                // Only invalid tag names fail; callers pass literals.
                log::error!("dom: createElement({tag}) failed: {err:?}");
                match self.document.create_element("div") {
                    Ok(el) => self.intern(el),
                    Err(_) => BODY,
                }
            }
        }
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        if let (Some(p), Some(c)) = (self.element(parent), self.element(child)) {
            check("appendChild", p.append_child(&c));
        }
    }

    fn prepend_child(&self, parent: NodeId, child: NodeId) {
        if let (Some(p), Some(c)) = (self.element(parent), self.element(child)) {
            check("prepend", p.prepend_with_node_1(&c));
        }
    }

    fn remove(&self, node: NodeId) {
        if node == BODY || node == HEAD {
            return;
        }
        if let Some(el) = self.element(node) {
            self.release_within(&el, true);
            el.remove();
        }
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            check("classList.add", el.class_list().add_1(class));
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            check("classList.remove", el.class_list().remove_1(class));
        }
    }

    fn toggle_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .and_then(|el| check("classList.toggle", el.class_list().toggle(class)))
            .unwrap_or(false)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|el| el.class_list().contains(class))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element(node) {
            check("setAttribute", el.set_attribute(name, value));
        }
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        if let Some(el) = self.element(node) {
            check("removeAttribute", el.remove_attribute(name));
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).and_then(|el| el.text_content()).unwrap_or_default()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            self.release_within(&el, false);
            el.set_text_content(Some(text));
        }
    }

    fn append_text(&self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            let text_node = self.document.create_text_node(text);
            check("appendChild", el.append_child(&text_node));
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node).map(|el| el.inner_html()).unwrap_or_default()
    }

    fn set_inner_html(&self, node: NodeId, html: &str) {
        if let Some(el) = self.element(node) {
            self.release_within(&el, false);
            el.set_inner_html(html);
        }
    }

    fn value(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: NodeId, value: &str) {
        let Some(el) = self.element(node) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.has_attribute("disabled"))
    }

    fn set_disabled(&self, node: NodeId, disabled: bool) {
        if disabled {
            self.set_attribute(node, "disabled", "");
        } else {
            self.remove_attribute(node, "disabled");
        }
    }

    fn reset_form(&self, form: NodeId) {
        if let Some(el) = self.element(form) {
            if let Some(form) = el.dyn_ref::<HtmlFormElement>() {
                form.reset();
            }
        }
    }

    fn scroll_into_view(&self, node: NodeId) {
        if let Some(el) = self.element(node) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn location_path(&self) -> String {
        self.document
            .location()
            .and_then(|loc| check("location.pathname", loc.pathname()))
            .unwrap_or_default()
    }
}
