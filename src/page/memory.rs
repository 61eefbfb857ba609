//! Headless in-memory document.
//!
//! A small arena tree of elements, text and raw-markup nodes, enough to run
//! every component without a browser. Scroll requests are recorded instead of
//! performed so tests can assert on them.
//!
//! Removed and replaced nodes go back on a free list with their generation
//! bumped, so repeated open/close cycles reuse slots instead of growing the
//! arena.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;

use super::selector::{Matchable, Selector};
use super::{NodeId, Page};

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    /// Live control value, distinct from the `value` attribute (its default).
    value: String,
}

impl Matchable for ElementData {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }
}

impl ElementData {
    fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_owned();
        } else {
            self.attrs.push((name.to_owned(), value.to_owned()));
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }

    fn classes(&self) -> Vec<String> {
        self.attr("class").unwrap_or("").split_whitespace().map(str::to_owned).collect()
    }

    fn set_classes(&mut self, classes: &[String]) {
        if classes.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", &classes.join(" "));
        }
    }

    fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementData),
    Text(String),
    /// Markup assigned through `set_inner_html`, kept verbatim.
    Raw(String),
    /// Released slot waiting on the free list.
    Vacant,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    generation: u32,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
    free: Vec<usize>,
    root: usize,
    head: usize,
    body: usize,
    path: String,
    scrolls: Vec<NodeId>,
}

impl Tree {
    fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: 0,
            head: 0,
            body: 0,
            path: "/".to_owned(),
            scrolls: Vec::new(),
        };
        tree.root = tree.alloc(NodeKind::Element(element("html")));
        tree.head = tree.alloc(NodeKind::Element(element("head")));
        tree.body = tree.alloc(NodeKind::Element(element("body")));
        tree.attach(tree.root, tree.head, false);
        tree.attach(tree.root, tree.body, false);
        tree
    }

    fn alloc(&mut self, kind: NodeKind) -> usize {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx].kind = kind;
            return idx;
        }
        self.nodes.push(Node { kind, generation: 0, parent: None, children: Vec::new() });
        self.nodes.len() - 1
    }

    /// Detach `idx` and put its whole subtree back on the free list.
    fn release(&mut self, idx: usize) {
        self.detach(idx);
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current];
            stack.append(&mut node.children);
            node.kind = NodeKind::Vacant;
            node.parent = None;
            node.generation = node.generation.wrapping_add(1);
            self.free.push(current);
        }
    }

    /// Slot behind `id` if the handle is still live.
    fn resolve(&self, id: NodeId) -> Option<usize> {
        let node = self.nodes.get(id.slot)?;
        (node.generation == id.generation && !matches!(node.kind, NodeKind::Vacant)).then_some(id.slot)
    }

    fn handle(&self, idx: usize) -> NodeId {
        NodeId { slot: idx, generation: self.nodes[idx].generation }
    }

    fn element(&self, idx: usize) -> Option<&ElementData> {
        match &self.nodes.get(idx)?.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, idx: usize) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(idx)?.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Live element slot behind `id`.
    fn live_element(&self, id: NodeId) -> Option<usize> {
        self.resolve(id).filter(|&idx| self.element(idx).is_some())
    }

    fn live_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        let idx = self.resolve(id)?;
        self.element_mut(idx)
    }

    fn detach(&mut self, idx: usize) {
        let Some(parent) = self.nodes.get(idx).and_then(|n| n.parent) else {
            return;
        };
        self.nodes[parent].children.retain(|&c| c != idx);
        self.nodes[idx].parent = None;
    }

    fn attach(&mut self, parent: usize, child: usize, first: bool) {
        if self.is_inclusive_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if first {
            self.nodes[parent].children.insert(0, child);
        } else {
            self.nodes[parent].children.push(child);
        }
        self.nodes[child].parent = Some(parent);
    }

    fn is_inclusive_ancestor(&self, ancestor: usize, node: usize) -> bool {
        let mut cursor = Some(node);
        while let Some(idx) = cursor {
            if idx == ancestor {
                return true;
            }
            cursor = self.nodes.get(idx).and_then(|n| n.parent);
        }
        false
    }

    fn ancestors(&self, idx: usize) -> Vec<&ElementData> {
        let mut out = Vec::new();
        let mut cursor = self.nodes.get(idx).and_then(|n| n.parent);
        while let Some(p) = cursor {
            if let Some(el) = self.element(p) {
                out.push(el);
            }
            cursor = self.nodes[p].parent;
        }
        out
    }

    fn matches(&self, idx: usize, selector: &Selector) -> bool {
        self.element(idx).is_some_and(|el| selector.matches(el, self.ancestors(idx)))
    }

    /// Descendant elements of `root` in document order, excluding `root`.
    fn descendants(&self, root: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[root].children.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            if self.element(idx).is_some() {
                out.push(idx);
            }
            stack.extend(self.nodes[idx].children.iter().rev().copied());
        }
        out
    }

    fn text(&self, idx: usize) -> String {
        let mut out = String::new();
        self.collect_text(idx, &mut out);
        out
    }

    fn collect_text(&self, idx: usize, out: &mut String) {
        match &self.nodes[idx].kind {
            NodeKind::Text(t) => out.push_str(t),
            NodeKind::Raw(_) | NodeKind::Vacant => {}
            NodeKind::Element(_) => {
                for &child in &self.nodes[idx].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    fn clear_children(&mut self, idx: usize) {
        let children = self.nodes[idx].children.clone();
        for child in children {
            self.release(child);
        }
    }

    fn serialize_children(&self, idx: usize, out: &mut String) {
        for &child in &self.nodes[idx].children {
            self.serialize(child, out);
        }
    }

    fn serialize(&self, idx: usize, out: &mut String) {
        match &self.nodes[idx].kind {
            NodeKind::Text(t) => out.push_str(&escape_html(t)),
            NodeKind::Raw(html) => out.push_str(html),
            NodeKind::Vacant => {}
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                self.serialize_children(idx, out);
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

fn element(tag: &str) -> ElementData {
    ElementData { tag: tag.to_ascii_lowercase(), attrs: Vec::new(), value: String::new() }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// In-memory [`Page`] implementation for headless use.
#[derive(Debug)]
pub struct MemoryPage {
    tree: RefCell<Tree>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// An empty `<html><head></head><body></body></html>` document at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self { tree: RefCell::new(Tree::new()) }
    }

    /// Create an element with `attrs` and append it to `parent`.
    pub fn append_element(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        {
            let mut tree = self.tree.borrow_mut();
            if let Some(el) = tree.live_element_mut(node) {
                for (name, value) in attrs {
                    el.set_attr(name, value);
                    if *name == "value" {
                        el.value = (*value).to_owned();
                    }
                }
            }
        }
        self.append_child(parent, node);
        node
    }

    /// Set the path reported by [`Page::location_path`].
    pub fn set_location_path(&self, path: &str) {
        path.clone_into(&mut self.tree.borrow_mut().path);
    }

    /// Every node passed to [`Page::scroll_into_view`], oldest first.
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<NodeId> {
        self.tree.borrow().scrolls.clone()
    }

    /// Whether `node` is live and reachable from the document root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        tree.resolve(node).is_some_and(|idx| tree.is_inclusive_ancestor(tree.root, idx))
    }

    /// Arena slots allocated so far, live or free.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.tree.borrow().nodes.len()
    }

    /// Child elements of `node` in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let Some(idx) = tree.resolve(node) else {
            return Vec::new();
        };
        tree.nodes[idx].children.iter().copied().filter(|&c| tree.element(c).is_some()).map(|c| tree.handle(c)).collect()
    }

    /// Lowercase tag name of `node`, or empty for non-elements.
    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> String {
        let tree = self.tree.borrow();
        tree.resolve(node).and_then(|idx| tree.element(idx)).map(|el| el.tag.clone()).unwrap_or_default()
    }
}

impl Page for MemoryPage {
    fn body(&self) -> NodeId {
        let tree = self.tree.borrow();
        tree.handle(tree.body)
    }

    fn head(&self) -> NodeId {
        let tree = self.tree.borrow();
        tree.handle(tree.head)
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(tree.root)
            .into_iter()
            .find(|&idx| tree.element(idx).and_then(|el| el.attr("id")) == Some(id))
            .map(|idx| tree.handle(idx))
    }

    fn query(&self, selector: &Selector) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(tree.root).into_iter().find(|&idx| tree.matches(idx, selector)).map(|idx| tree.handle(idx))
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(tree.root)
            .into_iter()
            .filter(|&idx| tree.matches(idx, selector))
            .map(|idx| tree.handle(idx))
            .collect()
    }

    fn query_within(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let root = tree.resolve(root)?;
        tree.descendants(root).into_iter().find(|&idx| tree.matches(idx, selector)).map(|idx| tree.handle(idx))
    }

    fn query_all_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let Some(root) = tree.resolve(root) else {
            return Vec::new();
        };
        tree.descendants(root)
            .into_iter()
            .filter(|&idx| tree.matches(idx, selector))
            .map(|idx| tree.handle(idx))
            .collect()
    }

    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut cursor = tree.resolve(node);
        while let Some(idx) = cursor {
            if tree.matches(idx, selector) {
                return Some(tree.handle(idx));
            }
            cursor = tree.nodes[idx].parent;
        }
        None
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let idx = tree.resolve(node)?;
        tree.nodes[idx].parent.map(|p| tree.handle(p))
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        match (tree.resolve(ancestor), tree.resolve(node)) {
            (Some(a), Some(n)) => tree.is_inclusive_ancestor(a, n),
            _ => false,
        }
    }

    fn create_element(&self, tag: &str) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let idx = tree.alloc(NodeKind::Element(element(tag)));
        tree.handle(idx)
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if let (Some(p), Some(c)) = (tree.live_element(parent), tree.resolve(child)) {
            tree.attach(p, c, false);
        }
    }

    fn prepend_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if let (Some(p), Some(c)) = (tree.live_element(parent), tree.resolve(child)) {
            tree.attach(p, c, true);
        }
    }

    fn remove(&self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        let Some(idx) = tree.resolve(node) else {
            return;
        };
        // The document skeleton is never released.
        if idx == tree.root || idx == tree.head || idx == tree.body {
            return;
        }
        tree.release(idx);
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.tree.borrow_mut().live_element_mut(node) {
            let mut classes = el.classes();
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_owned());
                el.set_classes(&classes);
            }
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.tree.borrow_mut().live_element_mut(node) {
            let mut classes = el.classes();
            classes.retain(|c| c != class);
            el.set_classes(&classes);
        }
    }

    fn toggle_class(&self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            self.has_class(node, class)
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        let tree = self.tree.borrow();
        tree.resolve(node)
            .and_then(|idx| tree.element(idx))
            .is_some_and(|el| el.classes().iter().any(|c| c == class))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let tree = self.tree.borrow();
        tree.element(tree.resolve(node)?)?.attr(name).map(str::to_owned)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.tree.borrow_mut().live_element_mut(node) {
            el.set_attr(name, value);
        }
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        if let Some(el) = self.tree.borrow_mut().live_element_mut(node) {
            el.remove_attr(name);
        }
    }

    fn text(&self, node: NodeId) -> String {
        let tree = self.tree.borrow();
        tree.resolve(node).map(|idx| tree.text(idx)).unwrap_or_default()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(idx) = tree.live_element(node) else {
            return;
        };
        tree.clear_children(idx);
        if !text.is_empty() {
            let t = tree.alloc(NodeKind::Text(text.to_owned()));
            tree.attach(idx, t, false);
        }
    }

    fn append_text(&self, node: NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(idx) = tree.live_element(node) else {
            return;
        };
        let t = tree.alloc(NodeKind::Text(text.to_owned()));
        tree.attach(idx, t, false);
    }

    fn inner_html(&self, node: NodeId) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        if let Some(idx) = tree.live_element(node) {
            tree.serialize_children(idx, &mut out);
        }
        out
    }

    fn set_inner_html(&self, node: NodeId, html: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(idx) = tree.live_element(node) else {
            return;
        };
        tree.clear_children(idx);
        if !html.is_empty() {
            let raw = tree.alloc(NodeKind::Raw(html.to_owned()));
            tree.attach(idx, raw, false);
        }
    }

    fn value(&self, node: NodeId) -> String {
        let tree = self.tree.borrow();
        tree.resolve(node).and_then(|idx| tree.element(idx)).map(|el| el.value.clone()).unwrap_or_default()
    }

    fn set_value(&self, node: NodeId, value: &str) {
        if let Some(el) = self.tree.borrow_mut().live_element_mut(node) {
            value.clone_into(&mut el.value);
        }
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        tree.resolve(node).and_then(|idx| tree.element(idx)).is_some_and(|el| el.attr("disabled").is_some())
    }

    fn set_disabled(&self, node: NodeId, disabled: bool) {
        if let Some(el) = self.tree.borrow_mut().live_element_mut(node) {
            if disabled {
                el.set_attr("disabled", "");
            } else {
                el.remove_attr("disabled");
            }
        }
    }

    fn reset_form(&self, form: NodeId) {
        let mut tree = self.tree.borrow_mut();
        let Some(form) = tree.live_element(form) else {
            return;
        };
        for idx in tree.descendants(form) {
            if let Some(el) = tree.element_mut(idx) {
                if el.is_form_control() {
                    el.value = el.attr("value").unwrap_or("").to_owned();
                }
            }
        }
    }

    fn scroll_into_view(&self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.resolve(node).is_some() {
            tree.scrolls.push(node);
        }
    }

    fn location_path(&self) -> String {
        self.tree.borrow().path.clone()
    }
}
