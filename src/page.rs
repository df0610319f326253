//! In-memory page model.
//!
//! A small element tree standing in for the browser document: ids, classes,
//! inline style properties and attributes. Behaviors look elements up the way
//! the site script does (by id, or by class under a parent) and write classes
//! and styles back. Tests and the CLI read the same values to observe what a
//! browser would render.
//!
//! Elements are addressed by [`ElementRef`], an index into the page. Elements
//! are never removed, so a ref stays valid for the page's lifetime.
//!
//! Layout is not computed. Where a behavior needs an element's position, the
//! embedder records it with [`Page::set_rect`].

use std::collections::{BTreeMap, BTreeSet};

/// Handle to an element inside a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(usize);

/// Vertical box of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub parent: Option<ElementRef>,
    pub children: Vec<ElementRef>,
    classes: BTreeSet<String>,
    style: BTreeMap<String, String>,
    attrs: BTreeMap<String, String>,
    rect: Option<Rect>,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    elements: Vec<Element>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// An empty page holding only `<body>`.
    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                tag: "body".to_string(),
                ..Element::default()
            }],
        }
    }

    pub fn body(&self) -> ElementRef {
        ElementRef(0)
    }

    /// Append a new element under `parent`.
    pub fn append(
        &mut self,
        parent: ElementRef,
        tag: &str,
        id: Option<&str>,
        classes: &[&str],
    ) -> ElementRef {
        let r = ElementRef(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_string(),
            id: id.map(str::to_string),
            parent: Some(parent),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Element::default()
        });
        self.elements[parent.0].children.push(r);
        r
    }

    pub fn get(&self, r: ElementRef) -> &Element {
        &self.elements[r.0]
    }

    pub fn by_id(&self, id: &str) -> Option<ElementRef> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(ElementRef)
    }

    /// First element carrying `class`, in document order.
    pub fn first_with_class(&self, class: &str) -> Option<ElementRef> {
        self.elements
            .iter()
            .position(|e| e.has_class(class))
            .map(ElementRef)
    }

    /// All descendants of `root` carrying `class`, in document order.
    pub fn descendants_with_class(&self, root: ElementRef, class: &str) -> Vec<ElementRef> {
        self.descendants_matching(root, |e| e.has_class(class))
    }

    /// Every element carrying at least one of `classes`, in document order.
    pub fn with_any_class(&self, classes: &[&str]) -> Vec<ElementRef> {
        self.descendants_matching(self.body(), |e| classes.iter().any(|c| e.has_class(c)))
    }

    fn descendants_matching(
        &self,
        root: ElementRef,
        matches: impl Fn(&Element) -> bool,
    ) -> Vec<ElementRef> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementRef> = self.get(root).children.iter().rev().copied().collect();
        while let Some(r) = stack.pop() {
            let element = self.get(r);
            if matches(element) {
                found.push(r);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        found
    }

    pub fn has_class(&self, r: ElementRef, class: &str) -> bool {
        self.get(r).has_class(class)
    }

    pub fn add_class(&mut self, r: ElementRef, class: &str) {
        self.elements[r.0].classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, r: ElementRef, class: &str) {
        self.elements[r.0].classes.remove(class);
    }

    /// Flip `class`, or force it on/off. Returns whether it is now present.
    pub fn toggle_class(&mut self, r: ElementRef, class: &str, force: Option<bool>) -> bool {
        let on = force.unwrap_or_else(|| !self.has_class(r, class));
        if on {
            self.add_class(r, class);
        } else {
            self.remove_class(r, class);
        }
        on
    }

    /// Set an inline style property. An empty value clears it.
    pub fn set_style(&mut self, r: ElementRef, property: &str, value: &str) {
        let style = &mut self.elements[r.0].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn style(&self, r: ElementRef, property: &str) -> Option<&str> {
        self.get(r).style(property)
    }

    pub fn set_attr(&mut self, r: ElementRef, name: &str, value: &str) {
        self.elements[r.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn attr(&self, r: ElementRef, name: &str) -> Option<&str> {
        self.get(r).attr(name)
    }

    /// Record where `r` is laid out.
    pub fn set_rect(&mut self, r: ElementRef, rect: Rect) {
        self.elements[r.0].rect = Some(rect);
    }

    /// Laid-out box of `r`, if one was recorded.
    pub fn rect(&self, r: ElementRef) -> Option<Rect> {
        self.get(r).rect
    }
}
