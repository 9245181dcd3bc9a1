//! Detached element tree
//!
//! The page is modelled as a tree of plain `Element` values. Event
//! listeners are `Action` values rather than callbacks: dispatching an
//! event on an element hands the bound action back to the app, which
//! applies it. Inner content is stored verbatim; the terminal renderer
//! shows it as text.

use std::collections::BTreeMap;

use crate::catalog::ItemRef;

/// What a bound listener asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the detail modal for an item
    OpenDetail(ItemRef),
    /// Hide the detail modal
    CloseModal,
    /// The genre select changed; the new value is read from the element
    FilterChanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    class_name: Option<String>,
    inner_html: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
    listeners: BTreeMap<String, Action>,
}

/// Declarative description of an element, consumed by `create_element`
#[derive(Debug, Clone, Default)]
pub struct ElementOptions {
    pub class_name: Option<String>,
    pub inner_html: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub on: Vec<(String, Action)>,
}

impl ElementOptions {
    pub fn class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Default::default()
        }
    }

    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.inner_html = Some(content.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn on(mut self, event: impl Into<String>, action: Action) -> Self {
        self.on.push((event.into(), action));
        self
    }
}

/// Build a detached element from a tag and an options bag.
///
/// Tag and attribute names are not validated. Children are appended in
/// the order given and every listener is bound.
pub fn create_element(tag: &str, options: ElementOptions) -> Element {
    let mut element = Element {
        tag: tag.to_string(),
        class_name: options.class_name,
        inner_html: options.inner_html.unwrap_or_default(),
        ..Default::default()
    };

    for (name, value) in options.attributes {
        element.attributes.insert(name, value);
    }
    for child in options.children {
        element.children.push(child);
    }
    for (event, action) in options.on {
        element.listeners.insert(event, action);
    }

    element
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name
            .as_deref()
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Replace inner content. Like assigning `innerHTML`, this drops children.
    pub fn set_inner_html(&mut self, content: impl Into<String>) {
        self.inner_html = content.into();
        self.children.clear();
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Remove all content and children
    pub fn clear(&mut self) {
        self.inner_html.clear();
        self.children.clear();
    }

    /// Own content followed by every descendant's, in document order
    pub fn text_content(&self) -> String {
        let mut out = self.inner_html.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Action bound to an event on this element, if any
    pub fn dispatch(&self, event: &str) -> Option<&Action> {
        self.listeners.get(event)
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_class(class))
    }

    pub fn find_all_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_by_class(class, found);
        }
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GenreId, ItemRef};

    #[test]
    fn test_create_element_applies_everything() {
        let first = create_element("span", ElementOptions::class("tag").text("one"));
        let second = create_element("span", ElementOptions::class("tag").text("two"));

        let el = create_element(
            "div",
            ElementOptions::class("card big")
                .text("head:")
                .attr("id", "c1")
                .attr("data-x", "1")
                .children([first, second])
                .on("click", Action::OpenDetail(ItemRef::Genre(GenreId::from(4)))),
        );

        assert_eq!(el.tag(), "div");
        assert!(el.has_class("card"));
        assert!(el.has_class("big"));
        assert!(!el.has_class("car"));
        assert_eq!(el.id(), Some("c1"));
        assert_eq!(el.attribute("data-x"), Some("1"));
        assert_eq!(el.children().len(), 2);
        assert_eq!(el.text_content(), "head:onetwo");
        assert_eq!(
            el.dispatch("click"),
            Some(&Action::OpenDetail(ItemRef::Genre(GenreId::from(4))))
        );
        assert_eq!(el.dispatch("change"), None);
    }

    #[test]
    fn test_no_validation_of_names() {
        let el = create_element("not a tag!", ElementOptions::default().attr("??", "v"));
        assert_eq!(el.tag(), "not a tag!");
        assert_eq!(el.attribute("??"), Some("v"));
    }

    #[test]
    fn test_set_inner_html_drops_children() {
        let mut el = create_element(
            "ul",
            ElementOptions::default().child(create_element("li", ElementOptions::default())),
        );
        el.set_inner_html("empty");
        assert!(el.children().is_empty());
        assert_eq!(el.text_content(), "empty");

        el.clear();
        assert_eq!(el.text_content(), "");
    }

    #[test]
    fn test_queries() {
        let tree = create_element(
            "section",
            ElementOptions::default()
                .child(create_element("p", ElementOptions::class("x").text("a")))
                .child(create_element(
                    "div",
                    ElementOptions::default()
                        .attr("id", "inner")
                        .child(create_element("p", ElementOptions::class("x").text("b"))),
                )),
        );

        assert_eq!(tree.find_all_by_class("x").len(), 2);
        assert_eq!(tree.find_by_class("x").map(|e| e.text_content()), Some("a".to_string()));
        assert_eq!(tree.find_by_tag("div").and_then(|e| e.id()), Some("inner"));
        assert!(tree.find_by_tag("h3").is_none());
    }
}
