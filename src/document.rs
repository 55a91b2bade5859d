//! Typed queries over parsed HTML.
//!
//! Listing and article pages are searched with [`ElementQuery`] predicates
//! (a tag name plus attribute matchers) instead of CSS selector strings, so
//! selector fallback chains can be written as ordered slices of queries.

use scraper::{ElementRef, Html};

/// How an attribute value must look for an element to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMatch {
    /// The attribute exists and is not blank.
    NonEmpty,
    /// The attribute equals the given value exactly.
    Equals(&'static str),
    /// For `class`-like attributes: the whole value equals the given string,
    /// or one of its whitespace-separated tokens does.
    HasClass(&'static str),
}

impl AttrMatch {
    fn accepts(&self, value: &str) -> bool {
        match self {
            AttrMatch::NonEmpty => !value.trim().is_empty(),
            AttrMatch::Equals(expected) => value == *expected,
            AttrMatch::HasClass(expected) => {
                value == *expected || value.split_whitespace().any(|token| token == *expected)
            }
        }
    }
}

/// Tag name plus attribute predicates, all of which must hold.
#[derive(Debug, Clone)]
pub struct ElementQuery {
    tag: &'static str,
    attrs: Vec<(&'static str, AttrMatch)>,
}

impl ElementQuery {
    pub fn tag(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, matcher: AttrMatch) -> Self {
        self.attrs.push((name, matcher));
        self
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        value.name().eq_ignore_ascii_case(self.tag)
            && self.attrs.iter().all(|(name, matcher)| {
                value
                    .attr(name)
                    .map(|found| matcher.accepts(found))
                    .unwrap_or(false)
            })
    }
}

/// Search helpers available on any element.
pub trait NodeQuery<'a> {
    /// Matching descendants in document order, excluding the element itself.
    fn find_all(self, query: &ElementQuery) -> impl Iterator<Item = ElementRef<'a>>;

    fn find_first(self, query: &ElementQuery) -> Option<ElementRef<'a>>;

    /// Text content with runs of whitespace collapsed to single spaces.
    fn normalized_text(self) -> String;
}

impl<'a> NodeQuery<'a> for ElementRef<'a> {
    fn find_all(self, query: &ElementQuery) -> impl Iterator<Item = ElementRef<'a>> {
        let query = query.clone();
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(move |el| query.matches(el))
    }

    fn find_first(self, query: &ElementQuery) -> Option<ElementRef<'a>> {
        self.find_all(query).next()
    }

    fn normalized_text(self) -> String {
        self.text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Matching elements anywhere in the page, in document order.
    pub fn find_all<'a>(&'a self, query: &ElementQuery) -> impl Iterator<Item = ElementRef<'a>> {
        let root = self.html.root_element();
        let root_matches = query.matches(&root);
        std::iter::once(root)
            .filter(move |_| root_matches)
            .chain(root.find_all(query))
    }

    pub fn find_first(&self, query: &ElementQuery) -> Option<ElementRef<'_>> {
        self.find_all(query).next()
    }

    /// Try each query in order and return the first element for which
    /// `accept` holds.
    pub fn first_match<'a, F>(&'a self, queries: &[ElementQuery], mut accept: F) -> Option<ElementRef<'a>>
    where
        F: FnMut(&ElementRef<'a>) -> bool,
    {
        queries
            .iter()
            .find_map(|query| self.find_all(query).find(|el| accept(el)))
    }
}
