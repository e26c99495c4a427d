use regex::Regex;
use std::path::Path;
use thiserror::Error;

use crate::render::{CardTemplate, Container};

/// Fixed id of the `<template>` element holding the card fragment.
pub const CARD_TEMPLATE_ID: &str = "project-card";
/// Fixed class of the element that accumulates rendered cards.
pub const CONTAINER_CLASS: &str = "project-grid";

/// Fatal page preconditions. Either failure aborts a render before any
/// record is processed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("Found no card template (expected <template id=\"project-card\">)")]
    MissingTemplate,
    #[error("Found no container to put project cards into (expected class \"project-grid\")")]
    MissingContainer,
}

/// A host document carrying the card template and the container element.
///
/// The page is never mutated in place; `with_cards` produces a new document
/// with the rendered cards spliced in.
#[derive(Debug, Clone)]
pub struct Page {
    html: String,
}

impl Page {
    pub fn parse(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::parse(html))
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Extracts the reusable card fragment from the page's template element.
    pub fn card_template(&self) -> Result<CardTemplate, PageError> {
        let template_el = Regex::new(r#"(?s)<template\b([^>]*)>(.*?)</template>"#)
            .expect("Invalid regex pattern for template elements");
        for caps in template_el.captures_iter(&self.html) {
            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if attr_value(attrs, "id") == Some(CARD_TEMPLATE_ID) {
                let content = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                return Ok(CardTemplate::new(content.trim()));
            }
        }
        Err(PageError::MissingTemplate)
    }

    /// Verifies the container element exists and hands back an empty append
    /// target for it.
    pub fn container(&self) -> Result<Container, PageError> {
        locate_container(&self.html).ok_or(PageError::MissingContainer)?;
        Ok(Container::default())
    }

    /// Splices the accumulated cards into the container element, immediately
    /// before its closing tag. Anything already inside the container stays.
    pub fn with_cards(&self, container: &Container) -> Result<String, PageError> {
        let splice_at = locate_container(&self.html).ok_or(PageError::MissingContainer)?;
        let mut cards = String::new();
        for card in container.children() {
            cards.push_str(card);
            cards.push('\n');
        }
        let mut out = String::with_capacity(self.html.len() + cards.len());
        out.push_str(&self.html[..splice_at]);
        out.push_str(&cards);
        out.push_str(&self.html[splice_at..]);
        Ok(out)
    }
}

/// Default host page skeleton, used by `generate template page`.
pub fn default_page() -> String {
    include_str!("page.html").to_string()
}

/// Byte offset of the container's closing tag. The container must not nest
/// another element with its own tag name; a container without a closing tag
/// is treated as absent.
fn locate_container(html: &str) -> Option<usize> {
    let open_tag = Regex::new(r#"<([A-Za-z][A-Za-z0-9-]*)([^>]*)>"#)
        .expect("Invalid regex pattern for open tags");
    for caps in open_tag.captures_iter(html) {
        let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let in_container_class = attr_value(attrs, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == CONTAINER_CLASS))
            .unwrap_or(false);
        if !in_container_class {
            continue;
        }
        let close = format!("</{}>", &caps[1]);
        let after_open = caps.get(0).map(|m| m.end()).unwrap_or(0);
        return html[after_open..].find(&close).map(|rel| after_open + rel);
    }
    None
}

fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let pattern = Regex::new(&format!(r#"(?:^|\s){}\s*=\s*"([^"]*)""#, name))
        .expect("Invalid regex pattern for attribute values");
    pattern
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <template id="project-card">
        <a class="project" href="{{url}}">{{title}}</a>
    </template>
    <div class="project-grid">
    </div>
</body>
</html>"#;

    #[test]
    fn extracts_card_template() {
        let page = Page::parse(PAGE);
        let template = page.card_template().expect("template to be found");
        assert!(template.source().contains(r#"href="{{url}}""#));
    }

    #[test]
    fn missing_template_is_fatal() {
        let page = Page::parse(r#"<div class="project-grid"></div>"#);
        assert_eq!(page.card_template().unwrap_err(), PageError::MissingTemplate);
    }

    #[test]
    fn template_with_other_id_does_not_match() {
        let page = Page::parse(r#"<template id="nav-item"><li>{{title}}</li></template>"#);
        assert_eq!(page.card_template().unwrap_err(), PageError::MissingTemplate);
    }

    #[test]
    fn missing_container_is_fatal() {
        let page = Page::parse(r#"<template id="project-card"><a>{{title}}</a></template>"#);
        assert_eq!(page.container().unwrap_err(), PageError::MissingContainer);
    }

    #[test]
    fn container_class_matches_whole_tokens_only() {
        let page = Page::parse(r#"<div class="project-grid-wrapper"></div>"#);
        assert_eq!(page.container().unwrap_err(), PageError::MissingContainer);

        let page = Page::parse(r#"<section class="wide project-grid"></section>"#);
        assert!(page.container().is_ok());
    }

    #[test]
    fn with_cards_splices_before_closing_tag() {
        let page = Page::parse(PAGE);
        let mut container = page.container().expect("container to be found");
        container.append("<a class=\"project\" href=\"/a\">Alpha</a>".to_string());
        container.append("<a class=\"project\" href=\"/b\">Beta</a>".to_string());

        let out = page.with_cards(&container).expect("splice to succeed");
        let alpha = out.find("href=\"/a\"").expect("first card present");
        let beta = out.find("href=\"/b\"").expect("second card present");
        assert!(alpha < beta);
        assert!(out.find("</div>").expect("container close kept") > beta);
        // The source page is untouched.
        assert!(!page.html().contains("href=\"/a\""));
    }

    #[test]
    fn with_cards_keeps_existing_children() {
        let page = Page::parse(r#"<div class="project-grid"><p>kept</p></div>"#);
        let mut container = page.container().unwrap();
        container.append("<a href=\"/a\">Alpha</a>".to_string());
        let out = page.with_cards(&container).unwrap();
        let kept = out.find("<p>kept</p>").unwrap();
        let added = out.find("href=\"/a\"").unwrap();
        assert!(kept < added);
    }

    #[test]
    fn container_without_closing_tag_is_treated_as_absent() {
        let page = Page::parse(r#"<div class="project-grid">"#);
        assert_eq!(page.container().unwrap_err(), PageError::MissingContainer);
    }
}
