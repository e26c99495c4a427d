use thiserror::Error;
use tracing::debug;

use crate::common;
use crate::page::{Page, PageError};
use crate::project::Project;
use handlebars::Handlebars;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("Failed to render card template: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// The reusable card fragment. Each instantiation renders an independent copy
/// with one record's fields filled in; copies share nothing with the template
/// or with each other.
#[derive(Debug, Clone)]
pub struct CardTemplate {
    source: String,
}

impl CardTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn instantiate(
        &self,
        handlebars: &Handlebars,
        project: &Project,
    ) -> Result<String, handlebars::RenderError> {
        handlebars.render_template(&self.source, &project.card_context())
    }
}

pub fn default_card_template() -> String {
    include_str!("card.hbs").to_string()
}

/// Append target for rendered cards. Children accumulate in arrival order and
/// are never cleared: rendering the same batch twice doubles them.
#[derive(Debug, Clone, Default)]
pub struct Container {
    children: Vec<String>,
}

impl Container {
    pub fn append(&mut self, card: String) {
        self.children.push(card);
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Renders one card per record, in input order, appending each to the
/// container. A record with missing fields renders a card with blank slots;
/// it does not fail the batch.
pub fn render_cards(
    projects: &[Project],
    template: &CardTemplate,
    container: &mut Container,
) -> Result<(), RenderError> {
    let handlebars = common::get_handlebars();
    for project in projects {
        debug!("Spawning card for {}", project.title);
        let card = template.instantiate(&handlebars, project)?;
        container.append(card);
    }
    Ok(())
}

/// The full page contract: look up the card template, then the container,
/// then render every record and splice the result back into the page. Both
/// lookups are checked once, before any record is processed.
pub fn render_page(page: &Page, projects: &[Project]) -> Result<String, RenderError> {
    let template = page.card_template()?;
    let mut container = page.container()?;
    render_cards(projects, &template, &mut container)?;
    Ok(page.with_cards(&container)?)
}
