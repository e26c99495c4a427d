use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One project record backing a single rendered card.
///
/// Field names mirror the input document exactly. Every field defaults to the
/// empty string, so a record missing a field still renders a card with that
/// slot left blank rather than failing the batch.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub img_src: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Project {
    /// Template context for one card. The image alt text is derived here, not
    /// in the template: the contract is `title + " logo"`.
    pub fn card_context(&self) -> Value {
        json!({
            "url": self.url,
            "img_src": self.img_src,
            "title": self.title,
            "description": self.description,
            "alt": format!("{} logo", self.title),
        })
    }
}
