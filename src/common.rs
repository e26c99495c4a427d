use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;
use tracing::info;

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn create_path_if_not_exists(path: &str) -> anyhow::Result<()> {
    let parent = Path::new(path)
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Invalid path: no parent directory for '{}'", path))?;
    if !parent.as_os_str().is_empty() && !parent.exists() {
        info!("Creating path: {:?}", parent);
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn write_string_to_file(filename: &str, content: &str) -> anyhow::Result<()> {
    create_path_if_not_exists(filename)?;
    let path = Path::new(filename);
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Handlebars instance shared by card rendering. Default HTML escaping stays
/// on: field values are inert text once rendered, matching what textContent
/// assignment would give in a browser.
pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(exists: |v: Value| {
        match v {
            serde_json::Value::Null => false,
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    });
    handlebars.register_helper("exists", Box::new(exists));

    handlebars_helper!(isnull: |v: Value| v.is_null());
    handlebars.register_helper("isnull", Box::new(isnull));

    handlebars_helper!(stringeq: |s1: String, s2: String| s1.eq(&s2));
    handlebars.register_helper("stringeq", Box::new(stringeq));

    handlebars
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn handlebars_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("Hello {{title}}", &json!({"title": "Alpha"}))
            .expect("This to render");
        assert_eq!(res, "Hello Alpha");
    }

    #[test]
    fn handlebars_escapes_html_by_default() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("<p>{{description}}</p>", &json!({"description": "<b>bold</b>"}))
            .expect("This to render");
        assert_eq!(res, "<p>&lt;b&gt;bold&lt;/b&gt;</p>");
    }

    #[test]
    fn handlebars_can_iterate_objects() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#each projects as |project|}}
Card for {{project.title}}
{{/each}}"#,
                &json!({"projects": [
                {
                    "title": "Alpha"
                },
                {
                    "title": "Beta"
                }
                ]}),
            )
            .expect("This to render");
        assert_eq!(res, "Card for Alpha\nCard for Beta\n");
    }

    #[test]
    fn handlebars_helper_exists_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#if (exists project.description) }}{{project.description}}{{/if}}"#,
                &json!({
                    "project": {
                        "description": "A static site"
                    }
                }),
            )
            .expect("This to render");
        assert_eq!(res, "A static site");
    }

    #[test]
    fn handlebars_helper_exists_rejects_blank() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#if (exists project.description) }}{{project.description}}{{else}}none{{/if}}"#,
                &json!({
                    "project": {
                        "description": "  "
                    }
                }),
            )
            .expect("This to render");
        assert_eq!(res, "none");
    }

    #[test]
    fn handlebars_helper_stringeq_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#if (stringeq "Alpha" project.title) }}{{project.title}}{{/if}}"#,
                &json!({
                    "project": {
                        "title": "Alpha",
                    }
                }),
            )
            .expect("This to render");
        assert_eq!(res, "Alpha");
    }

    #[test]
    fn handlebars_helper_isnull_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#if (isnull project.img_src) }}missing{{/if}}"#,
                &json!({
                    "project": {
                        "title": "Alpha"
                    }
                }),
            )
            .expect("This to render");
        assert_eq!(res, "missing");
    }
}
