use crate::error::Result;
use chrono::{Datelike, Local};
use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use serde::Serialize;
use serde_json::Value;

/// Handlebars registry with the document helpers pre-registered.
///
/// Rendering is pure: templates come in as strings and go out as strings.
/// Output is Markdown or YAML, so HTML escaping is disabled. Missing
/// variables render as empty; an unknown helper called with arguments is an
/// error.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(false);

        registry.register_helper("uppercase", Box::new(uppercase_helper));
        registry.register_helper("lowercase", Box::new(lowercase_helper));
        registry.register_helper("capitalize", Box::new(capitalize_helper));
        registry.register_helper("join", Box::new(join_helper));
        registry.register_helper("currentDate", Box::new(current_date_helper));
        registry.register_helper("currentYear", Box::new(current_year_helper));
        registry.register_helper("yaml", Box::new(yaml_helper));

        Self { registry }
    }

    pub fn render_from_string<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        Ok(self.registry.render_template(template, context)?)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn str_param<'a>(h: &'a Helper, index: usize) -> &'a str {
    h.param(index).and_then(|v| v.value().as_str()).unwrap_or("")
}

fn uppercase_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&str_param(h, 0).to_uppercase())?;
    Ok(())
}

fn lowercase_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&str_param(h, 0).to_lowercase())?;
    Ok(())
}

fn capitalize_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&capitalize(str_param(h, 0)))?;
    Ok(())
}

/// `{{join list ", "}}`. Non-string elements are written in their JSON form.
fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let items = match h.param(0).map(|v| v.value()) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Ok(()),
        Some(_) => {
            return Err(RenderError::from(RenderErrorReason::Other(
                "join expects a list".to_string(),
            )))
        }
    };
    let separator = h.param(1).and_then(|v| v.value().as_str()).unwrap_or(", ");
    let joined = items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(separator);
    out.write(&joined)?;
    Ok(())
}

/// `{{yaml value}}` writes a double-quoted YAML scalar. Several arguments are
/// concatenated first, so `{{yaml projectName " API"}}` quotes the whole
/// title. A missing value becomes `""`.
fn yaml_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text: String = h
        .params()
        .iter()
        .map(|p| match p.value() {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect();
    out.write(&yaml_string(&text))?;
    Ok(())
}

fn current_date_helper(
    _: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&Local::now().format("%Y-%m-%d").to_string())?;
    Ok(())
}

fn current_year_helper(
    _: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&Local::now().year().to_string())?;
    Ok(())
}

/// Quote `s` as a double-quoted scalar. JSON string escapes are valid YAML
/// escapes, so quotes, backslashes and control characters survive a parse.
pub fn yaml_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, data: serde_json::Value) -> String {
        TemplateEngine::new().render_from_string(template, &data).unwrap()
    }

    #[test]
    fn substitutes_dotted_lookups() {
        let out = render(
            "{{projectName}} by {{owner.name}}",
            json!({ "projectName": "acme", "owner": { "name": "Ada" } }),
        );
        assert_eq!(out, "acme by Ada");
    }

    #[test]
    fn missing_variables_render_empty() {
        assert_eq!(render("[{{nope}}]", json!({})), "[]");
        assert_eq!(render("[{{a.b.c}}]", json!({ "a": {} })), "[]");
    }

    #[test]
    fn no_html_escaping() {
        let out = render("{{desc}}", json!({ "desc": "<b>a & b</b> \"q\"" }));
        assert_eq!(out, "<b>a & b</b> \"q\"");
    }

    #[test]
    fn case_helpers() {
        let data = json!({ "name": "hello world" });
        assert_eq!(render("{{uppercase name}}", data.clone()), "HELLO WORLD");
        assert_eq!(render("{{lowercase \"MiXeD\"}}", data.clone()), "mixed");
        assert_eq!(render("{{capitalize name}}", data), "Hello world");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn join_helper_joins_lists() {
        let data = json!({ "items": ["a", "b", 3] });
        assert_eq!(render("{{join items \" | \"}}", data.clone()), "a | b | 3");
        assert_eq!(render("{{join items}}", data), "a, b, 3");
        assert_eq!(render("[{{join missing \",\"}}]", json!({})), "[]");
    }

    #[test]
    fn yaml_helper_quotes_scalars() {
        let data = json!({ "desc": "A \"fast\" API", "path": "C:\\data", "n": 3 });
        assert_eq!(render("d: {{yaml desc}}", data.clone()), r#"d: "A \"fast\" API""#);
        assert_eq!(render("p: {{yaml path}}", data.clone()), r#"p: "C:\\data""#);
        assert_eq!(render("t: {{yaml desc \" v2\"}}", data.clone()), r#"t: "A \"fast\" API v2""#);
        assert_eq!(render("n: {{yaml n}} m: {{yaml missing}}", data), r#"n: "3" m: """#);

        let parsed: serde_yaml::Value =
            serde_yaml::from_str(&format!("v: {}", yaml_string("line\n\\ \"q\""))).unwrap();
        assert_eq!(parsed["v"].as_str(), Some("line\n\\ \"q\""));
    }

    #[test]
    fn date_helpers() {
        let today = Local::now();
        assert_eq!(
            render("{{currentDate}}", json!({})),
            today.format("%Y-%m-%d").to_string()
        );
        assert_eq!(render("{{currentYear}}", json!({})), today.year().to_string());
    }

    #[test]
    fn conditionals_and_iteration() {
        let tpl = "{{#if framework}}fw={{framework}}{{else}}none{{/if}}";
        assert_eq!(render(tpl, json!({ "framework": "express" })), "fw=express");
        assert_eq!(render(tpl, json!({})), "none");

        let list = "{{#each items}}- {{this}}\n{{/each}}";
        assert_eq!(render(list, json!({ "items": ["x", "y"] })), "- x\n- y\n");

        let map = "{{#each counts}}{{@key}}={{this}};{{/each}}";
        assert_eq!(render(map, json!({ "counts": { ".md": 2, ".rs": 5 } })), ".md=2;.rs=5;");
    }

    #[test]
    fn unknown_helper_with_arguments_is_an_error() {
        let engine = TemplateEngine::new();
        assert!(engine
            .render_from_string("{{shout projectName}}", &json!({ "projectName": "x" }))
            .is_err());
    }

    #[test]
    fn malformed_template_is_an_error() {
        let engine = TemplateEngine::new();
        assert!(engine.render_from_string("{{#if x}}open", &json!({})).is_err());
    }
}
