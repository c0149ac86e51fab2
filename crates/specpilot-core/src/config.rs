use crate::error::{Result, SpecError};
use crate::rules::Rule;
use serde_yaml::{Mapping, Value};
use std::path::Path;

// ---------------------------------------------------------------------------
// RulesField
// ---------------------------------------------------------------------------

/// Shape of the `rules:` entry as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum RulesField {
    Missing,
    /// Present but not a list.
    Malformed,
    List(Vec<Rule>),
}

impl RulesField {
    pub fn rules(&self) -> &[Rule] {
        match self {
            RulesField::List(rules) => rules,
            _ => &[],
        }
    }

    pub fn has_prompt_tracking_mandate(&self) -> bool {
        self.rules().iter().any(Rule::is_prompt_tracking)
    }
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

/// `project.yaml`, kept as the full YAML mapping so that blocks the tool does
/// not model (`team`, `build`, `dependencies`, ...) survive a rewrite.
/// Comments do not survive.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    doc: Mapping,
}

pub const REQUIRED_FIELDS: &[&str] = &["name", "version", "language"];

impl ProjectConfig {
    pub fn parse(data: &str) -> Result<Self> {
        match serde_yaml::from_str::<Value>(data)? {
            Value::Mapping(doc) => Ok(Self { doc }),
            _ => Err(SpecError::InvalidProjectConfig),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = crate::io::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        crate::io::atomic_write(path, self.to_yaml()?.as_bytes())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.doc)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// A scalar field rendered as a string (`version: 1.0` reads as `"1.0"`).
    pub fn str_field(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<String> {
        self.str_field("name")
    }

    pub fn language(&self) -> Option<String> {
        self.str_field("language")
    }

    pub fn framework(&self) -> Option<String> {
        self.str_field("framework").filter(|f| !f.is_empty())
    }

    /// Required fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !self.get(field).map(is_truthy).unwrap_or(false))
            .collect()
    }

    pub fn rules(&self) -> RulesField {
        match self.get("rules") {
            None | Some(Value::Null) => RulesField::Missing,
            Some(Value::Sequence(items)) => RulesField::List(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(Rule::parse(s)),
                        _ => None,
                    })
                    .collect(),
            ),
            Some(_) => RulesField::Malformed,
        }
    }

    /// Append every canonical mandate not already covered by an existing
    /// rule. A malformed `rules:` entry is replaced by a list. Returns the
    /// number of rules added.
    pub fn add_canonical_mandates(&mut self) -> usize {
        let mut existing = self.rules().rules().to_vec();
        let mut items = match self.doc.get("rules") {
            Some(Value::Sequence(items)) => items.clone(),
            _ => Vec::new(),
        };

        let mut added = 0;
        for mandate in Rule::canonical_mandates() {
            if existing.iter().any(|rule| rule.covers(&mandate)) {
                continue;
            }
            items.push(Value::String(mandate.text().to_string()));
            existing.push(mandate);
            added += 1;
        }

        self.doc
            .insert(Value::String("rules".to_string()), Value::Sequence(items));
        added
    }
}

/// YAML truthiness: null, empty strings, `false` and zero count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
