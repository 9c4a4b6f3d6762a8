//! `render(template, bindings) -> text`.
//!
//! Templates are plain Go text with `{{Name}}` placeholders. Nested fragments are
//! rendered by the caller first and bound like any other value; a placeholder that
//! stands alone on its line gets the bound text re-indented to its column, so
//! deeply nested fragments stay readable.
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RenderError;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern")
});

/// Ordered name → text bindings for one template.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: IndexMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self { Self::default() }

    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

pub fn render(template: &str, bindings: &Bindings) -> Result<String, RenderError> {
    let mut out: Vec<String> = Vec::new();

    for line in dedent(template) {
        let trimmed = line.trim();
        if let Some(name) = standalone_placeholder(trimmed) {
            let value = lookup(bindings, name)?;
            let indent = &line[..line.len() - line.trim_start().len()];
            for sub in value.lines() {
                if sub.trim().is_empty() {
                    out.push(String::new());
                } else {
                    out.push(format!("{indent}{sub}"));
                }
            }
            continue;
        }
        out.push(substitute_inline(&line, bindings)?);
    }

    Ok(trim_blank_edges(&out).join("\n"))
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn lookup<'b>(bindings: &'b Bindings, name: &str) -> Result<&'b str, RenderError> {
    bindings.get(name).ok_or_else(|| RenderError::Unbound(name.to_string()))
}

fn standalone_placeholder(trimmed: &str) -> Option<&str> {
    let caps = PLACEHOLDER.captures(trimmed)?;
    let whole = caps.get(0)?;
    if whole.start() == 0 && whole.end() == trimmed.len() {
        caps.get(1).map(|m| m.as_str())
    } else {
        None
    }
}

fn substitute_inline(line: &str, bindings: &Bindings) -> Result<String, RenderError> {
    let mut result = String::with_capacity(line.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(line) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else { continue };
        result.push_str(&line[last..whole.start()]);
        result.push_str(lookup(bindings, name.as_str())?);
        last = whole.end();
    }
    result.push_str(&line[last..]);
    Ok(result)
}

/// Strip the common leading whitespace so templates can be indented in Rust source.
fn dedent(template: &str) -> Vec<String> {
    let lines: Vec<&str> = template.lines().collect();
    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .into_iter()
        .map(|l| if l.trim().is_empty() { String::new() } else { l[common..].trim_end().to_string() })
        .collect()
}

fn trim_blank_edges(lines: &[String]) -> &[String] {
    let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(start, |i| i + 1);
    &lines[start..end]
}
