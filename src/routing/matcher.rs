//! Path template compilation and matching.
//!
//! # Responsibilities
//! - Parse templates such as `/foo/{foo_id:[0-9]+}/bar`
//! - Compile them into one anchored regex
//! - Extract variable values from a request path
//! - Build concrete paths back from variable values
//!
//! # Design Decisions
//! - A variable without a constraint matches one segment (`[^/]+`)
//! - Capture groups are named `v0..vN` so constraints may contain their own groups
//! - Braces inside a constraint must balance (`{code:[a-z]{2}}`)
//! - Literal text is matched exactly (case-sensitive)

use regex::Regex;

use crate::routing::{MuxError, PathParams};

const DEFAULT_CONSTRAINT: &str = "[^/]+";

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    template: String,
    regex: Regex,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Variable(Variable),
}

#[derive(Debug, Clone)]
struct Variable {
    name: String,
    constraint: Regex,
}

impl PathTemplate {
    /// Compile a template. Fails on unbalanced braces, unnamed variables,
    /// empty constraints or constraints that are not valid regexes.
    pub fn parse(template: &str) -> Result<Self, MuxError> {
        let mut pattern = String::from("^");
        let mut segments = Vec::new();
        let mut cursor = 0;

        for (index, (start, end)) in brace_indices(template)?.into_iter().enumerate() {
            let literal = &template[cursor..start];
            if !literal.is_empty() {
                pattern.push_str(&regex::escape(literal));
                segments.push(Segment::Literal(literal.to_string()));
            }

            let inner = &template[start + 1..end - 1];
            let (name, constraint) = inner
                .split_once(':')
                .unwrap_or((inner, DEFAULT_CONSTRAINT));
            let name = name.trim();
            if name.is_empty() || constraint.is_empty() {
                return Err(MuxError::pattern(
                    template,
                    format!("missing name or constraint in {{{inner}}}"),
                ));
            }

            pattern.push_str(&format!("(?P<v{index}>{constraint})"));
            segments.push(Segment::Variable(Variable {
                name: name.to_string(),
                constraint: compile(template, &format!("^(?:{constraint})$"))?,
            }));
            cursor = end;
        }

        let rest = &template[cursor..];
        if !rest.is_empty() {
            pattern.push_str(&regex::escape(rest));
            segments.push(Segment::Literal(rest.to_string()));
        }
        pattern.push('$');

        Ok(Self {
            template: template.to_string(),
            regex: compile(template, &pattern)?,
            segments,
        })
    }

    /// The template exactly as it was registered.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Variable names in order of appearance.
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables().map(|v| v.name.as_str()).collect()
    }

    /// Match a request path, returning the captured variables on success.
    pub fn captures(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;
        let mut params = PathParams::default();
        for (index, variable) in self.variables().enumerate() {
            if let Some(value) = caps.name(&format!("v{index}")) {
                params.push(variable.name.clone(), value.as_str());
            }
        }
        Some(params)
    }

    /// Substitute values into the template.
    pub fn expand(&self, values: &[(&str, &str)]) -> Result<String, MuxError> {
        let mut path = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Variable(variable) => {
                    let value = values
                        .iter()
                        .find(|(name, _)| *name == variable.name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| MuxError::MissingParam {
                            template: self.template.clone(),
                            name: variable.name.clone(),
                        })?;
                    if !variable.constraint.is_match(value) {
                        return Err(MuxError::InvalidParam {
                            name: variable.name.clone(),
                            value: value.to_string(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }

    fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(variable) => Some(variable),
            Segment::Literal(_) => None,
        })
    }
}

fn compile(template: &str, pattern: &str) -> Result<Regex, MuxError> {
    Regex::new(pattern).map_err(|e| MuxError::pattern(template, e.to_string()))
}

/// Byte ranges `[start, end)` of each top-level `{...}` group.
fn brace_indices(template: &str) -> Result<Vec<(usize, usize)>, MuxError> {
    let mut bounds = Vec::new();
    let mut level = 0usize;
    let mut start = 0;

    for (i, byte) in template.bytes().enumerate() {
        match byte {
            b'{' => {
                if level == 0 {
                    start = i;
                }
                level += 1;
            }
            b'}' => {
                if level == 0 {
                    return Err(MuxError::pattern(template, format!("unexpected '}}' at {i}")));
                }
                level -= 1;
                if level == 0 {
                    bounds.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    if level != 0 {
        return Err(MuxError::pattern(template, "unbalanced braces"));
    }
    Ok(bounds)
}
