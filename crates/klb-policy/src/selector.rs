//! Label selector evaluation.
//!
//! Selectors follow Kubernetes semantics: `matchLabels` entries are equality
//! requirements, `matchExpressions` are set-based requirements, and every
//! requirement must hold. A selector with no requirements matches everything.

use std::sync::LazyLock;

use klb_core::{LabelSelector, LabelSelectorRequirement, Labels, SelectorOperator};
use regex::Regex;

use crate::error::SelectorError;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").expect("label name pattern")
});

static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("label prefix pattern")
});

const MAX_NAME_LEN: usize = 63;
const MAX_PREFIX_LEN: usize = 253;

/// Decides whether a selector matches a label set.
///
/// Returns an error when the selector itself is malformed.
pub trait SelectorMatcher {
    fn matches(&self, selector: &LabelSelector, labels: &Labels) -> Result<bool, SelectorError>;
}

impl<F> SelectorMatcher for F
where
    F: Fn(&LabelSelector, &Labels) -> Result<bool, SelectorError>,
{
    fn matches(&self, selector: &LabelSelector, labels: &Labels) -> Result<bool, SelectorError> {
        self(selector, labels)
    }
}

/// Kubernetes label selector matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelSelectorMatcher;

impl SelectorMatcher for LabelSelectorMatcher {
    fn matches(&self, selector: &LabelSelector, labels: &Labels) -> Result<bool, SelectorError> {
        let requirements = compile(selector)?;
        Ok(requirements.iter().all(|r| r.matches(labels)))
    }
}

#[derive(Debug)]
struct Requirement<'a> {
    key: &'a str,
    operator: SelectorOperator,
    values: Vec<&'a str>,
}

impl Requirement<'_> {
    fn matches(&self, labels: &Labels) -> bool {
        let value = labels.get(self.key).map(String::as_str);
        match self.operator {
            SelectorOperator::In => value.is_some_and(|v| self.values.contains(&v)),
            SelectorOperator::NotIn => value.is_none_or(|v| !self.values.contains(&v)),
            SelectorOperator::Exists => value.is_some(),
            SelectorOperator::DoesNotExist => value.is_none(),
        }
    }
}

fn compile(selector: &LabelSelector) -> Result<Vec<Requirement<'_>>, SelectorError> {
    let mut requirements = Vec::new();

    if let Some(match_labels) = &selector.match_labels {
        for (key, value) in match_labels {
            validate_key(key)?;
            validate_value(key, value)?;
            requirements.push(Requirement {
                key: key.as_str(),
                operator: SelectorOperator::In,
                values: vec![value.as_str()],
            });
        }
    }

    if let Some(expressions) = &selector.match_expressions {
        for expression in expressions {
            requirements.push(compile_expression(expression)?);
        }
    }

    Ok(requirements)
}

fn compile_expression(expr: &LabelSelectorRequirement) -> Result<Requirement<'_>, SelectorError> {
    validate_key(&expr.key)?;
    match expr.operator {
        SelectorOperator::In | SelectorOperator::NotIn => {
            if expr.values.is_empty() {
                return Err(SelectorError::MissingValues {
                    key: expr.key.clone(),
                    operator: format!("{:?}", expr.operator),
                });
            }
            for value in &expr.values {
                validate_value(&expr.key, value)?;
            }
        }
        SelectorOperator::Exists | SelectorOperator::DoesNotExist => {
            if !expr.values.is_empty() {
                return Err(SelectorError::UnexpectedValues {
                    key: expr.key.clone(),
                    operator: format!("{:?}", expr.operator),
                });
            }
        }
    }
    Ok(Requirement {
        key: &expr.key,
        operator: expr.operator,
        values: expr.values.iter().map(String::as_str).collect(),
    })
}

fn validate_key(key: &str) -> Result<(), SelectorError> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };
    let prefix_ok = prefix.is_none_or(|p| p.len() <= MAX_PREFIX_LEN && PREFIX_RE.is_match(p));
    let name_ok = name.len() <= MAX_NAME_LEN && NAME_RE.is_match(name);
    if prefix_ok && name_ok {
        Ok(())
    } else {
        Err(SelectorError::InvalidKey(key.to_string()))
    }
}

fn validate_value(key: &str, value: &str) -> Result<(), SelectorError> {
    if value.is_empty() || (value.len() <= MAX_NAME_LEN && NAME_RE.is_match(value)) {
        Ok(())
    } else {
        Err(SelectorError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
