use regex::Regex;

use super::normalize::normalize;
use crate::error::CoreError;
use crate::task::RecipientMap;

struct NameMatcher {
    pattern: Regex,
    recipient_id: String,
}

/// Maps free-text names in a cell to recipient ids.
///
/// Matchers are compiled once and ordered longest name first, so a name that is
/// contained in a longer one ("Ana" inside "Ana María") can only match text the
/// longer name left behind.
pub struct NameResolver {
    matchers: Vec<NameMatcher>,
}

impl NameResolver {
    pub fn new(mapping: &RecipientMap) -> Result<Self, CoreError> {
        let mut names: Vec<(&String, &String)> = mapping.iter().collect();
        names.sort_by(|(a, _), (b, _)| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let mut matchers = Vec::with_capacity(names.len());
        for (name, id) in names {
            let norm = normalize(name.trim());
            if norm.is_empty() {
                tracing::warn!(target: "taskcast.resolver", name = %name, "skipping blank recipient name");
                continue;
            }
            let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&norm))).map_err(|e| {
                CoreError::Config(format!("invalid recipient name {name:?}: {e}"))
            })?;
            matchers.push(NameMatcher {
                pattern,
                recipient_id: id.clone(),
            });
        }

        tracing::debug!(target: "taskcast.resolver", names = matchers.len(), "name resolver ready");
        Ok(Self { matchers })
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn resolve(&self, cell: &str) -> Vec<String> {
        let mut remaining = normalize(cell);
        let mut ids: Vec<String> = Vec::new();

        for matcher in &self.matchers {
            let Some(span) = matcher.pattern.find(&remaining).map(|m| m.range()) else {
                continue;
            };
            remaining.replace_range(span, "");
            if !ids.contains(&matcher.recipient_id) {
                ids.push(matcher.recipient_id.clone());
            }
        }

        ids
    }
}
