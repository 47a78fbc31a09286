use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One step down the element tree: tag name plus a 1-based index among
/// the parent's children carrying the same tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub tag: String,
    pub index: usize,
}

/// A root-relative element path, serialized in the `//p[1]/span[2]` form
/// that annotation stores persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StructuralPath {
    steps: Vec<PathStep>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("malformed path step: {0:?}")]
    MalformedStep(String),
}

impl StructuralPath {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl fmt::Display for StructuralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "//")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}[{}]", step.tag, step.index)?;
        }
        Ok(())
    }
}

impl FromStr for StructuralPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix("//").ok_or(PathError::Empty)?;
        if body.is_empty() {
            return Err(PathError::Empty);
        }

        let mut steps = Vec::new();
        for part in body.split('/') {
            let step = parse_step(part).ok_or_else(|| PathError::MalformedStep(part.to_string()))?;
            steps.push(step);
        }
        Ok(Self { steps })
    }
}

fn parse_step(part: &str) -> Option<PathStep> {
    let open = part.find('[')?;
    let close = part.strip_suffix(']')?;
    let tag = &part[..open];
    let index: usize = close[open + 1..].parse().ok()?;
    if tag.is_empty() || index == 0 || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(PathStep {
        tag: tag.to_string(),
        index,
    })
}

impl From<StructuralPath> for String {
    fn from(path: StructuralPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for StructuralPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(tag: &str, index: usize) -> PathStep {
        PathStep {
            tag: tag.to_string(),
            index,
        }
    }

    #[test]
    fn round_trips_display_and_parse() {
        let path = StructuralPath::new(vec![step("p", 1), step("span", 2)]);
        let text = path.to_string();
        assert_eq!(text, "//p[1]/span[2]");
        assert_eq!(text.parse::<StructuralPath>().unwrap(), path);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<StructuralPath>(), Err(PathError::Empty));
        assert_eq!("//".parse::<StructuralPath>(), Err(PathError::Empty));
        assert!(matches!(
            "//p".parse::<StructuralPath>(),
            Err(PathError::MalformedStep(_))
        ));
        assert!(matches!(
            "//p[0]".parse::<StructuralPath>(),
            Err(PathError::MalformedStep(_))
        ));
        assert!(matches!(
            "//p[x]".parse::<StructuralPath>(),
            Err(PathError::MalformedStep(_))
        ));
    }

    #[test]
    fn serde_uses_string_form() {
        let path = StructuralPath::new(vec![step("div", 3), step("p", 1)]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"//div[3]/p[1]\"");
        let back: StructuralPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
