//! Wheel candidates (places, activities, ...)

use serde::{Deserialize, Serialize};

/// An item that can win a spin.
///
/// The wheel never looks inside `id`; it is handed back to the application
/// with the winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub label: String,
    /// Relative weight (e.g. an activity's like count). Absent counts as 1.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl Candidate {
    /// Unweighted candidate
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight: None,
        }
    }

    /// Candidate with an explicit weight
    pub fn weighted(id: impl Into<String>, label: impl Into<String>, weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Self::new(id, label)
        }
    }

    /// Parse a `LABEL[=WEIGHT]` command-line argument. The label doubles as id.
    pub fn parse_arg(arg: &str) -> Option<Self> {
        match arg.rsplit_once('=') {
            Some((label, weight)) => {
                let weight = weight.trim().parse::<f64>().ok()?;
                let label = label.trim();
                (!label.is_empty()).then(|| Self::weighted(label, label, weight))
            }
            None => {
                let label = arg.trim();
                (!label.is_empty()).then(|| Self::new(label, label))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg() {
        assert_eq!(Candidate::parse_arg("Bowling"), Some(Candidate::new("Bowling", "Bowling")));
        assert_eq!(
            Candidate::parse_arg("Karaoke=3"),
            Some(Candidate::weighted("Karaoke", "Karaoke", 3.0))
        );
        assert_eq!(Candidate::parse_arg("Karaoke=lots"), None);
        assert_eq!(Candidate::parse_arg("=2"), None);
        assert_eq!(Candidate::parse_arg("  "), None);
    }

    #[test]
    fn test_deserialize_without_weight() {
        let c: Candidate = serde_json::from_str(r#"{"id":"p1","label":"Taco Place"}"#).unwrap();
        assert_eq!(c.weight, None);
        let c: Candidate =
            serde_json::from_str(r#"{"id":"a1","label":"Hike","weight":4}"#).unwrap();
        assert_eq!(c.weight, Some(4.0));
    }
}
