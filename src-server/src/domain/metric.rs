//! Metric Entity
//!
//! A tracked success measure with a current value and a target.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: u32,
    pub name: String,
    pub current: f64,
    pub target: f64,
    /// `percent`, `count`, `hours`, ...
    pub unit: String,
    #[serde(default)]
    pub notes: String,
    pub updated_at: Option<String>,
}

impl Entity for Metric {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Body of `POST /api/metrics/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct MetricRecord {
    /// Informational; the path id is authoritative.
    #[serde(default)]
    pub metric_id: Option<u32>,
    pub value: f64,
    #[serde(default)]
    pub notes: String,
    pub expected_updated_at: Option<String>,
}

impl MetricRecord {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.value.is_finite() {
            return Err(DomainError::InvalidInput("value must be a finite number".to_string()));
        }
        Ok(())
    }
}

impl Metric {
    pub fn record(&mut self, record: &MetricRecord) {
        self.current = record.value;
        if !record.notes.is_empty() {
            self.notes = record.notes.clone();
        }
    }
}

/// Key used in the metrics listing: spaces and hyphens removed, first
/// letter lowered. Nameless metrics fall back to their id.
pub fn metric_key(metric: &Metric) -> String {
    let squashed: String = metric.name.chars().filter(|c| *c != ' ' && *c != '-').collect();
    let mut chars = squashed.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => metric.id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(id: u32, name: &str) -> Metric {
        Metric {
            id,
            name: name.to_string(),
            current: 0.0,
            target: 100.0,
            unit: "percent".to_string(),
            notes: String::new(),
            updated_at: None,
        }
    }

    #[test]
    fn test_metric_key() {
        assert_eq!(metric_key(&metric(1, "Overall Project Completion")), "overallProjectCompletion");
        assert_eq!(metric_key(&metric(2, "Drawing Parsing Accuracy")), "drawingParsingAccuracy");
        assert_eq!(metric_key(&metric(3, "Time-Reduction")), "timeReduction");
        assert_eq!(metric_key(&metric(7, "")), "7");
    }

    #[test]
    fn test_record_keeps_notes_when_blank() {
        let mut m = metric(1, "Projects Processed");
        m.notes = "baseline".to_string();
        m.record(&MetricRecord { metric_id: None, value: 12.0, notes: String::new(), expected_updated_at: None });
        assert_eq!(m.current, 12.0);
        assert_eq!(m.notes, "baseline");
    }
}
