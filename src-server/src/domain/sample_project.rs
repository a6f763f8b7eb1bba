//! Sample Project Entity
//!
//! A real estimation project kept as training data, grouped by how the
//! work was delivered.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::entity::{DomainError, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    Data,
    DesignBuild,
    PlanSpecBid,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 3] = [DeliveryMethod::Data, DeliveryMethod::DesignBuild, DeliveryMethod::PlanSpecBid];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Data => "DATA",
            DeliveryMethod::DesignBuild => "DESIGN_BUILD",
            DeliveryMethod::PlanSpecBid => "PLAN_SPEC_BID",
        }
    }
}

impl FromStr for DeliveryMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DATA" => Ok(DeliveryMethod::Data),
            "DESIGN_BUILD" => Ok(DeliveryMethod::DesignBuild),
            "PLAN_SPEC_BID" => Ok(DeliveryMethod::PlanSpecBid),
            other => Err(DomainError::InvalidInput(format!("unknown delivery method '{}'", other))),
        }
    }
}

/// Files in the project archive by kind. `total` covers every kind,
/// including ones without their own field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentCounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdfs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excel: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cad: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<u32>,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFile {
    pub name: String,
    #[serde(default)]
    pub size_mb: Option<f64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleProject {
    pub id: u32,
    pub name: String,
    pub delivery_method: DeliveryMethod,
    #[serde(rename = "type")]
    pub project_type: String,
    #[serde(default)]
    pub location: Option<String>,
    pub size_mb: f64,
    #[serde(default)]
    pub size_sf: Option<u32>,
    pub description: String,
    pub ai_value: String,
    pub document_counts: DocumentCounts,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub key_files: Option<Vec<KeyFile>>,
    /// Free-form figures; values may be numbers, text or lists.
    #[serde(default)]
    pub metrics: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Entity for SampleProject {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Body of `GET /api/sample-projects/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total_projects: usize,
    pub total_documents: u64,
    pub total_size_mb: f64,
    /// Rounded to two decimals
    pub total_size_gb: f64,
    pub delivery_methods: BTreeMap<DeliveryMethod, usize>,
}

impl ProjectStats {
    pub fn from_projects(projects: &[SampleProject]) -> Self {
        let total_size_mb: f64 = projects.iter().map(|p| p.size_mb).sum();
        let mut delivery_methods = BTreeMap::new();
        for project in projects {
            *delivery_methods.entry(project.delivery_method).or_insert(0) += 1;
        }
        ProjectStats {
            total_projects: projects.len(),
            total_documents: projects.iter().map(|p| u64::from(p.document_counts.total)).sum(),
            total_size_mb,
            total_size_gb: (total_size_mb / 1024.0 * 100.0).round() / 100.0,
            delivery_methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(method: DeliveryMethod, size_mb: f64, docs: u32) -> SampleProject {
        SampleProject {
            id: 0,
            name: "Clinic Renovation".to_string(),
            delivery_method: method,
            project_type: "Healthcare".to_string(),
            location: None,
            size_mb,
            size_sf: None,
            description: String::new(),
            ai_value: String::new(),
            document_counts: DocumentCounts { pdfs: Some(docs), total: docs, ..Default::default() },
            key_features: vec![],
            highlights: vec![],
            key_files: None,
            metrics: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_delivery_method_wire_names() {
        for method in DeliveryMethod::ALL {
            assert_eq!(method.as_str().parse::<DeliveryMethod>().unwrap(), method);
            assert_eq!(serde_json::to_value(method).unwrap(), method.as_str());
        }
        assert!("design_build".parse::<DeliveryMethod>().is_err());
    }

    #[test]
    fn test_stats_totals() {
        let projects = [
            project(DeliveryMethod::Data, 1024.0, 10),
            project(DeliveryMethod::Data, 512.0, 5),
            project(DeliveryMethod::PlanSpecBid, 100.0, 1),
        ];
        let stats = ProjectStats::from_projects(&projects);

        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.total_documents, 16);
        assert_eq!(stats.total_size_mb, 1636.0);
        assert_eq!(stats.total_size_gb, 1.6);
        assert_eq!(stats.delivery_methods.get(&DeliveryMethod::Data), Some(&2));
        assert_eq!(stats.delivery_methods.get(&DeliveryMethod::DesignBuild), None);
    }

    #[test]
    fn test_stats_of_nothing() {
        let stats = ProjectStats::from_projects(&[]);
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.total_size_gb, 0.0);
        assert!(stats.delivery_methods.is_empty());
    }

    #[test]
    fn test_counts_omit_missing_kinds() {
        let counts = DocumentCounts { cad: Some(4), total: 9, ..Default::default() };
        assert_eq!(serde_json::to_value(&counts).unwrap(), serde_json::json!({"cad": 4, "total": 9}));
    }
}
