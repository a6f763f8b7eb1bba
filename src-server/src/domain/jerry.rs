//! Jerry Status
//!
//! Static description of the Jerry assistant: capabilities, code
//! repositories, deployed services, headline numbers and the current
//! phase. Served read-only by `GET /api/jerry`.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JerryStatus {
    pub name: &'static str,
    pub tagline: &'static str,
    pub last_updated: String,
    pub capabilities: Vec<Capability>,
    pub repositories: Vec<Repository>,
    pub infrastructure: Vec<Service>,
    pub metrics: JerryMetrics,
    pub phase: Phase,
}

#[derive(Debug, Clone, Serialize)]
pub struct Capability {
    pub name: &'static str,
    /// `live` or `ready`
    pub status: &'static str,
    pub description: &'static str,
    pub details: Vec<&'static str>,
    pub achievement: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: &'static str,
    pub description: &'static str,
    pub status: &'static str,
    pub last_updated: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub name: &'static str,
    pub detail: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JerryMetrics {
    pub symbol_accuracy: f64,
    pub estimates_loaded: u32,
    pub total_bid_value: u64,
    pub symbol_types: u32,
    pub time_savings_per_week: f64,
    pub annual_value: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub current: &'static str,
    pub status: &'static str,
    pub start_date: &'static str,
    pub description: &'static str,
    pub next_milestones: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Roadmap {
    pub now: RoadmapStage,
    pub next: RoadmapStage,
    pub future: RoadmapStage,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapStage {
    pub status: &'static str,
    pub target: Option<&'static str>,
    pub capabilities: Vec<&'static str>,
}

pub const HEADLINE_METRICS: JerryMetrics = JerryMetrics {
    symbol_accuracy: 99.1,
    estimates_loaded: 28,
    total_bid_value: 71_900_000,
    symbol_types: 124,
    time_savings_per_week: 24.5,
    annual_value: 63_000,
};

impl JerryStatus {
    pub fn current() -> Self {
        Self {
            name: "Jerry",
            tagline: "Your AI Apprentice",
            last_updated: chrono::Utc::now().to_rfc3339(),
            capabilities: capabilities(),
            repositories: repositories(),
            infrastructure: vec![
                Service { name: "Frontend", detail: "web portal", status: "live" },
                Service { name: "Backend", detail: "portal API", status: "live" },
                Service { name: "Jerry Assistant", detail: "port 8001", status: "live" },
                Service { name: "TTS Voice", detail: "port 8002", status: "live" },
                Service { name: "Symbol Detection", detail: "99.1% accuracy", status: "live" },
            ],
            metrics: HEADLINE_METRICS,
            phase: Phase {
                current: "Training Phase",
                status: "Starting",
                start_date: "2026-01-13",
                description: "Foundation complete. Now training Jerry on domain-specific estimation.",
                next_milestones: vec![
                    "Conduit run calculations",
                    "Email triage automation",
                    "Domain pricing methods training",
                ],
            },
        }
    }
}

fn capabilities() -> Vec<Capability> {
    vec![
        Capability {
            name: "Eyes (Vision)",
            status: "live",
            description: "See and understand electrical drawings",
            details: vec![
                "Symbol detection pipeline with 99.1% accuracy",
                "124 electrical symbol types recognized",
                "Vector PDF extraction",
                "Legend parsing (E-001 sheets)",
                "Pattern-based matching with confidence scores",
            ],
            achievement: "Started at 75%, now at 99.1% accuracy",
        },
        Capability {
            name: "Voice (Communication)",
            status: "live",
            description: "Speak responses with natural voice",
            details: vec![
                "TTS on dedicated GPU",
                "Professional, clear voice profile",
                "24kHz sample rate",
                "15 cached acknowledgment phrases",
            ],
            achievement: "Natural-sounding voice responses",
        },
        Capability {
            name: "Ears (Listening)",
            status: "live",
            description: "Listen to voice commands",
            details: vec![
                "Desktop push-to-talk",
                "Local transcription (~2.8s)",
                "Audio never leaves the workstation",
            ],
            achievement: "Fast, private speech recognition",
        },
        Capability {
            name: "Memory (Knowledge)",
            status: "live",
            description: "Remember every estimate and project",
            details: vec![
                "28 real estimates totaling $71.9M",
                "Vector store for semantic search",
                "Project fuzzy matching",
                "Historical pricing patterns",
            ],
            achievement: "Instant recall of any past project",
        },
        Capability {
            name: "Hands (Actions)",
            status: "live",
            description: "Take actions on the workstation",
            details: vec![
                "Open folders and files",
                "Create new project directories",
                "Desktop notifications",
            ],
            achievement: "Direct workstation integration",
        },
        Capability {
            name: "Learning (Growth)",
            status: "ready",
            description: "Learn from every interaction",
            details: vec![
                "Correction capture and feedback loop",
                "SFT and DPO training ready",
                "Tiered adapters (industry, company, user)",
            ],
            achievement: "Entering training phase January 2026",
        },
    ]
}

fn repositories() -> Vec<Repository> {
    let repo = |name, description, status, last_updated| Repository { name, description, status, last_updated };
    vec![
        repo("portal-platform-frontend", "Web application", "production", "2026-01-11"),
        repo("portal-platform-backend", "Backend services", "production", "2026-01-11"),
        repo("portal-jerry-assistant", "Jerry's brain (RAG)", "production", "2026-01-11"),
        repo("portal-jerry-tools", "Vision + TTS services", "production", "2026-01-11"),
        repo("portal-jerry-training", "ML training (SFT/DPO/LoRA)", "ready", "2026-01-08"),
        repo("portal-jerry-estimator", "Estimate workbook parser", "ready", "2026-01-08"),
        repo("portal-desktop-agent", "Desktop voice assistant", "production", "2026-01-08"),
        repo("portal-docs", "Documentation & PRDs", "active", "2026-01-08"),
    ]
}

impl Roadmap {
    pub fn current() -> Self {
        Self {
            now: RoadmapStage {
                status: "Complete",
                target: None,
                capabilities: vec![
                    "See drawings at 99.1% accuracy",
                    "Remember 28 estimates ($71.9M)",
                    "Talk to team via voice",
                    "Take actions on workstation",
                ],
            },
            next: RoadmapStage {
                status: "In Progress",
                target: Some("Q1 2026"),
                capabilities: vec![
                    "Calculate conduit runs",
                    "Compare bid vs construction sets",
                    "Learn domain pricing methods",
                    "Email triage automation",
                ],
            },
            future: RoadmapStage {
                status: "Planned",
                target: Some("Q2-Q4 2026"),
                capabilities: vec![
                    "Predict project profitability",
                    "Flag risky bids",
                    "Draft proposals",
                ],
            },
        }
    }
}
