//! Research Page
//!
//! Lists the research documents and opens one at a time in a viewer.
//! Markdown documents are rendered; transcripts are shown as plain text.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Loading, PageHeader};
use crate::console;
use crate::markdown::render_markdown;
use crate::models::ResearchDocument;
use crate::sequence::RequestSequencer;

struct ResearchEntry {
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    summary: &'static str,
}

const DOCUMENTS: [ResearchEntry; 4] = [
    ResearchEntry {
        id: "togal-readme",
        title: "Togal.AI - README",
        icon: "🚀",
        summary: "Overview of the Togal.AI competitive research and how the findings are organized.",
    },
    ResearchEntry {
        id: "togal-initial-research",
        title: "Togal.AI - Initial Research",
        icon: "🔍",
        summary: "AI-powered construction takeoff software: speed claims, pricing and the AI automation workflow.",
    },
    ResearchEntry {
        id: "patrick-murphy-analysis",
        title: "Patrick Murphy CEO Interview Analysis",
        icon: "💡",
        summary: "Key takeaways from the CEO interview on product direction and market positioning.",
    },
    ResearchEntry {
        id: "patrick-murphy-transcript",
        title: "Patrick Murphy CEO Interview Transcript",
        icon: "📄",
        summary: "Full transcript of the interview.",
    },
];

const LOAD_FAILED: &str = "# Error\n\nFailed to load content. Please try again.";

/// What the viewer shows for a loaded document
#[derive(Debug, Clone, PartialEq)]
enum DocumentBody {
    Markdown(String),
    Plain(String),
}

impl DocumentBody {
    fn from_document(doc: ResearchDocument) -> Self {
        if doc.filename.ends_with(".txt") {
            DocumentBody::Plain(doc.content)
        } else {
            DocumentBody::Markdown(render_markdown(&doc.content))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Viewer {
    Closed,
    Loading(&'static str),
    Open(&'static str, DocumentBody),
}

#[component]
pub fn ResearchPage() -> impl IntoView {
    let (viewer, set_viewer) = signal(Viewer::Closed);
    let sequencer = RequestSequencer::new();
    let open_sequencer = sequencer.clone();

    let open = move |id: &'static str, title: &'static str| {
        set_viewer.set(Viewer::Loading(title));
        let ticket = open_sequencer.next();
        spawn_local(async move {
            let body = match api::client().research_document(id).await {
                Ok(doc) => DocumentBody::from_document(doc),
                Err(e) => {
                    console::error(&format!("[Research] Failed to load {}: {}", id, e));
                    DocumentBody::Markdown(render_markdown(LOAD_FAILED))
                }
            };
            if ticket.is_current() {
                set_viewer.set(Viewer::Open(title, body));
            }
        });
    };

    let close = move |_: leptos::ev::MouseEvent| {
        // Invalidate any load still in flight
        let _ = sequencer.next();
        set_viewer.set(Viewer::Closed);
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <PageHeader title="Research" subtitle="Competitive research and interview notes" />

            <div class="grid gap-6 md:grid-cols-2">
                {DOCUMENTS
                    .iter()
                    .map(|doc| {
                        let (id, title) = (doc.id, doc.title);
                        let open = open.clone();
                        view! {
                            <div class="bg-white rounded-lg shadow p-6 flex flex-col">
                                <div class="flex items-center gap-3 mb-3">
                                    <span class="text-3xl">{doc.icon}</span>
                                    <h2 class="text-lg font-semibold text-gray-900">{doc.title}</h2>
                                </div>
                                <p class="text-gray-600 text-sm flex-1">{doc.summary}</p>
                                <button
                                    class="mt-4 self-start px-4 py-2 bg-blue-600 text-white text-sm font-medium rounded-lg hover:bg-blue-700"
                                    on:click=move |_| open(id, title)
                                >
                                    "📖 Read Document"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            {move || {
                let close = close.clone();
                let (title, body) = match viewer.get() {
                    Viewer::Closed => return ().into_any(),
                    Viewer::Loading(title) => (title, None),
                    Viewer::Open(title, body) => (title, Some(body)),
                };
                view! {
                    <div class="fixed inset-0 bg-black/50 flex items-center justify-center p-4 z-50">
                        <div class="bg-white rounded-lg shadow-xl max-w-4xl w-full max-h-[90vh] flex flex-col">
                            <div class="flex items-center justify-between p-6 border-b">
                                <h2 class="text-2xl font-bold text-gray-900">{title}</h2>
                                <button class="text-gray-500 hover:text-gray-700 text-2xl" on:click=close>"×"</button>
                            </div>
                            <div class="p-6 overflow-y-auto">
                                {match body {
                                    None => view! { <Loading message="Loading content..." /> }.into_any(),
                                    Some(DocumentBody::Plain(text)) => view! {
                                        <pre class="whitespace-pre-wrap text-sm text-gray-800 font-mono">{text}</pre>
                                    }
                                    .into_any(),
                                    Some(DocumentBody::Markdown(html)) => view! {
                                        <div class="prose prose-slate max-w-none" inner_html=html></div>
                                    }
                                    .into_any(),
                                }}
                            </div>
                        </div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_is_plain_text() {
        let doc = ResearchDocument {
            content: "Q: <hello>".to_string(),
            filename: "patrick-murphy-transcript.txt".to_string(),
        };
        assert_eq!(DocumentBody::from_document(doc), DocumentBody::Plain("Q: <hello>".to_string()));
    }

    #[test]
    fn test_markdown_is_rendered() {
        let doc = ResearchDocument {
            content: "# Findings".to_string(),
            filename: "README.md".to_string(),
        };
        match DocumentBody::from_document(doc) {
            DocumentBody::Markdown(html) => assert!(html.contains("<h1>Findings</h1>")),
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_document_ids_are_unique() {
        let mut ids: Vec<&str> = DOCUMENTS.iter().map(|d| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DOCUMENTS.len());
    }
}
