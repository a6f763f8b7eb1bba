//! Jerry Mentors Page

use leptos::prelude::*;

use crate::components::{Badge, JerryLayout};
use crate::route::JerryTab;

struct TeachingMoment {
    scenario: &'static str,
    guess: &'static str,
    correction: &'static str,
    lesson: &'static str,
    learned: bool,
}

const TEACHING_MOMENTS: [TeachingMoment; 4] = [
    TeachingMoment {
        scenario: "Conduit Run Estimation",
        guess: "I think this project needs 500ft of EMT conduit based on the floor plan.",
        correction: "No Jerry, we always add 15% for vertical drops and routing around obstacles with this contractor.",
        lesson: "Apply 15% routing factor for complex commercial projects",
        learned: true,
    },
    TeachingMoment {
        scenario: "Labor Column Selection",
        guess: "I'll use the Normal column from NECA since this is a standard office building.",
        correction: "Check the site conditions - they have an occupied floor above. That puts us in Difficult column.",
        lesson: "Occupied building conditions require Difficult labor column",
        learned: true,
    },
    TeachingMoment {
        scenario: "Spec Reading",
        guess: "The lighting schedule shows standard 2x4 LED fixtures.",
        correction: "Look at Division 26 specs - they require 0-10V dimming on all fixtures. That changes our pricing.",
        lesson: "Always cross-reference schedules with Division 26 specifications",
        learned: false,
    },
    TeachingMoment {
        scenario: "Panel Schedule Review",
        guess: "Panel LP-1 has 42 spaces, looks like we need a 225A panel.",
        correction: "Count the actual circuit loads. That panel has 180A demand - we can use a 200A panel and save the client money.",
        lesson: "Calculate actual demand, don't just count spaces",
        learned: false,
    },
];

const TOTAL_CORRECTIONS: u32 = 47;
const LESSONS_LEARNED: u32 = 32;
const SUCCESS_RATE: u32 = 68;

/// Sorted by count, largest first
const CORRECTION_CATEGORIES: [(&str, u32); 4] = [
    ("Labor Factors", 12),
    ("Material Quantities", 9),
    ("Spec Interpretation", 8),
    ("Project Conditions", 6),
];

const TEACHES: [&str; 5] = [
    "Your company's pricing philosophy and client relationships",
    "When to use standard vs. custom labor factors",
    "Reading between the lines on specs and drawings",
    "Contractor-specific adjustments and history",
    "Risk assessment and scope clarifications",
];

const HOW_TAUGHT: [&str; 5] = [
    "Reviews Jerry's work and provides corrections",
    "Explains the reasoning behind estimation decisions",
    "Shares war stories and past project lessons",
    "Voices commands and feedback naturally",
    "Validates Jerry's assumptions before bid submission",
];

const LEARNING_CYCLE: [(&str, &str, &str); 4] = [
    ("🤖", "Jerry Attempts", "Jerry takes a first pass at the estimate"),
    ("👨‍🏫", "Mentor Reviews", "The mentor checks the work and corrects mistakes"),
    ("📝", "Feedback Captured", "Every correction is stored as a lesson"),
    ("📈", "Jerry Improves", "The next attempt starts from what was learned"),
];

const FUTURE_MENTORS: [(&str, &str, &str); 3] = [
    ("👷", "Field Supervisors", "Real-world feedback on estimate accuracy vs. actual installation"),
    ("📋", "Project Managers", "Scope clarification and client communication patterns"),
    ("💰", "Cost Analysts", "Post-project profitability review and pricing adjustments"),
];

/// Bar width relative to the largest category
fn category_width(count: u32, top: u32) -> f64 {
    if top == 0 {
        0.0
    } else {
        f64::from(count) / f64::from(top) * 100.0
    }
}

#[component]
pub fn JerryMentorsPage() -> impl IntoView {
    let top = CORRECTION_CATEGORIES.iter().map(|(_, count)| *count).max().unwrap_or(0);

    view! {
        <JerryLayout active=JerryTab::Mentors>
            <div class="bg-purple-50 border border-purple-200 rounded-lg p-4 mb-6">
                <p class="text-purple-800">
                    <strong>"Jerry's Mentors: "</strong>
                    "Jerry learns through daily interaction with your team. Every correction becomes a lesson. Every mistake becomes an opportunity to improve."
                </p>
            </div>

            <div class="bg-white rounded-lg shadow-md overflow-hidden mb-8">
                <div class="bg-gradient-to-r from-purple-600 to-blue-600 p-6 text-white">
                    <div class="flex items-center gap-6">
                        <div class="w-24 h-24 bg-white/20 rounded-full flex items-center justify-center text-5xl">"👨‍🏫"</div>
                        <div>
                            <h2 class="text-2xl font-bold">"The Project Sponsor"</h2>
                            <p class="text-purple-100 text-lg">"VP Operations - Jerry's Primary Mentor"</p>
                            <p class="text-purple-200 text-sm mt-2">
                                "20+ years of electrical estimation experience, working with Jerry daily"
                            </p>
                        </div>
                    </div>
                </div>
                <div class="p-6 grid md:grid-cols-2 gap-6">
                    <div>
                        <h3 class="font-semibold text-gray-900 mb-3">"What the Mentor Teaches Jerry"</h3>
                        <ul class="space-y-2 text-gray-600">
                            {TEACHES.iter().map(|t| view! { <li><span class="text-purple-500">"• "</span>{*t}</li> }).collect_view()}
                        </ul>
                    </div>
                    <div>
                        <h3 class="font-semibold text-gray-900 mb-3">"How the Mentor Teaches"</h3>
                        <ul class="space-y-2 text-gray-600">
                            {HOW_TAUGHT.iter().map(|t| view! { <li><span class="text-green-500">"✓ "</span>{*t}</li> }).collect_view()}
                        </ul>
                    </div>
                </div>
            </div>

            <div class="bg-gradient-to-r from-amber-50 to-orange-50 border border-amber-200 rounded-lg p-6 mb-8">
                <h2 class="text-xl font-bold text-amber-900 mb-2">"How Jerry Learns: Teaching Moments"</h2>
                <p class="text-amber-800 mb-6">
                    "Every time Jerry makes a mistake, the mentor corrects him and Jerry remembers."
                </p>
                <div class="space-y-4">
                    {TEACHING_MOMENTS
                        .iter()
                        .map(|m| {
                            let (class, text) = if m.learned {
                                ("bg-green-100 text-green-800", "✓ Learned")
                            } else {
                                ("bg-blue-100 text-blue-800", "📚 Learning")
                            };
                            view! {
                                <div class="bg-white rounded-lg p-4 shadow-sm">
                                    <div class="flex items-center justify-between mb-3">
                                        <h3 class="font-semibold text-gray-900">{m.scenario}</h3>
                                        <Badge class=class text=text />
                                    </div>
                                    <div class="grid md:grid-cols-3 gap-3 text-sm">
                                        <div class="bg-red-50 rounded p-3">
                                            <div class="font-semibold text-red-900 mb-1">"Jerry's Initial Guess"</div>
                                            <p class="text-red-800">{m.guess}</p>
                                        </div>
                                        <div class="bg-blue-50 rounded p-3">
                                            <div class="font-semibold text-blue-900 mb-1">"Mentor's Correction"</div>
                                            <p class="text-blue-800">{m.correction}</p>
                                        </div>
                                        <div class="bg-green-50 rounded p-3">
                                            <div class="font-semibold text-green-900 mb-1">"Lesson Captured"</div>
                                            <p class="text-green-800">{m.lesson}</p>
                                        </div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="bg-white rounded-lg shadow-md p-6 mb-8">
                <h2 class="text-xl font-bold text-gray-900 mb-6">"Learning Progress"</h2>
                <div class="grid grid-cols-3 gap-4 mb-6">
                    <div class="text-center">
                        <div class="text-3xl font-bold text-purple-600">{TOTAL_CORRECTIONS}</div>
                        <div class="text-sm text-gray-600">"Total Corrections"</div>
                    </div>
                    <div class="text-center">
                        <div class="text-3xl font-bold text-green-600">{LESSONS_LEARNED}</div>
                        <div class="text-sm text-gray-600">"Lessons Learned"</div>
                    </div>
                    <div class="text-center">
                        <div class="text-3xl font-bold text-blue-600">{format!("{}%", SUCCESS_RATE)}</div>
                        <div class="text-sm text-gray-600">"First-Try Success Rate"</div>
                    </div>
                </div>
                <h3 class="font-semibold text-gray-900 mb-3">"Top Correction Categories"</h3>
                <div class="space-y-3">
                    {CORRECTION_CATEGORIES
                        .iter()
                        .map(|(name, count)| {
                            let width = category_width(*count, top);
                            view! {
                                <div>
                                    <div class="flex justify-between text-sm text-gray-700 mb-1">
                                        <span>{*name}</span>
                                        <span>{format!("{} corrections", count)}</span>
                                    </div>
                                    <div class="w-full bg-gray-200 rounded-full h-2">
                                        <div class="bg-purple-500 h-2 rounded-full" style=format!("width: {:.0}%", width)></div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="bg-white rounded-lg shadow-md p-6 mb-8">
                <h2 class="text-xl font-bold text-gray-900 mb-4">"The Continuous Learning Cycle"</h2>
                <div class="grid md:grid-cols-4 gap-4">
                    {LEARNING_CYCLE
                        .iter()
                        .map(|(icon, title, text)| view! {
                            <div class="text-center p-4 bg-gray-50 rounded-lg">
                                <div class="text-3xl mb-2">{*icon}</div>
                                <h3 class="font-semibold text-gray-900">{*title}</h3>
                                <p class="text-xs text-gray-600 mt-1">{*text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="bg-white rounded-lg shadow-md p-6 mb-8">
                <h2 class="text-xl font-bold text-gray-900 mb-4">"Expanding the Mentor Network"</h2>
                <div class="grid md:grid-cols-3 gap-4">
                    {FUTURE_MENTORS
                        .iter()
                        .map(|(icon, title, text)| view! {
                            <div class="border border-dashed border-gray-300 rounded-lg p-4">
                                <div class="text-2xl mb-2">{*icon}</div>
                                <h3 class="font-semibold text-gray-900">{*title}</h3>
                                <p class="text-sm text-gray-600 mt-1">{*text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        </JerryLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_width_is_relative_to_top() {
        assert_eq!(category_width(12, 12), 100.0);
        assert_eq!(category_width(6, 12), 50.0);
        assert_eq!(category_width(3, 0), 0.0);
    }

    #[test]
    fn test_learned_split() {
        let learned = TEACHING_MOMENTS.iter().filter(|m| m.learned).count();
        assert_eq!(learned, 2);
    }
}
