//! Source cards listed under assistant answers.

#[cfg(test)]
#[path = "citation_card_test.rs"]
mod citation_card_test;

use leptos::prelude::*;

use crate::net::types::Citation;
use crate::state::document::DocumentState;

/// Similarity score as a whole percentage, clamped to `0..=100`.
fn match_percent(score: f64) -> u32 {
    if !score.is_finite() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = (score * 100.0).round().clamp(0.0, 100.0) as u32;
    pct
}

/// First six characters of a matter id, enough to tell matters apart.
fn short_matter_id(matter_id: &str) -> String {
    let short: String = matter_id.chars().take(6).collect();
    format!("{short}...")
}

/// "Sources Referenced" block; renders nothing when there are no citations.
#[component]
pub fn CitationList(citations: Vec<Citation>) -> impl IntoView {
    (!citations.is_empty()).then(|| {
        view! {
            <div class="citations">
                <p class="citations__heading">"Sources Referenced:"</p>
                <div class="citations__grid">
                    {citations
                        .into_iter()
                        .map(|citation| view! { <CitationCard citation=citation/> })
                        .collect_view()}
                </div>
            </div>
        }
    })
}

/// One clickable source; opens the cited chunk in the document viewer.
#[component]
pub fn CitationCard(citation: Citation) -> impl IntoView {
    let docs = expect_context::<RwSignal<DocumentState>>();

    let match_label = format!("Match: {}%", match_percent(citation.score));
    let snippet = format!("\"...{}...\"", citation.text_snippet);
    let matter = format!("Matter ID: {}", short_matter_id(&citation.matter_id));
    let sensitivity = citation.sensitivity.to_uppercase();
    let filename = format!("📄 {}", citation.filename);
    let title = format!("Open {} (chunk {})", citation.filename, citation.chunk_index);

    let on_open = move |_| docs.update(|d| d.open_citation(&citation));

    view! {
        <div class="citation-card" title=title on:click=on_open>
            <div class="citation-card__top">
                <span class="citation-card__file">{filename}</span>
                <span class="citation-card__score">{match_label}</span>
            </div>
            <p class="citation-card__snippet">{snippet}</p>
            <div class="citation-card__meta">
                <span class="citation-card__matter">{matter}</span>
                <span class="citation-card__sensitivity">{sensitivity}</span>
            </div>
        </div>
    }
}
