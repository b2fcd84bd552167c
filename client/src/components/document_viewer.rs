//! Read-only document pane on the right side of the workspace.

use leptos::prelude::*;

use crate::net::types::DocumentData;
use crate::state::document::{DocumentState, paragraphs};

/// Shows the open document as a paper sheet, or an empty-state notice.
#[component]
pub fn DocumentViewer() -> impl IntoView {
    let docs = expect_context::<RwSignal<DocumentState>>();

    move || match docs.get().open {
        None => view! {
            <div class="document-viewer document-viewer--empty">
                <p class="document-viewer__placeholder">"No file opened yet"</p>
            </div>
        }
        .into_any(),
        Some(doc) => view! { <DocumentSheet doc=doc/> }.into_any(),
    }
}

#[component]
fn DocumentSheet(doc: DocumentData) -> impl IntoView {
    let docs = expect_context::<RwSignal<DocumentState>>();
    let body = paragraphs(&doc.content);
    let date = doc.date.map(|date| view! { <div class="document-sheet__date">{format!("DATE: {date}")}</div> });

    let mut meta = Vec::new();
    if let Some(matter_id) = doc.matter_id {
        meta.push(format!("MATTER: {matter_id}"));
    }
    if let Some(chunk) = doc.chunk_index {
        meta.push(format!("CHUNK: {chunk}"));
    }
    if let Some(sensitivity) = doc.sensitivity {
        meta.push(sensitivity.to_uppercase());
    }

    view! {
        <div class="document-viewer">
            <article class="document-sheet">
                <header class="document-sheet__header">
                    <button
                        class="document-sheet__close"
                        title="Close document"
                        aria-label="Close document"
                        on:click=move |_| docs.update(DocumentState::close)
                    >
                        "✕"
                    </button>
                    <h1 class="document-sheet__title">{doc.title}</h1>
                    {date}
                    {(!meta.is_empty()).then(|| view! { <div class="document-sheet__meta">{meta.join(" · ")}</div> })}
                </header>
                <div class="document-sheet__body">
                    {body.into_iter().map(|p| view! { <p>{p}</p> }).collect_view()}
                </div>
            </article>
        </div>
    }
}
