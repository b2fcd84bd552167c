//! Split-pane workspace: chat on the left, document on the right.
//!
//! The divider is dragged with pointer capture so the drag keeps tracking
//! even when the pointer leaves the thin handle. Widths are percentages of
//! the container, clamped by `LayoutState`.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast as _;

use crate::components::chat_panel::ChatPanel;
use crate::components::document_viewer::DocumentViewer;
use crate::components::header::Header;
use crate::state::layout::LayoutState;

/// Body-level drag affordances: resize cursor, no accidental text selection.
#[cfg(feature = "hydrate")]
fn set_body_resizing(active: bool) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let style = body.style();
    if active {
        let _ = style.set_property("cursor", "col-resize");
        let _ = style.set_property("user-select", "none");
    } else {
        let _ = style.remove_property("cursor");
        let _ = style.remove_property("user-select");
    }
}

#[component]
pub fn WorkspacePage() -> impl IntoView {
    let layout = expect_context::<RwSignal<LayoutState>>();
    let container_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let resizing = layout.with(|l| l.resizing);
        #[cfg(feature = "hydrate")]
        set_body_resizing(resizing);
        #[cfg(not(feature = "hydrate"))]
        let _ = resizing;
    });

    on_cleanup(move || {
        #[cfg(feature = "hydrate")]
        set_body_resizing(false);
    });

    let on_divider_pointer_down = move |ev: leptos::ev::PointerEvent| {
        ev.prevent_default();
        layout.update(LayoutState::start_resize);
        #[cfg(feature = "hydrate")]
        {
            if let Some(target) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(ev.pointer_id());
            }
        }
    };

    let on_pointer_move = move |ev: leptos::ev::PointerEvent| {
        if !layout.with_untracked(|l| l.resizing) {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let Some(container) = container_ref.get_untracked() else {
                return;
            };
            let rect = container.get_bounding_client_rect();
            let mut next = layout.get_untracked();
            if next.drag_to(f64::from(ev.client_x()), rect.left(), rect.width()) {
                layout.set(next);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_pointer_up = move |_ev: leptos::ev::PointerEvent| {
        if layout.with_untracked(|l| l.resizing) {
            layout.update(LayoutState::stop_resize);
        }
    };

    view! {
        <main class="workspace">
            <Header/>
            <div
                class="workspace__split"
                node_ref=container_ref
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointercancel=on_pointer_up
            >
                <div class="workspace__chat" style=move || layout.with(LayoutState::left_style)>
                    <ChatPanel/>
                </div>
                <div
                    class="workspace__divider"
                    class:workspace__divider--active=move || layout.with(|l| l.resizing)
                    role="separator"
                    aria-orientation="vertical"
                    on:pointerdown=on_divider_pointer_down
                >
                    <div class="workspace__divider-grip"></div>
                </div>
                <div class="workspace__document">
                    <DocumentViewer/>
                </div>
            </div>
        </main>
    }
}
