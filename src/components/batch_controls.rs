//! Batch Controls Component
//!
//! Batch-mode toggle, one "Mark ..." button per status and the
//! clear-selection button with the live selected count.

use attendance_grid::Status;
use leptos::prelude::*;

use crate::store::{GridUiStateStoreFields, GridUiStore};

/// Id of the batch-mode toggle; the Space shortcut clicks it.
pub const TOGGLE_BUTTON_ID: &str = "toggle-batch-mode";

/// Batch-mode controls
///
/// # Arguments
/// * `ui` - store mirrored from the grid controller
/// * `on_toggle` - enter/leave batch mode
/// * `on_clear` - drop the current selection
/// * `on_action` - mark the selection with a status
#[component]
pub fn BatchControls<T, C, A>(
    ui: GridUiStore,
    on_toggle: T,
    on_clear: C,
    on_action: A,
) -> impl IntoView
where
    T: Fn() + 'static,
    C: Fn() + 'static,
    A: Fn(Status) + Clone + 'static,
{
    let batch_mode = move || ui.batch_mode().get();

    let action_buttons = Status::ALL
        .into_iter()
        .map(|status| {
            let on_action = on_action.clone();
            view! {
                <button
                    type="button"
                    class=format!("btn {} batch-action", status.button_class())
                    data-status=status.code()
                    on:click=move |_| on_action(status)
                >
                    {format!("Mark {}", status.label())}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="d-flex align-items-center gap-2">
            <button
                type="button"
                id=TOGGLE_BUTTON_ID
                class="btn btn-sm btn-outline-secondary"
                class:active=batch_mode
                on:click=move |_| on_toggle()
            >
                <i class=move || {
                    if batch_mode() { "bi bi-x-square" } else { "bi bi-check2-square" }
                }></i>
                {move || if batch_mode() { " Exit Batch Mode" } else { " Batch Mode" }}
            </button>
            <div id="batch-actions" class=move || if batch_mode() { "" } else { "d-none" }>
                <div class="btn-group btn-group-sm" role="group">
                    {action_buttons}
                </div>
                <button
                    type="button"
                    id="clear-selection"
                    class="btn btn-sm btn-outline-secondary ms-2"
                    on:click=move |_| on_clear()
                >
                    "Clear ("
                    <span id="selected-count">{move || ui.selected_count().get()}</span>
                    ")"
                </button>
            </div>
        </div>
    }
}
