//! Attendance Grid Controller
//!
//! One instance per page view. Owns the grid state, translates DOM events
//! into model calls and re-renders the selection, focus and controls from
//! the model afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use attendance_grid::{
    dispatch_batch, quick_update, CellKey, ClickModifiers, FragmentSink, GridConfig, GridLayout,
    GridState, KeyCommand, KeyOutcome, Status,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent};

use crate::commands::QuickUpdateClient;
use crate::components::{BatchControls, TOGGLE_BUTTON_ID};
use crate::dom::{self, PageFragments};
use crate::store::{GridUiState, GridUiStateStoreFields, GridUiStore};

const BODY_BATCH_CLASS: &str = "batch-mode";
const CONTROLS_ID: &str = "batch-controls";

pub struct GridController {
    config: GridConfig,
    layout: GridLayout,
    state: RefCell<GridState>,
    client: QuickUpdateClient,
    ui: GridUiStore,
}

impl GridController {
    /// Wire up the grid on the current page. `None` when the page has no
    /// attendance cells.
    pub fn attach(config: GridConfig) -> Option<Rc<Self>> {
        if dom::query(&config.cell_selector).is_none() {
            return None;
        }
        let layout = dom::scan_layout(&config);
        log::info!("attendance grid: {} cells", layout.len());

        let controller = Rc::new(Self {
            state: RefCell::new(GridState::new(config.after_batch)),
            client: QuickUpdateClient::new(config.clone()),
            ui: GridUiStore::new(GridUiState::default()),
            config,
            layout,
        });
        controller.mount_controls();
        controller.bind_cell_clicks();
        controller.bind_keyboard();
        controller.focus_first();
        Some(controller)
    }

    pub fn toggle_batch_mode(&self) {
        self.state.borrow_mut().toggle_batch_mode();
        self.sync_view();
    }

    pub fn clear_selection(&self) {
        self.state.borrow_mut().selection_mut().clear();
        self.sync_view();
    }

    /// Confirm, then update every selected cell to `status`.
    pub fn batch_update(self: &Rc<Self>, status: Status) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let plan = self.state.borrow().begin_batch(status);
        let plan = match plan {
            Ok(plan) => plan,
            Err(e) => {
                let _ = window.alert_with_message(&e.to_string());
                return;
            }
        };
        if !window.confirm_with_message(&plan.prompt).unwrap_or(false) {
            return;
        }

        let this = Rc::clone(self);
        spawn_local(async move {
            let report = dispatch_batch(&this.client, &plan.keys, plan.status).await;
            let swapped = report.apply(&mut PageFragments { config: &this.config });
            log::info!("batch {status}: {swapped}/{} cells updated", report.total());
            this.state.borrow_mut().finish_batch();
            this.sync_view();
        });
    }

    fn quick_set_status(self: &Rc<Self>, key: CellKey, status: Status) {
        let this = Rc::clone(self);
        spawn_local(async move {
            if let Ok(html) = quick_update(&this.client, &key, status).await {
                if let Err(e) = (PageFragments { config: &this.config }).swap(&key, &html) {
                    log::warn!("could not swap fragment for {key}: {e}");
                }
            }
        });
    }

    /// Push model state out to the store, the cell classes and `<body>`.
    fn sync_view(&self) {
        let state = self.state.borrow();
        self.ui.batch_mode().set(state.batch_mode());
        self.ui.selected_count().set(state.selection().len());
        dom::sync_selection(&self.config, state.selection());
        if let Some(body) = dom::body() {
            dom::set_class(&body, BODY_BATCH_CLASS, state.batch_mode());
        }
    }

    fn focus_first(&self) {
        let Some(first) = self.layout.first().cloned() else {
            return;
        };
        let previous = self.state.borrow_mut().set_focus(first.clone());
        dom::move_focus_marker(&self.config, previous.as_ref(), &first, false);
    }

    fn mount_controls(self: &Rc<Self>) {
        let Some(container) = dom::query(&self.config.controls_container_selector) else {
            return;
        };
        let Some(holder) = dom::document().and_then(|doc| doc.create_element("div").ok()) else {
            return;
        };
        holder.set_id(CONTROLS_ID);
        holder.set_class_name("col-md-12 mt-3");
        if container.append_child(&holder).is_err() {
            return;
        }

        let ui = self.ui;
        let (toggle, clear, action) = (Rc::clone(self), Rc::clone(self), Rc::clone(self));
        leptos::mount::mount_to(holder.unchecked_into::<HtmlElement>(), move || {
            view! {
                <BatchControls
                    ui=ui
                    on_toggle=move || toggle.toggle_batch_mode()
                    on_clear=move || clear.clear_selection()
                    on_action=move |status: Status| action.batch_update(status)
                />
            }
        })
        .forget();
    }

    fn on_cell_click(&self, ev: &MouseEvent) {
        if !self.state.borrow().batch_mode() {
            return;
        }
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some(cell) = dom::closest_cell(&target, &self.config) else {
            return;
        };
        // Keep the badge's own htmx popup from opening in batch mode.
        if target.closest("[hx-get]").ok().flatten().is_some() {
            ev.prevent_default();
            ev.stop_propagation();
        }
        if ev.shift_key() {
            ev.prevent_default();
        }
        let Some(key) = dom::cell_key(&cell) else {
            return;
        };

        let modifiers = ClickModifiers {
            shift: ev.shift_key(),
            toggle: ev.ctrl_key() || ev.meta_key(),
        };
        self.state.borrow_mut().click(&self.layout, &key, modifiers);
        self.sync_view();
    }

    fn on_keydown(self: &Rc<Self>, ev: &KeyboardEvent) {
        let target = ev.target().and_then(|t| t.dyn_into::<Element>().ok());
        let ctx = dom::key_context(target.as_ref(), &self.config);
        let Some(command) = KeyCommand::classify(&ev.key(), ctx) else {
            return;
        };
        if matches!(command, KeyCommand::Navigate(_) | KeyCommand::ToggleBatchMode) {
            ev.prevent_default();
        }

        let outcome = self.state.borrow_mut().handle_key(&self.layout, command);
        match outcome {
            KeyOutcome::None => {}
            KeyOutcome::FocusMoved { from, to } => {
                dom::move_focus_marker(&self.config, from.as_ref(), &to, true);
            }
            KeyOutcome::QuickUpdate { key, status } => {
                ev.prevent_default();
                self.quick_set_status(key, status);
            }
            KeyOutcome::ToggleBatchMode => {
                let button = dom::by_id(TOGGLE_BUTTON_ID)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                if let Some(button) = button {
                    button.click();
                }
            }
            KeyOutcome::ClearTransient => {
                dom::clear_containers(&self.config.transient_container_ids());
            }
        }
    }

    fn bind_cell_clicks(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            this.on_cell_click(&ev);
        });
        if let Some(doc) = dom::document() {
            // Capture phase, so batch-mode clicks are seen before htmx handlers on the badge.
            let _ = doc.add_event_listener_with_callback_and_bool(
                "click",
                on_click.as_ref().unchecked_ref(),
                true,
            );
        }
        on_click.forget();
    }

    fn bind_keyboard(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
            this.on_keydown(&ev);
        });
        if let Some(doc) = dom::document() {
            let _ = doc
                .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
        on_keydown.forget();
    }
}
