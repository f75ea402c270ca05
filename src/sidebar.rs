//! Sidebar Navigation
//!
//! Desktop collapse/expand with the state kept in localStorage, the mobile
//! slide-over menu, and chevron state for collapsible sidebar sections.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, Node, Storage};

use crate::dom;

const STORAGE_KEY: &str = "sidebarCollapsed";
const MOBILE_BREAKPOINT_PX: f64 = 768.0;
const TOGGLED_CLASS: &str = "toggled";

pub fn is_mobile_width(width: f64) -> bool {
    width <= MOBILE_BREAKPOINT_PX
}

/// Stored preference string to collapsed flag. Anything but `"true"` is expanded.
pub fn parse_collapsed(stored: Option<&str>) -> bool {
    stored == Some("true")
}

/// Chevron icon class and label for the desktop toggle button.
pub fn toggle_button_look(collapsed: bool) -> (&'static str, &'static str) {
    if collapsed {
        ("bi bi-chevron-right", " Expand")
    } else {
        ("bi bi-chevron-left", " Collapse")
    }
}

fn is_mobile() -> bool {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .is_some_and(is_mobile_width)
}

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn update_toggle_button(button: &Element, collapsed: bool) {
    let (icon_class, label) = toggle_button_look(collapsed);
    if let Some(icon) = button.query_selector("i").ok().flatten() {
        icon.set_class_name(icon_class);
    }
    if let Some(text) = button.query_selector("span").ok().flatten() {
        text.set_text_content(Some(label));
    }
}

fn contains_target(container: Option<&Element>, ev: &Event) -> bool {
    let target = ev.target().and_then(|t| t.dyn_into::<Node>().ok());
    container.is_some_and(|c| c.contains(target.as_ref()))
}

/// Wire up the sidebar. No-op on pages without `#wrapper`.
pub fn init() {
    let Some(wrapper) = dom::by_id("wrapper") else {
        return;
    };
    let toggle = dom::by_id("sidebarToggle");

    if !is_mobile() {
        let stored = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
        if parse_collapsed(stored.as_deref()) {
            dom::set_class(&wrapper, TOGGLED_CLASS, true);
            if let Some(button) = &toggle {
                update_toggle_button(button, true);
            }
        }
    }

    if let Some(button) = toggle {
        let (wrapper, target) = (wrapper.clone(), button.clone());
        dom::listen(&target, "click", move |_| {
            if is_mobile() {
                return;
            }
            let collapsed = wrapper.class_list().toggle(TOGGLED_CLASS).unwrap_or(false);
            if let Some(storage) = storage() {
                let _ = storage.set_item(STORAGE_KEY, if collapsed { "true" } else { "false" });
            }
            update_toggle_button(&button, collapsed);
        });
    }

    if let Some(open) = dom::by_id("sidebarMenuToggle") {
        let wrapper = wrapper.clone();
        dom::listen(&open, "click", move |ev| {
            ev.stop_propagation();
            if is_mobile() {
                dom::set_class(&wrapper, TOGGLED_CLASS, true);
            }
        });
    }

    if let Some(close) = dom::by_id("sidebarClose") {
        let wrapper = wrapper.clone();
        dom::listen(&close, "click", move |ev| {
            ev.stop_propagation();
            if is_mobile() {
                dom::set_class(&wrapper, TOGGLED_CLASS, false);
            }
        });
    }

    // Tapping the dark overlay (outside sidebar and header) closes the menu.
    if is_mobile() {
        if let Some(doc) = dom::document() {
            let wrapper = wrapper.clone();
            dom::listen(&doc, "click", move |ev| {
                if !wrapper.class_list().contains(TOGGLED_CLASS) {
                    return;
                }
                let sidebar = dom::by_id("sidebar-wrapper");
                let header = dom::query(".mobile-header");
                let inside =
                    contains_target(sidebar.as_ref(), &ev) || contains_target(header.as_ref(), &ev);
                if !inside {
                    dom::set_class(&wrapper, TOGGLED_CLASS, false);
                }
            });
        }
    }

    init_section_toggles();
}

fn set_expanded(toggle: &Element, expanded: bool) {
    dom::set_class(toggle, "collapsed", !expanded);
    let _ = toggle.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
}

/// Keep `.sidebar-section-toggle` links in step with their Bootstrap collapse target.
fn init_section_toggles() {
    for toggle in dom::query_all(".sidebar-section-toggle") {
        let href = toggle.get_attribute("href");
        let Some(target_id) = href.as_deref().and_then(|h| h.strip_prefix('#')) else {
            continue;
        };
        let Some(section) = dom::by_id(target_id) else {
            continue;
        };

        if section.class_list().contains("show") {
            set_expanded(&toggle, true);
        }
        let shown = toggle.clone();
        dom::listen(&section, "show.bs.collapse", move |_| set_expanded(&shown, true));
        let hidden = toggle;
        dom::listen(&section, "hide.bs.collapse", move |_| set_expanded(&hidden, false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint() {
        assert!(is_mobile_width(375.0));
        assert!(is_mobile_width(768.0));
        assert!(!is_mobile_width(769.0));
        assert!(!is_mobile_width(1440.0));
    }

    #[test]
    fn test_parse_collapsed() {
        assert!(parse_collapsed(Some("true")));
        assert!(!parse_collapsed(Some("false")));
        assert!(!parse_collapsed(Some("TRUE")));
        assert!(!parse_collapsed(None));
    }

    #[test]
    fn test_toggle_button_look() {
        assert_eq!(toggle_button_look(true), ("bi bi-chevron-right", " Expand"));
        assert_eq!(toggle_button_look(false), ("bi bi-chevron-left", " Collapse"));
    }
}
