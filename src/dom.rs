//! DOM Accessors
//!
//! Every query against the server-rendered page goes through here, so the
//! grid controller only deals in `CellKey`s and `GridLayout`s.

use attendance_grid::{
    CellKey, FragmentSink, GridConfig, GridLayout, GridLayoutBuilder, KeyContext, Selection,
    UpdateError,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, Node, NodeList, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

pub const SELECTED_CLASS: &str = "selected";
pub const FOCUS_CLASS: &str = "keyboard-focus";

const STUDENT_ATTR: &str = "data-student-id";
const DATE_ATTR: &str = "data-date";

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map(elements)
        .unwrap_or_default()
}

/// Elements under `root` matching `selector`, in document order.
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector).map(elements).unwrap_or_default()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Key of a cell element, read from its `data-*` attributes.
pub fn cell_key(el: &Element) -> Option<CellKey> {
    let student = el.get_attribute(STUDENT_ATTR)?;
    let date = el.get_attribute(DATE_ATTR)?;
    match CellKey::from_attrs(&student, &date) {
        Ok(key) => Some(key),
        Err(e) => {
            log::warn!("ignoring malformed cell: {e}");
            None
        }
    }
}

pub fn find_cell(config: &GridConfig, key: &CellKey) -> Option<Element> {
    query(&format!(
        r#"{}[{STUDENT_ATTR}="{}"][{DATE_ATTR}="{}"]"#,
        config.cell_selector,
        key.student_id,
        key.date_str()
    ))
}

/// Cell element containing the event target, if any.
pub fn closest_cell(target: &Element, config: &GridConfig) -> Option<Element> {
    target.closest(&config.cell_selector).ok().flatten()
}

/// Read every cell on the page into a layout, in document order. Cells
/// sharing a `<tr>` form one row. Rows holding a `colspan` cell that sit
/// between two cell rows of the same table section become dividers.
pub fn scan_layout(config: &GridConfig) -> GridLayout {
    let mut builder = GridLayoutBuilder::new();
    let mut row_el: Option<Element> = None;
    let mut row: Vec<CellKey> = Vec::new();
    for cell in query_all(&config.cell_selector) {
        let tr = cell.closest("tr").ok().flatten();
        let same_row = match (&row_el, &tr) {
            (Some(a), Some(b)) => same_node(a, b),
            (None, None) => true,
            _ => false,
        };
        if !same_row {
            builder = builder.row(std::mem::take(&mut row));
            if let (Some(prev), Some(next)) = (&row_el, &tr) {
                for _ in 0..dividers_between(prev, next) {
                    builder = builder.divider();
                }
            }
            row_el = tr;
        }
        row.extend(cell_key(&cell));
    }
    builder.row(row).build()
}

fn same_node(a: &Element, b: &Element) -> bool {
    let b: &Node = b;
    a.is_same_node(Some(b))
}

/// Divider rows strictly between two sibling `<tr>`s; zero when `next` is
/// not a later sibling of `prev`.
fn dividers_between(prev: &Element, next: &Element) -> usize {
    let mut count = 0;
    let mut sibling = prev.next_element_sibling();
    while let Some(el) = sibling {
        if same_node(&el, next) {
            return count;
        }
        if el.query_selector("td[colspan]").ok().flatten().is_some() {
            count += 1;
        }
        sibling = el.next_element_sibling();
    }
    0
}

/// Make every cell's `selected` class match the selection set.
pub fn sync_selection(config: &GridConfig, selection: &Selection) {
    for el in query_all(&config.cell_selector) {
        let selected = cell_key(&el).is_some_and(|key| selection.contains(&key));
        set_class(&el, SELECTED_CLASS, selected);
    }
}

pub fn move_focus_marker(config: &GridConfig, from: Option<&CellKey>, to: &CellKey, scroll: bool) {
    if let Some(old) = from.and_then(|key| find_cell(config, key)) {
        set_class(&old, FOCUS_CLASS, false);
    }
    let Some(cell) = find_cell(config, to) else {
        return;
    };
    set_class(&cell, FOCUS_CLASS, true);
    if scroll {
        let opts = ScrollIntoViewOptions::new();
        opts.set_block(ScrollLogicalPosition::Nearest);
        opts.set_behavior(ScrollBehavior::Smooth);
        cell.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

pub fn clear_containers(ids: &[&str]) {
    for id in ids {
        if let Some(el) = by_id(id) {
            el.set_inner_html("");
        }
    }
}

pub fn is_form_field(target: &Element) -> bool {
    target.matches("input, textarea, select").unwrap_or(false)
}

pub fn key_context(target: Option<&Element>, config: &GridConfig) -> KeyContext {
    KeyContext {
        in_form_field: target.is_some_and(is_form_field),
        modal_open: query(".modal.show").is_some(),
        grid_present: query(&config.grid_selector).is_some(),
    }
}

/// Splice the fragment's marked element over the matching element inside `cell`.
pub fn swap_fragment(cell: &Element, html: &str, prefix: &str) -> Result<(), UpdateError> {
    let marker = format!(r#"[id^="{prefix}"]"#);
    let missing = || UpdateError::MissingFragment(prefix.to_string());

    let doc = document().ok_or_else(missing)?;
    let holder = doc.create_element("div").map_err(|_| missing())?;
    holder.set_inner_html(html);
    let fresh = holder.query_selector(&marker).ok().flatten().ok_or_else(missing)?;
    let stale = cell.query_selector(&marker).ok().flatten().ok_or_else(missing)?;
    stale
        .replace_with_with_node_1(&fresh)
        .map_err(|e| UpdateError::Body(format!("{e:?}")))
}

/// Fragment sink backed by the live page.
pub struct PageFragments<'a> {
    pub config: &'a GridConfig,
}

impl FragmentSink for PageFragments<'_> {
    fn swap(&mut self, key: &CellKey, html: &str) -> Result<(), UpdateError> {
        let cell = find_cell(self.config, key)
            .ok_or_else(|| UpdateError::MissingFragment(self.config.fragment_id_prefix.clone()))?;
        swap_fragment(&cell, html, &self.config.fragment_id_prefix)
    }
}

/// Attach a listener that lives for the rest of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use attendance_grid::{AfterBatch, ClickModifiers, Direction, GridState};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Markup appended to `<body>` for the duration of one test.
    struct Fixture(Element);

    impl Fixture {
        fn new(html: &str) -> Self {
            let doc = document().unwrap();
            let root = doc.create_element("div").unwrap();
            root.set_inner_html(html);
            doc.body().unwrap().append_child(&root).unwrap();
            Self(root)
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            self.0.remove();
        }
    }

    fn cell(student: u32, date: &str) -> String {
        format!(
            concat!(
                r#"<td class="attendance-cell" data-student-id="{student}" data-date="{date}">"#,
                r#"<span id="cell-{student}-{date}">P</span></td>"#,
            ),
            student = student,
            date = date,
        )
    }

    fn key(s: &str) -> CellKey {
        s.parse().unwrap()
    }

    #[wasm_bindgen_test]
    fn test_layout_spans_every_table_on_the_page() {
        let _page = Fixture::new(&format!(
            r#"<table class="table-bordered"><tr><td colspan="2">Notes</td></tr></table>
            <table class="table-bordered"><tbody>
                <tr><th>Ann</th>{}{}</tr>
                <tr><td colspan="3">Week 2</td></tr>
                <tr><th>Ann</th>{}</tr>
            </tbody></table>
            <table class="table-bordered"><tbody><tr>{}{}</tr></tbody></table>"#,
            cell(3, "2025-11-27"),
            cell(3, "2025-11-28"),
            cell(3, "2025-12-01"),
            cell(5, "2025-11-27"),
            cell(5, "2025-11-28"),
        ));
        let layout = scan_layout(&GridConfig::default());

        let order: Vec<String> = layout.cells().iter().map(CellKey::to_string).collect();
        assert_eq!(
            order,
            ["3-2025-11-27", "3-2025-11-28", "3-2025-12-01", "5-2025-11-27", "5-2025-11-28"]
        );
        let down = layout.neighbor(&key("3-2025-11-27"), Direction::Down);
        assert_eq!(down, Some(&key("3-2025-12-01")));

        let mut grid = GridState::new(AfterBatch::ClearSelection);
        grid.toggle_batch_mode();
        grid.click(&layout, &key("5-2025-11-27"), ClickModifiers::default());
        let shift = ClickModifiers { shift: true, toggle: false };
        grid.click(&layout, &key("5-2025-11-28"), shift);
        assert_eq!(grid.selection().len(), 2);
    }

    #[wasm_bindgen_test]
    fn test_sync_selection_clears_stale_markers() {
        let _page = Fixture::new(&format!(
            "<table><tbody><tr>{}{}</tr></tbody></table>",
            cell(7, "2025-11-27"),
            cell(7, "2025-11-28"),
        ));
        let config = GridConfig::default();
        let mut selection = Selection::new();
        selection.toggle(&key("7-2025-11-27"));
        sync_selection(&config, &selection);

        let first = find_cell(&config, &key("7-2025-11-27")).unwrap();
        let second = find_cell(&config, &key("7-2025-11-28")).unwrap();
        assert!(first.class_list().contains(SELECTED_CLASS));
        assert!(!second.class_list().contains(SELECTED_CLASS));

        selection.clear();
        sync_selection(&config, &selection);
        assert!(query_all(&config.cell_selector)
            .iter()
            .all(|el| !el.class_list().contains(SELECTED_CLASS)));
    }

    #[wasm_bindgen_test]
    fn test_clear_containers_empties_both_even_if_one_is_empty() {
        let config = GridConfig::default();
        let [status_id, notes_id] = config.transient_container_ids();
        let _page = Fixture::new(&format!(
            r#"<div id="{status_id}"><select><option>ABSENT</option></select></div>
            <div id="{notes_id}"></div>"#
        ));
        clear_containers(&config.transient_container_ids());

        assert_eq!(by_id(status_id).unwrap().inner_html(), "");
        assert_eq!(by_id(notes_id).unwrap().inner_html(), "");
    }

    #[wasm_bindgen_test]
    fn test_swap_fragment_replaces_only_the_prefixed_element() {
        let page = Fixture::new(concat!(
            r#"<div class="attendance-cell">"#,
            r#"<span id="cell-9-2025-11-27">P</span><i class="note"></i></div>"#,
        ));
        let target = query_all_in(&page.0, ".attendance-cell").remove(0);
        let html = r#"<td class="attendance-cell"><span id="cell-9-2025-11-27">A</span></td>"#;
        swap_fragment(&target, html, "cell-").unwrap();

        let badge = query_all_in(&target, r#"[id^="cell-"]"#);
        assert_eq!(badge.len(), 1);
        assert_eq!(badge[0].text_content().as_deref(), Some("A"));
        assert_eq!(query_all_in(&target, ".note").len(), 1);

        let missing = swap_fragment(&target, "<span>A</span>", "cell-");
        assert_eq!(missing, Err(UpdateError::MissingFragment("cell-".into())));
    }
}
