// ============================================================================
// TABLE VIEW - Tabla genérica con orden, resize, selección y filas inline
// ============================================================================
// La tabla no conoce el dominio: recibe ColumnSpec + filas que
// implementan TableRow y callbacks opcionales. Sin callback de orden
// cae al fallback client-side (orden por string case-insensitive y
// recorte a la página actual). El estado UI (anchos, orden, selección,
// filas inline) vive en TableUiState y sobrevive a los re-renders.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, MouseEvent};

use crate::dom::{
    append_child, get_element_by_id, on_change, on_click, on_mousedown, DocumentListener,
    ElementBuilder,
};
use crate::models::SortDirection;
use crate::state::{
    clamp_width, selection_flags, sort_and_page, Align, ColumnSpec, SortState, TableUiState,
};
use crate::utils::t;
use crate::views::add_row::render_inline_row;
use crate::views::pagination::render_pagination;

/// Fila renderizable por la tabla genérica
pub trait TableRow: Clone + 'static {
    fn row_id(&self) -> u64;
    fn cell(&self, key: &str) -> Option<String>;
}

/// Recorte de la página cuando la fila de alta está visible: la fila
/// inline ocupa el lugar de la primera fila de datos y el resto sube.
pub fn windowed_rows<T: Clone>(rows: &[T], per_page: usize, add_row_shown: bool) -> Vec<T> {
    let mut rows = rows.to_vec();
    if add_row_shown && rows.len() >= per_page && per_page > 0 {
        rows.remove(0);
        rows.truncate(per_page - 1);
    }
    rows
}

/// Valores iniciales de la fila inline: el borrador en curso (si un
/// guardado falló o hay un request en vuelo) pisa a los de la fila
pub fn inline_seed(
    draft: Option<HashMap<String, String>>,
    fallback: HashMap<String, String>,
) -> HashMap<String, String> {
    draft.unwrap_or(fallback)
}

/// Configuración de una instancia de tabla
pub struct TableProps<T: TableRow> {
    pub ui: TableUiState,
    pub columns: Rc<Vec<ColumnSpec>>,
    pub rows: Vec<T>,
    pub total: u32,
    pub current_page: u32,
    pub rows_per_page: u32,
    pub is_loading: bool,
    /// Alta o edición en vuelo: la fila inline se deshabilita
    pub is_updating: bool,
    pub lang: String,
    /// Orden server-side; sin callback la tabla ordena client-side
    pub on_sort: Option<Rc<dyn Fn(SortState)>>,
    pub on_page_change: Option<Rc<dyn Fn(u32)>>,
    pub on_add: Option<Rc<dyn Fn(HashMap<String, String>)>>,
    pub on_edit: Option<Rc<dyn Fn(u64, HashMap<String, String>)>>,
}

pub fn render_table<T: TableRow>(props: TableProps<T>) -> Result<Element, JsValue> {
    props.ui.init_widths(&props.columns);
    replay_persisted_sort(&props);

    let container = ElementBuilder::new("div")?.class("data-table").build();

    // Filas a mostrar en esta página
    let page_rows: Vec<T> = match &props.on_sort {
        Some(_) => props.rows.clone(),
        None => sort_and_page(
            &props.rows,
            |row, key| row.cell(key),
            &props.ui.get_sort(),
            props.current_page,
            props.rows_per_page,
        ),
    };
    let show_add_row = *props.ui.show_add_row.borrow();
    let display_rows = windowed_rows(&page_rows, props.rows_per_page as usize, show_add_row);
    let visible_ids: Vec<u64> = display_rows.iter().map(|row| row.row_id()).collect();

    append_child(&container, &render_header(&props, &visible_ids)?)?;

    let body = ElementBuilder::new("div")?.class("table-body").build();

    if props.is_loading {
        let loading = ElementBuilder::new("div")?
            .class("table-loading")
            .text(&t(&props.lang, "loading"))
            .build();
        append_child(&body, &loading)?;
    } else {
        if show_add_row {
            if let Some(on_add) = &props.on_add {
                let ui = props.ui.clone();
                let on_cancel = Rc::new(move || {
                    *ui.show_add_row.borrow_mut() = false;
                    *ui.inline_draft.borrow_mut() = None;
                    crate::rerender_app();
                });
                let on_add = on_add.clone();
                let on_confirm =
                    Rc::new(move |fields: HashMap<String, String>| on_add(fields));
                let initial =
                    inline_seed(props.ui.inline_draft.borrow().clone(), HashMap::new());
                let inline = render_inline_row(
                    &props.ui,
                    &props.columns,
                    initial,
                    props.is_updating,
                    on_confirm,
                    on_cancel,
                )?;
                append_child(&body, &inline)?;
            }
        }

        if display_rows.is_empty() && !show_add_row {
            let empty = ElementBuilder::new("div")?
                .class("table-empty")
                .text(&t(&props.lang, "no_data"))
                .build();
            append_child(&body, &empty)?;
        }

        let editing = *props.ui.edit_row_id.borrow();
        for row in &display_rows {
            match (&props.on_edit, editing == Some(row.row_id())) {
                (Some(on_edit), true) => {
                    append_child(&body, &render_edit_row(&props, row, on_edit.clone())?)?;
                }
                _ => append_child(&body, &render_data_row(&props, row)?)?,
            }
        }
    }
    append_child(&container, &body)?;

    if let Some(on_page) = &props.on_page_change {
        if let Some(footer) = render_pagination(
            &props.lang,
            props.total,
            props.current_page,
            props.rows_per_page,
            on_page.clone(),
        )? {
            append_child(&container, &footer)?;
        }
    }

    Ok(container)
}

/// Re-emitir el orden persistido una única vez tras el montaje, para
/// que el fetch inicial del caller lo incluya. Diferido con un timer de
/// 0ms para no disparar un re-render dentro del render en curso.
fn replay_persisted_sort<T: TableRow>(props: &TableProps<T>) {
    let sort = props.ui.get_sort();
    if !sort.is_active() || *props.ui.sort_replayed.borrow() {
        return;
    }
    *props.ui.sort_replayed.borrow_mut() = true;

    if let Some(on_sort) = props.on_sort.clone() {
        Timeout::new(0, move || on_sort(sort)).forget();
    }
}

fn render_header<T: TableRow>(
    props: &TableProps<T>,
    visible_ids: &[u64],
) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?.class("table-header").build();

    // Checkbox de selección global con estado indeterminate
    let select_cell = ElementBuilder::new("div")?
        .class("table-cell select-cell")
        .build();
    let selected_visible = visible_ids
        .iter()
        .filter(|id| props.ui.is_selected(**id))
        .count();
    let (all, some) = selection_flags(selected_visible, visible_ids.len());

    let checkbox = ElementBuilder::new("input")?
        .id(&format!("{}-select-all", props.ui.table_id))?
        .attr("type", "checkbox")?
        .build();
    if let Some(input) = checkbox.dyn_ref::<HtmlInputElement>() {
        input.set_checked(all);
        input.set_indeterminate(some);
    }
    {
        let ui = props.ui.clone();
        let ids = visible_ids.to_vec();
        on_change(&checkbox, move |event: Event| {
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            {
                ui.select_all(&ids, target.checked());
                crate::rerender_app();
            }
        })?;
    }
    append_child(&select_cell, &checkbox)?;
    append_child(&header, &select_cell)?;

    let sort = props.ui.get_sort();
    let last = props.columns.len().saturating_sub(1);
    for (index, column) in props.columns.iter().enumerate() {
        append_child(&header, &render_header_cell(props, column, &sort, index == last)?)?;
    }

    if props.on_edit.is_some() {
        let actions = ElementBuilder::new("div")?
            .class("table-cell actions-cell")
            .build();
        append_child(&header, &actions)?;
    }

    Ok(header)
}

fn render_header_cell<T: TableRow>(
    props: &TableProps<T>,
    column: &ColumnSpec,
    sort: &SortState,
    is_last: bool,
) -> Result<Element, JsValue> {
    let cell = ElementBuilder::new("div")?
        .class(&format!("table-cell header-cell {}", align_class(column.align)))
        .id(&header_cell_id(&props.ui.table_id, column.key))?
        .style(&format!("width: {}px", props.ui.width_of(column.key)))?
        .build();

    let label = ElementBuilder::new("span")?
        .class("header-label")
        .text(&column.title)
        .build();

    let glyph = if sort.key == column.key {
        match sort.direction {
            Some(SortDirection::Asc) => "↑",
            Some(SortDirection::Desc) => "↓",
            None => "↕",
        }
    } else {
        "↕"
    };
    let sort_glyph = ElementBuilder::new("span")?
        .class("sort-glyph")
        .text(glyph)
        .build();
    append_child(&label, &sort_glyph)?;

    {
        let ui = props.ui.clone();
        let key = column.key;
        let on_sort = props.on_sort.clone();
        on_click(&label, move |_| {
            let next = ui.cycle_sort(key);
            match &on_sort {
                Some(callback) => callback(next),
                None => crate::rerender_app(),
            }
        })?;
    }
    append_child(&cell, &label)?;

    // La última columna no se redimensiona: absorbe el resto del ancho
    if !is_last {
        append_child(&cell, &render_resizer(props, column)?)?;
    }
    Ok(cell)
}

/// Divisor arrastrable entre columnas. El ancho se clampa a los
/// límites de la columna y se persiste en cada mousemove; durante el
/// gesto solo se actualiza la celda de cabecera y al soltar se
/// redibuja la tabla completa con el ancho final.
fn render_resizer<T: TableRow>(
    props: &TableProps<T>,
    column: &ColumnSpec,
) -> Result<Element, JsValue> {
    let resizer = ElementBuilder::new("span")?.class("col-resizer").build();

    let ui = props.ui.clone();
    let key = column.key;
    let min = column.min_width;
    let max = column.max_width;

    on_mousedown(&resizer, move |event: MouseEvent| {
        event.prevent_default();
        let start_x = event.client_x() as f64;
        let start_width = ui.width_of(key);

        // Los listeners del gesto viven acá hasta el mouseup
        let gesture: Rc<RefCell<Option<(DocumentListener, DocumentListener)>>> =
            Rc::new(RefCell::new(None));

        let move_listener = {
            let ui = ui.clone();
            DocumentListener::new("mousemove", move |event: MouseEvent| {
                let delta = event.client_x() as f64 - start_x;
                let width = clamp_width(start_width, delta, min, max);
                ui.set_width(key, width);
                if let Some(cell) = get_element_by_id(&header_cell_id(&ui.table_id, key)) {
                    let _ = cell.set_attribute("style", &format!("width: {}px", width));
                }
            })
        };
        let up_listener = {
            let gesture = gesture.clone();
            DocumentListener::new("mouseup", move |_| {
                // Drop diferido: no se puede destruir el Closure
                // mientras se está ejecutando
                let gesture = gesture.clone();
                Timeout::new(0, move || {
                    gesture.borrow_mut().take();
                })
                .forget();
                crate::rerender_app();
            })
        };

        if let (Ok(move_listener), Ok(up_listener)) = (move_listener, up_listener) {
            *gesture.borrow_mut() = Some((move_listener, up_listener));
        }
    })?;

    Ok(resizer)
}

fn render_data_row<T: TableRow>(props: &TableProps<T>, row: &T) -> Result<Element, JsValue> {
    let row_id = row.row_id();
    let row_el = ElementBuilder::new("div")?.class("table-row").build();

    let select_cell = ElementBuilder::new("div")?
        .class("table-cell select-cell")
        .build();
    let checkbox = ElementBuilder::new("input")?.attr("type", "checkbox")?.build();
    if let Some(input) = checkbox.dyn_ref::<HtmlInputElement>() {
        input.set_checked(props.ui.is_selected(row_id));
    }
    {
        let ui = props.ui.clone();
        on_change(&checkbox, move |event: Event| {
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            {
                ui.set_row_selected(row_id, target.checked());
                crate::rerender_app();
            }
        })?;
    }
    append_child(&select_cell, &checkbox)?;
    append_child(&row_el, &select_cell)?;

    for column in props.columns.iter() {
        let value = row.cell(column.key).unwrap_or_default();
        let cell = ElementBuilder::new("div")?
            .class(&format!("table-cell {}", align_class(column.align)))
            .style(&format!("width: {}px", props.ui.width_of(column.key)))?
            .text(&value)
            .build();
        append_child(&row_el, &cell)?;
    }

    if props.on_edit.is_some() {
        let actions = ElementBuilder::new("div")?
            .class("table-cell actions-cell")
            .build();
        let edit = ElementBuilder::new("button")?
            .class("row-action edit")
            .attr("type", "button")?
            .text("✎")
            .build();
        let ui = props.ui.clone();
        on_click(&edit, move |_| {
            *ui.edit_row_id.borrow_mut() = Some(row_id);
            // Edición recién abierta, sin borrador previo
            *ui.inline_draft.borrow_mut() = None;
            crate::rerender_app();
        })?;
        append_child(&actions, &edit)?;
        append_child(&row_el, &actions)?;
    }

    Ok(row_el)
}

/// Fila en modo edición: inputs precargados con los valores actuales.
/// La fila se cierra desde el caller cuando la edición resuelve ok.
fn render_edit_row<T: TableRow>(
    props: &TableProps<T>,
    row: &T,
    on_edit: Rc<dyn Fn(u64, HashMap<String, String>)>,
) -> Result<Element, JsValue> {
    let row_id = row.row_id();
    let mut fallback = HashMap::new();
    for column in props.columns.iter().filter(|c| c.editable) {
        fallback.insert(
            column.key.to_string(),
            row.cell(column.key).unwrap_or_default(),
        );
    }
    let initial = inline_seed(props.ui.inline_draft.borrow().clone(), fallback);

    let on_confirm = Rc::new(move |fields: HashMap<String, String>| on_edit(row_id, fields));

    let ui = props.ui.clone();
    let on_cancel = Rc::new(move || {
        *ui.edit_row_id.borrow_mut() = None;
        *ui.inline_draft.borrow_mut() = None;
        crate::rerender_app();
    });

    render_inline_row(
        &props.ui,
        &props.columns,
        initial,
        props.is_updating,
        on_confirm,
        on_cancel,
    )
}

fn header_cell_id(table_id: &str, key: &str) -> String {
    format!("{}-col-{}", table_id, key)
}

fn align_class(align: Align) -> &'static str {
    match align {
        Align::Start => "align-start",
        Align::Center => "align-center",
        Align::End => "align-end",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_row_displaces_the_first_data_row() {
        let rows = vec![10, 20, 30, 40, 50];
        assert_eq!(windowed_rows(&rows, 5, true), vec![20, 30, 40, 50]);
    }

    #[test]
    fn partial_page_keeps_all_rows_under_the_add_row() {
        let rows = vec![10, 20, 30];
        assert_eq!(windowed_rows(&rows, 5, true), vec![10, 20, 30]);
        assert_eq!(windowed_rows(&rows, 5, false), vec![10, 20, 30]);
    }

    #[test]
    fn draft_wins_over_row_values_when_seeding() {
        let mut draft = HashMap::new();
        draft.insert("title".to_string(), "typed but unsaved".to_string());
        let mut fallback = HashMap::new();
        fallback.insert("title".to_string(), "stored".to_string());

        let seeded = inline_seed(Some(draft), fallback.clone());
        assert_eq!(seeded.get("title").map(String::as_str), Some("typed but unsaved"));

        let fresh = inline_seed(None, fallback);
        assert_eq!(fresh.get("title").map(String::as_str), Some("stored"));
    }
}
