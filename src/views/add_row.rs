// ============================================================================
// INLINE ROW VIEW - Fila de alta/edición dentro de la tabla
// ============================================================================
// La misma fila sirve para el alta (valores iniciales vacíos) y la
// edición (valores del producto existente). Confirmar valida los
// campos required; los inválidos se marcan y la fila queda abierta.
// El cierre exitoso lo decide el caller cuando su callback resuelve.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, InputEvent};

use crate::dom::{
    add_class, append_child, get_element_by_id, on_click, on_input, remove_class, ElementBuilder,
};
use crate::state::{ColumnSpec, TableUiState};

/// Claves required sin valor (o con valor en blanco)
pub fn missing_required(
    columns: &[ColumnSpec],
    fields: &HashMap<String, String>,
) -> Vec<&'static str> {
    columns
        .iter()
        .filter(|column| column.required)
        .filter(|column| {
            fields
                .get(column.key)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|column| column.key)
        .collect()
}

pub fn render_inline_row(
    ui: &TableUiState,
    columns: &[ColumnSpec],
    initial: HashMap<String, String>,
    busy: bool,
    on_confirm: Rc<dyn Fn(HashMap<String, String>)>,
    on_cancel: Rc<dyn Fn()>,
) -> Result<Element, JsValue> {
    let fields = Rc::new(RefCell::new(initial));

    let row_class = if busy {
        "table-row table-row-inline saving"
    } else {
        "table-row table-row-inline"
    };
    let row = ElementBuilder::new("div")?.class(row_class).build();

    // Celda del checkbox, vacía para mantener la grilla alineada
    let select_cell = ElementBuilder::new("div")?
        .class("table-cell select-cell")
        .build();
    append_child(&row, &select_cell)?;

    for column in columns {
        let cell = ElementBuilder::new("div")?
            .class("table-cell")
            .style(&format!("width: {}px", ui.width_of(column.key)))?
            .build();

        if column.editable {
            let input_id = inline_input_id(&ui.table_id, column.key);
            let mut builder = ElementBuilder::new("input")?
                .class("inline-input")
                .id(&input_id)?
                .attr("type", "text")?
                .attr(
                    "value",
                    fields.borrow().get(column.key).map(String::as_str).unwrap_or(""),
                )?;
            if busy {
                builder = builder.attr("disabled", "")?;
            }
            let input = builder.build();

            let fields_clone = fields.clone();
            let key = column.key;
            on_input(&input, move |event: InputEvent| {
                if let Some(target) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                {
                    fields_clone
                        .borrow_mut()
                        .insert(key.to_string(), target.value());
                    let _ = remove_class(&target, "input-invalid");
                }
            })?;
            append_child(&cell, &input)?;
        }
        append_child(&row, &cell)?;
    }

    // Celda de acciones: confirmar / cancelar
    let actions = ElementBuilder::new("div")?
        .class("table-cell actions-cell")
        .build();

    let mut confirm_builder = ElementBuilder::new("button")?
        .class("row-action confirm")
        .attr("type", "button")?
        .text("✓");
    if busy {
        confirm_builder = confirm_builder.attr("disabled", "")?;
    }
    let confirm = confirm_builder.build();
    {
        let fields = fields.clone();
        let columns: Vec<ColumnSpec> = columns.to_vec();
        let table_id = ui.table_id.clone();
        on_click(&confirm, move |_| {
            let snapshot = fields.borrow().clone();
            let missing = missing_required(&columns, &snapshot);
            if missing.is_empty() {
                on_confirm(snapshot);
                return;
            }
            for key in missing {
                if let Some(input) = get_element_by_id(&inline_input_id(&table_id, key)) {
                    let _ = add_class(&input, "input-invalid");
                }
            }
        })?;
    }
    append_child(&actions, &confirm)?;

    let mut cancel_builder = ElementBuilder::new("button")?
        .class("row-action cancel")
        .attr("type", "button")?
        .text("✕");
    if busy {
        cancel_builder = cancel_builder.attr("disabled", "")?;
    }
    let cancel = cancel_builder.build();
    on_click(&cancel, move |_| on_cancel())?;
    append_child(&actions, &cancel)?;

    append_child(&row, &actions)?;
    Ok(row)
}

fn inline_input_id(table_id: &str, key: &str) -> String {
    format!("{}-inline-{}", table_id, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("title", "Title").required(),
            ColumnSpec::new("brand", "Brand").required(),
            ColumnSpec::new("rating", "Rating"),
        ]
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), "Mouse".to_string());
        fields.insert("brand".to_string(), "   ".to_string());
        assert_eq!(missing_required(&columns(), &fields), vec!["brand"]);
    }

    #[test]
    fn optional_fields_never_block_confirmation() {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), "Mouse".to_string());
        fields.insert("brand".to_string(), "Logi".to_string());
        // rating ausente pero no es required
        assert!(missing_required(&columns(), &fields).is_empty());
    }

    #[test]
    fn absent_required_field_counts_as_missing() {
        let fields = HashMap::new();
        assert_eq!(missing_required(&columns(), &fields), vec!["title", "brand"]);
    }
}
