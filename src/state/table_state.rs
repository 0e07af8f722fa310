// ============================================================================
// TABLE STATE - Estado UI de la tabla genérica (por id de tabla)
// ============================================================================
// Anchos de columna y orden se persisten en localStorage bajo
// `table-{id}-widths` y `table-{id}-sort`; selección y filas inline
// son estado efímero de UI. La lógica pura (ciclo de orden, clamp,
// flags de selección, orden client-side) vive en funciones sueltas
// para poder testearla sin DOM.
// ============================================================================

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::dom::{load_from_storage, remove_from_storage, save_to_storage};
use crate::models::SortDirection;

pub const DEFAULT_COL_WIDTH: f64 = 120.0;
pub const MIN_COL_WIDTH: f64 = 60.0;
pub const MAX_COL_WIDTH: f64 = 600.0;

/// Alineación del contenido de una columna
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Definición de una columna de la tabla
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub title: String,
    pub min_width: f64,
    pub max_width: f64,
    pub align: Align,
    /// La columna aparece en las filas inline de alta/edición
    pub editable: bool,
    /// No se puede confirmar una fila inline con este campo vacío
    pub required: bool,
}

impl ColumnSpec {
    pub fn new(key: &'static str, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            min_width: MIN_COL_WIDTH,
            max_width: MAX_COL_WIDTH,
            align: Align::Start,
            editable: false,
            required: false,
        }
    }

    pub fn min_width(mut self, width: f64) -> Self {
        self.min_width = width;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.editable = true;
        self
    }
}

/// Estado de orden de la tabla: columna + dirección tri-estado.
/// direction == None equivale a "sin ordenar".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self {
            key: String::new(),
            direction: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.direction.is_some() && !self.key.is_empty()
    }
}

/// Ciclo de orden al clickear una columna:
/// misma columna: asc -> desc -> sin ordenar; columna nueva: asc.
pub fn next_sort(current: &SortState, key: &str) -> SortState {
    if current.key == key {
        match current.direction {
            Some(SortDirection::Asc) => SortState {
                key: key.to_string(),
                direction: Some(SortDirection::Desc),
            },
            Some(SortDirection::Desc) => SortState::unsorted(),
            None => SortState {
                key: key.to_string(),
                direction: Some(SortDirection::Asc),
            },
        }
    } else {
        SortState {
            key: key.to_string(),
            direction: Some(SortDirection::Asc),
        }
    }
}

/// Ancho resultante de un drag: clamp(inicio + delta, min, max)
pub fn clamp_width(start_width: f64, delta: f64, min: f64, max: f64) -> f64 {
    (start_width + delta).clamp(min, max)
}

/// Flags derivados de la selección: (todas, algunas).
/// "algunas" activa el estado indeterminate del checkbox de cabecera.
pub fn selection_flags(selected_count: usize, visible_count: usize) -> (bool, bool) {
    let all = visible_count > 0 && selected_count == visible_count;
    let some = selected_count > 0 && selected_count < visible_count;
    (all, some)
}

/// Orden client-side cuando la tabla no tiene callback de orden:
/// comparación de strings case-insensitive sobre el valor de la columna,
/// luego recorte a la ventana de la página actual.
pub fn sort_and_page<T, F>(
    rows: &[T],
    value_of: F,
    sort: &SortState,
    current_page: u32,
    rows_per_page: u32,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &str) -> Option<String>,
{
    let start = ((current_page.max(1) - 1) * rows_per_page) as usize;
    let end = (start + rows_per_page as usize).min(rows.len());

    if !sort.is_active() {
        return rows.get(start..end).map(|s| s.to_vec()).unwrap_or_default();
    }

    let mut sorted: Vec<T> = rows.to_vec();
    sorted.sort_by(|a, b| {
        let a_value = value_of(a, &sort.key).unwrap_or_default().to_lowercase();
        let b_value = value_of(b, &sort.key).unwrap_or_default().to_lowercase();
        match sort.direction {
            Some(SortDirection::Desc) => b_value.cmp(&a_value),
            _ => a_value.cmp(&b_value),
        }
    });
    sorted
        .get(start..end)
        .map(|s| s.to_vec())
        .unwrap_or_default()
}

/// Estado UI de una instancia de tabla, compartido entre re-renders.
/// Los anchos y el orden se rehidratan del storage al construirse.
#[derive(Clone)]
pub struct TableUiState {
    pub table_id: String,
    pub widths: Rc<RefCell<HashMap<String, f64>>>,
    pub sort: Rc<RefCell<SortState>>,
    pub selected: Rc<RefCell<HashSet<u64>>>,
    pub show_add_row: Rc<RefCell<bool>>,
    pub edit_row_id: Rc<RefCell<Option<u64>>>,
    /// Borrador de la fila inline en curso. Se conserva entre
    /// re-renders para que un guardado en vuelo (o fallido) no
    /// descarte lo tipeado.
    pub inline_draft: Rc<RefCell<Option<HashMap<String, String>>>>,
    /// true cuando el orden persistido ya fue re-emitido al callback
    pub sort_replayed: Rc<RefCell<bool>>,
}

impl TableUiState {
    pub fn new(table_id: &str) -> Self {
        let widths: HashMap<String, f64> =
            load_from_storage(&widths_key(table_id)).unwrap_or_default();
        let sort: SortState =
            load_from_storage(&sort_key(table_id)).unwrap_or_else(SortState::unsorted);

        Self {
            table_id: table_id.to_string(),
            widths: Rc::new(RefCell::new(widths)),
            sort: Rc::new(RefCell::new(sort)),
            selected: Rc::new(RefCell::new(HashSet::new())),
            show_add_row: Rc::new(RefCell::new(false)),
            edit_row_id: Rc::new(RefCell::new(None)),
            inline_draft: Rc::new(RefCell::new(None)),
            sort_replayed: Rc::new(RefCell::new(false)),
        }
    }

    /// Completar anchos por defecto para columnas sin ancho persistido
    pub fn init_widths(&self, columns: &[ColumnSpec]) {
        let mut widths = self.widths.borrow_mut();
        for column in columns {
            widths.entry(column.key.to_string()).or_insert(
                if column.min_width > MIN_COL_WIDTH {
                    column.min_width
                } else {
                    DEFAULT_COL_WIDTH
                },
            );
        }
    }

    pub fn width_of(&self, key: &str) -> f64 {
        self.widths
            .borrow()
            .get(key)
            .copied()
            .unwrap_or(DEFAULT_COL_WIDTH)
    }

    /// Fijar el ancho de una columna y persistir inmediatamente.
    /// Se llama en cada mousemove del drag, no solo al soltar.
    pub fn set_width(&self, key: &str, width: f64) {
        self.widths.borrow_mut().insert(key.to_string(), width);
        let _ = save_to_storage(&widths_key(&self.table_id), &*self.widths.borrow());
    }

    /// Avanzar el ciclo de orden y persistir (o limpiar) el estado
    pub fn cycle_sort(&self, key: &str) -> SortState {
        let next = next_sort(&self.sort.borrow(), key);
        *self.sort.borrow_mut() = next.clone();
        if next.is_active() {
            let _ = save_to_storage(&sort_key(&self.table_id), &next);
        } else {
            let _ = remove_from_storage(&sort_key(&self.table_id));
        }
        next
    }

    pub fn get_sort(&self) -> SortState {
        self.sort.borrow().clone()
    }

    pub fn set_row_selected(&self, row_id: u64, selected: bool) {
        let mut set = self.selected.borrow_mut();
        if selected {
            set.insert(row_id);
        } else {
            set.remove(&row_id);
        }
    }

    pub fn select_all(&self, row_ids: &[u64], selected: bool) {
        let mut set = self.selected.borrow_mut();
        if selected {
            set.extend(row_ids.iter().copied());
        } else {
            set.clear();
        }
    }

    pub fn is_selected(&self, row_id: u64) -> bool {
        self.selected.borrow().contains(&row_id)
    }
}

fn widths_key(table_id: &str) -> String {
    format!("table-{}-widths", table_id)
}

fn sort_key(table_id: &str) -> String {
    format!("table-{}-sort", table_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_cycles_asc_desc_unsorted() {
        let start = SortState::unsorted();
        let first = next_sort(&start, "price");
        assert_eq!(first.direction, Some(SortDirection::Asc));
        let second = next_sort(&first, "price");
        assert_eq!(second.direction, Some(SortDirection::Desc));
        let third = next_sort(&second, "price");
        assert!(!third.is_active());
    }

    #[test]
    fn new_column_always_starts_ascending() {
        let sorted_desc = SortState {
            key: "price".into(),
            direction: Some(SortDirection::Desc),
        };
        let next = next_sort(&sorted_desc, "title");
        assert_eq!(next.key, "title");
        assert_eq!(next.direction, Some(SortDirection::Asc));
    }

    #[test]
    fn width_is_clamped_to_column_bounds() {
        assert_eq!(clamp_width(120.0, 40.0, 60.0, 600.0), 160.0);
        assert_eq!(clamp_width(120.0, -500.0, 60.0, 600.0), 60.0);
        assert_eq!(clamp_width(120.0, 1000.0, 60.0, 600.0), 600.0);
    }

    #[test]
    fn selection_flags_indeterminate() {
        // 5 filas, se deselecciona 1: indeterminate, no "todas"
        let (all, some) = selection_flags(4, 5);
        assert!(!all);
        assert!(some);

        let (all, some) = selection_flags(5, 5);
        assert!(all);
        assert!(!some);

        let (all, some) = selection_flags(0, 5);
        assert!(!all);
        assert!(!some);
    }

    #[test]
    fn client_side_sort_is_case_insensitive_and_paged() {
        let rows = vec!["Banana", "apple", "Cherry", "date", "Elderberry"];
        let sort = SortState {
            key: "name".into(),
            direction: Some(SortDirection::Asc),
        };
        let page = sort_and_page(&rows, |row, _| Some(row.to_string()), &sort, 1, 3);
        assert_eq!(page, vec!["apple", "Banana", "Cherry"]);

        let page2 = sort_and_page(&rows, |row, _| Some(row.to_string()), &sort, 2, 3);
        assert_eq!(page2, vec!["date", "Elderberry"]);
    }

    #[test]
    fn unsorted_slices_current_page_window() {
        let rows: Vec<u32> = (1..=10).collect();
        let page = sort_and_page(
            &rows,
            |row, _| Some(row.to_string()),
            &SortState::unsorted(),
            2,
            4,
        );
        assert_eq!(page, vec![5, 6, 7, 8]);
    }
}
