// ============================================================================
// PRODUCTS VIEW - Listado de productos con búsqueda, filtro y tabla
// ============================================================================

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement, InputEvent};

use crate::dom::{append_child, on_change, on_click, on_input, ElementBuilder};
use crate::models::Product;
use crate::state::{Align, AppState, ColumnSpec, SortState};
use crate::utils::{t, DEFAULT_PAGE_SIZE};
use crate::viewmodels::{AuthViewModel, ProductViewModel};
use crate::views::table::{render_table, TableProps, TableRow};

impl TableRow for Product {
    fn row_id(&self) -> u64 {
        self.id
    }

    fn cell(&self, key: &str) -> Option<String> {
        self.field(key)
    }
}

/// Columnas del listado; title/brand/sku/price son editables inline
fn product_columns(lang: &str) -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("title", t(lang, "col_title"))
            .min_width(200.0)
            .required(),
        ColumnSpec::new("brand", t(lang, "col_brand"))
            .min_width(130.0)
            .required(),
        ColumnSpec::new("sku", t(lang, "col_sku")).required(),
        ColumnSpec::new("rating", t(lang, "col_rating")).align(Align::Center),
        ColumnSpec::new("price", t(lang, "col_price"))
            .align(Align::End)
            .required(),
        ColumnSpec::new("minimumOrderQuantity", t(lang, "col_min_order")).align(Align::Center),
    ]
}

/// Renderizar página de productos
pub fn render_products(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language();
    let vm = ProductViewModel::new(state.clone());

    let page = ElementBuilder::new("div")?.class("products-page").build();

    append_child(&page, &render_page_header(state)?)?;
    append_child(&page, &render_toolbar(state, &vm)?)?;

    let query = state.products.get_query();
    let props = TableProps {
        ui: state.products_table.clone(),
        columns: Rc::new(product_columns(&lang)),
        rows: state.products.get_products(),
        total: *state.products.total.borrow(),
        current_page: query.page(),
        rows_per_page: if query.limit > 0 { query.limit } else { DEFAULT_PAGE_SIZE },
        is_loading: *state.products.is_fetching.borrow(),
        is_updating: *state.products.is_updating.borrow(),
        lang: lang.clone(),
        on_sort: Some({
            let vm = vm.clone();
            Rc::new(move |sort: SortState| vm.on_sort(&sort))
        }),
        on_page_change: Some({
            let vm = vm.clone();
            Rc::new(move |page: u32| vm.on_pagination(page))
        }),
        on_add: Some({
            let vm = vm.clone();
            Rc::new(move |fields: HashMap<String, String>| vm.on_add_row(fields))
        }),
        on_edit: Some({
            let vm = vm.clone();
            Rc::new(move |row_id: u64, fields: HashMap<String, String>| {
                vm.on_edit_row(row_id, fields)
            })
        }),
    };
    append_child(&page, &render_table(props)?)?;

    Ok(page)
}

/// Header de página: título + usuario + logout
fn render_page_header(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language();
    let header = ElementBuilder::new("header")?.class("page-header").build();

    let title = ElementBuilder::new("h1")?.text(&t(&lang, "products")).build();
    append_child(&header, &title)?;

    let session_box = ElementBuilder::new("div")?.class("session-box").build();
    if let Some(user) = state.session.get_user() {
        let name = ElementBuilder::new("span")?
            .class("session-user")
            .text(&user.username)
            .build();
        append_child(&session_box, &name)?;
    }
    let logout = ElementBuilder::new("button")?
        .class("btn-ghost")
        .attr("type", "button")?
        .text("⎋")
        .build();
    {
        let auth = AuthViewModel::new(state.clone());
        on_click(&logout, move |_| auth.logout())?;
    }
    append_child(&session_box, &logout)?;
    append_child(&header, &session_box)?;

    Ok(header)
}

/// Toolbar: buscador con debounce + filtro de categoría + botón de alta
fn render_toolbar(state: &AppState, vm: &ProductViewModel) -> Result<Element, JsValue> {
    let lang = state.language();
    let toolbar = ElementBuilder::new("div")?.class("products-toolbar").build();

    // Buscador
    let search = ElementBuilder::new("input")?
        .class("search-input")
        .id("products-search")?
        .attr("type", "search")?
        .attr("placeholder", &t(&lang, "search"))?
        .attr("value", &state.products.search_value.borrow())?
        .build();
    {
        let vm = vm.clone();
        on_input(&search, move |event: InputEvent| {
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            {
                vm.on_search_value_change(target.value());
            }
        })?;
    }
    append_child(&toolbar, &search)?;

    // Filtro de categoría; la opción vacía resetea el listado
    let select = ElementBuilder::new("select")?
        .class("category-select")
        .id("products-category")?
        .build();
    let current_category = state.products.get_query().category;
    let all_option = ElementBuilder::new("option")?
        .attr("value", "")?
        .text(&t(&lang, "all_items"))
        .build();
    append_child(&select, &all_option)?;
    for slug in state.products.categories.borrow().iter() {
        let option = ElementBuilder::new("option")?.attr("value", slug)?.text(slug).build();
        if current_category.as_deref() == Some(slug.as_str()) {
            option.set_attribute("selected", "")?;
        }
        append_child(&select, &option)?;
    }
    {
        let vm = vm.clone();
        on_change(&select, move |event: Event| {
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            {
                let value = target.value();
                vm.on_filter(if value.is_empty() { None } else { Some(value) });
            }
        })?;
    }
    append_child(&toolbar, &select)?;

    // Re-emitir la consulta actual
    let refresh = ElementBuilder::new("button")?
        .class("btn-ghost")
        .attr("type", "button")?
        .text("⟳")
        .build();
    {
        let vm = vm.clone();
        on_click(&refresh, move |_| vm.fetch_products())?;
    }
    append_child(&toolbar, &refresh)?;

    // Botón de alta: muestra la fila inline en la tabla
    let add = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "button")?
        .text(&t(&lang, "add"))
        .build();
    if *state.products.is_updating.borrow() {
        // Hay un alta/edición en vuelo
        add.set_attribute("disabled", "")?;
    }
    {
        let table = state.products_table.clone();
        on_click(&add, move |_| {
            *table.show_add_row.borrow_mut() = true;
            *table.edit_row_id.borrow_mut() = None;
            // Alta nueva, arranca en blanco
            *table.inline_draft.borrow_mut() = None;
            crate::rerender_app();
        })?;
    }
    append_child(&toolbar, &add)?;

    Ok(toolbar)
}
