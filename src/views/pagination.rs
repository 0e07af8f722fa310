// ============================================================================
// PAGINATION VIEW - Footer de paginación de la tabla
// ============================================================================
// Con una sola página no se renderiza nada (ni los botones ni el
// resumen "Показано ... из ..."). El cálculo de páginas visibles es
// puro para poder testearlo sin DOM.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::utils::t;

/// Item de la tira de paginación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

pub fn total_pages(total: u32, per_page: u32) -> u32 {
    if per_page == 0 {
        1
    } else {
        total.div_ceil(per_page)
    }
}

/// Páginas visibles: siempre la primera y la última, más una ventana
/// de ±2 alrededor de la actual; los huecos colapsan en una elipsis.
pub fn visible_pages(current: u32, total_pages: u32) -> Vec<PageItem> {
    let mut pages: Vec<u32> = Vec::new();
    for page in 1..=total_pages {
        let in_window = page >= current.saturating_sub(2) && page <= current.saturating_add(2);
        if page == 1 || page == total_pages || in_window {
            pages.push(page);
        }
    }

    let mut items = Vec::new();
    let mut previous = 0;
    for page in pages {
        if previous != 0 && page > previous + 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(page));
        previous = page;
    }
    items
}

/// Renderizar el footer; None cuando no hay nada que paginar
pub fn render_pagination(
    lang: &str,
    total: u32,
    current_page: u32,
    per_page: u32,
    on_page: Rc<dyn Fn(u32)>,
) -> Result<Option<Element>, JsValue> {
    let pages = total_pages(total, per_page);
    if pages <= 1 {
        return Ok(None);
    }

    let footer = ElementBuilder::new("div")?.class("table-pagination").build();

    // "Показано 6-10 из 42"
    let start = (current_page - 1) * per_page + 1;
    let end = (current_page * per_page).min(total);
    let summary = ElementBuilder::new("span")?
        .class("pagination-summary")
        .text(&format!(
            "{} {}-{} {} {}",
            t(lang, "shown"),
            start,
            end,
            t(lang, "of"),
            total
        ))
        .build();
    append_child(&footer, &summary)?;

    let controls = ElementBuilder::new("div")?
        .class("pagination-controls")
        .build();

    let prev = page_button("‹", current_page <= 1, {
        let on_page = on_page.clone();
        move || on_page(current_page - 1)
    })?;
    append_child(&controls, &prev)?;

    for item in visible_pages(current_page, pages) {
        match item {
            PageItem::Ellipsis => {
                let dots = ElementBuilder::new("span")?
                    .class("pagination-ellipsis")
                    .text("…")
                    .build();
                append_child(&controls, &dots)?;
            }
            PageItem::Page(page) => {
                let button = ElementBuilder::new("button")?
                    .class(if page == current_page {
                        "pagination-page active"
                    } else {
                        "pagination-page"
                    })
                    .attr("type", "button")?
                    .text(&page.to_string())
                    .build();
                if page != current_page {
                    let on_page = on_page.clone();
                    on_click(&button, move |_| on_page(page))?;
                }
                append_child(&controls, &button)?;
            }
        }
    }

    let next = page_button("›", current_page >= pages, {
        let on_page = on_page.clone();
        move || on_page(current_page + 1)
    })?;
    append_child(&controls, &next)?;

    append_child(&footer, &controls)?;
    Ok(Some(footer))
}

fn page_button<F>(label: &str, disabled: bool, action: F) -> Result<Element, JsValue>
where
    F: Fn() + 'static,
{
    let button = ElementBuilder::new("button")?
        .class("pagination-nav")
        .attr("type", "button")?
        .text(label)
        .build();
    if disabled {
        button.set_attribute("disabled", "")?;
    } else {
        on_click(&button, move |_| action())?;
    }
    Ok(button)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_numbers(items: &[PageItem]) -> Vec<i64> {
        // -1 representa la elipsis para comparar fácil
        items
            .iter()
            .map(|item| match item {
                PageItem::Page(p) => *p as i64,
                PageItem::Ellipsis => -1,
            })
            .collect()
    }

    #[test]
    fn few_pages_render_without_ellipsis() {
        let items = visible_pages(1, 4);
        assert_eq!(page_numbers(&items), vec![1, 2, 3, 4]);
    }

    #[test]
    fn middle_page_shows_both_ellipses() {
        let items = visible_pages(5, 10);
        assert_eq!(page_numbers(&items), vec![1, -1, 3, 4, 5, 6, 7, -1, 10]);
    }

    #[test]
    fn first_page_shows_trailing_ellipsis_only() {
        let items = visible_pages(1, 10);
        assert_eq!(page_numbers(&items), vec![1, 2, 3, -1, 10]);
    }

    #[test]
    fn last_page_shows_leading_ellipsis_only() {
        let items = visible_pages(10, 10);
        assert_eq!(page_numbers(&items), vec![1, -1, 8, 9, 10]);
    }

    #[test]
    fn adjacent_pages_never_collapse_into_ellipsis() {
        // entre 1 y 2 no hay hueco, la elipsis no debe aparecer
        let items = visible_pages(4, 10);
        assert_eq!(page_numbers(&items), vec![1, 2, 3, 4, 5, 6, -1, 10]);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(42, 5), 9);
        assert_eq!(total_pages(40, 5), 8);
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(3, 0), 1);
    }
}
