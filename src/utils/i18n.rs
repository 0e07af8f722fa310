// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_upper = lang.to_uppercase();

    match lang_upper.as_str() {
        "RU" => {
            // Login
            translations.insert("email", "Эл. почта");
            translations.insert("password", "Пароль");
            translations.insert("remember_me", "Запомнить меня");
            translations.insert("sign_in", "Войти");
            translations.insert("welcome", "Добро пожаловать!");
            translations.insert("system_error", "Системная ошибка");

            // Products
            translations.insert("products", "Товары");
            translations.insert("all_items", "Все позиции");
            translations.insert("search", "Найти");
            translations.insert("add", "Добавить");
            translations.insert("no_data", "Нет данных");
            translations.insert("loading", "Загружаем данные...");
            translations.insert("row_added", "Запись успешно добавлена!");
            translations.insert("row_updated", "Запись успешно изменена!");
            translations.insert("row_save_error", "Не удалось сохранить запись");
            translations.insert("products_load_error", "Не удалось загрузить товары");

            // Columnas de la tabla de productos
            translations.insert("col_title", "Название");
            translations.insert("col_brand", "Бренд");
            translations.insert("col_sku", "Артикул");
            translations.insert("col_rating", "Рейтинг");
            translations.insert("col_price", "Цена");
            translations.insert("col_min_order", "Мин. заказ");

            // Pagination
            translations.insert("shown", "Показано");
            translations.insert("of", "из");

            // 404
            translations.insert("not_found", "Страница не найдена");
            translations.insert("go_to_products", "Перейти к товарам");
        }
        _ => {
            // EN (fallback)
            translations.insert("email", "Email");
            translations.insert("password", "Password");
            translations.insert("remember_me", "Remember me");
            translations.insert("sign_in", "Sign in");
            translations.insert("welcome", "Welcome!");
            translations.insert("system_error", "System error");

            translations.insert("products", "Products");
            translations.insert("all_items", "All items");
            translations.insert("search", "Search");
            translations.insert("add", "Add");
            translations.insert("no_data", "No data");
            translations.insert("loading", "Loading data...");
            translations.insert("row_added", "Row added successfully!");
            translations.insert("row_updated", "Row updated successfully!");
            translations.insert("row_save_error", "Failed to save row");
            translations.insert("products_load_error", "Failed to load products");

            translations.insert("col_title", "Title");
            translations.insert("col_brand", "Brand");
            translations.insert("col_sku", "SKU");
            translations.insert("col_rating", "Rating");
            translations.insert("col_price", "Price");
            translations.insert("col_min_order", "Min. order");

            translations.insert("shown", "Showing");
            translations.insert("of", "of");

            translations.insert("not_found", "Page not found");
            translations.insert("go_to_products", "Go to products");
        }
    }

    translations
}

/// Traducir una clave; si no existe devuelve la clave tal cual
pub fn t(lang: &str, key: &str) -> String {
    get_translations(lang)
        .get(key)
        .map(|s| s.to_string())
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn russian_is_default_console_language() {
        assert_eq!(t("RU", "welcome"), "Добро пожаловать!");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(t("RU", "missing_key"), "missing_key");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(t("XX", "welcome"), "Welcome!");
    }
}
