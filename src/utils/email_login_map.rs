// ============================================================================
// EMAIL -> LOGIN MAP
// ============================================================================
// La API de autenticación solo acepta logins, no emails. La pantalla de
// login pide email, así que resolvemos el login por tabla estática.
// Emails sin entrada pasan sin cambios (fallback identidad).
// ============================================================================

/// Resolver el login de la API a partir del email ingresado
pub fn login_for_email(email: &str) -> &str {
    const EMAIL_LOGINS: &[(&str, &str)] = &[
        ("emily.johnson@x.dummyjson.com", "emilys"),
        ("michael.williams@x.dummyjson.com", "michaelw"),
        ("sophia.brown@x.dummyjson.com", "sophiab"),
        ("james.davis@x.dummyjson.com", "jamesd"),
        ("emma.miller@x.dummyjson.com", "emmaj"),
        ("olivia.wilson@x.dummyjson.com", "oliviaw"),
        ("alexander.jones@x.dummyjson.com", "alexanderj"),
        ("ava.taylor@x.dummyjson.com", "avat"),
        ("ethan.martinez@x.dummyjson.com", "ethanm"),
        ("isabella.anderson@x.dummyjson.com", "isabellad"),
        ("liam.garcia@x.dummyjson.com", "liamg"),
        ("mia.rodriguez@x.dummyjson.com", "miar"),
        ("noah.hernandez@x.dummyjson.com", "noahh"),
        ("charlotte.lopez@x.dummyjson.com", "charlottem"),
        ("william.gonzalez@x.dummyjson.com", "williamg"),
        ("avery.perez@x.dummyjson.com", "averyp"),
        ("evelyn.sanchez@x.dummyjson.com", "evelyns"),
        ("logan.torres@x.dummyjson.com", "logant"),
        ("abigail.rivera@x.dummyjson.com", "abigailr"),
        ("jackson.evans@x.dummyjson.com", "jacksone"),
        ("madison.collins@x.dummyjson.com", "madisonc"),
        ("elijah.stewart@x.dummyjson.com", "elijahs"),
        ("chloe.morales@x.dummyjson.com", "chloem"),
        ("mateo.nguyen@x.dummyjson.com", "mateon"),
        ("harper.kelly@x.dummyjson.com", "harpere"),
        ("evelyn.gonzalez@x.dummyjson.com", "evelyng"),
        ("daniel.cook@x.dummyjson.com", "danielc"),
        ("lily.lee@x.dummyjson.com", "lilyb"),
        ("henry.hill@x.dummyjson.com", "henryh"),
        ("addison.wright@x.dummyjson.com", "addisonw"),
    ];

    EMAIL_LOGINS
        .iter()
        .find(|(known_email, _)| *known_email == email)
        .map(|(_, login)| *login)
        .unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_email_resolves_to_login() {
        assert_eq!(login_for_email("emily.johnson@x.dummyjson.com"), "emilys");
    }

    #[test]
    fn unknown_email_passes_through() {
        assert_eq!(
            login_for_email("new@x.dummyjson.com"),
            "new@x.dummyjson.com"
        );
    }
}
