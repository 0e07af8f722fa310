// Utils compartidos

pub mod constants;
pub mod email_login_map;
pub mod i18n;

pub use constants::*;
pub use email_login_map::login_for_email;
pub use i18n::t;
