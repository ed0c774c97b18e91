pub mod api;
pub mod explore;
pub mod general;

pub use api::{list_merchants, list_perks};
pub use explore::explore;
pub use general::{health_check, landing, serve_css, serve_favicon, serve_js};
