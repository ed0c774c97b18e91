pub mod app;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod perks;
pub mod templates;

pub use app::{AppState, SharedAppState, create_app};
pub use error::{AppError, AppResult};
pub use filter::{MerchantFilter, PerkFilter, Summary};
pub use perks::{Perk, Visibility};
