//! Domain layer: Pure business logic and value objects

mod error;
mod holdings;
mod price_window;

pub(crate) use error::{check_fraction, check_probability};
pub use error::{SimError, SimResult};
pub use holdings::Holdings;
pub use price_window::PriceWindow;
