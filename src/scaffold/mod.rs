//! Files written into every cleaned module.

mod mandatory;
mod payment;
mod theme;

pub use mandatory::write_mandatory_files;
pub use payment::write_demo_payment_provider;
pub use theme::{ScssCustomization, add_theme_install, extract_scss, write_scss_functions};
