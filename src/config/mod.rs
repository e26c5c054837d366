//! TOML configuration: form rules, carousel settings and the mock login
//! service used by the demo binary.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CarouselConfig, Config, FormConfig, MockLoginConfig};
