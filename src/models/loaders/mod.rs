pub mod toml_loader;

pub use toml_loader::{load_workers_from_str, load_workers_toml};
