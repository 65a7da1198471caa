pub mod data;
pub mod serde_lenient;

pub use data::*;
