pub mod agent;
pub mod bridge;
pub mod record;
pub mod vector;

pub use agent::*;
pub use bridge::*;
pub use record::*;
pub use vector::*;
