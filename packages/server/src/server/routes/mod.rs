// HTTP routes
pub mod audit;
pub mod health;
pub mod leads;

pub use audit::*;
pub use health::*;
pub use leads::*;
