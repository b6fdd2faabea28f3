pub mod shutdown;
pub mod validations;

pub use shutdown::*;
pub use validations::*;
