pub mod crop;
pub mod forecast;
pub mod selection;

pub use crop::*;
pub use forecast::*;
pub use selection::*;
