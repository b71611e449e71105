pub mod hazard;
pub mod region;
pub mod weather;

pub use hazard::*;
pub use region::*;
pub use weather::*;
