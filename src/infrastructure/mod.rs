pub mod logging;
pub mod model;
