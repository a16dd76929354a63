pub mod duty_log;
pub mod fleet;
pub mod hos;
pub mod location;
pub mod routing;
pub mod time_source;
pub mod trip_service;
pub mod utils;
