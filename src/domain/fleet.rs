pub mod driver;
pub mod repository;
pub mod trip;
pub mod vehicle;
