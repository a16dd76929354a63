pub mod graphhopper;
pub mod great_circle;
pub mod route_provider;
