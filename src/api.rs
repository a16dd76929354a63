pub mod fleet_dto;
pub mod location_dto;
pub mod trip_dto;
