pub mod availability;
pub mod clock;
pub mod leg;
pub mod midnight_splitter;
pub mod rules;
pub mod scheduler;
pub mod simulator;
