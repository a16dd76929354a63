pub mod daily_summary;
pub mod duty_entry;
pub mod export;
