use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::duty_log::duty_entry::DutyEntry;
use crate::domain::fleet::trip::Trip;
use crate::error::Result;

const HEADERS: [&str; 8] = ["Day", "Date", "Start", "End", "Status", "Remarks", "Latitude", "Longitude"];
const TIME_FORMAT: &str = "%H:%M:%S";

/// Writes the entries as `;`-separated rows, one per duty entry.
pub fn write_duty_log_csv<W: Write>(entries: &[DutyEntry], writer: W) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    csv_wtr.write_record(HEADERS)?;

    for entry in entries {
        let (lat, lng) = match entry.stop_location {
            Some(location) => (location.lat.to_string(), location.lng.to_string()),
            None => (String::new(), String::new()),
        };

        csv_wtr.write_record([
            entry.day_index.to_string(),
            entry.date.to_string(),
            entry.start_time.format(TIME_FORMAT).to_string(),
            entry.end_time.format(TIME_FORMAT).to_string(),
            entry.status.to_string(),
            entry.remarks.clone(),
            lat,
            lng,
        ])?;
    }

    csv_wtr.flush()?;
    Ok(())
}

pub fn export_trip_csv(trip: &Trip, file_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(file_path.as_ref())?;
    write_duty_log_csv(&trip.logs, file)?;
    log::info!("Exported {} duty entries of trip {} to '{}'", trip.logs.len(), trip.id, file_path.as_ref().display());
    Ok(())
}
