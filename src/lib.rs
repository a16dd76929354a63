use std::path::Path;
use std::sync::Arc;

use crate::domain::fleet::repository::InMemoryFleetRepository;
use crate::domain::hos::rules::RuleConstants;
use crate::domain::routing::route_provider::RouteProvider;
use crate::domain::time_source::TimeSource;
use crate::domain::trip_service::TripService;
use crate::error::Result;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Builds a trip service over the fleet store at `store_path` (empty when the
/// file does not exist yet), using the default rules unless a rules file is given.
pub fn open_trip_service(
    store_path: impl AsRef<Path>,
    rules_path: Option<&Path>,
    router: Box<dyn RouteProvider>,
    time_source: Arc<dyn TimeSource>,
) -> Result<TripService<InMemoryFleetRepository>> {
    let rules = match rules_path {
        Some(path) => {
            let rules = RuleConstants::from_file(path)?;
            log::info!("Rule constants loaded from '{}'", path.display());
            rules
        }
        None => RuleConstants::default(),
    };

    let repository = InMemoryFleetRepository::load_or_default(store_path)?;
    log::debug!("Trip service ready with router {:?}", router);

    Ok(TripService::new(repository, router, time_source, rules))
}
