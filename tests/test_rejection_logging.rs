mod common;

use log::Level;

use hos_trip_log::domain::hos::rules::RuleConstants;
use hos_trip_log::error::Error;

use common::*;

// logtest installs a process-wide logger, so this file holds a single test.
#[test]
fn test_rejected_trip_is_logged_as_warning() {
    let mut logger = logtest::Logger::start();

    let rules = RuleConstants { cycle_limit_hours: 1.0, ..RuleConstants::default() };
    let router = ScriptedRouteProvider::legs(lookup(60.0, 1.0), lookup(60.0, 1.0));
    let mut service = service(router, clock_at(date(2024, 9, 2), 8, 0), rules);

    assert!(matches!(service.create_trip(request(None)), Err(Error::DurationExceedsAvailability { .. })));

    let warnings: Vec<String> = std::iter::from_fn(|| logger.pop()).filter(|record| record.level() == Level::Warn).map(|record| record.args().to_string()).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Rejecting trip: needs 2.00 h, only 1.00 h available"));
}
