use crate::error::Result;
use crate::service::{StatusSink, ThermalService};

/// Backend for platforms without a thermal status API.
///
/// Every query degrades to "no thermal data": availability is `false`,
/// there is no current status, and observer registration succeeds without
/// ever delivering a notification. Hosts get the same code path on every
/// platform, just with inert answers.
#[derive(Debug, Default)]
pub struct UnsupportedService;

impl ThermalService for UnsupportedService {
    fn is_supported(&self) -> bool {
        false
    }

    fn current_status(&self) -> Option<i32> {
        None
    }

    fn register_observer(&self, _sink: StatusSink) -> Result<()> {
        Ok(())
    }

    fn unregister_observer(&self) {}
}
