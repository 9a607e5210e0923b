//! Reporting port trait.

use crate::domain::event::EngineEvent;

/// Port for narrating engine activity to the operator.
pub trait ReportPort {
    fn report(&self, event: &EngineEvent);
}
