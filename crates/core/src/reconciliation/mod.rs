//! Reconciliation module - the sweep that re-derives missing side effects.

mod reconciliation_service;


pub use reconciliation_service::{
    ReconciliationService, ReconciliationServiceTrait, ReconciliationSummary,
};
