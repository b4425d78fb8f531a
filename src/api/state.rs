//! Application state for the salary engine API.

use std::sync::Arc;

use crate::engine::SalaryCalculator;
use crate::store::DataStore;

/// Shared application state.
///
/// Holds the calculator, which owns the store handle and configuration.
#[derive(Clone)]
pub struct AppState {
    calculator: Arc<SalaryCalculator>,
}

impl AppState {
    /// Creates application state around a calculator.
    pub fn new(calculator: SalaryCalculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
        }
    }

    /// Returns a shared handle to the calculator.
    pub fn calculator(&self) -> Arc<SalaryCalculator> {
        Arc::clone(&self.calculator)
    }

    /// Returns the data store.
    pub fn store(&self) -> &dyn DataStore {
        self.calculator.store().as_ref()
    }
}
