//! Result persistence.
//!
//! On the first calculation of a period every employee in scope gets a bare
//! identity row before any component value is written. Every calculation
//! then upserts one full row per employee. Writes for the same
//! `(employee_id, period_start)` key are serialised through [`PeriodLocks`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, SalaryResult};
use crate::store::DataStore;

type PeriodKey = (EmployeeId, NaiveDate);

/// Per-key locks for result rows.
///
/// Distinct keys never contend; the map lock is held only long enough to
/// fetch, create or release a key's lock. A key's entry is dropped once no
/// writer holds it, so the table only contains keys with writes in flight.
#[derive(Debug, Default)]
pub struct PeriodLocks {
    locks: Mutex<HashMap<PeriodKey, Arc<Mutex<()>>>>,
}

impl PeriodLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for a key, creating it on first use.
    pub fn lock_for(&self, employee_id: EmployeeId, period_start: NaiveDate) -> EngineResult<Arc<Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| EngineError::data_access("period_lock", "lock table poisoned"))?;
        Ok(locks
            .entry((employee_id, period_start))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }

    /// Returns true if no key is currently tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_lock<T>(
        &self,
        employee_id: EmployeeId,
        period_start: NaiveDate,
        f: impl FnOnce() -> EngineResult<T>,
    ) -> EngineResult<T> {
        let lock = self.lock_for(employee_id, period_start)?;
        let outcome = match lock.lock() {
            Ok(_guard) => f(),
            Err(_) => Err(EngineError::data_access("period_lock", "row lock poisoned")),
        };
        drop(lock);
        self.release(employee_id, period_start)?;
        outcome
    }

    fn release(&self, employee_id: EmployeeId, period_start: NaiveDate) -> EngineResult<()> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| EngineError::data_access("period_lock", "lock table poisoned"))?;
        // New handles are only cloned under the map lock, so a count of one
        // means no other writer holds or waits on this key.
        if let Entry::Occupied(entry) = locks.entry((employee_id, period_start)) {
            if Arc::strong_count(entry.get()) == 1 {
                entry.remove();
            }
        }
        Ok(())
    }
}

/// Counts of the writes a run performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Identity rows created.
    pub identity_rows_inserted: usize,
    /// Full rows upserted.
    pub rows_written: usize,
}

/// Writes computed results to a [`DataStore`].
#[derive(Debug, Default)]
pub struct ResultWriter {
    locks: PeriodLocks,
}

impl ResultWriter {
    /// Creates a writer with an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the writer's lock table.
    pub fn locks(&self) -> &PeriodLocks {
        &self.locks
    }

    /// Persists a run's results.
    ///
    /// With `first_calculation` set, identity rows are inserted for every
    /// result before any row is upserted. Rows that already exist are left
    /// alone and logged. Without it, a missing row is logged and created by
    /// the upsert.
    pub fn persist(
        &self,
        store: &dyn DataStore,
        results: &[SalaryResult],
        first_calculation: bool,
    ) -> EngineResult<WriteSummary> {
        let mut summary = WriteSummary::default();

        if first_calculation {
            for result in results {
                let inserted = self.with_key(result, || {
                    if store.result_exists(result.employee_id, result.period_start)? {
                        return Ok(false);
                    }
                    store.insert_result_row(result.employee_id, result.period_start)?;
                    Ok(true)
                })?;
                if inserted {
                    summary.identity_rows_inserted += 1;
                } else {
                    warn!(
                        employee_id = result.employee_id,
                        period_start = %result.period_start,
                        "Identity row already exists on first calculation; not re-inserted"
                    );
                }
            }
        }

        for result in results {
            self.with_key(result, || {
                if !first_calculation
                    && !store.result_exists(result.employee_id, result.period_start)?
                {
                    warn!(
                        employee_id = result.employee_id,
                        period_start = %result.period_start,
                        "No identity row on repeat calculation; creating it"
                    );
                }
                store.write_result_row(result)
            })?;
            summary.rows_written += 1;
            debug!(
                employee_id = result.employee_id,
                period_start = %result.period_start,
                "Result row written"
            );
        }

        Ok(summary)
    }

    fn with_key<T>(
        &self,
        result: &SalaryResult,
        f: impl FnOnce() -> EngineResult<T>,
    ) -> EngineResult<T> {
        self.locks
            .with_lock(result.employee_id, result.period_start, f)
    }
}
