//! The calculation orchestrator and result writer.

mod calculator;
mod writer;

pub use calculator::{ENGINE_VERSION, SalaryCalculator};
pub use writer::{PeriodLocks, ResultWriter, WriteSummary};
