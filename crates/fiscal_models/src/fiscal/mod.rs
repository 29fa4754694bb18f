//! Fiscal accounting: per-period revenue, expenditure, and primary balance.

mod accounts;
mod subsidy;

pub use accounts::{compute_fiscal_flows, FiscalFlows};
pub use subsidy::subsidy_outlay;
