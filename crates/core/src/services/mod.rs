pub mod drawdown;
pub mod ledger_service;
pub mod performance_service;
pub mod position_service;
pub mod valuation_service;
