pub mod asset;
pub mod ledger;
pub mod metrics;
pub mod net_value;
pub mod position;
pub mod price;
pub mod summary;
pub mod transaction;
