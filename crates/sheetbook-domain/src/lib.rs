// Operations
mod operations;
pub use operations::*;

// Models
mod transactions;
pub use transactions::*;

mod snapshot;
pub use snapshot::*;

// Mutations
mod ledger;
pub use ledger::*;

pub mod datetime;
