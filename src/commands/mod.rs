mod transactions;
pub use transactions::*;

mod inspect;
pub use inspect::*;
