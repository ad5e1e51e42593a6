//! Ledger primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Rule: No String identifiers in ledger state. Ever.

pub mod primitives;

pub use primitives::{Address, Amount, ParseAddressError, TxHash};
