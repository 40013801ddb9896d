//! # Expense Settler
//!
//! Settles shared group expenses: given participants and transactions (each
//! with a payer, total amount, and per-person consumption shares), computes
//! each participant's net position and a near-minimal list of transfers that
//! zeroes all balances.
//!
//! ## Design Principles
//!
//! - **Exact decimal arithmetic**: 2 decimal places, round-half-up, via `rust_decimal`
//! - **Pure core**: balance accumulation and transfer matching are pure
//!   functions over validated input and never fail
//! - **Fail-fast validation**: the first invalid transaction aborts the
//!   request with an error naming its 1-based position
//! - **Deterministic output**: stable sorts and request-order tie-breaks
//!
//! ## Example
//!
//! ```no_run
//! use expense_settler::engine;
//! use std::io::Cursor;
//!
//! let json = r#"{"people": ["alice", "bob"], "transactions": []}"#;
//! let request = engine::read_request(Cursor::new(json)).unwrap();
//! let settlement = engine::settle_request(&request).unwrap();
//! engine::write_output(&settlement, std::io::stdout()).unwrap();
//! ```

pub mod balance;
pub mod engine;
pub mod error;
pub mod money;
pub mod settle;
pub mod transaction;

pub use balance::{compute_balances, BalanceEntry, BalanceSheet};
pub use engine::{read_request, settle_request, write_output, Settlement};
pub use error::{EngineError, Result};
pub use money::Money;
pub use settle::{settle_transfers, Transfer};
pub use transaction::{SettlementRequest, Transaction, TransactionRecord};
