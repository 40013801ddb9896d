//! Balance accumulation over validated transactions.
//!
//! Folds transactions into per-participant paid/consumed/net totals. Shares
//! arrive already rounded to 2 places and are accumulated as-is; rounding
//! each share before summing (rather than summing raw values and rounding
//! once) is deliberate and keeps cent-level results consistent with the
//! per-transaction share-sum check.

use crate::money::Money;
use crate::transaction::Transaction;
use std::collections::HashMap;

/// Per-participant totals after accumulating all transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Participant name
    pub participant: String,

    /// Total fronted as payer
    pub paid: Money,

    /// Total consumed across all transactions
    pub consumed: Money,

    /// `paid - consumed`, rounded; positive means owed money
    pub net: Money,
}

/// Balances for the whole group, one entry per participant.
///
/// Entries are kept in request order. That order is what the transfer
/// matcher's stable sort falls back to for equal magnitudes, so it must be
/// preserved here rather than rebuilt from an unordered map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSheet {
    entries: Vec<BalanceEntry>,
}

impl BalanceSheet {
    /// All entries in request order.
    pub fn entries(&self) -> &[BalanceEntry] {
        &self.entries
    }

    /// Looks up a participant's entry by name.
    pub fn get(&self, participant: &str) -> Option<&BalanceEntry> {
        self.entries.iter().find(|e| e.participant == participant)
    }

    /// Net balances as `(participant, net)` pairs in request order,
    /// in the shape the transfer matcher consumes.
    pub fn net_balances(&self) -> Vec<(String, Money)> {
        self.entries
            .iter()
            .map(|e| (e.participant.clone(), e.net))
            .collect()
    }
}

/// Computes paid, consumed, and net totals for every participant.
///
/// Transactions are folded in input order: the full amount is credited to
/// the payer's `paid`, and each participant's rounded share is added to
/// their `consumed`. Input is assumed validated; this function has no error
/// conditions and allocates fresh state per call.
///
/// Whenever every transaction's shares sum to its amount, the resulting net
/// balances sum to exactly zero.
pub fn compute_balances(participants: &[String], transactions: &[Transaction]) -> BalanceSheet {
    let index: HashMap<&str, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| (p.as_str(), i))
        .collect();

    let mut paid = vec![Money::ZERO; participants.len()];
    let mut consumed = vec![Money::ZERO; participants.len()];

    for tx in transactions {
        if let Some(&payer_idx) = index.get(tx.payer.as_str()) {
            paid[payer_idx] += tx.amount;
        }
        for (i, participant) in participants.iter().enumerate() {
            consumed[i] += tx.share_of(participant);
        }
    }

    let entries = participants
        .iter()
        .enumerate()
        .map(|(i, participant)| BalanceEntry {
            participant: participant.clone(),
            paid: paid[i],
            consumed: consumed[i],
            net: paid[i] - consumed[i],
        })
        .collect();

    BalanceSheet { entries }
}
