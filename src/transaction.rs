//! Request wire types and transaction validation.

use crate::error::{EngineError, Result};
use crate::money::Money;
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;

/// A settlement request as read from JSON.
///
/// `people` lists every participant in the group; `transactions` lists the
/// bills to settle. Both default to empty so that validation, not
/// deserialization, reports a missing participant list.
#[derive(Debug, Deserialize)]
pub struct SettlementRequest {
    /// Participant names, unique within a request.
    #[serde(default)]
    pub people: Vec<String>,

    /// Transactions in the order they occurred.
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

/// Raw transaction record as it appears in the request payload.
///
/// `day` and `description` are display metadata and play no part in the
/// computation. `shares` maps participant names to consumed portions; absent
/// entries mean zero.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    /// Day label for display (e.g. "2026-08-14")
    #[serde(default)]
    pub day: Option<String>,

    /// Free-text description for display
    #[serde(default)]
    pub description: Option<String>,

    /// Participant who fronted the money
    pub payer: String,

    /// Total amount paid for the bill
    pub amount: Money,

    /// Per-person consumed portions (absent participants consumed nothing)
    #[serde(default)]
    pub shares: HashMap<String, Money>,
}

impl TransactionRecord {
    /// Validates this record against the participant list.
    ///
    /// `row` is the 1-based position of the record in the request, used in
    /// error messages. Checks, in order: the payer is a listed participant,
    /// the rounded amount is positive, every share is non-negative, and the
    /// rounded shares sum exactly to the rounded amount.
    ///
    /// Shares are normalized to a full per-participant map; share entries for
    /// names outside the participant list are dropped with a warning.
    pub fn validate(&self, row: usize, participants: &[String]) -> Result<Transaction> {
        if !participants.iter().any(|p| p == &self.payer) {
            return Err(EngineError::UnknownPayer {
                row,
                payer: self.payer.clone(),
            });
        }

        if !self.amount.is_positive() {
            return Err(EngineError::NonPositiveAmount {
                row,
                amount: self.amount,
            });
        }

        for name in self.shares.keys() {
            if !participants.iter().any(|p| p == name) {
                warn!(
                    "Transaction {}: share for '{}' ignored (not a listed participant)",
                    row, name
                );
            }
        }

        let mut shares = HashMap::with_capacity(participants.len());
        for participant in participants {
            let share = self.shares.get(participant).copied().unwrap_or(Money::ZERO);
            if share.is_negative() {
                return Err(EngineError::NegativeShare {
                    row,
                    participant: participant.clone(),
                });
            }
            shares.insert(participant.clone(), share);
        }

        let share_total: Money = shares.values().copied().sum();
        if share_total != self.amount {
            return Err(EngineError::ShareSumMismatch {
                row,
                share_total,
                amount: self.amount,
            });
        }

        Ok(Transaction {
            day: self.day.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            payer: self.payer.clone(),
            amount: self.amount,
            shares,
        })
    }
}

/// A validated transaction ready for balance accumulation.
///
/// Immutable once constructed; carries no identity beyond its position in
/// the request. The shares map holds a rounded entry for every participant.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Day label for display
    pub day: String,

    /// Free-text description for display
    pub description: String,

    /// Participant who fronted the money
    pub payer: String,

    /// Total amount paid, rounded to 2 places, always positive
    pub amount: Money,

    /// Rounded consumed portion per participant
    pub shares: HashMap<String, Money>,
}

impl Transaction {
    /// Returns the rounded share consumed by `participant` (zero if absent).
    pub fn share_of(&self, participant: &str) -> Money {
        self.shares.get(participant).copied().unwrap_or(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn people(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn record(payer: &str, amount: &str, shares: &[(&str, &str)]) -> TransactionRecord {
        TransactionRecord {
            day: None,
            description: None,
            payer: payer.to_string(),
            amount: money(amount),
            shares: shares
                .iter()
                .map(|(n, v)| (n.to_string(), money(v)))
                .collect(),
        }
    }

    #[test]
    fn test_validate_accepts_even_split() {
        let participants = people(&["alice", "bob"]);
        let tx = record("alice", "10.00", &[("alice", "5.00"), ("bob", "5.00")])
            .validate(1, &participants)
            .unwrap();

        assert_eq!(tx.payer, "alice");
        assert_eq!(tx.amount, money("10.00"));
        assert_eq!(tx.share_of("bob"), money("5.00"));
    }

    #[test]
    fn test_validate_fills_absent_shares_with_zero() {
        let participants = people(&["alice", "bob", "carol"]);
        let tx = record("alice", "6.00", &[("alice", "6.00")])
            .validate(1, &participants)
            .unwrap();

        assert_eq!(tx.share_of("bob"), Money::ZERO);
        assert_eq!(tx.share_of("carol"), Money::ZERO);
    }

    #[test]
    fn test_validate_rejects_unknown_payer() {
        let participants = people(&["alice"]);
        let err = record("mallory", "5.00", &[("alice", "5.00")])
            .validate(3, &participants)
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::UnknownPayer { row: 3, ref payer } if payer == "mallory"
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let participants = people(&["alice"]);
        let err = record("alice", "0.00", &[])
            .validate(2, &participants)
            .unwrap_err();

        assert!(matches!(err, EngineError::NonPositiveAmount { row: 2, .. }));
    }

    #[test]
    fn test_validate_rejects_negative_share() {
        let participants = people(&["alice", "bob"]);
        let err = record("alice", "5.00", &[("alice", "10.00"), ("bob", "-5.00")])
            .validate(1, &participants)
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::NegativeShare { row: 1, ref participant } if participant == "bob"
        ));
    }

    #[test]
    fn test_validate_rejects_share_sum_mismatch() {
        let participants = people(&["alice", "bob"]);
        let err = record("alice", "10.00", &[("alice", "5.00"), ("bob", "4.00")])
            .validate(5, &participants)
            .unwrap_err();

        match err {
            EngineError::ShareSumMismatch {
                row,
                share_total,
                amount,
            } => {
                assert_eq!(row, 5);
                assert_eq!(share_total, money("9.00"));
                assert_eq!(amount, money("10.00"));
            }
            other => panic!("expected ShareSumMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_ignores_shares_for_unknown_names() {
        let participants = people(&["alice", "bob"]);
        let tx = record(
            "alice",
            "10.00",
            &[("alice", "5.00"), ("bob", "5.00"), ("mallory", "99.00")],
        )
        .validate(1, &participants)
        .unwrap();

        // The stray share is dropped and does not break the sum check.
        assert_eq!(tx.shares.len(), 2);
        assert_eq!(tx.share_of("mallory"), Money::ZERO);
    }

    #[test]
    fn test_validate_accepts_uneven_rounding_split() {
        let participants = people(&["alice", "bob", "carol"]);
        let tx = record(
            "alice",
            "10.00",
            &[("alice", "3.33"), ("bob", "3.33"), ("carol", "3.34")],
        )
        .validate(1, &participants)
        .unwrap();

        assert_eq!(tx.share_of("carol"), money("3.34"));
    }
}
