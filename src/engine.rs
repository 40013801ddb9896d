//! Settlement request pipeline.
//!
//! Reads a JSON request, validates it transaction by transaction, runs the
//! balance accumulator and the transfer matcher, and serializes the result.
//! Each request is handled with fresh local state; nothing is retained
//! between calls, so the pipeline is safe to invoke concurrently.

use crate::balance::{compute_balances, BalanceSheet};
use crate::error::{EngineError, Result};
use crate::money::Money;
use crate::settle::{settle_transfers, Transfer};
use crate::transaction::SettlementRequest;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};

/// The outcome of one settlement request.
#[derive(Debug, Clone)]
pub struct Settlement {
    /// Per-participant paid/consumed/net totals
    pub balances: BalanceSheet,

    /// Transfers that zero every net balance
    pub transfers: Vec<Transfer>,
}

/// Validates a request and computes its settlement.
///
/// The participant list must be non-empty and duplicate-free. Transactions
/// are validated in input order and the first failure aborts the request;
/// the error names the offending transaction by 1-based position. Valid
/// requests cannot fail past validation.
pub fn settle_request(request: &SettlementRequest) -> Result<Settlement> {
    if request.people.is_empty() {
        return Err(EngineError::NoParticipants);
    }

    let mut seen = HashSet::new();
    for name in &request.people {
        if !seen.insert(name.as_str()) {
            return Err(EngineError::DuplicateParticipant { name: name.clone() });
        }
    }

    let mut transactions = Vec::with_capacity(request.transactions.len());
    for (idx, record) in request.transactions.iter().enumerate() {
        let row = idx + 1;
        let tx = record.validate(row, &request.people)?;
        debug!(
            "Transaction {}: {} paid {} across {} participants",
            row,
            tx.payer,
            tx.amount,
            request.people.len()
        );
        transactions.push(tx);
    }

    let balances = compute_balances(&request.people, &transactions);
    let transfers = settle_transfers(&balances.net_balances());

    debug!(
        "Settled {} transactions with {} transfers",
        transactions.len(),
        transfers.len()
    );

    Ok(Settlement {
        balances,
        transfers,
    })
}

/// Reads and deserializes a JSON settlement request.
pub fn read_request<R: Read>(reader: R) -> Result<SettlementRequest> {
    Ok(serde_json::from_reader(reader)?)
}

/// Writes a settlement as pretty-printed JSON.
///
/// Balance maps are keyed by participant name and sorted by name so the
/// output is deterministic and reproducible.
pub fn write_output<W: Write>(settlement: &Settlement, mut writer: W) -> Result<()> {
    #[derive(Serialize)]
    struct BalancesOut<'a> {
        paid: BTreeMap<&'a str, Money>,
        consumed: BTreeMap<&'a str, Money>,
        net: BTreeMap<&'a str, Money>,
    }

    #[derive(Serialize)]
    struct SettlementOut<'a> {
        balances: BalancesOut<'a>,
        transfers: &'a [Transfer],
    }

    let mut balances = BalancesOut {
        paid: BTreeMap::new(),
        consumed: BTreeMap::new(),
        net: BTreeMap::new(),
    };
    for entry in settlement.balances.entries() {
        balances.paid.insert(&entry.participant, entry.paid);
        balances.consumed.insert(&entry.participant, entry.consumed);
        balances.net.insert(&entry.participant, entry.net);
    }

    let out = SettlementOut {
        balances,
        transfers: &settlement.transfers,
    };

    serde_json::to_writer_pretty(&mut writer, &out)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn settle_json(json: &str) -> Result<Settlement> {
        settle_request(&read_request(Cursor::new(json))?)
    }

    #[test]
    fn test_even_split_end_to_end() {
        let json = r#"{
            "people": ["alice", "bob"],
            "transactions": [
                {"payer": "alice", "amount": 10.0,
                 "shares": {"alice": 5.0, "bob": 5.0}}
            ]
        }"#;

        let settlement = settle_json(json).unwrap();

        let alice = settlement.balances.get("alice").unwrap();
        assert_eq!(alice.paid, money("10.00"));
        assert_eq!(alice.net, money("5.00"));

        assert_eq!(settlement.transfers.len(), 1);
        assert_eq!(settlement.transfers[0].from, "bob");
        assert_eq!(settlement.transfers[0].to, "alice");
        assert_eq!(settlement.transfers[0].amount, money("5.00"));
    }

    #[test]
    fn test_no_transactions_yields_empty_transfers() {
        let json = r#"{"people": ["alice", "bob"]}"#;
        let settlement = settle_json(json).unwrap();
        assert!(settlement.transfers.is_empty());
        assert_eq!(settlement.balances.entries().len(), 2);
    }

    #[test]
    fn test_empty_people_rejected() {
        let err = settle_json(r#"{"people": []}"#).unwrap_err();
        assert!(matches!(err, EngineError::NoParticipants));
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let err = settle_json(r#"{"people": ["alice", "alice"]}"#).unwrap_err();
        assert!(matches!(
            err,
            EngineError::DuplicateParticipant { ref name } if name == "alice"
        ));
    }

    #[test]
    fn test_first_invalid_transaction_reported() {
        let json = r#"{
            "people": ["alice", "bob"],
            "transactions": [
                {"payer": "alice", "amount": 4.0,
                 "shares": {"alice": 2.0, "bob": 2.0}},
                {"payer": "mallory", "amount": 1.0, "shares": {"alice": 1.0}},
                {"payer": "bob", "amount": -1.0, "shares": {}}
            ]
        }"#;

        let err = settle_json(json).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownPayer { row: 2, ref payer } if payer == "mallory"
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = settle_json("{not json").unwrap_err();
        assert!(matches!(err, EngineError::Json(_)));
    }

    #[test]
    fn test_output_shape() {
        let json = r#"{
            "people": ["alice", "bob"],
            "transactions": [
                {"payer": "alice", "amount": 10.0,
                 "shares": {"alice": 5.0, "bob": 5.0}}
            ]
        }"#;

        let settlement = settle_json(json).unwrap();
        let mut out = Vec::new();
        write_output(&settlement, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["balances"]["paid"]["alice"], "10.00");
        assert_eq!(value["balances"]["consumed"]["bob"], "5.00");
        assert_eq!(value["balances"]["net"]["bob"], "-5.00");
        assert_eq!(value["transfers"][0]["from"], "bob");
        assert_eq!(value["transfers"][0]["amount"], "5.00");
    }

    #[test]
    fn test_shares_default_to_zero_when_absent() {
        // One participant consumes everything; the other's share is absent.
        let json = r#"{
            "people": ["alice", "bob"],
            "transactions": [
                {"payer": "alice", "amount": 8.0, "shares": {"bob": 8.0}}
            ]
        }"#;

        let settlement = settle_json(json).unwrap();
        assert_eq!(settlement.balances.get("alice").unwrap().net, money("8.00"));
        assert_eq!(settlement.balances.get("bob").unwrap().net, money("-8.00"));
    }
}
