//! Greedy transfer matching over net balances.
//!
//! Converts a group's net balances into a near-minimal, deterministic list
//! of point-to-point transfers that zeroes every balance.

use crate::money::Money;
use log::debug;
use serde::Serialize;
use std::cmp;

/// A directed payment instruction.
///
/// Applying a transfer adds `amount` to the debtor's net balance and
/// subtracts it from the creditor's. The amount is always positive and
/// `from` never equals `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    /// Debtor: the participant making the payment
    pub from: String,

    /// Creditor: the participant receiving the payment
    pub to: String,

    /// Payment amount, 2 decimal places, always > 0
    pub amount: Money,
}

/// Produces transfers that settle the given net balances.
///
/// Greedy largest-to-largest matching: creditors (net > 0) and debtors
/// (net < 0) are each sorted descending by magnitude, then matched pairwise
/// from the top. Each step pays `min(remaining debt, remaining credit)` and
/// advances whichever side (or both) reached exactly zero. Participants with
/// a zero net are never involved.
///
/// The sorts use [`slice::sort_by`], which is guaranteed stable, so equal
/// magnitudes keep the order in which participants appear in `net`. This is
/// a requirement for deterministic output, not an incidental property of the
/// sort routine.
///
/// The transfer count never exceeds `creditors + debtors - 1`. When the net
/// balances sum to zero both sides exhaust together; under upstream rounding
/// drift the loop simply stops once one side is exhausted, leaving the
/// residual cents unresolved rather than inventing a transfer for them.
///
/// Never fails: no creditors or no debtors yields an empty list.
pub fn settle_transfers(net: &[(String, Money)]) -> Vec<Transfer> {
    let mut creditors: Vec<(&str, Money)> = Vec::new();
    let mut debtors: Vec<(&str, Money)> = Vec::new();

    for (participant, balance) in net {
        if balance.is_positive() {
            creditors.push((participant.as_str(), *balance));
        } else if balance.is_negative() {
            debtors.push((participant.as_str(), -*balance));
        }
    }

    // Stable descending sort by magnitude; ties keep first-encounter order.
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let pay = cmp::min(debtors[i].1, creditors[j].1);
        if pay.is_positive() {
            debug!("{} pays {} to {}", debtors[i].0, pay, creditors[j].0);
            transfers.push(Transfer {
                from: debtors[i].0.to_string(),
                to: creditors[j].0.to_string(),
                amount: pay,
            });
        }

        debtors[i].1 -= pay;
        creditors[j].1 -= pay;

        if debtors[i].1.is_zero() {
            i += 1;
        }
        if creditors[j].1.is_zero() {
            j += 1;
        }
    }

    transfers
}
