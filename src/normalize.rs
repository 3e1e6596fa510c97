// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Statement;
use once_cell::sync::Lazy;
use regex::Regex;

static TERM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}/\d{1,3}$").unwrap());

/// Enforce the transaction invariants on a freshly parsed statement and tag
/// every transaction with its owning account and card number.
///
/// This is the only place account identity enters the pipeline; the parser
/// stays pure text-to-structure. The sign convention is trusted as produced
/// by the protocol contract and never re-derived here.
pub fn normalize(statement: &mut Statement, account_id: &str) {
    let card_number = statement.card_number.clone();
    for t in &mut statement.transactions {
        t.account_id = account_id.to_string();
        t.card_number = card_number.clone();
        t.description = collapse_whitespace(&t.description);

        if t.posting_date.is_empty() {
            t.posting_date = t.transaction_date.clone();
        }

        // Reconcile the installment pair: a well-formed NN/NN term is
        // authoritative for the flag; anything else clears both fields.
        if TERM_RE.is_match(&t.installment_term) {
            t.is_installment = true;
        } else {
            t.installment_term.clear();
            t.is_installment = false;
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
