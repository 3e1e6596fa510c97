// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One parsed statement: header summary plus its transactions in the order
/// they appeared in the source text. A statement is a transient parse result;
/// only its aggregate snapshot and the flat transaction rows are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statement {
    /// Possibly partially masked, e.g. "1234-56XX-XXXX-7890".
    pub card_number: String,
    pub total_payment: Decimal,
    pub minimum_payment: Decimal,
    /// YYYY-MM-DD, empty when the statement does not state one.
    pub payment_due_date: String,
    pub credit_line: Decimal,
    pub transactions: Vec<Transaction>,
}

/// One statement line item.
///
/// Sign convention: positive = purchase/charge, negative = credit, refund,
/// or payment received. `installment_term` is non-empty iff `is_installment`
/// is true; the normalizer reconciles the two before anything is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned by the pipeline, never by the parser.
    pub account_id: String,
    pub card_number: String,
    pub transaction_date: String,
    /// Defaults to `transaction_date` when the statement does not state one.
    pub posting_date: String,
    pub description: String,
    pub amount: Decimal,
    pub is_installment: bool,
    /// "NN/NN" current/total marker, e.g. "04/06"; empty for non-installments.
    pub installment_term: String,
}
