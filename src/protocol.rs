// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use crate::models::{Statement, Transaction};
use rust_decimal::Decimal;

/// Build the single instruction payload sent to the reasoning service.
/// The payload pins down the exact reply grammar so that `parse_reply` can
/// decode the answer without any heuristics.
pub fn build_prompt(statement_text: &str) -> String {
    format!(
        r#"Parse the following credit-card statement text and extract the statement header and all transactions.

First, output the statement header on the FIRST line in this exact format:
HEADER|card_number|total_payment|minimum_payment|payment_due_date|credit_line

Rules for the header:
- card_number: The credit card number (may be partially masked, e.g. "1234-56XX-XXXX-7890")
- total_payment: Total payment amount as a number
- minimum_payment: Minimum payment amount as a number
- payment_due_date: Payment due date in format YYYY-MM-DD
- credit_line: Credit line/limit as a number
- If any field is not found, use an empty string for text fields and 0 for numeric fields

Then output each transaction on its own line in pipe-delimited format:
transaction_date|posting_date|description|amount|is_installment|installment_term

Rules for transactions:
- transaction_date: The date the transaction occurred (format: YYYY-MM-DD)
- posting_date: The date the transaction was posted (format: YYYY-MM-DD); use transaction_date if not available
- description: The transaction description with extra whitespace removed
- amount: The transaction amount as a number. Use NEGATIVE values for credits/refunds/payments (marked with a "CR" suffix or a trailing "-"). Use POSITIVE values for purchases/charges.
  - Example: "31,751.00 CR" becomes -31751.00 (credit/payment)
  - Example: "14.20-" becomes -14.20 (payment/credit)
  - Example: "1,070.00" becomes 1070.00 (purchase/charge)
- is_installment: "true" if this is an installment transaction, "false" otherwise
- installment_term: For installments, the current/total term marker (e.g. "009/010" means 9th of 10 payments). Empty string otherwise.

For installment transactions:
- They may appear in a dedicated "Installment" section OR inline in the description
- The term marker looks like "009/010", "04/06", or "10/10" (current term / total terms)
- Inline form: the marker follows the merchant name, e.g. "ZOOM CAMERA-WEST GATE 10/10" or "2C2P *LAZADA 04/06"; extract the marker as installment_term
- When a line carries both a pre-installment and a per-installment amount, use the RIGHTMOST amount, e.g. "13,281.00  009/010  6,640.50" means 6,640.50
- ANY transaction carrying a digits/digits marker must have is_installment=true

Determining the year when transaction dates only show day/month (e.g. "17/12"):
- Use the statement's PAYMENT DATE to infer the year; it is usually "DD/MM/YY" (e.g. "06/02/25" means 2025)
- If the transaction's month is greater than the payment month, the transaction belongs to the previous year
- Example: payment date 06/02/25 -> "17/12" is 2024-12-17 and "05/01" is 2025-01-05

Output ONLY the HEADER line followed by the transaction lines. No other text.

Statement Text:
{statement_text}"#
    )
}

/// Decode a reply conforming to the grammar above into a `Statement`.
///
/// Deterministic and tolerant: the first HEADER line wins and later ones are
/// ignored; any line that is not exactly six pipe-delimited fields, or whose
/// amount does not parse, is skipped silently. The only hard failure is a
/// reply that trims to nothing.
pub fn parse_reply(reply: &str) -> Result<Statement, PipelineError> {
    if reply.trim().is_empty() {
        return Err(PipelineError::EmptyReply);
    }

    let mut statement = Statement::default();
    let mut header_seen = false;

    for line in reply.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() != 6 {
            continue;
        }

        if parts[0].trim() == "HEADER" {
            if header_seen {
                continue;
            }
            header_seen = true;
            statement.card_number = parts[1].trim().to_string();
            statement.total_payment = parse_amount(parts[2]);
            statement.minimum_payment = parse_amount(parts[3]);
            statement.payment_due_date = parts[4].trim().to_string();
            statement.credit_line = parse_amount(parts[5]);
            continue;
        }

        let Ok(amount) = parts[3].trim().parse::<Decimal>() else {
            continue;
        };

        statement.transactions.push(Transaction {
            account_id: String::new(),
            card_number: String::new(),
            transaction_date: parts[0].trim().to_string(),
            posting_date: parts[1].trim().to_string(),
            description: parts[2].trim().to_string(),
            amount,
            is_installment: parts[4].trim() == "true",
            installment_term: parts[5].trim().to_string(),
        });
    }

    Ok(statement)
}

/// Render a statement back into the reply grammar. The inverse of
/// `parse_reply` modulo numeric formatting; also handy as a fixture
/// generator when testing against a fake reasoning client.
pub fn encode_statement(statement: &Statement) -> String {
    let mut out = format!(
        "HEADER|{}|{}|{}|{}|{}",
        statement.card_number,
        statement.total_payment,
        statement.minimum_payment,
        statement.payment_due_date,
        statement.credit_line
    );
    for t in &statement.transactions {
        out.push('\n');
        out.push_str(&format!(
            "{}|{}|{}|{}|{}|{}",
            t.transaction_date,
            t.posting_date,
            t.description,
            t.amount,
            t.is_installment,
            t.installment_term
        ));
    }
    out
}

fn parse_amount(field: &str) -> Decimal {
    field.trim().parse::<Decimal>().unwrap_or_default()
}
