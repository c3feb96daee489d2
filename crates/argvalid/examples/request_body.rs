//! Validates a couple of request bodies and prints the outcome.
//!
//! Run with `RUST_LOG=argvalid=trace` to see every field being admitted.

use argvalid::prelude::*;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

struct Transfer {
    iban: String,
    amount: f64,
    tags: Vec<String>,
    at: String,
}

fn transfer(body: Option<&Value>) -> FieldResult<Transfer> {
    let payload = Payload::body(body)?;
    let iban = payload.field("iban").string()?.required()?.notnull()?.iban()?;
    let amount = payload
        .field("amount")
        .number()?
        .required()?
        .notnull()?
        .min(0.01)?
        .max(10_000.0)?;
    let tags = payload
        .field("tags")
        .string_array()?
        .trim()
        .trim_array()
        .max_array_length(5)?
        .default_empty_array();
    let at = payload.field("at").date()?.future()?.default_now();
    Ok(Transfer {
        iban: iban.into_value(),
        amount: amount.into_value(),
        tags: tags.into_value(),
        at: argvalid::kinds::date::iso(at.value()),
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bodies = [
        json!({"iban": "FR14 2004 1010 0505 0001 3M02 606", "amount": "250", "tags": [" rent ", ""]}),
        json!({"iban": "FR15 2004 1010 0505 0001 3M02 606", "amount": 250}),
        json!({"iban": "FR1420041010050500013M02606", "amount": 250, "at": "2020-01-01"}),
        json!([]),
    ];

    for body in &bodies {
        match transfer(Some(body)) {
            Ok(transfer) => println!(
                "accepted: {} {} at {} tags={:?}",
                transfer.iban, transfer.amount, transfer.at, transfer.tags
            ),
            Err(err) => match classify(&err) {
                Some(response) => println!(
                    "rejected: {}",
                    serde_json::to_string(&response).unwrap_or_else(|_| err.to_string())
                ),
                None => println!("internal error: {err}"),
            },
        }
    }
}
