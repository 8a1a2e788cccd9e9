//! Typed requests parsed from positional invocation arguments.
//!
//! The transport delivers a flat list of strings. Each operation parses its
//! arguments exactly once, here, into a named structure; nothing downstream
//! indexes into the raw list.

use chrono::{DateTime, Utc};

use crate::error::ContractError;
use crate::forecast::{Forecast, parse_civil_date, parse_quantity};
use crate::key::ForecastKey;

/// A parsed `addForecast` request.
///
/// Argument order is fixed: old_nbr, upc, order_dept_nbr, primary_desc,
/// vnpk_qty, whpk_qty, vendor_name, store_nbr, source_dc_nbr, order_each,
/// order_whpk, date_planned_arrive, date_order_placed.
#[derive(Debug, Clone)]
pub struct CreateForecastRequest {
    /// Legacy item identifier.
    pub old_nbr: String,
    /// Product code; part of the ledger key.
    pub upc: String,
    /// Ordering department number.
    pub order_dept_nbr: String,
    /// Item description.
    pub primary_desc: String,
    /// Vendor-pack quantity.
    pub vnpk_qty: i64,
    /// Warehouse-pack quantity.
    pub whpk_qty: i64,
    /// Vendor name.
    pub vendor_name: String,
    /// Destination store; part of the ledger key.
    pub store_nbr: String,
    /// Originating distribution center.
    pub source_dc_nbr: String,
    /// Ordered eaches.
    pub order_each: i64,
    /// Ordered warehouse packs.
    pub order_whpk: i64,
    /// When the quantity is planned to arrive.
    pub date_this_qty_planned_to_arrive: DateTime<Utc>,
    /// When the order should be placed.
    pub date_this_order_should_be_placed: DateTime<Utc>,
}

impl CreateForecastRequest {
    /// Number of positional arguments this request requires.
    pub const ARG_COUNT: usize = 13;

    /// Parses the positional argument list.
    ///
    /// Quantity and date fields degrade to zero values when malformed (see
    /// [`crate::forecast`]); only the argument count is a hard failure.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::ArgumentCount` if the list length is not
    /// exactly [`Self::ARG_COUNT`].
    pub fn from_args(args: &[String]) -> Result<Self, ContractError> {
        if args.len() != Self::ARG_COUNT {
            return Err(ContractError::ArgumentCount {
                expected: Self::ARG_COUNT,
                actual: args.len(),
            });
        }

        Ok(Self {
            old_nbr: args[0].clone(),
            upc: args[1].clone(),
            order_dept_nbr: args[2].clone(),
            primary_desc: args[3].clone(),
            vnpk_qty: parse_quantity("vnpk_qty", &args[4]),
            whpk_qty: parse_quantity("whpk_qty", &args[5]),
            vendor_name: args[6].clone(),
            store_nbr: args[7].clone(),
            source_dc_nbr: args[8].clone(),
            order_each: parse_quantity("order_each", &args[9]),
            order_whpk: parse_quantity("order_whpk", &args[10]),
            date_this_qty_planned_to_arrive: parse_civil_date(
                "date_this_qty_planned_to_arrive",
                &args[11],
            ),
            date_this_order_should_be_placed: parse_civil_date(
                "date_this_order_should_be_placed",
                &args[12],
            ),
        })
    }

    /// Returns the ledger key this request writes to.
    #[must_use]
    pub fn key(&self) -> ForecastKey {
        ForecastKey::new(&self.upc, &self.store_nbr)
    }

    /// Builds the record to persist; status and comments start empty.
    #[must_use]
    pub fn into_forecast(self) -> Forecast {
        Forecast {
            old_nbr: self.old_nbr,
            upc: self.upc,
            order_dept_nbr: self.order_dept_nbr,
            primary_desc: self.primary_desc,
            vnpk_qty: self.vnpk_qty,
            whpk_qty: self.whpk_qty,
            vendor_name: self.vendor_name,
            store_nbr: self.store_nbr,
            source_dc_nbr: self.source_dc_nbr,
            order_each: self.order_each,
            order_whpk: self.order_whpk,
            date_this_qty_planned_to_arrive: self.date_this_qty_planned_to_arrive,
            date_this_order_should_be_placed: self.date_this_order_should_be_placed,
            status: String::new(),
            comments: String::new(),
        }
    }
}

/// A parsed `ackForecast` request.
#[derive(Debug, Clone)]
pub struct AcknowledgeForecastRequest {
    /// Product code; part of the ledger key.
    pub upc: String,
    /// Destination store; part of the ledger key.
    pub store_nbr: String,
    /// Status to record.
    pub status: String,
    /// Comments to record.
    pub comments: String,
}

impl AcknowledgeForecastRequest {
    /// Number of positional arguments this request requires.
    ///
    /// The wire contract historically accepted three arguments and then
    /// read a fourth anyway; this implementation requires all four.
    pub const ARG_COUNT: usize = 4;

    /// Parses the positional argument list.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::ArgumentCount` if the list length is not
    /// exactly [`Self::ARG_COUNT`].
    pub fn from_args(args: &[String]) -> Result<Self, ContractError> {
        if args.len() != Self::ARG_COUNT {
            return Err(ContractError::ArgumentCount {
                expected: Self::ARG_COUNT,
                actual: args.len(),
            });
        }

        Ok(Self {
            upc: args[0].clone(),
            store_nbr: args[1].clone(),
            status: args[2].clone(),
            comments: args[3].clone(),
        })
    }

    /// Returns the ledger key this request updates.
    #[must_use]
    pub fn key(&self) -> ForecastKey {
        ForecastKey::new(&self.upc, &self.store_nbr)
    }
}

/// A parsed `query` request for a single record.
#[derive(Debug, Clone)]
pub struct QueryForecastRequest {
    /// Product code; part of the ledger key.
    pub upc: String,
    /// Destination store; part of the ledger key.
    pub store_nbr: String,
}

impl QueryForecastRequest {
    /// Number of positional arguments this request requires.
    pub const ARG_COUNT: usize = 2;

    /// Parses the positional argument list.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::ArgumentCount` if the list length is not
    /// exactly [`Self::ARG_COUNT`].
    pub fn from_args(args: &[String]) -> Result<Self, ContractError> {
        if args.len() != Self::ARG_COUNT {
            return Err(ContractError::ArgumentCount {
                expected: Self::ARG_COUNT,
                actual: args.len(),
            });
        }

        Ok(Self {
            upc: args[0].clone(),
            store_nbr: args[1].clone(),
        })
    }

    /// Returns the ledger key this request reads.
    #[must_use]
    pub fn key(&self) -> ForecastKey {
        ForecastKey::new(&self.upc, &self.store_nbr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    fn create_args() -> Vec<String> {
        strings(&[
            "100", "111", "10", "Widget", "12", "6", "ACME", "200", "300", "1", "2",
            "2024-01-10", "2024-01-01",
        ])
    }

    #[test]
    fn create_parses_thirteen_args_in_order() {
        let request = CreateForecastRequest::from_args(&create_args()).expect("request");
        assert_eq!(request.old_nbr, "100");
        assert_eq!(request.upc, "111");
        assert_eq!(request.vnpk_qty, 12);
        assert_eq!(request.store_nbr, "200");
        assert_eq!(request.order_whpk, 2);
        assert_eq!(request.key().as_ref(), "111-200");
    }

    #[test]
    fn create_rejects_wrong_arity() {
        let err = CreateForecastRequest::from_args(&strings(&["100", "111"])).unwrap_err();
        assert!(matches!(
            err,
            ContractError::ArgumentCount {
                expected: 13,
                actual: 2
            }
        ));
    }

    #[test]
    fn create_builds_pending_forecast() {
        let forecast = CreateForecastRequest::from_args(&create_args())
            .expect("request")
            .into_forecast();
        assert!(forecast.status.is_empty());
        assert!(forecast.comments.is_empty());
        assert_eq!(forecast.vendor_name, "ACME");
    }

    #[test]
    fn acknowledge_requires_all_four_args() {
        let err =
            AcknowledgeForecastRequest::from_args(&strings(&["111", "200", "RECEIVED"]))
                .unwrap_err();
        assert!(matches!(
            err,
            ContractError::ArgumentCount {
                expected: 4,
                actual: 3
            }
        ));

        let request =
            AcknowledgeForecastRequest::from_args(&strings(&["111", "200", "RECEIVED", "on time"]))
                .expect("request");
        assert_eq!(request.status, "RECEIVED");
        assert_eq!(request.comments, "on time");
        assert_eq!(request.key().as_ref(), "111-200");
    }

    #[test]
    fn query_requires_two_args() {
        assert!(QueryForecastRequest::from_args(&strings(&["111"])).is_err());
        let request = QueryForecastRequest::from_args(&strings(&["111", "200"])).expect("request");
        assert_eq!(request.key().as_ref(), "111-200");
    }
}
