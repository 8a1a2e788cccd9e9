//! The forecast record and its ledger encoding.
//!
//! A forecast is the sole persisted entity: one planned order for a
//! (upc, store) pair, created by the producer organization and later
//! acknowledged by the consumer organization. Records are stored as
//! self-describing JSON; the snake_case field names below are the storage
//! contract and must not change.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ContractError;
use crate::key::ForecastKey;

/// Literal format accepted for date arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed reference time zone for civil date arguments.
///
/// Date arguments carry no zone of their own; they are interpreted at civil
/// midnight in this zone and stored as UTC instants.
pub const REFERENCE_TZ: Tz = chrono_tz::America::Chicago;

/// A planned order and its acknowledgment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
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
    /// Acknowledgment status; empty until acknowledged.
    #[serde(default)]
    pub status: String,
    /// Acknowledgment comments; empty until acknowledged.
    #[serde(default)]
    pub comments: String,
}

impl Forecast {
    /// Returns the ledger key for this record.
    #[must_use]
    pub fn key(&self) -> ForecastKey {
        ForecastKey::new(&self.upc, &self.store_nbr)
    }

    /// Encodes the record for storage.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Serialization` if encoding fails.
    pub fn encode(&self) -> Result<Bytes, ContractError> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|err| ContractError::Serialization {
                message: err.to_string(),
            })
    }

    /// Decodes a stored record.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Deserialization` if the bytes are not a
    /// valid record encoding.
    pub fn decode(data: &[u8]) -> Result<Self, ContractError> {
        serde_json::from_slice(data).map_err(|err| ContractError::Deserialization {
            message: err.to_string(),
        })
    }
}

/// Parses an integer quantity argument.
///
/// Malformed values degrade to zero rather than failing the operation;
/// the degradation is logged. Callers rely on creates succeeding with
/// unparseable quantities, so this is wire behavior, not a bug.
pub(crate) fn parse_quantity(field: &'static str, raw: &str) -> i64 {
    match raw.parse() {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(field, value = raw, error = %err, "malformed quantity, defaulting to 0");
            0
        }
    }
}

/// Parses a `YYYY-MM-DD` date argument at civil midnight in the reference
/// zone, yielding a UTC instant.
///
/// Malformed values degrade to the Unix epoch rather than failing the
/// operation; the degradation is logged. Same wire behavior as the
/// quantity fields.
pub(crate) fn parse_civil_date(field: &'static str, raw: &str) -> DateTime<Utc> {
    let date = match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => date,
        Err(err) => {
            tracing::warn!(field, value = raw, error = %err, "malformed date, defaulting to epoch");
            return DateTime::<Utc>::default();
        }
    };

    // Midnight always exists in the reference zone (DST transitions there
    // happen at 02:00), but fall back rather than panic if a zone change
    // ever makes it ambiguous.
    match REFERENCE_TZ
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
    {
        Some(instant) => instant.with_timezone(&Utc),
        None => {
            tracing::warn!(field, value = raw, "date has no midnight in reference zone, defaulting to epoch");
            DateTime::<Utc>::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Forecast {
        Forecast {
            old_nbr: "100".to_string(),
            upc: "111".to_string(),
            order_dept_nbr: "10".to_string(),
            primary_desc: "Widget".to_string(),
            vnpk_qty: 12,
            whpk_qty: 6,
            vendor_name: "ACME".to_string(),
            store_nbr: "200".to_string(),
            source_dc_nbr: "300".to_string(),
            order_each: 1,
            order_whpk: 2,
            date_this_qty_planned_to_arrive: parse_civil_date("planned", "2024-01-10"),
            date_this_order_should_be_placed: parse_civil_date("placed", "2024-01-01"),
            status: String::new(),
            comments: String::new(),
        }
    }

    #[test]
    fn encode_uses_storage_field_names() {
        let encoded = sample().encode().expect("encode");
        let json: serde_json::Value = serde_json::from_slice(&encoded).expect("json");
        assert_eq!(json["old_nbr"], "100");
        assert_eq!(json["vnpk_qty"], 12);
        assert_eq!(json["date_this_qty_planned_to_arrive"], "2024-01-10T06:00:00Z");
        assert_eq!(json["status"], "");
    }

    #[test]
    fn decode_reads_back_what_encode_wrote() {
        let forecast = sample();
        let decoded = Forecast::decode(&forecast.encode().expect("encode")).expect("decode");
        assert_eq!(decoded, forecast);
    }

    #[test]
    fn decode_rejects_non_record_bytes() {
        let err = Forecast::decode(b"not json").unwrap_err();
        assert!(matches!(err, ContractError::Deserialization { .. }));
    }

    #[test]
    fn key_derives_from_upc_and_store() {
        assert_eq!(sample().key().as_ref(), "111-200");
    }

    #[test]
    fn winter_dates_resolve_at_central_standard_midnight() {
        // America/Chicago is UTC-6 in January.
        let instant = parse_civil_date("planned", "2024-01-10");
        assert_eq!(instant.to_rfc3339(), "2024-01-10T06:00:00+00:00");
    }

    #[test]
    fn summer_dates_resolve_at_central_daylight_midnight() {
        // America/Chicago is UTC-5 in July.
        let instant = parse_civil_date("planned", "2024-07-10");
        assert_eq!(instant.to_rfc3339(), "2024-07-10T05:00:00+00:00");
    }

    #[test]
    fn malformed_date_degrades_to_epoch() {
        let instant = parse_civil_date("planned", "10/01/2024");
        assert_eq!(instant, DateTime::<Utc>::default());
    }

    #[test]
    fn malformed_quantity_degrades_to_zero() {
        assert_eq!(parse_quantity("vnpk_qty", "twelve"), 0);
        assert_eq!(parse_quantity("vnpk_qty", ""), 0);
        assert_eq!(parse_quantity("vnpk_qty", "12"), 12);
    }
}
