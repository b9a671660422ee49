// 📒 Rental History - append-only ledger of RENT/RETURN facts
//
// Records are immutable once constructed and the history is additive only:
// nothing is ever removed or rewritten. This is the sole durable ledger of
// business activity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// RECORD KIND
// ============================================================================

/// Transaction direction: a vehicle going out or coming back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Rent,
    Return,
}

impl RecordKind {
    /// Tag as persisted in the records file.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Rent => "RENT",
            RecordKind::Return => "RETURN",
        }
    }

    /// Parse a persisted tag (case-insensitive).
    pub fn parse(tag: &str) -> Option<RecordKind> {
        if tag.eq_ignore_ascii_case("RENT") {
            Some(RecordKind::Rent)
        } else if tag.eq_ignore_ascii_case("RETURN") {
            Some(RecordKind::Return)
        } else {
            None
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RENTAL RECORD
// ============================================================================

/// One logged transaction fact, immutable after construction.
///
/// The vehicle and customer are referenced by natural key (plate / id); the
/// amount is the rental charge for RENT records and the extra fee for
/// RETURN records, and may legitimately be zero or negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalRecord {
    plate: String,
    customer_id: u32,
    date: NaiveDate,
    amount: f64,
    kind: RecordKind,
}

impl RentalRecord {
    pub fn new(
        plate: impl Into<String>,
        customer_id: u32,
        date: NaiveDate,
        amount: f64,
        kind: RecordKind,
    ) -> Self {
        RentalRecord {
            plate: plate.into(),
            customer_id,
            date,
            amount,
            kind,
        }
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn customer_id(&self) -> u32 {
        self.customer_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }
}

// ============================================================================
// RENTAL HISTORY
// ============================================================================

/// Insertion-ordered, append-only log of rental records.
#[derive(Debug, Clone, Default)]
pub struct RentalHistory {
    records: Vec<RentalRecord>,
}

impl RentalHistory {
    pub fn new() -> Self {
        RentalHistory {
            records: Vec::new(),
        }
    }

    /// Append a record. No deduplication, no removal.
    pub fn add_record(&mut self, record: RentalRecord) {
        self.records.push(record);
    }

    /// Full ordered sequence, oldest first.
    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
