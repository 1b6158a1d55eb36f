use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParseAnnotationError {
    #[error("Unknown condition grade: {0}")]
    Condition(String),
    #[error("Unknown acquisition origin: {0}")]
    Origin(String),
}

/// Goldmine grading scale, best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Condition {
    Mint,
    NearMint,
    VeryGoodPlus,
    VeryGood,
    Good,
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Condition::Mint,
        Condition::NearMint,
        Condition::VeryGoodPlus,
        Condition::VeryGood,
        Condition::Good,
        Condition::Poor,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Condition::Mint => "M",
            Condition::NearMint => "NM",
            Condition::VeryGoodPlus => "VG+",
            Condition::VeryGood => "VG",
            Condition::Good => "G",
            Condition::Poor => "P",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Condition::Mint => "Mint",
            Condition::NearMint => "Near Mint",
            Condition::VeryGoodPlus => "Very Good Plus",
            Condition::VeryGood => "Very Good",
            Condition::Good => "Good",
            Condition::Poor => "Poor",
        }
    }

    /// Label written to the document, e.g. `Very Good Plus (VG+)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name(), self.code())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Accepts the full label, the bare name, the code, or the name without
/// spaces (`VeryGoodPlus`), case-insensitively.
impl FromStr for Condition {
    type Err = ParseAnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Condition::ALL
            .into_iter()
            .find(|c| {
                let name = c.name().to_lowercase();
                wanted == c.label().to_lowercase()
                    || wanted == name
                    || wanted == c.code().to_lowercase()
                    || wanted == name.replace(' ', "")
            })
            .ok_or_else(|| ParseAnnotationError::Condition(s.to_string()))
    }
}

/// How the record entered the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcquisitionOrigin {
    Purchase,
    Gift,
    Inheritance,
    Find,
}

impl AcquisitionOrigin {
    pub const ALL: [AcquisitionOrigin; 4] = [
        AcquisitionOrigin::Purchase,
        AcquisitionOrigin::Gift,
        AcquisitionOrigin::Inheritance,
        AcquisitionOrigin::Find,
    ];

    /// Label written to the document.
    pub fn label(&self) -> &'static str {
        match self {
            AcquisitionOrigin::Purchase => "Compra",
            AcquisitionOrigin::Gift => "Regalo",
            AcquisitionOrigin::Inheritance => "Herencia",
            AcquisitionOrigin::Find => "Hallazgo",
        }
    }

    fn english(&self) -> &'static str {
        match self {
            AcquisitionOrigin::Purchase => "purchase",
            AcquisitionOrigin::Gift => "gift",
            AcquisitionOrigin::Inheritance => "inheritance",
            AcquisitionOrigin::Find => "find",
        }
    }
}

impl fmt::Display for AcquisitionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AcquisitionOrigin {
    type Err = ParseAnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AcquisitionOrigin::ALL
            .into_iter()
            .find(|o| wanted == o.label().to_lowercase() || wanted == o.english())
            .ok_or_else(|| ParseAnnotationError::Origin(s.to_string()))
    }
}

/// Personal notes about one copy of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub media_condition: Condition,
    pub sleeve_condition: Condition,
    pub acquired_on: NaiveDate,
    pub origin: AcquisitionOrigin,
    /// Known defects, e.g. "skips on track 3".
    pub warnings: String,
    /// Review or memories; becomes the document body.
    pub history: String,
}

impl Annotation {
    /// Best grades, bought on `acquired_on`, no notes.
    pub fn new(acquired_on: NaiveDate) -> Self {
        Self {
            media_condition: Condition::Mint,
            sleeve_condition: Condition::Mint,
            acquired_on,
            origin: AcquisitionOrigin::Purchase,
            warnings: String::new(),
            history: String::new(),
        }
    }
}
