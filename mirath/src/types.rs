//! Core types for the share engine.
//!
//! These types model the heir roster handed in by callers and the share
//! records handed back. Relationships form a closed set so every pipeline
//! stage can match on them exhaustively.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the web front end.

use std::fmt;
use std::str::FromStr;

use num_rational::BigRational;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Kinship of an heir to the deceased.
///
/// Declaration order is the display order used by rosters and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Relationship {
    Husband,
    Wife,
    Son,
    Daughter,
    Father,
    Mother,
    /// Son's son
    SonOfSon,
    /// Son's daughter
    DaughterOfSon,
    /// Father's father
    PaternalGrandfather,
    /// Father's mother
    PaternalGrandmother,
    /// Mother's mother
    MaternalGrandmother,
    FullBrother,
    FullSister,
    /// Brother through the father only
    PaternalBrother,
    /// Sister through the father only
    PaternalSister,
    /// Brother through the mother only
    MaternalBrother,
    /// Sister through the mother only
    MaternalSister,
    /// Son of a full brother
    FullBrothersSon,
    /// Son of a paternal brother
    PaternalBrothersSon,
    /// Father's full brother
    FullUncle,
    /// Father's paternal brother
    PaternalUncle,
    /// Son of a full uncle
    FullUnclesSon,
    /// Son of a paternal uncle
    PaternalUnclesSon,
}

impl Relationship {
    /// Every relationship, in declaration order.
    pub const ALL: [Relationship; 23] = [
        Self::Husband,
        Self::Wife,
        Self::Son,
        Self::Daughter,
        Self::Father,
        Self::Mother,
        Self::SonOfSon,
        Self::DaughterOfSon,
        Self::PaternalGrandfather,
        Self::PaternalGrandmother,
        Self::MaternalGrandmother,
        Self::FullBrother,
        Self::FullSister,
        Self::PaternalBrother,
        Self::PaternalSister,
        Self::MaternalBrother,
        Self::MaternalSister,
        Self::FullBrothersSon,
        Self::PaternalBrothersSon,
        Self::FullUncle,
        Self::PaternalUncle,
        Self::FullUnclesSon,
        Self::PaternalUnclesSon,
    ];

    /// The six sibling categories.
    pub const SIBLINGS: [Relationship; 6] = [
        Self::FullBrother,
        Self::FullSister,
        Self::PaternalBrother,
        Self::PaternalSister,
        Self::MaternalBrother,
        Self::MaternalSister,
    ];

    /// Nephews, uncles and cousins: males who only ever inherit as residuaries.
    pub const COLLATERALS: [Relationship; 6] = [
        Self::FullBrothersSon,
        Self::PaternalBrothersSon,
        Self::FullUncle,
        Self::PaternalUncle,
        Self::FullUnclesSon,
        Self::PaternalUnclesSon,
    ];

    /// Stable machine code, identical to the serde tag.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Husband => "husband",
            Self::Wife => "wife",
            Self::Son => "son",
            Self::Daughter => "daughter",
            Self::Father => "father",
            Self::Mother => "mother",
            Self::SonOfSon => "son_of_son",
            Self::DaughterOfSon => "daughter_of_son",
            Self::PaternalGrandfather => "paternal_grandfather",
            Self::PaternalGrandmother => "paternal_grandmother",
            Self::MaternalGrandmother => "maternal_grandmother",
            Self::FullBrother => "full_brother",
            Self::FullSister => "full_sister",
            Self::PaternalBrother => "paternal_brother",
            Self::PaternalSister => "paternal_sister",
            Self::MaternalBrother => "maternal_brother",
            Self::MaternalSister => "maternal_sister",
            Self::FullBrothersSon => "full_brothers_son",
            Self::PaternalBrothersSon => "paternal_brothers_son",
            Self::FullUncle => "full_uncle",
            Self::PaternalUncle => "paternal_uncle",
            Self::FullUnclesSon => "full_uncles_son",
            Self::PaternalUnclesSon => "paternal_uncles_son",
        }
    }

    /// Arabic name as used on case forms.
    pub fn arabic_name(&self) -> &'static str {
        match self {
            Self::Husband => "زوج",
            Self::Wife => "زوجة",
            Self::Son => "ابن",
            Self::Daughter => "بنت",
            Self::Father => "أب",
            Self::Mother => "أم",
            Self::SonOfSon => "ابن ابن",
            Self::DaughterOfSon => "بنت ابن",
            Self::PaternalGrandfather => "جد (أبو الأب)",
            Self::PaternalGrandmother => "جدة (أم الأب)",
            Self::MaternalGrandmother => "جدة (أم الأم)",
            Self::FullBrother => "أخ شقيق",
            Self::FullSister => "أخت شقيقة",
            Self::PaternalBrother => "أخ لأب",
            Self::PaternalSister => "أخت لأب",
            Self::MaternalBrother => "أخ لأم",
            Self::MaternalSister => "أخت لأم",
            Self::FullBrothersSon => "ابن أخ شقيق",
            Self::PaternalBrothersSon => "ابن أخ لأب",
            Self::FullUncle => "عم شقيق",
            Self::PaternalUncle => "عم لأب",
            Self::FullUnclesSon => "ابن عم شقيق",
            Self::PaternalUnclesSon => "ابن عم لأب",
        }
    }

    /// English name for reports.
    pub fn english_name(&self) -> &'static str {
        match self {
            Self::Husband => "husband",
            Self::Wife => "wife",
            Self::Son => "son",
            Self::Daughter => "daughter",
            Self::Father => "father",
            Self::Mother => "mother",
            Self::SonOfSon => "son's son",
            Self::DaughterOfSon => "son's daughter",
            Self::PaternalGrandfather => "paternal grandfather",
            Self::PaternalGrandmother => "paternal grandmother",
            Self::MaternalGrandmother => "maternal grandmother",
            Self::FullBrother => "full brother",
            Self::FullSister => "full sister",
            Self::PaternalBrother => "paternal half-brother",
            Self::PaternalSister => "paternal half-sister",
            Self::MaternalBrother => "maternal half-brother",
            Self::MaternalSister => "maternal half-sister",
            Self::FullBrothersSon => "full brother's son",
            Self::PaternalBrothersSon => "paternal half-brother's son",
            Self::FullUncle => "full paternal uncle",
            Self::PaternalUncle => "half paternal uncle",
            Self::FullUnclesSon => "full paternal uncle's son",
            Self::PaternalUnclesSon => "half paternal uncle's son",
        }
    }

    /// Gender implied by the relationship.
    pub fn gender(&self) -> Gender {
        match self {
            Self::Wife
            | Self::Daughter
            | Self::Mother
            | Self::DaughterOfSon
            | Self::PaternalGrandmother
            | Self::MaternalGrandmother
            | Self::FullSister
            | Self::PaternalSister
            | Self::MaternalSister => Gender::Female,
            Self::Husband
            | Self::Son
            | Self::Father
            | Self::SonOfSon
            | Self::PaternalGrandfather
            | Self::FullBrother
            | Self::PaternalBrother
            | Self::MaternalBrother
            | Self::FullBrothersSon
            | Self::PaternalBrothersSon
            | Self::FullUncle
            | Self::PaternalUncle
            | Self::FullUnclesSon
            | Self::PaternalUnclesSon => Gender::Male,
        }
    }

    /// Husband or wife.
    pub fn is_spouse(&self) -> bool {
        matches!(self, Self::Husband | Self::Wife)
    }

    pub fn is_sibling(&self) -> bool {
        Self::SIBLINGS.contains(self)
    }

    pub fn is_collateral(&self) -> bool {
        Self::COLLATERALS.contains(self)
    }

    /// Most records of this category a single estate can have, if limited.
    pub fn max_records(&self) -> Option<usize> {
        match self {
            Self::Wife => Some(4),
            Self::Husband
            | Self::Father
            | Self::Mother
            | Self::PaternalGrandfather
            | Self::PaternalGrandmother
            | Self::MaternalGrandmother => Some(1),
            _ => None,
        }
    }

    /// Codes used by older case exports.
    fn legacy_code(&self) -> &'static str {
        match self {
            Self::Husband => "HUSBAND",
            Self::Wife => "WIFE",
            Self::Son => "SON",
            Self::Daughter => "DAUGHTER",
            Self::Father => "FATHER",
            Self::Mother => "MOTHER",
            Self::SonOfSon => "SON_OF_SON",
            Self::DaughterOfSon => "DAUGHTER_OF_SON",
            Self::PaternalGrandfather => "GRANDFATHER_FATHER",
            Self::PaternalGrandmother => "GRANDMOTHER_FATHER",
            Self::MaternalGrandmother => "GRANDMOTHER_MOTHER",
            Self::FullBrother => "BROTHER",
            Self::FullSister => "SISTER",
            Self::PaternalBrother => "BROTHER_FATHER",
            Self::PaternalSister => "SISTER_FATHER",
            Self::MaternalBrother => "BROTHER_MOTHER",
            Self::MaternalSister => "SISTER_MOTHER",
            Self::FullBrothersSon => "SON_OF_BROTHER",
            Self::PaternalBrothersSon => "SON_OF_BROTHER_FATHER",
            Self::FullUncle => "UNCLE",
            Self::PaternalUncle => "UNCLE_FATHER",
            Self::FullUnclesSon => "SON_OF_UNCLE",
            Self::PaternalUnclesSon => "SON_OF_UNCLE_FATHER",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Relationship {
    type Err = MirathError;

    /// Accepts the snake_case code (dashes allowed), the Arabic name, or a legacy code.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase().replace(['-', ' '], "_");

        Self::ALL
            .iter()
            .copied()
            .find(|rel| {
                rel.code() == normalized
                    || rel.arabic_name() == trimmed
                    || rel.legacy_code() == trimmed
            })
            .ok_or_else(|| MirathError::UnknownRelationship(trimmed.to_string()))
    }
}

impl TryFrom<String> for Relationship {
    type Error = MirathError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Gender of an heir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[serde(alias = "ذكر", alias = "m")]
    Male,
    #[serde(alias = "أنثى", alias = "f")]
    Female,
}

/// An heir as supplied by the caller. The engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct HeirRecord {
    /// Stable identifier, unique within a roster
    pub id: String,
    /// Display name
    pub name: String,
    /// Kinship to the deceased
    pub relationship: Relationship,
    /// Defaults to the gender implied by the relationship
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Excluded upstream (homicide, difference of religion, ...)
    #[serde(default)]
    pub is_blocked: bool,
}

impl HeirRecord {
    /// Create an heir whose gender follows from the relationship.
    pub fn new(id: impl Into<String>, name: impl Into<String>, relationship: Relationship) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            relationship,
            gender: Some(relationship.gender()),
            is_blocked: false,
        }
    }

    /// Builder: set an explicit gender.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Builder: mark as excluded before the calculation.
    pub fn excluded(mut self) -> Self {
        self.is_blocked = true;
        self
    }

    /// Declared gender, or the one implied by the relationship.
    pub fn effective_gender(&self) -> Gender {
        self.gender.unwrap_or_else(|| self.relationship.gender())
    }
}

/// The computed share of one heir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ShareRecord {
    /// Legal basis, e.g. "1/4", "عصبة", "1/6 + عصبة"
    pub fraction_label: String,
    /// Exact share of the estate; authoritative for any further arithmetic
    #[serde(with = "ratio_string")]
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub raw_share: BigRational,
    /// Share as a percentage, rounded half-up
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub percentage: Decimal,
    /// Share of the net estate, rounded half-up
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub monetary_value: Decimal,
    pub is_blocked: bool,
    /// Only set for blocked heirs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocking_reason: Option<String>,
}

/// Serializes a rational as `"numer/denom"`.
pub(crate) mod ratio_string {
    use num_rational::BigRational;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigRational, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigRational, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(serde::de::Error::custom)
    }
}

/// Error types for the share engine.
#[derive(Debug, thiserror::Error)]
pub enum MirathError {
    /// Relationship code outside the closed set
    #[error("Unknown relationship: {0}")]
    UnknownRelationship(String),

    /// Net estate below zero
    #[error("Net estate must not be negative, got {0}")]
    NegativeEstate(Decimal),

    /// Two records share one id
    #[error("Duplicate heir id: {0}")]
    DuplicateHeir(String),

    /// Any other malformed heir record
    #[error("Invalid heir {heir_id}: {reason}")]
    InvalidHeir { heir_id: String, reason: String },

    /// Malformed estate totals
    #[error("Invalid estate: {0}")]
    InvalidEstate(String),

    /// Shares do not add up to the whole estate after reconciliation
    #[error("Reconciliation inconsistency: shares total {total} instead of 1")]
    ReconciliationInconsistency { total: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, MirathError>;
