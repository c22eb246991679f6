//! Human-readable labels for shares and blocking reasons.
//!
//! Case files are read by judges in Arabic; reports for auditors are often
//! produced in English. Every label the engine emits comes from here.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::blocking::BlockerTitle;
use crate::types::Relationship;

/// Language of labels and reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Arabic,
    English,
}

impl Locale {
    /// Label of a residuary share.
    pub fn residuary(&self) -> &'static str {
        match self {
            Self::Arabic => "عصبة",
            Self::English => "residuary",
        }
    }

    /// Marker on a fixed 1/6 that still awaits the residue.
    ///
    /// Replaced once the residue is added. When nothing is left over, as
    /// under awal, the marker stays in the final label, e.g.
    /// "1/6 + residuary-pending (awal)".
    pub fn residuary_pending(&self) -> &'static str {
        match self {
            Self::Arabic => "عصبة",
            Self::English => "residuary-pending",
        }
    }

    /// Label of a blocked heir.
    pub fn blocked(&self) -> &'static str {
        match self {
            Self::Arabic => "محجوب",
            Self::English => "blocked",
        }
    }

    /// Label of an active heir that ends up with nothing.
    pub fn no_share(&self) -> &'static str {
        match self {
            Self::Arabic => "لا شيء",
            Self::English => "no share",
        }
    }

    /// Suffix added by proportional reduction.
    pub fn awal_suffix(&self) -> &'static str {
        match self {
            Self::Arabic => " (عول)",
            Self::English => " (awal)",
        }
    }

    /// Suffix added by the return of a shortfall.
    pub fn radd_suffix(&self) -> &'static str {
        match self {
            Self::Arabic => " + مع الرد",
            Self::English => " + with-return",
        }
    }

    /// A group fraction split between `count` heirs.
    pub fn divided_by(&self, fraction: &str, count: usize) -> String {
        match self {
            Self::Arabic => format!("{} مقسوم على {}", fraction, count),
            Self::English => format!("{} divided by {}", fraction, count),
        }
    }

    /// The 1/6 that completes a 2/3 female line.
    pub fn completion(&self) -> &'static str {
        match self {
            Self::Arabic => "1/6 (تكملة الثلثين)",
            Self::English => "1/6 (completion of 2/3)",
        }
    }

    /// A fixed fraction followed by a residuary marker.
    pub fn with_residuary(&self, fraction: &str, marker: &str) -> String {
        format!("{} + {}", fraction, marker)
    }

    /// Reason naming the heir that caused the block.
    pub fn blocked_by(&self, title: BlockerTitle, blocker_name: &str) -> String {
        match self {
            Self::Arabic => format!("تم الحجب بواسطة {} ({})", self.title(title), blocker_name),
            Self::English => format!("blocked by the {} ({})", self.title(title), blocker_name),
        }
    }

    /// Reason for heirs excluded before the calculation started.
    pub fn excluded_upstream(&self) -> &'static str {
        match self {
            Self::Arabic => "ممنوع من الإرث لمانع سابق على الحساب",
            Self::English => "excluded from inheritance before calculation",
        }
    }

    /// Display name of a relationship.
    pub fn relationship(&self, relationship: Relationship) -> &'static str {
        match self {
            Self::Arabic => relationship.arabic_name(),
            Self::English => relationship.english_name(),
        }
    }

    fn title(&self, title: BlockerTitle) -> &'static str {
        match (self, title) {
            (Self::Arabic, BlockerTitle::Son) => "الابن",
            (Self::Arabic, BlockerTitle::SonOfSon) => "ابن الابن",
            (Self::Arabic, BlockerTitle::Father) => "الأب",
            (Self::Arabic, BlockerTitle::Mother) => "الأم",
            (Self::Arabic, BlockerTitle::FullBrother) => "الأخ الشقيق",
            (Self::Arabic, BlockerTitle::Daughter) => "البنت",
            (Self::Arabic, BlockerTitle::DaughterOfSon) => "بنت الابن",
            (Self::Arabic, BlockerTitle::Grandfather) => "الجد",
            (Self::Arabic, BlockerTitle::MaleDescendant) => "الفرع الوارث الذكر",
            (Self::Arabic, BlockerTitle::Brother) => "الأخ",
            (Self::Arabic, BlockerTitle::FullUncle) => "العم الشقيق",
            (Self::English, BlockerTitle::Son) => "son",
            (Self::English, BlockerTitle::SonOfSon) => "son's son",
            (Self::English, BlockerTitle::Father) => "father",
            (Self::English, BlockerTitle::Mother) => "mother",
            (Self::English, BlockerTitle::FullBrother) => "full brother",
            (Self::English, BlockerTitle::Daughter) => "daughter",
            (Self::English, BlockerTitle::DaughterOfSon) => "son's daughter",
            (Self::English, BlockerTitle::Grandfather) => "grandfather",
            (Self::English, BlockerTitle::MaleDescendant) => "male descendant",
            (Self::English, BlockerTitle::Brother) => "brother",
            (Self::English, BlockerTitle::FullUncle) => "full uncle",
        }
    }
}
