//! Residuary assignment (asabah).
//!
//! The remainder left by the fixed shares goes to exactly one class of
//! heirs: the first entry of [`PRECEDENCE`] that has a member in the active
//! set. Within a class, males take two units for every one a female takes.

use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::labels::Locale;
use crate::presence::Presence;
use crate::ratio;
use crate::state::{EngineState, ShareBasis, ShareEntry};
use crate::types::{HeirRecord, Relationship};

use Relationship::*;

/// A class of residuary heirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ResiduaryClass {
    /// Males of one tier, with the females of that tier riding along.
    Kin {
        males: Relationship,
        females: Option<Relationship>,
    },
    /// A single ascendant taking the residue on top of any fixed share.
    Ascendant { relationship: Relationship },
    /// Sisters made residuary by daughters or son's daughters.
    SistersWithDaughters,
}

impl ResiduaryClass {
    /// Whether this class has someone to take the residue.
    pub fn is_present(&self, presence: &Presence<'_>) -> bool {
        match self {
            Self::Kin { males, .. } => presence.has(*males),
            Self::Ascendant { relationship } => presence.has(*relationship),
            Self::SistersWithDaughters => {
                presence.has_female_descendant()
                    && presence.has_any(&[FullSister, PaternalSister])
            }
        }
    }
}

/// Residuary classes in precedence order.
pub const PRECEDENCE: &[ResiduaryClass] = &[
    ResiduaryClass::Kin {
        males: Son,
        females: Some(Daughter),
    },
    ResiduaryClass::Kin {
        males: SonOfSon,
        females: Some(DaughterOfSon),
    },
    ResiduaryClass::Ascendant {
        relationship: Father,
    },
    ResiduaryClass::Ascendant {
        relationship: PaternalGrandfather,
    },
    ResiduaryClass::SistersWithDaughters,
    ResiduaryClass::Kin {
        males: FullBrother,
        females: Some(FullSister),
    },
    ResiduaryClass::Kin {
        males: PaternalBrother,
        females: Some(PaternalSister),
    },
    ResiduaryClass::Kin {
        males: FullBrothersSon,
        females: None,
    },
    ResiduaryClass::Kin {
        males: PaternalBrothersSon,
        females: None,
    },
    ResiduaryClass::Kin {
        males: FullUncle,
        females: None,
    },
    ResiduaryClass::Kin {
        males: PaternalUncle,
        females: None,
    },
    ResiduaryClass::Kin {
        males: FullUnclesSon,
        females: None,
    },
    ResiduaryClass::Kin {
        males: PaternalUnclesSon,
        females: None,
    },
];

/// The class that takes the residue for this active set.
pub fn claimant(presence: &Presence<'_>) -> Option<ResiduaryClass> {
    PRECEDENCE
        .iter()
        .copied()
        .find(|class| class.is_present(presence))
}

/// Split `remainder` two-to-one between `males` and `females`.
fn distribute(
    state: &mut EngineState<'_>,
    remainder: &BigRational,
    males: &[&HeirRecord],
    females: &[&HeirRecord],
    locale: Locale,
) {
    let Some(unit) = ratio::two_to_one_unit(remainder, males.len(), females.len()) else {
        return;
    };
    let double = &unit + &unit;

    let weighted = males
        .iter()
        .map(|heir| (heir, &double))
        .chain(females.iter().map(|heir| (heir, &unit)));

    for (heir, share) in weighted {
        state.shares.insert(
            heir.id.clone(),
            ShareEntry {
                relationship: heir.relationship,
                label: locale.residuary().to_string(),
                raw: share.clone(),
                basis: ShareBasis::Residuary,
            },
        );
    }
}

/// Give `remainder` to a single ascendant, on top of a fixed 1/6 if held.
fn add_to_ascendant(
    state: &mut EngineState<'_>,
    remainder: &BigRational,
    heir: &HeirRecord,
    locale: Locale,
) {
    match state.shares.get_mut(&heir.id) {
        Some(entry) => {
            entry.raw += remainder;
            entry.label = if entry.basis == ShareBasis::FixedPendingResiduary {
                entry
                    .label
                    .replace(locale.residuary_pending(), locale.residuary())
            } else {
                locale.with_residuary(&entry.label, locale.residuary())
            };
            entry.basis = ShareBasis::FixedAndResiduary;
        }
        None => {
            state.shares.insert(
                heir.id.clone(),
                ShareEntry {
                    relationship: heir.relationship,
                    label: locale.residuary().to_string(),
                    raw: remainder.clone(),
                    basis: ShareBasis::Residuary,
                },
            );
        }
    }
}

/// Stage 3: hand the remainder to the highest-precedence residuary class.
///
/// Skipped entirely when nothing is left. Returns the class that claimed it.
pub fn assign<'a>(
    mut state: EngineState<'a>,
    remainder: &BigRational,
    locale: Locale,
) -> (EngineState<'a>, Option<ResiduaryClass>) {
    if *remainder <= BigRational::zero() {
        debug!(remainder = %remainder, "No remainder for residuaries");
        return (state, None);
    }

    let presence = state.presence();
    let Some(class) = claimant(&presence) else {
        debug!(remainder = %remainder, "No residuary heir present");
        return (state, None);
    };

    match class {
        ResiduaryClass::Kin { males, females } => {
            let females = females.map(|rel| presence.members(rel)).unwrap_or(&[]);
            distribute(&mut state, remainder, presence.members(males), females, locale);
        }
        ResiduaryClass::Ascendant { relationship } => {
            if let Some(heir) = presence.members(relationship).first() {
                add_to_ascendant(&mut state, remainder, heir, locale);
            }
        }
        ResiduaryClass::SistersWithDaughters => {
            let sisters = if presence.has(FullSister) {
                presence.members(FullSister)
            } else {
                presence.members(PaternalSister)
            };
            distribute(&mut state, remainder, &[], sisters, locale);
        }
    }

    info!(class = ?class, remainder = %remainder, "Residue assigned");
    (state, Some(class))
}
