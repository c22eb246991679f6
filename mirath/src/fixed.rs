//! Fixed-share assignment (faraid).
//!
//! Each active heir is matched on its relationship against a presence
//! snapshot of the active set. Categories without a fixed fraction fall
//! through to the residuary stage.

use num_rational::BigRational;
use num_traits::One;
use tracing::debug;

use crate::labels::Locale;
use crate::presence::Presence;
use crate::ratio::ShareRatioExt;
use crate::state::{EngineState, ShareBasis, ShareEntry};
use crate::types::Relationship;

/// A fixed share for one heir.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedShare {
    pub raw: BigRational,
    pub label: String,
    pub pending_residuary: bool,
}

impl FixedShare {
    fn plain(raw: BigRational, label: impl Into<String>) -> Self {
        Self {
            raw,
            label: label.into(),
            pending_residuary: false,
        }
    }
}

/// `fraction` split among `count` members of a group.
fn group_share(fraction: (u64, u64), count: usize, label: String) -> Option<FixedShare> {
    BigRational::frac(fraction.0, fraction.1)
        .per_capita(count)
        .map(|raw| FixedShare::plain(raw, label))
}

/// One heir gets 1/2, several split 2/3.
fn half_or_two_thirds(count: usize) -> Option<FixedShare> {
    match count {
        0 => None,
        1 => Some(FixedShare::plain(BigRational::frac(1, 2), "1/2")),
        n => group_share((2, 3), n, "2/3".to_string()),
    }
}

/// Father and paternal grandfather share the same rule.
fn ascendant_share(presence: &Presence<'_>, locale: Locale) -> Option<FixedShare> {
    if presence.has_male_descendant() {
        Some(FixedShare::plain(BigRational::frac(1, 6), "1/6"))
    } else if presence.has_female_descendant() {
        Some(FixedShare {
            raw: BigRational::frac(1, 6),
            label: locale.with_residuary("1/6", locale.residuary_pending()),
            pending_residuary: true,
        })
    } else {
        None
    }
}

/// Spouse share: `with_descendant` or `without`, split among `count` spouses.
fn spouse_share(
    presence: &Presence<'_>,
    count: usize,
    with_descendant: (u64, u64),
    without: (u64, u64),
    locale: Locale,
) -> Option<FixedShare> {
    let fraction = if presence.has_descendant() {
        with_descendant
    } else {
        without
    };
    let base = format!("{}/{}", fraction.0, fraction.1);
    let label = if count > 1 {
        locale.divided_by(&base, count)
    } else {
        base
    };
    group_share(fraction, count, label)
}

/// Fixed share of an heir of `relationship` given the active set, if any.
pub fn fixed_share(
    relationship: Relationship,
    presence: &Presence<'_>,
    locale: Locale,
) -> Option<FixedShare> {
    use Relationship::*;

    match relationship {
        Husband => spouse_share(presence, 1, (1, 4), (1, 2), locale),
        Wife => spouse_share(presence, presence.count(Wife), (1, 8), (1, 4), locale),
        Father | PaternalGrandfather => ascendant_share(presence, locale),
        Mother => {
            // TODO: umariyatan (spouse + father + mother) gives the mother 1/3 of the remainder.
            if presence.has_descendant() || presence.sibling_count() >= 2 {
                Some(FixedShare::plain(BigRational::frac(1, 6), "1/6"))
            } else {
                Some(FixedShare::plain(BigRational::frac(1, 3), "1/3"))
            }
        }
        PaternalGrandmother | MaternalGrandmother => group_share(
            (1, 6),
            presence.count_of(&[PaternalGrandmother, MaternalGrandmother]),
            "1/6".to_string(),
        ),
        Daughter => {
            if presence.has(Son) {
                None
            } else {
                half_or_two_thirds(presence.count(Daughter))
            }
        }
        DaughterOfSon => {
            if presence.has_male_descendant() {
                return None;
            }
            match presence.count(Daughter) {
                0 => half_or_two_thirds(presence.count(DaughterOfSon)),
                1 => group_share(
                    (1, 6),
                    presence.count(DaughterOfSon),
                    locale.completion().to_string(),
                ),
                _ => None,
            }
        }
        FullSister => {
            let excluded = presence.has(FullBrother)
                || presence.has_male_descendant()
                || presence.has(Father)
                || presence.has_female_descendant();
            if excluded {
                None
            } else {
                half_or_two_thirds(presence.count(FullSister))
            }
        }
        PaternalSister => {
            let excluded = presence.has_any(&[FullBrother, PaternalBrother, Father])
                || presence.has_descendant();
            if excluded {
                return None;
            }
            match presence.count(FullSister) {
                0 => half_or_two_thirds(presence.count(PaternalSister)),
                1 => group_share(
                    (1, 6),
                    presence.count(PaternalSister),
                    locale.completion().to_string(),
                ),
                _ => None,
            }
        }
        MaternalBrother | MaternalSister => {
            let count = presence.count_of(&[MaternalBrother, MaternalSister]);
            match count {
                0 => None,
                1 => Some(FixedShare::plain(BigRational::frac(1, 6), "1/6")),
                n => group_share((1, 3), n, "1/3".to_string()),
            }
        }
        Son | SonOfSon | FullBrother | PaternalBrother | FullBrothersSon
        | PaternalBrothersSon | FullUncle | PaternalUncle | FullUnclesSon
        | PaternalUnclesSon => None,
    }
}

/// Stage 2: assign fixed shares and return `1 - sum(fixed)`.
///
/// The remainder may be negative; reconciliation deals with that.
pub fn assign<'a>(mut state: EngineState<'a>, locale: Locale) -> (EngineState<'a>, BigRational) {
    let presence = state.presence();

    for heir in &state.active {
        if let Some(share) = fixed_share(heir.relationship, &presence, locale) {
            debug!(
                heir_id = %heir.id,
                relationship = %heir.relationship,
                share = %share.raw,
                "Fixed share assigned"
            );
            let basis = if share.pending_residuary {
                ShareBasis::FixedPendingResiduary
            } else {
                ShareBasis::Fixed
            };
            state.shares.insert(
                heir.id.clone(),
                ShareEntry {
                    relationship: heir.relationship,
                    label: share.label,
                    raw: share.raw,
                    basis,
                },
            );
        }
    }

    let remainder = BigRational::one() - state.total_assigned();
    debug!(remainder = %remainder, "Fixed shares assigned");
    (state, remainder)
}
