//! Blocking resolution (hajb).
//!
//! Partitions the roster into active and blocked heirs. The rules live in
//! [`BLOCKING_RULES`] as data: for each heir the table is scanned top to
//! bottom and the first rule whose target matches and whose blocker is
//! present wins. All rules read one presence snapshot taken before any
//! heir is removed, so the outcome does not depend on roster order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::labels::Locale;
use crate::presence::Presence;
use crate::state::{BlockedHeir, EngineState};
use crate::types::{HeirRecord, Relationship};

use Relationship::*;

/// How the blocking heir is referred to in the reason string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockerTitle {
    Son,
    SonOfSon,
    Father,
    Mother,
    FullBrother,
    Daughter,
    DaughterOfSon,
    Grandfather,
    MaleDescendant,
    Brother,
    FullUncle,
}

/// One row of the blocking table.
#[derive(Debug, Clone, Copy)]
pub struct BlockingRule {
    /// Stable identifier, reported alongside blocked heirs
    pub id: &'static str,
    /// Categories this rule can block
    pub targets: &'static [Relationship],
    /// Categories that block, checked in order; the first present one is named
    pub blockers: &'static [Relationship],
    pub title: BlockerTitle,
}

impl BlockingRule {
    pub fn applies_to(&self, relationship: Relationship) -> bool {
        self.targets.contains(&relationship)
    }

    /// The heir that triggers this rule, if present.
    pub fn blocker<'a>(&self, presence: &Presence<'a>) -> Option<&'a HeirRecord> {
        presence.first_of(self.blockers)
    }
}

const GRANDCHILDREN: &[Relationship] = &[SonOfSon, DaughterOfSon];
const GRANDMOTHERS: &[Relationship] = &[PaternalGrandmother, MaternalGrandmother];
const SIBLINGS: &[Relationship] = &Relationship::SIBLINGS;
const PATERNAL_SIBLINGS: &[Relationship] = &[PaternalBrother, PaternalSister];
const MATERNAL_SIBLINGS: &[Relationship] = &[MaternalBrother, MaternalSister];
const COLLATERALS: &[Relationship] = &Relationship::COLLATERALS;

/// The blocking table, in precedence order.
pub const BLOCKING_RULES: &[BlockingRule] = &[
    BlockingRule {
        id: "grandchild_by_son",
        targets: GRANDCHILDREN,
        blockers: &[Son],
        title: BlockerTitle::Son,
    },
    BlockingRule {
        id: "grandfather_by_father",
        targets: &[PaternalGrandfather],
        blockers: &[Father],
        title: BlockerTitle::Father,
    },
    BlockingRule {
        id: "grandmother_by_mother",
        targets: GRANDMOTHERS,
        blockers: &[Mother],
        title: BlockerTitle::Mother,
    },
    BlockingRule {
        id: "paternal_grandmother_by_father",
        targets: &[PaternalGrandmother],
        blockers: &[Father],
        title: BlockerTitle::Father,
    },
    BlockingRule {
        id: "sibling_by_son",
        targets: SIBLINGS,
        blockers: &[Son],
        title: BlockerTitle::Son,
    },
    BlockingRule {
        id: "sibling_by_son_of_son",
        targets: SIBLINGS,
        blockers: &[SonOfSon],
        title: BlockerTitle::SonOfSon,
    },
    BlockingRule {
        id: "sibling_by_father",
        targets: SIBLINGS,
        blockers: &[Father],
        title: BlockerTitle::Father,
    },
    BlockingRule {
        id: "paternal_sibling_by_full_brother",
        targets: PATERNAL_SIBLINGS,
        blockers: &[FullBrother],
        title: BlockerTitle::FullBrother,
    },
    BlockingRule {
        id: "maternal_sibling_by_daughter",
        targets: MATERNAL_SIBLINGS,
        blockers: &[Daughter],
        title: BlockerTitle::Daughter,
    },
    BlockingRule {
        id: "maternal_sibling_by_daughter_of_son",
        targets: MATERNAL_SIBLINGS,
        blockers: &[DaughterOfSon],
        title: BlockerTitle::DaughterOfSon,
    },
    BlockingRule {
        id: "maternal_sibling_by_grandfather",
        targets: MATERNAL_SIBLINGS,
        blockers: &[PaternalGrandfather],
        title: BlockerTitle::Grandfather,
    },
    BlockingRule {
        id: "collateral_by_male_descendant",
        targets: COLLATERALS,
        blockers: &[Son, SonOfSon],
        title: BlockerTitle::MaleDescendant,
    },
    BlockingRule {
        id: "collateral_by_father",
        targets: COLLATERALS,
        blockers: &[Father],
        title: BlockerTitle::Father,
    },
    BlockingRule {
        id: "collateral_by_grandfather",
        targets: COLLATERALS,
        blockers: &[PaternalGrandfather],
        title: BlockerTitle::Grandfather,
    },
    BlockingRule {
        id: "collateral_by_brother",
        targets: COLLATERALS,
        blockers: &[FullBrother, PaternalBrother],
        title: BlockerTitle::Brother,
    },
    BlockingRule {
        id: "paternal_uncle_by_full_uncle",
        targets: &[PaternalUncle],
        blockers: &[FullUncle],
        title: BlockerTitle::FullUncle,
    },
];

/// First rule that blocks `heir`, with the heir it names.
pub fn find_blocker<'a>(
    heir: &HeirRecord,
    presence: &Presence<'a>,
) -> Option<(&'static BlockingRule, &'a HeirRecord)> {
    BLOCKING_RULES
        .iter()
        .filter(|rule| rule.applies_to(heir.relationship))
        .find_map(|rule| rule.blocker(presence).map(|blocker| (rule, blocker)))
}

/// Stage 1: split the roster into active and blocked heirs.
///
/// Heirs flagged `is_blocked` upstream are set aside first and never act
/// as blockers.
pub fn resolve<'a>(roster: &'a [HeirRecord], locale: Locale) -> EngineState<'a> {
    let mut state = EngineState::default();

    let (excluded, candidates): (Vec<&'a HeirRecord>, Vec<&'a HeirRecord>) =
        roster.iter().partition(|heir| heir.is_blocked);

    for heir in excluded {
        debug!(heir_id = %heir.id, "Heir excluded before calculation");
        state.blocked.push(BlockedHeir {
            heir,
            reason: locale.excluded_upstream().to_string(),
            rule: None,
        });
    }

    let snapshot = Presence::of(candidates.iter().copied());

    for heir in candidates {
        match find_blocker(heir, &snapshot) {
            Some((rule, blocker)) => {
                debug!(
                    heir_id = %heir.id,
                    blocker_id = %blocker.id,
                    rule = rule.id,
                    "Heir blocked"
                );
                state.blocked.push(BlockedHeir {
                    heir,
                    reason: locale.blocked_by(rule.title, &blocker.name),
                    rule: Some(rule.id),
                });
            }
            None => state.active.push(heir),
        }
    }

    state
}
