//! End-to-end share computation scenarios
//!
//! Runs complete rosters through the engine and checks:
//! - Spouse, parent and child shares against worked cases
//! - Residuary splits and blocking reasons
//! - Awal and radd reconciliation
//! - Net-estate derivation feeding the engine

use mirath::{
    compute, EngineConfig, EstateTotals, HeirCounts, HeirRecord, Locale, NetEstate,
    Reconciliation, Relationship, ResiduaryClass, RosterBuilder, ShareEngine,
};
use num_rational::BigRational;
use num_traits::One;
use rust_decimal_macros::dec;

use Relationship::*;

fn english() -> ShareEngine {
    ShareEngine::with_config(EngineConfig::with_locale(Locale::English)).unwrap()
}

fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(n.into(), d.into())
}

// =============================================================================
// Basic Cases
// =============================================================================

#[test]
fn test_husband_and_son() {
    let heirs = vec![
        HeirRecord::new("h", "Khalid", Husband),
        HeirRecord::new("s", "Omar", Son),
    ];
    let dist = compute(dec!(100000), &heirs).unwrap();

    let husband = dist.get("h").unwrap();
    assert_eq!(husband.fraction_label, "1/4");
    assert_eq!(husband.monetary_value, dec!(25000));

    let son = dist.get("s").unwrap();
    assert_eq!(son.fraction_label, "عصبة");
    assert_eq!(son.monetary_value, dec!(75000));
    assert_eq!(dist.reconciliation, Reconciliation::Balanced);
}

#[test]
fn test_son_and_daughter_split_two_to_one() {
    let heirs = vec![
        HeirRecord::new("1", "Son", Son),
        HeirRecord::new("2", "Daughter", Daughter),
    ];
    let dist = english().compute(dec!(1000), &heirs).unwrap();

    assert_eq!(dist.get("1").unwrap().monetary_value, dec!(666.67));
    assert_eq!(dist.get("2").unwrap().monetary_value, dec!(333.33));
    assert_eq!(dist.get("2").unwrap().raw_share, ratio(1, 3));
    assert_eq!(dist.total_value(), dec!(1000));
    assert_eq!(
        dist.residuary_class,
        Some(ResiduaryClass::Kin {
            males: Son,
            females: Some(Daughter)
        })
    );
}

#[test]
fn test_father_mother_and_son() {
    let heirs = vec![
        HeirRecord::new("f", "Father", Father),
        HeirRecord::new("m", "Mother", Mother),
        HeirRecord::new("s", "Son", Son),
    ];
    let dist = english().compute(dec!(1000), &heirs).unwrap();

    assert_eq!(dist.get("f").unwrap().fraction_label, "1/6");
    assert_eq!(dist.get("f").unwrap().monetary_value, dec!(166.67));
    assert_eq!(dist.get("m").unwrap().monetary_value, dec!(166.67));
    assert_eq!(dist.get("s").unwrap().raw_share, ratio(2, 3));
    assert_eq!(dist.get("s").unwrap().monetary_value, dec!(666.67));
    assert_eq!(dist.total_raw_share(), BigRational::one());
}

#[test]
fn test_father_with_daughter_takes_residue() {
    let heirs = vec![
        HeirRecord::new("f", "Father", Father),
        HeirRecord::new("d", "Daughter", Daughter),
    ];
    let dist = english().compute(dec!(600), &heirs).unwrap();

    let father = dist.get("f").unwrap();
    assert_eq!(father.fraction_label, "1/6 + residuary");
    assert_eq!(father.monetary_value, dec!(300));
    assert_eq!(dist.get("d").unwrap().monetary_value, dec!(300));
}

#[test]
fn test_mother_with_two_brothers() {
    let heirs = vec![
        HeirRecord::new("m", "Mother", Mother),
        HeirRecord::new("b1", "Brother 1", FullBrother),
        HeirRecord::new("b2", "Brother 2", FullBrother),
    ];
    let dist = english().compute(dec!(1200), &heirs).unwrap();

    assert_eq!(dist.get("m").unwrap().fraction_label, "1/6");
    assert_eq!(dist.get("m").unwrap().monetary_value, dec!(200));
    assert_eq!(dist.get("b1").unwrap().monetary_value, dec!(500));
}

#[test]
fn test_four_wives_share_an_eighth() {
    let mut heirs: Vec<_> = (1..=4)
        .map(|i| HeirRecord::new(format!("w{}", i), format!("Wife {}", i), Wife))
        .collect();
    heirs.push(HeirRecord::new("s", "Son", Son));
    let dist = english().compute(dec!(3200), &heirs).unwrap();

    let wife = dist.get("w3").unwrap();
    assert_eq!(wife.fraction_label, "1/8 divided by 4");
    assert_eq!(wife.raw_share, ratio(1, 32));
    assert_eq!(wife.monetary_value, dec!(100));
    assert_eq!(dist.get("s").unwrap().monetary_value, dec!(2800));
}

#[test]
fn test_grandmothers_share_a_sixth() {
    let heirs = vec![
        HeirRecord::new("1", "Paternal grandmother", PaternalGrandmother),
        HeirRecord::new("2", "Maternal grandmother", MaternalGrandmother),
        HeirRecord::new("3", "Son", Son),
    ];
    let dist = english().compute(dec!(1200), &heirs).unwrap();

    assert_eq!(dist.get("1").unwrap().raw_share, ratio(1, 12));
    assert_eq!(dist.get("2").unwrap().monetary_value, dec!(100));
    assert_eq!(dist.get("3").unwrap().monetary_value, dec!(1000));
}

// =============================================================================
// Blocking
// =============================================================================

#[test]
fn test_son_blocks_brother_by_name() {
    let heirs = vec![
        HeirRecord::new("1", "أحمد", Son),
        HeirRecord::new("2", "علي", FullBrother),
    ];
    let dist = compute(dec!(1000), &heirs).unwrap();

    let brother = dist.get("2").unwrap();
    assert!(brother.is_blocked);
    assert_eq!(brother.fraction_label, "محجوب");
    assert_eq!(
        brother.blocking_reason.as_deref(),
        Some("تم الحجب بواسطة الابن (أحمد)")
    );
    assert_eq!(brother.monetary_value, dec!(0));
    assert_eq!(dist.get("1").unwrap().monetary_value, dec!(1000));
}

#[test]
fn test_upstream_exclusion_gets_blocked_record() {
    let heirs = vec![
        HeirRecord::new("1", "Son", Son).excluded(),
        HeirRecord::new("2", "Brother", FullBrother),
    ];
    let dist = english().compute(dec!(900), &heirs).unwrap();

    let son = dist.get("1").unwrap();
    assert!(son.is_blocked);
    assert_eq!(
        son.blocking_reason.as_deref(),
        Some("excluded from inheritance before calculation")
    );
    // An excluded son does not block the brother
    assert_eq!(dist.get("2").unwrap().monetary_value, dec!(900));
}

#[test]
fn test_granddaughter_with_two_daughters_gets_nothing() {
    let heirs = vec![
        HeirRecord::new("1", "Daughter 1", Daughter),
        HeirRecord::new("2", "Daughter 2", Daughter),
        HeirRecord::new("3", "Granddaughter", DaughterOfSon),
        HeirRecord::new("4", "Uncle", FullUncle),
    ];
    let dist = english().compute(dec!(300), &heirs).unwrap();

    let granddaughter = dist.get("3").unwrap();
    assert!(!granddaughter.is_blocked);
    assert_eq!(granddaughter.fraction_label, "no share");
    assert_eq!(dist.get("1").unwrap().monetary_value, dec!(100));
    assert_eq!(dist.get("4").unwrap().monetary_value, dec!(100));
}

// =============================================================================
// Reconciliation
// =============================================================================

#[test]
fn test_husband_and_daughter_radd() {
    let heirs = vec![
        HeirRecord::new("h", "Husband", Husband),
        HeirRecord::new("d", "Daughter", Daughter),
    ];
    let dist = english().compute(dec!(1000), &heirs).unwrap();

    assert_eq!(dist.reconciliation, Reconciliation::Radd);
    assert_eq!(dist.get("h").unwrap().monetary_value, dec!(250));
    assert_eq!(dist.get("h").unwrap().fraction_label, "1/4");
    assert_eq!(dist.get("d").unwrap().monetary_value, dec!(750));
    assert_eq!(dist.get("d").unwrap().fraction_label, "1/2 + with-return");
    assert_eq!(dist.total_value(), dec!(1000));
}

#[test]
fn test_daughter_and_completion_radd() {
    let heirs = vec![
        HeirRecord::new("d", "Daughter", Daughter),
        HeirRecord::new("g1", "Granddaughter 1", DaughterOfSon),
        HeirRecord::new("g2", "Granddaughter 2", DaughterOfSon),
    ];
    let dist = english().compute(dec!(800), &heirs).unwrap();

    assert_eq!(dist.get("d").unwrap().raw_share, ratio(3, 4));
    assert_eq!(dist.get("g1").unwrap().raw_share, ratio(1, 8));
    assert_eq!(
        dist.get("g2").unwrap().fraction_label,
        "1/6 (completion of 2/3) + with-return"
    );
}

#[test]
fn test_husband_and_two_sisters_awal() {
    let heirs = vec![
        HeirRecord::new("h", "Husband", Husband),
        HeirRecord::new("s1", "Sister 1", FullSister),
        HeirRecord::new("s2", "Sister 2", FullSister),
    ];
    let dist = english().compute(dec!(700), &heirs).unwrap();

    assert_eq!(dist.reconciliation, Reconciliation::Awal);
    assert_eq!(dist.get("h").unwrap().raw_share, ratio(3, 7));
    assert_eq!(dist.get("h").unwrap().monetary_value, dec!(300));
    assert_eq!(dist.get("s1").unwrap().fraction_label, "2/3 (awal)");
    assert_eq!(dist.get("s2").unwrap().monetary_value, dec!(200));
    assert_eq!(dist.common_denominator, "7");
}

#[test]
fn test_lone_wife_takes_everything() {
    let heirs = vec![HeirRecord::new("w", "Wife", Wife)];
    let dist = english().compute(dec!(4000), &heirs).unwrap();

    assert_eq!(dist.reconciliation, Reconciliation::RaddToSpouses);
    assert_eq!(dist.get("w").unwrap().monetary_value, dec!(4000));
}

// =============================================================================
// Residuary Precedence
// =============================================================================

#[test]
fn test_grandfather_with_daughter_tops_up_sixth() {
    let heirs = vec![
        HeirRecord::new("g", "Grandfather", PaternalGrandfather),
        HeirRecord::new("d", "Daughter", Daughter),
    ];
    let dist = english().compute(dec!(600), &heirs).unwrap();

    let grandfather = dist.get("g").unwrap();
    assert_eq!(grandfather.fraction_label, "1/6 + residuary");
    assert_eq!(grandfather.raw_share, ratio(1, 2));
    assert_eq!(grandfather.monetary_value, dec!(300));
    assert_eq!(
        dist.residuary_class,
        Some(ResiduaryClass::Ascendant {
            relationship: PaternalGrandfather
        })
    );
}

#[test]
fn test_grandfather_without_descendants_is_residuary() {
    let heirs = vec![
        HeirRecord::new("g", "Grandfather", PaternalGrandfather),
        HeirRecord::new("m", "Mother", Mother),
    ];
    let dist = english().compute(dec!(900), &heirs).unwrap();

    assert_eq!(dist.get("m").unwrap().fraction_label, "1/3");
    let grandfather = dist.get("g").unwrap();
    assert_eq!(grandfather.fraction_label, "residuary");
    assert_eq!(grandfather.raw_share, ratio(2, 3));
    assert_eq!(grandfather.monetary_value, dec!(600));
}

#[test]
fn test_paternal_brother_and_sister_split_two_to_one() {
    let heirs = vec![
        HeirRecord::new("w", "Wife", Wife),
        HeirRecord::new("b", "Half brother", PaternalBrother),
        HeirRecord::new("s", "Half sister", PaternalSister),
    ];
    let dist = english().compute(dec!(1000), &heirs).unwrap();

    assert_eq!(dist.get("w").unwrap().monetary_value, dec!(250));
    assert_eq!(dist.get("b").unwrap().raw_share, ratio(1, 2));
    assert_eq!(dist.get("b").unwrap().fraction_label, "residuary");
    assert_eq!(dist.get("s").unwrap().raw_share, ratio(1, 4));
    assert_eq!(dist.get("s").unwrap().fraction_label, "residuary");
    assert_eq!(
        dist.residuary_class,
        Some(ResiduaryClass::Kin {
            males: PaternalBrother,
            females: Some(PaternalSister)
        })
    );
}

#[test]
fn test_paternal_sisters_with_daughter_without_full_sister() {
    let heirs = vec![
        HeirRecord::new("d", "Daughter", Daughter),
        HeirRecord::new("s1", "Half sister 1", PaternalSister),
        HeirRecord::new("s2", "Half sister 2", PaternalSister),
    ];
    let dist = english().compute(dec!(1000), &heirs).unwrap();

    assert_eq!(dist.residuary_class, Some(ResiduaryClass::SistersWithDaughters));
    assert_eq!(dist.get("d").unwrap().raw_share, ratio(1, 2));
    for id in ["s1", "s2"] {
        let sister = dist.get(id).unwrap();
        assert_eq!(sister.fraction_label, "residuary");
        assert_eq!(sister.raw_share, ratio(1, 4));
        assert_eq!(sister.monetary_value, dec!(250));
    }
}

#[test]
fn test_full_nephews_take_residue() {
    let heirs = vec![
        HeirRecord::new("m", "Mother", Mother),
        HeirRecord::new("n1", "Nephew 1", FullBrothersSon),
        HeirRecord::new("n2", "Nephew 2", FullBrothersSon),
    ];
    let dist = english().compute(dec!(900), &heirs).unwrap();

    // nephews do not count as siblings for the mother
    assert_eq!(dist.get("m").unwrap().raw_share, ratio(1, 3));
    assert_eq!(dist.get("n1").unwrap().raw_share, ratio(1, 3));
    assert_eq!(dist.get("n2").unwrap().monetary_value, dec!(300));
    assert_eq!(dist.get("n2").unwrap().fraction_label, "residuary");
}

#[test]
fn test_paternal_nephew_takes_residue() {
    let heirs = vec![
        HeirRecord::new("h", "Husband", Husband),
        HeirRecord::new("n", "Nephew", PaternalBrothersSon),
    ];
    let dist = english().compute(dec!(500), &heirs).unwrap();

    assert_eq!(
        dist.residuary_class,
        Some(ResiduaryClass::Kin {
            males: PaternalBrothersSon,
            females: None
        })
    );
    assert_eq!(dist.get("n").unwrap().raw_share, ratio(1, 2));
    assert_eq!(dist.get("n").unwrap().monetary_value, dec!(250));
}

#[test]
fn test_paternal_uncle_precedes_cousins() {
    let heirs = vec![
        HeirRecord::new("w", "Wife", Wife),
        HeirRecord::new("u", "Half uncle", PaternalUncle),
        HeirRecord::new("c", "Cousin", PaternalUnclesSon),
    ];
    let dist = english().compute(dec!(400), &heirs).unwrap();

    assert_eq!(dist.get("u").unwrap().raw_share, ratio(3, 4));
    assert_eq!(dist.get("u").unwrap().monetary_value, dec!(300));
    let cousin = dist.get("c").unwrap();
    assert!(!cousin.is_blocked);
    assert_eq!(cousin.fraction_label, "no share");
    assert_eq!(cousin.monetary_value, dec!(0));
}

#[test]
fn test_pending_marker_survives_awal() {
    let heirs = vec![
        HeirRecord::new("h", "Husband", Husband),
        HeirRecord::new("f", "Father", Father),
        HeirRecord::new("m", "Mother", Mother),
        HeirRecord::new("d1", "Daughter 1", Daughter),
        HeirRecord::new("d2", "Daughter 2", Daughter),
    ];
    let dist = english().compute(dec!(1500), &heirs).unwrap();

    // 1/4 + 1/6 + 1/6 + 2/3 = 15/12
    assert_eq!(dist.reconciliation, Reconciliation::Awal);
    assert!(dist.residuary_class.is_none());
    let father = dist.get("f").unwrap();
    assert_eq!(father.fraction_label, "1/6 + residuary-pending (awal)");
    assert_eq!(father.raw_share, ratio(2, 15));
    assert_eq!(father.monetary_value, dec!(200));
}

// =============================================================================
// Idempotence and Estate Derivation
// =============================================================================

#[test]
fn test_repeated_compute_is_identical() {
    let heirs = vec![
        HeirRecord::new("1", "Wife", Wife),
        HeirRecord::new("2", "Mother", Mother),
        HeirRecord::new("3", "Daughter", Daughter),
        HeirRecord::new("4", "Brother", PaternalBrother),
    ];
    let snapshot = heirs.clone();

    let first = compute(dec!(12345.67), &heirs).unwrap();
    let second = compute(dec!(12345.67), &heirs).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(heirs, snapshot);
}

#[test]
fn test_derived_estate_with_built_roster() {
    let estate = NetEstate::derive(EstateTotals {
        assets: dec!(15000),
        debts: dec!(3000),
        bequests: dec!(6000),
    })
    .unwrap();
    assert_eq!(estate.net, dec!(8000));

    let counts = HeirCounts::new().with(Wife, 1).with(Son, 1).with(Daughter, 2);
    let heirs = RosterBuilder::new(Locale::English).add_counts(&counts).build();
    let dist = english().compute(estate.net, &heirs).unwrap();

    // wife 1/8 = 1000, residue 7000 split 2:1:1
    let by_name: Vec<_> = dist
        .ordered()
        .map(|(id, record)| {
            let heir = heirs.iter().find(|h| h.id == id).unwrap();
            (heir.name.as_str(), record.monetary_value)
        })
        .collect();
    assert_eq!(
        by_name,
        [
            ("wife 1", dec!(1000)),
            ("son 1", dec!(3500)),
            ("daughter 1", dec!(1750)),
            ("daughter 2", dec!(1750)),
        ]
    );
}
