mod common;

use common::{pool_of, HorseBuilder, StableBuilder};
use studbook_core::{Stable, StableConfig};
use studbook_data::{CareerGrade, MatureGender, Pedigree, DEFAULT_STABLE_CAPACITY};
use studbook_io::{
    backup_stable, issue_certificate, load_stable, read_certificate, restore_stable, save_stable,
    IoError,
};
use tempfile::tempdir;

fn bred_stable() -> Stable {
    let mut stable = StableBuilder::new()
        .capacity(8)
        .with_horse(HorseBuilder::new("Thunder").grade(CareerGrade::A).achievement("Derby"))
        .with_horse(HorseBuilder::new("Breeze").filly().breed("Arabian"))
        .build();
    let sire = stable.get_horse("Thunder").unwrap().clone();
    let dam = stable.get_horse("Breeze").unwrap().clone();
    stable.record_breeding(&sire, &dam, "Gale").unwrap();
    stable.record_offspring_result("Gale", CareerGrade::A).unwrap();
    stable
}

#[test]
fn test_stable_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stable.json");
    let stable = bred_stable();

    save_stable(&stable, &path).unwrap();
    let restored = load_stable(&path).unwrap();

    assert_eq!(restored.to_snapshot(), stable.to_snapshot());
    assert_eq!(pool_of(&restored, "Breeze"), Some(MatureGender::Mare));
    assert_eq!(restored.capacity(), 8);
    assert_eq!(restored.breedings()[0].actual_grade, Some(CareerGrade::A));
}

#[test]
fn test_missing_stable_starts_fresh() {
    let dir = tempdir().unwrap();
    let stable = load_stable(dir.path().join("nope.json")).unwrap();
    assert_eq!(stable.total_horses(), 0);
    assert_eq!(stable.capacity(), DEFAULT_STABLE_CAPACITY);
}

#[test]
fn test_corrupt_stable_reports_context() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stable.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_stable(&path).unwrap_err();
    assert!(err.to_string().contains("loading stable"));
}

#[test]
fn test_sparse_save_file_merges_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stable.json");
    std::fs::write(&path, r#"{"capacity": 5, "statistics": {"totalOffspring": 2}}"#).unwrap();

    let stable = load_stable(&path).unwrap();
    assert_eq!(stable.capacity(), 5);
    assert_eq!(stable.statistics().total_offspring, 2);
    assert_eq!(stable.statistics().total_retired, 0);
    assert_eq!(stable.preferences().min_grade, CareerGrade::D);
    assert!(stable.breedings().is_empty());
}

#[test]
fn test_saved_stable_is_camel_case_pairs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stable.json");
    save_stable(&bred_stable(), &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value["stallions"][0];
    assert_eq!(first[0], "Thunder");
    assert_eq!(first[1]["originalGender"], "colt");
    assert!(value["statistics"]["championOffspring"].is_number());
}

#[test]
fn test_backup_restores_bred_stable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stable.bak");
    let stable = bred_stable();

    backup_stable(&stable, &path).unwrap();
    let restored = restore_stable(&path).unwrap();
    assert_eq!(restored.to_snapshot(), stable.to_snapshot());
    assert_eq!(restored.breedings()[0].offspring, "Gale");
}

#[test]
fn test_garbage_backup_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stable.bak");
    std::fs::write(&path, [0xffu8, 0x01]).unwrap();
    assert!(matches!(restore_stable(&path), Err(IoError::Backup(_))));
}

#[test]
fn test_pedigree_certificate_round_trip() {
    let stable = bred_stable();
    let sire = stable.get_horse("Thunder").unwrap();
    let dam = stable.get_horse("Breeze").unwrap();
    let pedigree = {
        use studbook_core::PedigreeLogic;
        Pedigree::for_foal(sire, dam)
    };

    let certificate = issue_certificate(&pedigree).unwrap();
    assert!(certificate.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(read_certificate(&certificate).unwrap(), pedigree);

    assert!(matches!(read_certificate("zz"), Err(IoError::Certificate(_))));
}

#[test]
fn test_fresh_stable_uses_config_capacity() {
    let stable = Stable::new(&StableConfig {
        capacity: 2,
        ..Default::default()
    });
    assert_eq!(stable.to_snapshot().capacity, 2);
}
