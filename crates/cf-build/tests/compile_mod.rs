//! Integration tests for compiling a mod with cf-build.

use std::fs;
use std::rc::Rc;

use cf_build::builders::{
    CivilizationBuilder, CivilizationConfig, CivilizationLocalization, ConstructibleBuilder,
    ConstructibleConfig, ModifierBuilder, ModifierConfig, ProgressionTreeBuilder,
    ProgressionTreeConfig, ProgressionTreeNodeBuilder, ProgressionTreeNodeConfig, UnitBuilder,
    UnitConfig,
};
use cf_build::{Builder, Mod, ModInfo, Shared};
use cf_core::rows::ModifierRow;
use cf_core::{ActionGroupBundle, OutputFile, Table};
use tempfile::TempDir;

fn civilization(civ: &str) -> CivilizationConfig {
    CivilizationConfig {
        civilization_type: Some(civ.into()),
        localizations: vec![CivilizationLocalization {
            name: Some("Babylon".into()),
            city_names: vec!["Babylon".into(), "Ur".into()],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn modifier(id: &str) -> Shared<ModifierBuilder> {
    let modifier = Shared::new(ModifierBuilder::new());
    modifier.borrow_mut().fill(ModifierConfig {
        modifier: ModifierRow {
            id: Some(id.into()),
            collection: Some("COLLECTION_OWNER".into()),
            effect: Some("EFFECT_PLAYER_ADJUST_CONSTRUCTIBLE_YIELD".into()),
            ..Default::default()
        },
        ..Default::default()
    });
    modifier
}

fn paths(files: &[OutputFile]) -> Vec<String> {
    files.iter().map(OutputFile::relative_path).collect()
}

// ---------------------------------------------------------------------------
// Scenario A: a lone civilization
// ---------------------------------------------------------------------------

#[test]
fn lone_civilization_emits_only_non_empty_documents() {
    let civ = Shared::new(CivilizationBuilder::new());
    civ.borrow_mut().fill(civilization("CIVILIZATION_X"));

    let files = civ.borrow_mut().build();
    assert_eq!(
        paths(&files),
        vec![
            "civilizations/x/current.xml",
            "civilizations/x/shell.xml",
            "civilizations/x/localization.xml",
        ]
    );
    assert!(files.iter().all(|f| f.name != "icons.xml"));
}

#[test]
fn age_scoped_civilization_adds_legacy_document() {
    let bundle = Rc::new(ActionGroupBundle::for_age("AGE_ANTIQUITY"));
    let civ = Shared::new(CivilizationBuilder::new().with_scopes(bundle));
    civ.borrow_mut().fill(civilization("CIVILIZATION_X"));

    let files = civ.borrow_mut().build();
    assert!(paths(&files).contains(&"civilizations/x/legacy.xml".to_string()));
}

// ---------------------------------------------------------------------------
// Scenario B: partially configured builders contribute nothing
// ---------------------------------------------------------------------------

#[test]
fn unit_without_type_is_filtered_out() {
    let dist = TempDir::new().unwrap();
    let unit = Shared::new(UnitBuilder::new());
    let mut m = Mod::new(ModInfo::default());
    m.add(unit.erased());

    let report = m.build(dist.path(), true).unwrap();
    assert!(report.files.is_empty());
    let manifest = fs::read_to_string(&report.manifest).unwrap();
    assert!(!manifest.contains("<Item>"));
    assert!(!manifest.contains("<ActionGroup "));
}

// ---------------------------------------------------------------------------
// Scenario C: node unlocks
// ---------------------------------------------------------------------------

#[test]
fn node_unlocks_modifier_and_constructible() {
    let building = Shared::new(ConstructibleBuilder::new());
    building.borrow_mut().fill(ConstructibleConfig {
        constructible_type: Some("BUILDING_ETEMENANKI".into()),
        ..Default::default()
    });
    let scribes = modifier("MOD_BABYLON_SCRIBES");

    let node = Shared::new(ProgressionTreeNodeBuilder::new());
    node.borrow_mut()
        .fill(ProgressionTreeNodeConfig {
            progression_tree_node_type: Some("NODE_CIVIC_BABYLON_SCRIBES".into()),
            ..Default::default()
        })
        .bind([scribes.erased(), building.erased()]);
    node.borrow_mut().migrate();

    let node = node.borrow();
    let unlocks = node
        .documents()
        .current
        .rows(Table::ProgressionTreeNodeUnlocks);
    let kinds: Vec<_> = unlocks.iter().map(|r| r.attr_str("TargetKind")).collect();
    assert_eq!(kinds, vec![Some("KIND_MODIFIER"), Some("KIND_CONSTRUCTIBLE")]);
    assert_eq!(
        unlocks[1].attr_str("TargetType"),
        Some("BUILDING_ETEMENANKI")
    );
    assert_eq!(node.documents().game_effects.rows(Table::Modifiers).len(), 1);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn civilization_with_unit_and_tree_writes_a_loadable_mod() {
    let dist = TempDir::new().unwrap();
    let bundle = Rc::new(ActionGroupBundle::for_age("AGE_ANTIQUITY"));

    let unit = Shared::new(UnitBuilder::new().with_scopes(bundle.clone()));
    unit.borrow_mut().fill(UnitConfig {
        unit_type: Some("UNIT_BABYLON_SIKKATU".into()),
        ..Default::default()
    });

    let node = Shared::new(ProgressionTreeNodeBuilder::new().with_scopes(bundle.clone()));
    node.borrow_mut()
        .fill(ProgressionTreeNodeConfig {
            progression_tree_node_type: Some("NODE_CIVIC_BABYLON_SCRIBES".into()),
            ..Default::default()
        })
        .bind([modifier("MOD_BABYLON_SCRIBES").erased()]);

    let tree = Shared::new(ProgressionTreeBuilder::new().with_scopes(bundle.clone()));
    tree.borrow_mut()
        .fill(ProgressionTreeConfig {
            progression_tree_type: Some("TREE_CIVICS_BABYLON".into()),
            ..Default::default()
        })
        .bind([node.erased()]);

    let civ = Shared::new(CivilizationBuilder::new().with_scopes(bundle));
    civ.borrow_mut()
        .fill(civilization("CIVILIZATION_BABYLON"))
        .bind([unit.erased(), tree.erased()]);

    // The unit is added first; the civ's trait still reaches its output.
    let mut m = Mod::new(ModInfo {
        id: "babylon".into(),
        name: "Babylon".into(),
        ..Default::default()
    });
    m.add(unit.erased()).add(civ.erased()).add(tree.erased());
    let report = m.build(dist.path(), true).unwrap();

    let read = |path: &str| fs::read_to_string(dist.path().join(path)).unwrap();
    assert!(read("units/babylon-sikkatu/current.xml").contains(r#"TraitType="TRAIT_BABYLON""#));
    assert!(read("civilizations/babylon/game-effects.xml").contains(r#"id="MOD_BABYLON_SCRIBES""#));
    assert!(
        read("civilizations/babylon/current.xml")
            .contains(r#"UniqueCultureProgressionTree="TREE_CIVICS_BABYLON""#)
    );
    assert!(
        !dist
            .path()
            .join("progression-trees/civics-babylon/game-effects.xml")
            .exists()
    );
    assert!(tree.borrow().modifiers_handed_off());

    let manifest = read("babylon.modinfo");
    assert_eq!(report.manifest, dist.path().join("babylon.modinfo"));
    assert!(manifest.contains("<AgeInUse>AGE_ANTIQUITY</AgeInUse>"));
    assert!(manifest.contains("<AgeEverInUse>AGE_ANTIQUITY</AgeEverInUse>"));
    // One shared bundle: shell, always, current and persist criteria.
    assert_eq!(manifest.matches("<Criteria ").count(), 4);
    for file in &report.files {
        assert!(manifest.contains(&format!("<Item>{}</Item>", file.relative_path())));
    }
}

#[test]
fn separate_bundles_get_separate_criteria() {
    let units: Vec<_> = ["UNIT_A", "UNIT_B"]
        .into_iter()
        .map(|ty| {
            let unit = Shared::new(
                UnitBuilder::new().with_scopes(Rc::new(ActionGroupBundle::for_age("AGE_ANTIQUITY"))),
            );
            unit.borrow_mut().fill(UnitConfig {
                unit_type: Some(ty.into()),
                ..Default::default()
            });
            unit.erased()
        })
        .collect();
    let mut m = Mod::new(ModInfo::default());
    m.add_all(units);

    let files = m.compile();
    let manifest = m.manifest_xml(&files);
    assert_eq!(files.len(), 2);
    assert_eq!(manifest.matches("<AgeInUse>").count(), 2);
}

#[test]
fn repeated_compiles_are_stable() {
    let civ = Shared::new(CivilizationBuilder::new());
    civ.borrow_mut()
        .fill(civilization("CIVILIZATION_BABYLON"))
        .bind([modifier("MOD_BABYLON_TRADE").erased()]);
    let mut m = Mod::new(ModInfo::default());
    m.add(civ.erased());

    let first = m.compile();
    let second = m.compile();
    assert_eq!(first, second);
    assert_eq!(
        civ.borrow().documents().current.rows(Table::TraitModifiers).len(),
        1
    );
}

#[test]
fn config_deserializes_from_json() {
    let config: CivilizationConfig = serde_json::from_str(
        r#"{
            "civilization_type": "CIVILIZATION_BABYLON",
            "localizations": [{ "name": "Babylon", "city_names": ["Babylon", "Ur", "Uruk"] }],
            "unknown_key": true
        }"#,
    )
    .unwrap();
    let civ = Shared::new(CivilizationBuilder::new());
    civ.borrow_mut().fill(config);
    civ.borrow_mut().migrate();
    assert_eq!(
        civ.borrow().documents().current.rows(Table::CityNames).len(),
        3
    );
}
