//! End-to-end tests for the generation pipeline.
//!
//! These load real-looking headers from `test_headers/` and check the
//! records, classifications, diagnostics and emitted blocks they produce.


use reflgen::*;
use test_harness::{ReportExt, TestHarness, body_lines};

// ============================================================================
// Record building
// ============================================================================

#[test]
fn weapon_record_has_range_property() {
    let harness = TestHarness::new();
    let record = harness.record("Weapon.h").expect("Weapon.h is eligible");

    assert_eq!(record.name, "AWeapon");
    assert_eq!(record.parent_name, "AActor");
    assert_eq!(record.properties.len(), 1);

    let damage = &record.properties[0];
    assert_eq!(damage.name, "Damage");
    assert_eq!(damage.output_kind(), OutputKind::Range);
    assert!(damage.editable);
    let range = damage.range.expect("Damage has a range");
    assert_eq!((range.min.0, range.max.0), (0.0, 100.0));
}

#[test]
fn rifle_record_members() {
    let harness = TestHarness::new();
    let record = harness.record("Rifle.h").expect("Rifle.h is eligible");

    let names: Vec<_> = record.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Decals", "FireSound", "BarrelMesh", "FireInterval", "RoundsFired"]
    );

    let functions: Vec<_> = record.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, vec!["Reload", "FireOnce", "GetRoundsFired"]);

    let reload = &record.functions[0];
    let types: Vec<_> = reload.parameter_types().collect();
    assert_eq!(types, vec!["int32", "const TMap<FName, int32>&"]);

    let fire = &record.functions[1];
    assert_eq!(fire.display_name, "Fire");
    let types: Vec<_> = fire.parameter_types().collect();
    assert_eq!(types, vec!["const FVector&", "float"]);

    assert!(record.functions[2].is_const);
    assert!(!record.functions[2].script_bindable);
}

#[test]
fn texture_array_is_not_texture_pointer() {
    let harness = TestHarness::new();
    let record = harness.record("Rifle.h").expect("Rifle.h is eligible");
    let decals = &record.properties[0];
    assert!(matches!(decals.output_kind(), OutputKind::Array(Some(_))));
}

#[test]
fn unmarked_unit_has_no_record() {
    let harness = TestHarness::new();
    assert!(harness.record("MathTypes.h").is_none());
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn weapon_alone_is_spawnable_with_identity_first() {
    let harness = TestHarness::new();
    let report = harness.run(&["Weapon.h"]);
    assert!(report.is_clean());

    let weapon = report.expect_class("AWeapon");
    assert_eq!(weapon.classification, Classification::Spawnable);
    assert_eq!(
        weapon.properties_block,
        "BEGIN_PROPERTIES(AWeapon)\n\
         \x20   MARK_AS_SPAWNABLE(\"AWeapon\", \"Auto-generated AWeapon\")\n\
         \x20   ADD_PROPERTY(FName, ObjectName, \"[Actor]\", true, \"The name of this actor\")\n\
         \x20   ADD_PROPERTY_RANGE(float, Damage, \"Combat\", 0.0f, 100.0f, true)\n\
         END_PROPERTIES()\n"
    );
    assert_eq!(
        weapon.bindings_block,
        "LUA_BIND_BEGIN(AWeapon)\n\
         {\n\
         \x20   AddProperty<AWeapon, FName>(\n\
         \x20       T, \"ObjectName\", &AWeapon::ObjectName);\n\
         \x20   AddProperty<AWeapon, float>(\n\
         \x20       T, \"Damage\", &AWeapon::Damage);\n\
         }\n\
         LUA_BIND_END()\n"
    );
}

#[test]
fn identity_stays_on_root_when_root_is_scanned() {
    let harness = TestHarness::new();
    let report = harness.run(&["Actor.h", "Weapon.h"]);

    let actor = report.expect_class("AActor");
    assert_eq!(actor.classification, Classification::None);
    assert_eq!(
        body_lines(&actor.properties_block)[0],
        "ADD_PROPERTY(FName, ObjectName, \"[Actor]\", true, \"The name of this actor\")"
    );

    let weapon = report.expect_class("AWeapon");
    assert!(!weapon.properties_block.contains("ObjectName"));
    assert_eq!(weapon.classification, Classification::Spawnable);
}

#[test]
fn unmarked_unit_contributes_nothing() {
    let harness = TestHarness::new();
    let report = harness.run(&["MathTypes.h"]);
    assert!(report.classes.is_empty());
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.skipped, vec![UnitId::new("MathTypes.h")]);
}

#[test]
fn empty_class_emits_both_blocks() {
    let harness = TestHarness::new();
    let report = harness.run(&["Actor.h", "EmptyActor.h"]);
    let empty = report.expect_class("AEmptyActor");

    assert_eq!(
        empty.properties_block,
        "BEGIN_PROPERTIES(AEmptyActor)\n\
         \x20   MARK_AS_SPAWNABLE(\"AEmptyActor\", \"Auto-generated AEmptyActor\")\n\
         END_PROPERTIES()\n"
    );
    assert_eq!(
        empty.bindings_block,
        "LUA_BIND_BEGIN(AEmptyActor)\n{\n    // No properties or functions to bind\n}\nLUA_BIND_END()\n"
    );
}

// ============================================================================
// Full fixture set
// ============================================================================

#[test]
fn classifications_across_all_fixtures() {
    let harness = TestHarness::new();
    let report = harness.run_all();

    let expected = [
        ("AActor", Classification::None),
        ("UActorComponent", Classification::None),
        ("AWeapon", Classification::Spawnable),
        ("ARifle", Classification::Spawnable),
        ("AEmptyActor", Classification::Spawnable),
        ("AProjectileBase", Classification::None),
        ("ARocket", Classification::Spawnable),
        ("USceneComponent", Classification::Component),
        ("UStaticMeshComponent", Classification::Component),
        ("UPhysicsAsset", Classification::None),
    ];
    for (name, classification) in expected {
        assert_eq!(report.expect_class(name).classification, classification, "{name}");
    }
    assert_eq!(report.classes.len(), expected.len());
}

#[test]
fn report_order_and_faults() {
    let harness = TestHarness::new();
    let report = harness.run_all();

    let units: Vec<_> = report.classes.iter().map(|c| c.unit.as_str()).collect();
    let mut sorted = units.clone();
    sorted.sort();
    assert_eq!(units, sorted);

    assert_eq!(report.skipped, vec![UnitId::new("MathTypes.h")]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].unit.as_str(), "Broken.h");
    assert!(matches!(
        report.failures[0].error,
        ScanError::UnbalancedDelimiter { open: '(', .. }
    ));
    assert!(report.failures[0].to_string().starts_with("Broken.h: unbalanced '('"));
}

#[test]
fn unresolved_base_is_a_note() {
    let harness = TestHarness::new();
    let report = harness.run_all();

    assert_eq!(
        report.diagnostics,
        vec![HierarchyDiagnostic::UnresolvedAncestor {
            class: "UPhysicsAsset".into(),
            ancestor: "UObject".into(),
        }]
    );
    assert_eq!(report.diagnostics[0].severity(), Severity::Note);
}

#[test]
fn broken_unit_does_not_affect_siblings() {
    let harness = TestHarness::new();
    let with_broken = harness.run(&["Actor.h", "Broken.h", "Weapon.h"]);
    let without = harness.run(&["Actor.h", "Weapon.h"]);
    assert_eq!(with_broken.classes, without.classes);
}

#[test]
fn rifle_blocks() {
    let harness = TestHarness::new();
    let report = harness.run_all();
    let rifle = report.expect_class("ARifle");

    assert_eq!(
        body_lines(&rifle.properties_block),
        vec![
            "MARK_AS_SPAWNABLE(\"Rifle\", \"Long-barrelled hitscan weapon\")",
            "ADD_PROPERTY_ARRAY(EPropertyType::Texture, Decals, \"Rendering\", true, \"Impact decals\")",
            "ADD_PROPERTY_AUDIO(USound*, FireSound, \"Audio\", true)",
            "ADD_PROPERTY_STATICMESH(UStaticMesh*, BarrelMesh, \"Rendering\", true)",
            "ADD_PROPERTY_RANGE(float, FireInterval, \"Combat\", 0.5f, 2.25f, false, \"Seconds between shots (min 0.5)\")",
            "ADD_PROPERTY(int32, RoundsFired, \"Combat\", false)",
        ]
    );

    let bindings = &rifle.bindings_block;
    assert!(bindings.contains("    AddPropertyArrayPtr<ARifle, UTexture>(\n        T, \"Decals\", &ARifle::Decals);\n"));
    assert!(bindings.contains("    AddPropertyPtr<ARifle, USound>(\n"));
    assert!(bindings.contains("    AddPropertyPtr<ARifle, UStaticMesh>(\n"));
    assert!(bindings.contains("    AddReadOnlyProperty<ARifle, float>(\n"));
    assert!(bindings.contains(
        "    AddMethodR<bool, ARifle, int32, const TMap<FName, int32>&>(\n        T, \"Reload\", &ARifle::Reload);\n"
    ));
    assert!(bindings.contains(
        "    AddAlias<ARifle, const FVector&, float>(\n        T, \"Fire\", &ARifle::FireOnce);\n"
    ));
    assert!(!bindings.contains("GetRoundsFired"));
}

#[test]
fn component_blocks() {
    let harness = TestHarness::new();
    let report = harness.run_all();
    let mesh = report.expect_class("UStaticMeshComponent");

    assert_eq!(
        body_lines(&mesh.properties_block),
        vec![
            "MARK_AS_COMPONENT(\"Static Mesh Component\", \"Renders a static mesh\")",
            "ADD_PROPERTY_STATICMESH(UStaticMesh*, StaticMesh, \"Static Mesh\", true)",
            "ADD_PROPERTY_ARRAY(EPropertyType::Material, MaterialSlots, \"Materials\", true)",
            "ADD_PROPERTY_SRV(ID3D11ShaderResourceView*, CachedSRV, \"Rendering\", false)",
        ]
    );
    assert!(mesh.bindings_block.contains(
        "    AddAlias<UStaticMeshComponent, UStaticMesh*>(\n        T, \"SetMesh\", &UStaticMeshComponent::SetStaticMesh);\n"
    ));

    let root = report.expect_class("UActorComponent");
    assert!(root.properties_block.contains(
        "ADD_PROPERTY(FName, ObjectName, \"[Component]\", true, \"The name of this component\")"
    ));
}

#[test]
fn abstract_class_has_no_mark_but_children_do() {
    let harness = TestHarness::new();
    let report = harness.run_all();

    let base = report.expect_class("AProjectileBase");
    assert!(!base.properties_block.contains("MARK_AS"));

    let rocket = report.expect_class("ARocket");
    assert!(rocket.properties_block.contains("MARK_AS_SPAWNABLE(\"ARocket\", \"Auto-generated ARocket\")"));
    assert!(rocket.properties_block.contains("ADD_PROPERTY_CURVE(UCurveFloat*, ThrustCurve, \"Projectile\", true)"));
}

#[test]
fn repeated_runs_are_identical() {
    let harness = TestHarness::new();
    let units = harness.load_all();
    let mut reversed = units.clone();
    reversed.reverse();

    let first = harness.generator().run(&units);
    let second = harness.generator().run(&units);
    let third = harness.generator().run(&reversed);

    assert_eq!(first.classes, second.classes);
    assert_eq!(first.classes, third.classes);
    assert_eq!(first.diagnostics, third.diagnostics);
    for (a, b) in first.classes.iter().zip(&third.classes) {
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_eq!(a.combined(), b.combined());
    }
}

// ============================================================================
// Hierarchy anomalies
// ============================================================================

#[test]
fn cycle_across_units_is_reported() {
    let harness = TestHarness::new();
    let units = vec![
        DeclarationUnit::new("A.h", "class ACycleA : public ACycleB { GENERATED_REFLECTION_BODY() };"),
        DeclarationUnit::new("B.h", "class ACycleB : public ACycleA { GENERATED_REFLECTION_BODY() };"),
        DeclarationUnit::new("C.h", "class AFine : public AActor { GENERATED_REFLECTION_BODY() };"),
    ];
    let report = harness.generator().run(&units);

    assert_eq!(report.expect_class("ACycleA").classification, Classification::None);
    assert_eq!(report.expect_class("ACycleB").classification, Classification::None);
    assert_eq!(report.expect_class("AFine").classification, Classification::Spawnable);

    assert_eq!(report.diagnostics.len(), 1);
    let diag = &report.diagnostics[0];
    assert_eq!(diag.severity(), Severity::Warning);
    assert_eq!(diag.to_string(), "circular inheritance involving 'ACycleA': ACycleA -> ACycleB -> ACycleA");
}

#[test]
fn duplicate_class_keeps_first_unit() {
    let harness = TestHarness::new();
    let units = vec![
        DeclarationUnit::new("b/Thing.h", "class AThing : public UObject { GENERATED_REFLECTION_BODY() };"),
        DeclarationUnit::new("a/Thing.h", "class AThing : public AActor { GENERATED_REFLECTION_BODY() };"),
    ];
    let report = harness.generator().run(&units);

    assert_eq!(report.classes.len(), 2);
    assert!(report.classes.iter().all(|c| c.classification == Classification::Spawnable));
    assert!(report.diagnostics.iter().any(|d| matches!(
        d,
        HierarchyDiagnostic::DuplicateClass { kept, .. } if kept.starts_with("a/Thing.h")
    )));

    let (kept, ignored) = (&report.classes[0], &report.classes[1]);
    assert_eq!(kept.unit.as_str(), "a/Thing.h");
    assert!(kept.properties_block.contains("ObjectName"));
    assert_eq!(kept.properties_block, ignored.properties_block);
    assert_eq!(kept.bindings_block, ignored.bindings_block);
}

#[test]
fn final_class_with_override_methods() {
    let harness = TestHarness::new();
    let units = vec![DeclarationUnit::new(
        "Pawn.h",
        r#"
class APawn final : public AActor
{
public:
    GENERATED_REFLECTION_BODY()

    UFUNCTION(LuaBind)
    virtual void Tick(float DeltaTime) override;

    UFUNCTION(LuaBind, DisplayName="Hop")
    void Jump();
};
"#,
    )];
    let report = harness.generator().run(&units);

    assert!(report.skipped.is_empty());
    let pawn = report.expect_class("APawn");
    assert_eq!(pawn.classification, Classification::Spawnable);
    assert!(pawn.bindings_block.contains("    AddAlias<APawn, float>(\n        T, \"Tick\", &APawn::Tick);\n"));
    assert!(pawn.bindings_block.contains("    AddAlias<APawn>(\n        T, \"Hop\", &APawn::Jump);\n"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn alternate_vocabulary_from_toml() {
    let config = ReflectionConfig::from_toml_str(
        r#"
[vocabulary]
script_bind_flag = "ScriptCallable"
void_type = "void"

[spawnable_root]
name = "AWeapon"
identity = { name = "Label", declared_type = "FString", category = "[Weapon]", tooltip = "Weapon label" }
"#,
    )
    .expect("valid config");
    let harness = TestHarness::with_config(&config);
    let report = harness.run(&["Rifle.h"]);

    let rifle = report.expect_class("ARifle");
    assert_eq!(rifle.classification, Classification::Spawnable);
    assert!(rifle.properties_block.contains("ADD_PROPERTY(FString, Label, \"[Weapon]\", true, \"Weapon label\")"));
    assert!(!rifle.bindings_block.contains("AddMethodR"));
}
