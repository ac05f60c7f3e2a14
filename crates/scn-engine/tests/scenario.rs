use std::io::Write;
use std::sync::Arc;

use scn_engine::{
    EntityHandler, HandlerError, HandlerRegistry, LoadState, ObjectId, RefError, Scenario,
    ScenarioConfig, ScenarioError, Source, Value,
};
use serde_json::json;

fn handlers() -> HandlerRegistry {
    HandlerRegistry::new()
        .with(
            EntityHandler::new("person")
                .with_plural("people")
                .setter("attach", "team")
                .setter("befriend", "friend"),
        )
        .with(EntityHandler::new("team").appender("enroll", "members"))
        .with(EntityHandler::new("widget"))
        .with(EntityHandler::new("league"))
        .with(EntityHandler::new("template"))
        .with(EntityHandler::new("strict").require("name"))
}

fn build(spec: serde_json::Value) -> Result<Scenario, ScenarioError> {
    Scenario::builder(handlers()).build(spec.into())
}

fn name_of(scenario: &Scenario, type_name: &str, id: u64) -> Option<Value> {
    scenario
        .by_id(type_name, ObjectId::new(id))
        .unwrap()
        .and_then(|obj| obj.attr("name"))
}

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

#[test]
fn explicit_and_generated_ids() {
    let scenario = build(json!({
        "people": [{"name": "Alice"}, {"name": "Bob", "id": 5}]
    }))
    .unwrap();

    assert_eq!(scenario.collection("people").unwrap().len(), 2);
    assert_eq!(scenario.collection("person").unwrap().len(), 2);
    assert_eq!(name_of(&scenario, "person", 1), Some(Value::from("Alice")));
    assert_eq!(name_of(&scenario, "person", 5), Some(Value::from("Bob")));
    assert_eq!(
        scenario.ids("person").unwrap(),
        vec![ObjectId::new(1), ObjectId::new(5)]
    );
}

#[test]
fn id_field_is_not_a_constructor_field() {
    let scenario = build(json!({"people": [{"name": "Bob", "id": 5}]})).unwrap();
    let bob = scenario.by_id("person", ObjectId::new(5)).unwrap().unwrap();
    assert_eq!(bob.attr("id"), None);
}

#[test]
fn added_object_with_taken_id_relocates_the_holder() {
    let mut scenario = build(json!({"people": [{"name": "Alice", "id": 1}]})).unwrap();
    let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();

    let carl = scenario
        .add("person", json!({"name": "Carl", "id": 1}))
        .unwrap();

    let at_one = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    assert!(Arc::ptr_eq(&at_one, &carl));

    let moved = scenario.id_of("person", &alice).unwrap().unwrap();
    assert_eq!(moved, ObjectId::new(2));
    assert_eq!(name_of(&scenario, "person", 2), Some(Value::from("Alice")));
}

#[test]
fn colliding_ids_inside_a_document() {
    let scenario = build(json!({
        "people": [{"name": "A", "id": 2}, {"name": "B"}, {"name": "C"}, {"name": "D", "id": 2}]
    }))
    .unwrap();

    // B takes 1, C skips the occupied 2 and takes 3, D claims 2 and moves A to 4.
    assert_eq!(name_of(&scenario, "person", 1), Some(Value::from("B")));
    assert_eq!(name_of(&scenario, "person", 2), Some(Value::from("D")));
    assert_eq!(name_of(&scenario, "person", 3), Some(Value::from("C")));
    assert_eq!(name_of(&scenario, "person", 4), Some(Value::from("A")));
}

#[test]
fn id_shapes() {
    let scenario = build(json!({
        "people": [{"name": "A", "id": "7"}, {"name": "B", "id": 0}, {"name": "C", "id": null}]
    }))
    .unwrap();
    assert_eq!(name_of(&scenario, "person", 7), Some(Value::from("A")));
    assert_eq!(name_of(&scenario, "person", 1), Some(Value::from("B")));
    assert_eq!(name_of(&scenario, "person", 2), Some(Value::from("C")));

    let err = build(json!({"people": [{"name": "A", "id": "abc"}]})).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::MalformedDefinition { ref type_name, .. } if type_name == "person"
    ));
}

#[test]
fn count_builds_empty_objects_with_sequential_ids() {
    let scenario = build(json!({"widgets": 3})).unwrap();
    assert_eq!(
        scenario.ids("widget").unwrap(),
        vec![ObjectId::new(1), ObjectId::new(2), ObjectId::new(3)]
    );
    for widget in scenario.collection("widgets").unwrap() {
        assert!(widget.attr_names().is_empty());
    }
}

#[test]
fn zero_count_still_declares_the_type() {
    let mut scenario = build(json!({"widgets": 0})).unwrap();
    assert!(scenario.collection("widget").unwrap().is_empty());
    assert_eq!(scenario.state("widgets"), LoadState::Loaded);

    scenario.add("widget", json!({"size": 2})).unwrap();
    assert_eq!(scenario.ids("widget").unwrap(), vec![ObjectId::new(1)]);
}

#[test]
fn single_mapping_is_one_object() {
    let scenario = build(json!({"team": {"name": "red"}})).unwrap();
    assert_eq!(scenario.collection("teams").unwrap().len(), 1);
    assert_eq!(name_of(&scenario, "team", 1), Some(Value::from("red")));
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

#[test]
fn reference_matches_direct_attribute_walk() {
    let scenario = build(json!({
        "teams": [{"name": "red"}],
        "people": [
            {"name": "Alice", "team": "$team_1"},
            {"name": "Bob", "team_name": "$person_1.team.name"}
        ]
    }))
    .unwrap();

    let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    let walked = alice.attr("team").unwrap().attr("name").unwrap();
    let bob = scenario.by_id("person", ObjectId::new(2)).unwrap().unwrap();
    assert_eq!(bob.attr("team_name"), Some(walked));

    let team = scenario.by_id("team", ObjectId::new(1)).unwrap().unwrap();
    assert_eq!(alice.attr("team"), Some(Value::Object(team)));
}

#[test]
fn references_resolve_inside_nested_values() {
    let scenario = build(json!({
        "teams": [{"name": "red"}, {"name": "blue"}],
        "people": [{"name": "Alice", "history": {"teams": ["$team_1.name", "$team_2.name"], "since": 2020}}]
    }))
    .unwrap();
    let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    let history = alice.attr("history").unwrap();
    assert_eq!(
        history.attr("teams"),
        Some(Value::List(vec![Value::from("red"), Value::from("blue")]))
    );
    assert_eq!(history.attr("since"), Some(Value::Int(2020)));
}

#[test]
fn referenced_type_loads_lazily_and_once() {
    let scenario = build(json!({
        "people": [
            {"name": "Alice", "team": "$team_1.name"},
            {"name": "Bob", "team": "$teams_1.name"}
        ],
        "teams": [{"name": "red"}]
    }))
    .unwrap();

    assert_eq!(name_of(&scenario, "person", 1).unwrap(), Value::from("Alice"));
    let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    assert_eq!(alice.attr("team"), Some(Value::from("red")));
    assert_eq!(scenario.collection("team").unwrap().len(), 1);
    assert_eq!(scenario.state("team"), LoadState::Loaded);
    assert_eq!(scenario.type_names(), vec!["person", "team"]);
}

#[test]
fn load_priority_orders_types() {
    let scenario = Scenario::builder(handlers())
        .load_priority(["widget", "team"])
        .build(json!({"people": [{"name": "A"}], "teams": [{"name": "red"}], "widgets": 1}).into())
        .unwrap();
    assert_eq!(scenario.type_names(), vec!["widget", "team", "person"]);
}

#[test]
fn top_level_reference_supplies_the_fields() {
    let scenario = build(json!({
        "templates": [{"defaults": {"name": "Zed", "age": 40}}],
        "people": ["$template_1.defaults"]
    }))
    .unwrap();
    assert_eq!(name_of(&scenario, "person", 1), Some(Value::from("Zed")));
}

#[test]
fn referenced_mapping_can_claim_an_id() {
    let scenario = build(json!({
        "templates": [{"defaults": {"name": "Zed", "id": 7}}],
        "people": [{"name": "Alice"}, "$template_1.defaults"]
    }))
    .unwrap();
    assert_eq!(
        scenario.ids("person").unwrap(),
        vec![ObjectId::new(1), ObjectId::new(7)]
    );
    let zed = scenario.by_id("person", ObjectId::new(7)).unwrap().unwrap();
    assert_eq!(zed.attr("name"), Some(Value::from("Zed")));
    assert_eq!(zed.attr("id"), None);
}

#[test]
fn top_level_scalar_is_malformed() {
    let err = build(json!({"people": ["Alice"]})).unwrap_err();
    assert!(matches!(err, ScenarioError::MalformedDefinition { .. }));
}

// ---------------------------------------------------------------------------
// Deferred methods
// ---------------------------------------------------------------------------

#[test]
fn deferred_method_replays_with_resolved_object() {
    let scenario = build(json!({
        "people": [{"name": "Alice", "attach": "$team_1"}],
        "teams": [{"name": "red"}]
    }))
    .unwrap();

    let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    let team = scenario.by_id("team", ObjectId::new(1)).unwrap().unwrap();
    assert_eq!(alice.attr("attach"), None);
    assert_eq!(alice.attr("team"), Some(Value::Object(team)));
}

#[test]
fn deferred_sequence_spreads_into_arguments() {
    let scenario = build(json!({
        "teams": [{"name": "red", "enroll": ["$person_1", "$person_2.name", "guest"]}],
        "people": [{"name": "Alice"}, {"name": "Bob"}]
    }))
    .unwrap();

    let team = scenario.by_id("team", ObjectId::new(1)).unwrap().unwrap();
    let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    assert_eq!(
        team.attr("members"),
        Some(Value::List(vec![
            Value::Object(alice),
            Value::from("Bob"),
            Value::from("guest"),
        ]))
    );
}

#[test]
fn deferred_method_can_reference_its_own_object() {
    let scenario = build(json!({
        "people": [{"name": "Narcissus", "befriend": "$person_1"}]
    }))
    .unwrap();
    let me = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    assert_eq!(me.attr("friend"), Some(Value::Object(me.clone())));
}

#[test]
fn deferred_reference_to_a_later_object_of_the_same_type_is_circular() {
    let scenario = build(json!({
        "people": [{"name": "A", "befriend": "$person_2.name"}, {"name": "B"}]
    }));
    // The second person does not exist yet when the first one's methods replay.
    assert!(matches!(
        scenario.unwrap_err(),
        ScenarioError::CircularReference { ref type_name, id } if type_name == "person" && id == ObjectId::new(2)
    ));
}

#[test]
fn add_follows_the_same_resolution_rules() {
    let mut scenario = build(json!({
        "teams": [{"name": "red"}],
        "people": [{"name": "Alice"}]
    }))
    .unwrap();

    let carl = scenario
        .add("people", json!({"name": "Carl", "attach": "$team_1", "buddy": "$person_1.name"}))
        .unwrap();
    let team = scenario.by_id("team", ObjectId::new(1)).unwrap().unwrap();
    assert_eq!(carl.attr("team"), Some(Value::Object(team)));
    assert_eq!(carl.attr("buddy"), Some(Value::from("Alice")));
    assert_eq!(scenario.id_of("person", &carl).unwrap(), Some(ObjectId::new(2)));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn malformed_type_definition() {
    let err = build(json!({"people": "everyone"})).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::MalformedType { ref type_name, found: "string" } if type_name == "person"
    ));
}

#[test]
fn type_without_handler() {
    let err = build(json!({"ghosts": 2})).unwrap_err();
    assert!(matches!(err, ScenarioError::UnknownType(ref name) if name == "ghosts"));
}

#[test]
fn reference_to_missing_object_names_the_type_chain() {
    let err = build(json!({
        "people": [{"name": "Alice", "team": "$team_1"}],
        "teams": [{"name": "red", "league": "$league_9"}],
        "leagues": [{"name": "premier"}]
    }))
    .unwrap_err();

    let ScenarioError::Reference(inner) = &err else {
        panic!("expected a reference error, got {err:?}");
    };
    assert_eq!(inner.type_chain(), vec!["person", "team"]);
    assert!(matches!(inner.root(), RefError::NotFound { id, .. } if *id == ObjectId::new(9)));
    assert!(err.to_string().contains("error loading type 'person'"));
}

#[test]
fn reference_to_missing_attribute() {
    let err = build(json!({
        "teams": [{"name": "red"}],
        "people": [{"name": "Alice", "team": "$team_1.colour"}]
    }))
    .unwrap_err();
    let ScenarioError::Reference(inner) = &err else {
        panic!("expected a reference error, got {err:?}");
    };
    assert!(matches!(
        inner.root(),
        RefError::MissingAttribute { attr, kind, .. } if attr == "colour" && kind == "team"
    ));
}

#[test]
fn invalid_reference_syntax() {
    let err = build(json!({"people": [{"name": "Alice", "team": "$team"}]})).unwrap_err();
    let ScenarioError::Reference(inner) = &err else {
        panic!("expected a reference error, got {err:?}");
    };
    assert_eq!(inner.type_chain(), vec!["person"]);
    assert!(matches!(inner.root(), RefError::InvalidSyntax { .. }));
}

#[test]
fn reference_to_undeclared_type_names_the_loading_type() {
    let err = build(json!({"people": [{"name": "Alice", "league": "$league_1"}]})).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::Load { ref type_name, .. } if type_name == "person"
    ));
    assert!(matches!(err.root(), ScenarioError::Undeclared(name) if name == "league"));
    assert_eq!(
        err.to_string(),
        "error loading type 'person': scenario doesn't have type 'league'"
    );
}

#[test]
fn reference_to_unknown_type_names_the_loading_type() {
    let err = build(json!({"people": [{"name": "Alice", "pet": "$dragon_1"}]})).unwrap_err();
    assert_eq!(err.type_chain(), vec!["person"]);
    assert!(matches!(err.root(), ScenarioError::UnknownType(name) if name == "dragon"));
    assert!(err.to_string().contains("person"));
}

#[test]
fn undeclared_type_deep_in_a_chain_names_every_loading_type() {
    let err = build(json!({
        "people": [{"name": "Alice", "team": "$team_1"}],
        "teams": [{"name": "red", "league": "$league_1"}]
    }))
    .unwrap_err();
    assert_eq!(err.type_chain(), vec!["person", "team"]);
    assert!(matches!(err.root(), ScenarioError::Undeclared(name) if name == "league"));
}

#[test]
fn handler_errors_pass_through_unwrapped() {
    let err = build(json!({"stricts": [{"other": 1}]})).unwrap_err();
    assert!(err.is_handler_error());
    assert!(matches!(
        err,
        ScenarioError::Handler(HandlerError::MissingField { ref field, .. }) if field == "name"
    ));
}

#[test]
fn cross_type_cycle_is_detected() {
    let registry = HandlerRegistry::new()
        .with(EntityHandler::new("a"))
        .with(EntityHandler::new("b"));
    let err = Scenario::builder(registry)
        .build(json!({"a": [{"peer": "$b_1"}], "b": [{"peer": "$a_1"}]}).into())
        .unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::CircularReference { ref type_name, .. } if type_name == "a"
    ));
}

#[test]
fn query_errors() {
    let mut scenario = build(json!({"teams": [{"name": "red"}]})).unwrap();
    assert!(matches!(
        scenario.collection("people"),
        Err(ScenarioError::Undeclared(_))
    ));
    assert!(matches!(
        scenario.by_id("widget", ObjectId::new(1)),
        Err(ScenarioError::Undeclared(_))
    ));
    assert!(matches!(
        scenario.collection("dragons"),
        Err(ScenarioError::Undeclared(_))
    ));
    assert!(scenario.by_id("team", ObjectId::new(99)).unwrap().is_none());
    assert!(matches!(
        scenario.add("person", json!({"name": "X"})),
        Err(ScenarioError::UnknownType(_))
    ));
    assert!(matches!(
        scenario.add("dragon", json!({})),
        Err(ScenarioError::UnknownType(_))
    ));
}

// ---------------------------------------------------------------------------
// Sources and configuration
// ---------------------------------------------------------------------------

#[test]
fn builds_from_a_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(
        b"teams:\n  - name: red\npeople:\n  - name: Alice\n    attach: $team_1\n  - name: Bob\n    id: 5\n",
    )
    .unwrap();

    let scenario = Scenario::load(Source::path(file.path()), handlers(), &[]).unwrap();
    assert_eq!(scenario.len(), 3);
    assert_eq!(name_of(&scenario, "person", 5), Some(Value::from("Bob")));
    let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    assert!(alice.attr("team").unwrap().as_object().is_some());
}

#[test]
fn empty_document_builds_nothing() {
    let scenario = Scenario::load(Source::yaml(""), handlers(), &[]).unwrap();
    assert!(scenario.is_empty());
    assert!(scenario.type_names().is_empty());
}

#[test]
fn custom_id_field_and_reference_syntax() {
    let config: ScenarioConfig = toml::from_str(
        r#"
        id_field = "ref"

        [references]
        prefix = "@"
        id_separator = ":"
        "#,
    )
    .unwrap();

    let scenario = Scenario::builder(handlers())
        .config(config)
        .build(json!({
            "teams": [{"name": "red", "ref": 3}],
            "people": [{"name": "Alice", "team": "@team:3.name", "id": 8}]
        }).into())
        .unwrap();

    let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
    assert_eq!(alice.attr("team"), Some(Value::from("red")));
    // `id` is an ordinary field under this configuration.
    assert_eq!(alice.attr("id"), Some(Value::Int(8)));
}
