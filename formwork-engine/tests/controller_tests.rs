use formwork_engine::{ControllerError, FormController};
use formwork_model::{FormRegistry, MemoryDataset, RegistryError};
use formwork_types::{EntityPath, FormCommand, FormEvent, FormKey, HostAction, TransportStatus};
use formwork_validate::{Domain, FieldDefinition, MetadataRegistry, ValidatorSpec};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn key(text: &str) -> FormKey {
    FormKey::new(text).unwrap()
}

fn path(text: &str) -> EntityPath {
    EntityPath::new(text).unwrap()
}

fn make_metadata() -> MetadataRegistry {
    MetadataRegistry::new()
        .with_domain(
            "DO_SHORT_TEXT",
            Domain::new(vec![ValidatorSpec::Text {
                min_length: None,
                max_length: Some(200),
            }]),
        )
        .with_definition(
            path("user"),
            "last_name",
            FieldDefinition::new("DO_SHORT_TEXT").required(),
        )
        .with_definition(path("user"), "first_name", FieldDefinition::new("DO_SHORT_TEXT"))
}

fn make_controller() -> FormController {
    FormController::new(Arc::new(make_metadata()))
}

fn make_dataset() -> MemoryDataset {
    let mut dataset = MemoryDataset::new();
    dataset.set_value(&path("user"), "first_name", json!("Diego"));
    dataset.set_value(&path("user"), "last_name", json!("de la Vega"));
    dataset
}

fn apply(
    controller: &FormController,
    registry: &mut FormRegistry,
    dataset: &MemoryDataset,
    command: FormCommand,
) -> Vec<FormEvent> {
    controller.apply(command, registry, dataset).unwrap()
}

/// Registers the "user-profile" form observing the "user" path.
fn create_user_form(
    controller: &FormController,
    registry: &mut FormRegistry,
    dataset: &MemoryDataset,
) -> FormKey {
    let form_key = key("user-profile");
    apply(
        controller,
        registry,
        dataset,
        FormCommand::Create {
            form_key: form_key.clone(),
            entity_paths: vec![path("user")],
        },
    );
    form_key
}

fn toggle(form_key: &FormKey, edit: bool) -> FormCommand {
    FormCommand::ToggleEditing {
        form_key: form_key.clone(),
        edit,
    }
}

fn change(form_key: &FormKey, name: &str, value: serde_json::Value) -> FormCommand {
    FormCommand::InputChange {
        form_key: form_key.clone(),
        entity_path: path("user"),
        name: name.to_string(),
        value,
    }
}

fn validate(form_key: &FormKey) -> FormCommand {
    FormCommand::Validate {
        form_key: form_key.clone(),
        non_validated_fields: Vec::new(),
        save_action: HostAction(json!({"type": "persist_user"})),
    }
}

fn dataset_changed(status: TransportStatus, saving: bool) -> FormCommand {
    FormCommand::DatasetChanged {
        entity_path: path("user"),
        status,
        saving,
    }
}

// ── Create / Destroy ─────────────────────────────────────────────

#[test]
fn create_snapshots_dataset_fields() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();

    let form_key = create_user_form(&controller, &mut registry, &dataset);

    let form = registry.get(&form_key).unwrap();
    assert!(!form.edit());
    assert!(!form.saving());
    assert_eq!(form.field_count(), 2);

    let field = form.field(&path("user"), "first_name").unwrap();
    assert_eq!(field.data_set_value, json!("Diego"));
    assert_eq!(field.raw_input_value, Some(json!("Diego")));
}

#[test]
fn create_with_empty_dataset_starts_bare() {
    let controller = make_controller();
    let dataset = MemoryDataset::new();
    let mut registry = FormRegistry::new();

    let form_key = create_user_form(&controller, &mut registry, &dataset);

    assert_eq!(registry.get(&form_key).unwrap().field_count(), 0);
}

#[test]
fn create_rejects_a_duplicate_key() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);

    let result = controller.apply(
        FormCommand::Create {
            form_key,
            entity_paths: vec![path("user")],
        },
        &mut registry,
        &dataset,
    );

    assert!(matches!(
        result,
        Err(ControllerError::Registry(RegistryError::DuplicateForm(_)))
    ));
}

#[test]
fn destroy_removes_the_form() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);

    apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::Destroy {
            form_key: form_key.clone(),
        },
    );

    assert!(registry.get(&form_key).is_none());
}

#[test]
fn destroy_of_an_unknown_form_errors() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();

    let result = controller.apply(
        FormCommand::Destroy {
            form_key: key("ghost"),
        },
        &mut registry,
        &dataset,
    );

    assert!(matches!(
        result,
        Err(ControllerError::Registry(RegistryError::UnknownForm(_)))
    ));
}

// ── Editing mode ─────────────────────────────────────────────────

#[test]
fn leaving_edit_mode_discards_unsaved_input() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);

    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "last_name", json!("Dia")),
    );
    assert_eq!(
        registry
            .get(&form_key)
            .unwrap()
            .field(&path("user"), "last_name")
            .unwrap()
            .raw_input_value,
        Some(json!("Dia"))
    );

    apply(&controller, &mut registry, &dataset, toggle(&form_key, false));

    let form = registry.get(&form_key).unwrap();
    assert!(!form.edit());
    assert_eq!(
        form.field(&path("user"), "last_name").unwrap().raw_input_value,
        Some(json!("de la Vega"))
    );
}

#[test]
fn leaving_edit_mode_clears_the_saving_flag() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(&controller, &mut registry, &dataset, validate(&form_key));
    assert!(registry.get(&form_key).unwrap().saving());

    apply(&controller, &mut registry, &dataset, toggle(&form_key, false));

    assert!(!registry.get(&form_key).unwrap().saving());
}

#[test]
fn input_on_a_consulting_form_is_ignored() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);

    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "first_name", json!("Zorro")),
    );

    assert!(events.is_empty());
    assert_eq!(
        registry
            .get(&form_key)
            .unwrap()
            .field(&path("user"), "first_name")
            .unwrap()
            .raw_input_value,
        Some(json!("Diego"))
    );
}

#[test]
fn input_change_patches_only_the_raw_facet() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));

    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "first_name", json!("Zorro")),
    );

    let field = registry
        .get(&form_key)
        .unwrap()
        .field(&path("user"), "first_name")
        .unwrap();
    assert_eq!(field.raw_input_value, Some(json!("Zorro")));
    assert_eq!(field.data_set_value, json!("Diego"));
}

#[test]
fn input_change_materializes_an_unknown_field() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));

    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "nickname", json!("El Zorro")),
    );

    let field = registry
        .get(&form_key)
        .unwrap()
        .field(&path("user"), "nickname")
        .unwrap();
    assert_eq!(field.data_set_value, serde_json::Value::Null);
    assert_eq!(field.raw_input_value, Some(json!("El Zorro")));
}

// ── Blur feedback ────────────────────────────────────────────────

#[test]
fn blur_reports_an_invalid_value_and_stores_it_anyway() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));

    let oversized = json!("x".repeat(201));
    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::InputBlur {
            form_key: form_key.clone(),
            entity_path: path("user"),
            name: "last_name".to_string(),
            value: oversized.clone(),
        },
    );

    assert_eq!(events.len(), 1);
    match &events[0] {
        FormEvent::FieldInvalid(error) => {
            assert_eq!(error.name, "last_name");
            assert_eq!(error.message, "must be at most 200 characters");
        }
        other => panic!("expected a field error, got {other:?}"),
    }
    assert_eq!(
        registry
            .get(&form_key)
            .unwrap()
            .field(&path("user"), "last_name")
            .unwrap()
            .raw_input_value,
        Some(oversized)
    );
}

#[test]
fn blur_with_a_valid_value_is_silent() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));

    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::InputBlur {
            form_key: form_key.clone(),
            entity_path: path("user"),
            name: "first_name".to_string(),
            value: json!("Bernardo"),
        },
    );

    assert!(events.is_empty());
}

#[test]
fn list_blur_patches_one_line_property() {
    let controller = make_controller();
    let mut dataset = make_dataset();
    dataset.set_value(
        &path("user"),
        "phones",
        json!([{"label": "home", "number": "+34 111"}, {"label": "work", "number": "+34 222"}]),
    );
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));

    apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::InputBlurList {
            form_key: form_key.clone(),
            entity_path: path("user"),
            name: "phones".to_string(),
            property_name_line: "number".to_string(),
            index: 1,
            value: json!("+34 999"),
        },
    );

    let raw = registry
        .get(&form_key)
        .unwrap()
        .field(&path("user"), "phones")
        .unwrap()
        .raw_input_value
        .clone()
        .unwrap();
    assert_eq!(raw[1]["number"], json!("+34 999"));
    assert_eq!(raw[0]["number"], json!("+34 111"));
}

#[test]
fn list_blur_out_of_bounds_is_contained() {
    let controller = make_controller();
    let mut dataset = make_dataset();
    dataset.set_value(&path("user"), "phones", json!([{"number": "+34 111"}]));
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));

    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::InputBlurList {
            form_key: form_key.clone(),
            entity_path: path("user"),
            name: "phones".to_string(),
            property_name_line: "number".to_string(),
            index: 5,
            value: json!("+34 999"),
        },
    );

    assert!(events.is_empty());
    let raw = registry
        .get(&form_key)
        .unwrap()
        .field(&path("user"), "phones")
        .unwrap()
        .raw_input_value
        .clone()
        .unwrap();
    assert_eq!(raw[0]["number"], json!("+34 111"));
}

// ── Save flow ────────────────────────────────────────────────────

#[test]
fn an_invalid_field_blocks_the_save() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "last_name", json!("x".repeat(201))),
    );

    let events = apply(&controller, &mut registry, &dataset, validate(&form_key));

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], FormEvent::FieldInvalid(_)));
    let form = registry.get(&form_key).unwrap();
    assert!(form.edit());
    assert!(!form.saving());
}

#[test]
fn every_invalid_field_is_reported() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "first_name", json!("x".repeat(201))),
    );
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "last_name", json!("")),
    );

    let events = apply(&controller, &mut registry, &dataset, validate(&form_key));

    let failed: Vec<&str> = events
        .iter()
        .map(|event| match event {
            FormEvent::FieldInvalid(error) => error.name.as_str(),
            other => panic!("expected only field errors, got {other:?}"),
        })
        .collect();
    assert_eq!(failed, vec!["first_name", "last_name"]);
}

#[test]
fn a_valid_form_requests_the_save_action() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "last_name", json!("Vega")),
    );

    let events = apply(&controller, &mut registry, &dataset, validate(&form_key));

    assert_eq!(
        events,
        vec![
            FormEvent::SavingStarted {
                form_key: form_key.clone(),
            },
            FormEvent::SaveRequested {
                form_key: form_key.clone(),
                action: HostAction(json!({"type": "persist_user"})),
            },
        ]
    );
    assert!(registry.get(&form_key).unwrap().saving());
}

#[test]
fn excluded_fields_never_block_the_save() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "last_name", json!("")),
    );

    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::Validate {
            form_key: form_key.clone(),
            non_validated_fields: vec!["last_name".to_string()],
            save_action: HostAction(json!({"type": "persist_user"})),
        },
    );

    assert!(matches!(events[0], FormEvent::SavingStarted { .. }));
    assert!(registry.get(&form_key).unwrap().saving());
}

#[test]
fn overlapping_saves_are_rejected() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let first = create_user_form(&controller, &mut registry, &dataset);
    let second = key("user-admin");
    apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::Create {
            form_key: second.clone(),
            entity_paths: vec![path("user")],
        },
    );
    apply(&controller, &mut registry, &dataset, toggle(&first, true));
    apply(&controller, &mut registry, &dataset, validate(&first));
    assert!(registry.get(&first).unwrap().saving());

    let result = controller.apply(validate(&second), &mut registry, &dataset);

    assert!(matches!(
        result,
        Err(ControllerError::OverlappingSave { .. })
    ));
    assert!(!registry.get(&second).unwrap().saving());
}

// ── Dataset sync ─────────────────────────────────────────────────

#[test]
fn a_pending_sync_never_clobbers_raw_input() {
    let controller = make_controller();
    let mut dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "first_name", json!("Zor")),
    );

    dataset.set_value(&path("user"), "first_name", json!("Diego II"));
    dataset.set_loading(&path("user"), true);
    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        dataset_changed(TransportStatus::Pending, false),
    );

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], FormEvent::EntitySynced { .. }));
    let field = registry
        .get(&form_key)
        .unwrap()
        .field(&path("user"), "first_name")
        .unwrap();
    assert_eq!(field.data_set_value, json!("Diego II"));
    assert!(field.loading);
    assert_eq!(field.raw_input_value, Some(json!("Zor")));
}

#[test]
fn a_success_sync_refreshes_raw_input() {
    let controller = make_controller();
    let mut dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "first_name", json!("Zor")),
    );

    dataset.set_value(&path("user"), "first_name", json!("Diego II"));
    apply(
        &controller,
        &mut registry,
        &dataset,
        dataset_changed(TransportStatus::Success, false),
    );

    let field = registry
        .get(&form_key)
        .unwrap()
        .field(&path("user"), "first_name")
        .unwrap();
    assert_eq!(field.data_set_value, json!("Diego II"));
    assert_eq!(field.raw_input_value, Some(json!("Diego II")));
}

#[test]
fn a_sync_reaches_every_observing_form() {
    let controller = make_controller();
    let mut dataset = make_dataset();
    dataset.set_value(&path("account"), "iban", json!("FR76"));
    let mut registry = FormRegistry::new();
    let first = create_user_form(&controller, &mut registry, &dataset);
    let second = key("user-admin");
    apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::Create {
            form_key: second.clone(),
            entity_paths: vec![path("user")],
        },
    );
    let bystander = key("account-form");
    apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::Create {
            form_key: bystander.clone(),
            entity_paths: vec![path("account")],
        },
    );

    dataset.set_value(&path("user"), "first_name", json!("Bernardo"));
    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        dataset_changed(TransportStatus::Success, false),
    );

    assert_eq!(events.len(), 1);
    for form_key in [&first, &second] {
        assert_eq!(
            registry
                .get(form_key)
                .unwrap()
                .field(&path("user"), "first_name")
                .unwrap()
                .data_set_value,
            json!("Bernardo")
        );
    }
    assert_eq!(
        registry
            .get(&bystander)
            .unwrap()
            .field(&path("account"), "iban")
            .unwrap()
            .data_set_value,
        json!("FR76")
    );
}

#[test]
fn a_sync_of_an_unobserved_path_still_reports_the_fan_out() {
    let controller = make_controller();
    let dataset = MemoryDataset::new();
    let mut registry = FormRegistry::new();

    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::DatasetChanged {
            entity_path: path("orphan"),
            status: TransportStatus::Success,
            saving: false,
        },
    );

    assert_eq!(
        events,
        vec![FormEvent::EntitySynced {
            entity_path: path("orphan"),
            fields: Vec::new(),
        }]
    );
}

#[test]
fn a_save_commit_returns_the_saving_form_to_consulting() {
    let controller = make_controller();
    let mut dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "last_name", json!("Vega")),
    );
    apply(&controller, &mut registry, &dataset, validate(&form_key));

    dataset.set_value(&path("user"), "last_name", json!("Vega"));
    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        dataset_changed(TransportStatus::Success, true),
    );

    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1],
        FormEvent::EditingToggled {
            form_key: form_key.clone(),
            edit: false,
        }
    );
    let form = registry.get(&form_key).unwrap();
    assert!(!form.edit());
    assert!(!form.saving());
    assert_eq!(
        form.field(&path("user"), "last_name").unwrap().raw_input_value,
        Some(json!("Vega"))
    );
}

#[test]
fn a_commit_without_a_saving_form_skips_the_flip() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));

    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        dataset_changed(TransportStatus::Success, true),
    );

    assert_eq!(events.len(), 1);
    assert!(registry.get(&form_key).unwrap().edit());
}

#[test]
fn a_commit_flips_only_the_saving_form() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let saving_form = create_user_form(&controller, &mut registry, &dataset);
    let editing_form = key("user-admin");
    apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::Create {
            form_key: editing_form.clone(),
            entity_paths: vec![path("user")],
        },
    );
    apply(&controller, &mut registry, &dataset, toggle(&saving_form, true));
    apply(&controller, &mut registry, &dataset, toggle(&editing_form, true));
    apply(&controller, &mut registry, &dataset, validate(&saving_form));

    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        dataset_changed(TransportStatus::Success, true),
    );

    assert_eq!(
        events[1],
        FormEvent::EditingToggled {
            form_key: saving_form.clone(),
            edit: false,
        }
    );
    assert!(!registry.get(&saving_form).unwrap().edit());
    assert!(registry.get(&editing_form).unwrap().edit());
}

#[test]
fn fields_materialize_on_the_first_sync_after_a_bare_create() {
    let controller = make_controller();
    let mut dataset = MemoryDataset::new();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    assert_eq!(registry.get(&form_key).unwrap().field_count(), 0);

    dataset.set_value(&path("user"), "first_name", json!("Diego"));
    apply(
        &controller,
        &mut registry,
        &dataset,
        dataset_changed(TransportStatus::Success, false),
    );

    let form = registry.get(&form_key).unwrap();
    assert_eq!(form.field_count(), 1);
    assert_eq!(
        form.field(&path("user"), "first_name").unwrap().data_set_value,
        json!("Diego")
    );
}

#[test]
fn reset_restores_dataset_values_without_leaving_edit_mode() {
    let controller = make_controller();
    let dataset = make_dataset();
    let mut registry = FormRegistry::new();
    let form_key = create_user_form(&controller, &mut registry, &dataset);
    apply(&controller, &mut registry, &dataset, toggle(&form_key, true));
    apply(
        &controller,
        &mut registry,
        &dataset,
        change(&form_key, "first_name", json!("Zorro")),
    );

    let events = apply(
        &controller,
        &mut registry,
        &dataset,
        FormCommand::Reset {
            form_key: form_key.clone(),
        },
    );

    assert!(events.is_empty());
    let form = registry.get(&form_key).unwrap();
    assert!(form.edit());
    assert_eq!(
        form.field(&path("user"), "first_name").unwrap().raw_input_value,
        Some(json!("Diego"))
    );
}
