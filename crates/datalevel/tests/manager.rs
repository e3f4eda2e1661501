use datalevel::{manager::Builder, Config, Field, FieldTy, Level, Manager, ModelDef, Virtual};
use pretty_assertions::assert_eq;
use serde_json::json;
use std_util::prelude::*;

fn register(builder: &mut Builder) -> &mut Builder {
    builder
        .register(
            ModelDef::document("Article")
                .field(Field::scalar("title").level(Level::BASIC))
                .field(Field::scalar("body").level(Level::DETAIL))
                .field(Field::scalar("slug").readonly())
                .field(Field::reference("author", "Author").level(Level::SHORT))
                .field(Field::embedded("meta", "Meta"))
                .field(
                    Field::virtual_reference(
                        "comments",
                        FieldTy::Scalar,
                        Virtual::new("_id", "article").count(),
                    )
                    .level(Level::DETAIL),
                ),
        )
        .register(
            ModelDef::document("Author")
                .field(Field::scalar("name"))
                .default_level(Level::DETAIL),
        )
        .register(
            ModelDef::embedded("Meta")
                .field(Field::scalar("createdAt").autogen())
                .field(Field::scalar("tags")),
        )
}

fn manager() -> Manager {
    let mut builder = Manager::builder();
    assert_ok!(register(&mut builder).build())
}

#[test]
fn selection_uses_requested_level() {
    let manager = manager();
    let selection = assert_some!(assert_ok!(manager.selection("Article", Some(Level::SHORT))));

    assert_eq!(selection.level, Level::SHORT);
    assert_eq!(
        selection.fields.keys().collect::<Vec<_>>(),
        ["_id", "title", "slug", "author", "meta.createdAt", "meta.tags"]
    );

    let author = assert_some!(selection.populate.get("author"));
    assert!(author.selects("name"));
    assert!(!selection.populate.contains_key("comments"));
}

#[test]
fn selection_without_any_level_is_unrestricted() {
    let manager = manager();
    assert_none!(assert_ok!(manager.selection("Article", None)));
}

#[test]
fn selection_falls_back_to_model_default() {
    let manager = manager();
    let selection = assert_some!(assert_ok!(manager.selection("Author", None)));
    assert_eq!(selection.level, Level::DETAIL);
}

#[test]
fn selection_falls_back_to_configured_default() {
    let mut builder = Manager::builder();
    register(&mut builder).default_level(Level::DETAIL);
    let manager = assert_ok!(builder.build());

    let selection = assert_some!(assert_ok!(manager.selection("Article", None)));
    assert_eq!(selection.level, Level::DETAIL);
    assert!(selection.selects("body"));
    assert!(selection.populate.contains_key("comments"));

    // Model default wins over the configured one
    let mut builder = Manager::builder();
    register(&mut builder).default_level(Level::BASIC);
    let manager = assert_ok!(builder.build());

    let selection = assert_some!(assert_ok!(manager.selection("Author", None)));
    assert_eq!(selection.level, Level::DETAIL);
}

#[test]
fn selection_serializes_for_query_builders() {
    let manager = manager();
    let selection = assert_some!(assert_ok!(manager.selection("Author", Some(Level::BASIC))));

    assert_eq!(
        serde_json::to_value(&selection).unwrap(),
        json!({ "level": 10, "fields": { "_id": 1, "name": 1 }, "populate": {} })
    );
}

#[test]
fn config_from_json() {
    let config: Config =
        serde_json::from_value(json!({ "max_depth": 3, "default_level": 20 })).unwrap();

    let mut builder = Manager::builder();
    register(&mut builder).config(config);
    let manager = assert_ok!(builder.build());

    assert_eq!(manager.config().max_depth, 3);
    assert_eq!(manager.config().default_level, Some(Level::SHORT));

    assert_err!(serde_json::from_value::<Config>(json!({ "depth": 3 })));
}

#[test]
fn tight_depth_bound_rejects_nesting() {
    let mut builder = Manager::builder();
    register(&mut builder).max_depth(1);
    let manager = assert_ok!(builder.build());

    let err = assert_err!(manager.data_level_populates("Article", Level::SHORT));
    assert!(err.is_circle_dependency());
    assert_eq!(err.circle_dependency_path(), Some("Article.author"));

    // Models without nested fields never leave the root
    assert_ok!(manager.data_level_populates("Author", Level::DETAIL));
}

#[test]
fn unknown_model_is_reported() {
    let manager = manager();

    let err = assert_err!(manager.selection("Missing", None));
    assert!(err.is_unknown_model());
    assert_eq!(err.to_string(), "unknown model `Missing`");
}

#[test]
fn create_filter_drops_identity_and_autogen() {
    let manager = manager();
    let filter = assert_ok!(manager.create_filter("Article"));

    assert_eq!(filter.omits().collect::<Vec<_>>(), ["_id", "meta.createdAt"]);

    let mut payload = json!({
        "_id": "1",
        "title": "hello",
        "slug": "hello",
        "meta": { "createdAt": 0, "tags": ["a"] },
    });
    filter.apply(&mut payload);

    assert_eq!(
        payload,
        json!({ "title": "hello", "slug": "hello", "meta": { "tags": ["a"] } })
    );
}

#[test]
fn update_filter_also_drops_readonly() {
    let manager = manager();
    let filter = assert_ok!(manager.update_filter("Article"));

    assert!(filter.is_omitted("slug"));
    assert!(filter.is_omitted("meta.createdAt"));
    assert!(!filter.is_omitted("meta.tags"));

    let mut payload = json!({
        "_id": "1",
        "title": "hello",
        "slug": "changed",
        "meta.createdAt": 5,
        "meta.tags": ["b"],
    });
    filter.omit("title").apply(&mut payload);

    assert_eq!(payload, json!({ "meta.tags": ["b"] }));
}

#[test]
fn clones_share_caches() {
    let manager = manager();
    let clone = manager.clone();

    let first = assert_ok!(manager.data_level_populates("Article", Level::DETAIL));
    let second = assert_ok!(clone.data_level_populates("Article", Level::DETAIL));
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn update_filter_drops_dotted_map_keys() {
    let mut builder = Manager::builder();
    builder
        .register(
            ModelDef::embedded("Entry")
                .field(Field::scalar("value"))
                .field(Field::scalar("updatedAt").autogen()),
        )
        .register(ModelDef::document("Ledger").field(Field::embedded("entries", "Entry").map()));
    let manager = assert_ok!(builder.build());

    let filter = assert_ok!(manager.update_filter("Ledger"));
    assert!(filter.is_omitted("entries.a.updatedAt"));

    let mut payload = json!({
        "entries.a.updatedAt": 5,
        "entries": { "b": { "updatedAt": 6, "value": 1 } },
    });
    filter.apply(&mut payload);

    assert_eq!(payload, json!({ "entries": { "b": { "value": 1 } } }));
}
