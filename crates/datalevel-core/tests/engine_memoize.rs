use datalevel_core::schema::app::*;
use datalevel_core::schema::{ModelDef, Resolve, Schema};
use datalevel_core::Engine;
use std_util::prelude::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts every lookup the engine performs.
struct Counting {
    schema: Schema,
    lookups: AtomicUsize,
}

impl Counting {
    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Resolve for Counting {
    fn resolve(&self, name: &str) -> Option<&Model> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.schema.resolve(name)
    }
}

fn counting() -> Counting {
    let mut builder = Schema::builder();
    builder
        .register(
            ModelDef::document("Parent")
                .field(Field::scalar("name"))
                .field(Field::reference("child", "Child").level(Level::BASIC))
                .field(Field::embedded("meta", "Meta")),
        )
        .register(ModelDef::document("Child").field(Field::scalar("label").readonly()))
        .register(ModelDef::embedded("Meta").field(Field::scalar("createdAt").autogen()));

    Counting {
        schema: assert_ok!(builder.build()),
        lookups: AtomicUsize::new(0),
    }
}

#[test]
fn second_call_performs_no_lookups() {
    let resolver = counting();
    let engine = Engine::new(&resolver);
    let parent = assert_some!(resolver.schema.model_by_name("Parent"));
    let child = assert_some!(resolver.schema.model_by_name("Child"));

    let first = assert_ok!(engine.data_level_populates(parent, Level::DETAIL));
    let after_first = resolver.lookups();
    assert!(after_first > 0);

    let second = assert_ok!(engine.data_level_populates(parent, Level::DETAIL));
    assert_eq!(resolver.lookups(), after_first);
    assert!(Arc::ptr_eq(&first, &second));

    // Reached while resolving the parent, so already cached
    assert_ok!(engine.data_level_populates(child, Level::DETAIL));
    assert_eq!(resolver.lookups(), after_first);
}

#[test]
fn levels_are_cached_independently() {
    let resolver = counting();
    let engine = Engine::new(&resolver);
    let parent = assert_some!(resolver.schema.model_by_name("Parent"));

    assert_ok!(engine.data_level_populates(parent, Level::BASIC));
    let after_basic = resolver.lookups();

    assert_ok!(engine.data_level_populates(parent, Level::SHORT));
    assert!(resolver.lookups() > after_basic);
}

#[test]
fn managed_fields_are_cached() {
    let resolver = counting();
    let engine = Engine::new(&resolver);
    let parent = assert_some!(resolver.schema.model_by_name("Parent"));

    let first = assert_ok!(engine.autogen_fields(parent));
    let after_first = resolver.lookups();

    let second = assert_ok!(engine.autogen_fields(parent));
    assert_eq!(resolver.lookups(), after_first);
    assert!(Arc::ptr_eq(&first, &second));

    // Readonly has its own cache
    assert_ok!(engine.readonly_fields(parent));
    assert!(resolver.lookups() > after_first);
}

#[test]
fn engine_is_shareable_across_threads() {
    let resolver = Arc::new(counting());
    let engine = Arc::new(Engine::new(resolver.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            let resolver = resolver.clone();
            std::thread::spawn(move || {
                let parent = resolver.schema.model_by_name("Parent").unwrap();
                engine
                    .data_level_populates(parent, Level::DETAIL)
                    .unwrap()
                    .as_ref()
                    .clone()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for res in &results[1..] {
        assert_eq!(res, &results[0]);
    }
}
