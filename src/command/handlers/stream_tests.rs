use std::sync::Arc;

use crate::command::handlers::StreamHandler;
use crate::engine::errors::StreamError;
use crate::engine::render::{MarkupRenderer, ObjectRegistry};
use crate::engine::store::{PostSeed, SqlitePostLoader, sqlite_registry};
use crate::engine::types::{POST_MODEL, Visibility};
use crate::logging::init_for_tests;
use crate::test_helpers::factories::{SeededWorld, StreamRequestFactory};
use crate::test_helpers::factory::Factory;

fn registry(world: &SeededWorld) -> ObjectRegistry {
    sqlite_registry(&world.store)
}

#[test]
fn run_renders_page_with_pagination_data() {
    init_for_tests();
    let world = Factory::seed().create();
    let seed = world.seeder();
    let first = seed.post(world.bob.wall_id, &world.bob, PostSeed::new("first")).unwrap();
    let second = seed.post(world.bob.wall_id, &world.bob, PostSeed::new("second <b>")).unwrap();
    let third = seed.post(world.bob.wall_id, &world.bob, PostSeed::new("third")).unwrap();

    let registry = registry(&world);
    let handler = StreamHandler::new(world.store.as_ref(), &registry, &MarkupRenderer);
    let request = StreamRequestFactory::user("bob-guid")
        .acting_as(world.alice)
        .with_limit(2)
        .create();

    let response = handler.run(&request).unwrap();

    assert_eq!(response.counter, 2);
    assert_eq!(response.entry_ids, vec![third.entry_id, second.entry_id]);
    assert_eq!(response.last_entry_id, Some(second.entry_id));
    assert!(response.output.contains("third"));
    assert!(response.output.contains("second &lt;b&gt;"));
    assert!(!response.output.contains(">first<"));

    let next = StreamRequestFactory::user("bob-guid")
        .acting_as(world.alice)
        .with_limit(2)
        .with_cursor(second.entry_id)
        .create();
    let response = handler.run(&next).unwrap();
    assert_eq!(response.entry_ids, vec![first.entry_id]);
    assert_eq!(response.counter, 1);
}

#[test]
fn run_counts_entries_without_loader_but_does_not_render_them() {
    let world = Factory::seed().create();
    let seed = world.seeder();
    let activity = seed
        .activity(world.bob.wall_id, &world.bob, "joined", "joined Team", Visibility::Public)
        .unwrap();

    // Only posts are loadable.
    let registry = ObjectRegistry::new()
        .with_loader(POST_MODEL, Arc::new(SqlitePostLoader::new(world.store.clone())));
    let handler = StreamHandler::new(world.store.as_ref(), &registry, &MarkupRenderer);
    let request = StreamRequestFactory::community()
        .acting_as(world.alice)
        .activity_only()
        .create();

    let response = handler.run(&request).unwrap();

    assert_eq!(response.counter, 1);
    assert!(response.entry_ids.is_empty());
    assert_eq!(response.last_entry_id, Some(activity.entry_id));
    assert!(response.output.is_empty());
}

#[test]
fn run_console_concatenates_mail_text() {
    let world = Factory::seed().create();
    let seed = world.seeder();
    seed.post(world.bob.wall_id, &world.bob, PostSeed::new("morning")).unwrap();
    seed.activity(world.carol.wall_id, &world.carol, "joined", "joined News", Visibility::Public)
        .unwrap();
    seed.post(world.bob.wall_id, &world.bob, PostSeed::new("evening")).unwrap();

    let registry = registry(&world);
    let handler = StreamHandler::new(world.store.as_ref(), &registry, &MarkupRenderer);

    let posts = StreamRequestFactory::community().acting_as(world.alice).create();
    let digest = handler.run_console(&posts).unwrap();
    assert_eq!(digest.counter, 2);
    assert_eq!(digest.output, "Bob: evening\nBob: morning\n");

    let activities = StreamRequestFactory::community()
        .acting_as(world.alice)
        .activity_only()
        .create();
    let digest = handler.run_console(&activities).unwrap();
    assert_eq!(digest.output, "Carol joined News\n");
}

#[test]
fn run_console_keeps_sticky_entries_in_sort_order() {
    let world = Factory::seed().create();
    let seed = world.seeder();
    let pinned = seed
        .post(world.bob.wall_id, &world.bob, PostSeed::new("pinned").sticked())
        .unwrap();
    let later = seed.post(world.bob.wall_id, &world.bob, PostSeed::new("later")).unwrap();

    let registry = registry(&world);
    let handler = StreamHandler::new(world.store.as_ref(), &registry, &MarkupRenderer);

    let first = StreamRequestFactory::user("bob-guid").acting_as(world.alice).create();
    assert_eq!(
        handler.run(&first).unwrap().entry_ids,
        vec![pinned.entry_id, later.entry_id]
    );
    assert_eq!(
        handler.run_console(&first).unwrap().output,
        "Bob: later\nBob: pinned\n"
    );

    let next = StreamRequestFactory::user("bob-guid")
        .acting_as(world.alice)
        .with_cursor(later.entry_id)
        .create();
    assert!(handler.run(&next).unwrap().entry_ids.is_empty());
    assert_eq!(handler.run_console(&next).unwrap().output, "Bob: pinned\n");
}

#[test]
fn run_empty_stream() {
    let world = Factory::seed().create();
    let registry = registry(&world);
    let handler = StreamHandler::new(world.store.as_ref(), &registry, &MarkupRenderer);
    let request = StreamRequestFactory::dashboard().acting_as(world.alice).create();

    let response = handler.run(&request).unwrap();

    assert_eq!(response.counter, 0);
    assert_eq!(response.last_entry_id, None);
    assert!(response.output.is_empty());
}

#[test]
fn run_unknown_target_is_not_found() {
    let world = Factory::seed().create();
    let registry = registry(&world);
    let handler = StreamHandler::new(world.store.as_ref(), &registry, &MarkupRenderer);
    let request = StreamRequestFactory::user("ghost").acting_as(world.alice).create();

    let err = handler.run(&request).unwrap_err();

    assert!(matches!(err, StreamError::TargetNotFound { .. }));
    assert_eq!(err.status().code(), 404);
}
