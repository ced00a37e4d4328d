use crate::engine::store::TargetResolver;
use crate::test_helpers::factories::SeedFactory;

#[test]
fn test_seed_factory_builds_resolvable_world() {
    let world = SeedFactory::new().create();

    let alice = world.store.find_user("alice-guid").unwrap().unwrap();
    assert_eq!(alice, world.alice);
    assert!(!world.store.find_user("mallory-guid").unwrap().unwrap().enabled);

    let team = world.store.find_space("team-guid").unwrap().unwrap();
    assert_eq!(team, world.team);
    assert!(world.store.is_space_member(team.id, alice.id).unwrap());
    assert!(!world.store.is_space_member(world.lounge.id, alice.id).unwrap());
}

#[test]
fn test_seed_factory_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.db");
    let path = path.to_str().unwrap();

    let world = SeedFactory::new().with_database_path(path).create();
    drop(world);

    let reopened = crate::engine::store::SqliteStore::open(path).unwrap();
    assert!(reopened.find_user("bob-guid").unwrap().is_some());
}
