use crate::engine::store::TargetResolver;
use crate::test_helpers::factories::ResolverFactory;

#[test]
fn test_resolver_factory_creates_expected_mapping() {
    let resolver = ResolverFactory::new()
        .with_space("garden", 3, 30)
        .with_user("gardener", 4, 40)
        .with_member(3, 4)
        .create();

    let space = resolver.find_space("garden").unwrap().unwrap();
    assert_eq!((space.id, space.wall_id), (3, 30));
    let user = resolver.find_user("gardener").unwrap().unwrap();
    assert_eq!((user.id, user.wall_id), (4, 40));
    assert!(resolver.is_space_member(3, 4).unwrap());
    assert!(!resolver.is_space_member(3, 5).unwrap());
    assert!(resolver.find_space("missing").unwrap().is_none());
}

#[test]
fn test_resolver_factory_ships_default_targets() {
    let resolver = ResolverFactory::new().create();

    assert!(resolver.find_space("space-guid").unwrap().is_some());
    assert!(resolver.find_user("user-guid").unwrap().is_some());
}
