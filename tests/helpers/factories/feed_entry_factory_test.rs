use crate::engine::types::ACTIVITY_MODEL;
use crate::test_helpers::factories::{ContentObjectFactory, FeedEntryFactory};

#[test]
fn test_feed_entry_factory_overrides_object_key() {
    let entry = FeedEntryFactory::new()
        .with_id(9)
        .with_object(ACTIVITY_MODEL, 4)
        .sticked()
        .create();

    assert_eq!(entry.id, 9);
    assert_eq!(entry.object_key(), (ACTIVITY_MODEL, 4));
    assert!(entry.sticked);
}

#[test]
fn test_content_object_factory_sets_author_and_text() {
    let object = ContentObjectFactory::new()
        .with_author("carol-guid", "Carol")
        .with_text("wall", "mail")
        .create();

    assert_eq!(object.author.display_name, "Carol");
    assert_eq!((object.wall_text.as_str(), object.mail_text.as_str()), ("wall", "mail"));
}
