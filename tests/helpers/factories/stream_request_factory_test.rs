use crate::command::types::{FilterToken, SortKey, StreamMode, ViewType};
use crate::test_helpers::factories::StreamRequestFactory;

#[test]
fn test_stream_request_factory_defaults_to_dashboard() {
    let request = StreamRequestFactory::new().create();

    assert_eq!(request.view_type, ViewType::Dashboard);
    assert_eq!(request.page_limit, 10);
    assert_eq!(request.target_guid, None);
    assert_eq!(request.sort_key, SortKey::CreatedAt);
    assert_eq!(request.mode, StreamMode::Normal);
    assert!(request.filters.is_empty());
}

#[test]
fn test_stream_request_factory_space_with_filters_and_cursor() {
    let request = StreamRequestFactory::space("space-guid")
        .with_filters(&["posts_files", "bogus"])
        .with_cursor(7)
        .with_limit(3)
        .create();

    assert_eq!(request.view_type, ViewType::Space);
    assert_eq!(request.target_guid.as_deref(), Some("space-guid"));
    assert_eq!(request.cursor_from, Some(7));
    assert_eq!(request.page_limit, 3);
    assert!(request.filters.contains(FilterToken::PostsFiles));
    assert_eq!(request.filters.tokens.len(), 1);
}
