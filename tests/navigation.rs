//! End-to-end navigation over the shipped blog configuration and templates.

use std::sync::Arc;

use blog_nav::config::{load_config, parse_config};
use blog_nav::routing::{MemoryTitleSink, PathParams, RouteError};
use blog_nav::App;

mod common;

fn blog_app() -> (App, Arc<MemoryTitleSink>) {
    let mut config = load_config(&common::repo_path("blog.toml")).unwrap();
    config.router.views_dir = common::repo_path("views").to_string_lossy().into_owned();

    let titles = Arc::new(MemoryTitleSink::new());
    let app = App::new(config, titles.clone()).unwrap();
    (app, titles)
}

#[tokio::test]
async fn test_article_route_binds_id() {
    let (app, titles) = blog_app();

    let nav = app.navigator.navigate("/article/42").await.unwrap();

    assert_eq!(nav.name.as_deref(), Some("article"));
    assert_eq!(nav.params.get("id").map(String::as_str), Some("42"));
    assert_eq!(nav.view.name, "content");
    assert!(nav.view.html.contains("article-content"));
    assert_eq!(titles.current().as_deref(), Some("Article content"));
}

#[tokio::test]
async fn test_unknown_path_follows_wildcard_redirect() {
    let (app, titles) = blog_app();

    let nav = app.navigator.navigate("/no/such/page").await.unwrap();

    assert_eq!(nav.path, "/RobotTest");
    assert_eq!(nav.redirects, vec!["/no/such/page".to_string()]);
    assert_eq!(nav.view.name, "robot");
    assert_eq!(titles.current().as_deref(), Some("Auto-reply robot test"));
}

#[tokio::test]
async fn test_views_load_once_per_route() {
    let (app, _) = blog_app();
    let navigator = &app.navigator;

    let first = navigator.navigate("/").await.unwrap();
    let second = navigator.navigate("/").await.unwrap();

    assert!(Arc::ptr_eq(&first.view, &second.view));
    assert_eq!(navigator.cache().loaded_count(), 1);
    assert!(second.seq > first.seq);
}

#[tokio::test]
async fn test_reverse_routing_matches_forward_resolution() {
    let (app, _) = blog_app();
    let table = app.navigator.table();

    let mut params = PathParams::new();
    params.insert("id".into(), "7".into());
    let path = table.path_for("article", &params).unwrap();
    assert_eq!(path, "/article/7");

    let nav = app.navigator.navigate(&path).await.unwrap();
    assert_eq!(nav.params, params);
}

#[tokio::test]
async fn test_missing_template_is_retryable_view_load_error() {
    let config = parse_config(
        r#"
[router]
views_dir = "no-such-views-dir"

[[routes]]
path = "/"
view = "list"
"#,
    )
    .unwrap();
    let app = App::new(config, Arc::new(MemoryTitleSink::new())).unwrap();

    for _ in 0..2 {
        let err = app.navigator.navigate("/").await.unwrap_err();
        assert!(matches!(err, RouteError::ViewLoad { .. }));
    }
    assert_eq!(app.navigator.cache().loaded_count(), 0);
}

#[tokio::test]
async fn test_redirect_cycle_without_default_route() {
    let config = parse_config(
        r#"
[[routes]]
path = "/"
redirect = "/RobotTest"

[[routes]]
path = "/RobotTest"
redirect = "/"
"#,
    )
    .unwrap();
    let app = App::new(config, Arc::new(MemoryTitleSink::new())).unwrap();

    let err = app.navigator.navigate("/").await.unwrap_err();
    match err {
        RouteError::RedirectCycle { chain } => {
            assert_eq!(chain.first().map(String::as_str), Some("/"));
            assert!(chain.len() <= 7);
        }
        other => panic!("expected redirect cycle, got {}", other),
    }
}

#[tokio::test]
async fn test_app_from_file_loads_shipped_views() {
    let titles = Arc::new(MemoryTitleSink::new());
    let app = App::from_file(&common::repo_path("blog.toml"), titles.clone()).unwrap();

    let nav = app.navigator.navigate("/").await.unwrap();
    assert_eq!(nav.name.as_deref(), Some("Home"));
    assert_eq!(nav.view.name, "list");
    assert_eq!(titles.history().len(), 1);
}
