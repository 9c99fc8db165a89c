use std::sync::Arc;

use chrono::{Duration, Utc};
use platform::datastore::{
    DatastoreError, Entity, Key, Query, StructuredStore,
};
use server::entity::greeting::{GREETING_KIND, Greeting, guestbook_key};

use crate::common::{TestApp, identity_cookie, routes};

#[tokio::test]
async fn empty_guestbook_renders_form() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::GUESTBOOK).await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains(r#"<form action="/sign" method="post">"#));
    assert!(res.text.contains("Sign Guestbook"));
    assert!(!res.text.contains("wrote:"));
}

#[tokio::test]
async fn sign_stores_anonymous_greeting_and_redirects() {
    let app = TestApp::spawn().await;
    let before = Utc::now();

    let res = app.post_form(routes::SIGN, &[("content", "hello")]).await;
    assert_eq!(res.status, 302);
    assert_eq!(res.location.as_deref(), Some("/"));

    let stored = app
        .datastore
        .run(Query::new(GREETING_KIND).ancestor(guestbook_key()))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    let greeting = Greeting::from_entity(&stored[0]);
    assert_eq!(greeting.author, "");
    assert_eq!(greeting.content, "hello");
    assert!(greeting.date >= before && greeting.date <= Utc::now());

    let page = app.get(routes::GUESTBOOK).await;
    assert!(page.text.contains("An anonymous person wrote:"));
    assert!(page.text.contains("<pre>hello</pre>"));
}

#[tokio::test]
async fn sign_records_principal_as_author() {
    let app = TestApp::spawn().await;
    let cookie = identity_cookie("42", "someone@example.com");

    let res = app
        .post_form_as(routes::SIGN, &[("content", "hi there")], &cookie)
        .await;
    assert_eq!(res.status, 302);

    let page = app.get(routes::GUESTBOOK).await;
    assert!(page.text.contains("<b>someone@example.com</b> wrote:"));
    assert!(!page.text.contains("An anonymous person wrote:"));
}

#[tokio::test]
async fn empty_content_is_accepted() {
    let app = TestApp::spawn().await;

    let res = app.post_form(routes::SIGN, &[("content", "")]).await;
    assert_eq!(res.status, 302);

    let stored = app
        .datastore
        .run(Query::new(GREETING_KIND).ancestor(guestbook_key()))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(Greeting::from_entity(&stored[0]).content, "");
}

#[tokio::test]
async fn content_is_stored_raw_and_escaped_at_render_time() {
    let app = TestApp::spawn().await;

    app.post_form(routes::SIGN, &[("content", "<script>alert(1)</script>")])
        .await;

    let stored = app
        .datastore
        .run(Query::new(GREETING_KIND).ancestor(guestbook_key()))
        .await
        .unwrap();
    assert_eq!(
        Greeting::from_entity(&stored[0]).content,
        "<script>alert(1)</script>"
    );

    let page = app.get(routes::GUESTBOOK).await;
    assert!(page.text.contains("&lt;script&gt;"));
    assert!(!page.text.contains("<script>alert(1)</script>"));
}

#[tokio::test]
async fn view_caps_at_ten_newest_entries() {
    let app = TestApp::spawn().await;
    let now = Utc::now();
    for age in 0..12 {
        let greeting = Greeting {
            author: String::new(),
            content: format!("entry-{age}"),
            date: now - Duration::minutes(age),
        };
        app.datastore.put(greeting.to_entity()).await.unwrap();
    }

    let page = app.get(routes::GUESTBOOK).await;
    assert_eq!(page.status, 200);
    for age in 0..10 {
        assert!(
            page.text.contains(&format!("<pre>entry-{age}</pre>")),
            "missing entry-{age}"
        );
    }
    assert!(!page.text.contains("entry-10"));
    assert!(!page.text.contains("entry-11"));

    // Newest first.
    let newest = page.text.find("entry-0").unwrap();
    let oldest = page.text.find("entry-9").unwrap();
    assert!(newest < oldest);
}

/// Store double whose every operation fails.
struct FailingStore;

#[async_trait::async_trait]
impl StructuredStore for FailingStore {
    async fn put(&self, _entity: Entity) -> Result<Key, DatastoreError> {
        Err(DatastoreError::Backend("the datastore is on fire".to_string()))
    }

    async fn get(&self, _key: &Key) -> Result<Option<Entity>, DatastoreError> {
        Err(DatastoreError::Backend("the datastore is on fire".to_string()))
    }

    async fn run(&self, _query: Query) -> Result<Vec<Entity>, DatastoreError> {
        Err(DatastoreError::Backend("the datastore is on fire".to_string()))
    }
}

#[tokio::test]
async fn query_failure_surfaces_error_text() {
    let app = TestApp::spawn_with(Arc::new(FailingStore)).await;

    let res = app.get(routes::GUESTBOOK).await;
    assert_eq!(res.status, 500);
    assert!(res.text.contains("the datastore is on fire"));
}

#[tokio::test]
async fn write_failure_surfaces_error_text() {
    let app = TestApp::spawn_with(Arc::new(FailingStore)).await;

    let res = app.post_form(routes::SIGN, &[("content", "hello")]).await;
    assert_eq!(res.status, 500);
    assert!(res.text.contains("the datastore is on fire"));
}
