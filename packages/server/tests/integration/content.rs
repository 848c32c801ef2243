use serde_json::{Value, json};

use cms_server::entity::entry::ContentType;
use cms_server::seed::store::{DatabaseSeedStore, SeedStore};

use crate::common::{TestApp, routes};

async fn create(app: &TestApp, content_type: ContentType, document: Value) -> i32 {
    DatabaseSeedStore::new(app.db.clone())
        .create_entry(content_type, document)
        .await
        .expect("Failed to create entry")
}

fn article(slug: &str) -> Value {
    json!({
        "title": slug,
        "slug": slug,
        "cover": { "id": 1, "name": slug, "url": format!("/uploads/{slug}_0123456789.jpg"), "mime": "image/jpeg" },
        "blocks": [
            { "__component": "shared.rich-text", "body": "Hello" },
            { "__component": "shared.link", "text": "Home", "URL": "/" }
        ]
    })
}

mod collections {
    use super::*;

    #[tokio::test]
    async fn listing_requires_find_permission() {
        let app = TestApp::spawn().await;
        create(&app, ContentType::Article, article("coffee")).await;

        let res = app.get(routes::ARTICLES).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn articles_are_paginated_in_creation_order() {
        let app = TestApp::spawn().await;
        app.grant_public("api::article.article.find").await;
        for slug in ["first", "second", "third"] {
            create(&app, ContentType::Article, article(slug)).await;
        }
        create(&app, ContentType::Category, json!({ "name": "news" })).await;

        let page1 = app.get(&format!("{}?pageSize=2", routes::ARTICLES)).await;
        let page2 = app.get(&format!("{}?page=2&pageSize=2", routes::ARTICLES)).await;

        assert_eq!(page1.status, 200, "{}", page1.text);
        assert_eq!(page1.body["pagination"]["total"], 3);
        assert_eq!(page1.body["pagination"]["pageCount"], 2);
        let slugs: Vec<&str> = page1.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .chain(page2.body["data"].as_array().unwrap())
            .map(|e| e["document"]["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn media_urls_point_at_the_cdn() {
        let app = TestApp::spawn().await;
        app.grant_public("api::article.article.find").await;
        create(&app, ContentType::Article, article("coffee")).await;

        let res = app.get(routes::ARTICLES).await;

        let document = &res.body["data"][0]["document"];
        assert_eq!(
            document["cover"]["url"],
            "https://cdn.example.com/uploads/coffee_0123456789.jpg"
        );
        // Links are not media.
        assert_eq!(document["blocks"][1]["URL"], "/");
    }

    #[tokio::test]
    async fn invalid_page_size_is_rejected() {
        let app = TestApp::spawn().await;
        app.grant_public("api::category.category.find").await;

        let res = app.get(&format!("{}?pageSize=500", routes::CATEGORIES)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn find_one_needs_its_own_permission() {
        let app = TestApp::spawn().await;
        app.grant_public("api::article.article.find").await;
        let id = create(&app, ContentType::Article, article("coffee")).await;

        let denied = app.get(&routes::article(id)).await;
        app.grant_public("api::article.article.findOne").await;
        let allowed = app.get(&routes::article(id)).await;

        assert_eq!(denied.status, 403);
        assert_eq!(allowed.status, 200, "{}", allowed.text);
        assert_eq!(allowed.body["data"]["id"], id);
        assert_eq!(allowed.body["data"]["contentType"], "article");
    }

    #[tokio::test]
    async fn entry_of_another_type_is_not_found() {
        let app = TestApp::spawn().await;
        app.grant_public("api::article.article.findOne").await;
        let category = create(&app, ContentType::Category, json!({ "name": "news" })).await;

        let res = app.get(&routes::article(category)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod single_types {
    use super::*;

    #[tokio::test]
    async fn global_is_not_found_until_created() {
        let app = TestApp::spawn().await;
        app.grant_public("api::global.global.find").await;

        let before = app.get(routes::GLOBAL).await;
        create(
            &app,
            ContentType::Global,
            json!({
                "siteName": "Blog",
                "favicon": { "url": "/uploads/favicon_0123456789.png", "mime": "image/png" }
            }),
        )
        .await;
        let after = app.get(routes::GLOBAL).await;

        assert_eq!(before.status, 404);
        assert_eq!(after.status, 200, "{}", after.text);
        assert_eq!(after.body["data"]["document"]["siteName"], "Blog");
        assert_eq!(
            after.body["data"]["document"]["favicon"]["url"],
            "https://cdn.example.com/uploads/favicon_0123456789.png"
        );
    }

    #[tokio::test]
    async fn about_requires_permission() {
        let app = TestApp::spawn().await;
        create(&app, ContentType::About, json!({ "title": "About" })).await;

        let res = app.get(routes::ABOUT).await;

        assert_eq!(res.status, 403);
    }
}

mod headers {
    use super::*;

    #[tokio::test]
    async fn responses_carry_a_content_security_policy() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::GLOBAL).await;

        let policy = res.headers["content-security-policy"].to_str().unwrap();
        assert!(policy.contains("img-src 'self' data: blob: cdn.example.com"));
        assert!(policy.contains("connect-src 'self' https:"));
        assert!(!policy.contains("upgrade-insecure-requests"));
    }
}
