use serde_json::json;
use wiremock::matchers::{any, body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestApp, routes};

const NEWSLETTER_ACTION: &str = "api::marketing.marketing.sendNewsletter";
const CONTACT_ACTION: &str = "api::marketing.marketing.contact";
const INTEREST_ACTION: &str = "api::marketing.marketing.interest";

async fn mount_campaign(app: &TestApp, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "camp-1",
            "recipients": { "list_id": "list-1" }
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({
            "title": "Resource Not Found",
            "status": status,
            "detail": "The requested resource could not be found."
        }))
    };
    Mock::given(method("GET"))
        .and(path("/campaigns/camp-1"))
        .respond_with(response)
        .mount(&app.mailchimp)
        .await;
}

mod newsletter {
    use super::*;

    #[tokio::test]
    async fn subscribes_a_valid_address() {
        let app = TestApp::spawn().await;
        app.grant_public(NEWSLETTER_ACTION).await;
        mount_campaign(&app, 200).await;
        Mock::given(method("POST"))
            .and(path("/lists/list-1/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "m-1",
                "email_address": "jane@example.com",
                "status": "pending"
            })))
            .expect(1)
            .mount(&app.mailchimp)
            .await;

        let res = app
            .post_json(routes::NEWSLETTER, &json!({ "email": "jane@example.com" }))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["data"]["email"], "jane@example.com");
        assert_eq!(res.body["data"]["campaignId"], "camp-1");
        assert_eq!(res.body["data"]["listId"], "list-1");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_without_calling_mailchimp() {
        let app = TestApp::spawn().await;
        app.grant_public(NEWSLETTER_ACTION).await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&app.mailchimp)
            .await;

        let missing = app.post_json(routes::NEWSLETTER, &json!({})).await;
        let malformed = app
            .post_json(routes::NEWSLETTER, &json!({ "email": "not-an-email" }))
            .await;

        assert_eq!(missing.status, 400);
        assert_eq!(missing.body["code"], "VALIDATION_ERROR");
        assert_eq!(missing.body["message"], "Email is required");
        assert_eq!(malformed.status, 400);
        assert_eq!(malformed.body["message"], "Email format is not valid");
    }

    #[tokio::test]
    async fn unknown_campaign_is_not_found() {
        let app = TestApp::spawn().await;
        app.grant_public(NEWSLETTER_ACTION).await;
        mount_campaign(&app, 404).await;

        let res = app
            .post_json(routes::NEWSLETTER, &json!({ "email": "jane@example.com" }))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert!(res.body["message"].as_str().unwrap().starts_with("Campaign not found"));
    }

    #[tokio::test]
    async fn rejected_api_key_is_reported() {
        let app = TestApp::spawn().await;
        app.grant_public(NEWSLETTER_ACTION).await;
        mount_campaign(&app, 401).await;

        let res = app
            .post_json(routes::NEWSLETTER, &json!({ "email": "jane@example.com" }))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "UPSTREAM_UNAUTHORIZED");
    }

    #[tokio::test]
    async fn missing_campaign_is_a_config_error() {
        let app = TestApp::spawn_with(|config| config.marketing.campaign_id = None).await;
        app.grant_public(NEWSLETTER_ACTION).await;

        let res = app
            .post_json(routes::NEWSLETTER, &json!({ "email": "jane@example.com" }))
            .await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn requires_public_permission() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(routes::NEWSLETTER, &json!({ "email": "jane@example.com" }))
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod forms {
    use super::*;

    #[tokio::test]
    async fn contact_form_is_forwarded() {
        let app = TestApp::spawn().await;
        app.grant_public(CONTACT_ACTION).await;
        Mock::given(method("POST"))
            .and(path("/subscribe/post"))
            .and(body_string_contains("EMAIL=jane%40example.com"))
            .and(body_string_contains("FNAME=Jane"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/thanks"))
            .expect(1)
            .mount(&app.mailchimp)
            .await;

        let res = app
            .post_json(
                routes::CONTACT,
                &json!({ "email": "jane@example.com", "name": "Jane", "phone": "555" }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["email"], "jane@example.com");
        assert_eq!(res.body["data"]["name"], "Jane");
        assert_eq!(res.body["data"]["result"]["status"], 302);
        assert_eq!(res.body["data"]["result"]["success"], true);
    }

    #[tokio::test]
    async fn interest_form_failure_is_an_upstream_error() {
        let app = TestApp::spawn().await;
        app.grant_public(INTEREST_ACTION).await;
        Mock::given(method("POST"))
            .and(path("/subscribe/post"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&app.mailchimp)
            .await;

        let res = app
            .post_json(
                routes::INTEREST,
                &json!({ "email": "jane@example.com", "country": "Colombia" }),
            )
            .await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["code"], "UPSTREAM_ERROR");
        assert!(res.body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn interest_form_requires_permission() {
        let app = TestApp::spawn().await;
        app.grant_public(CONTACT_ACTION).await;

        let res = app
            .post_json(routes::INTEREST, &json!({ "email": "jane@example.com" }))
            .await;

        assert_eq!(res.status, 403);
    }
}
