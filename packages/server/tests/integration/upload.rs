use crate::common::{ADMIN_TOKEN, CDN, TestApp, routes};

const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89,
];

mod auth {
    use super::*;

    #[tokio::test]
    async fn upload_without_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.upload(&[("logo.png", PNG)], &[], None).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn upload_with_wrong_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.upload(&[("logo.png", PNG)], &[], Some("nope")).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn admin_endpoints_are_closed_without_a_configured_token() {
        let app = TestApp::spawn_with(|config| config.auth.admin_token = None).await;

        let res = app.get_with_token(routes::FILES, ADMIN_TOKEN).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod storing {
    use cms_server::seed::media::{MediaSelection, resolve_files};

    use super::*;

    #[tokio::test]
    async fn uploaded_file_gets_a_cdn_url_and_is_served_locally() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(
                &[("Company Logo.png", PNG)],
                &[("alternativeText", "Our logo"), ("caption", "Logo")],
                Some(ADMIN_TOKEN),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let file = &res.body[0];
        assert_eq!(file["name"], "Company Logo");
        assert_eq!(file["alternativeText"], "Our logo");
        assert_eq!(file["caption"], "Logo");
        assert_eq!(file["mime"], "image/png");
        assert_eq!(file["ext"], ".png");
        assert_eq!(file["size"], PNG.len());
        assert_eq!(file["provider"], "local");

        let url = file["url"].as_str().unwrap();
        let prefix = format!("https://{CDN}/uploads/company_logo_");
        assert!(url.starts_with(&prefix), "unexpected url {url}");

        let local_path = url.trim_start_matches(&format!("https://{CDN}"));
        let served = app.get(local_path).await;
        assert_eq!(served.status, 200);
        assert_eq!(served.headers["content-type"], "image/png");
    }

    #[tokio::test]
    async fn every_file_of_a_request_is_stored() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(
                &[("a.png", PNG), ("b.png", PNG)],
                &[("path", "blog/covers")],
                Some(ADMIN_TOKEN),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let files = res.body.as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["name"], "a");
        assert_eq!(files[1]["name"], "b");
        assert_eq!(files[0]["folderPath"], "/blog/covers");
        assert!(
            files[0]["url"]
                .as_str()
                .unwrap()
                .contains("/uploads/blog/covers/a_")
        );
    }

    #[tokio::test]
    async fn dotted_file_name_is_found_again_by_seeding() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(&[("hero.v2.png", PNG)], &[], Some(ADMIN_TOKEN))
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body[0]["name"], "hero");
        let uploaded_id = res.body[0]["id"].as_i64().unwrap() as i32;

        let selection = resolve_files(
            app.state.uploads.as_ref(),
            app.uploads.path(),
            &["hero.v2.png".to_string()],
        )
        .await
        .unwrap();

        match selection {
            MediaSelection::One(record) => assert_eq!(record.id, uploaded_id),
            MediaSelection::Many(records) => panic!("expected the existing file, got {records:?}"),
        }
    }

    #[tokio::test]
    async fn request_without_files_is_invalid() {
        let app = TestApp::spawn().await;

        let res = app.upload(&[], &[("caption", "x")], Some(ADMIN_TOKEN)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = TestApp::spawn().await;
        let big = vec![0u8; 1024 * 1024 + 1];

        let res = app.upload(&[("big.bin", big.as_slice())], &[], Some(ADMIN_TOKEN)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn uploaded_files_are_listed_with_cdn_urls() {
        let app = TestApp::spawn().await;
        let uploaded = app
            .upload(&[("a.png", PNG), ("b.png", PNG)], &[], Some(ADMIN_TOKEN))
            .await;
        assert_eq!(uploaded.status, 201, "{}", uploaded.text);

        let res = app.get_with_token(routes::FILES, ADMIN_TOKEN).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"], 2);
        let files = res.body["files"].as_array().unwrap();
        assert!(
            files
                .iter()
                .all(|f| f["url"].as_str().unwrap().starts_with("https://cdn.example.com/"))
        );
    }

    #[tokio::test]
    async fn single_file_can_be_fetched() {
        let app = TestApp::spawn().await;
        let uploaded = app.upload(&[("a.png", PNG)], &[], Some(ADMIN_TOKEN)).await;
        let id = uploaded.body[0]["id"].as_i64().unwrap() as i32;

        let found = app.get_with_token(&routes::file(id), ADMIN_TOKEN).await;
        let missing = app.get_with_token(&routes::file(id + 100), ADMIN_TOKEN).await;

        assert_eq!(found.status, 200);
        assert_eq!(found.body["name"], "a");
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body["code"], "NOT_FOUND");
    }
}
