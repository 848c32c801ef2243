use cms_server::seed::store::DatabaseSeedStore;
use cms_server::seed::{SeedOutcome, SeedReport, Seeder};

use crate::common::{ADMIN_TOKEN, TestApp, routes, seed_fixtures_dir};

async fn run_seed(app: &TestApp) -> SeedOutcome {
    let store = DatabaseSeedStore::new(app.db.clone());
    Seeder::new(
        &store,
        app.state.uploads.as_ref(),
        seed_fixtures_dir(),
        &app.state.config.environment,
    )
    .run()
    .await
    .expect("Seed import failed")
}

#[tokio::test]
async fn first_run_imports_content_and_opens_the_public_api() {
    let app = TestApp::spawn().await;

    let outcome = run_seed(&app).await;

    assert_eq!(
        outcome,
        SeedOutcome::Seeded(SeedReport {
            created: 8,
            skipped: 0
        })
    );

    let articles = app.get(routes::ARTICLES).await;
    assert_eq!(articles.status, 200, "{}", articles.text);
    assert_eq!(articles.body["pagination"]["total"], 2);
    let first = &articles.body["data"][0]["document"];
    assert_eq!(first["slug"], "coffee-art");
    assert_eq!(first["cover"]["name"], "coffee-art");
    assert!(
        first["cover"]["url"]
            .as_str()
            .unwrap()
            .starts_with("https://cdn.example.com/uploads/coffee_art_")
    );
    assert_eq!(first["blocks"][1]["file"]["id"], first["cover"]["id"]);
    assert_eq!(first["blocks"][2]["files"][0]["name"], "coffee-art");
    assert_eq!(first["blocks"][2]["files"][1]["name"], "beautiful-picture");

    let global = app.get(routes::GLOBAL).await;
    assert_eq!(global.status, 200, "{}", global.text);
    assert_eq!(global.body["data"]["document"]["favicon"]["name"], "favicon");
    assert_eq!(
        global.body["data"]["document"]["defaultSeo"]["shareImage"]["name"],
        "default-image"
    );

    let authors = app.get(routes::AUTHORS).await;
    assert_eq!(authors.body["data"][0]["document"]["avatar"]["name"], "daviddoe");

    let about = app.get(routes::ABOUT).await;
    assert_eq!(about.status, 200);
}

#[tokio::test]
async fn each_file_is_uploaded_once() {
    let app = TestApp::spawn().await;

    run_seed(&app).await;

    let files = app.get_with_token(routes::FILES, ADMIN_TOKEN).await;
    assert_eq!(files.body["total"], 6);
}

#[tokio::test]
async fn second_run_changes_nothing() {
    let app = TestApp::spawn().await;
    run_seed(&app).await;

    let outcome = run_seed(&app).await;

    assert_eq!(outcome, SeedOutcome::AlreadySeeded);
    let files = app.get_with_token(routes::FILES, ADMIN_TOKEN).await;
    assert_eq!(files.body["total"], 6);
    let categories = app.get(routes::CATEGORIES).await;
    assert_eq!(categories.body["pagination"]["total"], 2);
}

#[tokio::test]
async fn startup_seeding_honours_the_enabled_flag() {
    let app = TestApp::spawn_with(|config| {
        config.seed.data_dir = seed_fixtures_dir();
    })
    .await;

    cms_server::seed::seed_on_startup(&app.state).await;
    let files = app.get_with_token(routes::FILES, ADMIN_TOKEN).await;
    assert_eq!(files.body["total"], 0);

    let mut state = app.state.clone();
    state.config.seed.enabled = true;
    cms_server::seed::seed_on_startup(&state).await;
    let files = app.get_with_token(routes::FILES, ADMIN_TOKEN).await;
    assert_eq!(files.body["total"], 6);
}
