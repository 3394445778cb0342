use adieu_application::Config;
use adieu_core::{Client, LogoutPolicy, ProfileMap, RedirectAction, UserProfile};

use crate::helpers::TestApp;

fn profiles() -> ProfileMap {
    [("github", UserProfile::new("1").with_client_name("github"))]
        .into_iter()
        .collect()
}

#[tokio::test]
async fn should_return_204_and_clear_profiles() {
    let app = TestApp::new(Config::default(), LogoutPolicy::default()).await;
    let session_id = app.login(&profiles()).await;

    let response = app.get_logout("", &session_id).await;

    assert_eq!(response.status().as_u16(), 204);
    assert!(app.session_profiles(&session_id).await.is_empty());
}

#[tokio::test]
async fn should_redirect_to_requested_url() {
    let app = TestApp::new(Config::default(), LogoutPolicy::default()).await;
    let session_id = app.login(&profiles()).await;

    let response = app.get_logout("?url=/goodbye", &session_id).await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/goodbye")
    );
    assert!(app.session_profiles(&session_id).await.is_empty());
}

#[tokio::test]
async fn should_redirect_to_identity_provider_on_central_logout() {
    let config = Config::builder()
        .client(Client::new("github").with_logout_action_fn(|_, _, _, target_url| {
            Some(RedirectAction::found(format!(
                "https://idp.example.com/logout?return={}",
                target_url.unwrap_or("none")
            )))
        }))
        .build();
    let policy = LogoutPolicy::builder()
        .central_logout(true)
        .local_logout(false)
        .build();
    let app = TestApp::new(config, policy).await;
    let session_id = app.login(&profiles()).await;

    let response = app.get_logout("", &session_id).await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("https://idp.example.com/logout?return=none")
    );
    // Single profile and local logout disabled: the session keeps it
    assert_eq!(app.session_profiles(&session_id).await.len(), 1);
}

#[tokio::test]
async fn should_return_400_for_invalid_pattern() {
    let policy = LogoutPolicy::builder().logout_url_pattern("").build();
    let app = TestApp::new(Config::default(), policy).await;
    let session_id = app.login(&profiles()).await;

    let response = app.get_logout("", &session_id).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "logoutUrlPattern cannot be blank");
    assert_eq!(app.session_profiles(&session_id).await.len(), 1);
}
