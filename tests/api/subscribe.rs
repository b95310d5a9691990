use anyhow::Result;
use platesx::config::Destination;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{embed_field, webhook_path, TestApp};

#[tokio::test]
async fn subscribe_with_valid_email_relays_it() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(webhook_path(Destination::Email)))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.webhook_server)
        .await;

    let res = app
        .post_subscribe(&json!({ "email": "a@b.com", "source": "Newsletter Form" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({ "success": true, "message": "Thank you for subscribing!" })
    );

    let sent = app.webhook_bodies().await?;
    assert_eq!(sent.len(), 1);
    let sent = &sent[0];
    assert_eq!(sent["embeds"][0]["title"], "📧 New Email Subscription");
    assert_eq!(embed_field(sent, "Email"), Some("a@b.com"));
    assert_eq!(embed_field(sent, "Name"), Some("Not provided"));
    assert_eq!(embed_field(sent, "Source"), Some("Newsletter Form"));

    Ok(())
}

#[tokio::test]
async fn subscribe_without_source_reports_unknown() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.webhook_server)
        .await;

    let res = app
        .post_subscribe(&json!({ "email": "a@b.com", "name": "Ursula" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let sent = app.webhook_bodies().await?;
    assert_eq!(embed_field(&sent[0], "Name"), Some("Ursula"));
    assert_eq!(embed_field(&sent[0], "Source"), Some("Unknown"));

    Ok(())
}

#[tokio::test]
async fn subscribe_without_email_returns_400() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&app.webhook_server)
        .await;

    let cases = [
        (json!({ "name": "Ursula" }), "Missing email"),
        (json!({ "email": "" }), "Empty email"),
        (json!({ "email": null }), "Null email"),
    ];

    for (body, description) in cases {
        let res = app.post_subscribe(&body).await?;
        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "The API did not return a 400 BAD REQUEST when the payload was: {description}"
        );

        let body: Value = res.json().await?;
        assert_eq!(body["error"], "Email is required");
    }

    Ok(())
}

#[tokio::test]
async fn subscribe_unconfigured_webhook_is_skipped() -> Result<()> {
    let app = TestApp::spawn_unconfigured().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&app.webhook_server)
        .await;

    let res = app.post_subscribe(&json!({ "email": "a@b.com" })).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["dev_note"],
        "Discord webhook URL for emails not configured, message not actually sent"
    );

    Ok(())
}

#[tokio::test]
async fn subscribe_webhook_failure_returns_500() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(429).set_body_string("You are being rate limited."))
        .expect(1)
        .mount(&app.webhook_server)
        .await;

    let res = app.post_subscribe(&json!({ "email": "a@b.com" })).await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(
        body["error"],
        "Failed to process your subscription. Please try again later."
    );

    Ok(())
}

#[tokio::test]
async fn subscribe_non_object_body_returns_500_without_sending() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&app.webhook_server)
        .await;

    let cases = [
        (r#"["a@b.com"]"#, "Array"),
        (r#""a@b.com""#, "String"),
        ("42", "Number"),
    ];

    for (body, description) in cases {
        let res = app.post_raw("/api/subscribe", body).await?;
        assert_eq!(
            res.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "The API did not return a 500 when the body was: {description}"
        );

        let body: Value = res.json().await?;
        assert_eq!(
            body["error"],
            "Failed to process your subscription. Please try again later."
        );
    }

    Ok(())
}
