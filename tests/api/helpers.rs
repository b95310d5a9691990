use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::OnceLock,
    time::Duration,
};

use anyhow::Result;
use platesx::{
    config::{Destination, WebhookUrls},
    init_dbg_tracing, App, AppState, WebhookClient,
};
use reqwest::Response;
use secrecy::SecretString;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::info;
use wiremock::MockServer;

pub const ALL_DESTINATIONS: [Destination; 5] = [
    Destination::General,
    Destination::Buying,
    Destination::Selling,
    Destination::Sourcing,
    Destination::Email,
];

/// Trying to bind port 0 will trigger an OS scan for an available port
/// which will then be bound to the application.
const TEST_SOCK_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0);

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    /// Stands in for Discord, every configured destination points here.
    pub webhook_server: MockServer,
}

/// Set `TEST_LOG` to see the application logs while running the tests.
fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_dbg_tracing();
        }
    });
}

/// The path each destination's webhook lives under on the mock server.
pub fn webhook_path(destination: Destination) -> String {
    format!("/api/webhooks/{}/token", destination.as_ref())
}

impl TestApp {
    /// Spawns the app with every destination configured.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(&ALL_DESTINATIONS).await
    }

    /// Spawns the app without any webhook configured.
    pub async fn spawn_unconfigured() -> Result<Self> {
        Self::spawn_with(&[]).await
    }

    /// A helper function that serves the app on a separate task, only the `configured`
    /// destinations get a webhook URL.
    pub async fn spawn_with(configured: &[Destination]) -> Result<Self> {
        init_test_subscriber();

        let webhook_server = MockServer::start().await;
        let url_for = |destination: Destination| {
            configured.contains(&destination).then(|| {
                SecretString::from(format!(
                    "{}{}",
                    webhook_server.uri(),
                    webhook_path(destination)
                ))
            })
        };
        let webhooks = WebhookUrls {
            general: url_for(Destination::General),
            buying: url_for(Destination::Buying),
            selling: url_for(Destination::Selling),
            sourcing: url_for(Destination::Sourcing),
            email: url_for(Destination::Email),
        };

        let webhook_client = WebhookClient::new(Duration::from_millis(200))?;
        let app_state = AppState::new(webhook_client, webhooks);

        let listener = TcpListener::bind(&TEST_SOCK_ADDR).await?;
        let addr = listener.local_addr()?;
        info!("Listening on {addr}");

        tokio::spawn(platesx::serve(App::new(app_state, listener)));

        Ok(TestApp {
            addr,
            http_client: reqwest::Client::new(),
            webhook_server,
        })
    }

    pub async fn post_contact(&self, body: &Value) -> Result<Response> {
        let res = self
            .http_client
            .post(format!("http://{}/api/contact", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn post_subscribe(&self, body: &Value) -> Result<Response> {
        let res = self
            .http_client
            .post(format!("http://{}/api/subscribe", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    /// POSTs a body that isn't necessarily valid JSON.
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Result<Response> {
        let res = self
            .http_client
            .post(format!("http://{}{path}", self.addr))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        let res = self
            .http_client
            .get(format!("http://{}{path}", self.addr))
            .send()
            .await?;
        Ok(res)
    }

    /// The JSON bodies of every request the mock webhook server received so far.
    pub async fn webhook_bodies(&self) -> Result<Vec<Value>> {
        let requests = self
            .webhook_server
            .received_requests()
            .await
            .unwrap_or_default();

        let bodies = requests
            .iter()
            .map(|req| req.body_json::<Value>())
            .collect::<core::result::Result<Vec<_>, _>>()?;
        Ok(bodies)
    }
}

/// Looks up the value of the embed field called `name` in a webhook body.
pub fn embed_field<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body["embeds"][0]["fields"]
        .as_array()?
        .iter()
        .find(|field| field["name"] == name)
        .and_then(|field| field["value"].as_str())
}
