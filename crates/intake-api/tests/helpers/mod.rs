//! Shared test fixtures: an in-process server wired to in-memory fakes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;

use intake_api::setup::routes::setup_routes;
use intake_api::AppState;
use intake_core::Config;
use intake_notify::{ChatNotifier, EmailNotifier};
use intake_storage::MockStorage;

/// Chat stub that records every message, or fails on demand.
#[derive(Clone, Default)]
pub struct RecordingChat {
    sent: Arc<Mutex<Vec<String>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingChat {
    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatNotifier for RecordingChat {
    async fn send(&self, text: &str) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("chat backend unavailable");
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Email stub that records (subject, body) pairs, or fails on demand.
#[derive(Clone, Default)]
pub struct RecordingEmail {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingEmail {
    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailNotifier for RecordingEmail {
    async fn send(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("smtp relay refused connection");
        }
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Test application: the HTTP server plus handles on its fakes.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MockStorage,
    pub chat: RecordingChat,
    pub email: RecordingEmail,
}

/// Build a config from a complete fixture, with optional overrides.
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut fixture = HashMap::from([
        ("S3_BUCKET", "intake-files"),
        ("S3_REGION", "us-east-1"),
        ("TELEGRAM_BOT_TOKEN", "123:abc"),
        ("TELEGRAM_CHAT_ID", "-1000123"),
        ("EMAIL_HOST", "smtp.example.com"),
        ("EMAIL_PORT", "587"),
        ("EMAIL_SECURE", "false"),
        ("EMAIL_USER", "robot@example.com"),
        ("EMAIL_PASS", "hunter2"),
        ("EMAIL_FROM", "robot@example.com"),
        ("EMAIL_TO", "print-team@example.com"),
    ]);
    for (key, value) in overrides {
        fixture.insert(key, value);
    }
    Config::from_map(&fixture).expect("test config loads")
}

/// Setup a test application backed by in-memory storage and recording
/// notifiers.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config(&[]))
}

pub fn setup_test_app_with(config: Config) -> TestApp {
    let storage = MockStorage::new();
    let chat = RecordingChat::default();
    let email = RecordingEmail::default();

    let state = Arc::new(AppState {
        config,
        storage: Arc::new(storage.clone()),
        chat: Arc::new(chat.clone()),
        email: Arc::new(email.clone()),
    });
    let router = setup_routes(state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        storage,
        chat,
        email,
    }
}

/// A complete, valid form: every required field plus one PDF attachment.
pub fn valid_form() -> MultipartForm {
    MultipartForm::new()
        .add_text("fullName", "Jane Doe")
        .add_text("email", "jane.doe@example.com")
        .add_text("phone", "+1 555 0100")
        .add_text("department", "Marketing")
        .add_text("eventName", "Spring Gala")
        .add_text("quantity", "250")
        .add_text("projectType", "Poster")
        .add_text("projectDescription", "A2 posters for the lobby")
        .add_part("files", pdf_part("poster.pdf"))
}

pub fn pdf_part(file_name: &str) -> Part {
    Part::bytes(b"%PDF-1.4 test".to_vec())
        .file_name(file_name)
        .mime_type("application/pdf")
}
