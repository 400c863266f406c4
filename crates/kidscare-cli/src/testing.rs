//! Fake API server and console fixtures for screen tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use kidscare_core::config::ConsoleConfig;
use kidscare_core::result::AppResult;
use kidscare_core::types::{Role, UserRecord};

use crate::console::Console;
use crate::output::OutputFormat;
use crate::screens::{self, Action};

/// Requests and JSON bodies seen by the fake API.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: Mutex<Vec<String>>,
    bodies: Mutex<Vec<Value>>,
}

impl Recorder {
    /// `METHOD /path` lines in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Bodies handed over by handlers, in arrival order.
    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn keep_body(&self, body: Value) {
        self.bodies.lock().unwrap().push(body);
    }
}

async fn record(State(recorder): State<Arc<Recorder>>, request: Request, next: Next) -> Response {
    recorder
        .calls
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), request.uri().path()));
    next.run(request).await
}

/// Serve `app` on an ephemeral local port, logging every request.
pub async fn serve(app: Router, recorder: Arc<Recorder>) -> String {
    let app = app.layer(middleware::from_fn_with_state(recorder, record));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{addr}")
}

/// A console talking to `base_url`, with in-memory storage unless a file is given.
pub fn console(base_url: &str, storage_path: Option<&Path>) -> Console {
    let mut config = ConsoleConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_seconds = 5;
    if let Some(path) = storage_path {
        config.storage.path = path.display().to_string();
    }
    Console::open(&config, storage_path.is_none(), OutputFormat::Table, true)
        .expect("Failed to open console")
}

pub fn user(id: i64, role: Role) -> UserRecord {
    UserRecord {
        id,
        name: "Jamie".to_string(),
        email: "jamie@kids.test".to_string(),
        role,
    }
}

/// Go to `path` through the guard and render it with `action`.
pub async fn open(console: &mut Console, path: &str, action: Action) -> AppResult<()> {
    let resolution = console.enter(path)?;
    screens::render(console, resolution, &action, &CancellationToken::new()).await
}

/// An action carrying `key=value` fields.
pub fn fields(fields: &[&str]) -> Action {
    Action {
        fields: fields.iter().map(|f| f.to_string()).collect(),
        delete: None,
    }
}
