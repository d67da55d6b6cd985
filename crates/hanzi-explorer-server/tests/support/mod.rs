// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

use hanzi_explorer_model::{CharacterDraft, NewUser, PrimitiveDraft};
use hanzi_explorer_server::{build_router, AppState, ServerConfig};
use hanzi_explorer_store::{EntityStore, Mutations};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const TEST_ROUNDS: u32 = 64;
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestServer {
    pub addr: SocketAddr,
    _dir: tempfile::TempDir,
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        password_rounds: TEST_ROUNDS,
        ..ServerConfig::default()
    }
}

pub async fn spawn_server(config: ServerConfig, seed: impl FnOnce(&mut EntityStore)) -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = EntityStore::open(&dir.path().join("hanzi.db")).expect("open store");
    seed(&mut store);
    let app = build_router(AppState::new(store, config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    TestServer { addr, _dir: dir }
}

/// 一 二 三 with primitives 一/二 and an admin account `admin`.
pub fn seed_catalog(store: &mut EntityStore) {
    let mut m = Mutations::new(store).with_password_rounds(TEST_ROUNDS);
    m.create_primitive(PrimitiveDraft::new("一", "一").with_meaning("floor"))
        .expect("primitive 一");
    m.create_primitive(PrimitiveDraft::new("二", "二"))
        .expect("primitive 二");
    m.create_character(
        CharacterDraft::new("一", 1)
            .with_keywords(&["one"])
            .in_chapter(1, 1),
    )
    .expect("一");
    m.create_character(
        CharacterDraft::new("二", 2)
            .with_keywords(&["two"])
            .with_primitives(&["一"])
            .in_chapter(1, 1),
    )
    .expect("二");
    m.create_character(
        CharacterDraft::new("三", 3)
            .with_keywords(&["three"])
            .with_primitives(&["一", "二"])
            .with_story("one floor above two")
            .in_chapter(1, 2),
    )
    .expect("三");
    m.create_user(NewUser {
        username: "admin".to_string(),
        email: "admin@example.com".to_string(),
        password: ADMIN_PASSWORD.to_string(),
        is_admin: true,
    })
    .expect("admin");
}

#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub head: String,
    pub body: String,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim()
                .eq_ignore_ascii_case(name)
                .then(|| v.trim().to_string())
        })
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or_else(|e| panic!("json body {e}: {}", self.body))
    }
}

pub async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> RawResponse {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    if let Some(body) = body {
        req.push_str("Content-Type: application/json\r\n");
        req.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));
    } else {
        req.push_str("\r\n");
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read response");
    let response = String::from_utf8(raw).expect("utf8 response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    RawResponse {
        status,
        head: head.to_string(),
        body: body.to_string(),
    }
}

pub async fn get(addr: SocketAddr, path: &str) -> RawResponse {
    send_raw(addr, "GET", path, &[], None).await
}

/// Logs in and returns the bearer token.
pub async fn login(addr: SocketAddr, username: &str, password: &str) -> String {
    let body = serde_json::json!({"username": username, "password": password}).to_string();
    let response = send_raw(addr, "POST", "/auth/login", &[], Some(&body)).await;
    assert_eq!(response.status, 200, "login failed: {}", response.body);
    response.json()["token"]
        .as_str()
        .expect("token")
        .to_string()
}
