//! Backend falso para las pruebas de integración.
//!
//! Un servidor actix-web en `127.0.0.1:0` que responde lo que cada prueba le
//! programa, por clave `"MÉTODO /ruta"`, y anota cada petición recibida.
//! Las rutas sin respuesta programada devuelven 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use bookit_web::api::ApiClient;
use bookit_web::models::{Role, Session};
use bookit_web::session::SessionStore;
use bookit_web::storage::MemoryStorage;

/// Petición recibida por el backend falso
#[derive(Debug, Clone)]
pub struct Recorded {
    pub key: String,
    pub query: String,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Una parte de un cuerpo `multipart/form-data`
#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FormPart {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.data).expect("json part")
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn attribute(header: &str, key: &str) -> Option<String> {
    let marker = format!("; {}=\"", key);
    let start = header.find(&marker)? + marker.len();
    let len = header[start..].find('"')?;
    Some(header[start..start + len].to_string())
}

impl Recorded {
    /// Valor decodificado de un parámetro de la query
    pub fn query_param(&self, name: &str) -> Option<String> {
        let url = reqwest::Url::parse(&format!("http://fake/?{}", self.query)).ok()?;
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    /// Partes del cuerpo multipart, en orden
    pub fn multipart(&self) -> Vec<FormPart> {
        let content_type = self.content_type.as_deref().expect("content-type");
        let boundary = content_type
            .split("boundary=")
            .nth(1)
            .expect("multipart boundary")
            .trim_matches('"');
        let delimiter = format!("--{}", boundary).into_bytes();

        let mut parts = Vec::new();
        let mut rest = match find(&self.body, &delimiter) {
            Some(at) => &self.body[at + delimiter.len()..],
            None => return parts,
        };

        while let Some(end) = find(rest, &delimiter) {
            let chunk = &rest[..end];
            rest = &rest[end + delimiter.len()..];

            let chunk = chunk.strip_prefix(b"\r\n").unwrap_or(chunk);
            let chunk = chunk.strip_suffix(b"\r\n").unwrap_or(chunk);
            let Some(split) = find(chunk, b"\r\n\r\n") else {
                continue;
            };

            let head = String::from_utf8_lossy(&chunk[..split]).to_string();
            let mut part = FormPart {
                name: String::new(),
                file_name: None,
                content_type: None,
                data: chunk[split + 4..].to_vec(),
            };
            for line in head.split("\r\n") {
                let lower = line.to_ascii_lowercase();
                if lower.starts_with("content-disposition:") {
                    part.name = attribute(line, "name").unwrap_or_default();
                    part.file_name = attribute(line, "filename");
                } else if lower.starts_with("content-type:") {
                    part.content_type = line.split_once(':').map(|(_, v)| v.trim().to_string());
                }
            }
            parts.push(part);
        }
        parts
    }
}

#[derive(Default)]
struct State {
    replies: Mutex<HashMap<String, (u16, Value)>>,
    log: Mutex<Vec<Recorded>>,
}

pub struct FakeBackend {
    pub base_url: String,
    state: web::Data<State>,
    handle: ServerHandle,
}

async fn respond(req: HttpRequest, body: web::Bytes, state: web::Data<State>) -> HttpResponse {
    let key = format!("{} {}", req.method(), req.path());
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.log.lock().unwrap().push(Recorded {
        key: key.clone(),
        query: req.query_string().to_string(),
        authorization: header("authorization"),
        request_id: header("x-request-id"),
        content_type: header("content-type"),
        body: body.to_vec(),
    });

    let reply = state.replies.lock().unwrap().get(&key).cloned();
    match reply {
        Some((status, Value::Null)) => {
            HttpResponse::build(StatusCode::from_u16(status).unwrap()).finish()
        }
        Some((status, body)) => HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(body),
        None => HttpResponse::NotFound().json(json!({ "message": format!("no reply for {}", key) })),
    }
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = web::Data::new(State::default());
        let data = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake backend");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{}/api", addr),
            state,
            handle,
        }
    }

    /// Programa la respuesta para `key` ("POST /api/bookings/create").
    /// `Value::Null` responde sin cuerpo.
    pub fn reply(&self, key: &str, status: u16, body: Value) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(key.to_string(), (status, body));
        self
    }

    pub fn hits(&self, key: &str) -> usize {
        self.requests().iter().filter(|r| r.key == key).count()
    }

    pub fn total_hits(&self) -> usize {
        self.state.log.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.log.lock().unwrap().clone()
    }

    pub fn last(&self, key: &str) -> Option<Recorded> {
        self.requests().into_iter().rev().find(|r| r.key == key)
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone()).expect("fake backend url")
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

pub fn session(role: Role) -> Session {
    Session {
        user_id: "42".into(),
        name: "Ana".into(),
        email: "ana@example.com".into(),
        phone_number: None,
        role,
        token: "jwt-42".into(),
    }
}

/// Almacén ya restaurado y con sesión iniciada
pub fn logged_in(role: Role) -> SessionStore<MemoryStorage> {
    let store = SessionStore::restored(MemoryStorage::new());
    store.login(session(role)).expect("login");
    store
}

pub fn anonymous() -> SessionStore<MemoryStorage> {
    SessionStore::restored(MemoryStorage::new())
}

pub fn booking_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "restaurantId": "12",
        "dateTime": "2025-04-28T17:30:00",
        "totalCustomers": 2,
        "status": status,
    })
}

pub fn user_json() -> Value {
    json!({ "name": "Ana", "phoneNumber": "555-0101", "email": "ana@example.com" })
}

pub fn restaurant_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "cuisine": "Sushi",
        "street": "1 Main",
        "city": "San Jose",
        "state": "CA",
        "zipCode": "95112",
    })
}
