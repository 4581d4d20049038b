//! Loopback HTTP server serving canned responses

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

/// Canned response for one path
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Server on 127.0.0.1 that answers every request from a path table
///
/// The accept thread is detached and lives until the test process exits.
pub struct HttpFixture {
    addr: SocketAddr,
}

impl HttpFixture {
    pub fn serve(routes: Vec<(&str, Canned)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let routes: HashMap<String, Canned> = routes
            .into_iter()
            .map(|(path, canned)| (path.to_string(), canned))
            .collect();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let routes = routes.clone();
                thread::spawn(move || respond(stream, &routes));
            }
        });

        Self { addr }
    }

    /// Server that accepts connections and never answers
    pub fn silent() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");

        thread::spawn(move || {
            // held open so the client sees a stalled response, not a reset
            let mut held = Vec::new();
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                held.push(stream);
            }
        });

        Self { addr }
    }

    /// Base URL with a trailing slash, e.g. `http://127.0.0.1:4321/v1/`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1/", self.addr)
    }
}

/// Base URL of a port nothing is listening on
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/v1/", addr)
}

fn respond(mut stream: TcpStream, routes: &HashMap<String, Canned>) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let canned = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Canned::status(404));
    let reason = match canned.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        reason,
        canned.body.len(),
        canned.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
