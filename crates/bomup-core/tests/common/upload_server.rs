//! Minimal HTTP/1.1 server standing in for the processing service.
//!
//! `POST /upload` answers with a configurable reply and records the request;
//! `GET /list-tables` and `GET /view-data/<table>` serve fixed content.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Response sent for `POST /upload`.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn file(body: &[u8], attachment_name: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            content_disposition: Some(format!("attachment; filename={attachment_name}")),
            body: body.to_vec(),
        }
    }

    pub fn error(status: u16, text: &str) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            content_disposition: None,
            body: text.as_bytes().to_vec(),
        }
    }
}

/// A request as the server saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

pub struct UploadServer {
    pub base_url: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl UploadServer {
    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(reply: Reply) -> UploadServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&captured);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let reply = reply.clone();
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &reply, &log));
        }
    });
    UploadServer {
        base_url: format!("http://127.0.0.1:{port}"),
        captured,
    }
}

/// Base URL of a port nobody listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn read_request(stream: &mut TcpStream) -> Option<Captured> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let head_end = loop {
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
    };

    let head = String::from_utf8_lossy(&data[..head_end]).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }
    }

    let mut body = data[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buf[..n]);
    }

    Some(Captured {
        method,
        path,
        content_type,
        body,
    })
}

fn respond(stream: &mut TcpStream, status: u16, content_type: &str, extra: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {status} X\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n{extra}Connection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn handle(mut stream: TcpStream, reply: &Reply, log: &Mutex<Vec<Captured>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    log.lock().unwrap().push(request.clone());

    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/upload") => {
            let extra = reply
                .content_disposition
                .as_deref()
                .map(|v| format!("Content-Disposition: {v}\r\n"))
                .unwrap_or_default();
            respond(&mut stream, reply.status, reply.content_type, &extra, &reply.body);
        }
        ("GET", "/list-tables") => {
            respond(&mut stream, 200, "application/json", "", br#"["bom_","lpkb"]"#);
        }
        ("GET", "/view-data/bom_") => {
            respond(
                &mut stream,
                200,
                "text/html",
                "",
                b"<table><tr><th>id_barang</th></tr><tr><td>1001</td></tr></table>",
            );
        }
        ("GET", p) if p.starts_with("/view-data/") => {
            respond(
                &mut stream,
                500,
                "text/html",
                "",
                b"Error retrieving data: no such table",
            );
        }
        _ => respond(&mut stream, 404, "text/plain", "", b"Not Found"),
    }
}

/// One part of a multipart/form-data body.
#[derive(Debug)]
pub struct FormPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

fn header_param(header: &str, key: &str) -> Option<String> {
    header.split(';').find_map(|p| {
        let (k, v) = p.trim().split_once('=')?;
        (k.trim() == key).then(|| v.trim().trim_matches('"').to_string())
    })
}

/// Splits a captured multipart body into its parts.
pub fn form_parts(request: &Captured) -> Vec<FormPart> {
    let Some(boundary) = request
        .content_type
        .as_deref()
        .and_then(|ct| header_param(ct, "boundary"))
    else {
        return Vec::new();
    };
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();

    let mut parts = Vec::new();
    let mut rest = &request.body[..];
    while let Some(start) = find(rest, delimiter) {
        rest = &rest[start + delimiter.len()..];
        if rest.starts_with(b"--") {
            break;
        }
        let Some(end) = find(rest, delimiter) else {
            break;
        };
        let part = &rest[..end];
        let part = part.strip_prefix(b"\r\n").unwrap_or(part);
        let part = part.strip_suffix(b"\r\n").unwrap_or(part);
        if let Some(split) = find(part, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&part[..split]).into_owned();
            let mut name = String::new();
            let mut filename = None;
            let mut content_type = None;
            for line in headers.lines() {
                if let Some((h, v)) = line.split_once(':') {
                    if h.trim().eq_ignore_ascii_case("content-disposition") {
                        name = header_param(v, "name").unwrap_or_default();
                        filename = header_param(v, "filename");
                    } else if h.trim().eq_ignore_ascii_case("content-type") {
                        content_type = Some(v.trim().to_string());
                    }
                }
            }
            parts.push(FormPart {
                name,
                filename,
                content_type,
                data: part[split + 4..].to_vec(),
            });
        }
    }
    parts
}
