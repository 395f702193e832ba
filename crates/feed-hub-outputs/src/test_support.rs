//! Loopback HTTP endpoint used by provider tests.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};

/// Request as seen by the test endpoint.
#[derive(Debug, Clone)]
pub(crate) struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

type StatusFn = dyn Fn(&CapturedRequest) -> u16 + Send + Sync;

/// Accepts connections on a loopback port and answers every request with an empty body.
pub(crate) struct TestEndpoint {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl TestEndpoint {
    /// Answer every request with the same status code.
    pub fn spawn(status: u16) -> Self {
        Self::spawn_with(move |_| status)
    }

    /// Pick the status code per request.
    pub fn spawn_with<F>(status_for: F) -> Self
    where
        F: Fn(&CapturedRequest) -> u16 + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test endpoint");
        let addr = listener.local_addr().expect("test endpoint addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let status_for: Arc<StatusFn> = Arc::new(status_for);
        let captured = requests.clone();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    continue;
                };
                let captured = captured.clone();
                let status_for = status_for.clone();
                std::thread::spawn(move || {
                    let _ = serve_one(stream, &captured, status_for.as_ref());
                });
            }
        });
        Self { addr, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// URL of a loopback port with nothing listening on it.
pub(crate) fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}/hook")
}

fn serve_one(
    stream: TcpStream,
    captured: &Mutex<Vec<CapturedRequest>>,
    status_for: &StatusFn,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_type = None;
    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        let Some((name, value)) = header.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-type") {
            content_type = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let request = CapturedRequest {
        method,
        path,
        content_type,
        body,
    };
    let status = status_for(&request);
    captured.lock().unwrap().push(request);

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {status} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        reason(status)
    )?;
    stream.flush()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
