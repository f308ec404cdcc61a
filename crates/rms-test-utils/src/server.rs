//! One-shot HTTP stand-in for the restaurant server.
//!
//! Each canned reply answers exactly one connection, in order. Every request
//! is parsed just enough to check it in a test and sent back on the returned
//! channel once its reply has been written.
//!
//! ```no_run
//! use rms_test_utils::serve;
//!
//! let (base_url, requests) = serve(vec![(200, "[]")]);
//! // point a client at base_url ...
//! let request = requests.recv().unwrap();
//! assert_eq!(request.method, "GET");
//! ```

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// A request as the server saw it. Header names are lowercased.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Serve the canned `(status, body)` replies in order, one per connection.
///
/// Returns the base URL to send requests to and the channel the recorded
/// requests arrive on.
pub fn serve(replies: Vec<(u16, &'static str)>) -> (String, Receiver<Recorded>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in replies {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let recorded = answer(stream, status, body);
            if tx.send(recorded).is_err() {
                return;
            }
        }
    });

    (base_url, rx)
}

fn answer(mut stream: TcpStream, status: u16, body: &str) -> Recorded {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut raw = vec![0; length];
    reader.read_exact(&mut raw).expect("request body");

    let response = format!(
        "HTTP/1.1 {status} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).expect("write reply");
    stream.flush().expect("flush reply");

    Recorded {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&raw).into_owned(),
    }
}
