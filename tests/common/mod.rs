//! Loopback HTTP stub and fixtures shared by the integration tests.

#![allow(dead_code)]

use catbox_uploader::app::history::ClipboardSink;
use catbox_uploader::upload::UploadError;
use image::{Rgb, RgbImage};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub const CATBOX_LINK: &str = "https://files.catbox.moe/abc123.png";

pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    pub fn body_contains(&self, needle: &str) -> bool {
        find(&self.body, needle.as_bytes()).is_some()
    }
}

/// Answers one connection per canned response, in order.
pub struct StubServer {
    pub url: String,
    requests: mpsc::Receiver<CapturedRequest>,
}

impl StubServer {
    pub fn start(responses: Vec<(u16, Vec<u8>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let (sender, requests) = mpsc::channel();

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_request(&mut stream);
                let head = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                stream.write_all(head.as_bytes()).unwrap();
                stream.write_all(&body).unwrap();
                stream.flush().unwrap();
                let _ = sender.send(request);
            }
        });

        Self { url, requests }
    }

    pub fn next_request(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(10))
            .expect("stub server received no request")
    }

    pub fn received_nothing(&self) -> bool {
        self.requests.recv_timeout(Duration::from_millis(200)).is_err()
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];

    let header_end = loop {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break data.len();
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let request = CapturedRequest {
        head,
        body: Vec::new(),
    };
    let length: usize = request
        .header("content-length")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);

    while data.len() < header_end + length {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }

    CapturedRequest {
        body: data[header_end..].to_vec(),
        ..request
    }
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))
        .save(&path)
        .unwrap();
    path
}

#[derive(Default)]
pub struct FakeClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for FakeClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), UploadError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
