#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tinynet::config::ServerConfig;
use tinynet::handler::error::ServeError;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Scratch document root, removed on drop.
pub struct DocRoot {
    path: PathBuf,
}

impl DocRoot {
    pub fn new(tag: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "tinynet-{}-{}-{}",
            tag,
            std::process::id(),
            id
        ));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, name: &str, contents: &[u8], mode: u32) -> PathBuf {
        let file = self.path.join(name);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&file, contents).unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(mode)).unwrap();
        file
    }

    pub fn mkdir(&self, name: &str) {
        fs::create_dir_all(self.path.join(name)).unwrap();
    }

    pub fn config(&self) -> ServerConfig {
        ServerConfig {
            document_root: self.path.clone(),
            ..ServerConfig::default()
        }
    }
}

impl Drop for DocRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Runs one request cycle over in-memory buffers, returning everything written.
pub async fn exchange(raw: &[u8], cfg: &ServerConfig) -> (Vec<u8>, Result<(), ServeError>) {
    let mut reader = raw;
    let mut out = Vec::new();
    let result = tinynet::handle_connection(&mut reader, &mut out, cfg).await;
    (out, result)
}

pub async fn request(raw: &[u8], cfg: &ServerConfig) -> Vec<u8> {
    let (out, result) = exchange(raw, cfg).await;
    result.unwrap();
    out
}

/// Splits a response at the first blank line.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let pos = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    (
        String::from_utf8(raw[..pos + 4].to_vec()).unwrap(),
        raw[pos + 4..].to_vec(),
    )
}

pub fn status_line(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.split("\r\n").next().unwrap_or_default().to_string()
}
