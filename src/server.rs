//! Development static-file server
//!
//! Serves the game directory over plain HTTP/1.1 for local testing. One
//! request per connection, handled sequentially. Every response carries the
//! cross-origin isolation headers the browser build needs.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
}

/// Dev server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory served as `/`
    pub root: PathBuf,
    /// Page served for `/`
    pub index: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            root: PathBuf::from("."),
            index: "index.html".to_string(),
        }
    }
}

/// A fully buffered HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    fn html(status: u16, title: &str, message: &str) -> Self {
        let body = format!(
            "<html><head><title>{status} - {title}</title></head>\
             <body><h1>{status} - {title}</h1><p>{message}</p></body></html>"
        );
        Self {
            status,
            content_type: "text/html",
            body: body.into_bytes(),
        }
    }

    fn not_found(path: &str) -> Self {
        Self::html(
            404,
            "Not Found",
            &format!("The file <code>{}</code> does not exist.", escape_html(path)),
        )
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }

    /// Serialize status line, headers and (unless `head_only`) body
    pub fn write_to<W: Write>(&self, out: &mut W, head_only: bool) -> std::io::Result<()> {
        write!(out, "HTTP/1.1 {} {}\r\n", self.status, self.reason())?;
        write!(out, "Content-Type: {}\r\n", self.content_type)?;
        write!(out, "Content-Length: {}\r\n", self.body.len())?;
        write!(out, "Cross-Origin-Embedder-Policy: require-corp\r\n")?;
        write!(out, "Cross-Origin-Opener-Policy: same-origin\r\n")?;
        write!(out, "Cache-Control: no-cache\r\n")?;
        write!(out, "Access-Control-Allow-Origin: *\r\n")?;
        write!(out, "Connection: close\r\n\r\n")?;
        if !head_only {
            out.write_all(&self.body)?;
        }
        out.flush()
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// MIME type inferred from the file extension
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("js") | Some("mjs") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Map a request target onto a file under `root`.
/// Returns `None` for targets that would escape the root.
fn local_path(root: &Path, index: &str, target: &str) -> Option<PathBuf> {
    let path = target.split(['?', '#']).next().unwrap_or("");
    let path = if path.is_empty() || path == "/" {
        index
    } else {
        path
    };

    let mut local = root.to_path_buf();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => local.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(local)
}

/// Resolve a GET target to a response
pub fn resolve(root: &Path, index: &str, target: &str) -> Response {
    let Some(path) = local_path(root, index, target) else {
        log::warn!("Rejected path outside root: {target}");
        return Response::not_found(target);
    };
    if !path.exists() {
        return Response::not_found(target);
    }
    match std::fs::read(&path) {
        Ok(body) => Response {
            status: 200,
            content_type: content_type(&path),
            body,
        },
        Err(e) => {
            log::error!("Failed to read {}: {e}", path.display());
            Response::html(
                500,
                "Server Error",
                &format!("Unable to read the file: {}", escape_html(&e.to_string())),
            )
        }
    }
}

/// Read one request from `reader` and write the response to `writer`
pub fn handle_request<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    // Drain headers
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("/");

    let response = match method {
        "GET" | "HEAD" => resolve(&config.root, &config.index, target),
        _ => Response::html(405, "Method Not Allowed", "Only GET and HEAD are supported."),
    };
    log::info!("{method} {target} -> {}", response.status);
    response.write_to(writer, method == "HEAD")?;
    Ok(())
}

fn handle_connection(stream: TcpStream, config: &ServerConfig) -> Result<(), ServerError> {
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    handle_request(&mut reader, &mut writer, config)
}

/// Serve `config.root` until the process is stopped
pub fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let addr = format!("127.0.0.1:{}", config.port);
    let listener = TcpListener::bind(&addr).map_err(|source| ServerError::Bind {
        addr: addr.clone(),
        source,
    })?;
    log::info!(
        "Serving {} on http://localhost:{}",
        config.root.display(),
        config.port
    );

    for stream in listener.incoming() {
        let result = stream
            .map_err(ServerError::from)
            .and_then(|s| handle_connection(s, config));
        if let Err(e) = result {
            log::warn!("{e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
        std::fs::create_dir(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js").join("main.js"), "export {}").unwrap();
        dir
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Path::new("a/b.JS")), "application/javascript");
        assert_eq!(content_type(Path::new("x.png")), "image/png");
        assert_eq!(content_type(Path::new("x.jpeg")), "image/jpeg");
        assert_eq!(content_type(Path::new("pkg/game_bg.wasm")), "application/wasm");
        assert_eq!(content_type(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn test_resolve_index_and_files() {
        let dir = site();
        let index = resolve(dir.path(), "index.html", "/");
        assert_eq!(index.status, 200);
        assert_eq!(index.content_type, "text/html");
        assert_eq!(index.body, b"<h1>hi</h1>");

        let js = resolve(dir.path(), "index.html", "/js/main.js?v=3");
        assert_eq!(js.status, 200);
        assert_eq!(js.content_type, "application/javascript");
    }

    #[test]
    fn test_resolve_errors() {
        let dir = site();
        assert_eq!(resolve(dir.path(), "index.html", "/missing.png").status, 404);
        assert_eq!(resolve(dir.path(), "index.html", "/../secret").status, 404);
        // Directories exist but cannot be read as files
        assert_eq!(resolve(dir.path(), "index.html", "/js").status, 500);
    }

    #[test]
    fn test_handle_request_get() {
        let dir = site();
        let config = ServerConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let request = b"GET /js/main.js HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut input = Cursor::new(request.to_vec());
        let mut out = Vec::new();
        handle_request(&mut input, &mut out, &config).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 9\r\n"));
        assert!(text.contains("Cross-Origin-Embedder-Policy: require-corp\r\n"));
        assert!(text.contains("Cross-Origin-Opener-Policy: same-origin\r\n"));
        assert!(text.contains("Cache-Control: no-cache\r\n"));
        assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(text.ends_with("\r\n\r\nexport {}"));
    }

    #[test]
    fn test_handle_request_head_and_post() {
        let dir = site();
        let config = ServerConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };

        let mut out = Vec::new();
        let mut head = Cursor::new(b"HEAD / HTTP/1.1\r\n\r\n".to_vec());
        handle_request(&mut head, &mut out, &config).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Content-Length: 11\r\n"));
        assert!(text.ends_with("\r\n\r\n"));

        let mut out = Vec::new();
        let mut post = Cursor::new(b"POST / HTTP/1.1\r\n\r\n".to_vec());
        handle_request(&mut post, &mut out, &config).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("HTTP/1.1 405"));
    }

    #[test]
    fn test_not_found_escapes_path() {
        let dir = site();
        let res = resolve(dir.path(), "index.html", "/<script>.js");
        assert_eq!(res.status, 404);
        let body = String::from_utf8(res.body).unwrap();
        assert!(body.contains("&lt;script&gt;"));
    }
}
