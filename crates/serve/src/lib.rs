//! > Preview server for a built site
//!
//! Requests are answered one at a time from the output directory.  There is no caching, TLS, or
//! reloading; this is only meant for looking at a build locally.
//!
//! # Example
//!
//! ```rust,no_run
//! let server = plume_serve::ServerBuilder::new("docs").port(8000).build();
//!
//! println!("See http://{}", server.addr());
//! server.serve().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use std::str::FromStr;
use std::sync::RwLock;
use std::sync::TryLockError;

pub const DEFAULT_HOSTNAME: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

const NOT_FOUND: &str = "<h1> <center> 404: Page not found </center> </h1>";

/// Custom server settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerBuilder {
    source: std::path::PathBuf,
    hostname: Option<String>,
    port: Option<u16>,
}

impl ServerBuilder {
    pub fn new(source: impl Into<std::path::PathBuf>) -> Self {
        Self {
            source: source.into(),
            hostname: None,
            port: None,
        }
    }

    /// Override the hostname, `0.0.0.0` by default
    pub fn hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Override the port, `8000` by default
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    pub fn build(&self) -> Server {
        let source = self.source.clone();
        let hostname = self.hostname.as_deref().unwrap_or(DEFAULT_HOSTNAME);
        let port = self.port.unwrap_or(DEFAULT_PORT);

        Server {
            source,
            addr: format!("{hostname}:{port}"),
            server: RwLock::new(None),
        }
    }
}

pub struct Server {
    source: std::path::PathBuf,
    addr: String,
    server: RwLock<Option<tiny_http::Server>>,
}

impl Server {
    /// The directory being served
    pub fn source(&self) -> &std::path::Path {
        self.source.as_path()
    }

    pub fn addr(&self) -> &str {
        self.addr.as_str()
    }

    /// Whether the server was running at the instant the call happened
    pub fn is_running(&self) -> bool {
        matches!(self.server.read().as_deref(), Ok(Some(_)))
    }

    /// Block answering requests until [`Server::close`] is called.
    pub fn serve(&self) -> Result<(), Error> {
        match self.server.try_write().as_deref_mut() {
            Ok(server @ None) => {
                *server = Some(tiny_http::Server::http(self.addr()).map_err(Error::new)?);
            }
            Ok(Some(_)) | Err(TryLockError::WouldBlock) => {
                return Err(Error::new("the server is running"));
            }
            Err(error @ TryLockError::Poisoned(_)) => return Err(Error::new(error)),
        }
        log::debug!("Listening on {}", self.addr());

        {
            let server = self.server.read().map_err(Error::new)?;
            if let Some(server) = server.as_ref() {
                for request in server.incoming_requests() {
                    if let Err(e) = static_file_handler(self.source(), request) {
                        log::error!("{e}");
                    }
                }
            }
        }

        *self.server.write().map_err(Error::new)? = None;

        Ok(())
    }

    /// Stop a running [`Server::serve`] loop
    pub fn close(&self) {
        if let Ok(Some(server)) = self.server.read().as_deref() {
            server.unblock();
        }
    }
}

/// Serve Error
#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
    fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.message.fmt(fmt)
    }
}

impl std::error::Error for Error {}

/// Map a request URL onto a file under `root`.
///
/// The query string is dropped and the path is percent-decoded.  Directories resolve to their
/// `index.html`, and `..` components cannot climb out of `root`.
pub fn resolve(root: &std::path::Path, url: &str) -> Option<std::path::PathBuf> {
    let req_path = url.split(['?', '#']).next().unwrap_or_default();
    let req_path = percent_encoding::percent_decode_str(req_path)
        .decode_utf8()
        .ok()?;

    let mut path = root.to_path_buf();
    for component in req_path.split('/') {
        match component {
            "" | "." | ".." => {}
            component => path.push(component),
        }
    }

    let serve_path = if path.is_file() {
        path
    } else {
        path.join("index.html")
    };
    serve_path.is_file().then_some(serve_path)
}

fn static_file_handler(dest: &std::path::Path, req: tiny_http::Request) -> Result<(), Error> {
    log::trace!("{} {}", req.method(), req.url());
    if let Some(serve_path) = resolve(dest, req.url()) {
        let file = std::fs::File::open(&serve_path).map_err(Error::new)?;
        let mut response = tiny_http::Response::from_file(file);
        if let Some(mime) = mime_guess::MimeGuess::from_path(&serve_path).first_raw() {
            let content_type = content_type(mime)?;
            response.add_header(content_type);
        }
        req.respond(response).map_err(Error::new)?;
    } else {
        log::debug!("Not found: {}", req.url());
        req.respond(
            tiny_http::Response::from_string(NOT_FOUND)
                .with_status_code(404)
                .with_header(content_type("text/html")?),
        )
        .map_err(Error::new)?;
    }

    Ok(())
}

fn content_type(mime: &str) -> Result<tiny_http::Header, Error> {
    tiny_http::Header::from_str(&format!("Content-Type: {mime}"))
        .map_err(|()| Error::new(format!("invalid content type {mime}")))
}
