use std::io::{self, Write};
use tinyweb::{Content, ContentProvider, OutContent, Server, StaticContent, Status, Uri};

const INDEX: &str = "<html>\n<head>\n<title>Index page</title>\n</head>\n\
<body>\n<h1>Index page</h1>\n<ul>\n\
<li> <a href=\"/normal\">Normal text</a>\n\
<li> <a href=\"/chunked\">Chunked text</a>\n\
<li> <a href=\"/bytes\">Chunked binary data</a>\n\
<li> <a href=\"/forbidden\">Forbidden page</a>\n\
<li> <a href=\"/nonexistent\">Page that does not exist</a>\n\
</ul></body></html>\n";

const TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit, sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

/// Pseudo random bytes of unknown size, written one byte at a time.
struct Noise {
    len: usize,
}

impl OutContent for Noise {
    fn mimetype(&self) -> &str {
        "application/octet-stream"
    }

    fn size(&self) -> u64 {
        0
    }

    fn write_to(&self, sink: &mut dyn Write) -> io::Result<()> {
        let mut state = 0x2545_f491_u32;
        for _ in 0..self.len {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            sink.write_all(&[state as u8])?;
        }
        sink.flush()
    }
}

struct Library;

impl ContentProvider for Library {
    fn content(&self, target: &Uri) -> Result<Option<Content>, Status> {
        let content = match target.path() {
            "/" => Content::out(StaticContent::new("text/html; charset=utf-8", INDEX)),
            "/normal" => Content::out(StaticContent::new("text/plain", TEXT)),
            "/chunked" => Content::out(StaticContent::unknown_size("text/plain", TEXT)),
            "/bytes" => Content::out(Noise { len: 60_000 }),
            "/forbidden" => return Err(Status::FORBIDDEN),
            _ => return Ok(None),
        };
        Ok(Some(content))
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let addr = std::env::args().nth(1).unwrap_or_else(|| "127.0.0.1:8080".to_owned());
    let server = Server::bind(addr, Library).await?;
    let shutdown = server.shutdown_handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.shutdown();
        }
    });

    server.run().await
}
