//! TCP accept loop.
//!
//! Every accepted connection is served by a [`Session`] on its own thread, sessions share the
//! [`ContentProvider`] and the [`Config`].
use std::io::{self, BufReader, BufWriter};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::watch;

use crate::config::Config;
use crate::content::ContentProvider;
use crate::h1::Session;
use crate::log::{debug, error, info};

/// HTTP/1.x server.
///
/// ```no_run
/// use tinyweb::{Server, content::from_fn};
///
/// # async fn app() -> std::io::Result<()> {
/// let server = Server::bind("127.0.0.1:8080", from_fn(|_| Ok(None))).await?;
/// server.run().await
/// # }
/// ```
pub struct Server<P: ?Sized> {
    listener: TcpListener,
    config: Arc<Config>,
    shutdown: Arc<watch::Sender<bool>>,
    provider: Arc<P>,
}

impl<P: ContentProvider + 'static> Server<P> {
    /// Bind a server to given address.
    pub async fn bind<A: ToSocketAddrs>(addr: A, provider: P) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::from_listener(listener, Arc::new(provider)))
    }
}

impl<P: ContentProvider + ?Sized + 'static> Server<P> {
    /// Create server from a bound listener and a shared provider.
    pub fn from_listener(listener: TcpListener, provider: Arc<P>) -> Self {
        Self {
            listener,
            config: Arc::new(Config::default()),
            shutdown: Arc::new(watch::Sender::new(false)),
            provider,
        }
    }

    /// Replace the server [`Config`].
    pub fn config(mut self, config: Config) -> Self {
        self.config = Arc::new(config);
        self
    }

    #[inline]
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Returns a handle that stops the accept loop.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: Arc::clone(&self.shutdown),
        }
    }

    /// Accept connections until shutdown is requested.
    ///
    /// Sessions already running are not interrupted.
    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    pub async fn run(self) -> io::Result<()> {
        let mut shutdown = self.shutdown.subscribe();
        info!("listening on {}", self.listener.local_addr()?);

        loop {
            let accepted = tokio::select! {
                accepted = self.listener.accept() => accepted,
                _ = shutdown.wait_for(|stop| *stop) => break,
            };

            let (stream, addr) = match accepted {
                Ok(ok) => ok,
                Err(err) => {
                    error!("failed to accept connection: {err}");
                    continue;
                }
            };

            debug!("accepted connection from {addr}");

            let stream = match stream.into_std() {
                Ok(ok) => ok,
                Err(err) => {
                    error!("failed to detach connection {addr}: {err}");
                    continue;
                }
            };

            let provider = Arc::clone(&self.provider);
            let config = Arc::clone(&self.config);
            let spawned = thread::Builder::new()
                .name(format!("tinyweb {addr}"))
                .spawn(move || {
                    if let Err(err) = serve_stream(stream, provider, config) {
                        debug!("connection {addr} closed: {err}");
                    }
                });

            if let Err(err) = spawned {
                error!("failed to spawn session for {addr}: {err}");
            }
        }

        info!("server stopped");
        Ok(())
    }
}

fn serve_stream<P: ContentProvider + ?Sized>(
    stream: TcpStream,
    provider: Arc<P>,
    config: Arc<Config>,
) -> io::Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(config.get_read_timeout().filter(|e| !e.is_zero()))?;

    let reader = BufReader::new(stream.try_clone()?);
    let writer = BufWriter::new(stream);
    Session::new(reader, writer, provider, config).run()
}

impl<P: ?Sized> std::fmt::Debug for Server<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("listener", &self.listener)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Handle to stop a [`Server`], created by [`Server::shutdown_handle`].
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Stop accepting new connections.
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }
}
