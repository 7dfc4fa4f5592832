//! Request dispatch.
//!
//! A [`Connection`] binds a transport type to a destination and nothing
//! more: every call opens a fresh transport, writes one request, reads one
//! reply and tears the transport down again. That keeps calls stateless and
//! failure-isolated; pooling and reuse belong to higher layers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Context;
use std::task::Poll;

use redlink_wire::read_reply_raw;
use redlink_wire::Reply;
use redlink_wire::TransportError;
use redlink_wire::WireEncode;
use redlink_wire::WireResult;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::transport::Endpoint;
use crate::transport::SocketConfig;
use crate::transport::StreamConnect;
use crate::transport::TcpConnect;
use crate::transport::TcpTransport;
use crate::transport::Transport;

type Opener<T> = Arc<dyn Fn() -> Result<T, TransportError> + Send + Sync>;

/// A destination bound to a transport type.
///
/// Holds no open socket, so it is cheap to clone and safe to call from many
/// tasks at once; ordering between concurrent calls is not guaranteed
/// because each opens its own transport. Callers that need ordering await
/// one handle before issuing the next, or batch into a
/// [`CommandList`](redlink_wire::CommandList).
pub struct Connection<T: 'static> {
	endpoint: Endpoint,
	opener: Opener<T>,
}

impl<T: 'static> Clone for Connection<T> {
	fn clone(&self) -> Self {
		Self {
			endpoint: self.endpoint.clone(),
			opener: Arc::clone(&self.opener),
		}
	}
}

impl<T: TcpConnect + 'static> Connection<T> {
	/// Bind to a TCP destination.
	pub fn tcp(host: impl Into<String>, port: u16) -> Self {
		let host = host.into();
		let endpoint = Endpoint::Tcp {
			host: host.clone(),
			port,
		};
		Self {
			endpoint,
			opener: Arc::new(move || T::connect(&host, port)),
		}
	}
}

impl<T: StreamConnect + 'static> Connection<T> {
	/// Bind to a local stream socket path.
	pub fn stream(path: impl Into<String>) -> Self {
		let path = path.into();
		let endpoint = Endpoint::Stream { path: path.clone() };
		Self {
			endpoint,
			opener: Arc::new(move || T::open(&path)),
		}
	}
}

impl Connection<TcpTransport> {
	/// Bind to a TCP destination with explicit socket options.
	pub fn tcp_with(host: impl Into<String>, port: u16, config: SocketConfig) -> Self {
		let host = host.into();
		let endpoint = Endpoint::Tcp {
			host: host.clone(),
			port,
		};
		Self {
			endpoint,
			opener: Arc::new(move || TcpTransport::connect_with(&host, port, &config)),
		}
	}
}

impl<T: Transport + Default + 'static> Default for Connection<T> {
	/// A connection whose transport ignores the destination; the shape
	/// used by mock-driven tests.
	fn default() -> Self {
		Self {
			endpoint: Endpoint::Detached,
			opener: Arc::new(|| Ok(T::default())),
		}
	}
}

impl<T: Transport + 'static> Connection<T> {
	/// Dispatch one request.
	///
	/// The request is serialised here, on the calling task; transport I/O
	/// and parsing run on a background blocking task. Await the returned
	/// handle for the reply. A server error line comes back as
	/// [`Reply::Error`], not as `Err`; only transport and protocol
	/// failures are errors.
	///
	/// # Panics
	///
	/// Panics if called outside a Tokio runtime.
	pub fn call<R: WireEncode + ?Sized>(&self, request: &R) -> ReplyHandle {
		let payload = request.encode();
		let opener = Arc::clone(&self.opener);
		debug!(endpoint = %self.endpoint, bytes = payload.len(), "dispatching request");
		let task = tokio::task::spawn_blocking(move || -> WireResult<Reply> {
			let mut transport = opener()?;
			transport.write(&payload)?;
			let raw = read_reply_raw(&mut transport)?;
			Reply::from_wire(&raw)
		});
		ReplyHandle { task }
	}

	/// Destination this connection is bound to.
	pub fn endpoint(&self) -> &Endpoint {
		&self.endpoint
	}
}

/// Handle to an in-flight request.
///
/// Resolves once the dispatch task finishes. Dropping the handle does not
/// cancel the task; it runs to completion and its reply is discarded.
pub struct ReplyHandle {
	task: JoinHandle<WireResult<Reply>>,
}

impl ReplyHandle {
	/// Wait for the reply.
	pub async fn wait(self) -> WireResult<Reply> {
		self.await
	}
}

impl Future for ReplyHandle {
	type Output = WireResult<Reply>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match Pin::new(&mut self.task).poll(cx) {
			Poll::Pending => Poll::Pending,
			Poll::Ready(Ok(result)) => Poll::Ready(result),
			Poll::Ready(Err(join_err)) => {
				if join_err.is_panic() {
					std::panic::resume_unwind(join_err.into_panic());
				}
				// only reachable on runtime shutdown
				Poll::Ready(Err(TransportError::new("dispatch task cancelled", "runtime").into()))
			}
		}
	}
}
