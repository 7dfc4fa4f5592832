//! Round-trip a PING against a local server on the default port.

use redlink::Command;
use redlink::Connection;
use redlink::TcpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let conn = Connection::<TcpTransport>::tcp("127.0.0.1", 6379);

	let mut cmd = Command::new();
	cmd.arg("PING");

	match conn.call(&cmd).await {
		Ok(reply) => println!("reply: {reply:?}"),
		Err(err) => eprintln!("request failed: {err}"),
	}
}
