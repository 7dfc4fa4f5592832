use redlink_wire::read_reply;
use redlink_wire::Reply;
use redlink_wire::SliceSource;

fn main() {
	// One nested reply followed by a standalone status, as a server would
	// stream them back to back.
	let wire = b"*3\r\n+OK\r\n$-1\r\n*2\r\n:7\r\n$2\r\nhi\r\n+OK\r\n";
	let mut source = SliceSource::new(wire);

	let reply = read_reply(&mut source).expect("well-formed reply");
	println!("first reply: {reply:?}");
	if let Reply::Array(items) = &reply {
		for (idx, item) in items.iter().enumerate() {
			println!("  [{idx}] {:?} ({})", item, item.reply_type());
		}
	}

	let next = read_reply(&mut source).expect("well-formed reply");
	println!("second reply: {next:?}");
	println!("{} bytes left on the stream", source.remaining());
}
