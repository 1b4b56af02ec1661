//! Lifecycle entry points against a local HTTP server.
//!
//! The source URL comes from the environment and the shared catalog is process
//! wide, so everything runs in one test in its own binary.

use std::net::SocketAddr;
use std::ptr;
use std::thread;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use songdata::*;
use songdata_source::config::{ENV_TIMEOUT, ENV_URL};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

const HASH: &str = "4B2DA842B687EC4CFBC948C583C21C79D4120DE0";

const DATASET: &str = r#"[
	{ "Hash": "4B2DA842B687EC4CFBC948C583C21C79D4120DE0", "Key": "2144", "Bpm": 128.0,
	  "Diffs": [ { "Diff": "Hard", "Char": "Standard", "Stars": 4.2 } ] },
	{ "Hash": "BB", "Key": "ff", "Diffs": [] }
]"#;

/// Answers every connection: `404` for paths under `/missing`, the dataset
/// otherwise.
fn serve(runtime: &Runtime) -> SocketAddr {
	runtime.block_on(async {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			while let Ok((mut socket, _)) = listener.accept().await {
				tokio::spawn(async move {
					let mut buf = [0u8; 4096];
					let n = socket.read(&mut buf).await.unwrap_or(0);
					let request = String::from_utf8_lossy(&buf[..n]);
					let (status, body) = if request.starts_with("GET /missing") {
						("404 Not Found", "")
					} else {
						("200 OK", DATASET)
					};
					let response = format!(
						"HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
						body.len()
					);
					let _ = socket.write_all(response.as_bytes()).await;
					let _ = socket.shutdown().await;
				});
			}
		});
		addr
	})
}

fn set_env(key: &str, value: &str) {
	// Sole test in this binary.
	unsafe { std::env::set_var(key, value) };
}

fn remove_env(key: &str) {
	unsafe { std::env::remove_var(key) };
}

fn sd(s: &str) -> SdStr {
	SdStr::borrowed(s)
}

#[test]
fn lifecycle_entry_points() {
	let server = Runtime::new().unwrap();
	let addr = serve(&server);
	set_env(ENV_URL, &format!("http://{addr}/songs.json"));

	unsafe {
		let pending = songdata_catalog_fetch_async();
		assert!(!pending.is_null());
		let deadline = Instant::now() + Duration::from_secs(10);
		while !songdata_pending_is_finished(pending) {
			assert!(Instant::now() < deadline, "background fetch did not finish");
			thread::sleep(Duration::from_millis(10));
		}
		let mut owned = ptr::null_mut();
		assert_eq!(songdata_pending_wait(pending, &mut owned), SdStatus::Ok);
		assert_eq!(songdata_catalog_len(owned), 2);

		let discarded = songdata_catalog_fetch_async();
		assert!(!discarded.is_null());
		songdata_pending_free(discarded);
		assert!(!songdata_pending_is_finished(ptr::null()));
		assert_eq!(songdata_pending_wait(ptr::null_mut(), &mut owned), SdStatus::InvalidArgument);

		// The shared catalog survives a free and is handed out again.
		let mut shared = ptr::null();
		assert_eq!(songdata_shared_catalog(&mut shared), SdStatus::Ok);
		assert!(!shared.is_null());
		songdata_catalog_free(shared.cast_mut());
		assert_eq!(songdata_catalog_len(shared), 2);
		let mut again = ptr::null();
		assert_eq!(songdata_shared_catalog(&mut again), SdStatus::Ok);
		assert!(ptr::eq(shared, again));

		let song = songdata_get_song(sd(HASH));
		assert!(!song.is_null());
		assert!(ptr::eq(song, songdata_catalog_get(shared, sd(HASH))));
		assert!(songdata_get_song(sd("CC")).is_null());
		assert!(songdata_get_song(SdStr::ABSENT).is_null());

		// A loaded shared catalog no longer depends on the configuration.
		set_env(ENV_TIMEOUT, "soon");
		assert!(!songdata_get_song(sd(HASH)).is_null());
		assert_eq!(songdata_shared_catalog(&mut again), SdStatus::Ok);
		let mut unused = ptr::null_mut();
		assert_eq!(songdata_catalog_fetch(&mut unused), SdStatus::Config);
		assert!(unused.is_null());
		remove_env(ENV_TIMEOUT);

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("songs.json");
		assert!(songdata_download_to_file(sd(path.to_str().unwrap())));
		assert_eq!(std::fs::read_to_string(&path).unwrap(), DATASET);

		set_env(ENV_URL, &format!("http://{addr}/missing.json"));
		let missing = dir.path().join("missing.json");
		assert!(!songdata_download_to_file(sd(missing.to_str().unwrap())));
		assert!(!missing.exists());
		assert!(!songdata_download_to_file(SdStr::ABSENT));

		songdata_catalog_free(owned);
	}
}
