#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use anyhow::Result;
use ip_tracker::run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  // Install the default crypto provider for rustls
  let _ = rustls::crypto::ring::default_provider().install_default();

  run().await
}
