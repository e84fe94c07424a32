//! Console Binary
//!
//! Runs the session layer against the in-process provider and drives it
//! from an interactive prompt.

use folio::*;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    folio::log();
    let manager = Manager::new(Arc::new(Memory::from_env()), Settings::from_env());
    manager.initialize().await;
    console::CLI::from(manager).run().await;
}
