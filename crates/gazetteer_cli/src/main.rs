//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `gazetteer_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use gazetteer_core::db::{create_store_in_memory, is_valid_store};

fn main() {
    println!("gazetteer_core version={}", gazetteer_core::core_version());

    let probe = match create_store_in_memory() {
        Ok(conn) => is_valid_store(&conn),
        Err(_) => false,
    };
    println!("gazetteer_core store_probe={probe}");
}
