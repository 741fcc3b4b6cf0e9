//! Build script for the site crate.
//!
//! Generates content-based hashes for static assets so templates can append
//! them as cache-busting query strings.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    hash_asset(&static_dir.join("css/main.css"), "CSS_HASH");
    hash_asset(&static_dir.join("js/bid-form.js"), "JS_HASH");
}

/// Hash an asset and expose the first 8 hex chars as a compile-time env var.
fn hash_asset(path: &Path, env_name: &str) {
    // Tell Cargo to rerun if the asset changes
    println!("cargo:rerun-if-changed={}", path.display());

    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", path.display());
            println!("cargo:rustc-env={env_name}=");
            return;
        }
    };

    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = format!("{:x}", hasher.finalize());
    let short_hash = hash.get(..8).unwrap_or(&hash);

    println!("cargo:rustc-env={env_name}={short_hash}");
}
