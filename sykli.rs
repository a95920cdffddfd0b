//! Sykli CI pipeline for kubectl-deploy
//!
//! Run locally: sykli run
//! Or: cargo run --bin sykli --features sykli -- --emit | sykli run -

use sykli::{Pipeline, Template};

fn main() {
    let mut p = Pipeline::new();

    // === RESOURCES ===
    let src = p.dir(".");
    let cargo_registry = p.cache("cargo-registry");
    let cargo_git = p.cache("cargo-git");
    let target_cache = p.cache("target");

    // === TEMPLATE ===
    let rust = Template::new()
        .container("rust:1.85")
        .mount_dir(&src, "/src")
        .mount_cache(&cargo_registry, "/usr/local/cargo/registry")
        .mount_cache(&cargo_git, "/usr/local/cargo/git")
        .mount_cache(&target_cache, "/src/target")
        .workdir("/src");

    // === TASKS ===

    // Unit tests plus the end-to-end tests against the fake kubectl script
    let _ = p
        .task("test")
        .from(&rust)
        .run("cargo test --all-features")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"]);

    let _ = p
        .task("lint")
        .from(&rust)
        .run("cargo clippy --all-targets --all-features -- -D warnings")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"]);

    let _ = p
        .task("fmt")
        .from(&rust)
        .run("cargo fmt -- --check")
        .inputs(&["**/*.rs"]);

    // Input document schema, published next to the binary
    let _ = p
        .task("schema")
        .from(&rust)
        .run("cargo run --bin gen-schema > target/deployment-set.schema.json")
        .inputs(&["src/document/**/*.rs", "src/bin/gen-schema.rs", "Cargo.toml"])
        .output("schema", "target/deployment-set.schema.json");

    let _ = p
        .task("build")
        .from(&rust)
        .run("cargo build --release --bin kubectl-deploy")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"])
        .output("binary", "target/release/kubectl-deploy")
        .after(&["test", "lint", "fmt"]);

    p.emit();
}
