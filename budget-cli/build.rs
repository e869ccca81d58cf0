//! Stamps `BUDGET_BUILD_SHA` for `budget --version`.
//!
//! Packaged builds without a checkout can set `BUDGET_BUILD_SHA` themselves;
//! otherwise the workspace's git description is used, marked `-dirty` when the
//! tree has local edits.

use std::path::Path;
use std::process::Command;

const SHA_VAR: &str = "BUDGET_BUILD_SHA";

fn git_describe(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--abbrev=10"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    println!("cargo:rerun-if-env-changed={SHA_VAR}");

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = Path::new(&manifest_dir).join("..");

    let sha = std::env::var(SHA_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_describe(&workspace))
        .unwrap_or_else(|| "unknown".to_string());

    let git_dir = workspace.join(".git");
    if git_dir.exists() {
        for watched in ["HEAD", "index"] {
            println!("cargo:rerun-if-changed={}", git_dir.join(watched).display());
        }
    }
    println!("cargo:rustc-env={SHA_VAR}={sha}");
}
