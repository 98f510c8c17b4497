/// Build script for mcpi
/// Embeds build metadata shown by `mcpi version`

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=build.rs");

    // Commit hash, when built from a git checkout
    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
    {
        if output.status.success() {
            if let Ok(hash) = String::from_utf8(output.stdout) {
                println!("cargo:rustc-env=MCPI_GIT_HASH={}", hash.trim());
            }
        }
    }

    println!("cargo:rustc-env=MCPI_BUILD_TIMESTAMP={}", unix_timestamp());
}

/// Seconds since the Unix epoch, without an external crate
fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{secs}")
}
