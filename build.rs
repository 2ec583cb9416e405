use std::env;
use std::process::Command;

// Records the compiling rustc version for the minimum-version check.
fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(&rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_default();

    if version.is_empty() {
        println!("cargo:warning=could not determine rustc version from '{}'", rustc);
    }
    println!("cargo:rustc-env=RUNCMD_RUSTC_VERSION={}", version);
}
