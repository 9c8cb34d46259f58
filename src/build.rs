// Put data in the binary at compile time.
// VERSION=1.0.0-rc20241019 cargo build

fn main() {
    let version = std::env::var("VERSION").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=VERSION");
    println!("cargo:rustc-env=version={}", version);
}
