use std::env;

fn main() {
    let version =
        env::var("LEAFSCAN_VERSION").unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rerun-if-env-changed=LEAFSCAN_VERSION");
    println!("cargo:rustc-env=LEAFSCAN_VERSION={version}");
}
