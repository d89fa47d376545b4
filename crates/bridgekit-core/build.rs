use chrono::Utc;

fn main() {
    // Same layout as the C `__DATE__ " " __TIME__` pair the app layer
    // historically parsed: "Aug 29 2026 12:34:56" (day space-padded).
    let stamp = Utc::now().format("%b %e %Y %H:%M:%S").to_string();
    println!("cargo:rustc-env=BRIDGEKIT_BUILD_TIMESTAMP={stamp}");
    println!("cargo:rerun-if-changed=build.rs");
}
