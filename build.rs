fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // ESP-IDF builds need the toolchain environment exported by embuild.
    // Host builds (simulator, tests) have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
