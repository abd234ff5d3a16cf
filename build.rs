fn main() {
    // Re-emits the ESP-IDF environment (paths, cfg flags) for the esp crates.
    // Prints nothing when building for the host, so tests stay unaffected.
    embuild::espidf::sysenv::output();
}
