fn main() {
    // Host builds (tests, fuzzing) have no ESP-IDF toolchain to configure.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
