#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the full normalization over arbitrary JSON snapshots.
///
/// Anything that deserializes must normalize without panicking; the only
/// acceptable failure is a dangling package reference.
fuzz_target!(|data: &[u8]| {
    if let Ok(mut snapshot) = sbom_prep::pipeline::read_snapshot(data) {
        let _ = sbom_prep::Normalizer::new().run(&mut snapshot);
    }
});
