#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_prep::{ExpressionResolver, SpdxExpressionResolver};

/// Fuzz expression building with arbitrary license tokens.
///
/// Input is split on newlines into one token per line.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let resolver = SpdxExpressionResolver::new();
        let tokens: Vec<&str> = s.lines().collect();
        let expr = sbom_prep::pipeline::build_license_expr(&tokens, &resolver);
        let _ = resolver.resolve(&expr);
    }
});
