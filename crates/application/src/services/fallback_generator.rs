//! Deterministic offline fable synthesis
//!
//! Used whenever the remote generator is unavailable, unconfigured, or failed.
//! The output depends only on the request.

use domain::{FableRequest, StyleMode};

/// Template-based fable generator
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    /// Create a new fallback generator
    pub const fn new() -> Self {
        Self
    }

    /// Produce a fable from the request
    ///
    /// Characters and setting are lower-cased. The closing line repeats the
    /// moral exactly as supplied.
    pub fn generate(&self, request: &FableRequest) -> String {
        let a = request.character1().to_lowercase();
        let b = request.character2().to_lowercase();
        let setting = request.setting().to_lowercase();
        let moral = request.moral();

        match request.style() {
            StyleMode::Modelled => format!(
                "A {a} and {b} lived in a {setting}. The {a} was proud and wouldn't help the {b}.\n\n\
                 Later, the {a} needed help and only the {b} was there. The {b} helped anyway, even tho the {a} had been mean.\n\n\
                 Moral: {moral}"
            ),
            StyleMode::Default => format!(
                "In a {setting}, a proud {a} refused to help a small {b}. When the {a} later found himself in trouble, only the {b} was nearby to help.\n\n\
                 Despite being treated poorly before, the {b} chose to help. The {a} learned an important lesson about kindness and respect.\n\n\
                 Moral: {moral}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn request(style: &str) -> FableRequest {
        FableRequest::new("Lion", "Mouse", "Jungle", "Be Kind", style).unwrap()
    }

    #[test]
    fn default_template() {
        let fable = FallbackGenerator::new().generate(&request("no"));
        assert_eq!(
            fable,
            "In a jungle, a proud lion refused to help a small mouse. When the lion later found himself in trouble, only the mouse was nearby to help.\n\n\
             Despite being treated poorly before, the mouse chose to help. The lion learned an important lesson about kindness and respect.\n\n\
             Moral: Be Kind"
        );
    }

    #[test]
    fn modelled_template_contains_colloquialism() {
        let fable = FallbackGenerator::new().generate(&request("include misspellings"));
        assert!(fable.starts_with("A lion and mouse lived in a jungle."));
        assert!(fable.contains("even tho the lion had been mean"));
        assert!(fable.ends_with("\n\nMoral: Be Kind"));
    }

    #[test]
    fn moral_keeps_original_case() {
        let request = FableRequest::new("Fox", "Crow", "Forest", "BEWARE Flattery", "no").unwrap();
        let fable = FallbackGenerator::new().generate(&request);
        assert!(fable.ends_with("Moral: BEWARE Flattery"));
        assert!(fable.contains("a proud fox"));
    }

    #[test]
    fn three_paragraphs() {
        for style in ["no", "grammatical errors"] {
            let fable = FallbackGenerator::new().generate(&request(style));
            assert_eq!(fable.split("\n\n").count(), 3);
        }
    }

    proptest! {
        #[test]
        fn deterministic_and_ends_with_moral(
            a in "[A-Za-z]{1,12}",
            b in "[A-Za-z]{1,12}",
            setting in "[A-Za-z ]{0,12}[a-z]",
            moral in "[A-Za-z ,.]{0,30}[a-z]",
            style in prop_oneof![Just("no"), Just("misspell")]
        ) {
            let request = FableRequest::new(a, b, setting, moral.clone(), style).unwrap();
            let generator = FallbackGenerator::new();
            let first = generator.generate(&request);
            prop_assert_eq!(&first, &generator.generate(&request));
            let expected_suffix = format!("Moral: {moral}");
            prop_assert!(first.ends_with(&expected_suffix));
        }
    }
}
