use serde::Serialize;
use crate::error::Error;
use crate::provider::ProviderIdentity;

/// Default level of randomization.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default maximum number of generated tokens.
pub const DEFAULT_MAX_TOKENS: i64 = 300;
/// Default top-k.
pub const DEFAULT_TOP_K: i64 = 35;
/// Default top-k used by the parameter-adjustable front end.
pub const UI_DEFAULT_TOP_K: i64 = 36;
/// Default top-p.
pub const DEFAULT_TOP_P: f64 = 0.9;

/// Advisory ranges for interactive controls: (min, max, step).
pub mod ui_ranges {
    /// Temperature slider.
    pub const TEMPERATURE: (f64, f64, f64) = (0.0, 1.0, 0.1);
    /// Max tokens slider.
    pub const MAX_TOKENS: (i64, i64, i64) = (25, 500, 25);
    /// Top-k slider.
    pub const TOP_K: (i64, i64, i64) = (20, 50, 2);
    /// Top-p slider.
    pub const TOP_P: (f64, f64, f64) = (0.0, 1.0, 0.1);
}

/// Generation parameters.
///
/// `new` validates the values; the client factory validates again, so
/// parameters assembled field by field can't reach a provider out of range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GenerationParameters {
    /// Level of randomization when choosing tokens, [0, 1].
    pub temperature: f64,
    /// Maximum number of tokens that will be generated.
    pub max_tokens: i64,
    /// Only k tokens with the most probability will be considered.
    pub top_k: i64,
    /// Only the tokens comprising the top_p probability mass will be considered, [0, 1].
    pub top_p: f64,
}

impl GenerationParameters {

    /// Create parameters, rejecting out-of-range values.
    pub fn new(temperature: f64, max_tokens: i64, top_k: i64, top_p: f64) -> Result<Self, Error> {
        let params = GenerationParameters { temperature, max_tokens, top_k, top_p };
        params.validate()?;
        Ok(params)
    }

    /// Check that every value is in its valid range.
    pub fn validate(&self) -> Result<(), Error> {
        if !unit_interval(self.temperature) {
            return Err(Error::InvalidParameter(format!("temperature must be within [0, 1], got {}", self.temperature)));
        }
        if self.max_tokens <= 0 {
            return Err(Error::InvalidParameter(format!("max_tokens must be positive, got {}", self.max_tokens)));
        }
        if self.top_k <= 0 {
            return Err(Error::InvalidParameter(format!("top_k must be positive, got {}", self.top_k)));
        }
        if !unit_interval(self.top_p) {
            return Err(Error::InvalidParameter(format!("top_p must be within [0, 1], got {}", self.top_p)));
        }
        Ok(())
    }

    /// Names of the values outside the advisory [`ui_ranges`].
    pub fn outside_ui_ranges(&self) -> Vec<&'static str> {
        let mut names = vec![];
        if !within(self.temperature, ui_ranges::TEMPERATURE) {
            names.push("temperature");
        }
        if !within(self.max_tokens, ui_ranges::MAX_TOKENS) {
            names.push("max_tokens");
        }
        if !within(self.top_k, ui_ranges::TOP_K) {
            names.push("top_k");
        }
        if !within(self.top_p, ui_ranges::TOP_P) {
            names.push("top_p");
        }
        names
    }

    /// Parameters as the provider receives them, unsupported knobs dropped.
    pub fn for_provider(&self, provider: ProviderIdentity) -> MappedParams {
        let supported = provider.profile().supported;
        MappedParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_k: supported.top_k.then_some(self.top_k),
            top_p: supported.top_p.then_some(self.top_p),
        }
    }
}

impl Default for GenerationParameters {
    fn default() -> Self {
        GenerationParameters {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
        }
    }
}

fn within<T: PartialOrd>(v: T, (min, max, _): (T, T, T)) -> bool {
    min <= v && v <= max
}

fn unit_interval(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

/// Provider-specific view of the generation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MappedParams {
    /// Level of randomization.
    pub temperature: f64,
    /// Maximum number of generated tokens.
    pub max_tokens: i64,
    /// Top-k, if the provider supports it.
    pub top_k: Option<i64>,
    /// Top-p, if the provider supports it.
    pub top_p: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GenerationParameters::default();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.max_tokens, 300);
        assert_eq!(params.top_k, 35);
        assert_eq!(params.top_p, 0.9);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(GenerationParameters::new(0.0, 1, 1, 0.0).is_ok());
        assert!(GenerationParameters::new(1.0, 500, 50, 1.0).is_ok());

        for (t, m, k, p) in [
            (-0.1, 300, 35, 0.9),
            (1.1, 300, 35, 0.9),
            (f64::NAN, 300, 35, 0.9),
            (0.7, 0, 35, 0.9),
            (0.7, -5, 35, 0.9),
            (0.7, 300, 0, 0.9),
            (0.7, 300, 35, -0.01),
            (0.7, 300, 35, 1.5),
            (0.7, 300, 35, f64::INFINITY),
        ] {
            assert!(
                matches!(GenerationParameters::new(t, m, k, p), Err(Error::InvalidParameter(_))),
                "({t}, {m}, {k}, {p}) must be rejected"
            );
        }

        let params = GenerationParameters { temperature: 1.1, ..Default::default() };
        assert!(matches!(params.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_outside_ui_ranges() {
        assert!(GenerationParameters::default().outside_ui_ranges().is_empty());
        assert!(GenerationParameters::new(0.7, 300, 36, 0.9).unwrap().outside_ui_ranges().is_empty());
        assert!(GenerationParameters::new(0.0, 25, 50, 1.0).unwrap().outside_ui_ranges().is_empty());

        let params = GenerationParameters::new(0.7, 1024, 5, 0.9).unwrap();
        assert_eq!(params.outside_ui_ranges(), vec!["max_tokens", "top_k"]);
    }

    #[test]
    fn test_for_provider() {
        let params = GenerationParameters::new(0.5, 200, 36, 0.8).unwrap();

        let openai = params.for_provider(ProviderIdentity::OpenAI);
        assert_eq!(openai, MappedParams { temperature: 0.5, max_tokens: 200, top_k: None, top_p: None });

        let fireworks = params.for_provider(ProviderIdentity::Fireworks);
        assert_eq!(fireworks.top_k, None);
        assert_eq!(fireworks.top_p, None);

        for provider in [ProviderIdentity::Anthropic, ProviderIdentity::HuggingFace] {
            let mapped = params.for_provider(provider);
            assert_eq!(mapped, MappedParams { temperature: 0.5, max_tokens: 200, top_k: Some(36), top_p: Some(0.8) });
        }
    }
}
