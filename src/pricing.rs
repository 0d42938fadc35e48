// src/pricing.rs — Static per-model token pricing
//
// Pure lookup over published per-1000-token rates. An unknown model id
// prices at zero for both directions; this under-reports cost and is called
// out in the report output rather than corrected here.

/// (model id, price per 1000 input tokens, price per 1000 output tokens)
const MODEL_TOKEN_PRICES: &[(&str, f64, f64)] = &[
    ("amazon.titan-text-lite-v1", 0.0003, 0.0004),
    ("amazon.titan-text-express-v1", 0.0075, 0.0016),
    ("ai21.j2-mid-v1", 0.0125, 0.0125),
    ("ai21.j2-ultra-v1", 0.0188, 0.0188),
    ("anthropic.claude-instant-v1", 0.0008, 0.0024),
    ("anthropic.claude-v2", 0.008, 0.024),
    ("anthropic.claude-v2:1", 0.008, 0.024),
    ("anthropic.claude-3-sonnet-20240229-v1:0", 0.003, 0.015),
    ("anthropic.claude-3-haiku-20240307-v1:0", 0.00025, 0.00125),
    ("cohere.command-text-v14", 0.0015, 0.002),
    ("cohere.command-light-text-v14", 0.0003, 0.0006),
    ("meta.llama2-13b-chat-v1", 0.00075, 0.001),
    ("meta.llama2-70b-chat-v1", 0.00195, 0.00256),
    ("meta.llama3-8b-instruct-v1:0", 0.0004, 0.0006),
    ("meta.llama3-70b-instruct-v1:0", 0.00265, 0.0035),
    ("mistral.mistral-large-2402-v1:0", 0.008, 0.024),
    ("mistral.mistral-7b-instruct-v0:2", 0.00015, 0.0002),
    ("mistral.mixtral-8x7b-instruct-v0:1", 0.00045, 0.0007),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    /// Cost of one invocation, rounded to 6 decimal places.
    pub total_cost: f64,
    /// Cost of 1000 invocations, rounded to 6 decimal places.
    pub total_cost_per_1000: f64,
}

fn rates(model_id: &str) -> (f64, f64) {
    MODEL_TOKEN_PRICES
        .iter()
        .find(|(id, _, _)| *id == model_id)
        .map(|(_, rate_in, rate_out)| (*rate_in, *rate_out))
        .unwrap_or((0.0, 0.0))
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Price one invocation from its vendor-reported token counts.
pub fn price(input_tokens: u64, output_tokens: u64, model_id: &str) -> PriceBreakdown {
    let (rate_in, rate_out) = rates(model_id);
    let input_cost = round_to(input_tokens as f64 / 1000.0 * rate_in, 8);
    let output_cost = round_to(output_tokens as f64 / 1000.0 * rate_out, 8);
    let total_cost = round_to(input_cost + output_cost, 6);
    let total_cost_per_1000 = round_to(total_cost * 1000.0, 6);
    PriceBreakdown {
        input_cost,
        output_cost,
        total_cost,
        total_cost_per_1000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn titan_lite_reference_vector() {
        let p = price(1000, 0, "amazon.titan-text-lite-v1");
        assert_eq!(p.input_cost, 0.0003);
        assert_eq!(p.output_cost, 0.0);
        assert_eq!(p.total_cost, 0.0003);
        assert_eq!(p.total_cost_per_1000, 0.3);
    }

    #[test]
    fn pricing_is_linear_in_tokens() {
        let one = price(1000, 1000, "anthropic.claude-3-haiku-20240307-v1:0");
        let ten = price(10_000, 10_000, "anthropic.claude-3-haiku-20240307-v1:0");
        assert_eq!(one.input_cost * 10.0, ten.input_cost);
        assert_eq!(one.output_cost * 10.0, ten.output_cost);
    }

    #[test]
    fn unknown_model_prices_at_zero() {
        let p = price(1_000_000, 1_000_000, "acme.frontier-v1");
        assert_eq!(p.input_cost, 0.0);
        assert_eq!(p.output_cost, 0.0);
        assert_eq!(p.total_cost, 0.0);
        assert_eq!(p.total_cost_per_1000, 0.0);
    }

    #[test]
    fn sub_token_costs_round_to_eight_places() {
        // 1 input token on mistral-7b: 0.00015 / 1000 = 0.00000015
        let p = price(1, 0, "mistral.mistral-7b-instruct-v0:2");
        assert_eq!(p.input_cost, 0.00000015);
        // Total rounds at 6 places, collapsing to zero.
        assert_eq!(p.total_cost, 0.0);
    }
}
