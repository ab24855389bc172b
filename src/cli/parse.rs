use scoresplit_core::format::OutputFormat;
use scoresplit_core::seed::SeedPolicy;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse seed policy from string
pub fn parse_seed_policy(s: &str) -> std::result::Result<SeedPolicy, String> {
    s.parse::<SeedPolicy>().map_err(|e| e.to_string())
}

/// Parse a fraction in (0, 1]
pub fn parse_fraction(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!("{} is not in (0, 1]", value))
    }
}
