use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("Invalid seed '{0}': expected a decimal or 0x-prefixed hex number")]
    Invalid(String),
    #[error("No seeds given")]
    Empty,
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse one seed token. Accepts `1337`, `0xBEEF` and `0XBEEF`.
pub fn parse_seed(token: &str) -> Result<u64, SeedError> {
    let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => token.replace('_', "").parse::<u64>(),
    };
    parsed.map_err(|_| SeedError::Invalid(token.to_string()))
}

/// Parse a comma-separated seed list, keeping order and dropping repeats.
pub fn parse_seeds(list: &str) -> Result<Vec<u64>, SeedError> {
    let mut seeds = Vec::new();
    for token in split_csv(list) {
        let seed = parse_seed(&token)?;
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        return Err(SeedError::Empty);
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_drops_empty() {
        assert_eq!(split_csv(" smoke, ,reset,"), vec!["smoke", "reset"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn seeds_accept_decimal_and_hex() {
        assert_eq!(parse_seeds("1337, 0xDEAD_BEEF,0X10"), Ok(vec![1337, 0xDEAD_BEEF, 16]));
        assert_eq!(parse_seeds("5,5,6"), Ok(vec![5, 6]));
    }

    #[test]
    fn bad_seeds_are_rejected() {
        assert_eq!(
            parse_seeds("12,sparkle"),
            Err(SeedError::Invalid("sparkle".to_string()))
        );
        assert_eq!(parse_seeds("-1"), Err(SeedError::Invalid("-1".to_string())));
        assert_eq!(parse_seeds(" , "), Err(SeedError::Empty));
    }
}
