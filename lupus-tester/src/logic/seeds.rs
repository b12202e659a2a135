use anyhow::{Result, bail};

const DEFAULT_SEED: u64 = 1337;

/// Resolve CLI seed tokens into concrete seeds.
///
/// Accepts decimal integers (negative values use their magnitude) and `0x`
/// hexadecimal. Duplicates are dropped, keeping first-seen order.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        let seed = if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            match u64::from_str_radix(hex, 16) {
                Ok(value) => value,
                Err(_) => bail!("Unrecognized seed token: {token}"),
            }
        } else if let Ok(value) = token.parse::<i64>() {
            value.unsigned_abs()
        } else if let Ok(value) = token.parse::<u64>() {
            value
        } else {
            bail!("Unrecognized seed token: {token}");
        };

        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }

    Ok(seeds)
}
