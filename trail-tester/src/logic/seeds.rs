use anyhow::{Result, bail};

/// Seed used when the command line names none.
pub const DEFAULT_SEED: u64 = 1848;

/// Resolve CLI seed tokens into numeric seeds.
///
/// Accepts decimal integers (negative values fold to their magnitude) and
/// `0x`-prefixed hex. Duplicates are dropped, first occurrence wins.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();

    for token in tokens.iter().map(|token| token.trim()) {
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
        } else if let Ok(value) = token.parse::<u64>() {
            value
        } else if let Ok(value) = token.parse::<i64>() {
            value.unsigned_abs()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn decimal_hex_and_negative_seeds() {
        let seeds = resolve_seed_inputs(&tokens(&["42", "0x2A", "-7", "0XFF"])).expect("seeds");
        assert_eq!(seeds, vec![42, 7, 255]);
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        assert_eq!(resolve_seed_inputs(&[]).expect("seeds"), vec![DEFAULT_SEED]);
        assert_eq!(
            resolve_seed_inputs(&tokens(&["", "  "])).expect("seeds"),
            vec![DEFAULT_SEED]
        );
    }

    #[test]
    fn tokens_are_trimmed() {
        let seeds = resolve_seed_inputs(&tokens(&[" 9", "0x09 ", " "])).expect("seeds");
        assert_eq!(seeds, vec![9]);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = resolve_seed_inputs(&tokens(&["oregon"])).unwrap_err();
        assert!(err.to_string().contains("oregon"));
        assert!(resolve_seed_inputs(&tokens(&["0xZZ"])).is_err());
    }
}
