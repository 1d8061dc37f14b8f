// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Filename tokenizer feeding both resolvers.

/// Split a filename into lowercase tokens on runs of `-`, `_`, and `.`.
///
/// Empty tokens are dropped, so an empty or all-delimiter input yields an
/// empty vector rather than a vector of empty strings (an empty token would
/// be a substring of everything and poison icon matching).
pub fn tokenize(filename: &str) -> Vec<String> {
    filename
        .to_lowercase()
        .split(['-', '_', '.'])
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn splits_on_all_three_delimiters_and_lowercases() {
        assert_eq!(
            tokenize("Ubuntu-22.04_Desktop"),
            vec!["ubuntu", "22", "04", "desktop"]
        );
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("-_.").is_empty());
    }

    // Runs of delimiters behave like a single delimiter.
    #[test]
    fn delimiter_runs_collapse() {
        assert_eq!(tokenize("a--b"), tokenize("a-b"));
        assert_eq!(tokenize("a-._b"), vec!["a", "b"]);
    }

    #[test]
    fn undelimited_names_stay_whole() {
        assert_eq!(tokenize("mydebianlive"), vec!["mydebianlive"]);
    }
}
