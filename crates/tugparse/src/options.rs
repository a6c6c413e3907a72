// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parse configuration.
//!
//! [`ParseOptions`] is threaded from the entry points down to the tokenizer.
//! It derives `serde` traits so a front-end can load it from its own
//! configuration file.

use serde::{Deserialize, Serialize};

/// Tab stop width used when no other value is configured.
pub const DEFAULT_TAB_SIZE: u32 = 8;

/// Configuration options for tokenizing and parsing.
///
/// # Example
///
/// ```
/// use tugparse::ParseOptions;
///
/// // Default: tabs advance to the next multiple of 8 columns
/// let options = ParseOptions::default();
/// assert_eq!(options.tab_size(), 8);
///
/// let options = ParseOptions::new().with_tab_size(4);
/// assert_eq!(options.tab_size(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Width of a tab stop when measuring indentation.
    ///
    /// A tab advances the indentation column to the next multiple of this
    /// value. Zero is not a valid width and is treated as the default.
    pub tab_size: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

impl ParseOptions {
    /// Creates default parse options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tab stop width.
    #[must_use]
    pub fn with_tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// The effective tab stop width (never zero).
    #[must_use]
    pub fn tab_size(&self) -> u32 {
        if self.tab_size == 0 {
            DEFAULT_TAB_SIZE
        } else {
            self.tab_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_default() {
        let options = ParseOptions::default();
        assert_eq!(options.tab_size, DEFAULT_TAB_SIZE);
        assert_eq!(ParseOptions::new(), options);
    }

    #[test]
    fn test_parse_options_with_tab_size() {
        let options = ParseOptions::new().with_tab_size(2);
        assert_eq!(options.tab_size(), 2);
    }

    #[test]
    fn test_zero_tab_size_falls_back_to_default() {
        let options = ParseOptions::new().with_tab_size(0);
        assert_eq!(options.tab_size(), DEFAULT_TAB_SIZE);
    }

    #[test]
    fn test_parse_options_from_json() {
        let options: ParseOptions = serde_json::from_str(r#"{"tab_size": 4}"#).expect("json");
        assert_eq!(options.tab_size(), 4);

        // Missing fields take their defaults
        let options: ParseOptions = serde_json::from_str("{}").expect("json");
        assert_eq!(options, ParseOptions::default());
    }
}
