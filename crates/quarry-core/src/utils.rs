/// Letter case convention for normalized identifiers and options.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Case {
    Upper,
    Lower,
}

impl Case {
    /// Rewrite `s` in this case.
    pub fn apply(self, s: &str) -> String {
        match self {
            Case::Upper => s.to_uppercase(),
            Case::Lower => s.to_lowercase(),
        }
    }

    /// Majority case of a set of words.
    ///
    /// Lowercase only when lowercase-looking words strictly outnumber
    /// uppercase-looking ones. Mixed-case words count for neither side, and
    /// ties (including the all-mixed set) resolve to uppercase.
    ///
    /// # Examples
    /// ```
    /// use quarry_core::utils::Case;
    /// assert_eq!(Case::majority(["foo", "bar", "BAZ"]), Case::Lower);
    /// assert_eq!(Case::majority(["Foo", "Bar", "Baz"]), Case::Upper);
    /// ```
    pub fn majority<'a>(words: impl IntoIterator<Item = &'a str>) -> Case {
        let (mut lower, mut upper) = (0usize, 0usize);
        for word in words {
            if looks_lowercase(word) {
                lower += 1;
            } else if looks_uppercase(word) {
                upper += 1;
            }
        }
        if lower > upper { Case::Lower } else { Case::Upper }
    }
}

/// At least one cased character, and no lowercase ones.
pub fn looks_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// At least one cased character, and no uppercase ones.
pub fn looks_lowercase(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}

/// Convert PascalCase or camelCase to snake_case. Snake case input is
/// returned unchanged.
///
/// # Examples
/// ```
/// use quarry_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("TimestampTruncate"), "timestamp_truncate");
/// assert_eq!(to_snake_case("array_length"), "array_length");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
