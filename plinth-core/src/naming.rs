//! Identifier conversion between config-side snake case and code-side Pascal case.
//!
//! Both directions are total over arbitrary input but are not inverses of one
//! another: consecutive separators and all-uppercase runs do not survive a
//! round trip.

/// `true` when the string has at least one cased character and none of them is lower-case.
fn is_all_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

fn is_separator(c: char) -> bool {
    c == '_' || c == '-'
}

/// Upper-case the first character of every `_`/`-` delimited segment, keeping the separators.
fn title_segments(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut word_start = true;
    for c in value.chars() {
        if is_separator(c) {
            result.push(c);
            word_start = true;
        } else if word_start {
            result.extend(c.to_uppercase());
            word_start = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert a snake case identifier to PascalCase (e.g., "token.transfer_handler" -> "TokenTransferHandler")
///
/// Dots count as word separators. An all-uppercase input is lower-cased first,
/// so `"ABC"` becomes `"Abc"` rather than staying a constant-looking `"ABC"`.
/// Separators before the first word and after the last one are kept. When
/// every word is a single letter or digit (`"a_b"`), joining them would read
/// as one acronym, so the title-cased form is returned with its separators
/// (`"A_B"`).
pub fn snake_to_pascal(value: &str) -> String {
    let mut value = value.replace('.', "_");
    if is_all_upper(&value) {
        value = value.to_lowercase();
    }

    let titled = title_segments(&value);
    if is_all_upper(&titled) {
        return titled;
    }

    let body = titled.trim_start_matches(is_separator);
    let leading = &titled[..titled.len() - body.len()];
    let words = body.trim_end_matches(is_separator);
    let trailing = &body[words.len()..];

    let mut result = String::with_capacity(titled.len());
    result.push_str(leading);
    for word in words.split(is_separator) {
        result.push_str(word);
    }
    result.push_str(trailing);
    result
}

/// Convert a PascalCase identifier to snake case (e.g., "HTTPServer" -> "http_server")
///
/// With `strip_dots`, dots are turned into underscores before splitting. An
/// all-uppercase input is treated as a single lower-case word. Doubled
/// underscores produced by the split are collapsed once.
pub fn pascal_to_snake(value: &str, strip_dots: bool) -> String {
    let mut value = if strip_dots {
        value.replace('.', "_")
    } else {
        value.to_string()
    };
    if is_all_upper(&value) {
        value = value.to_lowercase();
    }

    separate_words(&title_acronyms(&value))
        .to_lowercase()
        .replace("__", "_")
}

fn is_acronym_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

/// Title-case every run of capitals and digits that is followed by another
/// capital, a digit, or the end of input ("HTTPServer" -> "HttpServer").
///
/// The last capital before a lower-case letter stays attached to that letter.
fn title_acronyms(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        if !is_acronym_char(chars[i]) {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        let mut run_end = i;
        while run_end < chars.len() && is_acronym_char(chars[run_end]) {
            run_end += 1;
        }
        let end = if run_end == chars.len() {
            run_end
        } else {
            run_end - 1
        };

        if end == i {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        let mut after_letter = false;
        for &c in &chars[i..end] {
            if c.is_ascii_alphabetic() {
                if after_letter {
                    result.push(c.to_ascii_lowercase());
                } else {
                    result.push(c.to_ascii_uppercase());
                }
                after_letter = true;
            } else {
                result.push(c);
                after_letter = false;
            }
        }
        i = end;
    }

    result
}

/// Split before every capital letter, together with the separators leading
/// up to it, and join the non-empty pieces with underscores.
fn separate_words(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut pieces: Vec<String> = Vec::new();
    let mut last = 0;
    let mut i = 0;

    while i < chars.len() {
        let mut cap = i;
        while cap < chars.len() && is_separator(chars[cap]) {
            cap += 1;
        }
        if cap < chars.len() && chars[cap].is_ascii_uppercase() {
            let mut end = cap + 1;
            while end < chars.len() && !chars[end].is_ascii_uppercase() {
                end += 1;
            }
            pieces.push(chars[last..i].iter().collect());
            pieces.push(chars[i..end].iter().collect());
            last = end;
            i = end;
        } else {
            i += 1;
        }
    }
    pieces.push(chars[last..].iter().collect());

    pieces
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a string to camelCase (e.g., "hello_world" -> "helloWorld")
pub fn to_camel_case(s: &str) -> String {
    let pascal = snake_to_pascal(&pascal_to_snake(s, true));
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a string to kebab-case (e.g., "HelloWorld" -> "hello-world")
pub fn to_kebab_case(s: &str) -> String {
    pascal_to_snake(s, true).replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_pascal() {
        assert_eq!(snake_to_pascal("hello"), "Hello");
        assert_eq!(snake_to_pascal("hello_world"), "HelloWorld");
        assert_eq!(snake_to_pascal("token_transfer_handler"), "TokenTransferHandler");
        assert_eq!(snake_to_pascal("hello-world"), "HelloWorld");
        assert_eq!(snake_to_pascal(""), "");
    }

    #[test]
    fn test_snake_to_pascal_dots() {
        assert_eq!(snake_to_pascal("tezos.token"), "TezosToken");
        assert_eq!(snake_to_pascal("models.user_balance"), "ModelsUserBalance");
    }

    #[test]
    fn test_snake_to_pascal_all_upper() {
        // Constants are lower-cased before conversion instead of kept as-is
        assert_eq!(snake_to_pascal("ABC"), "Abc");
        assert_eq!(snake_to_pascal("FA12_TOKEN"), "Fa12Token");
    }

    #[test]
    fn test_snake_to_pascal_single_letter_words() {
        assert_eq!(snake_to_pascal("a_b"), "A_B");
        assert_eq!(snake_to_pascal("x_1"), "X_1");
        assert_eq!(snake_to_pascal("a"), "A");
        assert_eq!(snake_to_pascal("ab_c"), "AbC");
    }

    #[test]
    fn test_snake_to_pascal_separators() {
        assert_eq!(snake_to_pascal("foo__bar"), "FooBar");
        assert_eq!(snake_to_pascal("_private"), "_Private");
        assert_eq!(snake_to_pascal("trailing_"), "Trailing_");
        assert_eq!(snake_to_pascal("alreadyPascal"), "AlreadyPascal");
    }

    #[test]
    fn test_pascal_to_snake() {
        assert_eq!(pascal_to_snake("Hello", true), "hello");
        assert_eq!(pascal_to_snake("HelloWorld", true), "hello_world");
        assert_eq!(pascal_to_snake("helloWorld", true), "hello_world");
        assert_eq!(pascal_to_snake("Foo2Bar", true), "foo2_bar");
        assert_eq!(pascal_to_snake("", true), "");
    }

    #[test]
    fn test_pascal_to_snake_acronyms() {
        assert_eq!(pascal_to_snake("HTTPServer", true), "http_server");
        assert_eq!(pascal_to_snake("IOError", true), "io_error");
        assert_eq!(pascal_to_snake("fooBAR", true), "foo_bar");
    }

    #[test]
    fn test_pascal_to_snake_all_upper() {
        assert_eq!(pascal_to_snake("ABC", true), "abc");
        assert_eq!(pascal_to_snake("FA12_TOKEN", true), "fa12_token");
    }

    #[test]
    fn test_pascal_to_snake_dots() {
        assert_eq!(pascal_to_snake("Tezos.Token", true), "tezos_token");
        assert_eq!(pascal_to_snake("Tezos.Token", false), "tezos._token");
    }

    #[test]
    fn test_pascal_to_snake_collapses_double_underscores() {
        assert_eq!(pascal_to_snake("foo_Bar", true), "foo_bar");
        assert_eq!(pascal_to_snake("_Private", true), "_private");
        // A single replacement pass leaves longer runs partially collapsed
        assert_eq!(pascal_to_snake("foo___bar", true), "foo__bar");
    }

    #[test]
    fn test_round_trip_is_lossy() {
        assert_eq!(pascal_to_snake(&snake_to_pascal("foo__bar"), true), "foo_bar");
        // Single-letter words next to each other form an acronym run
        assert_eq!(pascal_to_snake(&snake_to_pascal("ab_c_d"), true), "ab_cd");
    }

    #[test]
    fn test_round_trip_single_letter_words() {
        assert_eq!(pascal_to_snake(&snake_to_pascal("a_b"), true), "a_b");
        assert_eq!(pascal_to_snake(&snake_to_pascal("x_1"), true), "x_1");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("hello_world"), "helloWorld");
        assert_eq!(to_camel_case("HelloWorld"), "helloWorld");
        assert_eq!(to_camel_case("get_user_id"), "getUserId");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("hello_world"), "hello-world");
        assert_eq!(to_kebab_case("HelloWorld"), "hello-world");
    }
}
