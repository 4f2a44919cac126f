//! Name-casing helpers exposed to file templates as Tera filters.
//!
//! `snake_case` and `kebab_case` split before every uppercase letter, so a run
//! of capitals is not collapsed: `APIKey` becomes `a_p_i_key`. Templates rely on
//! this exact output.

use std::collections::HashMap;

use tera::{try_get_value, Tera, Value};

/// Uppercase the first letter of each word and leave the rest untouched.
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

pub fn snake_case(s: &str) -> String {
    separate_on_uppercase(s, '_', '-')
}

pub fn kebab_case(s: &str) -> String {
    separate_on_uppercase(s, '-', '_')
}

fn separate_on_uppercase(s: &str, sep: char, other: char) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push(sep);
            }
            out.extend(c.to_lowercase());
        } else if c == other {
            out.push(sep);
        } else {
            out.push(c);
        }
    }
    out
}

pub fn camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| {
            if i == 0 {
                w.to_lowercase()
            } else {
                title(&w.to_lowercase())
            }
        })
        .collect()
}

pub fn pascal_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| title(&w.to_lowercase()))
        .collect()
}

/// `my-api.v2` → `MY_API_V2`
pub fn env_prefix(s: &str) -> String {
    s.replace(['-', '.'], "_").to_uppercase()
}

/// Split on `-`, `_` and where an uppercase letter follows a non-uppercase one.
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_upper = false;
    for c in s.chars() {
        if c == '-' || c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_upper = false;
            continue;
        }
        let upper = c.is_uppercase();
        if upper && !prev_upper && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev_upper = upper;
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn string_arg(name: &str, args: &HashMap<String, Value>, key: &str) -> tera::Result<String> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(tera::Error::msg(format!(
            "Filter `{name}` expected `{key}` to be a string, got {other}"
        ))),
        None => Err(tera::Error::msg(format!(
            "Filter `{name}` requires a `{key}` argument"
        ))),
    }
}

macro_rules! string_filter {
    ($filter:literal, $func:expr) => {
        |value: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
            let s = try_get_value!($filter, "value", String, value);
            Ok(Value::String($func(&s)))
        }
    };
}

/// Register the casing library on a Tera instance.
///
/// `upper`, `lower` and `replace` are Tera built-ins and keep their semantics.
pub fn register(tera: &mut Tera) {
    tera.register_filter("title", string_filter!("title", title));
    tera.register_filter("snake_case", string_filter!("snake_case", snake_case));
    tera.register_filter("kebab_case", string_filter!("kebab_case", kebab_case));
    tera.register_filter("camel_case", string_filter!("camel_case", camel_case));
    tera.register_filter("pascal_case", string_filter!("pascal_case", pascal_case));
    tera.register_filter("env_prefix", string_filter!("env_prefix", env_prefix));

    tera.register_filter(
        "contains",
        |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
            let s = try_get_value!("contains", "value", String, value);
            let needle = string_arg("contains", args, "substr")?;
            Ok(Value::Bool(s.contains(&needle)))
        },
    );
    tera.register_filter(
        "has_prefix",
        |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
            let s = try_get_value!("has_prefix", "value", String, value);
            let prefix = string_arg("has_prefix", args, "prefix")?;
            Ok(Value::Bool(s.starts_with(&prefix)))
        },
    );
    tera.register_filter(
        "has_suffix",
        |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
            let s = try_get_value!("has_suffix", "value", String, value);
            let suffix = string_arg("has_suffix", args, "suffix")?;
            Ok(Value::Bool(s.ends_with(&suffix)))
        },
    );
    tera.register_filter(
        "trim_prefix",
        |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
            let s = try_get_value!("trim_prefix", "value", String, value);
            let prefix = string_arg("trim_prefix", args, "prefix")?;
            Ok(Value::String(
                s.strip_prefix(prefix.as_str()).unwrap_or(&s).to_string(),
            ))
        },
    );
    tera.register_filter(
        "trim_suffix",
        |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
            let s = try_get_value!("trim_suffix", "value", String, value);
            let suffix = string_arg("trim_suffix", args, "suffix")?;
            Ok(Value::String(
                s.strip_suffix(suffix.as_str()).unwrap_or(&s).to_string(),
            ))
        },
    );
}
