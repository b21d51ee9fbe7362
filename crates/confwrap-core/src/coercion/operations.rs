use super::errors::CoercionError;
use super::types::{Coerce, CoercionPolicy, RawValue, TargetKind};

/// Converts a present value to `T`.
///
/// # Errors
///
/// Returns [`CoercionError`] when the text does not parse as `T`. A
/// [`RawValue::List`] never converts to a scalar.
pub fn convert<T: Coerce>(raw: &RawValue) -> Result<T, CoercionError> {
    raw.as_text()
        .and_then(T::from_text)
        .ok_or_else(|| CoercionError::new(raw.to_string(), T::TYPE_NAME))
}

/// Converts a present value to `Vec<T>`.
///
/// Text is split on any of `separators` with empty segments discarded, so
/// `","` yields an empty list and `"1,2,3,,"` yields three elements. An empty
/// separator set keeps the whole text as a single segment. A
/// [`RawValue::List`] is converted element by element and `separators` is
/// ignored.
///
/// # Errors
///
/// Returns [`CoercionError`] naming the first element that does not parse.
pub fn convert_list<T: Coerce>(
    raw: &RawValue,
    separators: &[char],
) -> Result<Vec<T>, CoercionError> {
    let converted = match raw {
        RawValue::Text(text) => convert_each(split_segments(text, separators)),
        RawValue::List(items) => convert_each(items.iter().map(String::as_str)),
    };
    converted.map_err(|bad_segment| CoercionError::new(bad_segment, T::TYPE_NAME))
}

/// Casts a raw value to `T`.
///
/// Absent values yield `default` under either policy.
///
/// # Errors
///
/// Returns [`CoercionError`] only under [`CoercionPolicy::Strict`], when the
/// value is present but does not convert.
pub fn cast<T: Coerce>(
    raw: Option<&RawValue>,
    default: T,
    policy: CoercionPolicy,
) -> Result<T, CoercionError> {
    match raw {
        None => Ok(default),
        Some(raw) => convert(raw).or_else(|error| reject(error, T::KIND, default, policy)),
    }
}

/// Casts a raw value to `Vec<T>`, all or nothing.
///
/// Absent values yield `default` under either policy. See [`convert_list`] for
/// how text is split.
///
/// # Errors
///
/// Returns [`CoercionError`] naming the first bad element under
/// [`CoercionPolicy::Strict`]. Under lenient policy any bad element yields the
/// whole `default`.
pub fn cast_list<T: Coerce>(
    raw: Option<&RawValue>,
    default: Vec<T>,
    separators: &[char],
    policy: CoercionPolicy,
) -> Result<Vec<T>, CoercionError> {
    match raw {
        None => Ok(default),
        Some(raw) => convert_list(raw, separators)
            .or_else(|error| reject(error, T::KIND, default, policy)),
    }
}

/// Splits `text` on any of `separators`, dropping empty segments.
pub fn split_segments<'a>(text: &'a str, separators: &'a [char]) -> impl Iterator<Item = &'a str> {
    text.split(move |c: char| separators.contains(&c))
        .filter(|segment| !segment.is_empty())
}

/// Converts every segment, stopping at the first one that fails.
fn convert_each<'a, T: Coerce>(segments: impl Iterator<Item = &'a str>) -> Result<Vec<T>, String> {
    segments
        .map(|segment| T::from_text(segment).ok_or_else(|| segment.to_string()))
        .collect()
}

fn reject<D>(
    error: CoercionError,
    kind: TargetKind,
    default: D,
    policy: CoercionPolicy,
) -> Result<D, CoercionError> {
    if policy.is_strict() {
        return Err(error);
    }

    tracing::warn!(
        event = "core.coercion.defaulted",
        raw = %error.raw,
        type_name = error.type_name,
        kind = %kind,
        "Value did not convert, substituting default"
    );
    Ok(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> RawValue {
        RawValue::from(value)
    }

    fn list(values: &[&str]) -> RawValue {
        RawValue::from(values.iter().map(|v| v.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_cast_absent_returns_default_even_when_strict() {
        assert_eq!(cast::<i32>(None, 999, CoercionPolicy::Strict).unwrap(), 999);
        assert_eq!(
            cast::<String>(None, "foo".to_string(), CoercionPolicy::Lenient).unwrap(),
            "foo"
        );
    }

    #[test]
    fn test_cast_converts_present_values() {
        assert_eq!(cast(Some(&text("999")), 100, CoercionPolicy::Lenient).unwrap(), 999);
        assert_eq!(
            cast(Some(&text("1.09")), 1.99_f64, CoercionPolicy::Lenient).unwrap(),
            1.09
        );
        assert_eq!(
            cast(Some(&text("bar")), "foo".to_string(), CoercionPolicy::Lenient).unwrap(),
            "bar"
        );
        assert!(cast(Some(&text("true")), false, CoercionPolicy::Strict).unwrap());
    }

    #[test]
    fn test_cast_lenient_mismatch_returns_default() {
        assert_eq!(cast(Some(&text("chicken")), 17, CoercionPolicy::Lenient).unwrap(), 17);
    }

    #[test]
    fn test_cast_strict_mismatch_names_value_and_type() {
        let error = cast(Some(&text("chicken")), 78.0_f64, CoercionPolicy::Strict).unwrap_err();
        assert_eq!(error.raw, "chicken");
        assert_eq!(error.type_name, "f64");
        assert!(error.to_string().starts_with("Cannot cast 'chicken'"));
    }

    #[test]
    fn test_cast_list_value_to_scalar_fails() {
        let raw = list(&["1", "2"]);
        assert_eq!(cast(Some(&raw), 5, CoercionPolicy::Lenient).unwrap(), 5);
        let error = cast(Some(&raw), 5, CoercionPolicy::Strict).unwrap_err();
        assert_eq!(error.raw, "[1, 2]");
    }

    #[test]
    fn test_cast_list_discards_empty_segments() {
        let values: Vec<i32> =
            cast_list(Some(&text("1,2,3,,")), vec![], &[','], CoercionPolicy::Strict).unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        let values: Vec<i32> =
            cast_list(Some(&text(",")), vec![9], &[','], CoercionPolicy::Strict).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_cast_list_any_separator() {
        let values: Vec<String> = cast_list(
            Some(&text("spam|spam,baked beans|spam")),
            vec![],
            &[',', '|'],
            CoercionPolicy::Strict,
        )
        .unwrap();
        assert_eq!(values, vec!["spam", "spam", "baked beans", "spam"]);
    }

    #[test]
    fn test_cast_list_absent_returns_default() {
        let values = cast_list(None, vec![1.99, 1.89], &[','], CoercionPolicy::Strict).unwrap();
        assert_eq!(values, vec![1.99, 1.89]);
    }

    #[test]
    fn test_cast_list_bad_element_returns_whole_default() {
        let values =
            cast_list(Some(&text("1,x,3")), vec![7, 8], &[','], CoercionPolicy::Lenient).unwrap();
        assert_eq!(values, vec![7, 8]);
    }

    #[test]
    fn test_cast_list_strict_names_first_bad_segment() {
        let error = cast_list::<i32>(Some(&text("1,x,y")), vec![], &[','], CoercionPolicy::Strict)
            .unwrap_err();
        assert_eq!(error.raw, "x");
        assert_eq!(error.type_name, "i32");
    }

    #[test]
    fn test_cast_list_structured_ignores_separators() {
        let raw = list(&["1.99", "1.89"]);
        let values: Vec<f64> =
            cast_list(Some(&raw), vec![], &[','], CoercionPolicy::Strict).unwrap();
        assert_eq!(values, vec![1.99, 1.89]);

        let raw = list(&["a,b", "c"]);
        let values: Vec<String> =
            cast_list(Some(&raw), vec![], &[','], CoercionPolicy::Strict).unwrap();
        assert_eq!(values, vec!["a,b", "c"]);
    }

    #[test]
    fn test_split_without_separators_keeps_whole_text() {
        let segments: Vec<&str> = split_segments("a,b", &[]).collect();
        assert_eq!(segments, vec!["a,b"]);
        assert_eq!(split_segments("", &[]).count(), 0);
    }

    #[test]
    fn test_convert_present_values() {
        assert_eq!(convert::<u16>(&text(" 8080 ")).unwrap(), 8080);
        assert_eq!(convert::<char>(&text("x")).unwrap(), 'x');

        let error = convert::<i64>(&text("1234.5")).unwrap_err();
        assert_eq!(error.to_string(), "Cannot cast '1234.5' to type i64.");
    }

    #[test]
    fn test_convert_list_of_booleans() {
        let values: Vec<bool> = convert_list(&text("true; FALSE ;True"), &[';']).unwrap();
        assert_eq!(values, vec![true, false, true]);
    }
}
