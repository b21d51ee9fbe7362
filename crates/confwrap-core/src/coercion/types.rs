use std::fmt;

/// The representation a store hands back for a leaf, before coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A single stored string (INI values, map entries, document scalars).
    Text(String),
    /// An already structured sequence (document arrays, multi-string hive values).
    List(Vec<String>),
}

impl RawValue {
    /// Returns the text when this is a single value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            RawValue::List(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RawValue::List(_))
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        RawValue::List(items)
    }
}

/// What to do when a present value does not convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    /// Substitute the caller's default.
    #[default]
    Lenient,
    /// Report a [`CoercionError`](super::CoercionError).
    Strict,
}

impl CoercionPolicy {
    pub fn is_strict(self) -> bool {
        matches!(self, CoercionPolicy::Strict)
    }
}

impl From<bool> for CoercionPolicy {
    /// `true` selects strict mode.
    fn from(strict: bool) -> Self {
        if strict {
            CoercionPolicy::Strict
        } else {
            CoercionPolicy::Lenient
        }
    }
}

/// Closed set of target kinds the engine dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Integer,
    Float,
    Boolean,
    Character,
    Text,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Integer => "integer",
            TargetKind::Float => "float",
            TargetKind::Boolean => "boolean",
            TargetKind::Character => "character",
            TargetKind::Text => "text",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type a stored string can be coerced into.
///
/// The crate implements this for the primitive integers, floats, `bool`,
/// `char` and `String`. Applications can implement it for their own scalar
/// types (a fixed-point decimal, a duration) to read them through the same
/// resolver surface.
pub trait Coerce: Sized {
    /// Kind tag used for dispatch and diagnostics.
    const KIND: TargetKind;

    /// Type name reported in coercion errors.
    const TYPE_NAME: &'static str;

    /// Converts one stored string, or returns `None` when it does not parse.
    fn from_text(text: &str) -> Option<Self>;
}

macro_rules! impl_coerce_numeric {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Coerce for $ty {
                const KIND: TargetKind = $kind;
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_text(text: &str) -> Option<Self> {
                    text.trim().parse::<$ty>().ok()
                }
            }
        )+
    };
}

impl_coerce_numeric!(TargetKind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_coerce_numeric!(TargetKind::Float => f32, f64);

impl Coerce for bool {
    const KIND: TargetKind = TargetKind::Boolean;
    const TYPE_NAME: &'static str = "bool";

    fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl Coerce for char {
    const KIND: TargetKind = TargetKind::Character;
    const TYPE_NAME: &'static str = "char";

    fn from_text(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Coerce for String {
    const KIND: TargetKind = TargetKind::Text;
    const TYPE_NAME: &'static str = "String";

    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}
