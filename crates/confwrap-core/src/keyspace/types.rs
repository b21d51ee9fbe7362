use std::fmt;

/// One step of a native path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member, section, subkey or value name.
    Name(String),
    /// Array position. Dropped during normalization.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Root-to-leaf path in a store's own addressing scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NativePath {
    segments: Vec<Segment>,
}

impl NativePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path made of plain names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: names
                .into_iter()
                .map(|name| Segment::Name(name.into()))
                .collect(),
        }
    }

    /// Returns a copy of this path extended by one segment.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<Segment> for NativePath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// How a store compares keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    #[default]
    Sensitive,
    /// ASCII case-insensitive comparison. Enumeration still reports stored case.
    Insensitive,
}
