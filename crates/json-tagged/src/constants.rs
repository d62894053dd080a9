//! Wire-format constants. Renaming any of these breaks existing payloads.

/// Field holding the tag name of a tagged record.
pub const TAG_KEY: &str = "__t";

/// Field holding the payload of a tagged record.
pub const PAYLOAD_KEY: &str = "__v";

/// Tags understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Date,
    Buffer,
    Set,
    Map,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Date, Tag::Buffer, Tag::Set, Tag::Map];

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Date => "Date",
            Tag::Buffer => "Buffer",
            Tag::Set => "Set",
            Tag::Map => "Map",
        }
    }

    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|tag| tag.as_str() == name)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
