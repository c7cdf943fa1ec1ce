//! Top-level constants shared by the codecs and the conformance envelopes.

use std::fmt;

/// Encoding selector carried by conformance requests (`conformance.WireFormat`).
///
/// Envelopes store the raw number; numbers outside the known range fail
/// `WireFormat::try_from` so a caller can reject them explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum WireFormat {
    Unspecified = 0,
    Protobuf = 1,
    Json = 2,
    Jspb = 3,
    TextFormat = 4,
}

impl WireFormat {
    /// Short human label used in diagnostics ("Protobuf failed to parse").
    pub fn label(self) -> &'static str {
        match self {
            Self::Protobuf => "Protobuf",
            Self::Json => "JSON",
            Self::Jspb => "JSPB",
            Self::TextFormat => "Text format",
            Self::Unspecified => "Unspecified",
        }
    }

    /// The value name as written in `conformance.proto`.
    pub fn as_str_name(self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Protobuf => "PROTOBUF",
            Self::Json => "JSON",
            Self::Jspb => "JSPB",
            Self::TextFormat => "TEXT_FORMAT",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_numbers() {
        for n in 0..5 {
            assert_eq!(WireFormat::try_from(n).ok().map(i32::from), Some(n));
        }
        assert!(WireFormat::try_from(7).is_err());
        assert!(WireFormat::try_from(-1).is_err());
        assert_eq!(WireFormat::Json.to_string(), "JSON");
        assert_eq!(WireFormat::default(), WireFormat::Unspecified);
    }
}
