//! Decode/re-encode round trip for one request.

use proto_conformance_pack::codecs::Codecs;
use proto_conformance_pack::{SchemaRegistry, WireFormat};

use crate::request::ConformanceRequest;

/// Result of running one request. Every variant maps to exactly one
/// response field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The re-encoded payload in the requested format.
    Success { bytes: Vec<u8>, format: WireFormat },
    ParseFailure(String),
    SerializeFailure(String),
    /// The request needs an encoding or message type this testee lacks.
    Skipped(String),
    /// The request violates the protocol contract.
    Unsupported(String),
}

#[derive(Debug)]
pub struct RoundTripEngine {
    registry: SchemaRegistry,
    codecs: Codecs,
}

impl RoundTripEngine {
    pub fn new(registry: SchemaRegistry, codecs: Codecs) -> Self {
        Self { registry, codecs }
    }

    pub fn run(&mut self, request: &ConformanceRequest) -> Outcome {
        let Some(descriptor) = self.registry.resolve(&request.message_type) else {
            let reason = format!("unsupported message type: {}", request.message_type);
            return Outcome::Skipped(reason);
        };
        let Some(payload) = &request.payload else {
            return Outcome::Unsupported("request has no payload".to_owned());
        };

        self.codecs.json.options.ignore_unknown_fields = request.is_ignore_unknown_test();

        let input = payload.format();
        let Some(decoder) = self.codecs.codec_mut(input) else {
            return Outcome::Skipped(format!("{} input is not supported", input.label()));
        };
        let message = match decoder.decode(&descriptor, payload.as_bytes()) {
            Ok(message) => message,
            Err(err) => {
                return Outcome::ParseFailure(format!("{} failed to parse: {err}", input.label()))
            }
        };

        let Ok(format) = WireFormat::try_from(request.requested_output_format) else {
            let number = request.requested_output_format;
            return Outcome::Unsupported(format!("unsupported output format: {number}"));
        };
        let Some(encoder) = self.codecs.codec_mut(format) else {
            return match format {
                WireFormat::Jspb | WireFormat::TextFormat => {
                    Outcome::Skipped(format!("{} output is not supported", format.label()))
                }
                _ => Outcome::Unsupported(format!("unsupported output format: {format}")),
            };
        };
        match encoder.encode(&message) {
            Ok(bytes) => Outcome::Success { bytes, format },
            Err(err) => Outcome::SerializeFailure(format!("Failed to serialize: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Payload, TestCategory};

    fn engine() -> RoundTripEngine {
        RoundTripEngine::new(SchemaRegistry::with_test_messages().unwrap(), Codecs::new())
    }

    fn request(payload: Payload, format: WireFormat) -> ConformanceRequest {
        ConformanceRequest::with_payload(payload, format)
    }

    #[test]
    fn binary_to_json() {
        let outcome = engine().run(&request(Payload::Protobuf(vec![0x08, 0x01]), WireFormat::Json));
        assert_eq!(
            outcome,
            Outcome::Success {
                bytes: br#"{"optionalInt32":1}"#.to_vec(),
                format: WireFormat::Json,
            }
        );
    }

    #[test]
    fn json_to_binary() {
        let json = Payload::Json(r#"{"optionalInt32":1}"#.into());
        let outcome = engine().run(&request(json, WireFormat::Protobuf));
        assert_eq!(
            outcome,
            Outcome::Success {
                bytes: vec![0x08, 0x01],
                format: WireFormat::Protobuf,
            }
        );
    }

    #[test]
    fn parse_failures_name_the_input_format() {
        let mut engine = engine();
        let garbage = Payload::Protobuf(vec![0xff, 0xff, 0xff]);
        let Outcome::ParseFailure(reason) = engine.run(&request(garbage, WireFormat::Protobuf))
        else {
            panic!("expected a parse failure");
        };
        assert!(reason.starts_with("Protobuf failed to parse: "), "{reason}");

        let Outcome::ParseFailure(reason) =
            engine.run(&request(Payload::Json("{".into()), WireFormat::Json))
        else {
            panic!("expected a parse failure");
        };
        assert!(reason.starts_with("JSON failed to parse: "), "{reason}");
    }

    #[test]
    fn ignore_unknown_category_applies_per_request() {
        let mut engine = engine();
        let mut lenient = request(Payload::Json(r#"{"unknownField":1}"#.into()), WireFormat::Json);
        lenient.set_test_category(TestCategory::JsonIgnoreUnknownParsing);
        assert!(matches!(engine.run(&lenient), Outcome::Success { .. }));

        lenient.set_test_category(TestCategory::Json);
        assert!(matches!(engine.run(&lenient), Outcome::ParseFailure(_)));
    }

    #[test]
    fn contract_violations_are_unsupported() {
        let mut engine = engine();
        assert_eq!(
            engine.run(&ConformanceRequest::default()),
            Outcome::Unsupported("request has no payload".into())
        );
        assert_eq!(
            engine.run(&request(Payload::Protobuf(vec![]), WireFormat::Unspecified)),
            Outcome::Unsupported("unsupported output format: UNSPECIFIED".into())
        );
        let mut unknown = request(Payload::Protobuf(vec![]), WireFormat::Protobuf);
        unknown.requested_output_format = 7;
        assert_eq!(
            engine.run(&unknown),
            Outcome::Unsupported("unsupported output format: 7".into())
        );
    }

    #[test]
    fn unimplemented_encodings_are_skipped() {
        let mut engine = engine();
        assert!(matches!(
            engine.run(&request(Payload::Jspb("[]".into()), WireFormat::Protobuf)),
            Outcome::Skipped(_)
        ));
        assert!(matches!(
            engine.run(&request(Payload::Protobuf(vec![]), WireFormat::TextFormat)),
            Outcome::Skipped(_)
        ));
        let mut other = request(Payload::Protobuf(vec![]), WireFormat::Protobuf);
        other.message_type = "protobuf_test_messages.proto2.TestAllTypesProto2".into();
        assert_eq!(
            engine.run(&other),
            Outcome::Skipped(
                "unsupported message type: protobuf_test_messages.proto2.TestAllTypesProto2".into()
            )
        );
    }
}
