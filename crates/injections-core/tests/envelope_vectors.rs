//! Envelope vector tests (both directions).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use injections_core::protocol::{InboundEnvelope, MessageType, RawEnvelope, RequestEnvelope};
use injections_core::InjectionError;

use vector_loader::load;

#[test]
fn request_vectors() {
    let files = [
        "request_send_payment.json",
        "request_enable_no_data.json",
        "request_foreign_type.json",
        "request_not_json.json",
    ];

    for f in files {
        let v = load(f);

        if let Some(err) = v.expect_error {
            let e: InjectionError = serde_json::from_str::<RequestEnvelope>(&v.raw)
                .expect_err("expected parse failure")
                .into();
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            assert!(RawEnvelope::parse(&v.raw).is_none(), "vector={}", v.description);
            continue;
        }

        let ex = v.expect.expect("missing expect block");
        let raw = RawEnvelope::parse(&v.raw).expect("raw envelope must parse");

        if !ex["known"].as_bool().unwrap() {
            assert!(raw.known_type().is_none(), "vector={}", v.description);
            continue;
        }

        let ty = raw.known_type().expect("known type");
        assert_eq!(ty.as_str(), ex["type"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(raw.id, ex["id"].as_u64(), "vector={}", v.description);
        assert_eq!(raw.data, ex["data"], "vector={}", v.description);

        // Strict typed parse agrees with the loose one.
        let env: RequestEnvelope = serde_json::from_str(&v.raw).unwrap();
        assert_eq!(env.msg_type, ty, "vector={}", v.description);
    }
}

#[test]
fn response_vectors() {
    for f in ["response_signed_event.json", "response_error.json"] {
        let v = load(f);
        let ex = v.expect.expect("missing expect block");
        let env: InboundEnvelope = serde_json::from_str(&v.raw).unwrap();

        assert_eq!(env.id(), ex["id"].as_u64().unwrap(), "vector={}", v.description);
        assert_eq!(
            env.msg_type(),
            MessageType::parse(ex["type"].as_str().unwrap()).unwrap(),
            "vector={}",
            v.description
        );

        match (ex["outcome"].as_str().unwrap(), env) {
            ("response", InboundEnvelope::Response(r)) => {
                assert!(r.data.is_object(), "vector={}", v.description);
            }
            ("error", InboundEnvelope::Error(e)) => {
                assert_eq!(e.error.message, ex["message"].as_str().unwrap(), "vector={}", v.description);
            }
            (want, got) => panic!("vector={}: wanted {want}, got {got:?}", v.description),
        }
    }
}
