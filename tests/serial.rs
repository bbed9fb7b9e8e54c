use serde::{Deserialize, Serialize};

use duraq::{serializer_for, Payload, SerializationFormat, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entity {
    id: u32,
    name: String,
    tags: Vec<String>,
}

fn entity() -> Entity {
    Entity {
        id: 7,
        name: "seven".into(),
        tags: vec!["odd".into(), "prime".into()],
    }
}

#[test]
fn json_round_trip() {
    let serializer = serializer_for::<Entity>(SerializationFormat::Json);

    let payload = serializer.try_serialize(&entity()).expect("serializable");
    assert!(matches!(payload, Payload::Text(_)));

    let decoded = serializer.try_deserialize(&payload).expect("decodable");
    assert_eq!(decoded, entity());
}

#[test]
fn binary_round_trip() {
    let serializer = serializer_for::<Entity>(SerializationFormat::Binary);

    let payload = serializer.try_serialize(&entity()).expect("serializable");
    assert!(matches!(payload, Payload::Blob(_)));

    let decoded = serializer.try_deserialize(&payload).expect("decodable");
    assert_eq!(decoded, entity());
}

#[test]
fn json_serialize_failure_reports_none() {
    let serializer = serializer_for::<f64>(SerializationFormat::Json);

    assert!(serializer.try_serialize(&f64::NAN).is_none());
}

#[test]
fn json_deserialize_garbage_reports_none() {
    let serializer = serializer_for::<Entity>(SerializationFormat::Json);

    let garbage = Payload::Text("not json".into());
    assert!(serializer.try_deserialize(&garbage).is_none());
}

#[test]
fn mismatched_payload_kind_reports_none() {
    let json = serializer_for::<Entity>(SerializationFormat::Json);
    let binary = serializer_for::<Entity>(SerializationFormat::Binary);

    let blob = binary.try_serialize(&entity()).expect("serializable");
    let text = json.try_serialize(&entity()).expect("serializable");

    assert!(json.try_deserialize(&blob).is_none());
    assert!(binary.try_deserialize(&text).is_none());
}

#[test]
fn payload_len_reports_byte_size() {
    assert_eq!(Payload::Text("abcd".into()).len(), 4);
    assert_eq!(Payload::Blob(vec![0; 16]).len(), 16);
    assert!(Payload::Text(String::new()).is_empty());
}
