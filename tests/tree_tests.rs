use std::collections::HashSet;

use nbt_stream::{
    BEDROCK, JAVA, NbtDocument, NbtWriter, Number, OwnCompound, OwnList, OwnValue, ReadableCompound,
    ReadableList, ReadableValue, TagID, write_value,
};

// ============ Lenient and strict accessors ============

#[test]
fn test_strict_getters_never_widen() {
    let compound = OwnCompound::new().with("b", 7i8).with("d", 2.9f64);
    assert_eq!(compound.get_byte("b"), Some(7));
    assert_eq!(compound.get_int("b"), None);
    assert_eq!(compound.get_float("d"), None);
    assert!(compound.contains_type("b", TagID::Byte));
    assert!(!compound.contains_type("b", TagID::Int));
}

#[test]
fn test_number_accessors_convert() {
    let compound = OwnCompound::new()
        .with("b", -7i8)
        .with("d", 2.9f64)
        .with("big", 300i32)
        .with("s", "12");
    assert_eq!(compound.get_number("b").map(Number::to_i64), Some(-7));
    assert_eq!(compound.get_number("d").map(Number::to_i32), Some(2));
    assert_eq!(compound.get_number("big").map(Number::to_i8), Some(44));
    assert_eq!(compound.get_number("s"), None);
    assert!(compound.contains_number("d"));
    assert!(!compound.contains_number("s"));
    assert!(!compound.contains_number("missing"));
}

#[test]
fn test_float_to_int_saturates() {
    assert_eq!(Number::Double(1e300).to_i32(), i32::MAX);
    assert_eq!(Number::Float(f32::NAN).to_i64(), 0);
    assert_eq!(Number::Double(-1e300).to_i64(), i64::MIN);
}

// ============ Equality and hashing ============

#[test]
fn test_compound_equality_ignores_order() {
    let a = OwnCompound::new().with("x", 1i8).with("y", 2i8);
    let b = OwnCompound::new().with("y", 2i8).with("x", 1i8);
    assert_eq!(a, b);

    let set: HashSet<OwnValue> = [OwnValue::from(a), OwnValue::from(b)].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_equality_is_kind_and_bit_exact() {
    assert_ne!(OwnValue::Int(1), OwnValue::Long(1));
    assert_eq!(OwnValue::Double(f64::NAN), OwnValue::Double(f64::NAN));
    assert_ne!(OwnValue::Float(0.0), OwnValue::Float(-0.0));
    assert_ne!(OwnValue::from(vec![1i32]), OwnValue::from(OwnList::from_values([OwnValue::Int(1)]).unwrap()));
}

#[test]
fn test_compound_replace_keeps_position() {
    let mut compound = OwnCompound::new().with("a", 1i8).with("b", 2i8);
    assert_eq!(compound.insert("a", 3i8), Some(OwnValue::Byte(1)));
    assert_eq!(compound.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(compound.remove("a"), Some(OwnValue::Byte(3)));
    assert_eq!(compound.keys().collect::<Vec<_>>(), ["b"]);
}

#[test]
fn test_compound_from_iterator() {
    let compound: OwnCompound = [("a", 1i32), ("b", 2i32)].into_iter().collect();
    assert_eq!(compound.len(), 2);
    assert_eq!(compound.get_int("b"), Some(2));
}

// ============ Documents ============

#[test]
fn test_document_accessors() {
    let doc = NbtDocument::compound("c", OwnCompound::new());
    assert!(doc.as_compound().is_some());
    assert!(doc.as_list().is_none());

    let doc = NbtDocument::list("l", 5i16);
    let list = doc.as_list().unwrap();
    assert_eq!(list.item_type(), TagID::Short);
    assert_eq!(list.len(), 1);
    assert!(doc.as_compound().is_none());
}

#[test]
fn test_writing_broken_list_fails() {
    let mut list = OwnList::new();
    list.push(1i32).unwrap();
    list.push(2i32).unwrap();
    *list.get_mut(1).unwrap() = OwnValue::from("oops");
    let doc = NbtDocument::compound("", OwnCompound::new().with("l", list));
    assert!(doc.to_vec(JAVA).is_err());
}

#[test]
fn test_pretty_document() {
    let doc = NbtDocument::compound("hello world", OwnCompound::new().with("name", "Bananrama"));
    assert_eq!(
        doc.pretty().to_string(),
        "TAG_Compound('hello world'): 1 entry\n{\n  TAG_String('name'): 'Bananrama'\n}\n"
    );
}

// ============ Writing foreign trees ============

/// A minimal tree type that only knows ints, strings and string-keyed maps.
enum Json {
    Int(i32),
    Text(String),
    Array(JsonArray),
    Object(JsonObject),
}

struct JsonArray(Vec<Json>);

struct JsonObject(Vec<(String, Json)>);

impl ReadableValue for Json {
    type List = JsonArray;
    type Compound = JsonObject;

    fn tag_id(&self) -> TagID {
        match self {
            Json::Int(_) => TagID::Int,
            Json::Text(_) => TagID::String,
            Json::Array(_) => TagID::List,
            Json::Object(_) => TagID::Compound,
        }
    }

    fn number(&self) -> Option<Number> {
        match self {
            Json::Int(v) => Some(Number::Int(*v)),
            _ => None,
        }
    }

    fn string(&self) -> Option<&str> {
        match self {
            Json::Text(v) => Some(v),
            _ => None,
        }
    }

    fn byte_array(&self) -> Option<&[u8]> {
        None
    }

    fn int_array(&self) -> Option<&[i32]> {
        None
    }

    fn long_array(&self) -> Option<&[i64]> {
        None
    }

    fn list(&self) -> Option<&JsonArray> {
        match self {
            Json::Array(v) => Some(v),
            _ => None,
        }
    }

    fn compound(&self) -> Option<&JsonObject> {
        match self {
            Json::Object(v) => Some(v),
            _ => None,
        }
    }
}

impl ReadableList for JsonArray {
    type Value = Json;

    fn item_type(&self) -> TagID {
        self.0.first().map_or(TagID::End, ReadableValue::tag_id)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, index: usize) -> Option<&Json> {
        self.0.get(index)
    }

    fn iter(&self) -> impl Iterator<Item = &Json> {
        self.0.iter()
    }
}

impl ReadableCompound for JsonObject {
    type Value = Json;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, name: &str) -> Option<&Json> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Json)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[test]
fn test_write_foreign_tree() {
    let json = Json::Object(JsonObject(vec![
        ("id".into(), Json::Int(3)),
        ("tags".into(), Json::Array(JsonArray(vec![Json::Text("a".into()), Json::Text("b".into())]))),
        ("empty".into(), Json::Array(JsonArray(vec![]))),
    ]));

    let mut writer = NbtWriter::new(BEDROCK, Vec::new());
    writer.name("").unwrap();
    write_value(&mut writer, &json).unwrap();
    let bytes = writer.finish().unwrap();

    let mut tags = OwnList::new();
    tags.push("a").unwrap();
    tags.push("b").unwrap();
    let expected = NbtDocument::compound(
        "",
        OwnCompound::new()
            .with("id", 3i32)
            .with("tags", tags)
            .with("empty", OwnList::new()),
    );
    assert_eq!(NbtDocument::from_slice(BEDROCK, &bytes).unwrap(), expected);
    assert_eq!(json.compound().map(ReadableCompound::len), Some(3));
}
