#![cfg(feature = "serde")]

use std::collections::BTreeMap;

use nbt_stream::{
    BEDROCK, BEDROCK_NETWORK, Error, JAVA, NbtDocument, NbtWriter, OwnCompound, OwnList, OwnValue,
    Serializer, TagID, to_vec, to_writer,
};
use serde::Serialize;

// Simple wrapper for serializing bytes
#[derive(Serialize)]
struct ByteVec(#[serde(with = "serde_bytes_impl")] Vec<u8>);

mod serde_bytes_impl {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(data)
    }
}

fn root(bytes: &[u8]) -> OwnCompound {
    match NbtDocument::from_slice(JAVA, bytes).unwrap().as_compound() {
        Some(compound) => compound.clone(),
        None => panic!("root is not a compound"),
    }
}

#[derive(Serialize)]
struct Item {
    id: String,
    count: i8,
}

#[derive(Serialize)]
struct Player {
    name: String,
    health: f32,
    alive: bool,
    xp: u32,
    inventory: Vec<Item>,
    #[serde(serialize_with = "nbt_stream::ser::int_array")]
    position: Vec<i32>,
    #[serde(serialize_with = "nbt_stream::ser::long_array")]
    seen: Vec<i64>,
    skin: ByteVec,
    nick: Option<String>,
    title: Option<String>,
}

fn player() -> Player {
    Player {
        name: "Steve".into(),
        health: 20.0,
        alive: true,
        xp: u32::MAX,
        inventory: vec![
            Item {
                id: "minecraft:stone".into(),
                count: 64,
            },
            Item {
                id: "minecraft:dirt".into(),
                count: 1,
            },
        ],
        position: vec![0, 64, -12],
        seen: vec![],
        skin: ByteVec(vec![1, 2, 3]),
        nick: None,
        title: Some("Builder".into()),
    }
}

#[test]
fn test_struct_to_compound() {
    let root = root(&to_vec(JAVA, &player()).unwrap());
    assert_eq!(root.get_string("name"), Some("Steve"));
    assert_eq!(root.get_float("health"), Some(20.0));
    assert_eq!(root.get_bool("alive"), Some(true));
    assert_eq!(root.get_int("xp"), Some(-1));
    assert_eq!(root.get_int_array("position"), Some(&[0, 64, -12][..]));
    assert_eq!(root.get_long_array("seen"), Some(&[][..]));
    assert_eq!(root.get_byte_array("skin"), Some(&[1, 2, 3][..]));
    assert!(!root.contains("nick"));
    assert_eq!(root.get_string("title"), Some("Builder"));

    let inventory = root.get_list("inventory").unwrap();
    assert_eq!(inventory.item_type(), TagID::Compound);
    assert_eq!(inventory.len(), 2);
    let first = inventory.get(0).unwrap().as_compound().unwrap();
    assert_eq!(first.get_byte("count"), Some(64));

    let keys: Vec<_> = root.keys().collect();
    assert_eq!(
        keys,
        ["name", "health", "alive", "xp", "inventory", "position", "seen", "skin", "title"]
    );
}

#[test]
fn test_matches_tree_writer() {
    let tree = NbtDocument::compound(
        "",
        OwnCompound::new()
            .with("a", 1i32)
            .with("b", vec![1i64, 2])
            .with("c", "x"),
    );

    #[derive(Serialize)]
    struct Same {
        a: i32,
        #[serde(serialize_with = "nbt_stream::ser::long_array")]
        b: Vec<i64>,
        c: &'static str,
    }

    let value = Same {
        a: 1,
        b: vec![1, 2],
        c: "x",
    };
    for preset in [nbt_stream::Preset::Java, nbt_stream::Preset::Bedrock] {
        assert_eq!(to_vec(preset, &value).unwrap(), tree.to_vec(preset).unwrap());
    }
    assert_eq!(
        to_vec(BEDROCK_NETWORK, &value).unwrap(),
        tree.to_vec(BEDROCK_NETWORK).unwrap()
    );
}

#[test]
fn test_own_value_serializes_as_itself() {
    let mut list = OwnList::new();
    list.push(OwnCompound::new().with("k", 1.5f64)).unwrap();
    let compound = OwnCompound::new()
        .with("bytes", vec![9u8])
        .with("ints", vec![1i32, 2])
        .with("longs", vec![3i64])
        .with("list", list)
        .with("text", "t");
    let doc = NbtDocument::compound("", compound.clone());
    assert_eq!(to_vec(BEDROCK, &compound).unwrap(), doc.to_vec(BEDROCK).unwrap());
}

#[test]
fn test_map_keys_must_be_strings() {
    let mut ok = BTreeMap::new();
    ok.insert("x", 1i16);
    assert_eq!(root(&to_vec(JAVA, &ok).unwrap()).get_short("x"), Some(1));

    let mut bad = BTreeMap::new();
    bad.insert(1i32, 1i16);
    assert!(matches!(to_vec(JAVA, &bad), Err(Error::KeyMustBeString)));
}

#[derive(Serialize)]
enum Shape {
    Empty,
    Circle(f32),
    Line(i32, i32),
    Rect { w: i16, h: i16 },
}

#[test]
fn test_enum_variants() {
    #[derive(Serialize)]
    struct Shapes {
        a: Shape,
        b: Shape,
        c: Shape,
        d: Shape,
    }

    let bytes = to_vec(
        JAVA,
        &Shapes {
            a: Shape::Empty,
            b: Shape::Circle(0.5),
            c: Shape::Line(1, 2),
            d: Shape::Rect { w: 3, h: 4 },
        },
    )
    .unwrap();
    let root = root(&bytes);
    assert_eq!(root.get_string("a"), Some("Empty"));
    assert_eq!(root.get_compound("b").unwrap().get_float("Circle"), Some(0.5));
    let line = root.get_compound("c").unwrap().get_list("Line").unwrap();
    assert_eq!(line.as_slice(), [OwnValue::Int(1), OwnValue::Int(2)]);
    let rect = root.get_compound("d").unwrap().get_compound("Rect").unwrap();
    assert_eq!(rect.get_short("w"), Some(3));
    assert_eq!(rect.get_short("h"), Some(4));
}

#[test]
fn test_unit_and_chars() {
    #[derive(Serialize)]
    struct Marker;

    #[derive(Serialize)]
    struct Misc {
        marker: Marker,
        unit: (),
        letter: char,
        pair: (i8, i8),
    }

    let root = root(
        &to_vec(
            JAVA,
            &Misc {
                marker: Marker,
                unit: (),
                letter: 'é',
                pair: (1, 2),
            },
        )
        .unwrap(),
    );
    assert!(root.get_compound("marker").unwrap().is_empty());
    assert!(root.get_compound("unit").unwrap().is_empty());
    assert_eq!(root.get_string("letter"), Some("é"));
    assert_eq!(root.get_list("pair").unwrap().len(), 2);
}

#[test]
fn test_heterogeneous_sequence_fails() {
    #[derive(Serialize)]
    #[serde(untagged)]
    enum Either {
        Int(i32),
        Text(String),
    }

    let value = BTreeMap::from([("l", vec![Either::Int(1), Either::Text("x".into())])]);
    assert!(matches!(
        to_vec(JAVA, &value),
        Err(Error::TagMismatch {
            expected: TagID::Int,
            actual: TagID::String
        })
    ));
}

#[test]
fn test_root_must_be_container() {
    assert!(matches!(to_vec(JAVA, &5i32), Err(Error::InvalidRoot(TagID::Int))));
    assert!(matches!(to_vec(JAVA, &"x"), Err(Error::InvalidRoot(TagID::String))));
}

#[test]
fn test_single_element_sequence_is_root_list() {
    let bytes = to_vec(BEDROCK, &[7i32]).unwrap();
    assert_eq!(bytes, [0x09, 0x00, 0x00, 0x03, 0x07, 0x00, 0x00, 0x00]);
    assert!(matches!(to_vec(BEDROCK, &[1i32, 2]), Err(Error::RootListLength(2))));
}

#[test]
fn test_serializer_inside_stream() {
    #[derive(Serialize)]
    struct Pos {
        x: i32,
        z: i32,
    }

    let mut writer = NbtWriter::new(JAVA, Vec::new());
    writer.name("").unwrap();
    writer.begin_compound().unwrap();
    writer.name("spawn").unwrap();
    Pos { x: 1, z: -1 }.serialize(Serializer::new(&mut writer)).unwrap();
    writer.name("done").unwrap();
    writer.bool(true).unwrap();
    writer.end_compound().unwrap();
    let root = root(&writer.finish().unwrap());
    assert_eq!(root.get_compound("spawn").unwrap().get_int("z"), Some(-1));
    assert_eq!(root.get_bool("done"), Some(true));
}

#[test]
fn test_to_writer_returns_sink() {
    let sink = to_writer(JAVA, Vec::with_capacity(64), &BTreeMap::<String, i8>::new()).unwrap();
    assert_eq!(sink, [0x0A, 0x00, 0x00, 0x00]);
}
