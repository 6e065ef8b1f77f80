use nbt_stream::{OwnCompound, OwnList, OwnValue};

fn value() -> OwnValue {
    let mut list = OwnList::new();
    list.push(OwnCompound::new().with("name", "first")).unwrap();
    list.push(OwnCompound::new().with("name", "second")).unwrap();
    OwnCompound::new()
        .with("list", list)
        .with("n", 5i32)
        .into()
}

#[test]
fn test_index_by_key_and_position() {
    let value = value();
    let name = value
        .get("list")
        .and_then(|list| list.get(1))
        .and_then(|entry| entry.get("name"))
        .and_then(OwnValue::as_string);
    assert_eq!(name, Some("second"));

    let key = String::from("n");
    assert_eq!(value.get(&key).and_then(OwnValue::as_int), Some(5));
    assert_eq!(value.get(key).and_then(OwnValue::as_int), Some(5));
}

#[test]
fn test_index_wrong_kind_is_none() {
    let value = value();
    assert!(value.get(0).is_none());
    assert!(value.get("missing").is_none());
    assert!(value.get("list").unwrap().get("name").is_none());
    assert!(value.get("list").unwrap().get(2).is_none());
    assert!(value.get("n").unwrap().get(0).is_none());
}

#[test]
fn test_index_mut() {
    let mut value = value();
    *value.get_mut("n").unwrap() = OwnValue::Int(6);
    if let Some(OwnValue::String(name)) = value
        .get_mut("list")
        .and_then(|list| list.get_mut(0))
        .and_then(|entry| entry.get_mut("name"))
    {
        name.push_str("!");
    }
    assert_eq!(value.get("n"), Some(&OwnValue::Int(6)));
    assert_eq!(
        value.get("list").unwrap().get(0).unwrap().get("name"),
        Some(&OwnValue::from("first!"))
    );
}
