use avlbst::{equal_paths, AvlTreeMap, BinaryNode};

fn main() {
    env_logger::init();

    let mut map = AvlTreeMap::new();
    map.insert(10, "ten");
    map.insert(20, "twenty");
    map.insert(30, "thirty");
    map.insert(40, "forty");
    map.insert(50, "fifty");
    assert_eq!(map.insert(20, "TWENTY"), Some("twenty"));
    assert_eq!(map.get(&20), Some(&"TWENTY"));
    assert_eq!(map.remove(&10), Some("ten"));
    assert!(map.remove(&10).is_none());
    if let Err(err) = map.try_get(&10) {
        println!("10: {err}");
    }

    println!("{map:?}, height {}", map.height());

    println!("Level-order traversal:");
    map.traverse_level_order(|k, v| {
        println!("Key: {k}, Value: {v}");
    });

    let tree = BinaryNode::new(
        1,
        Some(BinaryNode::new(2, Some(BinaryNode::leaf(4)), None)),
        Some(BinaryNode::leaf(3)),
    );
    println!("equal paths: {}", equal_paths(Some(&tree)));
}
