use super::TreeWalker;
use crate::section::{FileFormat, Section, StructuralNode};
use crate::urls::Routes;
use crate::Error;

fn leaf(label: &str, begin: Option<&str>, end: Option<&str>) -> StructuralNode {
    StructuralNode::Leaf {
        label: label.to_string(),
        begin: begin.map(str::to_string),
        end: end.map(str::to_string),
    }
}

fn group(label: &str, children: Vec<StructuralNode>) -> StructuralNode {
    StructuralNode::Group {
        label: label.to_string(),
        children,
    }
}

fn section() -> Section {
    Section {
        id: "mf1".to_string(),
        media_object_id: "mo1".to_string(),
        label: Some("Reel 1".to_string()),
        duration: Some(600_000),
        file_format: FileFormat::MovingImage,
        permalink: None,
        structure: None,
    }
}

/// Track numbers in document order, read back from the `{section}-{n}` DOM ids.
fn track_ids(markup: &str) -> Vec<usize> {
    markup
        .split("id=\"mf1-")
        .skip(1)
        .map(|rest| rest[..rest.find('"').unwrap()].parse().unwrap())
        .collect()
}

#[test]
fn test_direct_leaves_numbered_in_order() {
    let section = section();
    let routes = Routes::new("");
    let root = group(
        "Root",
        vec![
            leaf("A", Some("0"), Some("10")),
            leaf("B", Some("10"), Some("20")),
            leaf("C", Some("20"), Some("30")),
        ],
    );

    let rendered = TreeWalker::new(&section, &routes, false, 64)
        .walk_root(&root, 4)
        .unwrap();

    assert_eq!(track_ids(&rendered.markup), vec![1, 2, 3]);
    assert_eq!(rendered.track_number, 3);
    assert!(rendered.markup.contains(">1. A (00:10)</a>"));
}

#[test]
fn test_nested_groups_numbered_depth_first() {
    let section = section();
    let routes = Routes::new("");
    let root = group(
        "Root",
        vec![
            group(
                "Side A",
                vec![
                    leaf("Intro", None, Some("1:00")),
                    group("Movement", vec![leaf("Allegro", Some("1:00"), Some("4:00"))]),
                ],
            ),
            leaf("Interlude", Some("4:00"), Some("5:00")),
            group("Side B", vec![leaf("Finale", Some("5:00"), None)]),
        ],
    );

    let rendered = TreeWalker::new(&section, &routes, false, 64)
        .walk_root(&root, 0)
        .unwrap();

    assert_eq!(track_ids(&rendered.markup), vec![1, 2, 3, 4]);
    assert_eq!(rendered.track_number, root.leaf_count());
    // Groups render as plain headings without numbers.
    assert!(rendered.markup.contains("<li>Side A</li><li><ul>"));
    assert!(rendered.markup.contains("<li>Movement</li>"));
    assert!(rendered.markup.contains(">4. Finale (05:00)</a>"));
}

#[test]
fn test_single_leaf_root_starts_at_index() {
    let section = section();
    let routes = Routes::new("");
    let root = leaf("Whole reel", None, None);

    let rendered = TreeWalker::new(&section, &routes, false, 64)
        .walk_root(&root, 2)
        .unwrap();

    assert_eq!(track_ids(&rendered.markup), vec![3]);
    assert!(rendered.markup.contains(">3. Whole reel (10:00)</a>"));
    assert!(rendered.markup.contains("?t=0.0,600.0"));
}

#[test]
fn test_empty_group_renders_heading_and_empty_list() {
    let section = section();
    let routes = Routes::new("");
    let rendered = TreeWalker::new(&section, &routes, false, 64)
        .walk(&group("Empty", vec![]), 0)
        .unwrap();

    assert_eq!(rendered.markup, "<li>Empty</li><li><ul></ul></li>");
    assert_eq!(rendered.track_number, 0);
}

#[test]
fn test_leaf_metadata_attributes() {
    let section = section();
    let routes = Routes::new("https://av.example.org");
    let rendered = TreeWalker::new(&section, &routes, true, 64)
        .walk(&leaf("Intro", Some("00:00:05"), Some("00:00:12.5")), 0)
        .unwrap();

    assert_eq!(
        rendered.markup,
        "<li class=\"stream-li\"><a href=\"https://av.example.org/master_files/mf1?t=5.0,12.5\" \
         id=\"mf1-1\" class=\"playable wrap current-stream\" data-segment=\"mf1\" \
         data-is-video=\"true\" \
         data-native-url=\"https://av.example.org/media_objects/mo1/section/mf1?t=5.0,12.5\" \
         data-fragmentbegin=\"5.0\" data-fragmentend=\"12.5\">1. Intro (00:07)</a></li>"
    );
}

#[test]
fn test_depth_limit() {
    let section = section();
    let routes = Routes::new("");
    let mut node = leaf("Deep", None, None);
    for level in 0..10 {
        node = group(&format!("Level {level}"), vec![node]);
    }

    let result = TreeWalker::new(&section, &routes, false, 4).walk_root(&node, 0);
    assert!(matches!(result, Err(Error::DepthExceeded { limit: 4 })));

    let result = TreeWalker::new(&section, &routes, false, 16).walk_root(&node, 0);
    assert_eq!(result.unwrap().track_number, 1);
}
