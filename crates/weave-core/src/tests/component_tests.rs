use super::*;

#[derive(Debug, PartialEq)]
struct Label(&'static str);

#[derive(Debug)]
struct Stack;

#[test]
fn payload_downcasts_by_type() {
    let component = Component::new(Label("hi"));
    assert_eq!(component.payload::<Label>(), Some(&Label("hi")));
    assert!(component.payload::<Stack>().is_none());
    assert_eq!(component.payload_name(), "Label");
}

#[test]
fn walk_is_preorder_with_depth() {
    let tree = Component::with_children(
        Stack,
        vec![
            Component::with_children(Stack, vec![Component::new(Label("a"))]),
            Component::new(Label("b")),
        ],
    );
    let mut seen = Vec::new();
    tree.walk(&mut |component, depth| seen.push((component.payload_name(), depth)));
    assert_eq!(
        seen,
        vec![("Stack", 0), ("Stack", 1), ("Label", 2), ("Label", 1)]
    );
}

#[test]
fn empty_components_report_empty() {
    assert!(Component::empty().is_empty());
    assert!(!Component::new(Label("x")).is_empty());
    assert!(!Component::with_children(Stack, vec![Component::empty()]).is_empty());
}

#[test]
fn clones_share_storage() {
    let component = Component::new(Label("x"));
    let clone = component.clone();
    assert!(component.ptr_eq(&clone));
    assert!(!component.ptr_eq(&Component::new(Label("x"))));
}

#[test]
fn dump_lists_components_by_depth() {
    let tree = Component::with_children(Stack, vec![Component::new(Label("a"))]);
    assert_eq!(tree.dump(), "Stack\n  Label\n");
}
