use super::*;

struct Label;
struct Button;

#[test]
fn ordinals_count_per_type_and_id() {
    let mut frame = ScopeFrame::new(Identity::ROOT, None);
    let label = TypeKey::of::<Label>();
    let button = TypeKey::of::<Button>();

    let first = frame.next_identity(label, None);
    let _button = frame.next_identity(button, None);
    let second = frame.next_identity(label, None);

    assert_eq!(first, Identity::ROOT.child(label, None, 0));
    assert_eq!(second, Identity::ROOT.child(label, None, 1));
}

#[test]
fn inserting_a_different_type_keeps_sibling_identities() {
    let label = TypeKey::of::<Label>();
    let button = TypeKey::of::<Button>();

    let mut before = ScopeFrame::new(Identity::ROOT, None);
    let a = before.next_identity(label, None);
    let b = before.next_identity(label, None);

    let mut after = ScopeFrame::new(Identity::ROOT, None);
    let _inserted = after.next_identity(button, None);
    let a2 = after.next_identity(label, None);
    let b2 = after.next_identity(label, None);

    assert_eq!((a, b), (a2, b2));
}

#[test]
fn explicit_ids_are_independent_of_position() {
    let label = TypeKey::of::<Label>();
    let mut frame = ScopeFrame::new(Identity::ROOT, None);
    let _anon = frame.next_identity(label, None);
    let keyed = frame.next_identity(label, Some(ViewId::new("header")));

    let mut other = ScopeFrame::new(Identity::ROOT, None);
    let keyed_first = other.next_identity(label, Some(ViewId::new("header")));

    assert_eq!(keyed, keyed_first);
    assert_ne!(keyed, Identity::ROOT.child(label, None, 1));
}

#[test]
fn child_identity_depends_on_parent() {
    let label = TypeKey::of::<Label>();
    let parent = Identity::ROOT.child(TypeKey::of::<Button>(), None, 0);
    assert_ne!(
        Identity::ROOT.child(label, None, 0),
        parent.child(label, None, 0)
    );
}

#[test]
fn short_name_strips_module_path_only_outside_generics() {
    assert_eq!(short_type_name("weave_ui::layout::Padding"), "Padding");
    assert_eq!(
        short_type_name("weave_ui::layout::LayoutModifier<app::Row>"),
        "LayoutModifier<app::Row>"
    );
    assert_eq!(short_type_name("Plain"), "Plain");
}

#[test]
fn display_is_hex() {
    assert_eq!(Identity::ROOT.to_string(), "#0000000000000000");
}
