use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn ctrl_or_meta_toggles() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.toggle());
    assert!(Modifiers { meta: true, ..Default::default() }.toggle());
    assert!(!Modifiers { shift: true, ..Default::default() }.toggle());
}

#[test]
fn shift_forces_resize_and_alt_forces_rotate() {
    let shift = Modifiers { shift: true, ..Default::default() };
    let alt = Modifiers { alt: true, ..Default::default() };
    assert_eq!(shift.drag_tool(Tool::Move), Tool::Resize);
    assert_eq!(alt.drag_tool(Tool::Move), Tool::Rotate);
    assert_eq!(Modifiers::default().drag_tool(Tool::Rotate), Tool::Rotate);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_only_replaces_and_sets_primary() {
    let mut sel = Selection::default();
    sel.select_only(1);
    sel.select_only(2);
    assert_eq!(sel.ids(), vec![2]);
    assert_eq!(sel.primary(), Some(2));
}

#[test]
fn toggle_add_keeps_primary() {
    let mut sel = Selection::default();
    sel.select_only(1);
    sel.toggle(2);
    assert_eq!(sel.ids(), vec![1, 2]);
    assert_eq!(sel.primary(), Some(1));
}

#[test]
fn toggle_into_empty_selection_sets_primary() {
    let mut sel = Selection::default();
    sel.toggle(5);
    assert_eq!(sel.primary(), Some(5));
}

#[test]
fn toggle_remove_primary_moves_primary() {
    let mut sel = Selection::default();
    sel.select_only(3);
    sel.toggle(7);
    sel.toggle(3);
    assert_eq!(sel.ids(), vec![7]);
    assert_eq!(sel.primary(), Some(7));
}

#[test]
fn set_primary_ignores_unselected() {
    let mut sel = Selection::default();
    sel.select_only(1);
    sel.set_primary(9);
    assert_eq!(sel.primary(), Some(1));
}

#[test]
fn set_all_keeps_primary_when_still_selected() {
    let mut sel = Selection::default();
    sel.select_only(4);
    sel.set_all([2, 4, 6]);
    assert_eq!(sel.primary(), Some(4));
    sel.set_all([8, 9]);
    assert_eq!(sel.primary(), Some(8));
    sel.set_all([]);
    assert_eq!(sel.primary(), None);
}

#[test]
fn remove_and_clear() {
    let mut sel = Selection::default();
    sel.select_only(1);
    sel.toggle(2);
    sel.remove(1);
    assert_eq!(sel.primary(), Some(2));
    sel.clear();
    assert!(sel.is_empty());
    assert_eq!(sel.primary(), None);
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn defaults_are_idle_move_and_empty() {
    assert!(matches!(InputState::default(), InputState::Idle));
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Move);
    assert!(ui.selection.is_empty());
    assert!(ui.remote.is_empty());
    assert!(ui.clipboard.is_empty());
}
