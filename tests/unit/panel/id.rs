use super::*;

#[test]
fn fresh_ids_are_unique() {
    let a = SurfaceId::fresh();
    let b = SurfaceId::fresh();
    assert_ne!(a, b);
    assert!(b.get() > a.get());
}

#[test]
fn display_is_tagged() {
    assert_eq!(SurfaceId::raw(7).to_string(), "surface#7");
}
