// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for the context module.

use super::context_impl::Context;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_no_context_by_default() {
    Context::clear_current();
    assert!(Context::current().is_none());
    assert!(!Context::currently_tracing());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_new_context() {
    Context::reset("test_new_context".to_string());
    let root = Context::current().expect("reset installs a context");
    let next_context = Context::from_parent(root.clone());
    let next_context_id = next_context.context_id();
    next_context.set_current();

    Context::pop(next_context_id);
    assert_eq!(Context::current(), Some(root));
    Context::clear_current();
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_pop_root_leaves_no_context() {
    let root = Context::new("root".to_string());
    let root_id = root.context_id();
    root.set_current();
    Context::pop(root_id);
    assert!(Context::current().is_none());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_pop_unknown_id_keeps_current() {
    let unrelated = Context::new("unrelated".to_string());
    let current = Context::new("current".to_string());
    current.clone().set_current();
    Context::pop(unrelated.context_id());
    assert_eq!(Context::current(), Some(current));
    Context::clear_current();
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_enter_restores_prior() {
    Context::clear_current();
    let outer = Context::new("outer".to_string());
    let inner = Context::new("inner".to_string());
    {
        let _outer_guard = outer.enter();
        {
            let _inner_guard = inner.enter();
            assert_eq!(Context::current().as_ref(), Some(&inner));
        }
        assert_eq!(Context::current().as_ref(), Some(&outer));
    }
    assert!(Context::current().is_none());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_guards_dropped_out_of_order() {
    Context::clear_current();
    let c1 = Context::new("c1".to_string());
    let c2 = Context::new("c2".to_string());

    let a = c1.enter();
    let b = c2.enter();
    drop(a);
    assert_eq!(Context::current().as_ref(), Some(&c2));
    drop(b);
    assert!(Context::current().is_none());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_middle_guard_dropped_first() {
    let base = Context::new("base".to_string());
    base.clone().set_current();
    let c1 = Context::new("c1".to_string());
    let c2 = Context::new("c2".to_string());
    let c3 = Context::new("c3".to_string());

    let a = c1.enter();
    let b = c2.enter();
    let c = c3.enter();
    drop(b);
    assert_eq!(Context::current().as_ref(), Some(&c3));
    drop(c);
    assert_eq!(Context::current().as_ref(), Some(&c1));
    drop(a);
    assert_eq!(Context::current().as_ref(), Some(&base));
    Context::clear_current();
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn test_scope_restores_after_panic() {
    Context::clear_current();
    let ctx = Context::new("panicky".to_string());
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        ctx.scope(|| -> u32 { panic!("boom") });
    }));
    assert!(result.is_err());
    assert!(Context::current().is_none());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_context_equality() {
    let context1 = Context::new("task".to_string());
    let context2 = context1.clone();
    let context3 = Context::new("task".to_string());

    assert_eq!(context1, context2);
    assert_ne!(context1, context3);
    assert_ne!(context1.context_id(), context3.context_id());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_context_hash() {
    use std::collections::HashMap;

    let context1 = Context::new("a".to_string());
    let context2 = context1.clone();
    let context3 = Context::new("b".to_string());

    let mut map = HashMap::new();
    map.insert(context1.clone(), "value1");
    map.insert(context3.clone(), "value3");

    assert_eq!(map.get(&context2), Some(&"value1"));
    assert_eq!(map.get(&context3), Some(&"value3"));
    assert_eq!(map.len(), 2);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_context_display() {
    let root = Context::new("root_task".to_string());
    let root_display = format!("{}", root);
    assert_eq!(root_display, format!("{} (root_task)", root.context_id()));

    let child = Context::from_parent(root.clone());
    assert_eq!(
        format!("{}", child),
        format!("  {} (root_task)", child.context_id())
    );

    let grandchild = Context::from_parent(child);
    assert!(format!("{}", grandchild).starts_with("    #"));
    assert_eq!(grandchild.nesting_level(), 2);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_tracing_inherited_by_later_children() {
    let root = Context::new("traced".to_string());
    let early_child = Context::from_parent(root.clone());
    root.scope(Context::begin_trace);
    assert!(root.is_tracing());
    assert!(!early_child.is_tracing());
    assert!(Context::from_parent(root.clone()).is_tracing());
    root.scope(|| assert!(Context::currently_tracing()));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_child_has_separate_local_storage() {
    #[derive(Default)]
    struct Marker;

    let parent = Context::new("parent".to_string());
    parent.local_or_insert_with(Marker::default);
    let child = Context::from_parent(parent.clone());
    assert!(parent.local::<Marker>().is_some());
    assert!(child.local::<Marker>().is_none());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_local_storage_dropped_with_context() {
    use std::sync::Arc;

    struct Payload;

    let ctx = Context::new("short_lived".to_string());
    let payload = ctx.local_or_insert_with(|| Payload);
    assert_eq!(Arc::strong_count(&payload), 2);
    drop(ctx);
    assert_eq!(Arc::strong_count(&payload), 1);
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn test_current_is_per_thread() {
    let ctx = Context::new("main_thread".to_string());
    let _guard = ctx.enter();
    std::thread::spawn(|| assert!(Context::current().is_none()))
        .join()
        .expect("thread should not panic");
    assert_eq!(Context::current(), Some(ctx.clone()));
}
