use super::*;
use argon_ir::Line;

fn module() -> ModuleId {
    ModuleId::new("main.ar")
}

fn value_of(chain: &ScopeChain, name: &str) -> Option<Value> {
    chain.lookup(name).and_then(|b| b.value().cloned())
}

fn add() -> Rc<FunctionDef> {
    Rc::new(FunctionDef {
        name: "add".to_string(),
        params: vec!["a".to_string(), "b".to_string()],
        body: Vec::new(),
        line: Line::new(0),
    })
}

#[test]
fn test_declare_lookup() {
    let chain = ScopeChain::new(LocalScope::default());
    chain.declare("x", Binding::plain(Value::Number(42.0), module()));
    assert_eq!(value_of(&chain, "x"), Some(Value::Number(42.0)));
    assert!(chain.lookup("y").is_none());
}

#[test]
fn test_shadowing_and_pop() {
    let mut chain = ScopeChain::new(LocalScope::default());
    chain.declare("x", Binding::plain(Value::Number(1.0), module()));

    chain.push();
    chain.declare("x", Binding::plain(Value::Number(2.0), module()));
    assert_eq!(value_of(&chain, "x"), Some(Value::Number(2.0)));
    assert_eq!(chain.depth(), 2);

    chain.pop();
    assert_eq!(value_of(&chain, "x"), Some(Value::Number(1.0)));
}

#[test]
fn test_root_is_never_popped() {
    let mut chain = ScopeChain::new(LocalScope::default());
    chain.pop();
    chain.pop();
    assert_eq!(chain.depth(), 1);
    chain.declare("x", Binding::plain(Value::Nil, module()));
    assert!(chain.lookup("x").is_some());
}

#[test]
fn test_plain_assign_shadows_outer_binding() {
    let mut chain = ScopeChain::new(LocalScope::default());
    chain.declare("x", Binding::plain(Value::Number(1.0), module()));
    chain.push();

    assert_eq!(
        chain.assign("x", Value::Number(5.0), AssignKind::Plain, &module()),
        Ok(())
    );
    assert_eq!(value_of(&chain, "x"), Some(Value::Number(5.0)));

    chain.pop();
    assert_eq!(value_of(&chain, "x"), Some(Value::Number(1.0)));
}

#[test]
fn test_preset_assign_writes_owning_frame() {
    let mut chain = ScopeChain::new(LocalScope::default());
    chain.declare("x", Binding::plain(Value::Number(1.0), module()));
    chain.push();

    assert_eq!(
        chain.assign("x", Value::Number(5.0), AssignKind::Preset, &module()),
        Ok(())
    );
    assert!(!chain.innermost().borrow().contains_key("x"));

    chain.pop();
    assert_eq!(value_of(&chain, "x"), Some(Value::Number(5.0)));
}

#[test]
fn test_fresh_name_declares_plain_in_innermost() {
    let mut chain = ScopeChain::new(LocalScope::default());
    chain.push();
    chain
        .assign("y", Value::Boolean(true), AssignKind::Preset, &module())
        .unwrap();
    let binding = chain.innermost().borrow().get("y").cloned().unwrap();
    assert_eq!(binding.kind(), BindingKind::Plain);
    assert_eq!(binding.module, module());
}

#[test]
fn test_functions_cannot_be_assigned() {
    let chain = ScopeChain::new(LocalScope::default());
    chain.define_function(add(), &module()).unwrap();

    for mode in [AssignKind::Plain, AssignKind::Preset] {
        assert_eq!(chain.check_assignable("add", mode), Err(BindingKind::Func));
        assert_eq!(
            chain.assign("add", Value::Nil, mode, &module()),
            Err(BindingKind::Func)
        );
    }
    assert_eq!(chain.lookup("add").map(|b| b.kind()), Some(BindingKind::Func));
}

#[test]
fn test_natives_cannot_be_assigned_or_redefined() {
    let natives = LocalScope::default();
    let mut chain = ScopeChain::new(natives);
    chain.declare(
        "len",
        Binding::native(NativeFunction::new("len", |_| Ok(Value::Nil))),
    );
    chain.push();

    assert_eq!(
        chain.check_assignable("len", AssignKind::Preset),
        Err(BindingKind::NativeFunc)
    );
    assert_eq!(
        chain.check_assignable("len", AssignKind::Plain),
        Err(BindingKind::NativeFunc)
    );
    assert_eq!(
        chain.assign("len", Value::Number(1.0), AssignKind::Plain, &module()),
        Err(BindingKind::NativeFunc)
    );
    assert!(chain.innermost().borrow().is_empty());

    let mut def = (*add()).clone();
    def.name = "len".to_string();
    assert_eq!(
        chain.define_function(Rc::new(def), &module()),
        Err(BindingKind::NativeFunc)
    );
}

#[test]
fn test_plain_assign_shadows_outer_function() {
    let mut chain = ScopeChain::new(LocalScope::default());
    chain.push();
    chain.define_function(add(), &module()).unwrap();
    chain.push();

    // Only the root is guarded; an outer user function can be shadowed.
    assert_eq!(chain.check_assignable("add", AssignKind::Plain), Ok(()));
    chain
        .assign("add", Value::Number(2.0), AssignKind::Plain, &module())
        .unwrap();
    assert_eq!(value_of(&chain, "add"), Some(Value::Number(2.0)));
    chain.pop();
    assert_eq!(chain.lookup("add").unwrap().kind(), BindingKind::Func);
}

#[test]
fn test_redefinition_replaces_in_owning_frame() {
    let mut chain = ScopeChain::new(LocalScope::default());
    chain.define_function(add(), &module()).unwrap();
    chain.push();

    let mut def = (*add()).clone();
    def.params = vec!["only".to_string()];
    chain
        .define_function(Rc::new(def), &ModuleId::new("other.ar"))
        .unwrap();

    assert!(!chain.innermost().borrow().contains_key("add"));
    let root = chain.frames()[0].borrow().get("add").cloned().unwrap();
    match root.slot {
        BindingSlot::Function(def) => assert_eq!(def.params, ["only"]),
        other => panic!("expected a function, got {other:?}"),
    }
    assert_eq!(root.module, ModuleId::new("other.ar"));
}

#[test]
fn test_function_over_variable_is_rejected() {
    let chain = ScopeChain::new(LocalScope::default());
    chain.declare("add", Binding::plain(Value::Number(1.0), module()));
    assert_eq!(
        chain.define_function(add(), &module()),
        Err(BindingKind::Plain)
    );
}

#[test]
fn test_frames_are_shared_handles() {
    let top = LocalScope::default();
    let chain = ScopeChain::with_frames(LocalScope::default(), [top.clone()]);
    chain.declare("x", Binding::plain(Value::Number(3.0), module()));
    assert!(top.borrow().contains_key("x"));
    assert!(chain.find_frame("x").is_some_and(|f| f.ptr_eq(&top)));
}

#[test]
fn test_kind_names() {
    assert_eq!(BindingKind::Plain.to_string(), "var");
    assert_eq!(BindingKind::Func.to_string(), "func");
    assert_eq!(BindingKind::NativeFunc.to_string(), "native");
}
