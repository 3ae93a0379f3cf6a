//! End-to-end scenarios that combine binding, lazy arguments and preconditions.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    thread,
};

use lazyargs::{
    lazy, lazy_call, precondition, Error, Function, Kwargs, Namespace, Signature, Value, S, W,
};

fn kwargs(entries: &[(&str, Value)]) -> Kwargs {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// A check that records the arguments of each call.
fn recorder() -> (Function, Arc<Mutex<Vec<Vec<Value>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let check = Function::new("record", {
        let seen = Arc::clone(&seen);
        move |args, _| {
            seen.lock().unwrap().push(args);
            Ok(Value::None)
        }
    });

    (check, seen)
}

#[test]
fn chained_method_is_not_called_while_building() {
    let calls = Arc::new(AtomicUsize::new(0));
    let method = Function::new("touch", {
        let calls = Arc::clone(&calls);
        move |_, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Bool(true))
        }
    });

    let chain = lazy!(S[0].touch("arg"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let signature = Signature::builder("f").param("thing").build();
    let thing = Namespace::new("Thing").with("touch", method);
    let call = signature.bind(&[thing.into()], &Kwargs::new()).unwrap();

    assert_eq!(chain.resolve(&call).unwrap(), Value::Bool(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn strict_and_lenient_differ_only_for_keywords() {
    let signature = Signature::builder("f")
        .param("a")
        .param_with_default("b", 2)
        .build();
    let call = signature.bind(&[1.into()], &Kwargs::new()).unwrap();

    assert_eq!(lazy!(S.b).resolve(&call).unwrap(), Value::Int(2));
    assert!(matches!(
        lazy!(W.b).resolve(&call),
        Err(Error::MissingArgument(_))
    ));
    assert_eq!(lazy!(S.zzz).resolve(&call).unwrap(), Value::None);

    assert!(matches!(
        lazy!(S[1]).resolve(&call),
        Err(Error::MissingArgument(_))
    ));
    assert!(matches!(
        lazy!(W[1]).resolve(&call),
        Err(Error::MissingArgument(_))
    ));
}

#[test]
fn replay_errors_surface_unchanged() {
    let signature = Signature::builder("f").param("a").build();
    let call = signature.bind(&["text".into()], &Kwargs::new()).unwrap();

    assert!(matches!(
        lazy!(S[0].missing).resolve(&call),
        Err(Error::AttributeError { .. })
    ));
    assert!(matches!(
        lazy!(S[0][10]).resolve(&call),
        Err(Error::IndexError { index: 10, len: 4, .. })
    ));
    assert!(matches!(
        lazy!(S[0]()).resolve(&call),
        Err(Error::TypeError(_))
    ));
}

#[test]
fn literals_mix_with_lazy_arguments() {
    let (check, seen) = recorder();
    let signature = Signature::builder("f").param("a").build();
    let f = Function::new("f", |_, _| Ok(Value::None));
    let f = precondition!(check, "label", S[0], 3.5).decorate(signature, f);

    f.call(vec![7.into()], Kwargs::new()).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![vec![Value::from("label"), Value::Int(7), Value::Float(3.5)]]
    );
}

#[test]
fn keyword_arguments_of_the_check() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let check = Function::new("check", {
        let seen = Arc::clone(&seen);
        move |_, kwargs| {
            seen.lock().unwrap().push(kwargs);
            Ok(Value::None)
        }
    });

    let signature = Signature::builder("f")
        .param("a")
        .var_positional("rest")
        .build();
    let f = Function::new("f", |_, _| Ok(Value::None));
    let f = precondition!(check, first = S[0], rest = S["*args"]).decorate(signature, f);

    f.call(vec![1.into(), 2.into(), 3.into()], Kwargs::new())
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![kwargs(&[
            ("first", 1.into()),
            ("rest", Value::Tuple(vec![2.into(), 3.into()])),
        ])]
    );
}

#[test]
fn wrapped_function_receives_original_arguments() {
    let (check, _) = recorder();
    let signature = Signature::builder("f")
        .param("a")
        .keyword_only_with_default("scale", 1)
        .build();
    let f = Function::new("f", |args, kwargs| {
        let scale = kwargs.get("scale").and_then(Value::as_int).unwrap_or(1);
        Ok(Value::Int(args[0].as_int().unwrap_or_default() * scale))
    });
    let f = precondition!(check, S.scale).decorate(signature, f);

    assert_eq!(
        f.call(vec![4.into()], kwargs(&[("scale", 3.into())]))
            .unwrap(),
        Value::Int(12)
    );
    assert_eq!(f.call(vec![4.into()], Kwargs::new()).unwrap(), Value::Int(4));
}

#[test]
fn check_return_value_is_ignored() {
    let check = Function::new("falsy", |_, _| Ok(Value::Bool(false)));
    let signature = Signature::builder("f").build();
    let f = Function::new("f", |_, _| Ok("ran".into()));
    let f = precondition!(check).decorate(signature, f);

    assert_eq!(f.call(vec![], Kwargs::new()).unwrap(), Value::from("ran"));
}

#[test]
fn deferred_checks_replace_extra_arguments() {
    let (check, seen) = recorder();
    let signature = Signature::builder("f").param("a").param("b").build();
    let f = Function::new("f", |_, _| Ok(Value::None));
    let f = precondition!(lazy_call!(check(S[1])), S[0]).decorate(signature, f);

    f.call(vec![1.into(), 2.into()], Kwargs::new()).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![vec![Value::Int(2)]]);
}

#[test]
fn concurrent_calls_do_not_share_state() {
    let (check, seen) = recorder();
    let signature = Signature::builder("f").param("n").build();
    let f = Function::new("f", |args, _| Ok(args[0].clone()));
    let f = precondition!(check, S.n).decorate(signature, f);

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let f = f.clone();
            thread::spawn(move || f.call(vec![Value::Int(n)], Kwargs::new()))
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().unwrap(), Value::Int(n as i64));
    }

    let mut seen: Vec<i64> = seen
        .lock()
        .unwrap()
        .iter()
        .filter_map(|args| args[0].as_int())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..8).collect::<Vec<_>>());
}
