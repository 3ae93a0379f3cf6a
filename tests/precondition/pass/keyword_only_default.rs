use std::sync::{Arc, Mutex};

use lazyargs::{precondition, Function, Kwargs, Signature, Value, S};

fn main() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let check = Function::new("check", {
        let seen = Arc::clone(&seen);
        move |args, _| {
            seen.lock().unwrap().push(args);
            Ok(Value::None)
        }
    });

    // `f(a, b, *, c=1)`
    let signature = Signature::builder("f")
        .param("a")
        .param("b")
        .keyword_only_with_default("c", 1)
        .build();
    let f = Function::new("f", |args, _| Ok(Value::Int(args.len() as i64)));
    let f = precondition!(check, S.a, S.c).decorate(signature, f);

    assert_eq!(
        f.call(vec![5.into(), 10.into()], Kwargs::new()).unwrap(),
        Value::Int(2)
    );

    let mut kwargs = Kwargs::new();
    kwargs.insert("c".into(), 2.into());
    f.call(vec![5.into(), 10.into()], kwargs).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            vec![Value::Int(5), Value::Int(1)],
            vec![Value::Int(5), Value::Int(2)],
        ]
    );
}
