use std::sync::{Arc, Mutex};

use lazyargs::{lazy_call, precondition, Function, Kwargs, Signature, Value, S};

fn main() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let in_range = Function::new("in_range", {
        let seen = Arc::clone(&seen);
        move |args, kwargs| {
            seen.lock().unwrap().push((args, kwargs));
            Ok(Value::None)
        }
    });

    let signature = Signature::builder("fill")
        .param("count")
        .param_with_default("limit", 10)
        .build();
    let fill = Function::new("fill", |_, _| Ok(Value::None));

    let check = lazy_call!(in_range(S[0], low = 0, high = S.limit));
    let fill = precondition!(check).decorate(signature, fill);

    fill.call(vec![3.into()], Kwargs::new()).unwrap();

    let mut expected = Kwargs::new();
    expected.insert("low".into(), 0.into());
    expected.insert("high".into(), 10.into());
    assert_eq!(*seen.lock().unwrap(), vec![(vec![Value::Int(3)], expected)]);
}
