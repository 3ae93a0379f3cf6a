use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use lazyargs::{precondition, Error, Function, Kwargs, Signature, Value, S};

fn main() {
    let runs = Arc::new(AtomicUsize::new(0));
    let body = Function::new("withdraw", {
        let runs = Arc::clone(&runs);
        move |_, _| {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(Value::None)
        }
    });
    let positive = Function::new("positive", |args, _| match args[0].as_int() {
        Some(amount) if amount > 0 => Ok(Value::None),
        _ => Err(Error::check_failed("amount must be positive")),
    });

    let signature = Signature::builder("withdraw").param("amount").build();
    let withdraw = precondition!(positive, S[0]).decorate(signature, body);

    let result = withdraw.call(vec![(-5).into()], Kwargs::new());
    assert!(matches!(result, Err(Error::CheckFailed(_))));
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    withdraw.call(vec![5.into()], Kwargs::new()).unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}
