use std::sync::{Arc, Mutex};

use lazyargs::{precondition, Function, Kwargs, Signature, Value, W};

fn main() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let check = Function::new("check", {
        let seen = Arc::clone(&seen);
        move |mut args, _| {
            seen.lock().unwrap().push(args.remove(0));
            Ok(Value::None)
        }
    });

    let signature = Signature::builder("configure")
        .param("name")
        .var_keyword("options")
        .build();
    let configure = Function::new("configure", |_, _| Ok(Value::None));
    let configure = precondition!(check, W["**kwargs"]).decorate(signature, configure);

    configure.call(vec!["app".into()], Kwargs::new()).unwrap();

    let mut options = Kwargs::new();
    options.insert("debug".into(), true.into());
    configure.call(vec!["app".into()], options.clone()).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Value::Dict(Kwargs::new()), Value::Dict(options)]
    );
}
