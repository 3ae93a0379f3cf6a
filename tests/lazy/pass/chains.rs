use lazyargs::{lazy, Kwargs, Namespace, Signature, Value, S, W};

fn main() {
    let signature = Signature::builder("f")
        .param("user")
        .var_positional("rest")
        .var_keyword("options")
        .build();
    let user = Namespace::new("User")
        .with("name", "ada")
        .with("tags", Value::List(vec!["x".into(), "y".into()]));
    let mut kwargs = Kwargs::new();
    kwargs.insert("mode".into(), "fast".into());

    let call = signature
        .bind(&[user.into(), 1.into(), 2.into()], &kwargs)
        .unwrap();

    assert_eq!(
        lazy!(S[0].name.upper()).resolve(&call).unwrap(),
        Value::from("ADA")
    );
    assert_eq!(lazy!(S[0].tags[-1]).resolve(&call).unwrap(), Value::from("y"));
    assert_eq!(lazy!(S.user.name).resolve(&call).unwrap(), Value::from("ada"));
    assert!(lazy!(W.user).resolve(&call).is_err());

    assert_eq!(
        lazy!(S["*args"]).resolve(&call).unwrap(),
        Value::Tuple(vec![1.into(), 2.into()])
    );
    assert_eq!(
        lazy!(W["**kwargs"].get("mode")).resolve(&call).unwrap(),
        Value::from("fast")
    );
    assert_eq!(
        lazy!(S["**kwargs"].get("missing", "default"))
            .resolve(&call)
            .unwrap(),
        Value::from("default")
    );
}
