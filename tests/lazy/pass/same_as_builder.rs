use lazyargs::{lazy, Kwargs, S, W};

fn main() {
    assert_eq!(lazy!(S[1]), S.arg(1));
    assert_eq!(lazy!(W.name), W.kwarg("name"));
    assert_eq!(lazy!(S["*args"][0]), S.varargs().index(0));
    assert_eq!(
        lazy!(S[0].strip()),
        S.arg(0).attr("strip").call_kw(vec![], Kwargs::new())
    );

    let index = 2;
    assert_eq!(lazy!(S[index]), S.arg(2));
}
