fn main() {
    let _ = lazyargs::lazy!(lazyargs::S["args"]);
}
