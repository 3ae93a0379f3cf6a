fn main() {
    let _ = lazyargs::lazy!(lazyargs::S[1.5]);
}
