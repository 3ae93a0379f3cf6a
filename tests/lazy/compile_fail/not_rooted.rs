fn main() {
    let _ = lazyargs::lazy!(x[0]);
}
