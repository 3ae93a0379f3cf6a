fn main() {
    let _ = lazyargs::lazy_call!("check");
}
