fn main() {
    let _ = lazyargs::precondition!(c = 1);
}
