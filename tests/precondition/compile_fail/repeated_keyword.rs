fn main() {
    let _ = lazyargs::precondition!(check, a = 1, a = 2);
}
