fn main() {
    let _ = lazyargs::precondition!(check, c = 1, 5);
}
