//! This crate defines most tests for the `lazyargs` crate.
//!
//! These are defined in a different crate, because otherwise `proc-macro-crate` does not work
//! properly.

#[cfg(test)]
mod scenarios;

#[cfg(test)]
mod tests {
    #[test]
    fn pass() {
        let t = trybuild::TestCases::new();
        t.pass("lazy/pass/*.rs");
        t.pass("precondition/pass/*.rs");
    }

    #[test]
    fn compile_fail() {
        let t = trybuild::TestCases::new();
        t.compile_fail("lazy/compile_fail/*.rs");
        t.compile_fail("precondition/compile_fail/*.rs");
    }
}
