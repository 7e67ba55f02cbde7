#[test]
fn fh_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/fh_error_pass.rs");
    t.pass("tests/ui/fh_error_without_internal.rs");
}
