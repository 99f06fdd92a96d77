//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_service_macro() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/service_ok.rs");
    t.pass("tests/trybuild/service_factory_ok.rs");
}
