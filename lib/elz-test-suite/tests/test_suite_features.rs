//! Tests for the test suite framework itself.

use elz_test_suite::*;

#[test]
fn error_count_on_success() {
    Test::new(Source::new().with(binding("x", &[], int(1))))
        .expect(Compiles)
        .expect(HasErrorCount(0))
        .expect(UnitBuilds::yes("test.elz"));
}

#[test]
#[should_panic(expected = "Expectation failed")]
fn failed_expectation_panics() {
    Test::new(Source::new().with(binding("x", &[], int(1)))).expect(Fails);
}

#[test]
#[should_panic(expected = "Binding 'y' not found")]
fn missing_binding_expectation() {
    Test::new(Source::new().with(binding("x", &[], int(1)))).expect(Binding::new("y"));
}

#[test]
#[should_panic(expected = "has signature")]
fn wrong_signature_expectation() {
    Test::new(
        Source::new()
            .with(bind_type("x", exist("int")))
            .with(binding("x", &[], int(1))),
    )
    .expect(Binding::new("x").has(Property::Signature("f64")));
}
