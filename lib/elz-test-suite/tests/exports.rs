use elz_test_suite::*;

#[test]
fn exported_binding_is_visible() {
    Test::new(Source::new().with(binding("main", &[], int(0)).exported()))
        .expect(Compiles)
        .expect(ExportLookup::found("main"))
        .expect(Binding::new("main").has(Property::Exported(true)));
}

#[test]
fn private_binding_is_not_exported() {
    Test::new(Source::new().with(binding("helper", &["x"], ident("x"))))
        .expect(Compiles)
        .expect(ExportLookup::missing("helper"))
        .expect(Binding::new("helper").has(Property::Exported(false)));
}

#[test]
fn absent_binding() {
    Test::new(Source::new().with(binding("x", &[], int(1))))
        .expect(Compiles)
        .expect(ExportLookup::missing("nope"))
        .expect(NoBinding("nope"));
}

#[test]
fn exported_binding_with_signature() {
    Test::new(
        Source::new()
            .with(bind_type("square", arrow([exist("int"), exist("int")])))
            .with(binding("square", &["n"], binary(ident("n"), '*', ident("n"))).exported()),
    )
    .expect(Compiles)
    .expect(ExportLookup::found("square"))
    .expect(
        Binding::new("square")
            .has(Property::Signature("int -> int"))
            .has(Property::Exported(true)),
    );
}
