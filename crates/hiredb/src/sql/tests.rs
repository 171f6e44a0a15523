use super::*;

#[test]
fn test_partial_update_unmapped_field_passes_through() {
    let mut fields = FieldMap::new();
    fields.set("data", "data");
    let columns = ColumnMap::new(&[("numEmployees", "num_employees")]);

    let clause = partial_update(fields, &columns).unwrap();
    assert_eq!(clause.sql(), r#""data"=$1"#);
    assert_eq!(clause.param_count(), 1);
}

#[test]
fn test_partial_update_two_fields_one_mapped() {
    let mut fields = FieldMap::new();
    fields.set("f1", "v1").set("jsF2", "v2");
    let columns = ColumnMap::new(&[("jsF2", "f2")]);

    let clause = partial_update(fields, &columns).unwrap();
    assert_eq!(clause.sql(), r#""f1"=$1, "f2"=$2"#);
    assert_eq!(clause.params_ref().len(), 2);
}

#[test]
fn test_partial_update_preserves_insertion_order() {
    let mut fields = FieldMap::new();
    fields
        .set("name", "Acme")
        .set("description", "Widgets")
        .set("numEmployees", 120)
        .set("logoUrl", "https://acme.test/logo.png");
    let columns = ColumnMap::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);

    let clause = partial_update(fields, &columns).unwrap();
    assert_eq!(
        clause.sql(),
        r#""name"=$1, "description"=$2, "num_employees"=$3, "logo_url"=$4"#
    );
    assert_eq!(clause.param_count(), 4);
}

#[test]
fn test_partial_update_empty_fields_rejected() {
    let err = partial_update(FieldMap::new(), &ColumnMap::empty()).unwrap_err();
    assert!(err.is_invalid_input());

    // The translation table makes no difference.
    let columns = ColumnMap::new(&[("numEmployees", "num_employees")]);
    let err = partial_update(FieldMap::new(), &columns).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_partial_update_accepts_null_values() {
    let mut fields = FieldMap::new();
    fields.set("salary", 90_000).set("equity", None::<i32>);

    let clause = partial_update(fields, &ColumnMap::empty()).unwrap();
    assert_eq!(clause.sql(), r#""salary"=$1, "equity"=$2"#);
    assert_eq!(clause.param_count(), 2);
}

#[test]
fn test_field_map_set_opt_skips_none() {
    let mut fields = FieldMap::new();
    fields
        .set_opt("name", Some("Acme"))
        .set_opt("description", None::<&str>)
        .set_opt("numEmployees", Some(12));
    assert_eq!(fields.len(), 2);

    let clause = partial_update(fields, &ColumnMap::empty()).unwrap();
    assert_eq!(clause.sql(), r#""name"=$1, "numEmployees"=$2"#);
}

#[test]
fn test_column_map_lookup() {
    let columns = ColumnMap::new(&[("logoUrl", "logo_url")]);
    assert_eq!(columns.column_for("logoUrl"), "logo_url");
    assert_eq!(columns.column_for("name"), "name");
}

#[test]
fn test_filter_empty_build() {
    let filter = FilterBuilder::new();
    assert!(filter.is_empty());

    let clause = filter.build();
    assert!(clause.is_empty());
    assert_eq!(clause.sql(), "");
    assert_eq!(clause.param_count(), 0);
}

#[test]
fn test_filter_sequential_numbering() {
    let mut filter = FilterBuilder::new();
    filter.and_eq("name", "Acme");
    filter.and_gt("num_employees", 50);
    filter.and_lt("num_employees", 500);

    let clause = filter.build();
    assert_eq!(
        clause.sql(),
        "WHERE name = $1 AND num_employees > $2 AND num_employees < $3"
    );
    assert_eq!(clause.param_count(), 3);
}

#[test]
fn test_filter_literal_consumes_no_placeholder() {
    let mut filter = FilterBuilder::new();
    filter.and_eq("title", "engineer");
    filter.and_literal("equity > 0");
    filter.and_gt("salary", 100_000);

    let clause = filter.build();
    assert_eq!(
        clause.sql(),
        "WHERE title = $1 AND equity > 0 AND salary > $2"
    );
    assert_eq!(clause.param_count(), 2);
}

#[test]
fn test_filter_literal_only() {
    let mut filter = FilterBuilder::new();
    filter.and_literal("equity > 0");

    let clause = filter.build();
    assert_eq!(clause.sql(), "WHERE equity > 0");
    assert_eq!(clause.param_count(), 0);
}

#[test]
fn test_filter_opt_helpers_skip_none() {
    let mut filter = FilterBuilder::new();
    filter.and_eq_opt("name", None::<&str>);
    filter.and_gt_opt("num_employees", Some(10));
    filter.and_lt_opt("num_employees", None::<i32>);

    let clause = filter.build();
    assert_eq!(clause.sql(), "WHERE num_employees > $1");
    assert_eq!(clause.param_count(), 1);
}
