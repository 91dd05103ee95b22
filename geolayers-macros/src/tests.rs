use super::*;
use syn::{ parse_quote, Field };

#[test]
fn test_unknown_record_attribute_full_path() {
    let field: Field = parse_quote! {
        #[record(my::unknown::attr = "foo")]
        my_field: i32
    };

    let result = parse_record_attr(&field);
    match result {
        Ok(_) => panic!("Expected error, but got success"),
        Err(err) => {
            assert_eq!(err.to_string(), "unknown record attribute: my :: unknown :: attr");
        }
    }
}

#[test]
fn test_rename_and_skip() {
    let renamed: Field = parse_quote! {
        #[record(name = "coordinates")]
        position: [f64; 2]
    };
    let attr = parse_record_attr(&renamed).unwrap();
    assert_eq!(attr.name, "coordinates");
    assert!(!attr.skip);

    let skipped: Field = parse_quote! {
        #[record(skip)]
        cache: u32
    };
    assert!(parse_record_attr(&skipped).unwrap().skip);

    let plain: Field = parse_quote! { name: String };
    assert_eq!(parse_record_attr(&plain).unwrap().name, "name");
}

#[test]
fn test_empty_name_rejected() {
    let field: Field = parse_quote! {
        #[record(name = "")]
        name: String
    };
    assert!(parse_record_attr(&field).is_err());
}

#[test]
fn test_duplicate_names_rejected() {
    let input: DeriveInput = parse_quote! {
        struct Twice {
            #[record(name = "a")]
            first: f64,
            a: f64,
        }
    };
    let err = expand_record(&input).unwrap_err();
    assert_eq!(err.to_string(), "duplicate record field name: a");
}

#[test]
fn test_tuple_struct_rejected() {
    let input: DeriveInput = parse_quote! {
        struct Pair(f64, f64);
    };
    assert!(expand_record(&input).is_err());
}
