use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use sigil_code_info::classlike_info::Variance;
use sigil_code_info::code_location::FilePath;
use sigil_code_info::codebase_info::CodebaseInfo;
use sigil_code_info::functionlike_info::FunctionLikeInfo;
use sigil_code_info::functionlike_parameter::FunctionLikeParameter;
use sigil_code_info::property_info::PropertyInfo;
use sigil_code_info::t_atomic::{ArrayKey, TAtomic};
use sigil_code_info::t_union::TUnion;

use crate::type_comparator::callable_type_comparator::{self, CallableArrayTarget};
use crate::type_comparator::type_comparison_result::TypeComparisonResult;
use crate::type_comparator::{atomic_type_comparator, union_type_comparator};
use crate::*;

fn file_path() -> FilePath {
    FilePath("src/Foo.php".to_string())
}

fn is_contained_by(codebase: &CodebaseInfo, input: &TUnion, container: &TUnion) -> bool {
    union_type_comparator::is_contained_by(
        codebase,
        &file_path(),
        input,
        container,
        false,
        false,
        false,
        &mut TypeComparisonResult::new(),
    )
}

fn compare(
    codebase: &CodebaseInfo,
    input: &TUnion,
    container: &TUnion,
) -> (bool, TypeComparisonResult) {
    let mut result = TypeComparisonResult::new();
    let is_contained = union_type_comparator::is_contained_by(
        codebase,
        &file_path(),
        input,
        container,
        false,
        false,
        false,
        &mut result,
    );
    (is_contained, result)
}

fn union(types: Vec<TAtomic>) -> TUnion {
    TUnion::new(types)
}

fn shape(properties: Vec<(&str, TUnion)>) -> TUnion {
    get_keyed_array(
        properties
            .into_iter()
            .map(|(key, value)| (ArrayKey::String(key.to_string()), value))
            .collect(),
    )
}

fn optional(mut property_type: TUnion) -> TUnion {
    property_type.possibly_undefined = true;
    property_type
}

fn callable(params: Vec<TUnion>, return_type: TUnion) -> TUnion {
    wrap_atomic(TAtomic::TCallable {
        params: Some(
            params
                .into_iter()
                .enumerate()
                .map(|(i, param_type)| FunctionLikeParameter::with_type(&format!("p{}", i), param_type))
                .collect(),
        ),
        return_type: Some(return_type),
        is_pure: None,
    })
}

fn method(name: &str, params: Vec<TUnion>, return_type: TUnion) -> FunctionLikeInfo {
    let mut method = FunctionLikeInfo::new(name.to_string());
    method.params = params
        .into_iter()
        .enumerate()
        .map(|(i, param_type)| FunctionLikeParameter::with_type(&format!("p{}", i), param_type))
        .collect();
    method.return_type = Some(return_type);
    method
}

/// Base <- Derived, plus a generic Collection<T>.
fn get_codebase() -> CodebaseInfo {
    let mut codebase = CodebaseInfo::new();

    codebase.add_interface("Traversable", &[]);
    codebase.add_interface("Stringable", &[]);
    codebase.add_class("Base", None, &[]);
    codebase.add_class("Derived", Some("Base"), &[]);
    codebase.add_class("Unrelated", None, &[]);

    let mut template_as = FxHashMap::default();
    template_as.insert("Collection".to_string(), get_mixed());

    codebase
        .add_class("Collection", None, &["Traversable"])
        .template_types
        .insert("T".to_string(), template_as);

    codebase
}

#[test]
fn reflexivity() {
    let codebase = get_codebase();

    let types = vec![
        get_int(),
        get_string(),
        get_literal_int(5),
        get_literal_string("hello".to_string()),
        get_float(),
        get_bool(),
        get_null(),
        get_list(get_int()),
        get_non_empty_list(get_string()),
        get_array(get_string(), get_int()),
        shape(vec![("a", get_int()), ("b", optional(get_string()))]),
        get_named_object("Base"),
        get_generic_object("Collection", vec![get_int()]),
        get_class_string_of_type(get_named_object_atomic("Base")),
        callable(vec![get_int()], get_string()),
        get_iterable(get_int(), get_string()),
    ];

    for ttype in types {
        assert!(
            is_contained_by(&codebase, &ttype, &ttype),
            "{} should contain itself",
            ttype.get_id()
        );
    }
}

#[test]
fn mixed_absorption() {
    let codebase = get_codebase();

    assert!(is_contained_by(&codebase, &get_int(), &get_mixed()));
    assert!(is_contained_by(&codebase, &get_named_object("Base"), &get_mixed()));
    assert!(is_contained_by(&codebase, &get_list(get_int()), &get_mixed()));

    let (is_contained, result) = compare(&codebase, &get_mixed(), &get_int());
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_mixed);

    let (is_contained, result) = compare(&codebase, &get_mixed(), &get_named_object("Base"));
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_mixed);
}

#[test]
fn bottom_absorption() {
    let codebase = get_codebase();

    assert!(is_contained_by(&codebase, &get_nothing(), &get_int()));
    assert!(is_contained_by(&codebase, &get_nothing(), &get_named_object("Base")));
    assert!(is_contained_by(&codebase, &get_nothing(), &get_list(get_string())));
}

#[test]
fn literal_widening() {
    let codebase = get_codebase();

    let (is_contained, result) = compare(&codebase, &get_literal_int(5), &get_int());
    assert!(is_contained);
    assert_eq!(None, result.type_coerced);

    let (is_contained, result) = compare(&codebase, &get_int(), &get_literal_int(5));
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
    assert_eq!(Some(true), result.type_coerced_from_scalar);

    assert!(!is_contained_by(&codebase, &get_literal_int(5), &get_literal_int(6)));
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("a".to_string()),
        &get_non_empty_string()
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_string("".to_string()),
        &get_non_empty_string()
    ));
}

#[test]
fn union_members_each_need_a_home() {
    let codebase = get_codebase();

    let int_or_string = union(vec![TAtomic::TInt, TAtomic::TString]);

    let (is_contained, result) = compare(&codebase, &get_int(), &int_or_string);
    assert!(is_contained);
    assert_eq!(None, result.type_coerced);
    assert_eq!(None, result.type_coerced_from_mixed);

    assert!(is_contained_by(
        &codebase,
        &int_or_string,
        &union(vec![TAtomic::TInt, TAtomic::TString, TAtomic::TFloat])
    ));

    assert!(!is_contained_by(
        &codebase,
        &union(vec![
            TAtomic::TInt,
            TAtomic::TArray {
                key_param: get_int(),
                value_param: get_int(),
                non_empty: false,
                is_callable: false,
            }
        ]),
        &int_or_string
    ));
}

#[test]
fn booleans() {
    let codebase = get_codebase();

    assert!(is_contained_by(&codebase, &get_true(), &get_bool()));
    assert!(is_contained_by(&codebase, &get_false(), &get_bool()));

    let (is_contained, result) = compare(&codebase, &get_bool(), &get_true());
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
}

#[test]
fn null_and_false_can_be_ignored() {
    let codebase = get_codebase();

    let nullable_int = union(vec![TAtomic::TInt, TAtomic::TNull]);

    assert!(!is_contained_by(&codebase, &nullable_int, &get_int()));
    assert!(union_type_comparator::is_contained_by(
        &codebase,
        &file_path(),
        &nullable_int,
        &get_int(),
        true,
        false,
        false,
        &mut TypeComparisonResult::new(),
    ));

    let falsable_int = union(vec![TAtomic::TInt, TAtomic::TFalse]);

    assert!(union_type_comparator::is_contained_by(
        &codebase,
        &file_path(),
        &falsable_int,
        &get_int(),
        false,
        true,
        false,
        &mut TypeComparisonResult::new(),
    ));
}

#[test]
fn possibly_undefined_input() {
    let codebase = get_codebase();

    assert!(!is_contained_by(&codebase, &optional(get_int()), &get_int()));
    assert!(is_contained_by(
        &codebase,
        &optional(get_int()),
        &optional(get_int())
    ));
}

#[test]
fn numeric_accommodation() {
    let codebase = get_codebase();

    assert!(is_contained_by(
        &codebase,
        &get_numeric(),
        &union(vec![TAtomic::TInt, TAtomic::TFloat, TAtomic::TString])
    ));

    let (is_contained, result) = compare(&codebase, &get_numeric(), &get_int());
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
}

#[test]
fn arraykey_splits_into_int_and_string() {
    let codebase = get_codebase();

    assert!(is_contained_by(
        &codebase,
        &get_arraykey(),
        &union(vec![TAtomic::TInt, TAtomic::TString])
    ));

    let (is_contained, result) = compare(&codebase, &get_arraykey(), &get_int());
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_mixed);
}

#[test]
fn int_into_float() {
    let codebase = get_codebase();

    // the union entry point allows int-to-float widening
    assert!(is_contained_by(&codebase, &get_int(), &get_float()));

    assert!(!atomic_type_comparator::is_contained_by(
        &codebase,
        &file_path(),
        &TAtomic::TInt,
        &TAtomic::TFloat,
        false,
        false,
        &mut TypeComparisonResult::new(),
    ));
}

#[test]
fn scalar_mismatch_reports_no_scalar_match() {
    let codebase = get_codebase();

    let (is_contained, result) = compare(&codebase, &get_int(), &get_string());
    assert!(!is_contained);
    assert_eq!(Some(false), result.scalar_type_match_found);
}

#[test]
fn positive_ints() {
    let codebase = get_codebase();

    let positive_int = wrap_atomic(TAtomic::TPositiveInt);

    assert!(is_contained_by(&codebase, &positive_int, &positive_int));
    assert!(is_contained_by(&codebase, &get_literal_int(5), &positive_int));
    assert!(!is_contained_by(&codebase, &get_literal_int(0), &positive_int));
    assert!(!is_contained_by(&codebase, &get_literal_int(-3), &positive_int));
    assert!(is_contained_by(&codebase, &positive_int, &get_int()));

    let (is_contained, result) = compare(&codebase, &get_int(), &positive_int);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
    assert_eq!(Some(true), result.type_coerced_from_scalar);

    let (is_contained, result) = compare(&codebase, &positive_int, &get_literal_int(5));
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_scalar);
}

#[test]
fn lowercase_strings() {
    let codebase = get_codebase();

    let lowercase = wrap_atomic(TAtomic::TLowercaseString);
    let non_empty_lowercase = wrap_atomic(TAtomic::TNonEmptyLowercaseString);

    assert!(is_contained_by(
        &codebase,
        &get_literal_string("abc".to_string()),
        &lowercase
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_string("Abc".to_string()),
        &lowercase
    ));
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("abc".to_string()),
        &non_empty_lowercase
    ));

    // the empty string is lowercase but not non-empty
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("".to_string()),
        &lowercase
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_string("".to_string()),
        &non_empty_lowercase
    ));

    assert!(is_contained_by(&codebase, &non_empty_lowercase, &lowercase));
    assert!(is_contained_by(&codebase, &non_empty_lowercase, &non_empty_lowercase));
    assert!(is_contained_by(&codebase, &lowercase, &get_string()));

    let (is_contained, result) = compare(&codebase, &lowercase, &non_empty_lowercase);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    let (is_contained, result) = compare(&codebase, &get_string(), &lowercase);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    let (is_contained, result) =
        compare(&codebase, &lowercase, &get_literal_string("abc".to_string()));
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_scalar);

    // a lowercase string can never be "Abc"
    let (is_contained, result) =
        compare(&codebase, &lowercase, &get_literal_string("Abc".to_string()));
    assert!(!is_contained);
    assert_eq!(None, result.type_coerced);
}

#[test]
fn numeric_and_html_escaped_strings() {
    let codebase = get_codebase();

    let numeric_string = wrap_atomic(TAtomic::TNumericString);

    assert!(is_contained_by(&codebase, &numeric_string, &numeric_string));
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("12".to_string()),
        &numeric_string
    ));
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("1.5e3".to_string()),
        &numeric_string
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_string("abc".to_string()),
        &numeric_string
    ));
    assert!(is_contained_by(&codebase, &numeric_string, &get_string()));
    assert!(is_contained_by(&codebase, &numeric_string, &get_non_empty_string()));

    let (is_contained, result) = compare(&codebase, &get_string(), &numeric_string);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    let (is_contained, result) =
        compare(&codebase, &numeric_string, &get_literal_string("12".to_string()));
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
    assert_eq!(Some(true), result.type_coerced_from_scalar);

    let (is_contained, result) =
        compare(&codebase, &numeric_string, &get_literal_string("abc".to_string()));
    assert!(!is_contained);
    assert_eq!(None, result.type_coerced);

    let html_escaped = wrap_atomic(TAtomic::THtmlEscapedString);

    assert!(is_contained_by(&codebase, &html_escaped, &html_escaped));
    assert!(is_contained_by(&codebase, &html_escaped, &get_string()));

    let (is_contained, result) = compare(&codebase, &get_string(), &html_escaped);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    let (is_contained, result) = compare(&codebase, &html_escaped, &get_non_empty_string());
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
}

#[test]
fn trait_strings() {
    let codebase = get_codebase();

    let trait_string = wrap_atomic(TAtomic::TTraitString);

    assert!(is_contained_by(&codebase, &trait_string, &trait_string));
    assert!(is_contained_by(&codebase, &trait_string, &get_string()));
    assert!(is_contained_by(&codebase, &trait_string, &get_non_empty_string()));

    let (is_contained, result) = compare(&codebase, &get_string(), &trait_string);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    let (is_contained, result) = compare(&codebase, &get_non_empty_string(), &trait_string);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
}

#[test]
fn single_letters() {
    let codebase = get_codebase();

    let single_letter = wrap_atomic(TAtomic::TSingleLetter);

    assert!(is_contained_by(
        &codebase,
        &get_literal_string("a".to_string()),
        &single_letter
    ));
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("é".to_string()),
        &single_letter
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_string("ab".to_string()),
        &single_letter
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_string("".to_string()),
        &single_letter
    ));
    assert!(is_contained_by(&codebase, &single_letter, &get_string()));
    assert!(is_contained_by(&codebase, &single_letter, &get_non_empty_string()));

    let (is_contained, result) = compare(&codebase, &get_string(), &single_letter);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
    assert_eq!(Some(true), result.type_coerced_from_scalar);
}

#[test]
fn named_objects() {
    let codebase = get_codebase();

    assert!(is_contained_by(
        &codebase,
        &get_named_object("Derived"),
        &get_named_object("Base")
    ));
    assert!(is_contained_by(
        &codebase,
        &get_named_object("derived"),
        &get_named_object("BASE")
    ));

    let (is_contained, result) = compare(
        &codebase,
        &get_named_object("Base"),
        &get_named_object("Derived"),
    );
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    let (is_contained, result) = compare(
        &codebase,
        &get_named_object("Unrelated"),
        &get_named_object("Base"),
    );
    assert!(!is_contained);
    assert_eq!(None, result.type_coerced);

    assert!(is_contained_by(&codebase, &get_named_object("Base"), &get_object()));

    let (is_contained, result) = compare(&codebase, &get_object(), &get_named_object("Base"));
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
}

#[test]
fn class_aliases_resolve() {
    let mut codebase = get_codebase();
    codebase.add_class_alias("BaseAlias", "Base");

    assert!(is_contained_by(
        &codebase,
        &get_named_object("Derived"),
        &get_named_object("BaseAlias")
    ));
    assert!(is_contained_by(
        &codebase,
        &get_literal_class_string("BaseAlias"),
        &get_literal_class_string("Base")
    ));
}

#[test]
fn interfaces() {
    let mut codebase = get_codebase();
    codebase.add_interface("Shape", &[]);
    codebase.add_interface("Polygon", &["Shape"]);
    codebase.add_interface("Other", &[]);
    codebase.add_class("Square", None, &["Polygon"]);

    assert!(is_contained_by(
        &codebase,
        &get_named_object("Square"),
        &get_named_object("Shape")
    ));
    assert!(is_contained_by(
        &codebase,
        &get_named_object("Polygon"),
        &get_named_object("Shape")
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_named_object("Other"),
        &get_named_object("Shape")
    ));

    // unrelated interfaces can be equal when interface equality is allowed
    assert!(union_type_comparator::is_contained_by(
        &codebase,
        &file_path(),
        &get_named_object("Other"),
        &get_named_object("Shape"),
        false,
        false,
        true,
        &mut TypeComparisonResult::new(),
    ));
}

#[test]
fn mock_classes_fit_anywhere() {
    let mut codebase = get_codebase();
    codebase
        .config
        .mock_classes
        .push(glob::Pattern::new("*mock*").unwrap());

    assert!(is_contained_by(
        &codebase,
        &get_named_object("BaseMock"),
        &get_named_object("Base")
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_named_object("Unrelated"),
        &get_named_object("Base")
    ));
}

#[test]
fn closures_and_callable_objects() {
    let mut codebase = get_codebase();
    codebase.add_class("Closure", None, &[]);
    codebase.add_class("Invokable", None, &[]);
    codebase.add_method("Invokable", method("__invoke", vec![], get_int()));

    assert!(is_contained_by(
        &codebase,
        &get_named_object("Closure"),
        &wrap_atomic(TAtomic::TCallable {
            params: None,
            return_type: None,
            is_pure: None,
        })
    ));

    let callable_object = wrap_atomic(TAtomic::TCallableObject);

    assert!(is_contained_by(
        &codebase,
        &get_named_object("Invokable"),
        &callable_object
    ));
    assert!(!is_contained_by(&codebase, &get_named_object("Base"), &callable_object));
    assert!(is_contained_by(&codebase, &callable_object, &get_object()));

    assert!(is_contained_by(
        &codebase,
        &get_named_object("Invokable"),
        &callable(vec![], get_int())
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_named_object("Invokable"),
        &callable(vec![], get_string())
    ));
}

#[test]
fn callable_variance() {
    let codebase = get_codebase();

    let base = get_named_object("Base");
    let derived = get_named_object("Derived");

    // wider params and a narrower return are fine
    assert!(is_contained_by(
        &codebase,
        &callable(vec![base.clone()], derived.clone()),
        &callable(vec![derived.clone()], base.clone())
    ));

    assert!(!is_contained_by(
        &codebase,
        &callable(vec![derived.clone()], base.clone()),
        &callable(vec![base.clone()], derived.clone())
    ));

    assert!(!is_contained_by(
        &codebase,
        &callable(vec![get_string()], base.clone()),
        &callable(vec![get_int()], base)
    ));
}

#[test]
fn callable_void_return_and_purity() {
    let codebase = get_codebase();

    assert!(is_contained_by(
        &codebase,
        &callable(vec![], get_void()),
        &callable(vec![], union(vec![TAtomic::TInt, TAtomic::TNull]))
    ));

    let pure_container = wrap_atomic(TAtomic::TCallable {
        params: None,
        return_type: None,
        is_pure: Some(true),
    });

    let (is_contained, result) = compare(
        &codebase,
        &wrap_atomic(TAtomic::TCallable {
            params: None,
            return_type: None,
            is_pure: Some(false),
        }),
        &pure_container,
    );
    assert!(!is_contained);
    assert_eq!(Some(false), result.type_coerced);

    let (is_contained, result) = compare(
        &codebase,
        &wrap_atomic(TAtomic::TCallable {
            params: None,
            return_type: None,
            is_pure: None,
        }),
        &pure_container,
    );
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
}

#[test]
fn variadic_container_param_absorbs_extra_params() {
    let codebase = get_codebase();

    let mut variadic = FunctionLikeParameter::with_type("xs", get_int());
    variadic.is_variadic = true;

    let variadic_container = wrap_atomic(TAtomic::TCallable {
        params: Some(vec![variadic]),
        return_type: None,
        is_pure: None,
    });

    assert!(is_contained_by(
        &codebase,
        &callable(vec![get_int(), get_int()], get_void()),
        &variadic_container
    ));
    assert!(!is_contained_by(
        &codebase,
        &callable(vec![get_int(), get_string()], get_void()),
        &variadic_container
    ));
}

#[test]
fn closures_are_narrower_than_callables() {
    let codebase = get_codebase();

    let closure = wrap_atomic(TAtomic::TClosure {
        params: Some(vec![]),
        return_type: Some(get_int()),
        is_pure: None,
    });

    assert!(is_contained_by(&codebase, &closure, &callable(vec![], get_int())));

    let (is_contained, result) = compare(
        &codebase,
        &callable(vec![], get_int()),
        &wrap_atomic(TAtomic::TClosure {
            params: Some(vec![]),
            return_type: Some(get_int()),
            is_pure: None,
        }),
    );
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
}

#[test]
fn callable_strings() {
    let mut codebase = get_codebase();

    codebase.add_call_map_entry(
        "strlen",
        vec![TAtomic::TCallable {
            params: Some(vec![FunctionLikeParameter::with_type("string", get_string())]),
            return_type: Some(get_int()),
            is_pure: Some(true),
        }],
    );

    codebase.add_function(method("takes_int", vec![get_int()], get_void()));

    let strlen = get_literal_string("strlen".to_string());

    assert!(is_contained_by(
        &codebase,
        &strlen,
        &callable(vec![get_string()], get_int())
    ));
    assert!(!is_contained_by(
        &codebase,
        &strlen,
        &callable(vec![get_string()], get_string())
    ));

    let takes_int = get_literal_string("takes_int".to_string());

    assert!(is_contained_by(
        &codebase,
        &takes_int,
        &callable(vec![get_int()], get_void())
    ));
    assert!(!is_contained_by(
        &codebase,
        &takes_int,
        &callable(vec![get_string()], get_void())
    ));

    // unknown functions are given the benefit of the doubt
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("no_such_function".to_string()),
        &callable(vec![get_string()], get_void())
    ));

    let callable_string = wrap_atomic(TAtomic::TCallableString);

    assert!(is_contained_by(&codebase, &strlen, &callable_string));

    let (is_contained, result) = compare(
        &codebase,
        &get_literal_string("no_such_function".to_string()),
        &callable_string,
    );
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_scalar);
}

#[test]
fn call_map_overloads_follow_the_container() {
    let mut codebase = get_codebase();

    codebase.add_call_map_entry(
        "convert",
        vec![
            TAtomic::TCallable {
                params: Some(vec![FunctionLikeParameter::with_type("value", get_int())]),
                return_type: Some(get_string()),
                is_pure: None,
            },
            TAtomic::TCallable {
                params: Some(vec![FunctionLikeParameter::with_type("value", get_string())]),
                return_type: Some(get_int()),
                is_pure: None,
            },
        ],
    );

    let convert = get_literal_string("convert".to_string());

    assert!(is_contained_by(
        &codebase,
        &convert,
        &callable(vec![get_int()], get_string())
    ));
    assert!(is_contained_by(
        &codebase,
        &convert,
        &callable(vec![get_string()], get_int())
    ));

    let resolved = callable_type_comparator::get_callable_from_atomic(
        &codebase,
        &file_path(),
        &TAtomic::TLiteralString {
            value: "convert".to_string(),
        },
        None,
    );

    assert_eq!(
        Some("callable(int):string".to_string()),
        resolved.map(|callable| callable.get_id())
    );
}

#[test]
fn static_method_strings() {
    let mut codebase = get_codebase();
    codebase.add_method("Base", method("make", vec![], get_named_object("Base")));
    codebase.add_class("SubBase", Some("Base"), &[]);

    assert!(is_contained_by(
        &codebase,
        &get_literal_string("Base::make".to_string()),
        &callable(vec![], get_named_object("Base"))
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_string("Base::make".to_string()),
        &callable(vec![], get_string())
    ));

    // inherited from Base
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("SubBase::make".to_string()),
        &callable(vec![], get_named_object("Base"))
    ));
}

#[test]
fn callable_arrays() {
    let mut codebase = get_codebase();
    codebase.add_method("Base", method("run", vec![get_int()], get_string()));

    let run_array = get_keyed_array(vec![
        (ArrayKey::Int(0), get_literal_string("Base".to_string())),
        (ArrayKey::Int(1), get_literal_string("run".to_string())),
    ]);

    let run_atomic = run_array.get_single().cloned().unwrap();

    assert_eq!(
        CallableArrayTarget::Method(sigil_code_info::method_identifier::MethodIdentifier(
            "Base".to_string(),
            "run".to_string()
        )),
        callable_type_comparator::get_callable_method_id_from_keyed_array(
            &codebase,
            &file_path(),
            &run_atomic
        )
    );

    assert!(is_contained_by(
        &codebase,
        &run_array,
        &callable(vec![get_int()], get_string())
    ));
    assert!(!is_contained_by(
        &codebase,
        &run_array,
        &callable(vec![get_int()], get_int())
    ));

    let missing_method_array = get_keyed_array(vec![
        (ArrayKey::Int(0), get_named_object("Base")),
        (ArrayKey::Int(1), get_literal_string("missing".to_string())),
    ]);

    assert!(!is_contained_by(
        &codebase,
        &missing_method_array,
        &wrap_atomic(TAtomic::TCallable {
            params: None,
            return_type: None,
            is_pure: None,
        })
    ));

    let three_entries = get_keyed_array(vec![
        (ArrayKey::Int(0), get_literal_string("Base".to_string())),
        (ArrayKey::Int(1), get_literal_string("run".to_string())),
        (ArrayKey::Int(2), get_int()),
    ]);

    assert_eq!(
        CallableArrayTarget::NotCallable,
        callable_type_comparator::get_callable_method_id_from_keyed_array(
            &codebase,
            &file_path(),
            three_entries.get_single().unwrap()
        )
    );
}

#[test]
fn ambiguous_callable_arrays_record_mixed_members() {
    let codebase = get_codebase();

    let dynamic_method = get_keyed_array(vec![
        (ArrayKey::Int(0), get_named_object("Base")),
        (ArrayKey::Int(1), get_string()),
    ]);

    assert_eq!(
        CallableArrayTarget::Ambiguous,
        callable_type_comparator::get_callable_method_id_from_keyed_array(
            &codebase,
            &file_path(),
            dynamic_method.get_single().unwrap()
        )
    );

    assert!(codebase
        .mixed_member_names
        .get(&file_path())
        .contains("base::"));

    let unknown_class = get_keyed_array(vec![
        (ArrayKey::Int(0), get_mixed()),
        (ArrayKey::Int(1), get_literal_string("run".to_string())),
    ]);

    assert_eq!(
        CallableArrayTarget::Ambiguous,
        callable_type_comparator::get_callable_method_id_from_keyed_array(
            &codebase,
            &file_path(),
            unknown_class.get_single().unwrap()
        )
    );

    assert!(codebase
        .mixed_member_names
        .get(&file_path())
        .contains("run"));

    let self_reference = get_keyed_array(vec![
        (ArrayKey::Int(0), get_literal_string("self".to_string())),
        (ArrayKey::Int(1), get_literal_string("run".to_string())),
    ]);

    assert_eq!(
        CallableArrayTarget::Ambiguous,
        callable_type_comparator::get_callable_method_id_from_keyed_array(
            &codebase,
            &file_path(),
            self_reference.get_single().unwrap()
        )
    );
}

#[test]
fn callable_arrays_of_strings() {
    let codebase = get_codebase();

    let any_callable = wrap_atomic(TAtomic::TCallable {
        params: None,
        return_type: None,
        is_pure: None,
    });

    let (is_contained, result) = compare(&codebase, &get_list(get_string()), &any_callable);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_mixed);

    assert!(!is_contained_by(&codebase, &get_list(get_int()), &any_callable));
}

#[test]
fn class_strings_mirror_objects() {
    let codebase = get_codebase();

    let base_class_string = get_class_string_of_type(get_named_object_atomic("Base"));
    let derived_class_string = get_class_string_of_type(get_named_object_atomic("Derived"));

    assert!(is_contained_by(
        &codebase,
        &derived_class_string,
        &base_class_string
    ));

    let (is_contained, result) = compare(&codebase, &base_class_string, &derived_class_string);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    assert!(is_contained_by(
        &codebase,
        &get_literal_class_string("Derived"),
        &base_class_string
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_class_string("Unrelated"),
        &base_class_string
    ));
    assert!(is_contained_by(
        &codebase,
        &get_literal_class_string("derived"),
        &get_literal_class_string("Derived")
    ));

    let any_class_string = wrap_atomic(TAtomic::TClassString {
        as_: "object".to_string(),
        as_type: None,
    });

    assert!(is_contained_by(&codebase, &derived_class_string, &any_class_string));

    let (is_contained, result) = compare(&codebase, &any_class_string, &base_class_string);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_scalar);

    let (is_contained, result) = compare(&codebase, &get_string(), &base_class_string);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    assert!(is_contained_by(&codebase, &base_class_string, &get_string()));
}

#[test]
fn stringable_objects_cast_to_string() {
    let mut codebase = get_codebase();
    codebase.add_class("Name", None, &["Stringable"]);
    codebase.add_class("Label", None, &[]);
    codebase.add_method("Label", method("__toString", vec![], get_string()));

    let (is_contained, result) = compare(&codebase, &get_named_object("Name"), &get_string());
    assert!(is_contained);
    assert_eq!(Some(true), result.to_string_cast);

    let (is_contained, result) = compare(&codebase, &get_named_object("Label"), &get_string());
    assert!(is_contained);
    assert_eq!(Some(true), result.to_string_cast);

    assert!(!is_contained_by(&codebase, &get_named_object("Base"), &get_string()));

    // a __toString cast doesn't count as a match
    let mut matching_input_keys = FxHashSet::default();
    assert!(!union_type_comparator::can_be_contained_by(
        &codebase,
        &file_path(),
        &get_named_object("Label"),
        &get_string(),
        false,
        false,
        &mut matching_input_keys,
    ));
}

#[test]
fn stringable_needs_php_8() {
    let mut codebase = get_codebase();
    codebase.config.php_major_version = 7;
    codebase.add_class("Name", None, &["Stringable"]);

    assert!(!is_contained_by(&codebase, &get_named_object("Name"), &get_string()));
}

#[test]
fn shapes() {
    let codebase = get_codebase();

    let x_and_y = shape(vec![("x", get_int()), ("y", get_string())]);
    let only_x = shape(vec![("x", get_int())]);

    assert!(is_contained_by(&codebase, &x_and_y, &only_x));
    assert!(!is_contained_by(&codebase, &only_x, &x_and_y));

    let optional_y = shape(vec![("x", get_int()), ("y", optional(get_string()))]);

    assert!(is_contained_by(&codebase, &only_x, &optional_y));
    assert!(!is_contained_by(
        &codebase,
        &shape(vec![("x", get_string())]),
        &only_x
    ));
}

#[test]
fn shape_property_mismatch_in_reverse_is_coerced() {
    let codebase = get_codebase();

    let (is_contained, result) = compare(
        &codebase,
        &shape(vec![("x", get_named_object("Base"))]),
        &shape(vec![("x", get_named_object("Derived"))]),
    );

    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
}

#[test]
fn shapes_and_arrays() {
    let codebase = get_codebase();

    let a_and_b = shape(vec![("a", get_int()), ("b", get_string())]);

    assert!(is_contained_by(
        &codebase,
        &a_and_b,
        &get_array(get_string(), union(vec![TAtomic::TInt, TAtomic::TString]))
    ));
    assert!(!is_contained_by(
        &codebase,
        &a_and_b,
        &get_array(get_string(), get_int())
    ));

    assert!(!is_contained_by(
        &codebase,
        &get_array(get_string(), get_int()),
        &shape(vec![("a", get_int())])
    ));

    // a single known key in a non-empty array defines it
    assert!(is_contained_by(
        &codebase,
        &get_non_empty_array(get_literal_string("a".to_string()), get_int()),
        &shape(vec![("a", get_int())])
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_array(get_literal_string("a".to_string()), get_int()),
        &shape(vec![("a", get_int())])
    ));
    assert!(is_contained_by(
        &codebase,
        &get_array(
            union(vec![
                TAtomic::TLiteralString {
                    value: "a".to_string()
                },
                TAtomic::TLiteralString {
                    value: "b".to_string()
                }
            ]),
            get_int()
        ),
        &shape(vec![("a", optional(get_int())), ("b", optional(get_int()))])
    ));
}

#[test]
fn lists() {
    let codebase = get_codebase();

    assert!(!is_contained_by(
        &codebase,
        &get_list(get_int()),
        &get_non_empty_list(get_int())
    ));
    assert!(is_contained_by(
        &codebase,
        &get_non_empty_list(get_int()),
        &get_non_empty_list(get_int())
    ));
    assert!(is_contained_by(
        &codebase,
        &get_non_empty_list(get_int()),
        &get_list(get_int())
    ));
    assert!(is_contained_by(
        &codebase,
        &get_list(get_literal_int(1)),
        &get_list(get_int())
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_list(get_int()),
        &get_list(get_string())
    ));
}

#[test]
fn lists_and_arrays() {
    let codebase = get_codebase();

    assert!(is_contained_by(
        &codebase,
        &get_list(get_string()),
        &get_array(get_int(), get_string())
    ));
    assert!(is_contained_by(
        &codebase,
        &get_non_empty_list(get_string()),
        &get_non_empty_array(get_int(), get_string())
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_list(get_string()),
        &get_non_empty_array(get_int(), get_string())
    ));

    let (is_contained, result) = compare(
        &codebase,
        &get_array(get_int(), get_string()),
        &get_list(get_string()),
    );
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    assert!(is_contained_by(&codebase, &get_empty_array(), &get_list(get_string())));
    assert!(!is_contained_by(
        &codebase,
        &get_empty_array(),
        &get_non_empty_list(get_string())
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_empty_array(),
        &get_non_empty_array(get_string(), get_int())
    ));
}

#[test]
fn list_shapes() {
    let codebase = get_codebase();

    let pair = get_keyed_array(vec![
        (ArrayKey::Int(0), get_int()),
        (ArrayKey::Int(1), get_int()),
    ]);

    assert!(is_contained_by(&codebase, &pair, &get_non_empty_list(get_int())));
    assert!(!is_contained_by(&codebase, &pair, &get_list(get_string())));

    assert!(!is_contained_by(
        &codebase,
        &shape(vec![("a", get_int())]),
        &get_list(get_int())
    ));
}

#[test]
fn array_keys_from_mixed() {
    let codebase = get_codebase();

    assert!(is_contained_by(
        &codebase,
        &get_array(get_mixed(), get_int()),
        &get_array(union(vec![TAtomic::TInt, TAtomic::TString]), get_int())
    ));

    let (is_contained, result) = compare(
        &codebase,
        &get_array(get_int(), get_mixed()),
        &get_array(get_int(), get_int()),
    );
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_mixed);
}

#[test]
fn class_string_maps() {
    let codebase = get_codebase();

    let class_string_map = wrap_atomic(TAtomic::TClassStringMap {
        param_name: "T".to_string(),
        as_type: Some(Box::new(get_named_object_atomic("Base"))),
        value_param: get_int(),
    });

    assert!(is_contained_by(
        &codebase,
        &class_string_map,
        &get_array(get_string(), get_int())
    ));
    assert!(!is_contained_by(
        &codebase,
        &class_string_map,
        &get_list(get_int())
    ));
}

#[test]
fn arrays_into_iterables() {
    let codebase = get_codebase();

    assert!(is_contained_by(
        &codebase,
        &get_list(get_int()),
        &get_iterable(get_int(), get_int())
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_list(get_string()),
        &get_iterable(get_int(), get_int())
    ));
    assert!(is_contained_by(
        &codebase,
        &shape(vec![("a", get_int())]),
        &get_iterable(get_string(), get_int())
    ));

    let value_only_iterable = wrap_atomic(TAtomic::TIterable {
        type_params: vec![get_int()],
        extra_types: None,
    });

    assert!(is_contained_by(
        &codebase,
        &get_array(get_string(), get_int()),
        &value_only_iterable
    ));
}

#[test]
fn traversables_into_iterables() {
    let codebase = get_codebase();

    assert!(is_contained_by(
        &codebase,
        &get_named_object("Collection"),
        &get_iterable(get_mixed(), get_mixed())
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_named_object("Base"),
        &get_iterable(get_mixed(), get_mixed())
    ));
}

#[test]
fn generic_objects_are_invariant_by_default() {
    let codebase = get_codebase();

    let int_collection = get_generic_object("Collection", vec![get_int()]);

    assert!(is_contained_by(
        &codebase,
        &int_collection,
        &get_generic_object("Collection", vec![get_int()])
    ));

    let (is_contained, result) = compare(
        &codebase,
        &int_collection,
        &get_generic_object(
            "Collection",
            vec![union(vec![TAtomic::TInt, TAtomic::TString])],
        ),
    );
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);

    assert!(!is_contained_by(
        &codebase,
        &int_collection,
        &get_generic_object("Collection", vec![get_string()])
    ));

    // mixed slots accept anything
    assert!(is_contained_by(
        &codebase,
        &int_collection,
        &get_generic_object("Collection", vec![get_mixed()])
    ));
}

#[test]
fn covariant_generic_params() {
    let mut codebase = get_codebase();

    if let Some(collection) = codebase.classlike_infos.get_mut("collection") {
        collection.generic_variance.insert(0, Variance::Covariant);
    }

    assert!(is_contained_by(
        &codebase,
        &get_generic_object("Collection", vec![get_int()]),
        &get_generic_object(
            "Collection",
            vec![union(vec![TAtomic::TInt, TAtomic::TString])]
        )
    ));
    assert!(is_contained_by(
        &codebase,
        &get_generic_object("Collection", vec![get_named_object("Derived")]),
        &get_generic_object("Collection", vec![get_named_object("Base")])
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_generic_object("Collection", vec![get_named_object("Base")]),
        &get_generic_object("Collection", vec![get_named_object("Derived")])
    ));
}

#[test]
fn literal_generic_params_suggest_a_replacement() {
    let codebase = get_codebase();

    let (is_contained, result) = compare(
        &codebase,
        &get_generic_object("Collection", vec![get_literal_int(5)]),
        &get_generic_object("Collection", vec![get_int()]),
    );

    assert!(is_contained);
    assert_eq!(
        Some("Collection<int>".to_string()),
        result
            .replacement_union_type
            .map(|replacement| replacement.get_id())
    );

    let (is_contained, result) = compare(
        &codebase,
        &get_generic_object("Collection", vec![get_nothing()]),
        &get_generic_object("Collection", vec![get_string()]),
    );

    assert!(is_contained);
    assert_eq!(
        Some("Collection<string>".to_string()),
        result
            .replacement_union_type
            .map(|replacement| replacement.get_id())
    );
}

#[test]
fn raw_generic_objects() {
    let mut codebase = get_codebase();

    let int_collection = codebase.add_class("IntCollection", Some("Collection"), &[]);
    let mut extended_params = IndexMap::new();
    extended_params.insert("T".to_string(), get_int());
    int_collection
        .template_extended_params
        .insert("collection".to_string(), extended_params);

    assert!(is_contained_by(
        &codebase,
        &get_named_object("IntCollection"),
        &get_generic_object("Collection", vec![get_int()])
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_named_object("IntCollection"),
        &get_generic_object("Collection", vec![get_string()])
    ));

    let (is_contained, result) = compare(
        &codebase,
        &get_named_object("Collection"),
        &get_generic_object("Collection", vec![get_int()]),
    );
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_mixed);
}

#[test]
fn generic_params_map_onto_ancestor_slots() {
    let mut codebase = get_codebase();

    // Bag<T> extends Collection<list<T>>
    let mut template_as = FxHashMap::default();
    template_as.insert("Bag".to_string(), get_mixed());

    let bag = codebase.add_class("Bag", Some("Collection"), &[]);
    bag.template_types.insert("T".to_string(), template_as);

    let mut extended_params = IndexMap::new();
    extended_params.insert(
        "T".to_string(),
        get_list(get_template_param("T", "Bag", get_mixed())),
    );
    bag.template_extended_params
        .insert("collection".to_string(), extended_params);

    assert!(is_contained_by(
        &codebase,
        &get_generic_object("Bag", vec![get_int()]),
        &get_generic_object("Collection", vec![get_list(get_int())])
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_generic_object("Bag", vec![get_string()]),
        &get_generic_object("Collection", vec![get_list(get_int())])
    ));
}

#[test]
fn generators() {
    let codebase = get_codebase();

    let generator = get_generic_object(
        "Generator",
        vec![get_int(), get_string(), get_mixed(), get_void()],
    );

    assert!(is_contained_by(
        &codebase,
        &generator,
        &get_generic_object("Traversable", vec![get_int(), get_string()])
    ));
    assert!(!is_contained_by(
        &codebase,
        &generator,
        &get_generic_object("Traversable", vec![get_int(), get_int()])
    ));
}

#[test]
fn template_params() {
    let codebase = get_codebase();

    let t_of_base = get_template_param("T", "Collection", get_named_object("Base"));

    assert!(is_contained_by(&codebase, &t_of_base, &get_named_object("Base")));
    assert!(!is_contained_by(&codebase, &t_of_base, &get_named_object("Derived")));
    assert!(is_contained_by(&codebase, &t_of_base, &t_of_base));

    assert!(!is_contained_by(
        &codebase,
        &t_of_base,
        &get_template_param("U", "Collection", get_named_object("Base"))
    ));

    // function-scoped templates with the same name line up
    assert!(is_contained_by(
        &codebase,
        &get_template_param("T", "fn-foo", get_mixed()),
        &get_template_param("T", "fn-bar", get_mixed())
    ));

    let t_of_mixed = get_template_param("T", "fn-foo", get_mixed());

    let (is_contained, result) = compare(&codebase, &t_of_mixed, &get_int());
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_mixed);
}

#[test]
fn key_of_templates() {
    let codebase = get_codebase();

    let key_of = |as_type: TUnion| {
        wrap_atomic(TAtomic::TTemplateKeyOf {
            param_name: "T".to_string(),
            defining_entity: "fn-foo".to_string(),
            as_type,
        })
    };

    let int_keys = key_of(get_array(get_int(), get_string()));
    let string_keys = key_of(get_array(get_string(), get_int()));

    // every key of the bound has to fit
    assert!(is_contained_by(&codebase, &int_keys, &get_int()));
    assert!(!is_contained_by(&codebase, &int_keys, &get_string()));
    assert!(is_contained_by(&codebase, &string_keys, &get_string()));
    assert!(is_contained_by(&codebase, &int_keys, &get_arraykey()));
    assert!(is_contained_by(&codebase, &string_keys, &get_arraykey()));

    // as a container only another key-of fits, compared by bound
    assert!(is_contained_by(&codebase, &int_keys, &int_keys));
    assert!(!is_contained_by(&codebase, &string_keys, &int_keys));
    assert!(!is_contained_by(&codebase, &get_int(), &int_keys));
}

#[test]
fn debug_type_and_get_class_results() {
    let codebase = get_codebase();

    let debug_type = wrap_atomic(TAtomic::TDependentGetDebugType);

    assert!(is_contained_by(&codebase, &debug_type, &get_string()));
    assert!(!is_contained_by(&codebase, &debug_type, &get_int()));
    assert!(is_contained_by(&codebase, &get_string(), &debug_type));
    assert!(is_contained_by(
        &codebase,
        &get_literal_string("int".to_string()),
        &debug_type
    ));
    assert!(!is_contained_by(&codebase, &get_int(), &debug_type));

    let class_string_of = |name: &str| get_class_string_of_type(get_named_object_atomic(name));

    let class_of_base = wrap_atomic(TAtomic::TDependentGetClass {
        as_type: get_named_object("Base"),
    });

    assert!(is_contained_by(&codebase, &class_of_base, &class_string_of("Base")));
    assert!(!is_contained_by(&codebase, &class_of_base, &class_string_of("Derived")));
    assert!(is_contained_by(&codebase, &class_of_base, &get_string()));

    assert!(is_contained_by(&codebase, &class_string_of("Derived"), &class_of_base));
    assert!(!is_contained_by(
        &codebase,
        &get_literal_class_string("Unrelated"),
        &class_of_base
    ));

    let (is_contained, result) = compare(&codebase, &get_string(), &class_of_base);
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced_from_scalar);

    // the class of a templated value is a template class-string bounded the same way
    let class_of_template = wrap_atomic(TAtomic::TDependentGetClass {
        as_type: get_template_param("T", "Collection", get_named_object("Base")),
    });

    assert!(is_contained_by(
        &codebase,
        &class_of_template,
        &class_string_of("Base")
    ));
    assert!(!is_contained_by(
        &codebase,
        &class_of_template,
        &class_string_of("Derived")
    ));
}

#[test]
fn conditional_types() {
    let codebase = get_codebase();

    let conditional = |if_type: TUnion, else_type: TUnion| {
        wrap_atomic(TAtomic::TConditional {
            param_name: "T".to_string(),
            defining_entity: "fn-foo".to_string(),
            as_type: get_mixed(),
            conditional_type: get_int(),
            if_type,
            else_type,
        })
    };

    let int_or_string = conditional(get_int(), get_string());

    assert!(is_contained_by(&codebase, &get_int(), &int_or_string));
    assert!(is_contained_by(&codebase, &get_string(), &int_or_string));
    assert!(!is_contained_by(&codebase, &get_named_object("Base"), &int_or_string));

    // as an input, one possible branch fitting is enough
    let int_or_base = conditional(get_int(), get_named_object("Base"));

    assert!(is_contained_by(&codebase, &int_or_base, &get_int()));
    assert!(is_contained_by(&codebase, &int_or_base, &get_named_object("Base")));
    assert!(!is_contained_by(&codebase, &int_or_base, &get_string()));
    assert!(!is_contained_by(
        &codebase,
        &conditional(get_named_object("Base"), get_named_object("Unrelated")),
        &get_named_object("Derived")
    ));
}

#[test]
fn empty_mixed() {
    let codebase = get_codebase();

    assert!(is_contained_by(&codebase, &get_int(), &get_empty_mixed()));
    assert!(is_contained_by(&codebase, &get_empty_mixed(), &get_empty_mixed()));
    assert!(is_contained_by(&codebase, &get_empty_mixed(), &get_mixed()));

    let (is_contained, result) = compare(&codebase, &get_mixed(), &get_empty_mixed());
    assert!(!is_contained);
    assert_eq!(Some(true), result.type_coerced);
    assert_eq!(Some(true), result.type_coerced_from_mixed);
}

#[test]
fn docblock_mixed_params_are_tolerated() {
    let codebase = get_codebase();

    let mut docblock_mixed = get_mixed();
    docblock_mixed.from_docblock = true;

    assert!(is_contained_by(
        &codebase,
        &get_array(get_int(), docblock_mixed.clone()),
        &get_array(get_int(), get_int())
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_array(get_int(), get_mixed()),
        &get_array(get_int(), get_int())
    ));

    assert!(is_contained_by(
        &codebase,
        &get_generic_object("Collection", vec![docblock_mixed]),
        &get_generic_object("Collection", vec![get_int()])
    ));
    assert!(!is_contained_by(
        &codebase,
        &get_generic_object("Collection", vec![get_mixed()]),
        &get_generic_object("Collection", vec![get_int()])
    ));
}

#[test]
fn objects_with_properties() {
    let mut codebase = get_codebase();
    codebase.add_class("Point", None, &[]);
    codebase.add_property("Point", "x", PropertyInfo::new(get_int()));

    let mut properties = IndexMap::new();
    properties.insert("x".to_string(), get_int());

    let has_int_x = wrap_atomic(TAtomic::TObjectWithProperties {
        properties,
        methods: IndexMap::new(),
        extra_types: None,
    });

    assert!(is_contained_by(&codebase, &get_named_object("Point"), &has_int_x));
    assert!(!is_contained_by(&codebase, &get_named_object("Base"), &has_int_x));

    let mut properties = IndexMap::new();
    properties.insert("x".to_string(), get_string());

    let has_string_x = wrap_atomic(TAtomic::TObjectWithProperties {
        properties,
        methods: IndexMap::new(),
        extra_types: None,
    });

    assert!(!is_contained_by(&codebase, &get_named_object("Point"), &has_string_x));
    assert!(!is_contained_by(&codebase, &has_string_x, &has_int_x));
    assert!(is_contained_by(&codebase, &has_int_x, &get_object()));
}

#[test]
fn comparison_depth_is_limited() {
    let mut codebase = get_codebase();

    assert!(!is_contained_by(
        &codebase,
        &get_list(get_int()),
        &get_list(get_string())
    ));

    codebase.config.max_comparison_depth = 1;

    // the nested element comparison is past the limit and assumed to hold
    assert!(is_contained_by(
        &codebase,
        &get_list(get_int()),
        &get_list(get_string())
    ));
}

#[test]
fn can_be_contained_by_collects_matching_keys() {
    let codebase = get_codebase();

    let mut matching_input_keys = FxHashSet::default();

    assert!(union_type_comparator::can_be_contained_by(
        &codebase,
        &file_path(),
        &union(vec![TAtomic::TInt, TAtomic::TString]),
        &get_int(),
        false,
        false,
        &mut matching_input_keys,
    ));

    assert_eq!(1, matching_input_keys.len());
    assert!(matching_input_keys.contains("int"));

    let mut matching_input_keys = FxHashSet::default();

    assert!(!union_type_comparator::can_be_contained_by(
        &codebase,
        &file_path(),
        &get_string(),
        &get_int(),
        false,
        false,
        &mut matching_input_keys,
    ));

    let mut matching_input_keys = FxHashSet::default();

    assert!(union_type_comparator::can_be_contained_by(
        &codebase,
        &file_path(),
        &get_string(),
        &get_mixed(),
        false,
        false,
        &mut matching_input_keys,
    ));

    // keys collected by an earlier call don't count as a match
    let mut matching_input_keys = FxHashSet::default();
    matching_input_keys.insert("string".to_string());

    assert!(!union_type_comparator::can_be_contained_by(
        &codebase,
        &file_path(),
        &get_string(),
        &get_int(),
        false,
        false,
        &mut matching_input_keys,
    ));
}

#[test]
fn expression_types_can_be_identical() {
    let codebase = get_codebase();

    let can_be_identical = |type1: &TUnion, type2: &TUnion| {
        union_type_comparator::can_expression_types_be_identical(
            &codebase,
            &file_path(),
            type1,
            type2,
            false,
        )
    };

    assert!(!can_be_identical(&get_int(), &get_string()));
    assert!(can_be_identical(&get_int(), &get_mixed()));
    assert!(can_be_identical(&get_int(), &get_literal_int(5)));
    assert!(can_be_identical(
        &get_named_object("Base"),
        &get_named_object("Derived")
    ));
    assert!(can_be_identical(
        &union(vec![TAtomic::TInt, TAtomic::TNull]),
        &union(vec![TAtomic::TString, TAtomic::TNull])
    ));

    assert!(can_be_identical(
        &get_list(get_int()),
        &get_non_empty_list(get_int())
    ));
    assert!(!can_be_identical(
        &get_list(get_int()),
        &get_non_empty_list(get_string())
    ));

    assert!(atomic_type_comparator::can_be_identical(
        &codebase,
        &file_path(),
        &TAtomic::TLiteralInt { value: 3 },
        &TAtomic::TInt,
        false,
    ));
}

#[test]
fn signature_level_containment() {
    let nullable_int = union(vec![TAtomic::TInt, TAtomic::TNull]);

    assert!(union_type_comparator::is_contained_by_in_php(
        Some(&get_int()),
        &get_int()
    ));
    assert!(union_type_comparator::is_contained_by_in_php(
        Some(&get_int()),
        &nullable_int
    ));
    assert!(!union_type_comparator::is_contained_by_in_php(
        Some(&nullable_int),
        &get_int()
    ));
    assert!(!union_type_comparator::is_contained_by_in_php(
        None,
        &get_int()
    ));
    assert!(union_type_comparator::is_contained_by_in_php(
        Some(&get_int()),
        &get_mixed()
    ));
    assert!(union_type_comparator::is_contained_by_in_php(
        None,
        &get_mixed()
    ));
    assert!(union_type_comparator::is_contained_by_in_php(
        Some(&get_array(get_int(), get_int())),
        &get_iterable(get_mixed(), get_mixed())
    ));

    assert!(union_type_comparator::is_simply_contained_by(
        &get_int(),
        &union(vec![TAtomic::TInt, TAtomic::TString])
    ));
    assert!(!union_type_comparator::is_simply_contained_by(
        &nullable_int,
        &get_int()
    ));
    assert!(!union_type_comparator::is_simply_contained_by(
        &get_literal_int(5),
        &get_int()
    ));
}

#[test]
fn gettype_results() {
    let codebase = get_codebase();

    let gettype = wrap_atomic(TAtomic::TDependentGetType);

    assert!(is_contained_by(
        &codebase,
        &gettype,
        &get_literal_string("integer".to_string())
    ));
    assert!(!is_contained_by(
        &codebase,
        &gettype,
        &get_literal_string("int".to_string())
    ));
    assert!(is_contained_by(&codebase, &gettype, &get_string()));
}

#[test]
fn combining_unions() {
    let combined = combine_union_types(&get_int(), &get_string());
    assert!(combined.has_type("int"));
    assert!(combined.has_type("string"));

    let combined = combine_union_types(&get_literal_int(5), &get_int());
    assert_eq!("int", combined.get_id());

    let combined = combine_union_types(&get_true(), &get_false());
    assert_eq!("bool", combined.get_id());
}
