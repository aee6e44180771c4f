use std::io::Write;

use indexmap::IndexMap;

use crate::code_location::FilePath;
use crate::codebase_info::CodebaseInfo;
use crate::config::Config;
use crate::functionlike_info::FunctionLikeInfo;
use crate::functionlike_parameter::FunctionLikeParameter;
use crate::lookup_error::LookupError;
use crate::method_identifier::MethodIdentifier;
use crate::property_info::PropertyInfo;
use crate::t_atomic::{is_numeric_literal, ArrayKey, TAtomic};
use crate::t_union::TUnion;

fn named(name: &str) -> TAtomic {
    TAtomic::TNamedObject {
        name: name.to_string(),
        type_params: None,
        was_static: false,
        extra_types: None,
        remapped_params: false,
    }
}

#[test]
fn atomic_ids() {
    assert_eq!("int(5)", TAtomic::TLiteralInt { value: 5 }.get_id());
    assert_eq!(
        "non-empty-list<string>",
        TAtomic::TList {
            type_param: TUnion::new(vec![TAtomic::TString]),
            non_empty: true,
            is_callable: false,
        }
        .get_id()
    );

    let mut properties = IndexMap::new();
    properties.insert(
        ArrayKey::String("a".to_string()),
        TUnion::new(vec![TAtomic::TInt]),
    );
    let mut optional = TUnion::new(vec![TAtomic::TString]);
    optional.possibly_undefined = true;
    properties.insert(ArrayKey::Int(1), optional);

    assert_eq!(
        "array{'a': int, 1?: string}",
        TAtomic::TKeyedArray {
            properties,
            is_list: false,
            is_callable: false,
            fallback_params: None,
        }
        .get_id()
    );

    assert_eq!(
        "class-string<Foo>",
        TAtomic::TClassString {
            as_: "object".to_string(),
            as_type: Some(Box::new(named("Foo"))),
        }
        .get_id()
    );

    assert_eq!(
        "callable(int, string=):void",
        TAtomic::TCallable {
            params: Some(vec![
                FunctionLikeParameter::with_type("a", TUnion::new(vec![TAtomic::TInt])),
                {
                    let mut param =
                        FunctionLikeParameter::with_type("b", TUnion::new(vec![TAtomic::TString]));
                    param.is_optional = true;
                    param
                }
            ]),
            return_type: Some(TUnion::new(vec![TAtomic::TVoid])),
            is_pure: None,
        }
        .get_id()
    );
}

#[test]
fn union_keys_collapse_duplicates() {
    let union = TUnion::new(vec![
        TAtomic::TInt,
        TAtomic::TInt,
        TAtomic::TLiteralString {
            value: "a".to_string(),
        },
        TAtomic::TNull,
    ]);

    assert_eq!(3, union.types.len());
    assert!(union.is_nullable());
    assert!(union.has_int());
    assert!(union.has_string());
    assert!(union.has_literal_value());
    assert!(!union.is_mixed());
}

#[test]
fn list_keys_share_a_slot() {
    let union = TUnion::new(vec![
        TAtomic::TList {
            type_param: TUnion::new(vec![TAtomic::TInt]),
            non_empty: false,
            is_callable: false,
        },
        TAtomic::TList {
            type_param: TUnion::new(vec![TAtomic::TString]),
            non_empty: false,
            is_callable: false,
        },
    ]);

    assert_eq!(1, union.types.len());
}

#[test]
fn numeric_literals() {
    assert!(is_numeric_literal("5"));
    assert!(is_numeric_literal("-1.5"));
    assert!(is_numeric_literal(" 1e10"));
    assert!(is_numeric_literal(".5"));
    assert!(!is_numeric_literal("1e"));
    assert!(!is_numeric_literal("abc"));
    assert!(!is_numeric_literal(""));
    assert!(!is_numeric_literal("."));
}

#[test]
fn intersection_types() {
    let mut atomic = named("Foo");
    atomic.add_intersection_type(named("Bar"));

    let intersection_types = atomic.get_intersection_types();
    assert_eq!(2, intersection_types.len());
    assert_eq!("Foo&Bar", atomic.get_id());
}

#[test]
fn class_hierarchy() {
    let mut codebase = CodebaseInfo::new();
    codebase.add_interface("Countable", &[]);
    codebase.add_interface("Collection", &["Countable"]);
    codebase.add_class("Base", None, &["Collection"]);
    codebase.add_class("Derived", Some("Base"), &[]);

    assert!(codebase.class_exists("derived"));
    assert!(codebase.interface_exists("\\Countable"));
    assert!(!codebase.class_exists("Countable"));
    assert!(codebase.class_or_interface_exists("Countable"));
    assert!(codebase.class_extends("Derived", "Base"));
    assert!(codebase.class_implements("Derived", "Countable"));
    assert!(codebase.class_extends_or_implements("Derived", "Collection"));
    assert!(codebase.interface_extends("Collection", "Countable"));
    assert!(!codebase.class_extends("Base", "Derived"));
}

#[test]
fn inherited_members() {
    let mut codebase = CodebaseInfo::new();
    codebase.add_class("Base", None, &[]);
    codebase.add_method("Base", FunctionLikeInfo::new("doThing".to_string()));
    codebase.add_property(
        "Base",
        "count",
        PropertyInfo::new(TUnion::new(vec![TAtomic::TInt])),
    );
    codebase.add_class("Derived", Some("Base"), &[]);

    assert!(codebase.method_exists("Derived", "DOTHING"));
    assert!(codebase.property_exists("Derived", "count"));
    assert!(!codebase.property_exists("Derived", "Count"));
    assert_eq!(
        Some(&"base".to_string()),
        codebase.get_declaring_class_for_property("Derived", "count")
    );

    let declaring_method_id = codebase
        .get_declaring_method_id(&MethodIdentifier(
            "Derived".to_string(),
            "doThing".to_string(),
        ))
        .unwrap();

    assert_eq!(
        MethodIdentifier("base".to_string(), "dothing".to_string()),
        declaring_method_id
    );
    assert_eq!(
        "doThing",
        codebase.get_method(&declaring_method_id).unwrap().name
    );
    assert!(codebase.get_property("Derived", "count").unwrap().type_.is_int());
}

#[test]
fn failed_lookups() {
    let mut codebase = CodebaseInfo::new();
    codebase.add_class("Foo", None, &[]);

    assert_eq!(
        Err(LookupError::ClassNotFound("Bar".to_string())),
        codebase
            .get_declaring_method_id(&MethodIdentifier("Bar".to_string(), "x".to_string()))
            .map(|_| ())
    );

    assert!(matches!(
        codebase.get_method(&MethodIdentifier("Foo".to_string(), "x".to_string())),
        Err(LookupError::MethodNotFound(_))
    ));

    assert!(matches!(
        codebase.get_property("Foo", "x"),
        Err(LookupError::PropertyNotFound(_, _))
    ));

    let error = codebase.get_function("strlen").unwrap_err();
    assert_eq!("Function strlen does not exist", error.to_string());
}

#[test]
fn class_aliases() {
    let mut codebase = CodebaseInfo::new();
    codebase.add_class("Foo", None, &[]);
    codebase.add_class_alias("Bar", "Foo");

    assert_eq!("Foo", codebase.get_unaliased_name("bar"));
    assert_eq!("Baz", codebase.get_unaliased_name("Baz"));
}

#[test]
fn mixed_member_names() {
    let codebase = CodebaseInfo::new();
    let file_path = FilePath("src/a.php".to_string());

    codebase.add_mixed_member_name("foo::bar".to_string(), &file_path);
    codebase.add_mixed_member_name("baz".to_string(), &file_path);

    let names = codebase.mixed_member_names.get(&file_path);
    assert_eq!(2, names.len());
    assert!(names.contains("foo::bar"));
    assert!(codebase
        .mixed_member_names
        .get(&FilePath("src/b.php".to_string()))
        .is_empty());
}

#[test]
fn config_from_file() {
    let path = std::env::temp_dir().join("sigil_code_info_config_test.json");

    {
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"mock_classes": ["Mock_*", "*Double"], "php_major_version": 7, "verbosity": "debugging"}}"#
        )
        .unwrap();
    }

    let mut config = Config::new();
    config.update_from_file(&path).unwrap();

    assert_eq!(7, config.php_major_version);
    assert_eq!(256, config.max_comparison_depth);
    assert_eq!(sigil_logger::Verbosity::Debugging, config.verbosity);
    assert!(config.is_mock_class("Mock_Foo"));
    assert!(config.is_mock_class("UserDouble"));
    assert!(!config.is_mock_class("User"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn invalid_config_is_an_error() {
    let path = std::env::temp_dir().join("sigil_code_info_bad_config_test.json");

    {
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"mock_classes": ["[unclosed"]}}"#).unwrap();
    }

    let mut config = Config::new();
    assert!(config.update_from_file(&path).is_err());

    let _ = std::fs::remove_file(&path);
}
