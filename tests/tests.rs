use invokebench::{
    Direct, Function, HandleFunction, HandleRecord, Invoke, InvokeError, Person, Reflect,
    Strategy, Suite, find_virtual, get_method, metafactory, reflect,
    statics::{self, MapHandle, StaticHandle},
};

// Every strategy returns the subject's name

fn all(suite: &Suite) -> Vec<&str> {
    Strategy::ALL
        .iter()
        .map(|&s| suite.run(s).unwrap_or_else(|e| panic!("{}: {e}", s.name())))
        .collect()
}

#[test]
fn every_strategy_returns_name() {
    let suite = Suite::setup("John").unwrap();

    for s in Strategy::ALL {
        assert_eq!(suite.run(s), Ok("John"), "{}", s.name());
    }
}

#[test]
fn strategies_agree() {
    let suite = Suite::setup("John").unwrap();
    let direct = suite.direct();

    assert_eq!(suite.reflection().unwrap(), direct);
    assert_eq!(suite.method_handle().unwrap(), direct);
    assert_eq!(suite.lambda_metafactory(), direct);
    assert!(all(&suite).iter().all(|v| *v == direct));
}

#[test]
fn repeated_calls_are_stable() {
    let suite = Suite::setup("Alice").unwrap();
    let first = all(&suite);

    for _ in 0..100 {
        assert_eq!(all(&suite), first);
    }

    assert!(first.iter().all(|v| *v == "Alice"));
}

#[test]
fn results_borrow_the_subject() {
    let suite = Suite::setup("John").unwrap();
    let expected = suite.person().name().as_str();

    for s in Strategy::ALL {
        assert!(std::ptr::eq(suite.run(s).unwrap(), expected), "{}", s.name());
    }
}

#[test]
fn sequential_setups_do_not_leak() {
    let a = Suite::setup("A").unwrap();
    assert!(all(&a).iter().all(|v| *v == "A"));
    drop(a);

    let b = Suite::setup("B").unwrap();
    assert!(all(&b).iter().all(|v| *v == "B"));
}

#[test]
fn concurrent_suites() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let name = format!("worker-{i}");
                let suite = Suite::setup(name.clone()).unwrap();
                all(&suite).iter().all(|v| *v == name)
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().unwrap());
    }
}

#[test]
fn every_invoker_agrees() {
    let person = Person::new("John");
    let handle = find_virtual::<Person, String>("name").unwrap();

    let invokers: Vec<Box<dyn Invoke<Person, String>>> = vec![
        Box::new(Direct),
        Box::new(get_method::<Person>("name").unwrap()),
        Box::new(handle),
        Box::new(HandleRecord::new(handle)),
        Box::new(HandleFunction::<Person, String>::new(handle)),
        Box::new(metafactory::<Person, String>(&handle).unwrap()),
        Box::new(StaticHandle),
        Box::new(MapHandle::mutable(statics::ACCESSOR)),
        Box::new(MapHandle::write_once(statics::ACCESSOR)),
    ];

    for invoker in &invokers {
        assert_eq!(invoker.invoke(&person).unwrap(), "John");
    }
}

#[test]
fn suite_invokers_use_their_subject() {
    let suite = Suite::setup("John").unwrap();
    let other = Person::new("Alice");

    for s in Strategy::ALL {
        let invoker = suite.invoker(s);
        assert_eq!(invoker.invoke(suite.person()).unwrap(), "John", "{}", s.name());
        assert_eq!(invoker.invoke(&other).unwrap(), "Alice", "{}", s.name());
    }
}

#[test]
fn locked_statics_under_contention() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let name = format!("worker-{i}");
                let suite = Suite::setup(name.clone()).unwrap();

                for _ in 0..1_000 {
                    assert_eq!(suite.static_method_handle(), Ok(name.as_str()));
                    assert_eq!(suite.method_handle_in_static_map(), Ok(name.as_str()));
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let suite = Suite::setup("after").unwrap();
    assert_eq!(suite.static_method_handle(), Ok("after"));
    assert_eq!(suite.method_handle_in_static_map(), Ok("after"));
}

#[test]
fn non_ascii_name() {
    let suite = Suite::setup("ünï").unwrap();
    assert!(all(&suite).iter().all(|v| *v == "ünï"));
}

#[test]
fn empty_name() {
    let suite = Suite::setup("").unwrap();

    assert_eq!(suite.method_handle_in_static_final_map(), Ok(""));
    assert_eq!(suite.method_handle_in_static_map(), Ok(""));
    assert_eq!(suite.method_handle_in_record_class(), Ok(""));
    assert_eq!(suite.method_handle_in_static_final_record_class(), Ok(""));
    assert_eq!(suite.method_handle_in_record_class_function(), "");
    assert!(all(&suite).iter().all(|v| v.is_empty()));
}

#[test]
fn strategy_names_are_ordered_and_unique() {
    let names: Vec<_> = Strategy::ALL.iter().map(|s| s.name()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();

    assert_eq!(names, sorted);
    assert_eq!(names[0], "100_direct");
    assert_eq!(names[10], "400_lambda_metafactory");
}

// Setup fails fast

#[test]
fn unknown_accessor_fails_setup() {
    let err = Suite::with_accessor("John", "age").unwrap_err();

    assert!(matches!(
        err,
        InvokeError::NoSuchMethod { ref name, .. } if name == "age"
    ));
}

#[test]
fn accessor_names_are_exact() {
    for accessor in ["", "Name", "name "] {
        let err = Suite::with_accessor("John", accessor).unwrap_err();
        assert!(matches!(err, InvokeError::NoSuchMethod { .. }), "{accessor:?}");
    }
}

#[test]
fn get_method_unknown() {
    let err = get_method::<Person>("age").unwrap_err();

    assert!(matches!(
        err,
        InvokeError::NoSuchMethod { ref name, .. } if name == "age"
    ));
}

#[test]
fn find_virtual_empty_name() {
    let err = find_virtual::<Person, String>("").unwrap_err();

    assert!(matches!(
        err,
        InvokeError::NoSuchMethod { ref name, .. } if name.is_empty()
    ));
}

#[test]
fn unknown_key_through_map_invoker() {
    let person = Person::new("John");

    assert_eq!(
        MapHandle::mutable("age").invoke(&person).unwrap_err(),
        InvokeError::NoSuchHandle("age".into())
    );
    assert_eq!(
        MapHandle::write_once("age").invoke(&person).unwrap_err(),
        InvokeError::NoSuchHandle("age".into())
    );
}

#[test]
fn unknown_key_in_static_maps() {
    assert_eq!(
        statics::static_map_handle("age").unwrap_err(),
        InvokeError::NoSuchHandle("age".into())
    );
    assert_eq!(
        statics::static_final_map_handle("age").unwrap_err(),
        InvokeError::NoSuchHandle("age".into())
    );
}

// A second reflected type, registered outside the library

struct Pet {
    nickname: String,
    age: u32,
}

impl Pet {
    fn nickname(&self) -> &String {
        &self.nickname
    }

    fn age(&self) -> &u32 {
        &self.age
    }
}

reflect!(impl Pet {
    nickname -> String,
    age -> u32,
});

fn rex() -> Pet {
    Pet {
        nickname: "Rex".into(),
        age: 3,
    }
}

#[test]
fn macro_registers_accessors() {
    let names: Vec<_> = Pet::methods().iter().map(|m| m.name()).collect();
    assert_eq!(names, ["nickname", "age"]);

    let pet = rex();
    let age = find_virtual::<Pet, u32>("age").unwrap();
    assert_eq!(age.invoke_exact::<Pet, u32>(&pet), Ok(&3));

    let nickname = get_method::<Pet>("nickname").unwrap();
    assert_eq!(<_ as Invoke<Pet, String>>::invoke(&nickname, &pet).unwrap(), "Rex");
}

#[test]
fn wrong_return_type_fails_resolution() {
    let err = find_virtual::<Pet, String>("age").unwrap_err();
    assert!(matches!(err, InvokeError::WrongMethodType { method: "age", .. }));
}

#[test]
fn wrong_call_site_type_fails_invocation() {
    let pet = rex();
    let handle = find_virtual::<Person, String>("name").unwrap();

    let err = handle.invoke_exact::<Pet, String>(&pet).unwrap_err();
    assert!(matches!(err, InvokeError::WrongMethodType { method: "name", .. }));

    let err = HandleRecord::new(handle)
        .handle()
        .invoke_exact::<Pet, u32>(&pet)
        .unwrap_err();
    assert!(matches!(err, InvokeError::WrongMethodType { .. }));
}

#[test]
fn reflective_call_checks_receiver() {
    let pet = rex();
    let method = get_method::<Person>("name").unwrap();

    let err = method.invoke(&pet).unwrap_err();
    assert!(matches!(err, InvokeError::IllegalArgument { method: "name", .. }));
}

#[test]
fn reflective_result_is_cast() {
    let pet = rex();
    let method = get_method::<Pet>("age").unwrap();

    let err = <_ as Invoke<Pet, String>>::invoke(&method, &pet).unwrap_err();
    assert!(matches!(err, InvokeError::WrongMethodType { method: "age", .. }));
}

#[test]
fn metafactory_checks_type_once() {
    let handle = find_virtual::<Pet, u32>("age").unwrap();

    assert!(metafactory::<Pet, String>(&handle).is_err());

    let lambda = metafactory::<Pet, u32>(&handle).unwrap();
    assert_eq!(*lambda.apply(&rex()), 3);
}

#[test]
#[should_panic(expected = "is not of type")]
fn handle_function_panics_on_failure() {
    let handle = find_virtual::<Person, String>("name").unwrap();
    let function = HandleFunction::<Pet, String>::new(handle);

    function.apply(&rex());
}

#[test]
fn handle_function_delegates() {
    let person = Person::new("John");
    let handle = find_virtual::<Person, String>("name").unwrap();
    let function = HandleFunction::<Person, String>::new(handle);

    assert_eq!(function.apply(&person), "John");
    assert_eq!(function.invoke(&person).unwrap(), "John");
}
