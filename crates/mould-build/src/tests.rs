//! Integration tests for mould-build.

use std::cell::Cell;
use std::rc::Rc;

use mould_core::{
    AbstractStrategy, Constructor, EngineConfig, MouldError, PropertyDef, Schema, TypeDef, Value,
    types,
};
use mould_generate::generators::{
    EngineGenerator, RandomIntegerGenerator, UnsupportedValueGenerator,
};
use mould_generate::{HasAttribute, constant};

use crate::{
    Arg, ConventionInterface, Engine, MemorySaver, PropertyCopyConverter,
    ShortestConstructorStrategy, UnsupportedSaver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `SimpleBean` and its nested types, a plain `Person`/`Employee` pair,
/// `Animal` (abstract) ← `Dog`, interface `Pet`, a `Chicken` ↔ `Egg`
/// constructor cycle, `Bag` with an uninitialised list, and the
/// `Outer` → `Middle` → `Inner` chain.
fn schema() -> Schema {
    let mut schema = Schema::new();
    schema
        .define(
            TypeDef::class("SimpleBean")
                .property(PropertyDef::new("id", types::I64).read_only())
                .property(PropertyDef::new("name", types::STRING))
                .property(PropertyDef::new("shortName", types::STRING))
                .property(PropertyDef::new("nestedBean", "NestedBean"))
                .property(PropertyDef::new("nestedBeanWithConstructor", "NestedBeanWithConstructor"))
                .property(
                    PropertyDef::new("hobbies", types::SET)
                        .read_only()
                        .initial(Value::set(Vec::<Value>::new())),
                )
                .property(PropertyDef::new("annotated", types::STRING).attribute("simple")),
        )
        .define(TypeDef::class("NestedBean").property(PropertyDef::new("value", types::STRING)))
        .define(
            TypeDef::class("NestedBeanWithConstructor")
                .property(PropertyDef::new("value", types::STRING).read_only())
                .constructor(Constructor::new().bound_arg(types::STRING, "value")),
        )
        .define(
            TypeDef::class("Person")
                .property(PropertyDef::new("id", types::I64))
                .property(PropertyDef::new("name", types::STRING))
                .property(PropertyDef::new("shortName", types::STRING)),
        )
        .define(TypeDef::class("Employee").property(PropertyDef::new("name", types::STRING)))
        .define(TypeDef::abstract_class("Animal").property(PropertyDef::new("name", types::STRING)))
        .define(TypeDef::class("Dog").extends("Animal"))
        .define(TypeDef::interface("Pet"))
        .define(TypeDef::class("Chicken").constructor(Constructor::new().arg("Egg")))
        .define(TypeDef::class("Egg").constructor(Constructor::new().arg("Chicken")))
        .define(TypeDef::class("Bag").property(PropertyDef::new("tags", types::LIST)))
        .define(TypeDef::class("Outer").property(PropertyDef::new("middle", "Middle")))
        .define(TypeDef::class("Middle").property(PropertyDef::new("inner", "Inner")))
        .define(TypeDef::class("Inner").property(PropertyDef::new("value", types::STRING)));
    schema
}

fn engine() -> Engine {
    Engine::new(schema())
}

fn simple_builder() -> ConventionInterface {
    ConventionInterface::new("SimpleBeanBuildCommand", "SimpleBean")
        .method("withName")
        .method("withShortName")
        .method("withHobbies")
        .method("withNestedBean")
        .default_method("named_jan", |proxy, _args| {
            proxy.set("withName", "Jan")?.schedule("withShortName")
        })
}

fn scheduled(command: &crate::BuildCommand<'_>) -> Vec<String> {
    command.scheduled().map(String::from).collect()
}

// ── Build command ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn end_to_end_example() {
        let engine = engine();
        let bean = engine
            .start("SimpleBean")
            .unwrap()
            .with_value("id", 42i64)
            .unwrap()
            .with_value("hobbies", "coding")
            .unwrap()
            .generate_value_with("name", &constant("success"))
            .unwrap()
            .fill()
            .construct()
            .unwrap();

        assert_eq!(bean.get("id"), Value::Int(42));
        assert_eq!(bean.get("name"), Value::text("success"));
        assert_eq!(bean.get("hobbies"), Value::set(["coding"]));
        assert_eq!(bean.get("shortName"), Value::text("value"));
        assert_eq!(bean.get("annotated"), Value::text("value"));

        let nested = bean.get("nestedBean");
        let nested = nested.as_bean().unwrap();
        assert_eq!(nested.type_name().as_str(), "NestedBean");
        assert_eq!(nested.get("value"), Value::text("value"));

        let constructed = bean.get("nestedBeanWithConstructor");
        assert_eq!(constructed.as_bean().unwrap().get("value"), Value::text("value"));
    }

    #[test]
    fn fill_is_idempotent() {
        let engine = engine();
        let once = engine.start("SimpleBean").unwrap().fill();
        let twice = engine.start("SimpleBean").unwrap().fill().fill();
        assert_eq!(scheduled(&once), scheduled(&twice));
        assert_eq!(
            scheduled(&once),
            ["annotated", "name", "nestedBean", "nestedBeanWithConstructor", "shortName"]
        );
    }

    #[test]
    fn fill_never_schedules_touched() {
        let engine = engine();
        let command = engine
            .start("SimpleBean")
            .unwrap()
            .with_value("name", "set")
            .unwrap()
            .fill();
        assert!(command.is_touched("name"));
        assert!(!command.is_scheduled("name"));
        assert!(command.is_scheduled("shortName"));
    }

    #[test]
    fn collection_values_are_appended() {
        let engine = engine();
        let bean = engine
            .start("SimpleBean")
            .unwrap()
            .with_value("hobbies", "coding")
            .unwrap()
            .with_value("hobbies", "gaming")
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(bean.get("hobbies"), Value::set(["gaming", "coding"]));
    }

    #[test]
    fn null_append_is_a_no_op() {
        let engine = engine();
        let bean = engine
            .start("SimpleBean")
            .unwrap()
            .with_value("hobbies", Value::Null)
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(bean.get("hobbies"), Value::set(Vec::<Value>::new()));
    }

    #[test]
    fn whole_collection_replaces() {
        let engine = engine();
        let bean = engine
            .start("SimpleBean")
            .unwrap()
            .with_value("hobbies", "coding")
            .unwrap()
            .with_value("hobbies", Value::set(["chess"]))
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(bean.get("hobbies"), Value::set(["chess"]));
    }

    #[test]
    fn append_to_absent_collection_generates_it() {
        let engine = engine();
        let bean = engine
            .start("Bag")
            .unwrap()
            .with_value("tags", "a")
            .unwrap()
            .with_value("tags", "b")
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(bean.get("tags"), Value::list(["a", "b"]));
    }

    #[test]
    fn append_to_non_collection_is_incompatible() {
        let mut engine = engine();
        engine.register_type_value(types::LIST, "oops");
        let err = engine.start("Bag").unwrap().with_value("tags", "a").unwrap_err();
        assert!(matches!(
            err,
            MouldError::IncompatibleCollection { ty, property } if ty.as_str() == "Bag" && property == "tags"
        ));
    }

    #[test]
    fn unknown_property_is_rejected() {
        let engine = engine();
        let err = engine.start("SimpleBean").unwrap().with_value("nope", 1i64).unwrap_err();
        assert!(matches!(
            err,
            MouldError::UnknownProperty { ty, property } if ty.as_str() == "SimpleBean" && property == "nope"
        ));
        let err = engine.start("SimpleBean").unwrap().generate_value("nope").unwrap_err();
        assert!(matches!(err, MouldError::UnknownProperty { .. }));
    }

    #[test]
    fn construct_drains_schedule_and_can_repeat() {
        let engine = engine();
        let mut command = engine.start("Person").unwrap().generate_value("name").unwrap();
        let first = command.construct().unwrap();
        assert!(!command.is_scheduled("name"));
        assert!(command.is_touched("name"));
        let second = command.construct().unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(second.get("name"), Value::text("value"));
    }

    #[test]
    fn load_copies_and_respects_skips() {
        let mut engine = engine();
        engine.skip("Person", "id");
        let jan = engine
            .start("Person")
            .unwrap()
            .with_value("name", "Jan")
            .unwrap()
            .with_value("id", 42i64)
            .unwrap()
            .with_value("shortName", "J")
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(jan.get("id"), Value::Int(42));

        let copy = engine
            .start("Person")
            .unwrap()
            .load(&jan, &["shortName"])
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(copy.get("name"), Value::text("Jan"));
        assert!(copy.get("id").is_null());
        assert!(copy.get("shortName").is_null());
    }

    #[test]
    fn start_from_marks_present_values_touched() {
        let engine = engine();
        let existing = engine.start("Person").unwrap().with_value("name", "Jan").unwrap();
        let bean = existing.bean().clone();
        let mut command = engine.start_from(bean).unwrap().fill();
        assert!(command.is_touched("name"));
        assert!(!command.is_scheduled("name"));
        let bean = command.construct().unwrap();
        assert_eq!(bean.get("name"), Value::text("Jan"));
        assert_eq!(bean.get("id"), Value::Int(0));
    }

    #[test]
    fn map_and_do_with_continue_building() {
        let engine = engine();
        let seen = Cell::new(false);
        let bean = engine
            .start("Person")
            .unwrap()
            .generate_value("name")
            .unwrap()
            .do_with(|bean| {
                seen.set(bean.get("name") == Value::text("value"));
                Ok(())
            })
            .unwrap()
            .map(|bean| {
                bean.set("shortName", "mapped");
                Ok(bean)
            })
            .unwrap()
            .construct()
            .unwrap();
        assert!(seen.get());
        assert_eq!(bean.get("shortName"), Value::text("mapped"));
    }
}

// ── Resolution order ──────────────────────────────────────────────────────────

#[cfg(test)]
mod resolution_tests {
    use super::*;

    #[test]
    fn property_override_beats_type_override() {
        let mut engine = engine();
        engine
            .register_type_value(types::STRING, "type")
            .register_property_value("SimpleBean", "name", "property");
        for _ in 0..2 {
            let bean = engine.start("SimpleBean").unwrap().fill().construct().unwrap();
            assert_eq!(bean.get("name"), Value::text("property"));
            assert_eq!(bean.get("shortName"), Value::text("type"));
        }
    }

    #[test]
    fn predicate_applies_to_matching_fields() {
        let mut engine = engine();
        engine
            .register_if(HasAttribute::new("simple"), constant("tagged"))
            .register_if(|p: &PropertyDef| p.name == "shortName", constant("short"));
        let bean = engine.start("SimpleBean").unwrap().fill().construct().unwrap();
        assert_eq!(bean.get("annotated"), Value::text("tagged"));
        assert_eq!(bean.get("shortName"), Value::text("short"));
        assert_eq!(bean.get("name"), Value::text("value"));
    }

    #[test]
    fn property_override_beats_predicate() {
        let mut engine = engine();
        engine
            .register_if(HasAttribute::new("simple"), constant("tagged"))
            .register_property_value("SimpleBean", "annotated", "explicit");
        let bean = engine.start("SimpleBean").unwrap().fill().construct().unwrap();
        assert_eq!(bean.get("annotated"), Value::text("explicit"));
    }

    #[test]
    fn overrides_match_runtime_then_declaring_type() {
        let config = EngineConfig {
            abstract_strategy: AbstractStrategy::FirstImplementation,
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(schema(), config).unwrap();
        engine.register_property_value("Animal", "name", "animal");
        let dog = engine.start("Dog").unwrap().fill().construct().unwrap();
        assert_eq!(dog.get("name"), Value::text("animal"));

        engine.register_property_value("Dog", "name", "dog");
        let dog = engine.start("Dog").unwrap().fill().construct().unwrap();
        assert_eq!(dog.get("name"), Value::text("dog"));
    }

    #[test]
    fn skipped_properties_stay_settable() {
        let mut engine = engine();
        engine.skip("SimpleBean", "name");
        let command = engine.start("SimpleBean").unwrap().fill();
        assert!(!command.is_scheduled("name"));

        let bean = engine.start("SimpleBean").unwrap().fill().construct().unwrap();
        assert!(bean.get("name").is_null());

        let bean = engine
            .start("SimpleBean")
            .unwrap()
            .with_value("name", "explicit")
            .unwrap()
            .fill()
            .construct()
            .unwrap();
        assert_eq!(bean.get("name"), Value::text("explicit"));
    }

    #[test]
    fn cloned_engines_are_independent() {
        let mut original = engine();
        let mut copy = original.clone_settings();
        copy.register_property_value("Person", "name", "copy");
        original.register_property_value("Person", "name", "original");
        copy.skip("Person", "shortName");

        let a = original.start("Person").unwrap().fill().construct().unwrap();
        let b = copy.start("Person").unwrap().fill().construct().unwrap();
        assert_eq!(a.get("name"), Value::text("original"));
        assert_eq!(b.get("name"), Value::text("copy"));
        assert_eq!(a.get("shortName"), Value::text("value"));
        assert!(b.get("shortName").is_null());
    }

    #[test]
    fn generate_uses_type_table_then_builds_beans() {
        let engine = engine();
        assert_eq!(engine.generate(&types::STRING).unwrap(), Value::text("value"));
        let person = engine.generate(&"Person".into()).unwrap();
        let person = person.as_bean().unwrap();
        assert_eq!(person.get("name"), Value::text("value"));
        assert_eq!(person.get("id"), Value::Int(0));
    }

    #[test]
    fn seeded_rng_feeds_random_generators() {
        let config = EngineConfig { seed: Some(7), ..EngineConfig::default() };
        let mut engine = Engine::with_config(schema(), config).unwrap();
        let ages = RandomIntegerGenerator::new(18, 65, engine.rng());
        engine.register_property("Person", "id", ages);
        for _ in 0..20 {
            let person = engine.start("Person").unwrap().fill().construct().unwrap();
            let id = person.get("id").as_int().unwrap();
            assert!((18..=65).contains(&id));
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn generation_errors_carry_property_context() {
        let mut engine = engine();
        engine.register_property("SimpleBean", "name", UnsupportedValueGenerator);
        let err = engine.start("SimpleBean").unwrap().fill().construct().unwrap_err();
        match &err {
            MouldError::Generation { declaring, property, .. } => {
                assert_eq!(declaring.as_str(), "SimpleBean");
                assert_eq!(property, "name");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root_cause(), MouldError::Unsupported(_)));
    }

    #[test]
    fn nested_failures_name_the_outer_property() {
        let mut engine = engine();
        engine.register_property("NestedBean", "value", UnsupportedValueGenerator);
        let err = engine
            .start("SimpleBean")
            .unwrap()
            .generate_value("nestedBean")
            .unwrap()
            .construct()
            .unwrap_err();
        assert!(matches!(&err, MouldError::Generation { property, .. } if property == "nestedBean"));
        assert!(matches!(err.root_cause(), MouldError::Unsupported(_)));
    }

    #[test]
    fn cyclic_constructors_hit_the_depth_guard() {
        let config = EngineConfig { max_depth: 8, ..EngineConfig::default() };
        let engine = Engine::with_config(schema(), config).unwrap();
        let err = engine.start("Chicken").unwrap_err();
        assert!(matches!(err.root_cause(), MouldError::Construction { .. }));
    }

    #[test]
    fn self_delegating_type_generator_hits_the_depth_guard() {
        let config = EngineConfig { max_depth: 8, ..EngineConfig::default() };
        let mut engine = Engine::with_config(schema(), config).unwrap();
        engine.register_type("Animal", EngineGenerator::of("Dog"));
        let err = engine.generate(&"Animal".into()).unwrap_err();
        assert!(matches!(err.root_cause(), MouldError::Construction { .. }));
    }

    #[test]
    fn each_nested_bean_takes_one_level() {
        let shallow = EngineConfig { max_depth: 2, ..EngineConfig::default() };
        let engine = Engine::with_config(schema(), shallow).unwrap();
        let err = engine.start("Outer").unwrap().fill().construct().unwrap_err();
        assert!(matches!(err.root_cause(), MouldError::Construction { .. }));

        let exact = EngineConfig { max_depth: 3, ..EngineConfig::default() };
        let engine = Engine::with_config(schema(), exact).unwrap();
        let outer = engine.start("Outer").unwrap().fill().construct().unwrap();
        let middle = outer.get("middle");
        let inner = middle.as_bean().unwrap().get("inner");
        assert_eq!(inner.as_bean().unwrap().get("value"), Value::text("value"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig { prefix: String::new(), ..EngineConfig::default() };
        assert!(matches!(Engine::with_config(schema(), config), Err(MouldError::Config(_))));
    }
}

// ── Bean constructor ──────────────────────────────────────────────────────────

#[cfg(test)]
mod constructor_tests {
    use super::*;

    #[test]
    fn abstract_types_default_to_placeholders() {
        let engine = engine();
        let mut command = engine.start("Animal").unwrap().fill();
        assert!(command.bean().is_placeholder());
        assert!(command.is_scheduled("name"));
        let bean = command.construct().unwrap();
        assert!(bean.get("name").is_null());

        let pet = engine.start("Pet").unwrap().construct().unwrap();
        assert!(pet.is_placeholder());
        assert_eq!(pet.type_name().as_str(), "Pet");
    }

    #[test]
    fn first_implementation_strategy() {
        let config = EngineConfig {
            abstract_strategy: AbstractStrategy::FirstImplementation,
            ..EngineConfig::default()
        };
        let engine = Engine::with_config(schema(), config).unwrap();
        let animal = engine.start("Animal").unwrap().fill().construct().unwrap();
        assert_eq!(animal.type_name().as_str(), "Dog");
        assert_eq!(animal.get("name"), Value::text("value"));
    }

    #[test]
    fn shortest_constructor_wins() {
        let mut schema = schema();
        schema.define(
            TypeDef::class("Pair")
                .property(PropertyDef::new("left", types::STRING).read_only())
                .property(PropertyDef::new("right", types::STRING).read_only())
                .constructor(
                    Constructor::new()
                        .bound_arg(types::STRING, "left")
                        .bound_arg(types::STRING, "right"),
                )
                .constructor(Constructor::new().bound_arg(types::STRING, "left")),
        );
        let engine = Engine::new(schema);
        let pair = engine.start("Pair").unwrap().construct().unwrap();
        assert_eq!(pair.get("left"), Value::text("value"));
        assert!(pair.get("right").is_null());
    }

    #[test]
    fn custom_strategy_is_shared_with_clones() {
        struct Counting(Rc<Cell<usize>>);

        impl crate::ConstructorStrategy for Counting {
            fn find_constructor<'d>(
                &self,
                def: &'d mould_core::TypeDef,
            ) -> Option<&'d mould_core::Constructor> {
                self.0.set(self.0.get() + 1);
                ShortestConstructorStrategy.find_constructor(def)
            }
        }

        let calls = Rc::new(Cell::new(0));
        let mut engine = engine();
        let copy = engine.clone_settings();
        engine.set_constructor_strategy(Counting(Rc::clone(&calls)));
        copy.start("Person").unwrap();
        assert_eq!(calls.get(), 1);
    }
}

// ── Persistence and conversion ────────────────────────────────────────────────

#[cfg(test)]
mod collaborator_tests {
    use super::*;

    #[test]
    fn save_persists_generated_values_and_the_bean() {
        let saver = Rc::new(MemorySaver::new());
        let mut engine = engine();
        engine.set_saver(Rc::clone(&saver));

        engine.start("SimpleBean").unwrap().fill().construct().unwrap();
        assert_eq!(saver.save_count(), 0);

        let bean = engine.start("SimpleBean").unwrap().fill().save().unwrap();
        // 5 scheduled + 1 nested + the bean
        assert_eq!(saver.save_count(), 7);
        let last = saver.saved().pop().unwrap();
        assert!(last.as_bean().unwrap().ptr_eq(&bean));
    }

    #[test]
    fn custom_saver_handles_the_top_level_bean() {
        let saver = Rc::new(MemorySaver::new());
        let mut engine = engine();
        engine.set_saver(Rc::clone(&saver));
        let custom = Cell::new(0);
        engine
            .start("Person")
            .unwrap()
            .fill()
            .with_saver(|value| {
                custom.set(custom.get() + 1);
                Ok(value)
            })
            .save()
            .unwrap();
        assert_eq!(custom.get(), 1);
        assert_eq!(saver.save_count(), 3);
    }

    #[test]
    fn delete_all_reaches_the_saver() {
        let saver = Rc::new(MemorySaver::new());
        let mut engine = engine();
        engine.set_saver(Rc::clone(&saver));
        let values = [Value::Int(1), Value::Int(2)];
        engine.delete_all(&values).unwrap();
        assert_eq!(saver.deleted(), values);
    }

    #[test]
    fn unsupported_saver_fails_save() {
        let mut engine = engine();
        engine.set_saver(UnsupportedSaver);
        let err = engine.start("Person").unwrap().fill().save().unwrap_err();
        assert!(matches!(err.root_cause(), MouldError::Unsupported(_)));
        assert!(engine.delete(&Value::Int(1)).is_err());
    }

    #[test]
    fn map_into_needs_a_converter() {
        let engine = engine();
        let err = engine.start("Person").unwrap().map_into("Employee").unwrap_err();
        assert!(matches!(err, MouldError::Unsupported(_)));
    }

    #[test]
    fn map_into_copies_properties() {
        let mut engine = engine();
        engine.set_converter(PropertyCopyConverter);
        let employee = engine
            .start("Person")
            .unwrap()
            .with_value("name", "Jan")
            .unwrap()
            .map_into("Employee")
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(employee.type_name().as_str(), "Employee");
        assert_eq!(employee.get("name"), Value::text("Jan"));
    }
}

// ── Convention proxy ──────────────────────────────────────────────────────────

#[cfg(test)]
mod convention_tests {
    use super::*;

    #[test]
    fn methods_dispatch_by_argument() {
        let engine = engine();
        let bean = engine
            .start_as(&simple_builder())
            .unwrap()
            .schedule("withShortName")
            .unwrap()
            .set("withHobbies", "coding")
            .unwrap()
            .generate_with("withName", constant("generated"))
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(bean.get("shortName"), Value::text("value"));
        assert_eq!(bean.get("hobbies"), Value::set(["coding"]));
        assert_eq!(bean.get("name"), Value::text("generated"));
        assert!(bean.get("nestedBean").is_null());
    }

    #[test]
    fn default_methods_chain_through_the_proxy() {
        let engine = engine();
        let proxy = engine.start_as(&simple_builder()).unwrap().call("named_jan", vec![]).unwrap();
        assert!(proxy.command().is_scheduled("shortName"));
        let mut proxy = proxy;
        let bean = proxy.construct().unwrap();
        assert_eq!(bean.get("name"), Value::text("Jan"));
        assert_eq!(bean.get("shortName"), Value::text("value"));
    }

    #[test]
    fn non_conforming_methods_fail_before_instantiation() {
        struct Counting(Rc<Cell<usize>>);

        impl crate::ConstructorStrategy for Counting {
            fn find_constructor<'d>(
                &self,
                def: &'d mould_core::TypeDef,
            ) -> Option<&'d mould_core::Constructor> {
                self.0.set(self.0.get() + 1);
                ShortestConstructorStrategy.find_constructor(def)
            }
        }

        let calls = Rc::new(Cell::new(0));
        let mut engine = engine();
        engine.set_constructor_strategy(Counting(Rc::clone(&calls)));
        let broken = simple_builder().method("name");
        let err = engine.start_as(&broken).unwrap_err();
        assert!(matches!(
            err,
            MouldError::ProxyConfiguration { method, prefix, .. } if method == "name" && prefix == "with"
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn bare_prefix_is_not_a_convention_method() {
        let engine = engine();
        let err = engine.start_as(&simple_builder().method("with")).unwrap_err();
        assert!(matches!(err, MouldError::ProxyConfiguration { .. }));
    }

    #[test]
    fn invalid_calls_are_rejected() {
        let engine = engine();
        let err = engine.start_as(&simple_builder()).unwrap().call("withAge", vec![]).unwrap_err();
        assert!(matches!(err, MouldError::InvalidInvocation { .. }));

        let err = engine
            .start_as(&simple_builder())
            .unwrap()
            .call("withName", vec![Arg::value("a"), Arg::value("b")])
            .unwrap_err();
        assert!(matches!(err, MouldError::InvalidInvocation { .. }));
    }

    #[test]
    fn snake_case_and_custom_prefixes() {
        let engine = engine();
        let snake = ConventionInterface::new("Snake", "Person").method("with_name");
        let bean = engine
            .start_as(&snake)
            .unwrap()
            .set("with_name", "Jan")
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(bean.get("name"), Value::text("Jan"));

        let setters = ConventionInterface::new("Setters", "Person").prefix("set").method("setShortName");
        let bean = engine
            .start_as(&setters)
            .unwrap()
            .set("setShortName", "J")
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(bean.get("shortName"), Value::text("J"));
    }

    #[test]
    fn as_convention_keeps_state() {
        let engine = engine();
        let command = engine
            .start("SimpleBean")
            .unwrap()
            .with_value("name", "kept")
            .unwrap()
            .generate_value("shortName")
            .unwrap();
        let proxy = command.as_convention(&simple_builder()).unwrap();
        assert!(proxy.command().is_touched("name"));
        assert!(proxy.command().is_scheduled("shortName"));

        let other = ConventionInterface::new("Other", "SimpleBean").method("withAnnotated");
        let mut proxy = proxy.as_convention(&other).unwrap().schedule("withAnnotated").unwrap();
        let bean = proxy.construct().unwrap();
        assert_eq!(bean.get("name"), Value::text("kept"));
        assert_eq!(bean.get("shortName"), Value::text("value"));
        assert_eq!(bean.get("annotated"), Value::text("value"));
    }

    #[test]
    fn as_convention_checks_the_bean_type() {
        let engine = engine();
        let err = engine.start("Person").unwrap().as_convention(&simple_builder()).unwrap_err();
        assert!(matches!(err, MouldError::Unsupported(_)));
    }

    #[test]
    fn map_as_converts_into_a_proxy() {
        let mut engine = engine();
        engine.set_converter(PropertyCopyConverter);
        let employees = ConventionInterface::new("EmployeeBuilder", "Employee").method("withName");
        let employee = engine
            .start("Person")
            .unwrap()
            .with_value("name", "Jan")
            .unwrap()
            .map_as(&employees, "Employee")
            .unwrap()
            .set("withName", "Piet")
            .unwrap()
            .construct()
            .unwrap();
        assert_eq!(employee.get("name"), Value::text("Piet"));
    }
}
