//! End to end processing through stores and processors

use style_engine::prelude::*;

/// Compact, optimized output
fn compact() -> ProcessorOptions {
    ProcessorOptions::default().prettify(false)
}

/// Attach every store of the registry, in the given order
fn processor_for(registry: &StoreRegistry, names: &[&str]) -> Processor {
    let mut processor = Processor::new();
    for name in names {
        if let Some(store) = registry.get(name) {
            processor.add_store(&store);
        }
    }
    processor
}

#[test]
fn block_supports_and_global_styles() {
    let mut registry = StoreRegistry::new();
    registry
        .store("block-supports")
        .borrow_mut()
        .add_rule_with(".wp-1", [("margin", "0")]);
    registry
        .store("global-styles")
        .borrow_mut()
        .add_rule_with(".wp-2", [("margin", "0")]);

    let processor = processor_for(&registry, &["block-supports", "global-styles"]);
    assert_eq!(processor.css(compact()), ".wp-1,.wp-2{margin: 0;}");
}

#[test]
fn last_write_wins_across_sources() {
    let mut registry = StoreRegistry::new();
    registry
        .store("first")
        .borrow_mut()
        .add_rule_with(".a", [("color", "red")]);
    registry
        .store("second")
        .borrow_mut()
        .add_rule_with(".a", [("color", "blue")]);

    let processor = processor_for(&registry, &["first", "second"]);
    assert_eq!(processor.css(compact()), ".a{color: blue;}");

    let mut direct = Processor::new();
    direct
        .add_rule(Rule::with_declarations(".a", [("color", "red")]))
        .add_rule(Rule::with_declarations(".a", [("color", "blue")]));
    assert_eq!(direct.css(compact()), ".a{color: blue;}");

    let mut single_store = RuleStore::new("single");
    single_store.add_rule_with(".a", [("color", "red")]);
    single_store.add_rule_with(".a", [("color", "blue")]);
    assert_eq!(
        single_store.get_rule(".a").map(|rule| rule.to_css(false)),
        Some(String::from(".a{color: blue;}"))
    );
}

#[test]
fn store_rules_merge_into_direct_rules() {
    let mut registry = StoreRegistry::new();
    registry
        .store("store")
        .borrow_mut()
        .add_rule_with(".a", [("color", "blue"), ("margin", "0")]);

    let mut processor = processor_for(&registry, &["store"]);
    processor.add_rule(Rule::with_declarations(".a", [("color", "red")]));

    assert_eq!(processor.css(compact()), ".a{color: blue;margin: 0;}");
}

#[test]
fn store_order_does_not_change_grouping() {
    let mut registry = StoreRegistry::new();
    {
        let store = registry.store("a");
        let mut store = store.borrow_mut();
        store.add_rule_with(".one", [("color", "red")]);
        store.add_rule_with(".two", [("color", "blue")]);
    }
    {
        let store = registry.store("b");
        let mut store = store.borrow_mut();
        store.add_rule_with(".three", [("color", "blue")]);
        store.add_rule_with(".four", [("color", "red")]);
    }

    let forward = processor_for(&registry, &["a", "b"]).css(compact());
    let backward = processor_for(&registry, &["b", "a"]).css(compact());

    assert_eq!(forward, ".one,.four{color: red;}.two,.three{color: blue;}");
    assert_eq!(backward, ".three,.two{color: blue;}.four,.one{color: red;}");
}

#[test]
fn optimize_is_idempotent() {
    let mut registry = StoreRegistry::new();
    registry
        .store("s")
        .borrow_mut()
        .add_rule_with(".a", [("color", "red")])
        .add_declarations([("margin", "0")]);
    registry
        .store("s")
        .borrow_mut()
        .add_rule_with(".b", [("margin", "0"), ("color", "red")]);

    let processor = processor_for(&registry, &["s"]);
    let first = processor.css(compact());
    let second = processor.css(compact());

    assert_eq!(first, second);
    assert_eq!(first, ".a,.b{color: red;margin: 0;}");
}

#[test]
fn prettify_only_changes_whitespace() {
    let mut processor = Processor::new();
    processor.add_rules([
        Rule::with_declarations(".a", [("color", "red")]),
        Rule::with_declarations(".b", [("color", "red")]),
        Rule::with_declarations(".c", [("color", "blue")]),
    ]);

    let pretty = processor.css(ProcessorOptions::default().prettify(true));
    let compact_css = processor.css(compact());

    let strip = |css: &str| css.split_whitespace().collect::<String>();
    assert_eq!(strip(&pretty), strip(&compact_css));
    assert_eq!(
        pretty,
        ".a,\n.b {\n\tcolor: red;\n}\n.c {\n\tcolor: blue;\n}\n"
    );
}

#[test]
fn empty_store_rules_are_omitted() {
    let mut registry = StoreRegistry::new();
    registry.store("s").borrow_mut().add_rule(".nothing");

    let processor = processor_for(&registry, &["s"]);
    assert_eq!(processor.css(compact()), "");
    assert_eq!(processor.css(compact().optimize(false)), "");
}

#[test]
fn combined_selector_never_repeats() {
    let mut processor = Processor::new();
    processor.add_rules([
        Rule::with_declarations(".a,.b", [("color", "blue")]),
        Rule::with_declarations(".a", [("color", "red")]),
        Rule::with_declarations(".b", [("color", "red")]),
    ]);

    assert_eq!(processor.css(compact()), ".a,.b{color: red;}");
    assert_eq!(
        processor.css(compact().optimize(false)),
        ".a,.b{color: blue;}.a{color: red;}.b{color: red;}"
    );
}
