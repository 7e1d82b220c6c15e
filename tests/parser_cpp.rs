use funcgraph::core::provider::{HeaderClass, MatchEvent, NodeId, NodeKind, TraversalProvider};
use funcgraph::core::IdentityResolver;
use funcgraph::parsers::{CppTranslationUnit, IncludeResolver};
use std::fs;
use std::path::Path;

fn parse(dir: &Path, name: &str, source: &str) -> CppTranslationUnit {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    CppTranslationUnit::parse(&path, &IncludeResolver::default()).unwrap()
}

fn definitions(unit: &CppTranslationUnit) -> Vec<NodeId> {
    unit.events()
        .iter()
        .filter_map(|event| match event {
            MatchEvent::FunctionDefinition(id) => Some(*id),
            _ => None,
        })
        .collect()
}

fn calls(unit: &CppTranslationUnit) -> Vec<(NodeId, Option<NodeId>)> {
    unit.events()
        .iter()
        .filter_map(|event| match event {
            MatchEvent::Call { caller, callee } => Some((*caller, *callee)),
            _ => None,
        })
        .collect()
}

fn definition(unit: &CppTranslationUnit, name: &str) -> NodeId {
    definitions(unit)
        .into_iter()
        .find(|&id| unit.name(id) == Some(name))
        .unwrap()
}

#[test]
fn free_functions_and_calls_are_matched() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(
        dir.path(),
        "a.cpp",
        "void foo() {}\nint main(int argc, char** argv) { foo(); return 0; }\n",
    );

    assert!(!unit.has_syntax_errors());
    let foo = definition(&unit, "foo");
    let main = definition(&unit, "main");
    assert_eq!(unit.kind(foo), NodeKind::Function);
    assert_eq!(unit.classify_location(main), HeaderClass::UserCode);

    let signature = unit.signature(main).unwrap();
    assert_eq!(signature.return_type, "int");
    assert_eq!(signature.parameters, vec!["int", "char**"]);

    assert_eq!(calls(&unit), vec![(main, Some(foo))]);
}

#[test]
fn type_spellings_are_normalized() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(
        dir.path(),
        "greet.cpp",
        "const char * greet(const std::string & name, int values[], ...) { return 0; }\n\
         void none(void) {}\n",
    );

    let greet = unit.signature(definition(&unit, "greet")).unwrap();
    assert_eq!(greet.return_type, "const char*");
    assert_eq!(greet.parameters, vec!["const std::string&", "int*", "..."]);

    let none = unit.signature(definition(&unit, "none")).unwrap();
    assert!(none.parameters.is_empty());
}

#[test]
fn out_of_line_definition_shares_the_in_class_declaration() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(
        dir.path(),
        "shape.cpp",
        "class Shape {\npublic:\n    double area(double scale);\n};\n\
         double Shape::area(double scale) { return scale; }\n",
    );

    let events = unit.events();
    let class = events
        .iter()
        .find_map(|event| match event {
            MatchEvent::ClassDeclaration(id) => Some(*id),
            _ => None,
        })
        .unwrap();
    assert_eq!(unit.name(class), Some("Shape"));

    let def = definition(&unit, "area");
    assert_eq!(unit.kind(def), NodeKind::Method);
    assert_eq!(unit.semantic_context(def), Some(class));
    assert_ne!(unit.canonical(def), def);
    assert_eq!(unit.parents(unit.canonical(def)), vec![class]);

    let id = IdentityResolver::new().resolve(&unit, def);
    assert_eq!(id, "Shape::double-area-double");
}

#[test]
fn unknown_qualifiers_become_unresolvable_scopes() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(dir.path(), "missing.cpp", "void Missing::run() {}\n");

    let def = definition(&unit, "run");
    assert_eq!(unit.kind(def), NodeKind::Method);

    let scope = unit.semantic_context(def).unwrap();
    assert_eq!(unit.name(scope), Some("Missing"));
    assert_eq!(unit.classify_location(scope), HeaderClass::Unresolvable);
    assert_eq!(unit.classify_location(def), HeaderClass::UserCode);
    assert_eq!(IdentityResolver::new().resolve(&unit, def), "Missing::void-run");
}

#[test]
fn calls_resolve_by_arity() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(
        dir.path(),
        "log.cpp",
        "void log(int a) {}\nvoid log(int a, int b) {}\nvoid fill(int a, int b = 0) {}\n\
         void run() { log(1, 2); fill(1); printf(\"done\"); }\n",
    );

    let run = definition(&unit, "run");
    let resolved = calls(&unit);
    assert_eq!(resolved.len(), 3);
    assert!(resolved.iter().all(|(caller, _)| *caller == run));

    let log = resolved[0].1.unwrap();
    assert_eq!(unit.signature(log).unwrap().parameters, vec!["int", "int"]);
    let fill = resolved[1].1.unwrap();
    assert_eq!(unit.name(fill), Some("fill"));
    assert_eq!(resolved[2].1, None);
}

#[test]
fn member_calls_prefer_the_callers_class() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(
        dir.path(),
        "members.cpp",
        "struct B { void go() {} };\n\
         struct A {\n    void go() {}\n    void run() { go(); this->go(); }\n};\n",
    );

    let run = definition(&unit, "run");
    let a = unit.parents(run)[0];
    let resolved = calls(&unit);
    assert_eq!(resolved.len(), 2);
    for (caller, callee) in resolved {
        assert_eq!(caller, run);
        assert_eq!(unit.parents(callee.unwrap()), vec![a]);
    }
}

#[test]
fn headers_are_parsed_once_per_unit() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("a.h"), "#pragma once\nint shared(int v);\n").unwrap();
    fs::write(dir.path().join("b.h"), "#include \"a.h\"\nint other();\n").unwrap();
    let unit = parse(
        dir.path(),
        "main.cpp",
        "#include \"a.h\"\n#include \"b.h\"\n#include <vector>\n\
         int main() { return shared(other()); }\n",
    );

    assert_eq!(unit.file_count(), 3);
    let main = definition(&unit, "main");
    let callees: Vec<_> = calls(&unit)
        .into_iter()
        .map(|(caller, callee)| {
            assert_eq!(caller, main);
            unit.name(callee.unwrap()).unwrap().to_string()
        })
        .collect();
    assert_eq!(callees, vec!["shared", "other"]);

    let shared = calls(&unit)[0].1.unwrap();
    let header = unit.source_file(shared).unwrap();
    assert_eq!(header.file_name().unwrap(), "a.h");
}

#[test]
fn syntax_errors_still_yield_recovered_matches() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(dir.path(), "broken.cpp", "void ok() {}\nvoid broken( {\n");

    assert!(unit.has_syntax_errors());
    assert!(definitions(&unit).iter().any(|&id| unit.name(id) == Some("ok")));
}

#[test]
fn friend_definitions_belong_to_the_enclosing_namespace() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(
        dir.path(),
        "friend.cpp",
        "void helper() {}\n\
         class A {\n    friend void tick(A& a) { helper(); }\n\
         friend std::ostream& operator<<(std::ostream& os, const A& a) { return os; }\n};\n",
    );

    let helper = definition(&unit, "helper");
    let tick = definition(&unit, "tick");
    assert_eq!(unit.kind(tick), NodeKind::Function);
    assert_eq!(unit.parents(tick), unit.parents(helper));
    assert_eq!(unit.signature(tick).unwrap().parameters, vec!["A&"]);
    assert_eq!(IdentityResolver::new().resolve(&unit, tick), "void-tick-A&");
    assert_eq!(calls(&unit), vec![(tick, Some(helper))]);

    let shift = definition(&unit, "operator<<");
    assert_eq!(unit.kind(shift), NodeKind::Function);
    assert_eq!(unit.signature(shift).unwrap().return_type, "std::ostream&");
}

#[test]
fn conversion_operators_are_methods_returning_their_target() {
    let dir = tempfile::TempDir::new().unwrap();
    let unit = parse(
        dir.path(),
        "convert.cpp",
        "int helper() { return 1; }\n\
         class B {\npublic:\n    operator bool() const { return helper() > 0; }\n};\n",
    );

    let helper = definition(&unit, "helper");
    let convert = definition(&unit, "operator bool");
    assert_eq!(unit.kind(convert), NodeKind::Method);
    let signature = unit.signature(convert).unwrap();
    assert_eq!(signature.return_type, "bool");
    assert!(signature.parameters.is_empty());
    assert_eq!(IdentityResolver::new().resolve(&unit, convert), "B::bool-operator_bool");
    assert_eq!(calls(&unit), vec![(convert, Some(helper))]);
}
