mod common;
use common::*;
use expect_test::expect;

#[test]
fn test_var_statement_tree() {
    expect![[r#"
        SourceFile@0..10
          VarStmt@0..10
            KwVar@0..3 "var"
            VarDeclarator@4..9
              Name@4..5
                Ident@4..5 "x"
              Eq@6..7 "="
              Literal@8..9
                NumberLiteral@8..9 "1"
            Semicolon@9..10 ";"
    "#]]
    .assert_eq(&snapshot_parse("var x = 1;"));
}

#[test]
fn test_function_declaration_tree() {
    expect![[r#"
        SourceFile@0..17
          FunctionDecl@0..17
            KwFunction@0..8 "function"
            Name@9..10
              Ident@9..10 "f"
            ParamList@10..13
              LParen@10..11 "("
              Param@11..12
                NameRef@11..12
                  Ident@11..12 "a"
              RParen@12..13 ")"
            Block@14..17
              LBrace@14..15 "{"
              RBrace@16..17 "}"
    "#]]
    .assert_eq(&snapshot_parse("function f(a) { }"));
}

#[test]
fn test_declarations() {
    let root = parse_ok(
        "var a = 1, b;\nlet c = 2;\nconst d = 3;\nfunction e() {}\nasync function g() {}\nfunction* h() {}\nclass K extends Base {}\n",
    );
    let kinds: Vec<_> = root.children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::VarStmt,
            SyntaxKind::VarStmt,
            SyntaxKind::VarStmt,
            SyntaxKind::FunctionDecl,
            SyntaxKind::FunctionDecl,
            SyntaxKind::FunctionDecl,
            SyntaxKind::ClassDecl,
        ]
    );
    let first = root.first_child().unwrap();
    assert_eq!(
        first
            .children()
            .filter(|n| n.kind() == SyntaxKind::VarDeclarator)
            .count(),
        2
    );
}

#[test]
fn test_control_flow() {
    parse_ok(
        r"
if (a) { b(); } else if (c) d(); else { e(); }
for (var i = 0; i < n; i++) { total += i; }
for (const key in object) {}
for (let [k, v] of entries) {}
for (;;) { break; }
while (x) x--;
do { y++; } while (y < 10);
switch (kind) {
  case 1:
  case 2: handle(); break;
  default: fallback();
}
try { risky(); } catch (err) { log(err); } finally { done(); }
try { risky(); } catch { }
outer: for (;;) { continue outer; }
with (scope) { value; }
debugger;
;
",
    );
}

#[test]
fn test_return_without_operand_before_newline() {
    let root = parse_ok("function f() {\n  return\n  42;\n}\n");
    let block = root
        .descendants()
        .find(|n| n.kind() == SyntaxKind::Block)
        .unwrap();
    let kinds: Vec<_> = block.children().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![SyntaxKind::ReturnStmt, SyntaxKind::ExprStmt]);
}

#[test]
fn test_class_members() {
    let root = parse_ok(
        r"class Counter extends Base {
  #count = 0;
  static instances = 0;
  static { Counter.ready = true; }
  constructor(start) { super(); this.#count = start; }
  get value() { return this.#count; }
  set value(v) { this.#count = v; }
  static create() { return new Counter(0); }
  async *items() { yield 1; }
  ['computed']() {}
  get = 1;
}
",
    );
    let members = root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ClassMember)
        .count();
    assert_eq!(members, 9);
    assert!(root.descendants().any(|n| n.kind() == SyntaxKind::StaticBlock));
}

#[test]
fn test_imports_and_exports() {
    let root = parse_ok(
        r#"import 'polyfill';
import fs from 'fs';
import * as path from "path";
import def, { a, b as c, default as d } from './mod.js';
export function helper() {}
export const answer = 42;
export default class {}
export { helper as aid };
export * from './other';
"#,
    );
    let kinds: Vec<_> = root.children().map(|n| n.kind()).collect();
    assert_eq!(kinds.iter().filter(|k| **k == SyntaxKind::ImportDecl).count(), 4);
    assert_eq!(kinds.iter().filter(|k| **k == SyntaxKind::ExportDecl).count(), 5);

    let exported: Vec<_> = root
        .children()
        .filter(|n| n.kind() == SyntaxKind::ExportDecl)
        .filter_map(|n| n.first_child().map(|c| c.kind()))
        .collect();
    assert_eq!(
        exported,
        vec![SyntaxKind::FunctionDecl, SyntaxKind::VarStmt, SyntaxKind::ClassDecl]
    );
}

#[test]
fn test_let_as_identifier() {
    let kinds = top_level_kinds("let = 5;\nlet x = 1;\n");
    assert_eq!(kinds, vec![SyntaxKind::ExprStmt, SyntaxKind::VarStmt]);
}

#[test]
fn test_labeled_statement() {
    assert_eq!(
        top_level_kinds("loop: while (true) { break loop; }"),
        vec![SyntaxKind::LabeledStmt]
    );
}
