use tree_sitter::Node;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Export status of a declaration, as written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exported {
    No,
    /// `export function f() {}` / `export const x = ...`
    Named,
    /// `export default function f() {}`
    Default,
}

/// The callee shape of a call expression.
///
/// Only the two shapes the call-edge heuristic matches on are kept; everything
/// else (`a.b.c()`, `this.x()`, `obj[key]()`, `import()`) is `Untracked`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    /// `foo()`
    Identifier(String),
    /// `obj.method()`
    Member { object: String, property: String },
    Untracked,
}

/// One declarator of a `const`/`let`/`var` statement.
#[derive(Debug, Clone)]
pub struct Declarator {
    /// Bound names in source order: one for `x = ...`, every binding of a
    /// destructuring pattern otherwise.
    pub names: Vec<String>,
    /// True when a plain identifier is bound to a function expression or arrow function.
    pub is_function: bool,
    pub children: Vec<SyntaxNode>,
}

/// One entry of an `export { local as exported }` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

/// A syntax tree node, reduced to the constructs the extractor consumes.
///
/// The tree owns its children and has no parent links, so any walk that
/// follows [`SyntaxNode::children`] terminates and sees each node once.
#[derive(Debug, Clone)]
pub enum SyntaxNode {
    /// `import ... from './x'` or `import './x'`. `specifier` is unquoted.
    Import { specifier: String },
    /// Function or generator declaration (also `export default function`).
    Function {
        name: Option<String>,
        exported: Exported,
        children: Vec<SyntaxNode>,
    },
    /// Class declaration, including TypeScript `abstract class`.
    Class {
        name: Option<String>,
        exported: Exported,
        children: Vec<SyntaxNode>,
    },
    /// `const` / `let` / `var` statement.
    Variables {
        exported: bool,
        declarators: Vec<Declarator>,
    },
    /// `export default <expression>`. `name` is set when the expression is a bare identifier.
    ExportDefault {
        name: Option<String>,
        children: Vec<SyntaxNode>,
    },
    /// `export { a, b as c }` without a `from` clause.
    ExportList { specifiers: Vec<ExportSpecifier> },
    Call {
        callee: Callee,
        children: Vec<SyntaxNode>,
    },
    Other { children: Vec<SyntaxNode> },
}

impl SyntaxNode {
    /// Direct structural children, in source order.
    pub fn children(&self) -> Vec<&SyntaxNode> {
        match self {
            SyntaxNode::Import { .. } | SyntaxNode::ExportList { .. } => Vec::new(),
            SyntaxNode::Function { children, .. }
            | SyntaxNode::Class { children, .. }
            | SyntaxNode::ExportDefault { children, .. }
            | SyntaxNode::Call { children, .. }
            | SyntaxNode::Other { children } => children.iter().collect(),
            SyntaxNode::Variables { declarators, .. } => declarators
                .iter()
                .flat_map(|d| d.children.iter())
                .collect(),
        }
    }
}

/// A lowered source file. The tree-sitter `Tree` is dropped after lowering.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub root: SyntaxNode,
}

// ---------------------------------------------------------------------------
// Lowering from tree-sitter
// ---------------------------------------------------------------------------

const FUNCTION_VALUE_KINDS: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
];

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn field_text(node: Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source).to_owned())
}

/// Strip the surrounding quotes of a string literal node's text.
fn unquote(raw: &str) -> String {
    let trimmed = raw
        .strip_prefix(['\'', '"'])
        .unwrap_or(raw);
    trimmed
        .strip_suffix(['\'', '"'])
        .unwrap_or(trimmed)
        .to_owned()
}

fn is_function_value(node: Node) -> bool {
    FUNCTION_VALUE_KINDS.contains(&node.kind())
}

/// Lower a tree-sitter subtree rooted at `node`.
pub fn lower(node: Node, source: &[u8]) -> SyntaxNode {
    lower_with(node, source, Exported::No)
}

fn lower_with(node: Node, source: &[u8], exported: Exported) -> SyntaxNode {
    match node.kind() {
        "import_statement" => lower_import(node, source),
        "export_statement" => lower_export(node, source),
        "function_declaration" | "generator_function_declaration" => SyntaxNode::Function {
            name: field_text(node, "name", source),
            exported,
            children: lower_children(node, source),
        },
        "class_declaration" | "abstract_class_declaration" => SyntaxNode::Class {
            name: field_text(node, "name", source),
            exported,
            children: lower_children(node, source),
        },
        "lexical_declaration" | "variable_declaration" => {
            lower_variables(node, source, exported != Exported::No)
        }
        "call_expression" => SyntaxNode::Call {
            callee: callee_of(node, source),
            children: lower_children(node, source),
        },
        _ => SyntaxNode::Other {
            children: lower_children(node, source),
        },
    }
}

fn lower_children(node: Node, source: &[u8]) -> Vec<SyntaxNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .map(|child| lower(child, source))
        .collect()
}

fn lower_import(node: Node, source: &[u8]) -> SyntaxNode {
    // `import x = require('./y')` has no `source` field on the statement itself
    // and is not an import declaration.
    match node.child_by_field_name("source") {
        Some(src) => SyntaxNode::Import {
            specifier: unquote(node_text(src, source)),
        },
        None => SyntaxNode::Other {
            children: Vec::new(),
        },
    }
}

fn lower_export(node: Node, source: &[u8]) -> SyntaxNode {
    // `export { x } from './y'` and `export * from './y'` are re-exports.
    if node.child_by_field_name("source").is_some() {
        return SyntaxNode::Other {
            children: Vec::new(),
        };
    }

    let is_default = {
        let mut cursor = node.walk();
        node.children(&mut cursor).any(|c| c.kind() == "default")
    };

    if let Some(decl) = node.child_by_field_name("declaration") {
        let exported = if is_default {
            Exported::Default
        } else {
            Exported::Named
        };
        return lower_with(decl, source, exported);
    }

    if let Some(value) = node.child_by_field_name("value") {
        // `export default function named() {}` can surface as a function expression value.
        if is_function_value(value)
            && let Some(name) = field_text(value, "name", source)
        {
            return SyntaxNode::Function {
                name: Some(name),
                exported: Exported::Default,
                children: lower_children(value, source),
            };
        }
        let name = (value.kind() == "identifier").then(|| node_text(value, source).to_owned());
        return SyntaxNode::ExportDefault {
            name,
            children: vec![lower(value, source)],
        };
    }

    let mut specifiers = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "export_clause" {
            continue;
        }
        let mut clause_cursor = child.walk();
        for spec in child.named_children(&mut clause_cursor) {
            if spec.kind() != "export_specifier" {
                continue;
            }
            if let Some(local) = field_text(spec, "name", source) {
                let local = unquote(&local);
                let exported = field_text(spec, "alias", source)
                    .map(|a| unquote(&a))
                    .unwrap_or_else(|| local.clone());
                specifiers.push(ExportSpecifier { local, exported });
            }
        }
    }

    if specifiers.is_empty() {
        SyntaxNode::Other {
            children: lower_children(node, source),
        }
    } else {
        SyntaxNode::ExportList { specifiers }
    }
}

fn lower_variables(node: Node, source: &[u8], exported: bool) -> SyntaxNode {
    let mut declarators = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "variable_declarator" {
            continue;
        }
        let Some(target) = child.child_by_field_name("name") else {
            continue;
        };
        let is_function = target.kind() == "identifier"
            && child
                .child_by_field_name("value")
                .is_some_and(is_function_value);
        declarators.push(Declarator {
            names: binding_names(target, source),
            is_function,
            children: lower_children(child, source),
        });
    }
    SyntaxNode::Variables {
        exported,
        declarators,
    }
}

/// Names bound by a declarator target, walking destructuring patterns.
///
/// Object keys (`{ key: value }`) and default values (`{ a = b }`, `[c = d]`)
/// bind nothing; only the value and left-hand sides are followed.
fn binding_names(target: Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack = vec![target];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                names.push(node_text(node, source).to_owned());
            }
            "pair_pattern" => stack.extend(node.child_by_field_name("value")),
            "object_assignment_pattern" | "assignment_pattern" => {
                stack.extend(node.child_by_field_name("left"));
            }
            _ => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
        }
    }
    names
}

fn callee_of(call: Node, source: &[u8]) -> Callee {
    let Some(function) = call.child_by_field_name("function") else {
        return Callee::Untracked;
    };
    match function.kind() {
        "identifier" => Callee::Identifier(node_text(function, source).to_owned()),
        "member_expression" => {
            let object = function.child_by_field_name("object");
            let property = function.child_by_field_name("property");
            match (object, property) {
                (Some(o), Some(p)) if o.kind() == "identifier" && p.kind() == "property_identifier" => {
                    Callee::Member {
                        object: node_text(o, source).to_owned(),
                        property: node_text(p, source).to_owned(),
                    }
                }
                _ => Callee::Untracked,
            }
        }
        _ => Callee::Untracked,
    }
}

/// First `ERROR` or `MISSING` node in pre-order, if any.
///
/// Walks with a cursor so that nesting depth costs no stack.
pub(crate) fn first_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        // Clean subtrees are skipped whole.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// First node found deeper than `limit` levels below `root`, if any.
pub(crate) fn first_beyond_depth(root: Node, limit: usize) -> Option<Node> {
    let mut cursor = root.walk();
    let mut depth = 0;
    loop {
        if depth > limit {
            return Some(cursor.node());
        }
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
            depth -= 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::languages::Grammar;

    fn lower_ts(src: &str) -> SyntaxNode {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&Grammar::TypeScript.language()).unwrap();
        let tree = parser.parse(src.as_bytes(), None).unwrap();
        lower(tree.root_node(), src.as_bytes())
    }

    fn top_level(root: &SyntaxNode) -> Vec<&SyntaxNode> {
        root.children()
    }

    #[test]
    fn test_import_specifier_is_unquoted() {
        let root = lower_ts("import { a } from './a';\nimport \"./side-effect\";");
        let specs: Vec<_> = top_level(&root)
            .into_iter()
            .filter_map(|n| match n {
                SyntaxNode::Import { specifier } => Some(specifier.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(specs, vec!["./a", "./side-effect"]);
    }

    #[test]
    fn test_exported_function_declaration() {
        let root = lower_ts("export function helper() { return 1; }");
        match top_level(&root)[0] {
            SyntaxNode::Function { name, exported, .. } => {
                assert_eq!(name.as_deref(), Some("helper"));
                assert_eq!(*exported, Exported::Named);
            }
            other => panic!("expected Function, got {:?}", other),
        }
    }

    #[test]
    fn test_exported_arrow_const_is_function_declarator() {
        let root = lower_ts("export const run = () => 1, limit = 3;");
        match top_level(&root)[0] {
            SyntaxNode::Variables {
                exported,
                declarators,
            } => {
                assert!(*exported);
                assert_eq!(declarators.len(), 2);
                assert_eq!(declarators[0].names, vec!["run"]);
                assert!(declarators[0].is_function);
                assert_eq!(declarators[1].names, vec!["limit"]);
                assert!(!declarators[1].is_function);
            }
            other => panic!("expected Variables, got {:?}", other),
        }
    }

    #[test]
    fn test_export_default_identifier() {
        let root = lower_ts("const app = 1;\nexport default app;");
        match top_level(&root)[1] {
            SyntaxNode::ExportDefault { name, .. } => assert_eq!(name.as_deref(), Some("app")),
            other => panic!("expected ExportDefault, got {:?}", other),
        }
    }

    #[test]
    fn test_export_list_with_alias() {
        let root = lower_ts("function a() {}\nexport { a, a as b };");
        match top_level(&root)[1] {
            SyntaxNode::ExportList { specifiers } => {
                assert_eq!(specifiers.len(), 2);
                assert_eq!(specifiers[1].local, "a");
                assert_eq!(specifiers[1].exported, "b");
            }
            other => panic!("expected ExportList, got {:?}", other),
        }
    }

    #[test]
    fn test_reexport_is_not_an_import_or_export() {
        let root = lower_ts("export { x } from './x';\nexport * from './y';");
        for node in top_level(&root) {
            assert!(
                matches!(node, SyntaxNode::Other { children } if children.is_empty()),
                "re-exports should lower to an empty Other, got {:?}",
                node
            );
        }
    }

    #[test]
    fn test_callee_shapes() {
        let root = lower_ts("foo(); obj.method(); a.b.c(); this.x();");
        let mut callees = Vec::new();
        let mut stack = vec![&root];
        while let Some(node) = stack.pop() {
            if let SyntaxNode::Call { callee, .. } = node {
                callees.push(callee.clone());
            }
            stack.extend(node.children());
        }
        assert!(callees.contains(&Callee::Identifier("foo".into())));
        assert!(callees.contains(&Callee::Member {
            object: "obj".into(),
            property: "method".into()
        }));
        assert_eq!(
            callees.iter().filter(|c| **c == Callee::Untracked).count(),
            2,
            "deep chains and `this` calls are untracked"
        );
    }

    #[test]
    fn test_destructuring_binds_values_not_keys() {
        let root = lower_ts("const { a, b: renamed, c = fallback, ...rest } = o, [x, [y], z = w] = arr;");
        match top_level(&root)[0] {
            SyntaxNode::Variables { declarators, .. } => {
                assert_eq!(declarators[0].names, vec!["a", "renamed", "c", "rest"]);
                assert_eq!(declarators[1].names, vec!["x", "y", "z"]);
                assert!(declarators.iter().all(|d| !d.is_function));
            }
            other => panic!("expected Variables, got {:?}", other),
        }
    }

    #[test]
    fn test_default_exported_class_keeps_name() {
        let root = lower_ts("export default class App {}");
        match top_level(&root)[0] {
            SyntaxNode::Class { name, exported, .. } => {
                assert_eq!(name.as_deref(), Some("App"));
                assert_eq!(*exported, Exported::Default);
            }
            other => panic!("expected Class, got {:?}", other),
        }
    }

    #[test]
    fn test_first_beyond_depth() {
        let src = format!("const v = {}1{};", "[".repeat(40), "]".repeat(40));
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&Grammar::TypeScript.language()).unwrap();
        let tree = parser.parse(src.as_bytes(), None).unwrap();
        assert!(first_beyond_depth(tree.root_node(), 30).is_some());
        assert!(first_beyond_depth(tree.root_node(), 60).is_none());
    }

    #[test]
    fn test_first_error_none_for_valid_source() {
        let src = "const x = 1;";
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&Grammar::TypeScript.language()).unwrap();
        let tree = parser.parse(src.as_bytes(), None).unwrap();
        assert!(first_error(tree.root_node()).is_none());
    }
}
