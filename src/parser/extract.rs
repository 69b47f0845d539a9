use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::graph::node::ExportKind;

use super::syntax::{Callee, ExportSpecifier, Exported, SyntaxNode, SyntaxTree};

/// Everything the graph needs to know about one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileFacts {
    /// Relative import specifiers (starting with `.`), in source order.
    pub imports: Vec<String>,
    /// Exported name -> kind. Last declaration wins on collision.
    pub exports: IndexMap<String, ExportKind>,
    /// Plain (`foo`) and two-level (`obj.method`) call names.
    pub calls: IndexSet<String>,
}

/// Walk a lowered tree and collect its imports, exports and calls.
pub fn extract(tree: &SyntaxTree) -> FileFacts {
    let mut extractor = Extractor::default();
    extractor.run(&tree.root);
    extractor.finish()
}

#[derive(Default)]
struct Extractor {
    facts: FileFacts,
    /// Top-level declarations, used to type `export { ... }` lists.
    locals: HashMap<String, ExportKind>,
    export_lists: Vec<ExportSpecifier>,
}

impl Extractor {
    /// Pre-order walk with an explicit work stack, so deep nesting costs no call stack.
    fn run(&mut self, root: &SyntaxNode) {
        let mut stack = vec![(root, 0)];
        while let Some((node, depth)) = stack.pop() {
            self.visit(node, depth);
            stack.extend(node.children().into_iter().rev().map(|c| (c, depth + 1)));
        }
    }

    /// `depth` is 1 for statements directly under the program root. Only those
    /// can export; an `export` inside a namespace body is not a file export.
    fn visit(&mut self, node: &SyntaxNode, depth: usize) {
        let top_level = depth == 1;

        match node {
            SyntaxNode::Import { specifier } => {
                // Bare specifiers name packages, not project files.
                if specifier.starts_with('.') {
                    self.facts.imports.push(specifier.clone());
                }
            }
            SyntaxNode::Function { name, exported, .. } => {
                self.declare(name.as_deref(), *exported, ExportKind::Function, top_level);
            }
            SyntaxNode::Class { name, exported, .. } => {
                self.declare(name.as_deref(), *exported, ExportKind::Variable, top_level);
            }
            SyntaxNode::Variables {
                exported,
                declarators,
            } => {
                if !top_level {
                    return;
                }
                for declarator in declarators {
                    let kind = if declarator.is_function {
                        ExportKind::Function
                    } else {
                        ExportKind::Variable
                    };
                    for name in &declarator.names {
                        self.locals.insert(name.clone(), kind);
                        if *exported {
                            self.export(name, kind);
                        }
                    }
                }
            }
            SyntaxNode::ExportDefault { name, .. } if top_level => {
                self.export(name.as_deref().unwrap_or("default"), ExportKind::Default);
            }
            SyntaxNode::ExportList { specifiers } if top_level => {
                self.export_lists.extend(specifiers.iter().cloned());
            }
            SyntaxNode::Call { callee, .. } => match callee {
                Callee::Identifier(name) => {
                    self.facts.calls.insert(name.clone());
                }
                Callee::Member { object, property } => {
                    self.facts.calls.insert(format!("{object}.{property}"));
                }
                Callee::Untracked => {}
            },
            SyntaxNode::ExportDefault { .. }
            | SyntaxNode::ExportList { .. }
            | SyntaxNode::Other { .. } => {}
        }
    }

    /// Record a function or class declaration.
    ///
    /// A named declaration exported as default keeps its name; functions keep
    /// the `function` kind, classes are tagged `default`.
    fn declare(&mut self, name: Option<&str>, exported: Exported, kind: ExportKind, top_level: bool) {
        if !top_level {
            return;
        }
        match (name, exported) {
            (Some(name), exported) => {
                self.locals.insert(name.to_owned(), kind);
                match exported {
                    Exported::No => {}
                    Exported::Named => self.export(name, kind),
                    Exported::Default if kind == ExportKind::Function => self.export(name, kind),
                    Exported::Default => self.export(name, ExportKind::Default),
                }
            }
            (None, Exported::Default) => self.export("default", ExportKind::Default),
            (None, _) => {}
        }
    }

    fn export(&mut self, name: &str, kind: ExportKind) {
        self.facts.exports.insert(name.to_owned(), kind);
    }

    fn finish(mut self) -> FileFacts {
        // Export lists may precede the declarations they name, so they are typed last.
        for spec in std::mem::take(&mut self.export_lists) {
            if spec.exported == "default" {
                self.export(&spec.local, ExportKind::Default);
            } else {
                let kind = self
                    .locals
                    .get(&spec.local)
                    .copied()
                    .unwrap_or(ExportKind::Variable);
                self.export(&spec.exported, kind);
            }
        }
        self.facts
    }
}
